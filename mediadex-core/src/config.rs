//! Configuration structures and constants for the mediadex-core library.
//!
//! This module provides the configuration for inventory runs: which roots
//! to walk, the output document shape and location, where the bootstrapped
//! toolchain is cached, and how long a single probe may run.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

// Default constants

/// Default per-file probe timeout in seconds. A probe that exceeds this
/// bound is killed and treated like any other probe failure.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Default output document path, overwritten on every run.
pub const DEFAULT_OUTPUT_FILENAME: &str = "media_info.json";

/// Output shape of the inventory document.
///
/// Both shapes are supported as an explicit choice; existing consumers of
/// either remain supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One entry per filesystem object, all as siblings in one sequence.
    /// Directories carry no `contents` field.
    Flat,
    /// One rooted tree per requested root, with directories containing a
    /// nested `contents` sequence.
    Tree,
}

/// Main configuration structure for the mediadex-core library.
///
/// Created by the consumer of the library (e.g., mediadex-cli) and passed
/// to [`crate::processing::build_inventory`]. Only `roots` is required;
/// the remaining fields default to the historical behavior of the tool.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Root paths to inventory, processed in order.
    pub roots: Vec<PathBuf>,

    /// Output shape of the inventory document.
    pub layout: Layout,

    /// Where the inventory document is written.
    pub output_path: PathBuf,

    /// Directory holding the downloaded toolchain archive and unpacked
    /// build. Explicit rather than implied by the working directory so
    /// runs from different directories share one cache.
    pub cache_dir: PathBuf,

    /// Upper bound for a single probe invocation.
    pub probe_timeout: Duration,
}

impl CoreConfig {
    /// Creates a configuration for the given roots with default output
    /// path, flat layout, current-directory cache, and default timeout.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            layout: Layout::Flat,
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
            cache_dir: PathBuf::from("."),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }

    /// Validates the configuration, returning `CoreError::Config` on the
    /// first problem found.
    pub fn validate(&self) -> CoreResult<()> {
        if self.roots.is_empty() {
            return Err(CoreError::Config("no root paths supplied".to_string()));
        }
        if self.probe_timeout.is_zero() {
            return Err(CoreError::Config(
                "probe timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_roots() {
        let config = CoreConfig::new(Vec::new());
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = CoreConfig::new(vec![PathBuf::from(".")]);
        config.probe_timeout = Duration::ZERO;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_defaults() {
        let config = CoreConfig::new(vec![PathBuf::from("/media")]);
        assert!(config.validate().is_ok());
        assert_eq!(config.layout, Layout::Flat);
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_FILENAME));
        assert_eq!(
            config.probe_timeout,
            Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS)
        );
    }
}
