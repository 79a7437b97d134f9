//! FFprobe integration for media metadata extraction.
//!
//! This module provides the probing capability used during enrichment:
//! executing ffprobe against a media file and returning its structured
//! JSON report (container format plus all streams) as an opaque payload.

use std::path::Path;
use std::time::Duration;

use log::debug;
use serde_json::Value;

use super::command::run_with_timeout;
use super::{FFPROBE, Toolchain};
use crate::error::{CoreError, CoreResult};

/// Capability for extracting structured metadata from a media file.
///
/// The processing layer consumes this trait rather than spawning ffprobe
/// directly, so tests can substitute an implementation that never
/// launches external processes.
pub trait MediaProber: Sync {
    /// Probes `path`, returning the raw metadata payload.
    fn probe(&self, path: &Path) -> CoreResult<Value>;
}

/// [`MediaProber`] backed by the ffprobe executable of a resolved
/// toolchain. Cheap to share; each probe spawns one bounded process.
pub struct FfprobeProber {
    toolchain: Toolchain,
    timeout: Duration,
}

impl FfprobeProber {
    pub fn new(toolchain: Toolchain, timeout: Duration) -> Self {
        Self { toolchain, timeout }
    }
}

impl MediaProber for FfprobeProber {
    fn probe(&self, path: &Path) -> CoreResult<Value> {
        debug!("Running ffprobe on: {}", path.display());
        let mut cmd = self.toolchain.command(FFPROBE);
        cmd.args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path);

        let output = run_with_timeout(&mut cmd, self.timeout)?;
        if !output.status.success() {
            return Err(CoreError::CommandFailed(
                FFPROBE.to_string(),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
