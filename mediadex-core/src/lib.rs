//! Core library for building media inventories backed by ffmpeg and ffprobe.
//!
//! This crate provides filesystem discovery and classification, a
//! bootstrap for acquiring the ffmpeg toolchain when it is absent,
//! ffprobe-backed metadata enrichment with per-file failure isolation,
//! and serialization of the aggregated inventory document.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mediadex_core::{CoreConfig, FfprobeProber, build_inventory, ensure_toolchain, write_document};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(vec![PathBuf::from("/media/library")]);
//! config.validate().unwrap();
//!
//! let toolchain = ensure_toolchain(&config.cache_dir).unwrap();
//! let prober = FfprobeProber::new(toolchain, config.probe_timeout);
//!
//! let document = build_inventory(&config, &prober).unwrap();
//! write_document(&document, &config.output_path).unwrap();
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod inventory;
pub mod processing;

// Re-exports for public API
pub use config::{CoreConfig, Layout};
pub use discovery::{VIDEO_EXTENSIONS, is_video_file};
pub use error::{CoreError, CoreResult};
pub use external::{FfprobeProber, MediaProber, Toolchain, ensure_toolchain};
pub use inventory::{Entry, InventoryDocument, write_document};
pub use processing::build_inventory;
