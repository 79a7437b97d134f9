// ============================================================================
// mediadex-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg Toolchain
//
// This module encapsulates interactions with the external command-line
// tools mediadex depends on (ffmpeg and ffprobe): resolving where they
// live, bootstrapping a local copy when they are absent, and executing
// probe commands against media files.
//
// KEY COMPONENTS:
// - Toolchain: resolved executable location, shared read-only after resolution
// - ensure_toolchain: locate-or-bootstrap entry point
// - MediaProber trait and the ffprobe-backed implementation
// - Dependency checking via the `-version` probe

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info, warn};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Archive download, unpack, and executable-directory location
pub mod bootstrap;

/// Command execution with timeout enforcement
pub mod command;

/// ffprobe invocation and the MediaProber capability
pub mod ffprobe;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffprobe::{FfprobeProber, MediaProber};

// ============================================================================
// TOOLCHAIN LOCATION
// ============================================================================

/// The media probe executable.
pub const FFPROBE: &str = "ffprobe";

/// The media processing executable.
pub const FFMPEG: &str = "ffmpeg";

/// Resolved location of the ffmpeg/ffprobe executables.
///
/// `None` means the executables are resolvable via the standard search
/// path. Computed once per run and never mutated afterward, so it may be
/// freely shared across concurrent probe workers.
#[derive(Debug, Clone, Default)]
pub struct Toolchain {
    bin_dir: Option<PathBuf>,
}

impl Toolchain {
    /// Toolchain resolvable via the standard search path.
    pub fn on_search_path() -> Self {
        Self { bin_dir: None }
    }

    /// Toolchain rooted at an explicit executables directory.
    pub fn at(bin_dir: PathBuf) -> Self {
        Self {
            bin_dir: Some(bin_dir),
        }
    }

    pub fn bin_dir(&self) -> Option<&Path> {
        self.bin_dir.as_deref()
    }

    /// Builds a `Command` for `exe` resolved against this location.
    pub fn command(&self, exe: &str) -> Command {
        match &self.bin_dir {
            Some(dir) => Command::new(dir.join(exe_name(exe))),
            None => Command::new(exe),
        }
    }
}

/// Platform executable file name (`.exe` suffix on Windows).
fn exe_name(exe: &str) -> String {
    if cfg!(windows) {
        format!("{exe}.exe")
    } else {
        exe.to_string()
    }
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks whether `exe` is available and executable at the given location.
///
/// Runs the executable with `-version`, discarding all output. Only a
/// NotFound spawn error counts as missing; the exit status is
/// deliberately ignored.
pub fn check_dependency(toolchain: &Toolchain, exe: &str) -> CoreResult<()> {
    let result = toolchain
        .command(exe)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            debug!("Found dependency: {exe}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Dependency '{exe}' not found.");
            Err(CoreError::DependencyNotFound(exe.to_string()))
        }
        Err(e) => {
            warn!("Failed to start dependency check command '{exe}': {e}");
            Err(CoreError::CommandStart(exe.to_string(), e))
        }
    }
}

// ============================================================================
// TOOLCHAIN RESOLUTION
// ============================================================================

/// Resolves a working toolchain, bootstrapping a local copy if needed.
///
/// The search path is probed first; when that fails, a packaged
/// distribution is installed into `cache_dir` (reusing any previously
/// downloaded archive or unpacked build) and verified. Failure after a
/// bootstrap attempt is fatal: no enrichment is possible without a
/// working probe tool.
pub fn ensure_toolchain(cache_dir: &Path) -> CoreResult<Toolchain> {
    let from_path = Toolchain::on_search_path();
    if check_dependency(&from_path, FFMPEG).is_ok() && check_dependency(&from_path, FFPROBE).is_ok()
    {
        debug!("ffmpeg and ffprobe resolvable via the standard search path");
        return Ok(from_path);
    }

    info!("ffmpeg toolchain not found on the search path, bootstrapping a local copy");
    let bin_dir = bootstrap::install(cache_dir)
        .map_err(|e| CoreError::ToolchainUnavailable(e.to_string()))?;
    let toolchain = Toolchain::at(bin_dir.clone());

    for exe in [FFMPEG, FFPROBE] {
        check_dependency(&toolchain, exe).map_err(|e| {
            CoreError::ToolchainUnavailable(format!(
                "bootstrapped toolchain at {} failed verification: {e}",
                bin_dir.display()
            ))
        })?;
    }

    info!("ffmpeg toolchain installed at {}", bin_dir.display());
    Ok(toolchain)
}
