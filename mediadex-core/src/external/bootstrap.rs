//! Toolchain bootstrap: fetch, unpack, and locate a packaged ffmpeg build.
//!
//! When ffmpeg/ffprobe are not resolvable on the search path, a release
//! essentials archive is downloaded into the cache directory, unpacked,
//! and the unpacked build's `bin` directory becomes the toolchain
//! location. Both steps are idempotent across runs: an existing archive
//! is not re-downloaded and an existing unpack directory is not
//! re-extracted, so a partially bootstrapped cache resumes where it left
//! off without network access.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use walkdir::WalkDir;

use crate::error::{CoreError, CoreResult};

/// Fixed distribution archive for the toolchain.
pub const ARCHIVE_URL: &str = "https://www.gyan.dev/ffmpeg/builds/ffmpeg-release-essentials.zip";

/// Local archive file name inside the cache directory.
pub const ARCHIVE_FILENAME: &str = "ffmpeg-release-essentials.zip";

/// Directory inside the cache directory that receives the unpacked build.
pub const UNPACK_DIRNAME: &str = "ffmpeg";

/// Naming convention of the directory carrying the executables.
const ESSENTIALS_SUFFIX: &str = "essentials_build";

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Installs the toolchain into `cache_dir` and returns its executables
/// directory. Reuses any archive or unpacked build already present.
pub fn install(cache_dir: &Path) -> CoreResult<PathBuf> {
    fs::create_dir_all(cache_dir)?;

    let unpack_dir = cache_dir.join(UNPACK_DIRNAME);
    if !unpack_dir.exists() {
        let archive_path = cache_dir.join(ARCHIVE_FILENAME);
        if archive_path.exists() {
            info!("Reusing downloaded archive {}", archive_path.display());
        } else {
            info!("Downloading ffmpeg from {ARCHIVE_URL}");
            download_archive(ARCHIVE_URL, &archive_path)?;
        }
        info!("Extracting ffmpeg into {}", unpack_dir.display());
        extract_zip(&archive_path, &unpack_dir)?;
    }

    locate_essentials_bin(&unpack_dir)
}

fn download_archive(url: &str, output: &Path) -> CoreResult<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| CoreError::Download(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| CoreError::Download(format!("request failed: {e}")))?;
    if !response.status().is_success() {
        return Err(CoreError::Download(format!(
            "HTTP {}: {url}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .map_err(|e| CoreError::Download(format!("failed to read response: {e}")))?;
    let mut file = File::create(output)?;
    file.write_all(&bytes)?;
    Ok(())
}

fn extract_zip(archive_path: &Path, output_dir: &Path) -> CoreResult<()> {
    fs::create_dir_all(output_dir)?;
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| CoreError::Extract(format!("failed to open zip: {e}")))?;
    archive
        .extract(output_dir)
        .map_err(|e| CoreError::Extract(format!("failed to extract zip: {e}")))
}

/// Searches the unpacked tree for the essentials build directory and
/// returns its `bin` subdirectory.
fn locate_essentials_bin(unpack_dir: &Path) -> CoreResult<PathBuf> {
    for entry in WalkDir::new(unpack_dir).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_dir()
            && entry
                .file_name()
                .to_string_lossy()
                .ends_with(ESSENTIALS_SUFFIX)
        {
            return Ok(entry.path().join("bin"));
        }
    }
    Err(CoreError::ToolchainUnavailable(format!(
        "no '*{ESSENTIALS_SUFFIX}' directory found under {}",
        unpack_dir.display()
    )))
}
