use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn mediadex_cmd() -> Command {
    Command::cargo_bin("mediadex").expect("Failed to find mediadex binary")
}

// These tests exercise argument handling only: they must pass without
// network access and without ffmpeg installed, so none of them reaches
// the toolchain bootstrap.

#[test]
fn test_no_subcommand_shows_usage() -> Result<(), Box<dyn Error>> {
    mediadex_cmd().assert().failure().stderr(contains("Usage"));
    Ok(())
}

#[test]
fn test_scan_requires_roots() -> Result<(), Box<dyn Error>> {
    mediadex_cmd()
        .arg("scan")
        .assert()
        .failure()
        .stderr(contains("Usage"));
    Ok(())
}

#[test]
fn test_scan_rejects_unknown_layout() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    mediadex_cmd()
        .arg("scan")
        .arg(root.path())
        .arg("--layout")
        .arg("sideways")
        .assert()
        .failure()
        .stderr(contains("invalid value"));
    Ok(())
}

#[test]
fn test_scan_rejects_non_numeric_timeout() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    mediadex_cmd()
        .arg("scan")
        .arg(root.path())
        .arg("--probe-timeout")
        .arg("soon")
        .assert()
        .failure()
        .stderr(contains("invalid value"));
    Ok(())
}

#[test]
fn test_help_lists_scan_subcommand() -> Result<(), Box<dyn Error>> {
    mediadex_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("scan"));
    Ok(())
}
