//! External command execution with timeout enforcement.

use std::io::Read;
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use log::debug;

use crate::error::{CoreError, CoreResult};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs `cmd` to completion, capturing stdout and stderr.
///
/// The process is killed if it exceeds `timeout`, which surfaces as
/// `CoreError::CommandTimeout`. A NotFound spawn error surfaces as
/// `CoreError::DependencyNotFound` so callers can treat a vanished
/// executable like any other missing dependency.
pub fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> CoreResult<Output> {
    let name = cmd.get_program().to_string_lossy().into_owned();
    debug!("Running command: {cmd:?}");

    let mut child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::DependencyNotFound(name.clone())
            } else {
                CoreError::CommandStart(name.clone(), e)
            }
        })?;

    // Drain the pipes on threads so a chatty process cannot deadlock
    // against a full pipe buffer while we poll for exit.
    let stdout_handle = child.stdout.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).ok();
            buf
        })
    });
    let stderr_handle = child.stderr.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).ok();
            buf
        })
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CoreError::CommandTimeout(name, timeout.as_secs()));
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(CoreError::CommandStart(name, e)),
        }
    };

    let stdout = stdout_handle
        .map(|handle| handle.join().unwrap_or_default())
        .unwrap_or_default();
    let stderr = stderr_handle
        .map(|handle| handle.join().unwrap_or_default())
        .unwrap_or_default();

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout() {
        let mut cmd = Command::new("echo");
        cmd.arg("test");
        let output = run_with_timeout(&mut cmd, Duration::from_secs(5)).unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "test");
    }

    #[test]
    fn test_missing_executable_is_dependency_not_found() {
        let mut cmd = Command::new("mediadex-no-such-binary");
        let result = run_with_timeout(&mut cmd, Duration::from_secs(1));
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    }

    #[test]
    #[cfg(unix)]
    fn test_slow_command_times_out() {
        let mut cmd = Command::new("sleep");
        cmd.arg("5");
        let start = Instant::now();
        let result = run_with_timeout(&mut cmd, Duration::from_millis(200));
        assert!(matches!(result, Err(CoreError::CommandTimeout(_, _))));
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
