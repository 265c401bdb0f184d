//! ``src/operators/process.rs``
//!
//! # Process collaborator
//!
//! Runs shell command lines through `sh -c`, either capturing stdout line by
//! line (virtual directories) or attached to the terminal (file operations,
//! editor, shell). Both block until the child exits.

use std::{
    io::{BufRead, BufReader},
    process::{Command, ExitStatus, Stdio},
    time::Instant,
};
use tracing::{debug, info, warn};

use crate::error::AppError;

const SHELL: &str = "sh";

fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new(SHELL);
    cmd.arg("-c").arg(command_line);
    cmd
}

/// Runs `command_line` and returns its stdout split into lines, each without
/// its trailing line terminator.
///
/// Only a failure to start is an error. The exit status is checked after the
/// output is fully drained; a failing command still returns what it printed.
pub fn run_capturing_stdout(command_line: &str) -> Result<Vec<String>, AppError> {
    let start_time = Instant::now();

    let mut child = shell_command(command_line)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| AppError::spawn_failed(command_line, e))?;

    let mut lines: Vec<String> = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        let mut reader = BufReader::new(stdout);
        let mut buf: Vec<u8> = Vec::with_capacity(256);

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => lines.push(chomp(&buf)),
                Err(e) => {
                    warn!("Stopped reading output of `{}`: {}", command_line, e);
                    break;
                }
            }
        }
    }

    match child.wait() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!(
            "`{}` exited with {:?}; keeping {} captured lines",
            command_line,
            status.code(),
            lines.len()
        ),
        Err(e) => warn!("Failed to wait for `{}`: {}", command_line, e),
    }

    info!(
        marker = "VIRTUAL_DIRECTORY",
        lines = lines.len(),
        "Captured `{}` in {:?}",
        command_line,
        start_time.elapsed()
    );

    Ok(lines)
}

/// Runs `command_line` attached to the terminal and waits for it.
pub fn run_interactive(command_line: &str) -> Result<ExitStatus, AppError> {
    info!("Running `{}`", command_line);

    let status = shell_command(command_line)
        .status()
        .map_err(|e| AppError::spawn_failed(command_line, e))?;

    debug!("`{}` finished with {:?}", command_line, status.code());
    Ok(status)
}

/// Lossy UTF-8 decode without the trailing `\n` or `\r\n`.
fn chomp(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chomp_strips_one_terminator() {
        assert_eq!(chomp(b"a.txt\n"), "a.txt");
        assert_eq!(chomp(b"a.txt\r\n"), "a.txt");
        assert_eq!(chomp(b"last"), "last");
        assert_eq!(chomp(b"\n"), "");
        assert_eq!(chomp(b"two\n\n"), "two\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_lines_in_order() {
        let lines = run_capturing_stdout("printf 'y.txt\\nx.txt\\n'").unwrap();
        assert_eq!(lines, ["y.txt", "x.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_keeps_output() {
        let lines = run_capturing_stdout("echo partial; exit 3").unwrap();
        assert_eq!(lines, ["partial"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_final_newline_is_kept() {
        let lines = run_capturing_stdout("printf 'a\\nb'").unwrap();
        assert_eq!(lines, ["a", "b"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_interactive_reports_exit_status() {
        let status = run_interactive("exit 4").unwrap();
        assert_eq!(status.code(), Some(4));
    }
}
