//! src/host.rs
//! ============================================================================
//! # Host: side effects the dispatcher asks for
//!
//! The dispatcher decides *what* happens to the browser state; the host does
//! everything that touches the process or the terminal: the working
//! directory, `$HOME`, prompting for and running commands. Tests substitute a
//! recording implementation.

use std::{
    env,
    ffi::OsStr,
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use tracing::{debug, info};

use crate::{
    error::AppError,
    operators::process,
    terminal::TerminalSession,
};

/// A virtual-directory command and the lines it printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualOutput {
    pub command: String,
    pub lines: Vec<String>,
}

pub trait Host {
    /// Makes `path` the process working directory and exports it as `PWD`.
    fn enter_directory(&mut self, path: &Path) -> Result<(), AppError>;

    fn home_dir(&self) -> Option<PathBuf>;

    /// Prompts for a command line and runs it, capturing stdout.
    /// `Ok(None)` when the user entered nothing.
    fn read_virtual(&mut self, prompt: &str) -> Result<Option<VirtualOutput>, AppError>;

    /// Runs `command_line` on the terminal. The exit status is only logged.
    fn run_interactive(&mut self, command_line: &str, pause: bool) -> Result<(), AppError>;
}

/// Host backed by the real process and terminal.
pub struct SystemHost<'a> {
    session: &'a mut TerminalSession,
}

impl<'a> SystemHost<'a> {
    pub fn new(session: &'a mut TerminalSession) -> Self {
        Self { session }
    }
}

impl Host for SystemHost<'_> {
    fn enter_directory(&mut self, path: &Path) -> Result<(), AppError> {
        env::set_current_dir(path)
            .map_err(|e| AppError::navigation_failed(path, e.to_string()))?;
        // SAFETY: the browser is single-threaded; the log writer thread never
        // reads the environment.
        unsafe { env::set_var("PWD", path) };
        info!("Working directory is now {}", path.display());
        Ok(())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()))
    }

    fn read_virtual(&mut self, prompt: &str) -> Result<Option<VirtualOutput>, AppError> {
        self.session.suspended(false, || -> Result<Option<VirtualOutput>, AppError> {
            let Some(command) = prompt_line(prompt, &mut io::stdin().lock(), &mut io::stdout())?
            else {
                debug!("Virtual directory prompt cancelled");
                return Ok(None);
            };
            let lines = process::run_capturing_stdout(&command)?;
            Ok(Some(VirtualOutput { command, lines }))
        })?
    }

    fn run_interactive(&mut self, command_line: &str, pause: bool) -> Result<(), AppError> {
        let status = self
            .session
            .suspended(pause, || process::run_interactive(command_line))??;
        if status.success() {
            debug!("`{}` finished", command_line);
        } else {
            let failure = AppError::ExternalCmd {
                cmd: command_line.to_string(),
                code: status.code(),
            };
            debug!("{}", failure);
        }
        Ok(())
    }
}

/// Directory to start in: `pwd` when it resolves to a directory, otherwise
/// `cwd`. Both come back canonicalized.
pub fn start_directory(pwd: Option<&OsStr>, cwd: &Path) -> Result<PathBuf, AppError> {
    if let Some(pwd) = pwd.filter(|pwd| !pwd.is_empty())
        && let Ok(resolved) = fs::canonicalize(pwd)
        && resolved.is_dir()
    {
        return Ok(resolved);
    }

    fs::canonicalize(cwd).map_err(|e| AppError::navigation_failed(cwd, e.to_string()))
}

/// Writes `prompt` and reads one line. End of input or a blank line yields
/// `None`; the line terminator is not part of the command.
fn prompt_line<R, W>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Option<String>, AppError>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let command = line.trim_end_matches(['\n', '\r']);
    if command.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(command.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(typed: &str) -> (Option<String>, String) {
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut output: Vec<u8> = Vec::new();
        let command = prompt_line("/srv > ", &mut input, &mut output).unwrap();
        (command, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_is_written_before_reading() {
        let (_, shown) = answer("ls\n");
        assert_eq!(shown, "/srv > ");
    }

    #[test]
    fn test_end_of_input_cancels() {
        assert_eq!(answer("").0, None);
    }

    #[test]
    fn test_blank_line_cancels() {
        assert_eq!(answer("\n").0, None);
        assert_eq!(answer("   \n").0, None);
    }

    #[test]
    fn test_line_terminators_are_stripped() {
        assert_eq!(answer("ls\r\n").0.as_deref(), Some("ls"));
        assert_eq!(answer("find . -name '*.rs'\n").0.as_deref(), Some("find . -name '*.rs'"));
    }

    #[test]
    fn test_only_first_line_is_read() {
        assert_eq!(answer("pwd\nrm -rf x\n").0.as_deref(), Some("pwd"));
    }

    #[test]
    fn test_start_directory_prefers_pwd() {
        let root = tempfile::tempdir().unwrap();
        let logical = root.path().join("logical");
        fs::create_dir(&logical).unwrap();

        let start = start_directory(Some(logical.as_os_str()), root.path()).unwrap();

        assert_eq!(start, fs::canonicalize(&logical).unwrap());
    }

    #[test]
    fn test_stale_pwd_falls_back_to_working_directory() {
        let root = tempfile::tempdir().unwrap();
        let gone = root.path().join("gone");

        let start = start_directory(Some(gone.as_os_str()), root.path()).unwrap();
        assert_eq!(start, fs::canonicalize(root.path()).unwrap());

        let start = start_directory(None, root.path()).unwrap();
        assert_eq!(start, fs::canonicalize(root.path()).unwrap());
    }

    #[test]
    fn test_pwd_naming_a_file_is_ignored() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("plain.txt");
        fs::write(&file, "").unwrap();

        let start = start_directory(Some(file.as_os_str()), root.path()).unwrap();

        assert_eq!(start, fs::canonicalize(root.path()).unwrap());
    }
}
