//! src/terminal.rs
//! ============================================================================
//! # `TerminalSession`: raw mode, alternate screen, and suspension
//!
//! Owns the ratatui terminal. External programs run between `suspend` and
//! `resume`; [`TerminalSession::suspended`] pairs the two so the drawing mode
//! always comes back, whatever the program did.

use std::io::{self, Stdout, Write};
use std::panic::PanicHookInfo;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info, warn};

use crate::{error::AppError, model::layout::Viewport};

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Shown after a command whose output should stay readable.
pub const PAUSE_MESSAGE: &str = "HIT ANY KEY";

pub struct TerminalSession {
    terminal: AppTerminal,
    active: bool,
}

impl TerminalSession {
    /// Enables raw mode and switches to the alternate screen. Raw mode is
    /// switched back off when a later step fails.
    pub fn enter() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(e).with_context("enable raw mode"))?;

        let terminal = undo_on_error(
            || {
                let mut stdout = io::stdout();
                execute!(stdout, EnterAlternateScreen, Hide)
                    .map_err(|e| AppError::terminal(e).with_context("enter alternate screen"))?;

                let backend = CrosstermBackend::new(stdout);
                Terminal::new(backend).map_err(AppError::terminal)
            },
            restore_plain_terminal,
        )?;

        info!("Terminal setup complete");
        Ok(Self {
            terminal,
            active: true,
        })
    }

    pub fn draw<F>(&mut self, render: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.terminal.draw(render).map_err(AppError::terminal)?;
        Ok(())
    }

    /// Current terminal size as a browser viewport.
    pub fn viewport() -> Result<Viewport, AppError> {
        let (columns, rows) = terminal::size().map_err(AppError::terminal)?;
        Ok(Viewport::from_terminal(columns, rows))
    }

    /// Runs `action` on the plain terminal and restores drawing mode after it,
    /// also when suspending partly failed. With `pause`, waits for one key
    /// first so the program's output can be read.
    pub fn suspended<T, F>(&mut self, pause: bool, action: F) -> Result<T, AppError>
    where
        F: FnOnce() -> T,
    {
        if let Err(e) = self.suspend() {
            warn!("Suspend failed, restoring terminal: {}", e);
            self.resume()?;
            return Err(e);
        }

        let output = action();

        if pause && let Err(e) = wait_for_key() {
            warn!("Pause prompt failed: {}", e);
        }

        self.resume()?;
        Ok(output)
    }

    fn suspend(&mut self) -> Result<(), AppError> {
        debug!("Suspending terminal UI");
        self.active = false;
        disable_raw_mode().map_err(AppError::terminal)?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)
            .map_err(AppError::terminal)?;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), AppError> {
        debug!("Resuming terminal UI");
        enable_raw_mode().map_err(AppError::terminal)?;
        // From here on Drop owns the cleanup.
        self.active = true;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen, Hide)
            .map_err(AppError::terminal)?;
        // Whatever the program printed is not in ratatui's buffers.
        self.terminal.clear().map_err(AppError::terminal)?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), AppError> {
        disable_raw_mode().map_err(AppError::terminal)?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)
            .map_err(AppError::terminal)?;
        info!("Terminal cleanup complete");
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active
            && let Err(e) = self.cleanup()
        {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

/// Runs `step`; if it fails, `undo` runs before the error is returned.
fn undo_on_error<T, S, U>(step: S, undo: U) -> Result<T, AppError>
where
    S: FnOnce() -> Result<T, AppError>,
    U: FnOnce(),
{
    step().inspect_err(|e| {
        warn!("Terminal setup failed, restoring: {}", e);
        undo();
    })
}

/// Best effort: back to cooked mode on the main screen.
fn restore_plain_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

/// Prints the pause message and blocks until a key is pressed.
fn wait_for_key() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\n{PAUSE_MESSAGE}")?;
    stdout.flush()?;

    enable_raw_mode()?;
    let result = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
            Ok(_) => {}
            Err(e) => break Err(e),
        }
    };
    disable_raw_mode()?;
    result
}

/// Leaves raw mode and the alternate screen before the default panic output.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        restore_plain_terminal();

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_step_runs_undo() {
        let undone = Cell::new(false);

        let result: Result<(), AppError> = undo_on_error(
            || Err(AppError::Terminal("no alternate screen".into())),
            || undone.set(true),
        );

        assert!(result.is_err());
        assert!(undone.get());
    }

    #[test]
    fn test_successful_step_keeps_state() {
        let undone = Cell::new(false);

        let result = undo_on_error(|| Ok(7), || undone.set(true));

        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());
    }
}
