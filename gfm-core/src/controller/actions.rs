//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Application Commands
//!
//! Defines the `Action` enum, the meaning of every bound key. Navigation
//! actions are handled inside the core; the rest hand work to the host
//! (a subprocess, the environment) and feed the result back into the state.

/// Represents a high-level action that the browser can perform.
/// This abstracts away raw terminal events into meaningful commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Leave the main loop.
    Quit,

    /// Prompt for a shell command and list its output lines.
    VirtualDirectory,

    /// Enter the directory under the cursor or open the file.
    ActivateEntry,

    /// Go to `$HOME`.
    GoHome,

    /// Go to parent directory, keeping the cursor on the one we left.
    GoToParent,

    Delete,

    Copy,

    Move,

    /// Create a new file; the user names it in the spawned command.
    CreateFile,

    Execute,

    Edit,

    /// Move selection down.
    MoveSelectionDown,

    /// Move selection up.
    MoveSelectionUp,

    /// One column left (cursor minus rows per column).
    MoveColumnLeft,

    /// One column right (cursor plus rows per column).
    MoveColumnRight,

    /// Re-read the real directory and redraw.
    ReloadDirectory,

    /// Start incremental search.
    StartSearch,

    /// Show the key manual.
    ShowManual,

    /// Run an interactive shell.
    RunShell,
}

impl Action {
    /// True for actions that only move the cursor.
    #[must_use]
    pub const fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::MoveSelectionDown
                | Self::MoveSelectionUp
                | Self::MoveColumnLeft
                | Self::MoveColumnRight
        )
    }
}
