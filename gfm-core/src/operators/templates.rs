//! ``src/operators/templates.rs``
//!
//! External actions and the command lines they expand to.

use crate::config::CommandConfig;

/// Placeholder replaced by the shell-quoted entry name.
pub const ENTRY_PLACEHOLDER: &str = "{}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalAction {
    Open,
    Delete,
    Copy,
    Move,
    Create,
    Execute,
    Edit,
    Shell,
}

impl ExternalAction {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Delete => "delete",
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Create => "create",
            Self::Execute => "execute",
            Self::Edit => "edit",
            Self::Shell => "shell",
        }
    }

    /// Whether the command's output should stay on screen until a key is hit.
    #[must_use]
    pub const fn pauses(self) -> bool {
        !matches!(self, Self::Create | Self::Edit)
    }

    /// Create and Shell never see the entry under the cursor.
    #[must_use]
    pub const fn takes_entry(self) -> bool {
        !matches!(self, Self::Create | Self::Shell)
    }

    #[must_use]
    pub fn template(self, commands: &CommandConfig) -> &str {
        match self {
            Self::Open => &commands.open,
            Self::Delete => &commands.delete,
            Self::Copy => &commands.copy,
            Self::Move => &commands.move_to,
            Self::Create => &commands.create,
            Self::Execute => &commands.execute,
            Self::Edit => &commands.edit,
            Self::Shell => &commands.shell,
        }
    }

    /// Expands the template for `entry`.
    #[must_use]
    pub fn command_line(self, commands: &CommandConfig, entry: &str) -> String {
        let template = self.template(commands);
        if self.takes_entry() {
            template.replace(ENTRY_PLACEHOLDER, &shell_words::quote(entry))
        } else {
            template.to_string()
        }
    }
}
