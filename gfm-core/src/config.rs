//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver (directories only)
//!
//! Holds the user-editable settings: the shell command templates behind every
//! external action, whether to pause after a command, and logging options.
//! Loads and saves settings as TOML from the proper cross-platform config path
//! using the [`directories`](https://docs.rs/directories) crate.
//!
//! Keybindings and the grid column count are fixed and not configurable.
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load()?;
//! config.save()?;
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::info;

use crate::error::AppError;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "gfm";
const APPLICATION: &str = "gfm";

/// Shell command templates run with `sh -c`.
///
/// `{}` is replaced by the shell-quoted name of the entry under the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Run on a non-directory entry when Enter is pressed.
    pub open: String,

    pub delete: String,

    pub copy: String,

    #[serde(rename = "move")]
    pub move_to: String,

    /// Never receives an entry name; the user names the new file.
    pub create: String,

    pub execute: String,

    pub edit: String,

    /// Interactive shell started by `:`.
    pub shell: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            open: "printf 'open %s with: ' {}; read -r cmd && $cmd {}".to_string(),
            delete: "rm -ri -- {}".to_string(),
            copy: "printf 'cp -r %s to: ' {}; read -r dest && cp -r -- {} \"$dest\"".to_string(),
            move_to: "printf 'mv %s to: ' {}; read -r dest && mv -- {} \"$dest\"".to_string(),
            create: "printf 'touch '; read -r name && touch -- \"$name\"".to_string(),
            execute: "./{}".to_string(),
            edit: "${EDITOR:-vi} {}".to_string(),
            shell: "${SHELL:-sh}".to_string(),
        }
    }
}

/// Logging configuration, embedded in the main Config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` wins when set.
    pub level: String,

    /// Directory for the rolling log files. Defaults to the platform data dir.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    /// Resolves the log directory, falling back to `<data_local_dir>/logs`.
    pub fn log_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.directory {
            return Ok(dir.clone());
        }

        let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory."))?;
        Ok(proj_dirs.data_local_dir().join("logs"))
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wait for a keystroke after commands whose output the user should read.
    pub pause_after_command: bool,

    pub commands: CommandConfig,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pause_after_command: true,
            commands: CommandConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Loads config from TOML file at the XDG-compliant app config dir, or
    /// writes and returns the defaults when the file does not exist yet.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/gfm/config.toml` (Linux),
    /// or the equivalent on Windows/macOS.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            info!("Loading config from {}", path.display());
            let text = fs::read_to_string(&path).map_err(|source| AppError::ConfigIo {
                path: path.clone(),
                source,
            })?;

            Ok(Self::from_toml(&text)?)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save()?;

            Ok(default_config)
        }
    }

    /// Parses a TOML document; missing tables and keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(text)?)
    }

    /// Saves config to TOML file at the XDG-compliant app config dir.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;

        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&path, toml_str)?;

        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.pause_after_command);
    }

    #[test]
    fn test_partial_commands_table_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            pause_after_command = false

            [commands]
            edit = "nvim {}"
            move = "mv -i {} /tmp"
            "#,
        )
        .unwrap();

        assert!(!config.pause_after_command);
        assert_eq!(config.commands.edit, "nvim {}");
        assert_eq!(config.commands.move_to, "mv -i {} /tmp");
        assert_eq!(config.commands.delete, CommandConfig::default().delete);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = Config::from_toml("pause_after_command = [").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_explicit_log_directory_wins() {
        let logging = LoggingConfig {
            level: "debug".into(),
            directory: Some(PathBuf::from("/tmp/gfm-logs")),
        };
        assert_eq!(logging.log_dir().unwrap(), PathBuf::from("/tmp/gfm-logs"));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut config = Config::default();
        config.commands.shell = "bash".into();

        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }
}
