//! Configuration for the `todo-console` driver.
//!
//! Layered, highest priority first:
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/channel-todo/config.toml`)
//! 4. Compiled defaults

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::todo::domain::ChannelId;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A value is outside its accepted range.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Configuration key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

const CONFIG_DIR_NAME: &str = "channel-todo";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_LOG_LEVEL: &str = "info";

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TodoConfigFile {
    store: StoreFileConfig,
    console: ConsoleFileConfig,
    log_level: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StoreFileConfig {
    database_path: Option<PathBuf>,
    pool_size: Option<u32>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConsoleFileConfig {
    channel_id: Option<String>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments for the console driver.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Channel TODO console driver")]
pub struct TodoCliArgs {
    /// Path to config file (default: `~/.config/channel-todo/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// `SQLite` database file.
    #[arg(short, long, env = "TODO_DATABASE")]
    pub database: Option<PathBuf>,

    /// Maximum number of pooled database connections.
    #[arg(long)]
    pub pool_size: Option<u32>,

    /// Channel that console commands are issued in.
    #[arg(long, env = "TODO_CHANNEL")]
    pub channel: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, env = "TODO_LOG")]
    pub log_level: Option<String>,

    /// Print the `/todo` command schema as JSON and exit.
    #[arg(long)]
    pub print_schema: bool,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// `SQLite` database file.
    pub database_path: PathBuf,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
    /// Channel that console commands are issued in.
    pub channel_id: String,
    /// Log filter set on the CLI, via `TODO_LOG`, or in the config file.
    /// `None` defers to `RUST_LOG` and then the compiled default.
    pub log_level: Option<String>,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("todos.db"),
            pool_size: 4,
            channel_id: "console".to_owned(),
            log_level: None,
        }
    }
}

impl TodoConfig {
    /// Loads configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// Without `--config` the default path is tried and a missing file is
    /// treated as empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed,
    /// or a resolved value is out of range.
    pub fn load(cli: &TodoCliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    fn resolve(cli: &TodoCliArgs, file: &TodoConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            database_path: cli
                .database
                .clone()
                .or_else(|| file.store.database_path.clone())
                .unwrap_or(defaults.database_path),
            pool_size: cli
                .pool_size
                .or(file.store.pool_size)
                .unwrap_or(defaults.pool_size),
            channel_id: cli
                .channel
                .clone()
                .or_else(|| file.console.channel_id.clone())
                .unwrap_or(defaults.channel_id),
            log_level: cli
                .log_level
                .clone()
                .or_else(|| file.log_level.clone())
                .or(defaults.log_level),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "store.pool_size",
                reason: "must be at least 1".to_owned(),
            });
        }
        ChannelId::new(self.channel_id.as_str()).map_err(|err| ConfigError::InvalidValue {
            key: "console.channel_id",
            reason: err.to_string(),
        })?;
        if let Some(level) = &self.log_level {
            EnvFilter::try_new(level).map_err(|err| ConfigError::InvalidValue {
                key: "log_level",
                reason: err.to_string(),
            })?;
        }
        Ok(())
    }

    /// Returns the log filter directives to install.
    ///
    /// An explicitly configured level wins, then `env_directives` (normally
    /// the contents of `RUST_LOG`), then `info`.
    #[must_use]
    pub fn log_filter(&self, env_directives: Option<String>) -> String {
        self.log_level
            .clone()
            .or(env_directives)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn load_config_file(explicit_path: Option<&Path>) -> Result<TodoConfigFile, ConfigError> {
    if let Some(path) = explicit_path {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(TodoConfigFile::default());
    };
    let path = config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Ok(TodoConfigFile::default())
        }
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}
