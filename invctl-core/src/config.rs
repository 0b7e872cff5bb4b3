use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::DEFAULT_MIGRATION_SCRIPT;
use crate::error::{InventoryError, Result};

/// Configuration for invctl, read from ~/.invctl/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file; defaults to ~/.invctl/inventory.db
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    /// Schema script run on first connection
    #[serde(default = "default_migration_script")]
    pub migration_script: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            migration_script: default_migration_script(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_database_path() -> PathBuf {
    config_dir()
        .map(|dir| dir.join("inventory.db"))
        .unwrap_or_else(|| PathBuf::from("inventory.db"))
}

fn default_migration_script() -> PathBuf {
    PathBuf::from(DEFAULT_MIGRATION_SCRIPT)
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Get the invctl config directory path (~/.invctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".invctl"))
}

impl InventoryConfig {
    /// Default config file path: ~/.invctl/config.toml
    pub fn config_path() -> PathBuf {
        config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, ~/.invctl/config.toml is
    /// read if present, otherwise built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(InventoryError::config(format!(
                        "config not found at {}",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    tracing::debug!(
                        "No config at {}, using defaults",
                        default_path.display()
                    );
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            InventoryError::Config { reason } => {
                InventoryError::config(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| InventoryError::config(format!("invalid TOML: {}", e)))?;
        config.database.path = expand_home(&config.database.path);
        config.database.migration_script = expand_home(&config.database.migration_script);
        Ok(config)
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
