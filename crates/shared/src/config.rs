//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Ledger file configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Static asset configuration.
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// What to do when the backing ledger file exists but cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptionPolicy {
    /// Log the failure, overwrite the file with an empty ledger and carry on.
    #[default]
    ResetToEmpty,
    /// Refuse to load and leave the file untouched.
    FailFast,
}

/// Ledger file configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Path of the JSON file holding all player records.
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
    /// Recovery strategy for an unparseable ledger file.
    #[serde(default)]
    pub corruption_policy: CorruptionPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
            corruption_policy: CorruptionPolicy::default(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("data/ledger.json")
}

/// Static asset configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticFilesConfig {
    /// Directory served for any path outside `/api`. Disabled when unset.
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("CHIPLEDGER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
