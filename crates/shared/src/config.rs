//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Data store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Stock ledger behavior.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Data store configuration.
///
/// The engine is store-agnostic; the URL is interpreted by whichever
/// backend the host wires in (the in-memory engine ignores it).
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store connection URL.
    #[serde(default = "default_store_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_store_url() -> String {
    "memory://".to_string()
}

fn default_max_connections() -> u32 {
    10
}

/// Stock ledger behavior configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Upper bound on remembered consume idempotency keys.
    #[serde(default = "default_idempotency_log_cap")]
    pub idempotency_log_cap: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            idempotency_log_cap: default_idempotency_log_cap(),
        }
    }
}

fn default_idempotency_log_cap() -> usize {
    10_000
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
            .add_source(config::Environment::with_prefix("STOCKBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
