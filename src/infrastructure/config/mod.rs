use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::infrastructure::security::DEFAULT_COST;

/// Runtime configuration: defaults, overridden by `rosterbridge.toml`,
/// overridden by `ROSTERBRIDGE_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub bcrypt_cost: u32,
    /// Upload cap; keeps the synchronous batch pass bounded in latency.
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite://rosterbridge.db".to_string(),
            bcrypt_cost: DEFAULT_COST,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("rosterbridge.toml"))
            .merge(Env::prefixed("ROSTERBRIDGE_"))
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))
    }
}
