//! Server configuration
//!
//! Read from environment variables (after loading `.env` if present),
//! falling back to defaults suitable for local development.

use crate::services::summarizer::DEFAULT_MODEL_URL;
use config::{ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub database_max_connections: u32,
    pub summarizer_url: String,
    #[serde(default)]
    pub summarizer_token: Option<String>,
    pub summarizer_timeout_secs: u64,
    /// Empty means any origin is allowed
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    pub seed_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_ok() {
            tracing::info!("Loaded environment from .env");
        }
        Self::load(Environment::default())
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        let mut config: Config = config::Config::builder()
            .set_default("database_url", "sqlite://data/tintuc.db")?
            .set_default("bind_address", "0.0.0.0:8000")?
            .set_default("database_max_connections", 5)?
            .set_default("summarizer_url", DEFAULT_MODEL_URL)?
            .set_default("summarizer_timeout_secs", 60)?
            .set_default("seed_data", false)?
            .add_source(
                env.try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins"),
            )
            .build()?
            .try_deserialize()?;

        config.cors_allowed_origins = config
            .cors_allowed_origins
            .into_iter()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(config)
    }
}
