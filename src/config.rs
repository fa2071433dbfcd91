use crate::currency::CurrencyInputOptions;
use crate::retry::RetryConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Prefix joined onto relative request paths
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    /// Sent as `Authorization: Bearer <token>` when present
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub retry: RetryConfig,
    pub currency: CurrencyInputOptions,
}

impl Config {
    /// Load `config.toml` from the current directory
    pub fn new() -> Result<Self> {
        Self::from_path(DEFAULT_CONFIG_PATH)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&config_str)?;
        info!(
            "Loaded config from {} (base_url: {:?}, max_retries: {})",
            path.display(),
            config.http.base_url,
            config.retry.max_retries
        );
        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        Ok(config)
    }
}
