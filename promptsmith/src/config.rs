use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::models::DEFAULT_MAX_FREE_PROMPTS;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub providers: ProviderHttpConfig,
    pub free_plan: FreePlanConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `promptsmith-settings.json` and
    /// `promptsmith-history.json`.
    pub data_dir: PathBuf,
}

/// Outbound HTTP settings for the vendor adapters.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderHttpConfig {
    pub timeout_secs: u64,
    /// When set, every vendor call is sent to this base URL instead of the
    /// vendor's real host. Used by the test suite to point at a mock server.
    pub base_url_override: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FreePlanConfig {
    pub max_free_prompts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("PROMPTSMITH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PROMPTSMITH_PORT", 3000),
            },
            storage: StorageConfig {
                data_dir: env::var("PROMPTSMITH_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./data")),
            },
            providers: ProviderHttpConfig {
                timeout_secs: parse_env_or("PROVIDER_TIMEOUT_SECS", 30),
                base_url_override: env::var("PROVIDER_BASE_URL").ok(),
            },
            free_plan: FreePlanConfig {
                max_free_prompts: parse_env_or("MAX_FREE_PROMPTS", DEFAULT_MAX_FREE_PROMPTS),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
