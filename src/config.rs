use std::path::Path;
use tracing::{debug, info};

use crate::OracleError;

pub const NODE_URL_KEY: &str = "NODE_URL";
pub const CONTRACT_ADDRESS_KEY: &str = "CHAINLINK_CONTRACT_ADDRESS";
/// Overrides the default `.env` lookup with an explicit settings file path.
pub const ENV_FILE_KEY: &str = "CHAINLINK_ENV_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub node_url: String,
    pub contract_address: String,
}

impl Config {
    /// Build the config from any key/value source. Missing or blank values
    /// are rejected; nothing else about them is checked here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OracleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    OracleError::Configuration(format!("{} environment variable is not set", key))
                })
        };

        Ok(Config {
            node_url: required(NODE_URL_KEY)?,
            contract_address: required(CONTRACT_ADDRESS_KEY)?,
        })
    }
}

/// Populate the process environment from the settings file (if any), then
/// read the required keys from it.
pub fn load_config() -> Result<Config, OracleError> {
    load_settings_file()?;
    let config = Config::from_lookup(|key| std::env::var(key).ok())?;
    info!("Config loaded successfully");
    Ok(config)
}

fn load_settings_file() -> Result<(), OracleError> {
    if let Ok(path) = std::env::var(ENV_FILE_KEY) {
        info!("Loading settings from: {}", path);
        return dotenv::from_path(Path::new(&path)).map_err(|e| {
            OracleError::Configuration(format!("Failed to load settings file at {}: {}", path, e))
        });
    }

    match dotenv::dotenv() {
        Ok(path) => {
            info!("Loaded settings from: {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => {
            debug!("No .env file found, reading process environment only");
            Ok(())
        }
        Err(e) => Err(OracleError::Configuration(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}
