use crate::domain::ValidatorSet;
use crate::foundation::{PoolError, ValidatorAddress, DEFAULT_LOG_FILTER};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Initial validator set and quorum for the pool.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Hex-encoded validator addresses (with or without `0x`).
    #[serde(default)]
    pub validators: Vec<String>,
    #[serde(default)]
    pub threshold: u64,
}

impl PoolConfig {
    pub fn validator_addresses(&self) -> Result<Vec<ValidatorAddress>, PoolError> {
        self.validators
            .iter()
            .map(|raw| {
                raw.parse::<ValidatorAddress>()
                    .map_err(|err| PoolError::ConfigError(format!("invalid pool.validators entry '{}': {}", raw, err)))
            })
            .collect()
    }

    pub fn validator_set(&self) -> Result<ValidatorSet, PoolError> {
        ValidatorSet::validated(self.validator_addresses()?, self.threshold)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rolling log files; console only when unset.
    #[serde(default)]
    pub log_dir: Option<String>,
    #[serde(default = "default_log_filters")]
    pub filters: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { log_dir: None, filters: default_log_filters() }
    }
}

fn default_log_filters() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
