//! Configuration loader using Figment for layered config management.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML config file
//! 3. Profile overrides from `[profiles.<name>]`
//! 4. Environment variables (SIGPOOL_* prefix)

use crate::foundation::{PoolError, CONFIG_FILE_NAME, DEFAULT_LOG_FILTER, ENV_PREFIX};
use crate::infrastructure::config::types::{AppConfig, LoggingConfig, PoolConfig};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::value::{Dict, Map};
use figment::{Figment, Profile};
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
struct AppConfigRaw {
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub profiles: Option<Map<String, Dict>>,
}

/// Load configuration from the default file in `data_dir` (`sigpool.toml`).
pub fn load_config(data_dir: &Path) -> Result<AppConfig, PoolError> {
    load_config_from_file(&data_dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from the default file in `data_dir` (`sigpool.toml`) with a profile.
pub fn load_config_with_profile(data_dir: &Path, profile: &str) -> Result<AppConfig, PoolError> {
    load_config_from_file_with_profile(&data_dir.join(CONFIG_FILE_NAME), profile)
}

/// Load configuration from a specific file path.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig, PoolError> {
    info!("loading configuration path={}", path.display());
    let raw: AppConfigRaw = figment_base(path).merge(env_provider()).extract()?;
    let config = finish(raw);
    debug!(
        "configuration loaded validators={} threshold={} log_dir={:?}",
        config.pool.validators.len(),
        config.pool.threshold,
        config.logging.log_dir
    );
    Ok(config)
}

/// Load configuration from a specific file path with profile overrides.
pub fn load_config_from_file_with_profile(path: &Path, profile: &str) -> Result<AppConfig, PoolError> {
    info!("loading configuration with profile path={} profile={}", path.display(), profile);

    // Extract once to reach `profiles.<name>` in the file.
    let base: AppConfigRaw = figment_base(path).extract()?;
    let overrides = profile_overrides(&base, profile)?;

    let raw: AppConfigRaw = figment_base(path)
        .merge(Serialized::from(overrides, Profile::Default))
        .merge(env_provider())
        .extract()
        .map_err(|e| PoolError::ConfigError(format!("config extraction failed for profile '{profile}': {e}")))?;
    let config = finish(raw);

    debug!(
        "configuration loaded with profile profile={} validators={} threshold={}",
        profile,
        config.pool.validators.len(),
        config.pool.threshold
    );
    Ok(config)
}

fn figment_base(path: &Path) -> Figment {
    let figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
    if path.exists() {
        figment.merge(Toml::file(path))
    } else {
        debug!("configuration file missing; using defaults and env only path={}", path.display());
        figment
    }
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

fn profile_overrides(config: &AppConfigRaw, profile: &str) -> Result<Dict, PoolError> {
    let profiles = config.profiles.as_ref().ok_or_else(|| PoolError::ConfigError("no profiles section in config".to_string()))?;
    profiles.get(profile).cloned().ok_or_else(|| PoolError::ConfigError(format!("profile '{profile}' not found in config")))
}

fn finish(raw: AppConfigRaw) -> AppConfig {
    let mut config = AppConfig { pool: raw.pool, logging: raw.logging };
    if config.logging.filters.trim().is_empty() {
        config.logging.filters = DEFAULT_LOG_FILTER.to_string();
    }
    if config.logging.log_dir.as_deref().is_some_and(|dir| dir.trim().is_empty()) {
        config.logging.log_dir = None;
    }
    config
}
