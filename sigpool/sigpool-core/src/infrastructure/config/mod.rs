mod loader;
mod types;
pub mod validation;

pub use loader::{load_config, load_config_from_file, load_config_from_file_with_profile, load_config_with_profile};
pub use types::*;

use crate::foundation::PoolError;
use std::path::Path;

/// Loads `path` (optionally with a profile) and rejects invalid configuration.
pub fn load_validated_config(path: &Path, profile: Option<&str>) -> Result<AppConfig, PoolError> {
    let config = match profile {
        Some(profile) => load_config_from_file_with_profile(path, profile)?,
        None => load_config_from_file(path)?,
    };
    config.validate().map_err(|errors| PoolError::ConfigError(format!("validation failed: {}", errors.join("; "))))?;
    Ok(config)
}
