//! System-wide constants for the signature pool.

/// Message hash size in bytes (32 bytes).
pub const HASH_SIZE: usize = 32;

/// Validator address size in bytes (20 bytes, account-style address).
pub const ADDRESS_SIZE: usize = 20;

/// Default configuration file name looked up in the data directory.
pub const CONFIG_FILE_NAME: &str = "sigpool.toml";

/// Environment variable prefix for config overrides.
///
/// Example: `SIGPOOL_POOL__THRESHOLD` -> `pool.threshold`
pub const ENV_PREFIX: &str = "SIGPOOL_";

/// Default log filter expression when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";
