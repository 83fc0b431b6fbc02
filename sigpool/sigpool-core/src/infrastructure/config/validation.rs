use crate::foundation::ValidatorAddress;
use crate::infrastructure::config::types::AppConfig;
use std::collections::HashSet;

impl AppConfig {
    /// Collects every configuration problem instead of stopping at the first one.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let pool = &self.pool;

        if pool.validators.is_empty() {
            errors.push("pool.validators must not be empty".to_string());
        }

        let mut seen = HashSet::new();
        for raw in &pool.validators {
            match raw.parse::<ValidatorAddress>() {
                Ok(addr) => {
                    if !seen.insert(addr) {
                        errors.push(format!("duplicate pool.validators entry: {}", raw));
                    }
                }
                Err(err) => errors.push(format!("invalid pool.validators entry: {} ({})", raw, err)),
            }
        }

        if pool.threshold == 0 {
            errors.push("pool.threshold must be > 0".to_string());
        }
        if pool.threshold > pool.validators.len() as u64 {
            errors.push(format!(
                "pool.threshold ({}) cannot exceed validator count ({})",
                pool.threshold,
                pool.validators.len()
            ));
        }

        if self.logging.filters.trim().is_empty() {
            errors.push("logging.filters must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
