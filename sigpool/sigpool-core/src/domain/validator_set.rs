use crate::foundation::{PoolError, ValidatorAddress};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Validator membership and the quorum required for a message to become ready.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    pub validators: Vec<ValidatorAddress>,
    pub threshold: u64,
}

impl ValidatorSet {
    /// Builds a set without validation. The pool accepts any membership/threshold pair.
    pub fn new(validators: Vec<ValidatorAddress>, threshold: u64) -> Self {
        Self { validators, threshold }
    }

    /// Builds a set and rejects duplicates, a zero threshold, or a threshold above the set size.
    pub fn validated(validators: Vec<ValidatorAddress>, threshold: u64) -> Result<Self, PoolError> {
        let set = Self { validators, threshold };
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        if self.validators.is_empty() {
            return Err(PoolError::InvalidValidatorSet { details: "no validators".to_string() });
        }
        if self.threshold == 0 {
            return Err(PoolError::InvalidValidatorSet { details: "threshold must be > 0".to_string() });
        }
        let mut seen = HashSet::with_capacity(self.validators.len());
        for addr in &self.validators {
            if !seen.insert(*addr) {
                return Err(PoolError::DuplicateValidator { address: format!("{:#x}", addr) });
            }
        }
        if self.threshold > self.validators.len() as u64 {
            return Err(PoolError::ThresholdExceedsValidators { threshold: self.threshold, validators: self.validators.len() });
        }
        Ok(())
    }

    pub fn contains(&self, address: &ValidatorAddress) -> bool {
        self.validators.contains(address)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Addresses that are in `old` but not in `self`, in the order they appear in `old`.
    pub fn removed_from(&self, old: &ValidatorSet) -> Vec<ValidatorAddress> {
        diff_addresses(&old.validators, &self.validators)
    }
}

/// Returns the addresses of `left` that are missing from `right`.
pub fn diff_addresses(left: &[ValidatorAddress], right: &[ValidatorAddress]) -> Vec<ValidatorAddress> {
    let right: HashSet<&ValidatorAddress> = right.iter().collect();
    left.iter().filter(|addr| !right.contains(addr)).copied().collect()
}
