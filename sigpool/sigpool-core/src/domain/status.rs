use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a single message hash inside the pool.
///
/// `Consumed` is terminal. `PartiallySigned` and `Ready` flip back and forth as
/// signatures arrive or the validator set changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Unknown,
    PartiallySigned,
    Ready,
    Consumed,
}

impl MessageStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::PartiallySigned => "partially_signed",
            Self::Ready => "ready",
            Self::Consumed => "consumed",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Consumed)
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readiness rule: the body is known and the distinct signature count meets the threshold.
pub fn is_ready_state(known: bool, signature_count: u64, threshold: u64) -> bool {
    known && signature_count >= threshold
}
