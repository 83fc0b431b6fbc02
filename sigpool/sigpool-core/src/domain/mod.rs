//! Domain layer: message values, validator sets and the readiness rule.
//!
//! Nothing in here performs I/O, logs, or synchronizes.

pub mod message;
pub mod status;
pub mod validator_set;

pub use message::*;
pub use status::*;
pub use validator_set::*;
