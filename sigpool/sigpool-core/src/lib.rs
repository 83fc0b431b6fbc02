// Public crate surface is organized by layer: `domain`, `infrastructure`, `application`, `foundation`.
pub mod application;
pub mod domain;
pub mod foundation;
pub mod infrastructure;
pub use application::{Pool, PoolStats, SignaturePool};
pub use domain::{Message, MessageSignature, MessageStatus, ReadyMessage, ValidatorSet};
pub use foundation::{MessageHash, PoolError, Result, ValidatorAddress};
