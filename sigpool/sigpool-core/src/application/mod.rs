//! Application layer: the signature pool and the interface collaborators depend on.

mod pool;

pub use pool::{Pool, PoolStats};

use crate::domain::{Message, MessageSignature, ReadyMessage};
use crate::foundation::{MessageHash, ValidatorAddress};

/// Operations the gossip layer, the aggregator, and the epoch watcher need from a pool.
///
/// Every operation is total: unknown hashes read as empty, consumed hashes absorb
/// inserts, and duplicate signatures are ignored.
pub trait SignaturePool: Send + Sync {
    fn add_message(&self, message: Message);
    fn add_signature(&self, signature: MessageSignature);
    fn consume(&self, hash: &MessageHash);
    fn ready_messages(&self) -> Vec<ReadyMessage>;
    fn update_validator_set(&self, validators: Vec<ValidatorAddress>, threshold: u64);
}
