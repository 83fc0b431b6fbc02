use crate::foundation::{MessageHash, ValidatorAddress};
use serde::{Deserialize, Serialize};

/// An opaque message body identified by a caller-chosen content hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub hash: MessageHash,
    pub body: Vec<u8>,
}

impl Message {
    pub fn new(hash: MessageHash, body: impl Into<Vec<u8>>) -> Self {
        Self { hash, body: body.into() }
    }
}

/// One validator's signature over the message identified by `hash`.
///
/// The signature is assumed to be verified by the caller before submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSignature {
    pub hash: MessageHash,
    pub address: ValidatorAddress,
    pub signature: Vec<u8>,
}

impl MessageSignature {
    pub fn new(hash: MessageHash, address: ValidatorAddress, signature: impl Into<Vec<u8>>) -> Self {
        Self { hash, address, signature: signature.into() }
    }
}

/// A message that reached quorum, with every collected signature.
///
/// `signatures` has one entry per contributing validator, in no particular order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyMessage {
    pub hash: MessageHash,
    pub body: Vec<u8>,
    pub signatures: Vec<Vec<u8>>,
}
