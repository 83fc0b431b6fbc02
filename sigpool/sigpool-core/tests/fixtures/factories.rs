#![allow(dead_code)]

use crate::fixtures::{VALIDATOR_A, VALIDATOR_B, VALIDATOR_C};
use sigpool_core::{Message, MessageHash, MessageSignature, Pool, ValidatorAddress};
use std::collections::HashSet;

pub fn hash(byte: u8) -> MessageHash {
    MessageHash::new([byte; 32])
}

/// Distinct hash for larger fixtures: the index is spread over the first two bytes.
pub fn indexed_hash(index: u16) -> MessageHash {
    let mut bytes = [0u8; 32];
    bytes[..2].copy_from_slice(&index.to_be_bytes());
    MessageHash::new(bytes)
}

pub fn addr(byte: u8) -> ValidatorAddress {
    ValidatorAddress::new([byte; 20])
}

/// Distinct address for larger fixtures.
pub fn indexed_addr(index: u16) -> ValidatorAddress {
    let mut bytes = [0u8; 20];
    bytes[..2].copy_from_slice(&index.to_be_bytes());
    ValidatorAddress::new(bytes)
}

pub fn message(hash: MessageHash, body: &[u8]) -> Message {
    Message::new(hash, body.to_vec())
}

/// Signature bytes derived from the signer so tests can tell them apart.
pub fn sig_bytes(address: ValidatorAddress) -> Vec<u8> {
    let mut bytes = b"sig-".to_vec();
    bytes.extend_from_slice(address.as_ref());
    bytes
}

pub fn signature(hash: MessageHash, address: ValidatorAddress) -> MessageSignature {
    MessageSignature::new(hash, address, sig_bytes(address))
}

/// Validators A, B, C with a 2-of-3 threshold.
pub fn two_of_three_pool() -> Pool {
    Pool::new(vec![addr(VALIDATOR_A), addr(VALIDATOR_B), addr(VALIDATOR_C)], 2)
}

pub fn signature_set(signatures: &[Vec<u8>]) -> HashSet<Vec<u8>> {
    signatures.iter().cloned().collect()
}
