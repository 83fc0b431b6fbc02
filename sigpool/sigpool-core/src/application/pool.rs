//! Signature pool: collects validator signatures per message and tracks which
//! messages have reached quorum.
//!
//! ## Locking
//!
//! The validator set and threshold sit behind a reader-writer lock. Message and
//! signature ingestion, consumption, and readiness polling take it shared and
//! run concurrently against lock-free-at-the-map-level `DashMap`s.
//! [`Pool::update_validator_set`] takes it exclusively: it may strip signatures
//! and re-evaluate every message, which needs a stable view of the store.
//!
//! ## Readiness
//!
//! A hash is ready iff it is a member of the ready set. Shared-mode paths only
//! ever promote; demotion happens on reconfiguration and consumption.

use crate::application::SignaturePool;
use crate::domain::{is_ready_state, Message, MessageSignature, MessageStatus, ReadyMessage, ValidatorSet};
use crate::foundation::{MessageHash, PoolError, ValidatorAddress};
use crate::infrastructure::config::PoolConfig;
use crate::infrastructure::storage::SignatureStore;
use dashmap::{DashMap, DashSet};
use log::{debug, info, trace};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashSet;

/// Point-in-time counters, read without a global snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub known: usize,
    pub ready: usize,
    pub consumed: usize,
    pub signed_entries: usize,
    pub threshold: u64,
    pub validators: usize,
}

pub struct Pool {
    // Write-locked only while changing validators (about once per epoch).
    validator_set: RwLock<ValidatorSet>,
    bodies: DashMap<MessageHash, Vec<u8>>,
    consumed: DashSet<MessageHash>,
    ready: DashSet<MessageHash>,
    signatures: SignatureStore,
}

impl Pool {
    pub fn new(validators: Vec<ValidatorAddress>, threshold: u64) -> Self {
        Self::with_validator_set(ValidatorSet::new(validators, threshold))
    }

    pub fn with_validator_set(validator_set: ValidatorSet) -> Self {
        Self {
            validator_set: RwLock::new(validator_set),
            bodies: DashMap::new(),
            consumed: DashSet::new(),
            ready: DashSet::new(),
            signatures: SignatureStore::new(),
        }
    }

    /// Builds a pool from configuration, rejecting an invalid validator set.
    pub fn from_config(config: &PoolConfig) -> Result<Self, PoolError> {
        let validator_set = config.validator_set()?;
        info!("signature pool created validators={} threshold={}", validator_set.len(), validator_set.threshold);
        Ok(Self::with_validator_set(validator_set))
    }

    /// Stores a message body. A later body for the same hash replaces the earlier one.
    pub fn add_message(&self, message: Message) {
        let set = self.validator_set.read();
        let Message { hash, body } = message;

        if self.has_consumed(&hash) {
            debug!("dropping message for consumed hash hash={:#x}", hash);
            return;
        }

        trace!("message stored hash={:#x} body_len={}", hash, body.len());
        self.bodies.insert(hash, body);
        self.try_to_promote(&hash, set.threshold);
        self.undo_if_consumed(&hash);
    }

    /// Stores a signature. The first signature from a validator for a hash wins.
    pub fn add_signature(&self, signature: MessageSignature) {
        let set = self.validator_set.read();
        let hash = signature.hash;
        let address = signature.address;

        if self.has_consumed(&hash) {
            debug!("dropping signature for consumed hash hash={:#x} validator={:#x}", hash, address);
            return;
        }
        if !set.contains(&address) {
            debug!("signature from address outside validator set hash={:#x} validator={:#x}", hash, address);
        }

        let count = self.signatures.put(signature);
        trace!("signature stored hash={:#x} validator={:#x} count={} threshold={}", hash, address, count, set.threshold);
        self.try_to_promote(&hash, set.threshold);
        self.undo_if_consumed(&hash);
    }

    /// Retires a hash for the lifetime of the pool and drops everything stored for it.
    pub fn consume(&self, hash: &MessageHash) {
        let _set = self.validator_set.read();
        self.consumed.insert(*hash);
        let existed = self.purge(hash);
        debug!("message consumed hash={:#x} had_state={}", hash, existed);
    }

    /// Every message that currently meets quorum, with its body and signatures.
    ///
    /// Each hash is read independently; there is no snapshot across hashes.
    pub fn ready_messages(&self) -> Vec<ReadyMessage> {
        let _set = self.validator_set.read();
        let hashes: Vec<MessageHash> = self.ready.iter().map(|item| *item.key()).collect();

        let mut out = Vec::with_capacity(hashes.len());
        for hash in hashes {
            let Some(body) = self.message_body(&hash) else {
                debug!("ready message has no body; skipping hash={:#x}", hash);
                continue;
            };
            let signatures = self.signatures.get_signatures(&hash);
            out.push(ReadyMessage { hash, body, signatures });
        }
        out
    }

    /// Replaces the validator set and threshold, then re-evaluates readiness.
    ///
    /// Signatures from validators that left the set are deleted. If the threshold
    /// changed every message is re-evaluated; otherwise only the messages that
    /// lost a signature are checked for demotion.
    pub fn update_validator_set(&self, validators: Vec<ValidatorAddress>, threshold: u64) {
        let mut set = self.validator_set.write();

        let next = ValidatorSet::new(validators, threshold);
        let removed = next.removed_from(&set);
        let old_threshold = set.threshold;
        let old_len = set.len();
        *set = next;

        info!(
            "updating validator set validators={}->{} threshold={}->{} removed={}",
            old_len,
            set.len(),
            old_threshold,
            threshold,
            removed.len()
        );

        let candidates = if removed.is_empty() { Vec::new() } else { self.signatures.remove_signatures(&removed) };

        if old_threshold != threshold {
            let evaluated = self.try_to_promote_and_demote_all(threshold);
            info!(
                "validator set updated with full rescan evaluated={} lost_signatures={} ready={}",
                evaluated,
                candidates.len(),
                self.ready.len()
            );
        } else {
            for hash in &candidates {
                self.try_to_demote(hash, threshold);
            }
            info!("validator set updated candidates={} ready={}", candidates.len(), self.ready.len());
        }
    }

    pub fn threshold(&self) -> u64 {
        self.validator_set.read().threshold
    }

    pub fn validators(&self) -> Vec<ValidatorAddress> {
        self.validator_set.read().validators.clone()
    }

    pub fn validator_set(&self) -> ValidatorSet {
        self.validator_set.read().clone()
    }

    pub fn is_known(&self, hash: &MessageHash) -> bool {
        self.knows(hash)
    }

    pub fn is_ready(&self, hash: &MessageHash) -> bool {
        self.ready.contains(hash)
    }

    pub fn is_consumed(&self, hash: &MessageHash) -> bool {
        self.has_consumed(hash)
    }

    pub fn signature_count(&self, hash: &MessageHash) -> u64 {
        self.signatures.get_signature_count(hash)
    }

    pub fn status(&self, hash: &MessageHash) -> MessageStatus {
        if self.has_consumed(hash) {
            MessageStatus::Consumed
        } else if self.ready.contains(hash) {
            MessageStatus::Ready
        } else if self.knows(hash) || self.signatures.get_signature_count(hash) > 0 {
            MessageStatus::PartiallySigned
        } else {
            MessageStatus::Unknown
        }
    }

    pub fn stats(&self) -> PoolStats {
        let set = self.validator_set.read();
        PoolStats {
            known: self.bodies.len(),
            ready: self.ready.len(),
            consumed: self.consumed.len(),
            signed_entries: self.signatures.len(),
            threshold: set.threshold,
            validators: set.len(),
        }
    }

    fn knows(&self, hash: &MessageHash) -> bool {
        self.bodies.contains_key(hash)
    }

    fn has_consumed(&self, hash: &MessageHash) -> bool {
        self.consumed.contains(hash)
    }

    fn message_body(&self, hash: &MessageHash) -> Option<Vec<u8>> {
        self.bodies.get(hash).map(|body| body.value().clone())
    }

    fn can_promote(&self, hash: &MessageHash, threshold: u64) -> bool {
        is_ready_state(self.knows(hash), self.signatures.get_signature_count(hash), threshold)
    }

    fn try_to_promote(&self, hash: &MessageHash, threshold: u64) {
        if self.can_promote(hash, threshold) {
            self.promote(hash);
        }
    }

    fn try_to_demote(&self, hash: &MessageHash, threshold: u64) {
        if !self.can_promote(hash, threshold) {
            self.demote(hash);
        }
    }

    /// Re-evaluates every signed or known message. Returns how many were checked.
    fn try_to_promote_and_demote_all(&self, threshold: u64) -> usize {
        let mut seen = HashSet::new();
        self.signatures.range_messages(|entry| {
            let hash = entry.hash();
            seen.insert(hash);
            self.apply_readiness(&hash, entry.num_signatures(), threshold);
            true
        });

        // Known messages without any signature entry only matter for a zero threshold.
        let unsigned: Vec<MessageHash> = self.bodies.iter().map(|item| *item.key()).filter(|hash| !seen.contains(hash)).collect();
        for hash in &unsigned {
            self.apply_readiness(hash, 0, threshold);
        }

        self.ready.retain(|hash| self.bodies.contains_key(hash));
        seen.len() + unsigned.len()
    }

    fn apply_readiness(&self, hash: &MessageHash, signature_count: u64, threshold: u64) {
        if is_ready_state(self.knows(hash), signature_count, threshold) {
            self.promote(hash);
        } else {
            self.demote(hash);
        }
    }

    fn promote(&self, hash: &MessageHash) {
        if self.ready.insert(*hash) {
            debug!("message promoted to ready hash={:#x}", hash);
        }
    }

    fn demote(&self, hash: &MessageHash) {
        if self.ready.remove(hash).is_some() {
            debug!("message demoted to pending hash={:#x}", hash);
        }
    }

    // A consume that raced past our tombstone check wins: drop what we just wrote.
    fn undo_if_consumed(&self, hash: &MessageHash) {
        if self.has_consumed(hash) && self.purge(hash) {
            debug!("discarded write that raced with consume hash={:#x}", hash);
        }
    }

    fn purge(&self, hash: &MessageHash) -> bool {
        let had_signatures = self.signatures.remove_message(hash);
        let had_body = self.bodies.remove(hash).is_some();
        let was_ready = self.ready.remove(hash).is_some();
        had_signatures || had_body || was_ready
    }
}

impl SignaturePool for Pool {
    fn add_message(&self, message: Message) {
        Pool::add_message(self, message)
    }

    fn add_signature(&self, signature: MessageSignature) {
        Pool::add_signature(self, signature)
    }

    fn consume(&self, hash: &MessageHash) {
        Pool::consume(self, hash)
    }

    fn ready_messages(&self) -> Vec<ReadyMessage> {
        Pool::ready_messages(self)
    }

    fn update_validator_set(&self, validators: Vec<ValidatorAddress>, threshold: u64) {
        Pool::update_validator_set(self, validators, threshold)
    }
}
