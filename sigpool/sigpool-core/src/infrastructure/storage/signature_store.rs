//! Concurrent nested map from message hash to the signatures collected for it.
//!
//! Layout: `MessageHash -> (ValidatorAddress -> signature bytes, distinct count)`.
//!
//! The per-entry count is an atomic kept in step with the inner map so that
//! readers get the signature count with a single load instead of walking the map.

use crate::domain::MessageSignature;
use crate::foundation::{MessageHash, ValidatorAddress};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{debug, warn};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Signatures collected for a single message.
#[derive(Debug)]
pub struct SignedMessageEntry {
    hash: MessageHash,
    signatures: DashMap<ValidatorAddress, Vec<u8>>,
    count: AtomicI64,
}

impl SignedMessageEntry {
    fn new(hash: MessageHash) -> Self {
        Self { hash, signatures: DashMap::new(), count: AtomicI64::new(0) }
    }

    pub fn hash(&self) -> MessageHash {
        self.hash
    }

    /// Number of distinct validators that signed, floored at zero.
    pub fn num_signatures(&self) -> u64 {
        clamp_count(self.hash, self.count.load(Ordering::Acquire))
    }

    pub fn contains(&self, address: &ValidatorAddress) -> bool {
        self.signatures.contains_key(address)
    }

    pub fn signature_of(&self, address: &ValidatorAddress) -> Option<Vec<u8>> {
        self.signatures.get(address).map(|sig| sig.value().clone())
    }

    /// Snapshot of every stored signature, unordered.
    pub fn signatures(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::with_capacity(self.num_signatures() as usize);
        for item in self.signatures.iter() {
            out.push(item.value().clone());
        }
        out
    }

    /// Inserts the signature unless this address already signed. Returns the resulting count.
    fn insert(&self, address: ValidatorAddress, signature: Vec<u8>) -> u64 {
        match self.signatures.entry(address) {
            Entry::Vacant(vacant) => {
                // Bump while the shard guard is still held so the count never trails the map.
                let _guard = vacant.insert(signature);
                self.increment()
            }
            Entry::Occupied(_) => {
                debug!("duplicate signature ignored hash={:#x} validator={:#x}", self.hash, address);
                self.num_signatures()
            }
        }
    }

    /// Removes the signature of `address`. Returns true if one was present.
    fn remove(&self, address: &ValidatorAddress) -> bool {
        if self.signatures.remove(address).is_some() {
            self.decrement();
            return true;
        }
        false
    }

    fn increment(&self) -> u64 {
        clamp_count(self.hash, self.count.fetch_add(1, Ordering::AcqRel) + 1)
    }

    fn decrement(&self) -> u64 {
        clamp_count(self.hash, self.count.fetch_sub(1, Ordering::AcqRel) - 1)
    }
}

fn clamp_count(hash: MessageHash, raw: i64) -> u64 {
    if raw < 0 {
        warn!("signature count below zero, reporting zero hash={:#x} raw_count={}", hash, raw);
        return 0;
    }
    raw as u64
}

#[derive(Debug, Default)]
pub struct SignatureStore {
    entries: DashMap<MessageHash, Arc<SignedMessageEntry>>,
}

impl SignatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_message(&self, hash: &MessageHash) -> bool {
        self.entries.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the distinct signature count for `hash`, or 0 if nothing was stored.
    pub fn get_signature_count(&self, hash: &MessageHash) -> u64 {
        self.entries.get(hash).map(|entry| entry.num_signatures()).unwrap_or(0)
    }

    /// Returns every signature stored for `hash`. Empty for an unknown hash.
    pub fn get_signatures(&self, hash: &MessageHash) -> Vec<Vec<u8>> {
        match self.entry(hash) {
            Some(entry) => entry.signatures(),
            None => Vec::new(),
        }
    }

    /// Stores the signature unless `(hash, address)` already has one; the first bytes win.
    ///
    /// Returns the count after the call.
    pub fn put(&self, signature: MessageSignature) -> u64 {
        let MessageSignature { hash, address, signature } = signature;
        // The entry is installed under the shard lock, so racing first inserts all share one entry.
        let entry = self.entries.entry(hash).or_insert_with(|| Arc::new(SignedMessageEntry::new(hash))).value().clone();
        entry.insert(address, signature)
    }

    /// Drops every signature for `hash`. Returns true if the entry existed.
    pub fn remove_message(&self, hash: &MessageHash) -> bool {
        self.entries.remove(hash).is_some()
    }

    /// Removes signatures authored by any of `addresses` from every entry.
    ///
    /// Returns the hashes that lost at least one signature.
    pub fn remove_signatures(&self, addresses: &[ValidatorAddress]) -> Vec<MessageHash> {
        let mut touched = Vec::new();
        if addresses.is_empty() {
            return touched;
        }
        self.range_messages(|entry| {
            let removed = addresses.iter().filter(|addr| entry.remove(addr)).count();
            if removed > 0 {
                touched.push(entry.hash());
            }
            true
        });
        touched
    }

    /// Calls `visitor` once per entry until it returns false.
    ///
    /// Entries are snapshotted first; ones created during the walk may be skipped.
    pub fn range_messages<F>(&self, mut visitor: F)
    where
        F: FnMut(&SignedMessageEntry) -> bool,
    {
        let snapshot: Vec<Arc<SignedMessageEntry>> = self.entries.iter().map(|item| item.value().clone()).collect();
        for entry in snapshot {
            if !visitor(&entry) {
                break;
            }
        }
    }

    fn entry(&self, hash: &MessageHash) -> Option<Arc<SignedMessageEntry>> {
        self.entries.get(hash).map(|entry| entry.value().clone())
    }
}
