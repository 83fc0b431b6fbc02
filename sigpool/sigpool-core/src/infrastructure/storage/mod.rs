mod signature_store;

pub use signature_store::{SignatureStore, SignedMessageEntry};
