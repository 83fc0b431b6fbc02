use crate::fixtures::*;
use sigpool_core::Pool;

fn signed_pool(signers: &[u8]) -> (Pool, sigpool_core::MessageHash) {
    let pool = two_of_three_pool();
    let h = hash(1);
    pool.add_message(message(h, b"body"));
    for signer in signers {
        pool.add_signature(signature(h, addr(*signer)));
    }
    (pool, h)
}

#[test]
fn test_removing_signer_decrements_and_demotes() {
    let (pool, h) = signed_pool(&[VALIDATOR_A, VALIDATOR_B]);
    assert!(pool.is_ready(&h));

    pool.update_validator_set(vec![addr(VALIDATOR_A), addr(VALIDATOR_C)], 2);

    assert_eq!(pool.signature_count(&h), 1);
    assert!(!pool.is_ready(&h));
    assert!(pool.is_known(&h));
}

#[test]
fn test_removing_non_signer_keeps_ready() {
    let (pool, h) = signed_pool(&[VALIDATOR_A, VALIDATOR_B]);

    pool.update_validator_set(vec![addr(VALIDATOR_A), addr(VALIDATOR_B)], 2);

    assert_eq!(pool.signature_count(&h), 2);
    assert!(pool.is_ready(&h));
}

#[test]
fn test_raising_threshold_demotes() {
    let (pool, h) = signed_pool(&[VALIDATOR_A, VALIDATOR_B]);

    pool.update_validator_set(vec![addr(VALIDATOR_A), addr(VALIDATOR_B), addr(VALIDATOR_C)], 3);

    assert_eq!(pool.threshold(), 3);
    assert_eq!(pool.signature_count(&h), 2);
    assert!(!pool.is_ready(&h));

    pool.add_signature(signature(h, addr(VALIDATOR_C)));
    assert!(pool.is_ready(&h));
}

#[test]
fn test_lowering_threshold_promotes() {
    let (pool, h) = signed_pool(&[VALIDATOR_A]);
    assert!(!pool.is_ready(&h));

    pool.update_validator_set(vec![addr(VALIDATOR_A), addr(VALIDATOR_B), addr(VALIDATOR_C)], 1);

    assert!(pool.is_ready(&h));
}

#[test]
fn test_adding_validator_alone_changes_nothing() {
    let (pool, h) = signed_pool(&[VALIDATOR_A]);

    pool.update_validator_set(vec![addr(VALIDATOR_A), addr(VALIDATOR_B), addr(VALIDATOR_C), addr(VALIDATOR_D)], 2);

    assert_eq!(pool.validators().len(), 4);
    assert_eq!(pool.signature_count(&h), 1);
    assert!(!pool.is_ready(&h));
}

#[test]
fn test_removal_and_threshold_change_together() {
    let pool = two_of_three_pool();
    let h1 = hash(1);
    let h2 = hash(2);
    pool.add_message(message(h1, b"one"));
    pool.add_message(message(h2, b"two"));
    for signer in [VALIDATOR_A, VALIDATOR_B, VALIDATOR_C] {
        pool.add_signature(signature(h1, addr(signer)));
    }
    pool.add_signature(signature(h2, addr(VALIDATOR_C)));
    assert!(pool.is_ready(&h1));
    assert!(!pool.is_ready(&h2));

    // Drop C and lower the quorum to 1: h1 keeps two signatures, h2 loses its only one.
    pool.update_validator_set(vec![addr(VALIDATOR_A), addr(VALIDATOR_B)], 1);

    assert_eq!(pool.signature_count(&h1), 2);
    assert_eq!(pool.signature_count(&h2), 0);
    assert!(pool.is_ready(&h1));
    assert!(!pool.is_ready(&h2));
}

#[test]
fn test_removed_validator_signature_is_dropped_from_ready_output() {
    let pool = Pool::new(vec![addr(VALIDATOR_A), addr(VALIDATOR_B), addr(VALIDATOR_C)], 1);
    let h = hash(9);
    pool.add_message(message(h, b"body"));
    pool.add_signature(signature(h, addr(VALIDATOR_A)));
    pool.add_signature(signature(h, addr(VALIDATOR_B)));

    pool.update_validator_set(vec![addr(VALIDATOR_A), addr(VALIDATOR_C)], 1);

    let ready = pool.ready_messages();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].signatures, vec![sig_bytes(addr(VALIDATOR_A))]);
}
