use crate::fixtures::*;
use sigpool_core::{MessageHash, Pool};
use std::thread;

fn assert_ready_matches_rule(pool: &Pool, hashes: &[MessageHash]) {
    let threshold = pool.threshold();
    for hash in hashes {
        let expected = pool.is_known(hash) && pool.signature_count(hash) >= threshold;
        assert_eq!(pool.is_ready(hash), expected, "stale readiness for {hash:#x} threshold={threshold}");
    }
}

#[test]
fn test_ingestion_racing_reconfiguration_settles_consistently() {
    let validators: Vec<_> = (0..6u16).map(indexed_addr).collect();
    let pool = Pool::new(validators.clone(), 3);
    let hashes: Vec<_> = (0..120u16).map(indexed_hash).collect();

    thread::scope(|scope| {
        let pool = &pool;
        let hashes = &hashes;
        let validators = &validators;

        scope.spawn(move || {
            for h in hashes {
                pool.add_message(message(*h, b"body"));
            }
        });
        for validator in validators {
            scope.spawn(move || {
                for h in hashes {
                    pool.add_signature(signature(*h, *validator));
                }
            });
        }
        scope.spawn(move || {
            for round in 0..20usize {
                // Alternate between dropping the last two validators and restoring them,
                // moving the threshold around as we go.
                let keep = if round % 2 == 0 { 4 } else { 6 };
                let threshold = 1 + (round % 4) as u64;
                pool.update_validator_set(validators[..keep].to_vec(), threshold);
                thread::yield_now();
            }
        });
        scope.spawn(move || {
            for _ in 0..100 {
                let _ = pool.ready_messages();
                let _ = pool.stats();
            }
        });
    });

    assert_ready_matches_rule(&pool, &hashes);

    // One more reconfiguration from a quiet pool must also land on the rule.
    pool.update_validator_set(validators[..3].to_vec(), 2);
    assert_ready_matches_rule(&pool, &hashes);
    for h in &hashes {
        assert!(pool.signature_count(h) <= 3);
    }
}

#[test]
fn test_threshold_flapping_is_reversible() {
    let validators: Vec<_> = (0..5u16).map(indexed_addr).collect();
    let pool = Pool::new(validators.clone(), 5);
    let hashes: Vec<_> = (0..50u16).map(indexed_hash).collect();
    for (i, h) in hashes.iter().enumerate() {
        pool.add_message(message(*h, b"body"));
        for validator in validators.iter().take(i % 6) {
            pool.add_signature(signature(*h, *validator));
        }
    }

    thread::scope(|scope| {
        let pool = &pool;
        let validators = &validators;
        for worker in 0..4u64 {
            scope.spawn(move || {
                for step in 0..25u64 {
                    pool.update_validator_set(validators.clone(), 1 + (worker + step) % 5);
                }
            });
        }
    });
    assert_ready_matches_rule(&pool, &hashes);

    pool.update_validator_set(validators.clone(), 5);
    let ready = pool.ready_messages();
    assert!(ready.iter().all(|m| m.signatures.len() == 5));
    assert_ready_matches_rule(&pool, &hashes);
}
