use crate::fixtures::*;
use sigpool_core::{MessageStatus, Pool};
use std::thread;

#[test]
fn test_consume_wins_over_racing_inserts() {
    let validators: Vec<_> = (0..4u16).map(indexed_addr).collect();
    let pool = Pool::new(validators.clone(), 2);
    let hashes: Vec<_> = (0..300u16).map(indexed_hash).collect();

    thread::scope(|scope| {
        let pool = &pool;
        let hashes = &hashes;
        scope.spawn(move || {
            for h in hashes {
                pool.add_message(message(*h, b"body"));
            }
        });
        for validator in &validators {
            scope.spawn(move || {
                for h in hashes {
                    pool.add_signature(signature(*h, *validator));
                }
            });
        }
        scope.spawn(move || {
            for h in hashes.iter().step_by(2) {
                pool.consume(h);
            }
        });
        scope.spawn(move || {
            for _ in 0..50 {
                for msg in pool.ready_messages() {
                    assert!(!msg.body.is_empty());
                }
            }
        });
    });

    for (i, h) in hashes.iter().enumerate() {
        if i % 2 == 0 {
            assert_eq!(pool.status(h), MessageStatus::Consumed);
            assert!(!pool.is_known(h));
            assert_eq!(pool.signature_count(h), 0);
            assert!(!pool.is_ready(h));
        } else {
            assert_eq!(pool.status(h), MessageStatus::Ready);
            assert_eq!(pool.signature_count(h), 4);
        }
    }

    let stats = pool.stats();
    assert_eq!(stats.consumed, 150);
    assert_eq!(stats.known, 150);
    assert_eq!(stats.ready, 150);
    assert_eq!(stats.signed_entries, 150);
}
