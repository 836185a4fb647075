//! Contention tests for the shared endpoint pool: concurrent failure
//! reports against one slot must collapse into a single cursor advance.

use std::sync::{Arc, Barrier};
use std::thread;

use cdm_core::penalty::PenaltyBook;
use cdm_core::pool::{Endpoint, EndpointKind, EndpointPool};

fn server(host: &str, capacity: u32, load: f32) -> Endpoint {
    Endpoint {
        host: host.to_string(),
        kind: EndpointKind::Cdn,
        capacity,
        allowed_content_ids: Vec::new(),
        load,
        use_as_proxy: false,
    }
}

#[test]
fn contended_duplicate_failures_advance_once() {
    let pool = Arc::new(
        EndpointPool::from_directory(
            730,
            vec![server("a", 2, 1.0), server("b", 1, 2.0)],
            &PenaltyBook::new(),
        )
        .unwrap(),
    );
    // Expanded sequence is [a, a, b]; every worker holds the first "a" slot.
    let held = pool.connection();

    let workers = 8;
    let barrier = Arc::new(Barrier::new(workers));
    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let pool = Arc::clone(&pool);
            let held = Arc::clone(&held);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                pool.report_failure(&held);
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    // Net advance of exactly one: still on "a" (its second slot), not "b".
    let now = pool.connection();
    assert_eq!(now.host, "a");
    assert!(!Arc::ptr_eq(&held, &now));

    // One more report moves on to "b".
    pool.report_failure(&now);
    assert_eq!(pool.connection().host, "b");
}

#[test]
fn concurrent_readers_and_failures_never_go_out_of_bounds() {
    let pool = Arc::new(
        EndpointPool::from_directory(
            730,
            vec![server("a", 2, 1.0), server("b", 3, 2.0), server("c", 1, 3.0)],
            &PenaltyBook::new(),
        )
        .unwrap(),
    );

    let mut handles = Vec::new();
    for _ in 0..4 {
        let pool = Arc::clone(&pool);
        handles.push(thread::spawn(move || {
            // Readers: connection() must always return a live slot.
            for _ in 0..2_000 {
                let ep = pool.connection();
                assert!(!ep.host.is_empty());
            }
        }));
    }
    for _ in 0..4 {
        let pool = Arc::clone(&pool);
        handles.push(thread::spawn(move || {
            // Failers: drive the cursor through several full wraps.
            for _ in 0..2_000 {
                let held = pool.connection();
                pool.report_failure(&held);
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    // The pool is still serving some slot from its sequence.
    let survivor = pool.connection();
    assert!(pool.slots().iter().any(|s| Arc::ptr_eq(s, &survivor)));
}
