//! Concurrency tests
//!
//! One gateway is shared across threads; concurrent writes never interleave
//! inside a cell.

use std::sync::{Arc, Barrier};
use std::thread;

use crate::*;

#[test]
fn test_concurrent_writes_same_cell_last_write_wins() {
    let (gateway, store) = create_gateway_with_table();
    let gateway = Arc::new(gateway);
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = ["alpha", "beta"]
        .into_iter()
        .map(|value| {
            let gateway = Arc::clone(&gateway);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                gateway.put_cell("t1", "r1", "f", "q", value).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let value = gateway.get_cell("t1", "r1", "f", "q").unwrap();
    assert!(matches!(value.as_deref(), Some("alpha") | Some("beta")));
    assert_eq!(store.total_cells(), 1);
}

#[test]
fn test_concurrent_writers_different_rows() {
    const NUM_WRITERS: usize = 8;
    const WRITES_PER_THREAD: usize = 50;

    let (gateway, store) = create_gateway_with_table();
    let barrier = Arc::new(Barrier::new(NUM_WRITERS));

    let handles: Vec<_> = (0..NUM_WRITERS)
        .map(|writer| {
            let gateway = gateway.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..WRITES_PER_THREAD {
                    let row = format!("w{}-{:03}", writer, i);
                    gateway.put_cell("t1", &row, "f", "q", &i.to_string()).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(store.total_cells(), NUM_WRITERS * WRITES_PER_THREAD);
    let summary = gateway.scan_rows_matching("t1", "f", "^w0-").unwrap();
    assert_eq!(summary.count, WRITES_PER_THREAD);
    assert_eq!(store.open_handles(), 0);
}

#[test]
fn test_concurrent_create_same_table() {
    const NUM_CREATORS: usize = 4;

    let (gateway, store) = create_gateway();
    let barrier = Arc::new(Barrier::new(NUM_CREATORS));

    let handles: Vec<_> = (0..NUM_CREATORS)
        .map(|_| {
            let gateway = gateway.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                gateway.create_table("shared", "f").unwrap()
            })
        })
        .collect();

    let created = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .filter(|created| *created)
        .count();

    assert_eq!(created, 1);
    assert_eq!(store.table_count(), 1);
}

#[test]
fn test_readers_during_writes_see_whole_values() {
    let (gateway, _) = create_gateway_with_table();
    gateway.put_cell("t1", "r1", "f", "q", "aaaa").unwrap();
    let barrier = Arc::new(Barrier::new(2));

    let writer = {
        let gateway = gateway.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for i in 0..200 {
                let value = if i % 2 == 0 { "bbbb" } else { "aaaa" };
                gateway.put_cell("t1", "r1", "f", "q", value).unwrap();
            }
        })
    };

    let reader = {
        let gateway = gateway.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..200 {
                let value = gateway.get_cell("t1", "r1", "f", "q").unwrap();
                assert!(matches!(value.as_deref(), Some("aaaa") | Some("bbbb")));
            }
        })
    };

    writer.join().expect("Writer panicked");
    reader.join().expect("Reader panicked");
}
