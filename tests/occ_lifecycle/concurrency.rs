//! Concurrency Tests
//!
//! Many writers load the same version and race to update it. Exactly one
//! may win per version; everyone else sees a conflict.

use crate::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const WRITERS: usize = 12;

fn race(repo: AnyRepo) {
    let mut e = TestEntity::new(1, "start");
    repo.insert(&mut e).unwrap();
    let loaded = repo.fetch(1).unwrap().unwrap();

    let barrier = Arc::new(Barrier::new(WRITERS));
    let applied = Arc::new(AtomicUsize::new(0));
    let conflicts = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let repo = repo.clone();
            let barrier = Arc::clone(&barrier);
            let applied = Arc::clone(&applied);
            let conflicts = Arc::clone(&conflicts);
            let mut mine = loaded.clone();

            thread::spawn(move || {
                mine.name = format!("writer {}", i);
                barrier.wait();
                let outcome = repo.update(&mut mine).unwrap();
                if outcome.is_applied() {
                    applied.fetch_add(1, Ordering::SeqCst);
                    Some(mine)
                } else {
                    conflicts.fetch_add(1, Ordering::SeqCst);
                    None
                }
            })
        })
        .collect();

    let winners: Vec<TestEntity> = handles
        .into_iter()
        .filter_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(applied.load(Ordering::SeqCst), 1, "{}", repo.name());
    assert_eq!(conflicts.load(Ordering::SeqCst), WRITERS - 1);

    let stored = repo.fetch(1).unwrap().unwrap();
    assert_eq!(stored, winners[0]);
}

#[test]
fn test_single_winner_memory() {
    race(AnyRepo::Memory(memory_repo()));
}

#[test]
fn test_single_winner_sqlite() {
    race(AnyRepo::Sqlite(sqlite_repo()));
}

/// Writers that re-read on conflict all eventually land, one version each
#[test]
fn test_retrying_writers_serialize() {
    const INCREMENTS: usize = 25;

    for repo in each_repo() {
        let mut e = TestEntity::new(1, "0");
        repo.insert(&mut e).unwrap();

        let barrier = Arc::new(Barrier::new(4));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let repo = repo.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let mut done = 0;
                    while done < INCREMENTS {
                        let mut current = repo.fetch(1).unwrap().unwrap();
                        let n: usize = current.name.parse().unwrap();
                        current.name = (n + 1).to_string();
                        if repo.update(&mut current).unwrap().is_applied() {
                            done += 1;
                        }
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        let stored = repo.fetch(1).unwrap().unwrap();
        assert_eq!(stored.name, (4 * INCREMENTS).to_string(), "{}", repo.name());
    }
}
