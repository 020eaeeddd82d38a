//! Model-checked tests for the lock-guarded sets.
//!
//! With the `loom` feature the wrappers lock through loom's `RwLock`, so
//! every interleaving of the threads below is explored, including the ones
//! where two crossed two-set operations acquire their locks concurrently.
//!
//! # Running these tests
//!
//! ```bash
//! cargo test --test concurrent_loom_tests --features loom --release
//! ```

#![cfg(feature = "loom")]

use loom::sync::Arc;
use loom::thread;

use setwise::concurrent::{ConcurrentOrderedSet, ConcurrentSet};

/// Two threads each union one set into the other; no interleaving deadlocks
/// and both end up holding the full union.
#[test]
fn crossed_unions_never_deadlock() {
    loom::model(|| {
        let left: Arc<ConcurrentSet<i32>> = Arc::new([1, 2].into_iter().collect());
        let right: Arc<ConcurrentSet<i32>> = Arc::new([3].into_iter().collect());

        let forward = {
            let left = Arc::clone(&left);
            let right = Arc::clone(&right);
            thread::spawn(move || left.add_from(&right))
        };
        let backward = {
            let left = Arc::clone(&left);
            let right = Arc::clone(&right);
            thread::spawn(move || right.add_from(&left))
        };

        forward.join().unwrap();
        backward.join().unwrap();

        assert!(left.contains_all(&[1, 2, 3]));
        assert!(right.contains(&3));
    });
}

/// A difference racing an intersection in the opposite direction.
#[test]
fn crossed_difference_and_intersection_never_deadlock() {
    loom::model(|| {
        let left: Arc<ConcurrentOrderedSet<i32>> = Arc::new([1, 2, 3].into_iter().collect());
        let right: Arc<ConcurrentOrderedSet<i32>> = Arc::new([2, 3, 4].into_iter().collect());

        let difference = {
            let left = Arc::clone(&left);
            let right = Arc::clone(&right);
            thread::spawn(move || left.remove_from(&right))
        };
        let intersection = {
            let left = Arc::clone(&left);
            let right = Arc::clone(&right);
            thread::spawn(move || right.retain_from(&left))
        };

        difference.join().unwrap();
        intersection.join().unwrap();

        assert!(left.contains(&1));
        assert!(!left.contains(&4));
    });
}

/// Equality checks in both directions while a third thread mutates.
#[test]
fn crossed_equality_with_writer() {
    loom::model(|| {
        let left: Arc<ConcurrentSet<i32>> = Arc::new([1].into_iter().collect());
        let right: Arc<ConcurrentSet<i32>> = Arc::new([1].into_iter().collect());

        let reader = {
            let left = Arc::clone(&left);
            let right = Arc::clone(&right);
            thread::spawn(move || left.equal(&right))
        };
        let writer = {
            let right = Arc::clone(&right);
            thread::spawn(move || right.add(2))
        };

        let _ = reader.join().unwrap();
        assert!(writer.join().unwrap());
        assert!(!right.equal(&left));
    });
}

/// A snapshot taken during a concurrent add sees either the old or the new
/// contents, never a partial state.
#[test]
fn snapshot_is_atomic() {
    loom::model(|| {
        let set: Arc<ConcurrentOrderedSet<i32>> = Arc::new([1].into_iter().collect());

        let writer = {
            let set = Arc::clone(&set);
            thread::spawn(move || set.add_all([2, 3]))
        };

        let snapshot: Vec<i32> = set.iter().collect();
        writer.join().unwrap();

        assert!(snapshot == vec![1] || snapshot == vec![1, 2, 3]);
    });
}
