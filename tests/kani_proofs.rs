//! Kani verification proofs for PriorityTree
//!
//! Kani is AWS's model checker for Rust. It can verify properties of Rust code
//! by checking all possible executions up to certain bounds.
//!
//! To run these proofs:
//!   cargo kani --tests

#[allow(unused_imports)]
use chained_pqueue::{Heap, PriorityTree, QueueError};

/// Proof that insert always increments the length
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_insert_increments_len() {
    let mut queue: PriorityTree<u8, u8> = PriorityTree::new();
    queue.insert(kani::any(), kani::any());
    let initial_len = queue.len();

    queue.insert(kani::any(), kani::any());

    assert!(queue.len() == initial_len + 1);
}

/// Proof that get_min returns the oldest element at the minimum priority
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_get_min_is_stable_minimum() {
    let mut queue: PriorityTree<u8, u8> = PriorityTree::new();

    let p1: u8 = kani::any();
    let p2: u8 = kani::any();
    let p3: u8 = kani::any();

    queue.insert(1, p1);
    queue.insert(2, p2);
    queue.insert(3, p3);

    let min = p1.min(p2).min(p3);
    let expected = if p1 == min {
        1
    } else if p2 == min {
        2
    } else {
        3
    };
    assert!(queue.get_min() == Ok(expected));
    assert!(queue.verify_invariants().is_ok());
}

/// Proof that every removal case keeps the structure valid
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_removals_preserve_invariants() {
    let mut queue: PriorityTree<u8, u8> = PriorityTree::new();

    queue.insert(0, kani::any());
    queue.insert(1, kani::any());
    queue.insert(2, kani::any());
    queue.insert(3, kani::any());

    let target: u8 = kani::any();
    let _ = queue.remove_priority(&target);
    assert!(queue.verify_invariants().is_ok());

    let _ = queue.pop_max();
    assert!(queue.verify_invariants().is_ok());

    let _ = queue.pop();
    assert!(queue.verify_invariants().is_ok());
}

/// Proof that an empty queue reports emptiness explicitly
#[cfg(kani)]
#[kani::proof]
fn verify_empty_is_explicit() {
    let mut queue: PriorityTree<u8, u8> = PriorityTree::new();
    assert!(queue.get_min() == Err(QueueError::Empty));
    assert!(queue.peek_min() == Err(QueueError::Empty));
}
