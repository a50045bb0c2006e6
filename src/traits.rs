//! Common traits and error types
//!
//! [`Heap`] is the standard-library-style priority queue interface: `push`,
//! `peek` and `pop` work with `(priority, item)` pairs and report emptiness
//! through `Option`. [`QueueError`] is used by the operations that report
//! failure explicitly instead.

use thiserror::Error;

/// Error type for queue operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue holds no elements
    #[error("priority queue is empty")]
    Empty,
    /// `next_entry` was called without an active `begin` traversal
    ///
    /// This covers calling it before `begin`, after the traversal reported its
    /// last element, and after any mutation invalidated the cursor.
    #[error("no traversal in progress; call begin() first")]
    Protocol,
    /// A structural invariant does not hold
    ///
    /// Only produced by `verify_invariants`. Seeing this means the tree is
    /// corrupt.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use chained_pqueue::{Heap, PriorityTree};
///
/// let mut heap = PriorityTree::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    ///
    /// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps.
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps.
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(QueueError::Empty.to_string(), "priority queue is empty");
        assert_eq!(
            QueueError::Protocol.to_string(),
            "no traversal in progress; call begin() first"
        );
        assert_eq!(
            QueueError::InvariantViolation("left child out of order".into()).to_string(),
            "invariant violated: left child out of order"
        );
    }
}
