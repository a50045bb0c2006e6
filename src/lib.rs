//! Chained BST Priority Queue for Rust
//!
//! This crate provides [`PriorityTree`], a min-priority queue stored in an
//! unbalanced binary search tree keyed by priority. Elements that share a
//! priority are kept in a duplicate chain hanging off that priority's tree
//! position, so they leave the queue in the order they arrived.
//!
//! # Features
//!
//! - **Insert / get-min / peek**: the usual priority queue contract, with
//!   emptiness reported as [`QueueError::Empty`] rather than a default value
//! - **In-order traversal**: a borrowing [`Iter`] and a stored
//!   `begin`/`next_entry` cursor that visit duplicates in insertion order
//! - **Value semantics**: deep [`Clone`], structural [`PartialEq`], and a
//!   canonical `"<priority> value: <value>\n"` text form via [`Display`](std::fmt::Display)
//! - **General removal**: `pop_max` and `remove_priority` on top of min
//!   extraction
//! - **Self-checking**: `verify_invariants` audits the whole structure
//!
//! The tree does not rebalance. Inserting priorities in sorted order builds a
//! linked list and every operation becomes O(n).
//!
//! # Example
//!
//! ```rust
//! use chained_pqueue::{Heap, PriorityTree};
//!
//! let mut queue = PriorityTree::new();
//! queue.insert(10, 1);
//! queue.insert(20, 2);
//! queue.insert(30, 2);
//!
//! assert_eq!(queue.to_string(), "1 value: 10\n2 value: 20\n2 value: 30\n");
//! assert_eq!(queue.pop(), Some((1, 10)));
//! assert_eq!(queue.get_min(), Ok(20));
//! assert_eq!(queue.len(), 1);
//! ```

mod arena;
mod copy;
pub mod iter;
pub mod traits;
pub mod tree;

// Re-export the main types for convenience
pub use iter::{IntoIter, Iter};
pub use traits::{Heap, QueueError};
pub use tree::PriorityTree;
