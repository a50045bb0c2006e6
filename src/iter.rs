//! In-order traversal
//!
//! Two ways to walk a [`PriorityTree`] from the smallest priority to the
//! largest, with every duplicate chain visited in insertion order right after
//! its tree position:
//!
//! - [`Iter`], a borrowing iterator from [`PriorityTree::iter`]. The borrow
//!   keeps the tree frozen while it is alive.
//! - The `begin`/`next_entry` cursor stored inside the tree. It survives
//!   between calls without holding a borrow, so any mutation in between resets
//!   it and the next call fails with [`QueueError::Protocol`]. Callers that
//!   mutate mid-traversal must call `begin` again.
//!
//! # Example
//!
//! ```rust
//! use chained_pqueue::PriorityTree;
//!
//! let mut queue = PriorityTree::new();
//! queue.insert('a', 2);
//! queue.insert('b', 1);
//! queue.insert('c', 2);
//!
//! let seen: Vec<_> = queue.iter().map(|(p, v)| (*p, *v)).collect();
//! assert_eq!(seen, vec![(1, 'b'), (2, 'a'), (2, 'c')]);
//!
//! queue.begin();
//! let mut lines = Vec::new();
//! loop {
//!     let (p, v, has_more) = queue.next_entry().unwrap();
//!     lines.push(format!("{p} value: {v}"));
//!     if !has_more {
//!         break;
//!     }
//! }
//! assert_eq!(lines, ["1 value: b", "2 value: a", "2 value: c"]);
//! ```

use crate::arena::NodeKey;
use crate::traits::QueueError;
use crate::tree::PriorityTree;
use std::iter::FusedIterator;

/// State of the `begin`/`next_entry` protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cursor {
    /// `begin` has not been called since the last mutation
    NotStarted,
    /// The next call to `next_entry` yields this node
    InProgress(NodeKey),
    /// The last element has been handed out
    Exhausted,
}

impl Cursor {
    #[inline]
    pub(crate) fn invalidate(&mut self) {
        *self = Cursor::NotStarted;
    }
}

impl<T, P: Ord> PriorityTree<T, P> {
    /// In-order successor of `key`, duplicates included
    pub(crate) fn successor(&self, key: NodeKey) -> Option<NodeKey> {
        let node = &self.arena[key];
        if node.is_dup() {
            return node.next_dup;
        }

        // The end of a chain continues from the tree position that owns it
        let position = if node.chained {
            self.arena.chain_head(key)
        } else {
            key
        };

        let node = &self.arena[position];
        if let Some(right) = node.right {
            return Some(self.arena.leftmost(right));
        }

        let mut child = position;
        let mut parent = node.parent;
        while let Some(up) = parent {
            let up_node = &self.arena[up];
            if up_node.left == Some(child) {
                return Some(up);
            }
            child = up;
            parent = up_node.parent;
        }
        None
    }

    /// Starts (or restarts) a cursor traversal at the minimum priority
    ///
    /// On an empty queue the cursor is immediately exhausted.
    pub fn begin(&mut self) {
        self.cursor = match self.min_key() {
            Some(key) => Cursor::InProgress(key),
            None => Cursor::Exhausted,
        };
    }

    /// Returns the cursor's element and advances it
    ///
    /// The third field is `true` while more elements follow. The call that
    /// returns `false` hands out the last element; the traversal is then
    /// exhausted.
    ///
    /// # Errors
    /// [`QueueError::Protocol`] when no traversal is in progress: before
    /// `begin`, after exhaustion, or after the queue was mutated.
    pub fn next_entry(&mut self) -> Result<(&P, &T, bool), QueueError> {
        let Cursor::InProgress(key) = self.cursor else {
            return Err(QueueError::Protocol);
        };

        let next = self.successor(key);
        self.cursor = match next {
            Some(next) => Cursor::InProgress(next),
            None => Cursor::Exhausted,
        };

        let node = &self.arena[key];
        Ok((&node.priority, &node.value, next.is_some()))
    }

    /// Borrowing in-order iterator over `(priority, value)` pairs
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter {
            tree: self,
            next: self.min_key(),
            remaining: self.len,
        }
    }
}

/// Borrowing in-order iterator, created by [`PriorityTree::iter`]
pub struct Iter<'a, T, P> {
    tree: &'a PriorityTree<T, P>,
    next: Option<NodeKey>,
    remaining: usize,
}

impl<T, P> Clone for Iter<'_, T, P> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, P: Ord> Iterator for Iter<'a, T, P> {
    type Item = (&'a P, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.next?;
        let tree = self.tree;
        self.next = tree.successor(key);
        self.remaining -= 1;
        let node = &tree.arena[key];
        Some((&node.priority, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, P: Ord> ExactSizeIterator for Iter<'_, T, P> {}

impl<T, P: Ord> FusedIterator for Iter<'_, T, P> {}

impl<'a, T, P: Ord> IntoIterator for &'a PriorityTree<T, P> {
    type Item = (&'a P, &'a T);
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator that drains the queue in priority order
pub struct IntoIter<T, P> {
    tree: PriorityTree<T, P>,
}

impl<T, P: Ord> Iterator for IntoIter<T, P> {
    type Item = (P, T);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.tree.min_key()?;
        Some(self.tree.remove_node(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len, Some(self.tree.len))
    }
}

impl<T, P: Ord> ExactSizeIterator for IntoIter<T, P> {}

impl<T, P: Ord> FusedIterator for IntoIter<T, P> {}

impl<T, P: Ord> IntoIterator for PriorityTree<T, P> {
    type Item = (P, T);
    type IntoIter = IntoIter<T, P>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tree: self }
    }
}
