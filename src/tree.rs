//! Priority queue on a binary search tree with duplicate chains
//!
//! [`PriorityTree`] keeps one tree position per distinct priority. Inserting a
//! priority that already has a position appends the element to that
//! position's duplicate chain, so equal priorities come back out in insertion
//! order.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity          |
//! |-------------------|---------------------|
//! | `insert`          | O(h + m)            |
//! | `peek_min`        | O(h)                |
//! | `get_min`         | O(h)                |
//! | `pop_max`         | O(h)                |
//! | `remove_priority` | O(h)                |
//! | `clear`           | O(n)                |
//!
//! `h` is the tree height and `m` the length of the duplicate chain at the
//! inserted priority. The tree never rebalances, so `h` is O(n) when
//! priorities arrive already sorted.
//!
//! # Example
//!
//! ```rust
//! use chained_pqueue::PriorityTree;
//!
//! let mut queue = PriorityTree::new();
//! queue.insert("Dolores", 5);
//! queue.insert("Ford", 2);
//! queue.insert("Arnold", 8);
//! queue.insert("William", 8);
//!
//! assert_eq!(queue.len(), 4);
//! assert_eq!(queue.peek_min(), Ok(&"Ford"));
//! assert_eq!(queue.get_min(), Ok("Ford"));
//! assert_eq!(
//!     queue.to_canonical_string(),
//!     "5 value: Dolores\n8 value: Arnold\n8 value: William\n"
//! );
//! ```

use crate::arena::{Arena, Node, NodeKey};
use crate::iter::Cursor;
use crate::traits::{Heap, QueueError};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::mem;

/// Unbalanced BST priority queue with per-priority duplicate chains
///
/// `T` is the stored value and only needs `PartialEq` for queue equality.
/// `P` is the priority and must be totally ordered; it defaults to `i32`.
///
/// The queue is single-writer. Every mutation takes `&mut self`, and every
/// mutation resets the [`begin`](PriorityTree::begin) cursor.
pub struct PriorityTree<T, P = i32> {
    pub(crate) arena: Arena<T, P>,
    pub(crate) root: Option<NodeKey>,
    pub(crate) len: usize,
    pub(crate) cursor: Cursor,
}

impl<T, P> Default for PriorityTree<T, P> {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            root: None,
            len: 0,
            cursor: Cursor::NotStarted,
        }
    }
}

impl<T, P: Ord> PriorityTree<T, P> {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of elements, duplicates included
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `value` with `priority`
    ///
    /// Never fails. A priority already present in the tree gets the new value
    /// appended to the end of its duplicate chain and the tree shape stays as
    /// it is. Otherwise the value takes a fresh leaf position.
    pub fn insert(&mut self, value: T, priority: P) {
        self.cursor.invalidate();
        self.len += 1;

        let Some(mut current) = self.root else {
            self.root = Some(self.arena.alloc(Node::positioned(priority, value, None)));
            log::trace!("inserted root");
            return;
        };

        let mut depth = 0usize;
        loop {
            let node = &self.arena[current];
            let next = match priority.cmp(&node.priority) {
                Ordering::Equal => {
                    self.append_dup(current, priority, value);
                    return;
                }
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            depth += 1;

            match next {
                Some(child) => current = child,
                None => {
                    let goes_left = priority < self.arena[current].priority;
                    let key = self
                        .arena
                        .alloc(Node::positioned(priority, value, Some(current)));
                    if goes_left {
                        self.arena[current].left = Some(key);
                    } else {
                        self.arena[current].right = Some(key);
                    }
                    log::trace!("inserted tree position at depth {depth}");
                    return;
                }
            }
        }
    }

    fn append_dup(&mut self, head: NodeKey, priority: P, value: T) {
        let tail = self.arena.chain_tail(head);
        let key = self.arena.alloc(Node::chained(priority, value, tail));
        self.arena[tail].next_dup = Some(key);
        log::trace!(
            "chained duplicate, chain length now {}",
            self.arena.chain_len(head)
        );
    }

    /// Value at the minimum priority, without removing it
    ///
    /// When the minimum priority has duplicates this is the oldest of them.
    ///
    /// # Errors
    /// [`QueueError::Empty`] when the queue holds nothing.
    pub fn peek_min(&self) -> Result<&T, QueueError> {
        self.min_key()
            .map(|key| &self.arena[key].value)
            .ok_or(QueueError::Empty)
    }

    /// Removes and returns the value at the minimum priority
    ///
    /// # Errors
    /// [`QueueError::Empty`] when the queue holds nothing. The queue is left
    /// untouched in that case.
    pub fn get_min(&mut self) -> Result<T, QueueError> {
        let key = self.min_key().ok_or(QueueError::Empty)?;
        Ok(self.remove_node(key).1)
    }

    /// Minimum priority and its oldest value
    pub fn peek_min_entry(&self) -> Option<(&P, &T)> {
        self.min_key().map(|key| {
            let node = &self.arena[key];
            (&node.priority, &node.value)
        })
    }

    /// Maximum priority and its oldest value
    pub fn peek_max(&self) -> Option<(&P, &T)> {
        self.max_key().map(|key| {
            let node = &self.arena[key];
            (&node.priority, &node.value)
        })
    }

    /// Removes the oldest element at the maximum priority
    pub fn pop_max(&mut self) -> Option<(P, T)> {
        let key = self.max_key()?;
        Some(self.remove_node(key))
    }

    /// Removes the oldest element stored under `priority`
    ///
    /// Returns `None` if no element has that priority.
    pub fn remove_priority(&mut self, priority: &P) -> Option<T> {
        let key = self.find(priority)?;
        Some(self.remove_node(key).1)
    }

    pub fn contains_priority(&self, priority: &P) -> bool {
        self.find(priority).is_some()
    }

    /// How many elements share `priority`
    pub fn count_priority(&self, priority: &P) -> usize {
        self.find(priority)
            .map_or(0, |key| self.arena.chain_len(key))
    }

    /// Number of levels in the tree; duplicate chains do not add levels
    pub fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut height = 0;
        let mut stack: SmallVec<[(NodeKey, usize); 32]> = SmallVec::new();
        stack.push((root, 1));
        while let Some((key, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.arena[key];
            stack.extend(node.left.map(|k| (k, depth + 1)));
            stack.extend(node.right.map(|k| (k, depth + 1)));
        }
        height
    }

    /// Removes every element
    pub fn clear(&mut self) {
        log::debug!("clearing priority tree with {} elements", self.len);
        self.arena.clear();
        self.root = None;
        self.len = 0;
        self.cursor.invalidate();
    }

    pub(crate) fn min_key(&self) -> Option<NodeKey> {
        self.root.map(|root| self.arena.leftmost(root))
    }

    pub(crate) fn max_key(&self) -> Option<NodeKey> {
        self.root.map(|root| self.arena.rightmost(root))
    }

    /// Tree position holding `priority`, if any
    fn find(&self, priority: &P) -> Option<NodeKey> {
        let mut current = self.root;
        while let Some(key) = current {
            let node = &self.arena[key];
            current = match priority.cmp(&node.priority) {
                Ordering::Equal => return Some(key),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Removes the element stored at the tree position `key`
    ///
    /// `key` must be a live tree position (not a chained node).
    pub(crate) fn remove_node(&mut self, key: NodeKey) -> (P, T) {
        self.cursor.invalidate();
        self.len -= 1;

        if let Some(next) = self.arena[key].next_dup {
            log::trace!("removing duplicate chain head");
            return self.promote_dup(key, next);
        }

        let node = self.unlink(key);
        (node.priority, node.value)
    }

    /// Moves the first chained duplicate into the head's tree position
    ///
    /// The head keeps its key and its tree links; only the payload changes
    /// hands, so the tree shape is untouched.
    fn promote_dup(&mut self, head: NodeKey, next: NodeKey) -> (P, T) {
        let Some(promoted) = self.arena.free(next) else {
            unreachable!("duplicate chain link points at a freed node");
        };
        if let Some(after) = promoted.next_dup {
            self.arena[after].parent = Some(head);
        }

        let head_node = &mut self.arena[head];
        head_node.next_dup = promoted.next_dup;
        let value = mem::replace(&mut head_node.value, promoted.value);
        (promoted.priority, value)
    }

    /// Detaches a tree position without a duplicate chain and frees it
    fn unlink(&mut self, key: NodeKey) -> Node<T, P> {
        let node = &self.arena[key];
        match (node.left, node.right) {
            (None, None) => {
                log::trace!("removing leaf");
                self.replace_in_parent(key, None);
            }
            (Some(child), None) | (None, Some(child)) => {
                log::trace!("removing node with one child");
                self.replace_in_parent(key, Some(child));
            }
            (Some(_), Some(right)) => {
                log::trace!("removing node with two children");
                let successor = self.arena.leftmost(right);
                self.swap_payload(key, successor);
                return self.unlink(successor);
            }
        }

        match self.arena.free(key) {
            Some(node) => node,
            None => unreachable!("unlinked a node that was already freed"),
        }
    }

    /// Points `key`'s parent (or the root) at `child` instead of `key`
    fn replace_in_parent(&mut self, key: NodeKey, child: Option<NodeKey>) {
        let parent = self.arena[key].parent;
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }

        match parent {
            None => self.root = child,
            Some(parent) => {
                let parent_node = &mut self.arena[parent];
                if parent_node.left == Some(key) {
                    parent_node.left = child;
                } else {
                    parent_node.right = child;
                }
            }
        }
    }

    /// Exchanges priority, value and duplicate chain between two tree positions
    fn swap_payload(&mut self, a: NodeKey, b: NodeKey) {
        if let Some([x, y]) = self.arena.pair_mut(a, b) {
            mem::swap(&mut x.priority, &mut y.priority);
            mem::swap(&mut x.value, &mut y.value);
            mem::swap(&mut x.next_dup, &mut y.next_dup);
        }
        for owner in [a, b] {
            if let Some(first) = self.arena[owner].next_dup {
                self.arena[first].parent = Some(owner);
            }
        }
    }

    /// Checks every structural invariant of the tree
    ///
    /// - the root has no parent and every child points back at its parent
    /// - priorities are strictly ordered across tree positions
    /// - chained nodes carry their head's priority, have no children and
    ///   point back at the previous chain element
    /// - every node is reachable exactly once and the count matches `len`
    ///
    /// # Errors
    /// [`QueueError::InvariantViolation`] describing the first problem found.
    pub fn verify_invariants(&self) -> Result<(), QueueError> {
        let violation = |msg: &str| -> Result<(), QueueError> {
            Err(QueueError::InvariantViolation(msg.to_string()))
        };

        let Some(root) = self.root else {
            if self.len != 0 || self.arena.len() != 0 {
                return violation("empty tree with a non-zero element count");
            }
            return Ok(());
        };
        if self.arena[root].parent.is_some() {
            return violation("root has a parent");
        }

        let mut seen: FxHashSet<NodeKey> = FxHashSet::default();
        let mut stack: SmallVec<[(NodeKey, Option<&P>, Option<&P>); 32]> = SmallVec::new();
        stack.push((root, None, None));

        while let Some((key, lower, upper)) = stack.pop() {
            if !self.arena.contains(key) {
                return violation("link to a freed node");
            }
            if !seen.insert(key) {
                return violation("node reachable twice");
            }
            let node = &self.arena[key];
            if node.chained {
                return violation("chained node occupies a tree position");
            }
            if lower.is_some_and(|low| node.priority <= *low)
                || upper.is_some_and(|high| node.priority >= *high)
            {
                return violation("priority out of search-tree order");
            }

            for child in [node.left, node.right].into_iter().flatten() {
                if self.arena.contains(child) && self.arena[child].parent != Some(key) {
                    return violation("child does not point back at its parent");
                }
            }
            if let Some(left) = node.left {
                stack.push((left, lower, Some(&node.priority)));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(&node.priority), upper));
            }

            let mut prev = key;
            let mut link = node.next_dup;
            while let Some(dup) = link {
                if !self.arena.contains(dup) {
                    return violation("duplicate chain links to a freed node");
                }
                if !seen.insert(dup) {
                    return violation("duplicate chain node reachable twice");
                }
                let dup_node = &self.arena[dup];
                if !dup_node.chained {
                    return violation("duplicate chain node is not marked as chained");
                }
                if !dup_node.is_leaf() {
                    return violation("duplicate chain node has children");
                }
                if dup_node.priority != node.priority {
                    return violation("duplicate chain node has a different priority");
                }
                if dup_node.parent != Some(prev) {
                    return violation("duplicate chain node does not point back at its predecessor");
                }
                prev = dup;
                link = dup_node.next_dup;
            }
        }

        if seen.len() != self.len {
            return violation("element count does not match reachable nodes");
        }
        if self.arena.len() != self.len {
            return violation("arena holds unreachable nodes");
        }
        Ok(())
    }
}

impl<T, P: Ord> Heap<T, P> for PriorityTree<T, P> {
    fn new() -> Self {
        PriorityTree::default()
    }

    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, priority: P, item: T) {
        self.insert(item, priority);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.peek_min_entry()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        let key = self.min_key()?;
        Some(self.remove_node(key))
    }

    fn merge(&mut self, mut other: Self) {
        log::debug!("merging {} elements into {}", other.len, self.len);
        for key in other.preorder_keys() {
            if let Some(node) = other.arena.free(key) {
                self.insert(node.value, node.priority);
            }
        }
    }
}
