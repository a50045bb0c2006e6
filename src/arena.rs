//! Arena storage for tree nodes
//!
//! Every node of a [`PriorityTree`](crate::tree::PriorityTree) lives in a single
//! `slotmap` arena owned by the tree. Links between nodes are plain
//! [`NodeKey`]s:
//!
//! - `left`, `right` and `next_dup` are the owning relations. A node is
//!   reachable from the root through exactly one of them.
//! - `parent` is a non-owning back-reference. For a node in a duplicate chain
//!   it points at the previous element of that chain.
//!
//! Only the arena frees memory. Dropping or clearing it releases every node at
//! once, so there is no recursive teardown and no way for a back-reference to
//! free anything.

use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Generational key of a node in the arena
    pub(crate) struct NodeKey;
}

/// A single arena-resident node
///
/// A node either occupies a tree position (`chained == false`) or sits in the
/// duplicate chain of a tree position with the same priority. Chained nodes
/// never have `left`/`right` children.
#[derive(Debug)]
pub(crate) struct Node<T, P> {
    pub(crate) priority: P,
    pub(crate) value: T,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) left: Option<NodeKey>,
    pub(crate) right: Option<NodeKey>,
    /// Next duplicate with the same priority, in insertion order
    pub(crate) next_dup: Option<NodeKey>,
    pub(crate) chained: bool,
}

impl<T, P> Node<T, P> {
    /// A node that will occupy a tree slot below `parent`
    pub(crate) fn positioned(priority: P, value: T, parent: Option<NodeKey>) -> Self {
        Node {
            priority,
            value,
            parent,
            left: None,
            right: None,
            next_dup: None,
            chained: false,
        }
    }

    /// A node appended to a duplicate chain after `prev`
    pub(crate) fn chained(priority: P, value: T, prev: NodeKey) -> Self {
        Node {
            priority,
            value,
            parent: Some(prev),
            left: None,
            right: None,
            next_dup: None,
            chained: true,
        }
    }

    /// True when more same-priority elements hang off this node
    #[inline]
    pub(crate) fn is_dup(&self) -> bool {
        self.next_dup.is_some()
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Slotmap-backed node arena
///
/// Indexing with a stale key panics; every key the tree holds is live by
/// construction, so a panic here means the tree's links are corrupt.
#[derive(Debug)]
pub(crate) struct Arena<T, P> {
    nodes: SlotMap<NodeKey, Node<T, P>>,
}

impl<T, P> Default for Arena<T, P> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<T, P> Arena<T, P> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    #[inline]
    pub(crate) fn alloc(&mut self, node: Node<T, P>) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Removes a node from the arena and hands back its contents
    ///
    /// The caller must already have unlinked it from its neighbours.
    #[inline]
    pub(crate) fn free(&mut self, key: NodeKey) -> Option<Node<T, P>> {
        self.nodes.remove(key)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Mutable access to two distinct nodes at once
    pub(crate) fn pair_mut(
        &mut self,
        a: NodeKey,
        b: NodeKey,
    ) -> Option<[&mut Node<T, P>; 2]> {
        self.nodes.get_disjoint_mut([a, b])
    }

    /// Follows `left` links down to the smallest priority below `key`
    pub(crate) fn leftmost(&self, mut key: NodeKey) -> NodeKey {
        while let Some(left) = self.nodes[key].left {
            key = left;
        }
        key
    }

    /// Follows `right` links down to the largest priority below `key`
    pub(crate) fn rightmost(&self, mut key: NodeKey) -> NodeKey {
        while let Some(right) = self.nodes[key].right {
            key = right;
        }
        key
    }

    /// Walks from a chained node back to the tree position owning its chain
    pub(crate) fn chain_head(&self, mut key: NodeKey) -> NodeKey {
        while self.nodes[key].chained {
            match self.nodes[key].parent {
                Some(prev) => key = prev,
                None => break,
            }
        }
        key
    }

    /// Last element of the duplicate chain starting at `key`
    pub(crate) fn chain_tail(&self, mut key: NodeKey) -> NodeKey {
        while let Some(next) = self.nodes[key].next_dup {
            key = next;
        }
        key
    }

    /// Number of elements in the chain starting at `key`, `key` included
    pub(crate) fn chain_len(&self, key: NodeKey) -> usize {
        let mut count = 1;
        let mut current = key;
        while let Some(next) = self.nodes[current].next_dup {
            count += 1;
            current = next;
        }
        count
    }
}

impl<T, P> Index<NodeKey> for Arena<T, P> {
    type Output = Node<T, P>;

    #[inline]
    fn index(&self, key: NodeKey) -> &Self::Output {
        &self.nodes[key]
    }
}

impl<T, P> IndexMut<NodeKey> for Arena<T, P> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut Self::Output {
        &mut self.nodes[key]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_free() {
        let mut arena: Arena<&str, i32> = Arena::default();

        let key = arena.alloc(Node::positioned(1, "one", None));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena[key].value, "one");
        assert!(arena[key].is_leaf());
        assert!(!arena[key].is_dup());

        let node = arena.free(key).unwrap();
        assert_eq!(node.priority, 1);
        assert!(!arena.contains(key));
        assert!(arena.free(key).is_none());
    }

    #[test]
    fn test_chain_navigation() {
        let mut arena: Arena<char, i32> = Arena::default();

        let head = arena.alloc(Node::positioned(7, 'a', None));
        let second = arena.alloc(Node::chained(7, 'b', head));
        arena[head].next_dup = Some(second);
        let third = arena.alloc(Node::chained(7, 'c', second));
        arena[second].next_dup = Some(third);

        assert!(arena[head].is_dup());
        assert_eq!(arena.chain_tail(head), third);
        assert_eq!(arena.chain_head(third), head);
        assert_eq!(arena.chain_head(head), head);
        assert_eq!(arena.chain_len(head), 3);
        assert_eq!(arena.chain_len(second), 2);
    }

    #[test]
    fn test_extremes() {
        let mut arena: Arena<(), i32> = Arena::default();

        let root = arena.alloc(Node::positioned(5, (), None));
        let low = arena.alloc(Node::positioned(2, (), Some(root)));
        let high = arena.alloc(Node::positioned(9, (), Some(root)));
        arena[root].left = Some(low);
        arena[root].right = Some(high);

        assert_eq!(arena.leftmost(root), low);
        assert_eq!(arena.rightmost(root), high);
        assert_eq!(arena.leftmost(high), high);
    }

    #[test]
    fn test_pair_mut_rejects_aliasing() {
        let mut arena: Arena<i32, i32> = Arena::default();
        let a = arena.alloc(Node::positioned(1, 10, None));
        let b = arena.alloc(Node::positioned(2, 20, None));

        if let Some([x, y]) = arena.pair_mut(a, b) {
            std::mem::swap(&mut x.value, &mut y.value);
        }
        assert_eq!(arena[a].value, 20);
        assert_eq!(arena[b].value, 10);

        assert!(arena.pair_mut(a, a).is_none());
    }
}
