//! Value semantics: deep copy, structural equality, canonical text
//!
//! A copy is built by re-inserting the source's elements in pre-order (node,
//! left subtree, right subtree, duplicate chain). Re-insertion in that order
//! rebuilds the same tree shape and the same chain order, so a copy compares
//! equal to its source.
//!
//! Equality is structural. Two queues holding the same elements can still
//! differ if their elements arrived in a different order and built a
//! different tree.

use crate::arena::NodeKey;
use crate::tree::PriorityTree;
use smallvec::SmallVec;
use std::fmt;

impl<T, P: Ord> PriorityTree<T, P> {
    /// Keys of every node in pre-order, each chain after both subtrees
    pub(crate) fn preorder_keys(&self) -> Vec<NodeKey> {
        let mut order = Vec::with_capacity(self.len);
        let mut stack: SmallVec<[NodeKey; 32]> = SmallVec::new();
        stack.extend(self.root);

        while let Some(key) = stack.pop() {
            order.push(key);
            let node = &self.arena[key];
            stack.extend(node.next_dup);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        order
    }

    /// Replaces this queue's contents with a deep copy of `other`
    pub fn assign(&mut self, other: &Self)
    where
        T: Clone,
        P: Clone,
    {
        self.clear();
        self.copy_from(other);
    }

    fn copy_from(&mut self, other: &Self)
    where
        T: Clone,
        P: Clone,
    {
        log::debug!("deep copying {} elements", other.len);
        for key in other.preorder_keys() {
            let node = &other.arena[key];
            self.insert(node.value.clone(), node.priority.clone());
        }
    }

    /// One `"<priority> value: <value>\n"` line per element, in order
    ///
    /// Same as `to_string()`.
    pub fn to_canonical_string(&self) -> String
    where
        T: fmt::Display,
        P: fmt::Display,
    {
        self.to_string()
    }
}

impl<T: Clone, P: Ord + Clone> Clone for PriorityTree<T, P> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        copy.copy_from(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl<T: PartialEq, P: Ord> PartialEq for PriorityTree<T, P> {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }

        let mut stack: SmallVec<[(Option<NodeKey>, Option<NodeKey>); 32]> = SmallVec::new();
        stack.push((self.root, other.root));
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    let (x, y) = (&self.arena[a], &other.arena[b]);
                    if x.priority != y.priority || x.value != y.value {
                        return false;
                    }
                    stack.push((x.next_dup, y.next_dup));
                    stack.push((x.right, y.right));
                    stack.push((x.left, y.left));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T: Eq, P: Ord> Eq for PriorityTree<T, P> {}

impl<T: fmt::Display, P: Ord + fmt::Display> fmt::Display for PriorityTree<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (priority, value) in self.iter() {
            writeln!(f, "{} value: {}", priority, value)?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug, P: Ord + fmt::Debug> fmt::Debug for PriorityTree<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, P: Ord> FromIterator<(P, T)> for PriorityTree<T, P> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut tree = PriorityTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T, P: Ord> Extend<(P, T)> for PriorityTree<T, P> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        for (priority, value) in iter {
            self.insert(value, priority);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Heap;

    fn westworld() -> PriorityTree<String> {
        [
            (5, "Dolores"),
            (4, "Bernard"),
            (8, "Arnold"),
            (2, "Ford"),
            (6, "Jasmine"),
            (11, "Carlos"),
            (8, "William"),
            (8, "Teddy"),
        ]
        .into_iter()
        .map(|(p, v)| (p, v.to_string()))
        .collect()
    }

    #[test]
    fn test_canonical_string() {
        let mut tree = PriorityTree::new();
        for (v, p) in [(10, 1), (20, 2), (30, 2), (40, 2), (50, 3), (60, 4)] {
            tree.insert(v, p);
        }
        assert_eq!(
            tree.to_canonical_string(),
            "1 value: 10\n2 value: 20\n2 value: 30\n2 value: 40\n3 value: 50\n4 value: 60\n"
        );
    }

    #[test]
    fn test_canonical_string_empty() {
        let tree: PriorityTree<i32> = PriorityTree::new();
        assert_eq!(tree.to_canonical_string(), "");
    }

    #[test]
    fn test_clone_is_equal_and_independent() {
        let original = westworld();
        let mut copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.verify_invariants(), Ok(()));
        assert_eq!(copy.height(), original.height());

        assert_eq!(copy.get_min(), Ok("Ford".to_string()));
        assert_ne!(copy, original);
        assert_eq!(original.len(), 8);
        assert_eq!(original.peek_min(), Ok(&"Ford".to_string()));
    }

    #[test]
    fn test_clone_from_replaces_contents() {
        let source = westworld();
        let mut target: PriorityTree<String> = PriorityTree::new();
        target.insert("Maeve".to_string(), 1);

        target.clone_from(&source);
        assert_eq!(target.len(), 8);
        assert_eq!(target, source);
        assert_eq!(target.to_canonical_string(), source.to_canonical_string());

        target.clear();
        assert_ne!(target, source);
        target.assign(&source);
        assert_eq!(target, source);
    }

    #[test]
    fn test_equality_is_structural() {
        let a: PriorityTree<i32> = [(1, 1), (2, 2), (3, 3)].into_iter().collect();
        let b: PriorityTree<i32> = [(2, 2), (1, 1), (3, 3)].into_iter().collect();

        assert_eq!(a.to_canonical_string(), b.to_canonical_string());
        assert_ne!(a, b);
        assert_eq!(a, a);
    }

    #[test]
    fn test_equality_compares_chains() {
        let a: PriorityTree<i32> = [(1, 1), (1, 2)].into_iter().collect();
        let b: PriorityTree<i32> = [(1, 2), (1, 1)].into_iter().collect();
        let c: PriorityTree<i32> = [(1, 1), (1, 2)].into_iter().collect();
        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_eq!(c, a);
    }

    #[test]
    fn test_empty_equality() {
        let a: PriorityTree<i32> = PriorityTree::new();
        let mut b: PriorityTree<i32> = PriorityTree::new();
        b.clone_from(&a);
        assert_eq!(a, b);
    }

    #[test]
    fn test_preorder_visits_chain_after_subtrees() {
        let tree: PriorityTree<char> = [(5, 'a'), (3, 'b'), (5, 'c'), (8, 'd')].into_iter().collect();
        let values: Vec<char> = tree
            .preorder_keys()
            .into_iter()
            .map(|key| tree.arena[key].value)
            .collect();
        assert_eq!(values, vec!['a', 'b', 'd', 'c']);
    }

    #[test]
    fn test_debug_lists_entries() {
        let mut tree = PriorityTree::new();
        tree.push(2, "b");
        tree.push(1, "a");
        assert_eq!(format!("{:?}", tree), r#"[(1, "a"), (2, "b")]"#);
    }
}
