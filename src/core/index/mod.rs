//! The ordered index: a self-balancing (AVL) binary search tree.
//!
//! The index is generic over any `Ord` element and has no query-specific
//! knowledge. It exposes exactly two read surfaces: the structural handles
//! ([`AvlIndex::root`] plus [`AvlNode`] accessors) that let callers walk the
//! tree themselves, and an iterative in-order iterator. Rebalancing is fully
//! encapsulated; nodes exclusively own their children.
//!
//! The index models a set: inserting an element equal to one already stored
//! is a no-op. No deletion operation exists because the query workload never
//! removes records.


use std::cmp::Ordering;

/// One node of the index. Callers get shared references to nodes and may
/// only read the value and descend left or right.
#[derive(Debug)]
pub struct AvlNode<T> {
    value: T,
    left: Option<Box<AvlNode<T>>>,
    right: Option<Box<AvlNode<T>>>,
    height: i32,
}

impl<T> AvlNode<T> {
    const fn new(value: T) -> Self {
        Self { value, left: None, right: None, height: 1 }
    }

    /// The element stored at this node.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Root of the left subtree, holding every element ordered before this
    /// node's value.
    #[must_use]
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Root of the right subtree, holding every element ordered after this
    /// node's value.
    #[must_use]
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn update_height(&mut self) {
        self.height = 1 + slot_height(&self.left).max(slot_height(&self.right));
    }

    fn balance_factor(&self) -> i32 {
        slot_height(&self.left) - slot_height(&self.right)
    }
}

/// Height of an optional subtree; the empty tree has height 0.
fn slot_height<T>(slot: &Option<Box<AvlNode<T>>>) -> i32 {
    slot.as_ref().map_or(0, |node| node.height)
}

/// A self-balancing ordered index over `T`.
#[derive(Debug)]
pub struct AvlIndex<T> {
    root: Option<Box<AvlNode<T>>>,
    len: usize,
}

impl<T> Default for AvlIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AvlIndex<T> {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of stored elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree; 0 when empty. Bounded by O(log n) after every
    /// insertion.
    #[must_use]
    pub fn height(&self) -> usize {
        usize::try_from(slot_height(&self.root)).unwrap_or(0)
    }

    /// Read-only handle to the root node, the entry point for structural
    /// traversal.
    #[must_use]
    pub fn root(&self) -> Option<&AvlNode<T>> {
        self.root.as_deref()
    }

    /// Iterative in-order iterator over stored elements, smallest first.
    #[must_use]
    pub fn iter(&self) -> InOrderIter<'_, T> {
        InOrderIter::new(self.root())
    }
}

impl<T: Ord> AvlIndex<T> {
    /// Inserts `value` in ordering position, rebalancing as needed.
    ///
    /// Returns `true` if the value was newly stored, `false` if an equal
    /// element was already present (the insertion is then a no-op).
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = Self::insert_into(&mut self.root, value);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// True when an element equal to `value` is stored.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        let mut current = self.root();
        while let Some(node) = current {
            match value.cmp(node.value()) {
                Ordering::Less => current = node.left(),
                Ordering::Greater => current = node.right(),
                Ordering::Equal => return true,
            }
        }
        false
    }

    fn insert_into(slot: &mut Option<Box<AvlNode<T>>>, value: T) -> bool {
        let Some(node) = slot else {
            *slot = Some(Box::new(AvlNode::new(value)));
            return true;
        };
        let inserted = match value.cmp(&node.value) {
            Ordering::Less => Self::insert_into(&mut node.left, value),
            Ordering::Greater => Self::insert_into(&mut node.right, value),
            // The index models a set: an exact duplicate is dropped.
            Ordering::Equal => false,
        };
        if inserted {
            Self::rebalance(node);
        }
        inserted
    }

    fn rebalance(node: &mut Box<AvlNode<T>>) {
        node.update_height();
        let balance = node.balance_factor();
        if balance > 1 {
            // Left-heavy; a left-right shape needs the inner rotation first.
            if node.left.as_ref().map_or(0, |left| left.balance_factor()) < 0 {
                if let Some(left) = node.left.as_mut() {
                    Self::rotate_left(left);
                }
            }
            Self::rotate_right(node);
        } else if balance < -1 {
            if node.right.as_ref().map_or(0, |right| right.balance_factor()) > 0 {
                if let Some(right) = node.right.as_mut() {
                    Self::rotate_right(right);
                }
            }
            Self::rotate_left(node);
        }
        debug_assert!(
            node.balance_factor().abs() <= 1,
            "AVL balance invariant violated after rebalance"
        );
    }

    fn rotate_right(root: &mut Box<AvlNode<T>>) {
        let Some(mut pivot) = root.left.take() else {
            debug_assert!(false, "rotate_right requires a left child");
            return;
        };
        root.left = pivot.right.take();
        root.update_height();
        std::mem::swap(root, &mut pivot);
        // `pivot` now holds the demoted old root.
        root.right = Some(pivot);
        root.update_height();
    }

    fn rotate_left(root: &mut Box<AvlNode<T>>) {
        let Some(mut pivot) = root.right.take() else {
            debug_assert!(false, "rotate_left requires a right child");
            return;
        };
        root.right = pivot.left.take();
        root.update_height();
        std::mem::swap(root, &mut pivot);
        root.left = Some(pivot);
        root.update_height();
    }
}

#[cfg(test)]
impl<T: Ord> AvlIndex<T> {
    /// Walks the whole tree asserting the BST ordering, the AVL balance
    /// bound, and the cached heights. Test-only.
    pub(crate) fn check_invariants(&self) {
        fn check_node<T>(node: &AvlNode<T>) -> i32 {
            let left_height = node.left().map_or(0, check_node);
            let right_height = node.right().map_or(0, check_node);
            assert!(
                (left_height - right_height).abs() <= 1,
                "balance factor outside [-1, 1]"
            );
            assert_eq!(node.height, 1 + left_height.max(right_height), "stale cached height");
            1 + left_height.max(right_height)
        }
        if let Some(root) = self.root() {
            check_node(root);
        }
        let values: Vec<&T> = self.iter().collect();
        assert_eq!(values.len(), self.len());
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1], "in-order traversal not strictly increasing");
        }
    }
}

/// Iterative (stack-based) in-order traversal of an [`AvlIndex`].
#[derive(Debug)]
pub struct InOrderIter<'a, T> {
    stack: Vec<&'a AvlNode<T>>,
}

impl<'a, T> InOrderIter<'a, T> {
    fn new(root: Option<&'a AvlNode<T>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a AvlNode<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, T> Iterator for InOrderIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.value())
    }
}

impl<'a, T> IntoIterator for &'a AvlIndex<T> {
    type Item = &'a T;
    type IntoIter = InOrderIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
