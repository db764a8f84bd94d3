use std::cmp::Ordering;
use std::fmt;

use log::trace;

struct Node<T> {
    value: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node {
            value,
            left: None,
            right: None,
        }
    }
}

/// An unbalanced binary search tree holding each value at most once.
///
/// Values are ordered by their [`Ord`] implementation, which must be a
/// consistent total order; an `Ord` that disagrees with itself leaves search
/// and traversal results unspecified. The tree supports insertion, lookup and
/// in-order traversal only; there is no removal and no rebalancing, so
/// inserting sorted input degenerates into a chain.
///
/// Every walk is iterative, so a degenerate tree of any size can be built,
/// traversed and dropped without deep recursion.
pub struct BinarySearchTree<T> {
    root: Option<Box<Node<T>>>,
    size: usize,
}

impl<T> BinarySearchTree<T> {
    pub fn new() -> Self {
        BinarySearchTree {
            root: None,
            size: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of edges on the longest path from the root to a leaf.
    ///
    /// Both the empty tree and a single node have height 0.
    pub fn height(&self) -> usize {
        let mut level: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        let mut levels: usize = 0;
        while !level.is_empty() {
            levels += 1;
            level = level
                .into_iter()
                .flat_map(|node| node.left.as_deref().into_iter().chain(node.right.as_deref()))
                .collect();
        }
        levels.saturating_sub(1)
    }

    /// Calls `visitor` once for every stored value, in ascending order.
    ///
    /// The tree is borrowed for the whole traversal, so the visitor cannot
    /// modify it.
    pub fn in_order_traversal<F: FnMut(&T)>(&self, mut visitor: F) {
        for value in self.iter() {
            visitor(value);
        }
    }

    pub fn min(&self) -> Option<&T> {
        let mut current = self.root.as_deref()?;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        Some(&current.value)
    }

    pub fn max(&self) -> Option<&T> {
        let mut current = self.root.as_deref()?;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        Some(&current.value)
    }

    pub fn clear(&mut self) {
        let released = self.size;
        release(self.root.take());
        self.size = 0;
        trace!("cleared binary search tree, released {} nodes", released);
    }

    /// Values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { pending: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    fn pre_order(&self) -> Vec<&T> {
        let mut result = Vec::with_capacity(self.size);
        let mut pending: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            result.push(&node.value);
            pending.extend(node.right.as_deref());
            pending.extend(node.left.as_deref());
        }
        result
    }
}

impl<T: Ord> BinarySearchTree<T> {
    /// Inserts `value`, returning `false` and leaving the tree untouched if an
    /// equal value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            match value.cmp(&node.value) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => return false,
            }
        }
        *slot = Some(Box::new(Node::new(value)));
        self.size += 1;
        true
    }

    pub fn search(&self, value: &T) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match value.cmp(&node.value) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return true,
            }
        }
        false
    }
}

fn release<T>(root: Option<Box<Node<T>>>) {
    let mut pending: Vec<Box<Node<T>>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

impl<T> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for BinarySearchTree<T> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

// Re-inserting in pre-order reproduces the original shape.
impl<T: Ord + Clone> Clone for BinarySearchTree<T> {
    fn clone(&self) -> Self {
        self.pre_order().into_iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for BinarySearchTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> Extend<T> for BinarySearchTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = BinarySearchTree::new();
        tree.extend(iter);
        tree
    }
}

pub struct Iter<'a, T> {
    pending: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.pending.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a BinarySearchTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for BinarySearchTree<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut values = Vec::with_capacity(self.size);
        let mut pending: Vec<Box<Node<T>>> = Vec::new();
        let mut current = self.root.take();
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                pending.push(node);
            }
            match pending.pop() {
                Some(mut node) => {
                    current = node.right.take();
                    values.push(node.value);
                }
                None => break,
            }
        }
        values.into_iter()
    }
}
