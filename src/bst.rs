//! An unbalanced Binary Search Tree whose nodes keep a pointer back to their parent.
//!
//! Values that compare less than a node go to its left; everything else, duplicates included,
//! goes to its right. Nothing rebalances the tree, so inserting sorted input produces a chain.
//!
//! # Examples
//!
//! ```
//! use backlinks::bst::Tree;
//!
//! let mut tree = Tree::from_values([7, 2, 5, 10, 9, 1, 5]);
//!
//! assert_eq!(tree.to_vec(), vec![1, 2, 5, 5, 7, 9, 10]);
//! assert_eq!(tree.filter(|v| *v > 5), vec![&7, &9, &10]);
//! assert_eq!(tree.reduce(1, |product, v| product * v), 31500);
//!
//! let five = tree.search(&5).unwrap();
//! assert_eq!(five.parent().map(|n| *n.value()), Some(2));
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.delete(&7), Some(7));
//! assert_eq!(tree.to_vec(), vec![1, 2, 5, 5, 9, 10]);
//! assert_eq!(tree.root().map(|n| *n.value()), Some(9));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ptr::NonNull;

use log::debug;

use crate::error::EmptyInputError;
use crate::util::{leak_boxed, reclaim};

/// An unbalanced Binary Search Tree.
pub struct Tree<T> {
    // This is a `Link` instead of an `Option<Node>` so that it can be moved around with the `Tree`
    // without the children's parent pointers breaking.
    root: Link<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        let mut pending: Vec<_> = self.root.take().0.into_iter().collect();
        while let Some(node) = pending.pop() {
            // SAFETY: Every node has exactly one owning link (a parent's child link or the root)
            // so each is pushed, and reclaimed, exactly once. Parent pointers are never followed.
            let node = unsafe { reclaim(node) };
            pending.extend(node.left.0);
            pending.extend(node.right.0);
        }
    }
}

// SAFETY: The tree exclusively owns its nodes, so sending or sharing it is as safe as sending or
// sharing the values.
unsafe impl<T: Send> Send for Tree<T> {}
// SAFETY: See above.
unsafe impl<T: Sync> Sync for Tree<T> {}

/// Re-inserting in pre-order visits every parent before its children, which rebuilds the exact
/// same shape.
impl<T> Clone for Tree<T>
where
    T: Ord + Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Self::new();
        self.traverse_pre_order(|value| tree.insert(value.clone()));
        tree
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root())
            .field("values", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

/// Renders as `(left) <- value -> (right)`, leaving out absent sides. An empty tree renders as
/// nothing.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => root.fmt(f),
            None => Ok(()),
        }
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: Link(None) }
    }

    /// Builds a tree rooted at the first value, inserting the rest in order.
    ///
    /// # Panics
    ///
    /// When `values` is empty. See [`Tree::try_from_values`] for a non-panicking version.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Ord,
    {
        match Self::try_from_values(values) {
            Ok(tree) => tree,
            Err(err) => panic!("{}", err),
        }
    }

    /// Like [`Tree::from_values`] but returns an error for empty input.
    pub fn try_from_values<I>(values: I) -> Result<Self, EmptyInputError>
    where
        I: IntoIterator<Item = T>,
        T: Ord,
    {
        let mut values = values.into_iter();
        let root = values.next().ok_or(EmptyInputError)?;
        let mut tree = Self::new();
        tree.insert(root);
        for value in values {
            tree.insert(value);
        }
        Ok(tree)
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// The number of nodes. This walks the whole tree.
    pub fn len(&self) -> usize {
        self.root().map_or(0, Node::count)
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.node()
    }

    /// Inserts `value` as a new leaf. Values equal to an existing node go to its right.
    ///
    /// # Examples
    ///
    /// ```
    /// use backlinks::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.left().map(|n| *n.value()), Some(1));
    /// assert_eq!(root.right().map(|n| *n.value()), Some(2));
    /// ```
    pub fn insert(&mut self, value: T)
    where
        T: Ord,
    {
        let Some(mut node) = self.root.0 else {
            self.root = Link(Some(leak_boxed(Node::new(value, Link(None)))));
            return;
        };

        loop {
            // SAFETY: We hold `&mut self` and only reference one node at a time.
            let current = unsafe { node.as_mut() };
            let slot = if value < current.value {
                &mut current.left
            } else {
                &mut current.right
            };
            match slot.0 {
                Some(child) => node = child,
                None => {
                    *slot = Link(Some(leak_boxed(Node::new(value, Link(Some(node))))));
                    return;
                }
            }
        }
    }

    /// Finds a node holding `value`.
    pub fn search(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        self.root().and_then(|root| root.search(value))
    }

    /// Whether some node holds `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.search(value).is_some()
    }

    /// The node with the smallest value.
    pub fn minimum(&self) -> Option<&Node<T>> {
        self.root().map(Node::minimum)
    }

    /// The node with the largest value. With duplicates this is the last one inserted.
    pub fn maximum(&self) -> Option<&Node<T>> {
        self.root().map(Node::maximum)
    }

    /// Calls `visit` on every value in ascending order.
    pub fn traverse_in_order<F>(&self, visit: F)
    where
        F: FnMut(&T),
    {
        if let Some(root) = self.root() {
            root.traverse_in_order(visit);
        }
    }

    /// Calls `visit` on every value, each node before its left and then right subtree.
    pub fn traverse_pre_order<F>(&self, visit: F)
    where
        F: FnMut(&T),
    {
        if let Some(root) = self.root() {
            root.traverse_pre_order(visit);
        }
    }

    /// Calls `visit` on every value, each node after its left and then right subtree.
    pub fn traverse_post_order<F>(&self, visit: F)
    where
        F: FnMut(&T),
    {
        if let Some(root) = self.root() {
            root.traverse_post_order(visit);
        }
    }

    /// An in-order iterator over the values.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root())
    }

    /// Applies `transform` to every value in ascending order.
    pub fn map<U, F>(&self, transform: F) -> Vec<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(transform).collect()
    }

    /// The values for which `predicate` holds, in ascending order.
    pub fn filter<F>(&self, mut predicate: F) -> Vec<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().filter(|value| predicate(value)).collect()
    }

    /// Folds every value into `initial` in ascending order.
    pub fn reduce<A, F>(&self, initial: A, combine: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter().fold(initial, combine)
    }

    /// Clones every value into a sorted `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.map(T::clone)
    }

    /// Deletes a node holding `value` and returns the value it held. If the tree doesn't hold
    /// `value`, nothing happens.
    ///
    /// With duplicates, the node removed is the first one met on the way down from the root.
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        self.delete_with_replacement(value)
            .map(|(deleted, _)| deleted)
    }

    /// Like [`Tree::delete`] but also returns the root of the subtree that now sits where the
    /// deleted node was:
    ///
    /// - a leaf leaves nothing behind, so this is `None`;
    /// - a node with one child is replaced by that child;
    /// - a node with two children stays in place holding its in-order successor's value.
    ///
    /// # Examples
    ///
    /// ```
    /// use backlinks::bst::Tree;
    ///
    /// let mut tree = Tree::from_values([5, 3, 8, 9]);
    ///
    /// let (deleted, replacement) = tree.delete_with_replacement(&8).unwrap();
    /// assert_eq!(deleted, 8);
    /// let nine = replacement.unwrap();
    /// assert_eq!(nine.value(), &9);
    /// assert_eq!(nine.parent().map(|n| *n.value()), Some(5));
    /// ```
    pub fn delete_with_replacement(&mut self, value: &T) -> Option<(T, Option<&Node<T>>)>
    where
        T: Ord,
    {
        let node = self.find(value)?;
        // SAFETY: `find` only returns nodes of this tree.
        let (deleted, replacement) = unsafe { self.delete_node(node) };
        // SAFETY: The replacement is a live node of this tree, which stays borrowed for as long
        // as the reference.
        let replacement = replacement.0.map(|node| unsafe { &*node.as_ptr() });
        Some((deleted, replacement))
    }

    /// Deletes the root and returns its value. The new root is the root's only child, or its
    /// in-order successor if it had two.
    ///
    /// # Panics
    ///
    /// When the tree is empty.
    pub fn delete_root(&mut self) -> T {
        let root = self.root.0.expect("Cannot delete the root of an empty tree.");
        // SAFETY: `root` is the root of this tree.
        let (deleted, _) = unsafe { self.delete_node(root) };
        deleted
    }

    /// Like [`Tree::search`] but yields the raw link so the node can be changed.
    fn find(&self, value: &T) -> Option<NonNull<Node<T>>>
    where
        T: Ord,
    {
        let mut link = self.root;
        while let Some(node) = link.0 {
            // SAFETY: `node` is a node of this tree and the reference doesn't escape.
            let current = unsafe { node.as_ref() };
            link = match value.cmp(&current.value) {
                Ordering::Less => current.left,
                Ordering::Greater => current.right,
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Removes `node` from the tree. Returns its value along with whatever now sits in its
    /// position: its only child, the node itself holding its successor's value, or nothing.
    ///
    /// # Safety
    ///
    /// `node` must be a node of this tree. If it had fewer than two children it is freed and must
    /// not be dereferenced afterwards.
    unsafe fn delete_node(&mut self, mut node: NonNull<Node<T>>) -> (T, Link<T>) {
        let (left, right) = {
            let current = node.as_ref();
            (current.left, current.right)
        };

        match (left.0, right.0) {
            (Some(_), Some(right)) => {
                debug!("deleting node with two children; promoting its in-order successor");
                // The successor has no left child, so splicing it out is one of the cases below.
                let successor = Node::leftmost(right);
                let (successor_value, _) = self.splice_out(successor);
                let deleted = std::mem::replace(&mut node.as_mut().value, successor_value);
                (deleted, Link(Some(node)))
            }
            (None, None) => {
                debug!("deleting leaf node");
                self.splice_out(node)
            }
            _ => {
                debug!("deleting node with one child");
                self.splice_out(node)
            }
        }
    }

    /// Frees a node with at most one child, moving that child (if any) into its position.
    ///
    /// # Safety
    ///
    /// `node` must be a node of this tree with at most one child, and must not be dereferenced
    /// afterwards.
    unsafe fn splice_out(&mut self, node: NonNull<Node<T>>) -> (T, Link<T>) {
        let Node {
            value,
            left,
            right,
            parent,
        } = reclaim(node);
        assert!(
            left.0.is_none() || right.0.is_none(),
            "Only nodes with at most one child can be spliced out."
        );

        let child = if left.0.is_some() { left } else { right };
        if let Some(mut child) = child.0 {
            child.as_mut().parent = parent;
        }

        match parent.0 {
            None => self.root = child,
            Some(mut parent) => {
                let parent = parent.as_mut();
                // Only compares addresses; the freed node isn't read.
                if parent.left.0 == Some(node) {
                    parent.left = child;
                } else {
                    parent.right = child;
                }

                if cfg!(debug_assertions) {
                    parent.assert_child_links();
                }
            }
        }

        (value, child)
    }
}

/// A possibly-empty pointer to a [`Node`]. Child links and `Tree::root` own the node they point
/// at; `parent` links don't.
struct Link<T>(Option<NonNull<Node<T>>>);

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Link<T> {}

impl<T> Link<T> {
    fn node(&self) -> Option<&Node<T>> {
        // SAFETY: If the link is not `None` then it points at a live node of the tree that (via
        // `&self`) is borrowed for at least as long as the returned reference.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }
}

/// A node of a [`Tree`]. Nodes are only handed out as shared references, so their links can't
/// be changed from the outside.
pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    parent: Link<T>,
}

/// Shows the node's own value and its children's values, not whole subtrees.
impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left().map(Node::value))
            .field("right", &self.right().map(Node::value))
            .finish()
    }
}

impl<T> fmt::Display for Node<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a, T> {
            Subtree(&'a Node<T>),
            Value(&'a T),
            Text(&'static str),
        }

        let mut pending = vec![Piece::Subtree(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Subtree(node) => {
                    // Pushed back to front so they pop as `(left) <- value -> (right)`.
                    if let Some(right) = node.right() {
                        pending.push(Piece::Text(")"));
                        pending.push(Piece::Subtree(right));
                        pending.push(Piece::Text(" -> ("));
                    }
                    pending.push(Piece::Value(&node.value));
                    if let Some(left) = node.left() {
                        pending.push(Piece::Text(") <- "));
                        pending.push(Piece::Subtree(left));
                        pending.push(Piece::Text("("));
                    }
                }
                Piece::Value(value) => write!(f, "{}", value)?,
                Piece::Text(text) => f.write_str(text)?,
            }
        }
        Ok(())
    }
}

impl<T> Node<T> {
    fn new(value: T, parent: Link<T>) -> Self {
        Self {
            value,
            left: Link(None),
            right: Link(None),
            parent,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The left child, holding smaller values.
    pub fn left(&self) -> Option<&Self> {
        self.left.node()
    }

    /// The right child, holding equal or larger values.
    pub fn right(&self) -> Option<&Self> {
        self.right.node()
    }

    /// The parent, or `None` at the root.
    pub fn parent(&self) -> Option<&Self> {
        self.parent.node()
    }

    /// Whether this node is the root of its tree.
    pub fn is_root(&self) -> bool {
        self.parent.0.is_none()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        !self.has_any_child()
    }

    /// Whether this node is its parent's left child.
    pub fn is_left_child(&self) -> bool {
        let me = NonNull::from(self);
        self.parent().is_some_and(|parent| parent.left.0 == Some(me))
    }

    /// Whether this node is its parent's right child.
    pub fn is_right_child(&self) -> bool {
        let me = NonNull::from(self);
        self.parent().is_some_and(|parent| parent.right.0 == Some(me))
    }

    /// Whether this node has a left child.
    pub fn has_left_child(&self) -> bool {
        self.left.0.is_some()
    }

    /// Whether this node has a right child.
    pub fn has_right_child(&self) -> bool {
        self.right.0.is_some()
    }

    /// Whether this node has at least one child.
    pub fn has_any_child(&self) -> bool {
        self.has_left_child() || self.has_right_child()
    }

    /// Whether this node has both children.
    pub fn has_both_children(&self) -> bool {
        self.has_left_child() && self.has_right_child()
    }

    /// The number of nodes in the subtree rooted here. Not cached: this walks the subtree.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// The number of levels in the subtree rooted here. A leaf has a height of 1.
    pub fn height(&self) -> usize {
        let mut pending = vec![(self, 1)];
        let mut height = 0;
        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            pending.extend(node.left().map(|left| (left, depth + 1)));
            pending.extend(node.right().map(|right| (right, depth + 1)));
        }
        height
    }

    /// Finds a node holding `value` in the subtree rooted here.
    pub fn search(&self, value: &T) -> Option<&Self>
    where
        T: Ord,
    {
        let mut node = self;
        loop {
            node = match value.cmp(&node.value) {
                Ordering::Less => node.left()?,
                Ordering::Greater => node.right()?,
                Ordering::Equal => return Some(node),
            };
        }
    }

    /// The leftmost node of this subtree.
    pub fn minimum(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    /// The rightmost node of this subtree.
    pub fn maximum(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }

    /// Calls `visit` on the values of this subtree in ascending order.
    pub fn traverse_in_order<F>(&self, visit: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(visit);
    }

    /// Calls `visit` on each node's value before visiting its left and then right subtree.
    pub fn traverse_pre_order<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            visit(&node.value);
            // Right first so the left subtree is popped first.
            pending.extend(node.right());
            pending.extend(node.left());
        }
    }

    /// Calls `visit` on each node's value after visiting its left and then right subtree.
    pub fn traverse_post_order<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        // Node-right-left pre-order, reversed, is left-right-node post-order.
        let mut pending = vec![self];
        let mut visited = Vec::new();
        while let Some(node) = pending.pop() {
            visited.push(node);
            pending.extend(node.left());
            pending.extend(node.right());
        }
        for node in visited.into_iter().rev() {
            visit(&node.value);
        }
    }

    /// An in-order iterator over this subtree.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(Some(self))
    }

    fn leftmost(mut node: NonNull<Self>) -> NonNull<Self> {
        // SAFETY: Callers pass live nodes and every left link of a live node is live.
        while let Some(left) = unsafe { node.as_ref().left.0 } {
            node = left;
        }
        node
    }

    /// Checks that both children point back at this node.
    fn assert_child_links(&self) {
        let me = NonNull::from(self);
        if let Some(left) = self.left() {
            assert_eq!(left.parent.0, Some(me), "Left child has the wrong parent.");
        }
        if let Some(right) = self.right() {
            assert_eq!(right.parent.0, Some(me), "Right child has the wrong parent.");
        }
    }
}

/// An in-order iterator over a subtree. See [`Tree::iter`] and [`Node::iter`].
pub struct Iter<'a, T> {
    pending: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Self {
            pending: Vec::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.pending.push(current);
            node = current.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.pending.pop()?;
        self.push_left_spine(node.right());
        Some(&node.value)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}


#[cfg(test)]
mod quicktests {
    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and to a sorted `Vec` standing in for a multiset.
    /// This way we can ensure that after a random smattering of inserts and deletes both hold
    /// the same values.
    fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, model: &mut Vec<T>)
    where
        T: Ord + Clone + fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(v) => {
                    bst.insert(v.clone());
                    let pos = model.partition_point(|x| x <= v);
                    model.insert(pos, v.clone());
                }
                Op::Remove(v) => {
                    let expected = model.binary_search(v).ok().map(|pos| model.remove(pos));
                    assert_eq!(bst.delete(v), expected);
                }
                Op::Iter => assert_eq!(&bst.to_vec(), model),
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut model = Vec::new();

            do_ops(&ops, &mut tree, &mut model);
            assert_links_and_order(&tree);
            tree.len() == model.len() && model.iter().all(|v| tree.contains(v))
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }

            xs.iter().all(|x| tree.search(x).map(Node::value) == Some(x))
        }
    }

    quickcheck::quickcheck! {
        fn clone_matches(xs: Vec<i8>) -> bool {
            let tree: Tree<_> = xs.into_iter().fold(Tree::new(), |mut tree, x| {
                tree.insert(x);
                tree
            });
            tree.clone().to_string() == tree.to_string()
        }
    }

    /// Same checks as the unit tests' helper, without the `Debug` messages.
    fn assert_links_and_order<T: Ord>(tree: &Tree<T>) {
        let mut reached = 0;
        let mut pending: Vec<_> = tree.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            reached += 1;
            node.assert_child_links();
            pending.extend(node.left());
            pending.extend(node.right());
        }
        assert_eq!(reached, tree.len());
        let values: Vec<_> = tree.iter().collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }
}
