//! A generic n-ary tree. Each node owns an ordered list of children and keeps a non-owning
//! pointer back to its parent.
//!
//! Nodes are read through shared references (`&Node`) and changed through [`NodeMut`] handles,
//! which borrow the tree mutably. Children are always added by value (a fresh value or a whole
//! [`Tree`]) so a node can never end up under two parents or under itself.
//!
//! # Examples
//!
//! ```
//! use backlinks::tree::Tree;
//!
//! let mut tree = Tree::new("beverages");
//! {
//!     let mut root = tree.root_mut();
//!     let mut hot = root.add_child("hot");
//!     hot.add_child("tea");
//!     hot.add_child("coffee");
//! }
//! tree.root_mut().add_child("cold");
//!
//! assert_eq!(tree.to_string(), "beverages {hot {tea, coffee}, cold}");
//!
//! let coffee = tree.search(&"coffee").unwrap();
//! assert_eq!(coffee.parent().map(|n| *n.value()), Some("hot"));
//! assert!(tree.search(&"bubbly").is_none());
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr::NonNull;
use std::slice;

use log::trace;

use crate::util::{leak_boxed, reclaim};

/// A rooted n-ary tree. A tree always has at least its root.
pub struct Tree<T> {
    // Heap allocated so the children's parent pointers survive the `Tree` being moved.
    root: NonNull<Node<T>>,
    _owns: PhantomData<Box<Node<T>>>,
}

/// A node of a [`Tree`].
pub struct Node<T> {
    value: T,
    parent: Option<NonNull<Node<T>>>,
    children: Vec<NonNull<Node<T>>>,
}

// SAFETY: The tree exclusively owns every node, so sending or sharing it is as safe as sending or
// sharing the values.
unsafe impl<T: Send> Send for Tree<T> {}
// SAFETY: See above.
unsafe impl<T: Sync> Sync for Tree<T> {}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        let mut pending = vec![self.root];
        while let Some(node) = pending.pop() {
            // SAFETY: Every node is owned by exactly one parent (or is the root) so each one is
            // pushed, and reclaimed, exactly once.
            let node = unsafe { reclaim(node) };
            pending.extend(node.children);
        }
    }
}

// A tree always has its root, so it is never empty.
#[allow(clippy::len_without_is_empty)]
impl<T> Tree<T> {
    /// Creates a tree holding only a root with `value`.
    pub fn new(value: T) -> Self {
        Self {
            root: leak_boxed(Node::new(value, None)),
            _owns: PhantomData,
        }
    }

    /// The root node.
    pub fn root(&self) -> &Node<T> {
        // SAFETY: The root lives as long as the tree.
        unsafe { self.root.as_ref() }
    }

    /// A mutable handle to the root node.
    pub fn root_mut(&mut self) -> NodeMut<'_, T> {
        NodeMut::new(self.root)
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.root().len()
    }

    /// Finds the first node holding `value`, visiting each node before its children and children
    /// in order.
    pub fn search(&self, value: &T) -> Option<&Node<T>>
    where
        T: PartialEq,
    {
        self.root().search(value)
    }

    /// Like [`Tree::search`] but hands back a mutable handle.
    pub fn search_mut(&mut self, value: &T) -> Option<NodeMut<'_, T>>
    where
        T: PartialEq,
    {
        let mut pending = vec![self.root];
        while let Some(node) = pending.pop() {
            // SAFETY: `node` belongs to this tree and the reference is dropped before any handle
            // to it is created.
            let node_ref = unsafe { node.as_ref() };
            if node_ref.value == *value {
                return Some(NodeMut::new(node));
            }
            pending.extend(node_ref.children.iter().rev());
        }
        None
    }
}

// A subtree always has the node it is rooted at, so it is never empty.
#[allow(clippy::len_without_is_empty)]
impl<T> Node<T> {
    fn new(value: T, parent: Option<NonNull<Self>>) -> Self {
        Self {
            value,
            parent,
            children: Vec::new(),
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The parent node, or `None` for the root.
    pub fn parent(&self) -> Option<&Self> {
        // SAFETY: A parent outlives its children and the tree is borrowed while `self` is.
        self.parent.map(|parent| unsafe { &*parent.as_ptr() })
    }

    /// The children, in the order they were added.
    pub fn children(&self) -> Children<'_, T> {
        Children {
            inner: self.children.iter(),
        }
    }

    /// The child at `index`, if any.
    pub fn child(&self, index: usize) -> Option<&Self> {
        // SAFETY: Children live as long as their parent.
        self.children
            .get(index)
            .map(|child| unsafe { &*child.as_ptr() })
    }

    /// Whether this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// How many parent links separate this node from the root.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent(), |node| node.parent()).count()
    }

    /// The number of nodes in the subtree rooted here, this node included.
    pub fn len(&self) -> usize {
        self.descendants().count()
    }

    /// A depth-first iterator over this node and everything below it. Each node comes before its
    /// children and children come in order.
    pub fn descendants(&self) -> Descendants<'_, T> {
        Descendants {
            pending: vec![self],
        }
    }

    /// Finds the first node in this subtree holding `value`, in [`Node::descendants`] order.
    pub fn search(&self, value: &T) -> Option<&Self>
    where
        T: PartialEq,
    {
        self.descendants().find(|node| node.value == *value)
    }
}

/// Shows the node's value and its children's values, not whole subtrees.
impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("children", &self.children().map(Node::value).collect::<Vec<_>>())
            .finish()
    }
}

/// Renders as `value {child, child {grandchild}}`; leaves have no braces.
impl<T> fmt::Display for Node<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a, T> {
            Subtree(&'a Node<T>),
            Text(&'static str),
        }

        let mut pending = vec![Piece::Subtree(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Subtree(node) => {
                    write!(f, "{}", node.value)?;
                    if node.is_leaf() {
                        continue;
                    }
                    // Pushed back to front so the children pop in order.
                    pending.push(Piece::Text("}"));
                    for (i, child) in node.children().enumerate().rev() {
                        pending.push(Piece::Subtree(child));
                        if i > 0 {
                            pending.push(Piece::Text(", "));
                        }
                    }
                    pending.push(Piece::Text(" {"));
                }
                Piece::Text(text) => f.write_str(text)?,
            }
        }
        Ok(())
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", self.root())
            .field("len", &self.len())
            .finish()
    }
}

impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.root(), f)
    }
}

/// A mutable handle to a node of a [`Tree`]. It borrows the whole tree mutably, so there is only
/// ever one live handle.
pub struct NodeMut<'a, T> {
    node: NonNull<Node<T>>,
    _tree: PhantomData<&'a mut Tree<T>>,
}

impl<'a, T> NodeMut<'a, T> {
    fn new(node: NonNull<Node<T>>) -> Self {
        Self {
            node,
            _tree: PhantomData,
        }
    }

    /// A shared view of the node.
    pub fn as_node(&self) -> &Node<T> {
        // SAFETY: The handle borrows the tree mutably so nothing else can be mutating this node.
        unsafe { self.node.as_ref() }
    }

    /// The value stored in the node.
    pub fn value(&self) -> &T {
        &self.as_node().value
    }

    /// A mutable reference to the node's value.
    pub fn value_mut(&mut self) -> &mut T {
        // SAFETY: See `NodeMut::as_node`.
        unsafe { &mut self.node.as_mut().value }
    }

    /// Adds a new child holding `value` after the existing children and returns a handle to it.
    pub fn add_child(&mut self, value: T) -> NodeMut<'_, T> {
        let child = leak_boxed(Node::new(value, Some(self.node)));
        // SAFETY: See `NodeMut::as_node`. `child` is freshly allocated and now owned by this node.
        unsafe { self.node.as_mut().children.push(child) };
        NodeMut::new(child)
    }

    /// Adds a whole tree as the last child. Its root gets this node as its parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use backlinks::tree::Tree;
    ///
    /// let mut soda = Tree::new("soda");
    /// soda.root_mut().add_child("ginger ale");
    ///
    /// let mut cold = Tree::new("cold");
    /// cold.root_mut().add_subtree(soda);
    ///
    /// let ginger_ale = cold.search(&"ginger ale").unwrap();
    /// assert_eq!(ginger_ale.depth(), 2);
    /// assert_eq!(cold.to_string(), "cold {soda {ginger ale}}");
    /// ```
    pub fn add_subtree(&mut self, subtree: Tree<T>) -> NodeMut<'_, T> {
        // The subtree's nodes now belong to this tree, so its destructor must not run.
        let subtree = ManuallyDrop::new(subtree);
        let mut child = subtree.root;
        // SAFETY: `child` was the root of a tree we consumed, so nothing else owns it, and this
        // handle borrows our own tree mutably.
        unsafe {
            child.as_mut().parent = Some(self.node);
            self.node.as_mut().children.push(child);
        }
        trace!("adopted subtree as child {}", self.as_node().children.len() - 1);
        NodeMut::new(child)
    }

    /// A handle to the child at `index`, if any.
    pub fn child_mut(&mut self, index: usize) -> Option<NodeMut<'_, T>> {
        self.as_node().children.get(index).copied().map(NodeMut::new)
    }

    /// Turns this handle into a handle to the child at `index`. Gives `None` (and drops the
    /// handle) if there's no such child.
    pub fn into_child(self, index: usize) -> Option<NodeMut<'a, T>> {
        self.as_node().children.get(index).copied().map(NodeMut::new)
    }

    /// Turns this handle into a handle to the parent. Gives `None` at the root.
    pub fn into_parent(self) -> Option<NodeMut<'a, T>> {
        self.as_node().parent.map(NodeMut::new)
    }

    /// Detaches the child at `index` (with everything below it) into a tree of its own. Both the
    /// child's entry here and its parent pointer are cleared.
    pub fn remove_child(&mut self, index: usize) -> Option<Tree<T>> {
        if index >= self.as_node().children.len() {
            return None;
        }
        // SAFETY: See `NodeMut::as_node`. The child leaves this tree, so it is owned by the new
        // `Tree` alone.
        let child = unsafe {
            let mut child = self.node.as_mut().children.remove(index);
            child.as_mut().parent = None;
            child
        };
        trace!("detached child {}", index);
        Some(Tree {
            root: child,
            _owns: PhantomData,
        })
    }
}

/// An iterator over a node's children. See [`Node::children`].
pub struct Children<'a, T> {
    inner: slice::Iter<'a, NonNull<Node<T>>>,
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<&'a Node<T>> {
        // SAFETY: Children live as long as the borrowed parent.
        self.inner.next().map(|child| unsafe { &*child.as_ptr() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Children<'a, T> {
    fn next_back(&mut self) -> Option<&'a Node<T>> {
        // SAFETY: See `Children::next`.
        self.inner.next_back().map(|child| unsafe { &*child.as_ptr() })
    }
}

impl<T> ExactSizeIterator for Children<'_, T> {}
impl<T> FusedIterator for Children<'_, T> {}

/// A depth-first iterator over a subtree. See [`Node::descendants`].
pub struct Descendants<'a, T> {
    pending: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for Descendants<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<&'a Node<T>> {
        let node = self.pending.pop()?;
        self.pending.extend(node.children().rev());
        Some(node)
    }
}

impl<T> FusedIterator for Descendants<'_, T> {}
