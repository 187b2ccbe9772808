//! A doubly-linked list. Every node owns the node after it and keeps a non-owning pointer back to
//! the node before it, so the list can be walked (and indexed) from either end.
//!
//! # Examples
//!
//! ```
//! use backlinks::list::LinkedList;
//!
//! let mut list = LinkedList::new();
//! list.append("Hello");
//! list.append("World");
//!
//! // Indices run from 0 through `len()` inclusive for insertion.
//! list.insert("Temporary", 0);
//! list.insert("Trailing", 3);
//! assert_eq!(list.to_string(), "[Temporary, Hello, World, Trailing]");
//!
//! assert_eq!(list.remove_at(0), "Temporary");
//! assert_eq!(list.node_at(1).map(|n| *n.value()), Some("World"));
//! assert!(list.node_at(42).is_none());
//!
//! list.reverse();
//! assert_eq!(list.to_string(), "[Trailing, World, Hello]");
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;

use log::trace;

use crate::error::IndexError;
use crate::util::{leak_boxed, reclaim};

type Link<T> = Option<NonNull<Node<T>>>;

/// A doubly-linked list with O(1) access to both ends.
pub struct LinkedList<T> {
    head: Link<T>,
    tail: Link<T>,
    count: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

/// A single element of a [`LinkedList`]. Nodes can only be observed through shared references
/// handed out by the list, so their links can't be broken from the outside.
pub struct Node<T> {
    value: T,
    next: Link<T>,
    previous: Link<T>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            next: None,
            previous: None,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The node after this one, or `None` at the tail.
    pub fn next(&self) -> Option<&Self> {
        // SAFETY: Linked nodes live as long as the list that owns them, and the list is borrowed
        // for as long as `self` is.
        self.next.map(|next| unsafe { &*next.as_ptr() })
    }

    /// The node before this one, or `None` at the head.
    pub fn previous(&self) -> Option<&Self> {
        // SAFETY: See `Node::next`.
        self.previous.map(|previous| unsafe { &*previous.as_ptr() })
    }

    /// Checks that both neighbours point back at this node.
    fn assert_links(&self) {
        let me = NonNull::from(self);
        if let Some(next) = self.next() {
            assert_eq!(next.previous, Some(me), "Asymmetric next-link in list node.");
        }
        if let Some(previous) = self.previous() {
            assert_eq!(previous.next, Some(me), "Asymmetric previous-link in list node.");
        }
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("has_previous", &self.previous.is_some())
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

// SAFETY: The list exclusively owns its nodes, so moving or sharing the list across threads is
// exactly as safe as moving or sharing the values themselves.
unsafe impl<T: Send> Send for LinkedList<T> {}
// SAFETY: See above.
unsafe impl<T: Sync> Sync for LinkedList<T> {}

impl<T> LinkedList<T> {
    /// Creates a new, empty list.
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            count: 0,
            _owns: PhantomData,
        }
    }

    /// The number of values in the list. O(1).
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the list has no values.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The first node, if any.
    pub fn head(&self) -> Option<&Node<T>> {
        // SAFETY: Linked nodes are valid while the list is borrowed.
        self.head.map(|head| unsafe { &*head.as_ptr() })
    }

    /// The last node, if any. O(1) since the tail is tracked.
    pub fn tail(&self) -> Option<&Node<T>> {
        // SAFETY: Linked nodes are valid while the list is borrowed.
        self.tail.map(|tail| unsafe { &*tail.as_ptr() })
    }

    /// The first value, if any.
    pub fn first(&self) -> Option<&T> {
        self.head().map(Node::value)
    }

    /// The last value, if any.
    pub fn last(&self) -> Option<&T> {
        self.tail().map(Node::value)
    }

    /// Adds a value after the current tail. O(1).
    pub fn append(&mut self, value: T) {
        let node = leak_boxed(Node::new(value));
        // SAFETY: `node` is fresh and unlinked and `self.tail` is a node of this list.
        unsafe { self.splice(self.tail, node, None) };
    }

    /// Finds the node at `index`, walking from whichever end of the list is closer. Returns `None`
    /// when `index` is past the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use backlinks::list::LinkedList;
    ///
    /// let list: LinkedList<_> = (0..10).collect();
    ///
    /// let node = list.node_at(7).unwrap();
    /// assert_eq!(node.value(), &7);
    /// assert_eq!(node.previous().map(|n| *n.value()), Some(6));
    /// assert!(list.node_at(10).is_none());
    /// ```
    pub fn node_at(&self, index: usize) -> Option<&Node<T>> {
        // SAFETY: Linked nodes are valid while the list is borrowed.
        self.link_at(index).map(|node| unsafe { &*node.as_ptr() })
    }

    /// The value at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.node_at(index).map(Node::value)
    }

    /// A mutable reference to the value at `index`, if there is one.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        // SAFETY: We hold `&mut self` so no other reference into the list exists.
        self.link_at(index)
            .map(|mut node| unsafe { &mut node.as_mut().value })
    }

    /// Inserts `value` so that it ends up at position `index`, shifting everything after it one
    /// place towards the tail. Inserting at `len()` appends.
    ///
    /// # Panics
    ///
    /// When `index > len()`.
    pub fn insert(&mut self, value: T, index: usize) {
        if let Err(err) = self.try_insert(value, index) {
            panic!("{}", err);
        }
    }

    /// Like [`LinkedList::insert`] but hands `value` back in the error instead of panicking when
    /// `index` is out of range.
    pub fn try_insert(&mut self, value: T, index: usize) -> Result<(), IndexError<T>> {
        if index > self.count {
            return Err(IndexError::Insert {
                index,
                len: self.count,
                value,
            });
        }

        let next = self.link_at(index);
        let previous = match next {
            // SAFETY: `next` came out of this list.
            Some(next) => unsafe { next.as_ref().previous },
            None => self.tail,
        };
        trace!("inserting at index {} of {}", index, self.count);
        let node = leak_boxed(Node::new(value));
        // SAFETY: `previous` and `next` are adjacent nodes of this list (or the matching ends).
        unsafe { self.splice(previous, node, next) };
        Ok(())
    }

    /// Removes and returns the value at `index`.
    ///
    /// # Panics
    ///
    /// When `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> T {
        match self.try_remove_at(index) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Like [`LinkedList::remove_at`] but returns an error instead of panicking when `index` is
    /// out of range.
    pub fn try_remove_at(&mut self, index: usize) -> Result<T, IndexError<T>> {
        match self.link_at(index) {
            // SAFETY: The node came out of this list.
            Some(node) => Ok(unsafe { self.unlink(node) }),
            None => Err(IndexError::Access {
                index,
                len: self.count,
            }),
        }
    }

    /// Removes the first value. O(1).
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        // SAFETY: The head is a node of this list.
        Some(unsafe { self.unlink(head) })
    }

    /// Removes the last value. O(1).
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        // SAFETY: The tail is a node of this list.
        Some(unsafe { self.unlink(tail) })
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Reverses the list in place by swapping every node's links. No node is reallocated.
    pub fn reverse(&mut self) {
        let mut link = self.head;
        while let Some(mut node) = link {
            // SAFETY: We hold `&mut self` and only touch one node at a time.
            let node = unsafe { node.as_mut() };
            link = node.next;
            std::mem::swap(&mut node.next, &mut node.previous);
        }
        std::mem::swap(&mut self.head, &mut self.tail);
        trace!("reversed list of length {}", self.count);
    }

    /// Builds a new list holding `transform` applied to each value, in order.
    pub fn map<U, F>(&self, transform: F) -> LinkedList<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(transform).collect()
    }

    /// Builds a new list holding clones of the values for which `predicate` returns `true`.
    pub fn filter<F>(&self, mut predicate: F) -> LinkedList<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        self.iter()
            .filter(|value| predicate(value))
            .cloned()
            .collect()
    }

    /// A borrowing iterator from head to tail. It is double-ended.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.count,
            _marker: PhantomData,
        }
    }

    /// A cursor positioned at the head (or at the "ghost" position if the list is empty).
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            current: self.head,
            index: 0,
            list: self,
        }
    }

    /// A cursor positioned at the tail (or at the "ghost" position if the list is empty).
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            current: self.tail,
            index: self.count.saturating_sub(1),
            list: self,
        }
    }

    /// A cursor positioned at `index`, or `None` if there's no node there.
    pub fn cursor_at_mut(&mut self, index: usize) -> Option<CursorMut<'_, T>> {
        let current = self.link_at(index)?;
        Some(CursorMut {
            current: Some(current),
            index,
            list: self,
        })
    }

    fn link_at(&self, index: usize) -> Link<T> {
        if index >= self.count {
            return None;
        }

        // SAFETY (both walks): `index < count` so every step lands on a node of this list.
        if index > self.count / 2 {
            let mut link = self.tail;
            for _ in index + 1..self.count {
                link = link.and_then(|node| unsafe { node.as_ref().previous });
            }
            link
        } else {
            let mut link = self.head;
            for _ in 0..index {
                link = link.and_then(|node| unsafe { node.as_ref().next });
            }
            link
        }
    }

    /// Links `node` between `previous` and `next`, moving `head`/`tail` when either is `None`.
    ///
    /// # Safety
    ///
    /// `node` must be a fresh allocation from `leak_boxed` that isn't linked anywhere, and
    /// `previous`/`next` must be adjacent nodes of this list (`None` standing for the ends).
    unsafe fn splice(&mut self, previous: Link<T>, mut node: NonNull<Node<T>>, next: Link<T>) {
        node.as_mut().previous = previous;
        node.as_mut().next = next;
        match previous {
            Some(mut previous) => previous.as_mut().next = Some(node),
            None => self.head = Some(node),
        }
        match next {
            Some(mut next) => next.as_mut().previous = Some(node),
            None => self.tail = Some(node),
        }
        self.count += 1;

        if cfg!(debug_assertions) {
            node.as_ref().assert_links();
        }
    }

    /// Splices `node` out of the list, frees it and returns its value. O(1).
    ///
    /// # Safety
    ///
    /// `node` must be a node of this list and nothing may dereference it afterwards.
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> T {
        // Reclaiming drops the node's own links along with the allocation.
        let Node {
            value,
            next,
            previous,
        } = reclaim(node);
        match previous {
            Some(mut previous) => previous.as_mut().next = next,
            None => self.head = next,
        }
        match next {
            Some(mut next) => next.as_mut().previous = previous,
            None => self.tail = previous,
        }
        self.count -= 1;
        value
    }
}

impl<T> Index<usize> for LinkedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "{}",
                IndexError::<T>::Access {
                    index,
                    len: self.count
                }
            ),
        }
    }
}

impl<T> IndexMut<usize> for LinkedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.count;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("{}", IndexError::<T>::Access { index, len }),
        }
    }
}

impl<T> Clone for LinkedList<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> PartialEq for LinkedList<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for LinkedList<T> where T: Eq {}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> fmt::Debug for LinkedList<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders as `[a, b, c]`.
impl<T> fmt::Display for LinkedList<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/// A borrowing iterator over a [`LinkedList`]. See [`LinkedList::iter`].
pub struct Iter<'a, T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|head| {
            // SAFETY: The list is borrowed for `'a` and `len` stops us before crossing `tail`.
            let node = unsafe { &*head.as_ptr() };
            self.len -= 1;
            self.head = node.next;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|tail| {
            // SAFETY: See `Iter::next`.
            let node = unsafe { &*tail.as_ptr() };
            self.len -= 1;
            self.tail = node.previous;
            &node.value
        })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            tail: self.tail,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// An owning iterator over a [`LinkedList`].
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

/// A mutable cursor over a [`LinkedList`]. Besides the nodes, the cursor can rest on a "ghost"
/// position that sits after the tail and before the head; its index is `len()`.
///
/// Removing or inserting next to the cursor is O(1) because the cursor already holds the node.
///
/// # Examples
///
/// ```
/// use backlinks::list::LinkedList;
///
/// let mut list: LinkedList<_> = (1..=5).collect();
///
/// let mut cursor = list.cursor_at_mut(2).unwrap();
/// assert_eq!(cursor.remove_current(), Some(3));
/// // The cursor moved on to the node after the removed one.
/// assert_eq!(cursor.current(), Some(&mut 4));
/// cursor.insert_before(30);
///
/// assert_eq!(list.to_string(), "[1, 2, 30, 4, 5]");
/// ```
pub struct CursorMut<'a, T> {
    current: Link<T>,
    index: usize,
    list: &'a mut LinkedList<T>,
}

impl<T> CursorMut<'_, T> {
    /// The index of the current node, or `None` at the ghost position.
    pub fn index(&self) -> Option<usize> {
        self.current.map(|_| self.index)
    }

    /// The current value, or `None` at the ghost position.
    pub fn current(&mut self) -> Option<&mut T> {
        // SAFETY: The cursor mutably borrows the list, and the returned reference borrows the
        // cursor.
        self.current
            .map(|mut node| unsafe { &mut node.as_mut().value })
    }

    /// Moves towards the tail. From the tail this moves to the ghost position, and from the ghost
    /// position to the head.
    pub fn move_next(&mut self) {
        match self.current {
            Some(node) => {
                // SAFETY: `node` is a node of the borrowed list.
                self.current = unsafe { node.as_ref().next };
                self.index += 1;
            }
            None => {
                self.current = self.list.head;
                self.index = 0;
            }
        }
    }

    /// Moves towards the head. From the head this moves to the ghost position, and from the ghost
    /// position to the tail.
    pub fn move_prev(&mut self) {
        match self.current {
            Some(node) => {
                // SAFETY: `node` is a node of the borrowed list.
                self.current = unsafe { node.as_ref().previous };
                self.index = match self.current {
                    Some(_) => self.index - 1,
                    None => self.list.count,
                };
            }
            None => {
                self.current = self.list.tail;
                self.index = self.list.count.saturating_sub(1);
            }
        }
    }

    /// Inserts `value` before the current node. At the ghost position this appends.
    pub fn insert_before(&mut self, value: T) {
        let previous = match self.current {
            // SAFETY: `node` is a node of the borrowed list.
            Some(node) => unsafe { node.as_ref().previous },
            None => self.list.tail,
        };
        let node = leak_boxed(Node::new(value));
        // SAFETY: `previous` and `self.current` are adjacent in the borrowed list.
        unsafe { self.list.splice(previous, node, self.current) };
        self.index += 1;
    }

    /// Inserts `value` after the current node. At the ghost position this prepends.
    pub fn insert_after(&mut self, value: T) {
        let next = match self.current {
            // SAFETY: `node` is a node of the borrowed list.
            Some(node) => unsafe { node.as_ref().next },
            None => self.list.head,
        };
        let node = leak_boxed(Node::new(value));
        // SAFETY: `self.current` and `next` are adjacent in the borrowed list.
        unsafe { self.list.splice(self.current, node, next) };
        if self.current.is_none() {
            self.index += 1;
        }
    }

    /// Removes the current node in O(1) and returns its value. The cursor moves on to the node
    /// that followed it (or to the ghost position). Returns `None` at the ghost position.
    pub fn remove_current(&mut self) -> Option<T> {
        let node = self.current?;
        // SAFETY: `node` is a node of the borrowed list and the cursor forgets it right here.
        unsafe {
            self.current = node.as_ref().next;
            Some(self.list.unlink(node))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    /// Walks the list from both ends and checks every link pair and the count.
    fn assert_well_formed<T>(list: &LinkedList<T>) {
        let mut forward = 0;
        let mut node = list.head();
        assert!(node.is_none_or(|n| n.previous().is_none()));
        while let Some(n) = node {
            n.assert_links();
            forward += 1;
            node = n.next();
        }
        let mut backward = 0;
        let mut node = list.tail();
        assert!(node.is_none_or(|n| n.next().is_none()));
        while let Some(n) = node {
            backward += 1;
            node = n.previous();
        }
        assert_eq!(forward, list.len());
        assert_eq!(backward, list.len());
        assert_eq!(list.head.is_none(), list.tail.is_none());
        assert_eq!(list.head.is_none(), list.is_empty());
    }

    #[test]
    fn new_list_is_empty() {
        let list: LinkedList<i32> = LinkedList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
        assert!(list.node_at(0).is_none());
        assert_eq!(list.to_string(), "[]");
    }

    #[test]
    fn append_links_both_directions() {
        let mut list = LinkedList::new();
        list.append(1);
        list.append(2);
        list.append(3);

        assert_eq!(list.len(), 3);
        assert_eq!(list.first(), Some(&1));
        assert_eq!(list.last(), Some(&3));
        assert_eq!(collect(&list), vec![1, 2, 3]);
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_well_formed(&list);
    }

    #[test]
    fn node_at_walks_from_either_end() {
        for len in 0..9 {
            let list: LinkedList<_> = (0..len).collect();
            for i in 0..len {
                assert_eq!(list.node_at(i).map(Node::value), Some(&i));
            }
            assert!(list.node_at(len).is_none());
        }
    }

    #[test]
    fn insert_at_edges_moves_head_and_tail() {
        let mut list: LinkedList<_> = vec![2, 3].into_iter().collect();

        list.insert(1, 0);
        list.insert(4, 3);

        assert_eq!(collect(&list), vec![1, 2, 3, 4]);
        assert_eq!(list.first(), Some(&1));
        assert_eq!(list.last(), Some(&4));
        assert_well_formed(&list);
    }

    #[test]
    fn insert_into_empty_list() {
        let mut list = LinkedList::new();
        list.insert("only", 0);

        assert_eq!(list.len(), 1);
        assert_eq!(list.first(), list.last());
        assert_well_formed(&list);
    }

    #[test]
    #[should_panic(expected = "insertion index (is 3) should be <= len (is 2)")]
    fn insert_past_end_panics() {
        let mut list: LinkedList<_> = vec![1, 2].into_iter().collect();
        list.insert(9, 3);
    }

    #[test]
    fn try_insert_hands_the_value_back() {
        let mut list: LinkedList<String> = LinkedList::new();
        let err = list.try_insert("lost".to_string(), 1).unwrap_err();

        assert_eq!(err.into_value(), Some("lost".to_string()));
        assert!(list.is_empty());
    }

    #[test]
    fn remove_at_relinks_neighbours() {
        let mut list: LinkedList<_> = (0..5).collect();

        assert_eq!(list.remove_at(2), 2);
        assert_well_formed(&list);
        assert_eq!(list.remove_at(0), 0);
        assert_well_formed(&list);
        assert_eq!(list.remove_at(2), 4);
        assert_well_formed(&list);

        assert_eq!(collect(&list), vec![1, 3]);
    }

    #[test]
    #[should_panic(expected = "index (is 0) should be < len (is 0)")]
    fn remove_at_on_empty_panics() {
        let mut list: LinkedList<i32> = LinkedList::new();
        list.remove_at(0);
    }

    #[test]
    fn try_remove_at_reports_out_of_range() {
        let mut list: LinkedList<_> = (0..2).collect();
        assert_eq!(
            list.try_remove_at(2),
            Err(IndexError::Access { index: 2, len: 2 })
        );
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn pops_from_both_ends() {
        let mut list: LinkedList<_> = (1..=3).collect();

        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), None);
        assert_eq!(list.pop_front(), None);
        assert_well_formed(&list);
    }

    #[test]
    fn reverse_swaps_head_and_tail() {
        let mut list: LinkedList<_> = (1..=4).collect();
        list.reverse();

        assert_eq!(collect(&list), vec![4, 3, 2, 1]);
        assert_eq!(list.first(), Some(&4));
        assert_eq!(list.last(), Some(&1));
        assert_well_formed(&list);

        // Appending after a reverse must go after the new tail.
        list.append(0);
        assert_eq!(collect(&list), vec![4, 3, 2, 1, 0]);
        assert_well_formed(&list);
    }

    #[test]
    fn reverse_of_tiny_lists() {
        let mut empty: LinkedList<i32> = LinkedList::new();
        empty.reverse();
        assert!(empty.is_empty());

        let mut single: LinkedList<_> = std::iter::once(1).collect();
        single.reverse();
        assert_eq!(collect(&single), vec![1]);
        assert_well_formed(&single);
    }

    #[test]
    fn map_and_filter_leave_the_source_alone() {
        let list: LinkedList<_> = vec!["Hello", "World", "Complex", "No"]
            .into_iter()
            .collect();

        let lengths = list.map(|s| s.len());
        let long = list.filter(|s| s.len() > 5);

        assert_eq!(collect(&lengths), vec![5, 5, 7, 2]);
        assert_eq!(collect(&long), vec!["Complex"]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn indexing() {
        let mut list: LinkedList<_> = (0..4).collect();
        list[2] = 20;
        assert_eq!(list[2], 20);
        assert_eq!(list.get(4), None);
        if let Some(v) = list.get_mut(0) {
            *v = -1;
        }
        assert_eq!(collect(&list), vec![-1, 1, 20, 3]);
    }

    #[test]
    #[should_panic(expected = "index (is 4) should be < len (is 4)")]
    fn indexing_out_of_range_panics() {
        let list: LinkedList<_> = (0..4).collect();
        let _value = list[4];
    }

    #[test]
    fn cursor_remove_is_local() {
        let mut list: LinkedList<_> = (0..6).collect();
        {
            let mut cursor = list.cursor_at_mut(4).unwrap();
            assert_eq!(cursor.index(), Some(4));
            assert_eq!(cursor.remove_current(), Some(4));
            assert_eq!(cursor.index(), Some(4));
            assert_eq!(cursor.remove_current(), Some(5));
            // At the ghost position now.
            assert_eq!(cursor.index(), None);
            assert_eq!(cursor.remove_current(), None);
        }
        assert_eq!(collect(&list), vec![0, 1, 2, 3]);
        assert_eq!(list.last(), Some(&3));
        assert_well_formed(&list);
    }

    #[test]
    fn cursor_walks_through_the_ghost() {
        let mut list: LinkedList<_> = (0..3).collect();
        let mut cursor = list.cursor_back_mut();

        assert_eq!(cursor.index(), Some(2));
        cursor.move_next();
        assert_eq!(cursor.index(), None);
        cursor.move_next();
        assert_eq!(cursor.index(), Some(0));
        cursor.move_prev();
        assert_eq!(cursor.current(), None);
        cursor.move_prev();
        assert_eq!(cursor.current(), Some(&mut 2));
    }

    #[test]
    fn cursor_inserts_keep_index_in_sync() {
        let mut list: LinkedList<_> = vec![1, 3].into_iter().collect();
        {
            let mut cursor = list.cursor_front_mut();
            cursor.insert_before(0);
            assert_eq!(cursor.index(), Some(1));
            cursor.insert_after(2);
            cursor.move_next();
            assert_eq!(cursor.current(), Some(&mut 2));
            assert_eq!(cursor.index(), Some(2));

            cursor.move_next();
            cursor.move_next();
            // Ghost: insert_after prepends, insert_before appends.
            cursor.insert_after(-1);
            cursor.insert_before(4);
            cursor.move_prev();
            assert_eq!(cursor.current(), Some(&mut 4));
            assert_eq!(cursor.index(), Some(5));
        }
        assert_eq!(collect(&list), vec![-1, 0, 1, 2, 3, 4]);
        assert_well_formed(&list);
    }

    #[test]
    fn cursor_on_empty_list_appends() {
        let mut list = LinkedList::new();
        {
            let mut cursor = list.cursor_front_mut();
            assert_eq!(cursor.current(), None);
            cursor.insert_before('a');
            cursor.insert_after('z');
        }
        assert_eq!(collect(&list), vec!['z', 'a']);
        assert_well_formed(&list);
    }

    #[test]
    fn into_iter_from_both_ends() {
        let list: LinkedList<_> = (0..4).map(|i| i.to_string()).collect();
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next_back().as_deref(), Some("3"));
        assert_eq!(iter.next().as_deref(), Some("0"));
        assert_eq!(iter.collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn clone_and_eq() {
        let list: LinkedList<_> = (0..5).collect();
        let mut copy = list.clone();
        assert_eq!(list, copy);
        copy.reverse();
        assert_ne!(list, copy);
        assert_eq!(format!("{:?}", list), "[0, 1, 2, 3, 4]");
    }

    #[test]
    fn drop_releases_every_value() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        {
            let mut list = LinkedList::new();
            for _ in 0..100 {
                list.append(Rc::clone(&tracker));
            }
            list.remove_at(50);
            list.reverse();
            assert_eq!(Rc::strong_count(&tracker), 100);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn long_list_drops_without_recursion() {
        let list: LinkedList<_> = (0..200_000).collect();
        assert_eq!(list.node_at(150_000).map(Node::value), Some(&150_000));
        drop(list);
    }
}
