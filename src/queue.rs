//! A first-in, first-out queue backed by [`LinkedList`]. Both ends of the list are tracked, so
//! enqueueing and dequeueing are O(1).
//!
//! # Examples
//!
//! ```
//! use backlinks::queue::Queue;
//!
//! let mut queue = Queue::new();
//! assert_eq!(queue.dequeue(), None);
//!
//! queue.enqueue(1);
//! queue.enqueue(2);
//! assert_eq!(queue.peek(), Some(&1));
//! assert_eq!(queue.dequeue(), Some(1));
//! assert_eq!(queue.len(), 1);
//! ```

use std::fmt;

use crate::list::{self, LinkedList};

/// A FIFO queue. Empty queues answer `None` instead of panicking.
#[derive(Clone, PartialEq, Eq)]
pub struct Queue<T> {
    list: LinkedList<T>,
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            list: LinkedList::new(),
        }
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The number of queued values.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Adds a value at the back.
    pub fn enqueue(&mut self, value: T) {
        self.list.append(value);
    }

    /// Removes the value at the front.
    pub fn dequeue(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// The value at the front, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.list.first()
    }

    /// Iterates from front to back.
    pub fn iter(&self) -> list::Iter<'_, T> {
        self.list.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<T> fmt::Debug for Queue<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue").field("list", &self.list).finish()
    }
}

impl<T> fmt::Display for Queue<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.list, f)
    }
}
