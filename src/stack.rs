//! A last-in, first-out stack backed by [`LinkedList`]. Pushing and popping both happen at the
//! tracked tail, so they are O(1).

use std::fmt;

use crate::list::{self, LinkedList};

/// A LIFO stack. Empty stacks answer `None` instead of panicking.
///
/// # Examples
///
/// ```
/// use backlinks::stack::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(10);
/// stack.push(20);
///
/// assert_eq!(stack.peek(), Some(&20));
/// assert_eq!(stack.pop(), Some(20));
/// assert_eq!(stack.pop(), Some(10));
/// assert_eq!(stack.pop(), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Stack<T> {
    list: LinkedList<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    pub const fn new() -> Self {
        Self {
            list: LinkedList::new(),
        }
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The number of values on the stack.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Puts a value on top.
    pub fn push(&mut self, value: T) {
        self.list.append(value);
    }

    /// Removes the top value.
    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_back()
    }

    /// The top value, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.list.last()
    }

    /// Iterates from the bottom of the stack to the top.
    pub fn iter(&self) -> list::Iter<'_, T> {
        self.list.iter()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<T> fmt::Debug for Stack<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack").field("list", &self.list).finish()
    }
}

impl<T> fmt::Display for Stack<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.list, f)
    }
}
