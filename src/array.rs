//! Array-backed stack and queue. These are the simple baselines the linked adapters in
//! [`crate::queue`] and [`crate::stack`] are measured against.
//!
//! The queue never shifts elements on dequeue. It leaves a hole at the front and remembers where
//! the live values start, compacting the buffer only once enough of it is dead weight (see
//! [`CompactionPolicy`]).
//!
//! # Examples
//!
//! ```
//! use backlinks::array::ArrayQueue;
//!
//! let mut queue: ArrayQueue<_> = (0..100).collect();
//! for i in 0..30 {
//!     assert_eq!(queue.dequeue(), Some(i));
//! }
//! assert_eq!(queue.front(), Some(&30));
//! assert_eq!(queue.len(), 70);
//! ```

use log::debug;

/// A stack over a growable array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayStack<T> {
    values: Vec<T>,
}

impl<T> Default for ArrayStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ArrayStack<T> {
    /// Creates an empty stack.
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The number of values on the stack.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Puts a value on top.
    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    /// Removes the top value.
    pub fn pop(&mut self) -> Option<T> {
        self.values.pop()
    }

    /// The top value.
    pub fn top(&self) -> Option<&T> {
        self.values.last()
    }
}

impl<T> FromIterator<T> for ArrayStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// When an [`ArrayQueue`] drops its consumed slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactionPolicy {
    /// Buffers with this many slots or fewer are never compacted.
    pub min_len: usize,
    /// Compact once the consumed share of the buffer is strictly greater than this.
    pub max_consumed_ratio: f64,
}

impl Default for CompactionPolicy {
    fn default() -> Self {
        Self {
            min_len: 50,
            max_consumed_ratio: 0.25,
        }
    }
}

impl CompactionPolicy {
    fn should_compact(&self, consumed: usize, slots: usize) -> bool {
        slots > self.min_len && consumed as f64 / slots as f64 > self.max_consumed_ratio
    }
}

/// A queue over a growable array of slots. Dequeueing is O(1) amortised.
#[derive(Debug, Clone)]
pub struct ArrayQueue<T> {
    slots: Vec<Option<T>>,
    head: usize,
    policy: CompactionPolicy,
}

impl<T> Default for ArrayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ArrayQueue<T> {
    /// Creates an empty queue with the default [`CompactionPolicy`].
    pub fn new() -> Self {
        Self::with_policy(CompactionPolicy::default())
    }

    /// Creates an empty queue that compacts according to `policy`.
    pub fn with_policy(policy: CompactionPolicy) -> Self {
        Self {
            slots: Vec::new(),
            head: 0,
            policy,
        }
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of queued values.
    pub fn len(&self) -> usize {
        self.slots.len() - self.head
    }

    /// Adds a value at the back.
    pub fn enqueue(&mut self, value: T) {
        self.slots.push(Some(value));
    }

    /// Removes the value at the front, compacting the buffer if the policy asks for it.
    pub fn dequeue(&mut self) -> Option<T> {
        let value = self.slots.get_mut(self.head)?.take()?;
        self.head += 1;

        if self.policy.should_compact(self.head, self.slots.len()) {
            debug!(
                "compacting array queue: dropping {} of {} slots",
                self.head,
                self.slots.len()
            );
            self.slots.drain(..self.head);
            self.head = 0;
        }

        Some(value)
    }

    /// The value at the front.
    pub fn front(&self) -> Option<&T> {
        self.slots.get(self.head).and_then(Option::as_ref)
    }
}

impl<T> FromIterator<T> for ArrayQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        for value in iter {
            queue.enqueue(value);
        }
        queue
    }
}
