//! Errors returned by the fallible forms of index-based and construction operations.
//!
//! The panicking operations (`insert`, `remove_at`, indexing, `from_values`) treat these
//! conditions as programmer errors and panic with the same message. Searches and pops that
//! find nothing are not errors at all; they return `None`.

/// Errors triggered by index-based list operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum IndexError<T> {
    /// The insertion index was past the end of the list. The value that could not be inserted is
    /// handed back.
    #[error("insertion index (is {index}) should be <= len (is {len})")]
    Insert {
        /// The rejected index.
        index: usize,
        /// The length of the list at the time of the call.
        len: usize,
        /// The value that was not inserted.
        value: T,
    },
    /// The index did not refer to an element of the list.
    #[error("index (is {index}) should be < len (is {len})")]
    Access {
        /// The rejected index.
        index: usize,
        /// The length of the list at the time of the call.
        len: usize,
    },
}

impl<T> IndexError<T> {
    /// Recovers the value of a failed insertion, if this error carries one.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Insert { value, .. } => Some(value),
            Self::Access { .. } => None,
        }
    }
}

/// Error when a structure that must be rooted is built from an empty collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot build a rooted tree from an empty collection")]
pub struct EmptyInputError;
