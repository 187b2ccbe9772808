//! This crate exposes linked data structures whose nodes point back at
//! their neighbours, mostly for educational purposes.
//!
//! ## Back links
//!
//! A singly linked structure only lets you walk one way: from a list's head
//! towards its tail, or from a tree's root towards its leaves. Adding a
//! pointer back (to the previous list node, or to the parent tree node)
//! makes walking the other way O(1) but breaks Rust's usual "one owner"
//! story: every node is now reachable from two places. The structures here
//! resolve that the same way throughout:
//!
//! 1. Forward links (`next`, children) own the node they point at.
//! 2. Back links (`previous`, `parent`) are plain pointers that never free
//!    anything.
//! 3. Nodes are only handed out as `&Node` or through a handle that borrows
//!    the whole structure mutably, so nobody outside the structure can break
//!    a link.
//!
//! The modules are:
//!
//! - [`list`]: a doubly linked list with indexed access that walks from
//!   whichever end is nearer, plus a cursor for O(1) removal.
//! - [`queue`] and [`stack`]: thin FIFO and LIFO adapters over the list.
//! - [`tree`]: an n-ary tree with parent pointers and depth-first search.
//! - [`bst`]: an unbalanced Binary Search Tree with parent pointers and
//!   the classic three-case deletion.
//! - [`array`]: array-backed stack and queue for comparison.
//!
//! ## Errors
//!
//! Calling an operation outside its contract (inserting past the end of a
//! list, indexing out of range, building a BST from nothing) panics. Each of
//! those has a `try_` form returning an [`error`] instead. Looking for
//! something that isn't there (searching, popping an empty queue) is not an
//! error and returns `None`.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod array;
pub mod bst;
pub mod error;
pub mod list;
pub mod queue;
pub mod stack;
pub mod tree;

mod util;
