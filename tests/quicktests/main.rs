mod bst;
mod list;
