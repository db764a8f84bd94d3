//! Generic containers built on singly linked nodes: an indexable list, a FIFO
//! queue, a LIFO stack and an unbalanced binary search tree.
//!
//! None of the containers synchronize internally. Mutation goes through
//! `&mut self`, so sharing one across threads needs an outer lock.

mod binary_search_tree;
mod error;
mod linked_list;
mod queue;
mod stack;

pub use binary_search_tree::BinarySearchTree;
pub use error::{ContainerError, Result};
pub use linked_list::LinkedList;
pub use queue::LinkedQueue;
pub use stack::LinkedStack;

#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
