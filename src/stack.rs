use std::fmt;

use log::{debug, trace};

use crate::error::{ContainerError, Result};

struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// A LIFO stack on singly linked nodes. `push` and `pop` both work on the top
/// node, so each is constant time.
///
/// Unlike [`LinkedQueue::poll`](crate::LinkedQueue::poll), popping an empty
/// stack is a caller error and yields [`ContainerError::EmptyStack`].
pub struct LinkedStack<T> {
    head: Option<Box<Node<T>>>,
    size: usize,
}

impl<T> LinkedStack<T> {
    pub fn new() -> Self {
        LinkedStack {
            head: None,
            size: 0,
        }
    }

    pub fn push(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.size += 1;
    }

    pub fn pop(&mut self) -> Result<T> {
        self.pop_top().ok_or_else(|| {
            debug!("pop rejected, linked stack is empty");
            ContainerError::EmptyStack
        })
    }

    pub fn peek(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.value)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        let released = self.size;
        unlink(self.head.take());
        self.size = 0;
        trace!("cleared linked stack, released {} elements", released);
    }

    /// Iterates from the top of the stack to the bottom.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: self.head.as_deref(),
        }
    }

    fn pop_top(&mut self) -> Option<T> {
        self.head.take().map(|mut node| {
            self.head = node.next.take();
            self.size -= 1;
            node.value
        })
    }
}

fn unlink<T>(head: Option<Box<Node<T>>>) {
    let mut current = head;
    while let Some(mut node) = current {
        current = node.next.take();
    }
}

impl<T> Default for LinkedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedStack<T> {
    fn drop(&mut self) {
        unlink(self.head.take());
    }
}

impl<T: Clone> Clone for LinkedStack<T> {
    fn clone(&self) -> Self {
        let mut bottom_up: Vec<&T> = self.iter().collect();
        bottom_up.reverse();
        bottom_up.into_iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Pushes every element in iteration order, leaving the last one on top.
impl<T> Extend<T> for LinkedStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = LinkedStack::new();
        stack.extend(iter);
        stack
    }
}

pub struct Iter<'a, T> {
    current: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_deref();
            &node.value
        })
    }
}

pub struct IntoIter<T> {
    stack: LinkedStack<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop_top()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.size, Some(self.stack.size))
    }
}

impl<T> IntoIterator for LinkedStack<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { stack: self }
    }
}
