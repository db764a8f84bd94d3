use std::fmt;
use std::ptr;

use log::trace;

struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// A FIFO queue on singly linked nodes with constant-time `add` and `poll`.
///
/// The queue owns its chain through `head` and keeps a non-owning pointer to
/// the last node so that `add` never walks the chain.
///
/// Polling an empty queue is not an error: [`poll`](LinkedQueue::poll) returns
/// `None`, since draining a queue until it runs dry is ordinary usage. This
/// differs on purpose from [`LinkedStack::pop`](crate::LinkedStack::pop),
/// which reports an empty stack as [`ContainerError::EmptyStack`](crate::ContainerError::EmptyStack).
pub struct LinkedQueue<T> {
    head: Option<Box<Node<T>>>,
    tail: *mut Node<T>,
    size: usize,
}

impl<T> LinkedQueue<T> {
    pub fn new() -> Self {
        LinkedQueue {
            head: None,
            tail: ptr::null_mut(),
            size: 0,
        }
    }

    /// Adds `value` at the back of the queue.
    pub fn add(&mut self, value: T) {
        let slot = if self.tail.is_null() {
            &mut self.head
        } else {
            // SAFETY: a non-null tail points at the last node of the chain owned
            // by `head`. The node stays alive until it is polled, and polling the
            // last node resets tail to null.
            unsafe { &mut (*self.tail).next }
        };

        let node = slot.insert(Box::new(Node { value, next: None }));
        self.tail = &mut **node;
        self.size += 1;
    }

    /// Removes and returns the front element, or `None` if the queue is empty.
    pub fn poll(&mut self) -> Option<T> {
        self.head.take().map(|mut node| {
            self.head = node.next.take();
            self.size -= 1;

            if self.head.is_none() {
                self.tail = ptr::null_mut();
            }

            node.value
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
        self.tail = ptr::null_mut();
        self.size = 0;
        trace!("cleared linked queue, released {} elements", released);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: self.head.as_deref(),
        }
    }
}

fn unlink<T>(head: Option<Box<Node<T>>>) {
    let mut current = head;
    while let Some(mut node) = current {
        current = node.next.take();
    }
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedQueue<T> {
    fn drop(&mut self) {
        unlink(self.head.take());
    }
}

impl<T: Clone> Clone for LinkedQueue<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for LinkedQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = LinkedQueue::new();
        queue.extend(iter);
        queue
    }
}

// SAFETY: LinkedQueue<T> owns every node it points to. The raw tail pointer
// only ever aliases a node owned through `head`, so sending the queue sends
// the nodes with it.
unsafe impl<T: Send> Send for LinkedQueue<T> {}

// SAFETY: &LinkedQueue<T> only reads (peek, iter, size). The tail pointer is
// dereferenced only in `add`, which requires &mut.
unsafe impl<T: Sync> Sync for LinkedQueue<T> {}

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
    queue: LinkedQueue<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.poll()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.size, Some(self.queue.size))
    }
}

impl<T> IntoIterator for LinkedQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_queue_is_empty() {
        let q: LinkedQueue<i32> = LinkedQueue::new();
        assert_eq!(q.size(), 0);
        assert!(q.is_empty());
    }

    #[test]
    fn poll_on_empty_returns_none() {
        let mut q: LinkedQueue<i32> = LinkedQueue::new();
        assert!(q.poll().is_none());
        assert_eq!(q.size(), 0);
    }

    #[test]
    fn peek_on_empty_returns_none() {
        let q: LinkedQueue<i32> = LinkedQueue::new();
        assert!(q.peek().is_none());
    }

    #[test]
    fn add_single_element() {
        let mut q = LinkedQueue::new();
        q.add(42);
        assert_eq!(q.size(), 1);
        assert!(!q.is_empty());
        assert_eq!(q.peek(), Some(&42));
    }

    #[test]
    fn fifo_order() {
        let mut q = LinkedQueue::new();
        q.add(1);
        q.add(2);
        q.add(3);
        assert_eq!(q.poll(), Some(1));
        assert_eq!(q.poll(), Some(2));
        assert_eq!(q.poll(), Some(3));
        assert_eq!(q.poll(), None);
    }

    #[test]
    fn poll_decrements_size() {
        let mut q = LinkedQueue::new();
        q.add(1);
        q.add(2);
        q.poll();
        assert_eq!(q.size(), 1);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut q = LinkedQueue::new();
        q.add(7);
        assert_eq!(q.peek(), Some(&7));
        assert_eq!(q.peek(), Some(&7));
        assert_eq!(q.size(), 1);
    }

    #[test]
    fn add_after_draining_to_empty() {
        let mut q = LinkedQueue::new();
        q.add(1);
        assert_eq!(q.poll(), Some(1));
        assert!(q.is_empty());
        q.add(2);
        q.add(3);
        assert_eq!(q.poll(), Some(2));
        assert_eq!(q.poll(), Some(3));
        assert!(q.is_empty());
    }

    #[test]
    fn repeated_poll_on_drained_queue() {
        let mut q = LinkedQueue::new();
        q.add("job");
        q.poll();
        for _ in 0..3 {
            assert_eq!(q.poll(), None);
        }
        assert_eq!(q.size(), 0);
    }

    #[test]
    fn alternating_add_poll() {
        let mut q = LinkedQueue::new();
        for i in 0..100 {
            q.add(i);
            assert_eq!(q.poll(), Some(i));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn interleaved_keeps_fifo() {
        let mut q = LinkedQueue::new();
        q.add(1);
        q.add(2);
        assert_eq!(q.poll(), Some(1));
        q.add(3);
        q.add(4);
        assert_eq!(q.poll(), Some(2));
        assert_eq!(q.poll(), Some(3));
        q.add(5);
        assert_eq!(q.poll(), Some(4));
        assert_eq!(q.poll(), Some(5));
    }

    #[test]
    fn clear_makes_queue_empty() {
        let mut q: LinkedQueue<i32> = (1..=3).collect();
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.size(), 0);
        assert!(q.poll().is_none());
    }

    #[test]
    fn add_after_clear() {
        let mut q: LinkedQueue<i32> = (1..=3).collect();
        q.clear();
        q.add(9);
        assert_eq!(q.peek(), Some(&9));
        assert_eq!(q.poll(), Some(9));
    }

    #[test]
    fn iter_front_to_back() {
        let q: LinkedQueue<i32> = (1..=4).collect();
        let values: Vec<_> = q.iter().copied().collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn clone_creates_independent_copy() {
        let mut q: LinkedQueue<i32> = (1..=2).collect();
        let clone = q.clone();
        q.poll();
        q.add(3);
        assert_eq!(clone.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn into_iter_drains_in_fifo_order() {
        let q: LinkedQueue<&str> = ["a", "b", "c"].into_iter().collect();
        let drained: Vec<_> = q.into_iter().collect();
        assert_eq!(drained, vec!["a", "b", "c"]);
    }

    #[test]
    fn debug_formats_front_to_back() {
        let q: LinkedQueue<i32> = (1..=3).collect();
        assert_eq!(format!("{:?}", q), "[1, 2, 3]");
    }

    #[test]
    fn works_with_owned_strings() {
        let mut q = LinkedQueue::new();
        q.add(String::from("hello"));
        q.add(String::from("world"));
        assert_eq!(q.poll(), Some(String::from("hello")));
        assert_eq!(q.peek(), Some(&String::from("world")));
    }

    #[test]
    fn large_number_of_elements() {
        let mut q = LinkedQueue::new();
        for i in 0..100_000 {
            q.add(i);
        }
        assert_eq!(q.size(), 100_000);
        for i in 0..50_000 {
            assert_eq!(q.poll(), Some(i));
        }
        assert_eq!(q.size(), 50_000);
    }

    #[test]
    fn default_creates_empty_queue() {
        let q: LinkedQueue<i32> = LinkedQueue::default();
        assert!(q.is_empty());
    }
}
