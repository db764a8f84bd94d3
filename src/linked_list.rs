use std::fmt;

use log::{debug, trace};

use crate::error::{ContainerError, Result};

struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// An indexable sequence built on singly linked nodes.
///
/// The list only keeps a reference to its first node, so appending with
/// [`add`](LinkedList::add) walks the whole chain. Positional operations check
/// the index before touching any node and report
/// [`ContainerError::IndexOutOfBounds`] without mutating the list.
///
/// The list has no internal synchronization; share it across threads only
/// behind a lock of the caller's choosing.
pub struct LinkedList<T> {
    head: Option<Box<Node<T>>>,
    size: usize,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        LinkedList { head: None, size: 0 }
    }

    /// Builds a list holding `elements` in iteration order, as if each one had
    /// been passed to [`add`](LinkedList::add).
    pub fn of<I: IntoIterator<Item = T>>(elements: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(elements);
        list
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Appends `value` after the last element.
    pub fn add(&mut self, value: T) {
        let slot = Self::slot_at(&mut self.head, self.size);
        *slot = Some(Box::new(Node { value, next: None }));
        self.size += 1;
    }

    /// Inserts `value` so that it ends up at `index`, shifting the element
    /// previously there (and everything after it) one position back.
    ///
    /// `index == size` appends.
    pub fn add_at(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.size {
            return Err(Self::out_of_bounds(index, self.size));
        }

        let slot = Self::slot_at(&mut self.head, index);
        let next = slot.take();
        *slot = Some(Box::new(Node { value, next }));
        self.size += 1;
        Ok(())
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let current = self.get_mut(index)?;
        Ok(std::mem::replace(current, value))
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.iter()
            .nth(index)
            .ok_or_else(|| Self::out_of_bounds(index, self.size))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let size = self.size;
        self.iter_mut()
            .nth(index)
            .ok_or_else(|| Self::out_of_bounds(index, size))
    }

    /// Unlinks the element at `index` and returns it.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.size {
            return Err(Self::out_of_bounds(index, self.size));
        }

        let slot = Self::slot_at(&mut self.head, index);
        match slot.take() {
            Some(mut node) => {
                *slot = node.next.take();
                self.size -= 1;
                Ok(node.value)
            }
            None => Err(Self::out_of_bounds(index, self.size)),
        }
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|element| element == value)
    }

    pub fn clear(&mut self) {
        let released = self.size;
        unlink(self.head.take());
        self.size = 0;
        trace!("cleared linked list, released {} elements", released);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: self.head.as_deref(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            current: self.head.as_deref_mut(),
        }
    }

    fn pop_front(&mut self) -> Option<T> {
        self.head.take().map(|mut node| {
            self.head = node.next.take();
            self.size -= 1;
            node.value
        })
    }

    // Returns the link that owns the node at `index`; for `index == size`
    // that is the empty link after the last node.
    fn slot_at(head: &mut Option<Box<Node<T>>>, index: usize) -> &mut Option<Box<Node<T>>> {
        let mut slot = head;
        for _ in 0..index {
            match slot {
                Some(node) => slot = &mut node.next,
                None => break,
            }
        }
        slot
    }

    fn out_of_bounds(index: usize, size: usize) -> ContainerError {
        debug!("rejected index {} on linked list of size {}", index, size);
        ContainerError::IndexOutOfBounds { index, size }
    }
}

// Releases a chain one node at a time so long lists do not recurse in Drop.
fn unlink<T>(head: Option<Box<Node<T>>>) {
    let mut current = head;
    while let Some(mut node) = current {
        current = node.next.take();
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        unlink(self.head.take());
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut slot = Self::slot_at(&mut self.head, self.size);
        for value in iter {
            let node = slot.insert(Box::new(Node { value, next: None }));
            slot = &mut node.next;
            self.size += 1;
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        LinkedList::of(iter)
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

pub struct IterMut<'a, T> {
    current: Option<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.take().map(|node| {
            self.current = node.next.as_deref_mut();
            &mut node.value
        })
    }
}

pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.size, Some(self.list.size))
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
