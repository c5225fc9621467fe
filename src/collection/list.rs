//! Sorted singly linked list.

use std::fmt;
use std::iter::FusedIterator;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// A singly linked list that stays sorted under `T`'s total order.
///
/// Elements that compare equal keep the order in which they arrived.
pub struct SortedList<T: Ord> {
    head: Link<T>,
    len: usize,
}

impl<T: Ord> SortedList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Insert `value` after every element not greater than it.
    pub fn insert(&mut self, value: T) {
        let position = self
            .iter()
            .take_while(|existing| *existing <= &value)
            .count();

        let cursor = self.link_at(position);
        let next = cursor.take();
        *cursor = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    /// Merge another sorted list into this one.
    ///
    /// Runs in O(n + m) by relinking the existing nodes. On ties, elements
    /// already in `self` come first. `other` must be sorted under the same
    /// order, which holds for any `SortedList` built through its own API.
    pub fn merge(&mut self, mut other: SortedList<T>) {
        let mut left = self.head.take();
        let mut right = other.head.take();
        let mut tail = &mut self.head;

        loop {
            let from_left = match (&left, &right) {
                (Some(l), Some(r)) => l.value <= r.value,
                _ => break,
            };
            let source = if from_left { &mut left } else { &mut right };
            if let Some(mut node) = source.take() {
                *source = node.next.take();
                tail = &mut tail.insert(node).next;
            }
        }

        // At most one side still has nodes; splice it on as-is.
        *tail = left.or(right);
        self.len += std::mem::take(&mut other.len);
    }

    /// Remove and return the first element matching `predicate`.
    pub fn remove_first<F>(&mut self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let position = self.iter().position(|value| predicate(value))?;

        let cursor = self.link_at(position);
        let mut node = cursor.take()?;
        *cursor = node.next.take();
        self.len -= 1;
        Some(node.value)
    }

    /// First element matching `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|value| predicate(value))
    }

    /// Mutable access to the first element matching `predicate`.
    ///
    /// Callers may only change fields that take no part in `T`'s ordering.
    pub fn find_mut<F>(&mut self, mut predicate: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if predicate(&node.value) {
                return Some(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Whether an element equal to `value` is present.
    ///
    /// Stops at the first element greater than `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.iter()
            .take_while(|existing| *existing <= value)
            .any(|existing| existing == value)
    }

    /// Smallest element.
    pub fn first(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.value)
    }

    /// Iterate in chain order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    /// The link reached after stepping over `position` nodes.
    ///
    /// Stops at the tail link if the chain is shorter.
    fn link_at(&mut self, position: usize) -> &mut Link<T> {
        let mut cursor = &mut self.head;
        for _ in 0..position {
            match cursor {
                Some(node) => cursor = &mut node.next,
                None => break,
            }
        }
        cursor
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }
}

impl<T: Ord> Default for SortedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Drop for SortedList<T> {
    fn drop(&mut self) {
        // Unlink iteratively so long chains don't recurse through Box drops.
        self.clear();
    }
}

impl<T: Ord + Clone> Clone for SortedList<T> {
    fn clone(&self) -> Self {
        let mut list = Self::new();
        let mut tail = &mut list.head;
        for value in self.iter() {
            tail = &mut tail
                .insert(Box::new(Node {
                    value: value.clone(),
                    next: None,
                }))
                .next;
        }
        list.len = self.len;
        list
    }
}

impl<T: Ord> FromIterator<T> for SortedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T: Ord> Extend<T> for SortedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for SortedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Ord + fmt::Display> fmt::Display for SortedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            writeln!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl<'a, T: Ord> IntoIterator for &'a SortedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord> IntoIterator for SortedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

/// Borrowing iterator over a [`SortedList`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
        }
    }
}

/// Owning iterator over a [`SortedList`].
pub struct IntoIter<T: Ord>(SortedList<T>);

impl<T: Ord> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let list = &mut self.0;
        list.head.take().map(|mut node| {
            list.head = node.next.take();
            list.len -= 1;
            node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T: Ord> ExactSizeIterator for IntoIter<T> {}
