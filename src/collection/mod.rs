//! Ordered collections backing every catalog.
//!
//! A [`SortedList`] is a singly linked chain kept in non-decreasing order
//! at all times. Elements are placed on insertion rather than sorted after
//! the fact, and two sorted chains merge by relinking nodes in one pass.

mod list;

pub use list::{IntoIter, Iter, SortedList};
