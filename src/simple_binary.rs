//! Simple Binary Heap implementation
//!
//! A comparison-based min-heap over `std::collections::BinaryHeap`, implementing
//! the same [`Heap`] trait as [`RadixHeap`](crate::radix::RadixHeap).
//!
//! It places no restriction on the order of pushed priorities, which makes it
//! the reference the radix heap is checked against in tests and measured
//! against in benchmarks.
//!
//! Elements with equal priority pop in insertion order.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `push`    | O(log n)   |
//! | `pop`     | O(log n)   |
//! | `peek`    | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use radix_heaps::Heap;
//! use radix_heaps::simple_binary::SimpleBinaryHeap;
//!
//! let mut heap = SimpleBinaryHeap::new();
//! heap.push(3, "three");
//! heap.push(1, "one");
//! heap.push(2, "two");
//!
//! assert_eq!(heap.peek(), Some((&1, &"one")));
//! assert_eq!(heap.pop(), Some((1, "one")));
//! assert_eq!(heap.pop(), Some((2, "two")));
//! assert_eq!(heap.pop(), Some((3, "three")));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::traits::Heap;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Heap entry ordered by priority, then by insertion sequence
#[derive(Debug)]
struct Entry<T, P> {
    priority: P,
    seq: u64,
    item: T,
}

impl<T, P: Ord> PartialEq for Entry<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, P: Ord> Eq for Entry<T, P> {}

impl<T, P: Ord> PartialOrd for Entry<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, P: Ord> Ord for Entry<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

/// A simple binary min-heap
///
/// This heap stores (priority, item) pairs and always returns the element
/// with the minimum priority first.
#[derive(Debug)]
pub struct SimpleBinaryHeap<T, P: Ord> {
    data: BinaryHeap<Reverse<Entry<T, P>>>,
    next_seq: u64,
}

impl<T, P: Ord> Heap<T, P> for SimpleBinaryHeap<T, P> {
    fn new() -> Self {
        Self {
            data: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, priority: P, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.data.push(Reverse(Entry {
            priority,
            seq,
            item,
        }));
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.data
            .peek()
            .map(|Reverse(entry)| (&entry.priority, &entry.item))
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.data
            .pop()
            .map(|Reverse(entry)| (entry.priority, entry.item))
    }
}

impl<T, P: Ord> Default for SimpleBinaryHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}
