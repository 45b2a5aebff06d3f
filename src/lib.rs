//! Monotone Radix Heaps for Rust
//!
//! This crate provides a radix heap: a priority queue for fixed-width unsigned
//! integer priorities that are extracted in non-decreasing order. It trades the
//! generality of a comparison heap for O(1) insertion and O(W) amortized
//! extraction, where W is the bit width of the priority type.
//!
//! # Contents
//!
//! - [`radix::RadixHeap`]: the monotone heap, with arena-backed nodes and
//!   generational [`radix::RadixHandle`]s
//! - [`bits::RadixKey`]: the bit-length primitive the heap is generic over
//! - [`simple_binary::SimpleBinaryHeap`]: a comparison-based heap behind the same
//!   [`Heap`] trait, for reference and comparison
//! - [`pathfinding`]: Dijkstra, A* and bounded reachability written against
//!   [`Heap`]
//!
//! # Example
//!
//! ```rust
//! use radix_heaps::radix::RadixHeap;
//! use radix_heaps::{Heap, HeapError};
//!
//! let mut heap: RadixHeap<&str, u32> = RadixHeap::new();
//! heap.push(5, "a");
//! heap.push(2, "b");
//! heap.push(2, "c");
//! assert_eq!(heap.len(), 3);
//!
//! let (first, _) = heap.pop().unwrap();
//! let (second, _) = heap.pop().unwrap();
//! assert_eq!((first, second), (2, 2));
//! assert_eq!(heap.pop(), Some((5, "a")));
//! assert!(heap.is_empty());
//!
//! // Priorities may never drop below the last extracted minimum.
//! assert_eq!(heap.try_push(1, "late"), Err(HeapError::MonotonicityViolation));
//! ```

pub mod bits;
pub mod pathfinding;
pub mod radix;
pub mod simple_binary;
pub mod traits;

// Re-export the main trait for convenience
pub use traits::{Heap, HeapError};
