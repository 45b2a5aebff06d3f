//! Common traits for the priority queues in this crate
//!
//! [`Heap`] is the interface shared by [`RadixHeap`](crate::radix::RadixHeap)
//! and the comparison-based [`SimpleBinaryHeap`](crate::simple_binary::SimpleBinaryHeap),
//! so that algorithms such as the ones in [`pathfinding`](crate::pathfinding)
//! can be written once and run against either.

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HeapError {
    /// The heap holds no elements.
    #[error("heap is empty")]
    Empty,

    /// A priority below the last extracted minimum was pushed.
    ///
    /// Radix heaps bucket elements relative to the running minimum, so a
    /// smaller priority has no bucket it could legally live in.
    #[error("priority is below the last extracted minimum (monotone violation)")]
    MonotonicityViolation,
}

/// A handle to an element in a heap
///
/// Handles identify an element; they do not own it and grant no way to change
/// its priority. The exact representation varies by heap type.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use radix_heaps::Heap;
/// use radix_heaps::simple_binary::SimpleBinaryHeap;
///
/// let mut heap = SimpleBinaryHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    ///
    /// # Panics
    /// Monotone heaps panic when `priority` is below their running minimum.
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// Returns `None` on an empty heap. Elements sharing a priority come out
    /// in unspecified relative order.
    fn pop(&mut self) -> Option<(P, T)>;
}
