//! Radix Heap implementation
//!
//! A monotone priority queue for fixed-width unsigned integer priorities.
//!
//! # Monotone Property
//!
//! A radix heap is a **monotone priority queue**: you cannot insert an element with
//! a priority smaller than the last extracted minimum. This constraint is naturally
//! satisfied by Dijkstra's algorithm with non-negative edge weights, since relaxed
//! distances are always `>= d[u]` where `d[u]` is the distance of the node just extracted.
//!
//! Pushing below the floor is rejected: [`RadixHeap::try_push`] returns
//! [`HeapError::MonotonicityViolation`] and the panicking variants panic with the
//! same message. The heap is left untouched in both cases.
//!
//! # Buckets
//!
//! With `W = P::BITS`, the heap keeps `W + 1` buckets. An element with priority
//! `p` lives in bucket `bit_length(p ^ minimum)`:
//!
//! - bucket 0 holds the elements equal to the running minimum
//! - bucket `i > 0` holds the elements whose highest bit differing from the
//!   minimum is bit `i - 1`
//!
//! A bitmask with one bit per non-zero bucket finds the lowest occupied bucket
//! with a single leading-zero count.
//!
//! Popping from bucket 0 is O(1). Otherwise the lowest occupied bucket is
//! scanned for its minimum, that element becomes the new floor, and every other
//! element of the bucket is relinked relative to it. Each relinked element lands
//! in a strictly lower bucket, so an element moves at most `W` times over its
//! lifetime.
//!
//! # Time Complexity
//!
//! | Operation | Complexity       |
//! |-----------|------------------|
//! | `push`    | O(1)             |
//! | `pop`     | O(W) amortized   |
//! | `peek`    | O(1) / O(k)*     |
//! | `len`     | O(1)             |
//!
//! *O(1) when bucket 0 is occupied, otherwise a scan of the `k` elements in
//! the lowest occupied bucket.
//!
//! # Storage
//!
//! Nodes live in a [`slotmap::SlotMap`] arena and each bucket is a doubly linked
//! list threaded through it by key. Popped slots are recycled by the arena's free
//! list, and the slot version doubles as a generation counter: a
//! [`RadixHandle`] to a popped element stays detectably stale even after its slot
//! is reused.
//!
//! # References
//!
//! - Ahuja, R. K., Mehlhorn, K., Orlin, J. B., & Tarjan, R. E. (1990).
//!   "Faster algorithms for the shortest path problem."
//!   *Journal of the ACM*, 37(2), 213-223.
//!
//! # Example
//!
//! ```rust
//! use radix_heaps::Heap;
//! use radix_heaps::radix::RadixHeap;
//!
//! let mut heap: RadixHeap<&str, u32> = RadixHeap::new();
//! let ten = heap.push_with_handle(10, "ten");
//! heap.push(5, "five");
//!
//! assert_eq!(heap.peek(), Some((&5, &"five")));
//! assert_eq!(heap.pop(), Some((5, "five")));
//! assert_eq!(heap.minimum(), 5);
//!
//! assert!(heap.contains(&ten));
//! assert_eq!(heap.pop(), Some((10, "ten")));
//! assert!(!heap.contains(&ten));
//! assert!(heap.is_empty());
//! ```

use crate::bits::{msb_set, RadixKey};
use crate::traits::{Handle, Heap, HeapError};
use log::trace;
use slotmap::{new_key_type, SlotMap};
use std::fmt;

new_key_type! {
    struct NodeKey;
}

/// Element of a bucket list
struct Node<V, P> {
    value: V,
    priority: P,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
}

/// Handle to an element in the radix heap
///
/// A handle identifies an element; it does not own it. It stops resolving as
/// soon as the element is popped or the heap is cleared, even if the arena slot
/// is later reused. Handles are only meaningful for the heap that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RadixHandle(NodeKey);

impl Handle for RadixHandle {}

/// A radix heap (monotone priority queue)
///
/// # Type Parameters
///
/// - `V`: The value type stored in the heap
/// - `P`: The priority type, must implement [`RadixKey`] (unsigned integers)
///
/// # Panics
///
/// - [`Heap::push`] and [`RadixHeap::push_with_handle`] panic if called with a
///   priority less than the last extracted minimum. Use
///   [`RadixHeap::try_push`] to get an error instead.
pub struct RadixHeap<V, P: RadixKey> {
    /// Arena owning every live node
    nodes: SlotMap<NodeKey, Node<V, P>>,

    /// Heads of the `P::BITS + 1` bucket lists
    buckets: Vec<Option<NodeKey>>,

    /// Bit `P::BITS - i` is set iff bucket `i` (for `i >= 1`) is non-empty
    bucket_mask: u128,

    /// The last extracted minimum (or 0 if nothing extracted yet)
    minimum: P,
}

impl<V, P: RadixKey> RadixHeap<V, P> {
    /// Creates an empty heap with room for `capacity` elements before the
    /// node arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        RadixHeap {
            nodes: SlotMap::with_capacity_and_key(capacity),
            buckets: vec![None; P::BITS as usize + 1],
            bucket_mask: 0,
            minimum: P::ZERO,
        }
    }

    /// The running minimum: priority of the last element popped through the
    /// redistribution path, or zero before that.
    ///
    /// Every element in the heap has a priority `>=` this value, and so must
    /// every element pushed from now on.
    #[inline]
    pub fn minimum(&self) -> P {
        self.minimum
    }

    /// Inserts an element, returning a handle that identifies it.
    ///
    /// # Errors
    /// [`HeapError::MonotonicityViolation`] if `priority < self.minimum()`.
    pub fn try_push(&mut self, priority: P, value: V) -> Result<RadixHandle, HeapError> {
        if priority < self.minimum {
            return Err(HeapError::MonotonicityViolation);
        }

        let key = self.nodes.insert(Node {
            value,
            priority,
            prev: None,
            next: None,
        });
        self.link(key);
        Ok(RadixHandle(key))
    }

    /// Inserts an element, returning a handle that identifies it.
    ///
    /// # Panics
    /// If `priority < self.minimum()`.
    pub fn push_with_handle(&mut self, priority: P, value: V) -> RadixHandle {
        match self.try_push(priority, value) {
            Ok(handle) => handle,
            Err(err) => panic!("RadixHeap: {err}"),
        }
    }

    /// Removes and returns the minimum priority and its value.
    ///
    /// # Errors
    /// [`HeapError::Empty`] if the heap holds no elements.
    pub fn try_pop(&mut self) -> Result<(P, V), HeapError> {
        self.extract_min().ok_or(HeapError::Empty)
    }

    /// Returns true if `handle` refers to an element still in the heap.
    pub fn contains(&self, handle: &RadixHandle) -> bool {
        self.nodes.contains_key(handle.0)
    }

    /// Priority and value of the element behind `handle`, if it is still in
    /// the heap.
    pub fn get(&self, handle: &RadixHandle) -> Option<(&P, &V)> {
        self.nodes
            .get(handle.0)
            .map(|node| (&node.priority, &node.value))
    }

    /// Drops every element and resets the running minimum to zero.
    ///
    /// Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.iter_mut().for_each(|head| *head = None);
        self.bucket_mask = 0;
        self.minimum = P::ZERO;
    }

    /// Compute the bucket index for a priority value.
    ///
    /// Returns 0 if priority == minimum, otherwise the bit length of
    /// `priority ^ minimum`.
    #[inline]
    fn bucket_index(&self, priority: P) -> usize {
        msb_set(priority.bitxor(self.minimum))
    }

    #[inline]
    fn mask_bit(index: usize) -> u128 {
        debug_assert!(index >= 1 && index <= P::BITS as usize);
        1u128 << (P::BITS as usize - index)
    }

    /// Lowest non-empty bucket above 0, found from the mask.
    #[inline]
    fn lowest_occupied_bucket(&self) -> Option<usize> {
        if self.bucket_mask == 0 {
            None
        } else {
            Some(P::BITS as usize + 1 - msb_set(self.bucket_mask))
        }
    }

    /// Links `key` at the head of the bucket its priority maps to.
    fn link(&mut self, key: NodeKey) {
        let index = self.bucket_index(self.nodes[key].priority);
        let head = self.buckets[index];

        let node = &mut self.nodes[key];
        node.prev = None;
        node.next = head;

        if let Some(head) = head {
            self.nodes[head].prev = Some(key);
        }
        self.buckets[index] = Some(key);

        if index != 0 {
            self.bucket_mask |= Self::mask_bit(index);
        }
    }

    /// Key of the smallest-priority node in the list starting at `head`.
    fn min_in_list(&self, head: NodeKey) -> NodeKey {
        let mut min_key = head;
        let mut min_priority = self.nodes[head].priority;
        let mut cursor = self.nodes[head].next;

        while let Some(key) = cursor {
            let node = &self.nodes[key];
            if node.priority < min_priority {
                min_key = key;
                min_priority = node.priority;
            }
            cursor = node.next;
        }

        min_key
    }

    fn extract_min(&mut self) -> Option<(P, V)> {
        if self.buckets[0].is_some() {
            self.pop_exact()
        } else {
            self.pop_redistribute()
        }
    }

    /// Pops the head of bucket 0. The running minimum is unchanged.
    fn pop_exact(&mut self) -> Option<(P, V)> {
        let key = self.buckets[0]?;
        let node = self.nodes.remove(key)?;

        self.buckets[0] = node.next;
        if let Some(next) = node.next {
            self.nodes[next].prev = None;
        }

        Some((node.priority, node.value))
    }

    /// Empties the lowest occupied bucket, pops its minimum and relinks the
    /// remaining nodes relative to the new running minimum.
    fn pop_redistribute(&mut self) -> Option<(P, V)> {
        let index = self.lowest_occupied_bucket()?;
        self.bucket_mask &= !Self::mask_bit(index);
        let head = self.buckets[index].take()?;

        let min_key = self.min_in_list(head);
        let min = self.nodes.remove(min_key)?;

        // Cut the minimum out of the detached list.
        if let Some(prev) = min.prev {
            self.nodes[prev].next = min.next;
        }
        if let Some(next) = min.next {
            self.nodes[next].prev = min.prev;
        }
        let rest = if min.prev.is_none() { min.next } else { Some(head) };

        self.minimum = min.priority;

        let mut moved = 0usize;
        let mut cursor = rest;
        while let Some(key) = cursor {
            cursor = self.nodes[key].next;
            self.link(key);
            moved += 1;
        }

        trace!(
            "radix heap: emptied bucket {index}, new minimum {:?}, relinked {moved} nodes",
            self.minimum
        );

        Some((min.priority, min.value))
    }
}

impl<V, P: RadixKey> Heap<V, P> for RadixHeap<V, P> {
    fn new() -> Self {
        Self::with_capacity(0)
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, priority: P, item: V) {
        self.push_with_handle(priority, item);
    }

    fn peek(&self) -> Option<(&P, &V)> {
        let key = match self.buckets[0] {
            Some(key) => key,
            None => {
                let index = self.lowest_occupied_bucket()?;
                self.min_in_list(self.buckets[index]?)
            }
        };
        let node = self.nodes.get(key)?;
        Some((&node.priority, &node.value))
    }

    fn pop(&mut self) -> Option<(P, V)> {
        self.extract_min()
    }
}

impl<V, P: RadixKey> Default for RadixHeap<V, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P: RadixKey> fmt::Debug for RadixHeap<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupied: Vec<usize> = self
            .buckets
            .iter()
            .enumerate()
            .filter_map(|(i, head)| head.map(|_| i))
            .collect();

        f.debug_struct("RadixHeap")
            .field("len", &self.nodes.len())
            .field("minimum", &self.minimum)
            .field("occupied_buckets", &occupied)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    impl<V, P: RadixKey> RadixHeap<V, P> {
        /// Walks every bucket and checks links, bucket placement, the mask and
        /// the node count.
        fn assert_invariants(&self) {
            let mut seen = 0;
            for (index, head) in self.buckets.iter().enumerate() {
                let mut prev = None;
                let mut cursor = *head;
                while let Some(key) = cursor {
                    let node = &self.nodes[key];
                    assert_eq!(node.prev, prev, "broken prev link in bucket {index}");
                    assert!(node.priority >= self.minimum);
                    assert_eq!(self.bucket_index(node.priority), index);
                    seen += 1;
                    prev = Some(key);
                    cursor = node.next;
                }
                if index > 0 {
                    let bit = self.bucket_mask & Self::mask_bit(index) != 0;
                    assert_eq!(bit, head.is_some(), "mask out of sync for bucket {index}");
                }
            }
            assert_eq!(seen, self.nodes.len());
        }
    }

    #[test]
    fn test_basic_operations() {
        let mut heap: RadixHeap<&str, u32> = RadixHeap::new();

        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.push(3, "three");
        heap.push(1, "one");
        heap.push(2, "two");
        heap.assert_invariants();

        assert!(!heap.is_empty());
        assert_eq!(heap.len(), 3);

        assert_eq!(heap.pop(), Some((1, "one")));
        assert_eq!(heap.pop(), Some((2, "two")));
        assert_eq!(heap.pop(), Some((3, "three")));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_ties_then_larger() {
        let mut heap: RadixHeap<&str, u32> = RadixHeap::new();

        heap.push(5, "a");
        heap.push(2, "b");
        heap.push(2, "c");
        assert_eq!(heap.len(), 3);

        let (p1, v1) = heap.pop().unwrap();
        assert_eq!(heap.len(), 2);
        let (p2, v2) = heap.pop().unwrap();
        assert_eq!(heap.len(), 1);

        assert_eq!((p1, p2), (2, 2));
        let mut pair = [v1, v2];
        pair.sort();
        assert_eq!(pair, ["b", "c"]);

        assert_eq!(heap.pop(), Some((5, "a")));
        assert_eq!(heap.len(), 0);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_increasing_priorities_stay_in_order() {
        let mut heap: RadixHeap<u32, u32> = RadixHeap::new();
        for p in 0..10 {
            heap.push(p, p * 100);
        }
        for p in 0..10 {
            assert_eq!(heap.pop(), Some((p, p * 100)));
            heap.assert_invariants();
        }
    }

    #[test]
    fn test_monotone_property() {
        let mut heap: RadixHeap<&str, u32> = RadixHeap::new();

        heap.push(10, "ten");
        heap.push(5, "five");

        assert_eq!(heap.pop(), Some((5, "five")));
        assert_eq!(heap.minimum(), 5);

        // Still fine: >= 5
        heap.push(7, "seven");
        heap.push(5, "five again");
        heap.assert_invariants();

        assert_eq!(heap.pop(), Some((5, "five again")));
        assert_eq!(heap.pop(), Some((7, "seven")));
        assert_eq!(heap.pop(), Some((10, "ten")));
    }

    #[test]
    #[should_panic(expected = "monotone violation")]
    fn test_monotone_violation_panics() {
        let mut heap: RadixHeap<&str, u32> = RadixHeap::new();

        heap.push(10, "ten");
        heap.push(12, "twelve");
        assert_eq!(heap.pop(), Some((10, "ten")));

        heap.push(5, "five");
    }

    #[test]
    fn test_try_push_rejects_without_mutation() {
        let mut heap: RadixHeap<&str, u32> = RadixHeap::new();
        heap.push(10, "ten");
        heap.push(20, "twenty");
        assert_eq!(heap.pop(), Some((10, "ten")));

        assert_eq!(
            heap.try_push(9, "nine"),
            Err(HeapError::MonotonicityViolation)
        );
        assert_eq!(heap.len(), 1);
        heap.assert_invariants();
        assert_eq!(heap.pop(), Some((20, "twenty")));
    }

    #[test]
    fn test_try_pop_empty() {
        let mut heap: RadixHeap<(), u64> = RadixHeap::new();
        assert_eq!(heap.try_pop(), Err(HeapError::Empty));
        heap.push(3, ());
        assert_eq!(heap.try_pop(), Ok((3, ())));
        assert_eq!(heap.try_pop(), Err(HeapError::Empty));
    }

    #[test]
    fn test_max_priority() {
        let mut heap: RadixHeap<&str, u64> = RadixHeap::new();
        heap.push(u64::MAX, "max");
        heap.assert_invariants();
        assert_eq!(heap.pop(), Some((u64::MAX, "max")));
        assert_eq!(heap.minimum(), u64::MAX);

        heap.push(u64::MAX, "again");
        assert_eq!(heap.pop(), Some((u64::MAX, "again")));
    }

    #[test]
    fn test_u128_extremes() {
        let mut heap: RadixHeap<u8, u128> = RadixHeap::new();
        heap.push(u128::MAX, 3);
        heap.push(1, 1);
        heap.push(1 << 127, 2);
        heap.assert_invariants();

        assert_eq!(heap.pop(), Some((1, 1)));
        assert_eq!(heap.pop(), Some((1 << 127, 2)));
        assert_eq!(heap.pop(), Some((u128::MAX, 3)));
    }

    #[test]
    fn test_redistribution_moves_to_lower_buckets() {
        let mut heap: RadixHeap<u32, u32> = RadixHeap::new();
        // All of these share bucket 7 relative to 0.
        for p in [100, 64, 127, 90, 64, 65] {
            heap.push(p, p);
        }
        assert_eq!(heap.lowest_occupied_bucket(), Some(7));

        assert_eq!(heap.pop().map(|(p, _)| p), Some(64));
        assert_eq!(heap.minimum(), 64);
        heap.assert_invariants();

        // The duplicate 64 is now an exact match.
        assert!(heap.buckets[0].is_some());
        for index in 7..=32 {
            assert!(heap.buckets[index].is_none());
        }

        let rest: Vec<u32> = std::iter::from_fn(|| heap.pop().map(|(p, _)| p)).collect();
        assert_eq!(rest, vec![64, 65, 90, 100, 127]);
    }

    #[test]
    fn test_peek_does_not_mutate() {
        let mut heap: RadixHeap<&str, u32> = RadixHeap::new();

        assert_eq!(heap.peek(), None);

        heap.push(5, "five");
        heap.push(3, "three");
        heap.push(7, "seven");

        assert_eq!(heap.peek(), Some((&3, &"three")));
        assert_eq!(heap.peek(), Some((&3, &"three")));
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.minimum(), 0);

        assert_eq!(heap.pop(), Some((3, "three")));
        assert_eq!(heap.peek(), Some((&5, &"five")));
    }

    #[test]
    fn test_handles_go_stale() {
        let mut heap: RadixHeap<&str, u32> = RadixHeap::new();
        let a = heap.push_with_handle(1, "a");
        let b = heap.push_with_handle(2, "b");
        assert_ne!(a, b);
        assert_eq!(heap.get(&a), Some((&1, &"a")));

        assert_eq!(heap.pop(), Some((1, "a")));
        assert!(!heap.contains(&a));
        assert_eq!(heap.get(&a), None);
        assert!(heap.contains(&b));

        // The freed slot gets reused; the old handle must not see the new node.
        let c = heap.push_with_handle(3, "c");
        assert_ne!(a, c);
        assert!(!heap.contains(&a));
        assert_eq!(heap.get(&c), Some((&3, &"c")));
    }

    #[test]
    fn test_clear_resets_floor() {
        let mut heap: RadixHeap<u32, u32> = RadixHeap::new();
        let handle = heap.push_with_handle(40, 1);
        heap.push(50, 2);
        heap.pop();
        assert_eq!(heap.minimum(), 40);

        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.minimum(), 0);
        assert!(!heap.contains(&handle));
        heap.assert_invariants();

        heap.push(1, 3);
        assert_eq!(heap.pop(), Some((1, 3)));
    }

    struct DropCounter(Rc<Cell<usize>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_drop_releases_every_value_once() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut heap: RadixHeap<DropCounter, u16> = RadixHeap::new();
            for p in [9, 3, 3, 700, 12, 0] {
                heap.push(p, DropCounter(Rc::clone(&drops)));
            }
            drop(heap.pop());
            drop(heap.pop());
            assert_eq!(drops.get(), 2);
        }
        assert_eq!(drops.get(), 6);
    }

    #[test]
    fn test_different_int_types() {
        let mut heap_u8: RadixHeap<&str, u8> = RadixHeap::new();
        heap_u8.push(5, "five");
        heap_u8.push(3, "three");
        heap_u8.push(u8::MAX, "max");
        assert_eq!(heap_u8.pop(), Some((3, "three")));
        assert_eq!(heap_u8.pop(), Some((5, "five")));
        assert_eq!(heap_u8.pop(), Some((u8::MAX, "max")));

        let mut heap_u64: RadixHeap<&str, u64> = RadixHeap::new();
        heap_u64.push(1_000_000_000_000, "trillion");
        heap_u64.push(1_000_000, "million");
        assert_eq!(heap_u64.pop(), Some((1_000_000, "million")));

        let mut heap_usize: RadixHeap<&str, usize> = RadixHeap::new();
        heap_usize.push(100, "hundred");
        heap_usize.push(10, "ten");
        assert_eq!(heap_usize.pop(), Some((10, "ten")));
    }

    #[test]
    fn test_debug_output() {
        let mut heap: RadixHeap<(), u32> = RadixHeap::new();
        heap.push(0, ());
        heap.push(4, ());
        let text = format!("{heap:?}");
        assert!(text.contains("len: 2"));
        assert!(text.contains("occupied_buckets: [0, 3]"));
    }
}
