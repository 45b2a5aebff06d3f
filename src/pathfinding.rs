//! Dijkstra's and A* pathfinding over monotone priority queues
//!
//! This module provides generic implementations of Dijkstra's shortest path
//! algorithm and A* search, written against the [`Heap`] trait so that they run
//! on a [`RadixHeap`](crate::radix::RadixHeap) as well as on a comparison-based
//! heap.
//!
//! # Design
//!
//! The heaps in this crate have no `decrease_key`. When a shorter route to a
//! node still in the open set is found, the node is pushed again with its better
//! cost and the stale copy is skipped when it is eventually popped (lazy
//! deletion).
//!
//! Every priority pushed while expanding a node is at least the priority that
//! node was popped with, as long as edge costs are non-negative and (for A*)
//! the heuristic is consistent. That is exactly the monotone precondition of
//! the radix heap.
//!
//! Only lightweight indices are stored in the heap. A fast hash map (using
//! FxHash) maps node states to their index.
//!
//! # Example
//!
//! ```rust
//! use radix_heaps::pathfinding::{SearchNode, dijkstra};
//! use radix_heaps::radix::RadixHeap;
//!
//! // Node carries its goal coordinates
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         vec![
//!             (GridPos { x: self.x + 1, y: self.y, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!             (GridPos { x: self.x - 1, y: self.y, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!             (GridPos { x: self.x, y: self.y + 1, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!             (GridPos { x: self.x, y: self.y - 1, goal_x: self.goal_x, goal_y: self.goal_y }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//!
//! let (_path, cost) = dijkstra::<_, RadixHeap<_, _>>(&start).unwrap();
//! assert_eq!(cost, 4); // Manhattan distance
//! ```

use crate::traits::Heap;
use log::debug;
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` must be the zero cost.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate successors and to check
/// whether it is a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights (e.g., u32, u64)
    type Cost: Cost;

    /// Returns all successor nodes along with the (non-negative) cost to reach
    /// them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Trait for nodes that can provide a heuristic estimate for A* search.
///
/// The heuristic must be consistent: `h(n) <= cost(n, m) + h(m)` for every
/// edge `n -> m`. Consistency keeps f-scores non-decreasing along the search,
/// which a monotone heap requires; an inconsistent heuristic makes
/// [`RadixHeap`](crate::radix::RadixHeap) panic with a monotone violation.
pub trait AStarNode: SearchNode {
    /// Returns a heuristic estimate of the cost from this node to any goal.
    fn heuristic(&self) -> Self::Cost;
}

/// Internal index type for the node table.
/// We store these lightweight indices in the heap instead of full node data.
type NodeIndex = usize;

/// Metadata stored for each discovered node during search.
struct NodeEntry<N: SearchNode> {
    node: N,
    /// Best known cost from start (g-score)
    g_score: N::Cost,
    /// Previous node in the path (for reconstruction)
    came_from: Option<NodeIndex>,
    /// Whether this node has been fully processed
    closed: bool,
}

/// Open/closed set bookkeeping shared by the searches.
struct PathFinder<N: SearchNode> {
    nodes: Vec<NodeEntry<N>>,
    state_to_index: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode> PathFinder<N> {
    fn new() -> Self {
        PathFinder {
            nodes: Vec::new(),
            state_to_index: FxHashMap::default(),
        }
    }

    /// Gets or creates an index for a node state.
    fn get_or_create_index(&mut self, node: N, g_score: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.state_to_index.get(&node) {
            (index, false)
        } else {
            let index = self.nodes.len();
            self.state_to_index.insert(node.clone(), index);
            self.nodes.push(NodeEntry {
                node,
                g_score,
                came_from: None,
                closed: false,
            });
            (index, true)
        }
    }

    /// Reconstructs the path from start to the given node index.
    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = Vec::new();

        loop {
            let entry = &self.nodes[current];
            path.push(entry.node.clone());

            match entry.came_from {
                Some(prev) => current = prev,
                None => break,
            }
        }

        path.reverse();
        path
    }

    /// Records a route to `neighbor` and returns its index if it should be
    /// (re)pushed onto the open set.
    fn relax(&mut self, from: NodeIndex, neighbor: N, tentative_g: N::Cost) -> Option<NodeIndex> {
        let (index, is_new) = self.get_or_create_index(neighbor, tentative_g);
        let entry = &mut self.nodes[index];

        if entry.closed {
            return None;
        }
        if is_new || tentative_g < entry.g_score {
            entry.g_score = tentative_g;
            entry.came_from = Some(from);
            Some(index)
        } else {
            None
        }
    }
}

/// Runs Dijkstra's algorithm from the start node until `is_goal()` returns true.
///
/// # Type Parameters
/// - `N`: The node type implementing [`SearchNode`]
/// - `H`: The heap type implementing [`Heap`]
///
/// # Returns
/// - `Some((path, cost))` if a path is found
/// - `None` if no path exists
///
/// # Example
/// ```rust
/// use radix_heaps::pathfinding::{SearchNode, dijkstra};
/// use radix_heaps::radix::RadixHeap;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// struct Node {
///     value: i32,
///     goal: i32,
/// }
///
/// impl SearchNode for Node {
///     type Cost = u32;
///
///     fn successors(&self) -> Vec<(Self, u32)> {
///         if self.value < 100 {
///             vec![(Node { value: self.value + 1, goal: self.goal }, 1)]
///         } else {
///             vec![]
///         }
///     }
///
///     fn is_goal(&self) -> bool {
///         self.value == self.goal
///     }
/// }
///
/// let start = Node { value: 0, goal: 5 };
/// let (path, cost) = dijkstra::<_, RadixHeap<_, _>>(&start).unwrap();
/// assert_eq!(cost, 5);
/// assert_eq!(path.len(), 6);
/// ```
pub fn dijkstra<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: Heap<NodeIndex, N::Cost>,
{
    PathFinderBuilder::new(start.clone()).dijkstra::<H>()
}

/// Runs A* search from the start node until `is_goal()` returns true.
///
/// Uses the node's `heuristic()` method to guide the search.
pub fn astar<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: AStarNode,
    H: Heap<NodeIndex, N::Cost>,
{
    PathFinderBuilder::new(start.clone()).astar::<H>()
}

/// Builder for pathfinding queries with more configuration options.
///
/// Provides a fluent API for configuring and running pathfinding searches.
/// The node type's `is_goal()` method determines when to stop.
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    max_cost: Option<N::Cost>,
    max_nodes: Option<usize>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Creates a new builder starting from the given node.
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            max_cost: None,
            max_nodes: None,
        }
    }

    /// Sets the maximum cost to explore.
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.max_cost = Some(cost);
        self
    }

    /// Sets the maximum number of heap pops before giving up.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured settings.
    pub fn dijkstra<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        H: Heap<NodeIndex, N::Cost>,
    {
        self.search_with_heuristic::<H>(|_| N::Cost::default())
    }

    /// Runs A* search with the configured settings.
    pub fn astar<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        N: AStarNode,
        H: Heap<NodeIndex, N::Cost>,
    {
        self.search_with_heuristic::<H>(|n| n.heuristic())
    }

    fn search_with_heuristic<H>(self, heuristic: impl Fn(&N) -> N::Cost) -> Option<(Vec<N>, N::Cost)>
    where
        H: Heap<NodeIndex, N::Cost>,
    {
        let within_budget = |cost: N::Cost| self.max_cost.map_or(true, |max| cost <= max);
        let mut nodes_explored = 0usize;

        let mut heap = H::new();
        let mut finder: PathFinder<N> = PathFinder::new();

        let (start_index, _) = finder.get_or_create_index(self.start.clone(), N::Cost::default());
        heap.push(heuristic(&self.start), start_index);

        while let Some((_, current_index)) = heap.pop() {
            if let Some(max) = self.max_nodes {
                if nodes_explored >= max {
                    debug!("search stopped after {nodes_explored} pops (node limit)");
                    return None;
                }
            }
            nodes_explored += 1;

            let current_entry = &mut finder.nodes[current_index];
            if current_entry.closed {
                continue;
            }
            current_entry.closed = true;

            let current_node = current_entry.node.clone();
            let current_g = current_entry.g_score;

            if !within_budget(current_g) {
                continue;
            }

            if current_node.is_goal() {
                debug!(
                    "goal reached after {nodes_explored} pops, {} nodes discovered",
                    finder.nodes.len()
                );
                let path = finder.reconstruct_path(current_index);
                return Some((path, current_g));
            }

            for (neighbor, edge_cost) in current_node.successors() {
                let tentative_g = current_g + edge_cost;
                if !within_budget(tentative_g) {
                    continue;
                }

                let f = tentative_g + heuristic(&neighbor);
                if let Some(index) = finder.relax(current_index, neighbor, tentative_g) {
                    heap.push(f, index);
                }
            }
        }

        debug!(
            "search exhausted after {nodes_explored} pops, {} nodes discovered",
            finder.nodes.len()
        );
        None
    }
}

/// Returns all nodes reachable from the start within a given cost budget,
/// in non-decreasing order of cost.
///
/// This is useful for "what's nearby" queries.
pub fn reachable_within<N, H>(start: &N, max_cost: N::Cost) -> Vec<(N, N::Cost)>
where
    N: SearchNode,
    H: Heap<NodeIndex, N::Cost>,
{
    let mut heap = H::new();
    let mut finder: PathFinder<N> = PathFinder::new();
    let mut result = Vec::new();

    let (start_index, _) = finder.get_or_create_index(start.clone(), N::Cost::default());
    heap.push(N::Cost::default(), start_index);

    while let Some((current_g, current_index)) = heap.pop() {
        let current_entry = &mut finder.nodes[current_index];
        if current_entry.closed {
            continue;
        }
        current_entry.closed = true;

        let current_node = current_entry.node.clone();
        result.push((current_node.clone(), current_g));

        for (neighbor, edge_cost) in current_node.successors() {
            let tentative_g = current_g + edge_cost;
            if tentative_g > max_cost {
                continue;
            }
            if let Some(index) = finder.relax(current_index, neighbor, tentative_g) {
                heap.push(tentative_g, index);
            }
        }
    }

    result
}
