//! Dijkstra and A* search over dense integer graphs
//!
//! Nodes are ids in `0..num_nodes`, which is exactly the id space of an
//! [`IndexedBinaryHeap`]. Each search owns one heap sized to the graph, inserts
//! a node the first time it is reached and lowers its priority with
//! [`decrease_priority`](IndexedBinaryHeap::decrease_priority) whenever a
//! cheaper route shows up, so every node is queued at most once.
//!
//! Note: Dijkstra and A* are the same algorithm - A* just adds a heuristic to
//! guide the search. [`shortest_path`] is [`astar`] with h(n) = 0.
//!
//! Edge costs must be non-negative.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heap::pathfinding::{dijkstra, shortest_path, Graph};
//!
//! //   0 --2-- 1 --1-- 3 --4-- 4
//! //   |                       |
//! //   +--10-- 2 ------0-------+
//! let mut graph = Graph::new(5);
//! graph.add_undirected_edge(0, 1, 2u32).unwrap();
//! graph.add_undirected_edge(0, 2, 10).unwrap();
//! graph.add_undirected_edge(1, 3, 1).unwrap();
//! graph.add_undirected_edge(3, 4, 4).unwrap();
//! graph.add_undirected_edge(2, 4, 0).unwrap();
//!
//! let paths = dijkstra(&graph, 0).unwrap();
//! assert_eq!(paths.distance_to(4), Some(7));
//! assert_eq!(paths.path_to(4), Some(vec![0, 1, 3, 4]));
//!
//! let (path, cost) = shortest_path(&graph, 0, 2).unwrap().unwrap();
//! assert_eq!(cost, 7);
//! assert_eq!(path, vec![0, 1, 3, 4, 2]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use log::trace;

use crate::error::HeapError;
use crate::indexed_binary::{HeapNode, IndexedBinaryHeap};

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` must be the zero cost.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Error type for graph construction and search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// A node id does not lie in `[0, num_nodes)`
    NodeOutOfRange {
        /// The rejected node id
        node: usize,
        /// Number of nodes in the graph
        num_nodes: usize,
    },
    /// The open set rejected an operation
    Heap(HeapError),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::NodeOutOfRange { node, num_nodes } => {
                write!(f, "node {} is out of range for a graph of {} nodes", node, num_nodes)
            }
            PathError::Heap(err) => write!(f, "open set error: {}", err),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::Heap(err) => Some(err),
            PathError::NodeOutOfRange { .. } => None,
        }
    }
}

impl From<HeapError> for PathError {
    fn from(err: HeapError) -> Self {
        PathError::Heap(err)
    }
}

/// Directed weighted graph stored as an adjacency list
#[derive(Debug, Clone, Default)]
pub struct Graph<C> {
    /// node -> [(neighbor, cost), ...]
    adjacency: Vec<Vec<(usize, C)>>,
}

impl<C: Cost> Graph<C> {
    /// Creates a graph with nodes `0..num_nodes` and no edges
    pub fn new(num_nodes: usize) -> Self {
        Graph {
            adjacency: (0..num_nodes).map(|_| Vec::new()).collect(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Adds a directed edge `from -> to`
    pub fn add_edge(&mut self, from: usize, to: usize, cost: C) -> Result<(), PathError> {
        self.check_node(from)?;
        self.check_node(to)?;
        self.adjacency[from].push((to, cost));
        Ok(())
    }

    /// Adds edges in both directions
    pub fn add_undirected_edge(&mut self, a: usize, b: usize, cost: C) -> Result<(), PathError> {
        self.add_edge(a, b, cost)?;
        self.add_edge(b, a, cost)
    }

    /// Outgoing edges of `node`; empty for unknown nodes
    pub fn neighbors(&self, node: usize) -> &[(usize, C)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn check_node(&self, node: usize) -> Result<(), PathError> {
        if node < self.num_nodes() {
            Ok(())
        } else {
            Err(PathError::NodeOutOfRange {
                node,
                num_nodes: self.num_nodes(),
            })
        }
    }
}

/// A wrapper for costs in the heap that orders by f-score.
///
/// Lower costs have higher priority (min-heap behavior).
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// The f-score: g + h (where h=0 for Dijkstra)
    pub f_score: C,
    /// The actual cost from start (g-score)
    pub g_score: C,
}

impl<C: Ord> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: Ord> Eq for PriorityCost<C> {}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score.cmp(&other.f_score)
    }
}

/// Single-source result of [`dijkstra`]
#[derive(Debug, Clone)]
pub struct ShortestPaths<C> {
    source: usize,
    distances: Vec<Option<C>>,
    predecessors: Vec<Option<usize>>,
}

impl<C: Cost> ShortestPaths<C> {
    pub fn source(&self) -> usize {
        self.source
    }

    /// Cost of the cheapest route from the source, `None` if unreachable
    pub fn distance_to(&self, target: usize) -> Option<C> {
        self.distances.get(target).copied().flatten()
    }

    /// Nodes on the cheapest route from the source to `target`, inclusive
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.distance_to(target)?;
        Some(reconstruct_path(&self.predecessors, target))
    }

    /// Number of nodes reachable from the source, the source included
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }
}

/// Per-node search state shared by every search in this module
struct SearchState<C> {
    g_scores: Vec<Option<C>>,
    came_from: Vec<Option<usize>>,
    closed: Vec<bool>,
}

impl<C: Cost> SearchState<C> {
    fn new(num_nodes: usize) -> Self {
        SearchState {
            g_scores: vec![None; num_nodes],
            came_from: vec![None; num_nodes],
            closed: vec![false; num_nodes],
        }
    }

    /// Records a route to `node` if it is the first or a strictly cheaper one
    fn improve(&mut self, node: usize, via: Option<usize>, g: C) -> bool {
        match self.g_scores[node] {
            Some(existing) if existing <= g => false,
            _ => {
                self.g_scores[node] = Some(g);
                self.came_from[node] = via;
                true
            }
        }
    }
}

fn reconstruct_path(came_from: &[Option<usize>], target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut current = target;
    while let Some(previous) = came_from[current] {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// Computes the cheapest cost from `source` to every reachable node.
///
/// # Errors
/// Returns [`PathError::NodeOutOfRange`] if `source` is not a node of `graph`.
pub fn dijkstra<C: Cost>(graph: &Graph<C>, source: usize) -> Result<ShortestPaths<C>, PathError> {
    graph.check_node(source)?;
    let num_nodes = graph.num_nodes();
    let mut heap = IndexedBinaryHeap::new(num_nodes);
    let mut state = SearchState::new(num_nodes);

    state.improve(source, None, C::default());
    heap.insert(C::default(), source)?;

    while !heap.is_empty() {
        let HeapNode { id: current, priority: current_g } = heap.extract_min()?;
        state.closed[current] = true;

        for &(neighbor, edge_cost) in graph.neighbors(current) {
            if state.closed[neighbor] {
                continue;
            }
            let tentative_g = current_g + edge_cost;
            if !state.improve(neighbor, Some(current), tentative_g) {
                continue;
            }
            if !heap.decrease_priority(neighbor, tentative_g) {
                heap.insert(tentative_g, neighbor)?;
            }
        }
    }

    let paths = ShortestPaths {
        source,
        distances: state.g_scores,
        predecessors: state.came_from,
    };
    trace!(
        "dijkstra from {}: {} of {} nodes reachable",
        source,
        paths.reachable_count(),
        num_nodes
    );
    Ok(paths)
}

/// Runs A* search from `source` until `target` is settled.
///
/// `heuristic(node)` estimates the remaining cost to `target`. It must be
/// consistent (never larger than an edge cost plus the estimate at the edge's
/// far end) for the returned path to be optimal, since settled nodes are
/// never reopened.
///
/// # Returns
/// - `Ok(Some((path, cost)))` if `target` is reachable
/// - `Ok(None)` if no path exists
///
/// # Errors
/// Returns [`PathError::NodeOutOfRange`] if either endpoint is not a node of
/// `graph`.
pub fn astar<C, F>(
    graph: &Graph<C>,
    source: usize,
    target: usize,
    heuristic: F,
) -> Result<Option<(Vec<usize>, C)>, PathError>
where
    C: Cost,
    F: Fn(usize) -> C,
{
    graph.check_node(source)?;
    graph.check_node(target)?;
    let num_nodes = graph.num_nodes();
    let mut heap: IndexedBinaryHeap<PriorityCost<C>> = IndexedBinaryHeap::new(num_nodes);
    let mut state = SearchState::new(num_nodes);

    state.improve(source, None, C::default());
    heap.insert(
        PriorityCost {
            f_score: heuristic(source),
            g_score: C::default(),
        },
        source,
    )?;

    let mut settled = 0usize;
    while !heap.is_empty() {
        let HeapNode { id: current, priority } = heap.extract_min()?;
        state.closed[current] = true;
        settled += 1;

        if current == target {
            trace!("astar {} -> {}: settled {} nodes", source, target, settled);
            let path = reconstruct_path(&state.came_from, target);
            return Ok(Some((path, priority.g_score)));
        }

        for &(neighbor, edge_cost) in graph.neighbors(current) {
            if state.closed[neighbor] {
                continue;
            }
            let tentative_g = priority.g_score + edge_cost;
            if !state.improve(neighbor, Some(current), tentative_g) {
                continue;
            }
            let new_priority = PriorityCost {
                f_score: tentative_g + heuristic(neighbor),
                g_score: tentative_g,
            };
            if !heap.decrease_priority(neighbor, new_priority) {
                heap.insert(new_priority, neighbor)?;
            }
        }
    }

    trace!("astar {} -> {}: unreachable after {} nodes", source, target, settled);
    Ok(None)
}

/// Cheapest path from `source` to `target`; [`astar`] with a zero heuristic.
pub fn shortest_path<C: Cost>(
    graph: &Graph<C>,
    source: usize,
    target: usize,
) -> Result<Option<(Vec<usize>, C)>, PathError> {
    astar(graph, source, target, |_| C::default())
}

/// Returns all nodes reachable from `source` within a given cost budget.
///
/// Nodes come back in the order they are settled, so costs are
/// non-decreasing.
pub fn reachable_within<C: Cost>(
    graph: &Graph<C>,
    source: usize,
    max_cost: C,
) -> Result<Vec<(usize, C)>, PathError> {
    graph.check_node(source)?;
    let num_nodes = graph.num_nodes();
    let mut heap = IndexedBinaryHeap::new(num_nodes);
    let mut state = SearchState::new(num_nodes);
    let mut result = Vec::new();

    if C::default() > max_cost {
        return Ok(result);
    }
    state.improve(source, None, C::default());
    heap.insert(C::default(), source)?;

    while !heap.is_empty() {
        let HeapNode { id: current, priority: current_g } = heap.extract_min()?;
        state.closed[current] = true;
        result.push((current, current_g));

        for &(neighbor, edge_cost) in graph.neighbors(current) {
            let tentative_g = current_g + edge_cost;
            if state.closed[neighbor] || tentative_g > max_cost {
                continue;
            }
            if !state.improve(neighbor, Some(current), tentative_g) {
                continue;
            }
            if !heap.decrease_priority(neighbor, tentative_g) {
                heap.insert(tentative_g, neighbor)?;
            }
        }
    }

    Ok(result)
}
