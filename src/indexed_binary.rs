//! Indexed Binary Min-Heap
//!
//! A binary min-heap over integer ids that keeps a second array mapping each
//! id to its current position in the heap. The map lets
//! [`decrease_priority`](IndexedBinaryHeap::decrease_priority) find an element
//! by id in O(1) and restore the heap property in O(log n), which is what
//! shortest-path relaxation needs.
//!
//! Positions are 1-based: the root lives at position 1, the children of `p`
//! at `2p` and `2p + 1`. Ids must lie in `[0, capacity)` and are unique while
//! queued. Capacity is fixed at construction.
//!
//! # Time Complexity
//!
//! | Operation           | Complexity |
//! |---------------------|------------|
//! | `insert`            | O(log n)   |
//! | `extract_min`       | O(log n)   |
//! | `decrease_priority` | O(log n)   |
//! | `peek_min`          | O(1)       |
//! | `contains`          | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heap::IndexedBinaryHeap;
//!
//! let mut heap = IndexedBinaryHeap::new(3);
//! heap.insert(7, 0).unwrap();
//! heap.insert(3, 1).unwrap();
//! heap.insert(9, 2).unwrap();
//!
//! assert!(heap.decrease_priority(2, 1));
//! assert!(!heap.decrease_priority(0, 8)); // never increases
//!
//! let min = heap.extract_min().unwrap();
//! assert_eq!((min.id, min.priority), (2, 1));
//! assert!(!heap.contains(2));
//! ```

use std::fmt;

use log::{debug, trace};

use crate::error::HeapError;

const ROOT: usize = 1;

/// One queued element: an id and its current priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeapNode<P> {
    /// Caller-assigned id in `[0, capacity)`
    pub id: usize,
    /// Ordering key; smaller is extracted first
    pub priority: P,
}

/// A fixed-capacity binary min-heap addressable by element id
#[derive(Debug, Clone)]
pub struct IndexedBinaryHeap<P> {
    /// Occupied positions `1..=len`; position `p` is stored at `nodes[p - 1]`
    nodes: Vec<HeapNode<P>>,
    /// id -> current position, `None` while the id is not queued
    positions: Vec<Option<usize>>,
}

impl<P: Ord> IndexedBinaryHeap<P> {
    /// Creates an empty heap accepting ids in `[0, capacity)`
    ///
    /// Both backing arrays are allocated up front; the heap never grows.
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            positions: vec![None; capacity],
        }
    }

    /// Creates an empty heap, reporting allocation failure instead of aborting
    ///
    /// # Errors
    /// Returns [`HeapError::CapacityOverflow`] if storage for `capacity`
    /// nodes cannot be reserved.
    pub fn try_new(capacity: usize) -> Result<Self, HeapError> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(capacity)
            .map_err(|_| HeapError::CapacityOverflow)?;
        let mut positions = Vec::new();
        positions
            .try_reserve_exact(capacity)
            .map_err(|_| HeapError::CapacityOverflow)?;
        positions.resize(capacity, None);
        Ok(Self { nodes, positions })
    }

    /// Returns the number of queued elements
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no element is queued
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the fixed capacity; valid ids are `0..capacity()`
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if `id` is currently queued
    ///
    /// Out-of-range ids are simply not present.
    pub fn contains(&self, id: usize) -> bool {
        self.position_of(id).is_some()
    }

    /// Returns the current position of `id`, if queued
    pub fn position_of(&self, id: usize) -> Option<usize> {
        self.positions.get(id).copied().flatten()
    }

    /// Returns the node stored at `position`, if occupied
    pub fn node_at(&self, position: usize) -> Option<&HeapNode<P>> {
        if self.is_valid_position(position) {
            Some(&self.nodes[position - 1])
        } else {
            None
        }
    }

    /// Returns the priority stored at `position`, if occupied
    pub fn priority_at(&self, position: usize) -> Option<&P> {
        self.node_at(position).map(|node| &node.priority)
    }

    /// Returns the id stored at `position`, if occupied
    pub fn id_at(&self, position: usize) -> Option<usize> {
        self.node_at(position).map(|node| node.id)
    }

    /// Returns the current priority of `id`, if queued
    pub fn priority_of(&self, id: usize) -> Option<&P> {
        self.position_of(id).and_then(|p| self.priority_at(p))
    }

    /// Returns the minimum node without removing it
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if no element is queued.
    pub fn peek_min(&self) -> Result<&HeapNode<P>, HeapError> {
        self.nodes.first().ok_or_else(|| {
            debug!("peek_min rejected: heap is empty");
            HeapError::Empty
        })
    }

    /// Iterates over the queued nodes in position order (root first)
    pub fn iter(&self) -> std::slice::Iter<'_, HeapNode<P>> {
        self.nodes.iter()
    }

    /// Queues `id` with `priority`
    ///
    /// The request is validated before anything is touched: the id must be
    /// in range, the heap must have a free slot, and the id must not already
    /// be queued.
    ///
    /// # Errors
    /// - [`HeapError::IdOutOfRange`] if `id >= capacity()`
    /// - [`HeapError::Full`] if `len() == capacity()`
    /// - [`HeapError::DuplicateId`] if `id` is already queued
    pub fn insert(&mut self, priority: P, id: usize) -> Result<(), HeapError> {
        let capacity = self.capacity();
        if id >= capacity {
            debug!("insert rejected: id {} out of range for capacity {}", id, capacity);
            return Err(HeapError::IdOutOfRange { id, capacity });
        }
        if self.nodes.len() == capacity {
            debug!("insert rejected: heap full at capacity {}", capacity);
            return Err(HeapError::Full { capacity });
        }
        if self.positions[id].is_some() {
            debug!("insert rejected: id {} already queued", id);
            return Err(HeapError::DuplicateId(id));
        }

        self.nodes.push(HeapNode { id, priority });
        let position = self.nodes.len();
        self.positions[id] = Some(position);
        self.bubble_up(position);
        Ok(())
    }

    /// Removes and returns the minimum node
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if no element is queued; the heap is left
    /// untouched.
    pub fn extract_min(&mut self) -> Result<HeapNode<P>, HeapError> {
        if self.nodes.is_empty() {
            debug!("extract_min rejected: heap is empty");
            return Err(HeapError::Empty);
        }

        let last = self.nodes.len();
        self.swap(ROOT, last);
        let min = self.nodes.pop().ok_or(HeapError::Empty)?;
        self.positions[min.id] = None;
        self.bubble_down(ROOT);

        trace!("extract_min: id {} (remaining {})", min.id, self.nodes.len());
        Ok(min)
    }

    /// Lowers the priority of a queued id
    ///
    /// Returns `true` if the priority was changed. Returns `false` without
    /// touching the heap when `id` is not queued or `new_priority` is not
    /// strictly smaller than the current one; this entry point never raises
    /// a priority.
    pub fn decrease_priority(&mut self, id: usize, new_priority: P) -> bool {
        let Some(position) = self.position_of(id) else {
            return false;
        };

        let node = &mut self.nodes[position - 1];
        if new_priority >= node.priority {
            return false;
        }
        node.priority = new_priority;
        self.bubble_up(position);

        trace!("decrease_priority: id {} moved from position {}", id, position);
        true
    }

    /// Removes every element, keeping the capacity
    pub fn clear(&mut self) {
        for node in self.nodes.drain(..) {
            self.positions[node.id] = None;
        }
    }

    /// Returns a printable table of positions and of the id -> position map
    pub fn dump(&self) -> HeapDump<'_, P> {
        HeapDump { heap: self }
    }

    // ------------------------------------------------------------------
    // Position arithmetic
    // ------------------------------------------------------------------

    fn is_valid_position(&self, position: usize) -> bool {
        position >= ROOT && position <= self.nodes.len()
    }

    fn left_child(&self, position: usize) -> Option<usize> {
        let child = 2 * position;
        self.is_valid_position(child).then_some(child)
    }

    fn right_child(&self, position: usize) -> Option<usize> {
        let child = 2 * position + 1;
        self.is_valid_position(child).then_some(child)
    }

    fn parent(&self, position: usize) -> Option<usize> {
        let parent = position / 2;
        self.is_valid_position(parent).then_some(parent)
    }

    fn priority_unchecked(&self, position: usize) -> &P {
        debug_assert!(self.is_valid_position(position));
        &self.nodes[position - 1].priority
    }

    // ------------------------------------------------------------------
    // Rebalancing
    // ------------------------------------------------------------------

    /// Exchanges two occupied positions and re-points both ids
    ///
    /// Every structural move goes through here so the id map can never
    /// drift from the node array. No effect if either position is invalid.
    fn swap(&mut self, a: usize, b: usize) {
        if !self.is_valid_position(a) || !self.is_valid_position(b) {
            return;
        }
        self.nodes.swap(a - 1, b - 1);
        self.positions[self.nodes[a - 1].id] = Some(a);
        self.positions[self.nodes[b - 1].id] = Some(b);
    }

    /// Moves the node at `position` toward the root while it beats its parent
    fn bubble_up(&mut self, mut position: usize) {
        while let Some(parent) = self.parent(position) {
            if self.priority_unchecked(position) < self.priority_unchecked(parent) {
                self.swap(position, parent);
                position = parent;
            } else {
                break;
            }
        }
    }

    /// Moves the node at `position` toward the leaves while a child beats it
    ///
    /// The smaller child is chosen; on equal children the left one wins.
    fn bubble_down(&mut self, mut position: usize) {
        loop {
            let smaller = match (self.left_child(position), self.right_child(position)) {
                (None, None) => break,
                (Some(child), None) | (None, Some(child)) => child,
                (Some(left), Some(right)) => {
                    if self.priority_unchecked(right) < self.priority_unchecked(left) {
                        right
                    } else {
                        left
                    }
                }
            };

            if self.priority_unchecked(position) > self.priority_unchecked(smaller) {
                self.swap(position, smaller);
                position = smaller;
            } else {
                break;
            }
        }
    }
}

/// Diagnostic view returned by [`IndexedBinaryHeap::dump`]
///
/// Each row shows one storage position (`position: priority [id]`, or
/// `position: - [-]` for unused slack) next to one entry of the id map
/// (`id: position`, or `id: -` when the id is not queued).
pub struct HeapDump<'a, P> {
    heap: &'a IndexedBinaryHeap<P>,
}

impl<P: Ord + fmt::Display> fmt::Display for HeapDump<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heap = self.heap;
        writeln!(f, "IndexedBinaryHeap with size: {}", heap.len())?;
        writeln!(f, "\tcapacity: {}", heap.capacity())?;
        writeln!(f)?;
        writeln!(f, "position: priority [id]\t id: position")?;

        for row in 0..heap.capacity() {
            let position = row + 1;
            match heap.node_at(position) {
                Some(node) => write!(f, "{}: {} [{}]", position, node.priority, node.id)?,
                None => write!(f, "{}: - [-]", position)?,
            }
            match heap.position_of(row) {
                Some(p) => writeln!(f, "\t\t{}: {}", row, p)?,
                None => writeln!(f, "\t\t{}: -", row)?,
            }
        }
        Ok(())
    }
}
