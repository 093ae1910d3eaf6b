//! Indexed Binary Min-Heap for Rust
//!
//! This crate provides a fixed-capacity binary min-heap over integer ids with
//! an id -> position map, so the priority of an already-queued element can be
//! lowered in O(log n) without knowing where it sits in the heap.
//!
//! # Features
//!
//! - **[`IndexedBinaryHeap`]**: O(log n) insert, extract-min and decrease-priority; O(1) peek and membership
//! - **[`pathfinding`]**: Dijkstra, A* and bounded reachability over dense integer graphs, driven by the heap
//!
//! Contract violations (empty extraction, full or duplicate insertion,
//! out-of-range ids) are reported as [`HeapError`]; the heap is never left
//! half-updated.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heap::{HeapError, IndexedBinaryHeap};
//!
//! let mut heap = IndexedBinaryHeap::new(5);
//! heap.insert(10, 0).unwrap();
//! heap.insert(5, 1).unwrap();
//! heap.insert(20, 2).unwrap();
//!
//! assert_eq!(heap.extract_min().unwrap().id, 1);
//! assert_eq!(heap.extract_min().unwrap().id, 0);
//! assert_eq!(heap.insert(1, 7), Err(HeapError::IdOutOfRange { id: 7, capacity: 5 }));
//! ```

pub mod error;
pub mod indexed_binary;
pub mod pathfinding;

pub use error::HeapError;
pub use indexed_binary::{HeapDump, HeapNode, IndexedBinaryHeap};
