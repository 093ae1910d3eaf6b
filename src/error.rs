//! Error type for indexed heap operations
//!
//! Only contract violations are errors. Probing for an id that is not
//! queued, or asking to raise a priority through `decrease_priority`, is an
//! ordinary miss reported through `Option`/`bool`.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap holds no elements
    Empty,
    /// Every slot up to the fixed capacity is occupied
    Full {
        /// Capacity the heap was created with
        capacity: usize,
    },
    /// The id is already queued
    DuplicateId(usize),
    /// The id does not lie in `[0, capacity)`
    IdOutOfRange {
        /// The rejected id
        id: usize,
        /// Capacity the heap was created with
        capacity: usize,
    },
    /// Backing storage for the requested capacity could not be reserved
    CapacityOverflow,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::Full { capacity } => {
                write!(f, "heap is full (capacity {})", capacity)
            }
            HeapError::DuplicateId(id) => write!(f, "id {} is already in the heap", id),
            HeapError::IdOutOfRange { id, capacity } => {
                write!(f, "id {} is out of range for capacity {}", id, capacity)
            }
            HeapError::CapacityOverflow => {
                write!(f, "could not reserve storage for the requested capacity")
            }
        }
    }
}

impl std::error::Error for HeapError {}
