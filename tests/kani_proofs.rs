//! Kani verification proofs for the indexed heap
//!
//! Kani is AWS's model checker for Rust. It can verify properties of Rust code
//! by checking all possible executions up to certain bounds.
//!
//! To run these proofs:
//!   cargo kani --tests

#[cfg(kani)]
use rust_indexed_heap::{HeapError, IndexedBinaryHeap};

#[cfg(kani)]
const CAPACITY: usize = 4;

/// Fill the heap with symbolic priorities for ids `0..count`
#[cfg(kani)]
fn symbolic_heap(count: usize) -> IndexedBinaryHeap<u8> {
    let mut heap = IndexedBinaryHeap::new(CAPACITY);
    for id in 0..count {
        let priority: u8 = kani::any();
        assert!(heap.insert(priority, id).is_ok());
    }
    heap
}

#[cfg(kani)]
fn assert_consistent(heap: &IndexedBinaryHeap<u8>) {
    for position in 2..=heap.len() {
        assert!(heap.priority_at(position) >= heap.priority_at(position / 2));
    }
    for position in 1..=heap.len() {
        let id = heap.id_at(position).unwrap();
        assert!(heap.position_of(id) == Some(position));
    }
}

/// Proof that insert keeps heap order and the id map for every priority choice
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_insert_preserves_invariants() {
    let heap = symbolic_heap(CAPACITY);
    assert!(heap.len() == CAPACITY);
    assert_consistent(&heap);
}

/// Proof that extract_min returns the smallest priority and drops the id
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_extract_min_is_minimum() {
    let mut heap = symbolic_heap(CAPACITY);
    let smallest = (0..CAPACITY)
        .filter_map(|id| heap.priority_of(id).copied())
        .min();

    let node = heap.extract_min().unwrap();
    assert!(Some(node.priority) == smallest);
    assert!(!heap.contains(node.id));
    assert!(heap.len() == CAPACITY - 1);
    assert_consistent(&heap);
}

/// Proof that decrease_priority never raises and always restores order
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_decrease_priority() {
    let mut heap = symbolic_heap(CAPACITY);
    let id: usize = kani::any();
    kani::assume(id < CAPACITY);
    let new_priority: u8 = kani::any();
    let old_priority = *heap.priority_of(id).unwrap();

    let applied = heap.decrease_priority(id, new_priority);
    assert!(applied == (new_priority < old_priority));
    let expected = if applied { new_priority } else { old_priority };
    assert!(heap.priority_of(id) == Some(&expected));
    assert_consistent(&heap);
}

/// Proof that empty extraction is reported, not fatal
#[cfg(kani)]
#[kani::proof]
fn verify_empty_extract_is_error() {
    let mut heap: IndexedBinaryHeap<u8> = IndexedBinaryHeap::new(1);
    assert!(heap.extract_min() == Err(HeapError::Empty));
    assert!(heap.is_empty());
}
