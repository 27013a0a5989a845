//! Indexed binary min-heap
//!
//! An array-backed complete binary tree ordered by a caller [`Comparator`].
//! Every element carries its own position slot ([`HeapIndexed`]), which the heap
//! keeps up to date on every move. That slot is what makes [`MinHeap::reorder`]
//! (decrease-key) O(log n): the heap jumps straight to the element instead of
//! searching for it.
//!
//! # Time Complexity
//!
//! | Operation       | Complexity |
//! |-----------------|------------|
//! | `insert`        | O(log n)   |
//! | `extract_min`   | O(log n)   |
//! | `reorder`       | O(log n)   |
//! | `peek`          | O(1)       |
//! | `from_sequence` | O(n)       |
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use rust_linked_structures::min_heap::MinHeap;
//! use rust_linked_structures::traits::{HeapIndexed, HeapSlot};
//!
//! struct Job {
//!     cost: Cell<u32>,
//!     slot: HeapSlot,
//! }
//!
//! impl HeapIndexed for Job {
//!     fn heap_index(&self) -> Option<usize> {
//!         self.slot.heap_index()
//!     }
//!     fn set_heap_index(&self, index: Option<usize>) {
//!         self.slot.set_heap_index(index)
//!     }
//! }
//!
//! let jobs: Vec<Job> = [5, 3, 8]
//!     .into_iter()
//!     .map(|c| Job { cost: Cell::new(c), slot: HeapSlot::new() })
//!     .collect();
//!
//! let mut heap = MinHeap::with_comparator(|a: &&Job, b: &&Job| a.cost.get().cmp(&b.cost.get()));
//! for job in &jobs {
//!     heap.insert(job);
//! }
//!
//! jobs[2].cost.set(1);
//! heap.reorder(&&jobs[2]);
//!
//! assert_eq!(heap.extract_min().cost.get(), 1);
//! assert_eq!(heap.extract_min().cost.get(), 3);
//! ```

use crate::traits::{Comparator, HeapIndexed, NaturalOrder};
use tracing::trace;

/// Initial backing capacity of a heap built with [`MinHeap::new`]
pub const DEFAULT_CAPACITY: usize = 100;

/// A binary min-heap over elements that record their own position
///
/// The heap owns only its backing array. When `T` is a shared handle such as
/// `&Item` or `Rc<Item>`, the items themselves stay with the caller; dropping
/// the heap drops the handles and nothing else. Use [`MinHeap::into_vec`] to get
/// the elements back without dropping them.
#[derive(Debug)]
pub struct MinHeap<T: HeapIndexed, C = NaturalOrder> {
    data: Vec<T>,
    comparator: C,
}

impl<T: HeapIndexed + Ord> MinHeap<T, NaturalOrder> {
    /// Creates an empty heap ordered by `T: Ord`
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: HeapIndexed + Ord> Default for MinHeap<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HeapIndexed + Ord> FromIterator<T> for MinHeap<T, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_sequence(iter, NaturalOrder)
    }
}

impl<T: HeapIndexed, C: Comparator<T>> MinHeap<T, C> {
    /// Creates an empty heap ordered by `comparator`
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, comparator)
    }

    /// Creates an empty heap with room for `capacity` elements before growing
    pub fn with_capacity(capacity: usize, comparator: C) -> Self {
        MinHeap {
            data: Vec::with_capacity(capacity),
            comparator,
        }
    }

    /// Builds a heap from a sequence in O(n)
    ///
    /// The elements are copied into the array in input order, then sifted down
    /// from the last internal node back to the root.
    pub fn from_sequence<I: IntoIterator<Item = T>>(sequence: I, comparator: C) -> Self {
        let data: Vec<T> = sequence.into_iter().collect();
        for (i, element) in data.iter().enumerate() {
            element.set_heap_index(Some(i));
        }

        let mut heap = MinHeap { data, comparator };
        trace!(len = heap.data.len(), "heapify");
        for i in (0..heap.data.len() / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    /// Returns true if the heap holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Inserts an element; O(log n)
    pub fn insert(&mut self, element: T) {
        let index = self.data.len();
        element.set_heap_index(Some(index));
        self.data.push(element);
        self.sift_up(index);
    }

    /// Returns the minimum without removing it
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Removes and returns the minimum; O(log n)
    ///
    /// # Panics
    /// Panics if the heap is empty. See [`MinHeap::try_extract_min`].
    pub fn extract_min(&mut self) -> T {
        match self.try_extract_min() {
            Some(element) => element,
            None => panic!("extract_min called on an empty heap"),
        }
    }

    /// Removes and returns the minimum, or `None` if the heap is empty
    pub fn try_extract_min(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }

        let last = self.data.len() - 1;
        self.swap(0, last);
        let min = self.data.pop()?;
        min.set_heap_index(None);

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        Some(min)
    }

    /// Restores heap order after `element`'s key decreased
    ///
    /// The element is located through its [`HeapIndexed`] slot, not by search.
    /// If the key increased instead, the heap order is left broken: the result
    /// of later operations is unspecified, though never memory unsafe.
    ///
    /// # Panics
    /// Panics if `element` is not resident in this heap.
    pub fn reorder(&mut self, element: &T) {
        let index = match element.heap_index() {
            Some(i) if i < self.data.len() => i,
            _ => panic!("reorder called with an element that is not in the heap"),
        };
        self.sift_up(index);
    }

    /// Index of the last occupied slot, or `None` if the heap is empty
    pub fn last_index(&self) -> Option<usize> {
        self.data.len().checked_sub(1)
    }

    /// The element at array slot `index`, in breadth-first (not sorted) order
    ///
    /// # Panics
    /// Panics if `index` is past [`MinHeap::last_index`].
    pub fn at(&self, index: usize) -> &T {
        &self.data[index]
    }

    /// Iterates the elements in array slot order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Checks the heap order: every parent compares `<=` its children
    pub fn is_heap(&self) -> bool {
        (1..self.data.len()).all(|i| {
            let parent = (i - 1) / 2;
            self.comparator.compare(&self.data[parent], &self.data[i]).is_le()
        })
    }

    /// Releases the backing array and hands the elements back in slot order
    ///
    /// Every returned element has its slot cleared.
    pub fn into_vec(self) -> Vec<T> {
        for element in &self.data {
            element.set_heap_index(None);
        }
        self.data
    }

    /// Drops every element, keeping the allocated array
    pub fn clear(&mut self) {
        for element in &self.data {
            element.set_heap_index(None);
        }
        self.data.clear();
    }

    /// Swaps two slots and records the new positions
    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.data[a].set_heap_index(Some(a));
        self.data[b].set_heap_index(Some(b));
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.comparator.compare(&self.data[a], &self.data[b]).is_lt()
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.less(index, parent) {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }

            if smallest != index {
                self.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}
