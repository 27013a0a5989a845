//! Capabilities shared by the structures in this crate
//!
//! This module provides the two injected contracts the structures are generic over:
//!
//! - [`Comparator`]: a three-way ordering used by the tree, the heap and the graph
//! - [`HeapIndexed`]: a position slot embedded in heap elements, which lets
//!   [`MinHeap::reorder`](crate::min_heap::MinHeap::reorder) run in O(log n)
//!
//! Both are resolved at compile time. Closures of the form `Fn(&T, &T) -> Ordering`
//! are comparators, and [`NaturalOrder`] covers every `T: Ord`.

use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;

/// A three-way ordering over `T`
///
/// Implemented for every `Fn(&T, &T) -> Ordering`, so a closure can be passed
/// wherever a comparator is expected:
///
/// ```rust
/// use rust_linked_structures::tree::BalancedTree;
///
/// let mut tree = BalancedTree::ordered_with(|a: &i32, b: &i32| b.cmp(a));
/// tree.insert_ordered(1);
/// tree.insert_ordered(2);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares two elements: `Less`, `Equal` or `Greater`
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The comparator given by `T: Ord`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Access to the heap position slot carried by an element
///
/// The heap writes the element's current array slot through
/// [`set_heap_index`](HeapIndexed::set_heap_index) every time it moves the
/// element, and reads it back in `reorder`. The slot is `None` while the
/// element is outside any heap.
///
/// Setters take `&self`: elements are usually shared handles (`&Item`,
/// `Rc<Item>`) whose owner keeps mutating the key while the heap holds them,
/// so the slot lives behind a [`Cell`]. [`HeapSlot`] is the ready-made cell.
///
/// An element must be resident in at most one heap at a time.
pub trait HeapIndexed {
    /// The slot recorded by the heap, or `None`
    fn heap_index(&self) -> Option<usize>;

    /// Records a new slot
    fn set_heap_index(&self, index: Option<usize>);
}

/// A position slot to embed in caller types
///
/// ```rust
/// use std::cell::Cell;
/// use rust_linked_structures::traits::{HeapIndexed, HeapSlot};
///
/// struct Task {
///     priority: Cell<u32>,
///     slot: HeapSlot,
/// }
///
/// impl HeapIndexed for Task {
///     fn heap_index(&self) -> Option<usize> {
///         self.slot.heap_index()
///     }
///     fn set_heap_index(&self, index: Option<usize>) {
///         self.slot.set_heap_index(index)
///     }
/// }
/// ```
#[derive(Debug, Default, Clone)]
pub struct HeapSlot(Cell<Option<usize>>);

impl HeapSlot {
    /// Creates an empty slot
    pub const fn new() -> Self {
        HeapSlot(Cell::new(None))
    }
}

impl HeapIndexed for HeapSlot {
    fn heap_index(&self) -> Option<usize> {
        self.0.get()
    }

    fn set_heap_index(&self, index: Option<usize>) {
        self.0.set(index)
    }
}

impl<T: HeapIndexed + ?Sized> HeapIndexed for &T {
    fn heap_index(&self) -> Option<usize> {
        (**self).heap_index()
    }

    fn set_heap_index(&self, index: Option<usize>) {
        (**self).set_heap_index(index)
    }
}

impl<T: HeapIndexed + ?Sized> HeapIndexed for Rc<T> {
    fn heap_index(&self) -> Option<usize> {
        (**self).heap_index()
    }

    fn set_heap_index(&self, index: Option<usize>) {
        (**self).set_heap_index(index)
    }
}
