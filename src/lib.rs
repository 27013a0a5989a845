//! Comparator-driven linked data structures for Rust
//!
//! This crate provides three generic containers whose behavior is driven by a
//! caller-supplied [`Comparator`]:
//!
//! # Features
//!
//! - **Balanced tree**: a binary search tree that runs either as a plain ordered
//!   tree or as a red-black tree; O(log n) insert, search and delete in red-black
//!   mode, plus rotations, invariant checks and a box-drawing renderer
//! - **Min-heap**: an array-backed binary heap whose elements carry their own
//!   position slot, giving O(log n) `reorder` (decrease-key) without searching
//! - **Graph**: an undirected weighted graph with BFS, DFS, fewest-edge paths and
//!   Dijkstra shortest paths built on the min-heap, drawable as SVG
//!
//! # Example
//!
//! ```rust
//! use rust_linked_structures::{BalancedTree, Graph};
//!
//! let mut tree = BalancedTree::red_black();
//! for x in [5, 2, 8, 1, 9] {
//!     tree.insert_red_black(x);
//! }
//! assert!(tree.verify_red_black());
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 5, 8, 9]);
//!
//! let mut graph = Graph::new();
//! graph.add_vertex('a');
//! graph.add_vertex('b');
//! graph.connect(&'a', &'b', 2.5);
//! assert_eq!(graph.weight(&'b', &'a'), 2.5);
//! ```

pub mod graph;
pub mod min_heap;
pub mod svg;
pub mod traits;
pub mod tree;

// Re-export the main types for convenience
pub use graph::{Edge, Elements, Graph, GraphError, VertexId, DEFAULT_WEIGHT};
pub use min_heap::MinHeap;
pub use traits::{Comparator, HeapIndexed, HeapSlot, NaturalOrder};
pub use tree::{BalancedTree, Color, Discipline, NodeId};
