//! Undirected weighted graphs with traversal and shortest paths
//!
//! [`Graph`] stores application elements as vertices and connects them with
//! symmetric, strictly positive weighted edges. On top of the adjacency model it
//! provides:
//!
//! - [`Graph::bfs`] and [`Graph::dfs`]: visit every vertex reachable from a start
//! - [`Graph::shortest_path_unweighted`]: fewest edges, by breadth-first search
//! - [`Graph::dijkstra`]: least total weight, driven by [`MinHeap`] decrease-key
//!
//! # Design
//!
//! Vertices live in a [`SlotMap`] and are addressed by [`VertexId`]. Vertex
//! lookup by element is a linear scan in insertion order using the graph's
//! comparator, so elements need no `Hash`.
//!
//! Traversal state (visited marks, tentative distances, heap positions,
//! predecessors) is never stored on vertices. Each call allocates its own
//! [`SecondaryMap`]s, so searches cannot leak state into one another and take
//! `&self`.
//!
//! # Example
//!
//! ```rust
//! use rust_linked_structures::graph::Graph;
//!
//! let mut graph = Graph::new();
//! for city in ["a", "b", "c"] {
//!     graph.add_vertex(city);
//! }
//! graph.connect(&"a", &"b", 1.0);
//! graph.connect(&"b", &"c", 1.0);
//! graph.connect(&"a", &"c", 5.0);
//!
//! let path = graph.dijkstra(&"a", &"c");
//! let names: Vec<_> = path.iter().map(|&v| *graph.element(v)).collect();
//! assert_eq!(names, vec!["a", "b", "c"]);
//! assert_eq!(graph.path_weight(&path), 2.0);
//! ```

use crate::min_heap::MinHeap;
use crate::traits::{Comparator, HeapIndexed, HeapSlot, NaturalOrder};
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

new_key_type! {
    /// Handle to a vertex of a [`Graph`]
    pub struct VertexId;
}

/// Weight of edges added by [`Graph::connect_unweighted`]
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Error type for graph operations
///
/// Returned by the `try_*` methods. The plain methods treat the same conditions
/// as contract violations and panic with this error's message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphError {
    /// An element is not a vertex of the graph
    MissingVertex,
    /// The element is already a vertex of the graph
    DuplicateVertex,
    /// Both endpoints are the same vertex
    SelfLoop,
    /// The vertices already share an edge
    AlreadyConnected,
    /// The vertices share no edge
    NotConnected,
    /// Edge weights must be finite and strictly positive
    InvalidWeight(f64),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::MissingVertex => write!(f, "element is not a vertex of the graph"),
            GraphError::DuplicateVertex => write!(f, "element is already a vertex of the graph"),
            GraphError::SelfLoop => write!(f, "cannot connect a vertex to itself"),
            GraphError::AlreadyConnected => write!(f, "vertices are already connected"),
            GraphError::NotConnected => write!(f, "vertices are not connected"),
            GraphError::InvalidWeight(w) => {
                write!(f, "edge weight must be finite and positive, got {w}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// One end of an undirected edge, as seen from the vertex that owns it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    neighbor: VertexId,
    weight: f64,
}

impl Edge {
    /// The vertex on the other end
    pub fn neighbor(&self) -> VertexId {
        self.neighbor
    }

    /// The edge weight
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

#[derive(Debug)]
struct Vertex<T> {
    element: T,
    edges: Vec<Edge>,
}

/// Dijkstra frontier entry, one per vertex per run
///
/// Finite weights can still sum to `+inf`, so reachability is its own flag
/// rather than a sentinel distance.
struct Tentative {
    vertex: VertexId,
    distance: Cell<f64>,
    reached: Cell<bool>,
    slot: HeapSlot,
}

impl Tentative {
    /// Closer first; among equal distances, reached before unreached
    fn closer(&self, other: &Self) -> Ordering {
        self.distance
            .get()
            .total_cmp(&other.distance.get())
            .then_with(|| other.reached.get().cmp(&self.reached.get()))
    }
}

impl HeapIndexed for Tentative {
    fn heap_index(&self) -> Option<usize> {
        self.slot.heap_index()
    }

    fn set_heap_index(&self, index: Option<usize>) {
        self.slot.set_heap_index(index)
    }
}

/// Predecessor links of a search; the start maps to `None`
type Predecessors = SecondaryMap<VertexId, Option<VertexId>>;

/// An undirected graph with weighted edges
///
/// The graph owns its elements. Dropping it drops every element; use
/// [`Graph::into_elements`] to take them back instead.
#[derive(Debug)]
pub struct Graph<T, C = NaturalOrder> {
    vertices: SlotMap<VertexId, Vertex<T>>,
    order: Vec<VertexId>,
    edge_count: usize,
    comparator: C,
}

impl<T: Ord> Graph<T, NaturalOrder> {
    /// Creates an empty graph comparing elements with `T: Ord`
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Ord> Default for Graph<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> Graph<T, C> {
    /// Creates an empty graph; `comparator` decides when two elements are equal
    pub fn with_comparator(comparator: C) -> Self {
        Graph {
            vertices: SlotMap::with_key(),
            order: Vec::new(),
            edge_count: 0,
            comparator,
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex holding an element equal to `element`
    pub fn vertex_for(&self, element: &T) -> Option<VertexId> {
        self.order.iter().copied().find(|&id| {
            self.comparator
                .compare(&self.vertices[id].element, element)
                .is_eq()
        })
    }

    /// Returns true if some vertex holds an element equal to `element`
    pub fn contains(&self, element: &T) -> bool {
        self.vertex_for(element).is_some()
    }

    /// Vertices in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.order.iter().copied()
    }

    /// Elements in insertion order
    pub fn elements(&self) -> Elements<'_, T> {
        Elements {
            order: self.order.iter(),
            vertices: &self.vertices,
        }
    }

    /// The element held by `vertex`, or `None` if it is not a vertex of this graph
    pub fn get(&self, vertex: VertexId) -> Option<&T> {
        self.vertices.get(vertex).map(|v| &v.element)
    }

    /// The element held by `vertex`
    ///
    /// # Panics
    /// Panics if `vertex` is not a vertex of this graph.
    pub fn element(&self, vertex: VertexId) -> &T {
        &self.vertex(vertex).element
    }

    /// Edges of `vertex` in the order they were connected
    pub fn edges(&self, vertex: VertexId) -> &[Edge] {
        &self.vertex(vertex).edges
    }

    /// Neighbors of `vertex` in the order they were connected
    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.edges(vertex).iter().map(Edge::neighbor)
    }

    /// Number of edges touching `vertex`
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.vertex(vertex).edges.len()
    }

    /// Adds a vertex for `element`
    pub fn try_add_vertex(&mut self, element: T) -> Result<VertexId, GraphError> {
        if self.contains(&element) {
            return Err(GraphError::DuplicateVertex);
        }
        let id = self.vertices.insert(Vertex {
            element,
            edges: Vec::new(),
        });
        self.order.push(id);
        Ok(id)
    }

    /// Adds a vertex for `element`
    ///
    /// # Panics
    /// Panics if an equal element is already present.
    pub fn add_vertex(&mut self, element: T) -> VertexId {
        expect(self.try_add_vertex(element), "add_vertex")
    }

    /// Connects `a` and `b` with an edge of the given weight, in both directions
    pub fn try_connect(&mut self, a: &T, b: &T, weight: f64) -> Result<(), GraphError> {
        if !(weight > 0.0 && weight.is_finite()) {
            return Err(GraphError::InvalidWeight(weight));
        }
        let a = self.lookup(a)?;
        let b = self.lookup(b)?;
        if a == b {
            return Err(GraphError::SelfLoop);
        }
        if self.edge_between(a, b).is_some() {
            return Err(GraphError::AlreadyConnected);
        }

        self.vertices[a].edges.push(Edge {
            neighbor: b,
            weight,
        });
        self.vertices[b].edges.push(Edge {
            neighbor: a,
            weight,
        });
        self.edge_count += 1;
        Ok(())
    }

    /// Connects `a` and `b` with an edge of the given weight, in both directions
    ///
    /// # Panics
    /// Panics if either element is absent, if `a == b`, if they are already
    /// connected, or if `weight` is not finite and positive.
    pub fn connect(&mut self, a: &T, b: &T, weight: f64) {
        expect(self.try_connect(a, b, weight), "connect")
    }

    /// Connects `a` and `b` with an edge of [`DEFAULT_WEIGHT`]
    pub fn try_connect_unweighted(&mut self, a: &T, b: &T) -> Result<(), GraphError> {
        self.try_connect(a, b, DEFAULT_WEIGHT)
    }

    /// Connects `a` and `b` with an edge of [`DEFAULT_WEIGHT`]
    ///
    /// # Panics
    /// Same conditions as [`Graph::connect`], minus the weight check.
    pub fn connect_unweighted(&mut self, a: &T, b: &T) {
        expect(self.try_connect_unweighted(a, b), "connect_unweighted")
    }

    /// Removes the edge between `a` and `b` from both adjacency lists
    pub fn try_disconnect(&mut self, a: &T, b: &T) -> Result<(), GraphError> {
        let a = self.lookup(a)?;
        let b = self.lookup(b)?;
        if self.edge_between(a, b).is_none() {
            return Err(GraphError::NotConnected);
        }

        self.vertices[a].edges.retain(|e| e.neighbor != b);
        self.vertices[b].edges.retain(|e| e.neighbor != a);
        self.edge_count -= 1;
        Ok(())
    }

    /// Removes the edge between `a` and `b` from both adjacency lists
    ///
    /// # Panics
    /// Panics if either element is absent or they are not connected.
    pub fn disconnect(&mut self, a: &T, b: &T) {
        expect(self.try_disconnect(a, b), "disconnect")
    }

    /// Removes the vertex holding `element` and every edge touching it
    ///
    /// Returns the stored element.
    pub fn try_remove_vertex(&mut self, element: &T) -> Result<T, GraphError> {
        let id = self.lookup(element)?;
        let Some(vertex) = self.vertices.remove(id) else {
            return Err(GraphError::MissingVertex);
        };

        for edge in &vertex.edges {
            if let Some(neighbor) = self.vertices.get_mut(edge.neighbor) {
                neighbor.edges.retain(|e| e.neighbor != id);
            }
        }
        self.edge_count -= vertex.edges.len();
        self.order.retain(|&v| v != id);

        debug!(vertex = ?id, edges = vertex.edges.len(), "removed vertex");
        Ok(vertex.element)
    }

    /// Removes the vertex holding `element` and every edge touching it
    ///
    /// # Panics
    /// Panics if the element is absent.
    pub fn remove_vertex(&mut self, element: &T) -> T {
        expect(self.try_remove_vertex(element), "remove_vertex")
    }

    /// Returns true if `a` and `b` share an edge
    ///
    /// # Panics
    /// Panics if either element is absent.
    pub fn are_connected(&self, a: &T, b: &T) -> bool {
        let a = self.require(a, "are_connected");
        let b = self.require(b, "are_connected");
        self.edge_between(a, b).is_some()
    }

    /// Weight of the edge between `a` and `b`
    pub fn try_weight(&self, a: &T, b: &T) -> Result<f64, GraphError> {
        let a = self.lookup(a)?;
        let b = self.lookup(b)?;
        self.edge_between(a, b)
            .map(Edge::weight)
            .ok_or(GraphError::NotConnected)
    }

    /// Weight of the edge between `a` and `b`
    ///
    /// # Panics
    /// Panics if either element is absent or they are not connected.
    pub fn weight(&self, a: &T, b: &T) -> f64 {
        expect(self.try_weight(a, b), "weight")
    }

    /// Total weight along a vertex sequence; `0.0` for paths shorter than two
    ///
    /// # Panics
    /// Panics if two consecutive vertices are not connected.
    pub fn path_weight(&self, path: &[VertexId]) -> f64 {
        path.windows(2)
            .map(|pair| match self.edge_between(pair[0], pair[1]) {
                Some(edge) => edge.weight,
                None => panic!("path_weight: {}", GraphError::NotConnected),
            })
            .sum()
    }

    /// Breadth-first traversal from `start`
    ///
    /// `visit` runs once per reachable vertex, in non-decreasing number of edges
    /// from `start`. Neighbors are discovered in adjacency order.
    ///
    /// # Panics
    /// Panics if `start` is absent.
    pub fn bfs<F: FnMut(&T)>(&self, start: &T, mut visit: F) {
        let start = self.require(start, "bfs");
        let mut visited: SecondaryMap<VertexId, ()> =
            SecondaryMap::with_capacity(self.vertices.len());
        let mut frontier = VecDeque::new();

        visited.insert(start, ());
        frontier.push_back(start);
        while let Some(id) = frontier.pop_front() {
            let vertex = &self.vertices[id];
            visit(&vertex.element);
            for edge in &vertex.edges {
                if visited.insert(edge.neighbor, ()).is_none() {
                    frontier.push_back(edge.neighbor);
                }
            }
        }
    }

    /// Depth-first traversal from `start`
    ///
    /// The BFS discipline with a stack in place of the queue: a vertex is marked
    /// when pushed, and its unmarked neighbors are pushed in adjacency order, so
    /// the most recently discovered neighbor is visited next.
    ///
    /// # Panics
    /// Panics if `start` is absent.
    pub fn dfs<F: FnMut(&T)>(&self, start: &T, mut visit: F) {
        let start = self.require(start, "dfs");
        let mut visited: SecondaryMap<VertexId, ()> =
            SecondaryMap::with_capacity(self.vertices.len());
        let mut frontier = vec![start];

        visited.insert(start, ());
        while let Some(id) = frontier.pop() {
            let vertex = &self.vertices[id];
            visit(&vertex.element);
            for edge in &vertex.edges {
                if visited.insert(edge.neighbor, ()).is_none() {
                    frontier.push(edge.neighbor);
                }
            }
        }
    }

    /// A path from `a` to `b` with the fewest edges
    ///
    /// Returns the vertices `a ..= b`, or an empty vector when `b` is not
    /// reachable from `a`.
    ///
    /// # Panics
    /// Panics if either element is absent.
    pub fn shortest_path_unweighted(&self, a: &T, b: &T) -> Vec<VertexId> {
        let source = self.require(a, "shortest_path_unweighted");
        let target = self.require(b, "shortest_path_unweighted");

        let mut predecessors = Predecessors::with_capacity(self.vertices.len());
        let mut frontier = VecDeque::new();
        predecessors.insert(source, None);
        frontier.push_back(source);

        while let Some(id) = frontier.pop_front() {
            if id == target {
                break;
            }
            for edge in &self.vertices[id].edges {
                if !predecessors.contains_key(edge.neighbor) {
                    predecessors.insert(edge.neighbor, Some(id));
                    frontier.push_back(edge.neighbor);
                }
            }
        }

        let path = walk_back(&predecessors, target);
        debug!(
            vertices = self.vertices.len(),
            path_len = path.len(),
            "unweighted shortest path"
        );
        path
    }

    /// A path from `a` to `b` of least total weight (Dijkstra)
    ///
    /// Every vertex enters a [`MinHeap`] keyed by its tentative distance, with
    /// `a` at zero and the rest unreached. The closest vertex is extracted
    /// repeatedly; the first route to a neighbor, or a strictly shorter one,
    /// lowers that neighbor's key in place through [`MinHeap::reorder`]. The
    /// search ends when `b` is extracted or only unreached vertices remain.
    ///
    /// Returns the vertices `a ..= b`, or an empty vector when `b` is not
    /// reachable. Among several shortest paths, which one is returned depends on
    /// the heap layout.
    ///
    /// # Panics
    /// Panics if either element is absent.
    pub fn dijkstra(&self, a: &T, b: &T) -> Vec<VertexId> {
        let source = self.require(a, "dijkstra");
        let target = self.require(b, "dijkstra");

        let mut scratch: SecondaryMap<VertexId, Tentative> =
            SecondaryMap::with_capacity(self.vertices.len());
        for &id in &self.order {
            let distance = if id == source { 0.0 } else { f64::INFINITY };
            scratch.insert(
                id,
                Tentative {
                    vertex: id,
                    distance: Cell::new(distance),
                    reached: Cell::new(id == source),
                    slot: HeapSlot::new(),
                },
            );
        }

        let mut predecessors = Predecessors::with_capacity(self.vertices.len());
        predecessors.insert(source, None);

        let mut heap = MinHeap::from_sequence(scratch.values(), |x: &&Tentative, y: &&Tentative| {
            x.closer(y)
        });

        while let Some(closest) = heap.try_extract_min() {
            // Unreached vertices sort last, so nothing left is reachable.
            if closest.vertex == target || !closest.reached.get() {
                break;
            }
            let distance = closest.distance.get();

            for edge in &self.vertices[closest.vertex].edges {
                let neighbor = &scratch[edge.neighbor];
                // Settled vertices have left the heap.
                if neighbor.heap_index().is_none() {
                    continue;
                }
                let candidate = distance + edge.weight;
                if !neighbor.reached.get() || candidate < neighbor.distance.get() {
                    neighbor.distance.set(candidate);
                    neighbor.reached.set(true);
                    predecessors.insert(edge.neighbor, Some(closest.vertex));
                    heap.reorder(&neighbor);
                }
            }
        }

        let path = walk_back(&predecessors, target);
        debug!(
            vertices = self.vertices.len(),
            path_len = path.len(),
            "dijkstra"
        );
        path
    }

    /// Releases the vertices and returns the elements in insertion order
    pub fn into_elements(mut self) -> Vec<T> {
        let order = std::mem::take(&mut self.order);
        order
            .into_iter()
            .filter_map(|id| self.vertices.remove(id))
            .map(|vertex| vertex.element)
            .collect()
    }

    fn lookup(&self, element: &T) -> Result<VertexId, GraphError> {
        self.vertex_for(element).ok_or(GraphError::MissingVertex)
    }

    fn require(&self, element: &T, operation: &str) -> VertexId {
        expect(self.lookup(element), operation)
    }

    fn vertex(&self, id: VertexId) -> &Vertex<T> {
        match self.vertices.get(id) {
            Some(vertex) => vertex,
            None => panic!("vertex {id:?} does not belong to this graph"),
        }
    }

    fn edge_between(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        self.vertex(a).edges.iter().find(|e| e.neighbor == b)
    }
}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a Graph<T, C> {
    type Item = &'a T;
    type IntoIter = Elements<'a, T>;

    fn into_iter(self) -> Elements<'a, T> {
        self.elements()
    }
}

/// Iterator over the elements of a [`Graph`] in insertion order
pub struct Elements<'a, T> {
    order: std::slice::Iter<'a, VertexId>,
    vertices: &'a SlotMap<VertexId, Vertex<T>>,
}

impl<'a, T> Iterator for Elements<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = *self.order.next()?;
        self.vertices.get(id).map(|vertex| &vertex.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

fn expect<R>(result: Result<R, GraphError>, operation: &str) -> R {
    match result {
        Ok(value) => value,
        Err(e) => panic!("{operation}: {e}"),
    }
}

/// Follows predecessor links back from `target`; empty if it was never reached
fn walk_back(predecessors: &Predecessors, target: VertexId) -> Vec<VertexId> {
    if !predecessors.contains_key(target) {
        return Vec::new();
    }

    let mut path = vec![target];
    let mut current = target;
    while let Some(&Some(previous)) = predecessors.get(current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
