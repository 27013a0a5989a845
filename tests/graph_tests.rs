//! Tests for graph construction, traversal and shortest paths
//!
//! Tests cover:
//! - Edge symmetry and the error contract of the `try_*` methods
//! - BFS distance order, DFS coverage and discovery order
//! - Fewest-edge paths and Dijkstra against Bellman-Ford
//! - Ownership accounting on teardown

use proptest::prelude::*;
use rust_linked_structures::graph::{Graph, GraphError, VertexId};
use std::collections::HashSet;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Routes `debug!` events to the test output when RUST_LOG is set
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a graph on `0..n` from a list of candidate edges, skipping the
/// self-loops and duplicates the generator produces
fn build(n: u32, edges: &[(u32, u32, u32)]) -> Graph<u32> {
    let mut graph = Graph::new();
    for v in 0..n {
        graph.add_vertex(v);
    }
    for &(a, b, w) in edges {
        match graph.try_connect(&(a % n), &(b % n), f64::from(w)) {
            Ok(()) | Err(GraphError::SelfLoop) | Err(GraphError::AlreadyConnected) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    graph
}

/// Single-source distances by Bellman-Ford relaxation
fn bellman_ford(graph: &Graph<u32>, source: VertexId) -> Vec<(VertexId, f64)> {
    let vertices: Vec<VertexId> = graph.vertices().collect();
    let index = |v: VertexId| vertices.iter().position(|&u| u == v).unwrap();
    let mut distance = vec![f64::INFINITY; vertices.len()];
    distance[index(source)] = 0.0;

    for _ in 1..vertices.len() {
        for &u in &vertices {
            let du = distance[index(u)];
            if du.is_infinite() {
                continue;
            }
            for edge in graph.edges(u) {
                let v = index(edge.neighbor());
                if du + edge.weight() < distance[v] {
                    distance[v] = du + edge.weight();
                }
            }
        }
    }
    vertices.into_iter().zip(distance).collect()
}

/// Hop counts from `source` by repeated frontier expansion
fn hops(graph: &Graph<u32>, source: VertexId) -> Vec<(u32, usize)> {
    let mut seen = HashSet::from([source]);
    let mut frontier = vec![source];
    let mut result = vec![(*graph.element(source), 0)];
    let mut depth = 0;
    while !frontier.is_empty() {
        depth += 1;
        let mut next = Vec::new();
        for v in frontier {
            for n in graph.neighbors(v) {
                if seen.insert(n) {
                    result.push((*graph.element(n), depth));
                    next.push(n);
                }
            }
        }
        frontier = next;
    }
    result
}

fn edge_list() -> impl Strategy<Value = Vec<(u32, u32, u32)>> {
    prop::collection::vec((0u32..12, 0u32..12, 1u32..20), 0..40)
}

proptest! {
    #[test]
    fn test_edges_are_symmetric(n in 2u32..12, edges in edge_list()) {
        let graph = build(n, &edges);
        let mut half_edges = 0;
        for v in graph.vertices() {
            for edge in graph.edges(v) {
                half_edges += 1;
                let back = graph.edges(edge.neighbor()).iter().find(|e| e.neighbor() == v);
                prop_assert_eq!(back.map(|e| e.weight()), Some(edge.weight()));
            }
        }
        prop_assert_eq!(half_edges, 2 * graph.edge_count());
    }

    #[test]
    fn test_bfs_visits_in_distance_order(n in 2u32..12, edges in edge_list(), start in 0u32..12) {
        let graph = build(n, &edges);
        let start = start % n;
        let source = graph.vertex_for(&start).unwrap();
        let distances = hops(&graph, source);

        let mut order = Vec::new();
        graph.bfs(&start, |&v| order.push(v));
        prop_assert_eq!(order.len(), distances.len());

        let depth_of = |v: u32| distances.iter().find(|&&(u, _)| u == v).map(|&(_, d)| d).unwrap();
        let depths: Vec<usize> = order.iter().map(|&v| depth_of(v)).collect();
        prop_assert!(depths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_dfs_visits_the_component_once(n in 2u32..12, edges in edge_list(), start in 0u32..12) {
        let graph = build(n, &edges);
        let start = start % n;

        let mut order = Vec::new();
        graph.dfs(&start, |&v| order.push(v));
        prop_assert_eq!(order.first().copied(), Some(start));

        let mut reached = Vec::new();
        graph.bfs(&start, |&v| reached.push(v));
        let visited: HashSet<u32> = order.iter().copied().collect();
        prop_assert_eq!(visited.len(), order.len());
        prop_assert_eq!(visited, reached.into_iter().collect::<HashSet<u32>>());

        // Every later vertex was discovered from one visited before it.
        for (i, &v) in order.iter().enumerate().skip(1) {
            let id = graph.vertex_for(&v).unwrap();
            prop_assert!(graph.neighbors(id).any(|n| order[..i].contains(graph.element(n))));
        }
    }

    #[test]
    fn test_unweighted_path_has_fewest_edges(n in 2u32..12, edges in edge_list(), a in 0u32..12, b in 0u32..12) {
        let graph = build(n, &edges);
        let (a, b) = (a % n, b % n);
        let source = graph.vertex_for(&a).unwrap();
        let path = graph.shortest_path_unweighted(&a, &b);

        match hops(&graph, source).iter().find(|&&(v, _)| v == b) {
            Some(&(_, depth)) => {
                prop_assert_eq!(path.len(), depth + 1);
                prop_assert_eq!(*graph.element(path[0]), a);
                prop_assert_eq!(*graph.element(*path.last().unwrap()), b);
                for pair in path.windows(2) {
                    prop_assert!(graph.neighbors(pair[0]).any(|n| n == pair[1]));
                }
            }
            None => prop_assert!(path.is_empty()),
        }
    }

    #[test]
    fn test_dijkstra_matches_bellman_ford(n in 2u32..12, edges in edge_list(), a in 0u32..12) {
        let graph = build(n, &edges);
        let a = a % n;
        let source = graph.vertex_for(&a).unwrap();

        for (target, expected) in bellman_ford(&graph, source) {
            let b = *graph.element(target);
            let path = graph.dijkstra(&a, &b);
            if expected.is_infinite() {
                prop_assert!(path.is_empty());
            } else {
                prop_assert_eq!(path.first().copied(), Some(source));
                prop_assert_eq!(path.last().copied(), Some(target));
                prop_assert_eq!(graph.path_weight(&path), expected);
            }
        }
    }
}

#[test]
fn test_dijkstra_prefers_light_detour() {
    init_tracing();

    let mut graph = Graph::new();
    for city in ["lisbon", "madrid", "paris", "rome", "berlin"] {
        graph.add_vertex(city);
    }
    graph.connect(&"lisbon", &"madrid", 5.0);
    graph.connect(&"madrid", &"paris", 10.0);
    graph.connect(&"lisbon", &"paris", 18.0);
    graph.connect(&"paris", &"berlin", 9.0);
    graph.connect(&"madrid", &"rome", 14.0);
    graph.connect(&"rome", &"berlin", 12.0);

    let path = graph.dijkstra(&"lisbon", &"berlin");
    let names: Vec<&str> = path.iter().map(|&v| *graph.element(v)).collect();
    assert_eq!(names, vec!["lisbon", "madrid", "paris", "berlin"]);
    assert_eq!(graph.path_weight(&path), 24.0);

    let hops = graph.shortest_path_unweighted(&"lisbon", &"berlin");
    assert_eq!(hops.len(), 3);
}

#[test]
fn test_dijkstra_reaches_through_overflowing_weights() {
    let mut graph = Graph::new();
    for v in 0..4 {
        graph.add_vertex(v);
    }
    graph.connect(&0, &1, f64::MAX);
    graph.connect(&1, &2, f64::MAX);

    let path = graph.dijkstra(&0, &2);
    let names: Vec<u32> = path.iter().map(|&v| *graph.element(v)).collect();
    assert_eq!(names, vec![0, 1, 2]);
    assert_eq!(path.len(), graph.shortest_path_unweighted(&0, &2).len());
    assert!(graph.path_weight(&path).is_infinite());

    // 3 stays unreachable even though reached distances are infinite too.
    assert!(graph.dijkstra(&0, &3).is_empty());
}

#[test]
fn test_removing_absent_vertex_leaves_graph_unchanged() {
    let mut graph = Graph::new();
    for v in 0..4 {
        graph.add_vertex(v);
    }
    graph.connect(&0, &1, 1.0);
    graph.connect(&1, &2, 2.0);

    assert_eq!(graph.try_remove_vertex(&9), Err(GraphError::MissingVertex));
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.elements().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    assert_eq!(graph.weight(&2, &1), 2.0);
}

#[test]
fn test_custom_comparator_identifies_vertices() {
    // Vertices are equal when their names match, whatever the payload.
    let mut graph = Graph::with_comparator(|a: &(&str, u32), b: &(&str, u32)| a.0.cmp(b.0));
    graph.add_vertex(("x", 1));
    graph.add_vertex(("y", 2));
    assert_eq!(graph.try_add_vertex(("x", 99)), Err(GraphError::DuplicateVertex));

    graph.connect(&("x", 0), &("y", 0), 3.0);
    assert!(graph.are_connected(&("y", 7), &("x", 7)));
    assert_eq!(graph.remove_vertex(&("x", 0)), ("x", 1));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_error_messages() {
    let mut graph: Graph<u8> = Graph::new();
    graph.add_vertex(1);
    graph.add_vertex(2);

    let err = graph.try_connect(&1, &2, -1.0).unwrap_err();
    assert_eq!(err, GraphError::InvalidWeight(-1.0));
    assert_eq!(err.to_string(), "edge weight must be finite and positive, got -1");
    assert_eq!(
        graph.try_disconnect(&1, &2).unwrap_err().to_string(),
        "vertices are not connected"
    );
    assert_eq!(
        graph.try_weight(&1, &3).unwrap_err().to_string(),
        "element is not a vertex of the graph"
    );
}

#[test]
#[should_panic(expected = "dijkstra: element is not a vertex of the graph")]
fn test_dijkstra_missing_endpoint_panics() {
    let mut graph = Graph::new();
    graph.add_vertex(1);
    graph.dijkstra(&1, &2);
}

#[test]
#[should_panic(expected = "path_weight: vertices are not connected")]
fn test_path_weight_requires_edges() {
    let mut graph = Graph::new();
    let a = graph.add_vertex(1);
    let b = graph.add_vertex(2);
    graph.path_weight(&[a, b]);
}

#[test]
fn test_stale_vertex_id_is_rejected() {
    let mut graph = Graph::new();
    let a = graph.add_vertex(1);
    graph.remove_vertex(&1);
    let b = graph.add_vertex(1);
    assert_ne!(a, b);
    assert!(graph.get(a).is_none());
    assert_eq!(graph.get(b), Some(&1));
}

#[test]
fn test_teardown_accounting() {
    let items: Vec<Rc<u32>> = (0..10).map(Rc::new).collect();

    let mut graph = Graph::new();
    for item in &items {
        graph.add_vertex(Rc::clone(item));
    }
    for pair in items.windows(2) {
        graph.connect(&pair[0], &pair[1], 1.0);
    }
    assert!(items.iter().all(|i| Rc::strong_count(i) == 2));

    // Searches never retain elements.
    let path = graph.dijkstra(&items[0], &items[9]);
    assert_eq!(path.len(), 10);
    assert!(items.iter().all(|i| Rc::strong_count(i) == 2));

    let removed = graph.remove_vertex(&items[4]);
    assert_eq!(Rc::strong_count(&items[4]), 2);
    drop(removed);
    assert_eq!(Rc::strong_count(&items[4]), 1);

    let released = graph.into_elements();
    assert_eq!(released.len(), 9);
    drop(released);
    assert!(items.iter().all(|i| Rc::strong_count(i) == 1));

    let mut graph = Graph::new();
    for item in &items {
        graph.add_vertex(Rc::clone(item));
    }
    drop(graph);
    assert!(items.iter().all(|i| Rc::strong_count(i) == 1));
}
