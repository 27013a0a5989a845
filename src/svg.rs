//! SVG drawings of a [`Graph`]
//!
//! Vertices sit evenly spaced on a circle, so no edge passes through a vertex
//! it does not touch. The circle grows with the vertex count: each vertex gets
//! an arc of two diameters. Above [`INNER_EDGE_THRESHOLD`] vertices, edges end
//! on an inner ring instead of at the centers so that they do not cover the
//! labels.
//!
//! ```rust
//! use rust_linked_structures::graph::Graph;
//!
//! let mut graph = Graph::new();
//! for v in ["a", "b", "c"] {
//!     graph.add_vertex(v);
//! }
//! graph.connect_unweighted(&"a", &"b");
//! graph.connect_unweighted(&"b", &"c");
//!
//! let path = graph.dijkstra(&"a", &"c");
//! let svg = graph.to_svg_with_path(&path, |v| v.to_string());
//! assert!(svg.starts_with("<?xml"));
//! assert_eq!(svg.matches("<circle").count(), 3);
//! ```

use crate::graph::{Graph, VertexId};
use crate::traits::Comparator;
use slotmap::SecondaryMap;
use std::f64::consts::PI;
use tracing::trace;

/// Radius of a vertex circle
pub const VERTEX_RADIUS: f64 = 20.0;

/// Vertex count above which edges end on the inner ring
pub const INNER_EDGE_THRESHOLD: usize = 13;

/// Stroke cycled through for plain edges
const EDGE_COLORS: [&str; 12] = [
    "black",
    "purple",
    "blue",
    "green",
    "orange",
    "violet",
    "blueviolet",
    "magenta",
    "darkred",
    "brown",
    "cadetblue",
    "chocolate",
];

/// Stroke of the highlighted path
const PATH_COLOR: &str = "red";

#[derive(Debug, Clone, Copy)]
struct Point {
    x: f64,
    y: f64,
}

/// Circle placement for every vertex
struct Layout {
    side: f64,
    centers: SecondaryMap<VertexId, Point>,
    edge_ends: SecondaryMap<VertexId, Point>,
}

impl<T, C: Comparator<T>> Graph<T, C> {
    /// Draws the graph as a standalone SVG document
    ///
    /// Each edge is drawn once, colored by its position in the adjacency walk.
    /// `label` gives the text inside each vertex; it is XML-escaped.
    pub fn to_svg<F: Fn(&T) -> String>(&self, label: F) -> String {
        self.draw(None, &label)
    }

    /// Draws the graph with `path` traced over it in red
    ///
    /// Edges are drawn in black, then each consecutive pair of `path` is joined
    /// in [`PATH_COLOR`]. An empty or single-vertex path adds nothing.
    ///
    /// # Panics
    /// Panics if `path` holds a vertex that is not in this graph.
    pub fn to_svg_with_path<F: Fn(&T) -> String>(&self, path: &[VertexId], label: F) -> String {
        self.draw(Some(path), &label)
    }

    fn layout(&self) -> Layout {
        let n = self.vertex_count();
        let radius = 2.0 * n as f64 * (2.0 * VERTEX_RADIUS) / (2.0 * PI);
        let side = 2.0 * radius + 4.0 * VERTEX_RADIUS;
        let step = 2.0 * PI / n.max(1) as f64;
        let inner = if n > INNER_EDGE_THRESHOLD {
            radius - VERTEX_RADIUS
        } else {
            radius
        };

        let mut centers = SecondaryMap::with_capacity(n);
        let mut edge_ends = SecondaryMap::with_capacity(n);
        for (i, id) in self.vertices().enumerate() {
            let angle = step * (i + 1) as f64;
            let on_ring = |r: f64| Point {
                x: r * angle.cos() + side / 2.0,
                y: r * angle.sin() + side / 2.0,
            };
            centers.insert(id, on_ring(radius));
            edge_ends.insert(id, on_ring(inner));
        }

        Layout {
            side,
            centers,
            edge_ends,
        }
    }

    fn draw(&self, path: Option<&[VertexId]>, label: &dyn Fn(&T) -> String) -> String {
        let layout = self.layout();
        trace!(
            vertices = self.vertex_count(),
            side = layout.side,
            "drawing svg"
        );

        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.2}\" height=\"{:.2}\">\n<g>\n",
            layout.side, layout.side
        ));

        // Each undirected edge is drawn from whichever end comes first.
        let mut drawn: SecondaryMap<VertexId, ()> = SecondaryMap::with_capacity(self.vertex_count());
        let mut color = 0;
        for id in self.vertices() {
            for edge in self.edges(id) {
                if drawn.contains_key(edge.neighbor()) {
                    continue;
                }
                let stroke = match path {
                    Some(_) => EDGE_COLORS[0],
                    None => EDGE_COLORS[color % EDGE_COLORS.len()],
                };
                color += 1;
                line(
                    &mut out,
                    layout.edge_ends[id],
                    layout.edge_ends[edge.neighbor()],
                    stroke,
                );
            }
            drawn.insert(id, ());
        }

        for pair in path.unwrap_or(&[]).windows(2) {
            let ends = (layout.edge_ends.get(pair[0]), layout.edge_ends.get(pair[1]));
            let (Some(&from), Some(&to)) = ends else {
                panic!("path vertex does not belong to this graph");
            };
            line(&mut out, from, to, PATH_COLOR);
        }

        for id in self.vertices() {
            let center = layout.centers[id];
            out.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{VERTEX_RADIUS}\" stroke=\"black\" stroke-width=\"3\" fill=\"white\" />\n",
                center.x, center.y
            ));
        }
        for id in self.vertices() {
            let center = layout.centers[id];
            out.push_str(&format!(
                "<text fill=\"black\" font-family=\"sans-serif\" font-size=\"15\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\">{}</text>\n",
                center.x,
                center.y + 5.0,
                escape(&label(self.element(id)))
            ));
        }

        out.push_str("</g>\n</svg>\n");
        out
    }
}

fn line(out: &mut String, from: Point, to: Point, stroke: &str) {
    out.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{stroke}\" stroke-width=\"1.5\" />\n",
        from.x, from.y, to.x, to.y
    ));
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
