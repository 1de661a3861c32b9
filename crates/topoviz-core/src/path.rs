//! Minimum-weight routing between two nodes

use crate::error::{TopologyError, TopologyResult};
use crate::graph::NetworkGraph;
use petgraph::algo::astar;
use serde::{Deserialize, Serialize};

/// An ordered walk through the graph. Consecutive labels are linked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    nodes: Vec<String>,
    cost: f64,
}

impl Path {
    /// Build a path from labels supplied by a caller. Nothing is checked
    /// against a graph until it is handed to the animator.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Path {
            nodes: labels.into_iter().map(Into::into).collect(),
            cost: 0.0,
        }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Sum of link weights along the path.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn source(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// Consecutive pairs, i.e. the links the packet travels over.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    /// True if the path uses the link `a - b` in either direction.
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.edges()
            .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }
}

/// Find a minimum total-weight path from `source` to `destination`.
///
/// When several paths share the minimum cost any one of them may be returned.
/// Asking for a path from a node to itself yields the single-node path.
pub fn shortest_path(graph: &NetworkGraph, source: &str, destination: &str) -> TopologyResult<Path> {
    let start = graph.node_index(source)?;
    let goal = graph.node_index(destination)?;

    if start == goal {
        return Ok(Path {
            nodes: vec![source.to_string()],
            cost: 0.0,
        });
    }

    let inner = graph.inner();
    // A zero heuristic turns A* into plain Dijkstra.
    let (cost, indices) = astar(inner, start, |n| n == goal, |e| e.weight().weight, |_| 0.0)
        .ok_or_else(|| TopologyError::NoPath {
            from: source.to_string(),
            to: destination.to_string(),
        })?;

    let nodes = indices
        .into_iter()
        .map(|idx| inner[idx].label.clone())
        .collect::<Vec<_>>();
    tracing::debug!("Shortest path {} -> {}: {:?} (cost {})", source, destination, nodes, cost);
    Ok(Path { nodes, cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{graph_with_nodes, ring_graph};

    #[test]
    fn test_trivial_path() {
        let graph = ring_graph(&["a", "b", "c"]);
        let path = shortest_path(&graph, "b", "b").unwrap();
        assert_eq!(path.nodes(), ["b"]);
        assert_eq!(path.cost(), 0.0);
        assert_eq!(path.edges().count(), 0);
    }

    #[test]
    fn test_ring_opposite_corner_costs_two() {
        let graph = ring_graph(&["A", "B", "C", "D"]);
        let path = shortest_path(&graph, "A", "C").unwrap();

        assert_eq!(path.cost(), 2.0);
        assert_eq!(path.len(), 3);
        assert!(path.nodes() == ["A", "B", "C"] || path.nodes() == ["A", "D", "C"]);
    }

    #[test]
    fn test_weights_beat_hop_count() {
        let mut graph = graph_with_nodes(&["a", "b", "c", "d"]);
        graph.add_edge("a", "d", 10.0).unwrap();
        graph.add_edge("a", "b", 1.0).unwrap();
        graph.add_edge("b", "c", 1.0).unwrap();
        graph.add_edge("c", "d", 1.5).unwrap();

        let path = shortest_path(&graph, "a", "d").unwrap();
        assert_eq!(path.nodes(), ["a", "b", "c", "d"]);
        assert!((path.cost() - 3.5).abs() < 1e-12);
        assert!(path.contains_edge("c", "b"));
        assert!(!path.contains_edge("a", "d"));
    }

    #[test]
    fn test_disconnected_node_has_no_path() {
        let mut graph = ring_graph(&["A", "B", "C"]);
        graph.add_node("X").unwrap();

        let err = shortest_path(&graph, "A", "X").unwrap_err();
        assert_eq!(
            err,
            TopologyError::NoPath {
                from: "A".into(),
                to: "X".into()
            }
        );
    }

    #[test]
    fn test_unknown_endpoint() {
        let graph = ring_graph(&["A", "B", "C"]);
        assert_eq!(
            shortest_path(&graph, "A", "Q").unwrap_err(),
            TopologyError::NodeNotFound("Q".into())
        );
        assert_eq!(
            shortest_path(&graph, "Q", "A").unwrap_err(),
            TopologyError::NodeNotFound("Q".into())
        );
    }

    #[test]
    fn test_path_follows_existing_links() {
        let graph = ring_graph(&["a", "b", "c", "d", "e", "f", "g"]);
        let path = shortest_path(&graph, "a", "e").unwrap();
        assert_eq!(path.cost(), 3.0);
        for (x, y) in path.edges() {
            assert!(graph.has_edge(x, y));
        }
    }
}
