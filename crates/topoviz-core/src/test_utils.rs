//! Fixture graphs shared by the unit tests

use crate::graph::NetworkGraph;

/// Nodes only, no links, in the given order.
pub fn graph_with_nodes(labels: &[&str]) -> NetworkGraph {
    let mut graph = NetworkGraph::new();
    for label in labels {
        graph.add_node(*label).unwrap();
    }
    graph
}

/// Unit-weight closed loop through `labels` in order.
pub fn ring_graph(labels: &[&str]) -> NetworkGraph {
    let mut graph = graph_with_nodes(labels);
    for i in 0..labels.len() {
        graph.connect(labels[i], labels[(i + 1) % labels.len()]).unwrap();
    }
    graph
}

/// `A - B - C` on the x axis at 0, 1 and 2.
pub fn line_graph() -> NetworkGraph {
    let mut graph = graph_with_nodes(&["A", "B", "C"]);
    for (i, label) in ["A", "B", "C"].iter().enumerate() {
        graph.set_position(label, i as f64, 0.0).unwrap();
    }
    graph.connect("A", "B").unwrap();
    graph.connect("B", "C").unwrap();
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_fixture() {
        let graph = ring_graph(&["a", "b", "c", "d"]);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.has_edge("a", "d"));
    }
}
