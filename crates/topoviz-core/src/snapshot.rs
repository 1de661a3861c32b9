//! Snapshot document: the flat node/link form used for save and load

use crate::error::{TopologyError, TopologyResult};
use crate::graph::NetworkGraph;
use crate::model::{Position, DEFAULT_WEIGHT};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub from: String,
    pub to: String,
    /// Omitted means [`DEFAULT_WEIGHT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Older document form: bare labels, `[a, b]` link pairs, and a separate
/// `pos` table of `[x, y]` coordinates.
#[derive(Debug, Deserialize)]
struct LegacySnapshot {
    #[serde(default)]
    nodes: Vec<String>,
    #[serde(default)]
    edges: Vec<(String, String)>,
    #[serde(default)]
    pos: HashMap<String, (f64, f64)>,
}

impl From<LegacySnapshot> for Snapshot {
    fn from(legacy: LegacySnapshot) -> Self {
        let nodes = legacy
            .nodes
            .into_iter()
            .map(|label| {
                let (x, y) = legacy.pos.get(&label).copied().unwrap_or((0.0, 0.0));
                SnapshotNode { label, x, y }
            })
            .collect();
        let edges = legacy
            .edges
            .into_iter()
            .map(|(from, to)| SnapshotEdge { from, to, weight: None })
            .collect();
        Snapshot { nodes, edges }
    }
}

/// Capture every node (with its position) and every link.
pub fn encode(graph: &NetworkGraph) -> Snapshot {
    let nodes = graph
        .nodes()
        .map(|n| SnapshotNode {
            label: n.label.clone(),
            x: n.position.x,
            y: n.position.y,
        })
        .collect();
    let edges = graph
        .edges()
        .map(|e| SnapshotEdge {
            from: e.a,
            to: e.b,
            weight: Some(e.weight),
        })
        .collect();
    Snapshot { nodes, edges }
}

/// Rebuild a graph from a document. The whole document is validated before
/// any graph is built, so a failure never yields a partial graph.
pub fn decode(snapshot: &Snapshot) -> TopologyResult<NetworkGraph> {
    validate(snapshot)?;

    let mut graph = NetworkGraph::new();
    for node in &snapshot.nodes {
        graph.add_node(node.label.clone()).map_err(malformed)?;
        graph.set_position(&node.label, node.x, node.y).map_err(malformed)?;
    }
    for edge in &snapshot.edges {
        graph
            .add_edge(&edge.from, &edge.to, edge.weight.unwrap_or(DEFAULT_WEIGHT))
            .map_err(malformed)?;
    }
    graph.sync_label_counter();

    tracing::debug!(
        "Decoded snapshot: {} nodes, {} links",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Decode from a parsed JSON value, accepting both document forms.
pub fn decode_value(value: serde_json::Value) -> TopologyResult<NetworkGraph> {
    let snapshot: Snapshot = if is_legacy(&value) {
        serde_json::from_value::<LegacySnapshot>(value)
            .map_err(|e| TopologyError::MalformedSnapshot(e.to_string()))?
            .into()
    } else {
        serde_json::from_value(value).map_err(|e| TopologyError::MalformedSnapshot(e.to_string()))?
    };
    decode(&snapshot)
}

pub fn decode_json(text: &str) -> TopologyResult<NetworkGraph> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| TopologyError::MalformedSnapshot(e.to_string()))?;
    decode_value(value)
}

pub fn encode_json(graph: &NetworkGraph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&encode(graph))
}

/// Positions carried by a document, keyed by label.
pub fn positions(snapshot: &Snapshot) -> HashMap<String, Position> {
    snapshot
        .nodes
        .iter()
        .map(|n| (n.label.clone(), Position::new(n.x, n.y)))
        .collect()
}

fn is_legacy(value: &serde_json::Value) -> bool {
    value.get("pos").is_some()
        || value
            .get("nodes")
            .and_then(|n| n.as_array())
            .and_then(|n| n.first())
            .is_some_and(|first| first.is_string())
}

fn validate(snapshot: &Snapshot) -> TopologyResult<()> {
    let mut labels = HashSet::new();
    for node in &snapshot.nodes {
        if !labels.insert(node.label.as_str()) {
            return Err(TopologyError::MalformedSnapshot(format!(
                "duplicate node label '{}'",
                node.label
            )));
        }
        if !(node.x.is_finite() && node.y.is_finite()) {
            return Err(TopologyError::MalformedSnapshot(format!(
                "node '{}' has a non-finite position",
                node.label
            )));
        }
    }

    let mut pairs = HashSet::new();
    for edge in &snapshot.edges {
        for end in [&edge.from, &edge.to] {
            if !labels.contains(end.as_str()) {
                return Err(TopologyError::MalformedSnapshot(format!(
                    "link {} - {} references unknown node '{}'",
                    edge.from, edge.to, end
                )));
            }
        }
        if edge.from == edge.to {
            return Err(TopologyError::MalformedSnapshot(format!(
                "self-loop on '{}'",
                edge.from
            )));
        }
        if let Some(w) = edge.weight {
            if !(w > 0.0 && w.is_finite()) {
                return Err(TopologyError::MalformedSnapshot(format!(
                    "link {} - {} has invalid weight {}",
                    edge.from, edge.to, w
                )));
            }
        }
        let key = if edge.from < edge.to {
            (edge.from.as_str(), edge.to.as_str())
        } else {
            (edge.to.as_str(), edge.from.as_str())
        };
        if !pairs.insert(key) {
            return Err(TopologyError::MalformedSnapshot(format!(
                "duplicate link {} - {}",
                edge.from, edge.to
            )));
        }
    }
    Ok(())
}

fn malformed(err: TopologyError) -> TopologyError {
    TopologyError::MalformedSnapshot(err.to_string())
}
