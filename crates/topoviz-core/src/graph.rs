//! Graph wrapper using petgraph::StableUnGraph keyed by node label

use crate::error::{TopologyError, TopologyResult};
use crate::layout::Layout;
use crate::model::*;
use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use std::collections::{BTreeSet, HashMap};
use std::f64::consts::TAU;

/// Radius of the circle new nodes are dropped onto before any layout runs.
pub const PLACEMENT_RADIUS: f64 = 0.5;

/// Minimum number of slots on the placement circle.
const PLACEMENT_SLOTS: usize = 8;

/// The network graph: undirected, simple (no self-loops, no parallel links),
/// with nodes addressed by their unique label.
pub struct NetworkGraph {
    inner: StableUnGraph<Node, Link>,
    index: HashMap<String, NodeIndex>,
    /// Labels in insertion order; StableGraph reuses vacated slots so its own
    /// index order can't be relied on after removals.
    order: Vec<String>,
    label_counter: u64,
}

impl std::fmt::Debug for NetworkGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl NetworkGraph {
    pub fn new() -> Self {
        NetworkGraph {
            inner: StableUnGraph::default(),
            index: HashMap::new(),
            order: Vec::new(),
            label_counter: 0,
        }
    }

    /// Add a node at the next free spot on the placement circle.
    pub fn add_node(&mut self, label: impl Into<String>) -> TopologyResult<&Node> {
        let label = label.into();
        if self.index.contains_key(&label) {
            return Err(TopologyError::DuplicateNode(label));
        }
        let idx = self.insert_node(label);
        Ok(&self.inner[idx])
    }

    /// Add a node with the next unused automatic label (`N1`, `N2`, ...).
    pub fn add_next_node(&mut self) -> String {
        let label = loop {
            // Wraps back to N1 and keeps skipping taken labels.
            self.label_counter = self.label_counter.checked_add(1).unwrap_or(1);
            let candidate = auto_label(self.label_counter);
            if !self.index.contains_key(&candidate) {
                break candidate;
            }
        };
        self.insert_node(label.clone());
        label
    }

    /// Caller has checked that `label` is free.
    fn insert_node(&mut self, label: String) -> NodeIndex {
        let position = default_placement(self.order.len());
        let idx = self.inner.add_node(Node {
            label: label.clone(),
            position,
        });
        self.index.insert(label.clone(), idx);
        tracing::debug!("Added node {} at ({:.3}, {:.3})", label, position.x, position.y);
        self.order.push(label);
        idx
    }

    /// Remove a node together with every link touching it.
    pub fn remove_node(&mut self, label: &str) -> TopologyResult<Node> {
        let idx = self.node_index(label)?;
        let node = self
            .inner
            .remove_node(idx)
            .ok_or_else(|| TopologyError::NodeNotFound(label.to_string()))?;
        self.index.remove(label);
        self.order.retain(|l| l != label);
        tracing::debug!("Removed node {}", label);
        Ok(node)
    }

    /// Link two existing, distinct, not-yet-linked nodes.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) -> TopologyResult<()> {
        let ia = self.node_index(a)?;
        let ib = self.node_index(b)?;
        if ia == ib {
            return Err(TopologyError::SelfLoop(a.to_string()));
        }
        if self.inner.find_edge(ia, ib).is_some() {
            return Err(TopologyError::DuplicateEdge(a.to_string(), b.to_string()));
        }
        if !(weight > 0.0 && weight.is_finite()) {
            return Err(TopologyError::InvalidWeight(weight));
        }

        self.inner.add_edge(ia, ib, Link { weight });
        tracing::debug!("Linked {} - {} (weight {})", a, b, weight);
        Ok(())
    }

    /// Link two nodes with the default weight.
    pub fn connect(&mut self, a: &str, b: &str) -> TopologyResult<()> {
        self.add_edge(a, b, DEFAULT_WEIGHT)
    }

    pub fn remove_edge(&mut self, a: &str, b: &str) -> TopologyResult<Link> {
        let missing = || TopologyError::EdgeNotFound(a.to_string(), b.to_string());
        let (Some(&ia), Some(&ib)) = (self.index.get(a), self.index.get(b)) else {
            return Err(missing());
        };
        let edge = self.inner.find_edge(ia, ib).ok_or_else(missing)?;
        let link = self.inner.remove_edge(edge).ok_or_else(missing)?;
        tracing::debug!("Unlinked {} - {}", a, b);
        Ok(link)
    }

    /// Labels of every node directly linked to `label`.
    pub fn neighbors(&self, label: &str) -> TopologyResult<BTreeSet<&str>> {
        let idx = self.node_index(label)?;
        Ok(self
            .inner
            .neighbors(idx)
            .map(|n| self.inner[n].label.as_str())
            .collect())
    }

    pub fn set_position(&mut self, label: &str, x: f64, y: f64) -> TopologyResult<()> {
        let idx = self.node_index(label)?;
        self.inner[idx].position = Position::new(x, y);
        Ok(())
    }

    /// Write every position in `layout` onto the graph. Fails without changing
    /// anything if the layout names an unknown node.
    pub fn apply_layout(&mut self, layout: &Layout) -> TopologyResult<()> {
        let resolved = layout
            .iter()
            .map(|(label, pos)| self.node_index(label).map(|idx| (idx, *pos)))
            .collect::<TopologyResult<Vec<_>>>()?;

        for (idx, pos) in resolved {
            self.inner[idx].position = pos;
        }
        tracing::debug!("Applied layout to {} nodes", layout.len());
        Ok(())
    }

    /// Get a node by label.
    pub fn node(&self, label: &str) -> Option<&Node> {
        self.index.get(label).map(|&idx| &self.inner[idx])
    }

    pub fn position(&self, label: &str) -> TopologyResult<Position> {
        let idx = self.node_index(label)?;
        Ok(self.inner[idx].position)
    }

    /// Current position of every node.
    pub fn positions(&self) -> Layout {
        self.nodes()
            .map(|n| (n.label.clone(), n.position))
            .collect()
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Check if a link exists between two nodes, in either direction.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edge_weight(a, b).is_some()
    }

    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let (ia, ib) = (*self.index.get(a)?, *self.index.get(b)?);
        let edge = self.inner.find_edge(ia, ib)?;
        self.inner.edge_weight(edge).map(|l| l.weight)
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of links.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().map(move |label| &self.inner[self.index[label]])
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> &[String] {
        &self.order
    }

    /// Iterate over all links.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.inner.edge_references().map(move |e| Edge {
            a: self.inner[e.source()].label.clone(),
            b: self.inner[e.target()].label.clone(),
            weight: e.weight().weight,
        })
    }

    /// Closest node to `(x, y)` within `pick_radius`, if any.
    pub fn nearest_node(&self, x: f64, y: f64, pick_radius: f64) -> Option<&Node> {
        let target = Position::new(x, y);
        let limit = pick_radius * pick_radius;
        self.nodes()
            .map(|n| (n, n.position.distance_sq(target)))
            .filter(|&(_, d)| d < limit)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(n, _)| n)
    }

    /// Drop every node and link, and restart automatic labels.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.index.clear();
        self.order.clear();
        self.label_counter = 0;
    }

    /// Make sure future automatic labels come after any `N<k>` already present.
    pub(crate) fn sync_label_counter(&mut self) {
        let highest = self
            .order
            .iter()
            .filter_map(|l| l.strip_prefix('N')?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.label_counter = self.label_counter.max(highest);
    }

    pub(crate) fn inner(&self) -> &StableUnGraph<Node, Link> {
        &self.inner
    }

    pub(crate) fn node_index(&self, label: &str) -> TopologyResult<NodeIndex> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| TopologyError::NodeNotFound(label.to_string()))
    }
}

impl Default for NetworkGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Label handed out by [`NetworkGraph::add_next_node`].
pub fn auto_label(n: u64) -> String {
    format!("N{n}")
}

/// Spot on the placement circle for the `existing`-th node.
fn default_placement(existing: usize) -> Position {
    let slots = PLACEMENT_SLOTS.max(existing + 1);
    let angle = TAU * existing as f64 / slots as f64;
    Position::new(PLACEMENT_RADIUS * angle.cos(), PLACEMENT_RADIUS * angle.sin())
}
