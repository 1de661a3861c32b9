//! Core data structures for the network graph

use serde::{Deserialize, Serialize};

/// Weight given to a link when none is specified.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A 2-D point in diagram space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Position, t: f64) -> Position {
        Position {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Squared euclidean distance.
    pub fn distance_sq(self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn offset(self, dx: f64, dy: f64) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Position { x, y }
    }
}

/// A labeled device in the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique, immutable identity.
    pub label: String,
    pub position: Position,
}

/// Payload stored on each undirected link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub weight: f64,
}

impl Default for Link {
    fn default() -> Self {
        Link { weight: DEFAULT_WEIGHT }
    }
}

/// Owned view of a link with its endpoint labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: String,
    pub b: String,
    pub weight: f64,
}

/// Layout geometry for a set of nodes. Determines positions only, never links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TopologyKind {
    /// Hub at the center, everything else on a circle around it.
    /// The first node in insertion order is the hub when none is named.
    Star { hub: Option<String> },
    Ring,
    Bus,
    /// Several sub-topologies, each placed in its own grid slot.
    Hybrid { groups: Vec<LayoutGroup> },
}

impl TopologyKind {
    pub fn star() -> Self {
        TopologyKind::Star { hub: None }
    }

    pub fn star_with_hub(hub: impl Into<String>) -> Self {
        TopologyKind::Star { hub: Some(hub.into()) }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TopologyKind::Star { .. } => "star",
            TopologyKind::Ring => "ring",
            TopologyKind::Bus => "bus",
            TopologyKind::Hybrid { .. } => "hybrid",
        }
    }
}

/// One member of a hybrid layout: a kind plus the nodes it arranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutGroup {
    pub kind: TopologyKind,
    pub nodes: Vec<String>,
}

impl LayoutGroup {
    pub fn new<I, S>(kind: TopologyKind, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LayoutGroup {
            kind,
            nodes: nodes.into_iter().map(Into::into).collect(),
        }
    }
}
