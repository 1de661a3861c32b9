//! Error types for graph editing, routing, and snapshot loading

use thiserror::Error;

/// Every recoverable failure the core can report.
///
/// None of these leave the graph in a partially modified state: an operation
/// either applies fully or returns one of these and changes nothing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    /// A node with this label already exists
    #[error("node '{0}' already exists")]
    DuplicateNode(String),

    /// No node with this label
    #[error("node '{0}' not found")]
    NodeNotFound(String),

    /// Both endpoints of a link are the same node
    #[error("cannot link node '{0}' to itself")]
    SelfLoop(String),

    /// The unordered pair is already linked
    #[error("link {0} - {1} already exists")]
    DuplicateEdge(String, String),

    /// The unordered pair is not linked
    #[error("link {0} - {1} not found")]
    EdgeNotFound(String, String),

    /// Destination is not reachable from source
    #[error("no path from '{from}' to '{to}'")]
    NoPath { from: String, to: String },

    /// An animation was requested over a path with no nodes
    #[error("path is empty")]
    EmptyPath,

    /// A snapshot document failed validation
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Link weights must be positive and finite
    #[error("invalid link weight {0}")]
    InvalidWeight(f64),

    /// A hybrid layout grouping could not be applied
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// `start` was called while an animation is still running
    #[error("an animation is already in progress")]
    AnimationInProgress,
}

/// Result type for core operations
pub type TopologyResult<T> = Result<T, TopologyError>;
