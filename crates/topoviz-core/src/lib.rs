//! Topoviz Core: network graph model, topology layouts, shortest-path routing,
//! packet animation, and snapshots

pub mod error;
pub mod model;
pub mod graph;
pub mod layout;
pub mod path;
pub mod animation;
pub mod snapshot;
pub mod store;
pub mod config;
pub mod sample;


#[cfg(test)]
pub mod test_utils;

pub use error::{TopologyError, TopologyResult};
pub use model::{Position, Node, Link, Edge, TopologyKind, LayoutGroup, DEFAULT_WEIGHT};
pub use graph::{NetworkGraph, auto_label};
pub use layout::{Layout, LayoutOptions, compute_layout, compute_layout_with};
pub use path::{Path, shortest_path};
pub use animation::{PacketAnimator, AnimatorConfig, AnimationStatus, Easing, Frame};
pub use snapshot::{Snapshot, SnapshotNode, SnapshotEdge, encode, decode, decode_json, decode_value, encode_json};
pub use store::{save_snapshot, load_snapshot, SNAPSHOT_EXTENSION};
pub use config::VizConfig;
pub use sample::SampleKind;
