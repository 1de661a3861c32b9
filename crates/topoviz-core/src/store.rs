//! Reading and writing snapshot files

use crate::graph::NetworkGraph;
use crate::snapshot;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Extension given to snapshot files saved without one.
pub const SNAPSHOT_EXTENSION: &str = "json";

/// Add the snapshot extension if `path` has none.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(SNAPSHOT_EXTENSION)
    }
}

/// Serialize graph to a pretty-printed JSON snapshot, creating parent directories.
pub fn save_snapshot(graph: &NetworkGraph, path: &Path) -> anyhow::Result<PathBuf> {
    let path = with_default_extension(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }

    let json_str = snapshot::encode_json(graph)?;
    std::fs::write(&path, json_str)
        .with_context(|| format!("Cannot write snapshot {}", path.display()))?;

    tracing::info!(
        "Saved {} nodes, {} links to {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(path)
}

/// Load and validate a snapshot file.
pub fn load_snapshot(path: &Path) -> anyhow::Result<NetworkGraph> {
    let json_str = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read snapshot {}", path.display()))?;
    let graph = snapshot::decode_json(&json_str)
        .with_context(|| format!("Cannot load snapshot {}", path.display()))?;

    tracing::info!(
        "Loaded {} nodes, {} links from {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TopologyError;
    use crate::test_utils::line_graph;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let graph = line_graph();

        let written = save_snapshot(&graph, &dir.path().join("nested/net")).unwrap();
        assert_eq!(written.extension().unwrap(), "json");

        let loaded = load_snapshot(&written).unwrap();
        assert_eq!(loaded.labels(), graph.labels());
        assert!(loaded.has_edge("B", "C"));
    }

    #[test]
    fn test_load_reports_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"nodes":[],"edges":[{"from":"a","to":"b"}]}"#).unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TopologyError>(),
            Some(TopologyError::MalformedSnapshot(_))
        ));
    }
}
