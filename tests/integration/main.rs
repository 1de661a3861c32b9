//! Integration tests for Topoviz
//!
//! These tests drive the editing, routing, animation, and save/load workflow
//! end to end, plus the CLI binary.

use std::process::Command;
use topoviz_core::*;

fn topoviz() -> Command {
    Command::new(env!("CARGO_BIN_EXE_topoviz"))
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let output = topoviz().arg("--help").output().expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("shortest paths"));
}

/// Generate a sample ring, then ask the CLI for a path across it
#[test]
fn test_cli_sample_then_path() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("ring.json");

    let status = topoviz()
        .args(["sample", "--kind", "ring", "-n", "6", "--out"])
        .arg(&file)
        .status()
        .unwrap();
    assert!(status.success());

    let output = topoviz()
        .arg("path")
        .arg(&file)
        .args(["--from", "N1", "--to", "N4"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("(cost 3)"));

    let missing = topoviz()
        .arg("path")
        .arg(&file)
        .args(["--from", "N1", "--to", "N99"])
        .output()
        .unwrap();
    assert!(!missing.status.success());
}

#[test]
fn test_cli_animate_emits_frames() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bus.json");
    let config = dir.path().join("topoviz.toml");
    std::fs::write(&config, "[animation]\nframes_per_edge = 3\nstep_ms = 1\n").unwrap();

    assert!(topoviz()
        .args(["sample", "--kind", "bus", "-n", "3", "--out"])
        .arg(&file)
        .status()
        .unwrap()
        .success());

    let output = topoviz()
        .arg("--config")
        .arg(&config)
        .arg("animate")
        .arg(&file)
        .args(["--from", "N1", "--to", "N3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let frames: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(frames.len(), 6);
    assert_eq!(frames[5]["status"], "finished");
    assert_eq!(frames[5]["edge_index"], 1);
}

/// Edit a network, route a packet, save, and reload it
#[test]
fn test_edit_route_animate_save_load() {
    let mut graph = NetworkGraph::new();
    for _ in 0..4 {
        graph.add_next_node();
    }
    graph.connect("N1", "N2").unwrap();
    graph.connect("N2", "N3").unwrap();
    graph.connect("N3", "N4").unwrap();
    graph.connect("N4", "N1").unwrap();

    let layout = compute_layout(&graph, &TopologyKind::Ring, Position::default(), 1.0).unwrap();
    graph.apply_layout(&layout).unwrap();

    // Manual drag, then route across the ring.
    graph.set_position("N2", 0.1, 0.9).unwrap();
    let path = shortest_path(&graph, "N1", "N3").unwrap();
    assert_eq!(path.cost(), 2.0);

    let mut animator = PacketAnimator::default();
    animator.start(&graph, &path, 100).unwrap();
    let mut seen = Vec::new();
    let mut last = None;
    while let Some(frame) = animator.tick() {
        if let Some(edge) = frame.edge_index {
            if seen.last() != Some(&edge) {
                seen.push(edge);
            }
        }
        last = Some(frame);
        if frame.status == AnimationStatus::Finished {
            break;
        }
    }
    assert_eq!(seen, [0, 1]);
    assert_eq!(last.unwrap().position, graph.position("N3").unwrap());

    let dir = tempfile::tempdir().unwrap();
    let file = save_snapshot(&graph, &dir.path().join("ring")).unwrap();
    let mut reloaded = load_snapshot(&file).unwrap();

    assert_eq!(reloaded.positions(), graph.positions());
    assert_eq!(reloaded.edge_count(), 4);
    assert_eq!(reloaded.position("N2").unwrap(), Position::new(0.1, 0.9));
    assert_eq!(reloaded.add_next_node(), "N5");
}

/// A rejected snapshot never yields a graph
#[test]
fn test_bad_snapshot_is_rejected() {
    let doc = Snapshot {
        nodes: vec![SnapshotNode {
            label: "A".into(),
            x: 0.0,
            y: 0.0,
        }],
        edges: vec![SnapshotEdge {
            from: "A".into(),
            to: "B".into(),
            weight: None,
        }],
    };
    assert!(matches!(decode(&doc), Err(TopologyError::MalformedSnapshot(_))));
}

/// Removing a node mid-session cuts off routes through it
#[test]
fn test_removal_changes_routes() {
    let mut graph = NetworkGraph::new();
    for label in ["A", "B", "C", "X"] {
        graph.add_node(label).unwrap();
    }
    graph.connect("A", "B").unwrap();
    graph.connect("B", "C").unwrap();
    graph.add_edge("A", "X", 5.0).unwrap();
    graph.connect("X", "C").unwrap();

    assert_eq!(shortest_path(&graph, "A", "C").unwrap().nodes(), ["A", "B", "C"]);

    graph.remove_node("B").unwrap();
    let detour = shortest_path(&graph, "A", "C").unwrap();
    assert_eq!(detour.nodes(), ["A", "X", "C"]);
    assert_eq!(detour.cost(), 6.0);

    graph.remove_edge("X", "C").unwrap();
    assert!(matches!(
        shortest_path(&graph, "A", "C"),
        Err(TopologyError::NoPath { .. })
    ));
}

#[test]
fn test_cli_pick_uses_pick_radius() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("star.json");
    assert!(topoviz()
        .args(["sample", "--kind", "star", "-n", "4", "--out"])
        .arg(&file)
        .status()
        .unwrap()
        .success());

    // The hub of a star sample sits at the origin.
    let output = topoviz()
        .arg("pick")
        .arg(&file)
        .args(["--x", "0.02", "--y", "-0.01"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "N1");

    let miss = topoviz()
        .arg("pick")
        .arg(&file)
        .args(["--x", "0.4", "--y", "0.4"])
        .output()
        .unwrap();
    assert!(!miss.status.success());
}
