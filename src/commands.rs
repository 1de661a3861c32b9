//! CLI command implementations

use anyhow::{bail, Context};
use std::path::Path;
use topoviz_core::{
    compute_layout_with, load_snapshot, save_snapshot, shortest_path, AnimationStatus,
    LayoutGroup, PacketAnimator, SampleKind, TopologyKind, VizConfig,
};

pub fn load_config(path: Option<&Path>) -> anyhow::Result<VizConfig> {
    match path {
        Some(path) => VizConfig::load(path),
        None => Ok(VizConfig::default()),
    }
}

pub fn sample(config: &VizConfig, kind: &str, count: usize, out: &Path) -> anyhow::Result<()> {
    let kind: SampleKind = kind.parse()?;
    let graph = topoviz_core::sample::build(kind, count, &config.layout_options())?;
    let written = save_snapshot(&graph, out)?;
    println!("{}", written.display());
    Ok(())
}

pub fn layout(
    config: &VizConfig,
    snapshot: &Path,
    kind: &str,
    hub: Option<String>,
    groups: &[String],
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let mut graph = load_snapshot(snapshot)?;
    let kind = topology_kind(kind, hub, groups)?;

    let layout = compute_layout_with(&graph, &kind, &config.layout_options())?;
    graph.apply_layout(&layout)?;
    tracing::info!("Applied {} layout to {} nodes", kind.name(), layout.len());

    save_snapshot(&graph, out.unwrap_or(snapshot))?;
    Ok(())
}

pub fn path(snapshot: &Path, from: &str, to: &str) -> anyhow::Result<()> {
    let graph = load_snapshot(snapshot)?;
    let path = shortest_path(&graph, from, to).inspect_err(|e| tracing::warn!("{}", e))?;
    println!("{} (cost {})", path.nodes().join(" -> "), path.cost());
    Ok(())
}

pub fn animate(
    config: &VizConfig,
    snapshot: &Path,
    from: &str,
    to: &str,
    realtime: bool,
) -> anyhow::Result<()> {
    let graph = load_snapshot(snapshot)?;
    let path = shortest_path(&graph, from, to).inspect_err(|e| tracing::warn!("{}", e))?;

    let mut animator = PacketAnimator::new(config.animator_config());
    animator.start(&graph, &path, config.animation.step_ms)?;
    tracing::debug!(
        "Animating {} frames per link toward {}",
        animator.config().frames_per_edge,
        path.destination().unwrap_or_default()
    );
    let step = animator.step_duration().unwrap_or_default();

    while animator.status() == AnimationStatus::Playing {
        let Some(frame) = animator.tick() else { break };
        println!("{}", serde_json::to_string(&frame)?);
        if realtime {
            std::thread::sleep(step);
        }
    }

    tracing::info!("Packet delivered along {}", path.nodes().join(" -> "));
    Ok(())
}

pub fn pick(config: &VizConfig, snapshot: &Path, x: f64, y: f64) -> anyhow::Result<()> {
    let graph = load_snapshot(snapshot)?;
    match graph.nearest_node(x, y, config.editor.pick_radius) {
        Some(node) => println!("{}", node.label),
        None => bail!("no node within {} of ({x}, {y})", config.editor.pick_radius),
    }
    Ok(())
}

pub fn inspect(snapshot: &Path) -> anyhow::Result<()> {
    let graph = load_snapshot(snapshot)?;
    println!("{} nodes, {} links", graph.node_count(), graph.edge_count());
    for node in graph.nodes() {
        let neighbors = graph.neighbors(&node.label)?;
        println!(
            "  {} ({:.3}, {:.3}) -> {}",
            node.label,
            node.position.x,
            node.position.y,
            neighbors.into_iter().collect::<Vec<_>>().join(", ")
        );
    }
    Ok(())
}

/// Resolve the `--kind`, `--hub` and `--group` flags into a topology.
pub fn topology_kind(kind: &str, hub: Option<String>, groups: &[String]) -> anyhow::Result<TopologyKind> {
    let kind = match kind.to_ascii_lowercase().as_str() {
        "star" => TopologyKind::Star { hub },
        "ring" => TopologyKind::Ring,
        "bus" => TopologyKind::Bus,
        "hybrid" => {
            if groups.is_empty() {
                bail!("a hybrid layout needs at least one --group");
            }
            let groups = groups
                .iter()
                .map(|g| parse_group(g))
                .collect::<anyhow::Result<Vec<_>>>()?;
            TopologyKind::Hybrid { groups }
        }
        other => bail!("unknown topology kind '{other}'"),
    };
    Ok(kind)
}

/// `star:hub,a,b` → a star group over those nodes, first one as hub.
fn parse_group(flag: &str) -> anyhow::Result<LayoutGroup> {
    let (kind, labels) = flag
        .split_once(':')
        .with_context(|| format!("group '{flag}' should look like kind:label,label"))?;
    let labels: Vec<&str> = labels
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let kind = topology_kind(kind, None, &[])?;
    if matches!(kind, TopologyKind::Hybrid { .. }) {
        bail!("groups cannot nest hybrid layouts on the command line");
    }
    Ok(LayoutGroup::new(kind, labels))
}
