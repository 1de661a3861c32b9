//! Ready-made demo networks for each topology kind

use crate::error::{TopologyError, TopologyResult};
use crate::graph::NetworkGraph;
use crate::layout::{compute_layout_with, LayoutOptions};
use crate::model::{LayoutGroup, TopologyKind};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Star,
    Ring,
    Bus,
    Hybrid,
}

impl FromStr for SampleKind {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "star" => Ok(SampleKind::Star),
            "ring" => Ok(SampleKind::Ring),
            "bus" => Ok(SampleKind::Bus),
            "hybrid" => Ok(SampleKind::Hybrid),
            other => Err(TopologyError::InvalidLayout(format!("unknown topology '{other}'"))),
        }
    }
}

/// Build `count` auto-labelled nodes wired and laid out as `kind`.
///
/// - star: `N1` is the hub, linked to every other node
/// - ring: each node linked to the next, last back to first
/// - bus: a chain along the backbone
/// - hybrid: a star of the first half, a ring of the rest, hub bridged to the ring
pub fn build(kind: SampleKind, count: usize, options: &LayoutOptions) -> TopologyResult<NetworkGraph> {
    let mut graph = NetworkGraph::new();
    let labels: Vec<String> = (0..count).map(|_| graph.add_next_node()).collect();

    let layout_kind = match kind {
        SampleKind::Star => {
            link_star(&mut graph, &labels)?;
            TopologyKind::star()
        }
        SampleKind::Ring => {
            link_ring(&mut graph, &labels)?;
            TopologyKind::Ring
        }
        SampleKind::Bus => {
            link_chain(&mut graph, &labels)?;
            TopologyKind::Bus
        }
        SampleKind::Hybrid => {
            let (star, ring) = labels.split_at(count.div_ceil(2));
            link_star(&mut graph, star)?;
            link_ring(&mut graph, ring)?;

            let mut groups = Vec::new();
            if !star.is_empty() {
                groups.push(LayoutGroup::new(TopologyKind::star(), star.iter().cloned()));
            }
            if let (Some(hub), Some(gateway)) = (star.first(), ring.first()) {
                graph.connect(hub, gateway)?;
                groups.push(LayoutGroup::new(TopologyKind::Ring, ring.iter().cloned()));
            }
            TopologyKind::Hybrid { groups }
        }
    };

    let layout = compute_layout_with(&graph, &layout_kind, options)?;
    graph.apply_layout(&layout)?;
    tracing::debug!("Built {:?} sample with {} nodes", kind, count);
    Ok(graph)
}

fn link_star(graph: &mut NetworkGraph, labels: &[String]) -> TopologyResult<()> {
    if let Some((hub, leaves)) = labels.split_first() {
        for leaf in leaves {
            graph.connect(hub, leaf)?;
        }
    }
    Ok(())
}

fn link_chain(graph: &mut NetworkGraph, labels: &[String]) -> TopologyResult<()> {
    for pair in labels.windows(2) {
        graph.connect(&pair[0], &pair[1])?;
    }
    Ok(())
}

fn link_ring(graph: &mut NetworkGraph, labels: &[String]) -> TopologyResult<()> {
    link_chain(graph, labels)?;
    if labels.len() >= 3 {
        graph.connect(&labels[labels.len() - 1], &labels[0])?;
    }
    Ok(())
}
