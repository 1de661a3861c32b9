//! Topology layouts: star, ring, bus, and grid-slotted hybrids
//!
//! Layouts are pure: they read the graph and return positions, and never add
//! or remove links. Call [`NetworkGraph::apply_layout`] to write the result back.

use crate::error::{TopologyError, TopologyResult};
use crate::graph::NetworkGraph;
use crate::model::{LayoutGroup, Position, TopologyKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

/// Node label → position.
pub type Layout = HashMap<String, Position>;

/// Geometry knobs shared by every topology kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub center: Position,
    /// Circle radius for star and ring.
    pub radius: f64,
    /// Distance between neighbours on a bus backbone.
    pub bus_spacing: f64,
    /// Gap kept between hybrid slots.
    pub slot_padding: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            center: Position::default(),
            radius: 0.8,
            bus_spacing: 0.4,
            slot_padding: 0.3,
        }
    }
}

/// Lay out every node of `graph` as `kind` around `center`.
pub fn compute_layout(
    graph: &NetworkGraph,
    kind: &TopologyKind,
    center: Position,
    radius: f64,
) -> TopologyResult<Layout> {
    let options = LayoutOptions {
        center,
        radius,
        ..LayoutOptions::default()
    };
    compute_layout_with(graph, kind, &options)
}

pub fn compute_layout_with(
    graph: &NetworkGraph,
    kind: &TopologyKind,
    options: &LayoutOptions,
) -> TopologyResult<Layout> {
    let labels: Vec<&str> = graph.labels().iter().map(String::as_str).collect();
    let layout = arrange(graph, kind, &labels, options)?;
    tracing::debug!("Computed {} layout for {} nodes", kind.name(), layout.len());
    Ok(layout)
}

fn arrange(
    graph: &NetworkGraph,
    kind: &TopologyKind,
    labels: &[&str],
    options: &LayoutOptions,
) -> TopologyResult<Layout> {
    match kind {
        TopologyKind::Star { hub } => star(graph, hub.as_deref(), labels, options),
        TopologyKind::Ring => Ok(circle(labels, options.center, options.radius)),
        TopologyKind::Bus => Ok(bus(labels, options)),
        TopologyKind::Hybrid { groups } => hybrid(graph, groups, labels, options),
    }
}

fn star(
    graph: &NetworkGraph,
    hub: Option<&str>,
    labels: &[&str],
    options: &LayoutOptions,
) -> TopologyResult<Layout> {
    let hub = match hub {
        Some(hub) => {
            if !graph.contains_node(hub) {
                return Err(TopologyError::NodeNotFound(hub.to_string()));
            }
            if !labels.contains(&hub) {
                return Err(TopologyError::InvalidLayout(format!(
                    "star hub '{hub}' is not part of the arranged nodes"
                )));
            }
            hub
        }
        None => match labels.first() {
            Some(first) => *first,
            None => return Ok(Layout::new()),
        },
    };

    let leaves: Vec<&str> = labels.iter().copied().filter(|&l| l != hub).collect();
    let mut layout = circle(&leaves, options.center, options.radius);
    layout.insert(hub.to_string(), options.center);
    Ok(layout)
}

/// Evenly spaced around a circle, in the given order.
fn circle(labels: &[&str], center: Position, radius: f64) -> Layout {
    let n = labels.len();
    labels
        .iter()
        .enumerate()
        .map(|(i, &label)| {
            let angle = TAU * i as f64 / n as f64;
            let pos = center.offset(radius * angle.cos(), radius * angle.sin());
            (label.to_string(), pos)
        })
        .collect()
}

/// One horizontal line centred on `center`.
fn bus(labels: &[&str], options: &LayoutOptions) -> Layout {
    let mid = labels.len().saturating_sub(1) as f64 / 2.0;
    labels
        .iter()
        .enumerate()
        .map(|(i, &label)| {
            let dx = (i as f64 - mid) * options.bus_spacing;
            (label.to_string(), options.center.offset(dx, 0.0))
        })
        .collect()
}

/// Axis-aligned bounds of a layout: (min, max).
fn bounds(layout: &Layout) -> (Position, Position) {
    let mut min = Position::new(f64::INFINITY, f64::INFINITY);
    let mut max = Position::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for pos in layout.values() {
        min = Position::new(min.x.min(pos.x), min.y.min(pos.y));
        max = Position::new(max.x.max(pos.x), max.y.max(pos.y));
    }
    (min, max)
}

fn hybrid(
    graph: &NetworkGraph,
    groups: &[LayoutGroup],
    scope: &[&str],
    options: &LayoutOptions,
) -> TopologyResult<Layout> {
    let mut claimed = HashSet::new();
    for group in groups {
        if group.nodes.is_empty() {
            return Err(TopologyError::InvalidLayout(format!(
                "empty {} group",
                group.kind.name()
            )));
        }
        for label in &group.nodes {
            if !graph.contains_node(label) {
                return Err(TopologyError::NodeNotFound(label.clone()));
            }
            if !scope.contains(&label.as_str()) {
                return Err(TopologyError::InvalidLayout(format!(
                    "node '{label}' is outside the enclosing group"
                )));
            }
            if !claimed.insert(label.as_str()) {
                return Err(TopologyError::InvalidLayout(format!(
                    "node '{label}' appears in more than one group"
                )));
            }
        }
    }
    if groups.is_empty() {
        return Ok(Layout::new());
    }

    // Lay each group out around the origin first so its extent is known.
    let local_options = LayoutOptions {
        center: Position::default(),
        ..*options
    };
    let mut locals = Vec::with_capacity(groups.len());
    for group in groups {
        let labels: Vec<&str> = group.nodes.iter().map(String::as_str).collect();
        let local = arrange(graph, &group.kind, &labels, &local_options)?;
        let extent = bounds(&local);
        locals.push((local, extent));
    }

    let slot_w = locals
        .iter()
        .map(|(_, (min, max))| max.x - min.x)
        .fold(0.0, f64::max)
        + options.slot_padding;
    let slot_h = locals
        .iter()
        .map(|(_, (min, max))| max.y - min.y)
        .fold(0.0, f64::max)
        + options.slot_padding;

    let cols = (groups.len() as f64).sqrt().ceil() as usize;
    let rows = groups.len().div_ceil(cols);

    let mut layout = Layout::new();
    for (i, (local, (min, max))) in locals.into_iter().enumerate() {
        let (col, row) = (i % cols, i / cols);
        let slot_center = options.center.offset(
            (col as f64 - (cols - 1) as f64 / 2.0) * slot_w,
            (row as f64 - (rows - 1) as f64 / 2.0) * slot_h,
        );
        let dx = slot_center.x - (min.x + max.x) / 2.0;
        let dy = slot_center.y - (min.y + max.y) / 2.0;
        layout.extend(local.into_iter().map(|(label, pos)| (label, pos.offset(dx, dy))));
    }
    Ok(layout)
}
