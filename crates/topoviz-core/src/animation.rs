//! Packet animation as an externally ticked state machine
//!
//! `Idle → Playing ⇄ Paused → Finished | Canceled`. The animator owns no timer:
//! a host scheduler calls [`PacketAnimator::tick`] once per frame and draws the
//! returned [`Frame`].

use crate::error::{TopologyError, TopologyResult};
use crate::graph::NetworkGraph;
use crate::model::Position;
use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStatus {
    Idle,
    Playing,
    Paused,
    Finished,
    Canceled,
}

impl AnimationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, AnimationStatus::Finished | AnimationStatus::Canceled)
    }
}

/// How the packet accelerates along each link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// `t²(3 − 2t)`: slow off the node, fast mid-link, slow into the next node.
    SmoothStep,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimatorConfig {
    /// Interpolated frames per traversed link. Always at least 1.
    pub frames_per_edge: usize,
    pub easing: Easing,
    /// How many recent packet positions to keep for drawing a trail.
    pub trail_len: usize,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        AnimatorConfig {
            frames_per_edge: 20,
            easing: Easing::Linear,
            trail_len: 15,
        }
    }
}

/// What the renderer should draw for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub position: Position,
    /// Index into the path's links; `None` for a single-node path.
    pub edge_index: Option<usize>,
    pub status: AnimationStatus,
}

struct Timeline {
    path: Path,
    frames: Vec<(Position, Option<usize>)>,
    cursor: usize,
    step: Duration,
}

pub struct PacketAnimator {
    config: AnimatorConfig,
    status: AnimationStatus,
    timeline: Option<Timeline>,
    last: Option<Frame>,
    trail: VecDeque<Position>,
}

impl PacketAnimator {
    pub fn new(config: AnimatorConfig) -> Self {
        PacketAnimator {
            config: AnimatorConfig {
                frames_per_edge: config.frames_per_edge.max(1),
                ..config
            },
            status: AnimationStatus::Idle,
            timeline: None,
            last: None,
            trail: VecDeque::new(),
        }
    }

    /// Precompute every frame for `path` and begin playing.
    ///
    /// The path is checked against `graph`: every label must exist and every
    /// consecutive pair must be linked. On error the animator is unchanged.
    pub fn start(&mut self, graph: &NetworkGraph, path: &Path, step_duration_ms: u64) -> TopologyResult<()> {
        if matches!(self.status, AnimationStatus::Playing | AnimationStatus::Paused) {
            return Err(TopologyError::AnimationInProgress);
        }
        if path.is_empty() {
            return Err(TopologyError::EmptyPath);
        }

        let points = path
            .nodes()
            .iter()
            .map(|label| graph.position(label))
            .collect::<TopologyResult<Vec<_>>>()?;
        for (a, b) in path.edges() {
            if !graph.has_edge(a, b) {
                return Err(TopologyError::EdgeNotFound(a.to_string(), b.to_string()));
            }
        }

        let frames = self.interpolate(&points);
        let first = Frame {
            position: points[0],
            edge_index: frames.first().and_then(|&(_, edge)| edge),
            status: AnimationStatus::Playing,
        };

        tracing::debug!(
            "Animating {} links over {} frames",
            path.len() - 1,
            frames.len()
        );
        self.timeline = Some(Timeline {
            path: path.clone(),
            frames,
            cursor: 0,
            step: Duration::from_millis(step_duration_ms),
        });
        self.status = AnimationStatus::Playing;
        self.last = Some(first);
        self.trail.clear();
        Ok(())
    }

    fn interpolate(&self, points: &[Position]) -> Vec<(Position, Option<usize>)> {
        if points.len() == 1 {
            return vec![(points[0], None)];
        }

        let per_edge = self.config.frames_per_edge;
        let mut frames = Vec::with_capacity((points.len() - 1) * per_edge);
        for (edge, pair) in points.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            for k in 1..=per_edge {
                let position = if k == per_edge {
                    // Land exactly on the node, not on a float approximation.
                    to
                } else {
                    let t = k as f64 / per_edge as f64;
                    from.lerp(to, self.config.easing.apply(t))
                };
                frames.push((position, Some(edge)));
            }
        }
        frames
    }

    /// Advance one frame.
    ///
    /// Returns `None` while idle. Once paused, finished, or canceled, the last
    /// emitted position is returned again without advancing.
    pub fn tick(&mut self) -> Option<Frame> {
        if self.status != AnimationStatus::Playing {
            return self.last.map(|frame| Frame {
                status: self.status,
                ..frame
            });
        }

        let timeline = self.timeline.as_mut()?;
        let (position, edge_index) = *timeline.frames.get(timeline.cursor)?;
        timeline.cursor += 1;
        if timeline.cursor == timeline.frames.len() {
            self.status = AnimationStatus::Finished;
            tracing::debug!("Packet delivered");
        }

        let frame = Frame {
            position,
            edge_index,
            status: self.status,
        };
        self.last = Some(frame);
        self.trail.push_back(position);
        while self.trail.len() > self.config.trail_len {
            self.trail.pop_front();
        }
        Some(frame)
    }

    pub fn pause(&mut self) -> bool {
        if self.status == AnimationStatus::Playing {
            self.status = AnimationStatus::Paused;
            true
        } else {
            false
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.status == AnimationStatus::Paused {
            self.status = AnimationStatus::Playing;
            true
        } else {
            false
        }
    }

    /// Stop immediately and freeze at the last emitted position.
    /// No effect once finished or already canceled.
    pub fn cancel(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.status = AnimationStatus::Canceled;
        self.timeline = None;
        self.trail.clear();
        tracing::debug!("Animation canceled");
    }

    /// Back to idle, discarding any precomputed frames.
    pub fn reset(&mut self) {
        self.status = AnimationStatus::Idle;
        self.timeline = None;
        self.last = None;
        self.trail.clear();
    }

    pub fn status(&self) -> AnimationStatus {
        self.status
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn path(&self) -> Option<&Path> {
        self.timeline.as_ref().map(|t| &t.path)
    }

    /// Most recent packet positions, oldest first.
    pub fn trail(&self) -> impl Iterator<Item = Position> + '_ {
        self.trail.iter().copied()
    }

    /// Endpoints of the link currently being traversed.
    pub fn active_nodes(&self) -> Option<(&str, &str)> {
        let timeline = self.timeline.as_ref()?;
        let edge = self.last?.edge_index?;
        let nodes = timeline.path.nodes();
        Some((nodes.get(edge)?.as_str(), nodes.get(edge + 1)?.as_str()))
    }

    /// Fraction of frames emitted, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        match (self.status, &self.timeline) {
            (AnimationStatus::Finished, _) => 1.0,
            (_, Some(t)) if !t.frames.is_empty() => t.cursor as f64 / t.frames.len() as f64,
            _ => 0.0,
        }
    }

    /// Delay the host scheduler should wait between ticks.
    pub fn step_duration(&self) -> Option<Duration> {
        self.timeline.as_ref().map(|t| t.step)
    }

    pub fn total_duration(&self) -> Option<Duration> {
        self.timeline.as_ref().map(|t| {
            u32::try_from(t.frames.len())
                .ok()
                .and_then(|n| t.step.checked_mul(n))
                .unwrap_or(Duration::MAX)
        })
    }
}

impl Default for PacketAnimator {
    fn default() -> Self {
        Self::new(AnimatorConfig::default())
    }
}
