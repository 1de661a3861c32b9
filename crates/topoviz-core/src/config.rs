//! Tunables loaded from a TOML file
//!
//! ```toml
//! [layout]
//! radius = 0.8
//! bus_spacing = 0.4
//!
//! [animation]
//! frames_per_edge = 20
//! step_ms = 100
//! easing = "smooth_step"
//! ```

use crate::animation::{AnimatorConfig, Easing};
use crate::layout::LayoutOptions;
use crate::model::Position;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub layout: LayoutSection,
    pub animation: AnimationSection,
    pub editor: EditorSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSection {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub bus_spacing: f64,
    pub slot_padding: f64,
}

impl Default for LayoutSection {
    fn default() -> Self {
        let options = LayoutOptions::default();
        LayoutSection {
            center_x: options.center.x,
            center_y: options.center.y,
            radius: options.radius,
            bus_spacing: options.bus_spacing,
            slot_padding: options.slot_padding,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSection {
    pub frames_per_edge: usize,
    /// Milliseconds between ticks.
    pub step_ms: u64,
    pub easing: Easing,
    pub trail_len: usize,
}

impl Default for AnimationSection {
    fn default() -> Self {
        let anim = AnimatorConfig::default();
        AnimationSection {
            frames_per_edge: anim.frames_per_edge,
            step_ms: 100,
            easing: anim.easing,
            trail_len: anim.trail_len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSection {
    /// Clicks farther than this from every node select nothing.
    pub pick_radius: f64,
}

impl Default for EditorSection {
    fn default() -> Self {
        EditorSection { pick_radius: 0.1 }
    }
}

impl VizConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: VizConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.animation.frames_per_edge == 0 {
            bail!("animation.frames_per_edge must be at least 1");
        }
        if self.animation.trail_len == 0 {
            bail!("animation.trail_len must be at least 1");
        }
        if !(self.layout.radius > 0.0) {
            bail!("layout.radius must be positive");
        }
        if !(self.layout.bus_spacing > 0.0) {
            bail!("layout.bus_spacing must be positive");
        }
        if !(self.layout.slot_padding > 0.0) {
            bail!("layout.slot_padding must be positive");
        }
        Ok(())
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            center: Position::new(self.layout.center_x, self.layout.center_y),
            radius: self.layout.radius,
            bus_spacing: self.layout.bus_spacing,
            slot_padding: self.layout.slot_padding,
        }
    }

    pub fn animator_config(&self) -> AnimatorConfig {
        AnimatorConfig {
            frames_per_edge: self.animation.frames_per_edge,
            easing: self.animation.easing,
            trail_len: self.animation.trail_len,
        }
    }
}
