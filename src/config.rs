//! Engine configuration.
//!
//! Every section deserializes with `#[serde(default)]`, so a config document only needs the
//! keys it wants to change. [`NodeweaveConfig::validate`] rejects values the layout and
//! choreography code cannot honor.

use std::path::Path;

use crate::foundation::error::{NodeweaveError, NodeweaveResult};
use crate::style::color::Color;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NodeweaveConfig {
    /// Layout geometry.
    pub layout: LayoutOpts,
    /// Render engine behavior.
    pub engine: EngineOpts,
    /// Scene choreography timing.
    pub choreography: ChoreographyOpts,
}

impl NodeweaveConfig {
    /// Parse a JSON config document and validate it.
    pub fn from_json_str(s: &str) -> NodeweaveResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> NodeweaveResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            NodeweaveError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Apply `NODEWEAVE_*` environment overrides.
    ///
    /// - `NODEWEAVE_TRANSITION_MS`: base duration for every choreography.
    /// - `NODEWEAVE_IDLE_EFFECTS`: `0` disables idle glow/marker animation.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(ms) = std::env::var("NODEWEAVE_TRANSITION_MS")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|&v| v.is_finite() && v > 0.0)
        {
            self.choreography.base_duration_ms = ms;
        }
        if let Ok(v) = std::env::var("NODEWEAVE_IDLE_EFFECTS") {
            self.engine.idle_effects = v.trim() != "0";
        }
        self
    }

    /// Validate every section.
    pub fn validate(&self) -> NodeweaveResult<()> {
        self.layout.validate()?;
        self.engine.validate()?;
        self.choreography.validate()
    }
}

fn require_positive(name: &str, v: f64) -> NodeweaveResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(NodeweaveError::validation(format!(
            "{name} must be finite and > 0, got {v}"
        )));
    }
    Ok(())
}

fn require_finite(name: &str, v: f64) -> NodeweaveResult<()> {
    if !v.is_finite() {
        return Err(NodeweaveError::validation(format!(
            "{name} must be finite, got {v}"
        )));
    }
    Ok(())
}

/// Geometry constants for every layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOpts {
    /// Home grid top edge as a fraction of canvas height.
    pub home_top_fraction: f64,
    /// Maximum home grid columns (1..=3).
    pub home_columns: usize,
    /// Horizontal distance between home grid columns.
    pub home_col_spacing: f64,
    /// Vertical distance between home grid rows.
    pub home_row_spacing: f64,
    /// Distance from a grid row's top edge to its node centers.
    pub home_cell_half: f64,
    /// Gap between the last grid row and the featured row.
    pub featured_gap: f64,
    /// Horizontal distance between featured nodes.
    pub featured_spacing: f64,
    /// Home grid node radius.
    pub root_radius: f64,
    /// Featured node radius.
    pub featured_radius: f64,
    /// Detail center vertical offset from canvas center.
    pub center_offset_y: f64,
    /// Detail and title center radius.
    pub center_radius: f64,
    /// Satellite radius in detail and title views.
    pub satellite_radius: f64,
    /// Parent orbit as a fraction of canvas height.
    pub parent_orbit_fraction: f64,
    /// Upper bound for the parent orbit.
    pub parent_orbit_max: f64,
    /// Child orbit as a fraction of the parent orbit.
    pub child_orbit_ratio: f64,
    /// Distance between title view rings.
    pub title_ring_spacing: f64,
    /// Perpendicular offset of an inserted preview node from its host edge.
    pub preview_offset: f64,
    /// Jitter amplitude for satellites entering from the new center.
    pub enter_jitter: f64,
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            home_top_fraction: 0.35,
            home_columns: 3,
            home_col_spacing: 220.0,
            home_row_spacing: 180.0,
            home_cell_half: 70.0,
            featured_gap: 40.0,
            featured_spacing: 150.0,
            root_radius: 60.0,
            featured_radius: 42.0,
            center_offset_y: 30.0,
            center_radius: 72.0,
            satellite_radius: 42.0,
            parent_orbit_fraction: 0.38,
            parent_orbit_max: 260.0,
            child_orbit_ratio: 0.72,
            title_ring_spacing: 120.0,
            preview_offset: 48.0,
            enter_jitter: 12.0,
        }
    }
}

impl LayoutOpts {
    /// Validate layout geometry.
    pub fn validate(&self) -> NodeweaveResult<()> {
        if !(1..=3).contains(&self.home_columns) {
            return Err(NodeweaveError::validation(format!(
                "layout.home_columns must be in 1..=3, got {}",
                self.home_columns
            )));
        }
        if !(0.0..=1.0).contains(&self.home_top_fraction) {
            return Err(NodeweaveError::validation(
                "layout.home_top_fraction must be in [0, 1]",
            ));
        }
        for (name, v) in [
            ("layout.home_col_spacing", self.home_col_spacing),
            ("layout.home_row_spacing", self.home_row_spacing),
            ("layout.featured_spacing", self.featured_spacing),
            ("layout.root_radius", self.root_radius),
            ("layout.featured_radius", self.featured_radius),
            ("layout.center_radius", self.center_radius),
            ("layout.satellite_radius", self.satellite_radius),
            ("layout.parent_orbit_fraction", self.parent_orbit_fraction),
            ("layout.parent_orbit_max", self.parent_orbit_max),
            ("layout.child_orbit_ratio", self.child_orbit_ratio),
            ("layout.title_ring_spacing", self.title_ring_spacing),
        ] {
            require_positive(name, v)?;
        }
        for (name, v) in [
            ("layout.home_cell_half", self.home_cell_half),
            ("layout.featured_gap", self.featured_gap),
            ("layout.center_offset_y", self.center_offset_y),
            ("layout.preview_offset", self.preview_offset),
            ("layout.enter_jitter", self.enter_jitter),
        ] {
            require_finite(name, v)?;
        }
        Ok(())
    }
}

/// Render engine behavior.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Background color the surface is cleared to each frame.
    pub clear_color: Color,
    /// Animate glow pulses and markers while no tween runs.
    pub idle_effects: bool,
    /// Button hit radius in screen pixels at zoom 1.
    pub button_hit_radius: f64,
    /// Drawn button radius in screen pixels at zoom 1.
    pub button_radius: f64,
    /// Gap between a node's rim and its buttons, in world units.
    pub button_gap: f64,
    /// Pointer travel in screen pixels after which a press becomes a pan.
    pub drag_threshold: f64,
    /// Edge hit tolerance in screen pixels.
    pub line_hit_tolerance: f64,
    /// Edge stroke width in screen pixels at zoom 1.
    pub line_width: f64,
    /// Minimum zoom reachable by wheel zoom.
    pub min_zoom: f64,
    /// Maximum zoom reachable by wheel zoom.
    pub max_zoom: f64,
    /// Period of the idle glow pulse.
    pub pulse_period_ms: f64,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            clear_color: Color::rgb(0x12, 0x14, 0x1c),
            idle_effects: true,
            button_hit_radius: 14.0,
            button_radius: 11.0,
            button_gap: 16.0,
            drag_threshold: 4.0,
            line_hit_tolerance: 6.0,
            line_width: 2.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            pulse_period_ms: 2400.0,
        }
    }
}

impl EngineOpts {
    /// Validate engine settings.
    pub fn validate(&self) -> NodeweaveResult<()> {
        for (name, v) in [
            ("engine.button_hit_radius", self.button_hit_radius),
            ("engine.button_radius", self.button_radius),
            ("engine.line_width", self.line_width),
            ("engine.min_zoom", self.min_zoom),
            ("engine.max_zoom", self.max_zoom),
            ("engine.pulse_period_ms", self.pulse_period_ms),
        ] {
            require_positive(name, v)?;
        }
        for (name, v) in [
            ("engine.button_gap", self.button_gap),
            ("engine.drag_threshold", self.drag_threshold),
            ("engine.line_hit_tolerance", self.line_hit_tolerance),
        ] {
            require_finite(name, v)?;
        }
        if self.min_zoom > self.max_zoom {
            return Err(NodeweaveError::validation(
                "engine.min_zoom must be <= engine.max_zoom",
            ));
        }
        Ok(())
    }
}

/// Choreography timing.
///
/// Phase durations are fractions of `base_duration_ms`. Phases of one choreography may add up
/// to more than 1.0; they run back to back.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChoreographyOpts {
    /// Base duration every phase fraction is applied to.
    pub base_duration_ms: f64,
    /// Duration of a soft diff transition (home to home).
    pub soft_fraction: f64,
    /// Fade-out and fade-in phases when returning home.
    pub fade_fraction: f64,
    /// Home to detail: collapse non-clicked nodes.
    pub collapse_fraction: f64,
    /// Clicked node flying into the center slot.
    pub promote_fraction: f64,
    /// Home to detail: satellites staggering in.
    pub stagger_fraction: f64,
    /// Home to detail per-node stagger delay.
    pub stagger_delay_ms: f64,
    /// Detail to detail: non-clicked satellites scattering.
    pub scatter_fraction: f64,
    /// Detail to detail: new satellites staggering in.
    pub restagger_fraction: f64,
    /// Detail to detail per-node stagger delay.
    pub restagger_delay_ms: f64,
    /// Distance scattered satellites fly from their start.
    pub scatter_distance: f64,
    /// Duration of the knowledge-domain zoom.
    pub domain_zoom_ms: f64,
}

impl Default for ChoreographyOpts {
    fn default() -> Self {
        Self {
            base_duration_ms: 1000.0,
            soft_fraction: 0.6,
            fade_fraction: 0.3,
            collapse_fraction: 0.3,
            promote_fraction: 0.5,
            stagger_fraction: 0.4,
            stagger_delay_ms: 60.0,
            scatter_fraction: 0.4,
            restagger_fraction: 0.5,
            restagger_delay_ms: 50.0,
            scatter_distance: 400.0,
            domain_zoom_ms: 900.0,
        }
    }
}

impl ChoreographyOpts {
    /// Validate timing values.
    pub fn validate(&self) -> NodeweaveResult<()> {
        for (name, v) in [
            ("choreography.base_duration_ms", self.base_duration_ms),
            ("choreography.soft_fraction", self.soft_fraction),
            ("choreography.fade_fraction", self.fade_fraction),
            ("choreography.collapse_fraction", self.collapse_fraction),
            ("choreography.promote_fraction", self.promote_fraction),
            ("choreography.stagger_fraction", self.stagger_fraction),
            ("choreography.scatter_fraction", self.scatter_fraction),
            ("choreography.restagger_fraction", self.restagger_fraction),
            ("choreography.domain_zoom_ms", self.domain_zoom_ms),
        ] {
            require_positive(name, v)?;
        }
        for (name, v) in [
            ("choreography.stagger_delay_ms", self.stagger_delay_ms),
            ("choreography.restagger_delay_ms", self.restagger_delay_ms),
            ("choreography.scatter_distance", self.scatter_distance),
        ] {
            require_finite(name, v)?;
            if v < 0.0 {
                return Err(NodeweaveError::validation(format!("{name} must be >= 0")));
            }
        }
        Ok(())
    }

    /// Duration in milliseconds for a phase fraction.
    pub fn ms(&self, fraction: f64) -> f64 {
        self.base_duration_ms * fraction
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
