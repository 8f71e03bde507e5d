use std::collections::BTreeMap;
use std::f64::consts::TAU;

use crate::render::node::{EdgeVisual, NodeVisual};

/// Opacity applied to existing edges the previewed edit would remove.
pub const REMOVED_EDGE_OPACITY: f64 = 0.25;
/// Relative scale amplitude of the preview pulse.
const PULSE_SCALE: f64 = 0.08;
/// Marching-ants speed in dash periods per second.
const ANTS_SPEED: f64 = 1.5;

/// Reversible overlay state for proposing a graph edit.
///
/// Holds a deep copy of the main registry taken at entry plus the preview-only layer. Exiting
/// restores the copy; there is nothing to commit.
#[derive(Clone, Debug)]
pub struct PreviewSandbox {
    saved_nodes: BTreeMap<String, NodeVisual>,
    saved_edges: Vec<EdgeVisual>,
    /// Preview-only nodes, drawn above the main registry.
    pub nodes: Vec<NodeVisual>,
    /// Preview-only edges.
    pub edges: Vec<EdgeVisual>,
    /// Existing edges drawn dimmed, as `(from, to)` pairs.
    pub removed: Vec<(String, String)>,
    entered_ms: f64,
}

impl PreviewSandbox {
    pub(crate) fn enter(nodes: &BTreeMap<String, NodeVisual>, edges: &[EdgeVisual], now_ms: f64) -> Self {
        Self {
            saved_nodes: nodes.clone(),
            saved_edges: edges.to_vec(),
            nodes: Vec::new(),
            edges: Vec::new(),
            removed: Vec::new(),
            entered_ms: now_ms,
        }
    }

    pub(crate) fn into_saved(self) -> (BTreeMap<String, NodeVisual>, Vec<EdgeVisual>) {
        (self.saved_nodes, self.saved_edges)
    }

    /// Restart the effect phase.
    pub fn replay(&mut self, now_ms: f64) {
        self.entered_ms = now_ms;
        for e in &mut self.edges {
            e.progress = 0.0;
        }
    }

    /// Return `true` when the main edge `from -> to` is marked removed.
    pub fn is_removed(&self, from: &str, to: &str) -> bool {
        self.removed
            .iter()
            .any(|(a, b)| (a == from && b == to) || (a == to && b == from))
    }

    /// Advance the marching-ants phase of every dashed preview edge.
    pub fn advance(&mut self, now_ms: f64) {
        let elapsed_s = ((now_ms - self.entered_ms) / 1000.0).max(0.0);
        let phase = (elapsed_s * ANTS_SPEED).fract();
        for e in self.edges.iter_mut().filter(|e| e.preview.dashed || e.preview.is_new) {
            e.progress = phase;
        }
    }

    /// Scale and opacity multipliers of the pulse at `now_ms`.
    pub fn pulse(&self, now_ms: f64, period_ms: f64) -> (f64, f64) {
        let t = (now_ms - self.entered_ms).max(0.0) / period_ms.max(1.0);
        let s = (t * TAU).sin();
        (1.0 + PULSE_SCALE * s, 0.8 + 0.2 * s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
