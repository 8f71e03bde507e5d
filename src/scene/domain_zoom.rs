//! Full-screen zoom into and out of a knowledge domain.
//!
//! Unlike scene choreographies this runs its own per-frame interpolation instead of the
//! tween scheduler, because the host needs continuous progress to drive a page cross-fade.

use crate::animation::ease::Ease;
use crate::animation::tween::{Animatable, Lerp, NodeSnapshot};
use crate::foundation::math::lerp_f64;
use crate::layout::diff::VANISH_SCALE;
use crate::render::engine::RenderEngine;
use crate::render::node::{NodePatch, NodeVisual};

/// Effective radius of the zoomed node relative to the canvas diagonal at full zoom.
const COVER_FACTOR: f64 = 1.1;

/// Which way the zoom runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomDirection {
    /// Grow the focus node past the canvas; everything else fades and is removed.
    Enter,
    /// Shrink an oversized copy back to its natural size; everything else fades in.
    Exit,
}

/// One running domain zoom.
pub struct DomainZoom {
    direction: ZoomDirection,
    node_id: String,
    from_scale: f64,
    to_scale: f64,
    others: Vec<(String, NodeSnapshot)>,
    duration_ms: f64,
    start_ms: Option<f64>,
    progress: f64,
    done: bool,
    on_progress: Option<Box<dyn FnMut(f64)>>,
}

impl std::fmt::Debug for DomainZoom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainZoom")
            .field("direction", &self.direction)
            .field("node_id", &self.node_id)
            .field("progress", &self.progress)
            .field("done", &self.done)
            .finish()
    }
}

fn cover_scale(engine: &RenderEngine, radius: f64) -> f64 {
    if radius > 0.0 {
        COVER_FACTOR * engine.canvas().diagonal() / radius
    } else {
        1.0
    }
}

fn snapshots_except(engine: &RenderEngine, id: &str) -> Vec<(String, NodeSnapshot)> {
    engine
        .nodes()
        .filter(|n| n.id != id)
        .map(|n| (n.id.clone(), n.snapshot()))
        .collect()
}

impl DomainZoom {
    /// Zoom into `node_id`. Returns `None` when the node is not live.
    pub fn enter(engine: &RenderEngine, node_id: &str, duration_ms: f64) -> Option<Self> {
        let node = engine.node(node_id)?;
        Some(Self {
            direction: ZoomDirection::Enter,
            node_id: node_id.to_owned(),
            from_scale: node.scale,
            to_scale: cover_scale(engine, node.radius),
            others: snapshots_except(engine, node_id),
            duration_ms,
            start_ms: None,
            progress: 0.0,
            done: false,
            on_progress: None,
        })
    }

    /// Zoom out of a domain, starting from an oversized copy of `copy`.
    ///
    /// The copy is inserted into the registry at full zoom and ends at its own scale. Every
    /// other live node starts transparent and fades back to its current values.
    pub fn exit(engine: &mut RenderEngine, copy: &NodeVisual, duration_ms: f64) -> Self {
        let to_scale = copy.scale;
        let from_scale = cover_scale(engine, copy.radius);
        let mut patch = NodePatch::from_visual(copy);
        patch.scale = Some(from_scale);
        engine.set_node(&copy.id, &patch);
        let others = snapshots_except(engine, &copy.id);
        for (id, s) in &others {
            engine.set_node(
                id,
                &NodePatch::default()
                    .opacity(0.0)
                    .scale(s.scale * VANISH_SCALE),
            );
        }
        Self {
            direction: ZoomDirection::Exit,
            node_id: copy.id.clone(),
            from_scale,
            to_scale,
            others,
            duration_ms,
            start_ms: None,
            progress: 0.0,
            done: false,
            on_progress: None,
        }
    }

    /// Report linear progress in `[0, 1]` on every step.
    pub fn with_progress(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Direction.
    pub fn direction(&self) -> ZoomDirection {
        self.direction
    }

    /// Zoomed node id.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Linear progress of the last step.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Return `true` once the final frame was applied.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Apply the frame at `now_ms`. The first step fixes the start time.
    ///
    /// Returns `true` once the zoom has finished; later calls do nothing.
    pub fn step(&mut self, engine: &mut RenderEngine, now_ms: f64) -> bool {
        if self.done {
            return true;
        }
        let start = *self.start_ms.get_or_insert(now_ms);
        let t = if self.duration_ms > 0.0 {
            ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let e = Ease::InOutCubic.apply(t);

        engine.set_node(
            &self.node_id,
            &NodePatch::default().scale(lerp_f64(self.from_scale, self.to_scale, e)),
        );
        for (id, s) in &self.others {
            let vanished = NodeSnapshot {
                scale: s.scale * VANISH_SCALE,
                opacity: 0.0,
                ..*s
            };
            let (a, b) = match self.direction {
                ZoomDirection::Enter => (*s, vanished),
                ZoomDirection::Exit => (vanished, *s),
            };
            let v = NodeSnapshot::lerp(&a, &b, e);
            engine.set_node(id, &NodePatch::default().opacity(v.opacity).scale(v.scale));
        }

        self.progress = t;
        if let Some(cb) = self.on_progress.as_mut() {
            cb(t);
        }
        if t >= 1.0 {
            if self.direction == ZoomDirection::Enter {
                for (id, _) in &self.others {
                    engine.remove_node(id);
                }
            }
            self.done = true;
            tracing::debug!(node = %self.node_id, direction = ?self.direction, "domain zoom finished");
        }
        self.done
    }

    /// Jump straight to the final frame.
    pub fn finish(&mut self, engine: &mut RenderEngine) {
        let start = *self.start_ms.get_or_insert(0.0);
        self.step(engine, start + self.duration_ms);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/domain_zoom.rs"]
mod tests;
