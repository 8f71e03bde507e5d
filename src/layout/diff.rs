use std::collections::HashMap;

use crate::foundation::math::Rng64;
use crate::layout::{LayoutResult, NodeDescriptor};

/// Numeric tolerance below which two layouts are considered unchanged.
const MOVE_EPS: f64 = 1e-6;
/// Scale applied to entering and exiting nodes at their invisible end.
pub const VANISH_SCALE: f64 = 0.3;
/// Scale satellites start from when entering out of a new center.
const SPAWN_SCALE: f64 = 0.2;

/// Interpolation endpoints for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeTransition {
    /// Id the node carries once the transition completes.
    pub id: String,
    /// Start state. `from.id` may differ from `id` in click plans (the re-key case).
    pub from: NodeDescriptor,
    /// End state.
    pub to: NodeDescriptor,
}

/// Categorized transition sets between two layouts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionPlan {
    /// Nodes appearing.
    pub enter: Vec<NodeTransition>,
    /// Nodes disappearing.
    pub exit: Vec<NodeTransition>,
    /// Nodes present in both layouts whose geometry changed.
    pub moved: Vec<NodeTransition>,
    /// Nodes present in both layouts with unchanged geometry.
    pub stay: Vec<NodeTransition>,
}

impl TransitionPlan {
    /// Ids of `stay` entries.
    pub fn stay_ids(&self) -> impl Iterator<Item = &str> {
        self.stay.iter().map(|t| t.id.as_str())
    }
}

/// Transparent, shrunken copy of `d`.
pub fn vanished(d: &NodeDescriptor) -> NodeDescriptor {
    NodeDescriptor {
        scale: d.scale * VANISH_SCALE,
        opacity: 0.0,
        ..d.clone()
    }
}

fn geometry_changed(a: &NodeDescriptor, b: &NodeDescriptor) -> bool {
    (a.x - b.x).abs() > MOVE_EPS
        || (a.y - b.y).abs() > MOVE_EPS
        || (a.scale - b.scale).abs() > MOVE_EPS
        || (a.radius - b.radius).abs() > MOVE_EPS
}

/// Three-way id diff of two layouts.
///
/// Order inside each set follows the layout the entry comes from (`old` for exits, `new` for
/// everything else).
pub fn diff_layouts(old: &LayoutResult, new: &LayoutResult) -> TransitionPlan {
    let old_by_id: HashMap<&str, &NodeDescriptor> =
        old.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let new_by_id: HashMap<&str, &NodeDescriptor> =
        new.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut plan = TransitionPlan::default();

    for n in &old.nodes {
        if !new_by_id.contains_key(n.id.as_str()) {
            plan.exit.push(NodeTransition {
                id: n.id.clone(),
                from: n.clone(),
                to: vanished(n),
            });
        }
    }

    for n in &new.nodes {
        match old_by_id.get(n.id.as_str()) {
            None => plan.enter.push(NodeTransition {
                id: n.id.clone(),
                from: vanished(n),
                to: n.clone(),
            }),
            Some(prev) if geometry_changed(prev, n) => plan.moved.push(NodeTransition {
                id: n.id.clone(),
                from: (*prev).clone(),
                to: n.clone(),
            }),
            Some(_) => plan.stay.push(NodeTransition {
                id: n.id.clone(),
                from: n.clone(),
                to: n.clone(),
            }),
        }
    }

    plan
}

/// Plan for a click into a new focus.
///
/// The clicked node's old descriptor becomes the source of the new center's descriptor; the
/// caller re-keys the node from `from.id` to `id`. Every other old node exits and every other
/// new node enters from around the new center, jittered by up to `jitter` on each axis.
///
/// Returns `None` when `clicked_id` is not in `old` or `new` has no center, in which case the
/// caller should fall back to [`diff_layouts`].
pub fn diff_click_transition(
    clicked_id: &str,
    old: &LayoutResult,
    new: &LayoutResult,
    jitter: f64,
    rng: &mut Rng64,
) -> Option<TransitionPlan> {
    let clicked = old.node(clicked_id)?;
    let center = new.center()?;

    let mut plan = TransitionPlan::default();
    plan.moved.push(NodeTransition {
        id: center.id.clone(),
        from: clicked.clone(),
        to: center.clone(),
    });

    for n in old.nodes.iter().filter(|n| n.id != clicked_id) {
        plan.exit.push(NodeTransition {
            id: n.id.clone(),
            from: n.clone(),
            to: vanished(n),
        });
    }

    for n in new.nodes.iter().filter(|n| n.id != center.id) {
        let from = NodeDescriptor {
            x: center.x + rng.jitter(jitter),
            y: center.y + rng.jitter(jitter),
            scale: n.scale * SPAWN_SCALE,
            opacity: 0.0,
            ..n.clone()
        };
        plan.enter.push(NodeTransition {
            id: n.id.clone(),
            from,
            to: n.clone(),
        });
    }

    Some(plan)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/diff.rs"]
mod tests;
