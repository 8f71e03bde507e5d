use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::foundation::core::{Point, Vec2};
use crate::render::node::NodeVisual;
use crate::style::color::Color;

/// Small overlay affordance orbiting a node.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NodeButton {
    /// Unique among the node's buttons.
    pub id: String,
    /// Icon name for the host overlay.
    pub icon: String,
    /// Polar placement angle in radians, screen convention (y down).
    pub angle: f64,
    /// Action tag reported on click.
    pub action: String,
    /// Tooltip text.
    pub tooltip: String,
    /// Fill color.
    pub color: Color,
    /// Disabled buttons are drawn greyed and swallow clicks without firing.
    pub disabled: bool,
}

/// Buttons of one node.
pub type ButtonSet = SmallVec<[NodeButton; 4]>;

/// Per-node button sets. Lifetime is independent of the nodes themselves.
#[derive(Clone, Debug, Default)]
pub struct ButtonRegistry {
    by_node: BTreeMap<String, ButtonSet>,
}

impl ButtonRegistry {
    /// Replace the buttons of `node_id`. An empty set removes the entry.
    pub fn set(&mut self, node_id: &str, buttons: ButtonSet) {
        if buttons.is_empty() {
            self.by_node.remove(node_id);
        } else {
            self.by_node.insert(node_id.to_owned(), buttons);
        }
    }

    /// Buttons of `node_id`.
    pub fn get(&self, node_id: &str) -> &[NodeButton] {
        self.by_node.get(node_id).map(|b| b.as_slice()).unwrap_or(&[])
    }

    /// Remove every button.
    pub fn clear(&mut self) {
        self.by_node.clear();
    }

    /// Number of nodes carrying buttons.
    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    /// Return `true` when no node carries buttons.
    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }

    /// Iterate `(node_id, buttons)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NodeButton])> {
        self.by_node.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Move the buttons of `old_id` to `new_id`.
    pub fn rekey(&mut self, old_id: &str, new_id: &str) {
        if let Some(b) = self.by_node.remove(old_id) {
            self.by_node.insert(new_id.to_owned(), b);
        }
    }
}

/// World-space center of `button` around `node`.
pub fn button_center(node: &NodeVisual, button: &NodeButton, gap: f64) -> Point {
    let dist = node.effective_radius() + gap;
    node.pos() + Vec2::new(button.angle.cos(), button.angle.sin()) * dist
}

#[cfg(test)]
#[path = "../../tests/unit/render/buttons.rs"]
mod tests;
