//! Declarative contextual button rules.

use std::f64::consts::{FRAC_PI_4, TAU};

use smallvec::SmallVec;

use crate::foundation::math::angle_distance;
use crate::layout::{LayoutResult, NodeDescriptor};
use crate::render::buttons::{ButtonSet, NodeButton};
use crate::style::color::Color;
use crate::style::palette::NodeType;

/// Host permissions that decide which buttons show and which are enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ContextFlags {
    /// The viewer may edit entities.
    pub can_edit: bool,
    /// The viewer may re-parent the focus entity.
    pub can_move: bool,
    /// The focus entity accepts new children.
    pub can_add_child: bool,
    /// The viewer may delete entities.
    pub can_delete: bool,
    /// Insert previews are available.
    pub can_preview: bool,
}

type FlagFn = fn(&ContextFlags) -> bool;

/// One row of the rule table.
#[derive(Clone, Copy, Debug)]
pub struct ButtonRule {
    /// Button id.
    pub id: &'static str,
    /// Icon name.
    pub icon: &'static str,
    /// Action tag.
    pub action: &'static str,
    /// Tooltip.
    pub tooltip: &'static str,
    /// Fill color.
    pub color: Color,
    /// Node roles the rule applies to.
    pub applies_to: &'static [NodeType],
    /// Show the button at all.
    pub visible: FlagFn,
    /// Show it enabled rather than greyed out.
    pub enabled: FlagFn,
}

fn always(_: &ContextFlags) -> bool {
    true
}

fn can_edit(f: &ContextFlags) -> bool {
    f.can_edit
}

fn can_move(f: &ContextFlags) -> bool {
    f.can_move
}

fn can_add_child(f: &ContextFlags) -> bool {
    f.can_add_child
}

fn can_delete(f: &ContextFlags) -> bool {
    f.can_delete
}

fn can_preview(f: &ContextFlags) -> bool {
    f.can_preview
}

/// Rule table, in placement priority order.
pub const RULES: &[ButtonRule] = &[
    ButtonRule {
        id: "edit",
        icon: "pencil",
        action: "edit",
        tooltip: "Edit",
        color: Color::rgb(0x4f, 0x8c, 0xff),
        applies_to: &[NodeType::Center, NodeType::Title],
        visible: can_edit,
        enabled: always,
    },
    ButtonRule {
        id: "add-child",
        icon: "plus",
        action: "add-child",
        tooltip: "Add child",
        color: Color::rgb(0x3c, 0xc7, 0x8a),
        applies_to: &[NodeType::Center, NodeType::Title],
        visible: can_edit,
        enabled: can_add_child,
    },
    ButtonRule {
        id: "move",
        icon: "move",
        action: "move",
        tooltip: "Move",
        color: Color::rgb(0xf2, 0xb1, 0x3c),
        applies_to: &[NodeType::Center],
        visible: can_move,
        enabled: always,
    },
    ButtonRule {
        id: "delete",
        icon: "trash",
        action: "delete",
        tooltip: "Delete",
        color: Color::rgb(0xe5, 0x4b, 0x4b),
        applies_to: &[NodeType::Center],
        visible: can_delete,
        enabled: always,
    },
    ButtonRule {
        id: "preview-insert",
        icon: "git-merge",
        action: "preview-insert",
        tooltip: "Preview insert",
        color: Color::rgb(0xb4, 0x94, 0xff),
        applies_to: &[NodeType::Parent, NodeType::Child, NodeType::Member],
        visible: can_preview,
        enabled: can_edit,
    },
    ButtonRule {
        id: "enter-domain",
        icon: "zoom-in",
        action: "enter-domain",
        tooltip: "Open domain",
        color: Color::rgb(0x5c, 0xe0, 0xb8),
        applies_to: &[NodeType::Domain],
        visible: always,
        enabled: always,
    },
];

/// Number of evenly spaced placement slots around a node.
const SLOTS: usize = 12;

/// Angles (screen convention) of every edge leaving `node` in `layout`.
pub fn edge_angles(layout: &LayoutResult, node: &NodeDescriptor) -> Vec<f64> {
    layout
        .edges
        .iter()
        .filter_map(|e| {
            let other = if e.from == node.id {
                &e.to
            } else if e.to == node.id {
                &e.from
            } else {
                return None;
            };
            let o = layout.node(other)?;
            let d = o.pos() - node.pos();
            (d.hypot() > 0.0).then(|| d.y.atan2(d.x))
        })
        .collect()
}

/// Pick the slot farthest (by smallest angular gap) from every occupied angle.
///
/// Slots start at the upper right and run clockwise on screen; ties keep the earlier slot.
fn free_angle(occupied: &[f64]) -> f64 {
    let mut best = -FRAC_PI_4;
    let mut best_gap = f64::NEG_INFINITY;
    for i in 0..SLOTS {
        let a = -FRAC_PI_4 + TAU * i as f64 / SLOTS as f64;
        let gap = occupied
            .iter()
            .map(|&o| angle_distance(a, o))
            .fold(f64::INFINITY, f64::min);
        if gap > best_gap + 1e-9 {
            best = a;
            best_gap = gap;
        }
    }
    best
}

/// Buttons for `node` under `flags`, placed away from `edge_angles` and from each other.
pub fn buttons_for(node: &NodeDescriptor, edge_angles: &[f64], flags: &ContextFlags) -> ButtonSet {
    let mut occupied: Vec<f64> = edge_angles.iter().copied().filter(|a| a.is_finite()).collect();
    let mut out: ButtonSet = SmallVec::new();
    for rule in RULES
        .iter()
        .filter(|r| r.applies_to.contains(&node.node_type) && (r.visible)(flags))
    {
        let angle = free_angle(&occupied);
        occupied.push(angle);
        out.push(NodeButton {
            id: rule.id.to_owned(),
            icon: rule.icon.to_owned(),
            angle,
            action: rule.action.to_owned(),
            tooltip: rule.tooltip.to_owned(),
            color: rule.color,
            disabled: !(rule.enabled)(flags),
        });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/buttons.rs"]
mod tests;
