//! Pure layout computation.
//!
//! Every function here maps entity lists plus the canvas size to a [`LayoutResult`]. Nothing
//! touches the render engine; identical inputs always produce identical layouts.

/// Radial detail view.
pub mod detail;
/// Layout diffs and transition plans.
pub mod diff;
/// Domain entity input.
pub mod entity;
/// Home grid and featured row.
pub mod home;
/// Insert previews.
pub mod preview;
/// Title view graph.
pub mod title;

use std::collections::HashSet;

use crate::config::LayoutOpts;
use crate::foundation::core::{Canvas, Point};
use crate::style::color::Color;
use crate::style::palette::{NodeType, RelationKind, VisualStyle};

pub use detail::compute_detail_layout;
pub use diff::{NodeTransition, TransitionPlan, diff_click_transition, diff_layouts};
pub use entity::{Entity, EntityCatalog};
pub use home::compute_home_layout;
pub use preview::{InsertPreview, compute_insert_preview};
pub use title::compute_title_layout;

/// Visual node ids derived from entity ids, one prefix per role.
pub mod ids {
    /// Home grid node id.
    pub fn root(entity_id: &str) -> String {
        format!("root-{entity_id}")
    }

    /// Home featured row node id.
    pub fn featured(entity_id: &str) -> String {
        format!("featured-{entity_id}")
    }

    /// Detail view center id.
    pub fn center(entity_id: &str) -> String {
        format!("center-{entity_id}")
    }

    /// Detail view parent satellite id.
    pub fn parent(entity_id: &str) -> String {
        format!("parent-{entity_id}")
    }

    /// Detail view child satellite id.
    pub fn child(entity_id: &str) -> String {
        format!("child-{entity_id}")
    }

    /// Title view center id.
    pub fn title(entity_id: &str) -> String {
        format!("title-{entity_id}")
    }

    /// Title view member id.
    pub fn member(entity_id: &str) -> String {
        format!("member-{entity_id}")
    }

    /// Preview-only node id.
    pub fn preview(entity_id: &str) -> String {
        format!("preview-{entity_id}")
    }
}

/// Position and style of one node in a layout snapshot.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NodeDescriptor {
    /// Visual id, unique within its layout.
    pub id: String,
    /// World x.
    pub x: f64,
    /// World y.
    pub y: f64,
    /// Base radius before scale.
    pub radius: f64,
    /// Scale factor.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Rotation in radians.
    pub rotation: f64,
    /// Semantic role.
    pub node_type: NodeType,
    /// Display label.
    pub label: String,
    /// Owning domain entity.
    pub entity: Option<Entity>,
    /// Colors and fill.
    pub style: VisualStyle,
    /// Glow intensity in `[0, 1]`.
    pub glow: f64,
}

impl NodeDescriptor {
    /// Descriptor for `entity` at `(x, y)` with role defaults.
    pub fn for_entity(
        id: String,
        entity: &Entity,
        node_type: NodeType,
        pos: Point,
        radius: f64,
    ) -> Self {
        Self {
            id,
            x: pos.x,
            y: pos.y,
            radius,
            scale: 1.0,
            opacity: 1.0,
            rotation: 0.0,
            node_type,
            label: entity.name.clone(),
            entity: Some(entity.clone()),
            style: VisualStyle::for_type(node_type),
            glow: default_glow(node_type),
        }
    }

    /// World position.
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Effective drawn radius.
    pub fn effective_radius(&self) -> f64 {
        self.radius * self.scale
    }
}

fn default_glow(node_type: NodeType) -> f64 {
    match node_type {
        NodeType::Center | NodeType::Title => 0.8,
        NodeType::Featured | NodeType::Domain => 0.6,
        NodeType::Preview => 0.7,
        _ => 0.35,
    }
}

/// Preview treatment flags carried by an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EdgePreview {
    /// Draw with marching-ants dashes.
    pub dashed: bool,
    /// Edge only exists in the proposed edit.
    pub is_new: bool,
    /// Edge would be removed by the proposed edit.
    pub removed: bool,
}

/// One straight edge between two node ids.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EdgeDescriptor {
    /// Source node id.
    pub from: String,
    /// Target node id.
    pub to: String,
    /// Relation kind.
    pub relation: RelationKind,
    /// Stroke color.
    pub color: Color,
    /// Preview flags.
    pub preview: EdgePreview,
}

impl EdgeDescriptor {
    /// Plain edge colored by its relation.
    pub fn new(from: impl Into<String>, to: impl Into<String>, relation: RelationKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relation,
            color: relation.color(),
            preview: EdgePreview::default(),
        }
    }

    /// Return `true` when this edge joins `a` and `b` in either direction.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Ordered node and edge descriptors for one scene snapshot.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct LayoutResult {
    /// Nodes in draw-registration order.
    pub nodes: Vec<NodeDescriptor>,
    /// Edges.
    pub edges: Vec<EdgeDescriptor>,
}

impl LayoutResult {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The focus node of a detail or title layout, if any.
    pub fn center(&self) -> Option<&NodeDescriptor> {
        self.nodes
            .iter()
            .find(|n| matches!(n.node_type, NodeType::Center | NodeType::Title))
    }

    /// Return `true` when the layout has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn push_node(&mut self, seen: &mut HashSet<String>, node: NodeDescriptor) {
        if seen.insert(node.id.clone()) {
            self.nodes.push(node);
        } else {
            tracing::debug!(id = %node.id, "duplicate layout node id dropped");
        }
    }
}

/// Layout entry points bound to one canvas and option set.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    canvas: Canvas,
    opts: LayoutOpts,
}

impl LayoutEngine {
    /// Create a layout engine.
    pub fn new(canvas: Canvas, opts: LayoutOpts) -> Self {
        Self { canvas, opts }
    }

    /// Canvas the layouts are computed for.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Layout options.
    pub fn opts(&self) -> &LayoutOpts {
        &self.opts
    }

    /// Update the canvas after a resize.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    /// Home grid layout. See [`compute_home_layout`].
    pub fn home(&self, roots: &[Entity], featured: &[Entity], search: &[Entity]) -> LayoutResult {
        compute_home_layout(self.canvas, &self.opts, roots, featured, search)
    }

    /// Radial detail layout. See [`compute_detail_layout`].
    pub fn detail(&self, center: &Entity, parents: &[Entity], children: &[Entity]) -> LayoutResult {
        compute_detail_layout(self.canvas, &self.opts, center, parents, children)
    }

    /// Graph-style title layout. See [`compute_title_layout`].
    pub fn title(&self, title: &Entity, members: &[Entity]) -> LayoutResult {
        compute_title_layout(self.canvas, &self.opts, title, members)
    }
}
