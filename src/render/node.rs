use crate::animation::tween::{Animatable, NodeSnapshot, NumericTarget};
use crate::foundation::core::{Point, is_finite_point};
use crate::layout::{EdgeDescriptor, EdgePreview, Entity, NodeDescriptor};
use crate::style::color::Color;
use crate::style::palette::{NodeType, VisualStyle};

/// Radius a node gets when neither the patch nor a prior value sets one.
pub const DEFAULT_RADIUS: f64 = 50.0;

/// Live node in the render registry.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
    /// Registry key.
    pub id: String,
    /// World x.
    pub x: f64,
    /// World y.
    pub y: f64,
    /// Base radius.
    pub radius: f64,
    /// Scale factor, never negative.
    pub scale: f64,
    /// Rotation in radians.
    pub rotation: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Hidden nodes are neither drawn nor hit.
    pub visible: bool,
    /// Semantic role.
    pub node_type: NodeType,
    /// Label drawn by the host overlay.
    pub label: String,
    /// Owning domain entity.
    pub entity: Option<Entity>,
    /// Colors and fill.
    pub style: VisualStyle,
    /// Glow intensity in `[0, 1]`.
    pub glow: f64,
}

impl NodeVisual {
    /// Node with type defaults.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            radius: DEFAULT_RADIUS,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            node_type: NodeType::default(),
            label: String::new(),
            entity: None,
            style: VisualStyle::default(),
            glow: 0.35,
        }
    }

    /// World position.
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Drawn radius in world units.
    pub fn effective_radius(&self) -> f64 {
        self.radius * self.scale
    }

    /// Return `true` when the node may be drawn at all.
    pub fn is_drawable(&self) -> bool {
        self.visible && is_finite_point(self.pos())
    }

    /// Return `true` when `world` lies within the node disc, boundary included.
    pub fn contains(&self, world: Point) -> bool {
        self.is_drawable() && (world - self.pos()).hypot() <= self.effective_radius()
    }
}

impl Animatable for NodeVisual {
    fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            x: self.x,
            y: self.y,
            radius: self.radius,
            scale: self.scale,
            opacity: self.opacity,
            rotation: self.rotation,
        }
    }

    fn apply_snapshot(&mut self, s: &NodeSnapshot) {
        self.x = s.x;
        self.y = s.y;
        self.radius = s.radius.max(0.0);
        self.scale = s.scale.max(0.0);
        self.opacity = s.opacity.clamp(0.0, 1.0);
        self.rotation = s.rotation;
    }
}

/// Partial node update. `None` keeps the prior value.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct NodePatch {
    /// World x.
    pub x: Option<f64>,
    /// World y.
    pub y: Option<f64>,
    /// Base radius.
    pub radius: Option<f64>,
    /// Scale factor.
    pub scale: Option<f64>,
    /// Rotation in radians.
    pub rotation: Option<f64>,
    /// Opacity.
    pub opacity: Option<f64>,
    /// Visibility.
    pub visible: Option<bool>,
    /// Semantic role.
    pub node_type: Option<NodeType>,
    /// Label.
    pub label: Option<String>,
    /// Owning entity.
    pub entity: Option<Entity>,
    /// Colors and fill.
    pub style: Option<VisualStyle>,
    /// Glow intensity.
    pub glow: Option<f64>,
}

impl NodePatch {
    /// Patch setting every field of `d`.
    pub fn from_descriptor(d: &NodeDescriptor) -> Self {
        Self {
            x: Some(d.x),
            y: Some(d.y),
            radius: Some(d.radius),
            scale: Some(d.scale),
            rotation: Some(d.rotation),
            opacity: Some(d.opacity),
            visible: Some(true),
            node_type: Some(d.node_type),
            label: Some(d.label.clone()),
            entity: d.entity.clone(),
            style: Some(d.style),
            glow: Some(d.glow),
        }
    }

    /// Patch reproducing `n` exactly.
    pub fn from_visual(n: &NodeVisual) -> Self {
        Self {
            x: Some(n.x),
            y: Some(n.y),
            radius: Some(n.radius),
            scale: Some(n.scale),
            rotation: Some(n.rotation),
            opacity: Some(n.opacity),
            visible: Some(n.visible),
            node_type: Some(n.node_type),
            label: Some(n.label.clone()),
            entity: n.entity.clone(),
            style: Some(n.style),
            glow: Some(n.glow),
        }
    }

    /// Patch carrying only the numeric fields of `d`.
    pub fn numeric_from(d: &NodeDescriptor) -> Self {
        Self {
            x: Some(d.x),
            y: Some(d.y),
            radius: Some(d.radius),
            scale: Some(d.scale),
            rotation: Some(d.rotation),
            opacity: Some(d.opacity),
            ..Self::default()
        }
    }

    /// Set position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set opacity.
    pub fn opacity(mut self, v: f64) -> Self {
        self.opacity = Some(v);
        self
    }

    /// Set scale.
    pub fn scale(mut self, v: f64) -> Self {
        self.scale = Some(v);
        self
    }

    /// Set radius.
    pub fn radius(mut self, v: f64) -> Self {
        self.radius = Some(v);
        self
    }

    /// Sanitized numeric targets.
    ///
    /// Non-finite values are dropped with a warning; opacity is clamped to `[0, 1]`, radius and
    /// scale to `>= 0`.
    pub fn numeric_target(&self, node_id: &str) -> NumericTarget {
        NumericTarget {
            x: finite(node_id, "x", self.x),
            y: finite(node_id, "y", self.y),
            radius: finite(node_id, "radius", self.radius).map(|v| v.max(0.0)),
            scale: finite(node_id, "scale", self.scale).map(|v| v.max(0.0)),
            opacity: finite(node_id, "opacity", self.opacity).map(|v| v.clamp(0.0, 1.0)),
            rotation: finite(node_id, "rotation", self.rotation),
        }
    }

    /// Apply only the non-numeric fields.
    pub fn apply_discrete(&self, node: &mut NodeVisual) {
        if let Some(v) = self.visible {
            node.visible = v;
        }
        if let Some(t) = self.node_type {
            node.node_type = t;
        }
        if let Some(l) = &self.label {
            node.label.clone_from(l);
        }
        if let Some(e) = &self.entity {
            node.entity = Some(e.clone());
        }
        if let Some(s) = self.style {
            node.style = s;
        }
        if let Some(g) = finite(&node.id, "glow", self.glow) {
            node.glow = g.clamp(0.0, 1.0);
        }
    }

    /// Apply every field immediately.
    pub fn apply(&self, node: &mut NodeVisual) {
        let end = self.numeric_target(&node.id).resolve(&node.snapshot());
        node.apply_snapshot(&end);
        self.apply_discrete(node);
    }
}

fn finite(node_id: &str, field: &'static str, v: Option<f64>) -> Option<f64> {
    match v {
        Some(x) if !x.is_finite() => {
            tracing::warn!(node = node_id, field, value = x, "non-finite node field ignored");
            None
        }
        other => other,
    }
}

/// Live edge in the render registry.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeVisual {
    /// Source node id.
    pub from: String,
    /// Target node id.
    pub to: String,
    /// Stroke color.
    pub color: Color,
    /// Preview flags.
    pub preview: EdgePreview,
    /// Phase of the preview effect in `[0, 1)`.
    pub progress: f64,
}

impl EdgeVisual {
    /// Plain edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>, color: Color) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            color,
            preview: EdgePreview::default(),
            progress: 0.0,
        }
    }

    /// Return `true` when this edge joins `a` and `b` in either direction.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

impl From<&EdgeDescriptor> for EdgeVisual {
    fn from(d: &EdgeDescriptor) -> Self {
        Self {
            from: d.from.clone(),
            to: d.to.clone(),
            color: d.color,
            preview: d.preview,
            progress: 0.0,
        }
    }
}

impl From<&NodeDescriptor> for NodeVisual {
    fn from(d: &NodeDescriptor) -> Self {
        let mut n = NodeVisual::new(d.id.clone());
        NodePatch::from_descriptor(d).apply(&mut n);
        n
    }
}

impl From<&NodeVisual> for NodeDescriptor {
    fn from(n: &NodeVisual) -> Self {
        Self {
            id: n.id.clone(),
            x: n.x,
            y: n.y,
            radius: n.radius,
            scale: n.scale,
            opacity: n.opacity,
            rotation: n.rotation,
            node_type: n.node_type,
            label: n.label.clone(),
            entity: n.entity.clone(),
            style: n.style,
            glow: n.glow,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/node.rs"]
mod tests;
