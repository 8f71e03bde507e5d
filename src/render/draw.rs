//! Backend-agnostic draw commands in screen space.

use crate::foundation::core::{Point, Rgba8Premul};

/// Dash pattern for a line, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Dash {
    /// Drawn length.
    pub on: f64,
    /// Gap length.
    pub off: f64,
    /// Phase shift along the line.
    pub offset: f64,
}

/// One primitive.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCmd {
    /// Straight segment.
    Line {
        /// Start.
        from: Point,
        /// End.
        to: Point,
        /// Stroke width.
        width: f64,
        /// Premultiplied color.
        color: Rgba8Premul,
        /// Dash pattern; solid when `None`.
        dash: Option<Dash>,
    },
    /// Filled disc.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Premultiplied color.
        color: Rgba8Premul,
    },
    /// Annulus of `width` centered on `radius`.
    Ring {
        /// Center.
        center: Point,
        /// Mid-line radius.
        radius: f64,
        /// Ring thickness.
        width: f64,
        /// Premultiplied color.
        color: Rgba8Premul,
    },
}

/// Host-drawn element positioned in screen space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    /// Node label, anchored below the node.
    Label {
        /// Node id.
        node_id: String,
        /// Text.
        text: String,
        /// Anchor.
        pos: Point,
        /// Opacity inherited from the node.
        opacity: f64,
    },
    /// Bobbing focus marker above a center node.
    Marker {
        /// Node id.
        node_id: String,
        /// Anchor.
        pos: Point,
    },
    /// Button icon and tooltip.
    Button {
        /// Owning node id.
        node_id: String,
        /// Button id.
        button_id: String,
        /// Icon name.
        icon: String,
        /// Tooltip text.
        tooltip: String,
        /// Center.
        pos: Point,
        /// Disabled styling.
        disabled: bool,
    },
}

/// Ordered frame description.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct DrawList {
    /// Background color.
    pub clear: Rgba8Premul,
    /// Primitives in paint order.
    pub cmds: Vec<DrawCmd>,
    /// Host overlays in paint order.
    pub overlays: Vec<Overlay>,
}

/// Split `from -> to` into the "on" pieces of `dash`.
pub fn dash_segments(from: Point, to: Point, dash: Dash) -> Vec<(Point, Point)> {
    let len = (to - from).hypot();
    let period = dash.on + dash.off;
    if len <= f64::EPSILON || dash.on <= 0.0 || period <= 0.0 {
        return Vec::new();
    }
    let dir = (to - from) / len;
    let mut out = Vec::new();
    let mut s = -dash.offset.rem_euclid(period);
    while s < len {
        let a = s.max(0.0);
        let b = (s + dash.on).min(len);
        if b > a {
            out.push((from + dir * a, from + dir * b));
        }
        s += period;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
