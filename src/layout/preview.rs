use crate::config::LayoutOpts;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{NodeweaveError, NodeweaveResult};
use crate::layout::{EdgeDescriptor, EdgePreview, Entity, LayoutResult, NodeDescriptor, ids};
use crate::style::palette::{NodeType, RelationKind};

/// Proposed "insert `node` between A and B" edit, computed without touching real state.
#[derive(Clone, Debug, PartialEq)]
pub struct InsertPreview {
    /// Preview-only nodes.
    pub nodes: Vec<NodeDescriptor>,
    /// Preview-only edges, flagged new and dashed.
    pub edges: Vec<EdgeDescriptor>,
    /// Existing edges the edit would remove, as `(from, to)` pairs.
    pub removed: Vec<(String, String)>,
}

/// Place `node` between `a_id` and `b_id` of `base` and reroute A-B through it.
///
/// The preview node sits at the A-B midpoint pushed perpendicular to the segment by
/// `preview_offset` (straight up when A and B coincide). Any existing A-B edge, in either
/// direction, is reported as removed.
pub fn compute_insert_preview(
    base: &LayoutResult,
    opts: &LayoutOpts,
    node: &Entity,
    a_id: &str,
    b_id: &str,
) -> NodeweaveResult<InsertPreview> {
    let a = base
        .node(a_id)
        .ok_or_else(|| NodeweaveError::layout(format!("preview anchor '{a_id}' is not laid out")))?;
    let b = base
        .node(b_id)
        .ok_or_else(|| NodeweaveError::layout(format!("preview anchor '{b_id}' is not laid out")))?;

    let pos = insert_position(a.pos(), b.pos(), opts.preview_offset);
    let id = ids::preview(&node.id);
    let radius = 0.5 * (a.radius + b.radius).min(2.0 * opts.satellite_radius);
    let descriptor = NodeDescriptor::for_entity(id.clone(), node, NodeType::Preview, pos, radius);

    let flagged = EdgePreview {
        dashed: true,
        is_new: true,
        removed: false,
    };
    let mut first = EdgeDescriptor::new(a_id, id.clone(), RelationKind::Link);
    first.preview = flagged;
    let mut second = EdgeDescriptor::new(id, b_id, RelationKind::Link);
    second.preview = flagged;

    let removed = base
        .edges
        .iter()
        .filter(|e| e.joins(a_id, b_id))
        .map(|e| (e.from.clone(), e.to.clone()))
        .collect();

    Ok(InsertPreview {
        nodes: vec![descriptor],
        edges: vec![first, second],
        removed,
    })
}

fn insert_position(a: Point, b: Point, offset: f64) -> Point {
    let mid = a.midpoint(b);
    let d = b - a;
    let len = d.hypot();
    let normal = if len > f64::EPSILON {
        Vec2::new(-d.y / len, d.x / len)
    } else {
        Vec2::new(0.0, -1.0)
    };
    mid + normal * offset
}

#[cfg(test)]
#[path = "../../tests/unit/layout/preview.rs"]
mod tests;
