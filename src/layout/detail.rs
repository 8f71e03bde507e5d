use std::collections::HashSet;
use std::f64::consts::PI;

use crate::config::LayoutOpts;
use crate::foundation::core::{Canvas, Point};
use crate::layout::{EdgeDescriptor, Entity, LayoutResult, NodeDescriptor, ids};
use crate::style::palette::{NodeType, RelationKind};

/// Radial detail view around `center`.
///
/// Parents spread over the upper half-circle, angles strictly inside `(PI, 2*PI)`; children over
/// the lower half at a smaller orbit. The center slot only depends on the canvas, never on the
/// satellite counts.
#[tracing::instrument(skip_all, fields(center = %center.id, parents = parents.len(), children = children.len()))]
pub fn compute_detail_layout(
    canvas: Canvas,
    opts: &LayoutOpts,
    center: &Entity,
    parents: &[Entity],
    children: &[Entity],
) -> LayoutResult {
    let mut out = LayoutResult::default();
    let mut seen = HashSet::new();

    let origin = detail_center(canvas, opts);
    let center_id = ids::center(&center.id);
    out.push_node(
        &mut seen,
        NodeDescriptor::for_entity(
            center_id.clone(),
            center,
            NodeType::Center,
            origin,
            opts.center_radius,
        ),
    );

    let parent_orbit = parent_orbit(canvas, opts);
    let child_orbit = parent_orbit * opts.child_orbit_ratio;

    for (i, entity) in parents.iter().enumerate() {
        let angle = PI + half_circle_angle(i, parents.len());
        let id = ids::parent(&entity.id);
        let before = out.nodes.len();
        out.push_node(
            &mut seen,
            NodeDescriptor::for_entity(
                id.clone(),
                entity,
                NodeType::Parent,
                polar(origin, parent_orbit, angle),
                opts.satellite_radius,
            ),
        );
        if out.nodes.len() > before {
            out.edges
                .push(EdgeDescriptor::new(id, center_id.clone(), RelationKind::Parent));
        }
    }

    for (i, entity) in children.iter().enumerate() {
        let angle = half_circle_angle(i, children.len());
        let id = ids::child(&entity.id);
        let before = out.nodes.len();
        out.push_node(
            &mut seen,
            NodeDescriptor::for_entity(
                id.clone(),
                entity,
                NodeType::Child,
                polar(origin, child_orbit, angle),
                opts.satellite_radius,
            ),
        );
        if out.nodes.len() > before {
            out.edges
                .push(EdgeDescriptor::new(center_id.clone(), id, RelationKind::Child));
        }
    }

    out
}

/// Center slot of a detail layout.
pub fn detail_center(canvas: Canvas, opts: &LayoutOpts) -> Point {
    let c = canvas.center();
    Point::new(c.x, c.y + opts.center_offset_y)
}

fn parent_orbit(canvas: Canvas, opts: &LayoutOpts) -> f64 {
    (canvas.h() * opts.parent_orbit_fraction).min(opts.parent_orbit_max)
}

/// Angle of item `i` of `n` spread evenly over the open interval `(0, PI)`.
fn half_circle_angle(i: usize, n: usize) -> f64 {
    PI * ((i + 1) as f64) / ((n + 1) as f64)
}

pub(crate) fn polar(origin: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        origin.x + radius * angle.cos(),
        origin.y + radius * angle.sin(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/detail.rs"]
mod tests;
