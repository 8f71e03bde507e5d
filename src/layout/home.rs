use std::collections::HashSet;

use crate::config::LayoutOpts;
use crate::foundation::core::{Canvas, Point};
use crate::layout::{Entity, LayoutResult, NodeDescriptor, ids};
use crate::style::palette::NodeType;

/// Home overview: a row-major grid of roots with a featured row underneath.
///
/// Non-empty `search` yields an empty layout; search hits are shown by the host as a plain
/// list. Each grid row is centered on its own item count, so a short last row stays centered.
#[tracing::instrument(skip_all, fields(roots = roots.len(), featured = featured.len()))]
pub fn compute_home_layout(
    canvas: Canvas,
    opts: &LayoutOpts,
    roots: &[Entity],
    featured: &[Entity],
    search: &[Entity],
) -> LayoutResult {
    let mut out = LayoutResult::default();
    if !search.is_empty() {
        return out;
    }

    let cols = opts.home_columns.clamp(1, 3);
    let cx = canvas.w() / 2.0;
    let top = canvas.h() * opts.home_top_fraction;
    let mut seen = HashSet::new();

    for (i, entity) in roots.iter().enumerate() {
        let row = i / cols;
        let col = i % cols;
        let in_row = cols.min(roots.len() - row * cols);
        let x = cx + centered_offset(col, in_row) * opts.home_col_spacing;
        let y = top + opts.home_cell_half + (row as f64) * opts.home_row_spacing;
        out.push_node(
            &mut seen,
            NodeDescriptor::for_entity(
                ids::root(&entity.id),
                entity,
                NodeType::Root,
                Point::new(x, y),
                opts.root_radius,
            ),
        );
    }

    let rows = roots.len().div_ceil(cols);
    let featured_y =
        top + opts.home_cell_half + (rows as f64) * opts.home_row_spacing + opts.featured_gap;
    for (j, entity) in featured.iter().enumerate() {
        let x = cx + centered_offset(j, featured.len()) * opts.featured_spacing;
        out.push_node(
            &mut seen,
            NodeDescriptor::for_entity(
                ids::featured(&entity.id),
                entity,
                NodeType::Featured,
                Point::new(x, featured_y),
                opts.featured_radius,
            ),
        );
    }

    out
}

/// Slot offset, in spacing units, of item `i` in a centered row of `n`.
fn centered_offset(i: usize, n: usize) -> f64 {
    (i as f64) - ((n.max(1) - 1) as f64) / 2.0
}

#[cfg(test)]
#[path = "../../tests/unit/layout/home.rs"]
mod tests;
