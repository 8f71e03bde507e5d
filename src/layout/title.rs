use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::f64::consts::TAU;

use crate::config::LayoutOpts;
use crate::foundation::core::Canvas;
use crate::layout::detail::polar;
use crate::layout::{EdgeDescriptor, Entity, LayoutResult, NodeDescriptor, ids};
use crate::style::palette::{NodeType, RelationKind};

/// Graph-style title view.
///
/// The title sits at the canvas center. Members are ranked by breadth-first depth over their
/// parent/child name references, starting from members with no parent inside the set, and
/// placed on one ring per depth. Members only reachable through a cycle land on the ring after
/// the deepest reachable one.
#[tracing::instrument(skip_all, fields(title = %title.id, members = members.len()))]
pub fn compute_title_layout(
    canvas: Canvas,
    opts: &LayoutOpts,
    title: &Entity,
    members: &[Entity],
) -> LayoutResult {
    let mut out = LayoutResult::default();
    let mut seen = HashSet::new();
    let origin = canvas.center();
    let title_id = ids::title(&title.id);

    out.push_node(
        &mut seen,
        NodeDescriptor::for_entity(
            title_id.clone(),
            title,
            NodeType::Title,
            origin,
            opts.center_radius,
        ),
    );

    let members = dedup_members(members);
    if members.is_empty() {
        return out;
    }

    let depths = member_depths(&members);
    let mut rings: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, d) in depths.iter().enumerate() {
        rings.entry(*d).or_default().push(i);
    }

    let ring_count = rings.len().max(1) as f64;
    let max_extent = (canvas.w().min(canvas.h()) * 0.45).max(opts.satellite_radius);
    let spacing = opts.title_ring_spacing.min(max_extent / ring_count);

    for (ring_idx, (depth, slots)) in rings.iter().enumerate() {
        let radius = spacing * ((ring_idx + 1) as f64);
        let phase = (*depth as f64) * 0.35;
        for (k, &mi) in slots.iter().enumerate() {
            let angle = phase + TAU * (k as f64) / (slots.len() as f64) - TAU / 4.0;
            let entity = members[mi];
            out.push_node(
                &mut seen,
                NodeDescriptor::for_entity(
                    ids::member(&entity.id),
                    entity,
                    NodeType::Member,
                    polar(origin, radius, angle),
                    opts.satellite_radius,
                ),
            );
        }
    }

    let by_name: HashMap<&str, &Entity> = members.iter().map(|e| (e.name.as_str(), *e)).collect();
    let mut edge_keys = HashSet::new();
    for (i, entity) in members.iter().enumerate() {
        let member_id = ids::member(&entity.id);
        if depths[i] == 0 {
            push_edge(
                &mut out,
                &mut edge_keys,
                EdgeDescriptor::new(title_id.clone(), member_id.clone(), RelationKind::Member),
            );
        }
        for child in &entity.children {
            if let Some(c) = by_name.get(child.as_str()) {
                push_edge(
                    &mut out,
                    &mut edge_keys,
                    EdgeDescriptor::new(member_id.clone(), ids::member(&c.id), RelationKind::Link),
                );
            }
        }
        for parent in &entity.parents {
            if let Some(p) = by_name.get(parent.as_str()) {
                push_edge(
                    &mut out,
                    &mut edge_keys,
                    EdgeDescriptor::new(ids::member(&p.id), member_id.clone(), RelationKind::Link),
                );
            }
        }
    }

    out
}

fn dedup_members(members: &[Entity]) -> Vec<&Entity> {
    let mut seen = HashSet::new();
    members.iter().filter(|m| seen.insert(m.id.as_str())).collect()
}

fn push_edge(out: &mut LayoutResult, keys: &mut HashSet<(String, String)>, edge: EdgeDescriptor) {
    if edge.from == edge.to {
        return;
    }
    let key = if edge.from <= edge.to {
        (edge.from.clone(), edge.to.clone())
    } else {
        (edge.to.clone(), edge.from.clone())
    };
    if keys.insert(key) {
        out.edges.push(edge);
    }
}

/// Breadth-first depth of every member.
fn member_depths(members: &[&Entity]) -> Vec<usize> {
    let index: HashMap<&str, usize> = members
        .iter()
        .enumerate()
        .map(|(i, e)| (e.name.as_str(), i))
        .collect();

    // Adjacency parent -> children, merged from both reference directions.
    let mut kids: Vec<Vec<usize>> = vec![Vec::new(); members.len()];
    let mut has_parent = vec![false; members.len()];
    for (i, e) in members.iter().enumerate() {
        for c in &e.children {
            if let Some(&ci) = index.get(c.as_str())
                && ci != i
            {
                kids[i].push(ci);
                has_parent[ci] = true;
            }
        }
        for p in &e.parents {
            if let Some(&pi) = index.get(p.as_str())
                && pi != i
            {
                kids[pi].push(i);
                has_parent[i] = true;
            }
        }
    }

    let mut depth: Vec<Option<usize>> = vec![None; members.len()];
    let mut queue = VecDeque::new();
    for (i, hp) in has_parent.iter().enumerate() {
        if !hp {
            depth[i] = Some(0);
            queue.push_back(i);
        }
    }
    while let Some(i) = queue.pop_front() {
        let d = depth[i].unwrap_or(0);
        for &c in &kids[i] {
            if depth[c].is_none() {
                depth[c] = Some(d + 1);
                queue.push_back(c);
            }
        }
    }

    let deepest = depth.iter().flatten().copied().max();
    let orphan_depth = deepest.map_or(0, |d| d + 1);
    depth
        .into_iter()
        .map(|d| d.unwrap_or(orphan_depth))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/title.rs"]
mod tests;
