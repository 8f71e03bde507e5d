use super::*;

fn canvas() -> Canvas {
    Canvas::new(800, 600).unwrap()
}

fn entities(prefix: &str, n: usize) -> Vec<Entity> {
    (0..n)
        .map(|i| Entity::new(format!("{prefix}{i}"), format!("{prefix} {i}")))
        .collect()
}

#[test]
fn center_position_is_independent_of_satellite_counts() {
    let center = Entity::new("c", "Center");
    let opts = LayoutOpts::default();
    let reference = compute_detail_layout(canvas(), &opts, &center, &[], &[]);
    let c0 = reference.node("center-c").unwrap().pos();
    for (p, k) in [(1, 0), (0, 1), (3, 5), (8, 2)] {
        let out = compute_detail_layout(
            canvas(),
            &opts,
            &center,
            &entities("p", p),
            &entities("k", k),
        );
        assert_eq!(out.node("center-c").unwrap().pos(), c0);
    }
    assert_eq!(c0, Point::new(400.0, 300.0 + opts.center_offset_y));
}

#[test]
fn edge_count_matches_satellites() {
    let center = Entity::new("c", "Center");
    for (p, k) in [(0, 0), (2, 0), (0, 4), (3, 3)] {
        let out = compute_detail_layout(
            canvas(),
            &LayoutOpts::default(),
            &center,
            &entities("p", p),
            &entities("k", k),
        );
        assert_eq!(out.edges.len(), p + k);
        assert_eq!(out.nodes.len(), 1 + p + k);
    }
}

#[test]
fn parents_sit_above_and_children_below_center() {
    let center = Entity::new("c", "Center");
    let out = compute_detail_layout(
        canvas(),
        &LayoutOpts::default(),
        &center,
        &entities("p", 4),
        &entities("k", 4),
    );
    let cy = out.center().unwrap().y;
    for n in &out.nodes {
        match n.node_type {
            NodeType::Parent => assert!(n.y < cy, "{} should be above", n.id),
            NodeType::Child => assert!(n.y > cy, "{} should be below", n.id),
            _ => {}
        }
    }
}

#[test]
fn child_orbit_is_smaller_than_parent_orbit() {
    let center = Entity::new("c", "Center");
    let out = compute_detail_layout(
        canvas(),
        &LayoutOpts::default(),
        &center,
        &entities("p", 1),
        &entities("k", 1),
    );
    let c = out.center().unwrap().pos();
    let dp = out.node("parent-p0").unwrap().pos().distance(c);
    let dk = out.node("child-k0").unwrap().pos().distance(c);
    assert!(dk < dp);
    assert!(dp <= 600.0 * 0.5);
}

#[test]
fn edges_are_colored_by_relation() {
    let center = Entity::new("c", "Center");
    let out = compute_detail_layout(
        canvas(),
        &LayoutOpts::default(),
        &center,
        &entities("p", 1),
        &entities("k", 1),
    );
    let pe = out.edges.iter().find(|e| e.from == "parent-p0").unwrap();
    assert_eq!(pe.to, "center-c");
    assert_eq!(pe.color, RelationKind::Parent.color());
    let ce = out.edges.iter().find(|e| e.to == "child-k0").unwrap();
    assert_eq!(ce.color, RelationKind::Child.color());
}

#[test]
fn duplicate_satellites_are_dropped_with_their_edges() {
    let center = Entity::new("c", "Center");
    let dup = vec![Entity::new("p", "P"), Entity::new("p", "P again")];
    let out = compute_detail_layout(canvas(), &LayoutOpts::default(), &center, &dup, &[]);
    assert_eq!(out.nodes.len(), 2);
    assert_eq!(out.edges.len(), 1);
}
