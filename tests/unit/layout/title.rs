use super::*;

fn canvas() -> Canvas {
    Canvas::new(800, 600).unwrap()
}

fn chain() -> Vec<Entity> {
    vec![
        Entity::new("a", "A").with_child("B"),
        Entity::new("b", "B").with_child("C"),
        Entity::new("c", "C"),
        Entity::new("d", "D").with_parent("A"),
    ]
}

#[test]
fn title_sits_at_canvas_center() {
    let out = compute_title_layout(canvas(), &LayoutOpts::default(), &Entity::new("t", "T"), &[]);
    assert_eq!(out.nodes.len(), 1);
    let t = out.center().unwrap();
    assert_eq!(t.id, "title-t");
    assert_eq!(t.pos(), canvas().center());
}

#[test]
fn members_land_on_rings_by_depth() {
    let title = Entity::new("t", "T");
    let out = compute_title_layout(canvas(), &LayoutOpts::default(), &title, &chain());
    let c = canvas().center();
    let dist = |id: &str| out.node(id).unwrap().pos().distance(c);

    assert!(dist("member-a") < dist("member-b"));
    assert!((dist("member-b") - dist("member-d")).abs() < 1e-9);
    assert!(dist("member-b") < dist("member-c"));
}

#[test]
fn edges_follow_references_inside_the_set() {
    let title = Entity::new("t", "T");
    let mut members = chain();
    members.push(Entity::new("x", "X").with_parent("Nowhere"));
    let out = compute_title_layout(canvas(), &LayoutOpts::default(), &title, &members);

    let has = |a: &str, b: &str| out.edges.iter().any(|e| e.joins(a, b));
    assert!(has("title-t", "member-a"));
    assert!(has("title-t", "member-x"));
    assert!(has("member-a", "member-b"));
    assert!(has("member-b", "member-c"));
    assert!(has("member-a", "member-d"));
    assert!(!has("title-t", "member-c"));
    assert_eq!(out.edges.len(), 5);
}

#[test]
fn cycles_do_not_hang_and_everything_is_placed() {
    let title = Entity::new("t", "T");
    let members = vec![
        Entity::new("a", "A").with_child("B"),
        Entity::new("b", "B").with_child("A"),
    ];
    let out = compute_title_layout(canvas(), &LayoutOpts::default(), &title, &members);
    assert_eq!(out.nodes.len(), 3);
    assert!(out.nodes.iter().all(|n| n.x.is_finite() && n.y.is_finite()));
}

#[test]
fn rings_stay_inside_the_canvas() {
    let title = Entity::new("t", "T");
    let mut members = Vec::new();
    for i in 0..8 {
        let mut e = Entity::new(format!("m{i}"), format!("M{i}"));
        if i > 0 {
            e = e.with_parent(format!("M{}", i - 1));
        }
        members.push(e);
    }
    let out = compute_title_layout(canvas(), &LayoutOpts::default(), &title, &members);
    let c = canvas().center();
    for n in &out.nodes {
        assert!(n.pos().distance(c) <= 600.0 * 0.45 + 1e-9);
    }
}
