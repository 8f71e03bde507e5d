use super::*;

#[test]
fn saved_state_round_trips() {
    let mut nodes = BTreeMap::new();
    nodes.insert("a".to_owned(), NodeVisual::new("a"));
    let edges = vec![EdgeVisual::new("a", "b", crate::style::color::Color::rgb(1, 2, 3))];
    let sb = PreviewSandbox::enter(&nodes, &edges, 0.0);
    let (n2, e2) = sb.into_saved();
    assert_eq!(n2, nodes);
    assert_eq!(e2, edges);
}

#[test]
fn removed_pairs_match_either_direction() {
    let mut sb = PreviewSandbox::enter(&BTreeMap::new(), &[], 0.0);
    sb.removed.push(("a".into(), "b".into()));
    assert!(sb.is_removed("a", "b"));
    assert!(sb.is_removed("b", "a"));
    assert!(!sb.is_removed("a", "c"));
}

#[test]
fn ants_advance_only_on_flagged_edges() {
    let mut sb = PreviewSandbox::enter(&BTreeMap::new(), &[], 1000.0);
    let c = crate::style::color::Color::rgb(1, 2, 3);
    let mut dashed = EdgeVisual::new("a", "p", c);
    dashed.preview.dashed = true;
    sb.edges = vec![dashed, EdgeVisual::new("p", "b", c)];
    sb.advance(1200.0);
    assert!((sb.edges[0].progress - 0.3).abs() < 1e-9);
    assert_eq!(sb.edges[1].progress, 0.0);
    sb.replay(1200.0);
    assert_eq!(sb.edges[0].progress, 0.0);
}

#[test]
fn pulse_starts_neutral_and_oscillates() {
    let sb = PreviewSandbox::enter(&BTreeMap::new(), &[], 0.0);
    let (s0, _) = sb.pulse(0.0, 1000.0);
    assert!((s0 - 1.0).abs() < 1e-12);
    let (s1, o1) = sb.pulse(250.0, 1000.0);
    assert!(s1 > 1.0);
    assert!(o1 <= 1.0);
}
