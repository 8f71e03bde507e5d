use super::*;
use std::cell::RefCell;
use std::rc::Rc;

use smallvec::smallvec;

use crate::foundation::error::NodeweaveError;

fn engine() -> RenderEngine {
    RenderEngine::new(800, 600, EngineOpts::default()).unwrap()
}

fn place(e: &mut RenderEngine, id: &str, x: f64, y: f64, r: f64) {
    e.set_node(id, &NodePatch::default().at(x, y).radius(r));
}

fn button(id: &str, angle: f64) -> NodeButton {
    NodeButton {
        id: id.to_owned(),
        icon: "edit".to_owned(),
        angle,
        action: format!("do-{id}"),
        tooltip: "Edit".to_owned(),
        color: Color::rgb(200, 200, 200),
        disabled: false,
    }
}

fn line_count(list: &DrawList) -> usize {
    list.cmds
        .iter()
        .filter(|c| matches!(c, DrawCmd::Line { .. }))
        .count()
}

#[test]
fn zero_surface_is_fatal() {
    let err = RenderEngine::new(0, 600, EngineOpts::default()).unwrap_err();
    assert!(matches!(err, NodeweaveError::Surface(_)));
}

#[test]
fn set_node_applies_defaults_then_patches() {
    let mut e = engine();
    e.set_node("a", &NodePatch::default());
    let n = e.node("a").unwrap();
    assert_eq!((n.radius, n.scale, n.opacity, n.visible), (50.0, 1.0, 1.0, true));
    e.set_node("a", &NodePatch::default().opacity(0.25));
    assert_eq!(e.node("a").unwrap().opacity, 0.25);
    assert_eq!(e.node("a").unwrap().radius, 50.0);
}

#[test]
fn animate_missing_node_resolves_immediately() {
    let mut e = engine();
    let h = e.animate_node("ghost", &NodePatch::default().at(1.0, 1.0), 300.0, Ease::Linear, 0.0);
    assert_eq!(h.outcome(), Some(TweenOutcome::Skipped));
    assert_eq!(e.tween_count(), 0);
}

#[test]
fn retarget_settles_on_second_target_without_jump() {
    let mut e = engine();
    place(&mut e, "a", 0.0, 0.0, 10.0);
    e.tick(0.0);
    let first = e.animate_node("a", &NodePatch::default().at(100.0, 0.0), 1000.0, Ease::Linear, 0.0);
    e.tick(400.0);
    let mid = e.node("a").unwrap().x;
    assert!((mid - 40.0).abs() < 1e-9);

    let second = e.animate_node("a", &NodePatch::default().at(-50.0, 0.0), 1000.0, Ease::OutCubic, 0.0);
    assert_eq!(first.outcome(), Some(TweenOutcome::Superseded));
    e.tick(400.0);
    assert!((e.node("a").unwrap().x - mid).abs() < 1e-9);
    e.tick(401.0);
    assert!((e.node("a").unwrap().x - mid).abs() < 1.0);

    e.tick(1400.0);
    assert_eq!(e.node("a").unwrap().x, -50.0);
    assert_eq!(second.outcome(), Some(TweenOutcome::Completed));
    assert_eq!(e.tween_count(), 0);
}

#[test]
fn discrete_fields_apply_before_the_tween_runs() {
    let mut e = engine();
    place(&mut e, "a", 0.0, 0.0, 10.0);
    let patch = NodePatch {
        label: Some("now".into()),
        ..NodePatch::default().at(50.0, 0.0)
    };
    e.animate_node("a", &patch, 500.0, Ease::Linear, 100.0);
    let n = e.node("a").unwrap();
    assert_eq!(n.label, "now");
    assert_eq!(n.x, 0.0);
}

#[test]
fn delayed_tween_waits() {
    let mut e = engine();
    place(&mut e, "a", 0.0, 0.0, 10.0);
    let h = e.animate_node("a", &NodePatch::default().opacity(0.0), 100.0, Ease::Linear, 200.0);
    e.tick(150.0);
    assert_eq!(e.node("a").unwrap().opacity, 1.0);
    e.tick(250.0);
    assert!((e.node("a").unwrap().opacity - 0.5).abs() < 1e-9);
    e.tick(300.0);
    assert_eq!(h.outcome(), Some(TweenOutcome::Completed));
}

#[test]
fn clear_and_resize_cancel_in_flight_tweens() {
    let mut e = engine();
    place(&mut e, "a", 0.0, 0.0, 10.0);
    let h = e.animate_node("a", &NodePatch::default().at(9.0, 9.0), 500.0, Ease::Linear, 0.0);
    e.resize(1024, 768).unwrap();
    assert_eq!(h.outcome(), Some(TweenOutcome::Cancelled));
    assert_eq!(e.canvas(), Canvas::new(1024, 768).unwrap());

    let h = e.animate_node("a", &NodePatch::default().at(9.0, 9.0), 500.0, Ease::Linear, 0.0);
    e.set_buttons("a", smallvec![button("x", 0.0)]);
    e.clear_nodes();
    assert_eq!(h.outcome(), Some(TweenOutcome::Cancelled));
    assert_eq!(e.node_count(), 0);
    assert!(e.buttons().is_empty());
}

#[test]
fn remove_node_cancels_its_tween() {
    let mut e = engine();
    place(&mut e, "a", 0.0, 0.0, 10.0);
    let h = e.animate_node("a", &NodePatch::default().scale(2.0), 500.0, Ease::Linear, 0.0);
    assert!(e.remove_node("a"));
    assert_eq!(h.outcome(), Some(TweenOutcome::Cancelled));
    assert!(!e.remove_node("a"));
}

#[test]
fn rekey_carries_tween_and_buttons() {
    let mut e = engine();
    place(&mut e, "root-x", 0.0, 0.0, 10.0);
    e.set_buttons("root-x", smallvec![button("b", 0.0)]);
    let h = e.animate_node("root-x", &NodePatch::default().at(10.0, 0.0), 100.0, Ease::Linear, 0.0);
    assert!(e.rekey_node("root-x", "center-x"));
    assert!(e.node("root-x").is_none());
    assert_eq!(e.node("center-x").unwrap().id, "center-x");
    assert_eq!(e.buttons().get("center-x").len(), 1);
    e.tick(100.0);
    assert_eq!(h.outcome(), Some(TweenOutcome::Completed));
    assert_eq!(e.node("center-x").unwrap().x, 10.0);
}

#[test]
fn hit_test_center_and_boundary() {
    let mut e = engine();
    e.set_node("a", &NodePatch::default().at(100.0, 100.0).radius(10.0).scale(1.5));
    assert_eq!(e.hit_test(Point::new(100.0, 100.0)), Some(Hit::Node("a".into())));
    assert_eq!(e.hit_test(Point::new(115.0, 100.0)), Some(Hit::Node("a".into())));
    assert_eq!(e.hit_test(Point::new(115.0 + 1e-6, 100.0)), None);
}

#[test]
fn transparent_node_is_still_hit_but_hidden_is_not() {
    let mut e = engine();
    e.set_node("a", &NodePatch::default().at(100.0, 100.0).radius(20.0).opacity(0.0));
    assert_eq!(e.hit_test(Point::new(100.0, 100.0)), Some(Hit::Node("a".into())));
    assert_eq!(e.hit_test_node(Point::new(100.0, 100.0)).map(|n| n.id.as_str()), Some("a"));

    e.set_node(
        "a",
        &NodePatch {
            visible: Some(false),
            ..NodePatch::default()
        },
    );
    assert_eq!(e.hit_test(Point::new(100.0, 100.0)), None);
}

#[test]
fn non_finite_inputs_never_hit() {
    let mut e = engine();
    e.set_node("a", &NodePatch::default().at(f64::NAN, 100.0).radius(20.0));
    // The non-finite x is dropped, so the node keeps its default position.
    let a = e.node("a").unwrap();
    assert!(a.is_drawable());
    assert_ne!(a.x, 100.0);
    assert_eq!(e.hit_test(Point::new(100.0, 100.0)), None);
    place(&mut e, "b", 100.0, 100.0, 20.0);
    assert_eq!(e.hit_test(Point::new(f64::INFINITY, 100.0)), None);
    assert_eq!(e.hit_test(Point::new(100.0, 100.0)), Some(Hit::Node("b".into())));
}

#[test]
fn hit_test_respects_camera() {
    let mut e = engine();
    place(&mut e, "a", 100.0, 100.0, 10.0);
    e.pointer_down(Point::new(0.0, 0.0));
    e.pointer_move(Point::new(50.0, 0.0));
    e.pointer_up(Point::new(50.0, 0.0));
    assert_eq!(e.camera().offset, Vec2::new(50.0, 0.0));
    assert_eq!(e.hit_test(Point::new(150.0, 100.0)), Some(Hit::Node("a".into())));
    assert_eq!(e.hit_test(Point::new(100.0, 100.0)), None);
}

#[test]
fn topmost_node_wins_overlaps() {
    let mut e = engine();
    e.set_node("a", &NodePatch::default().at(0.0, 0.0).radius(20.0));
    e.set_node("b", &NodePatch::default().at(5.0, 0.0).radius(20.0).opacity(0.5));
    // `b` is fainter, so `a` is drawn above it.
    assert_eq!(e.hit_test(Point::new(2.0, 0.0)), Some(Hit::Node("a".into())));
    e.set_node("b", &NodePatch::default().opacity(1.0));
    // Equal opacity: id order, `b` drawn last.
    assert_eq!(e.hit_test(Point::new(2.0, 0.0)), Some(Hit::Node("b".into())));
}

#[test]
fn buttons_win_over_nodes() {
    let mut e = engine();
    place(&mut e, "a", 100.0, 100.0, 20.0);
    place(&mut e, "b", 136.0, 100.0, 20.0);
    e.set_buttons("a", smallvec![button("x", 0.0)]);
    // Button center: 100 + 20 + gap 16 = 136, right on top of `b`.
    match e.hit_test(Point::new(136.0, 100.0)) {
        Some(Hit::Button { node_id, button }) => {
            assert_eq!(node_id, "a");
            assert_eq!(button.id, "x");
        }
        other => panic!("expected button hit, got {other:?}"),
    }
}

#[test]
fn click_fires_callbacks_and_drag_suppresses() {
    let mut e = engine();
    place(&mut e, "a", 100.0, 100.0, 20.0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    e.set_callbacks(EngineCallbacks {
        on_node_click: Some(Box::new(move |n| sink.borrow_mut().push(n.id.clone()))),
        ..EngineCallbacks::default()
    });

    assert_eq!(e.click(Point::new(100.0, 100.0)), Some(EngineEvent::NodeClick("a".into())));
    assert_eq!(seen.borrow().as_slice(), ["a".to_owned()]);

    e.pointer_down(Point::new(100.0, 100.0));
    e.pointer_move(Point::new(140.0, 100.0));
    e.pointer_up(Point::new(140.0, 100.0));
    assert_eq!(e.click(Point::new(140.0, 100.0)), None);
    assert_eq!(seen.borrow().len(), 1);

    // A tiny wobble is still a click.
    e.pointer_down(Point::new(140.0, 100.0));
    e.pointer_move(Point::new(141.0, 100.0));
    e.pointer_up(Point::new(141.0, 100.0));
    assert!(e.click(Point::new(141.0, 100.0)).is_some());
}

#[test]
fn button_click_reports_action_and_disabled_is_swallowed() {
    let mut e = engine();
    place(&mut e, "a", 100.0, 100.0, 20.0);
    let mut off = button("y", std::f64::consts::PI);
    off.disabled = true;
    e.set_buttons("a", smallvec![button("x", 0.0), off]);
    assert_eq!(
        e.click(Point::new(136.0, 100.0)),
        Some(EngineEvent::ButtonClick {
            node_id: "a".into(),
            button_id: "x".into(),
            action: "do-x".into(),
        })
    );
    assert_eq!(e.click(Point::new(64.0, 100.0)), None);
}

#[test]
fn line_hits_when_no_node_is_under_the_pointer() {
    let mut e = engine();
    place(&mut e, "a", 0.0, 100.0, 10.0);
    place(&mut e, "b", 200.0, 100.0, 10.0);
    e.set_lines(vec![EdgeVisual::new("a", "b", Color::rgb(1, 1, 1))]);
    assert!(e.hit_test_line(Point::new(100.0, 104.0)).is_some());
    assert!(e.hit_test_line(Point::new(100.0, 110.0)).is_none());
    assert_eq!(
        e.click(Point::new(100.0, 103.0)),
        Some(EngineEvent::LineClick {
            from: "a".into(),
            to: "b".into(),
        })
    );
}

#[test]
fn double_click_reports_node() {
    let mut e = engine();
    place(&mut e, "a", 10.0, 10.0, 5.0);
    assert_eq!(e.double_click(Point::new(10.0, 10.0)), Some(EngineEvent::NodeDoubleClick("a".into())));
    assert_eq!(e.double_click(Point::new(300.0, 300.0)), None);
}

#[test]
fn double_click_after_drag_is_swallowed() {
    let mut e = engine();
    place(&mut e, "a", 100.0, 100.0, 20.0);
    let seen = Rc::new(RefCell::new(0));
    let sink = seen.clone();
    e.set_callbacks(EngineCallbacks {
        on_node_double_click: Some(Box::new(move |_| *sink.borrow_mut() += 1)),
        ..EngineCallbacks::default()
    });

    e.pointer_down(Point::new(60.0, 100.0));
    e.pointer_move(Point::new(100.0, 100.0));
    e.pointer_up(Point::new(100.0, 100.0));
    // Hosts deliver the click first, then the double-click.
    assert_eq!(e.click(Point::new(100.0, 100.0)), None);
    assert_eq!(e.double_click(Point::new(100.0, 100.0)), None);
    assert_eq!(*seen.borrow(), 0);

    // Camera moved by the drag; a plain press and release re-arms the double-click.
    let at = e.camera().world_to_screen(Point::new(100.0, 100.0));
    e.pointer_down(at);
    e.pointer_up(at);
    assert_eq!(e.double_click(at), Some(EngineEvent::NodeDoubleClick("a".into())));
    assert_eq!(*seen.borrow(), 1);
}

#[test]
fn hover_tracks_pointer_and_highlights_rim() {
    let mut e = engine();
    place(&mut e, "a", 100.0, 100.0, 20.0);
    e.pointer_move(Point::new(100.0, 100.0));
    assert_eq!(e.hovered(), Some("a"));
    let list = e.draw_list();
    assert!(list.cmds.iter().any(|c| matches!(c, DrawCmd::Ring { width, .. } if *width == 3.0)));
    e.pointer_move(Point::new(400.0, 400.0));
    assert_eq!(e.hovered(), None);
}

#[test]
fn wheel_zooms_about_pointer() {
    let mut e = engine();
    e.wheel(Point::new(400.0, 300.0), -1.0);
    assert!((e.camera().zoom - 1.1).abs() < 1e-12);
    e.wheel(Point::new(400.0, 300.0), 1.0);
    assert!((e.camera().zoom - 0.99).abs() < 1e-12);
    e.wheel(Point::new(400.0, 300.0), 0.0);
    assert!((e.camera().zoom - 0.99).abs() < 1e-12);
}

#[test]
fn malformed_primitives_are_skipped() {
    let mut e = engine();
    place(&mut e, "a", 0.0, 0.0, 10.0);
    place(&mut e, "b", 50.0, 0.0, 10.0);
    e.set_node("hidden", &NodePatch {
        visible: Some(false),
        ..NodePatch::default()
    });
    e.set_lines(vec![
        EdgeVisual::new("a", "b", Color::rgb(1, 1, 1)),
        EdgeVisual::new("a", "missing", Color::rgb(1, 1, 1)),
        EdgeVisual::new("hidden", "b", Color::rgb(1, 1, 1)),
    ]);
    let list = e.draw_list();
    assert_eq!(line_count(&list), 1);
}

#[test]
fn draw_order_is_edges_then_nodes_by_opacity() {
    let mut e = engine();
    e.set_node("a", &NodePatch::default().at(0.0, 0.0).radius(10.0).opacity(1.0));
    e.set_node("b", &NodePatch::default().at(50.0, 0.0).radius(10.0).opacity(0.2));
    e.set_lines(vec![EdgeVisual::new("a", "b", Color::rgb(1, 1, 1))]);
    let list = e.draw_list();
    assert!(matches!(list.cmds[0], DrawCmd::Line { .. }));
    // The first body drawn after the edge belongs to the faint node.
    let first_center = list
        .cmds
        .iter()
        .find_map(|c| match c {
            DrawCmd::Circle { center, .. } => Some(*center),
            _ => None,
        })
        .unwrap();
    assert_eq!(first_center, Point::new(50.0, 0.0));
}

#[test]
fn overlays_carry_labels_and_buttons() {
    let mut e = engine();
    e.set_node("a", &NodePatch {
        label: Some("Alpha".into()),
        ..NodePatch::default().at(100.0, 100.0).radius(20.0)
    });
    e.set_buttons("a", smallvec![button("x", 0.0)]);
    let list = e.draw_list();
    assert!(list.overlays.iter().any(|o| matches!(o, Overlay::Label { text, .. } if text == "Alpha")));
    assert!(list.overlays.iter().any(|o| matches!(o, Overlay::Button { button_id, .. } if button_id == "x")));
}

#[test]
fn preview_round_trip_restores_registry() {
    let mut e = engine();
    place(&mut e, "a", 0.0, 0.0, 10.0);
    place(&mut e, "b", 100.0, 0.0, 10.0);
    e.set_lines(vec![EdgeVisual::new("a", "b", Color::rgb(1, 1, 1))]);
    let nodes_before: Vec<NodeVisual> = e.nodes().cloned().collect();
    let edges_before = e.edges().to_vec();

    e.enter_preview_mode();
    assert!(e.is_preview_active());
    assert!(e.exit_preview_mode());

    let nodes_after: Vec<NodeVisual> = e.nodes().cloned().collect();
    assert_eq!(nodes_after, nodes_before);
    assert_eq!(e.edges(), edges_before.as_slice());
    assert!(!e.exit_preview_mode());
}

#[test]
fn preview_freezes_registry_and_dims_removed_edges() {
    let mut e = engine();
    place(&mut e, "a", 0.0, 0.0, 10.0);
    place(&mut e, "b", 100.0, 0.0, 10.0);
    e.set_lines(vec![EdgeVisual::new("a", "b", Color::rgb(255, 255, 255))]);

    e.enter_preview_mode();
    e.set_node("a", &NodePatch::default().at(999.0, 0.0));
    assert_eq!(e.node("a").unwrap().x, 0.0);
    let h = e.animate_node("a", &NodePatch::default().opacity(0.0), 100.0, Ease::Linear, 0.0);
    assert_eq!(h.outcome(), Some(TweenOutcome::Skipped));

    let mut p = NodeVisual::new("preview-n");
    NodePatch::default().at(50.0, 40.0).radius(10.0).apply(&mut p);
    let mut ea = EdgeVisual::new("a", "preview-n", Color::rgb(255, 255, 255));
    ea.preview.dashed = true;
    ea.preview.is_new = true;
    let eb = EdgeVisual::new("preview-n", "b", Color::rgb(255, 255, 255));
    assert!(e.set_preview(vec![p], vec![ea, eb], vec![("a".into(), "b".into())]));

    let list = e.draw_list();
    assert_eq!(line_count(&list), 3);
    match &list.cmds[0] {
        DrawCmd::Line { color, .. } => assert!(color.a < 255),
        other => panic!("expected dimmed edge, got {other:?}"),
    }
    assert_eq!(e.hit_test(Point::new(50.0, 40.0)), Some(Hit::Node("preview-n".into())));

    e.exit_preview_mode();
    assert_eq!(line_count(&e.draw_list()), 1);
}

#[test]
fn reentering_preview_restores_first() {
    let mut e = engine();
    place(&mut e, "a", 0.0, 0.0, 10.0);
    e.enter_preview_mode();
    e.set_preview(vec![NodeVisual::new("preview-x")], Vec::new(), Vec::new());
    e.enter_preview_mode();
    assert!(e.preview().unwrap().nodes.is_empty());
    e.exit_preview_mode();
    assert_eq!(e.node_count(), 1);
}

#[test]
fn loop_state_follows_tweens_and_nodes() {
    let mut e = engine();
    assert_eq!(e.tick(0.0), LoopState::Idle);
    place(&mut e, "a", 0.0, 0.0, 10.0);
    assert_eq!(e.loop_state(), LoopState::Steady);
    e.animate_node("a", &NodePatch::default().at(5.0, 0.0), 100.0, Ease::Linear, 0.0);
    assert_eq!(e.loop_state(), LoopState::Animating);
    assert_eq!(e.tick(100.0), LoopState::Steady);
    e.clear_nodes();
    assert_eq!(e.loop_state(), LoopState::Idle);
    assert!(!e.wants_frame());
}

#[test]
fn idle_effects_off_goes_idle_between_tweens() {
    let opts = EngineOpts {
        idle_effects: false,
        ..EngineOpts::default()
    };
    let mut e = RenderEngine::new(100, 100, opts).unwrap();
    place(&mut e, "a", 0.0, 0.0, 10.0);
    assert_eq!(e.loop_state(), LoopState::Idle);
}

#[test]
fn clock_never_runs_backwards() {
    let mut e = engine();
    e.tick(500.0);
    e.tick(100.0);
    e.tick(f64::NAN);
    assert_eq!(e.now_ms(), 500.0);
}

#[test]
fn render_produces_a_canvas_sized_frame() {
    let mut e = RenderEngine::new(64, 48, EngineOpts::default()).unwrap();
    place(&mut e, "a", 32.0, 24.0, 10.0);
    let out = e.render().unwrap();
    assert_eq!((out.frame.width, out.frame.height), (64, 48));
    assert_eq!(out.frame.data.len(), 64 * 48 * 4);
    let bg = EngineOpts::default().clear_color;
    assert_eq!(out.frame.pixel(0, 0), Some([bg.r, bg.g, bg.b, 255]));
    assert_ne!(out.frame.pixel(32, 24), Some([bg.r, bg.g, bg.b, 255]));
}
