use super::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::EngineOpts;

fn engine() -> RenderEngine {
    let mut e = RenderEngine::new(800, 600, EngineOpts::default()).unwrap();
    e.set_node("focus", &NodePatch::default().at(400.0, 300.0).radius(50.0));
    e.set_node("other", &NodePatch::default().at(100.0, 100.0).radius(20.0));
    e
}

#[test]
fn enter_on_missing_node_is_none() {
    let e = engine();
    assert!(DomainZoom::enter(&e, "ghost", 500.0).is_none());
}

#[test]
fn enter_grows_past_diagonal_and_removes_others() {
    let mut e = engine();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut z = DomainZoom::enter(&e, "focus", 1000.0)
        .unwrap()
        .with_progress(move |t| sink.borrow_mut().push(t));

    assert!(!z.step(&mut e, 0.0));
    assert!(!z.step(&mut e, 500.0));
    let mid = e.node("other").unwrap();
    assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
    assert!(z.step(&mut e, 1000.0));

    let focus = e.node("focus").unwrap();
    assert!(focus.effective_radius() > e.canvas().diagonal());
    assert!(e.node("other").is_none());
    assert_eq!(*seen.borrow(), vec![0.0, 0.5, 1.0]);
    assert!(z.is_done());
    assert!(z.step(&mut e, 2000.0));
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn exit_shrinks_copy_and_fades_others_back() {
    let mut e = engine();
    let mut copy = NodeVisual::new("domain-x");
    copy.x = 400.0;
    copy.y = 300.0;
    copy.radius = 40.0;
    let mut z = DomainZoom::exit(&mut e, &copy, 400.0);
    assert_eq!(z.direction(), ZoomDirection::Exit);

    let big = e.node("domain-x").unwrap();
    assert!(big.effective_radius() > e.canvas().diagonal());
    assert_eq!(e.node("other").unwrap().opacity, 0.0);

    z.step(&mut e, 10.0);
    assert!(z.step(&mut e, 410.0));
    let done = e.node("domain-x").unwrap();
    assert!((done.scale - 1.0).abs() < 1e-9);
    let other = e.node("other").unwrap();
    assert!((other.opacity - 1.0).abs() < 1e-9);
    assert!((other.scale - 1.0).abs() < 1e-9);
    assert!(e.node("focus").is_some());
}

#[test]
fn zero_duration_finishes_on_first_step() {
    let mut e = engine();
    let mut z = DomainZoom::enter(&e, "focus", 0.0).unwrap();
    assert!(z.step(&mut e, 5.0));
    assert_eq!(z.progress(), 1.0);
}

#[test]
fn finish_jumps_to_final_frame() {
    let mut e = engine();
    let mut z = DomainZoom::enter(&e, "focus", 1000.0).unwrap();
    z.step(&mut e, 100.0);
    z.finish(&mut e);
    assert!(z.is_done());
    assert_eq!(z.progress(), 1.0);
    assert!(e.node("other").is_none());

    let mut fresh = DomainZoom::enter(&e, "focus", 1000.0).unwrap();
    fresh.finish(&mut e);
    assert!(fresh.is_done());
}
