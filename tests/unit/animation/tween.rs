use super::*;
use crate::animation::handle::TweenHandle;

fn snap(x: f64) -> NodeSnapshot {
    NodeSnapshot {
        x,
        y: 0.0,
        radius: 50.0,
        scale: 1.0,
        opacity: 1.0,
        rotation: 0.0,
    }
}

fn tween(target: NumericTarget, start_ms: f64, duration_ms: f64) -> Tween {
    let (_handle, completion) = TweenHandle::pair();
    Tween {
        node_id: "n".to_owned(),
        target,
        start_ms,
        duration_ms,
        ease: Ease::Linear,
        endpoints: None,
        completion,
    }
}

#[test]
fn unset_fields_hold_start_values() {
    let t = NumericTarget {
        x: Some(10.0),
        opacity: Some(0.0),
        ..NumericTarget::default()
    };
    let end = t.resolve(&snap(0.0));
    assert_eq!(end.x, 10.0);
    assert_eq!(end.opacity, 0.0);
    assert_eq!(end.radius, 50.0);
    assert!(NumericTarget::default().is_empty());
    assert!(!t.is_empty());
}

#[test]
fn lerp_interpolates_every_field() {
    let a = snap(0.0);
    let b = NodeSnapshot {
        x: 100.0,
        y: 50.0,
        radius: 10.0,
        scale: 3.0,
        opacity: 0.0,
        rotation: 1.0,
    };
    let m = NodeSnapshot::lerp(&a, &b, 0.5);
    assert_eq!(m.x, 50.0);
    assert_eq!(m.y, 25.0);
    assert_eq!(m.radius, 30.0);
    assert_eq!(m.scale, 2.0);
    assert_eq!(m.opacity, 0.5);
    assert_eq!(m.rotation, 0.5);
}

#[test]
fn delayed_tween_captures_start_on_activation() {
    let target = NumericTarget {
        x: Some(100.0),
        ..NumericTarget::default()
    };
    let mut t = tween(target, 500.0, 100.0);
    assert_eq!(t.sample(100.0, snap(0.0)), TweenSample::Pending);
    assert!(t.endpoints.is_none());

    // Node moved to 40 while the tween was waiting.
    match t.sample(550.0, snap(40.0)) {
        TweenSample::Value(s, done) => {
            assert!(!done);
            assert!((s.x - 70.0).abs() < 1e-9);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(t.sample(600.0, snap(0.0)), TweenSample::Value(NodeSnapshot { x: 100.0, ..snap(40.0) }, true));
}

#[test]
fn zero_duration_finishes_on_first_sample() {
    let target = NumericTarget {
        scale: Some(2.0),
        ..NumericTarget::default()
    };
    let mut t = tween(target, 0.0, 0.0);
    match t.sample(0.0, snap(0.0)) {
        TweenSample::Value(s, done) => {
            assert!(done);
            assert_eq!(s.scale, 2.0);
        }
        other => panic!("unexpected {other:?}"),
    }
}
