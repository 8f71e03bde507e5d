use super::*;

#[test]
fn starts_idle() {
    let l = FrameLoop::new();
    assert_eq!(l.state(), LoopState::Idle);
    assert!(!l.wants_frame());
}

#[test]
fn tween_then_steady_then_idle() {
    let mut l = FrameLoop::new();
    assert_eq!(l.update(true, true, true), LoopState::Animating);
    assert!(l.wants_frame());
    assert_eq!(l.update(false, true, true), LoopState::Steady);
    assert!(l.wants_frame());
    assert_eq!(l.update(false, false, true), LoopState::Idle);
    assert_eq!(l.transitions(), 3);
}

#[test]
fn idle_effects_disabled_never_steady() {
    let mut l = FrameLoop::new();
    assert_eq!(l.update(false, true, false), LoopState::Idle);
    assert_eq!(l.update(true, true, false), LoopState::Animating);
    assert_eq!(l.update(false, true, false), LoopState::Idle);
}

#[test]
fn repeated_update_does_not_count() {
    let mut l = FrameLoop::new();
    l.update(true, true, true);
    l.update(true, true, true);
    assert_eq!(l.transitions(), 1);
}
