use super::*;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::config::LayoutOpts;
use crate::foundation::core::Canvas;
use crate::layout::{Entity, LayoutEngine};

fn detail() -> LayoutResult {
    LayoutEngine::new(Canvas::new(800, 600).unwrap(), LayoutOpts::default()).detail(
        &Entity::new("a", "A"),
        &[],
        &[Entity::new("b", "B")],
    )
}

fn all_flags() -> ContextFlags {
    ContextFlags {
        can_edit: true,
        can_move: true,
        can_add_child: true,
        can_delete: true,
        can_preview: true,
    }
}

fn ids(set: &ButtonSet) -> Vec<&str> {
    set.iter().map(|b| b.id.as_str()).collect()
}

#[test]
fn no_flags_means_no_center_buttons() {
    let l = detail();
    let center = l.center().unwrap();
    assert!(buttons_for(center, &[], &ContextFlags::default()).is_empty());
}

#[test]
fn move_button_only_when_allowed() {
    let l = detail();
    let center = l.center().unwrap();
    let with = buttons_for(center, &[], &all_flags());
    assert!(ids(&with).contains(&"move"));
    let without = buttons_for(
        center,
        &[],
        &ContextFlags {
            can_move: false,
            ..all_flags()
        },
    );
    assert!(!ids(&without).contains(&"move"));
}

#[test]
fn rule_order_and_roles() {
    let l = detail();
    let center = l.center().unwrap();
    assert_eq!(
        ids(&buttons_for(center, &[], &all_flags())),
        vec!["edit", "add-child", "move", "delete"]
    );
    let child = l.node("child-b").unwrap();
    assert_eq!(ids(&buttons_for(child, &[], &all_flags())), vec!["preview-insert"]);
}

#[test]
fn add_child_greys_out_without_permission() {
    let l = detail();
    let center = l.center().unwrap();
    let set = buttons_for(
        center,
        &[],
        &ContextFlags {
            can_edit: true,
            ..ContextFlags::default()
        },
    );
    let add = set.iter().find(|b| b.id == "add-child").unwrap();
    assert!(add.disabled);
    let edit = set.iter().find(|b| b.id == "edit").unwrap();
    assert!(!edit.disabled);
}

#[test]
fn edge_angles_point_at_neighbours() {
    let l = detail();
    let center = l.center().unwrap();
    let angles = edge_angles(&l, center);
    assert_eq!(angles.len(), 1);
    assert!((angles[0] - FRAC_PI_2).abs() < 1e-9);

    let child = l.node("child-b").unwrap();
    let back = edge_angles(&l, child);
    assert!((angle_distance(back[0], -FRAC_PI_2)).abs() < 1e-9);
}

#[test]
fn buttons_avoid_edges_and_each_other() {
    let l = detail();
    let center = l.center().unwrap();
    let angles = edge_angles(&l, center);
    let set = buttons_for(center, &angles, &all_flags());
    for b in &set {
        assert!(angle_distance(b.angle, angles[0]) >= PI / 4.0 - 1e-9, "{} at {}", b.id, b.angle);
    }
    for (i, a) in set.iter().enumerate() {
        for b in set.iter().skip(i + 1) {
            assert!(angle_distance(a.angle, b.angle) > 0.1);
        }
    }
    assert!(angle_distance(set[0].angle, -FRAC_PI_2) < PI / 6.0);
}

#[test]
fn unconstrained_first_button_sits_upper_right() {
    let l = detail();
    let center = l.center().unwrap();
    let set = buttons_for(center, &[], &all_flags());
    assert!((set[0].angle + std::f64::consts::FRAC_PI_4).abs() < 1e-12);
}
