use super::*;
use std::f64::consts::PI;

#[test]
fn rng_is_deterministic_per_seed() {
    let mut a = Rng64::new(7);
    let mut b = Rng64::new(7);
    for _ in 0..16 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
    let mut c = Rng64::new(8);
    assert_ne!(Rng64::new(7).next_u64(), c.next_u64());
}

#[test]
fn rng_ranges_hold() {
    let mut r = Rng64::new(42);
    for _ in 0..1000 {
        let u = r.next_f64_01();
        assert!((0.0..1.0).contains(&u));
        let j = r.jitter(10.0);
        assert!((-10.0..10.0).contains(&j));
        let a = r.angle();
        assert!((0.0..TAU).contains(&a));
    }
}

#[test]
fn angle_distance_wraps() {
    assert!((angle_distance(0.1, TAU - 0.1) - 0.2).abs() < 1e-12);
    assert!((angle_distance(0.0, PI) - PI).abs() < 1e-12);
    assert_eq!(angle_distance(1.0, 1.0), 0.0);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp_f64(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp_f64(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp_f64(2.0, 6.0, 0.5), 4.0);
}

#[test]
fn segment_distance_clamps_to_endpoints() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    assert_eq!(segment_distance(Point::new(5.0, 3.0), a, b), 3.0);
    assert_eq!(segment_distance(Point::new(-4.0, 3.0), a, b), 5.0);
    assert_eq!(segment_distance(Point::new(13.0, 4.0), a, b), 5.0);
    assert_eq!(segment_distance(Point::new(3.0, 4.0), a, a), 5.0);
}
