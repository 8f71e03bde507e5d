use crate::animation::ease::Ease;
use crate::animation::handle::Completion;
use crate::foundation::math::lerp_f64;

/// Interpolation contract for tweened value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp_f64(*a, *b, t)
    }
}

/// The numeric fields a tween interpolates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeSnapshot {
    /// World x.
    pub x: f64,
    /// World y.
    pub y: f64,
    /// Base radius.
    pub radius: f64,
    /// Scale factor.
    pub scale: f64,
    /// Opacity.
    pub opacity: f64,
    /// Rotation in radians.
    pub rotation: f64,
}

impl Lerp for NodeSnapshot {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            x: f64::lerp(&a.x, &b.x, t),
            y: f64::lerp(&a.y, &b.y, t),
            radius: f64::lerp(&a.radius, &b.radius, t),
            scale: f64::lerp(&a.scale, &b.scale, t),
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            rotation: f64::lerp(&a.rotation, &b.rotation, t),
        }
    }
}

/// Optional numeric targets. Unset fields hold their value at tween start.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NumericTarget {
    /// Target x.
    pub x: Option<f64>,
    /// Target y.
    pub y: Option<f64>,
    /// Target radius.
    pub radius: Option<f64>,
    /// Target scale.
    pub scale: Option<f64>,
    /// Target opacity.
    pub opacity: Option<f64>,
    /// Target rotation.
    pub rotation: Option<f64>,
}

impl NumericTarget {
    /// Resolve against the values captured at tween start.
    pub fn resolve(&self, start: &NodeSnapshot) -> NodeSnapshot {
        NodeSnapshot {
            x: self.x.unwrap_or(start.x),
            y: self.y.unwrap_or(start.y),
            radius: self.radius.unwrap_or(start.radius),
            scale: self.scale.unwrap_or(start.scale),
            opacity: self.opacity.unwrap_or(start.opacity),
            rotation: self.rotation.unwrap_or(start.rotation),
        }
    }

    /// Return `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Something a tween can read from and write to.
pub trait Animatable {
    /// Current numeric state.
    fn snapshot(&self) -> NodeSnapshot;
    /// Overwrite the numeric state.
    fn apply_snapshot(&mut self, s: &NodeSnapshot);
}

impl Animatable for NodeSnapshot {
    fn snapshot(&self) -> NodeSnapshot {
        *self
    }

    fn apply_snapshot(&mut self, s: &NodeSnapshot) {
        *self = *s;
    }
}

/// One timed interpolation, owned by the scheduler.
#[derive(Debug)]
pub(crate) struct Tween {
    pub(crate) node_id: String,
    pub(crate) target: NumericTarget,
    pub(crate) start_ms: f64,
    pub(crate) duration_ms: f64,
    pub(crate) ease: Ease,
    /// Captured when the tween first becomes active, so a delayed tween starts from wherever
    /// its node is at that moment.
    pub(crate) endpoints: Option<(NodeSnapshot, NodeSnapshot)>,
    pub(crate) completion: Completion,
}

/// Result of sampling a tween at one clock time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum TweenSample {
    /// Start time not reached yet.
    Pending,
    /// Interpolated value; `true` when the tween is finished.
    Value(NodeSnapshot, bool),
}

impl Tween {
    pub(crate) fn sample(&mut self, now_ms: f64, current: NodeSnapshot) -> TweenSample {
        if now_ms < self.start_ms {
            return TweenSample::Pending;
        }
        let (start, end) = *self
            .endpoints
            .get_or_insert_with(|| (current, self.target.resolve(&current)));
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (now_ms - self.start_ms) / self.duration_ms
        };
        if progress >= 1.0 {
            return TweenSample::Value(end, true);
        }
        let eased = self.ease.apply(progress);
        TweenSample::Value(NodeSnapshot::lerp(&start, &end, eased), false)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
