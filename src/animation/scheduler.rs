use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::handle::{TweenHandle, TweenOutcome};
use crate::animation::tween::{Animatable, NumericTarget, Tween, TweenSample};

/// Per-node tween table driven by one shared clock.
///
/// At most one tween is active per node id. Scheduling onto an animating node replaces the
/// running tween in place: the new tween starts from the node's current interpolated values
/// and the replaced handle resolves [`TweenOutcome::Superseded`].
#[derive(Debug, Default)]
pub struct TweenScheduler {
    tweens: BTreeMap<String, Tween>,
}

/// One tween request.
#[derive(Clone, Copy, Debug)]
pub struct TweenSpec {
    /// Numeric targets.
    pub target: NumericTarget,
    /// Absolute clock time the tween becomes active.
    pub start_ms: f64,
    /// Duration after `start_ms`.
    pub duration_ms: f64,
    /// Easing curve.
    pub ease: Ease,
}

impl TweenScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scheduled tweens, pending ones included.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Return `true` when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Return `true` when `node_id` has a scheduled tween.
    pub fn is_animating(&self, node_id: &str) -> bool {
        self.tweens.contains_key(node_id)
    }

    /// Schedule a tween on `node_id`, replacing any tween already there.
    pub fn schedule(&mut self, node_id: &str, spec: TweenSpec) -> TweenHandle {
        let (handle, completion) = TweenHandle::pair();
        let duration_ms = if spec.duration_ms.is_finite() {
            spec.duration_ms.max(0.0)
        } else {
            0.0
        };
        let tween = Tween {
            node_id: node_id.to_owned(),
            target: spec.target,
            start_ms: spec.start_ms,
            duration_ms,
            ease: spec.ease,
            endpoints: None,
            completion,
        };
        if let Some(prev) = self.tweens.insert(node_id.to_owned(), tween) {
            tracing::trace!(node = %prev.node_id, "tween superseded");
            prev.completion.resolve(TweenOutcome::Superseded);
        }
        handle
    }

    /// Sample every active tween at `now_ms` and write the values into `nodes`.
    ///
    /// Finished tweens are removed and resolve [`TweenOutcome::Completed`]. Tweens whose node
    /// disappeared resolve [`TweenOutcome::Cancelled`]. Returns the number of tweens that
    /// settled during this call.
    pub fn advance<N: Animatable>(&mut self, now_ms: f64, nodes: &mut BTreeMap<String, N>) -> usize {
        let mut settled = Vec::new();
        for (id, tween) in self.tweens.iter_mut() {
            let Some(node) = nodes.get_mut(id) else {
                settled.push((id.clone(), TweenOutcome::Cancelled));
                continue;
            };
            match tween.sample(now_ms, node.snapshot()) {
                TweenSample::Pending => {}
                TweenSample::Value(s, done) => {
                    node.apply_snapshot(&s);
                    if done {
                        settled.push((id.clone(), TweenOutcome::Completed));
                    }
                }
            }
        }
        let n = settled.len();
        for (id, outcome) in settled {
            if let Some(t) = self.tweens.remove(&id) {
                t.completion.resolve(outcome);
            }
        }
        n
    }

    /// Drop the tween on `node_id`, resolving it [`TweenOutcome::Cancelled`].
    pub fn cancel(&mut self, node_id: &str) -> bool {
        match self.tweens.remove(node_id) {
            Some(t) => {
                t.completion.resolve(TweenOutcome::Cancelled);
                true
            }
            None => false,
        }
    }

    /// Drop every tween, resolving each [`TweenOutcome::Cancelled`].
    pub fn cancel_all(&mut self) -> usize {
        let tweens = std::mem::take(&mut self.tweens);
        let n = tweens.len();
        for t in tweens.into_values() {
            t.completion.resolve(TweenOutcome::Cancelled);
        }
        if n > 0 {
            tracing::debug!(count = n, "cancelled in-flight tweens");
        }
        n
    }

    /// Move a scheduled tween to a new node id, keeping its handle.
    pub fn rekey(&mut self, old_id: &str, new_id: &str) {
        if let Some(mut t) = self.tweens.remove(old_id) {
            t.node_id = new_id.to_owned();
            if let Some(prev) = self.tweens.insert(new_id.to_owned(), t) {
                prev.completion.resolve(TweenOutcome::Superseded);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
