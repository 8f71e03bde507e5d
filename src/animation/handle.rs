use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// How a tween future resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenOutcome {
    /// Reached its target.
    Completed,
    /// Replaced by a newer tween on the same node before finishing.
    Superseded,
    /// Dropped by a clear, a node removal or a resize.
    Cancelled,
    /// The node did not exist when the tween was requested.
    Skipped,
}

#[derive(Debug, Default)]
struct Slot {
    outcome: Option<TweenOutcome>,
    waker: Option<Waker>,
}

/// Future that resolves when a tween settles.
///
/// Cheap to clone; every clone observes the same outcome. Resolution happens on the engine's
/// frame tick, so polling without ticking never makes progress.
#[derive(Clone, Debug)]
pub struct TweenHandle {
    slot: Rc<RefCell<Slot>>,
}

/// Engine-side resolver paired with a [`TweenHandle`].
#[derive(Debug)]
pub(crate) struct Completion {
    slot: Rc<RefCell<Slot>>,
}

impl TweenHandle {
    pub(crate) fn pair() -> (Self, Completion) {
        let slot = Rc::new(RefCell::new(Slot::default()));
        (
            Self { slot: slot.clone() },
            Completion { slot },
        )
    }

    /// A handle that is already settled.
    pub fn resolved(outcome: TweenOutcome) -> Self {
        let (handle, completion) = Self::pair();
        completion.resolve(outcome);
        handle
    }

    /// Outcome, once settled.
    pub fn outcome(&self) -> Option<TweenOutcome> {
        self.slot.borrow().outcome
    }

    /// Return `true` once the tween has settled in any way.
    pub fn is_settled(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Completion {
    /// Settle the paired handle. The first outcome wins.
    pub(crate) fn resolve(self, outcome: TweenOutcome) {
        let waker = {
            let mut slot = self.slot.borrow_mut();
            if slot.outcome.is_some() {
                return;
            }
            slot.outcome = Some(outcome);
            slot.waker.take()
        };
        if let Some(w) = waker {
            w.wake();
        }
    }
}

impl Future for TweenHandle {
    type Output = TweenOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.borrow_mut();
        match slot.outcome {
            Some(o) => Poll::Ready(o),
            None => {
                slot.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

/// Wait-all group of tween handles.
///
/// Staggered phases are independently delayed tweens gathered here and awaited together.
#[derive(Clone, Debug, Default)]
pub struct TweenBatch {
    handles: Vec<TweenHandle>,
}

impl TweenBatch {
    /// Empty batch; already settled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handle.
    pub fn push(&mut self, handle: TweenHandle) {
        self.handles.push(handle);
    }

    /// Number of handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Return `true` when the batch holds no handles.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Return `true` once every handle has settled.
    pub fn is_settled(&self) -> bool {
        self.handles.iter().all(TweenHandle::is_settled)
    }

    /// Outcomes in push order; `None` for handles still running.
    pub fn outcomes(&self) -> Vec<Option<TweenOutcome>> {
        self.handles.iter().map(TweenHandle::outcome).collect()
    }
}

impl Extend<TweenHandle> for TweenBatch {
    fn extend<I: IntoIterator<Item = TweenHandle>>(&mut self, iter: I) {
        self.handles.extend(iter);
    }
}

impl FromIterator<TweenHandle> for TweenBatch {
    fn from_iter<I: IntoIterator<Item = TweenHandle>>(iter: I) -> Self {
        Self {
            handles: iter.into_iter().collect(),
        }
    }
}

impl Future for TweenBatch {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut pending = false;
        for h in self.handles.iter_mut() {
            if Pin::new(h).poll(cx).is_pending() {
                pending = true;
            }
        }
        if pending { Poll::Pending } else { Poll::Ready(()) }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/handle.rs"]
mod tests;
