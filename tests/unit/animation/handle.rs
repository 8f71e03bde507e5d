use super::*;

fn poll_once<F: Future + Unpin>(f: &mut F) -> Poll<F::Output> {
    let mut cx = Context::from_waker(Waker::noop());
    Pin::new(f).poll(&mut cx)
}

#[test]
fn pending_until_resolved() {
    let (mut handle, completion) = TweenHandle::pair();
    assert!(poll_once(&mut handle).is_pending());
    assert!(!handle.is_settled());
    completion.resolve(TweenOutcome::Completed);
    assert_eq!(poll_once(&mut handle), Poll::Ready(TweenOutcome::Completed));
}

#[test]
fn clones_share_outcome() {
    let (handle, completion) = TweenHandle::pair();
    let other = handle.clone();
    completion.resolve(TweenOutcome::Superseded);
    assert_eq!(handle.outcome(), Some(TweenOutcome::Superseded));
    assert_eq!(other.outcome(), Some(TweenOutcome::Superseded));
}

#[test]
fn resolved_handle_is_ready() {
    let mut h = TweenHandle::resolved(TweenOutcome::Skipped);
    assert_eq!(poll_once(&mut h), Poll::Ready(TweenOutcome::Skipped));
}

#[test]
fn batch_waits_for_all() {
    let (a, ca) = TweenHandle::pair();
    let (b, cb) = TweenHandle::pair();
    let mut batch: TweenBatch = [a, b].into_iter().collect();
    assert_eq!(batch.len(), 2);
    ca.resolve(TweenOutcome::Completed);
    assert!(poll_once(&mut batch).is_pending());
    assert_eq!(batch.outcomes(), vec![Some(TweenOutcome::Completed), None]);
    cb.resolve(TweenOutcome::Cancelled);
    assert!(batch.is_settled());
    assert_eq!(poll_once(&mut batch), Poll::Ready(()));
}

#[test]
fn empty_batch_is_settled() {
    let mut batch = TweenBatch::new();
    assert!(batch.is_empty());
    assert!(batch.is_settled());
    assert_eq!(poll_once(&mut batch), Poll::Ready(()));
}
