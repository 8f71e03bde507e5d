//! Tweens, easing and the frame-loop controller.

/// Easing curves.
pub mod ease;
/// Idle/animating/steady loop controller.
pub mod frame_loop;
/// Awaitable tween completion handles.
pub mod handle;
/// Per-node tween scheduler.
pub mod scheduler;
/// Interpolation primitives.
pub mod tween;

pub use ease::Ease;
pub use frame_loop::{FrameLoop, LoopState};
pub use handle::{TweenBatch, TweenHandle, TweenOutcome};
pub use scheduler::{TweenScheduler, TweenSpec};
pub use tween::{Animatable, Lerp, NodeSnapshot, NumericTarget};
