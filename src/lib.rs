//! Nodeweave renders an interactive graph of domain entities as animated circular nodes and
//! choreographs the transitions between its view modes.
//!
//! The crate is split the way data flows through it:
//!
//! - [`layout`] maps entity lists to node and edge descriptors and diffs two layouts
//! - [`RenderEngine`] owns the live registries, tweens, camera, hit testing and preview sandbox
//! - [`SceneOrchestrator`] picks and runs the multi-phase choreography for each scene request
//!
//! Everything runs on the host's frame clock: call [`SceneOrchestrator::tick`] once per frame
//! and render with [`RenderEngine::render`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Tweens, easing and the frame loop.
pub mod animation;
/// Engine configuration.
pub mod config;
/// Pure layout computation.
pub mod layout;
/// Stateful rendering and input handling.
pub mod render;
/// Scene orchestration.
pub mod scene;
/// Colors and node styles.
pub mod style;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{NodeweaveError, NodeweaveResult};
pub use crate::foundation::math::Rng64;

pub use crate::animation::{Ease, TweenBatch, TweenHandle, TweenOutcome};
pub use crate::config::NodeweaveConfig;
pub use crate::layout::{Entity, LayoutEngine, LayoutResult};
pub use crate::render::{FrameRGBA, NodePatch, NodeVisual, RenderEngine, RenderedFrame};
pub use crate::scene::{Choreography, ContextFlags, SceneData, SceneId, SceneOrchestrator};
