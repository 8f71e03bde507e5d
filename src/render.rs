//! Stateful rendering: node registry, tweens, camera, hit testing and the preview sandbox.

/// Backend trait and frame output.
pub mod backend;
/// Per-node overlay buttons.
pub mod buttons;
/// Pan/zoom camera and drag tracking.
pub mod camera;
/// CPU raster backend.
pub mod cpu;
/// Backend-agnostic draw commands.
pub mod draw;
/// The stateful render engine.
pub mod engine;
/// Live node and edge registry types.
pub mod node;
/// Preview sandbox.
pub mod preview;

pub use backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use buttons::{ButtonRegistry, ButtonSet, NodeButton};
pub use camera::{Camera, DragTracker};
pub use cpu::CpuBackend;
pub use draw::{Dash, DrawCmd, DrawList, Overlay};
pub use engine::{EngineCallbacks, EngineEvent, Hit, RenderEngine, RenderedFrame};
pub use node::{EdgeVisual, NodePatch, NodeVisual};
pub use preview::PreviewSandbox;
