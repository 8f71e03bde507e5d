use std::collections::VecDeque;

use crate::animation::frame_loop::LoopState;
use crate::animation::handle::TweenBatch;
use crate::config::{ChoreographyOpts, NodeweaveConfig};
use crate::foundation::error::NodeweaveResult;
use crate::foundation::math::Rng64;
use crate::layout::{Entity, LayoutEngine, LayoutResult, NodeDescriptor, compute_insert_preview};
use crate::render::engine::{EngineCallbacks, RenderEngine};
use crate::render::node::{EdgeVisual, NodePatch, NodeVisual};
use crate::scene::buttons::{ContextFlags, buttons_for, edge_angles};
use crate::scene::choreography::{Choreography, Phase, PlanInput, build_phases, snap_phase};
use crate::scene::domain_zoom::{DomainZoom, ZoomDirection};
use crate::scene::{SceneData, SceneId};

const DEFAULT_SEED: u64 = 0x6e6f_6465_7765_6176;

type SceneChangeFn = Box<dyn FnMut(SceneId, Option<&Entity>)>;

struct ActivePhase {
    phase: Phase,
    batch: TweenBatch,
}

struct Transition {
    to: SceneId,
    focus: Option<Entity>,
    layout: LayoutResult,
    choreography: Choreography,
    phases: VecDeque<Phase>,
    active: Option<ActivePhase>,
    notify: bool,
}

/// Scene state machine.
///
/// Owns the [`RenderEngine`] and a [`LayoutEngine`], picks a [`Choreography`] for every scene
/// request and runs its phases on the engine's frame clock. Drive it with
/// [`SceneOrchestrator::tick`]; pointer input goes through [`SceneOrchestrator::engine_mut`].
pub struct SceneOrchestrator {
    engine: RenderEngine,
    layout: LayoutEngine,
    opts: ChoreographyOpts,
    current: SceneId,
    focus: Option<Entity>,
    current_data: Option<SceneData>,
    applied: LayoutResult,
    running: Option<Transition>,
    domain: Option<DomainZoom>,
    flags: ContextFlags,
    rng: Rng64,
    on_scene_change: Option<SceneChangeFn>,
    completed: u64,
}

impl std::fmt::Debug for SceneOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneOrchestrator")
            .field("current", &self.current)
            .field("applied_nodes", &self.applied.nodes.len())
            .field("transitioning", &self.running.is_some())
            .field("domain", &self.domain)
            .field("completed", &self.completed)
            .field("engine", &self.engine)
            .finish()
    }
}

impl SceneOrchestrator {
    /// Create an orchestrator for a `width` x `height` surface.
    pub fn new(width: u32, height: u32, config: NodeweaveConfig) -> NodeweaveResult<Self> {
        config.validate()?;
        let engine = RenderEngine::new(width, height, config.engine)?;
        let layout = LayoutEngine::new(engine.canvas(), config.layout);
        Ok(Self {
            engine,
            layout,
            opts: config.choreography,
            current: SceneId::None,
            focus: None,
            current_data: None,
            applied: LayoutResult::default(),
            running: None,
            domain: None,
            flags: ContextFlags::default(),
            rng: Rng64::new(DEFAULT_SEED),
            on_scene_change: None,
            completed: 0,
        })
    }

    /// Reseed the generator used for enter jitter and scatter angles.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng64::new(seed);
        self
    }

    /// Render engine.
    pub fn engine(&self) -> &RenderEngine {
        &self.engine
    }

    /// Render engine, for pointer input and drawing.
    pub fn engine_mut(&mut self) -> &mut RenderEngine {
        &mut self.engine
    }

    /// Install the engine's pointer callbacks.
    pub fn set_engine_callbacks(&mut self, callbacks: EngineCallbacks) {
        self.engine.set_callbacks(callbacks);
    }

    /// Layout engine.
    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    /// Last completed scene.
    pub fn current_scene(&self) -> SceneId {
        self.current
    }

    /// Focus entity of the last completed scene.
    pub fn focus(&self) -> Option<&Entity> {
        self.focus.as_ref()
    }

    /// Layout of the last completed scene.
    pub fn applied_layout(&self) -> &LayoutResult {
        &self.applied
    }

    /// Return `true` while a choreography is running.
    pub fn is_transitioning(&self) -> bool {
        self.running.is_some()
    }

    /// Choreography and phase name of the running transition.
    pub fn active_phase(&self) -> Option<(Choreography, &'static str)> {
        let tr = self.running.as_ref()?;
        Some((tr.choreography, tr.active.as_ref()?.phase.name))
    }

    /// Number of transitions completed so far.
    pub fn transitions_completed(&self) -> u64 {
        self.completed
    }

    /// Register the scene-change callback, fired once per completed transition.
    pub fn on_scene_change(&mut self, f: impl FnMut(SceneId, Option<&Entity>) + 'static) {
        self.on_scene_change = Some(Box::new(f));
    }

    /// Current context flags.
    pub fn context_flags(&self) -> ContextFlags {
        self.flags
    }

    /// Replace the context flags. Buttons are recomputed right away when idle.
    pub fn set_context_flags(&mut self, flags: ContextFlags) {
        self.flags = flags;
        if self.running.is_none() && self.domain.is_none() {
            self.apply_buttons();
        }
    }

    /// Return `true` when the host should schedule another frame.
    pub fn wants_frame(&self) -> bool {
        self.running.is_some() || self.domain.is_some() || self.engine.wants_frame()
    }

    // ---- scenes ---------------------------------------------------------------------------

    /// Request a scene, optionally as the result of clicking `clicked`.
    ///
    /// A running transition is aborted: its tweens are cancelled, nodes stay where they are
    /// and the new choreography starts from those values. Returns the choreography that was
    /// started. `Direct` completes before this returns.
    #[tracing::instrument(skip_all, fields(to = %data.id(), clicked = clicked.unwrap_or("")))]
    pub fn request_scene(&mut self, data: SceneData, clicked: Option<&str>) -> Choreography {
        self.interrupt();

        let to = data.id();
        let new = data.layout_with(&self.layout);
        let old = visual_layout(&self.engine);
        let mut kind = Choreography::select(self.current, to, clicked.is_some());
        let input = PlanInput {
            old: &old,
            new: &new,
            clicked,
            opts: &self.opts,
            jitter: self.layout.opts().enter_jitter,
        };
        let phases = match build_phases(kind, input, &mut self.rng) {
            Some(p) => p,
            None => {
                tracing::warn!(
                    choreography = ?kind,
                    clicked = clicked.unwrap_or(""),
                    "click transition unavailable, falling back to diff"
                );
                kind = Choreography::SoftDiff;
                build_phases(kind, input, &mut self.rng).unwrap_or_default()
            }
        };
        tracing::info!(from = %self.current, to = %to, choreography = ?kind, "scene transition started");

        self.engine.clear_buttons();
        self.running = Some(Transition {
            to,
            focus: data.focus().cloned(),
            layout: new,
            choreography: kind,
            phases: phases.into(),
            active: None,
            notify: true,
        });
        self.current_data = Some(data);
        self.pump();
        kind
    }

    /// Advance the clock, the running choreography and any domain zoom.
    pub fn tick(&mut self, now_ms: f64) -> LoopState {
        self.engine.tick(now_ms);
        let now = self.engine.now_ms();
        if let Some(z) = self.domain.as_mut()
            && z.step(&mut self.engine, now)
        {
            self.finish_domain();
        }
        self.pump();
        self.engine.loop_state()
    }

    /// Resize the surface and snap the current scene to a layout for the new size.
    ///
    /// A running transition is fast-forwarded to its target first. The relayout does not fire
    /// the scene-change callback.
    pub fn resize(&mut self, width: u32, height: u32) -> NodeweaveResult<()> {
        self.engine.resize(width, height)?;
        self.fast_forward();
        self.layout.set_canvas(self.engine.canvas());
        let Some(data) = self.current_data.as_ref() else {
            return Ok(());
        };
        let new = data.layout_with(&self.layout);
        let old = visual_layout(&self.engine);
        self.running = Some(Transition {
            to: self.current,
            focus: self.focus.clone(),
            phases: VecDeque::from([snap_phase(&old, &new)]),
            layout: new,
            choreography: Choreography::Direct,
            active: None,
            notify: false,
        });
        self.pump();
        Ok(())
    }

    /// Cancel a running transition or domain zoom and leave the preview, if any.
    fn interrupt(&mut self) {
        if self.engine.exit_preview_mode() {
            tracing::debug!("preview exited by scene request");
        }
        if let Some(z) = self.domain.take() {
            tracing::info!(node = z.node_id(), "domain zoom aborted");
        }
        if let Some(tr) = self.running.take() {
            let cancelled = self.engine.cancel_tweens();
            tracing::info!(
                to = %tr.to,
                phase = tr.active.as_ref().map(|a| a.phase.name).unwrap_or(""),
                cancelled,
                "scene transition aborted"
            );
        }
    }

    /// Jump a running transition straight to its target layout.
    fn fast_forward(&mut self) {
        let Some(mut tr) = self.running.take() else {
            return;
        };
        self.engine.cancel_tweens();
        let old = visual_layout(&self.engine);
        tr.active = None;
        tr.phases = VecDeque::from([snap_phase(&old, &tr.layout)]);
        self.running = Some(tr);
        self.pump();
    }

    /// Run phases until one is waiting on tweens or the transition completes.
    fn pump(&mut self) {
        while let Some(tr) = self.running.as_mut() {
            if tr.active.as_ref().is_some_and(|a| !a.batch.is_settled()) {
                return;
            }
            if let Some(done) = tr.active.take() {
                finish_phase(&mut self.engine, &done.phase);
            }
            if let Some(phase) = tr.phases.pop_front() {
                tracing::debug!(
                    choreography = ?tr.choreography,
                    phase = phase.name,
                    tweens = phase.tweens.len(),
                    "phase started"
                );
                let batch = start_phase(&mut self.engine, &phase);
                tr.active = Some(ActivePhase { phase, batch });
                continue;
            }
            if let Some(done) = self.running.take() {
                self.complete(done);
            }
        }
    }

    fn complete(&mut self, tr: Transition) {
        self.engine
            .set_lines(tr.layout.edges.iter().map(EdgeVisual::from).collect());
        self.current = tr.to;
        self.focus = tr.focus;
        self.applied = tr.layout;
        self.apply_buttons();
        if !tr.notify {
            return;
        }
        self.completed += 1;
        tracing::info!(
            scene = %self.current,
            choreography = ?tr.choreography,
            nodes = self.applied.nodes.len(),
            "scene applied"
        );
        if let Some(cb) = self.on_scene_change.as_mut() {
            cb(self.current, self.focus.as_ref());
        }
    }

    fn apply_buttons(&mut self) {
        self.engine.clear_buttons();
        for n in &self.applied.nodes {
            let set = buttons_for(n, &edge_angles(&self.applied, n), &self.flags);
            self.engine.set_buttons(&n.id, set);
        }
    }

    // ---- preview --------------------------------------------------------------------------

    /// Preview inserting `node` between the laid-out nodes `a_id` and `b_id`.
    ///
    /// A running transition or domain zoom is completed first, since the preview freezes the
    /// registry. Nothing in the real registry changes; [`SceneOrchestrator::exit_preview`]
    /// restores it exactly.
    pub fn preview_insert(&mut self, node: &Entity, a_id: &str, b_id: &str) -> NodeweaveResult<()> {
        self.fast_forward();
        if let Some(z) = self.domain.as_mut() {
            z.finish(&mut self.engine);
            self.finish_domain();
        }
        let preview = compute_insert_preview(&self.applied, self.layout.opts(), node, a_id, b_id)?;
        self.engine.enter_preview_mode();
        self.engine.set_preview(
            preview.nodes.iter().map(NodeVisual::from).collect(),
            preview.edges.iter().map(EdgeVisual::from).collect(),
            preview.removed,
        );
        tracing::debug!(node = %node.id, a = a_id, b = b_id, "insert preview entered");
        Ok(())
    }

    /// Leave the preview. Returns `false` when none was active.
    pub fn exit_preview(&mut self) -> bool {
        self.engine.exit_preview_mode()
    }

    /// Restart the preview effects. Returns `false` when no preview is active.
    pub fn replay_preview(&mut self) -> bool {
        self.engine.replay_preview()
    }

    /// Return `true` while a preview is active.
    pub fn is_previewing(&self) -> bool {
        self.engine.is_preview_active()
    }

    // ---- knowledge domains ----------------------------------------------------------------

    /// Zoom into `node_id` until it covers the canvas. Returns `false` when the node is not live.
    ///
    /// `on_progress` receives linear progress in `[0, 1]` every tick. Once the zoom finishes
    /// the scene resets to [`SceneId::None`], so the next request is applied directly.
    pub fn enter_domain(&mut self, node_id: &str, on_progress: impl FnMut(f64) + 'static) -> bool {
        self.interrupt();
        let Some(zoom) = DomainZoom::enter(&self.engine, node_id, self.opts.domain_zoom_ms) else {
            tracing::warn!(node = node_id, "domain zoom on missing node");
            return false;
        };
        self.engine.clear_buttons();
        tracing::info!(node = node_id, "domain zoom in started");
        self.domain = Some(zoom.with_progress(on_progress));
        true
    }

    /// Zoom out of a domain, shrinking an oversized copy of `copy` back to its own size.
    pub fn exit_domain(&mut self, copy: &NodeVisual, on_progress: impl FnMut(f64) + 'static) {
        self.interrupt();
        self.engine.clear_buttons();
        let zoom = DomainZoom::exit(&mut self.engine, copy, self.opts.domain_zoom_ms);
        tracing::info!(node = %copy.id, "domain zoom out started");
        self.domain = Some(zoom.with_progress(on_progress));
    }

    /// Return `true` while a domain zoom runs.
    pub fn is_domain_zooming(&self) -> bool {
        self.domain.is_some()
    }

    fn finish_domain(&mut self) {
        let Some(z) = self.domain.take() else {
            return;
        };
        match z.direction() {
            ZoomDirection::Enter => {
                self.current = SceneId::None;
                self.focus = None;
                self.current_data = None;
                self.applied = visual_layout(&self.engine);
            }
            ZoomDirection::Exit => self.apply_buttons(),
        }
        tracing::info!(node = z.node_id(), direction = ?z.direction(), "domain zoom finished");
    }
}

/// Current registry as a layout snapshot, so every choreography starts from what is on screen.
fn visual_layout(engine: &RenderEngine) -> LayoutResult {
    LayoutResult {
        nodes: engine.nodes().map(NodeDescriptor::from).collect(),
        edges: Vec::new(),
    }
}

fn start_phase(engine: &mut RenderEngine, phase: &Phase) -> TweenBatch {
    for d in &phase.spawn {
        engine.set_node(&d.id, &NodePatch::from_descriptor(d));
    }
    if let Some(edges) = &phase.edges_at_start {
        engine.set_lines(edges.iter().map(EdgeVisual::from).collect());
    }
    phase
        .tweens
        .iter()
        .map(|t| engine.animate_node(&t.id, &t.target, phase.duration_ms, t.ease, t.delay_ms))
        .collect()
}

fn finish_phase(engine: &mut RenderEngine, phase: &Phase) {
    for id in &phase.remove_at_end {
        engine.remove_node(id);
    }
    for (old, new) in &phase.rekey_at_end {
        if !engine.rekey_node(old, new) {
            tracing::warn!(old = %old, new = %new, "re-key target missing");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/orchestrator.rs"]
mod tests;
