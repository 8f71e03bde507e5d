use std::collections::BTreeMap;
use std::f64::consts::TAU;

use crate::animation::ease::Ease;
use crate::animation::frame_loop::{FrameLoop, LoopState};
use crate::animation::handle::{TweenHandle, TweenOutcome};
use crate::animation::scheduler::{TweenScheduler, TweenSpec};
use crate::config::EngineOpts;
use crate::foundation::core::{Canvas, Point, Vec2, is_finite_point};
use crate::foundation::error::NodeweaveResult;
use crate::foundation::math::segment_distance;
use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
use crate::render::buttons::{ButtonRegistry, ButtonSet, NodeButton, button_center};
use crate::render::camera::{Camera, DragTracker};
use crate::render::draw::{Dash, DrawCmd, DrawList, Overlay};
use crate::render::node::{EdgeVisual, NodePatch, NodeVisual};
use crate::render::preview::{PreviewSandbox, REMOVED_EDGE_OPACITY};
use crate::style::color::Color;
use crate::style::palette::{FillPattern, NodeType};

/// Host callbacks. Each one is optional.
#[derive(Default)]
pub struct EngineCallbacks {
    /// A node was clicked.
    pub on_node_click: Option<Box<dyn FnMut(&NodeVisual)>>,
    /// A node was double-clicked.
    pub on_node_double_click: Option<Box<dyn FnMut(&NodeVisual)>>,
    /// An enabled button was clicked; receives the owning node id.
    pub on_button_click: Option<Box<dyn FnMut(&str, &NodeButton)>>,
    /// An edge was clicked.
    pub on_line_click: Option<Box<dyn FnMut(&EdgeVisual)>>,
}

impl std::fmt::Debug for EngineCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCallbacks")
            .field("on_node_click", &self.on_node_click.is_some())
            .field("on_node_double_click", &self.on_node_double_click.is_some())
            .field("on_button_click", &self.on_button_click.is_some())
            .field("on_line_click", &self.on_line_click.is_some())
            .finish()
    }
}

/// What a screen point resolved to.
#[derive(Clone, Debug, PartialEq)]
pub enum Hit {
    /// A node button. Buttons always win over nodes.
    Button {
        /// Owning node id.
        node_id: String,
        /// The button.
        button: NodeButton,
    },
    /// A node body.
    Node(String),
}

/// Event produced by a pointer handler, mirrored to the matching callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// Node click.
    NodeClick(String),
    /// Node double-click.
    NodeDoubleClick(String),
    /// Button click.
    ButtonClick {
        /// Owning node id.
        node_id: String,
        /// Button id.
        button_id: String,
        /// Button action tag.
        action: String,
    },
    /// Edge click.
    LineClick {
        /// Edge source id.
        from: String,
        /// Edge target id.
        to: String,
    },
}

/// Output of [`RenderEngine::render`].
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    /// Rasterized primitives.
    pub frame: FrameRGBA,
    /// Host overlays positioned in screen space.
    pub overlays: Vec<Overlay>,
}

/// Stateful render and animation engine for one drawing surface.
///
/// Owns the node, edge and button registries, the tween scheduler, the camera and the
/// preview sandbox. Everything is driven by [`RenderEngine::tick`] on the host's frame clock.
pub struct RenderEngine {
    canvas: Canvas,
    opts: EngineOpts,
    nodes: BTreeMap<String, NodeVisual>,
    edges: Vec<EdgeVisual>,
    buttons: ButtonRegistry,
    tweens: TweenScheduler,
    camera: Camera,
    drag: DragTracker,
    hovered: Option<String>,
    preview: Option<PreviewSandbox>,
    frame_loop: FrameLoop,
    now_ms: f64,
    backend: Box<dyn RenderBackend>,
    callbacks: EngineCallbacks,
}

impl std::fmt::Debug for RenderEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderEngine")
            .field("canvas", &self.canvas)
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("tweens", &self.tweens.len())
            .field("camera", &self.camera)
            .field("preview", &self.preview.is_some())
            .field("now_ms", &self.now_ms)
            .finish()
    }
}

impl RenderEngine {
    /// Create an engine for a `width` x `height` surface.
    ///
    /// Fails once, up front, when the surface cannot back a drawing context or `opts` is
    /// invalid.
    pub fn new(width: u32, height: u32, opts: EngineOpts) -> NodeweaveResult<Self> {
        let canvas = Canvas::new(width, height)?;
        opts.validate()?;
        tracing::debug!(width, height, "render engine created");
        Ok(Self {
            canvas,
            opts,
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            buttons: ButtonRegistry::default(),
            tweens: TweenScheduler::new(),
            camera: Camera::default(),
            drag: DragTracker::default(),
            hovered: None,
            preview: None,
            frame_loop: FrameLoop::new(),
            now_ms: 0.0,
            backend: create_backend(BackendKind::Cpu),
            callbacks: EngineCallbacks::default(),
        })
    }

    /// Surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Engine options.
    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Current camera.
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Reset pan and zoom.
    pub fn reset_camera(&mut self) {
        self.camera = Camera::default();
    }

    /// Clock time of the last tick.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Install host callbacks.
    pub fn set_callbacks(&mut self, callbacks: EngineCallbacks) {
        self.callbacks = callbacks;
    }

    // ---- registry -------------------------------------------------------------------------

    /// Upsert a node. Unset fields keep their prior value, or the type default for a new node.
    pub fn set_node(&mut self, id: &str, patch: &NodePatch) {
        if self.frozen("set_node") {
            return;
        }
        let node = self
            .nodes
            .entry(id.to_owned())
            .or_insert_with(|| NodeVisual::new(id));
        patch.apply(node);
        self.refresh_loop();
    }

    /// Look up a node.
    pub fn node(&self, id: &str) -> Option<&NodeVisual> {
        self.nodes.get(id)
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeVisual> {
        self.nodes.values()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Remove a node, cancelling its tween. Returns `true` when it existed.
    pub fn remove_node(&mut self, id: &str) -> bool {
        if self.frozen("remove_node") {
            return false;
        }
        self.tweens.cancel(id);
        if self.hovered.as_deref() == Some(id) {
            self.hovered = None;
        }
        let removed = self.nodes.remove(id).is_some();
        self.refresh_loop();
        removed
    }

    /// Remove every node and button and cancel every tween. An active preview is discarded.
    pub fn clear_nodes(&mut self) {
        if self.preview.take().is_some() {
            tracing::debug!("preview discarded by clear");
        }
        self.tweens.cancel_all();
        self.nodes.clear();
        self.buttons.clear();
        self.hovered = None;
        self.refresh_loop();
    }

    /// Move a node to a new id. Its tween and buttons follow; a node already at `new_id` is
    /// replaced.
    pub fn rekey_node(&mut self, old_id: &str, new_id: &str) -> bool {
        if old_id == new_id || self.frozen("rekey_node") {
            return false;
        }
        let Some(mut node) = self.nodes.remove(old_id) else {
            return false;
        };
        if self.nodes.contains_key(new_id) {
            self.tweens.cancel(new_id);
        }
        node.id = new_id.to_owned();
        self.nodes.insert(new_id.to_owned(), node);
        self.tweens.rekey(old_id, new_id);
        self.buttons.rekey(old_id, new_id);
        if self.hovered.as_deref() == Some(old_id) {
            self.hovered = Some(new_id.to_owned());
        }
        true
    }

    /// Replace the edge list.
    pub fn set_lines(&mut self, edges: Vec<EdgeVisual>) {
        if self.frozen("set_lines") {
            return;
        }
        self.edges = edges;
    }

    /// Live edges.
    pub fn edges(&self) -> &[EdgeVisual] {
        &self.edges
    }

    /// Replace the buttons of `node_id`.
    pub fn set_buttons(&mut self, node_id: &str, buttons: ButtonSet) {
        self.buttons.set(node_id, buttons);
    }

    /// Remove every button.
    pub fn clear_buttons(&mut self) {
        self.buttons.clear();
    }

    /// Button registry.
    pub fn buttons(&self) -> &ButtonRegistry {
        &self.buttons
    }

    fn frozen(&self, op: &'static str) -> bool {
        if self.preview.is_some() {
            tracing::debug!(op, "registry frozen while preview is active");
            true
        } else {
            false
        }
    }

    // ---- animation ------------------------------------------------------------------------

    /// Tween the numeric fields of `id` toward `target`.
    ///
    /// Non-numeric fields of `target` apply immediately. The tween starts `delay_ms` after the
    /// current clock and interpolates from whatever values the node has at that moment, so
    /// re-targeting an animating node never jumps. A missing node (or a frozen registry)
    /// yields an already-settled [`TweenOutcome::Skipped`] handle.
    pub fn animate_node(
        &mut self,
        id: &str,
        target: &NodePatch,
        duration_ms: f64,
        ease: Ease,
        delay_ms: f64,
    ) -> TweenHandle {
        if self.frozen("animate_node") {
            return TweenHandle::resolved(TweenOutcome::Skipped);
        }
        let Some(node) = self.nodes.get_mut(id) else {
            tracing::debug!(node = id, "animate on missing node");
            return TweenHandle::resolved(TweenOutcome::Skipped);
        };
        target.apply_discrete(node);
        let delay = if delay_ms.is_finite() { delay_ms.max(0.0) } else { 0.0 };
        let handle = self.tweens.schedule(
            id,
            TweenSpec {
                target: target.numeric_target(id),
                start_ms: self.now_ms + delay,
                duration_ms,
                ease,
            },
        );
        self.refresh_loop();
        handle
    }

    /// Return `true` when `id` has a scheduled tween.
    pub fn is_animating(&self, id: &str) -> bool {
        self.tweens.is_animating(id)
    }

    /// Number of scheduled tweens.
    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// Cancel every in-flight tween, leaving nodes at their current values.
    pub fn cancel_tweens(&mut self) -> usize {
        let n = self.tweens.cancel_all();
        self.refresh_loop();
        n
    }

    /// Advance the clock, apply tweens and preview effects, and return the loop state.
    ///
    /// The clock never runs backwards; a stale or non-finite `now_ms` only re-applies the
    /// current time.
    pub fn tick(&mut self, now_ms: f64) -> LoopState {
        if now_ms.is_finite() && now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
        self.tweens.advance(self.now_ms, &mut self.nodes);
        if let Some(p) = self.preview.as_mut() {
            p.advance(self.now_ms);
        }
        self.refresh_loop()
    }

    /// Current loop state.
    pub fn loop_state(&self) -> LoopState {
        self.frame_loop.state()
    }

    /// Return `true` when the host should schedule another frame.
    pub fn wants_frame(&self) -> bool {
        self.frame_loop.wants_frame()
    }

    fn refresh_loop(&mut self) -> LoopState {
        let has_nodes = !self.nodes.is_empty() || self.preview.is_some();
        self.frame_loop
            .update(!self.tweens.is_empty(), has_nodes, self.opts.idle_effects)
    }

    /// Resize the surface. In-flight tweens are cancelled.
    pub fn resize(&mut self, width: u32, height: u32) -> NodeweaveResult<()> {
        let canvas = Canvas::new(width, height)?;
        let cancelled = self.tweens.cancel_all();
        tracing::debug!(width, height, cancelled, "render engine resized");
        self.canvas = canvas;
        self.refresh_loop();
        Ok(())
    }

    // ---- preview --------------------------------------------------------------------------

    /// Snapshot the registry and start a preview. An active preview is exited first.
    ///
    /// In-flight tweens are cancelled so the frozen registry stays field-equal to the snapshot.
    pub fn enter_preview_mode(&mut self) {
        if self.preview.is_some() {
            self.exit_preview_mode();
        }
        self.tweens.cancel_all();
        self.preview = Some(PreviewSandbox::enter(&self.nodes, &self.edges, self.now_ms));
        self.refresh_loop();
    }

    /// Fill the preview layer. Returns `false` when no preview is active.
    pub fn set_preview(
        &mut self,
        nodes: Vec<NodeVisual>,
        edges: Vec<EdgeVisual>,
        removed: Vec<(String, String)>,
    ) -> bool {
        let Some(p) = self.preview.as_mut() else {
            return false;
        };
        p.nodes = nodes;
        p.edges = edges;
        p.removed = removed;
        true
    }

    /// Restart the preview effect phase. Returns `false` when no preview is active.
    pub fn replay_preview(&mut self) -> bool {
        let now = self.now_ms;
        match self.preview.as_mut() {
            Some(p) => {
                p.replay(now);
                true
            }
            None => false,
        }
    }

    /// Restore the pre-entry snapshot. Returns `false` when no preview was active.
    pub fn exit_preview_mode(&mut self) -> bool {
        let Some(p) = self.preview.take() else {
            return false;
        };
        let (nodes, edges) = p.into_saved();
        self.nodes = nodes;
        self.edges = edges;
        if let Some(h) = &self.hovered
            && !self.nodes.contains_key(h)
        {
            self.hovered = None;
        }
        self.refresh_loop();
        true
    }

    /// Return `true` while a preview is active.
    pub fn is_preview_active(&self) -> bool {
        self.preview.is_some()
    }

    /// Active preview sandbox.
    pub fn preview(&self) -> Option<&PreviewSandbox> {
        self.preview.as_ref()
    }

    // ---- drawing --------------------------------------------------------------------------

    /// Drawable nodes sorted by ascending opacity; ties keep id order.
    fn draw_order(&self) -> Vec<&NodeVisual> {
        let mut out: Vec<&NodeVisual> = self.nodes.values().filter(|n| n.is_drawable()).collect();
        out.sort_by(|a, b| a.opacity.total_cmp(&b.opacity));
        out
    }

    /// Preview nodes with the pulse applied.
    fn pulsed_preview_nodes(&self) -> Vec<NodeVisual> {
        let Some(p) = &self.preview else {
            return Vec::new();
        };
        let (ks, ko) = p.pulse(self.now_ms, self.opts.pulse_period_ms);
        p.nodes
            .iter()
            .filter(|n| n.is_drawable())
            .map(|n| NodeVisual {
                scale: n.scale * ks,
                opacity: (n.opacity * ko).clamp(0.0, 1.0),
                ..n.clone()
            })
            .collect()
    }

    fn idle_wave(&self) -> f64 {
        if !self.opts.idle_effects {
            return 0.0;
        }
        (self.now_ms / self.opts.pulse_period_ms * TAU).sin()
    }

    /// Build the backend-agnostic frame description.
    pub fn draw_list(&self) -> DrawList {
        let mut list = DrawList {
            clear: self.opts.clear_color.to_premul(1.0),
            ..DrawList::default()
        };

        for e in &self.edges {
            let dim = match &self.preview {
                Some(p) if p.is_removed(&e.from, &e.to) => REMOVED_EDGE_OPACITY,
                _ => 1.0,
            };
            self.push_edge(&mut list, e, |id| self.nodes.get(id), dim);
        }

        let order = self.draw_order();
        for n in &order {
            self.push_node(&mut list, n);
        }

        let preview_nodes = self.pulsed_preview_nodes();
        if let Some(p) = &self.preview {
            let lookup = |id: &str| {
                preview_nodes
                    .iter()
                    .find(|n| n.id == id)
                    .or_else(|| self.nodes.get(id))
            };
            for e in &p.edges {
                self.push_edge(&mut list, e, lookup, 1.0);
            }
            for n in &preview_nodes {
                self.push_node(&mut list, n);
            }
        }

        for n in &order {
            self.push_buttons(&mut list, n);
        }

        list
    }

    fn push_edge<'a>(
        &self,
        list: &mut DrawList,
        e: &EdgeVisual,
        lookup: impl Fn(&str) -> Option<&'a NodeVisual>,
        dim: f64,
    ) {
        let (Some(a), Some(b)) = (lookup(&e.from), lookup(&e.to)) else {
            tracing::debug!(from = %e.from, to = %e.to, "edge endpoint missing, skipped");
            return;
        };
        if !a.is_drawable() || !b.is_drawable() {
            return;
        }
        let opacity = a.opacity.min(b.opacity) * dim;
        let dash = (e.preview.dashed || e.preview.is_new).then(|| {
            let on = 8.0;
            let off = 5.0;
            Dash {
                on,
                off,
                offset: e.progress * (on + off),
            }
        });
        list.cmds.push(DrawCmd::Line {
            from: self.camera.world_to_screen(a.pos()),
            to: self.camera.world_to_screen(b.pos()),
            width: self.opts.line_width,
            color: e.color.to_premul(opacity),
            dash,
        });
    }

    fn push_node(&self, list: &mut DrawList, n: &NodeVisual) {
        let c = self.camera.world_to_screen(n.pos());
        let r = n.effective_radius() * self.camera.zoom;
        if r <= 0.0 || n.opacity <= 0.0 {
            return;
        }
        let wave = self.idle_wave();
        let style = n.style;

        if n.glow > 0.0 {
            list.cmds.push(DrawCmd::Circle {
                center: c,
                radius: r * (1.0 + 0.3 * n.glow * (1.0 + 0.15 * wave)),
                color: style.glow.to_premul(n.opacity * n.glow * 0.45),
            });
        }
        list.cmds.push(DrawCmd::Circle {
            center: c,
            radius: r,
            color: style.primary.to_premul(n.opacity),
        });
        match style.pattern {
            FillPattern::Solid => {}
            FillPattern::Ring => list.cmds.push(DrawCmd::Ring {
                center: c,
                radius: r * 0.68,
                width: (r * 0.08).max(1.0),
                color: style.secondary.to_premul(n.opacity),
            }),
            FillPattern::Core => list.cmds.push(DrawCmd::Circle {
                center: c,
                radius: r * 0.35,
                color: style.secondary.to_premul(n.opacity),
            }),
        }
        let hovered = self.hovered.as_deref() == Some(n.id.as_str());
        let (rim, rim_width) = if hovered {
            (Color::rgb(255, 255, 255), 3.0)
        } else {
            (style.rim, 1.5)
        };
        list.cmds.push(DrawCmd::Ring {
            center: c,
            radius: r,
            width: rim_width,
            color: rim.to_premul(n.opacity),
        });

        if !n.label.is_empty() {
            list.overlays.push(Overlay::Label {
                node_id: n.id.clone(),
                text: n.label.clone(),
                pos: c + Vec2::new(0.0, r + 14.0),
                opacity: n.opacity,
            });
        }
        if matches!(n.node_type, NodeType::Center | NodeType::Title) {
            list.overlays.push(Overlay::Marker {
                node_id: n.id.clone(),
                pos: c - Vec2::new(0.0, r + 12.0 + 4.0 * wave),
            });
        }
    }

    fn push_buttons(&self, list: &mut DrawList, n: &NodeVisual) {
        let zoom = self.camera.zoom;
        for b in self.buttons.get(&n.id) {
            let pos = self
                .camera
                .world_to_screen(button_center(n, b, self.opts.button_gap));
            let color = if b.disabled {
                Color::rgba(0x80, 0x80, 0x80, 0x66)
            } else {
                b.color
            };
            list.cmds.push(DrawCmd::Circle {
                center: pos,
                radius: self.opts.button_radius * zoom,
                color: color.to_premul(n.opacity),
            });
            list.overlays.push(Overlay::Button {
                node_id: n.id.clone(),
                button_id: b.id.clone(),
                icon: b.icon.clone(),
                tooltip: b.tooltip.clone(),
                pos,
                disabled: b.disabled,
            });
        }
    }

    /// Rasterize the current state.
    #[tracing::instrument(skip(self), fields(nodes = self.nodes.len(), edges = self.edges.len()))]
    pub fn render(&mut self) -> NodeweaveResult<RenderedFrame> {
        let list = self.draw_list();
        let frame = self.backend.render(self.canvas, &list)?;
        Ok(RenderedFrame {
            frame,
            overlays: list.overlays,
        })
    }

    // ---- hit testing ----------------------------------------------------------------------

    /// Resolve a screen point to a button or node.
    ///
    /// Buttons are checked first with a hit radius of `button_hit_radius * zoom` and always win.
    /// Among overlapping nodes the one drawn last (topmost) wins, preview nodes above the main
    /// registry. Hits are purely geometric: any visible node with a finite position counts,
    /// whatever its opacity.
    pub fn hit_test(&self, screen: Point) -> Option<Hit> {
        if !is_finite_point(screen) {
            return None;
        }
        let order = self.draw_order();
        let hit_r = self.opts.button_hit_radius * self.camera.zoom;
        for n in order.iter().rev() {
            for b in self.buttons.get(&n.id) {
                let pos = self
                    .camera
                    .world_to_screen(button_center(n, b, self.opts.button_gap));
                if (screen - pos).hypot() <= hit_r {
                    return Some(Hit::Button {
                        node_id: n.id.clone(),
                        button: b.clone(),
                    });
                }
            }
        }

        let world = self.camera.screen_to_world(screen);
        if let Some(p) = &self.preview
            && let Some(n) = p
                .nodes
                .iter()
                .rev()
                .find(|n| n.contains(world))
        {
            return Some(Hit::Node(n.id.clone()));
        }
        order
            .iter()
            .rev()
            .find(|n| n.contains(world))
            .map(|n| Hit::Node(n.id.clone()))
    }

    /// Node under a screen point, ignoring buttons.
    pub fn hit_test_node(&self, screen: Point) -> Option<&NodeVisual> {
        let world = self.camera.screen_to_world(screen);
        self.draw_order()
            .into_iter()
            .rev()
            .find(|n| n.contains(world))
    }

    /// First edge within `line_hit_tolerance` screen pixels of the point.
    pub fn hit_test_line(&self, screen: Point) -> Option<&EdgeVisual> {
        let world = self.camera.screen_to_world(screen);
        let tol = self.opts.line_hit_tolerance / self.camera.zoom;
        self.edges.iter().find(|e| {
            match (self.nodes.get(&e.from), self.nodes.get(&e.to)) {
                (Some(a), Some(b)) if a.is_drawable() && b.is_drawable() => {
                    segment_distance(world, a.pos(), b.pos()) <= tol
                }
                _ => false,
            }
        })
    }

    // ---- pointer input --------------------------------------------------------------------

    /// Pointer pressed.
    pub fn pointer_down(&mut self, screen: Point) {
        self.drag.press(screen);
    }

    /// Pointer moved: pans while dragging, otherwise updates the hovered node.
    pub fn pointer_move(&mut self, screen: Point) {
        if self.drag.is_pressed() {
            if let Some(delta) = self.drag.motion(screen, self.opts.drag_threshold) {
                self.camera.pan_by(delta);
            }
            return;
        }
        self.hovered = self.hit_test_node(screen).map(|n| n.id.clone());
    }

    /// Pointer released.
    pub fn pointer_up(&mut self, _screen: Point) {
        self.drag.release();
    }

    /// Pointer stream cancelled by the host.
    pub fn pointer_cancel(&mut self) {
        self.drag.cancel();
    }

    /// Currently hovered node id.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Click at a screen point. A click that ends a drag is swallowed.
    pub fn click(&mut self, screen: Point) -> Option<EngineEvent> {
        if self.drag.take_click_suppressed() {
            tracing::trace!("click after drag suppressed");
            return None;
        }
        match self.hit_test(screen) {
            Some(Hit::Button { node_id, button }) => {
                if button.disabled {
                    return None;
                }
                if let Some(cb) = self.callbacks.on_button_click.as_mut() {
                    cb(&node_id, &button);
                }
                Some(EngineEvent::ButtonClick {
                    node_id,
                    button_id: button.id,
                    action: button.action,
                })
            }
            Some(Hit::Node(id)) => {
                let node = self.lookup_any(&id)?;
                if let Some(cb) = self.callbacks.on_node_click.as_mut() {
                    cb(&node);
                }
                Some(EngineEvent::NodeClick(id))
            }
            None => {
                let edge = self.hit_test_line(screen)?.clone();
                if let Some(cb) = self.callbacks.on_line_click.as_mut() {
                    cb(&edge);
                }
                Some(EngineEvent::LineClick {
                    from: edge.from,
                    to: edge.to,
                })
            }
        }
    }

    /// Double-click at a screen point. A double-click that ends a drag is swallowed.
    pub fn double_click(&mut self, screen: Point) -> Option<EngineEvent> {
        if self.drag.take_double_click_suppressed() {
            tracing::trace!("double-click after drag suppressed");
            return None;
        }
        let Some(Hit::Node(id)) = self.hit_test(screen) else {
            return None;
        };
        let node = self.lookup_any(&id)?;
        if let Some(cb) = self.callbacks.on_node_double_click.as_mut() {
            cb(&node);
        }
        Some(EngineEvent::NodeDoubleClick(id))
    }

    /// Wheel zoom about a screen point. Positive `delta_y` zooms out.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
        self.camera
            .zoom_at(screen, factor, self.opts.min_zoom, self.opts.max_zoom);
    }

    fn lookup_any(&self, id: &str) -> Option<NodeVisual> {
        self.nodes
            .get(id)
            .or_else(|| {
                self.preview
                    .as_ref()
                    .and_then(|p| p.nodes.iter().find(|n| n.id == id))
            })
            .cloned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
