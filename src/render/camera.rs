use crate::foundation::core::{Affine, Point, Vec2};

/// Global pan/zoom transform: `screen = world * zoom + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Screen-space translation in pixels.
    pub offset: Vec2,
    /// Uniform scale.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// World-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Map a world point to the screen.
    pub fn world_to_screen(&self, p: Point) -> Point {
        self.transform() * p
    }

    /// Map a screen point back into the world.
    pub fn screen_to_world(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset.x) / self.zoom,
            (p.y - self.offset.y) / self.zoom,
        )
    }

    /// Translate by a screen-space delta, 1:1 in pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta.x.is_finite() && delta.y.is_finite() {
            self.offset += delta;
        }
    }

    /// Multiply zoom by `factor`, keeping the world point under `anchor` fixed on screen.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64, min_zoom: f64, max_zoom: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let next = (self.zoom * factor).clamp(min_zoom, max_zoom);
        let ratio = next / self.zoom;
        self.offset = Vec2::new(
            anchor.x - (anchor.x - self.offset.x) * ratio,
            anchor.y - (anchor.y - self.offset.y) * ratio,
        );
        self.zoom = next;
    }
}

/// Pointer press state for camera drags.
///
/// Once a press travels farther than the threshold it becomes a drag, and the click the host
/// delivers after the release is swallowed. So is a double-click whose second press ended in a
/// drag.
#[derive(Clone, Debug, Default)]
pub struct DragTracker {
    pressed_at: Option<Point>,
    last: Point,
    dragging: bool,
    suppress_click: bool,
    suppress_double_click: bool,
}

impl DragTracker {
    /// Start a press.
    pub fn press(&mut self, p: Point) {
        self.pressed_at = Some(p);
        self.last = p;
        self.dragging = false;
        self.suppress_click = false;
        self.suppress_double_click = false;
    }

    /// Pointer motion; returns the pan delta once the press has become a drag.
    ///
    /// The first delta covers the whole travel since the press, so the total pan always equals
    /// the total pointer movement.
    pub fn motion(&mut self, p: Point, threshold: f64) -> Option<Vec2> {
        let origin = self.pressed_at?;
        if !self.dragging {
            if (p - origin).hypot() <= threshold {
                return None;
            }
            self.dragging = true;
            self.last = origin;
        }
        let delta = p - self.last;
        self.last = p;
        Some(delta)
    }

    /// End the press.
    pub fn release(&mut self) {
        if self.pressed_at.take().is_some() && self.dragging {
            self.suppress_click = true;
            self.suppress_double_click = true;
        }
        self.dragging = false;
    }

    /// Abort the press without suppressing anything.
    pub fn cancel(&mut self) {
        self.pressed_at = None;
        self.dragging = false;
    }

    /// Return `true` while a press is held.
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Return `true` once the current press has moved past the threshold.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Consume the pending click suppression, if any.
    pub fn take_click_suppressed(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }

    /// Consume the pending double-click suppression, if any.
    ///
    /// Tracked apart from the click flag because hosts deliver `click` before `dblclick`.
    pub fn take_double_click_suppressed(&mut self) -> bool {
        std::mem::take(&mut self.suppress_double_click)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/camera.rs"]
mod tests;
