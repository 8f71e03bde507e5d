use crate::foundation::error::{NodeweaveError, NodeweaveResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Largest surface edge the CPU raster backend can address.
pub const MAX_SURFACE_EDGE: u32 = u16::MAX as u32;

/// Drawing surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas.
    ///
    /// A zero-sized or oversized surface cannot back a drawing context, so this is the one
    /// place where the engine reports a fatal initialization error.
    pub fn new(width: u32, height: u32) -> NodeweaveResult<Self> {
        if width == 0 || height == 0 {
            return Err(NodeweaveError::surface(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        if width > MAX_SURFACE_EDGE || height > MAX_SURFACE_EDGE {
            return Err(NodeweaveError::surface(format!(
                "canvas {width}x{height} exceeds the {MAX_SURFACE_EDGE}px surface limit"
            )));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64`.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// Geometric center of the canvas.
    pub fn center(self) -> Point {
        Point::new(self.w() / 2.0, self.h() / 2.0)
    }

    /// Length of the canvas diagonal.
    pub fn diagonal(self) -> f64 {
        self.w().hypot(self.h())
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Opaque color from straight RGB.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Scale every channel by `opacity` in `[0, 1]`.
    ///
    /// Premultiplied colors fade uniformly, so all four channels are scaled.
    pub fn faded(self, opacity: f64) -> Self {
        let k = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let scale = |c: u8| -> u8 { (f64::from(c) * k).round().clamp(0.0, 255.0) as u8 };
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: scale(self.a),
        }
    }

    /// Return this color as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Return `true` when both coordinates of `p` are finite.
pub fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
