use kurbo::Shape;

use crate::foundation::core::{Canvas, Point, Rgba8Premul};
use crate::foundation::error::{NodeweaveError, NodeweaveResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::draw::{DrawCmd, DrawList, dash_segments};

const TOLERANCE: f64 = 0.1;

/// CPU backend powered by `vello_cpu`.
///
/// The render context is kept between frames and rebuilt only when the canvas size changes.
#[derive(Default)]
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("has_ctx", &self.ctx.is_some())
            .finish()
    }
}

impl CpuBackend {
    /// Backend with no context allocated yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> NodeweaveResult<R>,
    ) -> NodeweaveResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

impl RenderBackend for CpuBackend {
    fn render(&mut self, canvas: Canvas, list: &DrawList) -> NodeweaveResult<FrameRGBA> {
        let width = u16::try_from(canvas.width)
            .map_err(|_| NodeweaveError::surface("canvas width exceeds raster limits"))?;
        let height = u16::try_from(canvas.height)
            .map_err(|_| NodeweaveError::surface("canvas height exceeds raster limits"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        self.with_ctx_mut(width, height, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());

            if list.clear.a > 0 {
                set_paint(ctx, list.clear);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(width),
                    f64::from(height),
                ));
            }

            for cmd in &list.cmds {
                draw_cmd(ctx, cmd);
            }

            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_cmd(ctx: &mut vello_cpu::RenderContext, cmd: &DrawCmd) {
    match cmd {
        DrawCmd::Line {
            from,
            to,
            width,
            color,
            dash,
        } => {
            if color.a == 0 {
                return;
            }
            set_paint(ctx, *color);
            match dash {
                None => fill_segment(ctx, *from, *to, *width),
                Some(d) => {
                    for (a, b) in dash_segments(*from, *to, *d) {
                        fill_segment(ctx, a, b, *width);
                    }
                }
            }
        }
        DrawCmd::Circle {
            center,
            radius,
            color,
        } => {
            if color.a == 0 || *radius <= 0.0 {
                return;
            }
            set_paint(ctx, *color);
            fill_shape(ctx, &kurbo::Circle::new(*center, *radius));
        }
        DrawCmd::Ring {
            center,
            radius,
            width,
            color,
        } => {
            let half = width * 0.5;
            if color.a == 0 || *radius <= 0.0 || half <= 0.0 {
                return;
            }
            set_paint(ctx, *color);
            let ring = kurbo::CircleSegment::new(
                *center,
                radius + half,
                (radius - half).max(0.0),
                0.0,
                std::f64::consts::TAU,
            );
            fill_shape(ctx, &ring);
        }
    }
}

fn set_paint(ctx: &mut vello_cpu::RenderContext, c: Rgba8Premul) {
    let [r, g, b, a] = unpremul(c);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
}

fn unpremul(c: Rgba8Premul) -> [u8; 4] {
    if c.a == 0 || c.a == 255 {
        return c.to_array();
    }
    let a = u16::from(c.a);
    let f = |v: u8| ((u16::from(v) * 255 + a / 2) / a).min(255) as u8;
    [f(c.r), f(c.g), f(c.b), c.a]
}

fn fill_shape(ctx: &mut vello_cpu::RenderContext, shape: &impl Shape) {
    let mut p = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(TOLERANCE) {
        p.push(el);
    }
    ctx.fill_path(&p);
}

fn fill_segment(ctx: &mut vello_cpu::RenderContext, a: Point, b: Point, width: f64) {
    let d = b - a;
    let len = d.hypot();
    if len <= f64::EPSILON || width <= 0.0 {
        return;
    }
    let n = kurbo::Vec2::new(-d.y, d.x) * (width * 0.5 / len);
    let mut p = vello_cpu::kurbo::BezPath::new();
    p.move_to(a + n);
    p.line_to(b + n);
    p.line_to(b - n);
    p.line_to(a - n);
    p.close_path();
    ctx.fill_path(&p);
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
