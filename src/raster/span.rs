//! Scanline span filling.
//!
//! Consumes the crossing table one row at a time: crossings sorted by x
//! pair up into interior spans, and every span walks its pixels with a
//! [`SpanInterp`] carrying depth, the scanline blend weight and the affine
//! texture coordinate, while the shader steps its own state in lockstep.

use glam::Vec2;

use crate::raster::Rasterizer;
use crate::raster::edge::Crossing;
use crate::raster::plane::PlaneEq;
use crate::shade::Shader;
use crate::target::{RenderTarget, Rgba};
use crate::world::Texture;

/// Per-span interpolation state, rebuilt from a crossing pair for every
/// span and advanced once per pixel.
pub(crate) struct SpanInterp {
    /// Vertex indices bracketing the span: left edge start/end, right edge
    /// start/end.
    pub corners: [u32; 4],
    /// Bilinear corner weights matching `corners`.
    pub weights: [f32; 4],
    /// Span width in pixels; a zero-width span still prepares safely.
    pub width: i32,
    pub depth: f32,
    depth_step: f32,
    /// Fraction of the span walked so far, advanced by `1/width` per pixel.
    pub s: f32,
    s_step: f32,
    pub uv: Vec2,
    uv_step: Vec2,
}

impl SpanInterp {
    pub(crate) fn between(left: &Crossing, right: &Crossing, y: i32, plane: &PlaneEq) -> Self {
        let width = right.x - left.x;
        // a zero-width span must not divide by zero
        let s_step = if width == 0 { 1.0 } else { 1.0 / width as f32 };
        let uv_left = left.uv[0].lerp(left.uv[1], left.weight);
        let uv_right = right.uv[0].lerp(right.uv[1], right.weight);
        Self {
            corners: [left.edge[0], left.edge[1], right.edge[0], right.edge[1]],
            weights: [
                1.0 - left.weight,
                left.weight,
                1.0 - right.weight,
                right.weight,
            ],
            width,
            depth: plane.depth_at(left.x as f32, y as f32),
            depth_step: plane.depth_step_x(),
            s: 0.0,
            s_step,
            uv: uv_left,
            uv_step: (uv_right - uv_left) * s_step,
        }
    }

    pub(crate) fn step(&mut self) {
        self.depth += self.depth_step;
        self.s += self.s_step;
        self.uv += self.uv_step;
    }
}

impl Rasterizer {
    /// Fill every well-formed row of the crossing table.
    ///
    /// Rows with fewer than two or an odd number of crossings are
    /// degenerate and skipped whole; the rest of the polygon still fills.
    pub(crate) fn fill_spans<T, S>(
        &mut self,
        target: &mut T,
        plane: &PlaneEq,
        shader: &mut S,
        color: Rgba,
        texture: Option<&Texture>,
    ) where
        T: RenderTarget,
        S: Shader,
    {
        let width = target.width() as i32;

        for y in self.table.touched() {
            let row = self.table.row_mut(y);
            if row.len() < 2 || row.len() % 2 != 0 {
                continue;
            }
            row.sort_unstable_by_key(|c| c.x);

            for pair in self.table.row(y).chunks_exact(2) {
                let (left, right) = (&pair[0], &pair[1]);
                let mut interp = SpanInterp::between(left, right, y as i32, plane);
                shader.prepare_scanline(interp.corners, interp.weights, interp.width);

                for x in left.x..right.x {
                    if (0..width).contains(&x) {
                        let base = match texture {
                            Some(tex) => tex.sample(interp.uv),
                            None => color,
                        };
                        target.set_pixel(x as usize, y, interp.depth, shader.shade(base), true);
                    }
                    interp.step();
                    shader.step_on_scanline();
                }
            }
        }
    }
}
