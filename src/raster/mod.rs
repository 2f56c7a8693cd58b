//! The rasterizer core: Bresenham lines, edge assembly, scanline fill.
//!
//! One [`Rasterizer`] owns all per-polygon scratch (the crossing table), so
//! a fill call leaves no ambient state behind and two instances never
//! interfere — parallel rendering partitions polygons across instances and
//! only the target writes need coordination.
//!
//! A fill is not reentrant: the crossing table and the plane of the current
//! polygon are valid only until `fill_polygon` returns.

mod edge;
mod line;
mod plane;
mod span;

use glam::Vec3;

pub use edge::{Crossing, CrossingTable};
pub use plane::{MIN_C, PlaneEq};

pub use crate::world::PolygonUv;

use crate::shade::Shader;
use crate::target::{RenderTarget, Rgba};
use crate::world::Texture;

/// Scanline polygon rasterizer.
#[derive(Default)]
pub struct Rasterizer {
    pub(crate) table: CrossingTable,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a single line between two screen-space points, ignoring depth.
    /// Debug/overlay use; polygon edges go through the fill path instead.
    pub fn draw_line<T: RenderTarget>(&self, target: &mut T, a: Vec3, b: Vec3, color: Rgba) {
        line::raster_line(target, a, b, color, false, None);
    }

    /// Draw `poly`'s outline (closed), ignoring depth.
    ///
    /// Works on any polygon, including ones the fill path rejects as
    /// degenerate — a wireframe of an edge-on polygon is still a line.
    pub fn stroke_polygon<T: RenderTarget>(
        &self,
        target: &mut T,
        verts: &[Vec3],
        poly: &[u32],
        color: Rgba,
    ) {
        let n = poly.len();
        if n < 2 {
            return;
        }
        for i in 0..n {
            let (Some(&a), Some(&b)) = (
                verts.get(poly[i] as usize),
                verts.get(poly[(i + 1) % n] as usize),
            ) else {
                return;
            };
            line::raster_line(target, a, b, color, false, None);
        }
    }

    /// Fill `poly` with depth-tested, shaded pixels.
    ///
    /// `verts` are screen-space positions (x, y in pixels, z depth). The
    /// polygon's edges are drawn as a side effect; interior spans sample
    /// `texture` at the interpolated texture coordinate when both `uv` and
    /// `texture` are present, otherwise they use `color`, and the result is
    /// run through `shader` per fragment.
    ///
    /// Degenerate input — edge-on or flat polygons, out-of-range indices,
    /// malformed rows — under-draws silently; this never panics and never
    /// reports an error.
    pub fn fill_polygon<T, S>(
        &mut self,
        target: &mut T,
        shader: &mut S,
        verts: &[Vec3],
        poly: &[u32],
        color: Rgba,
        uv: Option<&PolygonUv<'_>>,
        texture: Option<&Texture>,
    ) where
        T: RenderTarget,
        S: Shader,
    {
        let Some(plane) = self.collect_crossings(target, verts, poly, color, uv) else {
            return;
        };
        self.fill_spans(target, &plane, shader, color, texture);
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
