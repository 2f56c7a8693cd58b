//! Implicit plane `Ax + By + Cz + D = 0` of the polygon being filled.
//!
//! The fill driver reconstructs depth for any (x, y) from the plane instead
//! of interpolating z along edges, so depth stays consistent across spans.

use glam::Vec3;

use crate::world::polygon_normal;

/// A polygon edge-on to the view plane has |C| below this and no usable
/// depth at finite slope; such polygons are skipped for fill purposes.
pub const MIN_C: f32 = 0.001;

/// Solved plane of one polygon, valid only for the fill call it was
/// computed for. Always recomputed per polygon — never ambient state.
#[derive(Clone, Copy, Debug)]
pub struct PlaneEq {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    /* hoisted out of the per-pixel loop */
    inv_c: f32,
    a_over_c: f32,
}

impl PlaneEq {
    /// Solve the plane of `poly`. The normal is derived from the polygon
    /// when not supplied. Returns `None` when the polygon is edge-on
    /// (`|C| < MIN_C`); callers must skip the polygon entirely.
    ///
    /// All indices in `poly` must be in range for `verts`.
    pub fn from_polygon(verts: &[Vec3], poly: &[u32], normal: Option<Vec3>) -> Option<Self> {
        let n = normal.unwrap_or_else(|| polygon_normal(verts, poly));
        if n.z.abs() < MIN_C {
            return None;
        }
        let p0 = verts[*poly.first()? as usize];
        let d = -(n.x * p0.x + n.y * p0.y + n.z * p0.z);
        Some(Self {
            a: n.x,
            b: n.y,
            c: n.z,
            d,
            inv_c: 1.0 / n.z,
            a_over_c: n.x / n.z,
        })
    }

    /// Depth of the plane at screen position (x, y).
    pub fn depth_at(&self, x: f32, y: f32) -> f32 {
        -(self.a * x + self.b * y + self.d) * self.inv_c
    }

    /// Depth increment per +1 pixel step along a scanline.
    pub fn depth_step_x(&self) -> f32 {
        -self.a_over_c
    }
}
