//! Edge assembly: walking a polygon's edges into scanline crossings.
//!
//! Every non-horizontal edge is drawn with the Bresenham stepper in
//! recording mode, which covers the edge's interior rows; the rows at the
//! polygon's vertices are covered by explicit vertex crossings added here.
//! A vertex where the walk direction reverses (a local extremum) must count
//! as *two* crossings, not one, or span pairing downstream goes odd.

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::raster::line::{EdgeSink, raster_line};
use crate::raster::plane::PlaneEq;
use crate::raster::{PolygonUv, Rasterizer};
use crate::target::{RenderTarget, Rgba};

/// One point where a polygon edge crosses a scanline.
///
/// `edge` holds the vertex indices of the crossed edge's endpoints and
/// `weight` the fraction of the edge traversed, so shading and texture
/// attributes can be blended between the endpoints later. A crossing placed
/// exactly on a vertex stores that vertex for both endpoints with weight 0.
#[derive(Clone, Copy, Debug)]
pub struct Crossing {
    pub x: i32,
    pub z: f32,
    pub edge: [u32; 2],
    pub uv: [Vec2; 2],
    pub weight: f32,
}

/// Rows rarely collect more than two pairs before being consumed.
type Row = SmallVec<[Crossing; 4]>;

/// Per-scanline crossing records for the polygon currently being filled.
///
/// Rows are unordered at insertion and sorted by the fill driver just
/// before use. Cleared once per polygon; only the touched band of rows is
/// actually walked when clearing.
#[derive(Default)]
pub struct CrossingTable {
    rows: Vec<Row>,
    y_min: usize,
    y_max: usize,
}

impl CrossingTable {
    /// Drop the previous polygon's records and size the table for a target
    /// `height` rows tall.
    pub fn reset(&mut self, height: usize) {
        if self.rows.len() != height {
            self.rows.clear();
            self.rows.resize_with(height, Row::new);
        } else if self.y_min <= self.y_max {
            for row in &mut self.rows[self.y_min..=self.y_max] {
                row.clear();
            }
        }
        self.y_min = usize::MAX;
        self.y_max = 0;
    }

    /// Append a crossing on scanline `y`.
    ///
    /// Records with `y` outside `[0, height)` are dropped silently — they
    /// cannot belong to any real scanline. The target's dirty rectangle is
    /// expanded at the clamped x even though no pixel is written here:
    /// recording mode may skip pixel writes, but partial redraw must still
    /// cover the fill region.
    pub fn add<T: RenderTarget>(&mut self, target: &mut T, y: i32, crossing: Crossing) {
        if y < 0 || y as usize >= target.height() {
            return;
        }
        let y = y as usize;
        let clamped_x = (crossing.x.max(0) as usize).min(target.width().saturating_sub(1));
        target.mark_dirty(clamped_x, y);

        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        row.push(crossing);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    /// Inclusive band of rows that received at least one crossing.
    pub fn touched(&self) -> std::ops::RangeInclusive<usize> {
        if self.y_min > self.y_max {
            1..=0 // empty
        } else {
            self.y_min..=self.y_max
        }
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [Crossing] {
        &mut self.rows[y]
    }

    pub fn row(&self, y: usize) -> &[Crossing] {
        &self.rows[y]
    }
}

/// Texture coordinate of polygon corner `k`, when the polygon carries any.
fn corner_uv(uv: Option<&PolygonUv<'_>>, k: usize) -> Vec2 {
    match uv {
        Some(m) => m
            .indices
            .get(k)
            .and_then(|&i| m.coords.get(i as usize))
            .copied()
            .unwrap_or(Vec2::ZERO),
        None => Vec2::ZERO,
    }
}

impl Rasterizer {
    /// Walk `poly`'s edges: draw them, and collect scanline crossings for
    /// the fill driver. Returns the polygon's plane, or `None` when the
    /// polygon cannot be filled (edge-on plane, no vertical extent, bad
    /// indices) — in which case nothing was drawn.
    pub(crate) fn collect_crossings<T: RenderTarget>(
        &mut self,
        target: &mut T,
        verts: &[Vec3],
        poly: &[u32],
        color: Rgba,
        uv: Option<&PolygonUv<'_>>,
    ) -> Option<PlaneEq> {
        if poly.len() < 3 || poly.iter().any(|&i| i as usize >= verts.len()) {
            return None;
        }

        self.table.reset(target.height());
        let plane = PlaneEq::from_polygon(verts, poly, None)?;

        let n = poly.len();
        let row_of = |v: Vec3| v.y.round() as i32;

        // Seed direction tracking from the last non-horizontal edge so the
        // first edge walked forward has a valid predecessor to compare
        // against.
        let mut prev_dir = 0;
        for i in (0..n).rev() {
            let a = verts[poly[i] as usize];
            let b = verts[poly[(i + 1) % n] as usize];
            let dir = (row_of(b) - row_of(a)).signum();
            if dir != 0 {
                prev_dir = dir;
                break;
            }
        }
        if prev_dir == 0 {
            // every edge horizontal: nothing to fill
            return None;
        }

        for i in 0..n {
            let (ia, ib) = (poly[i], poly[(i + 1) % n]);
            let (a, b) = (verts[ia as usize], verts[ib as usize]);
            let (uv_a, uv_b) = (corner_uv(uv, i), corner_uv(uv, (i + 1) % n));
            let dir = (row_of(b) - row_of(a)).signum();

            if dir == 0 {
                // horizontal edges are drawn but never cross a scanline;
                // they also must not erase the last real direction
                raster_line(target, a, b, color, true, None);
                continue;
            }

            raster_line(
                target,
                a,
                b,
                color,
                true,
                Some(EdgeSink {
                    table: &mut self.table,
                    edge: [ia, ib],
                    uv: [uv_a, uv_b],
                }),
            );

            // the edge's end vertex crosses its own row
            self.table.add(
                target,
                row_of(b),
                Crossing {
                    x: b.x.round() as i32,
                    z: b.z,
                    edge: [ib, ib],
                    uv: [uv_b, uv_b],
                    weight: 0.0,
                },
            );

            if prev_dir + dir == 0 {
                // direction reversal: the start vertex is a local extremum
                // and must contribute a second crossing on its row
                self.table.add(
                    target,
                    row_of(a),
                    Crossing {
                        x: a.x.round() as i32,
                        z: a.z,
                        edge: [ia, ia],
                        uv: [uv_a, uv_a],
                        weight: 0.0,
                    },
                );
            }

            prev_dir = dir;
        }

        Some(plane)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
