//! Integer Bresenham line stepper.
//!
//! Doubles as the wireframe renderer and as the edge walker of the fill
//! pipeline: in recording mode it reports every step onto a new scanline to
//! the crossing table, tagged with interpolation metadata for the span fill.

use glam::{Vec2, Vec3};
use std::mem;

use crate::raster::edge::{Crossing, CrossingTable};
use crate::target::{RenderTarget, Rgba};

/// Destination for the crossings recorded while walking one edge.
pub(crate) struct EdgeSink<'a> {
    pub table: &'a mut CrossingTable,
    /// Vertex indices of the edge's endpoints, start first.
    pub edge: [u32; 2],
    /// Texture coordinates matching `edge`.
    pub uv: [Vec2; 2],
}

/// Draw the line a→b, clipped to the target.
///
/// The endpoints are reordered so the smaller-x one leads (the sink's edge
/// metadata swaps with them). Two polygons sharing an edge therefore step
/// it identically whichever direction each traversed it in, so their
/// crossings land on the same pixels and no seam opens between them.
///
/// Edge pixels carry the start endpoint's z unchanged; the fill driver
/// reconstructs true per-pixel depth from the polygon's plane instead.
///
/// With a sink, each step onto a new scanline records one [`Crossing`] at
/// the new (x, y) — the left-most pixel of that row for this edge — for
/// interior rows only. The first and last rows belong to the polygon's
/// vertices and are handled by the edge assembler, which knows whether a
/// vertex must count once or twice.
pub(crate) fn raster_line<T: RenderTarget>(
    target: &mut T,
    a: Vec3,
    b: Vec3,
    color: Rgba,
    depth_test: bool,
    mut sink: Option<EdgeSink<'_>>,
) {
    let mut p0 = (a.x.round() as i32, a.y.round() as i32, a.z);
    let mut p1 = (b.x.round() as i32, b.y.round() as i32, b.z);
    if p0.0 > p1.0 {
        mem::swap(&mut p0, &mut p1);
        if let Some(s) = sink.as_mut() {
            s.edge.swap(0, 1);
            s.uv.swap(0, 1);
        }
    }

    let (mut x, mut y, z) = p0;
    let (x1, y1, z1) = p1;

    let dx = x1 - x; // >= 0 after the reorder
    let dy_abs = (y1 - y).abs();
    if dx == 0 && dy_abs == 0 {
        return;
    }

    let x_driven = dx >= dy_abs;
    let span = dx.max(dy_abs) as f32;
    let mut taken = 0; // steps along the driving axis

    let sy = if y < y1 { 1 } else { -1 };
    let dy = -dy_abs;
    let mut err = dx + dy;

    let (w, h) = (target.width() as i32, target.height() as i32);

    loop {
        if (0..w).contains(&x) && (0..h).contains(&y) {
            target.set_pixel(x as usize, y as usize, z, color, depth_test);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        let mut new_row = false;
        if e2 >= dy {
            err += dy;
            x += 1;
            if x_driven {
                taken += 1;
            }
        }
        if e2 <= dx {
            err += dx;
            y += sy;
            new_row = true;
            if !x_driven {
                taken += 1;
            }
        }
        if new_row && y != y1 {
            if let Some(s) = sink.as_mut() {
                let weight = taken as f32 / span;
                s.table.add(
                    target,
                    y,
                    Crossing {
                        x,
                        z: z + (z1 - z) * weight,
                        edge: s.edge,
                        uv: s.uv,
                        weight,
                    },
                );
            }
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Framebuffer;
    use glam::vec3;

    fn lit_pixels(fb: &Framebuffer) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.pixel(x, y) != 0 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    fn draw(a: Vec3, b: Vec3) -> Vec<(usize, usize)> {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear(0);
        raster_line(&mut fb, a, b, 0xFF_FFFFFF, false, None);
        lit_pixels(&fb)
    }

    fn record(a: Vec3, b: Vec3) -> Vec<(usize, Crossing)> {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear(0);
        let mut table = CrossingTable::default();
        table.reset(16);
        raster_line(
            &mut fb,
            a,
            b,
            0xFF_FFFFFF,
            false,
            Some(EdgeSink {
                table: &mut table,
                edge: [0, 1],
                uv: [Vec2::ZERO, Vec2::ONE],
            }),
        );
        let mut out = Vec::new();
        for y in table.touched() {
            out.extend(table.row(y).iter().map(|&c| (y, c)));
        }
        out
    }

    #[test]
    fn endpoint_order_does_not_change_pixels() {
        let (a, b) = (vec3(1.0, 9.0, 0.0), vec3(12.0, 2.0, 0.0));
        assert_eq!(draw(a, b), draw(b, a));

        let (a, b) = (vec3(3.0, 1.0, 0.0), vec3(5.0, 14.0, 0.0));
        assert_eq!(draw(a, b), draw(b, a));
    }

    #[test]
    fn zero_length_edge_is_a_no_op() {
        assert!(draw(vec3(4.0, 4.0, 0.0), vec3(4.0, 4.0, 0.0)).is_empty());
    }

    #[test]
    fn line_is_clipped_to_target() {
        let px = draw(vec3(-5.0, 3.0, 0.0), vec3(30.0, 3.0, 0.0));
        assert_eq!(px.len(), 16);
        assert!(px.iter().all(|&(_, y)| y == 3));
    }

    #[test]
    fn steep_edge_records_each_interior_row_once() {
        let recs = record(vec3(2.0, 0.0, 0.0), vec3(3.0, 5.0, 10.0));
        let rows: Vec<usize> = recs.iter().map(|&(y, _)| y).collect();
        assert_eq!(rows, vec![1, 2, 3, 4]); // first and last row excluded
        // weights grow along the edge and z follows them
        for pair in recs.windows(2) {
            assert!(pair[0].1.weight < pair[1].1.weight);
            assert!(pair[0].1.z < pair[1].1.z);
        }
    }

    #[test]
    fn shallow_edge_records_leftmost_pixel_per_row() {
        let recs = record(vec3(0.0, 0.0, 0.0), vec3(11.0, 3.0, 0.0));
        let rows: Vec<usize> = recs.iter().map(|&(y, _)| y).collect();
        assert_eq!(rows, vec![1, 2]);
        let px = draw(vec3(0.0, 0.0, 0.0), vec3(11.0, 3.0, 0.0));
        for (y, c) in recs {
            let row_min = px
                .iter()
                .filter(|&&(_, py)| py == y)
                .map(|&(x, _)| x)
                .min()
                .unwrap();
            assert_eq!(c.x as usize, row_min);
        }
    }

    #[test]
    fn shared_edge_records_agree_between_windings() {
        let (a, b) = (vec3(1.0, 1.0, 0.0), vec3(9.0, 13.0, 0.0));
        let fwd: Vec<(usize, i32, f32)> =
            record(a, b).iter().map(|&(y, c)| (y, c.x, c.weight)).collect();
        let rev: Vec<(usize, i32, f32)> =
            record(b, a).iter().map(|&(y, c)| (y, c.x, c.weight)).collect();
        assert_eq!(fwd, rev);
    }

    #[test]
    fn swapped_endpoints_swap_edge_metadata() {
        // b→a with b.x > a.x: the sink must see the edge from a's side
        let recs = record(vec3(9.0, 5.0, 0.0), vec3(1.0, 1.0, 0.0));
        assert!(!recs.is_empty());
        for (_, c) in recs {
            assert_eq!(c.edge, [1, 0]);
            assert_eq!(c.uv, [Vec2::ONE, Vec2::ZERO]);
        }
    }
}
