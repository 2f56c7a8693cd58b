//! Mesh data the rasterizer consumes.
//!
//! The rasterizer itself only reads slices — vertex positions, index lists,
//! texture coordinates. [`Mesh`] is the owning container plus the index
//! validation the silent-skip rasterizer deliberately does not report on.

use glam::{Vec2, Vec3, vec2, vec3};
use smallvec::SmallVec;
use thiserror::Error;

/// Index list of one polygon; quads and triangles stay inline.
pub type Polygon = SmallVec<[u32; 4]>;

/// Texture coordinates of one polygon: `indices[k]` selects the coordinate
/// of the polygon's k-th corner from `coords`.
pub struct PolygonUv<'a> {
    pub coords: &'a [Vec2],
    pub indices: &'a [u32],
}

/// Things that can go wrong assembling a mesh.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// A polygon references a vertex the mesh does not have.
    #[error("polygon references vertex {0} outside of mesh")]
    BadVertexIndex(u32),

    /// Fewer than three corners cannot enclose any area.
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
}

/// An indexed polygon mesh in screen or model space.
///
/// `polygon_uvs` runs parallel to `polygons`; both may be empty for
/// untextured meshes. `normals` holds one vector per vertex for shading
/// (empty when the mesh has none).
#[derive(Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub polygons: Vec<Polygon>,
    pub uv_coords: Vec<Vec2>,
    pub polygon_uvs: Vec<Polygon>,
}

impl Mesh {
    /// Append a polygon after checking every index is in range.
    pub fn push_polygon(&mut self, indices: &[u32]) -> Result<(), GeometryError> {
        if indices.len() < 3 {
            return Err(GeometryError::TooFewVertices(indices.len()));
        }
        for &i in indices {
            if i as usize >= self.vertices.len() {
                return Err(GeometryError::BadVertexIndex(i));
            }
        }
        self.polygons.push(Polygon::from_slice(indices));
        Ok(())
    }

    /// Axis-aligned cube of the given half-extent, centred on the origin:
    /// eight shared vertices, six quads, per-face texture coordinates.
    /// Vertex normals point radially outward so Gouraud shading rounds the
    /// corners off.
    pub fn cube(half: f32) -> Self {
        let h = half;
        let vertices = vec![
            vec3(-h, -h, -h),
            vec3(h, -h, -h),
            vec3(h, h, -h),
            vec3(-h, h, -h),
            vec3(-h, -h, h),
            vec3(h, -h, h),
            vec3(h, h, h),
            vec3(-h, h, h),
        ];
        let normals = vertices.iter().map(|v| v.normalize()).collect();

        // counter-clockwise seen from outside, so face normals point out
        let faces: [[u32; 4]; 6] = [
            [4, 5, 6, 7], // front
            [1, 0, 3, 2], // back
            [0, 1, 5, 4], // bottom
            [7, 6, 2, 3], // top
            [5, 1, 2, 6], // right
            [0, 4, 7, 3], // left
        ];
        let uv_coords = vec![
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.0, 1.0),
            vec2(0.0, 1.0),
        ];

        Self {
            vertices,
            normals,
            polygons: faces.iter().map(|f| Polygon::from_slice(f)).collect(),
            uv_coords,
            polygon_uvs: faces
                .iter()
                .map(|_| Polygon::from_slice(&[0, 1, 2, 3]))
                .collect(),
        }
    }
}

/// Normal of a polygon by Newell's method.
///
/// Robust for arbitrary simple polygons, including non-convex and slightly
/// non-planar ones; collinear/degenerate input yields the zero vector,
/// which the plane solver then rejects. All indices must be in range.
pub fn polygon_normal(verts: &[Vec3], poly: &[u32]) -> Vec3 {
    let mut n = Vec3::ZERO;
    for i in 0..poly.len() {
        let a = verts[poly[i] as usize];
        let b = verts[poly[(i + 1) % poly.len()] as usize];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n.normalize_or_zero()
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_square_faces_the_viewer() {
        let verts = [
            vec3(0.0, 0.0, 0.0),
            vec3(4.0, 0.0, 0.0),
            vec3(4.0, 4.0, 0.0),
            vec3(0.0, 4.0, 0.0),
        ];
        let n = polygon_normal(&verts, &[0, 1, 2, 3]);
        assert!((n - vec3(0.0, 0.0, 1.0)).length() < 1e-6);
        // reversed winding flips the normal
        let n = polygon_normal(&verts, &[3, 2, 1, 0]);
        assert!((n - vec3(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn collinear_polygon_has_no_normal() {
        let verts = [
            vec3(0.0, 0.0, 0.0),
            vec3(1.0, 1.0, 0.0),
            vec3(3.0, 3.0, 0.0),
        ];
        assert_eq!(polygon_normal(&verts, &[0, 1, 2]), Vec3::ZERO);
    }

    #[test]
    fn push_polygon_validates_indices() {
        let mut mesh = Mesh::default();
        mesh.vertices = vec![Vec3::ZERO; 3];
        assert_eq!(
            mesh.push_polygon(&[0, 1]),
            Err(GeometryError::TooFewVertices(2))
        );
        assert_eq!(
            mesh.push_polygon(&[0, 1, 7]),
            Err(GeometryError::BadVertexIndex(7))
        );
        assert!(mesh.push_polygon(&[0, 1, 2]).is_ok());
        assert_eq!(mesh.polygons.len(), 1);
    }

    #[test]
    fn cube_is_closed_and_textured() {
        let cube = Mesh::cube(1.0);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.polygons.len(), 6);
        assert_eq!(cube.polygon_uvs.len(), 6);
        for n in &cube.normals {
            assert!((n.length() - 1.0).abs() < 1e-6);
        }
        // every face has a unit-length normal pointing away from the centre
        for face in &cube.polygons {
            let n = polygon_normal(&cube.vertices, face.as_slice());
            assert!((n.length() - 1.0).abs() < 1e-6);
            let centroid: Vec3 = face
                .iter()
                .map(|&i| cube.vertices[i as usize])
                .sum::<Vec3>()
                / face.len() as f32;
            assert!(n.dot(centroid) > 0.0);
        }
    }
}
