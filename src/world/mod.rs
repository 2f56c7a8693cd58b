mod geometry;
mod texture;

pub use geometry::{GeometryError, Mesh, Polygon, PolygonUv, polygon_normal};

pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
