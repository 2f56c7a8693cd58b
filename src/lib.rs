//! Software (CPU) scanline polygon rasterizer.
//!
//! Turns polygonal meshes — vertex arrays plus per-polygon index lists —
//! into depth-tested, shaded pixels without touching a hardware API.
//! The pipeline per polygon:
//!
//! 1. [`raster::PlaneEq`] solves the polygon's supporting plane so depth can
//!    be reconstructed for any (x, y) on a scanline.
//! 2. The edge assembler walks the polygon's edges with a Bresenham stepper,
//!    drawing them and collecting scanline crossings into a table.
//! 3. The fill driver pairs the crossings per row and fills the interior
//!    spans, interpolating shading and texture coordinates across each span.
//!
//! The rasterizer core never allocates global state: all per-polygon scratch
//! lives in a [`raster::Rasterizer`] instance, so parallel fills just need
//! one instance per worker.

pub mod raster;
pub mod shade;
pub mod target;
pub mod world;

pub use raster::Rasterizer;
pub use target::{Framebuffer, RenderTarget, Rgba};
