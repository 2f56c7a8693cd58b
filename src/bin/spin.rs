//! spin - rotating-cube viewer for the scanline rasterizer.
//!
//! ```bash
//! cargo run --release -- --shading gouraud --textured
//! ```

use clap::{Parser, ValueEnum};
use glam::{Mat3, Vec3, vec3};
use minifb::{Key, Window, WindowOptions};
use std::time::{Duration, Instant};

use scanrast::{
    Framebuffer, Rasterizer, RenderTarget,
    raster::PolygonUv,
    shade::{Flat, Gouraud, lambert},
    world::{Mesh, NO_TEXTURE, TextureBank, polygon_normal},
};

const BACKGROUND: u32 = 0xFF_202020;
const AMBIENT: f32 = 0.25;

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    #[arg(long, default_value_t = 960)]
    width: usize,

    #[arg(long, default_value_t = 720)]
    height: usize,

    #[arg(long, value_enum, default_value = "gouraud")]
    shading: Shading,

    /// Sample the checkerboard texture instead of a solid base color.
    #[arg(long)]
    textured: bool,

    /// Overlay the polygon outlines.
    #[arg(long)]
    wireframe: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Shading {
    Flat,
    Gouraud,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let (w, h) = (opts.width, opts.height);

    let mesh = Mesh::cube(1.0);
    let bank = TextureBank::default_with_checker();
    let texture = opts.textured.then(|| bank.texture(NO_TEXTURE)).transpose()?;

    let mut fb = Framebuffer::new(w, h);
    let mut rast = Rasterizer::new();

    let light = vec3(-0.4, -0.6, -0.7).normalize();
    let focal = h as f32 * 1.2;
    let cam_dist = 4.0;

    let mut win = Window::new("scanrast spin", w, h, WindowOptions::default())?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let start = Instant::now();

    let mut view_verts = Vec::with_capacity(mesh.vertices.len());
    let mut screen_verts = Vec::with_capacity(mesh.vertices.len());
    let mut intensity = Vec::with_capacity(mesh.vertices.len());

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();
        let t = start.elapsed().as_secs_f32();

        /* model → view ---------------------------------------------------*/
        let rot = Mat3::from_rotation_y(t * 0.8) * Mat3::from_rotation_x(t * 0.5);
        view_verts.clear();
        screen_verts.clear();
        intensity.clear();
        for (v, n) in mesh.vertices.iter().zip(&mesh.normals) {
            let vv = rot * *v + vec3(0.0, 0.0, cam_dist);
            view_verts.push(vv);
            screen_verts.push(project(vv, w as f32, h as f32, focal));
            intensity.push(lambert(rot * *n, light, AMBIENT));
        }

        /* rasterize ------------------------------------------------------*/
        fb.clear(BACKGROUND);
        let mut gouraud = Gouraud::new(&intensity);
        for (poly, poly_uv) in mesh.polygons.iter().zip(&mesh.polygon_uvs) {
            let poly = poly.as_slice();
            // skip faces straddling the near plane
            if poly.iter().any(|&i| view_verts[i as usize].z < 0.5) {
                continue;
            }
            let uv = PolygonUv {
                coords: &mesh.uv_coords,
                indices: poly_uv.as_slice(),
            };
            match opts.shading {
                Shading::Gouraud => rast.fill_polygon(
                    &mut fb,
                    &mut gouraud,
                    &screen_verts,
                    poly,
                    0xFF_C8C8FF,
                    Some(&uv),
                    texture,
                ),
                Shading::Flat => {
                    let shade = lambert(polygon_normal(&view_verts, poly), light, AMBIENT);
                    rast.fill_polygon(
                        &mut fb,
                        &mut Flat { intensity: shade },
                        &screen_verts,
                        poly,
                        0xFF_C8C8FF,
                        Some(&uv),
                        texture,
                    )
                }
            }
            if opts.wireframe {
                rast.stroke_polygon(&mut fb, &screen_verts, poly, 0xFF_FFFFFF);
            }
        }

        win.update_with_buffer(fb.pixels(), fb.width(), fb.height())?;

        // ─────────── accumulate & report every ~3 s ────────────────────
        acc_time += t0.elapsed();
        acc_frames += 1;
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            println!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/// Pinhole projection into pixel coordinates, keeping view-space depth.
fn project(v: Vec3, w: f32, h: f32, focal: f32) -> Vec3 {
    let inv = focal / v.z;
    vec3(w * 0.5 + v.x * inv, h * 0.5 - v.y * inv, v.z)
}
