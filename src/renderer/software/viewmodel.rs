//! First-person weapon overlay.
//!
//! Drawn after the scene into the colour buffer only: it never reads or
//! writes depth, so it always sits in front of the world.

use glam::{Mat3, Vec2, Vec3, vec2, vec3};

use crate::{
    renderer::{FrameBuffer, Rgba, blend, rgb, shade, software::raster::fill_triangle},
    world::{Asset, Texture},
};

/// Reference resolution the pose offsets are authored against.
const REF_W: f32 = 800.0;
const REF_H: f32 = 600.0;
const MIN_SCALE: f32 = 0.3;

const PLACEHOLDER_FILL: Rgba = rgb(100, 100, 100);
const PLACEHOLDER_EDGE: Rgba = rgb(255, 255, 255);
const UNTEXTURED: Rgba = rgb(128, 128, 128);

/// One triangle: vertex indices and, optionally, UV indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshFace {
    pub verts: [u32; 3],
    pub uvs: Option<[u32; 3]>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub faces: Vec<MeshFace>,
}

impl Mesh {
    /// Append an axis-aligned box as 12 triangles with per-face UVs.
    pub fn push_box(&mut self, min: Vec3, max: Vec3) {
        let base_uv = self.uvs.len() as u32;
        self.uvs
            .extend([vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)]);

        let c = |x: bool, y: bool, z: bool| {
            vec3(
                if x { max.x } else { min.x },
                if y { max.y } else { min.y },
                if z { max.z } else { min.z },
            )
        };
        let quads = [
            [c(false, false, true), c(true, false, true), c(true, true, true), c(false, true, true)],
            [c(true, false, false), c(false, false, false), c(false, true, false), c(true, true, false)],
            [c(false, true, true), c(true, true, true), c(true, true, false), c(false, true, false)],
            [c(false, false, false), c(true, false, false), c(true, false, true), c(false, false, true)],
            [c(true, false, true), c(true, false, false), c(true, true, false), c(true, true, true)],
            [c(false, false, false), c(false, false, true), c(false, true, true), c(false, true, false)],
        ];
        for quad in quads {
            let b = self.vertices.len() as u32;
            self.vertices.extend(quad);
            let uv = |i: u32| base_uv + i;
            self.faces.push(MeshFace {
                verts: [b, b + 1, b + 2],
                uvs: Some([uv(0), uv(1), uv(2)]),
            });
            self.faces.push(MeshFace {
                verts: [b, b + 2, b + 3],
                uvs: Some([uv(0), uv(2), uv(3)]),
            });
        }
    }

    /// Blocky stand-in rifle: receiver, barrel, magazine and stock.
    pub fn box_gun() -> Self {
        let mut m = Mesh::default();
        m.push_box(vec3(-0.06, -0.08, -0.30), vec3(0.06, 0.06, 0.20));
        m.push_box(vec3(-0.025, -0.01, -0.75), vec3(0.025, 0.04, -0.30));
        m.push_box(vec3(-0.04, -0.28, -0.15), vec3(0.04, -0.08, -0.05));
        m.push_box(vec3(-0.05, -0.12, 0.20), vec3(0.05, 0.03, 0.45));
        m
    }
}

/// Screen placement of the weapon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPose {
    /// Pixels in from the right edge / up from the bottom edge, then depth.
    pub offset: Vec3,
    /// Euler angles in degrees, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: f32,
}

impl ViewPose {
    /// Held at the hip, lower right.
    pub fn hip() -> Self {
        Self {
            offset: vec3(100.0, 50.0, 0.0),
            rotation: vec3(0.0, 20.0, 0.0),
            scale: 300.0,
        }
    }

    /// Raised to the eye, centred.
    pub fn aimed() -> Self {
        Self {
            offset: vec3(400.0, 140.0, 40.0),
            rotation: Vec3::ZERO,
            scale: 300.0,
        }
    }

    #[inline]
    fn rotation_matrix(&self) -> Mat3 {
        let r = self.rotation * (std::f32::consts::PI / 180.0);
        Mat3::from_rotation_z(r.z) * Mat3::from_rotation_y(r.y) * Mat3::from_rotation_x(r.x)
    }
}

impl Default for ViewPose {
    fn default() -> Self {
        Self::hip()
    }
}

/// A posed weapon mesh with its skin; either may still be loading.
#[derive(Clone, Debug, Default)]
pub struct ViewModel {
    pub mesh: Asset<Mesh>,
    pub skin: Asset<Texture>,
    pub pose: ViewPose,
}

struct ProjectedFace {
    xs: [f32; 3],
    ys: [f32; 3],
    avg_z: f32,
    color: Rgba,
}

impl ViewModel {
    pub fn new(mesh: Mesh, skin: Asset<Texture>) -> Self {
        Self {
            mesh: Asset::Ready(mesh),
            skin,
            pose: ViewPose::default(),
        }
    }

    /// Screen-space anchor and size multiplier for a `w × h` target.
    pub fn anchor(&self, w: usize, h: usize) -> (Vec2, f32) {
        let sx = (w as f32 / REF_W).max(MIN_SCALE);
        let sy = (h as f32 / REF_H).max(MIN_SCALE);
        let size = sx.min(sy).max(MIN_SCALE);
        let center = vec2(
            w as f32 - self.pose.offset.x * sx,
            h as f32 - self.pose.offset.y * sy,
        );
        (center, size)
    }

    /// Face colour: skin at the centroid UV (V flipped), or flat grey.
    fn face_color(&self, mesh: &Mesh, face: &MeshFace) -> Rgba {
        let Some(idx) = face.uvs else {
            return UNTEXTURED;
        };
        let Some(tex) = self.skin.ready() else {
            return UNTEXTURED;
        };
        let uv = |i: u32| mesh.uvs.get(i as usize).copied().unwrap_or(vec2(0.5, 0.5));
        let c = (uv(idx[0]) + uv(idx[1]) + uv(idx[2])) / 3.0;
        tex.sample_wrapped(c.x, 1.0 - (c.y - c.y.floor()))
    }

    pub fn draw(&self, fb: &mut FrameBuffer) {
        let (center, size) = self.anchor(fb.width, fb.height);
        let Some(mesh) = self.mesh.ready() else {
            draw_placeholder(fb, center);
            return;
        };

        let rot = self.pose.rotation_matrix();
        let scale = self.pose.scale * (1.0 - self.pose.offset.z / 200.0) * size;
        let depth_shift = self.pose.offset.z / 100.0;
        let projected: Vec<Vec3> = mesh
            .vertices
            .iter()
            .map(|&v| {
                let r = rot * v;
                vec3(center.x + r.x * scale, center.y - r.y * scale, r.z + depth_shift)
            })
            .collect();

        let mut faces: Vec<ProjectedFace> = mesh
            .faces
            .iter()
            .filter_map(|f| {
                let p = f.verts.map(|i| projected.get(i as usize).copied());
                let [Some(p0), Some(p1), Some(p2)] = p else {
                    return None;
                };
                let a = (p1 - p0).truncate();
                let b = (p2 - p0).truncate();
                let compact = a.perp_dot(b).abs() / (a.length() * b.length() + 0.001);
                let light = (0.5 + 0.5 * compact).clamp(MIN_SCALE, 1.0);
                Some(ProjectedFace {
                    xs: [p0.x, p1.x, p2.x],
                    ys: [p0.y, p1.y, p2.y],
                    avg_z: (p0.z + p1.z + p2.z) / 3.0,
                    color: shade(self.face_color(mesh, f), light),
                })
            })
            .collect();

        faces.sort_by(|a, b| a.avg_z.total_cmp(&b.avg_z));
        for f in &faces {
            fill_triangle(fb, f.xs, f.ys, f.color);
        }
    }
}

/// Half-transparent grey box with a white outline, 100 × 60 around `c`.
fn draw_placeholder(fb: &mut FrameBuffer, c: Vec2) {
    let x0 = (c.x - 50.0).floor() as i32;
    let y0 = (c.y - 30.0).floor() as i32;
    let (x1, y1) = (x0 + 99, y0 + 59);
    let (w, h) = (fb.width as i32, fb.height as i32);

    for y in y0.max(0)..=y1.min(h - 1) {
        for x in x0.max(0)..=x1.min(w - 1) {
            let i = fb.index(x as usize, y as usize);
            let edge = x == x0 || x == x1 || y == y0 || y == y1;
            fb.color[i] = if edge {
                PLACEHOLDER_EDGE
            } else {
                blend(fb.color[i], PLACEHOLDER_FILL, 0.5)
            };
        }
    }
}
