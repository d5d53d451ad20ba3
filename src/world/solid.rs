use glam::{Vec2, Vec3, vec3};

use crate::world::texture::TextureId;

/// One quad of a solid box, wound so that `verts[0..4]` map to UV
/// (0,1), (1,1), (1,0), (0,0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub verts: [Vec3; 4],
    pub center: Vec3,
    pub normal: Vec3,
}

/// Axis-aligned textured box standing on the terrain.
///
/// `base_z` is the height of its floor; [`World::place_solid`] seats it on
/// the flattened terrain under its footprint.
///
/// [`World::place_solid`]: crate::world::World::place_solid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidBox {
    pub center: Vec2,
    pub half: Vec3,
    pub base_z: f32,
    pub tex: TextureId,
}

impl SolidBox {
    /// Cube of edge `size` centred on `center`.
    pub fn cube(center: Vec2, size: f32, tex: TextureId) -> Self {
        Self {
            center,
            half: Vec3::splat(size * 0.5),
            base_z: 0.0,
            tex,
        }
    }

    #[inline]
    pub fn top_z(&self) -> f32 {
        self.base_z + self.half.z * 2.0
    }

    /// Largest half-extent; used for proximity culling.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.half.max_element()
    }

    /// True if the ground point lies within the box's footprint (inclusive).
    pub fn covers(&self, x: f32, y: f32) -> bool {
        (x - self.center.x).abs() <= self.half.x && (y - self.center.y).abs() <= self.half.y
    }

    /// Integer cell rectangle under the box, inclusive on both ends.
    pub fn footprint(&self) -> (i32, i32, i32, i32) {
        (
            (self.center.x - self.half.x).floor() as i32,
            (self.center.x + self.half.x).ceil() as i32,
            (self.center.y - self.half.y).floor() as i32,
            (self.center.y + self.half.y).ceil() as i32,
        )
    }

    /// The 8 corners: bottom ring 0..4 then top ring 4..8, each ring
    /// (−x,−y), (+x,−y), (+x,+y), (−x,+y).
    pub fn corners(&self) -> [Vec3; 8] {
        let (cx, cy) = (self.center.x, self.center.y);
        let (hx, hy) = (self.half.x, self.half.y);
        let (b, t) = (self.base_z, self.top_z());
        [
            vec3(cx - hx, cy - hy, b),
            vec3(cx + hx, cy - hy, b),
            vec3(cx + hx, cy + hy, b),
            vec3(cx - hx, cy + hy, b),
            vec3(cx - hx, cy - hy, t),
            vec3(cx + hx, cy - hy, t),
            vec3(cx + hx, cy + hy, t),
            vec3(cx - hx, cy + hy, t),
        ]
    }

    /// Six outward-facing quads with their centres and normals.
    pub fn faces(&self) -> [Face; 6] {
        let v = self.corners();
        let (cx, cy) = (self.center.x, self.center.y);
        let (hx, hy) = (self.half.x, self.half.y);
        let mid_z = self.base_z + self.half.z;

        let face = |verts: [Vec3; 4], center: Vec3, normal: Vec3| Face {
            verts,
            center,
            normal,
        };
        [
            face([v[0], v[1], v[5], v[4]], vec3(cx, cy - hy, mid_z), Vec3::NEG_Y),
            face([v[2], v[3], v[7], v[6]], vec3(cx, cy + hy, mid_z), Vec3::Y),
            face([v[3], v[0], v[4], v[7]], vec3(cx - hx, cy, mid_z), Vec3::NEG_X),
            face([v[1], v[2], v[6], v[5]], vec3(cx + hx, cy, mid_z), Vec3::X),
            face([v[4], v[5], v[6], v[7]], vec3(cx, cy, self.top_z()), Vec3::Z),
            face([v[3], v[2], v[1], v[0]], vec3(cx, cy, self.base_z), Vec3::NEG_Z),
        ]
    }
}
