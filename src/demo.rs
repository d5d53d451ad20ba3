//! Stock scene shared by the viewer, the snapshot binary and the benches:
//! a generated (or loaded) heightfield, two crates, scattered trees.

use std::path::PathBuf;

use glam::{Vec3, vec2};
use log::{info, warn};

use crate::{
    assets::{self, AssetError},
    renderer::{Rgba, rgb, rgba},
    world::{
        Camera, SolidBox, SpriteItem, SpriteKind, Texture, TextureBank, TextureId, World,
        is_greenish, scatter, terrain_gen,
    },
};

const CLEAR: Rgba = rgba(0, 0, 0, 0);

/// Where the terrain comes from.
#[derive(Clone, Debug)]
pub enum TerrainSource {
    Generated { size: usize, seed: u32 },
    Files { color: PathBuf, height: PathBuf },
}

impl Default for TerrainSource {
    fn default() -> Self {
        TerrainSource::Generated { size: 1024, seed: 1 }
    }
}

/// Everything a frame needs that is not per-frame state.
pub struct Demo {
    pub world: World,
    pub bank: TextureBank,
    pub items: Vec<SpriteItem>,
    pub bullet_tex: TextureId,
}

impl Demo {
    pub fn build(source: &TerrainSource) -> Result<Self, AssetError> {
        let heightfield = match source {
            TerrainSource::Generated { size, seed } => terrain_gen::generate(*size, *seed)?,
            TerrainSource::Files { color, height } => assets::load_heightfield(color, height)?,
        };
        let mut world = World::new(heightfield);

        let mut bank = TextureBank::default_with_checker();
        let crate_tex = bank.insert("CRATE", crate_texture(32))?;
        let tree_tex = bank.insert("TREE", tree_texture(16, 32))?;
        let bullet_tex = bank.insert("BULLET", bullet_texture(8))?;

        world.place_solid(SolidBox::cube(vec2(530.0, 420.0), 40.0, crate_tex));
        world.place_solid(SolidBox::cube(vec2(580.0, 380.0), 24.0, crate_tex));

        let items = scatter(
            &world.heightfield,
            SpriteKind::Foliage,
            tree_tex,
            16,
            0.25,
            7,
            is_greenish,
        );
        if items.is_empty() {
            warn!("no cell passed the foliage colour test; world has no trees");
        }
        info!("demo scene: {} solids, {} trees", world.solids.len(), items.len());

        Ok(Self {
            world,
            bank,
            items,
            bullet_tex,
        })
    }

    /// Spawn camera standing at the map centre, looking down −Y.
    pub fn spawn_camera(&self) -> Camera {
        let c = self.world.heightfield.size() as f32 * 0.5;
        let z = self.world.ground_height(c, c);
        Camera::new(Vec3::new(c, c, z), 0.0)
    }

    /// A bullet leaving `camera` along its view direction, climbing or
    /// dropping with the horizon's shift from `level_horizon`.
    pub fn fire(&self, camera: &Camera, speed: f32, level_horizon: f32) -> SpriteItem {
        let f = camera.forward();
        let (rise, run) = camera.pitch_radians(level_horizon).sin_cos();
        let mut b = SpriteItem::new(SpriteKind::Bullet, camera.pos - Vec3::Z * 4.0, self.bullet_tex);
        b.vel = Vec3::new(f.x * run, f.y * run, rise) * speed;
        b
    }
}

/// Planked wooden crate face with a dark frame.
pub fn crate_texture(n: usize) -> Texture {
    let mut pixels = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let frame = x < 2 || y < 2 || x >= n - 2 || y >= n - 2;
            let seam = y % 8 == 0;
            let grain = ((x * 7 + y * 3) % 5) as u8 * 6;
            pixels.push(if frame {
                rgb(70, 45, 20)
            } else if seam {
                rgb(100, 65, 30)
            } else {
                rgb(150 + grain, 105 + grain, 55)
            });
        }
    }
    Texture {
        name: "CRATE".into(),
        w: n,
        h: n,
        pixels,
    }
}

/// Conifer silhouette on a transparent background.
pub fn tree_texture(w: usize, h: usize) -> Texture {
    let trunk_top = h * 3 / 4;
    let mut pixels = vec![CLEAR; w * h];
    for y in 0..h {
        for x in 0..w {
            let dx = (x as f32 + 0.5 - w as f32 * 0.5).abs();
            let c = if y < trunk_top {
                let half = (y as f32 + 1.0) / trunk_top as f32 * w as f32 * 0.5;
                (dx <= half).then(|| rgb(20, 90 + (y % 4) as u8 * 10, 30))
            } else {
                (dx <= 1.5).then(|| rgb(80, 50, 20))
            };
            if let Some(c) = c {
                pixels[y * w + x] = c;
            }
        }
    }
    Texture {
        name: "TREE".into(),
        w,
        h,
        pixels,
    }
}

/// Bright round tracer.
pub fn bullet_texture(n: usize) -> Texture {
    let r = n as f32 * 0.5;
    let pixels = (0..n * n)
        .map(|i| {
            let (x, y) = ((i % n) as f32 + 0.5, (i / n) as f32 + 0.5);
            if (x - r).hypot(y - r) <= r {
                rgb(255, 230, 90)
            } else {
                CLEAR
            }
        })
        .collect();
    Texture {
        name: "BULLET".into(),
        w: n,
        h: n,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::alpha;

    #[test]
    fn small_generated_demo_builds() {
        let demo = Demo::build(&TerrainSource::Generated { size: 128, seed: 3 }).unwrap();
        assert_eq!(demo.world.solids.len(), 2);
        assert_eq!(demo.bank.len(), 4);
        let cam = demo.spawn_camera();
        assert!(cam.pos.z >= demo.world.raw_height(64.0, 64.0) + 30.0);
    }

    #[test]
    fn sprite_textures_have_cutouts() {
        let tree = tree_texture(16, 32);
        assert_eq!(alpha(tree.texel(0, 0)), 0);
        assert_eq!(alpha(tree.texel(8, 20)), 0xFF);
        let b = bullet_texture(8);
        assert_eq!(alpha(b.texel(0, 0)), 0);
        assert_eq!(alpha(b.texel(4, 4)), 0xFF);
    }

    #[test]
    fn bullets_follow_the_view_pitch() {
        let demo = Demo::build(&TerrainSource::Generated { size: 64, seed: 1 }).unwrap();
        let cam = demo.spawn_camera();

        let level = demo.fire(&cam, 10.0, cam.horizon);
        assert!(level.vel.z.abs() < 1e-6);
        assert!((level.vel.length() - 10.0).abs() < 1e-4);

        let up = demo.fire(&cam.with_horizon(cam.horizon + 100.0), 10.0, cam.horizon);
        assert!(up.vel.z > 0.0);
        assert!((up.vel.length() - 10.0).abs() < 1e-4);
    }
}
