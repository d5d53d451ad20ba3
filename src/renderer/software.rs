//! ---------------------------------------------------------------------------
//! Software (CPU) heightfield renderer
//!
//! * Fills a [`FrameBuffer`] in **0xAARRGGBB** format plus a float depth
//!   buffer holding forward distances.
//! * Terrain is column-marched front-to-back with a per-column occlusion
//!   cursor; solids and sprites depth-test against what it leaves behind.
//! * Holds only tuning and per-frame scratch; every pass receives its
//!   target and camera explicitly.
//! ---------------------------------------------------------------------------

use crate::{
    config::RenderConfig,
    renderer::{FrameBuffer, Renderer, Rgba},
    world::{Camera, Heightfield, SolidBox, SpriteItem, TextureBank},
};

pub mod raster;
mod solids;
mod sprites;
mod terrain;
pub mod viewmodel;

pub use viewmodel::{Mesh, MeshFace, ViewModel, ViewPose};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Voxel-space renderer.
#[derive(Default)]
pub struct Software {
    pub config: RenderConfig,
    /* sprite sort scratch survives across frames */
    sprite_order: Vec<sprites::VisSprite>,
}

impl Software {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            sprite_order: Vec::new(),
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, target: &mut FrameBuffer, w: usize, h: usize) {
        // (re)allocate if resolution changed
        target.resize(w, h);
        target.clear(self.config.background);
    }

    fn draw_terrain(&mut self, target: &mut FrameBuffer, camera: &Camera, hf: &Heightfield) {
        terrain::march(&self.config.march, target, camera, hf);
    }

    fn draw_solids(
        &mut self,
        target: &mut FrameBuffer,
        camera: &Camera,
        solids: &[SolidBox],
        bank: &TextureBank,
    ) {
        for solid in solids {
            solids::draw_solid(&self.config, target, camera, solid, bank);
        }
    }

    fn draw_sprites(
        &mut self,
        target: &mut FrameBuffer,
        camera: &Camera,
        items: &[SpriteItem],
        extra: &[SpriteItem],
        bank: &TextureBank,
    ) {
        sprites::collect(&self.config, camera, target.width, items, extra, &mut self.sprite_order);
        for vis in &self.sprite_order {
            sprites::blit(&self.config, target, vis, bank);
        }
    }

    fn end_frame<F>(&mut self, target: &FrameBuffer, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&target.color, target.width, target.height);
    }
}
