//! Rendering abstraction layer.
//!
//! *Every pass draws into an explicit [`FrameBuffer`] through an explicit
//! [`Camera`].* Nothing is global: a secondary view (the scope) just builds
//! its own camera and buffer and runs the same passes.
//!
//! Frame order is fixed:
//! clear → terrain → solids → sprites → overlays → present.
//!
//! * Terrain is the primary depth writer.
//! * Solids depth-test and write depth.
//! * Sprites depth-test but never write depth; they are sorted instead.

use bitflags::bitflags;

use crate::world::{Camera, Heightfield, SolidBox, SpriteItem, TextureBank};

mod framebuffer;
pub mod overlay;
mod projection;
pub mod software;

pub use framebuffer::FrameBuffer;
pub use projection::{Projector, ScreenPoint};
pub use software::Software;

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/*──────────────────────── colour helpers ─────────────────────────────*/

#[inline(always)]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[inline(always)]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[inline(always)]
pub const fn alpha(c: Rgba) -> u8 {
    (c >> 24) as u8
}

/// Scale the colour channels by `k` (truncating), force opaque alpha.
#[inline(always)]
pub fn shade(c: Rgba, k: f32) -> Rgba {
    let r = (((c >> 16) & 0xFF) as f32 * k) as u8;
    let g = (((c >> 8) & 0xFF) as f32 * k) as u8;
    let b = ((c & 0xFF) as f32 * k) as u8;
    rgb(r, g, b)
}

/// Mix `src` over `dst` with coverage `a` in `[0, 1]`.
#[inline(always)]
pub fn blend(dst: Rgba, src: Rgba, a: f32) -> Rgba {
    let mix = |shift: u32| {
        let d = ((dst >> shift) & 0xFF) as f32;
        let s = ((src >> shift) & 0xFF) as f32;
        (d + (s - d) * a).round() as u8
    };
    rgb(mix(16), mix(8), mix(0))
}

/*──────────────────────── scene + passes ─────────────────────────────*/

bitflags! {
    /// Which depth-buffered passes a scene render runs.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Passes: u8 {
        const TERRAIN = 0b001;
        const SOLIDS  = 0b010;
        const SPRITES = 0b100;
        const ALL     = 0b111;
    }
}

impl Default for Passes {
    fn default() -> Self {
        Passes::ALL
    }
}

/// Everything one scene render reads. Borrowed; never mutated.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub heightfield: &'a Heightfield,
    pub solids: &'a [SolidBox],
    /// Render list owned by gameplay code.
    pub items: &'a [SpriteItem],
    /// Caller-supplied extras (remote-player stand-ins, …).
    pub extra_items: &'a [SpriteItem],
    pub bank: &'a TextureBank,
    pub passes: Passes,
}

impl<'a> Scene<'a> {
    pub fn new(heightfield: &'a Heightfield, bank: &'a TextureBank) -> Self {
        Self {
            heightfield,
            solids: &[],
            items: &[],
            extra_items: &[],
            bank,
            passes: Passes::ALL,
        }
    }
}

/// A back-end that can draw every depth-buffered pass into a target.
pub trait Renderer {
    /// Resize `target` if needed, clear colour to background and depth to +∞.
    fn begin_frame(&mut self, target: &mut FrameBuffer, width: usize, height: usize);

    /// Column-march the heightfield; primary depth writer.
    fn draw_terrain(&mut self, target: &mut FrameBuffer, camera: &Camera, hf: &Heightfield);

    /// Rasterise the solid boxes with per-pixel depth test.
    fn draw_solids(
        &mut self,
        target: &mut FrameBuffer,
        camera: &Camera,
        solids: &[SolidBox],
        bank: &TextureBank,
    );

    /// Composite the sprites back-to-front against the depth buffer.
    fn draw_sprites(
        &mut self,
        target: &mut FrameBuffer,
        camera: &Camera,
        items: &[SpriteItem],
        extra: &[SpriteItem],
        bank: &TextureBank,
    );

    /// Finish the frame and **loan** the finished buffer to `submit`.
    fn end_frame<F>(&mut self, target: &FrameBuffer, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl running the fixed pass order.
pub trait RendererExt: Renderer {
    /// Clear `target` at its current size and run the scene's passes.
    fn draw_scene(&mut self, target: &mut FrameBuffer, camera: &Camera, scene: &Scene) {
        let (w, h) = (target.width, target.height);
        self.begin_frame(target, w, h);
        if scene.passes.contains(Passes::TERRAIN) {
            self.draw_terrain(target, camera, scene.heightfield);
        }
        if scene.passes.contains(Passes::SOLIDS) {
            self.draw_solids(target, camera, scene.solids, scene.bank);
        }
        if scene.passes.contains(Passes::SPRITES) {
            self.draw_sprites(target, camera, scene.items, scene.extra_items, scene.bank);
        }
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_scales_channels() {
        assert_eq!(shade(rgb(200, 100, 50), 0.5), rgb(100, 50, 25));
        assert_eq!(shade(rgba(10, 10, 10, 0), 1.0), rgb(10, 10, 10));
    }

    #[test]
    fn blend_endpoints() {
        let a = rgb(0, 0, 0);
        let b = rgb(255, 128, 2);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
    }
}
