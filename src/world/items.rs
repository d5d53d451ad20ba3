use glam::Vec3;

use crate::renderer::Rgba;
use crate::world::heightfield::Heightfield;
use crate::world::texture::TextureId;

/// Where a sprite's projected point sits on the blitted rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Point is the bottom-centre (things standing on the ground).
    Bottom,
    /// Point is the centre (things in flight).
    Center,
}

/// What a render-list entry is; drives its size and anchoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Bullet,
    Pickup,
    Foliage,
    RemoteActor,
}

/// Per-kind multipliers on the base sprite size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteRule {
    pub scale_x: f32,
    pub scale_y: f32,
    pub anchor: Anchor,
}

impl SpriteKind {
    /// `bullet_size` is a tunable from the render config.
    #[inline]
    pub fn rule(self, bullet_size: f32) -> SpriteRule {
        use Anchor::*;
        let (scale_x, scale_y, anchor) = match self {
            SpriteKind::Bullet => (bullet_size, bullet_size, Center),
            SpriteKind::Pickup => (1.0, 1.0, Bottom),
            SpriteKind::Foliage => (6.0, 12.0, Bottom),
            SpriteKind::RemoteActor => (2.0, 6.5, Bottom),
        };
        SpriteRule {
            scale_x,
            scale_y,
            anchor,
        }
    }
}

/// Sub-rectangle of a sprite sheet, in texels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SrcRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

/// One entry of the render list owned by gameplay code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteItem {
    pub pos: Vec3,
    pub vel: Vec3,
    pub kind: SpriteKind,
    pub tex: TextureId,
    /// Sheet frame to sample; `None` samples the whole image.
    pub frame: Option<SrcRect>,
}

impl SpriteItem {
    pub fn new(kind: SpriteKind, pos: Vec3, tex: TextureId) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            kind,
            tex,
            frame: None,
        }
    }

    pub fn with_frame(mut self, frame: SrcRect) -> Self {
        self.frame = Some(frame);
        self
    }
}

/*──────────────────────── scattering ─────────────────────────────────*/

#[inline]
fn hash_u32(mut v: u32) -> u32 {
    v ^= v >> 16;
    v = v.wrapping_mul(0x7feb_352d);
    v ^= v >> 15;
    v = v.wrapping_mul(0x846c_a68b);
    v ^= v >> 16;
    v
}

#[inline]
fn cell_roll(seed: u32, x: usize, y: usize) -> f32 {
    let a = (x as u32).wrapping_mul(0x9e37_79b1);
    let b = (y as u32).wrapping_mul(0x85eb_ca6b);
    hash_u32(seed ^ a ^ b) as f32 / u32::MAX as f32
}

/// Scatter `kind` sprites over the heightfield.
///
/// Every `step`-th cell whose colour passes `accept` spawns one item with
/// probability `chance`, standing on the raw terrain height. The roll is a
/// hash of `(seed, x, y)`, so the same inputs always give the same list.
pub fn scatter(
    hf: &Heightfield,
    kind: SpriteKind,
    tex: TextureId,
    step: usize,
    chance: f32,
    seed: u32,
    accept: impl Fn(Rgba) -> bool,
) -> Vec<SpriteItem> {
    let step = step.max(1);
    let mut out = Vec::new();
    for y in (0..hf.size()).step_by(step) {
        for x in (0..hf.size()).step_by(step) {
            let (h, col) = hf.cell(hf.offset_i(x as i32, y as i32));
            if !accept(col & 0x00FF_FFFF) {
                continue;
            }
            if cell_roll(seed, x, y) < chance {
                out.push(SpriteItem::new(
                    kind,
                    Vec3::new(x as f32, y as f32, h as f32),
                    tex,
                ));
            }
        }
    }
    out
}

/// The stock "green enough for a tree" predicate.
pub fn is_greenish(col: Rgba) -> bool {
    (col & 0x00_FF_00) > 0x00_40_00
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_centre_everything_else_stands() {
        for kind in [SpriteKind::Pickup, SpriteKind::Foliage, SpriteKind::RemoteActor] {
            assert_eq!(kind.rule(0.75).anchor, Anchor::Bottom);
        }
        let b = SpriteKind::Bullet.rule(0.75);
        assert_eq!(b.anchor, Anchor::Center);
        assert_eq!((b.scale_x, b.scale_y), (0.75, 0.75));
        assert_eq!(SpriteKind::Foliage.rule(1.0).scale_y, 12.0);
    }

    #[test]
    fn scatter_is_deterministic_and_filtered() {
        let green = Heightfield::flat(64, 7, 0xFF_00_80_00).unwrap();
        let a = scatter(&green, SpriteKind::Foliage, 1, 4, 0.5, 42, is_greenish);
        let b = scatter(&green, SpriteKind::Foliage, 1, 4, 0.5, 42, is_greenish);
        assert_eq!(a, b);
        assert!(!a.is_empty() && a.len() < 16 * 16);
        assert!(a.iter().all(|it| it.pos.z == 7.0));

        let red = Heightfield::flat(64, 7, 0xFF_80_00_00).unwrap();
        assert!(scatter(&red, SpriteKind::Foliage, 1, 4, 1.0, 42, is_greenish).is_empty());
    }
}
