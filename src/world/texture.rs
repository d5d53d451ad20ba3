// Format-agnostic repository of textures decoded by the asset loader.
// The renderer and world logic interact through `TextureId` only.

use std::collections::HashMap;

use crate::config::FALLBACK_GREY;
use crate::renderer::{Rgba, alpha};

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// Something that is decoded elsewhere and may not have arrived yet.
///
/// Sampling code matches on the state; a `Pending` asset draws a flat
/// fallback instead of failing.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Asset<T> {
    #[default]
    Pending,
    Ready(T),
}

impl<T> Asset<T> {
    #[inline]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Asset::Ready(t) => Some(t),
            Asset::Pending => None,
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, Asset::Ready(_))
    }
}

impl Asset<Texture> {
    /// Wrapped nearest-texel sample, or the flat grey while pending.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        match self {
            Asset::Ready(tex) => tex.sample_wrapped(u, v),
            Asset::Pending => FALLBACK_GREY,
        }
    }
}

/// CPU-side storage: 32-bit **ARGB**  (0xAARRGGBB) in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

/// Convenience checkerboard 8×8 (dark/light grey).
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: Rgba = 0xFF_C0_C0_C0;
        const DARK: Rgba = 0xFF_40_40_40;
        let mut pix = vec![0; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pix[y * 8 + x] = if (x ^ y) & 1 == 0 { LIGHT } else { DARK };
            }
        }
        Texture {
            name: "CHECKER".to_string(),
            w: 8,
            h: 8,
            pixels: pix,
        }
    }
}

impl Texture {
    pub fn new<S: Into<String>>(
        name: S,
        w: usize,
        h: usize,
        pixels: Vec<Rgba>,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        if w == 0 || h == 0 || pixels.len() != w * h {
            return Err(TextureError::BadSize {
                name,
                w,
                h,
                len: pixels.len(),
            });
        }
        Ok(Self { name, w, h, pixels })
    }

    /// Single-colour texture, at least 1×1.
    pub fn solid<S: Into<String>>(name: S, w: usize, h: usize, color: Rgba) -> Self {
        let (w, h) = (w.max(1), h.max(1));
        Self {
            name: name.into(),
            w,
            h,
            pixels: vec![color; w * h],
        }
    }

    #[inline(always)]
    pub fn texel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.w + x]
    }

    /// Nearest texel at `(u, v)` after wrapping both into `[0, 1)`.
    #[inline]
    pub fn sample_wrapped(&self, u: f32, v: f32) -> Rgba {
        let u = u - u.floor();
        let v = v - v.floor();
        let tx = ((u * (self.w - 1) as f32) as usize).min(self.w - 1);
        let ty = ((v * (self.h - 1) as f32) as usize).min(self.h - 1);
        self.texel(tx, ty)
    }

    /// True if the texel passes a binary alpha cut-out.
    #[inline(always)]
    pub fn opaque(&self, x: usize, y: usize, threshold: u8) -> bool {
        alpha(self.texel(x, y)) >= threshold
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// Pixel array does not match the declared dimensions.
    #[error("texture `{name}` is {w}x{h} but carries {len} pixels")]
    BadSize {
        name: String,
        w: usize,
        h: usize,
        len: usize,
    },
}

/// A format-agnostic cache of textures.
///
/// * Does **not** know about PNG or JPEG; decoding lives in `crate::assets`.
/// * Stores exactly one slot per name; a slot starts `Pending` when reserved
///   ahead of decoding and becomes `Ready` once the pixels arrive.
/// * ID **0** is always the “missing” checkerboard.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Asset<Texture>>,
}

impl Default for TextureBank {
    fn default() -> Self {
        Self::default_with_checker()
    }
}

impl TextureBank {
    /// Create an empty bank whose slot 0 holds `missing_tex` under the fixed
    /// name `"MISSING"`.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![Asset::Ready(missing_tex)],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of slots (including the “missing” one).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    } // only checker

    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Fallback-safe query: unknown names resolve to the checkerboard id.
    pub fn id_or_missing(&self, name: &str) -> TextureId {
        self.id(name).unwrap_or(NO_TEXTURE)
    }

    /// Slot for `id`, with bounds-checking.
    pub fn asset(&self, id: TextureId) -> Result<&Asset<Texture>, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Slot for `id`; out-of-range ids resolve to the checkerboard.
    #[inline]
    pub fn asset_or_missing(&self, id: TextureId) -> &Asset<Texture> {
        self.data
            .get(id as usize)
            .unwrap_or(&self.data[NO_TEXTURE as usize])
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Reserve a `Pending` slot for a texture that is still decoding.
    pub fn reserve<S: Into<String>>(&mut self, name: S) -> Result<TextureId, TextureError> {
        self.push(name.into(), Asset::Pending)
    }

    /// Insert a decoded texture under `name`.
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        self.push(name.into(), Asset::Ready(tex))
    }

    /// Complete a slot previously handed out by [`reserve`](Self::reserve).
    pub fn fulfil(&mut self, id: TextureId, tex: Texture) -> Result<(), TextureError> {
        let slot = self
            .data
            .get_mut(id as usize)
            .ok_or(TextureError::BadId(id))?;
        *slot = Asset::Ready(tex);
        Ok(())
    }

    fn push(&mut self, name: String, slot: Asset<Texture>) -> Result<TextureId, TextureError> {
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = self.data.len() as TextureId;
        self.data.push(slot);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_tex(color: Rgba) -> Texture {
        Texture::solid("Dummy", 2, 2, color)
    }

    #[test]
    fn insert_and_lookup() {
        let mut bank = TextureBank::default_with_checker();
        let red = bank.insert("RED", dummy_tex(0xFF_FF_00_00)).unwrap();
        let blue = bank.insert("BLUE", dummy_tex(0xFF_00_00_FF)).unwrap();

        assert_ne!(red, NO_TEXTURE);
        assert_ne!(blue, red);
        assert_eq!(bank.id("RED"), Some(red));
        assert_eq!(bank.id("NOPE"), None);
        assert_eq!(bank.id_or_missing("NOPE"), NO_TEXTURE);

        assert_eq!(bank.asset(red).unwrap().sample(0.5, 0.5), 0xFF_FF_00_00);
        assert_eq!(bank.asset(blue).unwrap().sample(0.5, 0.5), 0xFF_00_00_FF);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut bank = TextureBank::default_with_checker();
        bank.insert("WOOD", dummy_tex(1)).unwrap();
        let err = bank.insert("WOOD", dummy_tex(2)).unwrap_err();
        assert_eq!(err, TextureError::Duplicate("WOOD".into()));
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn bad_id_guard() {
        let bank = TextureBank::default_with_checker();
        let bad = TextureId::MAX;
        assert_eq!(bank.asset(bad).unwrap_err(), TextureError::BadId(bad));
        assert!(bank.asset_or_missing(bad).is_ready());
    }

    #[test]
    fn pending_slot_samples_fallback_until_fulfilled() {
        let mut bank = TextureBank::default_with_checker();
        let id = bank.reserve("BOX").unwrap();
        assert_eq!(bank.asset(id).unwrap().sample(0.3, 0.3), FALLBACK_GREY);

        bank.fulfil(id, dummy_tex(0xFF_12_34_56)).unwrap();
        assert_eq!(bank.asset(id).unwrap().sample(0.3, 0.3), 0xFF_12_34_56);
    }

    #[test]
    fn sampling_wraps_uv() {
        let tex = Texture::new("Q", 2, 1, vec![0xFF_00_00_01, 0xFF_00_00_02]).unwrap();
        assert_eq!(tex.sample_wrapped(0.0, 0.0), tex.sample_wrapped(1.0, 0.0));
        assert_eq!(tex.sample_wrapped(-0.25, 3.5), tex.sample_wrapped(0.75, 0.5));
    }

    #[test]
    fn size_mismatch_rejected() {
        assert!(matches!(
            Texture::new("X", 2, 2, vec![0; 3]),
            Err(TextureError::BadSize { len: 3, .. })
        ));
    }

    #[test]
    fn zero_sized_solid_is_one_texel() {
        let tex = Texture::solid("Z", 0, 0, 0xFF_AB_CD_EF);
        assert_eq!((tex.w, tex.h), (1, 1));
        assert_eq!(tex.sample_wrapped(0.7, -0.2), 0xFF_AB_CD_EF);
    }
}
