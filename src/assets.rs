//! Decoded-image adapters.
//!
//! The core never decodes files; these helpers turn PNG/JPEG images into
//! [`Texture`]s and [`Heightfield`]s for the binaries and tools.

use std::path::Path;

use image::{GrayImage, RgbaImage};
use log::info;
use thiserror::Error;

use crate::{
    renderer::{Rgba, rgba},
    world::{Heightfield, HeightfieldError, Texture, TextureError},
};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Heightfield(#[from] HeightfieldError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error("height map is {hw}x{hh} but colour map is {cw}x{ch}")]
    MapMismatch {
        hw: u32,
        hh: u32,
        cw: u32,
        ch: u32,
    },
}

pub type Result<T> = std::result::Result<T, AssetError>;

/// RGBA8 image → ARGB texel array.
pub fn pixels_from_rgba(img: &RgbaImage) -> Vec<Rgba> {
    img.pixels()
        .map(|p| rgba(p.0[0], p.0[1], p.0[2], p.0[3]))
        .collect()
}

/// ARGB texel array → RGBA8 image.
pub fn rgba_from_pixels(w: u32, h: u32, pixels: &[Rgba]) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        let c = pixels[(y * w + x) as usize];
        image::Rgba([(c >> 16) as u8, (c >> 8) as u8, c as u8, (c >> 24) as u8])
    })
}

pub fn texture_from_image(name: &str, img: &RgbaImage) -> Result<Texture> {
    let tex = Texture::new(name, img.width() as usize, img.height() as usize, pixels_from_rgba(img))?;
    Ok(tex)
}

/// Decode an image file into a texture named after its file stem.
pub fn load_texture(path: impl AsRef<Path>) -> Result<Texture> {
    let path = path.as_ref();
    let img = image::open(path)?.to_rgba8();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tex = texture_from_image(&name, &img)?;
    info!("texture `{}` loaded ({}x{})", tex.name, tex.w, tex.h);
    Ok(tex)
}

/// Pair a colour image with a greyscale height image of the same size.
pub fn heightfield_from_images(color: &RgbaImage, height: &GrayImage) -> Result<Heightfield> {
    if color.dimensions() != height.dimensions() {
        return Err(AssetError::MapMismatch {
            hw: height.width(),
            hh: height.height(),
            cw: color.width(),
            ch: color.height(),
        });
    }
    let size = color.width() as usize;
    let altitude = height.as_raw().clone();
    let col = color
        .pixels()
        .map(|p| rgba(p.0[0], p.0[1], p.0[2], 0xFF))
        .collect();
    Ok(Heightfield::from_parts(size, altitude, col)?)
}

/// Decode a colour map and a height map (red channel / luma) into a world.
pub fn load_heightfield(
    color_path: impl AsRef<Path>,
    height_path: impl AsRef<Path>,
) -> Result<Heightfield> {
    let color = image::open(color_path.as_ref())?.to_rgba8();
    let height = image::open(height_path.as_ref())?.to_luma8();
    let hf = heightfield_from_images(&color, &height)?;
    info!(
        "heightfield loaded: {0}x{0} from {1}",
        hf.size(),
        color_path.as_ref().display()
    );
    Ok(hf)
}

/// Normalised heights `[0, 1]` → 8-bit greyscale image.
pub fn height_image(size: u32, heights: &[f32]) -> GrayImage {
    GrayImage::from_fn(size, size, |x, y| {
        let h = heights[(y * size + x) as usize];
        image::Luma([(h.clamp(0.0, 1.0) * 255.0).round() as u8])
    })
}
