//! Procedural height + colour maps for offline asset generation.
//!
//! Pure functions of `(size, seed)`: large ridges, mid-scale variation and
//! fine roughness are summed into a height in `[0, 1]`; colour blends a warm
//! plains palette into a grey mountain palette by elevation and slope.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::renderer::{Rgba, rgb};
use crate::world::heightfield::{Heightfield, HeightfieldError};

const BASE_FREQ: f64 = 1.0 / 1024.0;

type Rgb = [f32; 3];

const PLAINS: [Rgb; 5] = [
    [0.20, 0.13, 0.07], // dark brown
    [0.37, 0.22, 0.11],
    [0.45, 0.30, 0.18],
    [0.55, 0.35, 0.20],
    [0.66, 0.44, 0.30], // sandy
];

const MOUNTAIN: [Rgb; 5] = [
    [0.15, 0.15, 0.14], // dark grey earth
    [0.30, 0.28, 0.26],
    [0.40, 0.38, 0.36],
    [0.52, 0.50, 0.48],
    [0.66, 0.64, 0.61], // scree
];

fn fbm(seed: u32, freq: f64, octaves: usize, persistence: f64) -> Fbm<Perlin> {
    Fbm::<Perlin>::new(seed)
        .set_octaves(octaves)
        .set_frequency(freq)
        .set_lacunarity(2.0)
        .set_persistence(persistence)
}

#[inline]
fn smoothstep(a: f32, b: f32, x: f32) -> f32 {
    let t = ((x - a) / (b - a)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp3(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn sample_palette(palette: &[Rgb], t: f32) -> Rgb {
    let n = palette.len();
    let scaled = t.clamp(0.0, 1.0) * (n - 1) as f32;
    let i = (scaled as usize).min(n - 1);
    let f = scaled - i as f32;
    lerp3(palette[i], palette[(i + 1).min(n - 1)], f)
}

#[inline]
fn to_byte(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Normalised heights, row-major, `size * size` entries in `[0, 1]`.
pub fn height_map(size: usize, seed: u32) -> Vec<f32> {
    let large = fbm(seed, BASE_FREQ * 0.5, 4, 0.6);
    let mid = fbm(seed, BASE_FREQ * 1.5, 5, 0.5);
    let fine = fbm(seed, BASE_FREQ * 6.0, 4, 0.45);

    let mut out = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let p = [x as f64, y as f64];
            let h = large.get(p) * 0.8 + mid.get(p) * 0.4 + fine.get(p) * 0.12;
            out.push(((h * 0.5 + 0.5) as f32).clamp(0.0, 1.0));
        }
    }
    out
}

/// Gradient magnitude by central differences, clamped at the borders.
fn slope_at(heights: &[f32], size: usize, x: usize, y: usize) -> f32 {
    let h = |xx: usize, yy: usize| heights[yy.min(size - 1) * size + xx.min(size - 1)];
    let dx = (h(x + 1, y) - h(x.saturating_sub(1), y)) * 0.5;
    let dy = (h(x, y + 1) - h(x, y.saturating_sub(1))) * 0.5;
    (dx * dx + dy * dy).sqrt()
}

/// Colour map for `heights` (as produced by [`height_map`]).
pub fn color_map(heights: &[f32], size: usize, seed: u32) -> Vec<Rgba> {
    let micro = fbm(seed ^ 0xA5A5_A5A5, 8.0 / size as f64, 3, 0.5);
    let bright = fbm(seed ^ 0x5A5A_5A5A, 16.0 / size as f64, 2, 0.6);

    let mut out = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let h = heights[y * size + x];
            let p = [x as f64, y as f64];

            let elev = smoothstep(0.33, 0.72, h);
            let m = (micro.get(p) * 0.5 + 0.5) as f32;
            let slope = (slope_at(heights, size, x, y) * 6.0).clamp(0.0, 1.0);

            let t = (m * 0.9 + h * 0.1).clamp(0.0, 1.0);
            let plains = sample_palette(&PLAINS, t);
            let rocky = lerp3(plains, sample_palette(&MOUNTAIN, t), slope * 0.9);
            let blended = lerp3(plains, rocky, elev);

            let b = 0.95 + bright.get([p[0] + 10.0, p[1] + 10.0]) as f32 * 0.25;
            let damp = smoothstep(0.0, 0.28, 0.28 - h) * 0.08;
            let c = blended.map(|ch| (ch * b + h * 0.02 - damp).clamp(0.0, 1.0));

            out.push(rgb(to_byte(c[0]), to_byte(c[1]), to_byte(c[2])));
        }
    }
    out
}

/// Ready-to-render heightfield (heights scaled to 0..255).
pub fn generate(size: usize, seed: u32) -> Result<Heightfield, HeightfieldError> {
    let heights = height_map(size, seed);
    let color = color_map(&heights, size, seed);
    let altitude = heights.iter().map(|&h| to_byte(h)).collect();
    Heightfield::from_parts(size, altitude, color)
}
