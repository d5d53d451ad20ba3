//! 2D overlay primitives drawn straight into the colour buffer.
//!
//! None of these read or write depth. Coverage is decided per pixel centre;
//! there is no anti-aliasing.

use glam::{Vec2, vec2};

use crate::renderer::{FrameBuffer, Rgba, blend, rgb};

pub const BLACK: Rgba = rgb(0, 0, 0);

#[inline(always)]
fn centre(x: usize, y: usize) -> Vec2 {
    vec2(x as f32 + 0.5, y as f32 + 0.5)
}

/// Pixel rows/columns touched by a disc of `radius` around `c`.
fn disc_bounds(fb: &FrameBuffer, c: Vec2, radius: f32) -> Option<(usize, usize, usize, usize)> {
    if fb.width == 0 || fb.height == 0 {
        return None;
    }
    let x0 = (c.x - radius).floor().max(0.0);
    let y0 = (c.y - radius).floor().max(0.0);
    let x1 = (c.x + radius).ceil().min(fb.width as f32 - 1.0);
    let y1 = (c.y + radius).ceil().min(fb.height as f32 - 1.0);
    if x0 > x1 || y0 > y1 {
        return None;
    }
    Some((x0 as usize, x1 as usize, y0 as usize, y1 as usize))
}

/// Nearest-neighbour copy of the square `src_origin .. src_origin + src_size`
/// of `src` onto the disc of `radius` around `c`, scaled so the square spans
/// `dest_size` pixels. Source texels outside `src` are skipped.
pub fn blit_circle(
    dst: &mut FrameBuffer,
    src: &FrameBuffer,
    src_origin: Vec2,
    src_size: f32,
    c: Vec2,
    radius: f32,
    dest_size: f32,
) {
    let Some((x0, x1, y0, y1)) = disc_bounds(dst, c, radius) else {
        return;
    };
    let k = src_size / dest_size;
    let dest_origin = c - Vec2::splat(dest_size * 0.5);
    let r2 = radius * radius;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = centre(x, y);
            if p.distance_squared(c) > r2 {
                continue;
            }
            let s = src_origin + (p - dest_origin) * k;
            if s.x < 0.0 || s.y < 0.0 {
                continue;
            }
            let (sx, sy) = (s.x as usize, s.y as usize);
            if sx >= src.width || sy >= src.height {
                continue;
            }
            let i = dst.index(x, y);
            dst.color[i] = src.pixel(sx, sy);
        }
    }
}

/// Radial darkening inside the disc: none up to `inner`, `max_alpha` black
/// at `outer`, linear in between. Nothing past `clip` is touched.
pub fn vignette(
    fb: &mut FrameBuffer,
    c: Vec2,
    inner: f32,
    outer: f32,
    clip: f32,
    max_alpha: f32,
) {
    let clip = clip.min(outer);
    let Some((x0, x1, y0, y1)) = disc_bounds(fb, c, clip) else {
        return;
    };
    let span = (outer - inner).max(f32::EPSILON);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = centre(x, y).distance(c);
            if d <= inner || d > clip {
                continue;
            }
            let a = (d - inner) / span * max_alpha;
            let i = fb.index(x, y);
            fb.color[i] = blend(fb.color[i], BLACK, a);
        }
    }
}

/// Solid disc.
pub fn disc(fb: &mut FrameBuffer, c: Vec2, radius: f32, color: Rgba) {
    let Some((x0, x1, y0, y1)) = disc_bounds(fb, c, radius) else {
        return;
    };
    let r2 = radius * radius;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if centre(x, y).distance_squared(c) <= r2 {
                let i = fb.index(x, y);
                fb.color[i] = color;
            }
        }
    }
}

/// Circle outline of `width` pixels centred on `radius`.
pub fn ring(fb: &mut FrameBuffer, c: Vec2, radius: f32, width: f32, color: Rgba) {
    let half = width * 0.5;
    let Some((x0, x1, y0, y1)) = disc_bounds(fb, c, radius + half) else {
        return;
    };
    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = centre(x, y).distance(c);
            if (d - radius).abs() <= half {
                let i = fb.index(x, y);
                fb.color[i] = color;
            }
        }
    }
}

/// One-pixel horizontal span from `x0` to `x1` on row `y`.
pub fn hline(fb: &mut FrameBuffer, x0: f32, x1: f32, y: f32, color: Rgba) {
    let row = y.floor();
    if row < 0.0 || row >= fb.height as f32 {
        return;
    }
    let a = x0.min(x1).round().max(0.0) as usize;
    let b = x0.max(x1).round().min(fb.width as f32) as usize;
    let row = row as usize;
    for x in a..b {
        let i = fb.index(x, row);
        fb.color[i] = color;
    }
}

/// One-pixel vertical span from `y0` to `y1` on column `x`.
pub fn vline(fb: &mut FrameBuffer, x: f32, y0: f32, y1: f32, color: Rgba) {
    let col = x.floor();
    if col < 0.0 || col >= fb.width as f32 {
        return;
    }
    let a = y0.min(y1).round().max(0.0) as usize;
    let b = y0.max(y1).round().min(fb.height as f32) as usize;
    let col = col as usize;
    for y in a..b {
        let i = fb.index(col, y);
        fb.color[i] = color;
    }
}
