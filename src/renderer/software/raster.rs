//! Edge-function triangle fill.
//!
//! Pixels are tested at their centres `(x + 0.5, y + 0.5)`; a pixel is
//! inside when all three edge values share the sign of the triangle's
//! signed area (zero counts as inside). Both windings are accepted.

use crate::{
    renderer::{FrameBuffer, Rgba, shade},
    world::{Asset, Texture},
};

/// Triangles with a smaller absolute signed area are skipped.
pub const MIN_AREA: f32 = 0.001;

/// Projected vertex with perspective-correct attributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenVertex {
    pub x: f32,
    pub y: f32,
    pub inv_z: f32,
    pub u: f32,
    pub v: f32,
}

#[inline(always)]
fn edge(ax: f32, ay: f32, bx: f32, by: f32, px: f32, py: f32) -> f32 {
    (px - ax) * (by - ay) - (py - ay) * (bx - ax)
}

/// Integer pixel bounds of the triangle clipped to the target.
fn bounds(xs: [f32; 3], ys: [f32; 3], w: usize, h: usize) -> Option<(usize, usize, usize, usize)> {
    if w == 0 || h == 0 {
        return None;
    }
    let min_x = xs[0].min(xs[1]).min(xs[2]).floor().max(0.0);
    let max_x = xs[0].max(xs[1]).max(xs[2]).ceil().min((w - 1) as f32);
    let min_y = ys[0].min(ys[1]).min(ys[2]).floor().max(0.0);
    let max_y = ys[0].max(ys[1]).max(ys[2]).ceil().min((h - 1) as f32);
    if min_x > max_x || min_y > max_y {
        return None;
    }
    Some((min_x as usize, max_x as usize, min_y as usize, max_y as usize))
}

/// Visit every covered pixel with its barycentric weights.
#[inline]
fn for_each_covered<F>(xs: [f32; 3], ys: [f32; 3], w: usize, h: usize, mut visit: F)
where
    F: FnMut(usize, usize, f32, f32, f32),
{
    let Some((x0, x1, y0, y1)) = bounds(xs, ys, w, h) else {
        return;
    };
    let area = edge(xs[0], ys[0], xs[1], ys[1], xs[2], ys[2]);
    if area.abs() < MIN_AREA {
        return;
    }
    let inv_area = 1.0 / area;

    for py in y0..=y1 {
        let pyc = py as f32 + 0.5;
        for px in x0..=x1 {
            let pxc = px as f32 + 0.5;
            let w0 = edge(xs[1], ys[1], xs[2], ys[2], pxc, pyc);
            let w1 = edge(xs[2], ys[2], xs[0], ys[0], pxc, pyc);
            let w2 = edge(xs[0], ys[0], xs[1], ys[1], pxc, pyc);

            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };
            if inside {
                visit(px, py, w0 * inv_area, w1 * inv_area, w2 * inv_area);
            }
        }
    }
}

/// Depth-tested, perspective-correct textured triangle.
///
/// Stored depth is `1 / interpolated(1/z) − depth_bias`, so a face drawn
/// over terrain at the same distance wins the tie.
pub fn draw_textured_triangle(
    fb: &mut FrameBuffer,
    tri: [ScreenVertex; 3],
    tex: &Asset<Texture>,
    light: f32,
    depth_bias: f32,
) {
    let [p0, p1, p2] = tri;
    let (u0, v0) = (p0.u * p0.inv_z, p0.v * p0.inv_z);
    let (u1, v1) = (p1.u * p1.inv_z, p1.v * p1.inv_z);
    let (u2, v2) = (p2.u * p2.inv_z, p2.v * p2.inv_z);

    let (w, h) = (fb.width, fb.height);
    for_each_covered(
        [p0.x, p1.x, p2.x],
        [p0.y, p1.y, p2.y],
        w,
        h,
        |x, y, b0, b1, b2| {
            let inv_z = b0 * p0.inv_z + b1 * p1.inv_z + b2 * p2.inv_z;
            let depth = 1.0 / inv_z - depth_bias;
            let i = fb.index(x, y);
            if depth < fb.depth[i] {
                let u = (b0 * u0 + b1 * u1 + b2 * u2) / inv_z;
                let v = (b0 * v0 + b1 * v1 + b2 * v2) / inv_z;
                fb.color[i] = shade(tex.sample(u, v), light);
                fb.depth[i] = depth;
            }
        },
    );
}

/// Flat-colour triangle with no depth test and no depth write.
pub fn fill_triangle(fb: &mut FrameBuffer, xs: [f32; 3], ys: [f32; 3], color: Rgba) {
    let (w, h) = (fb.width, fb.height);
    let color_buf = &mut fb.color;
    for_each_covered(xs, ys, w, h, |x, y, _, _, _| {
        color_buf[y * w + x] = color;
    });
}
