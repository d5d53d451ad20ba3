use glam::{Vec2, Vec3, vec2};
use std::f32::consts::TAU;

use crate::config::{DRAW_DISTANCE, EYE_HEIGHT, FOCAL_LENGTH, HORIZON};

/// Player view-point over the heightfield.
///
/// * Only **yaw** is a rotation; pitch is faked by `horizon`, a constant
///   vertical screen shift.
/// * `pos.z` is the absolute eye height in world units.
/// * Yaw 0 looks down −Y; the forward axis is `(−sin yaw, −cos yaw)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec3,
    yaw: f32,
    pub horizon: f32,
    pub focal: f32,
    pub distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, EYE_HEIGHT), 0.0)
    }
}

impl Camera {
    /// Camera at `pos` facing `yaw`, default horizon/focal/draw distance.
    pub fn new(pos: Vec3, yaw: f32) -> Self {
        Self {
            pos,
            yaw: normalize_yaw(yaw),
            horizon: HORIZON,
            focal: FOCAL_LENGTH,
            distance: DRAW_DISTANCE,
        }
    }

    pub fn with_focal(mut self, focal: f32) -> Self {
        self.focal = focal;
        self
    }

    pub fn with_horizon(mut self, horizon: f32) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    /// Heading in radians, always within `[0, 2π)`.
    #[inline(always)]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = normalize_yaw(yaw);
    }

    /// Transform an X–Y point `p` into camera-local coords:
    ///  .x = lateral offset (+ right)
    ///  .y = ground-forward distance
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Vec2 {
        let dx = p.x - self.pos.x;
        let dy = p.y - self.pos.y;
        let (s, c) = self.yaw.sin_cos();
        vec2(dx * c - dy * s, -(dx * s + dy * c))
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks on the X-Y plane.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        let (s, c) = self.yaw.sin_cos();
        Vec2::new(-s, -c)
    }

    /// Unit vector pointing to the camera's right on the X-Y plane.
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        let (s, c) = self.yaw.sin_cos();
        Vec2::new(c, -s)
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move by `forward` units and `side` (strafe), preserving eye height.
    pub fn step(&mut self, forward: f32, side: f32) {
        let f = self.forward();
        let r = self.right();
        self.pos.x += f.x * forward + r.x * side;
        self.pos.y += f.y * forward + r.y * side;
    }

    /// Rotate around Z (positive = turn left).
    pub fn turn(&mut self, delta_yaw: f32) {
        self.yaw = normalize_yaw(self.yaw + delta_yaw);
    }

    /// Copy of this camera pushed `distance` units along its view direction.
    pub fn displaced(&self, distance: f32) -> Self {
        let mut out = *self;
        let f = self.forward();
        out.pos.x += f.x * distance;
        out.pos.y += f.y * distance;
        out
    }

    /// Pitch implied by the horizon's shift from `level` (500 px ≈ 90°),
    /// positive when looking up.
    #[inline]
    pub fn pitch_radians(&self, level: f32) -> f32 {
        ((self.horizon - level) * 90.0 / 500.0).to_radians()
    }

    /// Keep the horizon at the same relative row after a viewport resize.
    pub fn rescale_horizon(&mut self, old_height: usize, new_height: usize) {
        if old_height > 0 && old_height != new_height {
            self.horizon = (self.horizon * new_height as f32 / old_height as f32).round();
        }
    }
}

/// Wrap an angle into `[0, 2π)`. `rem_euclid` can round a tiny negative
/// angle up to exactly `TAU` in f32.
#[inline]
fn normalize_yaw(yaw: f32) -> f32 {
    let y = yaw.rem_euclid(TAU);
    if y >= TAU { 0.0 } else { y }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
