use glam::{Vec2, Vec3};

use crate::world::Camera;

/// Smallest forward distance [`Projector::project`] accepts.
pub const MIN_FORWARD: f32 = 1e-4;

/// A world point mapped to the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Ground-forward distance the projection used.
    pub forward: f32,
    pub inv_z: f32,
    /// The point was in front of the near plane and got clamped to it.
    pub behind: bool,
}

/// Per-view projection constants shared by the solid and sprite passes.
///
/// ```text
///   forward = −(dx·sin yaw + dy·cos yaw)
///   right   =   dx·cos yaw − dy·sin yaw
///   sx = right · (w/2) / forward + w/2
///   sy = (cam_z − z) · focal / forward + horizon
/// ```
///
/// Horizontal scale is always half the screen width; the vertical scale is
/// the camera's focal length. The terrain pass uses the same numbers.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    pub origin: Vec3,
    pub sin: f32,
    pub cos: f32,
    pub half_w: f32,
    pub focal: f32,
    pub horizon: f32,
}

impl Projector {
    pub fn new(camera: &Camera, width: usize) -> Self {
        let (sin, cos) = camera.yaw().sin_cos();
        Self {
            origin: camera.pos,
            sin,
            cos,
            half_w: width as f32 * 0.5,
            focal: camera.focal,
            horizon: camera.horizon,
        }
    }

    #[inline(always)]
    pub fn ground_forward(&self, p: Vec2) -> f32 {
        let dx = p.x - self.origin.x;
        let dy = p.y - self.origin.y;
        -(dx * self.sin + dy * self.cos)
    }

    #[inline(always)]
    pub fn right(&self, p: Vec2) -> f32 {
        let dx = p.x - self.origin.x;
        let dy = p.y - self.origin.y;
        dx * self.cos - dy * self.sin
    }

    #[inline(always)]
    pub fn screen_x(&self, right: f32, forward: f32) -> f32 {
        right * self.half_w / forward + self.half_w
    }

    #[inline(always)]
    pub fn screen_y(&self, z: f32, forward: f32) -> f32 {
        (self.origin.z - z) * self.focal / forward + self.horizon
    }

    /// Project `p`; `None` when it is not in front of the camera.
    pub fn project(&self, p: Vec3) -> Option<ScreenPoint> {
        let forward = self.ground_forward(p.truncate());
        if forward <= MIN_FORWARD {
            return None;
        }
        Some(self.finish(p, forward, false))
    }

    /// Project `p`, clamping its forward distance to at least `near`.
    pub fn project_clamped(&self, p: Vec3, near: f32) -> ScreenPoint {
        let forward = self.ground_forward(p.truncate());
        if forward < near {
            self.finish(p, near, true)
        } else {
            self.finish(p, forward, false)
        }
    }

    #[inline]
    fn finish(&self, p: Vec3, forward: f32, behind: bool) -> ScreenPoint {
        let right = self.right(p.truncate());
        ScreenPoint {
            x: self.screen_x(right, forward),
            y: self.screen_y(p.z, forward),
            forward,
            inv_z: 1.0 / forward,
            behind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    fn cam() -> Camera {
        Camera::new(vec3(0.0, 0.0, 10.0), 0.0)
            .with_focal(100.0)
            .with_horizon(60.0)
    }

    #[test]
    fn straight_ahead_hits_centre_column() {
        let p = Projector::new(&cam(), 160);
        let s = p.project(vec3(0.0, -50.0, 10.0)).unwrap();
        assert_eq!(s.x, 80.0);
        assert_eq!(s.y, 60.0);
        assert_eq!(s.forward, 50.0);
    }

    #[test]
    fn behind_camera_is_rejected_or_clamped() {
        let p = Projector::new(&cam(), 160);
        assert!(p.project(vec3(0.0, 5.0, 0.0)).is_none());
        let c = p.project_clamped(vec3(0.0, 5.0, 0.0), 0.5);
        assert!(c.behind);
        assert_eq!(c.forward, 0.5);
        assert_eq!(c.inv_z, 2.0);
    }

    #[test]
    fn lower_points_land_lower() {
        let p = Projector::new(&cam(), 160);
        let hi = p.project(vec3(0.0, -50.0, 20.0)).unwrap();
        let lo = p.project(vec3(0.0, -50.0, 0.0)).unwrap();
        assert!(lo.y > hi.y);
    }
}
