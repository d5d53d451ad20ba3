// src/config.rs
// -------------
// Tuning knobs for the terrain marcher, the solid rasteriser, the sprite
// compositor and the scope. The numbers were tuned against a 1024² world
// with 0..255 heights; they carry no meaning beyond "looks right at that
// scale".

use crate::renderer::Rgba;

/*──────────────────────────── defaults ─────────────────────────────*/

pub const BACKGROUND: Rgba = 0xFF_90_90_E0;

/// Flat colour returned when sampling a texture that is still pending.
pub const FALLBACK_GREY: Rgba = 0xFF_80_80_80;

pub const DRAW_DISTANCE: f32 = 2000.0;
pub const FOCAL_LENGTH: f32 = 300.0;
pub const HORIZON: f32 = 100.0;
pub const EYE_HEIGHT: f32 = 78.0;

/// Eye height above the terrain under the player (minimum 30).
pub const EYE_OFFSET: f32 = 30.0;

pub const MARCH_START_STEP: f32 = 1.0;
pub const MARCH_NEAR_INCREMENT: f32 = 0.005;
pub const MARCH_FAR_INCREMENT: f32 = 0.02;
pub const MARCH_COARSEN_AFTER: f32 = 1000.0;

pub const SOLID_NEAR_PLANE: f32 = 0.5;
pub const SOLID_DEPTH_BIAS: f32 = 0.5;
pub const SHADE_FALLOFF: f32 = 1000.0;
pub const SHADE_FLOOR: f32 = 0.3;
pub const CULL_PROXIMITY: f32 = 1.5;
pub const FOV_DEGREES: f32 = 90.0;
pub const FRUSTUM_MARGIN_DEGREES: f32 = 30.0;

pub const SPRITE_NEAR: f32 = 0.1;
pub const SPRITE_BASE_SIZE: f32 = 12.0;
pub const BULLET_SIZE: f32 = 0.75;
pub const ALPHA_THRESHOLD: u8 = 128;

pub const SCOPE_DIAMETER: usize = 345;
pub const SCOPE_SMOOTHING: f32 = 0.15;
pub const SCOPE_RETICLE: Rgba = 0xFF_00_FF_00;
pub const CROP_ZOOM_LEVELS: [f32; 3] = [2.0, 4.0, 6.0];
pub const FORWARD_ZOOM_LEVELS: [f32; 3] = [4.0, 8.0, 12.0];
pub const FORWARD_UNITS_PER_LEVEL: f32 = 50.0;

/*──────────────────────────── terrain march ─────────────────────────*/

/// Step schedule of the outward terrain march.
///
/// The step starts at `start_step` and grows by `near_increment` per slice
/// until `coarsen_after`, then by `far_increment`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchConfig {
    pub start_step: f32,
    pub near_increment: f32,
    pub far_increment: f32,
    pub coarsen_after: f32,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            start_step: MARCH_START_STEP,
            near_increment: MARCH_NEAR_INCREMENT,
            far_increment: MARCH_FAR_INCREMENT,
            coarsen_after: MARCH_COARSEN_AFTER,
        }
    }
}

impl MarchConfig {
    /// Next `(z, dz)`: the step grows by the rate at the current slice and
    /// is then taken, so slices fall at 1, 2.005, 3.015, ...
    #[inline(always)]
    pub fn advance(&self, z: f32, dz: f32) -> (f32, f32) {
        let dz = dz + self.increment_at(z);
        (z + dz, dz)
    }

    /// Step growth applied after the slice at distance `z`.
    #[inline(always)]
    pub fn increment_at(&self, z: f32) -> f32 {
        if z > self.coarsen_after {
            self.far_increment
        } else {
            self.near_increment
        }
    }
}

/*──────────────────────────── render config ─────────────────────────*/

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub background: Rgba,
    pub march: MarchConfig,

    /* solids */
    pub solid_near_plane: f32,
    pub solid_depth_bias: f32,
    pub shade_falloff: f32,
    pub shade_floor: f32,
    pub cull_proximity: f32,
    pub fov_degrees: f32,
    pub frustum_margin_degrees: f32,

    /* sprites */
    pub sprite_near: f32,
    pub sprite_base_size: f32,
    pub bullet_size: f32,
    pub alpha_threshold: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: BACKGROUND,
            march: MarchConfig::default(),
            solid_near_plane: SOLID_NEAR_PLANE,
            solid_depth_bias: SOLID_DEPTH_BIAS,
            shade_falloff: SHADE_FALLOFF,
            shade_floor: SHADE_FLOOR,
            cull_proximity: CULL_PROXIMITY,
            fov_degrees: FOV_DEGREES,
            frustum_margin_degrees: FRUSTUM_MARGIN_DEGREES,
            sprite_near: SPRITE_NEAR,
            sprite_base_size: SPRITE_BASE_SIZE,
            bullet_size: BULLET_SIZE,
            alpha_threshold: ALPHA_THRESHOLD,
        }
    }
}

impl RenderConfig {
    /// Distance-based darkening shared by every face of a solid.
    #[inline]
    pub fn shade_for_depth(&self, depth: f32) -> f32 {
        (1.0 - depth / self.shade_falloff).clamp(self.shade_floor, 1.0)
    }
}

/*──────────────────────────── scope config ──────────────────────────*/

/// Which secondary-camera strategy drives the scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ScopeKind {
    /// Same position and focal length, magnified crop of the centre.
    #[default]
    Crop,
    /// Camera displaced forward along the view direction.
    Forward,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScopeConfig {
    pub kind: ScopeKind,
    pub diameter: usize,
    pub smoothing: f32,
    pub crop_levels: Vec<f32>,
    pub forward_levels: Vec<f32>,
    pub forward_units_per_level: f32,
    pub reticle: Rgba,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            kind: ScopeKind::default(),
            diameter: SCOPE_DIAMETER,
            smoothing: SCOPE_SMOOTHING,
            crop_levels: CROP_ZOOM_LEVELS.to_vec(),
            forward_levels: FORWARD_ZOOM_LEVELS.to_vec(),
            forward_units_per_level: FORWARD_UNITS_PER_LEVEL,
            reticle: SCOPE_RETICLE,
        }
    }
}
