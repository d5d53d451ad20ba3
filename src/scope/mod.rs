//! Magnified secondary view.
//!
//! A scope renders the whole scene a second time into its own auxiliary
//! buffer, through its own copy of the camera, then composites a circular
//! window of that buffer onto the main frame with a reticle on top. The
//! caller's camera and buffer are never swapped out, so nothing has to be
//! restored afterwards.
//!
//! Two strategies share that machinery through [`ScopeTarget`]:
//! * [`CropZoom`]: same camera, magnified crop of the centre.
//! * [`ForwardPosition`]: camera pushed forward along the view direction.

use glam::{Vec2, vec2};
use log::{debug, info};

use crate::{
    config::{ScopeConfig, ScopeKind},
    renderer::{FrameBuffer, Rgba, overlay, rgb},
    world::Camera,
};

mod crop;
mod forward;

pub use crop::CropZoom;
pub use forward::ForwardPosition;

/// Draws the full scene into a target through a camera.
pub type SceneRender<'a> = dyn FnMut(&mut FrameBuffer, &Camera) + 'a;

const CLIP_INSET: f32 = 4.0;
const VIGNETTE_START: f32 = 0.7;
const VIGNETTE_ALPHA: f32 = 0.8;
const BORDER: [(f32, Rgba); 3] = [
    (8.0, rgb(0x00, 0x00, 0x00)),
    (4.0, rgb(0x33, 0x33, 0x33)),
    (2.0, rgb(0x11, 0x11, 0x11)),
];
const RETICLE_GAP: f32 = 15.0;
const RETICLE_REACH: f32 = 0.7;
const MIL_DOT_SPACING: f32 = 0.15;
const DOT_RADIUS: f32 = 2.0;
const LEVEL_DOT_IDLE: Rgba = rgb(0x66, 0x66, 0x66);

/// One interchangeable scope strategy.
pub trait ScopeMode {
    fn name(&self) -> &'static str;

    /// Advance the per-frame easing toward this frame's target.
    fn update_camera(&mut self, aiming: bool, has_scope: bool);

    /// Wheel input: negative zooms in, positive zooms out.
    fn handle_zoom(&mut self, delta: f32) {
        self.target_mut().step_zoom(delta);
    }

    /// Render the secondary view and composite it onto `main`.
    ///
    /// Does nothing (and returns `false`) unless the scope is engaged.
    fn render(&mut self, main: &mut FrameBuffer, camera: &Camera, scene: &mut SceneRender) -> bool;

    fn target(&self) -> &ScopeTarget;
    fn target_mut(&mut self) -> &mut ScopeTarget;

    #[inline]
    fn zoom_index(&self) -> usize {
        self.target().index
    }
}

/// Build the strategy `cfg` selects.
pub fn from_config(cfg: &ScopeConfig) -> Box<dyn ScopeMode> {
    let scope: Box<dyn ScopeMode> = match cfg.kind {
        ScopeKind::Crop => Box::new(CropZoom::new(cfg)),
        ScopeKind::Forward => Box::new(ForwardPosition::new(cfg)),
    };
    info!("scope mode: {}", scope.name());
    scope
}

/*──────────────────────── shared machinery ───────────────────────────*/

/// Auxiliary buffer, zoom table and overlay drawing shared by every mode.
#[derive(Debug)]
pub struct ScopeTarget {
    aux: FrameBuffer,
    levels: Vec<f32>,
    index: usize,
    engaged: bool,
    pub diameter: f32,
    pub smoothing: f32,
    pub reticle: Rgba,
}

impl ScopeTarget {
    pub fn new(cfg: &ScopeConfig, levels: &[f32]) -> Self {
        Self {
            aux: FrameBuffer::default(),
            levels: if levels.is_empty() { vec![1.0] } else { levels.to_vec() },
            index: 0,
            engaged: false,
            diameter: cfg.diameter as f32,
            smoothing: cfg.smoothing,
            reticle: cfg.reticle,
        }
    }

    /// The secondary view as last rendered.
    pub fn aux(&self) -> &FrameBuffer {
        &self.aux
    }

    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    /// Zoom level currently selected (not the eased value).
    #[inline]
    pub fn level(&self) -> f32 {
        self.levels[self.index]
    }

    pub fn set_engaged(&mut self, aiming: bool, has_scope: bool) {
        self.engaged = aiming && has_scope;
    }

    pub fn step_zoom(&mut self, delta: f32) {
        if delta < 0.0 {
            self.index = (self.index + 1).min(self.levels.len() - 1);
        } else if delta > 0.0 {
            self.index = self.index.saturating_sub(1);
        }
    }

    /// Move `value` a `smoothing` fraction of the way to `goal`.
    #[inline]
    pub fn ease(&self, value: f32, goal: f32) -> f32 {
        value + (goal - value) * self.smoothing
    }

    /// Match the auxiliary buffer to the main one, then render into it.
    pub fn render_aux(&mut self, main: &FrameBuffer, camera: &Camera, scene: &mut SceneRender) {
        if self.aux.resize(main.width, main.height) {
            debug!("scope buffer reallocated to {}x{}", main.width, main.height);
        }
        scene(&mut self.aux, camera);
    }

    /// Composite the square `src_size` around the aux centre, scaled to the
    /// scope diameter, then the vignette, border and reticle.
    pub fn composite(&self, main: &mut FrameBuffer, src_size: f32) {
        let c = vec2(main.width as f32 * 0.5, main.height as f32 * 0.5);
        let r = self.diameter * 0.5;
        let origin = c - Vec2::splat(src_size * 0.5);

        overlay::blit_circle(main, &self.aux, origin, src_size, c, r - CLIP_INSET, self.diameter);
        overlay::vignette(
            main,
            c,
            r * VIGNETTE_START,
            r,
            r - CLIP_INSET,
            VIGNETTE_ALPHA,
        );
        for (width, color) in BORDER {
            overlay::ring(main, c, r, width, color);
        }
        self.draw_reticle(main, c, r);
    }

    fn draw_reticle(&self, fb: &mut FrameBuffer, c: Vec2, r: f32) {
        let reach = r * RETICLE_REACH;
        let col = self.reticle;
        overlay::hline(fb, c.x - reach, c.x - RETICLE_GAP, c.y, col);
        overlay::hline(fb, c.x + RETICLE_GAP, c.x + reach, c.y, col);
        overlay::vline(fb, c.x, c.y - reach, c.y - RETICLE_GAP, col);
        overlay::vline(fb, c.x, c.y + RETICLE_GAP, c.y + reach, col);
        overlay::disc(fb, c, DOT_RADIUS, col);

        let spacing = r * MIL_DOT_SPACING;
        for i in 1..=3 {
            let d = RETICLE_GAP + i as f32 * spacing;
            for off in [vec2(-d, 0.0), vec2(d, 0.0), vec2(0.0, -d), vec2(0.0, d)] {
                overlay::disc(fb, c + off, DOT_RADIUS, col);
            }
        }

        let dot_y = c.y + r - 30.0;
        for i in 0..self.levels.len() {
            let p = vec2(c.x - 15.0 + i as f32 * 15.0, dot_y);
            if i == self.index {
                overlay::disc(fb, p, 5.0, col);
            } else {
                overlay::disc(fb, p, 3.0, LEVEL_DOT_IDLE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_index_is_clamped() {
        let mut t = ScopeTarget::new(&ScopeConfig::default(), &[2.0, 4.0, 6.0]);
        t.step_zoom(1.0);
        assert_eq!(t.index, 0);
        for _ in 0..5 {
            t.step_zoom(-1.0);
        }
        assert_eq!(t.level(), 6.0);
        t.step_zoom(0.0);
        assert_eq!(t.index, 2);
        t.step_zoom(3.0);
        assert_eq!(t.level(), 4.0);
    }

    #[test]
    fn aux_follows_main_size() {
        let mut t = ScopeTarget::new(&ScopeConfig::default(), &[2.0]);
        let main = FrameBuffer::new(64, 32);
        let mut calls = 0;
        t.render_aux(&main, &Camera::default(), &mut |fb, _| {
            calls += 1;
            fb.clear(3);
        });
        assert_eq!((t.aux().width, t.aux().height), (64, 32));
        assert_eq!(calls, 1);
        assert!(t.aux().color.iter().all(|&c| c == 3));
    }

    #[test]
    fn composite_draws_reticle_and_border() {
        let cfg = ScopeConfig::default();
        let mut t = ScopeTarget::new(&cfg, &[2.0, 4.0, 6.0]);
        let mut main = FrameBuffer::new(400, 400);
        main.clear(rgb(1, 2, 3));
        t.render_aux(&main, &Camera::default(), &mut |fb, _| fb.clear(rgb(9, 9, 9)));
        t.composite(&mut main, cfg.diameter as f32);

        assert_eq!(main.pixel(200, 200), cfg.reticle);
        assert_eq!(main.pixel(200 + 30, 200), cfg.reticle);
        assert_eq!(main.pixel(200 + 10, 200 + 10), rgb(9, 9, 9));
        // border ring sits on the rim, outside stays untouched
        assert_eq!(main.pixel(200 + 172, 200), BORDER[2].1);
        assert_eq!(main.pixel(0, 0), rgb(1, 2, 3));
    }

    #[test]
    fn factory_picks_mode() {
        let mut cfg = ScopeConfig::default();
        assert_eq!(from_config(&cfg).name(), "crop");
        cfg.kind = ScopeKind::Forward;
        assert_eq!(from_config(&cfg).name(), "forward");
    }
}
