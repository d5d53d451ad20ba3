use crate::{
    config::ScopeConfig,
    renderer::FrameBuffer,
    scope::{SceneRender, ScopeMode, ScopeTarget},
    world::Camera,
};

/// Positional zoom: the secondary camera is moved forward along the view
/// direction with the same focal length, and the full-diameter centre of
/// its image is shown unscaled. Things between the player and the displaced
/// camera are not drawn.
#[derive(Debug)]
pub struct ForwardPosition {
    target: ScopeTarget,
    units_per_level: f32,
    /// Eased forward displacement in world units, 0 when idle.
    offset: f32,
}

impl ForwardPosition {
    pub fn new(cfg: &ScopeConfig) -> Self {
        Self {
            target: ScopeTarget::new(cfg, &cfg.forward_levels),
            units_per_level: cfg.forward_units_per_level,
            offset: 0.0,
        }
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// The secondary camera for `camera` at the current displacement.
    pub fn scope_camera(&self, camera: &Camera) -> Camera {
        camera.displaced(self.offset)
    }
}

impl ScopeMode for ForwardPosition {
    fn name(&self) -> &'static str {
        "forward"
    }

    fn update_camera(&mut self, aiming: bool, has_scope: bool) {
        self.target.set_engaged(aiming, has_scope);
        let goal = if self.target.engaged {
            self.target.level() * self.units_per_level
        } else {
            0.0
        };
        self.offset = self.target.ease(self.offset, goal);
    }

    fn render(&mut self, main: &mut FrameBuffer, camera: &Camera, scene: &mut SceneRender) -> bool {
        if !self.target.engaged {
            return false;
        }
        let cam2 = self.scope_camera(camera);
        self.target.render_aux(main, &cam2, scene);
        let size = self.target.diameter;
        self.target.composite(main, size);
        true
    }

    fn target(&self) -> &ScopeTarget {
        &self.target
    }

    fn target_mut(&mut self) -> &mut ScopeTarget {
        &mut self.target
    }
}
