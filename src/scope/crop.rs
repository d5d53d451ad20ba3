use crate::{
    config::ScopeConfig,
    renderer::FrameBuffer,
    scope::{SceneRender, ScopeMode, ScopeTarget},
    world::Camera,
};

/// Digital zoom: the secondary camera is an exact copy of the main one and
/// magnification comes from cropping a smaller square out of the centre.
/// Never sees through anything the player could not already see.
#[derive(Debug)]
pub struct CropZoom {
    target: ScopeTarget,
    /// Eased magnification, 1 when idle.
    factor: f32,
}

impl CropZoom {
    pub fn new(cfg: &ScopeConfig) -> Self {
        Self {
            target: ScopeTarget::new(cfg, &cfg.crop_levels),
            factor: 1.0,
        }
    }

    #[inline]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Side of the centred source square for the current magnification.
    #[inline]
    pub fn source_size(&self) -> f32 {
        self.target.diameter / self.factor.max(f32::EPSILON)
    }
}

impl ScopeMode for CropZoom {
    fn name(&self) -> &'static str {
        "crop"
    }

    fn update_camera(&mut self, aiming: bool, has_scope: bool) {
        self.target.set_engaged(aiming, has_scope);
        let goal = if self.target.engaged {
            self.target.level()
        } else {
            1.0
        };
        self.factor = self.target.ease(self.factor, goal);
    }

    fn render(&mut self, main: &mut FrameBuffer, camera: &Camera, scene: &mut SceneRender) -> bool {
        if !self.target.engaged {
            return false;
        }
        self.target.render_aux(main, camera, scene);
        self.target.composite(main, self.source_size());
        true
    }

    fn target(&self) -> &ScopeTarget {
        &self.target
    }

    fn target_mut(&mut self) -> &mut ScopeTarget {
        &mut self.target
    }
}
