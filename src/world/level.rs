use log::info;

use crate::config::EYE_OFFSET;
use crate::world::{heightfield::Heightfield, solid::SolidBox};

/// Static world state: the terrain and the solids standing on it.
///
/// Sprites are not stored here; their list belongs to gameplay code.
pub struct World {
    pub heightfield: Heightfield,
    pub solids: Vec<SolidBox>,
    /// Eye height above the ground, added by [`ground_height`](Self::ground_height).
    pub eye_offset: f32,
}

impl World {
    pub fn new(heightfield: Heightfield) -> Self {
        Self {
            heightfield,
            solids: Vec::new(),
            eye_offset: EYE_OFFSET,
        }
    }

    /// Terrain altitude without any solids.
    #[inline]
    pub fn raw_height(&self, x: f32, y: f32) -> f32 {
        self.heightfield.height_at(x, y) as f32
    }

    /// Height a player standing at `(x, y)` has their eye at.
    ///
    /// Inside a solid's footprint the top of the solid counts as ground.
    pub fn ground_height(&self, x: f32, y: f32) -> f32 {
        let mut ground = self.raw_height(x, y);
        for s in self.solids.iter().filter(|s| s.covers(x, y)) {
            ground = ground.max(s.top_z());
        }
        ground + self.eye_offset
    }

    /// Flatten the terrain under `solid`, seat it on the result and keep it.
    pub fn place_solid(&mut self, mut solid: SolidBox) -> usize {
        let (x0, x1, y0, y1) = solid.footprint();
        let floor = self.heightfield.flatten_footprint(x0, x1, y0, y1);
        solid.base_z = self.raw_height(solid.center.x, solid.center.y);
        info!(
            "solid seated at ({:.1}, {:.1}) on height {floor}",
            solid.center.x, solid.center.y
        );
        self.solids.push(solid);
        self.solids.len() - 1
    }
}
