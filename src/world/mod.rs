mod camera;
mod heightfield;
mod items;
mod level;
mod solid;
pub mod terrain_gen;
mod texture;

pub use camera::Camera;

pub use heightfield::{Heightfield, HeightfieldError};

pub use items::{Anchor, SpriteItem, SpriteKind, SpriteRule, SrcRect, is_greenish, scatter};

pub use level::World;

pub use solid::{Face, SolidBox};

pub use texture::{Asset, NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
