use crate::renderer::Rgba;

/// Colour + depth target of one view.
///
/// `depth` holds the forward distance of whatever last claimed the pixel
/// (`+∞` after a clear). `hidden_y` is the terrain marcher's per-column
/// occlusion cursor: every row at or below it is already covered.
#[derive(Clone, Debug, Default)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub color: Vec<Rgba>,
    pub depth: Vec<f32>,
    pub hidden_y: Vec<i32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let mut fb = Self::default();
        fb.resize(width, height);
        fb
    }

    /// Reallocate for a new size. Returns `true` if anything changed.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == self.width && height == self.height && self.color.len() == width * height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.color = vec![0; width * height];
        self.depth = vec![f32::INFINITY; width * height];
        self.hidden_y = vec![height as i32; width];
        true
    }

    /// Colour to `bg`, depth to `+∞`, occlusion cursors to the bottom row.
    pub fn clear(&mut self, bg: Rgba) {
        self.color.fill(bg);
        self.depth.fill(f32::INFINITY);
        self.hidden_y.fill(self.height as i32);
    }

    #[inline(always)]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Write `c` at `(x, y)` if `z` is nearer than what is stored there.
    #[inline(always)]
    pub fn test_and_set(&mut self, x: usize, y: usize, z: f32, c: Rgba) -> bool {
        let i = self.index(x, y);
        if z < self.depth[i] {
            self.depth[i] = z;
            self.color[i] = c;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.color[self.index(x, y)]
    }

    #[inline]
    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth[self.index(x, y)]
    }

    /// Copy colour, depth and cursors from a buffer of the same size.
    pub fn copy_from(&mut self, other: &FrameBuffer) {
        self.resize(other.width, other.height);
        self.color.copy_from_slice(&other.color);
        self.depth.copy_from_slice(&other.depth);
        self.hidden_y.copy_from_slice(&other.hidden_y);
    }
}
