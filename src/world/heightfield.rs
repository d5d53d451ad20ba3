//! Toroidal heightfield: one 8-bit altitude and one packed colour per cell.
//!
//! Every lookup masks its coordinates with `size - 1`, so any integer (or
//! float) coordinate is valid and the world repeats in both directions.

use thiserror::Error;

use crate::renderer::Rgba;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HeightfieldError {
    /// Side length must be a non-zero power of two.
    #[error("heightfield side {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// Colour/height arrays disagree with the declared side length.
    #[error("expected {expected} cells, got {got}")]
    SizeMismatch { expected: usize, got: usize },
}

#[derive(Clone, Debug)]
pub struct Heightfield {
    size: usize,
    shift: u32,
    mask: usize,
    altitude: Vec<u8>,
    color: Vec<Rgba>,
}

impl Heightfield {
    /// Uniform field of `height` and `color`.
    pub fn flat(size: usize, height: u8, color: Rgba) -> Result<Self, HeightfieldError> {
        Self::from_parts(size, vec![height; size * size], vec![color; size * size])
    }

    /// Build from a decoded height channel and colour array, both row-major.
    pub fn from_parts(
        size: usize,
        altitude: Vec<u8>,
        color: Vec<Rgba>,
    ) -> Result<Self, HeightfieldError> {
        if size == 0 || !size.is_power_of_two() {
            return Err(HeightfieldError::NotPowerOfTwo(size));
        }
        let expected = size * size;
        for got in [altitude.len(), color.len()] {
            if got != expected {
                return Err(HeightfieldError::SizeMismatch { expected, got });
            }
        }
        Ok(Self {
            size,
            shift: size.trailing_zeros(),
            mask: size - 1,
            altitude,
            color,
        })
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Flat cell index of a world coordinate, wrapped.
    #[inline(always)]
    pub fn offset(&self, x: f32, y: f32) -> usize {
        self.offset_i(x.floor() as i32, y.floor() as i32)
    }

    #[inline(always)]
    pub fn offset_i(&self, x: i32, y: i32) -> usize {
        (((y as usize) & self.mask) << self.shift) + ((x as usize) & self.mask)
    }

    #[inline(always)]
    pub fn height_at(&self, x: f32, y: f32) -> u8 {
        self.altitude[self.offset(x, y)]
    }

    #[inline(always)]
    pub fn height_at_i(&self, x: i32, y: i32) -> u8 {
        self.altitude[self.offset_i(x, y)]
    }

    #[inline(always)]
    pub fn color_at(&self, x: f32, y: f32) -> Rgba {
        self.color[self.offset(x, y)]
    }

    /// Height and colour of an already-resolved cell.
    #[inline(always)]
    pub fn cell(&self, offset: usize) -> (u8, Rgba) {
        (self.altitude[offset], self.color[offset])
    }

    pub fn set_cell(&mut self, x: i32, y: i32, height: u8, color: Rgba) {
        let o = self.offset_i(x, y);
        self.altitude[o] = height;
        self.color[o] = color;
    }

    /// Clamp the inclusive cell rectangle to its minimum height.
    ///
    /// Used to seat a solid box so no terrain pokes through its floor.
    /// Returns the height the rectangle was flattened to.
    pub fn flatten_footprint(&mut self, min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> u8 {
        let mut lowest = u8::MAX;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                lowest = lowest.min(self.height_at_i(x, y));
            }
        }
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let o = self.offset_i(x, y);
                self.altitude[o] = lowest;
            }
        }
        lowest
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
