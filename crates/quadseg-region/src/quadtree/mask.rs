//! Region mask
//!
//! A per-pixel raster of leaf ids. Each pixel is written exactly once,
//! when the leaf covering it is finalized.

use quadseg_core::Box;

/// Value returned by [`RegionMask::get_neighbour_block`] outside the image
pub const OUT_OF_BOUNDS: i32 = -1;

/// Stored value of pixels not yet covered by a finalized leaf
const UNASSIGNED: i32 = -1;

/// Same-size grid mapping each pixel to the id of the leaf that owns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMask {
    width: u32,
    height: u32,
    data: Vec<i32>,
}

impl RegionMask {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![UNASSIGNED; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major leaf ids, `-1` where no leaf was finalized
    #[inline]
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Stamp `leaf_id` into every pixel of `rect`.
    ///
    /// The rectangle must lie inside the mask; the builder only passes
    /// rectangles obtained by splitting the image bounds.
    pub(crate) fn fill_rect(&mut self, rect: &Box, leaf_id: u32) {
        let w = self.width as usize;
        for y in rect.y..rect.bottom() {
            let start = y as usize * w + rect.x as usize;
            self.data[start..start + rect.w as usize].fill(leaf_id as i32);
        }
    }

    /// Leaf id at (x, y), or `None` out of bounds or where no leaf was
    /// finalized.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let v = self.data[y as usize * self.width as usize + x as usize];
        u32::try_from(v).ok()
    }

    /// Leaf id at (x, y), or [`OUT_OF_BOUNDS`] (-1) when the coordinate
    /// lies outside the image.
    ///
    /// Accepts signed coordinates so callers can probe one step past an
    /// edge without casting.
    pub fn get_neighbour_block(&self, x: i32, y: i32) -> i32 {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.data[y as usize * self.width as usize + x as usize]
        } else {
            OUT_OF_BOUNDS
        }
    }
}
