//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. For example,
//! in an 8-bit image, pixel 0 occupies bits 31..24 of the first word.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

#[inline]
fn read_packed(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit8 => get_data_byte(line, x),
        PixelDepth::Bit16 => get_data_two_bytes(line, x),
        PixelDepth::Bit32 => line[x as usize],
    }
}

#[inline]
fn write_packed(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    match depth {
        PixelDepth::Bit8 => set_data_byte(line, x, val),
        PixelDepth::Bit16 => set_data_two_bytes(line, x, val),
        PixelDepth::Bit32 => line[x as usize] = val,
    }
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or `x` lies beyond the row data.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_packed(self.row_data(y), x, self.depth())
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit images; returns `None` otherwise or when out
    /// of bounds.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let wpl = self.inner.wpl as usize;
        let start = y as usize * wpl;
        Some(read_packed(
            &self.inner.data[start..start + wpl],
            x,
            self.depth(),
        ))
    }

    /// Set a pixel value at (x, y).
    ///
    /// The value is masked to the pixel depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or `x` lies beyond the row data.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        let val = val & depth.max_value();
        write_packed(self.row_data_mut(y), x, depth, val);
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }
}

/// Get an 8-bit pixel value.
#[inline]
fn get_data_byte(line: &[u32], x: u32) -> u32 {
    (line[(x >> 2) as usize] >> (8 * (3 - (x & 3)))) & 0xff
}

/// Set an 8-bit pixel value.
#[inline]
fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let shift = 8 * (3 - (x & 3));
    let word = &mut line[(x >> 2) as usize];
    *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
}

/// Get a 16-bit pixel value.
#[inline]
fn get_data_two_bytes(line: &[u32], x: u32) -> u32 {
    (line[(x >> 1) as usize] >> (16 * (1 - (x & 1)))) & 0xffff
}

/// Set a 16-bit pixel value.
#[inline]
fn set_data_two_bytes(line: &mut [u32], x: u32, val: u32) {
    let shift = 16 * (1 - (x & 1));
    let word = &mut line[(x >> 1) as usize];
    *word = (*word & !(0xffff << shift)) | ((val & 0xffff) << shift);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_access_all_depths() {
        for (depth, val) in [
            (PixelDepth::Bit8, 200),
            (PixelDepth::Bit16, 40000),
            (PixelDepth::Bit32, 0x11223344),
        ] {
            let mut pm = Pix::new(37, 3, depth).unwrap().to_mut();
            pm.set_pixel(35, 2, val).unwrap();
            pm.set_pixel(36, 2, val).unwrap();
            let pix: Pix = pm.into();
            assert_eq!(pix.get_pixel(35, 2), Some(val), "depth {:?}", depth);
            assert_eq!(pix.get_pixel(36, 2), Some(val), "depth {:?}", depth);
            assert_eq!(pix.get_pixel(34, 2), Some(0), "depth {:?}", depth);
        }
    }

    #[test]
    fn test_set_pixel_masks_to_depth() {
        let mut pm = Pix::new(4, 1, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(1, 0, 0x1ff).unwrap();
        assert_eq!(pm.get_pixel(1, 0), Some(0xff));
        assert_eq!(pm.get_pixel(0, 0), Some(0));
        assert_eq!(pm.get_pixel(2, 0), Some(0));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut pm = Pix::new(4, 4, PixelDepth::Bit8).unwrap().to_mut();
        assert!(pm.set_pixel(4, 0, 1).is_err());
        assert!(pm.set_pixel(0, 4, 1).is_err());
        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(4, 0), None);
    }

    #[test]
    fn test_rgb_access() {
        let mut pm = Pix::new(2, 2, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgb(1, 1, 10, 20, 30).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.get_rgb(1, 1), Some((10, 20, 30)));
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));

        let gray = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        assert_eq!(gray.get_rgb(0, 0), None);
        assert!(gray.to_mut().set_rgb(0, 0, 1, 2, 3).is_err());
    }
}
