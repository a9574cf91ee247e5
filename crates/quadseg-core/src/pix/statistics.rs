//! Image statistics operations
//!
//! Per-channel mean and standard deviation over a rectangular region.
//! These feed the homogeneity test and the leaf average of the quadtree
//! builder.

use super::{Pix, PixelDepth};
use crate::box_::Box;
use crate::color;
use crate::error::{Error, Result};

/// Per-channel statistics of a rectangular region.
///
/// RGB images report three independent channels. Single-channel images
/// report one channel, replicated into all three slots so callers can
/// treat both cases uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    /// Mean value of each channel
    pub mean: [f32; 3],
    /// Population standard deviation of each channel
    pub std_dev: [f32; 3],
    /// Number of distinct channels measured (1 or 3)
    pub channels: usize,
    /// Number of pixels measured
    pub count: u64,
}

impl ChannelStats {
    /// Mean of the standard deviations over four channel slots.
    ///
    /// The fourth (alpha) slot is always zero, so the sum of the three
    /// color slots is divided by 4. Gray images are replicated into all
    /// three slots and yield `3s/4`.
    pub fn mean_std_dev(&self) -> f32 {
        self.std_dev.iter().sum::<f32>() / 4.0
    }
}

impl Pix {
    /// Compute per-channel mean and standard deviation inside `rect`.
    ///
    /// 32 bpp images are measured as R, G, B (alpha is ignored). 8 and
    /// 16 bpp images are measured as one gray channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `rect` is empty or does not
    /// lie entirely inside the image.
    pub fn channel_stats_in_rect(&self, rect: &Box) -> Result<ChannelStats> {
        if rect.is_empty() || !self.bounds().contains_box(rect) {
            return Err(Error::InvalidParameter(format!(
                "rectangle ({}, {}, {}, {}) is empty or outside {}x{} image",
                rect.x,
                rect.y,
                rect.w,
                rect.h,
                self.width(),
                self.height()
            )));
        }

        let channels = match self.depth() {
            PixelDepth::Bit32 => 3,
            PixelDepth::Bit8 | PixelDepth::Bit16 => 1,
        };

        let mut sum = [0f64; 3];
        let mut sum_sq = [0f64; 3];
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                let val = self.get_pixel_unchecked(x as u32, y as u32);
                let samples = if channels == 3 {
                    let (r, g, b) = color::extract_rgb(val);
                    [r as f64, g as f64, b as f64]
                } else {
                    [val as f64; 3]
                };
                for c in 0..channels {
                    sum[c] += samples[c];
                    sum_sq[c] += samples[c] * samples[c];
                }
            }
        }

        let count = rect.area() as u64;
        let n = count as f64;
        let mut mean = [0f32; 3];
        let mut std_dev = [0f32; 3];
        for c in 0..channels {
            let m = sum[c] / n;
            let var = (sum_sq[c] / n - m * m).max(0.0);
            mean[c] = m as f32;
            std_dev[c] = var.sqrt() as f32;
        }
        if channels == 1 {
            mean = [mean[0]; 3];
            std_dev = [std_dev[0]; 3];
        }

        Ok(ChannelStats {
            mean,
            std_dev,
            channels,
            count,
        })
    }
}
