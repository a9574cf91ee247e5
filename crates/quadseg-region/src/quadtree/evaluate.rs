//! Collaborators of the quadtree builder
//!
//! The builder does not decide how an image is prepared or how
//! homogeneity is measured. It asks a [`ColorSpaceConverter`] once for the
//! image to measure on, then a [`HomogeneityEvaluator`] for every candidate
//! rectangle.
//!
//! Plain closures implement both traits:
//!
//! ```
//! use quadseg_core::{Box, Pix};
//! use quadseg_region::HomogeneityEvaluator;
//!
//! // Split anything wider than 4 pixels
//! let by_width = |_: &Pix, rect: &Box| rect.w as f32;
//! # let pix = Pix::new(8, 8, quadseg_core::PixelDepth::Bit8).unwrap();
//! assert_eq!(by_width.evaluate(&pix, &pix.bounds()).unwrap(), 8.0);
//! ```

use crate::error::{RegionError, RegionResult};
use quadseg_color::pix_convert_rgb_to_lab;
use quadseg_core::{Box, Pix, PixelDepth};

/// Produces the image the homogeneity statistic is measured on.
pub trait ColorSpaceConverter {
    /// Convert `pix`. The result must have the same width and height.
    fn convert(&self, pix: &Pix) -> RegionResult<Pix>;
}

/// Measures how uneven the pixels of a rectangle are.
///
/// Larger values mean less homogeneous; the builder splits a node when
/// the value reaches its threshold.
pub trait HomogeneityEvaluator {
    /// Statistic over `rect`, which is non-empty and inside `pix`.
    fn evaluate(&self, pix: &Pix, rect: &Box) -> RegionResult<f32>;
}

/// Converts 32 bpp RGB images to 8-bit encoded CIE L\*a\*b\*.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabConverter;

impl ColorSpaceConverter for LabConverter {
    fn convert(&self, pix: &Pix) -> RegionResult<Pix> {
        if pix.depth() != PixelDepth::Bit32 {
            return Err(RegionError::UnsupportedDepth {
                expected: "32 bpp",
                actual: pix.depth().bits(),
            });
        }
        Ok(pix_convert_rgb_to_lab(pix)?)
    }
}

/// Measures on the input image unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl ColorSpaceConverter for IdentityConverter {
    fn convert(&self, pix: &Pix) -> RegionResult<Pix> {
        Ok(pix.clone())
    }
}

/// Per-channel population standard deviation, averaged over four slots.
///
/// See [`ChannelStats::mean_std_dev`](quadseg_core::ChannelStats::mean_std_dev):
/// RGB and L\*a\*b\* sums are divided by 4, gray gives `3s/4`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDevEvaluator;

impl HomogeneityEvaluator for StdDevEvaluator {
    fn evaluate(&self, pix: &Pix, rect: &Box) -> RegionResult<f32> {
        Ok(pix.channel_stats_in_rect(rect)?.mean_std_dev())
    }
}

impl<F> HomogeneityEvaluator for F
where
    F: Fn(&Pix, &Box) -> f32,
{
    fn evaluate(&self, pix: &Pix, rect: &Box) -> RegionResult<f32> {
        Ok(self(pix, rect))
    }
}

impl<F> ColorSpaceConverter for F
where
    F: Fn(&Pix) -> RegionResult<Pix>,
{
    fn convert(&self, pix: &Pix) -> RegionResult<Pix> {
        self(pix)
    }
}
