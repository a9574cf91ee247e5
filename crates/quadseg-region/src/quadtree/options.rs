//! Decomposition thresholds

use crate::error::{RegionError, RegionResult};

/// Options controlling when a quadtree node is split
///
/// A node is split when its homogeneity statistic is at least
/// `min_std_dev` and its shorter side is strictly greater than
/// `min_block_size`. Otherwise it becomes a leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadTreeOptions {
    /// Blocks whose shorter side is at most this many pixels are never split
    pub min_block_size: u32,
    /// Blocks whose statistic is below this value are never split
    pub min_std_dev: f32,
}

impl Default for QuadTreeOptions {
    fn default() -> Self {
        Self {
            min_block_size: 8,
            min_std_dev: 10.0,
        }
    }
}

impl QuadTreeOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum block size
    pub fn with_min_block_size(mut self, size: u32) -> Self {
        self.min_block_size = size;
        self
    }

    /// Set the minimum homogeneity statistic
    pub fn with_min_std_dev(mut self, threshold: f32) -> Self {
        self.min_std_dev = threshold;
        self
    }

    /// Check that the thresholds describe a terminating decomposition.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if `min_std_dev` is NaN,
    /// or if `min_block_size` is 0 while `min_std_dev <= 0`: a 1x1 block
    /// always has a statistic of 0 and would then split without end.
    pub fn validate(&self) -> RegionResult<()> {
        if self.min_std_dev.is_nan() {
            return Err(RegionError::InvalidParameters(
                "min_std_dev must not be NaN".to_string(),
            ));
        }
        if self.min_block_size == 0 && self.min_std_dev <= 0.0 {
            return Err(RegionError::InvalidParameters(format!(
                "min_block_size 0 with min_std_dev {} never stops splitting",
                self.min_std_dev
            )));
        }
        Ok(())
    }

    /// Whether a block of the given size and statistic should be split.
    #[inline]
    pub(crate) fn should_split(&self, statistic: f32, width: i32, height: i32) -> bool {
        statistic >= self.min_std_dev && width.min(height) as i64 > self.min_block_size as i64
    }
}
