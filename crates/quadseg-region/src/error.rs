//! Error types for quadseg-region

use thiserror::Error;

/// Errors that can occur while building a region quadtree
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] quadseg_core::Error),

    /// Color conversion error
    #[error("color error: {0}")]
    Color(#[from] quadseg_color::ColorError),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
