//! quadseg color - Color space conversion
//!
//! The region decomposition measures homogeneity in a perceptual color
//! space. This crate provides the conversions it needs:
//!
//! - **Pixel-level**: RGB <-> XYZ <-> CIE L\*a\*b\*
//! - **Image-level**: whole-image RGB <-> 8-bit encoded L\*a\*b\*

pub mod colorspace;
pub mod error;

// Re-export core types
pub use quadseg_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

pub use colorspace::{
    // Types
    Lab,
    Xyz,
    // Pixel-level conversions
    lab_to_rgb,
    lab_to_xyz,
    // Image-level conversions
    pix_convert_lab_to_rgb,
    pix_convert_rgb_to_lab,
    rgb_to_lab,
    rgb_to_xyz,
    xyz_to_lab,
    xyz_to_rgb,
};
