//! quadseg - Adaptive quadtree region decomposition for Rust
//!
//! # Overview
//!
//! quadseg splits an image into rectangular blocks of near-uniform color
//! and answers adjacency questions about them:
//!
//! - Image I/O through the `image` crate (PNG, JPEG, BMP, TIFF)
//! - sRGB to CIE L\*a\*b\* conversion for perceptual homogeneity
//! - Quadtree decomposition with a per-pixel region mask
//! - Cardinal and diagonal neighbour queries between leaves
//!
//! # Example
//!
//! ```
//! use quadseg::region::{QuadTree, QuadTreeOptions};
//! use quadseg::{Pix, PixelDepth};
//!
//! let pix = Pix::new(64, 48, PixelDepth::Bit32).unwrap();
//! let tree = QuadTree::new(&pix, &QuadTreeOptions::default()).unwrap();
//!
//! // Uniform images stay whole
//! assert_eq!(tree.leaf_count(), 1);
//! assert_eq!(tree.mask().width(), 64);
//! assert_eq!(tree.get_neighbour_block(64, 0), -1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use quadseg_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use quadseg_color as color;
pub use quadseg_io as io;
pub use quadseg_region as region;
