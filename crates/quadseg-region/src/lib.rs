//! quadseg region - Adaptive quadtree decomposition
//!
//! This crate splits an image into homogeneous rectangular blocks and
//! answers adjacency questions about them:
//!
//! - **Decomposition** - Recursive four-way splitting driven by a
//!   homogeneity statistic (standard deviation in L\*a\*b\* by default)
//! - **Region mask** - Per-pixel leaf ids for constant-time lookup
//! - **Neighbour queries** - Leaves bordering a node in the four cardinal
//!   and four diagonal directions
//!
//! # Examples
//!
//! ```
//! use quadseg_core::{Pix, PixelDepth};
//! use quadseg_region::{QuadTree, QuadTreeOptions};
//!
//! // Light left half, dark right half
//! let mut pm = Pix::new(32, 32, PixelDepth::Bit8).unwrap().to_mut();
//! for y in 0..32 {
//!     for x in 0..16 {
//!         pm.set_pixel(x, y, 200).unwrap();
//!     }
//! }
//! let pix: Pix = pm.into();
//!
//! let options = QuadTreeOptions::default();
//! let tree = QuadTree::new(&pix, &options).unwrap();
//!
//! // One split separates the halves
//! assert_eq!(tree.leaf_count(), 4);
//! let left = tree.leaf_at(0, 0).unwrap();
//! let right = tree.neighbours_right(left.id());
//! assert_eq!(right.len(), 1);
//! assert_eq!(tree.node(right[0]).average().unwrap()[0], 0.0);
//! ```

pub mod error;
pub mod quadtree;

// Re-export core types
pub use quadseg_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export quadtree types
pub use quadtree::{
    Corner, Direction, NodeId, OUT_OF_BOUNDS, QuadTree, QuadTreeNode, QuadTreeOptions, Quadrant,
    RegionMask, split_rect,
};

// Re-export decomposition collaborators
pub use quadtree::{
    ColorSpaceConverter, HomogeneityEvaluator, IdentityConverter, LabConverter, StdDevEvaluator,
};
