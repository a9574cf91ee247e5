//! Quadtree - Adaptive region decomposition with neighbour queries
//!
//! A [`QuadTree`] recursively splits an image into four quadrants until
//! every block is homogeneous (or too small to split). The resulting leaves
//! partition the image; their ids are recorded per pixel in a
//! [`RegionMask`].
//!
//! After construction every node carries four adjacency references
//! pointing at the smallest subtree, no deeper than the node itself, that
//! borders it on each side. Neighbour queries walk only the near border of
//! that subtree, so their cost is proportional to the number of leaves
//! returned rather than to the height of the tree.
//!
//! # Overview
//!
//! ```text
//! image -> ColorSpaceConverter -> split/finalize (leaves + mask)
//!       -> link neighbours (once) -> immutable tree, queried freely
//! ```
//!
//! # Examples
//!
//! ```
//! use quadseg_core::{Pix, PixelDepth};
//! use quadseg_region::{QuadTree, QuadTreeOptions};
//!
//! // A uniform image never splits
//! let pix = Pix::new(16, 16, PixelDepth::Bit32).unwrap();
//! let tree = QuadTree::new(&pix, &QuadTreeOptions::default()).unwrap();
//! assert_eq!(tree.leaf_count(), 1);
//! assert_eq!(tree.max_depth(), 0);
//! assert_eq!(tree.get_neighbour_block(3, 3), 0);
//! assert_eq!(tree.get_neighbour_block(-1, 0), -1);
//! ```

mod builder;
mod collect;
mod evaluate;
mod linker;
mod mask;
mod node;
mod options;
mod query;

pub use evaluate::{
    ColorSpaceConverter, HomogeneityEvaluator, IdentityConverter, LabConverter, StdDevEvaluator,
};
pub use mask::{OUT_OF_BOUNDS, RegionMask};
pub use node::{Corner, Direction, NodeId, QuadTreeNode, Quadrant, split_rect};
pub use options::QuadTreeOptions;

use crate::error::{RegionError, RegionResult};
use quadseg_core::{Pix, PixelDepth};

/// A region quadtree over one image.
///
/// Built eagerly by [`QuadTree::new`] or [`QuadTree::with_collaborators`];
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct QuadTree {
    /// Arena of all nodes, indexed by [`NodeId`]
    nodes: Vec<QuadTreeNode>,
    /// Finalized leaves in finalization order; position = leaf id
    leaves: Vec<NodeId>,
    mask: RegionMask,
    /// The converted image statistics were measured on
    image: Pix,
    max_depth: u32,
    options: QuadTreeOptions,
}

impl QuadTree {
    /// Build a quadtree with the default collaborators.
    ///
    /// 32 bpp images are converted to L\*a\*b\* before measuring; 8 and
    /// 16 bpp images are measured as they are. The statistic is
    /// [`StdDevEvaluator`]'s four-slot mean of channel standard deviations.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if the options fail
    /// [`QuadTreeOptions::validate`].
    pub fn new(pix: &Pix, options: &QuadTreeOptions) -> RegionResult<Self> {
        match pix.depth() {
            PixelDepth::Bit32 => {
                Self::with_collaborators(pix, options, &LabConverter, &StdDevEvaluator)
            }
            PixelDepth::Bit8 | PixelDepth::Bit16 => {
                Self::with_collaborators(pix, options, &IdentityConverter, &StdDevEvaluator)
            }
        }
    }

    /// Build a quadtree with caller-supplied collaborators.
    ///
    /// `converter` runs once on `pix`; `evaluator` runs on the converted
    /// image for every non-empty node considered for splitting. With
    /// `min_block_size == 0` the evaluator must report less than
    /// `min_std_dev` for 1x1 blocks, or decomposition does not terminate.
    ///
    /// # Errors
    ///
    /// Propagates converter and evaluator errors. Returns
    /// [`RegionError::InvalidParameters`] if the options are invalid or
    /// the converter changes the image size.
    pub fn with_collaborators<C, E>(
        pix: &Pix,
        options: &QuadTreeOptions,
        converter: &C,
        evaluator: &E,
    ) -> RegionResult<Self>
    where
        C: ColorSpaceConverter + ?Sized,
        E: HomogeneityEvaluator + ?Sized,
    {
        options.validate()?;

        let image = converter.convert(pix)?;
        if image.width() != pix.width() || image.height() != pix.height() {
            return Err(RegionError::InvalidParameters(format!(
                "converter changed image size from {}x{} to {}x{}",
                pix.width(),
                pix.height(),
                image.width(),
                image.height()
            )));
        }

        let root = QuadTreeNode::new(NodeId::ROOT, None, image.bounds(), 0, 0);
        let mut tree = QuadTree {
            nodes: vec![root],
            leaves: Vec::new(),
            mask: RegionMask::new(image.width(), image.height()),
            image,
            max_depth: 0,
            options: *options,
        };

        tree.process(evaluator)?;
        tree.fix_neighbours();

        log::debug!(
            "quadtree over {}x{}: {} nodes, {} leaves, max depth {}",
            tree.image.width(),
            tree.image.height(),
            tree.nodes.len(),
            tree.leaves.len(),
            tree.max_depth
        );
        Ok(tree)
    }

    /// The root node
    #[inline]
    pub fn root(&self) -> &QuadTreeNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &QuadTreeNode {
        &self.nodes[id.index()]
    }

    /// Node by id, `None` if `id` does not belong to this tree
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&QuadTreeNode> {
        self.nodes.get(id.index())
    }

    /// All nodes in creation order
    #[inline]
    pub fn nodes(&self) -> &[QuadTreeNode] {
        &self.nodes
    }

    /// Finalized leaves; the position of each entry is its leaf id
    #[inline]
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Iterate finalized leaf nodes in leaf-id order
    pub fn leaf_nodes(&self) -> impl Iterator<Item = &QuadTreeNode> + '_ {
        self.leaves.iter().map(move |&id| self.node(id))
    }

    /// Leaf by leaf id
    pub fn leaf(&self, leaf_id: u32) -> Option<&QuadTreeNode> {
        self.leaves
            .get(leaf_id as usize)
            .map(|&id| self.node(id))
    }

    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest level at which a leaf was finalized
    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline]
    pub fn mask(&self) -> &RegionMask {
        &self.mask
    }

    /// The image after color conversion
    #[inline]
    pub fn image(&self) -> &Pix {
        &self.image
    }

    #[inline]
    pub fn options(&self) -> &QuadTreeOptions {
        &self.options
    }

    /// Leaf id owning pixel (x, y), or -1 outside the image.
    ///
    /// See [`RegionMask::get_neighbour_block`].
    #[inline]
    pub fn get_neighbour_block(&self, x: i32, y: i32) -> i32 {
        self.mask.get_neighbour_block(x, y)
    }

    /// The finalized leaf owning pixel (x, y)
    pub fn leaf_at(&self, x: u32, y: u32) -> Option<&QuadTreeNode> {
        self.mask.get(x, y).and_then(|id| self.leaf(id))
    }
}
