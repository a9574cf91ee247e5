//! Quadtree node model
//!
//! Nodes live in an arena owned by [`QuadTree`](super::QuadTree) and refer
//! to each other through [`NodeId`]. Child slots own their targets (every
//! node except the root appears in exactly one parent's child array);
//! adjacency slots are plain references that may point anywhere in the
//! arena.

use quadseg_core::Box;

/// Index of a node in its tree's arena.
///
/// Nodes are numbered in creation order: the root is 0 and the four
/// children of a split receive consecutive ids in top-left, top-right,
/// bottom-left, bottom-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node of every tree
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Creation-order index of the node
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Position of a child inside its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in creation order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Checkerboard tag of a child created in this quadrant.
    pub fn parity(self) -> u8 {
        match self {
            Quadrant::TopLeft | Quadrant::BottomRight => 0,
            Quadrant::TopRight | Quadrant::BottomLeft => 1,
        }
    }
}

/// Cardinal direction of an adjacency reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left = 0,
    Right = 1,
    Top = 2,
    Bottom = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
    ];

    /// The direction pointing the other way
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
        }
    }

    /// The two child quadrants that touch this side of their parent,
    /// in geometric order (top to bottom, or left to right).
    pub fn border_quadrants(self) -> (Quadrant, Quadrant) {
        match self {
            Direction::Left => (Quadrant::TopLeft, Quadrant::BottomLeft),
            Direction::Right => (Quadrant::TopRight, Quadrant::BottomRight),
            Direction::Top => (Quadrant::TopLeft, Quadrant::TopRight),
            Direction::Bottom => (Quadrant::BottomLeft, Quadrant::BottomRight),
        }
    }
}

/// Diagonal direction, reached by a vertical hop then a horizontal hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// `(vertical, horizontal)` components of the corner
    pub fn directions(self) -> (Direction, Direction) {
        match self {
            Corner::TopLeft => (Direction::Top, Direction::Left),
            Corner::TopRight => (Direction::Top, Direction::Right),
            Corner::BottomLeft => (Direction::Bottom, Direction::Left),
            Corner::BottomRight => (Direction::Bottom, Direction::Right),
        }
    }
}

/// Split a rectangle into its four quadrants, in [`Quadrant::ALL`] order.
///
/// The left/top halves get the floor of half the size; the odd pixel
/// goes to the right/bottom halves. Zero-sized halves are produced as is.
pub fn split_rect(rect: &Box) -> [Box; 4] {
    let hw = rect.w / 2;
    let hh = rect.h / 2;
    let (rw, bh) = (rect.w - hw, rect.h - hh);
    [
        Box::new_unchecked(rect.x, rect.y, hw, hh),
        Box::new_unchecked(rect.x + hw, rect.y, rw, hh),
        Box::new_unchecked(rect.x, rect.y + hh, hw, bh),
        Box::new_unchecked(rect.x + hw, rect.y + hh, rw, bh),
    ]
}

/// A node of the region quadtree
#[derive(Debug, Clone)]
pub struct QuadTreeNode {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) rect: Box,
    pub(crate) depth: u32,
    pub(crate) parity: u8,
    pub(crate) leaf_id: Option<u32>,
    pub(crate) average: Option<[f32; 3]>,
    pub(crate) children: Option<[NodeId; 4]>,
    pub(crate) neighbours: [Option<NodeId>; 4],
}

impl QuadTreeNode {
    pub(crate) fn new(
        id: NodeId,
        parent: Option<NodeId>,
        rect: Box,
        depth: u32,
        parity: u8,
    ) -> Self {
        Self {
            id,
            parent,
            rect,
            depth,
            parity,
            leaf_id: None,
            average: None,
            children: None,
            neighbours: [None; 4],
        }
    }

    /// Creation-order id of this node
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node this one was split from; `None` for the root
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Rectangle covered by this node
    #[inline]
    pub fn rect(&self) -> Box {
        self.rect
    }

    /// Depth below the root (root = 0)
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Checkerboard tag assigned at creation (0 or 1).
    #[inline]
    pub fn parity(&self) -> u8 {
        self.parity
    }

    /// Position in the tree's leaf sequence; `None` unless finalized.
    ///
    /// Zero-area nodes are childless but never finalized, so they report
    /// `None` here even though [`is_leaf`](Self::is_leaf) is true.
    #[inline]
    pub fn leaf_id(&self) -> Option<u32> {
        self.leaf_id
    }

    /// Per-channel mean over the node's rectangle, set on finalization.
    #[inline]
    pub fn average(&self) -> Option<[f32; 3]> {
        self.average
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    #[inline]
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.children
    }

    #[inline]
    pub fn child(&self, quadrant: Quadrant) -> Option<NodeId> {
        self.children.map(|c| c[quadrant as usize])
    }

    /// Adjacency reference in `dir`, `None` at the image border.
    #[inline]
    pub fn neighbour(&self, dir: Direction) -> Option<NodeId> {
        self.neighbours[dir as usize]
    }

    #[inline]
    pub(crate) fn set_neighbour(&mut self, dir: Direction, node: Option<NodeId>) {
        self.neighbours[dir as usize] = node;
    }
}
