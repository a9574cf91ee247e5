//! Neighbour queries
//!
//! A cardinal query follows one adjacency reference and collects the
//! leaves on the facing border of the subtree it lands on. A diagonal
//! query takes two hops (vertical, then horizontal) and collects both
//! inner borders of the corner subtree, side border first. Leaves on both
//! borders appear twice.
//!
//! Queries never fail. A missing reference (the image border) yields an
//! empty list; use [`QuadTree::has_neighbour`] to tell that apart from a
//! neighbour without leaves.

use super::QuadTree;
use super::node::{Corner, Direction, NodeId};

impl QuadTree {
    /// Leaves bordering `node` on side `dir`.
    pub fn neighbours(&self, node: NodeId, dir: Direction) -> Vec<NodeId> {
        self.border_leaves(self.node(node).neighbour(dir), dir.opposite())
    }

    pub fn neighbours_left(&self, node: NodeId) -> Vec<NodeId> {
        self.neighbours(node, Direction::Left)
    }

    pub fn neighbours_right(&self, node: NodeId) -> Vec<NodeId> {
        self.neighbours(node, Direction::Right)
    }

    pub fn neighbours_top(&self, node: NodeId) -> Vec<NodeId> {
        self.neighbours(node, Direction::Top)
    }

    pub fn neighbours_bottom(&self, node: NodeId) -> Vec<NodeId> {
        self.neighbours(node, Direction::Bottom)
    }

    /// Leaves of the subtree diagonally adjacent to `node` at `corner`.
    ///
    /// The result is the corner subtree's side-border leaves followed by
    /// its top- or bottom-border leaves, without deduplication.
    pub fn diagonal_neighbours(&self, node: NodeId, corner: Corner) -> Vec<NodeId> {
        let (vertical, horizontal) = corner.directions();
        let target = self
            .node(node)
            .neighbour(vertical)
            .and_then(|v| self.node(v).neighbour(horizontal));
        if target.is_none() {
            return Vec::new();
        }

        let mut out = Vec::new();
        self.border_leaves_into(target, horizontal.opposite(), &mut out);
        self.border_leaves_into(target, vertical.opposite(), &mut out);
        out
    }

    pub fn neighbours_top_left(&self, node: NodeId) -> Vec<NodeId> {
        self.diagonal_neighbours(node, Corner::TopLeft)
    }

    pub fn neighbours_top_right(&self, node: NodeId) -> Vec<NodeId> {
        self.diagonal_neighbours(node, Corner::TopRight)
    }

    pub fn neighbours_bottom_left(&self, node: NodeId) -> Vec<NodeId> {
        self.diagonal_neighbours(node, Corner::BottomLeft)
    }

    pub fn neighbours_bottom_right(&self, node: NodeId) -> Vec<NodeId> {
        self.diagonal_neighbours(node, Corner::BottomRight)
    }

    /// Whether `node` has an adjacency reference in `dir`.
    ///
    /// False exactly when `node` touches the image border on that side.
    #[inline]
    pub fn has_neighbour(&self, node: NodeId, dir: Direction) -> bool {
        self.node(node).neighbour(dir).is_some()
    }
}
