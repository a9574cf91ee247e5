//! Leaf collection
//!
//! Border traversals return the leaves of a subtree that touch one of its
//! sides, descending only into the two children on that side. Results
//! are in geometric order: top to bottom for the left and right borders,
//! left to right for the top and bottom borders.
//!
//! Childless zero-area nodes count as leaves here even though they never
//! receive a leaf id.

use super::QuadTree;
use super::node::{Direction, NodeId, QuadTreeNode};

impl QuadTree {
    /// Append the leaves of `node` touching its `side` border to `out`.
    ///
    /// An absent node contributes nothing; a leaf contributes itself.
    pub fn border_leaves_into(&self, node: Option<NodeId>, side: Direction, out: &mut Vec<NodeId>) {
        let Some(start) = node else {
            return;
        };
        let (first, second) = side.border_quadrants();

        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            match self.nodes[id.index()].children {
                None => out.push(id),
                Some(children) => {
                    stack.push(children[second as usize]);
                    stack.push(children[first as usize]);
                }
            }
        }
    }

    /// Leaves of `node` touching its `side` border.
    pub fn border_leaves(&self, node: Option<NodeId>, side: Direction) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.border_leaves_into(node, side, &mut out);
        out
    }

    /// Leaves along the left edge of `node`, top to bottom
    pub fn left_leaves(&self, node: Option<NodeId>) -> Vec<NodeId> {
        self.border_leaves(node, Direction::Left)
    }

    /// Leaves along the right edge of `node`, top to bottom
    pub fn right_leaves(&self, node: Option<NodeId>) -> Vec<NodeId> {
        self.border_leaves(node, Direction::Right)
    }

    /// Leaves along the top edge of `node`, left to right
    pub fn top_leaves(&self, node: Option<NodeId>) -> Vec<NodeId> {
        self.border_leaves(node, Direction::Top)
    }

    /// Leaves along the bottom edge of `node`, left to right
    pub fn bottom_leaves(&self, node: Option<NodeId>) -> Vec<NodeId> {
        self.border_leaves(node, Direction::Bottom)
    }

    /// All leaves under `node` in pre-order (the node itself if it is a
    /// leaf).
    pub fn node_children(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            match self.nodes[id.index()].children {
                None => out.push(id),
                Some([tl, tr, bl, br]) => stack.extend([br, bl, tr, tl]),
            }
        }
        out
    }

    /// Leaves of `neighbour` that face `node`.
    ///
    /// A leaf neighbour is returned as is, whatever its depth. For an
    /// internal neighbour the facing side is found from the rectangles:
    /// a neighbour lying entirely to the right of `node` contributes its
    /// left-border leaves, and so on. A neighbour that is not beside
    /// `node` on any side contributes all of its leaves.
    pub fn node_children_toward(&self, node: NodeId, neighbour: Option<NodeId>) -> Vec<NodeId> {
        let Some(nb) = neighbour else {
            return Vec::new();
        };
        if self.nodes[nb.index()].is_leaf() {
            return vec![nb];
        }
        match facing_side(&self.nodes[node.index()], &self.nodes[nb.index()]) {
            Some(side) => self.border_leaves(Some(nb), side),
            None => self.node_children(nb),
        }
    }
}

/// Side of `neighbour` that faces `node`, if they sit side by side.
fn facing_side(node: &QuadTreeNode, neighbour: &QuadTreeNode) -> Option<Direction> {
    let (a, b) = (node.rect, neighbour.rect);
    if b.x >= a.right() {
        Some(Direction::Left)
    } else if b.right() <= a.x {
        Some(Direction::Right)
    } else if b.y >= a.bottom() {
        Some(Direction::Top)
    } else if b.bottom() <= a.y {
        Some(Direction::Bottom)
    } else {
        None
    }
}
