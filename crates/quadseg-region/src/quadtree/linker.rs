//! Adjacency linking
//!
//! Runs once after decomposition. Each internal node hands its own
//! references down to its children, stepping one level into the neighbour
//! subtree when that subtree is split: the top-left child's left
//! reference becomes the left neighbour's top-right child, and so on.
//! A child's references therefore never point deeper than the child.

use super::QuadTree;
use super::node::{Direction, NodeId, Quadrant};

impl QuadTree {
    /// `neighbour`'s child in `quadrant`, or `neighbour` itself if it has
    /// no children.
    fn refine(&self, neighbour: Option<NodeId>, quadrant: Quadrant) -> Option<NodeId> {
        neighbour.map(|n| self.nodes[n.index()].child(quadrant).unwrap_or(n))
    }

    /// Set the outward-facing references of every child in the tree.
    pub(super) fn fix_neighbours(&mut self) {
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            let Some([tl, tr, bl, br]) = node.children else {
                continue;
            };
            let left = node.neighbour(Direction::Left);
            let right = node.neighbour(Direction::Right);
            let top = node.neighbour(Direction::Top);
            let bottom = node.neighbour(Direction::Bottom);

            let links = [
                (tl, Direction::Left, self.refine(left, Quadrant::TopRight)),
                (tl, Direction::Top, self.refine(top, Quadrant::BottomLeft)),
                (tr, Direction::Right, self.refine(right, Quadrant::TopLeft)),
                (tr, Direction::Top, self.refine(top, Quadrant::BottomRight)),
                (bl, Direction::Left, self.refine(left, Quadrant::BottomRight)),
                (bl, Direction::Bottom, self.refine(bottom, Quadrant::TopLeft)),
                (br, Direction::Right, self.refine(right, Quadrant::BottomLeft)),
                (br, Direction::Bottom, self.refine(bottom, Quadrant::TopRight)),
            ];
            for (child, dir, target) in links {
                self.nodes[child.index()].set_neighbour(dir, target);
            }

            for child in [br, bl, tr, tl] {
                if !self.nodes[child.index()].is_leaf() {
                    stack.push(child);
                }
            }
        }

        log::debug!("linked neighbours of {} nodes", self.nodes.len());
    }
}
