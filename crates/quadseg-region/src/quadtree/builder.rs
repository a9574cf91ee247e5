//! Top-down decomposition
//!
//! Nodes are visited in pre-order (node, then its top-left, top-right,
//! bottom-left and bottom-right subtrees). A LIFO work stack stands in for
//! recursion; children are pushed in reverse so they pop in order, which
//! keeps creation ids and leaf ids identical to a recursive descent.

use super::node::{Direction, NodeId, QuadTreeNode, Quadrant, split_rect};
use super::{HomogeneityEvaluator, QuadTree};
use crate::error::RegionResult;

impl QuadTree {
    /// Split or finalize every node reachable from the root.
    pub(super) fn process<E>(&mut self, evaluator: &E) -> RegionResult<()>
    where
        E: HomogeneityEvaluator + ?Sized,
    {
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            let rect = self.nodes[id.index()].rect;
            if rect.is_empty() {
                log::trace!("node {} is empty, skipped", id.index());
                continue;
            }

            let statistic = evaluator.evaluate(&self.image, &rect)?;
            if self.options.should_split(statistic, rect.w, rect.h) {
                let [tl, tr, bl, br] = self.split(id);
                stack.extend([br, bl, tr, tl]);
            } else {
                self.finalize(id)?;
            }
        }

        Ok(())
    }

    /// Create the four children of `id` and link them to each other.
    ///
    /// Only the inward-facing references are set here; the outward ones
    /// are filled in by the linking pass once the whole tree exists.
    fn split(&mut self, id: NodeId) -> [NodeId; 4] {
        let parent = &self.nodes[id.index()];
        let rects = split_rect(&parent.rect);
        let depth = parent.depth + 1;

        let first = self.nodes.len();
        let children = [
            NodeId::new(first),
            NodeId::new(first + 1),
            NodeId::new(first + 2),
            NodeId::new(first + 3),
        ];
        for (q, (&child, rect)) in Quadrant::ALL.iter().zip(children.iter().zip(rects)) {
            self.nodes.push(QuadTreeNode::new(child, Some(id), rect, depth, q.parity()));
        }
        self.nodes[id.index()].children = Some(children);

        let [tl, tr, bl, br] = children;
        let links = [
            (tl, Direction::Right, tr),
            (tl, Direction::Bottom, bl),
            (tr, Direction::Left, tl),
            (tr, Direction::Bottom, br),
            (bl, Direction::Top, tl),
            (bl, Direction::Right, br),
            (br, Direction::Left, bl),
            (br, Direction::Top, tr),
        ];
        for (from, dir, to) in links {
            self.nodes[from.index()].set_neighbour(dir, Some(to));
        }

        log::trace!(
            "split node {} ({}x{} at {},{}) at depth {}",
            id.index(),
            rects[0].w + rects[1].w,
            rects[0].h + rects[2].h,
            rects[0].x,
            rects[0].y,
            depth - 1
        );
        children
    }

    /// Append `id` to the leaf sequence and stamp it into the mask.
    fn finalize(&mut self, id: NodeId) -> RegionResult<()> {
        let leaf_id = self.leaves.len() as u32;
        let node = &self.nodes[id.index()];
        let rect = node.rect;
        let depth = node.depth;

        let stats = self.image.channel_stats_in_rect(&rect)?;
        self.mask.fill_rect(&rect, leaf_id);

        let node = &mut self.nodes[id.index()];
        node.leaf_id = Some(leaf_id);
        node.average = Some(stats.mean);
        self.leaves.push(id);
        self.max_depth = self.max_depth.max(depth);

        log::trace!(
            "leaf {} = node {} ({}x{} at {},{}), depth {}",
            leaf_id,
            id.index(),
            rect.w,
            rect.h,
            rect.x,
            rect.y,
            depth
        );
        Ok(())
    }
}
