use core::cmp::Ordering;

use crate::compare::Compare;
use crate::error::InvariantViolation;
use crate::node::{NodeId, Side};
use crate::red_black_tree::RedBlackTree;

impl<T, C> RedBlackTree<T, C>
where
    C: Compare<T>,
{
    /// Checks every red-black and search tree property.
    ///
    /// Walks the whole tree, so it is meant for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root else {
            return match self.len {
                0 => Ok(()),
                len => Err(InvariantViolation::LengthMismatch { len, counted: 0 }),
            };
        };

        if self.nodes[root].parent.is_some() {
            return Err(InvariantViolation::BrokenParentLink { depth: 0 });
        }
        if self.nodes[root].color.is_red() {
            return Err(InvariantViolation::RedRoot);
        }

        let mut counted = 0;
        self.check_subtree(root, 0, &mut counted)?;
        if counted != self.len {
            return Err(InvariantViolation::LengthMismatch {
                len: self.len,
                counted,
            });
        }

        // in-order walk through the same successor links the iterator uses
        let mut previous = None;
        for (position, key) in self.iter().enumerate() {
            if let Some(previous) = previous {
                if self.cmp.compare(previous, key) != Ordering::Less {
                    return Err(InvariantViolation::OutOfOrder { position });
                }
            }
            previous = Some(key);
        }

        Ok(())
    }

    /// Returns the black height of the subtree at `id`.
    fn check_subtree(
        &self,
        id: NodeId,
        depth: usize,
        counted: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        *counted += 1;
        let node = &self.nodes[id];

        let mut heights = [0; 2];
        for (i, side) in [Side::Left, Side::Right].into_iter().enumerate() {
            let Some(child) = node.child(side) else {
                continue;
            };
            let child_node = &self.nodes[child];
            if child_node.parent != Some(id) {
                return Err(InvariantViolation::BrokenParentLink { depth: depth + 1 });
            }
            if node.color.is_red() && child_node.color.is_red() {
                return Err(InvariantViolation::RedRedEdge { depth: depth + 1 });
            }
            heights[i] = self.check_subtree(child, depth + 1, counted)?;
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { left, right });
        }
        Ok(left + usize::from(node.color.is_black()))
    }
}
