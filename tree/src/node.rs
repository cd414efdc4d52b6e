use core::fmt;
use core::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns `true` if the color is [`Red`].
    ///
    /// [`Red`]: Color::Red
    #[must_use]
    pub(crate) fn is_red(&self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns `true` if the color is [`Black`].
    ///
    /// [`Black`]: Color::Black
    #[must_use]
    pub(crate) fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }
}

/// Which child slot of its parent a node occupies.
///
/// Every rebalancing case has a mirror image, the algorithms are written once
/// in terms of a `Side` and its [`opposite`](Side::opposite).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Stable handle of a node inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) key: T,
    pub(crate) color: Color,
    // Navigation only, the arena owns every node.
    pub(crate) parent: Option<NodeId>,
    children: [Option<NodeId>; 2],
}

impl<T> Node<T> {
    /// New nodes always start as red leaves.
    pub(crate) fn leaf(key: T, parent: Option<NodeId>) -> Self {
        Self {
            key,
            color: Color::Red,
            parent,
            children: [None, None],
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        self.children[side.index()]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        self.children[side.index()] = child;
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<NodeId> {
        self.child(Side::Left)
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<NodeId> {
        self.child(Side::Right)
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("color", &self.color)
            .field("parent", &self.parent)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

/// Slot storage for the nodes of one tree.
///
/// Slots released by [`Arena::release`] are recycled by later allocations so
/// a tree that sees a steady stream of inserts and deletes doesn't grow.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    vacant: Vec<NodeId>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.vacant.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.0].is_none());
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    pub(crate) fn release(&mut self, id: NodeId) -> Node<T> {
        match self.slots[id.0].take() {
            Some(node) => {
                self.vacant.push(id);
                node
            }
            None => unreachable!("node {id:?} released twice"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }

    /// Color of a possibly absent node, absent nodes count as black.
    #[inline]
    pub(crate) fn color(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self[id].color)
    }

    #[inline]
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        self[id].color = color;
    }

    /// Position of `id` below its parent, `None` for the root.
    #[inline]
    pub(crate) fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self[id].parent?;
        if self[parent].left() == Some(id) {
            Some(Side::Left)
        } else {
            debug_assert_eq!(self[parent].right(), Some(id));
            Some(Side::Right)
        }
    }

    /// Walks down on `side` as far as possible, giving the minimum (`Left`) or
    /// maximum (`Right`) of the subtree rooted at `id`.
    pub(crate) fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(child) = self[id].child(side) {
            id = child;
        }
        id
    }

    /// In-order neighbour of `id` in direction `side`: `Right` gives the
    /// successor, `Left` the predecessor.
    pub(crate) fn step(&self, mut id: NodeId, side: Side) -> Option<NodeId> {
        //       +---------- 34 ---------+
        //       |                       |
        // +---- 2 ----+                 58 ----+
        // |           |                        |
        // 1      +--- 9 ----+              +-- 77 --+
        //        |          |              |        |
        //     +- 6       +- 20 -+      +- 71 -+     82
        //     |          |      |      |      |
        //     5         12 -+   24    67      75
        //                   |
        //                   13
        //
        // successor: 9 -> 12, 58 -> 67 by the minimum of the right subtree,
        // 6 -> 9, 13 -> 20, 24 -> 34 by climbing until we come up from a left child.
        if let Some(child) = self[id].child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut parent = self[id].parent;
        while let Some(p) = parent {
            if self[p].child(side.opposite()) == Some(id) {
                break;
            }
            id = p;
            parent = self[p].parent;
        }
        parent
    }

    #[inline]
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Side::Right)
    }

    #[inline]
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Side::Left)
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id.0] {
            Some(node) => node,
            None => unreachable!("dangling node id {id:?}"),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id.0] {
            Some(node) => node,
            None => unreachable!("dangling node id {id:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::leaf(1, None));
        let b = arena.alloc(Node::leaf(2, Some(a)));
        assert_ne!(a, b);

        let node = arena.release(a);
        assert_eq!(node.key, 1);
        let c = arena.alloc(Node::leaf(3, None));
        assert_eq!(a, c);
        assert_eq!(arena[c].key, 3);
        assert_eq!(arena[b].key, 2);
    }

    #[test]
    #[should_panic]
    fn double_release_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::leaf(1, None));
        arena.release(a);
        arena.release(a);
    }

    #[test]
    fn absent_node_is_black() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::leaf(1, None));
        assert!(arena.color(None).is_black());
        assert!(arena.color(Some(a)).is_red());
        arena.set_color(a, Color::Black);
        assert!(arena.color(Some(a)).is_black());
    }

    #[test]
    fn step_walks_in_order() {
        //     +- 2 -+
        //     |     |
        //     1   +-4
        //         |
        //         3
        let mut arena = Arena::new();
        let two = arena.alloc(Node::leaf(2, None));
        let one = arena.alloc(Node::leaf(1, Some(two)));
        let four = arena.alloc(Node::leaf(4, Some(two)));
        let three = arena.alloc(Node::leaf(3, Some(four)));
        arena[two].set_child(Side::Left, Some(one));
        arena[two].set_child(Side::Right, Some(four));
        arena[four].set_child(Side::Left, Some(three));

        assert_eq!(arena.side_of(two), None);
        assert_eq!(arena.side_of(one), Some(Side::Left));
        assert_eq!(arena.side_of(four), Some(Side::Right));

        assert_eq!(arena.extreme(two, Side::Left), one);
        assert_eq!(arena.extreme(two, Side::Right), four);

        assert_eq!(arena.successor(one), Some(two));
        assert_eq!(arena.successor(two), Some(three));
        assert_eq!(arena.successor(three), Some(four));
        assert_eq!(arena.successor(four), None);

        assert_eq!(arena.predecessor(four), Some(three));
        assert_eq!(arena.predecessor(three), Some(two));
        assert_eq!(arena.predecessor(two), Some(one));
        assert_eq!(arena.predecessor(one), None);
    }
}
