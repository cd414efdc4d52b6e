use core::cmp::Ordering;
use core::fmt;
use core::mem;

use log::{debug, trace};

use crate::compare::{Compare, Natural};
use crate::error::DuplicateKey;
use crate::iter::{IntoIter, Iter};
use crate::node::{Arena, Color, Node, NodeId, Side};

/// An ordered set of keys kept balanced by the red-black rules.
///
/// Keys are ordered by the comparator `C`, [`Natural`] order by default.
/// Equal keys are rejected, the tree never holds two keys that compare equal.
///
/// ```
/// use red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(20).unwrap();
/// tree.insert(10).unwrap();
/// assert!(tree.insert(10).is_err());
/// assert!(tree.contains(&20));
/// assert!(tree.delete(&20));
/// assert_eq!(tree.iter().collect::<Vec<_>>(), [&10]);
/// ```
#[derive(Clone)]
pub struct RedBlackTree<T, C = Natural> {
    pub(crate) nodes: Arena<T>,
    pub(crate) root: Option<NodeId>,
    pub(crate) len: usize,
    pub(crate) cmp: C,
}

impl<T> RedBlackTree<T> {
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C> Default for RedBlackTree<T, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> RedBlackTree<T, C> {
    pub const fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            cmp,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Key stored at the root.
    pub fn root(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[root].key)
    }

    /// Smallest key.
    pub fn first(&self) -> Option<&T> {
        self.root
            .map(|root| &self.nodes[self.nodes.extreme(root, Side::Left)].key)
    }

    /// Largest key.
    pub fn last(&self) -> Option<&T> {
        self.root
            .map(|root| &self.nodes[self.nodes.extreme(root, Side::Right)].key)
    }

    /// Number of nodes on the longest path from the root down to a leaf.
    pub fn height(&self) -> usize {
        // explicit stack, depth is bounded by 2 * log2(n + 1) anyway
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left().map(|l| (l, depth + 1)));
            stack.extend(node.right().map(|r| (r, depth + 1)));
        }
        height
    }

    /// Iterates the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        match self.root {
            Some(root) => Iter::new(
                &self.nodes,
                self.nodes.extreme(root, Side::Left),
                self.nodes.extreme(root, Side::Right),
                self.len,
            ),
            None => Iter::empty(&self.nodes),
        }
    }

    /// Rotates the subtree rooted at `pivot` towards `dir`.
    ///
    /// The child of `pivot` on the opposite side of `dir` takes `pivot`'s
    /// place and `pivot` becomes its child on `dir`. Colors are left as they
    /// are. Does nothing if there's no child to promote.
    fn rotate(&mut self, pivot: NodeId, dir: Side) {
        //    p                        p
        //    |                        |
        // +-pivot-+                +- up -+
        // |       |       -->      |      |
        // a    +- up -+        +-pivot-+  c
        //      |      |        |       |
        //      b      c        a       b
        // rotating towards Left, a, b, c can be any subtrees.
        // Rotating towards Right is the mirror image.
        let up_side = dir.opposite();
        let Some(up) = self.nodes[pivot].child(up_side) else {
            return;
        };

        // attach b to pivot
        let inner = self.nodes[up].child(dir);
        self.nodes[pivot].set_child(up_side, inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(pivot);
        }

        // attach up to p
        let parent = self.nodes[pivot].parent;
        self.replace_child(pivot, Some(up));
        self.nodes[up].parent = parent;

        // attach pivot to up
        self.nodes[up].set_child(dir, Some(pivot));
        self.nodes[pivot].parent = Some(up);
    }

    /// Points the link that owns `old` (its parent's child slot or the root)
    /// at `new` instead. `old`'s own parent link is left as is.
    fn replace_child(&mut self, old: NodeId, new: Option<NodeId>) {
        match (self.nodes[old].parent, self.nodes.side_of(old)) {
            (Some(parent), Some(side)) => self.nodes[parent].set_child(side, new),
            _ => self.root = new,
        }
    }

    /// Replaces subtree `old` with subtree `new`.
    fn transplant(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.nodes[old].parent;
        self.replace_child(old, new);
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    fn insert_fixup(&mut self, new_node: NodeId) {
        let mut node = new_node;
        while let Some(mut parent) = self.nodes[node].parent {
            if self.nodes[parent].color.is_black() {
                break;
            }
            debug_assert!(self.nodes[node].color.is_red());

            // The only violation is a red node with a red parent. Since the root
            // is black the red parent has a parent of its own.
            let Some(grand_parent) = self.nodes[parent].parent else {
                unreachable!("red node cannot be the root");
            };
            debug_assert!(self.nodes[grand_parent].color.is_black());
            let Some(parent_side) = self.nodes.side_of(parent) else {
                unreachable!("red parent is not the root");
            };
            let uncle = self.nodes[grand_parent].child(parent_side.opposite());

            match uncle {
                Some(uncle) if self.nodes[uncle].color.is_red() => {
                    //     +--- gp:b ---+               +--- gp:r ---+
                    //     |            |               |            |
                    //  + p:r +      + u:r +   -->   + p:b +      + u:b +
                    //  |     |      |     |         |     |      |     |
                    // n:r    a      b     c        n:r    a      b     c
                    //
                    // Black heights stay the same, but gp may now have a red parent.
                    trace!("insert fixup: red uncle, recolor and move up");
                    self.nodes.set_color(parent, Color::Black);
                    self.nodes.set_color(uncle, Color::Black);
                    self.nodes.set_color(grand_parent, Color::Red);
                    node = grand_parent;
                }
                _ => {
                    if self.nodes[parent].child(parent_side.opposite()) == Some(node) {
                        //       +-- gp:b --+                 +-- gp:b --+
                        //       |          |                 |          |
                        //  +-- p:r --+     u      -->    +- n:r --+     u
                        //  |         |                   |        |
                        //  a     +- n:r -+           +- p:r -+    c
                        //        |       |           |       |
                        //        b       c           a       b
                        //
                        // inner grandchild, rotate it to the outside and swap roles
                        trace!("insert fixup: black uncle, inner grandchild");
                        self.rotate(parent, parent_side);
                        mem::swap(&mut parent, &mut node);
                    }

                    //           +-- gp:b --+            +----- p:b -----+
                    //           |          |            |               |
                    //      +-- p:r --+     u   -->   +- n:r -+     +- gp:r -+
                    //      |         |               |       |     |        |
                    //  +- n:r -+     c               a       b     c        u
                    //  |       |
                    //  a       b
                    trace!("insert fixup: black uncle, outer grandchild");
                    self.nodes.set_color(parent, Color::Black);
                    self.nodes.set_color(grand_parent, Color::Red);
                    self.rotate(grand_parent, parent_side.opposite());
                    break;
                }
            }
        }

        if let Some(root) = self.root {
            self.nodes.set_color(root, Color::Black);
        }
    }

    /// Unlinks `node` from the tree, rebalances and returns its key.
    fn delete_node(&mut self, node: NodeId) -> T {
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
        let (left, right) = (self.nodes[node].left(), self.nodes[node].right());
        let mut removed_color = self.nodes[node].color;
        // `x` moves into the position left behind by the spliced node.
        // It may be absent, so its parent is tracked separately.
        let x;
        let x_parent;

        match (left, right) {
            (None, child) | (child, None) => {
                // At most one child: splice node out, e.g. 1, 6, 12, 58 above.
                x = child;
                x_parent = self.nodes[node].parent;
                self.transplant(node, child);
            }
            (Some(left), Some(right)) => {
                // Two children: the successor (minimum of the right subtree) has no
                // left child, splice it out and put it in node's place,
                // e.g. 20 is replaced by 24 and 9 by 12 above.
                let successor = self.nodes.extreme(right, Side::Left);
                removed_color = self.nodes[successor].color;
                x = self.nodes[successor].right();

                if successor == right {
                    x_parent = Some(successor);
                } else {
                    x_parent = self.nodes[successor].parent;
                    self.transplant(successor, x);
                    self.nodes[successor].set_child(Side::Right, Some(right));
                    self.nodes[right].parent = Some(successor);
                }

                self.transplant(node, Some(successor));
                self.nodes[successor].set_child(Side::Left, Some(left));
                self.nodes[left].parent = Some(successor);
                self.nodes[successor].color = self.nodes[node].color;
            }
        }

        // Removing a red node cannot change any black height.
        if removed_color.is_black() {
            self.delete_fixup(x, x_parent);
        }

        self.len -= 1;
        self.nodes.release(node).key
    }

    fn delete_fixup(&mut self, mut x: Option<NodeId>, mut x_parent: Option<NodeId>) {
        // Every path through `x` is one black node short ("doubly black" x).
        // A red x absorbs the extra black after the loop, so does the root.
        while x != self.root && self.nodes.color(x).is_black() {
            let Some(parent) = x_parent else {
                unreachable!("only the root has no parent");
            };
            // An absent x is on the side where parent has no child. The other side
            // must hold a node, otherwise black heights below parent would differ.
            let side = if self.nodes[parent].left() == x {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.opposite();
            let Some(mut sibling) = self.nodes[parent].child(far) else {
                unreachable!("doubly black node without a sibling");
            };

            if self.nodes[sibling].color.is_red() {
                //     +--- p:b ---+                 +--- s:b ---+
                //     |           |                 |           |
                // +- x:b -+   +- s:r -+   -->   +- p:r -+       d
                // |       |   |       |         |       |
                // a       b   c       d       x:b       c
                //
                // x now has a red parent and a black sibling (c), handled below.
                trace!("delete fixup: red sibling");
                self.nodes.set_color(sibling, Color::Black);
                self.nodes.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = match self.nodes[parent].child(far) {
                    Some(sibling) => sibling,
                    None => unreachable!("red sibling has black children"),
                };
            }

            let near_child = self.nodes[sibling].child(side);
            let far_child = self.nodes[sibling].child(far);

            if self.nodes.color(near_child).is_black() && self.nodes.color(far_child).is_black() {
                //     +--- p:? ---+                +--- p:? ---+
                //     |           |                |           |
                // +- x:b -+   +- s:b -+   -->  +- x:b -+   +- s:r -+
                // |       |   |       |        |       |   |       |
                // a       b  c:b     d:b       a       b  c:b     d:b
                //
                // Take one black off both x and s and push it up to p.
                trace!("delete fixup: black sibling with black children, move up");
                self.nodes.set_color(sibling, Color::Red);
                x = Some(parent);
                x_parent = self.nodes[parent].parent;
                continue;
            }

            if self.nodes.color(far_child).is_black() {
                //   +--- p:? ---+                  +--- p:? ---+
                //   |           |                  |           |
                //  x:b     +- s:b -+      -->     x:b      +- c:b -+
                //          |       |                       |       |
                //      +- c:r -+  d:b                      e   +- s:r -+
                //      |       |                               |       |
                //      e       f                               f      d:b
                trace!("delete fixup: black sibling with red near child");
                if let Some(near_child) = near_child {
                    self.nodes.set_color(near_child, Color::Black);
                }
                self.nodes.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = match self.nodes[parent].child(far) {
                    Some(sibling) => sibling,
                    None => unreachable!("rotation promoted the red near child"),
                };
            }

            //     +--- p:c ---+                    +--- s:c ---+
            //     |           |                    |           |
            // +- x:b -+   +- s:b -+   -->      +- p:b -+      d:b
            // |       |   |       |            |       |
            // a       b   c      d:r         x:b       c
            //
            // The black lent by p (or s) fills the gap on x's paths, recoloring d
            // keeps d's paths as they were. Done.
            trace!("delete fixup: black sibling with red far child");
            let parent_color = self.nodes[parent].color;
            self.nodes.set_color(sibling, parent_color);
            self.nodes.set_color(parent, Color::Black);
            if let Some(far_child) = self.nodes[sibling].child(far) {
                self.nodes.set_color(far_child, Color::Black);
            }
            self.rotate(parent, side);
            x = self.root;
            break;
        }

        if let Some(x) = x {
            self.nodes.set_color(x, Color::Black);
        }
    }
}

impl<T, C> RedBlackTree<T, C>
where
    C: Compare<T>,
{
    /// Descends from the root comparing `key` against each node.
    fn search(&self, key: &T) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            current = match self.cmp.compare(key, &self.nodes[id].key) {
                Ordering::Less => self.nodes[id].left(),
                Ordering::Equal => return Some(id),
                Ordering::Greater => self.nodes[id].right(),
            };
        }
        None
    }

    pub fn contains(&self, key: &T) -> bool {
        self.search(key).is_some()
    }

    /// Returns the stored key equal to `key`.
    pub fn get(&self, key: &T) -> Option<&T> {
        self.search(key).map(|id| &self.nodes[id].key)
    }

    /// Next larger stored key after `key`, which must be present.
    pub fn successor(&self, key: &T) -> Option<&T> {
        let id = self.search(key)?;
        self.nodes.successor(id).map(|id| &self.nodes[id].key)
    }

    /// Next smaller stored key before `key`, which must be present.
    pub fn predecessor(&self, key: &T) -> Option<&T> {
        let id = self.search(key)?;
        self.nodes.predecessor(id).map(|id| &self.nodes[id].key)
    }

    /// Inserts `key`.
    ///
    /// If an equal key is already stored the tree is left unchanged and `key`
    /// is returned inside the error.
    pub fn insert(&mut self, key: T) -> Result<(), DuplicateKey<T>> {
        // Move left/right down the tree until we find an empty slot
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(id) = current {
            parent = Some(id);
            side = match self.cmp.compare(&key, &self.nodes[id].key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => {
                    trace!("insert rejected, key already present");
                    return Err(DuplicateKey::new(key));
                }
                Ordering::Greater => Side::Right,
            };
            current = self.nodes[id].child(side);
        }

        let new_node = self.nodes.alloc(Node::leaf(key, parent));
        match parent {
            Some(parent) => self.nodes[parent].set_child(side, Some(new_node)),
            None => self.root = Some(new_node),
        }

        self.len += 1;
        self.insert_fixup(new_node);
        Ok(())
    }

    /// Removes `key`, returns `false` if it wasn't present.
    pub fn delete(&mut self, key: &T) -> bool {
        self.remove(key).is_some()
    }

    /// Removes `key` and returns the key that was stored.
    pub fn remove(&mut self, key: &T) -> Option<T> {
        self.search(key).map(|id| self.delete_node(id))
    }

    /// Inserts every key, skipping those already present.
    ///
    /// Returns how many keys were inserted.
    pub fn insert_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut inserted = 0;
        let mut rejected = 0;
        for key in keys {
            match self.insert(key) {
                Ok(()) => inserted += 1,
                Err(_) => rejected += 1,
            }
        }
        debug!("bulk insert: {inserted} inserted, {rejected} duplicates skipped");
        inserted
    }

    /// Deletes every key, returns how many were actually present.
    pub fn delete_all<'a, I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut removed = 0;
        let mut missing = 0;
        for key in keys {
            if self.delete(key) {
                removed += 1;
            } else {
                missing += 1;
            }
        }
        debug!("bulk delete: {removed} removed, {missing} not found");
        removed
    }
}

impl<T, C> Extend<T> for RedBlackTree<T, C>
where
    C: Compare<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<T, C> FromIterator<T> for RedBlackTree<T, C>
where
    C: Compare<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.insert_all(iter);
        tree
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for RedBlackTree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.nodes, self.root)
    }
}

impl<T, C> fmt::Debug for RedBlackTree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Nodes<'a, T, C>(&'a RedBlackTree<T, C>);

        impl<T, C> fmt::Debug for Nodes<'_, T, C>
        where
            T: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let tree = self.0;
                let mut f = f.debug_list();
                let mut next = tree.root.map(|root| tree.nodes.extreme(root, Side::Left));
                while let Some(id) = next {
                    let node = &tree.nodes[id];
                    f.entry(&(&node.key, node.color));
                    next = tree.nodes.successor(id);
                }
                f.finish()
            }
        }

        f.debug_struct("RedBlackTree")
            .field("len", &self.len)
            .field("root", &self.root())
            .field("nodes", &Nodes(self))
            .finish()
    }
}

/// Prints the keys in order, each marked `●` if black or `○` if red.
impl<T, C> fmt::Display for RedBlackTree<T, C>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut next = self.root.map(|root| self.nodes.extreme(root, Side::Left));
        let mut first = true;
        while let Some(id) = next {
            let node = &self.nodes[id];
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            let mark = if node.color.is_black() { '●' } else { '○' };
            write!(f, "{}{mark}", node.key)?;
            next = self.nodes.successor(id);
        }
        Ok(())
    }
}
