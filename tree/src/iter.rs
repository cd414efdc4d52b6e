use core::iter::FusedIterator;

use crate::node::{Arena, NodeId, Side};

/// Borrowing iterator over the keys of a [`RedBlackTree`] in ascending order.
///
/// Created by [`RedBlackTree::iter`]. Advancing moves to the in-order
/// successor of the current node, iterating from the back moves to the
/// predecessor.
///
/// [`RedBlackTree`]: crate::RedBlackTree
/// [`RedBlackTree::iter`]: crate::RedBlackTree::iter
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    // front and back meet in the middle, this tells when to stop
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, first: NodeId, last: NodeId, len: usize) -> Self {
        Self {
            nodes,
            front: Some(first),
            back: Some(last),
            remaining: len,
        }
    }

    pub(crate) fn empty(nodes: &'a Arena<T>) -> Self {
        Self {
            nodes,
            front: None,
            back: None,
            remaining: 0,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.front?;
        self.front = self.nodes.successor(current);
        self.remaining -= 1;
        Some(&self.nodes[current].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.back?;
        self.back = self.nodes.predecessor(current);
        self.remaining -= 1;
        Some(&self.nodes[current].key)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over the keys of a [`RedBlackTree`] in ascending order.
///
/// [`RedBlackTree`]: crate::RedBlackTree
pub struct IntoIter<T> {
    keys: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(mut nodes: Arena<T>, root: Option<NodeId>) -> Self {
        let mut order = Vec::new();
        let mut next = root.map(|root| nodes.extreme(root, Side::Left));
        while let Some(id) = next {
            order.push(id);
            next = nodes.successor(id);
        }

        let keys: Vec<T> = order.into_iter().map(|id| nodes.release(id).key).collect();
        Self {
            keys: keys.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.keys.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use crate::RedBlackTree;

    fn sample() -> RedBlackTree<i32> {
        [12, 5, 9, 2, 18, 15, 13, 17, 19].into_iter().collect()
    }

    #[test]
    fn empty() {
        let tree = RedBlackTree::<i32>::new();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(tree.into_iter().next(), None);
    }

    #[test]
    fn ascending() {
        let tree = sample();
        let items: Vec<_> = tree.iter().copied().collect();
        assert_eq!(items, [2, 5, 9, 12, 13, 15, 17, 18, 19]);

        // restartable
        let again: Vec<_> = (&tree).into_iter().copied().collect();
        assert_eq!(items, again);
    }

    #[test]
    fn from_both_ends() {
        let tree = sample();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 9);
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&19));
        assert_eq!(iter.next_back(), Some(&18));
        assert_eq!(iter.len(), 6);

        let rest: Vec<_> = iter.clone().copied().collect();
        assert_eq!(rest, [5, 9, 12, 13, 15, 17]);

        let rest: Vec<_> = iter.rev().copied().collect();
        assert_eq!(rest, [17, 15, 13, 12, 9, 5]);
    }

    #[test]
    fn ends_meet() {
        let tree = sample();
        let mut iter = tree.iter();
        for _ in 0..4 {
            iter.next();
            iter.next_back();
        }
        assert_eq!(iter.next(), Some(&13));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn into_iter_moves_keys_out() {
        let tree: RedBlackTree<String> = ["pear", "apple", "fig"]
            .into_iter()
            .map(String::from)
            .collect();
        let keys: Vec<String> = tree.into_iter().collect();
        assert_eq!(keys, ["apple", "fig", "pear"]);
    }

    #[test]
    fn into_iter_after_deletes() {
        let mut tree = sample();
        tree.delete_all(&[2, 13, 19]);
        let keys: Vec<_> = tree.into_iter().rev().collect();
        assert_eq!(keys, [18, 17, 15, 12, 9, 5]);
    }
}
