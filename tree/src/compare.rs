use core::cmp::Ordering;

/// A strict weak ordering over `T`.
///
/// Only [`less`](Compare::less) is required. Two keys are considered equal if
/// neither is less than the other.
///
/// Any `Fn(&T, &T) -> bool` closure is a comparator:
///
/// ```
/// use red_black_tree::RedBlackTree;
///
/// let mut tree: RedBlackTree<i32, _> = RedBlackTree::with_comparator(|a: &i32, b: &i32| a > b);
/// tree.insert_all([1, 3, 2]);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
pub trait Compare<T: ?Sized> {
    fn less(&self, a: &T, b: &T) -> bool;

    fn compare(&self, a: &T, b: &T) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// The natural order of `T`, as given by its [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }

    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
