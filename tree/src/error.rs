use core::fmt;

/// Returned by [`RedBlackTree::insert`] when an equal key is already stored.
///
/// The tree is left untouched and the rejected key is handed back.
///
/// [`RedBlackTree::insert`]: crate::RedBlackTree::insert
#[derive(Clone, PartialEq, Eq)]
pub struct DuplicateKey<T> {
    key: T,
}

impl<T> DuplicateKey<T> {
    pub(crate) fn new(key: T) -> Self {
        Self { key }
    }

    /// The key that was rejected.
    pub fn key(&self) -> &T {
        &self.key
    }

    pub fn into_key(self) -> T {
        self.key
    }
}

impl<T> fmt::Debug for DuplicateKey<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuplicateKey").field("key", &self.key).finish()
    }
}

impl<T> fmt::Display for DuplicateKey<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key {:?} is already present in the tree", self.key)
    }
}

impl<T> std::error::Error for DuplicateKey<T> where T: fmt::Debug {}

/// A broken red-black tree property found by
/// [`RedBlackTree::check_invariants`](crate::RedBlackTree::check_invariants).
///
/// Seeing one of these means the tree implementation has a bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root is red.
    RedRoot,
    /// A red node has a red child. Carries the depth of the child.
    RedRedEdge { depth: usize },
    /// Two paths below the same node pass through a different number of
    /// black nodes.
    BlackHeightMismatch { left: usize, right: usize },
    /// The in-order sequence isn't strictly increasing at the given position.
    OutOfOrder { position: usize },
    /// A node's parent link doesn't point at the node owning it.
    BrokenParentLink { depth: usize },
    /// `len()` disagrees with the number of reachable nodes.
    LengthMismatch { len: usize, counted: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot => f.write_str("root is red"),
            Self::RedRedEdge { depth } => {
                write!(f, "red node at depth {depth} has a red parent")
            }
            Self::BlackHeightMismatch { left, right } => write!(
                f,
                "black height differs between subtrees: left {left}, right {right}"
            ),
            Self::OutOfOrder { position } => {
                write!(f, "in-order sequence not increasing at position {position}")
            }
            Self::BrokenParentLink { depth } => {
                write!(f, "node at depth {depth} has a wrong parent link")
            }
            Self::LengthMismatch { len, counted } => {
                write!(f, "len is {len} but {counted} nodes are reachable")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_hands_back_key() {
        let err = DuplicateKey::new(String::from("five"));
        assert_eq!(err.key(), "five");
        assert_eq!(err.to_string(), "key \"five\" is already present in the tree");
        assert_eq!(err.into_key(), "five");
    }

    #[test]
    fn duplicate_key_is_an_error() {
        let err: Box<dyn std::error::Error> = Box::new(DuplicateKey::new(5));
        assert_eq!(err.to_string(), "key 5 is already present in the tree");
    }

    #[test]
    fn violation_display() {
        assert_eq!(InvariantViolation::RedRoot.to_string(), "root is red");
        assert_eq!(
            InvariantViolation::LengthMismatch { len: 3, counted: 2 }.to_string(),
            "len is 3 but 2 nodes are reachable"
        );
    }
}
