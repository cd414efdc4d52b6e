//! An ordered set backed by a red-black tree.
//!
//! Nodes live in an arena and refer to each other by index, so parent links
//! are plain handles and never keep a node alive.
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![forbid(unsafe_code)]

mod compare;
mod error;
mod iter;
mod node;
mod red_black_tree;
mod validate;

pub use compare::{Compare, Natural};
pub use error::{DuplicateKey, InvariantViolation};
pub use iter::{IntoIter, Iter};
pub use red_black_tree::RedBlackTree;
