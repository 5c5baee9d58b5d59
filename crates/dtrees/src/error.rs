//! Errors reported by the checked (`try_*`) surface.
//!
//! The unchecked operations only `debug_assert!` their preconditions.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("out of space: cannot allocate {requested} nodes")]
    OutOfSpace { requested: usize },

    #[error("node {node} is out of range 1..={len}")]
    NodeOutOfRange { node: usize, len: usize },

    #[error("node {node} is not a tree root")]
    NotARoot { node: usize },

    #[error("node {node} is a tree root and has no parent edge")]
    IsARoot { node: usize },

    #[error("linking {child} under {parent} would create a cycle")]
    SameTree { child: usize, parent: usize },

    #[error("cannot expand from {len} down to {requested} nodes")]
    Shrink { len: usize, requested: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
