//! Dynamic trees: a forest of rooted, vertex-costed trees supporting `link`,
//! `cut`, root lookup, path-minimum queries and path-wide cost increments in
//! amortized O(log n).

pub mod traits;

mod error;
mod forest;
mod naive;
mod path_set;

pub use error::{Error, Result};
pub use forest::DynamicTrees;
pub use naive::NaiveForest;
pub use path_set::{Path, PathSet};

pub use traits::RootedForest;

/// Vertex cost.
pub type Cost = i64;
