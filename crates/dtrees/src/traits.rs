//! Trait-based API for rooted, vertex-costed forests.
//!
//! Vertices are `1..=len()`. Preconditions are the caller's responsibility
//! and are only checked by debug assertions.

use crate::Cost;

pub trait RootedForest: Sized {
    /// `n` isolated vertices of cost 0.
    fn new(n: usize) -> Self;
    fn len(&self) -> usize;
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn parent(&self, v: usize) -> Option<usize>;
    fn cost(&self, v: usize) -> Cost;

    /// Make the root `t` a child of `i`, which must lie in a different tree.
    fn link(&mut self, t: usize, i: usize);

    /// Remove the edge from the non-root `i` to its parent.
    fn cut(&mut self, i: usize);

    fn find_root(&mut self, v: usize) -> usize;

    /// Minimum cost on the path from `v` to its root, with the vertex
    /// achieving it. Ties go to the vertex nearest the root.
    fn find_cost(&mut self, v: usize) -> (usize, Cost);

    /// Add `delta` to every cost on the path from `v` to its root.
    fn add_cost(&mut self, v: usize, delta: Cost);
}
