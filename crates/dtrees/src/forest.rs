use std::fmt;

use crate::Cost;
use crate::error::{Error, Result};
use crate::path_set::{Id, Path, PathSet, id};
use crate::traits::RootedForest;

/// Forest of rooted trees with a cost on every vertex (Sleator–Tarjan dynamic
/// trees).
///
/// Each tree is cut into vertex-disjoint preferred paths kept in a
/// [`PathSet`], ordered from the bottom of the path (head) to the top (tail).
/// The canonical element of every path records its successor: the vertex just
/// above the path's tail in the real tree, or nil if the tail is the root.
///
/// Vertices are `1..=n`. Every operation is amortized O(log n).
#[derive(Clone, Debug)]
pub struct DynamicTrees {
    paths: PathSet,
    parent: Vec<Id>,
    // Only meaningful at canonical elements.
    succ: Vec<Id>,
}

impl DynamicTrees {
    /// `n` isolated vertices of cost 0.
    pub fn new(n: usize) -> Self {
        Self {
            paths: PathSet::new(n),
            parent: vec![Id::NIL; n + 1],
            succ: vec![Id::NIL; n + 1],
        }
    }

    pub fn try_new(n: usize) -> Result<Self> {
        let paths = PathSet::try_new(n)?;
        let parent = try_nil_vec(n)?;
        let succ = try_nil_vec(n)?;
        Ok(Self {
            paths,
            parent,
            succ,
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Rebuild with `n` isolated vertices, discarding the forest.
    pub fn resize(&mut self, n: usize) {
        self.paths.resize(n);
        self.parent.clear();
        self.parent.resize(n + 1, Id::NIL);
        self.succ.clear();
        self.succ.resize(n + 1, Id::NIL);
    }

    pub fn try_resize(&mut self, n: usize) -> Result<()> {
        let parent = try_nil_vec(n)?;
        let succ = try_nil_vec(n)?;
        self.paths.try_resize(n)?;
        self.parent = parent;
        self.succ = succ;
        Ok(())
    }

    /// Grow to `n` vertices, keeping every tree and cost. New vertices are
    /// isolated with cost 0.
    pub fn expand(&mut self, n: usize) {
        self.paths.expand(n);
        self.parent.resize(n + 1, Id::NIL);
        self.succ.resize(n + 1, Id::NIL);
    }

    pub fn try_expand(&mut self, n: usize) -> Result<()> {
        let len = self.len();
        if n < len {
            return Err(Error::Shrink { len, requested: n });
        }
        let extra = n - len;
        self.parent
            .try_reserve_exact(extra)
            .and_then(|()| self.succ.try_reserve_exact(extra))
            .map_err(|_| Error::OutOfSpace { requested: n })?;
        self.paths.try_expand(n)?;
        self.parent.resize(n + 1, Id::NIL);
        self.succ.resize(n + 1, Id::NIL);
        Ok(())
    }

    /// Make every vertex an isolated tree of cost 0 again.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.parent.fill(Id::NIL);
        self.succ.fill(Id::NIL);
    }

    /// The underlying path decomposition.
    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    #[inline(always)]
    fn check(&self, v: usize) -> Id {
        debug_assert!(v >= 1 && v <= self.len(), "vertex {v} out of range");
        id(v)
    }

    fn validate(&self, v: usize) -> Result<Id> {
        if v == 0 || v > self.len() {
            log::debug!("rejecting vertex {v}, forest has {} vertices", self.len());
            return Err(Error::NodeOutOfRange {
                node: v,
                len: self.len(),
            });
        }
        Ok(id(v))
    }

    /// Parent of `v`, or `None` if `v` is a root.
    pub fn parent(&self, v: usize) -> Option<usize> {
        let p = self.parent[self.check(v).idx()];
        if p.is_nil() { None } else { Some(p.idx()) }
    }

    pub fn is_root(&self, v: usize) -> bool {
        self.parent[self.check(v).idx()].is_nil()
    }

    /// Cost of the single vertex `v`.
    pub fn cost(&self, v: usize) -> Cost {
        self.paths.node_cost(v)
    }

    /// Move `i` onto the accumulated path `p`: split `i`'s path at `i`, hang
    /// the part below `i` off `i`, and join `p`, `i` and the part above `i`.
    /// Returns the joined path and the vertex to continue from.
    fn splice(&mut self, p: Option<Path>, i: Id) -> (Path, Id) {
        let top = self.paths.find_tree_root(i.idx());
        let q = self.paths.find_path(i.idx());
        let w = std::mem::replace(&mut self.succ[top.node()], Id::NIL);
        self.succ[q.node()] = w;

        let (below, above) = self.paths.split(i.idx());
        if let Some(below) = below {
            self.succ[below.node()] = i;
        }
        (self.paths.join(p, i.idx(), above), w)
    }

    /// Turn the tree path from `v` up to its root into a single path, with
    /// `v` at the head and the root at the tail.
    pub fn expose(&mut self, v: usize) -> Path {
        let x = self.check(v);
        let (mut p, mut w) = self.splice(None, x);
        while !w.is_nil() {
            (p, w) = self.splice(Some(p), w);
        }
        self.succ[p.node()] = Id::NIL;
        p
    }

    /// Root of the tree containing `v`.
    pub fn find_root(&mut self, v: usize) -> usize {
        let p = self.expose(v);
        let r = self.paths.find_tail(p);
        self.succ[r.node()] = Id::NIL;
        r.node()
    }

    /// The last vertex of minimum cost on the path from `v` to its root
    /// (ties go to the vertex nearest the root), with its cost.
    pub fn find_cost(&mut self, v: usize) -> (usize, Cost) {
        let p = self.expose(v);
        let (m, cost) = self.paths.find_path_cost(p);
        self.succ[m.node()] = Id::NIL;
        (m.node(), cost)
    }

    /// Add `delta` to the cost of every vertex on the path from `v` to its
    /// root.
    pub fn add_cost(&mut self, v: usize, delta: Cost) {
        let p = self.expose(v);
        self.paths.add_path_cost(p, delta);
    }

    /// Make the root `t` a child of `i`. `i` must be in another tree.
    pub fn link(&mut self, t: usize, i: usize) {
        let tx = self.check(t);
        let ix = self.check(i);
        debug_assert!(self.parent[tx.idx()].is_nil(), "link: {t} is not a root");
        #[cfg(debug_assertions)]
        {
            // Parent pointers only, so debug builds splay exactly like release.
            let mut r = ix;
            while !self.parent[r.idx()].is_nil() {
                r = self.parent[r.idx()];
            }
            assert_ne!(r, tx, "link: {i} is in the tree rooted at {t}");
        }

        self.parent[tx.idx()] = ix;
        let pt = self.expose(t);
        debug_assert_eq!(pt.node(), t);
        let pi = self.expose(i);
        let p = self.paths.join(None, pt.node(), Some(pi));
        self.succ[p.node()] = Id::NIL;
    }

    /// Detach `i` and its descendants from `i`'s parent.
    pub fn cut(&mut self, i: usize) {
        let ix = self.check(i);
        debug_assert!(!self.parent[ix.idx()].is_nil(), "cut: {i} is a root");

        self.parent[ix.idx()] = Id::NIL;
        let _ = self.expose(i);
        let (below, above) = self.paths.split(i);
        debug_assert!(below.is_none());
        if let Some(above) = above {
            self.succ[above.node()] = Id::NIL;
        }
        self.succ[ix.idx()] = Id::NIL;
    }

    /// [`link`](Self::link) with its preconditions checked.
    pub fn try_link(&mut self, t: usize, i: usize) -> Result<()> {
        let tx = self.validate(t)?;
        self.validate(i)?;
        if !self.parent[tx.idx()].is_nil() {
            log::debug!("link rejected: {t} already has a parent");
            return Err(Error::NotARoot { node: t });
        }
        if self.find_root(i) == t {
            log::debug!("link rejected: {i} is in the tree rooted at {t}");
            return Err(Error::SameTree {
                child: t,
                parent: i,
            });
        }
        self.link(t, i);
        Ok(())
    }

    /// [`cut`](Self::cut) with its preconditions checked.
    pub fn try_cut(&mut self, i: usize) -> Result<()> {
        let ix = self.validate(i)?;
        if self.parent[ix.idx()].is_nil() {
            log::debug!("cut rejected: {i} is a root");
            return Err(Error::IsARoot { node: i });
        }
        self.cut(i);
        Ok(())
    }
}

fn try_nil_vec(n: usize) -> Result<Vec<Id>> {
    let requested = n.checked_add(1).ok_or(Error::OutOfSpace { requested: n })?;
    let mut v = Vec::new();
    v.try_reserve_exact(requested)
        .map_err(|_| Error::OutOfSpace { requested: n })?;
    v.resize(requested, Id::NIL);
    Ok(v)
}

/// One line per path, head to tail, followed by `-> successor` when the
/// path hangs off another one.
impl fmt::Display for DynamicTrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in self.paths.roots() {
            write!(f, "{}", self.paths.path_to_string(r))?;
            let w = self.succ[r.node()];
            if !w.is_nil() {
                write!(f, " -> {}", w.idx())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl RootedForest for DynamicTrees {
    fn new(n: usize) -> Self {
        Self::new(n)
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn parent(&self, v: usize) -> Option<usize> {
        self.parent(v)
    }

    fn cost(&self, v: usize) -> Cost {
        self.cost(v)
    }

    fn link(&mut self, t: usize, i: usize) {
        self.link(t, i)
    }

    fn cut(&mut self, i: usize) {
        self.cut(i)
    }

    fn find_root(&mut self, v: usize) -> usize {
        self.find_root(v)
    }

    fn find_cost(&mut self, v: usize) -> (usize, Cost) {
        self.find_cost(v)
    }

    fn add_cost(&mut self, v: usize, delta: Cost) {
        self.add_cost(v, delta)
    }
}
