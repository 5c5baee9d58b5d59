//! A collection of vertex-disjoint paths, each stored as a splay tree ordered
//! by position along the path.
//!
//! Costs are delta-encoded. Writing `S(x)` for the sum of `dmin` over `x` and
//! all of its splay ancestors, every node satisfies
//!
//! - `cost(x) = dcost(x) + S(x)`,
//! - `S(x)` is the minimum cost in the splay subtree rooted at `x`,
//!
//! so `dcost(x) >= 0` everywhere and `dmin(x) >= 0` for every non-root. The
//! root's `dmin` is the minimum cost of the whole path, and adding to it
//! shifts every cost on the path at once.

use std::fmt;

use crate::Cost;
use crate::error::{Error, Result};

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Id(u32);

impl Id {
    pub(crate) const NIL: Self = Self(0);

    #[inline(always)]
    pub(crate) fn is_nil(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

#[inline(always)]
pub(crate) fn id(v: usize) -> Id {
    debug_assert!(v < u32::MAX as usize);
    Id(v as u32)
}

/// Handle to a path, named by its canonical element (the root of its splay
/// tree).
///
/// Any call that restructures the path may move the canonical element to a
/// different node, so a handle is only good until the next such call. Always
/// continue with the handle the call returned.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use = "the canonical element may have moved; use the returned handle"]
pub struct Path(Id);

impl Path {
    #[inline(always)]
    fn from_raw(x: Id) -> Option<Self> {
        if x.is_nil() { None } else { Some(Self(x)) }
    }

    #[inline(always)]
    pub(crate) fn id(self) -> Id {
        self.0
    }

    /// The canonical element's index.
    #[inline(always)]
    pub fn node(self) -> usize {
        self.0.idx()
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Node {
    left: Id,
    right: Id,
    parent: Id,
    dcost: Cost,
    dmin: Cost,
}

/// Paths over the index universe `1..=n`, all starting as singletons of cost 0.
#[derive(Clone, Debug)]
pub struct PathSet {
    // Slot 0 is the nil sentinel and is never written.
    nodes: Vec<Node>,
}

impl PathSet {
    pub fn new(n: usize) -> Self {
        log::debug!("path set: allocating {n} nodes");
        Self {
            nodes: vec![Node::default(); n + 1],
        }
    }

    pub fn try_new(n: usize) -> Result<Self> {
        let mut nodes = Vec::new();
        reserve_nodes(&mut nodes, n)?;
        nodes.resize(n + 1, Node::default());
        log::debug!("path set: allocated {n} nodes");
        Ok(Self { nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rebuild with `n` nodes, discarding every path.
    pub fn resize(&mut self, n: usize) {
        log::debug!("path set: resize {} -> {n}", self.len());
        self.nodes.clear();
        self.nodes.resize(n + 1, Node::default());
    }

    pub fn try_resize(&mut self, n: usize) -> Result<()> {
        let mut nodes = Vec::new();
        reserve_nodes(&mut nodes, n)?;
        nodes.resize(n + 1, Node::default());
        log::debug!("path set: resize {} -> {n}", self.len());
        self.nodes = nodes;
        Ok(())
    }

    /// Grow to `n` nodes, keeping existing paths and costs. New nodes are
    /// singletons of cost 0.
    pub fn expand(&mut self, n: usize) {
        debug_assert!(n >= self.len());
        log::debug!("path set: expand {} -> {n}", self.len());
        self.nodes.resize(n + 1, Node::default());
    }

    pub fn try_expand(&mut self, n: usize) -> Result<()> {
        let len = self.len();
        if n < len {
            return Err(Error::Shrink { len, requested: n });
        }
        self.nodes
            .try_reserve_exact(n - len)
            .map_err(|_| Error::OutOfSpace { requested: n })?;
        log::debug!("path set: expand {len} -> {n}");
        self.nodes.resize(n + 1, Node::default());
        Ok(())
    }

    /// Turn every node back into a singleton path of cost 0.
    pub fn clear(&mut self) {
        log::debug!("path set: clear {} nodes", self.len());
        self.nodes.fill(Node::default());
    }

    #[inline(always)]
    fn node(&self, x: Id) -> &Node {
        debug_assert!(!x.is_nil());
        &self.nodes[x.idx()]
    }

    #[inline(always)]
    fn node_mut(&mut self, x: Id) -> &mut Node {
        debug_assert!(!x.is_nil());
        &mut self.nodes[x.idx()]
    }

    #[inline(always)]
    fn check(&self, v: usize) -> Id {
        debug_assert!(v >= 1 && v <= self.len(), "node {v} out of range");
        id(v)
    }

    #[inline(always)]
    fn is_canonical(&self, x: Id) -> bool {
        self.node(x).parent.is_nil()
    }

    #[inline(always)]
    fn is_singleton(&self, x: Id) -> bool {
        let nx = self.node(x);
        nx.parent.is_nil() && nx.left.is_nil() && nx.right.is_nil()
    }

    /// Promote `x` over its parent, keeping every true cost and the subtree
    /// minimum property intact.
    fn rotate(&mut self, x: Id) {
        let y = self.node(x).parent;
        debug_assert!(!y.is_nil());
        let z = self.node(y).parent;
        let x_is_left = self.node(y).left == x;

        // `a` stays under `x`, `b` moves from `x` to `y`, `c` stays under `y`.
        let (a, b, c) = {
            let (nx, ny) = (self.node(x), self.node(y));
            if x_is_left {
                (nx.left, nx.right, ny.right)
            } else {
                (nx.right, nx.left, ny.left)
            }
        };

        let dmin_x = self.node(x).dmin;
        let dmin_y = self.node(y).dmin;
        let dcost_y = self.node(y).dcost;

        // New minimum of y's subtree {y, b, c}, relative to S(y).
        let mut m = dcost_y;
        if !b.is_nil() {
            m = m.min(dmin_x + self.node(b).dmin);
        }
        if !c.is_nil() {
            m = m.min(self.node(c).dmin);
        }

        if !a.is_nil() {
            self.node_mut(a).dmin += dmin_x;
        }
        if !b.is_nil() {
            self.node_mut(b).dmin += dmin_x - m;
        }
        if !c.is_nil() {
            self.node_mut(c).dmin -= m;
        }
        {
            let nx = self.node_mut(x);
            nx.dcost += dmin_x;
            nx.dmin = dmin_y;
        }
        {
            let ny = self.node_mut(y);
            ny.dcost = dcost_y - m;
            ny.dmin = m;
        }

        if x_is_left {
            self.node_mut(y).left = b;
            self.node_mut(x).right = y;
        } else {
            self.node_mut(y).right = b;
            self.node_mut(x).left = y;
        }
        if !b.is_nil() {
            self.node_mut(b).parent = y;
        }
        self.node_mut(y).parent = x;
        self.node_mut(x).parent = z;
        if !z.is_nil() {
            let nz = self.node_mut(z);
            if nz.left == y {
                nz.left = x;
            } else {
                nz.right = x;
            }
        }
    }

    fn splay(&mut self, x: Id) {
        while !self.node(x).parent.is_nil() {
            let y = self.node(x).parent;
            let z = self.node(y).parent;
            if !z.is_nil() {
                let zigzig = (self.node(z).left == y) == (self.node(y).left == x);
                if zigzig {
                    self.rotate(y);
                } else {
                    self.rotate(x);
                }
            }
            self.rotate(x);
        }
    }

    /// Make `i` the canonical element of its path.
    pub fn find_path(&mut self, i: usize) -> Path {
        let x = self.check(i);
        self.splay(x);
        Path(x)
    }

    /// Splay the last node of `q` to the top and return it.
    pub fn find_tail(&mut self, q: Path) -> Path {
        debug_assert!(self.is_canonical(q.0));
        let mut x = q.0;
        while !self.node(x).right.is_nil() {
            x = self.node(x).right;
        }
        self.splay(x);
        Path(x)
    }

    /// Add `delta` to the cost of every node on `q` in O(1).
    pub fn add_path_cost(&mut self, q: Path, delta: Cost) {
        debug_assert!(self.is_canonical(q.0));
        self.node_mut(q.0).dmin += delta;
    }

    /// Find the last node of minimum cost on `q`, splay it to the top and
    /// return it with its cost.
    pub fn find_path_cost(&mut self, q: Path) -> (Path, Cost) {
        debug_assert!(self.is_canonical(q.0));
        let mut x = q.0;
        loop {
            let nx = self.node(x);
            if !nx.right.is_nil() && self.node(nx.right).dmin == 0 {
                x = nx.right;
            } else if nx.dcost > 0 {
                debug_assert!(!nx.left.is_nil());
                x = nx.left;
            } else {
                break;
            }
        }
        self.splay(x);
        debug_assert_eq!(self.node(x).dcost, 0);
        (Path(x), self.node(x).dmin)
    }

    /// Canonical element of the path containing `i`, found without
    /// restructuring anything.
    pub fn find_tree_root(&self, i: usize) -> Path {
        let mut x = self.check(i);
        while !self.node(x).parent.is_nil() {
            x = self.node(x).parent;
        }
        Path(x)
    }

    /// Concatenate `r`, the singleton `i`, and `q` (in that order) into one
    /// path. Either side may be empty.
    pub fn join(&mut self, r: Option<Path>, i: usize, q: Option<Path>) -> Path {
        let x = self.check(i);
        debug_assert!(self.is_singleton(x), "join pivot {i} is not a singleton path");
        debug_assert!(r.is_none_or(|r| self.is_canonical(r.0) && r.0 != x));
        debug_assert!(q.is_none_or(|q| self.is_canonical(q.0) && q.0 != x));

        let cost = self.node(x).dcost + self.node(x).dmin;
        let mut m = cost;
        for side in [r, q].into_iter().flatten() {
            m = m.min(self.node(side.0).dmin);
        }
        for side in [r, q].into_iter().flatten() {
            let ns = self.node_mut(side.0);
            ns.dmin -= m;
            ns.parent = x;
        }

        let nx = self.node_mut(x);
        nx.left = r.map_or(Id::NIL, Path::id);
        nx.right = q.map_or(Id::NIL, Path::id);
        nx.dmin = m;
        nx.dcost = cost - m;
        Path(x)
    }

    /// Cut the path containing `i` on both sides of `i`. Returns the part
    /// before `i` and the part after it; `i` is left as a singleton path.
    pub fn split(&mut self, i: usize) -> (Option<Path>, Option<Path>) {
        let x = self.check(i);
        self.splay(x);

        let Node {
            left,
            right,
            dcost,
            dmin,
            ..
        } = *self.node(x);
        for side in [left, right] {
            if !side.is_nil() {
                let ns = self.node_mut(side);
                ns.parent = Id::NIL;
                ns.dmin += dmin;
            }
        }

        let nx = self.node_mut(x);
        nx.left = Id::NIL;
        nx.right = Id::NIL;
        nx.dmin = dcost + dmin;
        nx.dcost = 0;
        (Path::from_raw(left), Path::from_raw(right))
    }

    /// True cost of `i`, read without restructuring.
    pub fn node_cost(&self, i: usize) -> Cost {
        let mut x = self.check(i);
        let mut cost = self.node(x).dcost;
        while !x.is_nil() {
            cost += self.node(x).dmin;
            x = self.node(x).parent;
        }
        cost
    }

    /// Overwrite the cost of a singleton path.
    pub fn set_cost(&mut self, i: usize, cost: Cost) {
        let x = self.check(i);
        debug_assert!(self.is_singleton(x), "set_cost on non-singleton {i}");
        let nx = self.node_mut(x);
        nx.dmin = cost;
        nx.dcost = 0;
    }

    /// Visit the path rooted at `root` in order, with true costs.
    fn for_each_in_order(&self, root: Id, mut f: impl FnMut(Id, Cost)) {
        debug_assert!(self.is_canonical(root));
        // Each entry carries S(x).
        let mut stack: Vec<(Id, Cost)> = Vec::new();
        let mut x = root;
        let mut above: Cost = 0;
        loop {
            while !x.is_nil() {
                let s = above + self.node(x).dmin;
                stack.push((x, s));
                above = s;
                x = self.node(x).left;
            }
            let Some((y, s)) = stack.pop() else {
                break;
            };
            f(y, s + self.node(y).dcost);
            above = s;
            x = self.node(y).right;
        }
    }

    /// Nodes of `q` from head to tail.
    pub fn path_nodes(&self, q: Path) -> Vec<usize> {
        debug_assert!(self.is_canonical(q.0));
        let mut out = Vec::new();
        self.for_each_in_order(q.0, |x, _| out.push(x.idx()));
        out
    }

    /// Render `q` as `[node:cost ...]`, head first.
    pub fn path_to_string(&self, q: Path) -> String {
        debug_assert!(self.is_canonical(q.0));
        let mut parts = Vec::new();
        self.for_each_in_order(q.0, |x, cost| parts.push(format!("{}:{}", x.idx(), cost)));
        format!("[{}]", parts.join(" "))
    }

    /// Canonical elements of every path, ordered by their smallest member.
    pub fn roots(&self) -> Vec<Path> {
        let mut seen = vec![false; self.nodes.len()];
        let mut out = Vec::new();
        for v in 1..=self.len() {
            let r = self.find_tree_root(v);
            if !seen[r.node()] {
                seen[r.node()] = true;
                out.push(r);
            }
        }
        out
    }

    /// Panic unless the splay shape is consistent and every node satisfies
    /// the delta encoding described at the top of this module.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        for v in 1..=self.len() {
            let x = id(v);
            let nx = self.node(x);
            for c in [nx.left, nx.right] {
                if !c.is_nil() {
                    assert_eq!(self.node(c).parent, x, "child {} of {v} disowned", c.idx());
                }
            }
            if !nx.parent.is_nil() {
                let np = self.node(nx.parent);
                assert!(np.left == x || np.right == x, "{v} not a child of its parent");
                assert!(nx.dmin >= 0, "dmin({v}) = {} under a parent", nx.dmin);
            }
            assert!(nx.dcost >= 0, "dcost({v}) = {}", nx.dcost);
        }
        for r in self.roots() {
            self.assert_subtree_min(r.0, 0);
        }
    }

    #[cfg(test)]
    fn assert_subtree_min(&self, x: Id, above: Cost) -> Cost {
        let nx = *self.node(x);
        let s = above + nx.dmin;
        let mut min = s + nx.dcost;
        for c in [nx.left, nx.right] {
            if !c.is_nil() {
                min = min.min(self.assert_subtree_min(c, s));
            }
        }
        assert_eq!(min, s, "subtree minimum at {} is {min}, encoded as {s}", x.idx());
        min
    }
}

fn reserve_nodes(nodes: &mut Vec<Node>, n: usize) -> Result<()> {
    let requested = n.checked_add(1).ok_or(Error::OutOfSpace { requested: n })?;
    nodes.try_reserve_exact(requested).map_err(|_| {
        log::debug!("path set: allocation of {n} nodes failed");
        Error::OutOfSpace { requested: n }
    })
}

impl fmt::Display for PathSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in self.roots() {
            writeln!(f, "{}", self.path_to_string(r))?;
        }
        Ok(())
    }
}
