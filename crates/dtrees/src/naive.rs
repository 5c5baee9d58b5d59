use crate::Cost;
use crate::traits::RootedForest;

/// Parent-pointer forest that walks the whole root path on every query.
///
/// O(depth) per operation. Serves as the reference model for
/// [`DynamicTrees`](crate::DynamicTrees).
#[derive(Clone, Debug)]
pub struct NaiveForest {
    parent: Vec<usize>,
    cost: Vec<Cost>,
}

impl NaiveForest {
    pub fn new(n: usize) -> Self {
        Self {
            parent: vec![0; n + 1],
            cost: vec![0; n + 1],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn parent(&self, v: usize) -> Option<usize> {
        debug_assert!(v >= 1 && v <= self.len());
        let p = self.parent[v];
        if p == 0 { None } else { Some(p) }
    }

    pub fn cost(&self, v: usize) -> Cost {
        self.cost[v]
    }

    /// Vertices from `v` up to its root, `v` first.
    pub fn root_path(&self, v: usize) -> Vec<usize> {
        let mut path = vec![v];
        let mut x = v;
        while self.parent[x] != 0 {
            x = self.parent[x];
            path.push(x);
        }
        path
    }

    pub fn link(&mut self, t: usize, i: usize) {
        debug_assert_eq!(self.parent[t], 0, "link: {t} is not a root");
        debug_assert_ne!(self.find_root(i), t, "link: {i} is in the tree rooted at {t}");
        self.parent[t] = i;
    }

    pub fn cut(&mut self, i: usize) {
        debug_assert_ne!(self.parent[i], 0, "cut: {i} is a root");
        self.parent[i] = 0;
    }

    pub fn find_root(&self, v: usize) -> usize {
        let mut x = v;
        while self.parent[x] != 0 {
            x = self.parent[x];
        }
        x
    }

    pub fn find_cost(&self, v: usize) -> (usize, Cost) {
        let mut best = v;
        let mut x = v;
        while self.parent[x] != 0 {
            x = self.parent[x];
            if self.cost[x] <= self.cost[best] {
                best = x;
            }
        }
        (best, self.cost[best])
    }

    pub fn add_cost(&mut self, v: usize, delta: Cost) {
        let mut x = v;
        while x != 0 {
            self.cost[x] += delta;
            x = self.parent[x];
        }
    }
}

impl RootedForest for NaiveForest {
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
        NaiveForest::find_root(self, v)
    }

    fn find_cost(&mut self, v: usize) -> (usize, Cost) {
        NaiveForest::find_cost(self, v)
    }

    fn add_cost(&mut self, v: usize, delta: Cost) {
        self.add_cost(v, delta)
    }
}
