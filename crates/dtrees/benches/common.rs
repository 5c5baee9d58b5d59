use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dtrees::{Cost, NaiveForest};

pub const SIZES: [usize; 3] = [1_024, 4_096, 16_384];
pub const OPS_PER_SIZE: usize = 5_000;
pub const COST_RANGE: std::ops::RangeInclusive<Cost> = -1_000_000..=1_000_000;
pub const DELTA_RANGE: std::ops::RangeInclusive<Cost> = -1_000..=1_000;

const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn rng_for(kind: u64, size: usize) -> StdRng {
    let seed = 0x5EED_2026
        ^ (kind.wrapping_mul(SEED_MIX))
        ^ (size as u64).wrapping_mul(SEED_MIX.rotate_left(17));
    StdRng::seed_from_u64(mix_seed(seed))
}

#[derive(Clone, Copy, Debug)]
pub enum Op {
    FindRoot { v: usize },
    FindCost { v: usize },
    AddCost { v: usize, delta: Cost },
    /// Cut `v` from its parent and hang it below `to`.
    Move { v: usize, to: usize },
}

#[derive(Clone, Debug)]
pub struct Case {
    pub n: usize,
    pub costs: Vec<(usize, Cost)>,
    /// `(child, parent)` edges, applied in order with `link`.
    pub edges: Vec<(usize, usize)>,
    pub ops: Vec<Op>,
}

#[derive(Clone, Copy, Debug)]
pub enum Shape {
    /// Every vertex hangs below a uniformly random smaller one.
    Random,
    /// A single path `n -> n - 1 -> ... -> 1`.
    Chain,
}

pub fn generate_case(shape: Shape, n: usize) -> Case {
    let kind = match shape {
        Shape::Random => 1,
        Shape::Chain => 2,
    };
    let mut rng = rng_for(kind, n);
    let costs = (1..=n)
        .map(|v| (v, rng.random_range(COST_RANGE)))
        .collect::<Vec<_>>();
    let edges = (2..=n)
        .map(|v| match shape {
            Shape::Random => (v, rng.random_range(1..v)),
            Shape::Chain => (v, v - 1),
        })
        .collect::<Vec<_>>();

    let mut state = NaiveForest::new(n);
    for &(v, p) in &edges {
        state.link(v, p);
    }

    let mut ops = Vec::with_capacity(OPS_PER_SIZE);
    for _ in 0..OPS_PER_SIZE {
        let roll = rng.random_range(0..100_u32);
        let v = rng.random_range(1..=n);
        if roll < 30 {
            ops.push(Op::FindCost { v });
        } else if roll < 60 {
            let delta = rng.random_range(DELTA_RANGE);
            ops.push(Op::AddCost { v, delta });
        } else if roll < 80 {
            ops.push(Op::FindRoot { v });
        } else {
            // Re-hang `v` somewhere outside its own subtree.
            if state.parent(v).is_none() {
                ops.push(Op::FindRoot { v });
                continue;
            }
            state.cut(v);
            let mut to = rng.random_range(1..=n);
            let mut tries = 0;
            while state.find_root(to) == v && tries < 100 {
                to = rng.random_range(1..=n);
                tries += 1;
            }
            if state.find_root(to) == v {
                // Fallback: any vertex of another tree.
                to = (1..=n).find(|&u| state.find_root(u) != v).unwrap_or(v);
            }
            if to == v {
                ops.push(Op::FindRoot { v });
                continue;
            }
            state.link(v, to);
            ops.push(Op::Move { v, to });
        }
    }

    Case {
        n,
        costs,
        edges,
        ops,
    }
}
