use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::runtime_config_for_size;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use dtrees::{DynamicTrees, NaiveForest, RootedForest};

mod common;

fn build<F: RootedForest>(case: &common::Case) -> F {
    let mut forest = F::new(case.n);
    for &(v, c) in &case.costs {
        forest.add_cost(v, c);
    }
    for &(v, p) in &case.edges {
        forest.link(v, p);
    }
    forest
}

fn run<F: RootedForest>(forest: &mut F, ops: &[common::Op]) {
    for op in ops {
        match *op {
            common::Op::FindRoot { v } => {
                black_box(forest.find_root(v));
            }
            common::Op::FindCost { v } => {
                black_box(forest.find_cost(v));
            }
            common::Op::AddCost { v, delta } => forest.add_cost(v, delta),
            common::Op::Move { v, to } => {
                forest.cut(v);
                forest.link(v, to);
            }
        }
    }
}

fn bench_shape(c: &mut Criterion, name: &str, shape: common::Shape) {
    let mut group = c.benchmark_group(format!("dtrees/{name}"));

    for &size in &common::SIZES {
        runtime_config_for_size(size, &mut group);
        let case = common::generate_case(shape, size);

        group.bench_function(BenchmarkId::new("dynamic_trees", size), |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let mut forest = build::<DynamicTrees>(&case);
                    let start = Instant::now();
                    run(&mut forest, &case.ops);
                    black_box(forest.len());
                    total += start.elapsed();
                }
                total
            })
        });

        group.bench_function(BenchmarkId::new("naive", size), |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let mut forest = build::<NaiveForest>(&case);
                    let start = Instant::now();
                    run(&mut forest, &case.ops);
                    black_box(forest.len());
                    total += start.elapsed();
                }
                total
            })
        });
    }

    group.finish();
}

fn bench(c: &mut Criterion) {
    bench_shape(c, "random_tree", common::Shape::Random);
    bench_shape(c, "chain", common::Shape::Chain);
}

criterion_group!(benches, bench);
criterion_main!(benches);
