//! Benchmarks for the sliding-tile solvers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use slidesolve::solvability::{scramble, shuffle};
use slidesolve::{is_solvable, solve, Board, Heuristic, Strategy};

/// A fixed, fairly deep 3x3 board.
fn hard_3x3() -> Board {
    "8 6 7/2 5 4/3 0 1".parse().unwrap()
}

/// Benchmark breadth-first search on a deep 3x3 board.
fn bench_bfs_3x3(c: &mut Criterion) {
    let board = hard_3x3();
    let mut group = c.benchmark_group("bfs");
    group.sample_size(10);
    group.bench_function("3x3", |b| {
        b.iter(|| solve(black_box(&board), Strategy::Bfs))
    });
    group.finish();
}

/// Benchmark A* with every heuristic on the same 3x3 board.
fn bench_astar_3x3(c: &mut Criterion) {
    let board = hard_3x3();
    let mut group = c.benchmark_group("astar_3x3");
    group.sample_size(10);
    for heuristic in Heuristic::ALL {
        group.bench_function(heuristic.name(), |b| {
            b.iter(|| solve(black_box(&board), Strategy::AStar(heuristic)))
        });
    }
    group.finish();
}

/// Benchmark A* with linear conflict on a scrambled 4x4 board.
fn bench_astar_4x4(c: &mut Criterion) {
    let board = scramble(4, 30, &mut StdRng::seed_from_u64(3)).unwrap();
    let mut group = c.benchmark_group("astar_4x4");
    group.sample_size(10);
    group.bench_function("H3", |b| {
        b.iter(|| solve(black_box(&board), Strategy::AStar(Heuristic::H3)))
    });
    group.finish();
}

/// Benchmark the solvability oracle on a 4x4 permutation.
fn bench_is_solvable(c: &mut Criterion) {
    let board = shuffle(4, &mut StdRng::seed_from_u64(1)).unwrap();
    let cells = board.cells().to_vec();

    c.bench_function("is_solvable_4x4", |b| {
        b.iter(|| is_solvable(black_box(&cells), 4))
    });
}

/// Benchmark a single evaluation of each heuristic.
fn bench_heuristics(c: &mut Criterion) {
    let board = shuffle(4, &mut StdRng::seed_from_u64(2)).unwrap();
    let mut group = c.benchmark_group("heuristic_4x4");
    for heuristic in Heuristic::ALL {
        group.bench_function(heuristic.name(), |b| {
            b.iter(|| heuristic.estimate(black_box(&board)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_bfs_3x3,
    bench_astar_3x3,
    bench_astar_4x4,
    bench_is_solvable,
    bench_heuristics
);
criterion_main!(benches);
