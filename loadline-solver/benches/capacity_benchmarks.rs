//! Criterion benchmarks for the capacity-constrained solver.
//!
//! Measures solve time for 50, 200 and 500 stops spread around a depot with
//! deterministic random demands.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package loadline-solver
//! ```

#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use loadline_core::{Coordinate, DistanceMatrix, VehicleSpec};
use loadline_solver::{sequence, solve_capacitated};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic inputs.
const BENCHMARK_SEED: u64 = 42;

/// Stop counts to benchmark.
const PROBLEM_SIZES: &[usize] = &[50, 200, 500];

/// Depot followed by `count` stops within roughly 50 km of it.
fn generate_nodes(count: usize, seed: u64) -> (Vec<Coordinate>, Vec<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let depot = Coordinate::new(13.0827, 80.2707);
    let mut nodes = vec![depot];
    let mut demands = vec![0.0];
    for _ in 0..count {
        nodes.push(Coordinate::new(
            depot.lat + rng.gen_range(-0.45..0.45),
            depot.lng + rng.gen_range(-0.45..0.45),
        ));
        demands.push(rng.gen_range(10.0..200.0));
    }
    (nodes, demands)
}

fn bench_capacity_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("capacity_solver");
    for &size in PROBLEM_SIZES {
        let (nodes, demands) = generate_nodes(size, BENCHMARK_SEED);
        let matrix = DistanceMatrix::from_coordinates(&nodes);
        let vehicles = [VehicleSpec::new(1000.0, u32::try_from(size / 5).unwrap_or(u32::MAX))];
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| solve_capacitated(&matrix, &demands, &vehicles, 0));
        });
    }
    group.finish();
}

fn bench_sequencer(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_neighbour");
    for &size in PROBLEM_SIZES {
        let (nodes, _) = generate_nodes(size, BENCHMARK_SEED);
        let matrix = DistanceMatrix::from_coordinates(&nodes);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| sequence(&matrix, 0, true));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_capacity_solver, bench_sequencer);
criterion_main!(benches);
