//! Property-based tests for the local routing heuristics.
//!
//! # Invariants tested
//!
//! - **Permutation:** the sequencer visits every node exactly once, plus a
//!   trailing origin when returning.
//! - **Capacity:** no route's running load exceeds its vehicle's capacity, with
//!   no rounding slack even for decimal demands.
//! - **Coverage:** every stop is in exactly one route or unassigned.
//! - **Distance:** route distance equals the matrix path length.

use std::collections::HashSet;

use loadline_core::{Coordinate, DistanceMatrix, VehicleSpec};
use loadline_solver::{sequence, solve_capacitated};
use proptest::prelude::*;

fn points(max: usize) -> impl Strategy<Value = Vec<Coordinate>> {
    prop::collection::vec(
        (-1.0_f64..1.0, -1.0_f64..1.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng)),
        1..max,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn sequence_is_a_permutation(
        pts in points(15),
        origin_seed in any::<usize>(),
        return_to_origin in any::<bool>(),
    ) {
        let matrix = DistanceMatrix::from_coordinates(&pts);
        let origin = origin_seed % pts.len();
        let tour = sequence(&matrix, origin, return_to_origin).expect("origin in range");

        prop_assert_eq!(tour.order.first().copied(), Some(origin));
        let body = if return_to_origin {
            prop_assert_eq!(tour.order.last().copied(), Some(origin));
            &tour.order[..tour.order.len() - 1]
        } else {
            &tour.order[..]
        };
        let mut sorted = body.to_vec();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..pts.len()).collect::<Vec<_>>());
        let expected = matrix.path_length(&tour.order);
        prop_assert!((tour.total_distance_km - expected).abs() < 1e-6);
    }

    #[test]
    fn capacity_solution_is_feasible_and_complete(
        pts in points(20),
        demand_seeds in prop::collection::vec(0.0_f64..50.0, 20),
        capacities in prop::collection::vec(0.0_f64..120.0, 1..5),
    ) {
        let matrix = DistanceMatrix::from_coordinates(&pts);
        let demands: Vec<f64> = std::iter::once(0.0)
            .chain(demand_seeds.iter().copied())
            .take(pts.len())
            .collect();
        let vehicles: Vec<VehicleSpec> =
            capacities.iter().map(|&c| VehicleSpec::new(c, 1)).collect();
        let result = solve_capacitated(&matrix, &demands, &vehicles, 0).expect("valid problem");

        let mut seen = HashSet::new();
        for route in &result.routes {
            let capacity = capacities[route.vehicle_index];
            let mut load = 0.0;
            for &node in &route.visits[1..route.visits.len() - 1] {
                load += demands[node];
                prop_assert!(load <= capacity, "load {load} exceeds {capacity}");
                prop_assert!(seen.insert(node), "node {node} served twice");
            }
            prop_assert_eq!(route.visits.first().copied(), Some(0));
            prop_assert_eq!(route.visits.last().copied(), Some(0));
            let expected = matrix.path_length(&route.visits);
            prop_assert!((route.distance_km - expected).abs() < 1e-6);
        }
        for &node in &result.unassigned {
            prop_assert!(seen.insert(node), "node {node} both served and unassigned");
        }
        prop_assert_eq!(seen.len(), pts.len() - 1);
    }

    #[test]
    fn decimal_demands_respect_capacity_at_every_prefix(
        pts in points(12),
        demand_picks in prop::collection::vec(
            prop::sample::select(vec![0.1, 0.16, 0.17, 0.2, 0.28, 0.3, 0.44, 1.6]),
            12,
        ),
        capacities in prop::collection::vec(
            prop::sample::select(vec![0.3, 0.44, 0.6, 1.0, 1.77]),
            1..4,
        ),
    ) {
        let matrix = DistanceMatrix::from_coordinates(&pts);
        let demands: Vec<f64> = std::iter::once(0.0)
            .chain(demand_picks.iter().copied())
            .take(pts.len())
            .collect();
        let vehicles: Vec<VehicleSpec> =
            capacities.iter().map(|&c| VehicleSpec::new(c, 1)).collect();
        let result = solve_capacitated(&matrix, &demands, &vehicles, 0).expect("valid problem");

        for route in &result.routes {
            let capacity = capacities[route.vehicle_index];
            let mut load = 0.0;
            for &node in &route.visits[1..route.visits.len() - 1] {
                load += demands[node];
                prop_assert!(load <= capacity, "prefix load {load} exceeds {capacity}");
            }
            prop_assert_eq!(route.load, load);
        }
    }
}
