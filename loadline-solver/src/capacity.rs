//! Greedy capacity-constrained routing across a fleet.
//!
//! Vehicles are filled one at a time in fleet order. Each vehicle repeatedly
//! takes the nearest stop nobody has served yet that still fits, then
//! returns to the depot. Stops taken by an earlier vehicle are never
//! reassigned, so the result depends on fleet order. Whatever no vehicle can
//! take is reported as unassigned rather than treated as an error.

use loadline_core::{
    DistanceMatrix, Route, RouteSolver, RoutingProblem, SolveError, SolveResult, SolverKind,
    VehicleSpec,
};
use log::{debug, info};

/// [`RouteSolver`] wrapper around [`solve_capacitated`].
///
/// # Examples
/// ```
/// use loadline_core::{RouteSolver, SolverKind};
/// use loadline_solver::CapacitySolver;
///
/// assert_eq!(CapacitySolver.kind(), SolverKind::LocalFallback);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CapacitySolver;

impl RouteSolver for CapacitySolver {
    fn kind(&self) -> SolverKind {
        SolverKind::LocalFallback
    }

    fn solve(&self, problem: &RoutingProblem) -> Result<SolveResult, SolveError> {
        solve_capacitated(
            &problem.depot_matrix(),
            &problem.demands(),
            problem.vehicles(),
            RoutingProblem::DEPOT,
        )
    }
}

/// Assign and order stops across `vehicles` by nearest feasible insertion.
///
/// Every non-depot node of `matrix` is a stop with the matching entry of
/// `demands`; the depot's own demand is ignored. Vehicles are taken from
/// their specs in fleet order, one class at a time:
///
/// 1. start at `depot` with zero load;
/// 2. pick the nearest unserved stop with `load + demand <= capacity`, ties
///    going to the lowest index, until none fits;
/// 3. return to the depot.
///
/// Vehicles that serve nothing produce no route and end their class. The
/// walk stops once no unserved stop fits any remaining class, so huge
/// vehicle counts cost no more than the stops they can serve. Stops left over appear in
/// `unassigned` in index order. Zero capacities and zero demands are legal.
///
/// # Errors
/// Returns [`SolveError::InvalidProblem`] when `demands` does not match the
/// matrix size, `depot` is out of range, or a demand or capacity is negative
/// or non-finite.
///
/// # Examples
/// ```
/// use loadline_core::{DistanceMatrix, VehicleSpec};
/// use loadline_solver::solve_capacitated;
///
/// let matrix = DistanceMatrix::try_from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ])?;
/// let result = solve_capacitated(&matrix, &[0.0, 6.0, 6.0], &[VehicleSpec::new(10.0, 1)], 0)?;
/// assert_eq!(result.routes[0].visits, vec![0, 1, 0]);
/// assert_eq!(result.unassigned, vec![2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn solve_capacitated(
    matrix: &DistanceMatrix,
    demands: &[f64],
    vehicles: &[VehicleSpec],
    depot: usize,
) -> Result<SolveResult, SolveError> {
    check_inputs(matrix, demands, vehicles, depot)?;
    let mut served = vec![false; matrix.len()];
    if let Some(slot) = served.get_mut(depot) {
        *slot = true;
    }

    let mut routes = Vec::new();
    let mut class_start = 0_usize;
    for (class, spec) in vehicles.iter().enumerate() {
        let first = class_start;
        class_start = class_start.saturating_add(spec.vehicle_count());
        if !any_stop_fits(demands, &served, vehicles.iter().skip(class)) {
            debug!("no unserved stop fits the vehicles from position {first} on");
            break;
        }
        for vehicle_index in first..class_start {
            // Later vehicles of the class see the same stops with the same capacity.
            let Some(route) = fill_vehicle(matrix, demands, depot, spec.capacity, &mut served)
            else {
                break;
            };
            debug!(
                "vehicle {vehicle_index} serves {} stops over {:.1} km",
                route.visits.len().saturating_sub(2),
                route.distance_km
            );
            routes.push(Route {
                vehicle_index,
                ..route
            });
        }
    }

    let unassigned: Vec<usize> = served
        .iter()
        .enumerate()
        .filter_map(|(idx, &done)| (!done).then_some(idx))
        .collect();
    if !unassigned.is_empty() {
        info!(
            "{} stops left unassigned after {} vehicles",
            unassigned.len(),
            VehicleSpec::fleet_size(vehicles)
        );
    }
    let total_distance_km = routes.iter().map(|route| route.distance_km).sum();
    Ok(SolveResult {
        routes,
        total_distance_km,
        unassigned,
        solver: SolverKind::LocalFallback,
    })
}

fn check_inputs(
    matrix: &DistanceMatrix,
    demands: &[f64],
    vehicles: &[VehicleSpec],
    depot: usize,
) -> Result<(), SolveError> {
    if demands.len() != matrix.len() {
        return Err(SolveError::invalid(format!(
            "{} demands for a matrix of {} nodes",
            demands.len(),
            matrix.len()
        )));
    }
    if depot >= matrix.len() {
        return Err(SolveError::invalid(format!(
            "depot {depot} is outside a matrix of {} nodes",
            matrix.len()
        )));
    }
    if let Some((idx, demand)) = demands
        .iter()
        .enumerate()
        .find(|&(_, d)| !d.is_finite() || *d < 0.0)
    {
        return Err(SolveError::invalid(format!(
            "node {idx} has invalid demand {demand}"
        )));
    }
    if let Some(spec) = vehicles
        .iter()
        .find(|spec| !spec.capacity.is_finite() || spec.capacity < 0.0)
    {
        return Err(SolveError::invalid(format!(
            "vehicle capacity {} must be finite and non-negative",
            spec.capacity
        )));
    }
    Ok(())
}

/// Build one vehicle's route, marking the stops it takes as served.
#[expect(
    clippy::float_arithmetic,
    reason = "loads and distances accumulate floating-point values"
)]
fn fill_vehicle(
    matrix: &DistanceMatrix,
    demands: &[f64],
    depot: usize,
    capacity: f64,
    served: &mut [bool],
) -> Option<Route> {
    let mut visits = vec![depot];
    let mut load = 0.0;
    let mut distance_km = 0.0;
    let mut current = depot;
    while let Some((next, km)) =
        nearest_feasible(matrix, demands, served, current, load, capacity)
    {
        if let Some(slot) = served.get_mut(next) {
            *slot = true;
        }
        load += demands.get(next).copied().unwrap_or(0.0);
        distance_km += km;
        visits.push(next);
        current = next;
    }
    if visits.len() == 1 {
        return None;
    }
    distance_km += matrix.leg(current, depot);
    visits.push(depot);
    Some(Route {
        vehicle_index: 0,
        visits,
        load,
        distance_km,
    })
}

/// Whether some unserved stop fits the capacity of a non-empty class in `specs`.
fn any_stop_fits<'a>(
    demands: &[f64],
    served: &[bool],
    specs: impl Iterator<Item = &'a VehicleSpec>,
) -> bool {
    let Some(largest) = specs
        .filter(|spec| spec.count > 0)
        .map(|spec| spec.capacity)
        .reduce(f64::max)
    else {
        return false;
    };
    served
        .iter()
        .zip(demands)
        .any(|(&done, &demand)| !done && demand <= largest)
}

/// Nearest unserved stop from `current` that keeps `load` within `capacity`.
#[expect(
    clippy::float_arithmetic,
    reason = "feasibility compares the summed load against capacity"
)]
fn nearest_feasible(
    matrix: &DistanceMatrix,
    demands: &[f64],
    served: &[bool],
    current: usize,
    load: f64,
    capacity: f64,
) -> Option<(usize, f64)> {
    served
        .iter()
        .zip(demands)
        .enumerate()
        .filter(|&(_, (&done, &demand))| !done && load + demand <= capacity)
        .filter_map(|(idx, _)| matrix.get(current, idx).map(|km| (idx, km)))
        .fold(None, |best: Option<(usize, f64)>, candidate| match best {
            Some((_, best_km)) if best_km <= candidate.1 => best,
            _ => Some(candidate),
        })
}
