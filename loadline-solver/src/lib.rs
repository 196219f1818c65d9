//! Local routing heuristics for Loadline.
//!
//! Two greedy constructions cover every request the engine accepts:
//!
//! - [`sequence`] and [`sequence_to`] order stops for one vehicle by nearest
//!   neighbour.
//! - [`solve_capacitated`] partitions stops across a fleet by nearest
//!   feasible insertion, one vehicle at a time. [`CapacitySolver`] exposes it
//!   as a [`RouteSolver`](loadline_core::RouteSolver) so it can sit at the
//!   end of a [`FallbackChain`](loadline_core::FallbackChain).
//!
//! [`Planner`] ties validation, matrix construction, mode selection and
//! response mapping together for a full [`OptimizeRequest`].
//!
//! [`OptimizeRequest`]: loadline_core::OptimizeRequest

#![forbid(unsafe_code)]

mod capacity;
mod planner;
mod sequence;

pub use capacity::{CapacitySolver, solve_capacitated};
pub use planner::{PlanError, Planner, PlannerConfig};
pub use sequence::{Sequence, SequenceError, sequence, sequence_to};
