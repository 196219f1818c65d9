//! HTTP collaborators for the Loadline engine.
//!
//! - [`ExternalOptimizer`] forwards a routing problem to a remote optimiser
//!   and implements [`RouteSolver`](loadline_core::RouteSolver), so a
//!   [`FallbackChain`](loadline_core::FallbackChain) can try it before the
//!   local heuristics.
//! - [`OsrmDistanceProvider`] fetches road distances from an OSRM Table
//!   service and implements
//!   [`DistanceProvider`](loadline_core::DistanceProvider).
//!
//! Both traits are synchronous so the core stays embeddable outside async
//! code. Each client owns a current-thread Tokio runtime and blocks on its
//! request; inside a caller's multi-threaded runtime it uses
//! `block_in_place` on that runtime instead.

#![forbid(unsafe_code)]

mod blocking;
mod optimizer;
mod osrm;
mod wire;

pub use blocking::ClientBuildError;
pub use optimizer::{DEFAULT_OPTIMIZER_URL, ExternalOptimizer, ExternalOptimizerConfig};
pub use osrm::{DEFAULT_OSRM_URL, OsrmDistanceProvider, OsrmProviderConfig};
pub use wire::{ExternalResponse, ExternalRoute, TableResponse};

/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "loadline/0.1";
