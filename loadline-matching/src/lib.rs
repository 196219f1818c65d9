//! Shipment consolidation for the Loadline engine.
//!
//! - [`score`] rates how well a pending shipment fits a route that already
//!   has spare capacity.
//! - [`match_shipments`] and [`LoadMatcher`] rank candidate routes for a
//!   batch of shipments.
//! - [`plan_chains`] builds direct and two-leg transporter chains for a
//!   consignment and prices them.

#![forbid(unsafe_code)]

mod batch;
mod chain;
mod config;
mod score;
mod source;

pub use batch::{LoadMatcher, MatchReport, MatchRequest, ShipmentMatch, match_shipments};
pub use chain::{
    ChainError, ChainLeg, ChainPlan, ChainRequest, ChainShipment, Pricing, ProductType,
    Transporter, plan_chains,
};
pub use config::{MatchConfig, MatchError};
pub use score::{CandidateRoute, MatchCandidate, Shipment, score};
pub use source::{CandidateSource, MemorySource};
