//! Response bodies of the remote services.
//!
//! Both types are deliberately lenient: fields the engine recomputes itself
//! are accepted but not required.

use serde::Deserialize;

/// Body returned by the external optimiser.
///
/// Mirrors [`OptimizeResponse`](loadline_core::OptimizeResponse), but only
/// the assignment is trusted. Distances and loads are recomputed locally.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalResponse {
    /// Per-vehicle stop orders.
    #[serde(default)]
    pub routes: Vec<ExternalRoute>,
    /// Stops the optimiser could not place.
    #[serde(default)]
    pub unassigned_stops: Vec<String>,
}

/// One vehicle's assignment in an [`ExternalResponse`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalRoute {
    /// Position of the vehicle in the expanded fleet.
    pub vehicle_index: usize,
    /// Stop identifiers in visiting order.
    pub order: Vec<String>,
    /// Distance claimed by the optimiser.
    #[serde(default)]
    pub distance_km: Option<f64>,
    /// Load claimed by the optimiser.
    #[serde(default)]
    pub load: Option<f64>,
}

/// OSRM Table API response requested with `annotations=distance`.
///
/// See: <http://project-osrm.org/docs/v5.24.0/api/#table-service>
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableResponse {
    /// Status code from OSRM; `"Ok"` on success.
    pub code: String,
    /// Error message when `code` is not `"Ok"`.
    #[serde(default)]
    pub message: Option<String>,
    /// Road distances in metres; `None` where no route exists.
    #[serde(default)]
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}
