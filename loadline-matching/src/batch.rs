//! Ranking candidate routes for batches of shipments.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    CandidateRoute, CandidateSource, MatchCandidate, MatchConfig, MatchError, MemorySource,
    Shipment, score,
};

/// How many runners-up are kept after the best match.
const ALTERNATIVES: usize = 2;

/// A batch matching call: shipments plus the routes on offer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Shipments to place.
    #[serde(default)]
    pub shipments: Vec<Shipment>,
    /// Routes with spare capacity.
    #[serde(default)]
    pub available_routes: Vec<CandidateRoute>,
}

impl MatchRequest {
    /// Reject requests with nothing to match.
    ///
    /// # Errors
    /// Returns [`MatchError::NoShipments`] or [`MatchError::NoRoutes`].
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.shipments.is_empty() {
            return Err(MatchError::NoShipments);
        }
        if self.available_routes.is_empty() {
            return Err(MatchError::NoRoutes);
        }
        Ok(())
    }
}

/// The ranked candidates for one shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentMatch {
    /// The shipment placed.
    pub shipment_id: String,
    /// Highest-scoring compatible route.
    pub best_match: MatchCandidate,
    /// Up to two further compatible routes, best first.
    pub alternatives: Vec<MatchCandidate>,
}

/// Outcome of a batch match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchReport {
    /// Shipments with at least one compatible route, in input order.
    pub matches: Vec<ShipmentMatch>,
    /// Identifiers of shipments nothing could take, in input order.
    pub unmatched_shipments: Vec<String>,
}

/// Rank `routes` for every shipment in `shipments`.
///
/// Incompatible candidates are dropped. The rest are sorted by descending
/// score; equal scores keep the order of `routes`.
#[must_use]
pub fn match_shipments(
    shipments: &[Shipment],
    routes: &[CandidateRoute],
    config: &MatchConfig,
) -> MatchReport {
    LoadMatcher::new(MemorySource::with_routes(routes.iter().cloned()), *config).run(shipments)
}

/// Batch matcher over an injectable [`CandidateSource`].
///
/// # Examples
/// ```
/// use loadline_core::Coordinate;
/// use loadline_matching::{CandidateRoute, LoadMatcher, MatchConfig, MemorySource, Shipment};
///
/// let a = Coordinate::new(13.0827, 80.2707);
/// let b = Coordinate::new(12.9716, 77.5946);
/// let source = MemorySource::with_routes([CandidateRoute {
///     id: "r1".into(),
///     origin: a,
///     destination: b,
///     available_capacity: 100.0,
/// }]);
/// let matcher = LoadMatcher::new(source, MatchConfig::default());
/// let report = matcher.run(&[Shipment { id: "s1".into(), origin: a, destination: b, weight: 10.0 }]);
/// assert_eq!(report.matches[0].best_match.candidate_route_id, "r1");
/// ```
#[derive(Debug, Clone)]
pub struct LoadMatcher<S> {
    source: S,
    config: MatchConfig,
}

impl<S: CandidateSource> LoadMatcher<S> {
    /// Create a matcher drawing candidates from `source`.
    #[must_use]
    pub const fn new(source: S, config: MatchConfig) -> Self {
        Self { source, config }
    }

    /// Borrow the matcher's configuration.
    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Match one shipment, or `None` when no candidate is compatible.
    #[must_use]
    pub fn match_one(&self, shipment: &Shipment) -> Option<ShipmentMatch> {
        let mut compatible: Vec<MatchCandidate> = self
            .source
            .candidates_for(shipment)
            .map(|route| score(shipment, &route, &self.config))
            .filter(|candidate| candidate.is_compatible)
            .collect();
        compatible.sort_by(|a, b| b.compatibility_score.cmp(&a.compatibility_score));
        debug!(
            "shipment {} has {} compatible routes",
            shipment.id,
            compatible.len()
        );
        let mut ranked = compatible.into_iter();
        let best_match = ranked.next()?;
        Some(ShipmentMatch {
            shipment_id: shipment.id.clone(),
            best_match,
            alternatives: ranked.take(ALTERNATIVES).collect(),
        })
    }

    /// Match every shipment.
    #[must_use]
    pub fn run(&self, shipments: &[Shipment]) -> MatchReport {
        let mut report = MatchReport::default();
        for shipment in shipments {
            match self.match_one(shipment) {
                Some(found) => report.matches.push(found),
                None => report.unmatched_shipments.push(shipment.id.clone()),
            }
        }
        if !report.unmatched_shipments.is_empty() {
            info!(
                "{} of {} shipments unmatched",
                report.unmatched_shipments.len(),
                shipments.len()
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadline_core::Coordinate;
    use rstest::{fixture, rstest};

    const ORIGIN: Coordinate = Coordinate::new(13.0827, 80.2707);
    const DESTINATION: Coordinate = Coordinate::new(12.9716, 77.5946);

    fn route(id: &str, lat_offset: f64, capacity: f64) -> CandidateRoute {
        CandidateRoute {
            id: id.to_owned(),
            origin: Coordinate::new(ORIGIN.lat + lat_offset, ORIGIN.lng),
            destination: DESTINATION,
            available_capacity: capacity,
        }
    }

    fn shipment(id: &str, weight: f64) -> Shipment {
        Shipment {
            id: id.to_owned(),
            origin: ORIGIN,
            destination: DESTINATION,
            weight,
        }
    }

    #[fixture]
    fn routes() -> Vec<CandidateRoute> {
        vec![
            route("far", 0.15, 1000.0),
            route("exact", 0.0, 1000.0),
            route("near", 0.05, 1000.0),
            route("close", 0.1, 1000.0),
            route("small", 0.0, 10.0),
        ]
    }

    #[rstest]
    fn ranks_best_first_with_two_alternatives(routes: Vec<CandidateRoute>) {
        let report = match_shipments(&[shipment("s1", 100.0)], &routes, &MatchConfig::default());
        let found = &report.matches[0];
        assert_eq!(found.best_match.candidate_route_id, "exact");
        let alternatives: Vec<&str> = found
            .alternatives
            .iter()
            .map(|c| c.candidate_route_id.as_str())
            .collect();
        assert_eq!(alternatives, vec!["near", "close"]);
        assert!(report.unmatched_shipments.is_empty());
    }

    #[rstest]
    fn equal_scores_keep_input_order() {
        let routes = vec![route("first", 0.0, 500.0), route("second", 0.0, 500.0)];
        let report = match_shipments(&[shipment("s1", 1.0)], &routes, &MatchConfig::default());
        assert_eq!(report.matches[0].best_match.candidate_route_id, "first");
        assert_eq!(report.matches[0].alternatives[0].candidate_route_id, "second");
    }

    #[rstest]
    fn heavy_shipment_is_unmatched(routes: Vec<CandidateRoute>) {
        let report = match_shipments(
            &[shipment("light", 5.0), shipment("heavy", 5000.0)],
            &routes,
            &MatchConfig::default(),
        );
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].shipment_id, "light");
        assert_eq!(report.unmatched_shipments, vec!["heavy"]);
    }

    #[rstest]
    fn no_routes_leaves_everything_unmatched() {
        let report = match_shipments(&[shipment("s1", 1.0)], &[], &MatchConfig::default());
        assert!(report.matches.is_empty());
        assert_eq!(report.unmatched_shipments, vec!["s1"]);
    }

    #[rstest]
    fn request_requires_both_sides(routes: Vec<CandidateRoute>) {
        let mut request = MatchRequest {
            shipments: Vec::new(),
            available_routes: routes,
        };
        assert_eq!(request.validate(), Err(MatchError::NoShipments));
        request.shipments.push(shipment("s1", 1.0));
        assert_eq!(request.validate(), Ok(()));
        request.available_routes.clear();
        assert_eq!(request.validate(), Err(MatchError::NoRoutes));
    }

    #[rstest]
    fn report_serialises_with_wire_names(routes: Vec<CandidateRoute>) {
        let report = match_shipments(&[shipment("s1", 1.0)], &routes, &MatchConfig::default());
        let value = serde_json::to_value(&report).expect("serialise report");
        assert_eq!(value["matches"][0]["best_match"]["shipment_id"], "s1");
        assert!(value["unmatched_shipments"].as_array().is_some());
    }
}
