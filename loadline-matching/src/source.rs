//! Where candidate routes come from.

use crate::{CandidateRoute, Shipment};

/// Supplies the routes a shipment could join.
///
/// Implementations may pre-filter, for example by corridor or date, but
/// must not score: [`LoadMatcher`](crate::LoadMatcher) scores and ranks
/// whatever is returned.
pub trait CandidateSource: Send + Sync {
    /// Return the routes worth scoring for `shipment`.
    fn candidates_for(
        &self,
        shipment: &Shipment,
    ) -> Box<dyn Iterator<Item = CandidateRoute> + Send + '_>;
}

/// A fixed list of routes offered to every shipment.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    routes: Vec<CandidateRoute>,
}

impl MemorySource {
    /// Create a source from a collection of routes.
    #[must_use]
    pub fn with_routes<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = CandidateRoute>,
    {
        Self {
            routes: routes.into_iter().collect(),
        }
    }

    /// Number of routes held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the source holds no routes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl CandidateSource for MemorySource {
    fn candidates_for(
        &self,
        _shipment: &Shipment,
    ) -> Box<dyn Iterator<Item = CandidateRoute> + Send + '_> {
        Box::new(self.routes.iter().cloned())
    }
}
