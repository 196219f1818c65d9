//! Matching tunables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_MAX_DEVIATION_KM: f64 = 50.0;
const DEFAULT_COMPATIBILITY_THRESHOLD: f64 = 30.0;

/// Tunables for [`score`](crate::score).
///
/// `max_deviation_km` is the combined origin and destination detour at which
/// the deviation score reaches zero. A candidate is compatible only when its
/// deviation score is strictly above `compatibility_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Combined deviation, in kilometres, that scores zero.
    pub max_deviation_km: f64,
    /// Deviation score a candidate must exceed to be compatible.
    pub compatibility_threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_deviation_km: DEFAULT_MAX_DEVIATION_KM,
            compatibility_threshold: DEFAULT_COMPATIBILITY_THRESHOLD,
        }
    }
}

/// Errors raised for unusable matching input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// The maximum deviation was zero, negative or non-finite.
    #[error("max_deviation_km must be positive, got {0}")]
    InvalidMaxDeviation(f64),
    /// The threshold was outside `0..=100`.
    #[error("compatibility_threshold must lie in 0..=100, got {0}")]
    InvalidThreshold(f64),
    /// A match request carried no shipments.
    #[error("at least one shipment is required")]
    NoShipments,
    /// A match request carried no candidate routes.
    #[error("at least one available route is required")]
    NoRoutes,
}

impl MatchConfig {
    /// Override the maximum deviation.
    #[must_use]
    pub const fn with_max_deviation_km(mut self, km: f64) -> Self {
        self.max_deviation_km = km;
        self
    }

    /// Override the compatibility threshold.
    #[must_use]
    pub const fn with_compatibility_threshold(mut self, threshold: f64) -> Self {
        self.compatibility_threshold = threshold;
        self
    }

    /// Check both tunables are usable.
    ///
    /// # Errors
    /// Returns [`MatchError::InvalidMaxDeviation`] or
    /// [`MatchError::InvalidThreshold`].
    pub fn validate(&self) -> Result<(), MatchError> {
        if !self.max_deviation_km.is_finite() || self.max_deviation_km <= 0.0 {
            return Err(MatchError::InvalidMaxDeviation(self.max_deviation_km));
        }
        if !(0.0..=100.0).contains(&self.compatibility_threshold) {
            return Err(MatchError::InvalidThreshold(self.compatibility_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_valid() {
        let config = MatchConfig::default();
        assert_eq!(config.max_deviation_km, 50.0);
        assert_eq!(config.compatibility_threshold, 30.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::INFINITY)]
    fn rejects_unusable_deviation(#[case] km: f64) {
        let config = MatchConfig::default().with_max_deviation_km(km);
        assert!(matches!(
            config.validate(),
            Err(MatchError::InvalidMaxDeviation(_))
        ));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(101.0)]
    #[case(f64::NAN)]
    fn rejects_threshold_outside_percent_range(#[case] threshold: f64) {
        let config = MatchConfig::default().with_compatibility_threshold(threshold);
        assert!(matches!(
            config.validate(),
            Err(MatchError::InvalidThreshold(_))
        ));
    }

    #[rstest]
    fn partial_json_keeps_defaults() {
        let config: MatchConfig =
            serde_json::from_str(r#"{"max_deviation_km": 80}"#).expect("valid config");
        assert_eq!(config.max_deviation_km, 80.0);
        assert_eq!(config.compatibility_threshold, 30.0);
    }
}
