//! Compare route lengths and estimate driving time.

use crate::{Coordinate, path_length_km};

/// Percentage by which `optimized` is shorter than `original`.
///
/// Both orders are measured as the sum of consecutive great-circle legs. A
/// zero-length original yields `0`. The result is never clamped: a negative
/// value means the optimised order is longer, and callers should show it as
/// such. It never exceeds `100`.
///
/// # Examples
/// ```
/// use loadline_core::{Coordinate, savings_percentage};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 1.0);
/// let c = Coordinate::new(0.0, 2.0);
/// // a → c → b → c doubles back; a → b → c does not.
/// assert_eq!(savings_percentage(&[a, c, b], &[a, b, c]), 33);
/// assert_eq!(savings_percentage(&[a], &[a]), 0);
/// ```
#[must_use]
pub fn savings_percentage(original: &[Coordinate], optimized: &[Coordinate]) -> i64 {
    savings_from_distances(path_length_km(original), path_length_km(optimized))
}

/// Percentage saving between two precomputed distances.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "savings are a ratio of floating-point distances"
)]
#[expect(
    clippy::cast_possible_truncation,
    reason = "the rounded ratio is bounded well inside i64"
)]
pub fn savings_from_distances(original_km: f64, optimized_km: f64) -> i64 {
    if original_km == 0.0 || !original_km.is_finite() || !optimized_km.is_finite() {
        return 0;
    }
    ((1.0 - optimized_km / original_km) * 100.0).round() as i64
}

/// Hours needed to drive `distance_km` at `average_speed_kmh`.
///
/// Returns `None` when the speed is not a positive finite number.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "time is distance over speed")]
pub fn estimated_time_hours(distance_km: f64, average_speed_kmh: f64) -> Option<f64> {
    (average_speed_kmh.is_finite() && average_speed_kmh > 0.0)
        .then(|| distance_km / average_speed_kmh)
}
