//! Carrier chains for consignments no single transporter can complete.
//!
//! A chain starts with a transporter whose radius covers the origin. If the
//! same transporter also covers the destination it carries the goods
//! directly. Otherwise a second transporter, based within the first one's
//! radius and covering the destination, takes over at the first
//! transporter's base. Longer chains are not considered.

mod model;

use log::debug;
use thiserror::Error;

use loadline_core::{Coordinate, haversine_km};

pub use model::{
    ChainLeg, ChainPlan, ChainRequest, ChainShipment, Pricing, ProductType, Transporter,
};

/// Errors returned by [`plan_chains`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChainError {
    /// The urgency multiplier was outside `1..=3`.
    #[error("urgency_multiplier must lie in 1..=3, got {0}")]
    InvalidUrgency(f64),
    /// The request carried no shipments.
    #[error("at least one shipment is required")]
    EmptyShipments,
    /// A shipment weight was negative or non-finite.
    #[error("shipment `{id}` has invalid weight {weight_kg}")]
    InvalidWeight {
        /// Offending shipment.
        id: String,
        /// Rejected weight.
        weight_kg: f64,
    },
    /// A transporter record could not be used.
    #[error("transporter `{id}` is invalid: {reason}")]
    InvalidTransporter {
        /// Offending transporter.
        id: String,
        /// Which field failed.
        reason: &'static str,
    },
    /// No transporter carries the product with enough capacity.
    #[error("no transporter can carry {total_weight_kg} kg of this product")]
    NoEligibleTransporters {
        /// Combined weight of the shipments.
        total_weight_kg: f64,
    },
    /// Eligible transporters exist but none connect origin to destination.
    #[error("no transporter chain connects origin and destination")]
    NoFeasibleChains,
}

/// Build and price every direct or two-leg chain for `request`.
///
/// Transporters are eligible when they carry the product and have capacity
/// for the combined shipment weight. Plans come back cheapest first, with
/// ties broken by travel time. Per leg, `eta_hours = distance / speed` and
/// `cost = (base_price + distance × rate_per_km) × urgency_multiplier`.
///
/// # Errors
/// Returns [`ChainError`] for invalid input, or when no eligible
/// transporter or no feasible chain exists.
///
/// # Examples
/// ```
/// use loadline_core::Coordinate;
/// use loadline_matching::{
///     ChainRequest, ChainShipment, Pricing, ProductType, Transporter, plan_chains,
/// };
///
/// let depot = Coordinate::new(13.0827, 80.2707);
/// let carrier = Transporter {
///     id: "t1".into(),
///     name: "Coastal".into(),
///     location: depot,
///     radius_km: 100.0,
///     supported_products: vec![],
///     available_capacity_kg: 500.0,
///     avg_speed_kmph: 40.0,
///     pricing: Pricing { base_price: 100.0, rate_per_km: 2.0 },
/// };
/// let request = ChainRequest {
///     origin: depot,
///     destination: Coordinate::new(13.2, 80.3),
///     product_type: ProductType::Other,
///     urgency_multiplier: 1.0,
///     shipments: vec![ChainShipment { id: "s1".into(), weight_kg: 50.0 }],
/// };
/// let plans = plan_chains(&request, &[carrier])?;
/// assert_eq!(plans.len(), 1);
/// assert_eq!(plans[0].legs.len(), 1);
/// # Ok::<(), loadline_matching::ChainError>(())
/// ```
pub fn plan_chains(
    request: &ChainRequest,
    transporters: &[Transporter],
) -> Result<Vec<ChainPlan>, ChainError> {
    let total_weight_kg = check_request(request)?;
    for transporter in transporters {
        check_transporter(transporter)?;
    }
    let eligible: Vec<&Transporter> = transporters
        .iter()
        .filter(|t| t.supports(request.product_type) && t.available_capacity_kg >= total_weight_kg)
        .collect();
    if eligible.is_empty() {
        return Err(ChainError::NoEligibleTransporters { total_weight_kg });
    }

    let urgency = request.urgency_multiplier;
    let mut plans = Vec::new();
    for first in eligible.iter().filter(|t| t.covers(request.origin)) {
        if first.covers(request.destination) {
            plans.push(plan(vec![leg(
                first,
                request.origin,
                request.destination,
                urgency,
            )]));
            continue;
        }
        for second in &eligible {
            if second.id == first.id
                || haversine_km(first.location, second.location) > first.radius_km
                || !second.covers(request.destination)
            {
                continue;
            }
            plans.push(plan(vec![
                leg(first, request.origin, first.location, urgency),
                leg(second, first.location, request.destination, urgency),
            ]));
        }
    }
    if plans.is_empty() {
        return Err(ChainError::NoFeasibleChains);
    }
    debug!(
        "{} chains from {} eligible transporters",
        plans.len(),
        eligible.len()
    );
    plans.sort_by(|a, b| {
        a.total_cost
            .total_cmp(&b.total_cost)
            .then(a.total_eta_hours.total_cmp(&b.total_eta_hours))
    });
    Ok(plans)
}

fn check_request(request: &ChainRequest) -> Result<f64, ChainError> {
    if !(1.0..=3.0).contains(&request.urgency_multiplier) {
        return Err(ChainError::InvalidUrgency(request.urgency_multiplier));
    }
    if request.shipments.is_empty() {
        return Err(ChainError::EmptyShipments);
    }
    if let Some(bad) = request
        .shipments
        .iter()
        .find(|s| !s.weight_kg.is_finite() || s.weight_kg < 0.0)
    {
        return Err(ChainError::InvalidWeight {
            id: bad.id.clone(),
            weight_kg: bad.weight_kg,
        });
    }
    Ok(request.shipments.iter().map(|s| s.weight_kg).sum())
}

fn check_transporter(transporter: &Transporter) -> Result<(), ChainError> {
    let positive = |value: f64| value.is_finite() && value > 0.0;
    let non_negative = |value: f64| value.is_finite() && value >= 0.0;
    let reason = if !positive(transporter.radius_km) {
        "radius_km must be positive"
    } else if !positive(transporter.avg_speed_kmph) {
        "avg_speed_kmph must be positive"
    } else if !non_negative(transporter.available_capacity_kg) {
        "available_capacity_kg must be non-negative"
    } else if !non_negative(transporter.pricing.base_price)
        || !non_negative(transporter.pricing.rate_per_km)
    {
        "pricing must be non-negative"
    } else {
        return Ok(());
    };
    Err(ChainError::InvalidTransporter {
        id: transporter.id.clone(),
        reason,
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "leg time and tariff are floating-point formulas"
)]
fn leg(transporter: &Transporter, from: Coordinate, to: Coordinate, urgency: f64) -> ChainLeg {
    let distance_km = haversine_km(from, to);
    let pricing = transporter.pricing;
    ChainLeg {
        transporter_id: transporter.id.clone(),
        from,
        to,
        distance_km,
        eta_hours: distance_km / transporter.avg_speed_kmph,
        cost: (pricing.base_price + distance_km * pricing.rate_per_km) * urgency,
    }
}

fn plan(legs: Vec<ChainLeg>) -> ChainPlan {
    ChainPlan {
        total_distance_km: legs.iter().map(|l| l.distance_km).sum(),
        total_eta_hours: legs.iter().map(|l| l.eta_hours).sum(),
        total_cost: legs.iter().map(|l| l.cost).sum(),
        legs,
    }
}
