use loadline_core::{Coordinate, haversine_km};
use serde::{Deserialize, Serialize};

/// Goods categories a transporter may be licensed or equipped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Pharmaceuticals.
    Medicine,
    /// Bulky household goods.
    Furniture,
    /// Consumer electronics.
    Electronics,
    /// Goods with a short shelf life.
    Perishable,
    /// Anything else.
    Other,
}

/// A transporter's tariff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Fixed charge per leg.
    pub base_price: f64,
    /// Charge per kilometre.
    pub rate_per_km: f64,
}

/// A carrier operating within a radius of its base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transporter {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Base location.
    pub location: Coordinate,
    /// Service radius around `location`.
    pub radius_km: f64,
    /// Product types carried; empty means every type.
    #[serde(default)]
    pub supported_products: Vec<ProductType>,
    /// Spare capacity in kilograms.
    pub available_capacity_kg: f64,
    /// Average travel speed.
    pub avg_speed_kmph: f64,
    /// Tariff.
    pub pricing: Pricing,
}

impl Transporter {
    /// Whether the transporter carries `product`.
    #[must_use]
    pub fn supports(&self, product: ProductType) -> bool {
        self.supported_products.is_empty() || self.supported_products.contains(&product)
    }

    /// Whether `point` lies within the service radius.
    #[must_use]
    pub fn covers(&self, point: Coordinate) -> bool {
        haversine_km(self.location, point) <= self.radius_km
    }
}

/// One consignment in a [`ChainRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainShipment {
    /// Caller-supplied identifier.
    pub id: String,
    /// Weight in kilograms.
    pub weight_kg: f64,
}

/// Goods to move from `origin` to `destination`, possibly via a handoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRequest {
    /// Pickup point.
    pub origin: Coordinate,
    /// Drop-off point.
    pub destination: Coordinate,
    /// What is being carried.
    pub product_type: ProductType,
    /// Price multiplier in `1..=3`.
    pub urgency_multiplier: f64,
    /// Consignments travelling together.
    pub shipments: Vec<ChainShipment>,
}

/// One transporter's part of a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLeg {
    /// Carrier for this leg.
    pub transporter_id: String,
    /// Where the leg starts.
    pub from: Coordinate,
    /// Where the leg ends.
    pub to: Coordinate,
    /// Great-circle length of the leg.
    pub distance_km: f64,
    /// Travel time at the carrier's average speed.
    pub eta_hours: f64,
    /// Tariff for the leg, urgency included.
    pub cost: f64,
}

/// A priced sequence of legs from origin to destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainPlan {
    /// Legs in travel order.
    pub legs: Vec<ChainLeg>,
    /// Sum of leg distances.
    pub total_distance_km: f64,
    /// Sum of leg travel times.
    pub total_eta_hours: f64,
    /// Sum of leg costs.
    pub total_cost: f64,
}
