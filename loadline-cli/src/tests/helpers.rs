//! Temporary workspaces and request fixtures shared by the CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

/// A temporary directory addressed with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write_json(&self, name: &str, value: &Value) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_string_pretty(value).expect("serialise fixture");
        write_utf8(&path, payload.as_bytes());
        path
    }
}

/// Chennai depot with stops in Bangalore and Hyderabad.
pub(super) fn optimize_request(capacity: f64, count: u32) -> Value {
    json!({
        "origin": {"lat": 13.0827, "lng": 80.2707},
        "destination": {"lat": 13.0827, "lng": 80.2707},
        "stops": [
            {"id": "hyd", "lat": 17.3850, "lng": 78.4867, "demand": 400},
            {"id": "blr", "lat": 12.9716, "lng": 77.5946, "demand": 400}
        ],
        "vehicles": [{"capacity": capacity, "count": count}],
        "return_to_origin": true
    })
}

/// One shipment from Chennai to Bangalore and two candidate routes.
pub(super) fn match_request() -> Value {
    json!({
        "shipments": [{
            "id": "s1",
            "origin": {"lat": 13.0827, "lng": 80.2707},
            "destination": {"lat": 12.9716, "lng": 77.5946},
            "weight": 300
        }],
        "available_routes": [
            {
                "id": "corridor",
                "origin": {"lat": 13.0827, "lng": 80.2707},
                "destination": {"lat": 12.9716, "lng": 77.5946},
                "available_capacity": 1000
            },
            {
                "id": "northbound",
                "origin": {"lat": 17.3850, "lng": 78.4867},
                "destination": {"lat": 19.0760, "lng": 72.8777},
                "available_capacity": 1000
            }
        ]
    })
}

/// Medicine from Chennai to Bangalore.
pub(super) fn chain_request() -> Value {
    json!({
        "origin": {"lat": 13.0827, "lng": 80.2707},
        "destination": {"lat": 12.9716, "lng": 77.5946},
        "product_type": "medicine",
        "urgency_multiplier": 1.0,
        "shipments": [{"id": "c1", "weight_kg": 120}]
    })
}

pub(super) fn transporter(id: &str, lat: f64, lng: f64, radius_km: f64) -> Value {
    json!({
        "id": id,
        "name": format!("{id} logistics"),
        "location": {"lat": lat, "lng": lng},
        "radius_km": radius_km,
        "supported_products": ["medicine"],
        "available_capacity_kg": 500,
        "avg_speed_kmph": 50,
        "pricing": {"base_price": 100, "rate_per_km": 10}
    })
}
