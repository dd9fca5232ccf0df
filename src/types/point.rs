//! Delivery point types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ensure_finite, PlannerResult};

/// Coordinates in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Reject NaN or infinite components. Geographic bounds are not checked.
    pub fn validate(&self, label: &str) -> PlannerResult<()> {
        ensure_finite(self.lat, &format!("{} latitude", label))?;
        ensure_finite(self.lng, &format!("{} longitude", label))?;
        Ok(())
    }

    /// `lat,lng` form used by distance providers
    pub fn to_query_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// A stop to visit, created and stored by the caller.
///
/// `visiting_rank` is the only field the planner writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPoint {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub address: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    /// 1-based position in the last optimized route
    #[serde(default)]
    pub visiting_rank: Option<u32>,
}

impl DeliveryPoint {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: address.into(),
            coordinates,
            visiting_rank: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validate() {
        assert!(Coordinates::new(-33.45, -70.66).validate("origin").is_ok());
        // Out-of-range but finite values are the caller's responsibility
        assert!(Coordinates::new(123.0, 500.0).validate("origin").is_ok());

        let err = Coordinates::new(f64::NAN, -70.66).validate("origin").unwrap_err();
        assert!(err.to_string().contains("origin latitude"));
    }

    #[test]
    fn test_query_param() {
        assert_eq!(Coordinates::new(-33.45, -70.66).to_query_param(), "-33.45,-70.66");
    }

    #[test]
    fn test_delivery_point_from_flat_json() {
        let json = r#"{
            "name": "Bodega Norte",
            "address": "Av. Siempre Viva 742",
            "lat": -33.4,
            "lng": -70.6
        }"#;
        let point: DeliveryPoint = serde_json::from_str(json).unwrap();

        assert_eq!(point.name, "Bodega Norte");
        assert_eq!(point.coordinates, Coordinates::new(-33.4, -70.6));
        assert_eq!(point.visiting_rank, None);
    }

    #[test]
    fn test_delivery_point_serializes_rank_camel_case() {
        let mut point = DeliveryPoint::new("A", "Calle 1", Coordinates::new(1.0, 2.0));
        point.visiting_rank = Some(3);

        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value["visitingRank"], 3);
        assert_eq!(value["lat"], 1.0);
    }
}
