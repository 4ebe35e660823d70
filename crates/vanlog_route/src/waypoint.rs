use std::str::FromStr;

use geo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo_utils;

/// Anything that can be routed through: an identity, a display name and a
/// position.
pub trait Waypoint {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn point(&self) -> Point;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid coordinates {0:?}, expected \"lat,lng\"")]
pub struct LatLngParseError(String);

/// Parses `"lat,lng"`, both parts finite numbers.
impl FromStr for LatLng {
    type Err = LatLngParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LatLngParseError(s.to_owned());

        let (lat, lng) = s.split_once(',').ok_or_else(invalid)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let lng = lng.trim().parse::<f64>().map_err(|_| invalid())?;

        if !lat.is_finite() || !lng.is_finite() {
            return Err(invalid());
        }

        Ok(LatLng { lat, lng })
    }
}

impl From<LatLng> for Point {
    fn from(value: LatLng) -> Self {
        geo_utils::point(value.lat, value.lng)
    }
}

/// Minimal routable stop, as posted by clients that only know positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub id: String,
    #[serde(alias = "nom")]
    pub name: String,
    #[serde(alias = "coordonnees")]
    pub coordinates: LatLng,
}

impl RouteStop {
    pub fn new(id: &str, name: &str, lat: f64, lng: f64) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            coordinates: LatLng { lat, lng },
        }
    }
}

impl Waypoint for RouteStop {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn point(&self) -> Point {
        self.coordinates.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lat_lng() {
        assert_eq!(
            "48.8566, 2.3522".parse::<LatLng>(),
            Ok(LatLng {
                lat: 48.8566,
                lng: 2.3522
            })
        );
        assert!("48.8566".parse::<LatLng>().is_err());
        assert!("north,2.35".parse::<LatLng>().is_err());
        assert!("NaN,2.35".parse::<LatLng>().is_err());
    }

    #[test]
    fn test_route_stop_accepts_planning_fields() {
        let stop: RouteStop = serde_json::from_str(
            r#"{"id": "paris", "nom": "Paris", "coordonnees": {"lat": 48.8566, "lng": 2.3522}}"#,
        )
        .unwrap();

        assert_eq!(stop.name(), "Paris");
        assert_eq!(stop.point().y(), 48.8566);
    }
}
