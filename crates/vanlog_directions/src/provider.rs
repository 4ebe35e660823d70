use std::future::Future;

use geo_types::{LineString, Point};
use serde::{Deserialize, Serialize};
use vanlog_route::units::{Kilometers, round_to_tenth};

use crate::error::MapboxError;

/// Driving route between two points as returned by a directions service,
/// rounded like the local estimate so both can be shown side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsRoute {
    pub distance_km: f64,
    pub duration_min: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<LineString>,
}

impl DirectionsRoute {
    /// Builds a route from raw meters and seconds.
    pub fn from_raw(meters: f64, seconds: f64, geometry: Option<LineString>) -> Self {
        Self {
            distance_km: round_to_tenth(Kilometers::from_meters(meters).value()),
            duration_min: (seconds / 60.0).round() as i64,
            geometry,
        }
    }
}

pub trait DirectionsProvider {
    fn directions(
        &self,
        from: Point,
        to: Point,
        with_geometry: bool,
    ) -> impl Future<Output = Result<DirectionsRoute, MapboxError>> + Send;
}
