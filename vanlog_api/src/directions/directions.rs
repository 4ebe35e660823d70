use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use vanlog_route::waypoint::LatLng;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DirectionsQuery {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsResponse {
    distance_km: f64,
    duration_min: i64,
}

impl IntoResponse for DirectionsResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

fn parse_param(value: Option<&str>) -> Result<LatLng, ApiError> {
    let value = value.ok_or_else(|| {
        ApiError::BadRequest(String::from("from and to are required (lat,lng)"))
    })?;

    value
        .parse::<LatLng>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

pub async fn directions_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DirectionsQuery>,
) -> Result<DirectionsResponse, ApiError> {
    let client = state.mapbox()?;

    let from = parse_param(query.from.as_deref())?;
    let to = parse_param(query.to.as_deref())?;

    let route = client
        .fetch_directions(from.into(), to.into(), false)
        .await?;

    Ok(DirectionsResponse {
        distance_km: route.distance_km,
        duration_min: route.duration_min,
    })
}
