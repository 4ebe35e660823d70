use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use tracing::info;
use vanlog_route::waypoint::RouteStop;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RouteGeometryBody {
    steps: Vec<RouteStop>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteGeometryResponse {
    segments: FeatureCollection,
    single_line: FeatureCollection,
}

impl IntoResponse for RouteGeometryResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Road geometry for every leg, falling back to the drawn arc for legs the
/// directions service could not route.
pub async fn route_geometry_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RouteGeometryBody>,
) -> Result<RouteGeometryResponse, ApiError> {
    state.mapbox()?;

    if body.steps.len() < 2 {
        return Err(ApiError::BadRequest(String::from(
            "steps must hold at least 2 stops",
        )));
    }

    let cancel = state.shutdown.child_token();

    let route = state
        .live
        .route(&body.steps, true, &cancel)
        .await
        .ok_or_else(|| ApiError::ServiceUnavailable(String::from("Server shutting down")))?;

    info!(
        "Routed {} segments for {} steps",
        route.segments.len(),
        body.steps.len()
    );

    let (segments, single_line) = route.feature_collections();
    Ok(RouteGeometryResponse {
        segments,
        single_line,
    })
}
