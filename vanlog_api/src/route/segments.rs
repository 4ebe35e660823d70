use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use vanlog_itinerary::stop::Stop;
use vanlog_route::{
    features::{segments_feature_collection, single_path_feature_collection},
    segment::RouteSegment,
    single_path::build_single_path,
    summary::RouteSummary,
};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SegmentsBody {
    stops: Vec<Stop>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentsResponse {
    segments: Vec<RouteSegment>,
    features: FeatureCollection,
    single_line: FeatureCollection,
    summary: RouteSummary,
}

impl IntoResponse for SegmentsResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Estimated segments, computed locally without any network call.
pub async fn segments_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SegmentsBody>,
) -> Result<SegmentsResponse, ApiError> {
    let segments = state.live.builder().build(&body.stops);
    let single_path = build_single_path(&segments);

    Ok(SegmentsResponse {
        features: segments_feature_collection(&segments),
        single_line: single_path_feature_collection(&single_path),
        summary: RouteSummary::from_metrics(segments.iter().map(RouteSegment::metrics)),
        segments,
    })
}
