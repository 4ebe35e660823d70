use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use vanlog_directions::mapbox::GeocodeResult;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GeocodeQuery {
    q: Option<String>,
}

pub async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResult>, ApiError> {
    let q = query
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(String::from("q is required")))?;

    let result = state
        .mapbox()?
        .geocode(&q)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No place found for {q}")))?;

    Ok(Json(result))
}
