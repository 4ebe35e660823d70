use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use vanlog_itinerary::{
    itinerary::Itinerary, night_type::NightType, summary::ItinerarySummary,
};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct ItineraryResponse {
    stops: Itinerary,
    summary: ItinerarySummary,
}

impl From<Itinerary> for ItineraryResponse {
    fn from(stops: Itinerary) -> Self {
        Self {
            summary: stops.summary(),
            stops,
        }
    }
}

impl IntoResponse for ItineraryResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Deserialize)]
pub struct ReconcileBody {
    stops: Itinerary,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveBody {
    stops: Itinerary,
    stop_id: String,
    target_index: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightTypeBody {
    stops: Itinerary,
    stop_id: String,
    #[serde(default)]
    night_type: Option<NightType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateBody {
    stops: Itinerary,
    stop_id: String,
    date: Option<Date>,
}

pub async fn reconcile_handler(Json(body): Json<ReconcileBody>) -> ItineraryResponse {
    body.stops.reconciled().into()
}

pub async fn move_handler(
    Json(body): Json<MoveBody>,
) -> Result<ItineraryResponse, ApiError> {
    Ok(body
        .stops
        .move_stop(&body.stop_id, body.target_index)?
        .into())
}

pub async fn night_type_handler(
    Json(body): Json<NightTypeBody>,
) -> Result<ItineraryResponse, ApiError> {
    let night_type = body.night_type.unwrap_or_default();

    Ok(body
        .stops
        .set_night_type(&body.stop_id, night_type)?
        .into())
}

pub async fn arrival_handler(
    Json(body): Json<DateBody>,
) -> Result<ItineraryResponse, ApiError> {
    Ok(body
        .stops
        .set_arrival_date(&body.stop_id, body.date)?
        .into())
}

pub async fn departure_handler(
    Json(body): Json<DateBody>,
) -> Result<ItineraryResponse, ApiError> {
    Ok(body
        .stops
        .set_departure_date(&body.stop_id, body.date)?
        .into())
}
