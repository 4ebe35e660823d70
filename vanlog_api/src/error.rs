use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::warn;
use vanlog_directions::error::MapboxError;
use vanlog_itinerary::error::EditRejected;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    ServiceUnavailable(String),
    InternalServerError(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl From<EditRejected> for ApiError {
    fn from(error: EditRejected) -> Self {
        match error {
            EditRejected::StopNotFound(_) => ApiError::NotFound(error.to_string()),
            _ => ApiError::Conflict(error.to_string()),
        }
    }
}

impl From<MapboxError> for ApiError {
    fn from(error: MapboxError) -> Self {
        match error {
            MapboxError::NotConfigured => ApiError::ServiceUnavailable(error.to_string()),
            MapboxError::NoRoute(_) => ApiError::NotFound(error.to_string()),
            _ => {
                warn!("Mapbox: {}", error);
                ApiError::BadGateway(error.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message),
            ApiError::ServiceUnavailable(message) => (StatusCode::SERVICE_UNAVAILABLE, message),
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
