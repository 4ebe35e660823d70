use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapboxError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("No route found (code {0})")]
    NoRoute(String),

    #[error("Mapbox access token is not configured")]
    NotConfigured,

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}
