mod directions;
mod error;
mod itinerary;
mod route;
mod routes;
mod state;

use std::sync::Arc;

use axum::serve;
use tracing::{Level, info};

use crate::routes::router;
use crate::state::AppState;

const API_ADDR_ENV_VAR: &str = "VANLOG_API_ADDR";
const DEFAULT_API_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let state = Arc::new(AppState::from_env()?);
    if !state.live.is_configured() {
        info!("Mapbox token not configured, live directions disabled");
    }

    let addr = std::env::var(API_ADDR_ENV_VAR).unwrap_or_else(|_| DEFAULT_API_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    let shutdown = state.shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
            shutdown.cancel();
        }
    });

    let shutdown = state.shutdown.clone();
    serve(listener, router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    Ok(())
}
