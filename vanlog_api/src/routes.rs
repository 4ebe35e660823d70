use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::directions::directions::directions_handler;
use crate::directions::geocode::geocode_handler;
use crate::directions::route_geometry::route_geometry_handler;
use crate::itinerary::edits::{
    arrival_handler, departure_handler, move_handler, night_type_handler, reconcile_handler,
};
use crate::route::segments::segments_handler;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/directions", get(directions_handler))
        .route("/directions/route-geometry", post(route_geometry_handler))
        .route("/geocode", get(geocode_handler))
        .route("/route/segments", post(segments_handler))
        .route("/itinerary/reconcile", post(reconcile_handler))
        .route("/itinerary/move", post(move_handler))
        .route("/itinerary/night-type", post(night_type_handler))
        .route("/itinerary/arrival", post(arrival_handler))
        .route("/itinerary/departure", post(departure_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}
