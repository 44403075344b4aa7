use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, HttpConfig};
use crate::handlers::bookings::{create_booking, list_bookings};
use crate::handlers::experiences::{get_experience, list_experiences};
use crate::handlers::health_check;
use crate::handlers::promo::validate_promo;
use crate::state::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/experiences", get(list_experiences))
        .route("/experiences/:id", get(get_experience))
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/promo", post(validate_promo))
}

/// Builds the full router. The API is served both at the root and under `/api`.
pub fn create_routes(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes())
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(http.include_hsts))
        .layer(create_cors_layer(&http.allowed_origins))
        .with_state(state)
}
