use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use shiftdesk_common::Shift;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, shifts};

#[derive(Clone)]
pub struct AppState {
    pub shifts: Arc<Vec<Shift>>,
}

pub fn build(shifts: Vec<Shift>, cors_origins: &[String]) -> Router {
    let state = AppState {
        shifts: Arc::new(shifts),
    };

    let cors = build_cors_layer(cors_origins);

    Router::new()
        .route("/api/v1/health", get(health::health))
        .route("/api/v1/shifts", get(shifts::get_shifts))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if origins.is_empty() {
        // Local browser development works without SD_CORS_ORIGINS
        cors.allow_origin(AllowOrigin::exact(HeaderValue::from_static(
            "http://localhost",
        )))
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(AllowOrigin::list(parsed))
    }
}
