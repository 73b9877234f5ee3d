use axum::extract::State;
use axum::Json;
use shiftdesk_common::api::HealthResponse;

use crate::router::AppState;

#[tracing::instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    tracing::debug!(shifts = state.shifts.len(), "health check");
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
