use axum::{extract::State, response::Json, routing::get, Router};
use shared::HealthResponse;
use tracing::info;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Storage diagnostics. Always answers 200; an unreadable store shows up as
/// a null `response_count`.
///
/// Counting goes through `load_all`, so on the CSV backend the first call
/// creates the data directory and an empty `responses.csv`, the same lazy
/// creation any other read triggers.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let response_count = state.store.load_all().await.ok().map(|responses| responses.len());
    info!("GET /health - storage: {}, responses: {:?}", state.store.kind(), response_count);

    Json(HealthResponse {
        status: "ok".to_string(),
        storage: state.store.kind().to_string(),
        database_url_set: state.store.database_url_set(),
        relational_connected: state.store.relational_connected(),
        response_count,
    })
}
