use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    companies: usize,
    model_configured: bool,
}

/// Health check endpoint
///
/// Always 200 OK: without a model key the service still answers every
/// search from the heuristic matcher.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        companies: state.companies.len(),
        model_configured: state.resolver.model_configured(),
    })
}
