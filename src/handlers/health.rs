use crate::error::HealthResponse;
use crate::routes;
use axum::{Json, http::StatusCode};

/// GET /health handler - Health check endpoint
///
/// Chart data is loaded and validated before the listener binds, so a running
/// process is always able to serve it.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    tracing::debug!("Health check passed");
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            routes: routes::CHART_ROUTES.len(),
        }),
    )
}
