use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Number of chart routes mounted
    pub routes: usize,
}

/// Custom error type for API endpoints
///
/// Every variant maps to an HTTP status code and is rendered as an
/// [`ErrorResponse`] JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// No route matches the request path
    RouteNotFound(String),
    /// The path exists but does not accept this method
    MethodNotAllowed { method: Method, path: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                format!("Route not found: {}", path),
            ),
            ApiError::MethodNotAllowed { method, path } => (
                StatusCode::METHOD_NOT_ALLOWED,
                format!("Method {} not allowed on {}", method, path),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}
