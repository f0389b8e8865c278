use crate::error::ApiError;
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::Method,
    response::{IntoResponse, Redirect, Response},
};

/// Fallback for paths that match no route
///
/// A GET or HEAD to a chart path missing its trailing slash is redirected to
/// the canonical form, everything else is a 404.
pub async fn not_found_handler(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let path = uri.path();

    if method == Method::GET || method == Method::HEAD {
        if let Some(target) = slash_redirect(&state.config.api_prefix, path) {
            let location = match uri.query() {
                Some(query) => format!("{}?{}", target, query),
                None => target,
            };
            tracing::debug!("Redirecting {} to {}", path, location);
            return Redirect::permanent(&location).into_response();
        }
    }

    tracing::info!("No route for {} {}", method, path);
    ApiError::RouteNotFound(path.to_string()).into_response()
}

/// Fallback for chart paths hit with anything other than GET
pub async fn method_not_allowed_handler(
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> ApiError {
    tracing::info!("Rejected {} {}", method, uri.path());
    ApiError::MethodNotAllowed {
        method,
        path: uri.path().to_string(),
    }
}

fn slash_redirect(prefix: &str, path: &str) -> Option<String> {
    if path.ends_with('/') {
        return None;
    }
    let relative = path.strip_prefix(prefix).filter(|rest| rest.starts_with('/'))?;
    routes::resolve(&format!("{}/", relative)).map(|_| format!("{}/", path))
}
