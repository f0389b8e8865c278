use axum::{
    Router,
    extract::Request,
    http::{HeaderName, Method},
    routing::get,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc;
use crate::config::Config;
use crate::handlers;
use crate::routes;
use crate::state::AppState;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Assemble the service: chart routes under the API prefix, health, docs,
/// fallbacks and middleware
pub fn build_app(state: AppState) -> Router {
    let charts = routes::chart_router();
    let api = if state.config.api_prefix.is_empty() {
        charts
    } else {
        Router::new().nest(&state.config.api_prefix, charts)
    };

    Router::new()
        .route(routes::HEALTH, get(handlers::health_handler))
        .merge(api)
        .merge(
            SwaggerUi::new(routes::SWAGGER_UI)
                .url(routes::OPENAPI_JSON, api_doc::openapi_for(&state.config.api_prefix)),
        )
        .fallback(handlers::not_found_handler)
        .layer(cors_layer(&state.config))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = if config.cors_allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(config.cors_allowed_origins.clone())
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}
