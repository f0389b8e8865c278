use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse};
use crate::handlers;
use crate::models::{Candlestick, ChartSeries};

/// OpenAPI documentation for the routes mounted at the root
#[derive(OpenApi)]
#[openapi(
    info(
        title = "chart-dashboard-api",
        version = "0.1.0",
        description = "Chart data endpoints backing the dashboard frontend"
    ),
    paths(handlers::health::health_handler),
    components(
        schemas(
            Candlestick,
            ChartSeries,
            ErrorResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "charts", description = "Dashboard chart data")
    )
)]
pub struct ApiDoc;

/// Chart routes, with paths relative to the API prefix
#[derive(OpenApi)]
#[openapi(paths(
    handlers::charts::candlestick_data_handler,
    handlers::charts::line_chart_data_handler,
    handlers::charts::bar_chart_data_handler,
    handlers::charts::pie_chart_data_handler
))]
pub struct ChartsApiDoc;

/// Full document with the chart paths mounted under `api_prefix`
pub fn openapi_for(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let doc = ApiDoc::openapi();
    if api_prefix.is_empty() {
        doc.merge_from(ChartsApiDoc::openapi())
    } else {
        doc.nest(api_prefix, ChartsApiDoc::openapi())
    }
}
