use crate::models::{Candlestick, ChartSeries};
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};

/// GET {prefix}/candlestick-data/ handler - Daily OHLC candles, oldest first
#[utoipa::path(
    get,
    path = routes::CANDLESTICK_DATA,
    responses(
        (status = 200, description = "Candles sorted by date", body = [Candlestick])
    ),
    tag = "charts"
)]
pub async fn candlestick_data_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Vec<Candlestick>>) {
    let candles = state.store.candlesticks().to_vec();
    tracing::info!("Served {} candles", candles.len());
    (StatusCode::OK, Json(candles))
}

/// GET {prefix}/line-chart-data/ handler
#[utoipa::path(
    get,
    path = routes::LINE_CHART_DATA,
    responses(
        (status = 200, description = "Line chart series", body = ChartSeries)
    ),
    tag = "charts"
)]
pub async fn line_chart_data_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ChartSeries>) {
    serve_series("line", state.store.line())
}

/// GET {prefix}/bar-chart-data/ handler
#[utoipa::path(
    get,
    path = routes::BAR_CHART_DATA,
    responses(
        (status = 200, description = "Bar chart series", body = ChartSeries)
    ),
    tag = "charts"
)]
pub async fn bar_chart_data_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ChartSeries>) {
    serve_series("bar", state.store.bar())
}

/// GET {prefix}/pie-chart-data/ handler
#[utoipa::path(
    get,
    path = routes::PIE_CHART_DATA,
    responses(
        (status = 200, description = "Pie chart slices", body = ChartSeries)
    ),
    tag = "charts"
)]
pub async fn pie_chart_data_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ChartSeries>) {
    serve_series("pie", state.store.pie())
}

fn serve_series(chart: &str, series: &ChartSeries) -> (StatusCode, Json<ChartSeries>) {
    tracing::info!("Served {} chart with {} points", chart, series.point_count());
    (StatusCode::OK, Json(series.clone()))
}
