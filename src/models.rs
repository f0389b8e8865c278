use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One OHLC candle; `x` is the trading day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Candlestick {
    #[schema(value_type = String, format = Date, example = "2024-01-02")]
    pub x: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Labelled series shared by the line, bar and pie charts
///
/// `labels[i]` pairs with `data[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ChartSeries {
    pub fn new<L, I>(points: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, f64)>,
    {
        let (labels, data) = points
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        Self { labels, data }
    }

    pub fn point_count(&self) -> usize {
        self.data.len()
    }
}
