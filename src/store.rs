use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{Days, NaiveDate};
use serde::Deserialize;

use crate::config::Config;
use crate::models::{Candlestick, ChartSeries};

const SAMPLE_FIRST_SESSION: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 2) {
    Some(date) => date,
    None => panic!("invalid sample start date"),
};

/// Everything the dashboard renders, as loaded from disk or the built-in sample
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartDataset {
    pub candlestick: Vec<Candlestick>,
    pub line: ChartSeries,
    pub bar: ChartSeries,
    pub pie: ChartSeries,
}

impl ChartDataset {
    /// Sample data matching what the dashboard frontend expects
    pub fn sample() -> Self {
        // `offset` counts calendar days from the first session
        let candle = |offset: u64, open: f64, high: f64, low: f64, close: f64| Candlestick {
            x: SAMPLE_FIRST_SESSION + Days::new(offset),
            open,
            high,
            low,
            close,
        };

        Self {
            candlestick: vec![
                candle(0, 100.0, 110.0, 95.0, 105.0),
                candle(1, 105.0, 112.0, 101.0, 108.0),
                candle(2, 108.0, 109.0, 98.0, 100.0),
                candle(3, 100.0, 106.0, 97.0, 104.0),
                candle(6, 104.0, 115.0, 103.0, 113.0),
                candle(7, 113.0, 118.0, 107.0, 109.0),
                candle(8, 109.0, 111.0, 102.0, 103.0),
            ],
            line: ChartSeries::new([
                ("Jan", 65.0),
                ("Feb", 59.0),
                ("Mar", 80.0),
                ("Apr", 81.0),
                ("May", 56.0),
                ("Jun", 55.0),
            ]),
            bar: ChartSeries::new([
                ("Product A", 120.0),
                ("Product B", 190.0),
                ("Product C", 30.0),
                ("Product D", 50.0),
            ]),
            pie: ChartSeries::new([
                ("Red", 300.0),
                ("Blue", 50.0),
                ("Yellow", 100.0),
                ("Green", 75.0),
                ("Purple", 25.0),
            ]),
        }
    }

    /// Check the dataset and put candles in date order
    pub fn validated(mut self) -> Result<Self> {
        check_series("line", &self.line)?;
        check_series("bar", &self.bar)?;
        check_series("pie", &self.pie)?;
        if let Some(i) = self.pie.data.iter().position(|v| *v < 0.0) {
            bail!(
                "pie chart slice '{}' has negative value {}",
                self.pie.labels[i],
                self.pie.data[i]
            );
        }

        let mut seen = HashSet::new();
        for c in &self.candlestick {
            if ![c.open, c.high, c.low, c.close].iter().all(|v| v.is_finite()) {
                bail!("candlestick {} has a non-finite price", c.x);
            }
            if c.low > c.open.min(c.close) || c.high < c.open.max(c.close) {
                bail!(
                    "candlestick {} is inconsistent: low {} / high {} \
                     must bound open {} and close {}",
                    c.x,
                    c.low,
                    c.high,
                    c.open,
                    c.close
                );
            }
            if !seen.insert(c.x) {
                bail!("duplicate candlestick for {}", c.x);
            }
        }
        self.candlestick.sort_by_key(|c| c.x);

        Ok(self)
    }
}

fn check_series(chart: &str, series: &ChartSeries) -> Result<()> {
    if series.labels.len() != series.data.len() {
        bail!(
            "{} chart has {} labels but {} data points",
            chart,
            series.labels.len(),
            series.data.len()
        );
    }
    if let Some(i) = series.data.iter().position(|v| !v.is_finite()) {
        bail!("{} chart point '{}' is not a finite number", chart, series.labels[i]);
    }
    Ok(())
}

/// Read-only chart data shared across handlers
#[derive(Clone)]
pub struct ChartStore {
    inner: Arc<ChartDataset>,
}

impl ChartStore {
    /// Load the dataset named by `CHART_DATA_PATH`, or the built-in sample
    pub async fn from_config(config: &Config) -> Result<Self> {
        let dataset = match &config.chart_data_path {
            Some(path) => load_file(path).await?,
            None => {
                tracing::info!("No CHART_DATA_PATH set, serving built-in sample data");
                ChartDataset::sample()
            }
        };
        let store = Self::new(dataset)?;

        tracing::info!(
            "Chart data ready: {} candles, {} line points, {} bars, {} pie slices",
            store.candlesticks().len(),
            store.line().point_count(),
            store.bar().point_count(),
            store.pie().point_count()
        );

        Ok(store)
    }

    pub fn new(dataset: ChartDataset) -> Result<Self> {
        let dataset = dataset.validated().context("Invalid chart dataset")?;
        Ok(Self {
            inner: Arc::new(dataset),
        })
    }

    pub fn candlesticks(&self) -> &[Candlestick] {
        &self.inner.candlestick
    }

    pub fn line(&self) -> &ChartSeries {
        &self.inner.line
    }

    pub fn bar(&self) -> &ChartSeries {
        &self.inner.bar
    }

    pub fn pie(&self) -> &ChartSeries {
        &self.inner.pie
    }
}

async fn load_file(path: &Path) -> Result<ChartDataset> {
    tracing::info!("Loading chart data from {}", path.display());

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read chart data file {}", path.display()))?;

    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse chart data file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn candle(day: u32, open: f64, high: f64, low: f64, close: f64) -> Candlestick {
        Candlestick {
            x: date(day),
            open,
            high,
            low,
            close,
        }
    }

    fn config_with_path(path: Option<&Path>) -> Config {
        Config {
            service_host: "127.0.0.1".to_string(),
            service_port: 0,
            api_prefix: "/api".to_string(),
            chart_data_path: path.map(Path::to_path_buf),
            cors_allowed_origins: Vec::new(),
        }
    }

    #[test]
    fn test_sample_is_valid() {
        let sample = ChartDataset::sample();
        let validated = sample.clone().validated().unwrap();
        assert_eq!(validated, sample);
        assert!(!validated.candlestick.is_empty());
        assert_eq!(validated.pie.labels[0], "Red");
    }

    #[test]
    fn test_sample_dates_are_trading_days() {
        let days: Vec<String> = ChartDataset::sample()
            .candlestick
            .iter()
            .map(|c| c.x.to_string())
            .collect();

        assert_eq!(
            days,
            vec![
                "2024-01-02",
                "2024-01-03",
                "2024-01-04",
                "2024-01-05",
                "2024-01-08",
                "2024-01-09",
                "2024-01-10",
            ]
        );
    }

    #[test]
    fn test_candles_sorted_by_date() {
        let mut dataset = ChartDataset::sample();
        dataset.candlestick = vec![
            candle(5, 10.0, 12.0, 9.0, 11.0),
            candle(1, 10.0, 12.0, 9.0, 11.0),
            candle(3, 10.0, 12.0, 9.0, 11.0),
        ];

        let validated = dataset.validated().unwrap();
        let days: Vec<_> = validated.candlestick.iter().map(|c| c.x).collect();
        assert_eq!(days, vec![date(1), date(3), date(5)]);
    }

    #[test]
    fn test_rejects_label_data_mismatch() {
        let mut dataset = ChartDataset::sample();
        dataset.bar.data.pop();

        let err = dataset.validated().unwrap_err().to_string();
        assert!(err.contains("bar chart"));
        assert!(err.contains("labels"));
    }

    #[test]
    fn test_rejects_non_finite_value() {
        let mut dataset = ChartDataset::sample();
        dataset.line.data[2] = f64::NAN;

        let err = dataset.validated().unwrap_err().to_string();
        assert!(err.contains("line chart point 'Mar'"));
    }

    #[test]
    fn test_rejects_negative_pie_slice() {
        let mut dataset = ChartDataset::sample();
        dataset.pie.data[1] = -5.0;

        let err = dataset.validated().unwrap_err().to_string();
        assert!(err.contains("Blue"));
    }

    #[test]
    fn test_rejects_inconsistent_candle() {
        let mut dataset = ChartDataset::sample();
        // low above close
        dataset.candlestick = vec![candle(1, 10.0, 12.0, 10.5, 10.2)];
        assert!(dataset.clone().validated().is_err());

        // high below open
        dataset.candlestick = vec![candle(1, 13.0, 12.0, 9.0, 11.0)];
        assert!(dataset.validated().is_err());
    }

    #[test]
    fn test_rejects_duplicate_candle_date() {
        let mut dataset = ChartDataset::sample();
        dataset.candlestick = vec![
            candle(2, 10.0, 12.0, 9.0, 11.0),
            candle(2, 11.0, 13.0, 10.0, 12.0),
        ];

        let err = dataset.validated().unwrap_err().to_string();
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn test_store_is_clonable_and_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<ChartStore>();
        assert_send_sync::<ChartStore>();
    }

    #[tokio::test]
    async fn test_from_config_uses_sample_without_path() {
        let store = ChartStore::from_config(&config_with_path(None)).await.unwrap();
        assert_eq!(store.pie(), &ChartDataset::sample().pie);
    }

    #[tokio::test]
    async fn test_from_config_loads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "candlestick": [
                {"x": "2024-03-02", "open": 5.0, "high": 6.0, "low": 4.0, "close": 5.5},
                {"x": "2024-03-01", "open": 4.0, "high": 5.0, "low": 3.5, "close": 5.0}
            ],
            "line": {"labels": ["a", "b"], "data": [1.0, 2.0]},
            "bar": {"labels": ["x"], "data": [3.0]},
            "pie": {"labels": ["Red", "Cyan"], "data": [1.0, 3.0]}
        });
        file.write_all(json.to_string().as_bytes()).unwrap();

        let store = ChartStore::from_config(&config_with_path(Some(file.path())))
            .await
            .unwrap();

        assert_eq!(store.candlesticks().len(), 2);
        assert_eq!(store.candlesticks()[0].x, date(1));
        assert_eq!(store.bar().labels, vec!["x".to_string()]);
        assert_eq!(store.pie().data, vec![1.0, 3.0]);
    }

    #[tokio::test]
    async fn test_bundled_data_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/charts.json");

        let store = ChartStore::from_config(&config_with_path(Some(&path)))
            .await
            .unwrap();

        assert_eq!(store.candlesticks().len(), 5);
        assert_eq!(store.pie().labels[0], "Orange");
    }

    #[tokio::test]
    async fn test_from_config_missing_file() {
        let result = ChartStore::from_config(&config_with_path(Some(Path::new(
            "/nonexistent/charts.json",
        ))))
        .await;

        let err = format!("{:#}", result.err().unwrap());
        assert!(err.contains("Failed to read chart data file"));
    }

    #[tokio::test]
    async fn test_from_config_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"line\": ").unwrap();

        let result = ChartStore::from_config(&config_with_path(Some(file.path()))).await;

        let err = format!("{:#}", result.err().unwrap());
        assert!(err.contains("Failed to parse chart data file"));
    }

    #[tokio::test]
    async fn test_from_config_invalid_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "candlestick": [],
            "line": {"labels": ["a", "b"], "data": [1.0]},
            "bar": {"labels": [], "data": []},
            "pie": {"labels": [], "data": []}
        });
        file.write_all(json.to_string().as_bytes()).unwrap();

        let result = ChartStore::from_config(&config_with_path(Some(file.path()))).await;

        let err = format!("{:#}", result.err().unwrap());
        assert!(err.contains("Invalid chart dataset"));
        assert!(err.contains("line chart"));
    }
}
