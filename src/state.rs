use crate::config::Config;
use crate::store::ChartStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: ChartStore,
    pub config: Arc<Config>,
}

#[cfg(test)]
impl AppState {
    /// Sample-data state mounted under `api_prefix`
    pub fn for_tests(api_prefix: &str) -> Self {
        let config = Config {
            service_host: "127.0.0.1".to_string(),
            service_port: 0,
            api_prefix: api_prefix.to_string(),
            chart_data_path: None,
            cors_allowed_origins: Vec::new(),
        };
        let store = ChartStore::new(crate::store::ChartDataset::sample())
            .expect("sample dataset is valid");

        Self {
            store,
            config: Arc::new(config),
        }
    }
}
