use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use axum::http::HeaderValue;

#[derive(Debug, Clone)]
pub struct Config {
    pub service_host: String,
    pub service_port: u16,
    /// Mount point of the chart routes, normalized to `/segment` or `""` for root
    pub api_prefix: String,
    pub chart_data_path: Option<PathBuf>,
    /// Empty means any origin is allowed
    pub cors_allowed_origins: Vec<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let api_prefix =
            normalize_prefix(&lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()));
        check_prefix(&api_prefix)
            .with_context(|| format!("API_PREFIX must be a literal path, got '{}'", api_prefix))?;

        let chart_data_path = lookup("CHART_DATA_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(|origin| {
                    HeaderValue::from_str(origin).with_context(|| {
                        format!("CORS_ALLOWED_ORIGINS contains an invalid origin: '{}'", origin)
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Config {
            service_host,
            service_port,
            api_prefix,
            chart_data_path,
            cors_allowed_origins,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  API prefix: {}",
            if self.api_prefix.is_empty() { "/" } else { self.api_prefix.as_str() });
        tracing::info!("  Chart data: {}",
            self.chart_data_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in sample".to_string()));
        if self.cors_allowed_origins.is_empty() {
            tracing::info!("  CORS origins: any");
        } else {
            tracing::info!("  CORS origins: {:?}", self.cors_allowed_origins);
        }
        tracing::info!("  Service listening on: {}", self.bind_addr());
    }
}

/// `api/`, `/api/` and `/api` all become `/api`; `""` and `/` become `""`
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Captures, wildcards and empty segments cannot be nested under
fn check_prefix(prefix: &str) -> Result<()> {
    for segment in prefix.split('/').skip(1) {
        if segment.is_empty() {
            bail!("empty path segment");
        }
        if segment.starts_with(':') || segment.starts_with('*') {
            bail!("segment '{}' would be a path parameter", segment);
        }
        if segment.contains(['{', '}', '?', '#']) {
            bail!("segment '{}' contains a reserved character", segment);
        }
    }
    Ok(())
}
