// Route table - single source of truth for all API paths

use std::collections::HashSet;

use anyhow::{Result, bail};
use axum::{
    Router,
    routing::{MethodRouter, get},
};

use crate::handlers;
use crate::state::AppState;

pub const HEALTH: &str = "/health";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

// Chart paths, relative to the API prefix
pub const CANDLESTICK_DATA: &str = "/candlestick-data/";
pub const LINE_CHART_DATA: &str = "/line-chart-data/";
pub const BAR_CHART_DATA: &str = "/bar-chart-data/";
pub const PIE_CHART_DATA: &str = "/pie-chart-data/";

/// A path pattern bound to a handler under a unique name
#[derive(Debug)]
pub struct Route {
    /// Path as registered on the chart router, relative to the API prefix
    pub path: &'static str,
    pub name: &'static str,
    handler: fn() -> MethodRouter<AppState>,
}

impl Route {
    /// `path` without its leading slash, e.g. `candlestick-data/`
    pub fn path_pattern(&self) -> &'static str {
        self.path.trim_start_matches('/')
    }

    pub fn matches(&self, path: &str) -> bool {
        path.strip_prefix('/').unwrap_or(path) == self.path_pattern()
    }

    pub fn method_router(&self) -> MethodRouter<AppState> {
        (self.handler)()
    }
}

pub static CHART_ROUTES: [Route; 4] = [
    Route {
        path: CANDLESTICK_DATA,
        name: "candlestick_data",
        handler: candlestick_data,
    },
    Route {
        path: LINE_CHART_DATA,
        name: "line_chart_data",
        handler: line_chart_data,
    },
    Route {
        path: BAR_CHART_DATA,
        name: "bar_chart_data",
        handler: bar_chart_data,
    },
    Route {
        path: PIE_CHART_DATA,
        name: "pie_chart_data",
        handler: pie_chart_data,
    },
];

fn candlestick_data() -> MethodRouter<AppState> {
    get(handlers::candlestick_data_handler).fallback(handlers::method_not_allowed_handler)
}

fn line_chart_data() -> MethodRouter<AppState> {
    get(handlers::line_chart_data_handler).fallback(handlers::method_not_allowed_handler)
}

fn bar_chart_data() -> MethodRouter<AppState> {
    get(handlers::bar_chart_data_handler).fallback(handlers::method_not_allowed_handler)
}

fn pie_chart_data() -> MethodRouter<AppState> {
    get(handlers::pie_chart_data_handler).fallback(handlers::method_not_allowed_handler)
}

/// First route whose pattern matches a prefix-relative request path
pub fn resolve(path: &str) -> Option<&'static Route> {
    CHART_ROUTES.iter().find(|route| route.matches(path))
}

/// Path pattern registered under `name`
pub fn reverse(name: &str) -> Option<&'static str> {
    CHART_ROUTES
        .iter()
        .find(|route| route.name == name)
        .map(Route::path_pattern)
}

/// Absolute URL path of the route `name` mounted under `prefix`
pub fn url_for(prefix: &str, name: &str) -> Option<String> {
    reverse(name).map(|pattern| format!("{}/{}", prefix.trim_end_matches('/'), pattern))
}

pub fn ensure_unique(routes: &[Route]) -> Result<()> {
    let mut names = HashSet::new();
    let mut patterns = HashSet::new();
    for route in routes {
        if !names.insert(route.name) {
            bail!("duplicate route name '{}'", route.name);
        }
        if !patterns.insert(route.path_pattern()) {
            bail!("duplicate route path '{}'", route.path_pattern());
        }
    }
    Ok(())
}

/// Router with one binding per entry of [`CHART_ROUTES`]
pub fn chart_router() -> Router<AppState> {
    CHART_ROUTES.iter().fold(Router::new(), |router, route| {
        router.route(route.path, route.method_router())
    })
}
