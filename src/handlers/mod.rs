pub mod charts;
pub mod fallback;
pub mod health;

pub use charts::{
    bar_chart_data_handler, candlestick_data_handler, line_chart_data_handler,
    pie_chart_data_handler,
};
pub use fallback::{method_not_allowed_handler, not_found_handler};
pub use health::health_handler;
