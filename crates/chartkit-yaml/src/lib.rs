#![allow(clippy::module_name_repetitions)]
//! YAML chart configuration for chartkit.
//!
//! A [`ChartConfig`] names the chart type, size, theme preset with partial
//! overrides, axis formatting and the series to plot, and builds a
//! [`ChartInstance`](chartkit_layout::ChartInstance) from them.
//!
//! ```
//! use chartkit_yaml::ChartConfig;
//!
//! let config = ChartConfig::from_yaml(
//!     r#"
//! kind: line
//! theme:
//!   preset: dark
//! series:
//!   - name: visits
//!     data:
//!       - { key: Mon, value: 3 }
//!       - { key: Tue, value: 7 }
//! "#,
//! )
//! .unwrap();
//! let mut chart = config.build().unwrap();
//! assert!(!chart.layout().empty_state);
//! ```

mod config;
mod error;
mod theme;

pub use config::{
    ChartConfig, PointConfig, SeriesConfig, XAxisConfig, YAxisConfig, DEFAULT_CHART_SIZE,
};
pub use error::ParseError;
pub use theme::ThemeConfig;
