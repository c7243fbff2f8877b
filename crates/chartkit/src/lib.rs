//! chartkit: chart scales, layout and tooltips.
//!
//! Re-exports the core types, the layout engine and the YAML loader, and
//! adds helpers for the common path of building a chart from a config and
//! handing its draw commands to a renderer as JSON.
//!
//! ```
//! use chartkit::prelude::*;
//!
//! let mut chart = chartkit::from_yaml(
//!     "kind: sparkline\nseries:\n  - name: cpu\n    data: [{key: 0, value: 1}, {key: 1, value: 4}]\n",
//! )
//! .unwrap();
//! let json = chartkit::commands_to_json(chart.layout()).unwrap();
//! assert!(json.starts_with('['));
//! ```
#![allow(clippy::module_name_repetitions)]

pub use chartkit_core::*;
pub use chartkit_layout as layout;
pub use chartkit_yaml as yaml;

pub use chartkit_layout::{ChartInstance, ChartKind, ChartLayout, Dataset};
pub use chartkit_yaml::{ChartConfig, ParseError};

use std::path::Path;

/// Commonly used types.
pub mod prelude {
    pub use chartkit_core::{ChartTheme, DrawCommand, Event, Key, Point, Size};
    pub use chartkit_layout::{
        ChartInstance, ChartKind, ChartLayout, DataPoint, DataSeries, Dataset, TooltipContent,
        ValueFormatter, XAxisOptions, YAxisOptions,
    };
    pub use chartkit_yaml::{ChartConfig, ParseError};
}

/// Build a chart instance from a YAML string.
pub fn from_yaml(yaml: &str) -> Result<ChartInstance, ParseError> {
    ChartConfig::from_yaml(yaml)?.build()
}

/// Build a chart instance from a YAML file.
pub fn load(path: impl AsRef<Path>) -> Result<ChartInstance, ParseError> {
    ChartConfig::load_from_file(path)?.build()
}

/// Serialize a layout's draw commands for a renderer.
pub fn commands_to_json(layout: &ChartLayout) -> serde_json::Result<String> {
    serde_json::to_string(&layout.commands)
}

/// Parse draw commands produced by [`commands_to_json`].
pub fn commands_from_json(json: &str) -> serde_json::Result<Vec<DrawCommand>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    const LINE_YAML: &str = r"
kind: line
size: { width: 300, height: 160 }
series:
  - name: a
    data:
      - { key: Mon, value: 1 }
      - { key: Tue, value: 3 }
      - { key: Wed, value: 2 }
";

    #[test]
    fn test_from_yaml() {
        let mut chart = super::from_yaml(LINE_YAML).unwrap();
        assert_eq!(chart.kind(), ChartKind::Line);
        assert!(!chart.layout().empty_state);
    }

    #[test]
    fn test_commands_json_roundtrip() {
        let mut chart = super::from_yaml(LINE_YAML).unwrap();
        let layout = chart.layout();
        let json = super::commands_to_json(layout).unwrap();
        let back = super::commands_from_json(&json).unwrap();
        assert_eq!(back, layout.commands);
    }

    #[test]
    fn test_from_yaml_propagates_errors() {
        assert!(super::from_yaml("theme: { preset: sepia }").is_err());
    }
}
