//! Declarative chart configuration.

use crate::error::ParseError;
use crate::theme::{parse_color, ThemeConfig};
use chartkit_core::{ChartTheme, Size};
use chartkit_layout::{
    ChartInstance, ChartKind, ChartOptions, DataKey, DataPoint, DataSeries, Dataset,
    ValueFormatter, XAxisOptions, YAxisOptions, DEFAULT_RESIZE_DEBOUNCE_MS,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Size used when a configuration leaves it out.
pub const DEFAULT_CHART_SIZE: Size = Size::new(640.0, 360.0);

/// A chart described in YAML.
///
/// ```yaml
/// kind: stacked_bar
/// size: { width: 480, height: 260 }
/// theme:
///   preset: dark
/// y_axis:
///   prefix: "$"
///   decimals: 0
/// series:
///   - name: Online
///     data:
///       - { key: Q1, value: 120 }
///       - { key: Q2, value: 95 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub size: Size,
    pub animate: bool,
    /// Delay before a resize request relayouts the chart
    pub resize_debounce_ms: u32,
    pub theme: ThemeConfig,
    pub x_axis: XAxisConfig,
    pub y_axis: YAxisConfig,
    pub options: ChartOptions,
    pub series: Vec<SeriesConfig>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::default(),
            size: DEFAULT_CHART_SIZE,
            animate: true,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            theme: ThemeConfig::default(),
            x_axis: XAxisConfig::default(),
            y_axis: YAxisConfig::default(),
            options: ChartOptions::default(),
            series: Vec::new(),
        }
    }
}

/// Category axis section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XAxisConfig {
    /// Overrides the theme's axis visibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<bool>,
}

impl XAxisConfig {
    #[must_use]
    pub fn to_options(&self) -> XAxisOptions {
        XAxisOptions {
            hide: self.hide,
            ..XAxisOptions::default()
        }
    }
}

/// Value axis section; prefix, suffix and decimals build the label formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YAxisConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<bool>,
    pub integers_only: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub suffix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<usize>,
}

impl YAxisConfig {
    fn formatter(&self) -> ValueFormatter {
        if self.prefix.is_empty() && self.suffix.is_empty() && self.decimals.is_none() {
            ValueFormatter::default()
        } else {
            ValueFormatter::affixed(self.prefix.clone(), self.suffix.clone(), self.decimals)
        }
    }

    #[must_use]
    pub fn to_options(&self) -> YAxisOptions {
        YAxisOptions {
            label_formatter: self.formatter(),
            integers_only: self.integers_only,
            hide: self.hide,
        }
    }
}

/// One series in a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub name: String,
    /// Hex color; falls back to the theme palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub comparison: bool,
    #[serde(default)]
    pub data: Vec<PointConfig>,
}

/// One keyed value; a missing or `~` value is a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointConfig {
    pub key: DataKey,
    #[serde(default)]
    pub value: Option<f64>,
    /// Display string used in labels and tooltips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

impl SeriesConfig {
    fn to_series(&self, index: usize) -> Result<DataSeries, ParseError> {
        let mut series = DataSeries::new(self.name.clone())
            .comparison(self.comparison)
            .with_points(
                self.data
                    .iter()
                    .map(|p| {
                        let point = DataPoint::new(p.key.clone(), p.value);
                        match &p.formatted {
                            Some(f) => point.with_formatted_value(f.clone()),
                            None => point,
                        }
                    })
                    .collect(),
            );
        if let Some(hex) = &self.color {
            series.color = Some(parse_color(&format!("series[{index}].color"), hex)?);
        }
        Ok(series)
    }
}

impl ChartConfig {
    /// Parse and validate a chart configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        log::debug!(
            "loaded {:?} chart config: {} series, theme {}",
            config.kind,
            config.series.len(),
            config.theme.preset
        );
        Ok(config)
    }

    /// Load a chart configuration from a file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        log::debug!("reading chart config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ParseError> {
        for (field, v) in [("size.width", self.size.width), ("size.height", self.size.height)] {
            if !v.is_finite() || v < 0.0 {
                return Err(ParseError::invalid(field, format!("expected a non-negative number, got {v}")));
            }
        }
        for (field, v) in [
            ("options.offset_left", self.options.offset_left),
            ("options.offset_right", self.options.offset_right),
        ] {
            if !v.is_finite() {
                return Err(ParseError::invalid(field, "expected a finite number"));
            }
        }
        for (i, series) in self.series.iter().enumerate() {
            if let Some(p) = series.data.iter().position(|p| p.value.is_some_and(|v| !v.is_finite())) {
                return Err(ParseError::invalid(
                    format!("series[{i}].data[{p}].value"),
                    "expected a finite number",
                ));
            }
        }
        Ok(())
    }

    /// Resolved theme.
    pub fn theme(&self) -> Result<ChartTheme, ParseError> {
        self.theme.resolve()
    }

    /// Dataset built from the series section.
    pub fn dataset(&self) -> Result<Dataset, ParseError> {
        self.series
            .iter()
            .enumerate()
            .map(|(i, s)| s.to_series(i))
            .collect::<Result<Vec<_>, _>>()
            .map(Dataset::new)
    }

    /// Build a ready-to-use chart instance.
    pub fn build(&self) -> Result<ChartInstance, ParseError> {
        let instance = ChartInstance::new(self.kind, self.dataset()?, self.size)
            .with_theme(self.theme()?)
            .with_x_axis(self.x_axis.to_options())
            .with_y_axis(self.y_axis.to_options())
            .with_options(self.options)
            .with_animation(self.animate)
            .with_resize_debounce(self.resize_debounce_ms);
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartkit_core::Color;
    use chartkit_layout::Orientation;

    const EXAMPLE_YAML: &str = r##"
kind: stacked_bar
size:
  width: 480
  height: 260
animate: false
resize_debounce_ms: 25

theme:
  preset: dark
  overrides:
    bar:
      corner_radius: 5

y_axis:
  prefix: "$"
  suffix: k
  decimals: 1
  integers_only: true

series:
  - name: Online
    color: "#1f77b4"
    data:
      - { key: Q1, value: 12 }
      - { key: Q2, value: 9.5, formatted: "$9.5k (est.)" }
      - { key: Q3, value: ~ }
  - name: Retail
    comparison: true
    data:
      - { key: Q1, value: 4 }
      - { key: Q2, value: -2 }
      - { key: Q3 }
"##;

    #[test]
    fn test_parse_example() {
        let config = ChartConfig::from_yaml(EXAMPLE_YAML).unwrap();
        assert_eq!(config.kind, ChartKind::StackedBar);
        assert_eq!(config.size, Size::new(480.0, 260.0));
        assert!(!config.animate);
        assert_eq!(config.resize_debounce_ms, 25);
        assert_eq!(config.theme.preset, "dark");
        assert_eq!(config.series.len(), 2);
        assert_eq!(config.series[0].data[2].value, None);
        assert_eq!(config.series[1].data[2].value, None);
    }

    #[test]
    fn test_defaults() {
        let config = ChartConfig::from_yaml("series: []").unwrap();
        assert_eq!(config.kind, ChartKind::VerticalBar);
        assert_eq!(config.size, DEFAULT_CHART_SIZE);
        assert!(config.animate);
        assert_eq!(config.resize_debounce_ms, DEFAULT_RESIZE_DEBOUNCE_MS);
        assert_eq!(config.options, ChartOptions::default());
        assert_eq!(config.theme().unwrap(), ChartTheme::light());
    }

    #[test]
    fn test_dataset_conversion() {
        let config = ChartConfig::from_yaml(EXAMPLE_YAML).unwrap();
        let ds = config.dataset().unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.series[0].color, Some(Color::from_hex("#1f77b4").unwrap()));
        assert_eq!(ds.series[0].data[1].formatted_value.as_deref(), Some("$9.5k (est.)"));
        assert!(ds.series[1].is_comparison);
        assert_eq!(ds.value(1, 1), Some(-2.0));
        assert_eq!(ds.series[0].data[0].key, DataKey::from("Q1"));
    }

    #[test]
    fn test_numeric_keys() {
        let yaml = "series:\n  - name: t\n    data:\n      - { key: 2019, value: 1 }\n      - { key: 2020, value: 2 }\n";
        let ds = ChartConfig::from_yaml(yaml).unwrap().dataset().unwrap();
        assert_eq!(ds.series[0].data[0].key, DataKey::Number(2019.0));
    }

    #[test]
    fn test_y_axis_formatter() {
        let config = ChartConfig::from_yaml(EXAMPLE_YAML).unwrap();
        let options = config.y_axis.to_options();
        assert!(options.integers_only);
        assert_eq!(options.label_formatter.format(12.0), "$12.0k");

        let plain = YAxisConfig::default().to_options();
        assert_eq!(plain.label_formatter.format(1500.0), ValueFormatter::default().format(1500.0));
    }

    #[test]
    fn test_options_section() {
        let yaml = "kind: normalized_bar\noptions:\n  direction: vertical\n";
        let config = ChartConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.options.direction, Orientation::Vertical);
        assert_eq!(config.options.offset_left, 0.0);
    }

    #[test]
    fn test_unknown_kind_is_yaml_error() {
        let err = ChartConfig::from_yaml("kind: pie3d").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
    }

    #[test]
    fn test_negative_size_rejected() {
        let err = ChartConfig::from_yaml("size: { width: -1, height: 10 }").unwrap_err();
        assert!(
            matches!(err, ParseError::InvalidValue { ref field, .. } if field == "size.width"),
            "{err}"
        );
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let yaml = "series:\n  - name: s\n    data:\n      - { key: a, value: .nan }\n";
        let err = ChartConfig::from_yaml(yaml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for 'series[0].data[0].value': expected a finite number"
        );
    }

    #[test]
    fn test_bad_series_color() {
        let yaml = "series:\n  - name: s\n    color: blue\n    data: []\n";
        let config = ChartConfig::from_yaml(yaml).unwrap();
        match config.dataset().unwrap_err() {
            ParseError::Color { field, .. } => assert_eq!(field, "series[0].color"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = ChartConfig::from_yaml(EXAMPLE_YAML).unwrap();
        let yaml = config.to_yaml().unwrap();
        let parsed = ChartConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_build_instance() {
        let config = ChartConfig::from_yaml(EXAMPLE_YAML).unwrap();
        let mut chart = config.build().unwrap();
        assert_eq!(chart.kind(), ChartKind::StackedBar);
        assert_eq!(chart.theme().bar.corner_radius, 5.0);
        assert_eq!(chart.theme().background, ChartTheme::dark().background);
        assert!(!chart.layout().empty_state);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ChartConfig::load_from_file("/nonexistent/chart.yaml").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn size_survives_yaml(w in 0u16..4000, h in 0u16..4000) {
                let size = Size::new(f32::from(w), f32::from(h));
                let config = ChartConfig { size, ..ChartConfig::default() };
                let parsed = ChartConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
                prop_assert_eq!(parsed.size, config.size);
            }

            #[test]
            fn series_values_survive_conversion(values in prop::collection::vec(prop::option::of(-1e6f64..1e6), 1..20)) {
                let config = ChartConfig {
                    series: vec![SeriesConfig {
                        name: "s".to_string(),
                        color: None,
                        comparison: false,
                        data: values
                            .iter()
                            .enumerate()
                            .map(|(i, v)| PointConfig { key: DataKey::from(format!("k{i}")), value: *v, formatted: None })
                            .collect(),
                    }],
                    ..ChartConfig::default()
                };
                let ds = config.dataset().unwrap();
                for (i, v) in values.iter().enumerate() {
                    prop_assert_eq!(ds.value(0, i), *v);
                }
            }
        }
    }
}
