//! Series data and axis options consumed by every layout pass.

use crate::error::DatasetError;
use chartkit_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Category or ordinal key of a data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataKey {
    Number(f64),
    Category(String),
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Category(s) => f.write_str(s),
        }
    }
}

impl From<&str> for DataKey {
    fn from(s: &str) -> Self {
        Self::Category(s.to_string())
    }
}

impl From<String> for DataKey {
    fn from(s: String) -> Self {
        Self::Category(s)
    }
}

impl From<f64> for DataKey {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for DataKey {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// A single keyed value; `None` marks a gap in the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub key: DataKey,
    pub value: Option<f64>,
    /// Pre-formatted value shown instead of the formatter output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_value: Option<String>,
}

impl DataPoint {
    /// Create a point.
    #[must_use]
    pub fn new(key: impl Into<DataKey>, value: impl Into<Option<f64>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            formatted_value: None,
        }
    }

    /// Attach a pre-formatted value.
    #[must_use]
    pub fn with_formatted_value(mut self, formatted: impl Into<String>) -> Self {
        self.formatted_value = Some(formatted.into());
        self
    }
}

/// Named, ordered sequence of points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSeries {
    pub name: String,
    #[serde(default)]
    pub data: Vec<DataPoint>,
    /// Explicit color; falls back to the theme palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Comparison series are drawn dashed in line charts
    #[serde(default)]
    pub is_comparison: bool,
}

impl DataSeries {
    /// Create an empty series.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a point.
    #[must_use]
    pub fn point(mut self, key: impl Into<DataKey>, value: impl Into<Option<f64>>) -> Self {
        self.data.push(DataPoint::new(key, value));
        self
    }

    /// Replace all points.
    #[must_use]
    pub fn with_points(mut self, data: Vec<DataPoint>) -> Self {
        self.data = data;
        self
    }

    /// Set an explicit color.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Mark as comparison series.
    #[must_use]
    pub const fn comparison(mut self, is_comparison: bool) -> Self {
        self.is_comparison = is_comparison;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `index`, `None` for nulls and missing points.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.data.get(index).and_then(|p| p.value)
    }

    /// Whether any value is strictly positive.
    #[must_use]
    pub fn has_positive(&self) -> bool {
        self.data.iter().filter_map(|p| p.value).any(|v| v > 0.0)
    }
}

/// Outcome of validating a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatasetStatus {
    pub empty_state: bool,
    pub reason: Option<DatasetError>,
}

/// Series sharing a common category axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub series: Vec<DataSeries>,
}

impl Dataset {
    #[must_use]
    pub fn new(series: Vec<DataSeries>) -> Self {
        Self { series }
    }

    /// Number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Number of categories, taken from the longest series.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.series.iter().map(DataSeries::len).max().unwrap_or(0)
    }

    /// Keys of the category axis, taken from the longest series.
    #[must_use]
    pub fn keys(&self) -> Vec<&DataKey> {
        self.series
            .iter()
            .max_by_key(|s| s.len())
            .map(|s| s.data.iter().map(|p| &p.key).collect())
            .unwrap_or_default()
    }

    /// Value of `series` at `index`.
    #[must_use]
    pub fn value(&self, series: usize, index: usize) -> Option<f64> {
        self.series.get(series).and_then(|s| s.value_at(index))
    }

    /// Non-null values at one category, in series order.
    #[must_use]
    pub fn category_values(&self, index: usize) -> Vec<f64> {
        self.series.iter().filter_map(|s| s.value_at(index)).collect()
    }

    /// Every non-null, finite value.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series
            .iter()
            .flat_map(|s| s.data.iter().filter_map(|p| p.value))
            .filter(|v| v.is_finite())
    }

    /// `(min, max)` of all values, `None` when there are none.
    #[must_use]
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Whether any value is strictly positive.
    #[must_use]
    pub fn has_positive(&self) -> bool {
        self.series.iter().any(DataSeries::has_positive)
    }

    /// Check the dataset against the layout invariants.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let first = self.series.first().ok_or(DatasetError::NoSeries)?;
        if self.series.iter().all(DataSeries::is_empty) {
            return Err(DatasetError::NoPoints);
        }
        let expected = first.len();
        if let Some(s) = self.series.iter().find(|s| s.len() != expected) {
            return Err(DatasetError::LengthMismatch {
                series: s.name.clone(),
                expected,
                found: s.len(),
            });
        }
        if self.values().next().is_none() {
            return Err(DatasetError::AllNull);
        }
        Ok(())
    }

    /// Validation result folded into the empty-state flag.
    #[must_use]
    pub fn status(&self) -> DatasetStatus {
        match self.validate() {
            Ok(()) => DatasetStatus::default(),
            Err(reason) => {
                log::debug!("dataset falls back to empty state: {reason}");
                DatasetStatus {
                    empty_state: true,
                    reason: Some(reason),
                }
            }
        }
    }
}

impl FromIterator<DataSeries> for Dataset {
    fn from_iter<I: IntoIterator<Item = DataSeries>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Render a number without float noise (`0.30000000000000004` -> `0.3`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let cleaned = (value * 1e9).round() / 1e9;
    if cleaned == 0.0 {
        "0".to_string()
    } else {
        format!("{cleaned}")
    }
}

/// Injected `f64 -> String` label formatter.
#[derive(Clone)]
pub struct ValueFormatter(Arc<dyn Fn(f64) -> String + Send + Sync>);

impl ValueFormatter {
    /// Wrap a formatting function.
    pub fn new(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Fixed number of decimals.
    #[must_use]
    pub fn fixed(decimals: usize) -> Self {
        Self::new(move |v| format!("{v:.decimals$}"))
    }

    /// Prefix and suffix around the number, e.g. `$` and `%`.
    #[must_use]
    pub fn affixed(prefix: impl Into<String>, suffix: impl Into<String>, decimals: Option<usize>) -> Self {
        let prefix = prefix.into();
        let suffix = suffix.into();
        Self::new(move |v| {
            let body = match decimals {
                Some(d) => format!("{v:.d$}"),
                None => format_number(v),
            };
            format!("{prefix}{body}{suffix}")
        })
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new(format_number)
    }
}

impl fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFormatter(..)")
    }
}

/// Injected `DataKey -> String` label formatter.
#[derive(Clone)]
pub struct KeyFormatter(Arc<dyn Fn(&DataKey) -> String + Send + Sync>);

impl KeyFormatter {
    /// Wrap a formatting function.
    pub fn new(f: impl Fn(&DataKey) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn format(&self, key: &DataKey) -> String {
        (self.0)(key)
    }
}

impl Default for KeyFormatter {
    fn default() -> Self {
        Self::new(ToString::to_string)
    }
}

impl fmt::Debug for KeyFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyFormatter(..)")
    }
}

/// Category axis options.
#[derive(Debug, Clone, Default)]
pub struct XAxisOptions {
    pub label_formatter: KeyFormatter,
    /// Overrides the theme's `x_axis.hide`
    pub hide: Option<bool>,
}

impl XAxisOptions {
    #[must_use]
    pub fn with_formatter(mut self, formatter: KeyFormatter) -> Self {
        self.label_formatter = formatter;
        self
    }

    #[must_use]
    pub const fn hidden(mut self, hide: bool) -> Self {
        self.hide = Some(hide);
        self
    }
}

/// Value axis options.
#[derive(Debug, Clone, Default)]
pub struct YAxisOptions {
    pub label_formatter: ValueFormatter,
    /// Restrict ticks to whole numbers
    pub integers_only: bool,
    /// Overrides the theme's `y_axis.hide`
    pub hide: Option<bool>,
}

impl YAxisOptions {
    #[must_use]
    pub fn with_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.label_formatter = formatter;
        self
    }

    #[must_use]
    pub const fn integers_only(mut self, integers_only: bool) -> Self {
        self.integers_only = integers_only;
        self
    }

    #[must_use]
    pub const fn hidden(mut self, hide: bool) -> Self {
        self.hide = Some(hide);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales() -> Dataset {
        Dataset::new(vec![
            DataSeries::new("Sales")
                .point("A", 10.0)
                .point("B", -5.0)
                .point("C", 0.0),
            DataSeries::new("Returns")
                .point("A", 2.0)
                .point("B", None)
                .point("C", 3.0),
        ])
    }

    #[test]
    fn test_data_key_display() {
        assert_eq!(DataKey::from("Jan").to_string(), "Jan");
        assert_eq!(DataKey::from(3).to_string(), "3");
        assert_eq!(DataKey::from(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_data_key_untagged_serde() {
        let keys: Vec<DataKey> = serde_json::from_str(r#"["Jan", 4]"#).unwrap();
        assert_eq!(keys, vec![DataKey::from("Jan"), DataKey::Number(4.0)]);
    }

    #[test]
    fn test_dataset_accessors() {
        let ds = sales();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.category_count(), 3);
        assert_eq!(ds.value(1, 1), None);
        assert_eq!(ds.category_values(1), vec![-5.0]);
        assert_eq!(ds.extent(), Some((-5.0, 10.0)));
        assert!(ds.has_positive());
        assert_eq!(ds.keys().len(), 3);
    }

    #[test]
    fn test_status_valid() {
        let status = sales().status();
        assert!(!status.empty_state);
        assert!(status.reason.is_none());
    }

    #[test]
    fn test_status_no_series() {
        let status = Dataset::default().status();
        assert!(status.empty_state);
        assert_eq!(status.reason, Some(DatasetError::NoSeries));
    }

    #[test]
    fn test_status_all_empty() {
        let ds = Dataset::new(vec![DataSeries::new("a"), DataSeries::new("b")]);
        assert_eq!(ds.status().reason, Some(DatasetError::NoPoints));
    }

    #[test]
    fn test_status_length_mismatch() {
        let ds = Dataset::new(vec![
            DataSeries::new("a").point("x", 1.0).point("y", 2.0),
            DataSeries::new("b").point("x", 1.0),
        ]);
        assert!(matches!(
            ds.status().reason,
            Some(DatasetError::LengthMismatch { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_status_all_null() {
        let ds = Dataset::new(vec![DataSeries::new("a").point("x", None)]);
        assert_eq!(ds.status().reason, Some(DatasetError::AllNull));
    }

    #[test]
    fn test_format_number_cleans_noise() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1500.0), "1500");
    }

    #[test]
    fn test_value_formatters() {
        assert_eq!(ValueFormatter::default().format(2.5), "2.5");
        assert_eq!(ValueFormatter::fixed(2).format(2.5), "2.50");
        assert_eq!(
            ValueFormatter::affixed("$", "", Some(0)).format(1234.4),
            "$1234"
        );
        assert_eq!(ValueFormatter::affixed("", "%", None).format(12.0), "12%");
    }

    #[test]
    fn test_key_formatter() {
        let upper = KeyFormatter::new(|k| k.to_string().to_uppercase());
        assert_eq!(upper.format(&DataKey::from("jan")), "JAN");
        assert_eq!(KeyFormatter::default().format(&DataKey::from(7)), "7");
    }

    #[test]
    fn test_axis_option_builders() {
        let x = XAxisOptions::default().hidden(true);
        assert_eq!(x.hide, Some(true));
        let y = YAxisOptions::default().integers_only(true);
        assert!(y.integers_only);
        assert!(y.hide.is_none());
    }
}
