//! Theme presets with partial overrides.

use crate::error::ParseError;
use chartkit_core::{ChartTheme, Color};
use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};

/// Theme section of a chart configuration.
///
/// `overrides` is merged key by key over the serialized preset, so a
/// configuration only names what it changes:
///
/// ```yaml
/// theme:
///   preset: dark
///   overrides:
///     bar:
///       corner_radius: 6
///     grid:
///       color: "#30363d"
/// ```
///
/// Color fields accept either a hex string or an `{r, g, b, a}` mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Built-in preset: `light`, `dark` or `print`
    pub preset: String,
    /// Background color shortcut
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Series palette shortcut; replaces the preset palette when non-empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub series_colors: Vec<String>,
    /// Partial theme tree merged over the preset
    #[serde(skip_serializing_if = "Value::is_null")]
    pub overrides: Value,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preset: "light".to_string(),
            background: None,
            series_colors: Vec::new(),
            overrides: Value::Null,
        }
    }
}

impl ThemeConfig {
    /// Theme config for a named preset with no overrides.
    #[must_use]
    pub fn preset(name: impl Into<String>) -> Self {
        Self {
            preset: name.into(),
            ..Self::default()
        }
    }

    /// Resolve the preset and apply overrides and shortcuts.
    pub fn resolve(&self) -> Result<ChartTheme, ParseError> {
        let base = ChartTheme::named(&self.preset)
            .ok_or_else(|| ParseError::UnknownTheme(self.preset.clone()))?;

        let mut theme = if self.overrides.is_null() {
            base
        } else {
            let mut tree = serde_yaml_ng::to_value(&base)?;
            merge(&mut tree, &self.overrides, "theme.overrides")?;
            serde_yaml_ng::from_value(tree)?
        };

        if let Some(hex) = &self.background {
            theme.background = parse_color("theme.background", hex)?;
        }
        if !self.series_colors.is_empty() {
            theme.series_colors = self
                .series_colors
                .iter()
                .enumerate()
                .map(|(i, hex)| parse_color(&format!("theme.series_colors[{i}]"), hex))
                .collect::<Result<_, _>>()?;
        }
        Ok(theme)
    }
}

pub(crate) fn parse_color(field: &str, hex: &str) -> Result<Color, ParseError> {
    Color::from_hex(hex).map_err(|e| ParseError::color(field, e))
}

/// Whether a serialized node is a [`Color`].
fn is_color(node: &Mapping) -> bool {
    ["r", "g", "b", "a"].iter().all(|k| node.contains_key(*k))
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml_ng::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Merge `overlay` into `base`. Mappings merge recursively; anything else
/// replaces the base node. Hex strings over a color node become colors.
fn merge(base: &mut Value, overlay: &Value, path: &str) -> Result<(), ParseError> {
    match (base, overlay) {
        (Value::Mapping(target), Value::String(hex)) if is_color(target) => {
            let color = parse_color(path, hex)?;
            *target = match serde_yaml_ng::to_value(color)? {
                Value::Mapping(m) => m,
                _ => return Err(ParseError::invalid(path, "color did not serialize to a mapping")),
            };
        }
        (Value::Mapping(target), Value::Mapping(patch)) => {
            for (key, value) in patch {
                let child = format!("{path}.{}", key_name(key));
                match target.get_mut(key) {
                    Some(slot) => merge(slot, value, &child)?,
                    None => {
                        log::debug!("theme override adds unknown key {child}");
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Sequence(target), Value::Sequence(items)) => {
            // a sequence of hex strings over a palette
            let mut merged = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let child = format!("{path}[{i}]");
                let mut slot = target.get(i).cloned().unwrap_or(Value::Null);
                let over_color = matches!(&slot, Value::Mapping(m) if is_color(m));
                match item {
                    Value::String(hex) if !over_color && hex.starts_with('#') => {
                        slot = serde_yaml_ng::to_value(parse_color(&child, hex)?)?;
                    }
                    _ => merge(&mut slot, item, &child)?,
                }
                merged.push(slot);
            }
            *target = merged;
        }
        (slot, value) => *slot = value.clone(),
    }
    Ok(())
}
