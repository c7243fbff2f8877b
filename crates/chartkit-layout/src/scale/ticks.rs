//! Formatted value ticks.

use super::linear::LinearScale;
use super::nice::MAX_TICK_COUNT;
use crate::data::ValueFormatter;
use crate::labels::estimate_string_width;
use chartkit_core::CharacterWidths;
use serde::{Deserialize, Serialize};

/// One axis tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    /// Pixel position along the value axis
    pub position: f64,
    pub formatted: String,
}

/// Ordered ticks of a value axis; positions follow the scale direction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickSet {
    ticks: Vec<Tick>,
}

impl TickSet {
    /// Ticks from the domain start to the domain end every `step`.
    #[must_use]
    pub fn build(scale: &LinearScale, step: f64, formatter: &ValueFormatter) -> Self {
        let (d0, d1) = scale.domain();
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        if !(step.is_finite() && step > 0.0) || !(lo.is_finite() && hi.is_finite()) {
            return Self::default();
        }

        let count = ((hi - lo) / step + 1e-9).floor() as usize;
        if count > MAX_TICK_COUNT {
            log::debug!("{count} ticks requested at step {step}, keeping {MAX_TICK_COUNT}");
        }
        let count = count.min(MAX_TICK_COUNT);
        let ticks = (0..=count)
            .map(|i| {
                let value = clean(lo + i as f64 * step, step);
                Tick {
                    value,
                    position: scale.map(value),
                    formatted: formatter.format(value),
                }
            })
            .collect();
        Self { ticks }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tick> {
        self.ticks.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Tick] {
        &self.ticks
    }

    /// Estimated width of the longest formatted label.
    #[must_use]
    pub fn max_label_width(&self, widths: &CharacterWidths) -> f32 {
        self.ticks
            .iter()
            .map(|t| estimate_string_width(&t.formatted, widths))
            .fold(0.0, f32::max)
    }
}

impl<'a> IntoIterator for &'a TickSet {
    type Item = &'a Tick;
    type IntoIter = std::slice::Iter<'a, Tick>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Snap `value` to the decimal precision of `step`.
fn clean(value: f64, step: f64) -> f64 {
    let decimals = (-step.log10().floor()).max(0.0) as i32 + 1;
    let factor = 10f64.powi(decimals);
    let snapped = (value * factor).round() / factor;
    if snapped == 0.0 {
        0.0
    } else {
        snapped
    }
}
