//! Categorical band scale.

use serde::{Deserialize, Serialize};

/// Splits a pixel range into `count` equal bands.
///
/// `inner` is the share of one step left empty between bands, `outer` the
/// share of one step left empty before the first and after the last band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    count: usize,
    range: (f64, f64),
    inner: f64,
    outer: f64,
    step: f64,
    bandwidth: f64,
    start: f64,
}

impl BandScale {
    /// Build a band scale over `range`.
    #[must_use]
    pub fn new(count: usize, range: (f64, f64), inner: f64, outer: f64) -> Self {
        let inner = if inner.is_finite() { inner.clamp(0.0, 1.0) } else { 0.0 };
        let outer = if outer.is_finite() { outer.max(0.0) } else { 0.0 };
        let span = range.1 - range.0;
        let denominator = count as f64 - inner + 2.0 * outer;
        let step = if count == 0 || denominator <= 0.0 {
            0.0
        } else {
            span / denominator
        };
        Self {
            count,
            range,
            inner,
            outer,
            step,
            bandwidth: step * (1.0 - inner),
            start: range.0 + step * outer,
        }
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Distance between the starts of two neighbouring bands.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Width of a single band.
    #[must_use]
    pub const fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Start of the first band.
    #[must_use]
    pub const fn first_band_start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub const fn padding(&self) -> (f64, f64) {
        (self.inner, self.outer)
    }

    /// Start of band `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.start + index as f64 * self.step)
    }

    /// Middle of band `index`.
    #[must_use]
    pub fn center(&self, index: usize) -> Option<f64> {
        self.position(index).map(|p| p + self.bandwidth / 2.0)
    }

    /// Band under `offset`, clamped to the first and last band.
    #[must_use]
    pub fn index_at(&self, offset: f64) -> Option<usize> {
        if self.count == 0 || self.step <= 0.0 || !offset.is_finite() {
            return None;
        }
        let raw = ((offset - self.start) / self.step).floor();
        Some(raw.clamp(0.0, (self.count - 1) as f64) as usize)
    }
}
