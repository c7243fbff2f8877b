//! Continuous numeric scale.

use super::nice::{nice_domain, nice_step};
use serde::{Deserialize, Serialize};

/// Affine map from a numeric domain to a pixel range.
///
/// The range may be reversed (`[height, 0]`) so larger values sit higher on
/// screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0))
    }
}

impl LinearScale {
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Domain value to pixel. A zero-width domain maps to the range start.
    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        (value - d0) / (d1 - d0) * (r1 - r0) + r0
    }

    /// Pixel to domain value. A zero-width range maps to the domain start.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        (pixel - r0) / (r1 - r0) * (d1 - d0) + d0
    }

    /// Roughly `count` evenly spaced nice values inside the domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        if hi == lo {
            return vec![lo];
        }
        let step = nice_step((hi - lo) / count.max(1) as f64, false);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }

    /// Same scale with the domain extended to nice round values.
    ///
    /// Zero is always included, matching value axes that grow from a
    /// baseline.
    #[must_use]
    pub fn nice(&self, count: usize) -> Self {
        let (lo, hi) = ordered(self.domain);
        let domain = nice_domain(Some((lo, hi)), count, false);
        Self::new((domain.min, domain.max), self.range)
    }

    /// Same domain mapped onto a different pixel range.
    #[must_use]
    pub const fn with_range(&self, range: (f64, f64)) -> Self {
        Self::new(self.domain, range)
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
