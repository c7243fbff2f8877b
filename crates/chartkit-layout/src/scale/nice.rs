//! Human-friendly tick steps and domains.

/// Minimum vertical distance between two value ticks, in pixels.
pub const MIN_TICK_SPACING: f32 = 20.0;

/// Most tick intervals any axis gets, however long it is.
pub const MAX_TICK_COUNT: usize = 200;

/// Upper bound on tick intervals that fit in `length` pixels.
#[must_use]
pub fn max_tick_count(length: f32, spacing: f32) -> usize {
    if !length.is_finite() || !spacing.is_finite() || spacing <= 0.0 {
        return 1;
    }
    ((length / spacing).floor() as usize).clamp(1, MAX_TICK_COUNT)
}

/// Multipliers of a power of ten accepted as tick steps.
const NICE_MULTIPLIERS: [f64; 4] = [1.0, 2.5, 5.0, 10.0];

/// Smallest step from `{1, 2.5, 5} x 10^k` that is at least `raw`.
///
/// With `integers_only`, fractional steps are promoted: anything below 1
/// becomes 1 and 2.5 becomes 5.
#[must_use]
pub fn nice_step(raw: f64, integers_only: bool) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let multiplier = NICE_MULTIPLIERS
        .iter()
        .copied()
        .find(|m| *m >= normalized - 1e-9)
        .unwrap_or(10.0);
    integer_step(multiplier * magnitude, integers_only)
}

/// Next larger nice step after `step`.
#[must_use]
pub fn next_nice_step(step: f64, integers_only: bool) -> f64 {
    let magnitude = 10f64.powf(step.log10().floor());
    let normalized = step / magnitude;
    let multiplier = NICE_MULTIPLIERS
        .iter()
        .copied()
        .find(|m| *m > normalized + 1e-9)
        .unwrap_or(10.0);
    integer_step(multiplier * magnitude, integers_only)
}

fn integer_step(step: f64, integers_only: bool) -> f64 {
    if !integers_only {
        return step;
    }
    if step < 1.0 {
        1.0
    } else if step.fract().abs() > 1e-9 {
        // only 2.5 x 10^0 is fractional at or above 1
        5.0
    } else {
        step
    }
}

/// A domain rounded outward to multiples of `step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NiceDomain {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl NiceDomain {
    /// Domain used when the data gives nothing to scale.
    pub const UNIT: Self = Self {
        min: 0.0,
        max: 1.0,
        step: 1.0,
    };

    /// Number of step intervals in the domain.
    #[must_use]
    pub fn intervals(&self) -> usize {
        if self.step <= 0.0 {
            return 0;
        }
        ((self.max - self.min) / self.step).round() as usize
    }
}

/// Nice domain covering `extent` and zero with at most `max_ticks`
/// intervals.
///
/// `None`, all-zero or non-finite extents give `[0, 1]`.
#[must_use]
pub fn nice_domain(extent: Option<(f64, f64)>, max_ticks: usize, integers_only: bool) -> NiceDomain {
    let Some((data_min, data_max)) = extent.filter(|(a, b)| a.is_finite() && b.is_finite()) else {
        log::trace!("no finite extent, using unit domain");
        return unit_domain(max_ticks, integers_only);
    };
    let lo = data_min.min(0.0);
    let hi = data_max.max(0.0);
    if (hi - lo).abs() < f64::EPSILON {
        log::trace!("degenerate extent {lo}..{hi}, using unit domain");
        return unit_domain(max_ticks, integers_only);
    }

    let max_ticks = max_ticks.max(1);
    let mut step = nice_step((hi - lo) / max_ticks as f64, integers_only);
    loop {
        let min = (lo / step).floor() * step;
        let max = (hi / step).ceil() * step;
        let domain = NiceDomain { min, max, step };
        if domain.intervals() <= max_ticks {
            return domain;
        }
        step = next_nice_step(step, integers_only);
    }
}

fn unit_domain(max_ticks: usize, integers_only: bool) -> NiceDomain {
    NiceDomain {
        step: nice_step(1.0 / max_ticks.max(1) as f64, integers_only),
        ..NiceDomain::UNIT
    }
}
