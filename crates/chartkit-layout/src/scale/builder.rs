//! Builds the scales of a layout pass from data extent and pixel length.

use super::band::BandScale;
use super::linear::LinearScale;
use super::nice::{max_tick_count, nice_domain, MIN_TICK_SPACING};
use super::ticks::TickSet;
use super::Orientation;
use crate::data::{Dataset, ValueFormatter};
use crate::stack::{stacked_extent, StackedCategory};
use chartkit_core::BarTheme;

/// Value scale together with its ticks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueAxis {
    pub scale: LinearScale,
    pub ticks: TickSet,
    pub step: f64,
}

/// Scale factory for one drawable axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBuilder {
    length: f32,
    orientation: Orientation,
    integers_only: bool,
    tick_spacing: f32,
}

impl ScaleBuilder {
    /// Builder for an axis `length` pixels long, vertical by default.
    #[must_use]
    pub fn new(length: f32) -> Self {
        Self {
            length: if length.is_finite() { length.max(0.0) } else { 0.0 },
            orientation: Orientation::Vertical,
            integers_only: false,
            tick_spacing: MIN_TICK_SPACING,
        }
    }

    #[must_use]
    pub const fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub const fn integers_only(mut self, integers_only: bool) -> Self {
        self.integers_only = integers_only;
        self
    }

    /// Minimum pixel distance between ticks.
    #[must_use]
    pub fn tick_spacing(mut self, spacing: f32) -> Self {
        self.tick_spacing = spacing.max(1.0);
        self
    }

    #[must_use]
    pub const fn length(&self) -> f32 {
        self.length
    }

    /// Upper bound on tick intervals for this axis.
    #[must_use]
    pub fn max_ticks(&self) -> usize {
        max_tick_count(self.length, self.tick_spacing)
    }

    /// Pixel range, reversed for vertical axes so larger values sit higher.
    #[must_use]
    pub fn pixel_range(&self) -> (f64, f64) {
        let length = f64::from(self.length);
        match self.orientation {
            Orientation::Vertical => (length, 0.0),
            Orientation::Horizontal => (0.0, length),
        }
    }

    /// Value axis over the raw values of `dataset`, or over the stacked
    /// totals when `stack` is given.
    #[must_use]
    pub fn value_axis(
        &self,
        dataset: &Dataset,
        stack: Option<&[StackedCategory]>,
        formatter: &ValueFormatter,
    ) -> ValueAxis {
        let extent = match stack {
            Some(stack) => stacked_extent(stack),
            None => dataset.extent(),
        };
        self.value_axis_for_extent(extent, formatter)
    }

    /// Value axis over an explicit `(min, max)` extent.
    #[must_use]
    pub fn value_axis_for_extent(
        &self,
        extent: Option<(f64, f64)>,
        formatter: &ValueFormatter,
    ) -> ValueAxis {
        let domain = nice_domain(extent, self.max_ticks(), self.integers_only);
        let scale = LinearScale::new((domain.min, domain.max), self.pixel_range());
        log::trace!(
            "value axis {}..{} step {} over {}px",
            domain.min,
            domain.max,
            domain.step,
            self.length
        );
        ValueAxis {
            ticks: TickSet::build(&scale, domain.step, formatter),
            scale,
            step: domain.step,
        }
    }

    /// Band scale for `count` categories, padded by the bar theme margins.
    #[must_use]
    pub fn band(&self, count: usize, bar: &BarTheme) -> BandScale {
        BandScale::new(
            count,
            (0.0, f64::from(self.length)),
            f64::from(bar.inner_margin.ratio()),
            f64::from(bar.outer_margin.ratio()),
        )
    }

    /// Linear index scale placing `count` points from edge to edge.
    #[must_use]
    pub fn index(&self, count: usize) -> LinearScale {
        let last = count.saturating_sub(1) as f64;
        LinearScale::new((0.0, last), (0.0, f64::from(self.length)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSeries;
    use crate::scale::MAX_TICK_COUNT;
    use crate::stack::stack_values;
    use chartkit_core::BarMargin;
    use proptest::prelude::*;

    fn example() -> Dataset {
        Dataset::new(vec![DataSeries::new("Sales")
            .point("A", 10.0)
            .point("B", -5.0)
            .point("C", 0.0)])
    }

    #[test]
    fn test_short_axis_example_domain() {
        let axis = ScaleBuilder::new(40.0).value_axis(&example(), None, &ValueFormatter::default());
        assert_eq!(axis.scale.domain(), (-10.0, 10.0));
        assert_eq!(axis.scale.range(), (40.0, 0.0));
        assert_eq!(axis.ticks.len(), 3);
    }

    #[test]
    fn test_huge_axis_keeps_tick_budget() {
        let axis = ScaleBuilder::new(1e12).value_axis(&example(), None, &ValueFormatter::default());
        assert!(axis.ticks.len() <= MAX_TICK_COUNT + 1);
        let (lo, hi) = axis.scale.domain();
        assert!(lo <= -5.0 && hi >= 10.0);
    }

    #[test]
    fn test_stacked_domain_uses_totals() {
        let ds = Dataset::new(vec![
            DataSeries::new("a").point("x", 30.0).point("y", 10.0),
            DataSeries::new("b").point("x", 40.0).point("y", -20.0),
        ]);
        let stack = stack_values(&ds);
        let builder = ScaleBuilder::new(200.0);
        let raw = builder.value_axis(&ds, None, &ValueFormatter::default());
        let stacked = builder.value_axis(&ds, Some(&stack), &ValueFormatter::default());
        assert!(raw.scale.domain().1 < 70.0);
        assert!(stacked.scale.domain().1 >= 70.0);
        assert!(stacked.scale.domain().0 <= -20.0);
    }

    #[test]
    fn test_degenerate_dataset_unit_domain() {
        let ds = Dataset::new(vec![DataSeries::new("z").point("a", 0.0).point("b", None)]);
        let axis = ScaleBuilder::new(100.0).value_axis(&ds, None, &ValueFormatter::default());
        assert_eq!(axis.scale.domain(), (0.0, 1.0));

        let empty = ScaleBuilder::new(100.0).value_axis(&Dataset::default(), None, &ValueFormatter::default());
        assert_eq!(empty.scale.domain(), (0.0, 1.0));
    }

    #[test]
    fn test_integers_only_ticks() {
        let ds = Dataset::new(vec![DataSeries::new("a").point("x", 2.0)]);
        let axis = ScaleBuilder::new(200.0)
            .integers_only(true)
            .value_axis(&ds, None, &ValueFormatter::default());
        assert!(axis.ticks.iter().all(|t| t.value.fract() == 0.0));
    }

    #[test]
    fn test_tick_count_bounded_by_height() {
        let ds = Dataset::new(vec![DataSeries::new("a").point("x", 997.0)]);
        for height in [10.0, 45.0, 120.0, 400.0] {
            let builder = ScaleBuilder::new(height);
            let axis = builder.value_axis(&ds, None, &ValueFormatter::default());
            assert!(axis.ticks.len() <= builder.max_ticks() + 1, "height {height}");
        }
    }

    #[test]
    fn test_horizontal_range() {
        let builder = ScaleBuilder::new(300.0).orientation(Orientation::Horizontal);
        assert_eq!(builder.pixel_range(), (0.0, 300.0));
    }

    #[test]
    fn test_band_uses_bar_margins() {
        let bar = BarTheme {
            inner_margin: BarMargin::Large,
            outer_margin: BarMargin::None,
            ..BarTheme::default()
        };
        let band = ScaleBuilder::new(370.0).band(4, &bar);
        // 370 / (4 - 0.3) = 100
        assert!((band.step() - 100.0).abs() < 1e-4);
        assert!((band.bandwidth() - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_index_scale() {
        let s = ScaleBuilder::new(300.0).index(4);
        assert_eq!(s.map(3.0), 300.0);
        assert_eq!(s.invert(100.0), 1.0);
    }

    proptest! {
        #[test]
        fn prop_domain_contains_every_value(
            values in prop::collection::vec(prop::option::of(-1e5f64..1e5), 1..30),
            height in 1.0f32..800.0,
            ints: bool,
        ) {
            let series = values
                .iter()
                .enumerate()
                .fold(DataSeries::new("s"), |s, (i, v)| s.point(i as i32, *v));
            let ds = Dataset::new(vec![series]);
            let axis = ScaleBuilder::new(height)
                .integers_only(ints)
                .value_axis(&ds, None, &ValueFormatter::default());
            let (lo, hi) = axis.scale.domain();
            for v in values.iter().flatten() {
                let tol = 1e-9 * (1.0 + v.abs());
                prop_assert!(lo <= v + tol && *v <= hi + tol);
            }
        }
    }
}
