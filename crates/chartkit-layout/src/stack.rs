//! Sign-separated stacking of series values per category.

use crate::data::Dataset;
use serde::{Deserialize, Serialize};

/// One series' contribution to a stacked category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackSegment {
    pub series: usize,
    pub start: f64,
    pub end: f64,
}

impl StackSegment {
    /// Signed extent of the segment.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Totals and segments of one category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StackedCategory {
    pub positive_total: f64,
    pub negative_total: f64,
    /// One segment per series, in series order
    pub segments: Vec<StackSegment>,
}

impl StackedCategory {
    /// Each segment's share of the category's absolute total.
    ///
    /// A category without any magnitude yields all zeros.
    #[must_use]
    pub fn normalize(&self) -> Vec<f64> {
        let total = self.positive_total - self.negative_total;
        self.segments
            .iter()
            .map(|s| {
                if total > 0.0 {
                    s.height().abs() / total
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Segment of `series`, if present.
    #[must_use]
    pub fn segment(&self, series: usize) -> Option<&StackSegment> {
        self.segments.iter().find(|s| s.series == series)
    }

    /// Topmost non-empty positive segment.
    #[must_use]
    pub fn top_segment(&self) -> Option<&StackSegment> {
        self.segments
            .iter()
            .filter(|s| s.end > s.start)
            .max_by(|a, b| a.end.total_cmp(&b.end))
    }

    /// Bottommost non-empty negative segment.
    #[must_use]
    pub fn bottom_segment(&self) -> Option<&StackSegment> {
        self.segments
            .iter()
            .filter(|s| s.end < s.start)
            .min_by(|a, b| a.end.total_cmp(&b.end))
    }
}

/// Running stack for a single category.
///
/// Positive values grow upward from zero, negative values downward. Nulls
/// and zeros become empty segments at the current positive top so every
/// series keeps its slot.
#[derive(Debug, Clone, Default)]
pub struct StackAccumulator {
    positive_top: f64,
    negative_bottom: f64,
    segments: Vec<StackSegment>,
}

impl StackAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack one series value.
    pub fn push(&mut self, series: usize, value: Option<f64>) {
        let value = value.filter(|v| v.is_finite()).unwrap_or(0.0);
        let segment = if value < 0.0 {
            let start = self.negative_bottom;
            self.negative_bottom += value;
            StackSegment {
                series,
                start,
                end: self.negative_bottom,
            }
        } else {
            let start = self.positive_top;
            self.positive_top += value;
            StackSegment {
                series,
                start,
                end: self.positive_top,
            }
        };
        self.segments.push(segment);
    }

    #[must_use]
    pub fn finish(self) -> StackedCategory {
        StackedCategory {
            positive_total: self.positive_top,
            negative_total: self.negative_bottom,
            segments: self.segments,
        }
    }
}

/// Stack every category of `dataset`, iterating series in order.
#[must_use]
pub fn stack_values(dataset: &Dataset) -> Vec<StackedCategory> {
    (0..dataset.category_count())
        .map(|index| {
            let mut acc = StackAccumulator::new();
            for (series, s) in dataset.series.iter().enumerate() {
                acc.push(series, s.value_at(index));
            }
            acc.finish()
        })
        .collect()
}

/// `(min negative total, max positive total)` across categories.
#[must_use]
pub fn stacked_extent(stack: &[StackedCategory]) -> Option<(f64, f64)> {
    if stack.is_empty() {
        return None;
    }
    let lo = stack.iter().map(|c| c.negative_total).fold(0.0, f64::min);
    let hi = stack.iter().map(|c| c.positive_total).fold(0.0, f64::max);
    Some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSeries;
    use proptest::prelude::*;

    #[test]
    fn test_example_totals() {
        let ds = Dataset::new(vec![DataSeries::new("Sales")
            .point("A", 10.0)
            .point("B", -5.0)
            .point("C", 0.0)]);
        let stack = stack_values(&ds);
        assert_eq!(stack.len(), 3);
        let positive: f64 = stack.iter().map(|c| c.positive_total).sum();
        let negative: f64 = stack.iter().map(|c| c.negative_total).sum();
        assert_eq!(positive, 10.0);
        assert_eq!(negative, -5.0);
        assert_eq!(stacked_extent(&stack), Some((-5.0, 10.0)));
    }

    #[test]
    fn test_sign_separated_stacking() {
        let ds = Dataset::new(vec![
            DataSeries::new("a").point("x", 3.0),
            DataSeries::new("b").point("x", -2.0),
            DataSeries::new("c").point("x", 4.0),
            DataSeries::new("d").point("x", -1.0),
        ]);
        let cat = &stack_values(&ds)[0];
        assert_eq!(cat.positive_total, 7.0);
        assert_eq!(cat.negative_total, -3.0);
        let spans: Vec<(f64, f64)> = cat.segments.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(spans, vec![(0.0, 3.0), (0.0, -2.0), (3.0, 7.0), (-2.0, -3.0)]);
        assert_eq!(cat.top_segment().map(|s| s.series), Some(2));
        assert_eq!(cat.bottom_segment().map(|s| s.series), Some(3));
    }

    #[test]
    fn test_null_keeps_slot_at_positive_top() {
        let ds = Dataset::new(vec![
            DataSeries::new("a").point("x", 5.0),
            DataSeries::new("b").point("x", None),
            DataSeries::new("c").point("x", 1.0),
        ]);
        let cat = &stack_values(&ds)[0];
        assert_eq!(cat.segments[1].series, 1);
        assert_eq!((cat.segments[1].start, cat.segments[1].end), (5.0, 5.0));
        assert!(cat.segments[1].is_empty());
        assert_eq!(cat.segments[2].start, 5.0);
    }

    #[test]
    fn test_normalize() {
        let mut acc = StackAccumulator::new();
        acc.push(0, Some(30.0));
        acc.push(1, Some(-10.0));
        acc.push(2, Some(60.0));
        let shares = acc.finish().normalize();
        assert_eq!(shares, vec![0.3, 0.1, 0.6]);

        let mut empty = StackAccumulator::new();
        empty.push(0, None);
        assert_eq!(empty.finish().normalize(), vec![0.0]);
    }

    #[test]
    fn test_stacked_extent_empty() {
        assert_eq!(stacked_extent(&[]), None);
    }

    proptest! {
        #[test]
        fn prop_segments_partition_totals(
            values in prop::collection::vec(prop::option::of(-1e4f64..1e4), 1..12),
        ) {
            let mut acc = StackAccumulator::new();
            for (i, v) in values.iter().enumerate() {
                acc.push(i, *v);
            }
            let cat = acc.finish();

            let positive: f64 = cat.segments.iter().filter(|s| s.height() > 0.0).map(StackSegment::height).sum();
            let negative: f64 = cat.segments.iter().filter(|s| s.height() < 0.0).map(StackSegment::height).sum();
            prop_assert!((positive - cat.positive_total).abs() < 1e-6);
            prop_assert!((negative - cat.negative_total).abs() < 1e-6);

            // order matches series order
            let order: Vec<usize> = cat.segments.iter().map(|s| s.series).collect();
            prop_assert_eq!(order, (0..values.len()).collect::<Vec<_>>());

            // contiguous on each side
            let mut top = 0.0;
            let mut bottom = 0.0;
            for s in &cat.segments {
                if s.end < s.start {
                    prop_assert!((s.start - bottom).abs() < 1e-9);
                    bottom = s.end;
                } else {
                    prop_assert!((s.start - top).abs() < 1e-9);
                    top = s.end;
                }
            }
        }

        #[test]
        fn prop_stacking_is_deterministic(
            a in prop::collection::vec(-100.0f64..100.0, 1..8),
            b in prop::collection::vec(-100.0f64..100.0, 1..8),
        ) {
            let len = a.len().min(b.len());
            let series_a = a[..len].iter().enumerate().fold(DataSeries::new("a"), |s, (i, v)| s.point(i as i32, *v));
            let series_b = b[..len].iter().enumerate().fold(DataSeries::new("b"), |s, (i, v)| s.point(i as i32, *v));
            let ds = Dataset::new(vec![series_a, series_b]);
            prop_assert_eq!(stack_values(&ds), stack_values(&ds));
        }
    }
}
