//! Pointer position to data index.

use crate::scale::{BandScale, LinearScale, Orientation};
use chartkit_core::{Point, Rect};

/// Scale along which data indices are laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndexAxis {
    /// Points at `scale.map(i)` (line charts)
    Linear { scale: LinearScale, count: usize },
    /// Equal bands (bar charts)
    Band(BandScale),
}

impl IndexAxis {
    #[must_use]
    pub const fn count(&self) -> usize {
        match self {
            Self::Linear { count, .. } => *count,
            Self::Band(band) => band.count(),
        }
    }

    /// Index under `offset` pixels from the plot origin, clamped to the
    /// valid index range.
    #[must_use]
    pub fn index_at(&self, offset: f64) -> Option<usize> {
        match self {
            Self::Linear { scale, count } => {
                if *count == 0 || !offset.is_finite() {
                    return None;
                }
                let closest = scale.invert(offset).round();
                Some(closest.clamp(0.0, (*count - 1) as f64) as usize)
            }
            Self::Band(band) => band.index_at(offset),
        }
    }

    /// Pixel offset of `index` from the plot origin (band start for bands).
    #[must_use]
    pub fn offset_of(&self, index: usize) -> Option<f64> {
        match self {
            Self::Linear { scale, count } => (index < *count).then(|| scale.map(index as f64)),
            Self::Band(band) => band.position(index),
        }
    }
}

/// Resolves pointer positions over a plot to the active data index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerResolver {
    axis: IndexAxis,
    plot: Rect,
    orientation: Orientation,
    cross_before: f32,
    cross_after: f32,
}

impl PointerResolver {
    /// Resolver for indices running left to right across `plot`.
    #[must_use]
    pub const fn new(axis: IndexAxis, plot: Rect) -> Self {
        Self {
            axis,
            plot,
            orientation: Orientation::Vertical,
            cross_before: 0.0,
            cross_after: 0.0,
        }
    }

    /// Indices run top to bottom instead (horizontal bar charts).
    #[must_use]
    pub const fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    /// Grow the accepted cross-axis band beyond the plot edges, e.g. to keep
    /// the tooltip while hovering the category labels.
    #[must_use]
    pub const fn extend_cross_axis(mut self, before: f32, after: f32) -> Self {
        self.cross_before = before;
        self.cross_after = after;
        self
    }

    #[must_use]
    pub const fn axis(&self) -> &IndexAxis {
        &self.axis
    }

    #[must_use]
    pub const fn plot(&self) -> Rect {
        self.plot
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.axis.count()
    }

    /// Active index for a pointer at `point` (chart coordinates); `None`
    /// when the pointer is outside the cross-axis range of the plot.
    #[must_use]
    pub fn resolve(&self, point: Point) -> Option<usize> {
        let (along, cross, cross_start, cross_end) = match self.orientation {
            Orientation::Vertical => (
                point.x - self.plot.x,
                point.y,
                self.plot.y,
                self.plot.bottom(),
            ),
            Orientation::Horizontal => (
                point.y - self.plot.y,
                point.x,
                self.plot.x,
                self.plot.right(),
            ),
        };
        if !cross.is_finite()
            || cross < cross_start - self.cross_before
            || cross > cross_end + self.cross_after
        {
            return None;
        }
        self.axis.index_at(f64::from(along))
    }

    /// Chart-space coordinate of `index` along the index axis.
    #[must_use]
    pub fn anchor(&self, index: usize) -> Option<f32> {
        let origin = match self.orientation {
            Orientation::Vertical => self.plot.x,
            Orientation::Horizontal => self.plot.y,
        };
        self.axis.offset_of(index).map(|o| origin + o as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plot() -> Rect {
        Rect::new(50.0, 10.0, 400.0, 200.0)
    }

    fn line_resolver(count: usize) -> PointerResolver {
        let scale = LinearScale::new((0.0, (count - 1) as f64), (0.0, 400.0));
        PointerResolver::new(IndexAxis::Linear { scale, count }, plot())
    }

    #[test]
    fn test_linear_rounds_to_nearest() {
        let r = line_resolver(5); // points every 100px
        assert_eq!(r.resolve(Point::new(50.0 + 140.0, 100.0)), Some(1));
        assert_eq!(r.resolve(Point::new(50.0 + 160.0, 100.0)), Some(2));
    }

    #[test]
    fn test_linear_clamps() {
        let r = line_resolver(5);
        assert_eq!(r.resolve(Point::new(0.0, 100.0)), Some(0));
        assert_eq!(r.resolve(Point::new(900.0, 100.0)), Some(4));
    }

    #[test]
    fn test_outside_cross_axis_is_none() {
        let r = line_resolver(5);
        assert_eq!(r.resolve(Point::new(100.0, 5.0)), None);
        assert_eq!(r.resolve(Point::new(100.0, 211.0)), None);
        assert_eq!(r.resolve(Point::new(100.0, f32::NAN)), None);
    }

    #[test]
    fn test_extended_cross_axis() {
        let r = line_resolver(5).extend_cross_axis(0.0, 30.0);
        assert_eq!(r.resolve(Point::new(150.0, 230.0)), Some(1));
        assert!(r.resolve(Point::new(100.0, 241.0)).is_none());
    }

    #[test]
    fn test_band_resolution() {
        let band = BandScale::new(4, (0.0, 400.0), 0.2, 0.0);
        let r = PointerResolver::new(IndexAxis::Band(band), plot());
        let x = 50.0 + band.position(2).unwrap() as f32 + 1.0;
        assert_eq!(r.resolve(Point::new(x, 100.0)), Some(2));
        assert_eq!(r.anchor(2), Some(50.0 + band.position(2).unwrap() as f32));
    }

    #[test]
    fn test_horizontal_resolution() {
        let band = BandScale::new(4, (0.0, 200.0), 0.0, 0.0);
        let r = PointerResolver::new(IndexAxis::Band(band), plot()).horizontal();
        assert_eq!(r.resolve(Point::new(100.0, 10.0 + 120.0)), Some(2));
        assert_eq!(r.resolve(Point::new(20.0, 10.0 + 120.0)), None);
    }

    #[test]
    fn test_empty_axis() {
        let band = BandScale::new(0, (0.0, 400.0), 0.0, 0.0);
        let r = PointerResolver::new(IndexAxis::Band(band), plot());
        assert_eq!(r.resolve(Point::new(100.0, 100.0)), None);
        assert_eq!(r.count(), 0);
    }

    proptest! {
        #[test]
        fn prop_strictly_inside_band(
            count in 1usize..30,
            seed in 0usize..1000,
            t in 0.01f64..0.99,
            y in 10.0f32..210.0,
        ) {
            let band = BandScale::new(count, (0.0, 400.0), 0.1, 0.05);
            let r = PointerResolver::new(IndexAxis::Band(band), plot());
            let index = seed % count;
            let x = 50.0 + (band.position(index).unwrap() + band.bandwidth() * t) as f32;
            prop_assert_eq!(r.resolve(Point::new(x, y)), Some(index));
        }

        #[test]
        fn prop_outside_vertical_range_is_none(
            x in -100.0f32..600.0,
            above in 0.01f32..500.0,
            below in 0.01f32..500.0,
        ) {
            let r = line_resolver(7);
            prop_assert_eq!(r.resolve(Point::new(x, 10.0 - above)), None);
            prop_assert_eq!(r.resolve(Point::new(x, 210.0 + below)), None);
        }
    }
}
