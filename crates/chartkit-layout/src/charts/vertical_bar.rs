//! Grouped and stacked vertical bar charts.

use super::{
    cartesian_frame, horizontal_grid, series_color, x_axis_labels, y_axis_labels, ChartInput,
    ChartLayout, TooltipAnchors, BAR_SPACING, LABEL_AREA_TOP_SPACING, MIN_BAR_HEIGHT,
};
use crate::data::Dataset;
use crate::pointer::{IndexAxis, PointerResolver};
use crate::scale::{BandScale, LinearScale, ScaleBuilder};
use crate::stack::{stack_values, StackedCategory};
use crate::tooltip::{TooltipHorizontalOffset, TooltipPosition, TooltipVerticalOffset};
use chartkit_core::{BarTheme, BoxStyle, CornerRadius, DrawCommand, Rect};

/// Zero-height bars are drawn downward when every series is non-positive,
/// so the minimum-height stub does not point away from the data.
#[must_use]
pub fn should_rotate_zero_bars(dataset: &Dataset, bar: &BarTheme) -> bool {
    bar.zero_as_min_height && dataset.series.iter().all(|s| !s.has_positive())
}

/// Lay out a vertical bar chart, grouped or stacked.
#[must_use]
pub fn layout_vertical_bar(input: &ChartInput<'_>, stacked: bool) -> ChartLayout {
    let ChartInput {
        dataset,
        size,
        theme,
        y_axis,
        active,
        active_series,
        ..
    } = *input;
    if dataset.status().empty_state {
        return ChartLayout::empty(size);
    }

    let stack = stacked.then(|| stack_values(dataset));
    let frame = cartesian_frame(input, stack.as_deref(), true);
    let plot = frame.plot;
    let count = dataset.category_count();
    let band = ScaleBuilder::new(plot.width).band(count, &theme.bar);
    let scale = frame.value.scale;

    let mut commands = horizontal_grid(&frame.value.ticks, plot, size.width, theme);
    if !y_axis.hide.unwrap_or(theme.y_axis.hide) {
        commands.extend(y_axis_labels(&frame.value.ticks, plot, theme));
    }

    let bars = BarPainter {
        dataset,
        bar: &theme.bar,
        scale,
        plot,
        rotate_zero: should_rotate_zero_bars(dataset, &theme.bar),
    };
    for index in 0..count {
        let Some(x) = band.position(index) else {
            continue;
        };
        let x = plot.x + x as f32;
        let width = band.bandwidth() as f32;
        let mut rects = match &stack {
            Some(stack) => bars.stacked(index, x, width, &stack[index]),
            None => bars.grouped(index, x, width),
        };
        for rect in &mut rects {
            if let DrawCommand::Rect {
                style, series: Some(s), ..
            } = rect
            {
                *style = BoxStyle::fill(series_color(dataset, theme, *s, index, active, active_series));
            }
        }
        commands.extend(rects);
    }

    let label_top = plot.bottom() + LABEL_AREA_TOP_SPACING;
    commands.extend(x_axis_labels(&frame.labels, label_top, theme));

    let tooltips = (0..count)
        .filter_map(|i| tooltip_anchor(dataset, stack.as_deref(), &band, &scale, plot, i))
        .collect();
    let pointer = PointerResolver::new(IndexAxis::Band(band), plot)
        .extend_cross_axis(0.0, LABEL_AREA_TOP_SPACING + frame.labels.label_area_height());

    ChartLayout {
        size,
        plot,
        commands,
        x_labels: frame.labels,
        y_ticks: frame.value.ticks,
        empty_state: false,
        index_count: count,
        pointer: Some(pointer),
        tooltips: TooltipAnchors::Fixed(tooltips),
    }
}

struct BarPainter<'a> {
    dataset: &'a Dataset,
    bar: &'a BarTheme,
    scale: LinearScale,
    plot: Rect,
    rotate_zero: bool,
}

impl BarPainter<'_> {
    fn y(&self, value: f64) -> f32 {
        self.plot.y + self.scale.map(value) as f32
    }

    fn radius(&self, upward: bool, width: f32, height: f32) -> CornerRadius {
        if !self.bar.has_rounded_corners {
            return CornerRadius::ZERO;
        }
        let r = self.bar.corner_radius.min(width / 2.0).min(height);
        if upward {
            CornerRadius::top(r)
        } else {
            CornerRadius::bottom(r)
        }
    }

    /// One bar per series side by side within the band.
    fn grouped(&self, index: usize, x: f32, bandwidth: f32) -> Vec<DrawCommand> {
        let series = self.dataset.len();
        let gaps = BAR_SPACING * series.saturating_sub(1) as f32;
        let width = ((bandwidth - gaps) / series.max(1) as f32).max(0.0);
        let zero = self.y(0.0);

        (0..series)
            .filter_map(|s| {
                let value = self.dataset.value(s, index)?;
                let left = x + s as f32 * (width + BAR_SPACING);
                let mut top = self.y(value);
                let upward = if value == 0.0 { !self.rotate_zero } else { value > 0.0 };
                if value == 0.0 && self.bar.zero_as_min_height {
                    top = if upward {
                        zero - MIN_BAR_HEIGHT
                    } else {
                        zero + MIN_BAR_HEIGHT
                    };
                }
                let bounds = Rect::from_vertical_span(left, width, zero, top);
                Some(DrawCommand::Rect {
                    bounds,
                    radius: self.radius(upward, width, bounds.height),
                    style: BoxStyle::default(),
                    series: Some(s),
                    index: Some(index),
                })
            })
            .collect()
    }

    /// Segments stacked in series order; only the outermost segment on each
    /// side gets rounded corners.
    fn stacked(
        &self,
        index: usize,
        x: f32,
        width: f32,
        category: &StackedCategory,
    ) -> Vec<DrawCommand> {
        let top = category.top_segment().map(|s| s.series);
        let bottom = category.bottom_segment().map(|s| s.series);
        category
            .segments
            .iter()
            .filter(|s| !s.is_empty())
            .map(|segment| {
                let bounds =
                    Rect::from_vertical_span(x, width, self.y(segment.start), self.y(segment.end));
                let radius = if Some(segment.series) == top {
                    self.radius(true, width, bounds.height)
                } else if Some(segment.series) == bottom {
                    self.radius(false, width, bounds.height)
                } else {
                    CornerRadius::ZERO
                };
                DrawCommand::Rect {
                    bounds,
                    radius,
                    style: BoxStyle::default(),
                    series: Some(segment.series),
                    index: Some(index),
                }
            })
            .collect()
    }
}

/// Tooltip above the tallest bar of the group, or below the deepest one when
/// the chart has no positive values.
fn tooltip_anchor(
    dataset: &Dataset,
    stack: Option<&[StackedCategory]>,
    band: &BandScale,
    scale: &LinearScale,
    plot: Rect,
    index: usize,
) -> Option<TooltipPosition> {
    let x = plot.x + band.center(index)? as f32;
    let below = !dataset.has_positive();
    let value = match (stack, below) {
        (Some(stack), false) => stack.get(index)?.positive_total,
        (Some(stack), true) => stack.get(index)?.negative_total,
        (None, false) => dataset.category_values(index).into_iter().fold(0.0, f64::max),
        (None, true) => dataset.category_values(index).into_iter().fold(0.0, f64::min),
    };
    Some(TooltipPosition {
        x,
        y: plot.y + scale.map(value) as f32,
        horizontal: TooltipHorizontalOffset::Center,
        vertical: if below {
            TooltipVerticalOffset::Below
        } else {
            TooltipVerticalOffset::Above
        },
        active_index: index,
    })
}
