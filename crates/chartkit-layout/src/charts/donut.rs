//! Donut charts: one ring segment per series.

use super::{series_color, ChartInput, ChartLayout, TooltipAnchors};
use chartkit_core::{DrawCommand, Point, Rect, TextAnchor, TextStyle};
use std::f64::consts::TAU;

/// Scale of the total printed in the hole relative to the body text.
pub const TOTAL_FONT_SCALE: f32 = 2.0;

/// One arc of the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutSlice {
    pub series: usize,
    pub value: f64,
    /// Radians, clockwise from twelve o'clock
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Angular extent of each series' share of the total.
///
/// A series contributes the magnitude of its first value; empty, null and
/// zero series get no slice. Slices are shrunk by `pad_angle` when more than
/// one is drawn.
#[must_use]
pub fn donut_slices(values: &[Option<f64>], pad_angle: f64) -> Vec<DonutSlice> {
    let magnitudes: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|v| v.is_finite() && *v != 0.0).map(|v| (i, v.abs())))
        .collect();
    let total: f64 = magnitudes.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let pad = if magnitudes.len() > 1 { pad_angle.max(0.0) } else { 0.0 };

    let mut angle = 0.0;
    magnitudes
        .into_iter()
        .map(|(series, value)| {
            let sweep = value / total * TAU;
            let inset = (pad / 2.0).min(sweep / 2.0);
            let slice = DonutSlice {
                series,
                value,
                start_angle: angle + inset,
                end_angle: angle + sweep - inset,
            };
            angle += sweep;
            slice
        })
        .collect()
}

/// Lay out a donut chart.
///
/// Comparison series are left out of the ring. The active index selects a
/// series; every other slice is dimmed.
#[must_use]
pub fn layout_donut(input: &ChartInput<'_>) -> ChartLayout {
    let ChartInput {
        dataset,
        size,
        theme,
        y_axis,
        active,
        ..
    } = *input;
    if dataset.status().empty_state {
        return ChartLayout::empty(size);
    }

    let values: Vec<Option<f64>> = dataset
        .series
        .iter()
        .map(|s| if s.is_comparison { None } else { s.value_at(0) })
        .collect();
    let slices = donut_slices(&values, theme.arc.pad_angle);
    if slices.is_empty() {
        return ChartLayout::empty(size);
    }

    let plot = Rect::from_size(size);
    let center = plot.center();
    let outer_radius = size.width.min(size.height) / 2.0;
    let inner_radius = (outer_radius - theme.arc.thickness).max(0.0);

    let mut commands: Vec<DrawCommand> = slices
        .iter()
        .map(|slice| DrawCommand::Arc {
            center,
            inner_radius,
            outer_radius,
            start_angle: slice.start_angle,
            end_angle: slice.end_angle,
            color: series_color(dataset, theme, slice.series, slice.series, active, None),
            series: slice.series,
        })
        .collect();

    let total: f64 = slices.iter().map(|s| s.value).sum();
    commands.push(DrawCommand::text(
        y_axis.label_formatter.format(total),
        center,
        TextStyle {
            color: theme.text.color,
            font_size: theme.text.font_size * TOTAL_FONT_SCALE,
            anchor: TextAnchor::Middle,
            angle: 0.0,
        },
    ));

    ChartLayout {
        size,
        plot,
        commands,
        index_count: dataset.len(),
        tooltips: TooltipAnchors::None,
        ..ChartLayout::default()
    }
}

/// Point on the ring's center line at the middle of `slice`, e.g. for a
/// label.
#[must_use]
pub fn slice_midpoint(slice: &DonutSlice, center: Point, radius: f32) -> Point {
    let angle = (slice.start_angle + slice.end_angle) / 2.0;
    let (sin, cos) = angle.sin_cos();
    Point::new(
        center.x + radius * sin as f32,
        center.y - radius * cos as f32,
    )
}
