//! Line charts with crosshair and per-series points.

use super::{
    cartesian_frame, horizontal_grid, series_color, x_axis_labels, y_axis_labels, ChartInput,
    ChartLayout, TooltipAnchors, LABEL_AREA_TOP_SPACING,
};
use crate::curve::line_path;
use crate::pointer::{IndexAxis, PointerResolver};
use chartkit_core::{BoxStyle, DrawCommand, LineCap, Point, Rect, StrokeStyle};

/// Lay out a line chart.
///
/// Null values are drawn at zero. Series are emitted last to first so the
/// first series ends up on top.
#[must_use]
pub fn layout_line(input: &ChartInput<'_>) -> ChartLayout {
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

    let frame = cartesian_frame(input, None, false);
    let plot = frame.plot;
    let count = dataset.category_count();
    let IndexAxis::Linear { scale: x_scale, .. } = frame.index else {
        return ChartLayout::empty(size);
    };
    let y_scale = frame.value.scale;
    let x = |i: usize| plot.x + x_scale.map(i as f64) as f32;
    let y = |v: Option<f64>| plot.y + y_scale.map(v.unwrap_or(0.0)) as f32;

    let mut commands = horizontal_grid(&frame.value.ticks, plot, size.width, theme);
    if !y_axis.hide.unwrap_or(theme.y_axis.hide) {
        commands.extend(y_axis_labels(&frame.value.ticks, plot, theme));
    }

    if let Some(index) = active.filter(|i| *i < count) {
        let width = theme.crosshair.width;
        commands.push(DrawCommand::filled_rect(
            Rect::new(x(index) - width / 2.0, plot.y, width, plot.height),
            theme.crosshair.color,
        ));
    }

    for (s, series) in dataset.series.iter().enumerate().rev() {
        let color = series_color(dataset, theme, s, s, None, active_series);
        let points: Vec<Point> = series
            .data
            .iter()
            .enumerate()
            .map(|(i, p)| Point::new(x(i), y(p.value)))
            .collect();
        let mut style = StrokeStyle::solid(color, theme.line.width).with_cap(LineCap::Round);
        if series.is_comparison {
            style = style.dashed(theme.line.comparison_dash.clone());
        }
        commands.push(DrawCommand::Path {
            points: line_path(&points, theme.line.has_spline),
            closed: false,
            style,
        });

        if series.is_comparison {
            continue;
        }
        if let Some(point) = active.and_then(|i| points.get(i)) {
            commands.push(DrawCommand::Circle {
                center: *point,
                radius: theme.line.point_radius,
                style: BoxStyle {
                    fill: Some(color),
                    stroke: Some(StrokeStyle::solid(theme.background, theme.line.width)),
                },
            });
        }
    }

    let label_top = plot.bottom() + LABEL_AREA_TOP_SPACING;
    commands.extend(x_axis_labels(&frame.labels, label_top, theme));

    let keyboard = (0..count).map(|i| Point::new(x(i), plot.y)).collect();
    let pointer = PointerResolver::new(frame.index, plot)
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
        tooltips: TooltipAnchors::FollowPointer(keyboard),
    }
}
