//! Axis-less sparklines.

use super::{series_color, ChartInput, ChartLayout};
use crate::curve::line_path;
use crate::scale::{LinearScale, ScaleBuilder};
use chartkit_core::{BoxStyle, DrawCommand, LineCap, Point, Rect, StrokeStyle};

/// Alpha of the fill under a sparkline.
pub const AREA_ALPHA: f32 = 0.2;

/// Lay out a sparkline. Null values break the line into separate runs.
#[must_use]
pub fn layout_sparkline(input: &ChartInput<'_>) -> ChartLayout {
    let ChartInput {
        dataset,
        size,
        theme,
        options,
        ..
    } = *input;
    if dataset.status().empty_state {
        return ChartLayout::empty(size);
    }
    let Some((lo, hi)) = dataset.extent() else {
        return ChartLayout::empty(size);
    };

    let stroke = theme.line.width;
    let plot = Rect::new(
        options.offset_left,
        stroke / 2.0,
        (size.width - options.offset_left - options.offset_right).max(0.0),
        (size.height - stroke).max(0.0),
    );
    let count = dataset.category_count();
    let x_scale = ScaleBuilder::new(plot.width).index(count);
    let domain = if lo == hi { (lo - 1.0, hi + 1.0) } else { (lo, hi) };
    let y_scale = LinearScale::new(domain, (f64::from(plot.height), 0.0));

    let mut commands = Vec::new();
    for (s, series) in dataset.series.iter().enumerate() {
        let color = series_color(dataset, theme, s, s, None, None);
        let mut style = StrokeStyle::solid(color, stroke).with_cap(LineCap::Round);
        if series.is_comparison {
            style = style.dashed(theme.line.comparison_dash.clone());
        }

        for run in runs(&series.data.iter().map(|p| p.value).collect::<Vec<_>>()) {
            let points: Vec<Point> = run
                .iter()
                .map(|(i, v)| {
                    Point::new(
                        plot.x + x_scale.map(*i as f64) as f32,
                        plot.y + y_scale.map(*v) as f32,
                    )
                })
                .collect();
            let (Some(first), Some(last)) = (points.first().copied(), points.last().copied())
            else {
                continue;
            };
            if points.len() == 1 {
                commands.push(DrawCommand::Circle {
                    center: first,
                    radius: stroke,
                    style: BoxStyle::fill(color),
                });
                continue;
            }
            let path = line_path(&points, theme.line.has_spline);
            if !series.is_comparison {
                let mut area = path.clone();
                area.push(Point::new(last.x, plot.bottom()));
                area.push(Point::new(first.x, plot.bottom()));
                commands.push(DrawCommand::Area {
                    points: area,
                    color: color.with_alpha(color.a * AREA_ALPHA),
                });
            }
            commands.push(DrawCommand::Path {
                points: path,
                closed: false,
                style: style.clone(),
            });
        }
    }

    ChartLayout {
        size,
        plot,
        commands,
        ..ChartLayout::default()
    }
}

/// Consecutive non-null values with their indices.
fn runs(values: &[Option<f64>]) -> Vec<Vec<(usize, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, value) in values.iter().enumerate() {
        match value.filter(|v| v.is_finite()) {
            Some(v) => current.push((i, v)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
