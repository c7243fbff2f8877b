//! Horizontal bar charts: categories run down, values run right.

use super::{
    category_labels, series_color, ChartInput, ChartLayout, TooltipAnchors, BAR_SPACING,
    LABEL_AREA_TOP_SPACING, PLOT_MARGIN_TOP,
};
use crate::data::Dataset;
use crate::labels::{estimate_string_width, DEFAULT_LABEL_GAP};
use crate::pointer::{IndexAxis, PointerResolver};
use crate::scale::{LinearScale, Orientation, ScaleBuilder, ValueAxis};
use crate::stack::{stack_values, stacked_extent, StackedCategory};
use crate::tooltip::{TooltipHorizontalOffset, TooltipPosition, TooltipVerticalOffset};
use chartkit_core::{
    BoxStyle, ChartTheme, CornerRadius, DrawCommand, Point, Rect, StrokeStyle, TextAnchor,
    TextStyle,
};

/// Space between a bar's end and its value label.
pub const VALUE_LABEL_OFFSET: f32 = 4.0;

/// Lay out a horizontal bar chart, grouped or stacked.
#[must_use]
pub fn layout_horizontal_bar(input: &ChartInput<'_>, stacked: bool) -> ChartLayout {
    let ChartInput {
        dataset,
        size,
        theme,
        x_axis,
        y_axis,
        active,
        active_series,
        ..
    } = *input;
    if dataset.status().empty_state {
        return ChartLayout::empty(size);
    }

    let stack = stacked.then(|| stack_values(dataset));
    let extent = match &stack {
        Some(stack) => stacked_extent(stack),
        None => dataset.extent(),
    };
    let text = &theme.text;
    let widths = &text.character_widths;
    let formatter = &y_axis.label_formatter;
    let hide_values = x_axis.hide.unwrap_or(theme.x_axis.hide);
    let margin = theme.grid.horizontal_margin;

    // room for the widest value label at the end of a bar
    let value_labels: Vec<String> = dataset
        .values()
        .chain(stack.iter().flatten().map(|c| c.positive_total))
        .map(|v| formatter.format(v))
        .collect();
    let value_label_width = value_labels
        .iter()
        .map(|l| estimate_string_width(l, widths))
        .fold(0.0, f32::max);

    let axis_height = if hide_values { 0.0 } else { text.line_height };
    let plot = Rect::new(
        margin,
        PLOT_MARGIN_TOP,
        (size.width - margin * 2.0 - value_label_width - VALUE_LABEL_OFFSET).max(0.0),
        (size.height - PLOT_MARGIN_TOP - LABEL_AREA_TOP_SPACING - axis_height).max(0.0),
    );

    let value = value_axis(plot.width, extent, input);
    let scale = value.scale;
    let x = |v: f64| plot.x + scale.map(v) as f32;

    let mut commands = vertical_grid(&value, plot, theme);
    if !hide_values {
        let style = TextStyle {
            color: theme.x_axis.label_color,
            font_size: text.font_size,
            anchor: TextAnchor::Middle,
            angle: 0.0,
        };
        let y = plot.bottom() + LABEL_AREA_TOP_SPACING + text.line_height / 2.0;
        commands.extend(value.ticks.iter().map(|t| {
            DrawCommand::text(t.formatted.clone(), Point::new(plot.x + t.position as f32, y), style.clone())
        }));
    }

    let count = dataset.category_count();
    let band = ScaleBuilder::new(plot.height)
        .orientation(Orientation::Horizontal)
        .band(count, &theme.bar);
    let labels = category_labels(dataset, x_axis);
    let label_style = TextStyle {
        color: theme.y_axis.label_color,
        font_size: text.font_size,
        anchor: TextAnchor::Start,
        angle: 0.0,
    };
    let value_style = TextStyle {
        color: text.color,
        font_size: text.font_size,
        anchor: TextAnchor::Start,
        angle: 0.0,
    };

    let mut tooltips = Vec::with_capacity(count);
    for index in 0..count {
        let Some(top) = band.position(index) else {
            continue;
        };
        let top = plot.y + top as f32;
        let bandwidth = band.bandwidth() as f32;
        if let Some(label) = labels.get(index) {
            commands.push(DrawCommand::text(
                label.clone(),
                Point::new(plot.x, top + text.line_height / 2.0),
                label_style.clone(),
            ));
        }
        let bars_top = top + text.line_height + BAR_SPACING;
        let bars_height = (bandwidth - text.line_height - BAR_SPACING).max(0.0);

        let bars = match &stack {
            Some(stack) => stacked_bars(&stack[index], bars_top, bars_height, &scale, plot, theme.bar.corner_radius),
            None => grouped_bars(dataset, index, bars_top, bars_height, &scale, plot, theme.bar.corner_radius),
        };
        for (series, bounds, radius, value) in bars {
            let radius = if theme.bar.has_rounded_corners {
                radius
            } else {
                CornerRadius::ZERO
            };
            commands.push(DrawCommand::Rect {
                bounds,
                radius,
                style: BoxStyle::fill(series_color(dataset, theme, series, index, active, active_series)),
                series: Some(series),
                index: Some(index),
            });
            if let Some(value) = value {
                let (end, anchor) = if value < 0.0 {
                    (bounds.x - VALUE_LABEL_OFFSET, TextAnchor::End)
                } else {
                    (bounds.right() + VALUE_LABEL_OFFSET, TextAnchor::Start)
                };
                commands.push(DrawCommand::text(
                    formatter.format(value),
                    Point::new(end, bounds.y + bounds.height / 2.0),
                    TextStyle {
                        anchor,
                        ..value_style.clone()
                    },
                ));
            }
        }

        let reach = match &stack {
            Some(stack) => stack[index].positive_total,
            None => dataset.category_values(index).into_iter().fold(0.0, f64::max),
        };
        tooltips.push(TooltipPosition {
            x: x(reach) + VALUE_LABEL_OFFSET,
            y: top + bandwidth / 2.0,
            horizontal: TooltipHorizontalOffset::Right,
            vertical: TooltipVerticalOffset::Center,
            active_index: index,
        });
    }

    let pointer = PointerResolver::new(IndexAxis::Band(band), plot).horizontal();

    ChartLayout {
        size,
        plot,
        commands,
        x_labels: Default::default(),
        y_ticks: value.ticks,
        empty_state: false,
        index_count: count,
        pointer: Some(pointer),
        tooltips: TooltipAnchors::Fixed(tooltips),
    }
}

/// Horizontal value axis whose tick spacing fits the widest tick label.
fn value_axis(length: f32, extent: Option<(f64, f64)>, input: &ChartInput<'_>) -> ValueAxis {
    let formatter = &input.y_axis.label_formatter;
    let widths = &input.theme.text.character_widths;
    let builder = ScaleBuilder::new(length)
        .orientation(Orientation::Horizontal)
        .integers_only(input.y_axis.integers_only);
    let initial = builder.value_axis_for_extent(extent, formatter);
    let spacing = initial.ticks.max_label_width(widths) + DEFAULT_LABEL_GAP;
    builder
        .tick_spacing(spacing)
        .value_axis_for_extent(extent, formatter)
}

fn vertical_grid(value: &ValueAxis, plot: Rect, theme: &ChartTheme) -> Vec<DrawCommand> {
    if !theme.grid.show_horizontal_lines {
        return Vec::new();
    }
    let style = StrokeStyle::solid(theme.grid.color, 1.0);
    value
        .ticks
        .iter()
        .map(|t| {
            let x = plot.x + t.position as f32;
            DrawCommand::Line {
                from: Point::new(x, plot.y),
                to: Point::new(x, plot.bottom()),
                style: style.clone(),
            }
        })
        .collect()
}

type Bar = (usize, Rect, CornerRadius, Option<f64>);

fn end_radius(value: f64, radius: f32, thickness: f32) -> CornerRadius {
    let r = radius.min(thickness / 2.0);
    if value < 0.0 {
        CornerRadius::new(r, 0.0, 0.0, r)
    } else {
        CornerRadius::right(r)
    }
}

fn grouped_bars(
    dataset: &Dataset,
    index: usize,
    top: f32,
    height: f32,
    scale: &LinearScale,
    plot: Rect,
    radius: f32,
) -> Vec<Bar> {
    let series = dataset.len();
    let gaps = BAR_SPACING * series.saturating_sub(1) as f32;
    let thickness = ((height - gaps) / series.max(1) as f32).max(0.0);
    let zero = plot.x + scale.map(0.0) as f32;
    (0..series)
        .filter_map(|s| {
            let value = dataset.value(s, index)?;
            let y = top + s as f32 * (thickness + BAR_SPACING);
            let end = plot.x + scale.map(value) as f32;
            Some((
                s,
                Rect::from_horizontal_span(y, thickness, zero, end),
                end_radius(value, radius, thickness),
                Some(value),
            ))
        })
        .collect()
}

/// Stacked segments share one row; the total is printed after the last
/// positive segment.
fn stacked_bars(
    category: &StackedCategory,
    top: f32,
    height: f32,
    scale: &LinearScale,
    plot: Rect,
    radius: f32,
) -> Vec<Bar> {
    let outer = category.top_segment().map(|s| s.series);
    let inner = category.bottom_segment().map(|s| s.series);
    category
        .segments
        .iter()
        .filter(|s| !s.is_empty())
        .map(|segment| {
            let x0 = plot.x + scale.map(segment.start) as f32;
            let x1 = plot.x + scale.map(segment.end) as f32;
            let bounds = Rect::from_horizontal_span(top, height, x0, x1);
            let is_outer = Some(segment.series) == outer;
            let radius = if is_outer || Some(segment.series) == inner {
                end_radius(segment.height(), radius, height)
            } else {
                CornerRadius::ZERO
            };
            let total = is_outer.then_some(category.positive_total);
            (segment.series, bounds, radius, total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartOptions;
    use crate::data::{DataSeries, XAxisOptions, YAxisOptions};
    use chartkit_core::{DrawKind, Size};

    fn layout(dataset: &Dataset, stacked: bool) -> ChartLayout {
        let theme = ChartTheme::light();
        let x = XAxisOptions::default();
        let y = YAxisOptions::default();
        let options = ChartOptions::default();
        layout_horizontal_bar(
            &ChartInput {
                dataset,
                size: Size::new(400.0, 300.0),
                theme: &theme,
                x_axis: &x,
                y_axis: &y,
                options: &options,
                active: None,
                active_series: None,
            },
            stacked,
        )
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            DataSeries::new("a").point("North", 40.0).point("South", -10.0),
            DataSeries::new("b").point("North", 25.0).point("South", 30.0),
        ])
    }

    fn bars(layout: &ChartLayout) -> Vec<(Rect, CornerRadius, usize)> {
        layout
            .commands_of(DrawKind::Rect)
            .filter_map(|c| match c {
                DrawCommand::Rect {
                    bounds,
                    radius,
                    index: Some(i),
                    ..
                } => Some((*bounds, *radius, *i)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_bars_grow_right_from_zero() {
        let layout = layout(&dataset(), false);
        let bars = bars(&layout);
        assert_eq!(bars.len(), 4);
        let (north_a, radius, _) = bars[0];
        let (south_a, negative_radius, _) = bars[2];
        assert!((north_a.x - south_a.right()).abs() < 1e-3);
        assert!(radius.top_right > 0.0 && radius.top_left == 0.0);
        assert!(negative_radius.top_left > 0.0 && negative_radius.top_right == 0.0);
    }

    #[test]
    fn test_category_labels_above_groups() {
        let layout = layout(&dataset(), false);
        let north = layout
            .commands_of(DrawKind::Text)
            .find_map(|c| match c {
                DrawCommand::Text { content, position, .. } if content == "North" => Some(*position),
                _ => None,
            })
            .unwrap();
        let first_bar = bars(&layout)[0].0;
        assert!(north.y < first_bar.y);
    }

    #[test]
    fn test_value_labels_at_bar_ends() {
        let layout = layout(&dataset(), false);
        let texts: Vec<(String, Point, TextAnchor)> = layout
            .commands_of(DrawKind::Text)
            .filter_map(|c| match c {
                DrawCommand::Text { content, position, style } => Some((content.clone(), *position, style.anchor)),
                _ => None,
            })
            .collect();
        let (_, at, anchor) = texts.iter().find(|(t, ..)| t == "-10").unwrap();
        assert_eq!(*anchor, TextAnchor::End);
        let south_a = bars(&layout)[2].0;
        assert!((at.x - (south_a.x - VALUE_LABEL_OFFSET)).abs() < 1e-3);
    }

    #[test]
    fn test_stacked_single_row() {
        let layout = layout(&dataset(), true);
        let bars = bars(&layout);
        assert_eq!(bars.len(), 4);
        let (a, _, _) = bars[0];
        let (b, _, _) = bars[1];
        assert_eq!(a.y, b.y);
        assert!((a.right() - b.x).abs() < 1e-3);
    }

    #[test]
    fn test_pointer_runs_vertically() {
        let layout = layout(&dataset(), false);
        let pointer = layout.pointer.unwrap();
        let south = layout.tooltip_position(1, None).unwrap();
        assert_eq!(south.horizontal, TooltipHorizontalOffset::Right);
        assert_eq!(pointer.resolve(Point::new(layout.plot.x + 5.0, south.y)), Some(1));
        assert_eq!(pointer.resolve(Point::new(layout.plot.right() + 100.0, south.y)), None);
    }

    #[test]
    fn test_value_ticks_increase_left_to_right() {
        let layout = layout(&dataset(), false);
        let ticks: Vec<_> = layout.y_ticks.iter().collect();
        assert!(ticks.len() >= 2);
        assert!(ticks.windows(2).all(|w| w[0].position < w[1].position && w[0].value < w[1].value));
        assert!(ticks[0].value <= -10.0);
    }

}
