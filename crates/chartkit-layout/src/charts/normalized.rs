//! Single normalized stacked bar with a label per series.

use super::{series_color, ChartInput, ChartLayout};
use crate::labels::estimate_string_width;
use crate::scale::Orientation;
use crate::stack::StackAccumulator;
use chartkit_core::{BoxStyle, CornerRadius, DrawCommand, Point, Rect, TextAnchor, TextStyle};

/// Thickness of the normalized bar.
pub const NORMALIZED_BAR_THICKNESS: f32 = 16.0;

/// Space between the bar and its labels, and between labels.
pub const NORMALIZED_LABEL_GAP: f32 = 12.0;

/// Lay out a normalized bar: each series' first value as a share of the
/// total magnitude.
///
/// Horizontal bars put the labels in a row under the bar; vertical bars put
/// each label beside its segment.
#[must_use]
pub fn layout_normalized(input: &ChartInput<'_>) -> ChartLayout {
    let ChartInput {
        dataset,
        size,
        theme,
        y_axis,
        options,
        active,
        ..
    } = *input;
    if dataset.status().empty_state {
        return ChartLayout::empty(size);
    }

    let mut acc = StackAccumulator::new();
    for (s, series) in dataset.series.iter().enumerate() {
        acc.push(s, series.value_at(0));
    }
    let category = acc.finish();
    let shares = category.normalize();
    if shares.iter().all(|s| *s == 0.0) {
        return ChartLayout::empty(size);
    }

    let horizontal = options.direction == Orientation::Horizontal;
    let length = if horizontal { size.width } else { size.height };
    let plot = if horizontal {
        Rect::new(0.0, 0.0, size.width, NORMALIZED_BAR_THICKNESS)
    } else {
        Rect::new(0.0, 0.0, NORMALIZED_BAR_THICKNESS, size.height)
    };

    let visible: Vec<usize> = (0..shares.len()).filter(|i| shares[*i] > 0.0).collect();
    let radius = if theme.bar.has_rounded_corners {
        theme.bar.corner_radius.min(NORMALIZED_BAR_THICKNESS / 2.0)
    } else {
        0.0
    };

    let mut commands = Vec::new();
    let mut offset = 0.0;
    let mut segments = Vec::with_capacity(visible.len());
    for (n, &series) in visible.iter().enumerate() {
        let extent = shares[series] as f32 * length;
        let bounds = if horizontal {
            Rect::new(offset, 0.0, extent, NORMALIZED_BAR_THICKNESS)
        } else {
            Rect::new(0.0, offset, NORMALIZED_BAR_THICKNESS, extent)
        };
        offset += extent;

        let leading = if n == 0 { radius } else { 0.0 };
        let trailing = if n + 1 == visible.len() { radius } else { 0.0 };
        let radius = if horizontal {
            CornerRadius::new(leading, trailing, trailing, leading)
        } else {
            CornerRadius::new(leading, leading, trailing, trailing)
        };
        commands.push(DrawCommand::Rect {
            bounds,
            radius,
            style: BoxStyle::fill(series_color(dataset, theme, series, series, active, None)),
            series: Some(series),
            index: Some(0),
        });
        segments.push((series, bounds));
    }

    let style = TextStyle {
        color: theme.text.color,
        font_size: theme.text.font_size,
        anchor: TextAnchor::Start,
        angle: 0.0,
    };
    let mut label_x = 0.0;
    for (series, bounds) in segments {
        let name = &dataset.series[series].name;
        let value = dataset
            .series[series]
            .data
            .first()
            .and_then(|p| p.formatted_value.clone())
            .or_else(|| dataset.value(series, 0).map(|v| y_axis.label_formatter.format(v)))
            .unwrap_or_default();
        let content = format!("{name} {value}");
        let position = if horizontal {
            let at = Point::new(
                label_x,
                NORMALIZED_BAR_THICKNESS + NORMALIZED_LABEL_GAP + theme.text.line_height / 2.0,
            );
            label_x += estimate_string_width(&content, &theme.text.character_widths)
                + NORMALIZED_LABEL_GAP;
            at
        } else {
            Point::new(
                NORMALIZED_BAR_THICKNESS + NORMALIZED_LABEL_GAP,
                bounds.y + bounds.height / 2.0,
            )
        };
        commands.push(DrawCommand::text(content, position, style.clone()));
    }

    ChartLayout {
        size,
        plot,
        commands,
        index_count: dataset.len(),
        ..ChartLayout::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartOptions;
    use crate::data::{DataPoint, DataSeries, Dataset, XAxisOptions, YAxisOptions};
    use chartkit_core::{ChartTheme, DrawKind, Size};

    fn layout(dataset: &Dataset, direction: Orientation) -> ChartLayout {
        let theme = ChartTheme::light();
        let x = XAxisOptions::default();
        let y = YAxisOptions::default();
        let options = ChartOptions {
            direction,
            ..ChartOptions::default()
        };
        layout_normalized(&ChartInput {
            dataset,
            size: Size::new(300.0, 200.0),
            theme: &theme,
            x_axis: &x,
            y_axis: &y,
            options: &options,
            active: None,
            active_series: None,
        })
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            DataSeries::new("Direct").point("share", 150.0),
            DataSeries::new("Search").point("share", 0.0),
            DataSeries::new("Social").with_points(vec![DataPoint::new("share", 150.0).with_formatted_value("$150")]),
        ])
    }

    fn rects(layout: &ChartLayout) -> Vec<Rect> {
        layout
            .commands_of(DrawKind::Rect)
            .filter_map(|c| match c {
                DrawCommand::Rect { bounds, .. } => Some(*bounds),
                _ => None,
            })
            .collect()
    }

    fn texts(layout: &ChartLayout) -> Vec<(String, Point)> {
        layout
            .commands_of(DrawKind::Text)
            .filter_map(|c| match c {
                DrawCommand::Text { content, position, .. } => Some((content.clone(), *position)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_horizontal_shares() {
        let layout = layout(&dataset(), Orientation::Horizontal);
        let rects = rects(&layout);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].width, 150.0);
        assert_eq!(rects[1].x, 150.0);
        assert_eq!(rects[1].right(), 300.0);
    }

    #[test]
    fn test_vertical_direction() {
        let layout = layout(&dataset(), Orientation::Vertical);
        let rects = rects(&layout);
        assert_eq!(rects[0].height, 100.0);
        assert_eq!(rects[0].width, NORMALIZED_BAR_THICKNESS);
        let labels = texts(&layout);
        assert_eq!(labels[0].1.y, 50.0);
    }

    #[test]
    fn test_labels_use_formatted_value() {
        let layout = layout(&dataset(), Orientation::Horizontal);
        let labels = texts(&layout);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].0, "Direct 150");
        assert_eq!(labels[1].0, "Social $150");
        assert!(labels[1].1.x > labels[0].1.x);
    }

    #[test]
    fn test_outer_corners_only() {
        let layout = layout(&dataset(), Orientation::Horizontal);
        let radii: Vec<CornerRadius> = layout
            .commands_of(DrawKind::Rect)
            .filter_map(|c| match c {
                DrawCommand::Rect { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert!(radii[0].top_left > 0.0 && radii[0].top_right == 0.0);
        assert!(radii[1].top_right > 0.0 && radii[1].top_left == 0.0);
    }

    #[test]
    fn test_all_zero_is_empty() {
        let ds = Dataset::new(vec![DataSeries::new("a").point("x", 0.0)]);
        assert!(layout(&ds, Orientation::Horizontal).empty_state);
    }
}
