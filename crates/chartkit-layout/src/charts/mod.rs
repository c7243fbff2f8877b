//! Per-chart layout passes.
//!
//! Each pass turns a dataset, pixel size and theme into a [`ChartLayout`]:
//! draw commands for the renderer plus what the chart instance needs to
//! resolve pointers and place tooltips.

mod donut;
mod horizontal_bar;
mod line;
mod normalized;
mod sparkline;
mod vertical_bar;

pub use donut::{donut_slices, layout_donut, slice_midpoint, DonutSlice, TOTAL_FONT_SCALE};
pub use horizontal_bar::{layout_horizontal_bar, VALUE_LABEL_OFFSET};
pub use line::layout_line;
pub use normalized::{layout_normalized, NORMALIZED_BAR_THICKNESS, NORMALIZED_LABEL_GAP};
pub use sparkline::{layout_sparkline, AREA_ALPHA};
pub use vertical_bar::{layout_vertical_bar, should_rotate_zero_bars};

use crate::data::{Dataset, XAxisOptions, YAxisOptions};
use crate::labels::{LabelLayout, LabelLayoutResult, LabelRotation};
use crate::pointer::{IndexAxis, PointerResolver};
use crate::scale::{Orientation, ScaleBuilder, TickSet, ValueAxis};
use crate::stack::StackedCategory;
use crate::tooltip::TooltipPosition;
use chartkit_core::{
    ChartTheme, Color, DrawCommand, DrawKind, Point, Rect, Size, StrokeStyle, TextAnchor,
    TextStyle,
};
use serde::{Deserialize, Serialize};

/// Space between the y-axis labels and the plot.
pub const Y_AXIS_CHART_SPACING: f32 = 10.0;

/// Space between the plot and the category labels under it.
pub const LABEL_AREA_TOP_SPACING: f32 = 8.0;

/// Space above the plot so the top tick label is not clipped.
pub const PLOT_MARGIN_TOP: f32 = 8.0;

/// Height given to zero-value bars when the theme asks for visible zeros.
pub const MIN_BAR_HEIGHT: f32 = 2.0;

/// Gap between the bars of one group.
pub const BAR_SPACING: f32 = 3.0;

/// Alpha multiplier applied to elements outside the active index.
pub const INACTIVE_ALPHA: f32 = 0.3;

/// Chart types with a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    #[default]
    VerticalBar,
    StackedBar,
    HorizontalBar,
    StackedHorizontalBar,
    Sparkline,
    Donut,
    NormalizedBar,
}

impl ChartKind {
    #[must_use]
    pub const fn is_stacked(self) -> bool {
        matches!(self, Self::StackedBar | Self::StackedHorizontalBar)
    }

    /// Whether the active index names a series rather than a category.
    #[must_use]
    pub const fn indexes_series(self) -> bool {
        matches!(self, Self::Donut | Self::NormalizedBar)
    }

    /// Run the layout pass for this chart type.
    #[must_use]
    pub fn layout(self, input: &ChartInput<'_>) -> ChartLayout {
        log::debug!(
            "{self:?} layout at {}x{}, {} series",
            input.size.width,
            input.size.height,
            input.dataset.len()
        );
        match self {
            Self::Line => layout_line(input),
            Self::VerticalBar => layout_vertical_bar(input, false),
            Self::StackedBar => layout_vertical_bar(input, true),
            Self::HorizontalBar => layout_horizontal_bar(input, false),
            Self::StackedHorizontalBar => layout_horizontal_bar(input, true),
            Self::Sparkline => layout_sparkline(input),
            Self::Donut => layout_donut(input),
            Self::NormalizedBar => layout_normalized(input),
        }
    }
}

/// Chart-type specific knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Sparkline padding before the first point
    pub offset_left: f32,
    /// Sparkline padding after the last point
    pub offset_right: f32,
    /// Direction of the normalized bar
    pub direction: Orientation,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            offset_left: 0.0,
            offset_right: 0.0,
            direction: Orientation::Horizontal,
        }
    }
}

/// Everything a layout pass reads.
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub dataset: &'a Dataset,
    pub size: Size,
    pub theme: &'a ChartTheme,
    pub x_axis: &'a XAxisOptions,
    pub y_axis: &'a YAxisOptions,
    pub options: &'a ChartOptions,
    /// Highlighted index (category, or series for donut and normalized)
    pub active: Option<usize>,
    /// Series selected from outside the chart, e.g. a legend. Cartesian
    /// charts dim every other series while it is set.
    pub active_series: Option<usize>,
}

/// How tooltip positions are derived for a layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipAnchors {
    /// Chart has no tooltip
    #[default]
    None,
    /// Tooltip follows the pointer; keyboard focus uses the given anchors
    FollowPointer(Vec<Point>),
    /// Tooltip sits at a fixed position per index
    Fixed(Vec<TooltipPosition>),
}

/// Output of a layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartLayout {
    pub size: Size,
    /// Drawable area, excluding axes and labels
    pub plot: Rect,
    pub commands: Vec<DrawCommand>,
    pub x_labels: LabelLayoutResult,
    pub y_ticks: TickSet,
    pub empty_state: bool,
    /// Number of indices the tooltip can focus
    pub index_count: usize,
    pub pointer: Option<PointerResolver>,
    pub tooltips: TooltipAnchors,
}

impl ChartLayout {
    /// Empty-state layout: no commands, no interaction.
    #[must_use]
    pub fn empty(size: Size) -> Self {
        Self {
            size,
            plot: Rect::from_size(size),
            empty_state: true,
            ..Self::default()
        }
    }

    /// Commands of one kind.
    pub fn commands_of(&self, kind: DrawKind) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.kind() == kind)
    }

    /// Tooltip placement for `index`; `pointer` is used by charts whose
    /// tooltip follows the pointer.
    #[must_use]
    pub fn tooltip_position(&self, index: usize, pointer: Option<Point>) -> Option<TooltipPosition> {
        use crate::tooltip::{TooltipHorizontalOffset, TooltipVerticalOffset};

        match &self.tooltips {
            TooltipAnchors::None => None,
            TooltipAnchors::FollowPointer(anchors) => {
                let at = pointer.or_else(|| anchors.get(index).copied())?;
                Some(TooltipPosition {
                    x: at.x,
                    y: at.y,
                    horizontal: TooltipHorizontalOffset::Left,
                    vertical: TooltipVerticalOffset::Center,
                    active_index: index,
                })
            }
            TooltipAnchors::Fixed(positions) => positions.get(index).copied(),
        }
    }
}

/// Plot frame shared by the vertical cartesian charts.
#[derive(Debug, Clone)]
pub(crate) struct CartesianFrame {
    pub(crate) plot: Rect,
    pub(crate) value: ValueAxis,
    pub(crate) index: IndexAxis,
    pub(crate) labels: LabelLayoutResult,
}

/// Resolve plot size, value axis and category labels for a vertical chart.
///
/// The y-axis label width depends on the ticks, the ticks on the drawable
/// height, and the height on the category label rotation, so the value axis
/// is built twice: once without labels to size the y-axis, then for real.
pub(crate) fn cartesian_frame(
    input: &ChartInput<'_>,
    stack: Option<&[StackedCategory]>,
    banded: bool,
) -> CartesianFrame {
    let ChartInput {
        dataset,
        size,
        theme,
        x_axis,
        y_axis,
        ..
    } = *input;
    let hide_x = x_axis.hide.unwrap_or(theme.x_axis.hide);
    let hide_y = y_axis.hide.unwrap_or(theme.y_axis.hide);
    let margin = theme.grid.horizontal_margin;
    let count = dataset.category_count();

    let builder = |length: f32| ScaleBuilder::new(length).integers_only(y_axis.integers_only);

    let initial_height = (size.height - PLOT_MARGIN_TOP - LABEL_AREA_TOP_SPACING).max(0.0);
    let initial = builder(initial_height).value_axis(dataset, stack, &y_axis.label_formatter);
    let y_label_width = if hide_y {
        0.0
    } else {
        initial.ticks.max_label_width(&theme.text.character_widths)
    };

    let chart_start = y_label_width + Y_AXIS_CHART_SPACING + margin;
    let drawable_width = (size.width - chart_start - margin).max(0.0);
    let width_builder = ScaleBuilder::new(drawable_width);

    let (index, anchors, budget) = if banded {
        let band = width_builder.band(count, &theme.bar);
        let anchors: Vec<f32> = (0..count)
            .filter_map(|i| band.center(i))
            .map(|c| chart_start + c as f32)
            .collect();
        (IndexAxis::Band(band), anchors, band.bandwidth() as f32)
    } else {
        let scale = width_builder.index(count);
        let anchors: Vec<f32> = (0..count)
            .map(|i| chart_start + scale.map(i as f64) as f32)
            .collect();
        let budget = if count == 0 {
            0.0
        } else {
            drawable_width / count as f32
        };
        (IndexAxis::Linear { scale, count }, anchors, budget)
    };

    let labels = if hide_x {
        LabelLayoutResult::default()
    } else {
        let texts = category_labels(dataset, x_axis);
        LabelLayout::new(&theme.text).layout(&texts, &anchors, budget)
    };

    let drawable_height = (size.height
        - PLOT_MARGIN_TOP
        - LABEL_AREA_TOP_SPACING
        - labels.label_area_height())
    .max(0.0);
    let value = builder(drawable_height).value_axis(dataset, stack, &y_axis.label_formatter);

    CartesianFrame {
        plot: Rect::new(chart_start, PLOT_MARGIN_TOP, drawable_width, drawable_height),
        value,
        index,
        labels,
    }
}

/// Formatted category labels.
pub(crate) fn category_labels(dataset: &Dataset, x_axis: &XAxisOptions) -> Vec<String> {
    dataset
        .keys()
        .into_iter()
        .map(|k| x_axis.label_formatter.format(k))
        .collect()
}

/// Color of `series` at `element`. A selected series dims the other series;
/// otherwise an active element dims the other elements.
pub(crate) fn series_color(
    dataset: &Dataset,
    theme: &ChartTheme,
    series: usize,
    element: usize,
    active: Option<usize>,
    active_series: Option<usize>,
) -> Color {
    let base = dataset
        .series
        .get(series)
        .and_then(|s| s.color)
        .unwrap_or_else(|| theme.series_color(series));
    let dimmed = match active_series {
        Some(selected) => selected != series,
        None => active.is_some_and(|a| a != element),
    };
    if dimmed {
        base.with_alpha(base.a * INACTIVE_ALPHA)
    } else {
        base
    }
}

/// Horizontal grid lines at each tick of a vertical value axis.
pub(crate) fn horizontal_grid(ticks: &TickSet, plot: Rect, chart_width: f32, theme: &ChartTheme) -> Vec<DrawCommand> {
    if !theme.grid.show_horizontal_lines {
        return Vec::new();
    }
    let start = if theme.grid.horizontal_overflow { 0.0 } else { plot.x };
    let end = chart_width - theme.grid.horizontal_margin;
    let style = StrokeStyle::solid(theme.grid.color, 1.0);
    ticks
        .iter()
        .map(|t| {
            let y = plot.y + t.position as f32;
            DrawCommand::Line {
                from: Point::new(start, y),
                to: Point::new(end, y),
                style: style.clone(),
            }
        })
        .collect()
}

/// Right-aligned tick labels left of the plot, vertically centred on the
/// tick.
pub(crate) fn y_axis_labels(ticks: &TickSet, plot: Rect, theme: &ChartTheme) -> Vec<DrawCommand> {
    let style = TextStyle {
        color: theme.y_axis.label_color,
        font_size: theme.text.font_size,
        anchor: TextAnchor::End,
        angle: 0.0,
    };
    let x = plot.x - Y_AXIS_CHART_SPACING;
    ticks
        .iter()
        .map(|t| {
            DrawCommand::text(
                t.formatted.clone(),
                Point::new(x, plot.y + t.position as f32),
                style.clone(),
            )
        })
        .collect()
}

/// Category labels starting `top` pixels from the chart's top edge.
pub(crate) fn x_axis_labels(labels: &LabelLayoutResult, top: f32, theme: &ChartTheme) -> Vec<DrawCommand> {
    let (anchor, y) = match labels.rotation {
        LabelRotation::Horizontal => (TextAnchor::Middle, top + theme.text.line_height / 2.0),
        LabelRotation::Diagonal => (TextAnchor::End, top),
    };
    let style = TextStyle {
        color: theme.x_axis.label_color,
        font_size: theme.text.font_size,
        anchor,
        angle: labels.rotation.angle(),
    };
    labels
        .labels
        .iter()
        .map(|l| DrawCommand::text(l.text.clone(), Point::new(l.anchor, y), style.clone()))
        .collect()
}
