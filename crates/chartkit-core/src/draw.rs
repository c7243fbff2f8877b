//! Draw commands handed to the rendering layer.
//!
//! Every chart layout reduces to these primitives; coordinates are absolute
//! pixels relative to the chart's top-left corner.

use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for path rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
    /// Dash pattern (empty = solid)
    pub dash: Vec<f32>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            cap: LineCap::Butt,
            dash: Vec::new(),
        }
    }
}

impl StrokeStyle {
    /// Solid stroke of the given color and width.
    #[must_use]
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Set a dash pattern.
    #[must_use]
    pub fn dashed(mut self, dash: Vec<f32>) -> Self {
        self.dash = dash;
        self
    }

    /// Set the cap style.
    #[must_use]
    pub const fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
}

/// Line cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    /// Flat cap at endpoint
    #[default]
    Butt,
    /// Rounded cap
    Round,
    /// Square cap extending beyond endpoint
    Square,
}

/// Fill and stroke for rectangles, circles and closed paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: None,
        }
    }
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }
}

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Text styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: Color,
    pub font_size: f32,
    pub anchor: TextAnchor,
    /// Rotation around the anchor point in degrees, clockwise positive
    pub angle: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            font_size: 12.0,
            anchor: TextAnchor::Start,
            angle: 0.0,
        }
    }
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a path (polyline or polygon)
    Path {
        /// Points defining the path
        points: Vec<Point>,
        /// Whether the path is closed
        closed: bool,
        /// Stroke style
        style: StrokeStyle,
    },

    /// Fill a closed polygon (area under a line)
    Area {
        /// Polygon outline
        points: Vec<Point>,
        /// Fill color
        color: Color,
    },

    /// Straight line segment (grid lines, crosshair, baseline)
    Line {
        from: Point,
        to: Point,
        style: StrokeStyle,
    },

    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
        /// Series the rectangle belongs to
        series: Option<usize>,
        /// Category index the rectangle belongs to
        index: Option<usize>,
    },

    /// Draw a circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Box style
        style: BoxStyle,
    },

    /// Ring segment of a donut
    Arc {
        center: Point,
        inner_radius: f32,
        outer_radius: f32,
        /// Start angle in radians, clockwise from twelve o'clock
        start_angle: f64,
        /// End angle in radians
        end_angle: f64,
        color: Color,
        /// Series the arc belongs to
        series: usize,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Anchor position
        position: Point,
        /// Text style
        style: TextStyle,
    },
}

/// Discriminant of a [`DrawCommand`], handy for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawKind {
    Path,
    Area,
    Line,
    Rect,
    Circle,
    Arc,
    Text,
}

impl DrawCommand {
    /// Kind of this command.
    #[must_use]
    pub const fn kind(&self) -> DrawKind {
        match self {
            Self::Path { .. } => DrawKind::Path,
            Self::Area { .. } => DrawKind::Area,
            Self::Line { .. } => DrawKind::Line,
            Self::Rect { .. } => DrawKind::Rect,
            Self::Circle { .. } => DrawKind::Circle,
            Self::Arc { .. } => DrawKind::Arc,
            Self::Text { .. } => DrawKind::Text,
        }
    }

    /// Filled rectangle with no association to a data point.
    #[must_use]
    pub fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            style: BoxStyle::fill(color),
            series: None,
            index: None,
        }
    }

    /// Text with the given style.
    #[must_use]
    pub fn text(content: impl Into<String>, position: Point, style: TextStyle) -> Self {
        Self::Text {
            content: content.into(),
            position,
            style,
        }
    }
}
