//! Chart theme passed explicitly into every layout pass.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Width used for characters missing from a [`CharacterWidths`] table.
pub const FALLBACK_CHARACTER_WIDTH: f32 = 7.0;

/// Per-character advance widths used to estimate label sizes without a
/// text shaper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterWidths {
    /// Known character advances in pixels
    pub widths: BTreeMap<char, f32>,
    /// Advance used for unknown characters
    pub fallback: f32,
}

impl Default for CharacterWidths {
    fn default() -> Self {
        Self::standard()
    }
}

impl CharacterWidths {
    /// Advances measured for the default 12px UI font.
    #[must_use]
    pub fn standard() -> Self {
        let mut widths = BTreeMap::new();
        for c in '0'..='9' {
            widths.insert(c, 7.0);
        }
        for c in 'a'..='z' {
            let w = match c {
                'i' | 'j' | 'l' => 3.0,
                'f' | 't' | 'r' => 4.2,
                'm' => 10.5,
                'w' => 9.4,
                _ => 6.6,
            };
            widths.insert(c, w);
        }
        for c in 'A'..='Z' {
            let w = match c {
                'I' => 3.4,
                'J' => 5.8,
                'M' => 10.8,
                'W' => 11.6,
                _ => 8.0,
            };
            widths.insert(c, w);
        }
        for (c, w) in [
            (' ', 3.4),
            ('.', 3.2),
            (',', 3.2),
            (':', 3.2),
            ('-', 4.4),
            ('$', 7.0),
            ('%', 10.0),
            ('/', 4.4),
            ('…', 9.0),
        ] {
            widths.insert(c, w);
        }
        Self {
            widths,
            fallback: FALLBACK_CHARACTER_WIDTH,
        }
    }

    /// Advance for a single character.
    #[must_use]
    pub fn width_of(&self, c: char) -> f32 {
        self.widths.get(&c).copied().unwrap_or(self.fallback)
    }
}

/// Spacing ratio applied around or between bars, as a share of one band step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMargin {
    None,
    Small,
    #[default]
    Medium,
    Large,
}

impl BarMargin {
    /// Ratio of a band step reserved by this margin.
    #[must_use]
    pub const fn ratio(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Small => 0.05,
            Self::Medium => 0.1,
            Self::Large => 0.3,
        }
    }
}

/// Bar styling and spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTheme {
    /// Gap between bands
    pub inner_margin: BarMargin,
    /// Gap before the first and after the last band
    pub outer_margin: BarMargin,
    /// Round the outer end of each bar
    pub has_rounded_corners: bool,
    /// Corner radius when rounding is on
    pub corner_radius: f32,
    /// Draw zero values as a minimum-height bar instead of nothing
    pub zero_as_min_height: bool,
}

impl Default for BarTheme {
    fn default() -> Self {
        Self {
            inner_margin: BarMargin::Medium,
            outer_margin: BarMargin::None,
            has_rounded_corners: true,
            corner_radius: 3.0,
            zero_as_min_height: false,
        }
    }
}

/// Horizontal grid line styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridTheme {
    pub show_horizontal_lines: bool,
    /// Let grid lines run under the y-axis labels
    pub horizontal_overflow: bool,
    /// Padding between the chart edge and the plot
    pub horizontal_margin: f32,
    pub color: Color,
}

impl Default for GridTheme {
    fn default() -> Self {
        Self {
            show_horizontal_lines: true,
            horizontal_overflow: false,
            horizontal_margin: 0.0,
            color: Color::rgb(0.89, 0.9, 0.91),
        }
    }
}

/// Axis label styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTheme {
    pub hide: bool,
    pub label_color: Color,
}

impl Default for AxisTheme {
    fn default() -> Self {
        Self {
            hide: false,
            label_color: Color::rgb(0.42, 0.44, 0.45),
        }
    }
}

/// Line series styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTheme {
    /// Smooth the line between points
    pub has_spline: bool,
    pub width: f32,
    /// Radius of the active-point marker
    pub point_radius: f32,
    /// Dash pattern for comparison series
    pub comparison_dash: Vec<f32>,
}

impl Default for LineTheme {
    fn default() -> Self {
        Self {
            has_spline: true,
            width: 2.0,
            point_radius: 4.0,
            comparison_dash: vec![3.0, 3.0],
        }
    }
}

/// Crosshair shown at the active index of a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosshairTheme {
    pub width: f32,
    pub color: Color,
}

impl Default for CrosshairTheme {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: Color::rgba(0.5, 0.5, 0.5, 0.5),
        }
    }
}

/// Donut arc styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcTheme {
    /// Ring thickness in pixels
    pub thickness: f32,
    /// Angular gap between segments in radians
    pub pad_angle: f64,
}

impl Default for ArcTheme {
    fn default() -> Self {
        Self {
            thickness: 18.0,
            pad_angle: 0.01,
        }
    }
}

/// Text metrics shared by every label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextTheme {
    pub font_size: f32,
    pub line_height: f32,
    pub color: Color,
    pub character_widths: CharacterWidths,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            line_height: 14.0,
            color: Color::rgb(0.13, 0.13, 0.13),
            character_widths: CharacterWidths::standard(),
        }
    }
}

/// Complete chart theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    /// Theme name
    pub name: String,
    pub background: Color,
    /// Colors assigned to series without an explicit color, cycled by index
    pub series_colors: Vec<Color>,
    pub bar: BarTheme,
    pub grid: GridTheme,
    pub x_axis: AxisTheme,
    pub y_axis: AxisTheme,
    pub line: LineTheme,
    pub crosshair: CrosshairTheme,
    pub arc: ArcTheme,
    pub text: TextTheme,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl ChartTheme {
    /// Light theme.
    #[must_use]
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            background: Color::WHITE,
            series_colors: vec![
                Color::rgb(0.31, 0.45, 0.95), // Blue
                Color::rgb(0.96, 0.56, 0.26), // Orange
                Color::rgb(0.29, 0.72, 0.6),  // Teal
                Color::rgb(0.62, 0.39, 0.91), // Purple
                Color::rgb(0.91, 0.3, 0.47),  // Magenta
            ],
            bar: BarTheme::default(),
            grid: GridTheme::default(),
            x_axis: AxisTheme::default(),
            y_axis: AxisTheme::default(),
            line: LineTheme::default(),
            crosshair: CrosshairTheme::default(),
            arc: ArcTheme::default(),
            text: TextTheme::default(),
        }
    }

    /// Dark theme.
    #[must_use]
    pub fn dark() -> Self {
        let mut theme = Self::light();
        theme.name = "Dark".to_string();
        theme.background = Color::rgb(0.12, 0.13, 0.14);
        theme.series_colors = vec![
            Color::rgb(0.45, 0.6, 1.0),
            Color::rgb(1.0, 0.7, 0.4),
            Color::rgb(0.4, 0.85, 0.72),
            Color::rgb(0.75, 0.55, 1.0),
            Color::rgb(1.0, 0.45, 0.6),
        ];
        theme.grid.color = Color::rgb(0.25, 0.26, 0.28);
        theme.x_axis.label_color = Color::rgb(0.8, 0.8, 0.8);
        theme.y_axis.label_color = Color::rgb(0.8, 0.8, 0.8);
        theme.text.color = Color::WHITE;
        theme
    }

    /// Print theme: flat colors, no rounded corners, no smoothing.
    #[must_use]
    pub fn print() -> Self {
        let mut theme = Self::light();
        theme.name = "Print".to_string();
        theme.series_colors = vec![
            Color::BLACK,
            Color::rgb(0.4, 0.4, 0.4),
            Color::rgb(0.7, 0.7, 0.7),
        ];
        theme.bar.has_rounded_corners = false;
        theme.line.has_spline = false;
        theme
    }

    /// Look up a built-in theme by case-insensitive name.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            "print" => Some(Self::print()),
            _ => None,
        }
    }

    /// Color for the series at `index`, cycling through the palette.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        if self.series_colors.is_empty() {
            return self.text.color;
        }
        self.series_colors[index % self.series_colors.len()]
    }

    /// Create a theme with a custom name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Create a theme with custom bar styling.
    #[must_use]
    pub fn with_bar(mut self, bar: BarTheme) -> Self {
        self.bar = bar;
        self
    }
}
