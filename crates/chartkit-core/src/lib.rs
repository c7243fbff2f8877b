//! Core types for the chartkit data-visualization toolkit.
//!
//! This crate provides the vocabulary shared by every chart:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`CornerRadius`]
//! - Color representation: [`Color`]
//! - Theming: [`ChartTheme`] and its per-element sections
//! - Input: [`Event`], [`Key`], [`FocusCommand`]
//! - Output: [`DrawCommand`] primitives for the rendering layer
//! - Animation: [`Easing`], [`Transition`], [`KeyframeTrack`]

pub mod animation;
mod color;
pub mod draw;
mod event;
mod geometry;
pub mod theme;

pub use animation::{
    animation_trail, stagger_delay, Easing, Interpolate, Keyframe, KeyframeTrack, Transition,
};
pub use color::{Color, ColorParseError};
pub use draw::{BoxStyle, DrawCommand, DrawKind, LineCap, StrokeStyle, TextAnchor, TextStyle};
pub use event::{Event, FocusCommand, Key};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use theme::{
    ArcTheme, AxisTheme, BarMargin, BarTheme, CharacterWidths, ChartTheme, CrosshairTheme,
    GridTheme, LineTheme, TextTheme,
};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // THEME + DRAW INTERPLAY
    // ==========================================================================

    #[test]
    fn test_series_color_feeds_draw_command() {
        let theme = ChartTheme::light();
        let cmd = DrawCommand::filled_rect(Rect::new(0.0, 0.0, 10.0, 10.0), theme.series_color(0));
        match cmd {
            DrawCommand::Rect { style, .. } => {
                assert_eq!(style.fill, Some(theme.series_colors[0]));
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn test_dimmed_series_color() {
        let theme = ChartTheme::dark();
        let dimmed = theme.series_color(1).with_alpha(0.3);
        assert_eq!(dimmed.r, theme.series_color(1).r);
        assert_eq!(dimmed.a, 0.3);
    }

    // ==========================================================================
    // ANIMATION OVER GEOMETRY
    // ==========================================================================

    #[test]
    fn test_bar_grows_from_baseline() {
        let baseline = Rect::new(10.0, 100.0, 20.0, 0.0);
        let target = Rect::new(10.0, 40.0, 20.0, 60.0);
        let tr = Transition::new(baseline, target).with_delay(stagger_delay(2, 10));
        assert_eq!(tr.value_at(0.0), baseline);
        assert_eq!(tr.value_at(10.0), target);
    }

    #[test]
    fn test_color_transition() {
        let tr = Transition::new(Color::BLACK, Color::WHITE)
            .with_duration(1.0)
            .with_easing(Easing::Linear);
        let mid = tr.value_at(0.5);
        assert!((mid.r - 0.5).abs() < 0.01);
    }
}
