//! Category label thinning, rotation and truncation.
//!
//! Text is never measured; widths come from the theme's per-character
//! advance table.

use chartkit_core::{CharacterWidths, TextTheme};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_1_SQRT_2, SQRT_2};

/// Rotation of diagonal labels, in degrees.
pub const DIAGONAL_ANGLE: f32 = -45.0;

/// Diagonal labels wider than this are truncated.
pub const MAX_DIAGONAL_LABEL_WIDTH: f32 = 100.0;

/// Cap on the vertical space taken by diagonal labels.
pub const MAX_DIAGONAL_VISIBLE_HEIGHT: f32 = 80.0;

/// Default minimum distance between two visible labels.
pub const DEFAULT_LABEL_GAP: f32 = 6.0;

const ELLIPSIS: char = '…';

/// Estimated rendered width of `text`.
#[must_use]
pub fn estimate_string_width(text: &str, widths: &CharacterWidths) -> f32 {
    text.chars().map(|c| widths.width_of(c)).sum()
}

/// Clip `text` to `max_width`, ending with an ellipsis when clipped.
#[must_use]
pub fn truncate_label(text: &str, max_width: f32, widths: &CharacterWidths) -> String {
    if estimate_string_width(text, widths) <= max_width {
        return text.to_string();
    }
    let budget = max_width - widths.width_of(ELLIPSIS);
    let mut used = 0.0;
    let mut out = String::new();
    for c in text.chars() {
        let w = widths.width_of(c);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    let mut out = out.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

/// Orientation of category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelRotation {
    #[default]
    Horizontal,
    Diagonal,
}

impl LabelRotation {
    /// Rotation angle in degrees.
    #[must_use]
    pub const fn angle(self) -> f32 {
        match self {
            Self::Horizontal => 0.0,
            Self::Diagonal => DIAGONAL_ANGLE,
        }
    }
}

/// A label that survived thinning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLabel {
    /// Category index
    pub index: usize,
    pub text: String,
    /// Pixel position the label is centred on (or starts at when diagonal)
    pub anchor: f32,
    /// Estimated width of `text`
    pub width: f32,
}

/// Outcome of a label layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelLayoutResult {
    pub rotation: LabelRotation,
    pub labels: Vec<PlacedLabel>,
    line_height: f32,
}

impl LabelLayoutResult {
    /// Category indices of the visible labels, ascending.
    #[must_use]
    pub fn visible_indices(&self) -> Vec<usize> {
        self.labels.iter().map(|l| l.index).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Vertical space reserved under the plot for the labels.
    #[must_use]
    pub fn label_area_height(&self) -> f32 {
        if self.labels.is_empty() {
            return 0.0;
        }
        match self.rotation {
            LabelRotation::Horizontal => self.line_height,
            LabelRotation::Diagonal => {
                let widest = self.labels.iter().map(|l| l.width).fold(0.0, f32::max);
                (widest * FRAC_1_SQRT_2 + self.line_height * FRAC_1_SQRT_2)
                    .min(MAX_DIAGONAL_VISIBLE_HEIGHT)
            }
        }
    }
}

/// Decides which category labels to show and how to orient them.
#[derive(Debug, Clone)]
pub struct LabelLayout<'a> {
    widths: &'a CharacterWidths,
    line_height: f32,
    min_gap: f32,
}

impl<'a> LabelLayout<'a> {
    #[must_use]
    pub fn new(text: &'a TextTheme) -> Self {
        Self {
            widths: &text.character_widths,
            line_height: text.line_height,
            min_gap: DEFAULT_LABEL_GAP,
        }
    }

    #[must_use]
    pub fn min_gap(mut self, gap: f32) -> Self {
        self.min_gap = gap.max(0.0);
        self
    }

    /// Lay out `labels` centred on `anchors` with `budget` pixels available
    /// to each label at zero rotation.
    ///
    /// `labels` and `anchors` are paired by index; extra entries in either
    /// are ignored.
    #[must_use]
    pub fn layout(&self, labels: &[String], anchors: &[f32], budget: f32) -> LabelLayoutResult {
        let n = labels.len().min(anchors.len());
        if n == 0 {
            return LabelLayoutResult {
                line_height: self.line_height,
                ..LabelLayoutResult::default()
            };
        }

        let widest = labels[..n]
            .iter()
            .map(|l| estimate_string_width(l, self.widths))
            .fold(0.0, f32::max);
        let rotation = if n > 1 && widest > budget {
            LabelRotation::Diagonal
        } else {
            LabelRotation::Horizontal
        };

        let texts: Vec<String> = labels[..n]
            .iter()
            .map(|l| match rotation {
                LabelRotation::Horizontal => l.clone(),
                LabelRotation::Diagonal => truncate_label(l, MAX_DIAGONAL_LABEL_WIDTH, self.widths),
            })
            .collect();
        let text_widths: Vec<f32> = texts
            .iter()
            .map(|t| estimate_string_width(t, self.widths))
            .collect();
        let footprints: Vec<f32> = match rotation {
            LabelRotation::Horizontal => text_widths.clone(),
            // parallel 45 degree baselines one line apart
            LabelRotation::Diagonal => vec![self.line_height * SQRT_2; n],
        };

        let visible = if budget <= 0.0 {
            edge_indices(n)
        } else {
            self.reduce(&anchors[..n], &footprints)
        };
        log::trace!("{} of {n} labels visible, {rotation:?}", visible.len());

        LabelLayoutResult {
            rotation,
            labels: visible
                .into_iter()
                .map(|index| PlacedLabel {
                    index,
                    text: texts[index].clone(),
                    anchor: anchors[index],
                    width: text_widths[index],
                })
                .collect(),
            line_height: self.line_height,
        }
    }

    /// Evenly strided candidates, dropped greedily until every adjacent pair
    /// keeps `min_gap`. First and last always stay.
    fn reduce(&self, anchors: &[f32], footprints: &[f32]) -> Vec<usize> {
        let n = anchors.len();
        if n <= 2 {
            return edge_indices(n);
        }
        let last = n - 1;
        let gap = |i: usize, j: usize| {
            (anchors[j] - anchors[i]).abs() - (footprints[i] + footprints[j]) / 2.0
        };

        let spacing = (anchors[last] - anchors[0]).abs() / last as f32;
        let required = footprints.iter().copied().fold(0.0, f32::max) + self.min_gap;
        let stride = if spacing > 0.0 {
            ((required / spacing).ceil() as usize).clamp(1, last)
        } else {
            last
        };

        let mut visible = vec![0];
        for candidate in (stride..last).step_by(stride) {
            let prev = visible[visible.len() - 1];
            if gap(prev, candidate) >= self.min_gap && gap(candidate, last) >= self.min_gap {
                visible.push(candidate);
            }
        }
        visible.push(last);
        visible
    }
}

fn edge_indices(n: usize) -> Vec<usize> {
    match n {
        0 => Vec::new(),
        1 => vec![0],
        _ => vec![0, n - 1],
    }
}
