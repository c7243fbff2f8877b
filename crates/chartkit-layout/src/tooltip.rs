//! Tooltip visibility state machine, placement and content payloads.

use crate::data::{Dataset, XAxisOptions, YAxisOptions};
use crate::pointer::PointerResolver;
use chartkit_core::{ChartTheme, Color, Event, FocusCommand, Point};
use serde::{Deserialize, Serialize};

/// Tooltip visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TooltipState {
    #[default]
    Hidden,
    ActiveAtIndex(usize),
    /// Chart unmounted; no further transitions
    Detached,
}

impl TooltipState {
    #[must_use]
    pub const fn active_index(self) -> Option<usize> {
        match self {
            Self::ActiveAtIndex(i) => Some(i),
            Self::Hidden | Self::Detached => None,
        }
    }
}

/// Drives [`TooltipState`] from input events.
#[derive(Debug, Clone, Default)]
pub struct TooltipController {
    state: TooltipState,
    count: usize,
    /// Pointer that produced the current state, if any
    pointer: Option<Point>,
}

impl TooltipController {
    /// Controller for `count` data indices.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn state(&self) -> TooltipState {
        self.state
    }

    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.state.active_index()
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Last pointer position while the tooltip follows the pointer.
    #[must_use]
    pub const fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    #[must_use]
    pub const fn is_detached(&self) -> bool {
        matches!(self.state, TooltipState::Detached)
    }

    /// Data changed; keep the active index inside the new range.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        if let TooltipState::ActiveAtIndex(i) = self.state {
            if count == 0 {
                self.transition(TooltipState::Hidden);
            } else if i >= count {
                self.transition(TooltipState::ActiveAtIndex(count - 1));
            }
        }
    }

    /// Apply an input event. Returns whether the state changed.
    pub fn handle(&mut self, event: &Event, resolver: Option<&PointerResolver>) -> bool {
        if self.is_detached() {
            return false;
        }
        match event {
            Event::PointerMove { position } => {
                let next = resolver
                    .and_then(|r| r.resolve(*position))
                    .filter(|i| *i < self.count)
                    .map_or(TooltipState::Hidden, TooltipState::ActiveAtIndex);
                self.pointer = next.active_index().map(|_| *position);
                self.transition(next)
            }
            Event::PointerLeave | Event::FocusOut => {
                self.pointer = None;
                self.transition(TooltipState::Hidden)
            }
            Event::KeyDown { key } => match key.focus_command() {
                Some(command) => self.focus(command),
                None => false,
            },
            Event::Unmount => {
                self.pointer = None;
                self.transition(TooltipState::Detached)
            }
            Event::FocusIn | Event::Resize { .. } => false,
        }
    }

    /// Apply a discrete keyboard focus command.
    pub fn focus(&mut self, command: FocusCommand) -> bool {
        if self.is_detached() {
            return false;
        }
        self.pointer = None;
        if self.count == 0 {
            return self.transition(TooltipState::Hidden);
        }
        let last = self.count - 1;
        let next = match (command, self.state) {
            (FocusCommand::Clear, _) => TooltipState::Hidden,
            (FocusCommand::First, _) | (FocusCommand::Next, TooltipState::Hidden) => {
                TooltipState::ActiveAtIndex(0)
            }
            (FocusCommand::Last, _) | (FocusCommand::Previous, TooltipState::Hidden) => {
                TooltipState::ActiveAtIndex(last)
            }
            (FocusCommand::Next, TooltipState::ActiveAtIndex(i)) => {
                TooltipState::ActiveAtIndex((i + 1).min(last))
            }
            (FocusCommand::Previous, TooltipState::ActiveAtIndex(i)) => {
                TooltipState::ActiveAtIndex(i.saturating_sub(1).min(last))
            }
            (_, TooltipState::Detached) => TooltipState::Detached,
        };
        self.transition(next)
    }

    fn transition(&mut self, next: TooltipState) -> bool {
        if next == self.state {
            return false;
        }
        log::trace!("tooltip {:?} -> {next:?}", self.state);
        self.state = next;
        true
    }
}

/// Horizontal placement of the tooltip relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipHorizontalOffset {
    Left,
    Center,
    Right,
}

/// Vertical placement of the tooltip relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipVerticalOffset {
    Above,
    Center,
    Below,
}

/// Where to draw the tooltip, in chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPosition {
    pub x: f32,
    pub y: f32,
    pub horizontal: TooltipHorizontalOffset,
    pub vertical: TooltipVerticalOffset,
    pub active_index: usize,
}

/// One series row of a tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipRow {
    /// Series name
    pub series: String,
    /// Formatted category key
    pub label: String,
    /// Raw value, nulls reported as zero
    pub value: f64,
    pub formatted: String,
    pub color: Color,
    pub is_comparison: bool,
}

/// Payload handed to the caller's tooltip renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub index: usize,
    /// Formatted category of the index
    pub title: String,
    pub rows: Vec<TooltipRow>,
}

impl TooltipContent {
    /// Content for category `index`; `None` when no series has that index.
    #[must_use]
    pub fn build(
        dataset: &Dataset,
        index: usize,
        theme: &ChartTheme,
        x_axis: &XAxisOptions,
        y_axis: &YAxisOptions,
    ) -> Option<Self> {
        let rows: Vec<TooltipRow> = dataset
            .series
            .iter()
            .enumerate()
            .filter_map(|(i, series)| {
                let point = series.data.get(index)?;
                let value = point.value.unwrap_or(0.0);
                Some(TooltipRow {
                    series: series.name.clone(),
                    label: x_axis.label_formatter.format(&point.key),
                    value,
                    formatted: point
                        .formatted_value
                        .clone()
                        .unwrap_or_else(|| y_axis.label_formatter.format(value)),
                    color: series.color.unwrap_or_else(|| theme.series_color(i)),
                    is_comparison: series.is_comparison,
                })
            })
            .collect();
        let title = rows.first()?.label.clone();
        Some(Self { index, title, rows })
    }
}
