//! Input events delivered to a chart instance.

use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer moved; position is relative to the chart's top-left corner
    PointerMove {
        /// New position
        position: Point,
    },
    /// Pointer left the chart
    PointerLeave,
    /// Key pressed while the chart has focus
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Chart received keyboard focus
    FocusIn,
    /// Chart lost keyboard focus
    FocusOut,
    /// Container resized
    Resize {
        /// New size
        size: Size,
    },
    /// Chart removed from the page
    Unmount,
}

/// Keys the chart reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Tab,
    Escape,
    Enter,
}

/// Discrete focus command derived from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusCommand {
    Next,
    Previous,
    First,
    Last,
    Clear,
}

impl Event {
    /// Pointer position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::PointerMove { position } => Some(*position),
            _ => None,
        }
    }

    /// Whether the event comes from a pointing device.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        matches!(self, Self::PointerMove { .. } | Self::PointerLeave)
    }
}

impl Key {
    /// Map navigation keys to focus commands.
    ///
    /// Left/Up move backward and Right/Down move forward so the same bindings
    /// work for vertical and horizontal charts.
    #[must_use]
    pub const fn focus_command(self) -> Option<FocusCommand> {
        match self {
            Self::ArrowRight | Self::ArrowDown => Some(FocusCommand::Next),
            Self::ArrowLeft | Self::ArrowUp => Some(FocusCommand::Previous),
            Self::Home => Some(FocusCommand::First),
            Self::End => Some(FocusCommand::Last),
            Self::Escape => Some(FocusCommand::Clear),
            Self::Tab | Self::Enter => None,
        }
    }
}
