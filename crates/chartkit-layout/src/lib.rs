#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::doc_markdown)]
//! Scale, stacking, label and tooltip layout for chartkit charts.
//!
//! A layout pass takes a [`Dataset`], pixel [`Size`](chartkit_core::Size)
//! and [`ChartTheme`](chartkit_core::ChartTheme) and produces a
//! [`ChartLayout`]: draw commands plus the pointer resolver and tooltip
//! anchors the chart needs for interaction.
//!
//! The building blocks are usable on their own:
//!
//! - [`ScaleBuilder`]: nice linear value axes and band scales
//! - [`StackAccumulator`]: sign-separated stacked sums
//! - [`LabelLayout`]: category label thinning and rotation
//! - [`PointerResolver`]: pointer coordinate to data index
//! - [`TooltipController`]: tooltip visibility state machine
//!
//! [`ChartInstance`] ties them together with lazy relayout and debounced
//! resize.
//!
//! # Example
//!
//! ```
//! use chartkit_layout::{ChartInstance, ChartKind, DataSeries, Dataset};
//! use chartkit_core::Size;
//!
//! let dataset = Dataset::new(vec![DataSeries::new("Sales")
//!     .point("A", 10.0)
//!     .point("B", -5.0)
//!     .point("C", 0.0)]);
//! let mut chart = ChartInstance::new(ChartKind::VerticalBar, dataset, Size::new(320.0, 200.0));
//! assert!(!chart.layout().empty_state);
//! ```

pub mod charts;
mod curve;
mod data;
mod error;
mod instance;
mod labels;
mod pointer;
mod resize;
pub mod scale;
mod stack;
mod tooltip;

pub use charts::{ChartInput, ChartKind, ChartLayout, ChartOptions, TooltipAnchors};
pub use curve::{line_path, CatmullRom, SEGMENTS_PER_SPAN};
pub use data::{
    format_number, DataKey, DataPoint, DataSeries, Dataset, DatasetStatus, KeyFormatter,
    ValueFormatter, XAxisOptions, YAxisOptions,
};
pub use error::DatasetError;
pub use instance::ChartInstance;
pub use labels::{
    estimate_string_width, truncate_label, LabelLayout, LabelLayoutResult, LabelRotation,
    PlacedLabel, DEFAULT_LABEL_GAP, DIAGONAL_ANGLE, MAX_DIAGONAL_LABEL_WIDTH,
    MAX_DIAGONAL_VISIBLE_HEIGHT,
};
pub use pointer::{IndexAxis, PointerResolver};
pub use resize::{PendingResize, ResizeDebouncer, DEFAULT_RESIZE_DEBOUNCE_MS};
pub use scale::{BandScale, LinearScale, Orientation, ScaleBuilder, Tick, TickSet, ValueAxis};
pub use stack::{stack_values, stacked_extent, StackAccumulator, StackSegment, StackedCategory};
pub use tooltip::{
    TooltipContent, TooltipController, TooltipHorizontalOffset, TooltipPosition, TooltipRow,
    TooltipState, TooltipVerticalOffset,
};
