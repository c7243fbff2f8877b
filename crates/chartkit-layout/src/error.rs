//! Reasons a dataset degrades to the empty-state layout.

use thiserror::Error;

/// Why a dataset cannot be laid out as a regular chart.
///
/// Layout passes never return these; they are reported through
/// [`crate::DatasetStatus`] and the `empty_state` flag of a layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// No series at all.
    #[error("dataset has no series")]
    NoSeries,

    /// Every series has zero points.
    #[error("every series is empty")]
    NoPoints,

    /// Series are not aligned by index.
    #[error("series '{series}' has {found} points, expected {expected}")]
    LengthMismatch {
        series: String,
        expected: usize,
        found: usize,
    },

    /// Points exist but none carries a value.
    #[error("every value is null")]
    AllNull,
}
