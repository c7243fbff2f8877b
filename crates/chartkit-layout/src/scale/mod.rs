//! Linear and band scales, nice domains and tick sets.

mod band;
mod builder;
mod linear;
mod nice;
mod ticks;

pub use band::BandScale;
pub use builder::{ScaleBuilder, ValueAxis};
pub use linear::LinearScale;
pub use nice::{
    max_tick_count, nice_domain, nice_step, next_nice_step, NiceDomain, MAX_TICK_COUNT,
    MIN_TICK_SPACING,
};
pub use ticks::{Tick, TickSet};

use serde::{Deserialize, Serialize};

/// Direction in which an axis runs on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}
