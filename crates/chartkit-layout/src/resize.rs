//! Cooperative resize debouncing.

use chartkit_core::Size;

/// Default quiet period before a requested size is applied.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 10;

/// A size waiting for its quiet period to pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingResize {
    pub size: Size,
    /// Timestamp of the latest request
    pub requested_at: u64,
}

/// Keeps the last requested size and releases it once the caller's clock has
/// passed `requested_at + delay`.
///
/// Every request restarts the quiet period, so a burst of resizes yields a
/// single release carrying the final size.
#[derive(Debug, Clone, Default)]
pub struct ResizeDebouncer {
    delay_ms: u32,
    pending: Option<PendingResize>,
}

impl ResizeDebouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default().with_debounce(DEFAULT_RESIZE_DEBOUNCE_MS)
    }

    /// Set debounce delay in milliseconds.
    #[must_use]
    pub const fn with_debounce(mut self, ms: u32) -> Self {
        self.delay_ms = ms;
        self
    }

    #[must_use]
    pub const fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    #[must_use]
    pub const fn pending(&self) -> Option<PendingResize> {
        self.pending
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a requested size; replaces any earlier pending request.
    pub fn request(&mut self, size: Size, now_ms: u64) {
        self.pending = Some(PendingResize {
            size,
            requested_at: now_ms,
        });
    }

    /// Size to apply, once the quiet period has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<Size> {
        let pending = self.pending?;
        let due = pending.requested_at.saturating_add(u64::from(self.delay_ms));
        if now_ms < due {
            return None;
        }
        self.pending = None;
        log::trace!("resize to {}x{} released", pending.size.width, pending.size.height);
        Some(pending.size)
    }

    /// Drop any pending request.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
