//! Time-driven interpolation for chart transitions.
//!
//! Every animated value is a pure function of elapsed time: callers keep the
//! clock, this module only answers "what is the value at `t`".

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// Default duration of bar/line transitions in seconds.
pub const BASE_ANIMATION_DURATION: f64 = 0.3;

/// Upper bound on the whole stagger trail in seconds.
pub const MAX_TRAIL_DURATION: f64 = 0.5;

/// Delay between neighbouring items when the trail is not capped.
pub const BASE_TRAIL_STEP: f64 = 0.05;

// =============================================================================
// Easing Functions
// =============================================================================

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
    /// Cubic ease out
    CubicOut,
    /// Back ease out (overshoots then returns)
    BackOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::BackOut => {
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                C1.mul_add((t - 1.0).powi(2), C3.mul_add((t - 1.0).powi(3), 1.0))
            }
        }
    }
}

// =============================================================================
// Interpolate Trait
// =============================================================================

/// Trait for types that can be interpolated.
pub trait Interpolate {
    /// Interpolate between two values.
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (to - from).mul_add(t, *from)
    }
}

impl Interpolate for f32 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (*to - *from).mul_add(t as Self, *from)
    }
}

impl Interpolate for Point {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            x: f32::interpolate(&from.x, &to.x, t),
            y: f32::interpolate(&from.y, &to.y, t),
        }
    }
}

impl Interpolate for Rect {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            x: f32::interpolate(&from.x, &to.x, t),
            y: f32::interpolate(&from.y, &to.y, t),
            width: f32::interpolate(&from.width, &to.width, t),
            height: f32::interpolate(&from.height, &to.height, t),
        }
    }
}

impl Interpolate for Color {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        from.lerp(to, t as f32)
    }
}

/// Element-wise interpolation; the shorter side is padded with its last
/// element so paths of different lengths can morph into each other.
impl<T: Interpolate + Clone> Interpolate for Vec<T> {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        let len = from.len().max(to.len());
        (0..len)
            .filter_map(|i| {
                let a = from.get(i).or_else(|| from.last())?;
                let b = to.get(i).or_else(|| to.last())?;
                Some(T::interpolate(a, b, t))
            })
            .collect()
    }
}

// =============================================================================
// Transition - start/end pair with delay
// =============================================================================

/// A single eased transition between two values.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T: Clone + Interpolate> {
    pub from: T,
    pub to: T,
    /// Duration in seconds
    pub duration: f64,
    /// Delay before the transition starts, in seconds
    pub delay: f64,
    pub easing: Easing,
}

impl<T: Clone + Interpolate> Transition<T> {
    /// Create a transition with the default duration and cubic ease-out.
    #[must_use]
    pub fn new(from: T, to: T) -> Self {
        Self {
            from,
            to,
            duration: BASE_ANIMATION_DURATION,
            delay: 0.0,
            easing: Easing::CubicOut,
        }
    }

    /// Set duration.
    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Set delay.
    #[must_use]
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Set easing.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Normalized progress at `elapsed` seconds.
    #[must_use]
    pub fn progress_at(&self, elapsed: f64) -> f64 {
        let local = elapsed - self.delay;
        if local <= 0.0 {
            0.0
        } else if self.duration <= 0.0 {
            1.0
        } else {
            (local / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Value at `elapsed` seconds since the transition was scheduled.
    #[must_use]
    pub fn value_at(&self, elapsed: f64) -> T {
        let t = self.easing.apply(self.progress_at(elapsed));
        T::interpolate(&self.from, &self.to, t)
    }

    /// Whether the transition has finished at `elapsed`.
    #[must_use]
    pub fn is_complete_at(&self, elapsed: f64) -> bool {
        elapsed >= self.delay + self.duration.max(0.0)
    }
}

// =============================================================================
// Keyframe - Keyframe Animation Support
// =============================================================================

/// A keyframe in an animation.
#[derive(Debug, Clone)]
pub struct Keyframe<T: Clone> {
    /// Time of this keyframe (0.0 to 1.0 normalized)
    pub time: f64,
    /// Value at this keyframe
    pub value: T,
    /// Easing to next keyframe
    pub easing: Easing,
}

impl<T: Clone> Keyframe<T> {
    /// Create new keyframe.
    #[must_use]
    pub fn new(time: f64, value: T) -> Self {
        Self {
            time: time.clamp(0.0, 1.0),
            value,
            easing: Easing::Linear,
        }
    }

    /// Set easing to next keyframe.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Keyframe animation track, optionally cyclic.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Clone + Interpolate> {
    /// Keyframes sorted by time
    keyframes: Vec<Keyframe<T>>,
    /// Total duration in seconds
    pub duration: f64,
    /// Whether to loop
    pub looping: bool,
}

impl<T: Clone + Interpolate> KeyframeTrack<T> {
    /// Create new keyframe track.
    #[must_use]
    pub fn new(duration: f64) -> Self {
        Self {
            keyframes: Vec::new(),
            duration,
            looping: false,
        }
    }

    /// Add a keyframe.
    pub fn add_keyframe(&mut self, keyframe: Keyframe<T>) {
        self.keyframes.push(keyframe);
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Builder form of [`Self::add_keyframe`].
    #[must_use]
    pub fn keyframe(mut self, keyframe: Keyframe<T>) -> Self {
        self.add_keyframe(keyframe);
        self
    }

    /// Set looping.
    #[must_use]
    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Value at `elapsed` seconds.
    #[must_use]
    pub fn value_at(&self, elapsed: f64) -> Option<T> {
        if self.keyframes.is_empty() {
            return None;
        }

        let t = if self.duration > 0.0 {
            let raw = elapsed / self.duration;
            if self.looping {
                raw.rem_euclid(1.0)
            } else {
                raw.clamp(0.0, 1.0)
            }
        } else {
            1.0
        };

        // Find surrounding keyframes
        let mut prev_idx = 0;
        let mut next_idx = 0;

        for (i, kf) in self.keyframes.iter().enumerate() {
            if kf.time <= t {
                prev_idx = i;
            }
            if kf.time >= t {
                next_idx = i;
                break;
            }
            next_idx = i;
        }

        let prev = &self.keyframes[prev_idx];
        let next = &self.keyframes[next_idx];

        if prev_idx == next_idx {
            return Some(prev.value.clone());
        }

        let segment_duration = next.time - prev.time;
        let segment_t = if segment_duration > 0.0 {
            (t - prev.time) / segment_duration
        } else {
            1.0
        };

        let eased_t = prev.easing.apply(segment_t);
        Some(T::interpolate(&prev.value, &next.value, eased_t))
    }

    /// Whether the track has finished at `elapsed`.
    #[must_use]
    pub fn is_complete_at(&self, elapsed: f64) -> bool {
        !self.looping && elapsed >= self.duration
    }
}

// =============================================================================
// Trails - staggered entrance delays
// =============================================================================

/// Delay between consecutive items of an entrance animation.
///
/// The whole trail never exceeds [`MAX_TRAIL_DURATION`], so long series
/// animate with a tighter stagger.
#[must_use]
pub fn animation_trail(count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    BASE_TRAIL_STEP.min(MAX_TRAIL_DURATION / count as f64)
}

/// Start delay for the item at `index` in a staggered entrance.
#[must_use]
pub fn stagger_delay(index: usize, count: usize) -> f64 {
    animation_trail(count) * index as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicOut,
            Easing::BackOut,
        ] {
            assert!(easing.apply(0.0).abs() < 0.001, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_easing_clamps_input() {
        assert!((Easing::Linear.apply(-0.5) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(1.5) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::BackOut.apply(f64::from(i) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_transition_respects_delay() {
        let tr = Transition::new(0.0f64, 100.0)
            .with_duration(1.0)
            .with_delay(0.5)
            .with_easing(Easing::Linear);
        assert_eq!(tr.value_at(0.25), 0.0);
        assert!((tr.value_at(1.0) - 50.0).abs() < 1e-9);
        assert_eq!(tr.value_at(2.0), 100.0);
        assert!(!tr.is_complete_at(1.0));
        assert!(tr.is_complete_at(1.5));
    }

    #[test]
    fn test_transition_zero_duration_jumps() {
        let tr = Transition::new(1.0f32, 2.0).with_duration(0.0);
        assert_eq!(tr.value_at(0.001), 2.0);
        assert_eq!(tr.value_at(0.0), 1.0);
    }

    #[test]
    fn test_transition_rect() {
        let tr = Transition::new(
            Rect::new(0.0, 100.0, 10.0, 0.0),
            Rect::new(0.0, 20.0, 10.0, 80.0),
        )
        .with_duration(1.0)
        .with_easing(Easing::Linear);
        let mid = tr.value_at(0.5);
        assert!((mid.y - 60.0).abs() < 1e-4);
        assert!((mid.height - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_vec_interpolation_pads_shorter_side() {
        let from = vec![Point::new(0.0, 0.0)];
        let to = vec![Point::new(10.0, 0.0), Point::new(20.0, 0.0)];
        let mid = Vec::<Point>::interpolate(&from, &to, 0.5);
        assert_eq!(mid.len(), 2);
        assert_eq!(mid[0], Point::new(5.0, 0.0));
        assert_eq!(mid[1], Point::new(10.0, 0.0));
    }

    #[test]
    fn test_keyframe_track_linear() {
        let track = KeyframeTrack::new(2.0)
            .keyframe(Keyframe::new(0.0, 0.0f64))
            .keyframe(Keyframe::new(1.0, 10.0));
        assert_eq!(track.value_at(0.0), Some(0.0));
        assert!((track.value_at(1.0).unwrap() - 5.0).abs() < 1e-9);
        assert_eq!(track.value_at(5.0), Some(10.0));
        assert!(track.is_complete_at(2.0));
    }

    #[test]
    fn test_keyframe_track_loops() {
        let track = KeyframeTrack::new(1.0)
            .keyframe(Keyframe::new(0.0, 0.0f64))
            .keyframe(Keyframe::new(1.0, 10.0))
            .with_loop(true);
        let a = track.value_at(0.25).unwrap();
        let b = track.value_at(1.25).unwrap();
        assert!((a - b).abs() < 1e-9);
        assert!(!track.is_complete_at(100.0));
    }

    #[test]
    fn test_keyframe_track_empty() {
        let track: KeyframeTrack<f64> = KeyframeTrack::new(1.0);
        assert_eq!(track.value_at(0.5), None);
    }

    #[test]
    fn test_animation_trail_caps_total() {
        assert_eq!(animation_trail(0), 0.0);
        assert!((animation_trail(4) - BASE_TRAIL_STEP).abs() < 1e-12);
        let long = animation_trail(100);
        assert!(long * 100.0 <= MAX_TRAIL_DURATION + 1e-9);
        assert!((stagger_delay(3, 4) - 0.15).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_transition_monotonic_for_monotonic_easing(a in 0.0f64..1.0, b in 0.0f64..1.0) {
            let tr = Transition::new(0.0f64, 1.0).with_duration(1.0);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(tr.value_at(lo) <= tr.value_at(hi) + 1e-12);
        }

        #[test]
        fn prop_keyframe_value_within_bounds(t in 0.0f64..3.0) {
            let track = KeyframeTrack::new(2.0)
                .keyframe(Keyframe::new(0.0, -5.0f64))
                .keyframe(Keyframe::new(0.5, 5.0).with_easing(Easing::EaseInOut))
                .keyframe(Keyframe::new(1.0, 0.0));
            let v = track.value_at(t).unwrap();
            prop_assert!((-5.0..=5.0).contains(&v));
        }
    }
}
