//! Value interpolation for time-based effects.
//!
//! A [`Tween`] is pure arithmetic: sample it with an elapsed duration and
//! apply the value to a control. Driving the samples is the tick
//! scheduler's job - schedule a repeating task, sample, and cancel the task
//! when [`Tween::is_finished`] reports done. That keeps every animation
//! step on the GUI thread, ordered with layout and render like any other
//! per-tick work.

use std::time::Duration;

/// Easing curves for tween interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Accelerate from rest.
    QuadIn,
    /// Decelerate to rest.
    QuadOut,
    /// Accelerate, then decelerate.
    QuadInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` through the curve.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => t * (2.0 - t),
            Self::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// An interpolation from one value to another over a duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Start value.
    pub from: f32,
    /// End value.
    pub to: f32,
    /// Total duration.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

impl Tween {
    /// Create a linear tween.
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            easing: Easing::Linear,
        }
    }

    /// Set the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sample the tween `elapsed` into its run. Clamps at the end value.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Whether the tween has run its full duration.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_midpoint() {
        let tween = Tween::new(0.0, 100.0, Duration::from_secs(2));
        assert_eq!(tween.value_at(Duration::ZERO), 0.0);
        assert_eq!(tween.value_at(Duration::from_secs(1)), 50.0);
        assert_eq!(tween.value_at(Duration::from_secs(2)), 100.0);
        // Clamped past the end.
        assert_eq!(tween.value_at(Duration::from_secs(5)), 100.0);
    }

    #[test]
    fn zero_duration_jumps_to_end() {
        let tween = Tween::new(3.0, 7.0, Duration::ZERO);
        assert_eq!(tween.value_at(Duration::ZERO), 7.0);
        assert!(tween.is_finished(Duration::ZERO));
    }

    #[test]
    fn quad_out_decelerates() {
        let tween =
            Tween::new(0.0, 1.0, Duration::from_secs(1)).with_easing(Easing::QuadOut);
        // More than half the distance covered at the halfway point.
        assert!(tween.value_at(Duration::from_millis(500)) > 0.5);
    }

    #[test]
    fn easing_endpoints_are_exact() {
        for easing in [Easing::Linear, Easing::QuadIn, Easing::QuadOut, Easing::QuadInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }
}
