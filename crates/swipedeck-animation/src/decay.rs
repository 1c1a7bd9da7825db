//! Frictional decay for fling motion.
//!
//! Models the platform fling: a drag force proportional to velocity, so the
//! velocity decays exponentially after the pointer lifts. With friction `f`
//! the deceleration is `-4.2·f·v`, giving
//!
//! ```text
//! v(t) = v0 · e^(−4.2·f·t)
//! x(t) = x0 + v0/(4.2·f) · (1 − e^(−4.2·f·t))
//! ```
//!
//! The fling is finished when the remaining velocity would move the value
//! less than a visible amount per frame.

use crate::{NANOS_PER_MILLI, NANOS_PER_SECOND};

/// Drag-force rate applied per unit of friction, in 1/seconds.
const DRAG_RATE: f32 = 4.2;

/// Velocity below which motion is no longer visible: three quarters of a
/// pixel per 16 ms frame, in px/sec.
const VELOCITY_THRESHOLD: f32 = 62.5 * 0.75;

/// Friction spec for an exponential-decay fling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionDecaySpec {
    friction: f32,
}

impl FrictionDecaySpec {
    pub fn new(friction: f32) -> Self {
        Self {
            friction: friction.max(f32::EPSILON),
        }
    }

    fn rate(&self) -> f32 {
        DRAG_RATE * self.friction
    }

    pub fn abs_velocity_threshold(&self) -> f32 {
        VELOCITY_THRESHOLD
    }

    pub fn value_from_nanos(
        &self,
        play_time_nanos: u64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let t = play_time_nanos as f32 / NANOS_PER_SECOND;
        let k = self.rate();
        initial_value + initial_velocity / k * (1.0 - (-k * t).exp())
    }

    pub fn velocity_from_nanos(&self, play_time_nanos: u64, initial_velocity: f32) -> f32 {
        let t = play_time_nanos as f32 / NANOS_PER_SECOND;
        initial_velocity * (-self.rate() * t).exp()
    }

    /// Where the fling would coast to with no bounds.
    pub fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        initial_value + initial_velocity / self.rate()
    }

    /// Time until the velocity falls under the visibility threshold.
    pub fn duration_nanos(&self, initial_velocity: f32) -> u64 {
        let threshold = self.abs_velocity_threshold();
        if initial_velocity.abs() <= threshold {
            return 0;
        }
        let seconds = (initial_velocity.abs() / threshold).ln() / self.rate();
        (seconds * 1000.0) as u64 * NANOS_PER_MILLI
    }
}

/// A fling instance seeded with a start value and release velocity.
///
/// Bounds are a safety rail, not the decision mechanism: callers set them
/// generously past the interesting range so the threshold logic downstream
/// decides the outcome. Hitting a bound ends the fling early.
#[derive(Debug, Clone, Copy)]
pub struct Decay {
    spec: FrictionDecaySpec,
    initial_value: f32,
    initial_velocity: f32,
    min_value: f32,
    max_value: f32,
}

impl Decay {
    pub fn new(spec: FrictionDecaySpec, initial_value: f32, initial_velocity: f32) -> Self {
        Self {
            spec,
            initial_value,
            initial_velocity,
            min_value: f32::NEG_INFINITY,
            max_value: f32::INFINITY,
        }
    }

    pub fn with_bounds(mut self, min_value: f32, max_value: f32) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    pub fn value_at(&self, play_time_nanos: u64) -> f32 {
        self.unbounded_value_at(play_time_nanos)
            .clamp(self.min_value, self.max_value)
    }

    pub fn is_finished(&self, play_time_nanos: u64) -> bool {
        if play_time_nanos >= self.spec.duration_nanos(self.initial_velocity) {
            return true;
        }
        let raw = self.unbounded_value_at(play_time_nanos);
        raw < self.min_value || raw > self.max_value
    }

    /// The value the fling ends on, bounds applied.
    pub fn final_value(&self) -> f32 {
        let target = self
            .spec
            .target_value(self.initial_value, self.initial_velocity);
        target.clamp(self.min_value, self.max_value)
    }

    fn unbounded_value_at(&self, play_time_nanos: u64) -> f32 {
        self.spec
            .value_from_nanos(play_time_nanos, self.initial_value, self.initial_velocity)
    }
}

#[cfg(test)]
#[path = "tests/decay_tests.rs"]
mod tests;
