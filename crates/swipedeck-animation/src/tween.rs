//! Fixed-duration interpolation between two values.

use crate::easing::Easing;
use crate::NANOS_PER_MILLI;

/// Duration and easing for a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenSpec {
    pub duration_millis: u64,
    pub easing: Easing,
}

impl TweenSpec {
    pub fn new(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::new(duration_millis, Easing::Linear)
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(300, Easing::FastOutSlowIn)
    }
}

/// A tween instance from `start` to `end`.
///
/// Stateless over time: `value_at` is a pure function of the play time, so a
/// driver can sample it from any scheduler without drift.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    start: f32,
    end: f32,
    spec: TweenSpec,
}

impl Tween {
    pub fn new(start: f32, end: f32, spec: TweenSpec) -> Self {
        Self { start, end, spec }
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn duration_nanos(&self) -> u64 {
        self.spec.duration_millis.max(1) * NANOS_PER_MILLI
    }

    pub fn value_at(&self, play_time_nanos: u64) -> f32 {
        if self.is_finished(play_time_nanos) {
            return self.end;
        }
        let linear = (play_time_nanos as f32 / self.duration_nanos() as f32).clamp(0.0, 1.0);
        let progress = self.spec.easing.transform(linear);
        self.start + (self.end - self.start) * progress
    }

    pub fn is_finished(&self, play_time_nanos: u64) -> bool {
        play_time_nanos >= self.duration_nanos()
    }
}
