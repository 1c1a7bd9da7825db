//! Release-velocity estimation from recent pointer samples.
//!
//! Implements the impulse strategy: velocity is recovered from the kinetic
//! energy the gesture imparted across its recent samples, which is far more
//! robust against jittery touch hardware than a two-point difference.

/// How many samples the tracker remembers.
const WINDOW: usize = 20;

/// Samples older than this (relative to the newest one) are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between consecutive samples means the pointer stopped;
/// older samples no longer describe the release motion.
const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// 1-D velocity tracker over a ring buffer of timed positions.
#[derive(Clone)]
pub struct VelocityTracker1D {
    window: [Option<Sample>; WINDOW],
    head: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            window: [None; WINDOW],
            head: 0,
        }
    }

    /// Records a position sample at the given time in milliseconds.
    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.head = (self.head + 1) % WINDOW;
        self.window[self.head] = Some(Sample { time_ms, position });
    }

    /// Forgets all recorded samples.
    pub fn reset(&mut self) {
        self.window = [None; WINDOW];
        self.head = 0;
    }

    /// Estimates the current velocity in units/second.
    ///
    /// Returns 0.0 with fewer than two usable samples, or when the pointer
    /// has visibly stopped before release.
    pub fn velocity(&self) -> f32 {
        let newest = match self.window[self.head] {
            Some(sample) => sample,
            None => return 0.0,
        };

        // Walk backwards from the newest sample, keeping everything within
        // the horizon and without a stop-length gap. Times are stored as
        // negative ages so the newest sample sits at t = 0.
        let mut positions = [0.0f32; WINDOW];
        let mut times = [0.0f32; WINDOW];
        let mut count = 0;

        let mut index = self.head;
        let mut previous = newest;
        while let Some(sample) = self.window[index] {
            let age = newest.time_ms - sample.time_ms;
            let gap = previous.time_ms - sample.time_ms;
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }

            positions[count] = sample.position;
            times[count] = -(age as f32);
            count += 1;
            if count == WINDOW {
                break;
            }

            previous = sample;
            index = if index == 0 { WINDOW - 1 } else { index - 1 };
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Like [`velocity`](Self::velocity), clamped to `±max_velocity`.
    pub fn velocity_capped(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }
}

/// Impulse velocity over samples ordered newest first, times in ms (≤ 0).
///
/// Accumulates the work each segment contributes and converts the total
/// kinetic energy back into a signed velocity (in units/ms).
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let count = positions.len();
    if count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    for i in (1..count).rev() {
        // Segment from sample i (older) to sample i - 1 (newer).
        if times[i] == times[i - 1] {
            continue;
        }
        let v_prev = energy_to_velocity(work);
        let v_curr = (positions[i - 1] - positions[i]) / (times[i - 1] - times[i]);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == count - 1 {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// E = ½·m·v² with unit mass, keeping the sign of the motion.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
