//! Tunables for the swipe interaction.

use swipedeck_foundation::gesture_constants;

/// Friction for the post-release fling.
pub const FLING_FRICTION: f32 = 0.85;

/// Fraction of the available travel (width plus overshoot margin) beyond
/// which a release dismisses the card.
pub const THRESHOLD_FRACTION: f32 = 0.90;

/// Duration of the settle-back-to-rest animation, in milliseconds.
pub const SETTLE_DURATION_MILLIS: u64 = 250;

/// Duration of the fly-off-screen animation, in milliseconds.
pub const DISMISS_DURATION_MILLIS: u64 = 200;

/// Extra travel past the widget edge counted into the dismiss threshold.
pub const OVERSHOOT_MARGIN: f32 = 300.0;

/// How far past the widget edge a fling may coast before the clamp stops it.
/// Deliberately generous: the threshold check, not the clamp, decides the
/// outcome.
pub const FLING_CLAMP_SLACK: f32 = 5_000.0;

/// Which edge a swipe must reach to dismiss the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissDirection {
    Left,
    Right,
    /// Either edge dismisses; the gesture's own direction picks the exit side.
    Either,
}

/// Configuration for a [`SwipeCard`](crate::SwipeCard).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    pub dismiss_direction: DismissDirection,
    pub fling_friction: f32,
    pub threshold_fraction: f32,
    pub settle_duration_millis: u64,
    pub dismiss_duration_millis: u64,
    pub overshoot_margin: f32,
    /// Release velocities below this never fling, in px/sec.
    pub min_fling_velocity: f32,
    /// Cap applied to tracked release velocities, in px/sec.
    pub max_fling_velocity: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            dismiss_direction: DismissDirection::Left,
            fling_friction: FLING_FRICTION,
            threshold_fraction: THRESHOLD_FRACTION,
            settle_duration_millis: SETTLE_DURATION_MILLIS,
            dismiss_duration_millis: DISMISS_DURATION_MILLIS,
            overshoot_margin: OVERSHOOT_MARGIN,
            min_fling_velocity: gesture_constants::MIN_FLING_VELOCITY,
            max_fling_velocity: gesture_constants::MAX_FLING_VELOCITY,
        }
    }
}

impl SwipeConfig {
    pub fn with_dismiss_direction(mut self, direction: DismissDirection) -> Self {
        self.dismiss_direction = direction;
        self
    }

    pub fn with_fling_friction(mut self, friction: f32) -> Self {
        self.fling_friction = friction;
        self
    }

    pub fn with_threshold_fraction(mut self, fraction: f32) -> Self {
        self.threshold_fraction = fraction;
        self
    }

    pub fn with_settle_duration(mut self, millis: u64) -> Self {
        self.settle_duration_millis = millis;
        self
    }

    pub fn with_dismiss_duration(mut self, millis: u64) -> Self {
        self.dismiss_duration_millis = millis;
        self
    }

    pub fn with_overshoot_margin(mut self, margin: f32) -> Self {
        self.overshoot_margin = margin;
        self
    }
}
