//! Animation math for Swipedeck.
//!
//! Pure value-over-time specs: each animation is a plain struct whose
//! `value_at(play_time_nanos)` can be stepped from any scheduling primitive
//! (frame clock, timer, test loop). Nothing in this crate touches a clock.

mod decay;
mod easing;
mod tween;

pub use decay::{Decay, FrictionDecaySpec};
pub use easing::Easing;
pub use tween::{Tween, TweenSpec};

pub(crate) const NANOS_PER_MILLI: u64 = 1_000_000;
pub(crate) const NANOS_PER_SECOND: f32 = 1_000_000_000.0;
