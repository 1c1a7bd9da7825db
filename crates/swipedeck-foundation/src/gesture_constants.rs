//! Shared gesture thresholds.
//!
//! Values are in logical pixels. They match common platform touch-handling
//! conventions so that the same trace classifies the same way it would on a
//! phone: Android uses ~8dp of touch slop and an 8000dp/s fling ceiling.

/// Movement below this distance between press and release is a tap, not a
/// drag.
pub const TAP_SLOP: f32 = 8.0;

/// Release velocities below this (in px/sec) never start a fling; the drag
/// goes straight to the threshold decision.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Ceiling for tracked release velocities in px/sec.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
