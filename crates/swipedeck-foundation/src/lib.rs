//! Pointer input model and gesture support for Swipedeck.
//!
//! This crate stays platform-agnostic: hosts translate their native input
//! events into [`PointerEvent`] values and hand them to the widgets. The
//! velocity tracker recovers a release velocity for platforms that do not
//! provide their own fling classifier.

mod dispatcher;
pub mod gesture_constants;
mod pointer;
mod velocity_tracker;

pub use dispatcher::PointerDispatcher;
pub use pointer::{Point, PointerEvent, PointerEventKind};
pub use velocity_tracker::VelocityTracker1D;
