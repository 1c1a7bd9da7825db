//! The swipeable card widget.
//!
//! [`SwipeCard`] turns a pointer-event stream into a drag-progress value,
//! decides on release between settling back to rest and dismissing
//! off-screen, and carries release velocity forward as a frictional fling.
//! It is headless: hosts feed it [`swipedeck_foundation::PointerEvent`]s,
//! drive its [`swipedeck_core::FrameClock`], and render whatever
//! [`CardTransform`] it reports.

mod card;
pub mod config;
mod transform;

pub use card::SwipeCard;
pub use config::{DismissDirection, SwipeConfig};
pub use transform::{project_transform, CardTransform, SwipeMode};
