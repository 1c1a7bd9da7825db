//! Core runtime pieces for Swipedeck: a single-threaded frame clock and
//! lightweight observable subjects.
//!
//! Everything here assumes one UI-bound scheduling context. There is no
//! locking; interior mutability goes through `Rc`/`RefCell` and correctness
//! relies on the callers' cancel-before-start discipline.

mod frame_clock;
mod subject;

pub use frame_clock::{FrameCallbackId, FrameCallbackRegistration, FrameClock};
pub use subject::{Subject, Subscription};
