//! One-shot frame callback scheduling.
//!
//! Animations register a callback for the next frame and re-register from
//! inside it while they are still running. The host drives the clock by
//! calling [`FrameClock::drain`] with a monotonic timestamp once per frame;
//! tests drive it with synthetic timestamps for deterministic playback.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64)>>,
}

#[derive(Default)]
struct FrameClockInner {
    next_id: Cell<FrameCallbackId>,
    callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
}

impl FrameClockInner {
    fn register(&self, callback: Box<dyn FnOnce(u64)>) -> FrameCallbackId {
        let id = self.next_id.get().wrapping_add(1);
        self.next_id.set(id);
        self.callbacks.borrow_mut().push_back(FrameCallbackEntry {
            id,
            callback: Some(callback),
        });
        id
    }

    fn cancel(&self, id: FrameCallbackId) {
        let mut callbacks = self.callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }

    fn drain(&self, frame_time_nanos: u64) {
        // Snapshot the pending list first: callbacks registered while we run
        // (an animation scheduling its next frame) belong to the next drain.
        let mut pending: Vec<Box<dyn FnOnce(u64)>> = Vec::new();
        {
            let mut callbacks = self.callbacks.borrow_mut();
            while let Some(mut entry) = callbacks.pop_front() {
                if let Some(callback) = entry.callback.take() {
                    pending.push(callback);
                }
            }
        }
        log::trace!(
            "frame clock drain at {}ns, {} callback(s)",
            frame_time_nanos,
            pending.len()
        );
        for callback in pending {
            callback(frame_time_nanos);
        }
    }
}

/// Shared handle to a frame callback queue.
///
/// Cloning the handle is cheap; all clones refer to the same queue.
#[derive(Clone, Default)]
pub struct FrameClock {
    inner: Rc<FrameClockInner>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a one-shot callback for the next frame.
    ///
    /// The callback receives the frame timestamp in nanoseconds. Dropping the
    /// returned registration cancels the callback; keep it alive for as long
    /// as the callback should stay scheduled.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.inner.register(Box::new(callback));
        FrameCallbackRegistration {
            clock: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Runs every callback that was pending when the call started.
    ///
    /// Timestamps are expected to be monotonic across calls; the clock does
    /// not reorder or validate them.
    pub fn drain(&self, frame_time_nanos: u64) {
        self.inner.drain(frame_time_nanos);
    }

    /// Returns `true` while any callback is waiting for the next frame.
    pub fn has_pending(&self) -> bool {
        !self.inner.callbacks.borrow().is_empty()
    }
}

/// Keeps a frame callback scheduled; cancels it on drop.
pub struct FrameCallbackRegistration {
    clock: Weak<FrameClockInner>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn cancel(mut self) {
        self.cancel_inner();
    }

    fn cancel_inner(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(clock) = self.clock.upgrade() {
                clock.cancel(id);
            }
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.cancel_inner();
    }
}

#[cfg(test)]
#[path = "tests/frame_clock_tests.rs"]
mod tests;
