//! Pointer event queue for platform integrations.
//!
//! Hosts enqueue translated native events as they arrive and drain the queue
//! once per frame, before the frame clock runs, so gesture handling observes
//! samples in arrival order.

use smallvec::SmallVec;

use crate::pointer::PointerEvent;

#[derive(Default)]
pub struct PointerDispatcher {
    queue: SmallVec<[PointerEvent; 8]>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Hands every queued event to `handler` in arrival order.
    pub fn drain<F>(&mut self, mut handler: F)
    where
        F: FnMut(PointerEvent),
    {
        if !self.queue.is_empty() {
            log::trace!("dispatching {} pointer event(s)", self.queue.len());
        }
        for event in self.queue.drain(..) {
            handler(event);
        }
    }
}
