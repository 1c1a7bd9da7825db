//! Push-style notification channels.
//!
//! [`Subject`] is the widget-facing half of an observer pair: components emit
//! values into it, hosts subscribe closures to it. Subscriptions are removed
//! when their handle is dropped, keyed by id so multiple subscribers can
//! coexist.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

type ObserverId = u64;

struct SubjectInner<T> {
    next_id: Cell<ObserverId>,
    observers: RefCell<HashMap<ObserverId, Box<dyn Fn(&T)>>>,
}

/// A multicast channel for notification values.
///
/// Cloning the subject yields another handle to the same observer set.
pub struct Subject<T> {
    inner: Rc<SubjectInner<T>>,
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Subject<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SubjectInner {
                next_id: Cell::new(0),
                observers: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// Registers an observer; it stays subscribed for the lifetime of the
    /// returned handle.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription<T> {
        let id = self.inner.next_id.get().wrapping_add(1);
        self.inner.next_id.set(id);
        self.inner
            .observers
            .borrow_mut()
            .insert(id, Box::new(observer));
        Subscription {
            subject: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Delivers `value` to every current observer.
    ///
    /// Observers must not subscribe or unsubscribe from inside the callback;
    /// emission happens under the observer-map borrow.
    pub fn emit(&self, value: &T) {
        for observer in self.inner.observers.borrow().values() {
            observer(value);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Removes its observer from the subject when dropped.
pub struct Subscription<T> {
    subject: Weak<SubjectInner<T>>,
    id: ObserverId,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(subject) = self.subject.upgrade() {
            subject.observers.borrow_mut().remove(&self.id);
        }
    }
}
