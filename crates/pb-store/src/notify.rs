//! Push-style change notification.
//!
//! A [`Notifier`] keeps a list of callbacks; each [`Subscription`] removes
//! its callback when dropped. Everything runs on one thread, so the
//! registry is `Rc<RefCell<..>>`. The registry is not borrowed while
//! callbacks run: a callback may subscribe (the newcomer hears the next
//! notification) or drop a subscription (it is not called again).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Box<dyn FnMut(&T)>;

struct Slots<T: ?Sized> {
    next: u64,
    callbacks: Vec<(u64, Callback<T>)>,
    /// Nesting level of `notify` calls in progress.
    depth: usize,
    /// Ids cancelled while their callbacks were checked out for dispatch.
    cancelled: Vec<u64>,
}

pub struct Notifier<T: ?Sized> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: ?Sized + 'static> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> Notifier<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next: 0,
                callbacks: Vec::new(),
                depth: 0,
                cancelled: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, callback: Callback<T>) -> Subscription {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next;
            slots.next += 1;
            slots.callbacks.push((id, callback));
            id
        };
        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade()
                    && let Ok(mut slots) = slots.try_borrow_mut()
                {
                    if slots.depth > 0 {
                        slots.cancelled.push(id);
                    }
                    slots.callbacks.retain(|(cid, _)| *cid != id);
                }
            })),
        }
    }

    /// Call every live callback with `value`.
    pub fn notify(&self, value: &T) {
        let mut active = {
            let mut slots = self.slots.borrow_mut();
            slots.depth += 1;
            std::mem::take(&mut slots.callbacks)
        };
        for (id, callback) in active.iter_mut() {
            if self.slots.borrow().cancelled.contains(id) {
                continue;
            }
            callback(value);
        }
        let mut slots = self.slots.borrow_mut();
        slots.depth -= 1;
        active.append(&mut slots.callbacks);
        let cancelled = if slots.depth == 0 {
            std::mem::take(&mut slots.cancelled)
        } else {
            slots.cancelled.clone()
        };
        active.retain(|(id, _)| !cancelled.contains(id));
        slots.callbacks = active;
    }

    /// Registered callbacks. Undercounts while a notification is running.
    pub fn len(&self) -> usize {
        self.slots.borrow().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for a registered callback. Dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// A subscription that was never registered, for backends without
    /// push notifications.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    pub fn is_noop(&self) -> bool {
        self.cancel.is_none()
    }

    /// Keep the callback registered for the notifier's whole lifetime.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
