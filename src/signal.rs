//! Scroll signal and subscriptions.
//!
//! The page viewport publishes a [`ScrollEvent`] through a [`ScrollSignal`]
//! every time its vertical offset changes. Components that care about scroll
//! position subscribe with a callback and hold the returned [`Subscription`];
//! dropping the guard releases the listener.
//!
//! Everything here is single-threaded (`Rc`-based), matching the event loop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Top offset lookup for section anchors, in pixels.
///
/// Implemented by the page layout; tests can use a plain map.
pub trait AnchorLookup {
    /// Top offset of the anchor with this id, or `None` if the page has no
    /// such anchor.
    fn anchor_top(&self, id: &str) -> Option<u32>;
}

impl AnchorLookup for std::collections::HashMap<String, u32> {
    fn anchor_top(&self, id: &str) -> Option<u32> {
        self.get(id).copied()
    }
}

impl<const N: usize> AnchorLookup for [(&str, u32); N] {
    fn anchor_top(&self, id: &str) -> Option<u32> {
        self.iter()
            .find(|(anchor, _)| *anchor == id)
            .map(|(_, top)| *top)
    }
}

/// A snapshot delivered to scroll listeners.
///
/// Carries both the raw scroll offset and the layout at the moment of the
/// event, so listeners never look at stale geometry.
pub struct ScrollEvent<'a> {
    /// Vertical scroll offset of the page, in pixels.
    pub scroll_y: u32,
    /// Anchor geometry of the current layout.
    pub anchors: &'a dyn AnchorLookup,
}

impl std::fmt::Debug for ScrollEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollEvent")
            .field("scroll_y", &self.scroll_y)
            .finish_non_exhaustive()
    }
}

type Listener = Box<dyn FnMut(&ScrollEvent<'_>)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
    emitting: bool,
    released_while_emitting: Vec<u64>,
}

/// Publisher side of the scroll signal.
#[derive(Clone, Default)]
pub struct ScrollSignal {
    listeners: Rc<RefCell<Listeners>>,
}

impl std::fmt::Debug for ScrollSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSignal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ScrollSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the returned guard is
    /// dropped or [`Subscription::release`] is called.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe(&self, listener: impl FnMut(&ScrollEvent<'_>) + 'static) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));
        crate::perf::log_event("signal.subscribe", format!("id={id}"));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Deliver an event to every live listener, in subscription order.
    pub fn emit(&self, event: &ScrollEvent<'_>) {
        // Listeners run without the borrow held so they may subscribe or
        // release from inside the callback.
        let mut running = {
            let mut listeners = self.listeners.borrow_mut();
            if listeners.emitting {
                return;
            }
            listeners.emitting = true;
            std::mem::take(&mut listeners.entries)
        };

        for (id, listener) in &mut running {
            let released = self
                .listeners
                .borrow()
                .released_while_emitting
                .contains(id);
            if !released {
                listener(event);
            }
        }

        let mut listeners = self.listeners.borrow_mut();
        let released = std::mem::take(&mut listeners.released_while_emitting);
        let added = std::mem::take(&mut listeners.entries);
        running.extend(added);
        running.retain(|(id, _)| !released.contains(id));
        listeners.entries = running;
        listeners.emitting = false;
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Guard for a registered scroll listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// Unsubscribe now. Equivalent to dropping the guard.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        let mut listeners = listeners.borrow_mut();
        if listeners.emitting {
            listeners.released_while_emitting.push(self.id);
        } else {
            listeners.entries.retain(|(id, _)| *id != self.id);
        }
        crate::perf::log_event("signal.release", format!("id={}", self.id));
    }
}
