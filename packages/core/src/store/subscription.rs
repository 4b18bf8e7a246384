//! Listener registry and RAII subscription handles.
//!
//! Listeners are called in registration order. A [`Subscription`] removes its
//! listener when dropped, so a view that goes away can never be called again.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use super::snapshot::Snapshot;

/// Callback invoked with every committed snapshot
pub type Listener = Rc<dyn Fn(&Snapshot)>;

/// Identifier of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered listeners, shared between the store and its subscription handles
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ListenerRegistry {
    fn insert(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    /// Copy of the current listeners.
    ///
    /// Notification iterates this copy so listeners may subscribe or
    /// unsubscribe while being notified.
    pub(crate) fn listeners(&self) -> Vec<Listener> {
        self.listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Register `listener` and return the handle that keeps it registered.
pub(crate) fn register(
    registry: &Rc<RefCell<ListenerRegistry>>,
    listener: Listener,
) -> Subscription {
    let id = registry.borrow_mut().insert(listener);
    tracing::debug!(?id, "Listener subscribed");
    Subscription {
        registry: Rc::downgrade(registry),
        id,
        active: true,
    }
}

/// Handle returned by `SessionStore::subscribe`.
///
/// The listener stays registered for as long as the handle lives.
#[must_use = "dropping a Subscription unsubscribes the listener immediately"]
pub struct Subscription {
    registry: Weak<RefCell<ListenerRegistry>>,
    id: SubscriptionId,
    active: bool,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Unsubscribe now instead of at drop.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        // The store may already be gone; nothing left to detach from then.
        if let Some(registry) = self.registry.upgrade() {
            let removed = registry.borrow_mut().remove(self.id);
            tracing::debug!(id = ?self.id, removed, "Listener unsubscribed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}
