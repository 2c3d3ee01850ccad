//! Listener registries and the theme-change channel.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Name of the theme-change notification, as it appears in logs.
pub const THEME_CHANGED_EVENT: &str = "theme-changed";

type Callback = Rc<dyn Fn()>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Callback)>,
}

/// A set of payload-less listeners.
///
/// Listeners are snapshotted before a notification runs, so a listener may
/// subscribe, unsubscribe or trigger another notification without tripping
/// the registry's borrow.
#[derive(Clone, Default)]
pub(crate) struct Listeners {
    registry: Rc<RefCell<Registry>>,
}

impl Listeners {
    pub(crate) fn add(&self, listener: impl Fn() + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(listener)));

        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    pub(crate) fn notify(&self) {
        let snapshot: Vec<Callback> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Handle to a registered listener.
///
/// Dropping the handle (or calling [`release`](Self::release)) unregisters the
/// listener. Use [`detach`](Self::detach) to keep it for the lifetime of the
/// channel.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Subscription {
    /// Unregisters the listener now.
    pub fn release(self) {}

    /// Keeps the listener registered without holding the handle.
    pub fn detach(mut self) {
        self.registry = Weak::new();
    }

    /// False once the channel itself is gone or the listener was detached.
    pub fn is_active(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let id = self.id;
            registry
                .borrow_mut()
                .listeners
                .retain(|(listener_id, _)| *listener_id != id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// The page-wide theme-change channel.
///
/// Every toggle broadcasts one payload-less notification here. Controls that
/// are mounted independently subscribe to stay in sync without referencing
/// each other; they read the new value from the shared
/// [`ThemeCell`](super::ThemeCell).
#[derive(Clone, Default)]
pub struct ThemeEvents {
    listeners: Listeners,
}

impl ThemeEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.listeners.add(listener)
    }

    /// Notifies every subscriber once.
    pub fn emit(&self) {
        tracing::trace!(
            event = THEME_CHANGED_EVENT,
            listeners = self.listeners.len(),
            "broadcasting"
        );
        self.listeners.notify();
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for ThemeEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeEvents")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
