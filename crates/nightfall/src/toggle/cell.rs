use std::cell::Cell;
use std::fmt;

use crate::theme::Theme;

use super::events::{Listeners, Subscription};

/// Reactive cell holding the page's current theme.
///
/// Watchers run synchronously after a change. Setting the value it already
/// holds notifies no one.
pub struct ThemeCell {
    value: Cell<Theme>,
    watchers: Listeners,
}

impl ThemeCell {
    pub fn new(initial: Theme) -> Self {
        Self {
            value: Cell::new(initial),
            watchers: Listeners::default(),
        }
    }

    pub fn get(&self) -> Theme {
        self.value.get()
    }

    /// Stores `theme`, returning whether the value changed.
    pub fn set(&self, theme: Theme) -> bool {
        if self.value.replace(theme) == theme {
            return false;
        }
        self.watchers.notify();
        true
    }

    pub fn watch(&self, watcher: impl Fn() + 'static) -> Subscription {
        self.watchers.add(watcher)
    }
}

impl fmt::Debug for ThemeCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeCell")
            .field("value", &self.get())
            .field("watchers", &self.watchers.len())
            .finish()
    }
}
