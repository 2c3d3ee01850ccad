use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::apply::{ApplyReport, ThemeApplier};
use crate::config::EngineConfig;
use crate::dom::Document;
use crate::error::StorageError;
use crate::store::PreferenceStore;
use crate::theme::{EffectiveTheme, SchemeQuery, Theme, ThemeResolver};

use super::cell::ThemeCell;
use super::events::{Subscription, ThemeEvents, THEME_CHANGED_EVENT};

struct Session {
    config: EngineConfig,
    store: RefCell<PreferenceStore>,
    document: RefCell<Document>,
    scheme: Box<dyn SchemeQuery>,
    cell: ThemeCell,
    events: ThemeEvents,
}

/// One page session: the document, its preference store, the shared theme
/// cell and the change channel.
///
/// Cloning the context is cheap and every clone refers to the same session,
/// so each independently mounted control can hold its own handle. All store
/// and document mutations go through the engine, which keeps sanitization and
/// the singleton override element intact no matter which control acts.
#[derive(Clone)]
pub struct ThemeContext {
    session: Rc<Session>,
}

impl ThemeContext {
    /// Creates the session. The theme cell is seeded from the store as it is
    /// now; call [`apply`](Self::apply) to run the load-time pipeline.
    pub fn new(
        config: EngineConfig,
        store: PreferenceStore,
        document: Document,
        scheme: impl SchemeQuery + 'static,
    ) -> Self {
        let initial = store.read();
        Self {
            session: Rc::new(Session {
                config,
                store: RefCell::new(store),
                document: RefCell::new(document),
                scheme: Box::new(scheme),
                cell: ThemeCell::new(initial),
                events: ThemeEvents::new(),
            }),
        }
    }

    /// Runs the [`ThemeApplier`] pipeline on this session's store and document,
    /// then moves the theme cell to the resolved theme.
    pub fn apply(&self) -> ApplyReport {
        let session = &self.session;
        let report = {
            let mut store = session.store.borrow_mut();
            let mut document = session.document.borrow_mut();
            ThemeApplier::new(&session.config).run(&mut store, &mut document, &*session.scheme)
        };
        session.cell.set(report.effective.into());
        report
    }

    /// Mounts a toggle control, correcting a non-concrete cell value once.
    pub fn mount(&self) -> ToggleBridge {
        let bridge = ToggleBridge {
            context: self.clone(),
        };
        bridge.correct_on_mount();
        bridge
    }

    pub fn config(&self) -> &EngineConfig {
        &self.session.config
    }

    pub fn cell(&self) -> &ThemeCell {
        &self.session.cell
    }

    pub fn events(&self) -> &ThemeEvents {
        &self.session.events
    }

    /// Borrows the document. Do not hold the borrow across a toggle.
    pub fn document(&self) -> Ref<'_, Document> {
        self.session.document.borrow()
    }

    /// The raw stored preference.
    pub fn stored_preference(&self) -> Option<String> {
        self.session.store.borrow().raw()
    }

    /// Persists the store through its backend.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.session.store.borrow_mut().flush()
    }

    fn resolve(&self, theme: Theme) -> EffectiveTheme {
        ThemeResolver::new(&*self.session.scheme).resolve_effective(theme)
    }
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("config", &self.session.config)
            .field("cell", &self.session.cell)
            .field("events", &self.session.events)
            .finish_non_exhaustive()
    }
}

/// A mounted toggle control's handle on the session.
///
/// The control reads [`theme`](Self::theme) to pick its visual variant and
/// calls [`toggle`](Self::toggle) when activated.
#[derive(Debug, Clone)]
pub struct ToggleBridge {
    context: ThemeContext,
}

impl ToggleBridge {
    fn correct_on_mount(&self) {
        let session = &self.context.session;
        let current = session.cell.get();
        if current.is_concrete() {
            return;
        }

        let effective = self.context.resolve(current);
        session
            .document
            .borrow_mut()
            .mark(&session.config.attribute, effective.as_str());
        session.store.borrow_mut().write(effective);
        session.cell.set(effective.into());
        tracing::debug!(%effective, "corrected unresolved theme on mount");
    }

    /// The shared cell's value.
    pub fn theme(&self) -> Theme {
        self.context.session.cell.get()
    }

    /// The cell's value, resolved if it is not concrete.
    pub fn effective(&self) -> EffectiveTheme {
        let current = self.theme();
        current
            .concrete()
            .unwrap_or_else(|| self.context.resolve(current))
    }

    /// Switches to the opposite theme.
    ///
    /// Marks root and body, persists the new value, updates the shared cell
    /// and broadcasts one change notification, in that order, so listeners
    /// observe a consistent page.
    pub fn toggle(&self) -> EffectiveTheme {
        let session = &self.context.session;
        let next = self.effective().opposite();

        session
            .document
            .borrow_mut()
            .mark(&session.config.attribute, next.as_str());
        session.store.borrow_mut().write(next);
        session.cell.set(next.into());

        tracing::debug!(event = THEME_CHANGED_EVENT, theme = %next, "theme toggled");
        session.events.emit();
        next
    }

    /// Watches the shared cell directly.
    pub fn watch(&self, watcher: impl Fn() + 'static) -> Subscription {
        self.context.session.cell.watch(watcher)
    }

    pub fn context(&self) -> &ThemeContext {
        &self.context
    }
}
