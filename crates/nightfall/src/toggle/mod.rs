//! Shared toggle state across independently mounted controls.
//!
//! A page can mount any number of theme toggles (header, footer, mobile menu)
//! that know nothing about each other. They all hold a [`ThemeContext`]
//! handle to the same page session:
//!
//! - the [`ThemeCell`] holds the current theme and is what controls render
//!   from;
//! - [`ToggleBridge::toggle`] flips the theme, marks the document, persists
//!   the value and broadcasts on [`ThemeEvents`];
//! - controls subscribe to [`ThemeEvents`] with a [`Subscription`] they can
//!   release when unmounted.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use nightfall::{
//!     Document, EffectiveTheme, EngineConfig, FixedScheme, MemoryStorage, PreferenceStore,
//!     ThemeContext,
//! };
//!
//! let store = PreferenceStore::new("theme", MemoryStorage::with_entry("theme", "light"));
//! let ctx = ThemeContext::new(EngineConfig::default(), store, Document::new(), FixedScheme::light());
//! ctx.apply();
//!
//! let header = ctx.mount();
//! let footer = ctx.mount();
//!
//! let redraws = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&redraws);
//! let _sub = ctx.events().subscribe(move || counter.set(counter.get() + 1));
//!
//! assert_eq!(header.toggle(), EffectiveTheme::Dark);
//! assert_eq!(footer.effective(), EffectiveTheme::Dark);
//! assert_eq!(redraws.get(), 1);
//! ```

mod bridge;
mod cell;
mod events;

pub use bridge::{ThemeContext, ToggleBridge};
pub use cell::ThemeCell;
pub use events::{Subscription, ThemeEvents, THEME_CHANGED_EVENT};
