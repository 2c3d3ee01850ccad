//! Persistence of the theme preference.
//!
//! [`PreferenceStore`] owns one key in a [`Storage`] backend. Values outside
//! `dark`/`light`/`system` are treated as corrupt and deleted by
//! [`PreferenceStore::sanitize`]; reads collapse everything that is not a
//! concrete theme into [`Theme::System`](crate::Theme::System).
//!
//! ```rust
//! use nightfall::{EffectiveTheme, MemoryStorage, PreferenceStore, Storage, Theme};
//!
//! let storage = MemoryStorage::with_entry("theme", "sepia");
//! let mut store = PreferenceStore::new("theme", storage.clone());
//!
//! store.sanitize();
//! assert_eq!(storage.get("theme"), None);
//! assert_eq!(store.read(), Theme::System);
//!
//! store.write(EffectiveTheme::Dark);
//! assert_eq!(store.read(), Theme::Dark);
//! ```

mod backend;
mod preference;

pub use backend::{FileStorage, MemoryStorage, Storage};
pub use preference::PreferenceStore;
