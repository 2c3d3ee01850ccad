//! Convenient imports for embedding the engine.
//!
//! ```rust
//! use nightfall::prelude::*;
//! ```

pub use crate::config::EngineConfig;
pub use crate::dom::{Document, StyleSheet};
pub use crate::store::{MemoryStorage, PreferenceStore, Storage};
pub use crate::theme::{EffectiveTheme, FixedScheme, OsScheme, SchemeQuery, Theme};
pub use crate::toggle::{Subscription, ThemeContext, ToggleBridge};
