//! Theme preferences and their resolution.
//!
//! A preference is one of `dark`, `light` or `system` ([`Theme`]). Everything
//! downstream of resolution works with [`EffectiveTheme`], which has no
//! `system` variant: once the engine has resolved a request, the answer is
//! always concrete.
//!
//! ## Resolution
//!
//! [`ThemeResolver`] passes concrete requests through and answers `system`
//! by asking a [`SchemeQuery`]. The OS-backed [`OsScheme`] uses the
//! `dark-light` crate; [`FixedScheme`] and plain closures are there for tests
//! and hosts that already know the answer.
//!
//! ```rust
//! use nightfall::{EffectiveTheme, FixedScheme, Theme, ThemeResolver};
//!
//! let os = FixedScheme::dark();
//! let resolver = ThemeResolver::new(&os);
//!
//! assert_eq!(resolver.resolve_effective(Theme::System), EffectiveTheme::Dark);
//! assert_eq!(resolver.resolve_effective(Theme::Light), EffectiveTheme::Light);
//! ```

mod mode;
mod resolve;
mod scheme;

pub use mode::{EffectiveTheme, Theme, UnknownTheme};
pub use resolve::ThemeResolver;
pub use scheme::{FixedScheme, OsScheme, SchemeQuery};
