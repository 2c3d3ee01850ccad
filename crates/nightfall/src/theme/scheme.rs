//! System color-scheme query capability.
//!
//! Resolution of [`Theme::System`](super::Theme::System) needs to know whether
//! the environment prefers a dark scheme. That question is asked through the
//! [`SchemeQuery`] trait so tests (and hosts with their own notion of "system")
//! can answer it without touching the OS.
//!
//! ```rust
//! use nightfall::{FixedScheme, SchemeQuery};
//!
//! assert!(FixedScheme::dark().prefers_dark());
//!
//! // Closures work too.
//! let query = || false;
//! assert!(!query.prefers_dark());
//! ```

use dark_light::Mode as OsMode;

/// Answers "does the environment currently prefer a dark color scheme?".
pub trait SchemeQuery {
    fn prefers_dark(&self) -> bool;
}

impl<F> SchemeQuery for F
where
    F: Fn() -> bool,
{
    fn prefers_dark(&self) -> bool {
        self()
    }
}

/// Queries the operating system through the `dark-light` crate.
///
/// Detection failures and an unspecified OS preference both read as light.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsScheme;

impl SchemeQuery for OsScheme {
    fn prefers_dark(&self) -> bool {
        match dark_light::detect() {
            Ok(OsMode::Dark) => true,
            Ok(OsMode::Light) | Ok(OsMode::Unspecified) => false,
            Err(err) => {
                tracing::debug!(error = %err, "os color scheme detection failed, assuming light");
                false
            }
        }
    }
}

/// A constant answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedScheme {
    dark: bool,
}

impl FixedScheme {
    pub fn new(prefers_dark: bool) -> Self {
        Self { dark: prefers_dark }
    }

    pub fn dark() -> Self {
        Self::new(true)
    }

    pub fn light() -> Self {
        Self::new(false)
    }
}

impl SchemeQuery for FixedScheme {
    fn prefers_dark(&self) -> bool {
        self.dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_fixed_scheme() {
        assert!(FixedScheme::dark().prefers_dark());
        assert!(!FixedScheme::light().prefers_dark());
    }

    #[test]
    fn test_closure_is_queried_each_time() {
        let calls = Cell::new(0);
        let query = || {
            calls.set(calls.get() + 1);
            true
        };
        assert!(query.prefers_dark());
        assert!(query.prefers_dark());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_boxed_query() {
        let boxed: Box<dyn SchemeQuery> = Box::new(FixedScheme::dark());
        assert!(boxed.prefers_dark());
    }
}
