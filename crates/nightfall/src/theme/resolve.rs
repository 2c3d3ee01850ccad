//! Effective theme resolution.

use super::mode::{EffectiveTheme, Theme};
use super::scheme::SchemeQuery;

/// Turns a requested [`Theme`] into a concrete [`EffectiveTheme`].
///
/// Concrete requests pass through untouched. [`Theme::System`] is resolved by
/// asking the [`SchemeQuery`] at call time, so the result only depends on the
/// request and the capability's current answer.
#[derive(Clone, Copy)]
pub struct ThemeResolver<'a> {
    scheme: &'a dyn SchemeQuery,
}

impl std::fmt::Debug for ThemeResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeResolver").finish_non_exhaustive()
    }
}

impl<'a> ThemeResolver<'a> {
    pub fn new(scheme: &'a dyn SchemeQuery) -> Self {
        Self { scheme }
    }

    pub fn resolve_effective(&self, requested: Theme) -> EffectiveTheme {
        match requested.concrete() {
            Some(theme) => theme,
            None => {
                let effective = EffectiveTheme::from_prefers_dark(self.scheme.prefers_dark());
                tracing::debug!(%effective, "resolved system theme preference");
                effective
            }
        }
    }
}
