//! Theme preference values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user-facing theme preference.
///
/// [`Theme::System`] is a request to follow the OS color scheme; it is never
/// the result of resolution. See [`EffectiveTheme`] for resolved values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    System,
}

/// A resolved theme: always `dark` or `light`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveTheme {
    Dark,
    Light,
}

/// Returned when a string is not one of `dark`, `light` or `system`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown theme '{}' (expected dark, light or system)",
            self.0
        )
    }
}

impl std::error::Error for UnknownTheme {}

impl Theme {
    /// Every accepted preference value.
    pub const ALL: [Theme; 3] = [Theme::Dark, Theme::Light, Theme::System];

    /// The stored string form of this value.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::System => "system",
        }
    }

    /// Returns the concrete theme, or `None` for [`Theme::System`].
    pub fn concrete(self) -> Option<EffectiveTheme> {
        match self {
            Theme::Dark => Some(EffectiveTheme::Dark),
            Theme::Light => Some(EffectiveTheme::Light),
            Theme::System => None,
        }
    }

    /// True for `dark` and `light`.
    pub fn is_concrete(self) -> bool {
        self.concrete().is_some()
    }
}

impl EffectiveTheme {
    /// The stored string form of this value.
    pub fn as_str(self) -> &'static str {
        match self {
            EffectiveTheme::Dark => "dark",
            EffectiveTheme::Light => "light",
        }
    }

    /// The other theme.
    pub fn opposite(self) -> Self {
        match self {
            EffectiveTheme::Dark => EffectiveTheme::Light,
            EffectiveTheme::Light => EffectiveTheme::Dark,
        }
    }

    /// Maps a "dark is preferred" answer to a theme.
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            EffectiveTheme::Dark
        } else {
            EffectiveTheme::Light
        }
    }
}

impl From<EffectiveTheme> for Theme {
    fn from(theme: EffectiveTheme) -> Self {
        match theme {
            EffectiveTheme::Dark => Theme::Dark,
            EffectiveTheme::Light => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    /// Parses exactly `dark`, `light` or `system`. Stored values are compared
    /// verbatim, so `Dark` or ` dark` are not themes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            "system" => Ok(Theme::System),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

impl FromStr for EffectiveTheme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::from_str(s)?
            .concrete()
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EffectiveTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_exact() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("system".parse::<Theme>().unwrap(), Theme::System);
        assert!("Dark".parse::<Theme>().is_err());
        assert!(" light".parse::<Theme>().is_err());
        assert!("".parse::<Theme>().is_err());
    }

    #[test]
    fn test_effective_rejects_system() {
        assert!("system".parse::<EffectiveTheme>().is_err());
        assert_eq!(
            "light".parse::<EffectiveTheme>().unwrap(),
            EffectiveTheme::Light
        );
    }

    #[test]
    fn test_opposite() {
        assert_eq!(EffectiveTheme::Light.opposite(), EffectiveTheme::Dark);
        assert_eq!(EffectiveTheme::Dark.opposite(), EffectiveTheme::Light);
    }

    #[test]
    fn test_concrete() {
        assert_eq!(Theme::Dark.concrete(), Some(EffectiveTheme::Dark));
        assert_eq!(Theme::System.concrete(), None);
        assert!(!Theme::System.is_concrete());
    }

    #[test]
    fn test_display_matches_stored_form() {
        for theme in Theme::ALL {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&EffectiveTheme::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
    }
}
