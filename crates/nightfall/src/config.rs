//! Engine configuration.
//!
//! Every fixed name the engine relies on (the storage key, the marking
//! attribute, the singleton element id, the token marker, ...) lives in
//! [`EngineConfig`]. The defaults work for most sites; a YAML file can override
//! any subset of them:
//!
//! ```rust
//! use nightfall::EngineConfig;
//!
//! let config = EngineConfig::from_yaml(r#"
//! storage_key: site-theme
//! token_marker: "--brand-"
//! "#).unwrap();
//!
//! assert_eq!(config.storage_key, "site-theme");
//! assert_eq!(config.attribute, "data-theme"); // default kept
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Storage key holding the persisted preference.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// Attribute written to the root and body elements.
pub const DEFAULT_ATTRIBUTE: &str = "data-theme";

/// Id of the injected override `<style>` element.
pub const DEFAULT_STYLE_ID: &str = "theme-overrides";

/// Substring identifying themed custom properties.
pub const DEFAULT_TOKEN_MARKER: &str = "--token-";

/// Selector of the rule carrying the light token set.
pub const DEFAULT_LIGHT_SELECTOR: &str = "body";


/// Names and markers shared by every engine component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Key of the single persisted preference entry.
    pub storage_key: String,
    /// Marking attribute set to the effective theme on root and body.
    pub attribute: String,
    /// Identifier of the singleton override style element.
    pub style_id: String,
    /// Custom properties whose name contains this marker are tokens.
    pub token_marker: String,
    /// Exact selector of the light token rule.
    pub light_selector: String,
    /// Dark media rules whose text contains this marker are ignored.
    ///
    /// Unset, it follows the other names: `<light_selector>[<attribute>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_exclusion: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            attribute: DEFAULT_ATTRIBUTE.to_string(),
            style_id: DEFAULT_STYLE_ID.to_string(),
            token_marker: DEFAULT_TOKEN_MARKER.to_string(),
            light_selector: DEFAULT_LIGHT_SELECTOR.to_string(),
            dark_exclusion: None,
        }
    }
}

impl EngineConfig {
    /// The marker excluding explicitly themed rules from dark extraction.
    pub fn dark_exclusion(&self) -> String {
        match &self.dark_exclusion {
            Some(marker) => marker.clone(),
            None => format!("{}[{}", self.light_selector, self.attribute),
        }
    }

    /// Parses a config from YAML. Missing fields keep their defaults.
    ///
    /// An empty document yields the default config.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }
}
