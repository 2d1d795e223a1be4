use std::{collections::BTreeMap, fs::read_to_string, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::VitrineError,
    paths::{DEFAULT_PAGE_EXTENSION, DEFAULT_PAGE_NAME},
};

/// Navigation defaults: which page name/extension marks a directory's
/// canonical index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub default_page_name: String,
    pub default_page_extension: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            default_page_name: DEFAULT_PAGE_NAME.to_string(),
            default_page_extension: DEFAULT_PAGE_EXTENSION.to_string(),
        }
    }
}

impl NavigationConfig {
    /// The URL suffix marking an index page, e.g. `index.html`.
    pub fn index_suffix(&self) -> String {
        format!("{}{}", self.default_page_name, self.default_page_extension)
    }
}

/// Top-level delivery configuration.
///
/// `resources` seeds [`Localization`](crate::localization::Localization)
/// resource strings (page-title separator, postfix, default title).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub navigation: NavigationConfig,
    pub resources: BTreeMap<String, String>,
}

impl DeliveryConfig {
    /// Load configuration from a TOML file. A missing file yields the
    /// defaults.
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, VitrineError> {
        tracing::debug!("Attempting to read delivery config from: {:?}", path.as_ref());
        if !path.as_ref().exists() {
            tracing::debug!("Config file not found, using defaults.");
            return Ok(DeliveryConfig::default());
        }
        let content = read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
