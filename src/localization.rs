//! The per-site resolution context.
//!
//! A [`Localization`] identifies which site/locale a request resolves
//! against: its identifier participates in every cache key, its path names
//! the site's home URL, and it owns the frozen per-locale
//! [`SchemaRegistry`] plus the resource strings used for page-title
//! composition.

use std::collections::BTreeMap;

use crate::{config::DeliveryConfig, mapping::schema::SchemaRegistry};

/// Resource key for the substituted default page title.
pub const RESOURCE_DEFAULT_PAGE_TITLE: &str = "core.defaultPageTitle";
/// Resource key for the page title separator.
pub const RESOURCE_PAGE_TITLE_SEPARATOR: &str = "core.pageTitleSeparator";
/// Resource key for the page title postfix.
pub const RESOURCE_PAGE_TITLE_POSTFIX: &str = "core.pageTitlePostfix";

/// Sentinel title the upstream repository emits for pages without an
/// explicit title; substituted from [`RESOURCE_DEFAULT_PAGE_TITLE`].
pub const DEFAULT_TITLE_MARKER: &str = "defaultPageTitle";

#[derive(Debug, Clone, Default)]
pub struct Localization {
    /// Localization (publication) identifier; part of every cache key.
    pub id: String,
    /// URL path of the localization's home page.
    pub path: String,
    pub schemas: SchemaRegistry,
    pub resources: BTreeMap<String, String>,
}

impl Localization {
    pub fn new(id: &str, path: &str) -> Self {
        Localization {
            id: id.to_string(),
            path: path.to_string(),
            ..Default::default()
        }
    }

    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn with_resources(mut self, resources: BTreeMap<String, String>) -> Self {
        self.resources = resources;
        self
    }

    /// Seed resource strings from a loaded [`DeliveryConfig`].
    pub fn with_config(mut self, config: &DeliveryConfig) -> Self {
        self.resources.extend(
            config
                .resources
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self
    }

    /// Look up a localized resource string. Missing resources resolve to the
    /// empty string; resource availability is the embedding application's
    /// concern.
    pub fn resource(&self, key: &str) -> &str {
        self.resources.get(key).map(String::as_str).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_lookup_defaults_to_empty() {
        let localization = Localization::new("1", "/");
        assert_eq!(localization.resource(RESOURCE_PAGE_TITLE_SEPARATOR), "");

        let localization = localization.with_resources(BTreeMap::from([(
            RESOURCE_PAGE_TITLE_SEPARATOR.to_string(),
            " | ".to_string(),
        )]));
        assert_eq!(localization.resource(RESOURCE_PAGE_TITLE_SEPARATOR), " | ");
    }
}
