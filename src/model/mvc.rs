use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

/// MVC target descriptor carried by every content node and view model.
///
/// The upstream payload fills an arbitrary subset of these names; assembly
/// merges in per-level defaults before the descriptor is used for type
/// resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MvcData {
    pub area_name: Option<String>,
    pub controller_area_name: Option<String>,
    pub controller_name: Option<String>,
    pub action_name: Option<String>,
    pub view_name: Option<String>,
    /// Name of the owning region; rewritten during region assembly.
    pub region_name: Option<String>,
    pub route_values: BTreeMap<String, String>,
}

/// Per-level default names merged into partial descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MvcDefaults {
    pub area: &'static str,
    pub controller: &'static str,
    pub action: &'static str,
}

/// Defaults for entity targets.
pub const ENTITY: MvcDefaults = MvcDefaults {
    area: "Core",
    controller: "Entity",
    action: "Entity",
};

/// Defaults for region targets.
pub const REGION: MvcDefaults = MvcDefaults {
    area: "Core",
    controller: "Region",
    action: "Region",
};

/// Defaults for page targets.
pub const PAGE: MvcDefaults = MvcDefaults {
    area: "Core",
    controller: "Page",
    action: "Page",
};

impl MvcData {
    /// Build a resolved descriptor from optional wire data, filling absent
    /// names from `defaults`. The view name has no default; a target without
    /// one simply fails registry lookup.
    pub fn from_data(data: Option<&MvcData>, defaults: MvcDefaults) -> MvcData {
        let mut mvc = data.cloned().unwrap_or_default();
        mvc.area_name.get_or_insert_with(|| defaults.area.to_string());
        mvc.controller_area_name
            .get_or_insert_with(|| defaults.area.to_string());
        mvc.controller_name
            .get_or_insert_with(|| defaults.controller.to_string());
        mvc.action_name
            .get_or_insert_with(|| defaults.action.to_string());
        mvc
    }

    pub fn area(&self) -> &str {
        self.area_name.as_deref().unwrap_or_default()
    }

    pub fn controller(&self) -> &str {
        self.controller_name.as_deref().unwrap_or_default()
    }

    pub fn view(&self) -> &str {
        self.view_name.as_deref().unwrap_or_default()
    }
}

impl Display for MvcData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.area(), self.controller(), self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_absent_names_only() {
        let wire = MvcData {
            view_name: Some("Article".to_string()),
            controller_name: Some("Search".to_string()),
            ..Default::default()
        };
        let mvc = MvcData::from_data(Some(&wire), ENTITY);
        assert_eq!(mvc.area(), "Core");
        assert_eq!(mvc.controller(), "Search");
        assert_eq!(mvc.view(), "Article");
        assert_eq!(mvc.action_name.as_deref(), Some("Entity"));
    }

    #[test]
    fn test_display() {
        let mvc = MvcData::from_data(None, REGION);
        assert_eq!(mvc.to_string(), "Core:Region:");
    }
}
