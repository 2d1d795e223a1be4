//! Generic input DTOs produced by the upstream content repository.
//!
//! These shapes are deliberately loose: everything beyond the identifier is
//! optional or defaulted, and extension data is an open `serde_json::Value`
//! map. The assembly pipeline gives them strong types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::mvc::MvcData;

/// Reserved extension-data key carrying the ordered list of additional
/// (inherited) schema identifiers.
pub const EXTENSION_SCHEMAS_KEY: &str = "Schemas";

/// Generic page node: title, URL, metadata and an ordered region list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PageData {
    pub id: String,
    pub schema_id: Option<String>,
    pub title: Option<String>,
    pub url_path: String,
    pub meta: BTreeMap<String, String>,
    pub mvc_data: Option<MvcData>,
    pub html_classes: Option<String>,
    pub xpm_metadata: BTreeMap<String, String>,
    pub xpm_property_metadata: BTreeMap<String, String>,
    pub extension_data: BTreeMap<String, Value>,
    /// Generic field-value tree hydrated through the page's schema.
    pub content: Option<Value>,
    pub regions: Vec<RegionData>,
}

/// Generic region node: named, with ordered nested regions and entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RegionData {
    pub name: String,
    pub schema_id: Option<String>,
    pub mvc_data: Option<MvcData>,
    pub html_classes: Option<String>,
    pub xpm_metadata: BTreeMap<String, String>,
    pub xpm_property_metadata: BTreeMap<String, String>,
    pub extension_data: BTreeMap<String, Value>,
    pub content: Option<Value>,
    pub regions: Vec<RegionData>,
    pub entities: Vec<EntityData>,
}

/// Generic entity node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EntityData {
    pub id: String,
    pub schema_id: Option<String>,
    pub mvc_data: Option<MvcData>,
    pub html_classes: Option<String>,
    pub xpm_metadata: BTreeMap<String, String>,
    pub xpm_property_metadata: BTreeMap<String, String>,
    pub extension_data: BTreeMap<String, Value>,
    pub content: Option<Value>,
    /// Present on media entities; required by media-carrying model types.
    pub binary_content: Option<BinaryContentData>,
    /// Present on externally-managed media entities.
    pub external_content: Option<ExternalContentData>,
}

/// Binary payload descriptor for media entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BinaryContentData {
    pub url: String,
    pub file_name: String,
    pub mime_type: String,
    pub file_size: u64,
}

/// Descriptor for content managed by an external system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExternalContentData {
    pub id: String,
    pub display_type_id: String,
    pub template_fragment: String,
    pub metadata: BTreeMap<String, Value>,
}
