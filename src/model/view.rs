//! Strongly-typed output models.
//!
//! View models are immutable once assembly completes; entity instances are
//! shared behind `Arc` because the cache layer may hand the same assembled
//! entity to many concurrent callers.

use std::{collections::BTreeMap, sync::Arc};

use serde_json::Value;

use crate::{
    error::VitrineError,
    model::mvc::MvcData,
};

/// Hydrated semantic fields, keyed by field name.
pub type FieldMap = BTreeMap<String, Value>;

/// Binary payload carried by a media entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaContent {
    pub url: String,
    pub file_name: String,
    pub mime_type: String,
    pub file_size: u64,
}

/// External-system payload carried by an externally-managed media entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalContent {
    pub id: String,
    pub display_type_id: String,
    pub template_fragment: String,
    pub metadata: BTreeMap<String, Value>,
}

/// Structural tag of an assembled entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EntityVariant {
    #[default]
    Standard,
    Media(MediaContent),
    External(MediaContent, ExternalContent),
    /// Placeholder produced when an entity in a sibling batch failed to
    /// assemble; carries the failure message.
    Exception { message: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityModel {
    pub id: String,
    /// Name of the resolved model definition.
    pub model_type: String,
    pub mvc_data: MvcData,
    pub html_classes: Option<String>,
    pub xpm_metadata: BTreeMap<String, String>,
    pub xpm_property_metadata: BTreeMap<String, String>,
    pub extension_data: BTreeMap<String, Value>,
    pub fields: FieldMap,
    pub variant: EntityVariant,
    /// Marker copied from the model definition; propagates skip-caching up
    /// the assembly tree.
    pub never_cached: bool,
}

impl EntityModel {
    /// Name of this entity within its owning region. Entity names are their
    /// identifiers; region sets keep them unique.
    pub fn name(&self) -> &str {
        &self.id
    }

    /// Placeholder entity standing in for a failed sibling assembly.
    pub fn exception(id: &str, error: &VitrineError) -> Self {
        EntityModel {
            id: id.to_string(),
            model_type: "ExceptionEntity".to_string(),
            mvc_data: MvcData {
                area_name: Some("Shared".to_string()),
                controller_area_name: Some("Shared".to_string()),
                controller_name: Some("Error".to_string()),
                action_name: Some("Error".to_string()),
                view_name: Some("SectionError".to_string()),
                ..Default::default()
            },
            variant: EntityVariant::Exception {
                message: error.to_string(),
            },
            never_cached: true,
            ..Default::default()
        }
    }

    pub fn is_exception(&self) -> bool {
        matches!(self.variant, EntityVariant::Exception { .. })
    }

    pub fn media(&self) -> Option<&MediaContent> {
        match &self.variant {
            EntityVariant::Media(media) | EntityVariant::External(media, _) => Some(media),
            _ => None,
        }
    }

    pub fn external(&self) -> Option<&ExternalContent> {
        match &self.variant {
            EntityVariant::External(_, external) => Some(external),
            _ => None,
        }
    }

    /// Render the XPM editing metadata as an HTML comment fragment for the
    /// staging site. Empty metadata renders nothing.
    pub fn xpm_markup(&self) -> String {
        if self.xpm_metadata.is_empty() {
            return String::new();
        }
        let json = serde_json::to_string(&self.xpm_metadata).unwrap_or_default();
        format!("<!-- Start Component Presentation: {json} -->")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionModel {
    pub name: String,
    pub model_type: String,
    /// The region's own schema id, when the upstream payload supplies one.
    pub schema_id: Option<String>,
    pub mvc_data: MvcData,
    pub html_classes: Option<String>,
    pub xpm_metadata: BTreeMap<String, String>,
    pub xpm_property_metadata: BTreeMap<String, String>,
    pub extension_data: BTreeMap<String, Value>,
    pub fields: FieldMap,
    pub regions: RegionModelSet,
    pub entities: EntityModelSet,
}

impl RegionModel {
    pub fn new(name: &str) -> Self {
        RegionModel {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

/// Ordered, name-keyed set of regions. Insertion order is preserved; a
/// same-name insert replaces the existing region in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionModelSet {
    items: Vec<RegionModel>,
}

impl RegionModelSet {
    pub fn insert(&mut self, region: RegionModel) {
        match self.items.iter_mut().find(|r| r.name == region.name) {
            Some(existing) => *existing = region,
            None => self.items.push(region),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RegionModel> {
        self.items.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionModel> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a RegionModelSet {
    type Item = &'a RegionModel;
    type IntoIter = std::slice::Iter<'a, RegionModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Ordered, name-keyed set of entities. Same discipline as
/// [`RegionModelSet`]: insertion order preserved, names unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityModelSet {
    items: Vec<Arc<EntityModel>>,
}

impl EntityModelSet {
    pub fn insert(&mut self, entity: Arc<EntityModel>) {
        match self
            .items
            .iter_mut()
            .find(|e| e.name() == entity.name())
        {
            Some(existing) => *existing = entity,
            None => self.items.push(entity),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<EntityModel>> {
        self.items.iter().find(|e| e.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<EntityModel>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntityModelSet {
    type Item = &'a Arc<EntityModel>;
    type IntoIter = std::slice::Iter<'a, Arc<EntityModel>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageModel {
    pub id: String,
    pub model_type: String,
    /// Raw title as delivered by the upstream repository.
    pub name: String,
    /// Composed display title (`title ++ separator ++ postfix`).
    pub title: String,
    pub url_path: String,
    pub meta: BTreeMap<String, String>,
    pub mvc_data: MvcData,
    pub html_classes: Option<String>,
    pub xpm_metadata: BTreeMap<String, String>,
    pub xpm_property_metadata: BTreeMap<String, String>,
    pub extension_data: BTreeMap<String, Value>,
    pub fields: FieldMap,
    pub regions: RegionModelSet,
    /// False iff any model in the assembled tree was never-cacheable.
    pub static_model: bool,
    pub never_cached: bool,
}
