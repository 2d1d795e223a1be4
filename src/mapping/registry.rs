// Model type registry for view-model resolution
//
// Maps MVC target descriptors and fully-qualified semantic names to model
// definitions. Definitions are registered at startup, by both vitrine-core
// (the generic page/region/entity types) and downstream applications.

use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::{
    error::VitrineError,
    model::{mvc::MvcData, view::RegionModel},
};

/// Global singleton model type registry with the built-in generic types.
pub static MODEL_TYPES: Lazy<ViewModelRegistry> = Lazy::new(ViewModelRegistry::create);

/// Factory for region models: the single-name-argument construction
/// contract, expressed as a plain function signature instead of a
/// reflective lookup.
pub type RegionFactory = fn(&str) -> RegionModel;

/// What structured payload a model type demands from its node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentRequirement {
    #[default]
    None,
    /// Node must carry binary content data.
    Media,
    /// Node must carry binary content data and external content data.
    External,
}

/// Which model family a definition belongs to.
#[derive(Debug, Clone)]
pub enum ModelKind {
    Page,
    Region(RegionFactory),
    Entity(ContentRequirement),
}

/// A registered concrete model type.
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    pub name: String,
    pub kind: ModelKind,
    /// Never-cacheable marker: every instance of this type skips the durable
    /// cache and propagates the skip flag up the assembly tree.
    pub never_cached: bool,
    /// Fully-qualified semantic names this type maps, e.g. `s:Article`.
    pub semantic_names: Vec<String>,
}

impl ModelDefinition {
    pub fn entity(name: &str) -> Self {
        ModelDefinition {
            name: name.to_string(),
            kind: ModelKind::Entity(ContentRequirement::None),
            never_cached: false,
            semantic_names: Vec::new(),
        }
    }

    pub fn media(name: &str) -> Self {
        ModelDefinition {
            kind: ModelKind::Entity(ContentRequirement::Media),
            ..Self::entity(name)
        }
    }

    pub fn external(name: &str) -> Self {
        ModelDefinition {
            kind: ModelKind::Entity(ContentRequirement::External),
            ..Self::entity(name)
        }
    }

    pub fn page(name: &str) -> Self {
        ModelDefinition {
            kind: ModelKind::Page,
            ..Self::entity(name)
        }
    }

    pub fn region(name: &str, factory: RegionFactory) -> Self {
        ModelDefinition {
            kind: ModelKind::Region(factory),
            ..Self::entity(name)
        }
    }

    pub fn with_semantic_name(mut self, fully_qualified: &str) -> Self {
        self.semantic_names.push(fully_qualified.to_string());
        self
    }

    pub fn never_cached(mut self) -> Self {
        self.never_cached = true;
        self
    }
}

/// Registry key derived from an MVC target descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewKey {
    pub area: String,
    pub controller: String,
    pub view: String,
}

impl ViewKey {
    pub fn new(area: &str, controller: &str, view: &str) -> Self {
        ViewKey {
            area: area.to_string(),
            controller: controller.to_string(),
            view: view.to_string(),
        }
    }

    pub fn from_mvc(mvc: &MvcData) -> Self {
        ViewKey::new(mvc.area(), mvc.controller(), mvc.view())
    }
}

#[derive(Default)]
struct RegistryTables {
    models: HashMap<String, Arc<ModelDefinition>>,
    views: HashMap<ViewKey, String>,
    /// Fully-qualified semantic name -> model type names mapping it.
    semantics: HashMap<String, Vec<String>>,
}

fn default_region_factory(name: &str) -> RegionModel {
    RegionModel::new(name)
}

/// Thread-safe registry of model definitions and view mappings.
///
/// Written during startup registration, read thereafter. Pattern matches
/// the schema registry for consistency; `Clone` shares the underlying
/// tables.
pub struct ViewModelRegistry(Arc<RwLock<RegistryTables>>);

impl Clone for ViewModelRegistry {
    fn clone(&self) -> Self {
        ViewModelRegistry(self.0.clone())
    }
}

impl ViewModelRegistry {
    /// Create a registry seeded with the generic page, region and entity
    /// definitions and their `Core` view mappings.
    pub fn create() -> Self {
        let registry = ViewModelRegistry(Arc::new(RwLock::new(RegistryTables::default())));

        registry.register(ModelDefinition::page("Page"));
        registry
            .register_region(ModelDefinition::region("Region", default_region_factory))
            .expect("Built-in region definition satisfies the factory contract");
        registry.register(ModelDefinition::entity("Entity"));

        registry.register_view(ViewKey::new("Core", "Page", "Page"), "Page");
        registry.register_view(ViewKey::new("Core", "Region", "Region"), "Region");
        registry.register_view(ViewKey::new("Core", "Entity", "Entity"), "Entity");

        registry
    }

    /// Register a model definition.
    ///
    /// If a definition with this name already exists, it is overwritten and
    /// a log message emitted.
    pub fn register(&self, definition: ModelDefinition) {
        let mut writer = self.0.write();

        if writer.models.contains_key(&definition.name) {
            tracing::info!(
                "[ViewModelRegistry::register] Overwriting existing model definition: {}",
                definition.name
            );
        }

        for semantic_name in &definition.semantic_names {
            let mapped = writer.semantics.entry(semantic_name.clone()).or_default();
            if !mapped.contains(&definition.name) {
                mapped.push(definition.name.clone());
            }
        }

        writer
            .models
            .insert(definition.name.clone(), Arc::new(definition));
    }

    /// Register a region definition, validating the factory contract at
    /// registration time instead of at assembly time.
    pub fn register_region(&self, definition: ModelDefinition) -> Result<(), VitrineError> {
        if !matches!(definition.kind, ModelKind::Region(_)) {
            return Err(VitrineError::ConstructorShape(format!(
                "Model definition '{}' registered as a region must provide a \
                 single-name-argument region factory",
                definition.name
            )));
        }
        self.register(definition);
        Ok(())
    }

    /// Map a view descriptor key onto a registered model type name.
    pub fn register_view(&self, key: ViewKey, model_type: &str) {
        let mut writer = self.0.write();
        if !writer.models.contains_key(model_type) {
            tracing::warn!(
                "[ViewModelRegistry::register_view] View {:?} maps to unregistered model type '{}'",
                key,
                model_type
            );
        }
        writer.views.insert(key, model_type.to_string());
    }

    /// Retrieve a model definition by name. Returns a cheap Arc clone.
    pub fn get(&self, name: &str) -> Option<Arc<ModelDefinition>> {
        self.0.read().models.get(name).cloned()
    }

    /// Resolve a model definition from an MVC target descriptor.
    pub fn view_model_type(&self, mvc: &MvcData) -> Option<Arc<ModelDefinition>> {
        let reader = self.0.read();
        let key = ViewKey::from_mvc(mvc);
        reader
            .views
            .get(&key)
            .and_then(|name| reader.models.get(name))
            .cloned()
    }

    /// Resolve a model definition when the caller pre-selected an expected
    /// type. The semantic-name table is consulted so a mismatch can be
    /// observed, but the explicitly supplied type always wins even when the
    /// descriptor disagrees. Recorded precedence, deliberately preserved.
    pub fn mapped_model_type(
        &self,
        fully_qualified_names: &BTreeSet<String>,
        expected: &str,
    ) -> Result<Arc<ModelDefinition>, VitrineError> {
        let reader = self.0.read();
        let definition = reader.models.get(expected).cloned().ok_or_else(|| {
            VitrineError::Resolution(format!(
                "Pre-selected model type '{expected}' is not registered"
            ))
        })?;
        let compatible = fully_qualified_names.iter().any(|name| {
            reader
                .semantics
                .get(name)
                .is_some_and(|mapped| mapped.iter().any(|t| t == expected))
        });
        if !compatible && !fully_qualified_names.is_empty() {
            tracing::debug!(
                "Semantic names {:?} do not map to pre-selected type '{}'; \
                 keeping the pre-selected type",
                fully_qualified_names,
                expected
            );
        }

        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_definitions() {
        let registry = ViewModelRegistry::create();
        assert!(registry.get("Page").is_some());
        assert!(registry.get("Region").is_some());
        assert!(registry.get("Entity").is_some());

        let mvc = MvcData {
            area_name: Some("Core".to_string()),
            controller_name: Some("Region".to_string()),
            view_name: Some("Region".to_string()),
            ..Default::default()
        };
        let definition = registry.view_model_type(&mvc).unwrap();
        assert!(matches!(definition.kind, ModelKind::Region(_)));
    }

    #[test]
    fn test_register_region_enforces_factory_contract() {
        let registry = ViewModelRegistry::create();
        let err = registry
            .register_region(ModelDefinition::entity("NotARegion"))
            .unwrap_err();
        assert!(matches!(err, VitrineError::ConstructorShape(_)));
        assert!(registry.get("NotARegion").is_none());
    }

    #[test]
    fn test_explicit_type_always_wins() {
        let registry = ViewModelRegistry::create();
        registry.register(ModelDefinition::entity("Article").with_semantic_name("s:Article"));
        registry.register(ModelDefinition::entity("Place").with_semantic_name("s:Place"));

        // Names map to a different type; the pre-selected one still wins.
        let names = BTreeSet::from(["s:Place".to_string()]);
        let definition = registry.mapped_model_type(&names, "Article").unwrap();
        assert_eq!(definition.name, "Article");

        // Unknown pre-selected type is fatal for the node.
        let err = registry.mapped_model_type(&names, "Missing").unwrap_err();
        assert!(matches!(err, VitrineError::Resolution(_)));
    }

    #[test]
    fn test_view_overwrite() {
        let registry = ViewModelRegistry::create();
        registry.register(ModelDefinition::entity("Teaser"));
        registry.register_view(ViewKey::new("Core", "Entity", "Teaser"), "Entity");
        registry.register_view(ViewKey::new("Core", "Entity", "Teaser"), "Teaser");

        let mvc = MvcData {
            area_name: Some("Core".to_string()),
            controller_name: Some("Entity".to_string()),
            view_name: Some("Teaser".to_string()),
            ..Default::default()
        };
        assert_eq!(registry.view_model_type(&mvc).unwrap().name, "Teaser");
    }
}
