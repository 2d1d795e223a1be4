//! Model assembly: generic content nodes in, typed view models out.
//!
//! The [`ModelAssembler`] orchestrates type resolution, field resolution,
//! hydration and caching for one localization. Entities memoize under
//! (id, localization, requested type); pages under (id, localization). The
//! skip-caching verdict accumulates bottom-up while a page tree is built:
//! one never-cacheable descendant keeps the whole page out of the durable
//! store, though the assembled tree is still returned.
//!
//! Failure isolation follows the batch discipline: a failing entity inside a
//! region is replaced by a placeholder exception entity and its siblings
//! continue; a failing region or page aborts its subtree.

use std::sync::Arc;

use crate::{
    cache::{CacheKey, ConditionalKey, ConditionalKeyBuilder, ModelCache},
    error::VitrineError,
    localization::{
        Localization, DEFAULT_TITLE_MARKER, RESOURCE_DEFAULT_PAGE_TITLE,
        RESOURCE_PAGE_TITLE_POSTFIX, RESOURCE_PAGE_TITLE_SEPARATOR,
    },
    mapping::{
        fields::{hydrate_fields, resolve_fields},
        registry::{ContentRequirement, ModelDefinition, ModelKind, ViewModelRegistry},
    },
    model::{
        data::{EntityData, PageData, RegionData},
        mvc::{self, MvcData},
        view::{
            EntityModel, EntityVariant, ExternalContent, MediaContent, PageModel, RegionModel,
            RegionModelSet,
        },
    },
};

/// Assembles typed view models from generic content nodes for one
/// localization.
///
/// The assembler is `Send + Sync`; concurrent callers share the caches and
/// the read-only registries. Within one invocation child regions and
/// entities assemble in source order.
pub struct ModelAssembler {
    localization: Arc<Localization>,
    registry: ViewModelRegistry,
    pages: ModelCache<Arc<PageModel>>,
    entities: ModelCache<Arc<EntityModel>>,
}

impl ModelAssembler {
    pub fn new(localization: Arc<Localization>, registry: ViewModelRegistry) -> Self {
        ModelAssembler {
            localization,
            registry,
            pages: ModelCache::new(),
            entities: ModelCache::new(),
        }
    }

    pub fn localization(&self) -> &Arc<Localization> {
        &self.localization
    }

    /// Assemble one entity node.
    ///
    /// `expected` pre-selects the target model type; the node's schema is
    /// still consulted but the pre-selected type wins.
    pub fn build_entity(
        &self,
        data: &EntityData,
        expected: Option<&str>,
    ) -> Result<Arc<EntityModel>, VitrineError> {
        let (definition, mvc_data) = self.resolve_entity_type(data, expected)?;

        let key = CacheKey::new(&data.id, &self.localization.id).with_model_type(expected);
        if let Some(model) = self.entities.get(&key) {
            tracing::trace!("Entity cache hit for {:?}", key);
            return Ok(model);
        }

        let model = self.create_entity_model(data, &definition, mvc_data)?;
        Ok(self.entities.add_and_get(
            ConditionalKey::new(key, definition.never_cached),
            Arc::new(model),
        ))
    }

    fn resolve_entity_type(
        &self,
        data: &EntityData,
        expected: Option<&str>,
    ) -> Result<(Arc<ModelDefinition>, MvcData), VitrineError> {
        let mvc_data = MvcData::from_data(data.mvc_data.as_ref(), mvc::ENTITY);
        let definition = match expected {
            Some(expected) => {
                tracing::debug!(
                    "Expected type is pre-set to '{}' for entity {}",
                    expected,
                    data.id
                );
                let names = data
                    .schema_id
                    .as_deref()
                    .and_then(|id| self.localization.schemas.get_by_wire_id(id))
                    .map(|schema| schema.fully_qualified_names.clone())
                    .unwrap_or_default();
                self.registry.mapped_model_type(&names, expected)?
            }
            None => {
                tracing::debug!(
                    "Expected type not set explicitly, resolving entity {} from MvcData {}",
                    data.id,
                    mvc_data
                );
                self.registry.view_model_type(&mvc_data).ok_or_else(|| {
                    VitrineError::Resolution(format!(
                        "Could not determine model type for entity '{}' from MvcData {}",
                        data.id, mvc_data
                    ))
                })?
            }
        };
        match definition.kind {
            ModelKind::Entity(_) => Ok((definition, mvc_data)),
            _ => Err(VitrineError::Resolution(format!(
                "Model type '{}' resolved for entity '{}' is not an entity type",
                definition.name, data.id
            ))),
        }
    }

    fn create_entity_model(
        &self,
        data: &EntityData,
        definition: &ModelDefinition,
        mvc_data: MvcData,
    ) -> Result<EntityModel, VitrineError> {
        let mapping = resolve_fields(
            &self.localization,
            data.schema_id.as_deref(),
            &data.extension_data,
        );
        let model = EntityModel {
            id: data.id.clone(),
            model_type: definition.name.clone(),
            mvc_data,
            html_classes: data.html_classes.clone(),
            xpm_metadata: data.xpm_metadata.clone(),
            xpm_property_metadata: data.xpm_property_metadata.clone(),
            extension_data: data.extension_data.clone(),
            fields: hydrate_fields(&mapping, data.content.as_ref()),
            variant: self.media_variant(data, definition)?,
            never_cached: definition.never_cached,
        };
        Ok(model)
    }

    fn media_variant(
        &self,
        data: &EntityData,
        definition: &ModelDefinition,
    ) -> Result<EntityVariant, VitrineError> {
        let requirement = match definition.kind {
            ModelKind::Entity(requirement) => requirement,
            _ => ContentRequirement::None,
        };
        if requirement == ContentRequirement::None {
            tracing::trace!(
                "Entity model '{}' is not a media item, media processing skipped",
                definition.name
            );
            return Ok(EntityVariant::Standard);
        }

        let binary = data.binary_content.as_ref().ok_or_else(|| {
            VitrineError::Hydration(format!(
                "Unable to create media item '{}' ('{}') because the node does not \
                 contain binary content data",
                definition.name, data.id
            ))
        })?;
        let media = MediaContent {
            url: binary.url.clone(),
            file_name: binary.file_name.clone(),
            mime_type: binary.mime_type.clone(),
            file_size: binary.file_size,
        };

        if requirement == ContentRequirement::Media {
            return Ok(EntityVariant::Media(media));
        }

        let external = data.external_content.as_ref().ok_or_else(|| {
            VitrineError::Hydration(format!(
                "Unable to create external content item '{}' ('{}') because the node \
                 does not contain external content data",
                definition.name, data.id
            ))
        })?;
        Ok(EntityVariant::External(
            media,
            ExternalContent {
                id: external.id.clone(),
                display_type_id: external.display_type_id.clone(),
                template_fragment: external.template_fragment.clone(),
                metadata: external.metadata.clone(),
            },
        ))
    }

    /// Assemble one page node and its full region/entity tree.
    ///
    /// A pre-existing `original` page model short-circuits assembly and is
    /// returned unchanged.
    pub fn build_page(
        &self,
        original: Option<Arc<PageModel>>,
        data: &PageData,
    ) -> Result<Arc<PageModel>, VitrineError> {
        let key = CacheKey::new(&data.id, &self.localization.id);
        if let Some(model) = self.pages.get(&key) {
            tracing::trace!("Page cache hit for {:?}", key);
            return Ok(model);
        }
        let mut key_builder = ConditionalKeyBuilder::new(key);

        if let Some(original) = original {
            tracing::warn!(
                "Original page model is expected to be None but it's '{}'",
                original.id
            );
            return Ok(original);
        }

        let (definition, mvc_data) = self.resolve_page_type(data)?;
        let never_cached = definition
            .as_ref()
            .map(|d| d.never_cached)
            .unwrap_or_default();
        let model_type = definition
            .as_ref()
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "Page".to_string());

        let mapping = resolve_fields(
            &self.localization,
            data.schema_id.as_deref(),
            &data.extension_data,
        );
        let mut page = PageModel {
            id: data.id.clone(),
            model_type,
            name: data.title.clone().unwrap_or_default(),
            title: self.page_title(data),
            url_path: data.url_path.clone(),
            meta: data.meta.clone(),
            mvc_data,
            html_classes: data.html_classes.clone(),
            xpm_metadata: data.xpm_metadata.clone(),
            xpm_property_metadata: data.xpm_property_metadata.clone(),
            extension_data: data.extension_data.clone(),
            fields: hydrate_fields(&mapping, data.content.as_ref()),
            never_cached,
            ..Default::default()
        };

        self.process_regions(&data.regions, &mut key_builder, &mut page.regions)?;
        key_builder.skip_caching(never_cached);

        let conditional_key = key_builder.build();
        page.static_model = !conditional_key.skip_caching;
        Ok(self.pages.add_and_get(conditional_key, Arc::new(page)))
    }

    fn resolve_page_type(
        &self,
        data: &PageData,
    ) -> Result<(Option<Arc<ModelDefinition>>, MvcData), VitrineError> {
        let mvc_data = MvcData::from_data(data.mvc_data.as_ref(), mvc::PAGE);
        tracing::debug!("MvcData '{}' for page {}", mvc_data, data.id);

        let definition = self.registry.view_model_type(&mvc_data);
        match (&definition, &data.schema_id) {
            // No specific type, no schema: the generic default page model.
            (None, None) => {
                tracing::debug!(
                    "Instantiating a default page model for {}, no view model type and \
                     no schema id",
                    data.id
                );
                Ok((None, mvc_data))
            }
            (None, Some(_)) => Err(VitrineError::Resolution(format!(
                "Could not determine model type for page '{}' from MvcData {}",
                data.id, mvc_data
            ))),
            (Some(definition), _) => match definition.kind {
                ModelKind::Page => Ok((Some(definition.clone()), mvc_data)),
                _ => Err(VitrineError::Resolution(format!(
                    "Model type '{}' resolved for page '{}' is not a page type",
                    definition.name, data.id
                ))),
            },
        }
    }

    fn page_title(&self, data: &PageData) -> String {
        let raw = data.title.clone().unwrap_or_default();
        let title = if raw == DEFAULT_TITLE_MARKER {
            self.localization
                .resource(RESOURCE_DEFAULT_PAGE_TITLE)
                .to_string()
        } else {
            raw
        };
        let separator = self.localization.resource(RESOURCE_PAGE_TITLE_SEPARATOR);
        let postfix = self.localization.resource(RESOURCE_PAGE_TITLE_POSTFIX);
        tracing::trace!(
            "Model page title '{}', separator '{}', postfix '{}'",
            title,
            separator,
            postfix
        );
        format!("{title}{separator}{postfix}")
    }

    fn process_regions(
        &self,
        regions: &[RegionData],
        key_builder: &mut ConditionalKeyBuilder,
        target: &mut RegionModelSet,
    ) -> Result<(), VitrineError> {
        let mut first_error = None;
        for region_data in regions {
            match self.build_region(region_data, key_builder) {
                Ok(region) => target.insert(region),
                Err(error) => {
                    tracing::error!(
                        "Cannot create a region model for '{}': {}",
                        region_data.name,
                        error
                    );
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }
        // Siblings are all attempted; the first region failure still aborts
        // the enclosing subtree.
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Assemble one region node, accumulating skip-caching observations into
    /// `key_builder`.
    pub fn build_region(
        &self,
        data: &RegionData,
        key_builder: &mut ConditionalKeyBuilder,
    ) -> Result<RegionModel, VitrineError> {
        let mvc_data = MvcData::from_data(data.mvc_data.as_ref(), mvc::REGION);
        tracing::debug!("MvcData '{}' for region {}", mvc_data, data.name);

        let definition = self.registry.view_model_type(&mvc_data).ok_or_else(|| {
            VitrineError::Resolution(format!("Cannot find a view model type for {mvc_data}"))
        })?;
        let factory = match definition.kind {
            ModelKind::Region(factory) => factory,
            _ => {
                return Err(VitrineError::ConstructorShape(format!(
                    "Model type '{}' resolved for region '{}' does not provide a \
                     single-name-argument region factory",
                    definition.name, data.name
                )))
            }
        };

        let mut region = factory(&data.name);
        region.model_type = definition.name.clone();
        region.mvc_data = mvc_data;
        region.schema_id = data.schema_id.clone();
        region.html_classes = data.html_classes.clone();
        region.xpm_metadata = data.xpm_metadata.clone();
        region.xpm_property_metadata = data.xpm_property_metadata.clone();
        region.extension_data = data.extension_data.clone();

        if data.schema_id.as_deref().is_some_and(|id| !id.is_empty()) {
            let mapping = resolve_fields(
                &self.localization,
                data.schema_id.as_deref(),
                &data.extension_data,
            );
            region.fields = hydrate_fields(&mapping, data.content.as_ref());
        }

        key_builder.skip_caching(definition.never_cached);

        self.process_regions(&data.regions, key_builder, &mut region.regions)?;
        self.add_entities_to_region(data, key_builder, &mut region);

        Ok(region)
    }

    fn add_entities_to_region(
        &self,
        data: &RegionData,
        key_builder: &mut ConditionalKeyBuilder,
        region: &mut RegionModel,
    ) {
        for entity_data in &data.entities {
            let entity = match self.build_entity(entity_data, None) {
                Ok(entity) => {
                    key_builder.skip_caching(entity.never_cached);
                    entity
                }
                Err(error) => {
                    tracing::error!(
                        "Cannot create an entity model for '{}': {}",
                        entity_data.id,
                        error
                    );
                    key_builder.skip_caching(true);
                    Arc::new(EntityModel::exception(&entity_data.id, &error))
                }
            };
            // Record the owning region on the entity's target descriptor.
            // Cached instances are shared, so the rewrite works on a copy.
            let mut owned = (*entity).clone();
            owned.mvc_data.region_name = Some(data.name.clone());
            region.entities.insert(Arc::new(owned));
        }
    }
}
