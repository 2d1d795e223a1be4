//! Shared test utilities for assembly and navigation testing.

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    localization::{
        Localization, RESOURCE_DEFAULT_PAGE_TITLE, RESOURCE_PAGE_TITLE_POSTFIX,
        RESOURCE_PAGE_TITLE_SEPARATOR,
    },
    mapping::{
        registry::{ModelDefinition, ViewKey, ViewModelRegistry},
        schema::{FieldSemantics, SchemaRegistry, SemanticField, SemanticSchema},
    },
    model::{
        data::{EntityData, RegionData},
        mvc::MvcData,
    },
    navigation::sitemap::SitemapItem,
};

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Localization with the article test schema (id 42) and title resources.
pub fn test_localization() -> Arc<Localization> {
    init_logging();

    let article = SemanticSchema::new(42, "Article")
        .with_name("s:Article")
        .with_field(
            FieldSemantics::new("s", "Article", "headline"),
            SemanticField::new("headline", "/Article/headline"),
        )
        .with_field(
            FieldSemantics::new("s", "Article", "intro"),
            SemanticField::new("intro", "/Article/intro"),
        );

    Arc::new(
        Localization::new("1", "qwe.html")
            .with_schemas(SchemaRegistry::from_schemas(vec![article]))
            .with_resources(BTreeMap::from([
                (RESOURCE_DEFAULT_PAGE_TITLE.to_string(), "Home".to_string()),
                (RESOURCE_PAGE_TITLE_SEPARATOR.to_string(), " | ".to_string()),
                (RESOURCE_PAGE_TITLE_POSTFIX.to_string(), "My Site".to_string()),
            ])),
    )
}

/// A fresh registry with the article/media/external/volatile test types on
/// top of the built-ins.
pub fn test_registry() -> ViewModelRegistry {
    let registry = ViewModelRegistry::create();

    registry.register(ModelDefinition::entity("Article").with_semantic_name("s:Article"));
    registry.register_view(ViewKey::new("Core", "Entity", "Article"), "Article");

    registry.register(ModelDefinition::media("Image"));
    registry.register_view(ViewKey::new("Core", "Entity", "Image"), "Image");

    registry.register(ModelDefinition::external("YouTubeVideo"));
    registry.register_view(ViewKey::new("Core", "Entity", "YouTubeVideo"), "YouTubeVideo");

    registry.register(ModelDefinition::entity("Ticker").never_cached());
    registry.register_view(ViewKey::new("Core", "Entity", "Ticker"), "Ticker");

    registry
}

/// Entity data targeting the given view name.
pub fn entity_data(id: &str, view: &str) -> EntityData {
    EntityData {
        id: id.to_string(),
        mvc_data: Some(MvcData {
            view_name: Some(view.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Region data targeting the built-in region view.
pub fn region_data(name: &str) -> RegionData {
    RegionData {
        name: name.to_string(),
        mvc_data: Some(MvcData {
            view_name: Some("Region".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn sitemap_item(visible: bool, url: Option<&str>) -> SitemapItem {
    SitemapItem::new(url.unwrap_or_default(), url, visible)
}

/// The navigation fixture tree:
///
/// ```text
/// (root)
/// ├── qwe.html ── child.html ── [child_2.html, child_3.html]
/// ├── root.html
/// ├── asd (invisible)
/// ├── "" (blank url)
/// └── (no url)
/// ```
pub fn navigation_model() -> SitemapItem {
    let nested = sitemap_item(true, Some("qwe.html")).with_items(vec![sitemap_item(
        true,
        Some("child.html"),
    )
    .with_items(vec![
        sitemap_item(true, Some("child_2.html")),
        sitemap_item(true, Some("child_3.html")),
    ])]);

    SitemapItem::new("root", None, true).with_items(vec![
        nested,
        sitemap_item(true, Some("root.html")),
        sitemap_item(false, Some("asd")),
        sitemap_item(true, Some("")),
        sitemap_item(true, None),
    ])
}
