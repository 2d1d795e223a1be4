//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::{collections::BTreeMap, sync::Arc};

use vitrine_core::{
    localization::{
        Localization, RESOURCE_PAGE_TITLE_POSTFIX, RESOURCE_PAGE_TITLE_SEPARATOR,
    },
    mapping::{
        registry::{ModelDefinition, ViewKey, ViewModelRegistry},
        schema::{FieldSemantics, SchemaRegistry, SemanticField, SemanticSchema},
    },
};

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times — subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// A localization with one article schema (id 42, `s:Article`) mapping
/// `headline` and `standfirst`, plus page-title resources.
#[allow(dead_code)]
pub fn article_localization() -> Arc<Localization> {
    init_logging();

    let article = SemanticSchema::new(42, "Article")
        .with_name("s:Article")
        .with_field(
            FieldSemantics::new("s", "Article", "headline"),
            SemanticField::new("headline", "/Article/headline"),
        )
        .with_field(
            FieldSemantics::new("s", "Article", "standfirst"),
            SemanticField::new("standfirst", "/Article/standfirst"),
        );

    Arc::new(
        Localization::new("1", "index.html")
            .with_schemas(SchemaRegistry::from_schemas(vec![article]))
            .with_resources(BTreeMap::from([
                (RESOURCE_PAGE_TITLE_SEPARATOR.to_string(), " | ".to_string()),
                (RESOURCE_PAGE_TITLE_POSTFIX.to_string(), "Example".to_string()),
            ])),
    )
}

/// A registry with an `Article` entity type and its view mapping on top of
/// the built-ins.
#[allow(dead_code)]
pub fn article_registry() -> ViewModelRegistry {
    let registry = ViewModelRegistry::create();
    registry.register(ModelDefinition::entity("Article").with_semantic_name("s:Article"));
    registry.register_view(ViewKey::new("Core", "Entity", "Article"), "Article");
    registry
}
