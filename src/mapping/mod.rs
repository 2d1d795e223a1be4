//! The content-model assembly pipeline.
//!
//! This module turns generic content nodes into typed view models:
//!
//! - [`schema`] - Semantic schemas and the frozen per-locale
//!   [`SchemaRegistry`](schema::SchemaRegistry)
//! - [`fields`] - Field resolution (inherited-schema merge, last-wins) and
//!   hydration over the generic field-value tree
//! - [`registry`] - [`ViewModelRegistry`]: view-descriptor and semantic-name
//!   lookup tables (accessible via the [`MODEL_TYPES`] singleton)
//! - [`assembler`] - [`ModelAssembler`]: entity/page/region orchestration
//!   with identity-aware caching
//!
//! ## Type Registration
//!
//! Concrete model types are registered at startup, typically once per
//! application area:
//!
//! ```rust
//! use vitrine_core::mapping::{
//!     registry::{ModelDefinition, ViewKey},
//!     MODEL_TYPES,
//! };
//!
//! MODEL_TYPES.register(
//!     ModelDefinition::entity("Article").with_semantic_name("s:Article"),
//! );
//! MODEL_TYPES.register_view(ViewKey::new("Core", "Entity", "Article"), "Article");
//! ```
//!
//! Region types carry their factory in the definition, so the
//! single-name-argument construction contract is checked when the type is
//! registered rather than when a region is assembled:
//!
//! ```rust
//! use vitrine_core::{
//!     mapping::{registry::ModelDefinition, MODEL_TYPES},
//!     model::view::RegionModel,
//! };
//!
//! fn hero_region(name: &str) -> RegionModel {
//!     RegionModel::new(name)
//! }
//!
//! MODEL_TYPES
//!     .register_region(ModelDefinition::region("HeroRegion", hero_region))
//!     .unwrap();
//! ```

pub mod assembler;
pub mod fields;
pub mod registry;
pub mod schema;

pub use assembler::ModelAssembler;
pub use registry::{ModelDefinition, ViewModelRegistry, MODEL_TYPES};
pub use schema::{FieldSemantics, SemanticField, SemanticSchema};
