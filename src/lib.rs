//! # vitrine-core
//!
//! A Rust library for transforming loosely-typed CMS content payloads into
//! strongly-typed, renderable view models.
//!
//! ## Overview
//!
//! vitrine-core sits between an upstream content repository and a rendering
//! layer. The repository hands over generic trees of pages, regions and
//! entities (plus a hierarchical site map); this crate resolves each node to
//! a concrete model type, hydrates its semantic fields, and memoizes the
//! result under an identity-aware cache key. A second subsystem derives
//! navigation link sets (top, context, breadcrumb) from the site map, with
//! visibility filtering and a transparent static fallback.
//!
//! ### Key Features
//!
//! - **Semantic mapping**: named field-mapping schemas translate generic
//!   field-value trees into typed field maps, merging inherited schemas with
//!   deterministic last-wins collision handling
//! - **Type registry**: MVC target descriptors resolve to registered model
//!   definitions; no runtime reflection, factories are registered at startup
//! - **Identity-aware caching**: assembled models are memoized per
//!   (id, localization, requested type) with an at-most-one-commit-per-key
//!   discipline and per-type "never cache" overrides
//! - **Navigation resolution**: top/context/breadcrumb link sets computed
//!   from a sitemap taxonomy, falling back to a precomputed static provider
//!   whenever the dynamic source is unavailable
//!
//! ## Architecture
//!
//! - [`model`]: input DTOs ([`model::data`]) and typed output models
//!   ([`model::view`])
//! - [`mapping`]: schema registry, field resolution, the model type registry
//!   and the [`ModelAssembler`](mapping::ModelAssembler)
//! - [`cache`]: cache keys and the memoization store
//! - [`navigation`]: sitemap structures and the dynamic navigation provider
//! - [`localization`]: the per-site resolution context
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use vitrine_core::{
//!     localization::Localization,
//!     mapping::{ModelAssembler, MODEL_TYPES},
//!     model::data::PageData,
//! };
//!
//! let localization = Arc::new(Localization::new("1", "/"));
//! let assembler = ModelAssembler::new(localization, MODEL_TYPES.clone());
//!
//! let data = PageData {
//!     id: "640".to_string(),
//!     title: Some("Home".to_string()),
//!     url_path: "/index.html".to_string(),
//!     ..Default::default()
//! };
//! let page = assembler.build_page(None, &data).unwrap();
//! assert_eq!(page.id, "640");
//! ```
//!
//! Model types beyond the built-in generic page/region/entity definitions are
//! registered on [`MODEL_TYPES`](mapping::MODEL_TYPES) during application
//! startup; see [`mapping::registry`].

pub mod cache;
pub mod config;
pub mod error;
pub mod localization;
pub mod mapping;
pub mod model;
pub mod navigation;
pub mod paths;
#[cfg(test)]
mod tests;

pub use error::*;
