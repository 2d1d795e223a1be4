//! Navigation-tree resolution.
//!
//! Derives contextual link sets from a hierarchical site map:
//!
//! - [`sitemap`] - [`SitemapItem`] trees, depth-guarded search, [`Link`] /
//!   [`NavigationLinks`] outputs
//! - [`dynamic`] - [`DynamicNavigationProvider`]: top/context/breadcrumb
//!   queries with visibility filtering and a transparent static fallback
//!
//! The dynamic provider collaborates with three external capabilities,
//! expressed as traits: the [`TaxonomySource`] that supplies the live
//! taxonomy, the [`StaticNavigationProvider`] that answers when the dynamic
//! source is unavailable, and the [`LinkResolver`] that turns sitemap URLs
//! into publishable links.

use crate::{error::VitrineError, localization::Localization};

pub mod dynamic;
pub mod sitemap;

pub use dynamic::DynamicNavigationProvider;
pub use sitemap::{Link, NavigationLinks, SitemapItem};

/// Resolves a raw URL into its publishable form.
///
/// Must be idempotent and side-effect free. An unresolvable link resolves to
/// the empty string, never `None` and never an error.
pub trait LinkResolver: Send + Sync {
    fn resolve_link(&self, url: &str, localization_id: &str) -> String;
}

/// Precomputed navigation results, used purely as fallback.
pub trait StaticNavigationProvider: Send + Sync {
    fn navigation_model(&self, localization: &Localization)
        -> Result<SitemapItem, VitrineError>;

    fn top_navigation_links(
        &self,
        request_path: &str,
        localization: &Localization,
    ) -> Result<NavigationLinks, VitrineError>;

    fn context_navigation_links(
        &self,
        request_path: &str,
        localization: &Localization,
    ) -> Result<NavigationLinks, VitrineError>;

    fn breadcrumb_navigation_links(
        &self,
        request_path: &str,
        localization: &Localization,
    ) -> Result<NavigationLinks, VitrineError>;
}

/// The dynamic taxonomy behind navigation.
///
/// `navigation_taxonomy_id` answers `None` when no taxonomy is configured
/// for the localization. `taxonomy_tree` may yield `Ok(None)` (taxonomy
/// exists but produced no tree) or fail with
/// [`VitrineError::NavigationUnavailable`]; either way the caller falls back
/// to static navigation.
pub trait TaxonomySource: Send + Sync {
    fn navigation_taxonomy_id(&self, localization: &Localization) -> Option<String>;

    fn taxonomy_tree(
        &self,
        taxonomy_id: &str,
        localization: &Localization,
    ) -> Result<Option<SitemapItem>, VitrineError>;
}
