use std::sync::Arc;

use crate::{
    config::NavigationConfig,
    error::VitrineError,
    localization::Localization,
    navigation::sitemap::{Link, NavigationLinks, SitemapItem},
    navigation::{LinkResolver, StaticNavigationProvider, TaxonomySource},
};

/// Navigation provider backed by a dynamic taxonomy source with a
/// transparent static fallback.
///
/// Every operation is a pure function of the current site-map snapshot and
/// the call context. Whenever the dynamic source is unavailable (no taxonomy
/// id configured, the lookup yields nothing, or the source errors), the
/// corresponding operation of the static provider answers instead, with the
/// same return type and no distinguishing error.
pub struct DynamicNavigationProvider {
    source: Arc<dyn TaxonomySource>,
    static_nav: Arc<dyn StaticNavigationProvider>,
    link_resolver: Arc<dyn LinkResolver>,
    config: NavigationConfig,
}

impl DynamicNavigationProvider {
    pub fn new(
        source: Arc<dyn TaxonomySource>,
        static_nav: Arc<dyn StaticNavigationProvider>,
        link_resolver: Arc<dyn LinkResolver>,
    ) -> Self {
        DynamicNavigationProvider {
            source,
            static_nav,
            link_resolver,
            config: NavigationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: NavigationConfig) -> Self {
        self.config = config;
        self
    }

    /// The dynamic taxonomy tree, or `None` with the fallback reason logged.
    fn dynamic_model(&self, localization: &Localization) -> Option<SitemapItem> {
        let Some(taxonomy_id) = self.source.navigation_taxonomy_id(localization) else {
            tracing::debug!(
                "No navigation taxonomy id configured for localization {}, \
                 falling back to static navigation",
                localization.id
            );
            return None;
        };
        match self.source.taxonomy_tree(&taxonomy_id, localization) {
            Ok(Some(tree)) => Some(tree),
            Ok(None) => {
                tracing::debug!(
                    "Taxonomy '{}' yielded no navigation tree, falling back to \
                     static navigation",
                    taxonomy_id
                );
                None
            }
            Err(error) => {
                tracing::warn!(
                    "Dynamic navigation source unavailable ({}), falling back to \
                     static navigation",
                    error
                );
                None
            }
        }
    }

    /// The full navigation tree, dynamic when available.
    pub fn navigation_model(
        &self,
        localization: &Localization,
    ) -> Result<SitemapItem, VitrineError> {
        match self.dynamic_model(localization) {
            Some(tree) => Ok(tree),
            None => self.static_nav.navigation_model(localization),
        }
    }

    /// Direct children of the root as a visible-filtered link set.
    pub fn top_navigation_links(
        &self,
        request_path: &str,
        localization: &Localization,
    ) -> Result<NavigationLinks, VitrineError> {
        match self.dynamic_model(localization) {
            Some(root) => Ok(self.visible_navigation(localization, root.items.iter())),
            None => self
                .static_nav
                .top_navigation_links(request_path, localization),
        }
    }

    /// Siblings of the node matching `request_path` (its parent's children).
    /// An unmatched pivot, or a pivot that is the root itself, yields an
    /// empty link set.
    pub fn context_navigation_links(
        &self,
        request_path: &str,
        localization: &Localization,
    ) -> Result<NavigationLinks, VitrineError> {
        match self.dynamic_model(localization) {
            Some(root) => {
                let siblings = root
                    .find_parent_of(request_path)
                    .map(|parent| parent.items.as_slice())
                    .unwrap_or_default();
                Ok(self.visible_navigation(localization, siblings.iter()))
            }
            None => self
                .static_nav
                .context_navigation_links(request_path, localization),
        }
    }

    /// Root-to-pivot breadcrumb trail. The home page is included even when
    /// it is a sibling of the trail head rather than an ancestor.
    pub fn breadcrumb_navigation_links(
        &self,
        request_path: &str,
        localization: &Localization,
    ) -> Result<NavigationLinks, VitrineError> {
        match self.dynamic_model(localization) {
            Some(root) => {
                let mut trail = root.breadcrumb_to(request_path);
                let home_on_trail = trail
                    .iter()
                    .any(|item| item.matches_url(&localization.path));
                if !home_on_trail {
                    if let Some(home) = root
                        .items
                        .iter()
                        .find(|item| item.matches_url(&localization.path))
                    {
                        trail.insert(0, home);
                    }
                }
                Ok(self.visible_navigation(localization, trail))
            }
            None => self
                .static_nav
                .breadcrumb_navigation_links(request_path, localization),
        }
    }

    /// First visible item whose URL names a canonical index page; used to
    /// rewrite directory-style URLs.
    pub fn find_index_page_url(&self, items: &[SitemapItem]) -> Option<String> {
        let suffix = self.config.index_suffix();
        items
            .iter()
            .filter(|item| item.visible)
            .find_map(|item| {
                item.url
                    .clone()
                    .filter(|url| url.ends_with(&suffix))
            })
    }

    /// Filter items down to visible, linkable entries and resolve their
    /// URLs. Source order is preserved.
    fn visible_navigation<'a>(
        &self,
        localization: &Localization,
        items: impl IntoIterator<Item = &'a SitemapItem>,
    ) -> NavigationLinks {
        let items = items
            .into_iter()
            .filter(|item| item.visible && item.has_link())
            .map(|item| Link {
                url: self
                    .link_resolver
                    .resolve_link(item.url.as_deref().unwrap_or_default(), &localization.id),
                link_text: (!item.title.is_empty()).then(|| item.title.clone()),
                alternate_text: None,
            })
            .collect();
        NavigationLinks { id: None, items }
    }
}
