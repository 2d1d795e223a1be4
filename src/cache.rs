//! Identity-aware memoization of assembled view models.
//!
//! Assembly is a pure function of its input node, so racing builders for the
//! same key are harmless: [`ModelCache::add_and_get`] commits at most one
//! value per key and hands every caller the committed instance. A
//! [`ConditionalKey`] whose skip flag is set is assembled but never stored;
//! the flag accumulates bottom-up through a [`ConditionalKeyBuilder`] while
//! a page or region tree is built, so one never-cacheable descendant keeps
//! the whole page out of the durable store.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Composite identity of one assembled model: content id, resolution
/// context, and optionally the requested target type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub id: String,
    pub localization_id: String,
    pub model_type: Option<String>,
}

impl CacheKey {
    pub fn new(id: &str, localization_id: &str) -> Self {
        CacheKey {
            id: id.to_string(),
            localization_id: localization_id.to_string(),
            model_type: None,
        }
    }

    pub fn with_model_type(mut self, model_type: Option<&str>) -> Self {
        self.model_type = model_type.map(str::to_string);
        self
    }
}

/// A [`CacheKey`] plus the skip-caching verdict for the value built under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalKey {
    pub key: CacheKey,
    pub skip_caching: bool,
}

impl ConditionalKey {
    pub fn new(key: CacheKey, skip_caching: bool) -> Self {
        ConditionalKey { key, skip_caching }
    }

    /// A key whose value is always cacheable.
    pub fn cached(key: CacheKey) -> Self {
        ConditionalKey {
            key,
            skip_caching: false,
        }
    }
}

/// Accumulates never-cacheable observations while an assembly tree is built.
/// The flag only ever ORs upward; nothing can reset it.
#[derive(Debug, Clone)]
pub struct ConditionalKeyBuilder {
    key: CacheKey,
    skip_caching: bool,
}

impl ConditionalKeyBuilder {
    pub fn new(key: CacheKey) -> Self {
        ConditionalKeyBuilder {
            key,
            skip_caching: false,
        }
    }

    pub fn skip_caching(&mut self, skip: bool) {
        self.skip_caching |= skip;
    }

    pub fn is_skip_caching(&self) -> bool {
        self.skip_caching
    }

    pub fn build(self) -> ConditionalKey {
        ConditionalKey::new(self.key, self.skip_caching)
    }
}

/// Memoization store for one model family (pages or entities).
///
/// The mutex covers both the read-check and the insert for a key, giving
/// at-most-one-commit-per-key. Eviction policy is the embedding
/// application's concern; the store itself only grows or is cleared.
pub struct ModelCache<T> {
    store: Mutex<HashMap<CacheKey, T>>,
}

impl<T> Default for ModelCache<T> {
    fn default() -> Self {
        ModelCache {
            store: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Clone> ModelCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absence is a normal outcome, never an error.
    pub fn get(&self, key: &CacheKey) -> Option<T> {
        self.store.lock().get(key).cloned()
    }

    /// Insert-if-absent, returning the authoritative stored value. With the
    /// skip flag set the value is handed back without touching the store.
    pub fn add_and_get(&self, key: ConditionalKey, value: T) -> T {
        if key.skip_caching {
            tracing::trace!("Skipping cache insert for {:?}", key.key);
            return value;
        }
        let mut store = self.store.lock();
        store.entry(key.key).or_insert(value).clone()
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn clear(&self) {
        self.store.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_key_equality_over_all_components() {
        let base = CacheKey::new("42", "1");
        assert_eq!(base, CacheKey::new("42", "1"));
        assert_ne!(base, CacheKey::new("42", "2"));
        assert_ne!(
            base,
            CacheKey::new("42", "1").with_model_type(Some("Article"))
        );
    }

    #[test]
    fn test_first_commit_wins() {
        let cache: ModelCache<Arc<String>> = ModelCache::new();
        let key = CacheKey::new("42", "1");

        let first = cache.add_and_get(
            ConditionalKey::cached(key.clone()),
            Arc::new("first".to_string()),
        );
        let second = cache.add_and_get(
            ConditionalKey::cached(key.clone()),
            Arc::new("second".to_string()),
        );

        // The racer's value is discarded; everyone sees the committed one.
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, "first");
        assert!(Arc::ptr_eq(&first, &cache.get(&key).unwrap()));
    }

    #[test]
    fn test_skip_caching_bypasses_store() {
        let cache: ModelCache<Arc<String>> = ModelCache::new();
        let key = CacheKey::new("42", "1");

        let value = cache.add_and_get(
            ConditionalKey::new(key.clone(), true),
            Arc::new("volatile".to_string()),
        );
        assert_eq!(*value, "volatile");
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_builder_flag_only_ors_upward() {
        let mut builder = ConditionalKeyBuilder::new(CacheKey::new("42", "1"));
        builder.skip_caching(false);
        assert!(!builder.is_skip_caching());
        builder.skip_caching(true);
        builder.skip_caching(false);
        assert!(builder.is_skip_caching());
        assert!(builder.build().skip_caching);
    }

    #[test]
    fn test_concurrent_access() {
        use std::thread;

        let cache: Arc<ModelCache<Arc<String>>> = Arc::new(ModelCache::new());

        let handles: Vec<_> = (0..5)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let key = CacheKey::new("shared", "1");
                    cache.add_and_get(
                        ConditionalKey::cached(key),
                        Arc::new(format!("builder-{i}")),
                    )
                })
            })
            .collect();

        let results: Vec<Arc<String>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Exactly one value was committed; every thread observed it.
        for result in &results {
            assert!(Arc::ptr_eq(result, &results[0]));
        }
        assert_eq!(cache.len(), 1);
    }
}
