//! Layer classification with memoization.
//!
//! Classification walks the active document's layer definitions in
//! declaration order and returns the first match; that is the tie-break rule
//! when a class satisfies several layers' patterns. Results are cached by
//! fully qualified name; the cache is cleared in full whenever the store
//! swaps documents.

use crate::descriptor::ClassDescriptor;
use crate::store::RuleStore;
use crate::types::Layer;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, Weak};

type Cache = RwLock<HashMap<String, Layer>>;

/// Maps [`ClassDescriptor`]s to [`Layer`]s against the active rules document.
pub struct LayerClassifier {
    store: Arc<RuleStore>,
    cache: Arc<Cache>,
}

impl LayerClassifier {
    /// Creates a classifier reading from `store`.
    ///
    /// Registers an invalidation hook on the store that clears the
    /// classification cache after every document swap. The hook holds only a
    /// weak reference, so a dropped classifier leaves no work behind.
    #[must_use]
    pub fn new(store: Arc<RuleStore>) -> Self {
        let cache: Arc<Cache> = Arc::new(RwLock::new(HashMap::new()));
        let weak: Weak<Cache> = Arc::downgrade(&cache);
        store.subscribe(Box::new(move || {
            if let Some(cache) = weak.upgrade() {
                cache
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clear();
                tracing::debug!("classification cache cleared");
            }
        }));
        Self { store, cache }
    }

    /// Classifies a class into a layer.
    ///
    /// Returns [`Layer::Unknown`] when no document is active or no detection
    /// rule matches. Cached results are returned as-is until the store
    /// broadcasts an invalidation; staleness is never re-checked per lookup.
    #[must_use]
    pub fn classify(&self, descriptor: &ClassDescriptor) -> Layer {
        let Some(document) = self.store.active() else {
            return Layer::Unknown;
        };

        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&descriptor.qualified_name)
        {
            return *cached;
        }

        // First declared match wins.
        let layer = document
            .layers()
            .find(|(_, def)| def.detection.matches(descriptor))
            .map_or(Layer::Unknown, |(layer, _)| layer);

        // Write-through; a concurrent duplicate computation for the same key
        // is tolerated, last write wins.
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(descriptor.qualified_name.clone(), layer);

        layer
    }

    /// Number of cached classifications. Test and diagnostics aid.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
