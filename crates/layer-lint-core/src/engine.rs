//! Engine facade: the adapter-facing API.
//!
//! Inspection adapters (host-IDE glue, CLI commands) hold one [`LayerEngine`]
//! per process and call into it per class or per call site. Every operation
//! is a synchronous, in-memory computation against the currently active
//! document; none blocks on I/O.

use crate::classifier::LayerClassifier;
use crate::descriptor::{ClassDescriptor, MethodCounts};
use crate::store::RuleStore;
use crate::types::{Layer, QuickFix};
use crate::{heuristic, messages, validator};
use std::sync::Arc;

/// The layer-lint engine: classification, call validation, heuristics and
/// message formatting over one shared [`RuleStore`].
pub struct LayerEngine {
    store: Arc<RuleStore>,
    classifier: LayerClassifier,
}

impl LayerEngine {
    /// Creates an engine on top of `store`.
    ///
    /// The classifier's cache is wired to the store's invalidation broadcast,
    /// so hot reloads are picked up automatically once [`RuleStore::watch`]
    /// is running.
    #[must_use]
    pub fn new(store: Arc<RuleStore>) -> Self {
        let classifier = LayerClassifier::new(Arc::clone(&store));
        Self { store, classifier }
    }

    /// Convenience constructor: default store location, initial load, and
    /// best-effort watching.
    #[must_use]
    pub fn bootstrap() -> Self {
        let store = Arc::new(RuleStore::from_default_location());
        store.load();
        if let Err(err) = store.watch() {
            tracing::warn!("rules hot reload disabled: {err}");
        }
        Self::new(store)
    }

    /// The underlying rule store (configuration management, reload).
    #[must_use]
    pub fn store(&self) -> &Arc<RuleStore> {
        &self.store
    }

    /// Classifies a class into a layer. See [`LayerClassifier::classify`].
    #[must_use]
    pub fn classify(&self, descriptor: &ClassDescriptor) -> Layer {
        self.classifier.classify(descriptor)
    }

    /// Whether a call edge `from → to` is legal. See
    /// [`validator::is_valid_call`].
    #[must_use]
    pub fn is_valid_call(&self, from: Layer, to: Layer) -> bool {
        validator::is_valid_call(self.store.active().as_deref(), from, to)
    }

    /// Whether the class trips the business-logic thresholds.
    ///
    /// Classifies `descriptor` first; the check applies only to layers whose
    /// definition prohibits business logic.
    #[must_use]
    pub fn has_business_logic(
        &self,
        descriptor: &ClassDescriptor,
        methods: &[MethodCounts],
    ) -> bool {
        let layer = self.classify(descriptor);
        heuristic::has_business_logic(self.store.active().as_deref(), layer, methods)
    }

    /// Whether a method name matches the layer's business-logic patterns.
    #[must_use]
    pub fn has_business_logic_pattern(&self, method_name: &str, layer: Layer) -> bool {
        heuristic::has_business_logic_pattern(self.store.active().as_deref(), method_name, layer)
    }

    /// Whether a method name matches both a data-access pattern and indicator.
    #[must_use]
    pub fn has_direct_data_access_pattern(&self, method_name: &str, layer: Layer) -> bool {
        heuristic::has_direct_data_access_pattern(
            self.store.active().as_deref(),
            method_name,
            layer,
        )
    }

    /// Whether a class looks database-related.
    #[must_use]
    pub fn is_database_related(&self, descriptor: &ClassDescriptor) -> bool {
        heuristic::is_database_related(
            self.store.active().as_deref(),
            &descriptor.simple_name,
            &descriptor.package_name,
        )
    }

    /// Whether a qualified class name belongs to a configured library package.
    #[must_use]
    pub fn is_library_call(&self, qualified_name: &str) -> bool {
        heuristic::is_library_call(self.store.active().as_deref(), qualified_name)
    }

    /// Formats the violation message for an illegal call edge.
    #[must_use]
    pub fn violation_message(
        &self,
        from: Layer,
        to: Layer,
        from_class: &str,
        to_class: &str,
    ) -> String {
        messages::violation_message(
            self.store.active().as_deref(),
            from,
            to,
            from_class,
            to_class,
        )
    }

    /// Formats the business-logic violation message for a class.
    #[must_use]
    pub fn business_logic_message(&self, layer: Layer, class_name: &str) -> String {
        messages::business_logic_message(self.store.active().as_deref(), layer, class_name)
    }

    /// Looks up a quick fix by key.
    #[must_use]
    pub fn quick_fix(&self, key: &str) -> Option<QuickFix> {
        self.store
            .active()
            .and_then(|doc| doc.quick_fix(key).cloned())
    }
}
