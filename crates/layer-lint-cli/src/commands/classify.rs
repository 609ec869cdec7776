//! Classify command: run one descriptor through the engine.

use layer_lint_core::{ClassDescriptor, LayerEngine, RuleStore};
use std::sync::Arc;

/// Runs the classify command and prints the resulting layer.
pub fn run(
    store: Arc<RuleStore>,
    name: &str,
    package: &str,
    qualified: Option<String>,
    annotations: Vec<String>,
) {
    store.load();
    let engine = LayerEngine::new(store);

    let qualified = qualified.unwrap_or_else(|| {
        if package.is_empty() {
            name.to_string()
        } else {
            format!("{package}.{name}")
        }
    });

    let mut descriptor = ClassDescriptor::new(name, qualified, package);
    descriptor.annotations = annotations;

    let layer = engine.classify(&descriptor);
    println!("{} -> {layer}", descriptor.qualified_name);
}
