//! Check-call command: validate one call edge between two layers.

use anyhow::{bail, Result};
use layer_lint_core::{Layer, LayerEngine, RuleStore};
use std::sync::Arc;

/// Runs the check-call command.
///
/// Returns whether the edge is legal; on violation the formatted message is
/// printed so the caller can exit non-zero.
pub fn run(
    store: Arc<RuleStore>,
    from: &str,
    to: &str,
    from_class: &str,
    to_class: &str,
) -> Result<bool> {
    let from = parse_layer(from)?;
    let to = parse_layer(to)?;

    store.load();
    let engine = LayerEngine::new(store);

    if engine.is_valid_call(from, to) {
        println!("{from} -> {to}: allowed");
        Ok(true)
    } else {
        println!(
            "{from} -> {to}: violation\n  {}",
            engine.violation_message(from, to, from_class, to_class)
        );
        Ok(false)
    }
}

fn parse_layer(value: &str) -> Result<Layer> {
    match Layer::parse_key(value) {
        Some(layer) => Ok(layer),
        None => bail!("unknown layer `{value}`, expected CONTROLLER, DTO, API, FLOW, DAO or UNKNOWN"),
    }
}
