//! Call-edge validation against the active document's allowed-call lists.

use crate::document::RuleDocument;
use crate::types::Layer;

/// Decides whether a call from `from` into `to` is legal.
///
/// This is an advisory lint, so every unconfigured situation validates as
/// legal:
///
/// - no active document → `true`,
/// - `from == Unknown` (unclassified callers are not policed) → `true`,
/// - `from` has no definition in the document → `true`,
/// - `to == Unknown` (unclassified callees, e.g. framework classes) → `true`.
///
/// Otherwise the edge is legal iff `to` is in the caller layer's
/// `allowedCalls` list. The two `Unknown` rules overlap in intent but are
/// kept as separate checks for compatibility with observed behavior.
#[must_use]
pub fn is_valid_call(document: Option<&RuleDocument>, from: Layer, to: Layer) -> bool {
    let Some(document) = document else {
        return true;
    };

    if from == Layer::Unknown {
        return true;
    }

    let Some(definition) = document.layer_definition(from) else {
        return true;
    };

    if to == Layer::Unknown {
        return true;
    }

    definition.allows_call_to(to)
}
