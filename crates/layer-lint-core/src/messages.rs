//! Violation and quick-fix message formatting.
//!
//! Templates come from the rules document. Placeholders are fixed and known
//! at design time, so substitution is literal find-and-replace, not a
//! templating engine. Every lookup has a fallback; formatting never fails and
//! never returns an empty string.

use crate::document::RuleDocument;
use crate::types::Layer;

/// Last-resort violation message when the document is absent or defines
/// neither a specific nor a `GENERIC` template.
const FALLBACK_VIOLATION: &str =
    "{fromClass} ({fromLayer}) must not call {toClass} ({toLayer})";

/// Last-resort business-logic message.
const FALLBACK_BUSINESS_LOGIC: &str = "{className} contains business logic not allowed in its layer";

/// Formats the violation message for an illegal `from → to` call edge.
///
/// Template lookup: `"{FROM}_TO_{TO}"` → `"GENERIC"` → hard-coded literal.
/// Substitutes `{fromLayer}`, `{toLayer}`, `{fromClass}`, `{toClass}` and
/// `{allowedLayers}` (the caller layer's allowed-calls list, comma-joined).
#[must_use]
pub fn violation_message(
    document: Option<&RuleDocument>,
    from: Layer,
    to: Layer,
    from_class: &str,
    to_class: &str,
) -> String {
    let template = document
        .and_then(|doc| {
            let key = format!("{}_TO_{}", from.key(), to.key());
            doc.violation_message(&key)
                .or_else(|| doc.violation_message("GENERIC"))
        })
        .unwrap_or(FALLBACK_VIOLATION);

    let allowed = document
        .and_then(|doc| doc.layer_definition(from))
        .map(|def| {
            def.allowed_calls
                .iter()
                .map(|l| l.key())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    template
        .replace("{fromLayer}", from.key())
        .replace("{toLayer}", to.key())
        .replace("{fromClass}", from_class)
        .replace("{toClass}", to_class)
        .replace("{allowedLayers}", &allowed)
}

/// Formats the business-logic violation message for a class in `layer`.
///
/// Uses the layer's `businessLogicMessage` template when configured and
/// non-empty, substituting `{className}`; otherwise falls back to a literal.
#[must_use]
pub fn business_logic_message(
    document: Option<&RuleDocument>,
    layer: Layer,
    class_name: &str,
) -> String {
    let template = document
        .and_then(|doc| doc.layer_definition(layer))
        .map(|def| def.rules.business_logic_message.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or(FALLBACK_BUSINESS_LOGIC);

    template.replace("{className}", class_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::dto::RuleDocumentDto;

    fn document(json: &str) -> RuleDocument {
        let dto: RuleDocumentDto = serde_json::from_str(json).unwrap();
        crate::document::load(dto).unwrap()
    }

    #[test]
    fn specific_template_wins_over_generic() {
        let doc = document(
            r#"{
                "violationMessages": {
                    "CONTROLLER_TO_API": "controller {fromClass} hit service {toClass}",
                    "GENERIC": "generic"
                }
            }"#,
        );
        let msg = violation_message(
            Some(&doc),
            Layer::Controller,
            Layer::Api,
            "UserController",
            "UserService",
        );
        assert_eq!(msg, "controller UserController hit service UserService");
    }

    #[test]
    fn falls_back_to_generic_template() {
        let doc = document(
            r#"{
                "layers": { "CONTROLLER": { "allowedCalls": ["DTO"] } },
                "violationMessages": {
                    "GENERIC": "{fromLayer}->{toLayer}: only {allowedLayers}"
                }
            }"#,
        );
        let msg = violation_message(Some(&doc), Layer::Controller, Layer::Dao, "A", "B");
        assert_eq!(msg, "CONTROLLER->DAO: only DTO");
    }

    #[test]
    fn falls_back_to_literal_when_no_templates() {
        let doc = document("{}");
        let msg = violation_message(Some(&doc), Layer::Api, Layer::Dao, "A", "B");
        assert_eq!(msg, "A (API) must not call B (DAO)");
        assert!(!msg.is_empty());
    }

    #[test]
    fn no_document_uses_literal() {
        let msg = violation_message(None, Layer::Flow, Layer::Controller, "F", "C");
        assert_eq!(msg, "F (FLOW) must not call C (CONTROLLER)");
    }

    #[test]
    fn all_placeholders_substitute() {
        let doc = document(
            r#"{
                "layers": { "API": { "allowedCalls": ["DTO", "FLOW"] } },
                "violationMessages": {
                    "GENERIC": "{fromClass}/{toClass}/{fromLayer}/{toLayer}/{allowedLayers}"
                }
            }"#,
        );
        let msg = violation_message(Some(&doc), Layer::Api, Layer::Dao, "S", "R");
        assert_eq!(msg, "S/R/API/DAO/DTO, FLOW");
    }

    #[test]
    fn business_logic_message_uses_layer_template() {
        let doc = document(
            r#"{
                "layers": {
                    "DAO": { "rules": { "businessLogicMessage": "no logic in {className}" } }
                }
            }"#,
        );
        assert_eq!(
            business_logic_message(Some(&doc), Layer::Dao, "UserRepository"),
            "no logic in UserRepository"
        );
    }

    #[test]
    fn business_logic_message_falls_back() {
        let doc = document("{}");
        let msg = business_logic_message(Some(&doc), Layer::Dto, "UserDto");
        assert!(msg.contains("UserDto"));
        assert!(!msg.is_empty());

        let msg = business_logic_message(None, Layer::Dto, "UserDto");
        assert!(msg.contains("UserDto"));
    }

    #[test]
    fn empty_configured_template_falls_back() {
        let doc = document(
            r#"{ "layers": { "DAO": { "rules": { "businessLogicMessage": "" } } } }"#,
        );
        let msg = business_logic_message(Some(&doc), Layer::Dao, "Repo");
        assert!(!msg.is_empty());
        assert!(msg.contains("Repo"));
    }
}
