//! Validated domain model for the rules document.
//!
//! Immutable once constructed: the store replaces the whole document on
//! reload, never mutates it in place. All string matching here is
//! case-insensitive.

use crate::descriptor::ClassDescriptor;
use crate::types::{Layer, QuickFix};
use std::collections::HashMap;

/// The complete, swappable configuration snapshot driving classification,
/// call validation, the business-logic heuristic, and message formatting.
#[derive(Debug, Clone)]
pub struct RuleDocument {
    /// Informational version string.
    pub version: String,
    /// Informational description.
    pub description: String,
    /// Layer definitions in declaration order (order = match precedence).
    layers: Vec<(Layer, LayerDefinition)>,
    /// Global rules.
    pub global: GlobalRules,
    /// Violation message templates keyed by `"{FROM}_TO_{TO}"` or `"GENERIC"`.
    violation_messages: HashMap<String, String>,
    /// Quick fixes keyed by fix key.
    quick_fixes: HashMap<String, QuickFix>,
}

impl RuleDocument {
    /// Assembles a document. Layer order is preserved as given.
    #[must_use]
    pub fn new(
        version: String,
        description: String,
        layers: Vec<(Layer, LayerDefinition)>,
        global: GlobalRules,
        violation_messages: HashMap<String, String>,
        quick_fixes: HashMap<String, QuickFix>,
    ) -> Self {
        Self {
            version,
            description,
            layers,
            global,
            violation_messages,
            quick_fixes,
        }
    }

    /// Layer definitions in declaration order.
    pub fn layers(&self) -> impl Iterator<Item = (Layer, &LayerDefinition)> {
        self.layers.iter().map(|(layer, def)| (*layer, def))
    }

    /// Looks up the definition for a layer, if the document declares one.
    #[must_use]
    pub fn layer_definition(&self, layer: Layer) -> Option<&LayerDefinition> {
        self.layers
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, def)| def)
    }

    /// Looks up a violation message template by key.
    #[must_use]
    pub fn violation_message(&self, key: &str) -> Option<&str> {
        self.violation_messages.get(key).map(String::as_str)
    }

    /// Looks up a quick fix by key.
    #[must_use]
    pub fn quick_fix(&self, key: &str) -> Option<&QuickFix> {
        self.quick_fixes.get(key)
    }
}

/// One layer's definition: detection patterns, allowed callees, and
/// layer-specific rules.
#[derive(Debug, Clone, Default)]
pub struct LayerDefinition {
    /// Display name.
    pub name: String,
    /// Description of the layer's role.
    pub description: String,
    /// Detection patterns.
    pub detection: LayerDetection,
    /// Layers this layer may legally call.
    pub allowed_calls: Vec<Layer>,
    /// Layer-specific rules.
    pub rules: LayerRules,
}

impl LayerDefinition {
    /// Whether a call from this layer into `target` is whitelisted.
    #[must_use]
    pub fn allows_call_to(&self, target: Layer) -> bool {
        self.allowed_calls.contains(&target)
    }
}

/// Detection patterns identifying a class's layer.
///
/// A descriptor matches when any of the three independent checks matches
/// (class name, package, annotations). A definition whose pattern lists are
/// all empty can never match, which is a valid state for layers assigned
/// some other way.
#[derive(Debug, Clone, Default)]
pub struct LayerDetection {
    /// Simple name ends with any of these.
    pub name_suffixes: Vec<String>,
    /// Simple name starts with any of these.
    pub name_prefixes: Vec<String>,
    /// Simple name contains any of these.
    pub name_contains: Vec<String>,
    /// Package name contains any of these.
    pub package_contains: Vec<String>,
    /// Package name equals any of these.
    pub package_exact: Vec<String>,
    /// Any annotation qualified name contains or equals any of these.
    pub annotations: Vec<String>,
}

impl LayerDetection {
    /// Tests a descriptor against this detection rule (case-insensitive).
    #[must_use]
    pub fn matches(&self, descriptor: &ClassDescriptor) -> bool {
        self.matches_class_name(&descriptor.simple_name)
            || self.matches_package(&descriptor.package_name)
            || self.matches_annotations(&descriptor.annotations)
    }

    fn matches_class_name(&self, simple_name: &str) -> bool {
        let name = simple_name.to_lowercase();
        self.name_suffixes
            .iter()
            .any(|s| name.ends_with(&s.to_lowercase()))
            || self
                .name_prefixes
                .iter()
                .any(|p| name.starts_with(&p.to_lowercase()))
            || self
                .name_contains
                .iter()
                .any(|c| name.contains(&c.to_lowercase()))
    }

    fn matches_package(&self, package_name: &str) -> bool {
        let package = package_name.to_lowercase();
        self.package_contains
            .iter()
            .any(|c| package.contains(&c.to_lowercase()))
            || self
                .package_exact
                .iter()
                .any(|e| package == e.to_lowercase())
    }

    fn matches_annotations(&self, annotations: &[String]) -> bool {
        annotations.iter().any(|qualified| {
            let qualified = qualified.to_lowercase();
            self.annotations
                .iter()
                .any(|pattern| qualified.contains(&pattern.to_lowercase()))
        })
    }
}

/// Layer-specific rules.
#[derive(Debug, Clone, Default)]
pub struct LayerRules {
    /// Whether business logic is prohibited in this layer.
    pub business_logic_prohibited: bool,
    /// Message template for business-logic violations (`{className}`).
    pub business_logic_message: String,
    /// Method-name substrings suggesting business logic.
    pub business_logic_patterns: Vec<String>,
    /// Method-name substrings suggesting direct data access (CRUD verbs).
    pub direct_data_access_patterns: Vec<String>,
    /// Method-name substrings confirming data access (sql/db tokens).
    pub direct_data_access_indicators: Vec<String>,
}

/// Global (cross-layer) rules.
#[derive(Debug, Clone, Default)]
pub struct GlobalRules {
    /// Business-logic detection thresholds.
    pub thresholds: BusinessLogicThresholds,
    /// Package prefixes treated as standard-library calls.
    pub java_library_packages: Vec<String>,
    /// Patterns identifying database-related classes.
    pub database_patterns: DatabasePatterns,
    /// Sound configuration, carried for the (excluded) editor plumbing.
    pub sound: SoundConfiguration,
}

/// Thresholds for the business-logic heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessLogicThresholds {
    /// Allowed `if` statements per method.
    pub if_statements: u32,
    /// Allowed `switch` statements per method.
    pub switch_statements: u32,
    /// Allowed loop statements per method.
    pub loop_statements: u32,
    /// Allowed assignment expressions per method.
    pub assignment_expressions: u32,
    /// Allowed binary expressions per method.
    pub binary_expressions: u32,
}

impl BusinessLogicThresholds {
    /// Composite branching budget: if + switch + loop thresholds.
    ///
    /// The heuristic compares a method's summed branching score against this
    /// sum, not each category against its own threshold.
    #[must_use]
    pub fn complexity_budget(self) -> u32 {
        self.if_statements + self.switch_statements + self.loop_statements
    }
}

/// Patterns identifying database-related classes.
#[derive(Debug, Clone, Default)]
pub struct DatabasePatterns {
    /// Class-name fragments (e.g., `Repository`, `JdbcTemplate`).
    pub class_names: Vec<String>,
    /// Package fragments (e.g., `java.sql`).
    pub packages: Vec<String>,
}

/// Sound configuration for the (excluded) sound-on-hover feature.
#[derive(Debug, Clone)]
pub struct SoundConfiguration {
    /// Whether violation sounds are enabled.
    pub enabled: bool,
    /// Playback volume in `0.0..=1.0`.
    pub volume: f32,
    /// Optional custom sound file path.
    pub sound_file: Option<String>,
}

impl Default for SoundConfiguration {
    fn default() -> Self {
        Self {
            enabled: false,
            volume: 0.5,
            sound_file: None,
        }
    }
}
