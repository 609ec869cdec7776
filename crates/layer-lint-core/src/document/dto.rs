//! Serde DTOs mirroring the `layer-rules.json` schema exactly.
//!
//! These are parse-shaped types only: every section is optional and defaults
//! to empty, so a sparse document still deserializes. Validation and
//! conversion to the domain model happen in [`super::loader`].

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

/// Top-level rules document DTO.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleDocumentDto {
    /// Informational version string.
    pub version: String,
    /// Informational description.
    pub description: String,
    /// Layer definitions, keyed by layer name.
    ///
    /// Declaration order determines match precedence, so the map is
    /// deserialized into an order-preserving vector of pairs.
    #[serde(deserialize_with = "ordered_layers")]
    pub layers: Vec<(String, LayerDefinitionDto)>,
    /// Global (cross-layer) rules.
    pub global_rules: GlobalRulesDto,
    /// Violation message templates keyed by `"{FROM}_TO_{TO}"` or `"GENERIC"`.
    pub violation_messages: HashMap<String, String>,
    /// Quick-fix entries keyed by fix key.
    pub quick_fixes: HashMap<String, QuickFixDto>,
}

/// One layer definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerDefinitionDto {
    /// Display name.
    pub name: String,
    /// Description of the layer's role.
    pub description: String,
    /// Detection patterns.
    pub detection: LayerDetectionDto,
    /// Layer keys this layer may legally call.
    pub allowed_calls: Vec<String>,
    /// Layer-specific rules.
    pub rules: LayerRulesDto,
}

/// Detection patterns for a layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerDetectionDto {
    /// Class-name patterns.
    pub class_name_patterns: ClassNamePatternsDto,
    /// Package patterns.
    pub package_patterns: PackagePatternsDto,
    /// Annotation qualified-name fragments.
    pub annotations: Vec<String>,
}

/// Class-name pattern lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassNamePatternsDto {
    /// Simple name ends with any of these.
    pub suffixes: Vec<String>,
    /// Simple name starts with any of these.
    pub prefixes: Vec<String>,
    /// Simple name contains any of these.
    pub contains: Vec<String>,
}

/// Package pattern lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackagePatternsDto {
    /// Package name contains any of these.
    pub contains: Vec<String>,
    /// Package name equals any of these.
    pub exact: Vec<String>,
}

/// Layer-specific rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerRulesDto {
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

/// Global rules section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalRulesDto {
    /// Business-logic detection thresholds.
    pub business_logic_detection: BusinessLogicDetectionDto,
    /// Package prefixes treated as standard-library calls.
    pub java_library_packages: Vec<String>,
    /// Patterns identifying database-related classes.
    pub database_related_patterns: DatabasePatternsDto,
    /// Sound configuration (carried as data; playback is out of scope here).
    pub sound_configuration: SoundConfigurationDto,
}

/// Business-logic detection thresholds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessLogicDetectionDto {
    /// Thresholds on branching constructs.
    pub complex_logic_threshold: ComplexLogicThresholdDto,
    /// Thresholds on calculation constructs.
    pub calculation_logic_threshold: CalculationLogicThresholdDto,
}

/// Branching-construct thresholds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplexLogicThresholdDto {
    /// Allowed `if` statements.
    pub if_statements: u32,
    /// Allowed `switch` statements.
    pub switch_statements: u32,
    /// Allowed loop statements.
    pub loop_statements: u32,
}

/// Calculation-construct thresholds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationLogicThresholdDto {
    /// Allowed assignment expressions.
    pub assignment_expressions: u32,
    /// Allowed binary expressions.
    pub binary_expressions: u32,
}

/// Database-related class patterns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabasePatternsDto {
    /// Class-name fragments.
    pub class_names: Vec<String>,
    /// Package fragments.
    pub packages: Vec<String>,
}

/// Sound configuration for the (excluded) sound-on-hover feature.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoundConfigurationDto {
    /// Whether violation sounds are enabled.
    pub enabled: bool,
    /// Playback volume in `0.0..=1.0`.
    pub volume: f32,
    /// Optional custom sound file path.
    pub sound_file: Option<String>,
}

impl Default for SoundConfigurationDto {
    fn default() -> Self {
        Self {
            enabled: false,
            volume: 0.5,
            sound_file: None,
        }
    }
}

/// Quick-fix entry DTO.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickFixDto {
    /// Action name.
    pub name: String,
    /// Action description.
    pub description: String,
}

/// Deserializes the `layers` JSON object into a vector of `(key, value)`
/// pairs, preserving declaration order.
///
/// `serde_json`'s default map type does not preserve key order, and order is
/// load-bearing here: the classifier returns the first matching layer.
fn ordered_layers<'de, D>(deserializer: D) -> Result<Vec<(String, LayerDefinitionDto)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedLayersVisitor;

    impl<'de> Visitor<'de> for OrderedLayersVisitor {
        type Value = Vec<(String, LayerDefinitionDto)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of layer name to layer definition")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, LayerDefinitionDto>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedLayersVisitor)
}
