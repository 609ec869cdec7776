//! DTO → domain model conversion with validation.

use crate::types::{Layer, QuickFix};

use super::dto::{GlobalRulesDto, LayerDefinitionDto, RuleDocumentDto};
use super::model::{
    BusinessLogicThresholds, DatabasePatterns, GlobalRules, LayerDefinition, LayerDetection,
    LayerRules, RuleDocument, SoundConfiguration,
};

/// Errors during DTO → domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    /// A layer key is not one of the known layer names.
    #[error("layers.{key}: unknown layer key, expected one of CONTROLLER, DTO, API, FLOW, DAO")]
    UnknownLayerKey {
        /// The offending key.
        key: String,
    },

    /// `UNKNOWN` cannot carry a definition; it is the fallback, not a layer.
    #[error("layers.UNKNOWN: the fallback layer cannot be defined in the document")]
    UnknownLayerDefined,

    /// The same layer is declared twice.
    #[error("layers.{key}: duplicate layer definition")]
    DuplicateLayer {
        /// The duplicated key.
        key: String,
    },

    /// An `allowedCalls` entry references an unknown layer.
    #[error("layers.{layer}.allowedCalls: unknown layer `{value}`")]
    UnknownAllowedCall {
        /// The layer whose list is invalid.
        layer: String,
        /// The offending entry.
        value: String,
    },
}

/// Converts a parsed [`RuleDocumentDto`] into a validated [`RuleDocument`].
///
/// Layer declaration order is preserved (it determines match precedence).
///
/// # Errors
///
/// Returns the first validation error: unknown or duplicate layer keys, a
/// definition for `UNKNOWN`, or `allowedCalls` entries naming unknown layers.
pub fn load(dto: RuleDocumentDto) -> Result<RuleDocument, LoadError> {
    let mut layers: Vec<(Layer, LayerDefinition)> = Vec::with_capacity(dto.layers.len());

    for (key, def) in dto.layers {
        let layer = Layer::parse_key(&key).ok_or_else(|| LoadError::UnknownLayerKey {
            key: key.clone(),
        })?;
        if layer == Layer::Unknown {
            return Err(LoadError::UnknownLayerDefined);
        }
        if layers.iter().any(|(l, _)| *l == layer) {
            return Err(LoadError::DuplicateLayer { key });
        }
        layers.push((layer, convert_layer(&key, def)?));
    }

    let global = convert_global(dto.global_rules);

    let quick_fixes = dto
        .quick_fixes
        .into_iter()
        .map(|(key, fix)| {
            (
                key,
                QuickFix {
                    name: fix.name,
                    description: fix.description,
                },
            )
        })
        .collect();

    Ok(RuleDocument::new(
        dto.version,
        dto.description,
        layers,
        global,
        dto.violation_messages,
        quick_fixes,
    ))
}

fn convert_layer(key: &str, dto: LayerDefinitionDto) -> Result<LayerDefinition, LoadError> {
    let allowed_calls = dto
        .allowed_calls
        .iter()
        .map(|value| {
            Layer::parse_key(value).ok_or_else(|| LoadError::UnknownAllowedCall {
                layer: key.to_string(),
                value: value.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LayerDefinition {
        name: dto.name,
        description: dto.description,
        detection: LayerDetection {
            name_suffixes: dto.detection.class_name_patterns.suffixes,
            name_prefixes: dto.detection.class_name_patterns.prefixes,
            name_contains: dto.detection.class_name_patterns.contains,
            package_contains: dto.detection.package_patterns.contains,
            package_exact: dto.detection.package_patterns.exact,
            annotations: dto.detection.annotations,
        },
        allowed_calls,
        rules: LayerRules {
            business_logic_prohibited: dto.rules.business_logic_prohibited,
            business_logic_message: dto.rules.business_logic_message,
            business_logic_patterns: dto.rules.business_logic_patterns,
            direct_data_access_patterns: dto.rules.direct_data_access_patterns,
            direct_data_access_indicators: dto.rules.direct_data_access_indicators,
        },
    })
}

fn convert_global(dto: GlobalRulesDto) -> GlobalRules {
    let complex = dto.business_logic_detection.complex_logic_threshold;
    let calculation = dto.business_logic_detection.calculation_logic_threshold;

    GlobalRules {
        thresholds: BusinessLogicThresholds {
            if_statements: complex.if_statements,
            switch_statements: complex.switch_statements,
            loop_statements: complex.loop_statements,
            assignment_expressions: calculation.assignment_expressions,
            binary_expressions: calculation.binary_expressions,
        },
        java_library_packages: dto.java_library_packages,
        database_patterns: DatabasePatterns {
            class_names: dto.database_related_patterns.class_names,
            packages: dto.database_related_patterns.packages,
        },
        sound: SoundConfiguration {
            enabled: dto.sound_configuration.enabled,
            volume: dto.sound_configuration.volume,
            sound_file: dto.sound_configuration.sound_file,
        },
    }
}
