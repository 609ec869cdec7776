//! Business-logic and data-access heuristics.
//!
//! These are syntactic proxies: the engine cannot do semantic business-rule
//! detection, so it counts constructs against configurable thresholds and
//! matches method-name fragments.

use crate::descriptor::MethodCounts;
use crate::document::RuleDocument;
use crate::types::Layer;

/// Package prefixes of well-known database driver and persistence APIs,
/// always treated as database-related regardless of document configuration.
const DB_DRIVER_PREFIXES: &[&str] = &[
    "java.sql",
    "javax.sql",
    "javax.persistence",
    "jakarta.persistence",
    "org.hibernate",
    "org.springframework.jdbc",
];

/// Decides whether any of `methods` trips the business-logic thresholds for
/// `layer`'s class.
///
/// Opt-in per layer: returns `false` unless the layer's definition sets
/// `businessLogicProhibited`. A method trips when either:
///
/// - its summed branching score (`conditionals + switches + loops`) exceeds
///   the summed branching budget (`if + switch + loop` thresholds, compared
///   as one composite, not per category), or
/// - `assignments` or `binary_expressions` exceeds its threshold.
///
/// The first tripping method short-circuits.
#[must_use]
pub fn has_business_logic(
    document: Option<&RuleDocument>,
    layer: Layer,
    methods: &[MethodCounts],
) -> bool {
    let Some(document) = document else {
        return false;
    };
    let Some(definition) = document.layer_definition(layer) else {
        return false;
    };
    if !definition.rules.business_logic_prohibited {
        return false;
    }

    let thresholds = document.global.thresholds;
    let budget = thresholds.complexity_budget();

    methods.iter().any(|m| {
        m.complexity_score() > budget
            || m.assignments > thresholds.assignment_expressions
            || m.binary_expressions > thresholds.binary_expressions
    })
}

/// Whether a method name contains any of `layer`'s configured business-logic
/// name patterns (case-insensitive).
#[must_use]
pub fn has_business_logic_pattern(
    document: Option<&RuleDocument>,
    method_name: &str,
    layer: Layer,
) -> bool {
    let Some(definition) = document.and_then(|d| d.layer_definition(layer)) else {
        return false;
    };
    let name = method_name.to_lowercase();
    definition
        .rules
        .business_logic_patterns
        .iter()
        .any(|p| name.contains(&p.to_lowercase()))
}

/// Whether a method name matches both a data-access pattern and a data-access
/// indicator from `layer`'s configuration (case-insensitive).
///
/// Both lists must match: a CRUD-verb token alone (`selectUserData`) or an
/// sql/db token alone (`openSqlConnection`) is not flagged.
#[must_use]
pub fn has_direct_data_access_pattern(
    document: Option<&RuleDocument>,
    method_name: &str,
    layer: Layer,
) -> bool {
    let Some(definition) = document.and_then(|d| d.layer_definition(layer)) else {
        return false;
    };
    let rules = &definition.rules;
    let name = method_name.to_lowercase();

    let has_pattern = rules
        .direct_data_access_patterns
        .iter()
        .any(|p| name.contains(&p.to_lowercase()));
    let has_indicator = rules
        .direct_data_access_indicators
        .iter()
        .any(|i| name.contains(&i.to_lowercase()));

    has_pattern && has_indicator
}

/// Whether a class looks database-related: its simple name or package matches
/// the document's `databaseRelatedPatterns`, or its package sits under a
/// known driver/persistence prefix.
#[must_use]
pub fn is_database_related(
    document: Option<&RuleDocument>,
    simple_name: &str,
    package_name: &str,
) -> bool {
    if DB_DRIVER_PREFIXES
        .iter()
        .any(|prefix| package_name.starts_with(prefix))
    {
        return true;
    }

    let Some(document) = document else {
        return false;
    };
    let patterns = &document.global.database_patterns;
    let name = simple_name.to_lowercase();
    let package = package_name.to_lowercase();

    patterns
        .class_names
        .iter()
        .any(|p| name.contains(&p.to_lowercase()))
        || patterns
            .packages
            .iter()
            .any(|p| package.contains(&p.to_lowercase()))
}

/// Whether a qualified class name belongs to a configured library package
/// (prefix match against `javaLibraryPackages`).
#[must_use]
pub fn is_library_call(document: Option<&RuleDocument>, qualified_name: &str) -> bool {
    let Some(document) = document else {
        return false;
    };
    document
        .global
        .java_library_packages
        .iter()
        .any(|prefix| qualified_name.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::dto::RuleDocumentDto;

    fn document(json: &str) -> RuleDocument {
        let dto: RuleDocumentDto = serde_json::from_str(json).unwrap();
        crate::document::load(dto).unwrap()
    }

    fn doc_with_thresholds() -> RuleDocument {
        document(
            r#"{
                "layers": {
                    "CONTROLLER": {
                        "rules": {
                            "businessLogicProhibited": true,
                            "businessLogicPatterns": ["calculate", "process"],
                            "directDataAccessPatterns": ["select", "insert"],
                            "directDataAccessIndicators": ["sql", "db"]
                        }
                    },
                    "API": { "rules": { "businessLogicProhibited": false } }
                },
                "globalRules": {
                    "businessLogicDetection": {
                        "complexLogicThreshold": {
                            "ifStatements": 2,
                            "switchStatements": 0,
                            "loopStatements": 0
                        },
                        "calculationLogicThreshold": {
                            "assignmentExpressions": 5,
                            "binaryExpressions": 10
                        }
                    },
                    "javaLibraryPackages": ["java.", "kotlin."],
                    "databaseRelatedPatterns": {
                        "classNames": ["Repository", "JdbcTemplate"],
                        "packages": ["org.hibernate"]
                    }
                }
            }"#,
        )
    }

    fn method(conditionals: u32) -> MethodCounts {
        MethodCounts {
            conditionals,
            ..MethodCounts::default()
        }
    }

    // -- has_business_logic --

    #[test]
    fn complexity_over_budget_trips() {
        let doc = doc_with_thresholds();
        // Budget is 2+0+0 = 2; a method with 3 conditionals exceeds it.
        assert!(has_business_logic(
            Some(&doc),
            Layer::Controller,
            &[method(3)]
        ));
    }

    #[test]
    fn complexity_at_budget_does_not_trip() {
        let doc = doc_with_thresholds();
        // Strict `>` comparison: exactly 2 is still allowed.
        assert!(!has_business_logic(
            Some(&doc),
            Layer::Controller,
            &[method(2)]
        ));
    }

    #[test]
    fn mixed_construct_kinds_count_against_one_budget() {
        let doc = doc_with_thresholds();
        // 1 if + 1 switch + 1 loop = 3 > 2, even though no single category
        // exceeds its own number.
        let m = MethodCounts {
            conditionals: 1,
            switches: 1,
            loops: 1,
            ..MethodCounts::default()
        };
        assert!(has_business_logic(Some(&doc), Layer::Controller, &[m]));
    }

    #[test]
    fn calculation_thresholds_trip_independently() {
        let doc = doc_with_thresholds();
        let assignments = MethodCounts {
            assignments: 6,
            ..MethodCounts::default()
        };
        let binary = MethodCounts {
            binary_expressions: 11,
            ..MethodCounts::default()
        };
        let under = MethodCounts {
            assignments: 5,
            binary_expressions: 10,
            ..MethodCounts::default()
        };
        assert!(has_business_logic(
            Some(&doc),
            Layer::Controller,
            &[assignments]
        ));
        assert!(has_business_logic(Some(&doc), Layer::Controller, &[binary]));
        assert!(!has_business_logic(Some(&doc), Layer::Controller, &[under]));
    }

    #[test]
    fn one_tripping_method_is_enough() {
        let doc = doc_with_thresholds();
        assert!(has_business_logic(
            Some(&doc),
            Layer::Controller,
            &[method(0), method(1), method(5)]
        ));
    }

    #[test]
    fn check_is_opt_in_per_layer() {
        let doc = doc_with_thresholds();
        // API does not prohibit business logic.
        assert!(!has_business_logic(Some(&doc), Layer::Api, &[method(99)]));
        // DAO has no definition at all.
        assert!(!has_business_logic(Some(&doc), Layer::Dao, &[method(99)]));
    }

    #[test]
    fn no_document_means_no_business_logic() {
        assert!(!has_business_logic(None, Layer::Controller, &[method(99)]));
    }

    // -- name-pattern checks --

    #[test]
    fn business_logic_pattern_matches_substring() {
        let doc = doc_with_thresholds();
        assert!(has_business_logic_pattern(
            Some(&doc),
            "calculateTotal",
            Layer::Controller
        ));
        assert!(has_business_logic_pattern(
            Some(&doc),
            "reProcessOrders",
            Layer::Controller
        ));
        assert!(!has_business_logic_pattern(
            Some(&doc),
            "getUser",
            Layer::Controller
        ));
    }

    #[test]
    fn data_access_check_is_conjunctive() {
        let doc = doc_with_thresholds();
        // CRUD verb without an sql/db token: not flagged.
        assert!(!has_direct_data_access_pattern(
            Some(&doc),
            "selectUserData",
            Layer::Controller
        ));
        // Both tokens present: flagged.
        assert!(has_direct_data_access_pattern(
            Some(&doc),
            "selectFromSqlDb",
            Layer::Controller
        ));
        // Indicator without a CRUD verb: not flagged.
        assert!(!has_direct_data_access_pattern(
            Some(&doc),
            "openSqlConnection",
            Layer::Controller
        ));
    }

    #[test]
    fn name_checks_default_false_without_configuration() {
        let doc = doc_with_thresholds();
        assert!(!has_business_logic_pattern(
            Some(&doc),
            "calculateTotal",
            Layer::Api
        ));
        assert!(!has_direct_data_access_pattern(
            None,
            "selectFromSqlDb",
            Layer::Controller
        ));
    }

    // -- database / library checks --

    #[test]
    fn database_related_by_configured_patterns() {
        let doc = doc_with_thresholds();
        assert!(is_database_related(
            Some(&doc),
            "UserRepository",
            "com.example.data"
        ));
        assert!(is_database_related(
            Some(&doc),
            "SessionFactory",
            "org.hibernate.internal"
        ));
        assert!(!is_database_related(
            Some(&doc),
            "UserService",
            "com.example.api"
        ));
    }

    #[test]
    fn database_related_by_driver_prefix_without_document() {
        assert!(is_database_related(None, "Connection", "java.sql"));
        assert!(is_database_related(
            None,
            "EntityManager",
            "jakarta.persistence.internal"
        ));
        assert!(!is_database_related(None, "Foo", "com.example"));
    }

    #[test]
    fn library_call_is_prefix_matched() {
        let doc = doc_with_thresholds();
        assert!(is_library_call(Some(&doc), "java.util.List"));
        assert!(is_library_call(Some(&doc), "kotlin.collections.Map"));
        assert!(!is_library_call(Some(&doc), "com.example.UserService"));
        // Prefix, not contains: a package merely mentioning "java." later
        // does not count.
        assert!(!is_library_call(Some(&doc), "com.java.Thing"));
        assert!(!is_library_call(None, "java.util.List"));
    }
}
