//! The rules document: JSON DTOs, validated domain model, and loading.
//!
//! Follows a strict DTO → model split: [`dto`] mirrors the file format and
//! accepts anything structurally valid, [`loader`] validates cross-references
//! and produces the immutable [`model::RuleDocument`] the engine consumes.

pub mod dto;
pub mod loader;
pub mod model;

pub use loader::{load, LoadError};
pub use model::{
    BusinessLogicThresholds, DatabasePatterns, GlobalRules, LayerDefinition, LayerDetection,
    LayerRules, RuleDocument, SoundConfiguration,
};
