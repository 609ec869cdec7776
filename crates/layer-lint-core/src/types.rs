//! Core types: the closed layer enumeration and quick-fix descriptors.

use serde::{Deserialize, Serialize};

/// An architectural layer.
///
/// `Unknown` is the fallback for classes no detection rule matches. It is
/// treated permissively during call validation: edges into or out of
/// `Unknown` are never flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Layer {
    /// Entry-point layer handling requests (e.g., `*Controller`).
    Controller,
    /// Data transfer objects, pure data carriers.
    Dto,
    /// Service/API layer exposing operations to controllers.
    Api,
    /// Orchestration layer combining services and data access.
    Flow,
    /// Data access layer (repositories, DAOs, mappers).
    Dao,
    /// Unclassified; matches permissively in validation.
    Unknown,
}

impl Layer {
    /// The five concrete layers, in canonical order. Excludes [`Layer::Unknown`].
    pub const ALL: [Self; 5] = [Self::Controller, Self::Dto, Self::Api, Self::Flow, Self::Dao];

    /// Canonical upper-case key used in the rules document
    /// (layer keys, `allowedCalls` entries, `{FROM}_TO_{TO}` message keys).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Controller => "CONTROLLER",
            Self::Dto => "DTO",
            Self::Api => "API",
            Self::Flow => "FLOW",
            Self::Dao => "DAO",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Parses a layer key, case-insensitively.
    ///
    /// Returns `None` for anything that is not one of the six layer names.
    #[must_use]
    pub fn parse_key(key: &str) -> Option<Self> {
        match key.to_ascii_uppercase().as_str() {
            "CONTROLLER" => Some(Self::Controller),
            "DTO" => Some(Self::Dto),
            "API" => Some(Self::Api),
            "FLOW" => Some(Self::Flow),
            "DAO" => Some(Self::Dao),
            "UNKNOWN" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A quick-fix entry from the rules document: an action name plus a
/// human-readable description, rendered by the host editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickFix {
    /// Action name shown in the editor menu.
    pub name: String,
    /// Longer description of what the fix does.
    pub description: String,
}
