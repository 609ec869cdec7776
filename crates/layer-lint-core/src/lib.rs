//! # layer-lint-core
//!
//! Rule-driven layer classification and call-validation engine.
//!
//! Given a class snapshot (name, package, annotations) and dependency edges
//! between classified layers, the engine decides which architectural layer a
//! class belongs to and whether a call edge is legal, all driven by a
//! hot-reloadable JSON rules document instead of hard-coded logic.
//!
//! The crate has no dependency on any parser or IDE platform: the adapter
//! layer extracts [`ClassDescriptor`]s and per-method [`MethodCounts`] from
//! whatever syntax tree it has and feeds them in.
//!
//! ## Example
//!
//! ```no_run
//! use layer_lint_core::{ClassDescriptor, Layer, LayerEngine};
//!
//! let engine = LayerEngine::bootstrap();
//! let class = ClassDescriptor::new(
//!     "UserController",
//!     "com.example.web.UserController",
//!     "com.example.web",
//! );
//! let layer = engine.classify(&class);
//! if !engine.is_valid_call(layer, Layer::Dao) {
//!     let msg = engine.violation_message(layer, Layer::Dao, "UserController", "UserDao");
//!     println!("{msg}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classifier;
mod descriptor;
mod engine;
mod types;

/// The rules document: DTOs, domain model, and loading.
pub mod document;
/// Business-logic and data-access heuristics.
pub mod heuristic;
/// Violation and quick-fix message formatting.
pub mod messages;
/// Rule store: loading, watching, swapping.
pub mod store;
/// Call-edge validation.
pub mod validator;

pub use classifier::LayerClassifier;
pub use descriptor::{ClassDescriptor, MethodCounts};
pub use document::{LayerDefinition, LayerDetection, RuleDocument};
pub use engine::LayerEngine;
pub use store::{ConfigError, RuleStore, WatchError, CONFIG_DIR_ENV, RULES_FILE_NAME};
pub use types::{Layer, QuickFix};
