//! Adapter-facing input snapshots.
//!
//! The engine never touches a live syntax tree. The (out-of-scope) adapter
//! layer extracts a [`ClassDescriptor`] and per-method [`MethodCounts`] from
//! whatever AST is locally available and passes them in by value.

/// A read-only snapshot of a class, as seen by the classifier.
///
/// Ephemeral: constructed per classification call. Annotation entries are
/// fully qualified names, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    /// Simple class name (e.g., `UserController`).
    pub simple_name: String,
    /// Fully qualified name (e.g., `com.example.web.UserController`).
    pub qualified_name: String,
    /// Enclosing package name (e.g., `com.example.web`).
    pub package_name: String,
    /// Qualified names of the class annotations.
    pub annotations: Vec<String>,
}

impl ClassDescriptor {
    /// Creates a descriptor without annotations.
    #[must_use]
    pub fn new(
        simple_name: impl Into<String>,
        qualified_name: impl Into<String>,
        package_name: impl Into<String>,
    ) -> Self {
        Self {
            simple_name: simple_name.into(),
            qualified_name: qualified_name.into(),
            package_name: package_name.into(),
            annotations: Vec::new(),
        }
    }

    /// Adds an annotation qualified name.
    #[must_use]
    pub fn with_annotation(mut self, qualified_name: impl Into<String>) -> Self {
        self.annotations.push(qualified_name.into());
        self
    }
}

/// Per-method counts of syntactic construct kinds.
///
/// Counts are recursive over the full method body, including nested blocks.
/// Produced by the adapter; consumed by the business-logic heuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodCounts {
    /// `if` / conditional statements.
    pub conditionals: u32,
    /// `switch` statements.
    pub switches: u32,
    /// Loop statements (`for`, `while`, `do`).
    pub loops: u32,
    /// Assignment expressions.
    pub assignments: u32,
    /// Binary expressions.
    pub binary_expressions: u32,
}

impl MethodCounts {
    /// Composite complexity score: conditionals + switches + loops.
    #[must_use]
    pub fn complexity_score(self) -> u32 {
        self.conditionals + self.switches + self.loops
    }
}
