//! Validation report types.
//!
//! Catalog documents are checked against a JSON Schema and a set of semantic
//! rules before any product reaches the store. The validator collects every
//! failure into one `ValidationReport` so the whole failure set is visible in
//! one pass.

use serde::{Deserialize, Serialize};

/// The result of validating one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True only if every check passed.
    pub passed: bool,
    /// All failures found. Empty on pass.
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    /// Join all failures as `[rule] message; …`.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("[{}] {}", f.rule_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A single failed check within a `ValidationReport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Identifier of the check that failed (e.g. "json-schema", "unique-id").
    pub rule_id: String,
    pub message: String,
}
