//! Two-phase validation of product catalog documents.
//!
//! 1. **Structural**: the document is checked against `product_catalog_schema()`
//!    with the `jsonschema` crate.
//! 2. **Semantic**: unique ids, non-empty names, non-negative prices, then any
//!    registered custom rules.
//!
//! Every failure from both phases is collected into one `ValidationReport`.

use std::collections::{BTreeMap, HashSet};

use serde_json::{json, Value};
use tracing::{debug, warn};

use medicall_contracts::validation::{ValidationFailure, ValidationReport};

/// A caller-supplied check over the whole catalog document.
///
/// Returns `Some(message)` on failure, `None` on success.
pub type CatalogRuleFn = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// JSON Schema every catalog document must satisfy.
pub fn product_catalog_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "MEDICALL product catalog",
        "type": "array",
        "items": {
            "type": "object",
            "required": ["id", "name", "description", "price"],
            "properties": {
                "id": { "type": "string", "minLength": 1 },
                "name": { "type": "string" },
                "description": { "type": "string" },
                "price": { "type": "number" },
                "category": { "type": "string" },
                "imageUrl": { "type": "string" },
                "image_url": { "type": "string" }
            },
            "additionalProperties": false
        }
    })
}

/// Validates catalog documents before they are turned into products.
pub struct CatalogValidator {
    schema: Value,
    /// Registered in name order so reports are stable.
    custom_rules: BTreeMap<String, CatalogRuleFn>,
}

impl CatalogValidator {
    pub fn new() -> Self {
        Self {
            schema: product_catalog_schema(),
            custom_rules: BTreeMap::new(),
        }
    }

    /// Register an extra rule under `name`. The same name replaces the
    /// previous rule.
    pub fn register_rule(&mut self, name: impl Into<String>, f: CatalogRuleFn) {
        self.custom_rules.insert(name.into(), f);
    }

    /// Validate `document`, collecting every failure.
    pub fn validate(&self, document: &Value) -> ValidationReport {
        let mut failures = Vec::new();

        // ── Phase 1: structural ──────────────────────────────────────────────
        match jsonschema::validator_for(&self.schema) {
            Ok(validator) => {
                for error in validator.iter_errors(document) {
                    let message = format!("JSON Schema violation at {}: {}", error.instance_path, error);
                    warn!(%message, "catalog structural validation failure");
                    failures.push(failure("json-schema", message));
                }
            }
            Err(e) => {
                let message = format!("invalid JSON Schema document: {e}");
                warn!(%message, "catalog schema compilation failure");
                failures.push(failure("json-schema", message));
            }
        }

        // ── Phase 2: semantic ────────────────────────────────────────────────
        let products = document.as_array().map(Vec::as_slice).unwrap_or_default();
        let mut seen = HashSet::new();

        for (index, product) in products.iter().enumerate() {
            let id = product.get("id").and_then(Value::as_str);

            if let Some(id) = id {
                if !seen.insert(id) {
                    failures.push(failure("unique-id", format!("duplicate product id '{id}' at index {index}")));
                }
            }

            let label = id.map(str::to_string).unwrap_or_else(|| format!("#{index}"));

            if let Some(name) = product.get("name").and_then(Value::as_str) {
                if name.trim().is_empty() {
                    failures.push(failure("non-empty-name", format!("product '{label}' has an empty name")));
                }
            }

            if let Some(price) = product.get("price").and_then(Value::as_f64) {
                if price < 0.0 {
                    failures.push(failure(
                        "non-negative-price",
                        format!("product '{label}' has negative price {price}"),
                    ));
                }
            }
        }

        for (name, rule) in &self.custom_rules {
            debug!(rule_id = %name, "evaluating custom catalog rule");
            if let Some(message) = rule(document) {
                warn!(rule_id = %name, %message, "custom catalog rule failed");
                failures.push(failure(name, message));
            }
        }

        let passed = failures.is_empty();
        debug!(
            products = products.len(),
            passed,
            failure_count = failures.len(),
            "catalog validation complete"
        );
        ValidationReport { passed, failures }
    }
}

impl Default for CatalogValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn failure(rule_id: &str, message: String) -> ValidationFailure {
    ValidationFailure {
        rule_id: rule_id.to_string(),
        message,
    }
}
