//! # medicall-catalog
//!
//! Product catalog loading for the MEDICALL storefront.
//!
//! A catalog is a JSON array of products. Before any product reaches the
//! store, `CatalogValidator` checks the document structurally (JSON Schema)
//! and semantically (unique ids, non-empty names, non-negative prices).
//! `JsonCatalog` only builds from a passing document.
//!
//! ```rust,ignore
//! use medicall_catalog::JsonCatalog;
//!
//! let catalog = JsonCatalog::from_file(Path::new("products.json"))?;
//! let products = catalog.products(&CancelToken::new())?;
//! ```

pub mod json;
pub mod validator;

pub use json::JsonCatalog;
pub use validator::{product_catalog_schema, CatalogRuleFn, CatalogValidator};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use medicall_contracts::error::MedicallError;
    use medicall_core::{cancel::CancelToken, traits::ProductCatalog};

    use super::{CatalogValidator, JsonCatalog};

    fn rule_ids(report: &medicall_contracts::validation::ValidationReport) -> Vec<&str> {
        report.failures.iter().map(|f| f.rule_id.as_str()).collect()
    }

    // ── Validator ─────────────────────────────────────────────────────────────

    #[test]
    fn test_valid_document_passes() {
        let doc = json!([
            { "id": "1", "name": "Gauze Pads", "description": "Sterile", "price": 675 },
            { "id": "2", "name": "Thermometer", "description": "Digital", "price": 970.5,
              "category": "devices", "imageUrl": "https://example.com/t.png" }
        ]);

        let report = CatalogValidator::new().validate(&doc);
        assert!(report.passed, "unexpected failures: {}", report.summary());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_structural_failures_are_reported() {
        let doc = json!([
            { "id": "1", "name": "Missing price", "description": "" },
            { "id": "2", "name": "Bad price", "description": "", "price": "cheap" },
            { "id": "3", "name": "Typo", "description": "", "price": 1, "imgUrl": "x" }
        ]);

        let report = CatalogValidator::new().validate(&doc);
        assert!(!report.passed);
        assert!(report.failures.len() >= 3);
        assert!(rule_ids(&report).iter().all(|id| *id == "json-schema"));
    }

    #[test]
    fn test_non_array_document_fails_structurally() {
        let report = CatalogValidator::new().validate(&json!({ "products": [] }));
        assert!(!report.passed);
        assert_eq!(rule_ids(&report), vec!["json-schema"]);
    }

    /// Semantic failures from all products are collected in one pass.
    #[test]
    fn test_semantic_failures_are_collected() {
        let doc = json!([
            { "id": "1", "name": "A", "description": "", "price": 1 },
            { "id": "1", "name": "Duplicate", "description": "", "price": 1 },
            { "id": "2", "name": "   ", "description": "", "price": 1 },
            { "id": "3", "name": "Refund", "description": "", "price": -5 }
        ]);

        let report = CatalogValidator::new().validate(&doc);
        assert!(!report.passed);
        assert_eq!(
            rule_ids(&report),
            vec!["unique-id", "non-empty-name", "non-negative-price"]
        );
        assert!(report.summary().contains("duplicate product id '1'"));
    }

    #[test]
    fn test_custom_rule_runs_after_builtins() {
        let mut validator = CatalogValidator::new();
        validator.register_rule(
            "max-ten-products",
            Box::new(|doc: &serde_json::Value| {
                let n = doc.as_array().map_or(0, |a| a.len());
                (n > 10).then(|| format!("catalog has {n} products"))
            }),
        );

        let many: Vec<_> = (0..11)
            .map(|i| json!({ "id": i.to_string(), "name": "x", "description": "", "price": 1 }))
            .collect();

        let report = validator.validate(&serde_json::Value::Array(many));
        assert_eq!(rule_ids(&report), vec!["max-ten-products"]);
    }

    // ── JsonCatalog ───────────────────────────────────────────────────────────

    #[test]
    fn test_json_catalog_loads_products() {
        let json = r#"[
            { "id": "1", "name": "Gauze Pads", "description": "Sterile", "price": 675, "category": "first-aid" },
            { "id": "2", "name": "Wipes", "description": "Antiseptic", "price": 8.99, "image_url": "w.png" }
        ]"#;

        let catalog = JsonCatalog::from_json_str(json).unwrap();
        let products = catalog.products(&CancelToken::new()).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, Decimal::from(675));
        assert_eq!(products[0].category.as_deref(), Some("first-aid"));
        assert_eq!(products[1].price, Decimal::new(899, 2));
        assert_eq!(products[1].image_url.as_deref(), Some("w.png"));
        assert_eq!(catalog.entries().len(), 2);
    }

    #[test]
    fn test_json_catalog_rejects_invalid_document() {
        let json = r#"[{ "id": "1", "name": "", "description": "", "price": 1 }]"#;
        match JsonCatalog::from_json_str(json) {
            Err(MedicallError::Validation { field, reason }) => {
                assert_eq!(field, "catalog");
                assert!(reason.contains("[non-empty-name]"), "unexpected reason: {reason}");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_json_catalog_rejects_malformed_json() {
        match JsonCatalog::from_json_str("[{") {
            Err(MedicallError::Validation { reason, .. }) => assert!(reason.contains("malformed JSON")),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_cancelled_token_aborts_read() {
        let catalog = JsonCatalog::from_json_str("[]").unwrap();
        let token = CancelToken::new();
        token.cancel();

        assert!(matches!(
            catalog.products(&token),
            Err(MedicallError::Cancelled { .. })
        ));
    }
}
