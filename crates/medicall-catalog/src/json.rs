//! A `ProductCatalog` backed by a validated JSON document.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use medicall_contracts::{
    error::{MedicallError, MedicallResult},
    product::Product,
};
use medicall_core::{cancel::CancelToken, traits::ProductCatalog};

use crate::validator::CatalogValidator;

/// Products parsed from a JSON array that passed `CatalogValidator`.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    products: Vec<Product>,
}

impl JsonCatalog {
    /// Parse and validate with the default validator.
    pub fn from_json_str(s: &str) -> MedicallResult<Self> {
        Self::from_json_str_with(s, &CatalogValidator::new())
    }

    /// Parse and validate with a caller-configured validator.
    pub fn from_json_str_with(s: &str, validator: &CatalogValidator) -> MedicallResult<Self> {
        let document: Value = serde_json::from_str(s)
            .map_err(|e| MedicallError::validation("catalog", format!("malformed JSON: {e}")))?;

        let report = validator.validate(&document);
        if !report.passed {
            return Err(MedicallError::validation("catalog", report.summary()));
        }

        let products: Vec<Product> = serde_json::from_value(document)
            .map_err(|e| MedicallError::validation("catalog", format!("unreadable product entry: {e}")))?;

        info!(products = products.len(), "catalog loaded");
        Ok(Self { products })
    }

    /// Read a catalog document from `path`.
    pub fn from_file(path: &Path) -> MedicallResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MedicallError::validation("catalog", format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// The parsed products, without going through the `ProductCatalog` seam.
    pub fn entries(&self) -> &[Product] {
        &self.products
    }
}

impl ProductCatalog for JsonCatalog {
    fn products(&self, cancel: &CancelToken) -> MedicallResult<Vec<Product>> {
        cancel.check("load products")?;
        Ok(self.products.clone())
    }
}
