//! Fixed storefront data for the simulated services.
//!
//! All data in this module is hardcoded and fictional. The product list is
//! the storefront's default catalog; the prescription fixtures are what the
//! simulated analyzer "finds" in every readable image.

use medicall_catalog::JsonCatalog;
use medicall_contracts::error::MedicallResult;

/// The default catalog document, validated like any other on load.
pub const DEFAULT_CATALOG_JSON: &str = include_str!("../data/products.json");

/// The eight default storefront products.
pub fn default_catalog() -> MedicallResult<JsonCatalog> {
    JsonCatalog::from_json_str(DEFAULT_CATALOG_JSON)
}

// ── Prescription analysis fixtures ───────────────────────────────────────────

/// Store items matched on a readable prescription.
pub const MATCHED_PRODUCTS: [&str; 2] = ["Paracetamol 500mg", "Vitamin C Tablets"];

/// Items that need a doctor's sign-off before they can be bought.
pub const REQUIRES_VERIFICATION: [&str; 1] = ["Amoxicillin 250mg"];

pub const ANALYSIS_ADVICE: &str =
    "Please verify with your doctor or pharmacist before purchasing medication.";

/// Returned as the failure reason when a prescription cannot be read.
pub const SCAN_TIPS: &str = "Could not clearly read the prescription. Tips for a better scan: \
ensure good lighting; hold the camera steady; make sure the text is in focus.";

// ── User-facing messages ─────────────────────────────────────────────────────

pub const SENSOR_CONNECT_FAILED: &str =
    "Failed to connect to sensor. Please ensure it's paired and nearby.";

pub const GOOGLE_FIT_CONNECT_FAILED: &str = "Failed to connect to Google Fit. Please try again.";

pub const NO_PRESCRIPTION_IMAGE: &str = "Please upload or capture a prescription image first.";

pub const LEGACY_OUT_OF_STOCK: &str = "Item out of stock (simulated).";

pub const LEGACY_ADDED: &str = "Item added to cart.";

pub const PRODUCTS_UNAVAILABLE: &str = "Could not load products. Please try again later.";
