//! Names of the simulated services.
//!
//! Fault injection, latency configuration, and failure reporting are all
//! keyed by `Service`, so each simulated call site can be forced to succeed
//! or fail independently.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    /// Loading the product list for the storefront.
    ProductCatalog,
    /// A single heart-rate sensor read.
    HeartRateSensor,
    /// Connecting the dashboard to Google Fit.
    GoogleFitConnect,
    /// Exchanging an OAuth authorization code for tokens.
    GoogleFitAuthorize,
    /// Fetching heart-rate samples from Google Fit.
    GoogleFitFetch,
    /// Revoking a Google Fit token.
    GoogleFitRevoke,
    /// AI analysis of a prescription image.
    PrescriptionAnalysis,
    /// The legacy remote add-to-cart endpoint.
    LegacyAddToCart,
}

impl Service {
    pub const ALL: [Service; 8] = [
        Service::ProductCatalog,
        Service::HeartRateSensor,
        Service::GoogleFitConnect,
        Service::GoogleFitAuthorize,
        Service::GoogleFitFetch,
        Service::GoogleFitRevoke,
        Service::PrescriptionAnalysis,
        Service::LegacyAddToCart,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Service::ProductCatalog => "product-catalog",
            Service::HeartRateSensor => "heart-rate-sensor",
            Service::GoogleFitConnect => "google-fit-connect",
            Service::GoogleFitAuthorize => "google-fit-authorize",
            Service::GoogleFitFetch => "google-fit-fetch",
            Service::GoogleFitRevoke => "google-fit-revoke",
            Service::PrescriptionAnalysis => "prescription-analysis",
            Service::LegacyAddToCart => "legacy-add-to-cart",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
