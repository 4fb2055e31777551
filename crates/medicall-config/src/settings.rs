//! Configuration schema.
//!
//! Every table and key is optional; an empty document yields the storefront
//! defaults. Example:
//!
//! ```toml
//! [store]
//! currency_symbol = "₹"
//! order_id_scheme = "legacy-timestamp"
//! delivery_offset_days = 5
//!
//! [faults]
//! prescription_analysis = 0.0
//!
//! [latency]
//! prescription_analysis = 250
//!
//! [heart_rate]
//! poll_interval_ms = 1000
//! window = 30
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use medicall_contracts::service::Service;
use medicall_core::{checkout::DEFAULT_DELIVERY_OFFSET_DAYS, fault::default_failure_rate, ids::DEFAULT_ORDER_ID_PREFIX};

/// Root of a MEDICALL configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MedicallConfig {
    pub store: StoreConfig,
    pub faults: FaultConfig,
    pub latency: LatencyConfig,
    pub heart_rate: HeartRateConfig,
}

// ── [store] ──────────────────────────────────────────────────────────────────

/// How order identifiers are generated.
///
/// ```toml
/// order_id_scheme = "uuid"
/// order_id_scheme = "legacy-timestamp"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderIdScheme {
    #[default]
    Uuid,
    /// Last six digits of the millisecond timestamp. Not unique under load.
    LegacyTimestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Display symbol for prices.
    pub currency_symbol: String,
    pub order_id_prefix: String,
    pub order_id_scheme: OrderIdScheme,
    /// Days from placement to estimated delivery.
    pub delivery_offset_days: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            order_id_prefix: DEFAULT_ORDER_ID_PREFIX.to_string(),
            order_id_scheme: OrderIdScheme::Uuid,
            delivery_offset_days: DEFAULT_DELIVERY_OFFSET_DAYS,
        }
    }
}

// ── [faults] ─────────────────────────────────────────────────────────────────

/// Failure probability per simulated service, each in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaultConfig {
    pub product_catalog: f64,
    pub heart_rate_sensor: f64,
    pub google_fit_connect: f64,
    pub google_fit_authorize: f64,
    pub google_fit_fetch: f64,
    pub google_fit_revoke: f64,
    pub prescription_analysis: f64,
    pub legacy_add_to_cart: f64,
}

impl FaultConfig {
    pub fn rate(&self, service: Service) -> f64 {
        match service {
            Service::ProductCatalog => self.product_catalog,
            Service::HeartRateSensor => self.heart_rate_sensor,
            Service::GoogleFitConnect => self.google_fit_connect,
            Service::GoogleFitAuthorize => self.google_fit_authorize,
            Service::GoogleFitFetch => self.google_fit_fetch,
            Service::GoogleFitRevoke => self.google_fit_revoke,
            Service::PrescriptionAnalysis => self.prescription_analysis,
            Service::LegacyAddToCart => self.legacy_add_to_cart,
        }
    }

    /// Every service's rate set to zero.
    pub fn none() -> Self {
        Self {
            product_catalog: 0.0,
            heart_rate_sensor: 0.0,
            google_fit_connect: 0.0,
            google_fit_authorize: 0.0,
            google_fit_fetch: 0.0,
            google_fit_revoke: 0.0,
            prescription_analysis: 0.0,
            legacy_add_to_cart: 0.0,
        }
    }
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            product_catalog: default_failure_rate(Service::ProductCatalog),
            heart_rate_sensor: default_failure_rate(Service::HeartRateSensor),
            google_fit_connect: default_failure_rate(Service::GoogleFitConnect),
            google_fit_authorize: default_failure_rate(Service::GoogleFitAuthorize),
            google_fit_fetch: default_failure_rate(Service::GoogleFitFetch),
            google_fit_revoke: default_failure_rate(Service::GoogleFitRevoke),
            prescription_analysis: default_failure_rate(Service::PrescriptionAnalysis),
            legacy_add_to_cart: default_failure_rate(Service::LegacyAddToCart),
        }
    }
}

// ── [latency] ────────────────────────────────────────────────────────────────

/// Simulated latency per service in milliseconds.
///
/// For the heart-rate sensor the value is the upper bound of a uniformly
/// random delay; every other service waits exactly its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatencyConfig {
    pub product_catalog: u64,
    pub heart_rate_sensor: u64,
    pub google_fit_connect: u64,
    pub google_fit_authorize: u64,
    pub google_fit_fetch: u64,
    pub google_fit_revoke: u64,
    pub prescription_analysis: u64,
    pub legacy_add_to_cart: u64,
}

impl LatencyConfig {
    pub fn millis(&self, service: Service) -> u64 {
        match service {
            Service::ProductCatalog => self.product_catalog,
            Service::HeartRateSensor => self.heart_rate_sensor,
            Service::GoogleFitConnect => self.google_fit_connect,
            Service::GoogleFitAuthorize => self.google_fit_authorize,
            Service::GoogleFitFetch => self.google_fit_fetch,
            Service::GoogleFitRevoke => self.google_fit_revoke,
            Service::PrescriptionAnalysis => self.prescription_analysis,
            Service::LegacyAddToCart => self.legacy_add_to_cart,
        }
    }

    pub fn duration(&self, service: Service) -> Duration {
        Duration::from_millis(self.millis(service))
    }

    /// No artificial delay anywhere.
    pub fn zero() -> Self {
        Self {
            product_catalog: 0,
            heart_rate_sensor: 0,
            google_fit_connect: 0,
            google_fit_authorize: 0,
            google_fit_fetch: 0,
            google_fit_revoke: 0,
            prescription_analysis: 0,
            legacy_add_to_cart: 0,
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            product_catalog: 300,
            heart_rate_sensor: 100,
            google_fit_connect: 1500,
            google_fit_authorize: 1000,
            google_fit_fetch: 800,
            google_fit_revoke: 500,
            prescription_analysis: 2500,
            legacy_add_to_cart: 500,
        }
    }
}

// ── [heart_rate] ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeartRateConfig {
    /// Delay between monitor polls.
    pub poll_interval_ms: u64,
    /// Number of most recent readings the monitor keeps.
    pub window: usize,
}

impl HeartRateConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for HeartRateConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3000,
            window: 60,
        }
    }
}
