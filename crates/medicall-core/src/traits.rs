//! Service seams for the MEDICALL model.
//!
//! The cart and order model never talks to a data source directly. Every
//! source of products, vitals, or analysis sits behind one of these traits,
//! so a simulated implementation can be swapped for a real one (or for a
//! deterministic test double) without touching the model:
//!
//! - `ProductCatalog`: where storefront products come from
//! - `HeartRateSensor`: single sensor reads for the dashboard
//! - `GoogleFitClient`: OAuth exchange, dataset fetch, revocation
//! - `PrescriptionAnalyzer`: image analysis for the prescription scanner
//! - `LegacyCartEndpoint`: the old remote add-to-cart call
//! - `NotificationSink`: where toast-style notices are recorded
//! - `FaultInjector`: decides whether a simulated call fails
//! - `OrderIdGenerator`, `Clock`: identity and time for checkout
//!
//! Every potentially slow call receives a `CancelToken`; implementations
//! must wait through it so a dropped scope abandons the call.

use chrono::{DateTime, NaiveDate, Utc};

use medicall_contracts::{
    cart::AddToCartOutcome,
    error::{MedicallError, MedicallResult},
    notice::Notice,
    order::OrderId,
    product::{Product, ProductId},
    scan::{PrescriptionAnalysis, ScanInput},
    service::Service,
    vitals::{GoogleFitHeartRateSample, GoogleFitTokens, HeartRateReading},
};

use crate::cancel::CancelToken;

/// A source of storefront products.
pub trait ProductCatalog: Send + Sync {
    /// Return the full product list.
    fn products(&self, cancel: &CancelToken) -> MedicallResult<Vec<Product>>;
}

/// A heart-rate sensor that can be read on demand.
pub trait HeartRateSensor: Send + Sync {
    /// Take one reading.
    fn read(&self, cancel: &CancelToken) -> MedicallResult<HeartRateReading>;
}

/// The subset of the Google Fit API the dashboard uses.
pub trait GoogleFitClient: Send + Sync {
    /// Exchange an OAuth authorization code for tokens.
    fn authorize(&self, code: &str, cancel: &CancelToken) -> MedicallResult<GoogleFitTokens>;

    /// Fetch heart-rate samples in `[start, end)`.
    fn fetch_heart_rate(
        &self,
        access_token: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cancel: &CancelToken,
    ) -> MedicallResult<Vec<GoogleFitHeartRateSample>>;

    /// Revoke a token. Returns whether the revocation was accepted.
    fn revoke(&self, token: &str, cancel: &CancelToken) -> MedicallResult<bool>;
}

/// Analyzes a prescription image and matches it against store items.
pub trait PrescriptionAnalyzer: Send + Sync {
    fn analyze(&self, input: &ScanInput, cancel: &CancelToken) -> MedicallResult<PrescriptionAnalysis>;
}

/// The legacy remote add-to-cart call, kept as an alternate path.
pub trait LegacyCartEndpoint: Send + Sync {
    fn add_to_cart(
        &self,
        product_id: &ProductId,
        quantity: u32,
        cancel: &CancelToken,
    ) -> MedicallResult<AddToCartOutcome>;
}

/// Where user notifications go.
///
/// Recording a notice cannot fail; a sink that loses a notice loses only a
/// transient message.
pub trait NotificationSink: Send + Sync {
    /// Record a notice and return its sequence number.
    fn notify(&self, notice: Notice) -> u64;
}

/// Decides whether a simulated call to `service` fails.
pub trait FaultInjector: Send + Sync {
    /// Return true if this call should fail.
    fn should_fail(&self, service: Service) -> bool;

    /// `Err(SimulatedServiceFailure)` with `reason` when the call should fail.
    fn inject(&self, service: Service, reason: &str) -> MedicallResult<()> {
        if self.should_fail(service) {
            Err(MedicallError::service_failure(service, reason))
        } else {
            Ok(())
        }
    }
}

impl<F> FaultInjector for F
where
    F: Fn(Service) -> bool + Send + Sync,
{
    fn should_fail(&self, service: Service) -> bool {
        self(service)
    }
}

/// Produces identifiers for newly placed orders.
pub trait OrderIdGenerator: Send + Sync {
    fn next_id(&self, now: DateTime<Utc>) -> OrderId;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of `now()` in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
