//! Simulated storefront back end: product listing and the legacy
//! add-to-cart endpoint.

use std::{sync::Arc, time::Duration};

use tracing::{debug, info};

use medicall_contracts::{
    cart::AddToCartOutcome,
    error::MedicallResult,
    product::{Product, ProductId},
    service::Service,
};
use medicall_core::{
    cancel::CancelToken,
    traits::{FaultInjector, LegacyCartEndpoint, ProductCatalog},
};

use crate::mock_data::{LEGACY_ADDED, LEGACY_OUT_OF_STOCK};

/// Default wait before the product list is returned.
pub const CATALOG_LATENCY: Duration = Duration::from_millis(300);

/// Default wait for the legacy add-to-cart call.
pub const LEGACY_ADD_LATENCY: Duration = Duration::from_millis(500);

// ── SimulatedCatalog ─────────────────────────────────────────────────────────

/// Wraps a `ProductCatalog` with artificial latency and injected failures.
pub struct SimulatedCatalog<C> {
    inner: C,
    faults: Arc<dyn FaultInjector>,
    latency: Duration,
}

impl<C: ProductCatalog> SimulatedCatalog<C> {
    pub fn new(inner: C, faults: Arc<dyn FaultInjector>) -> Self {
        Self {
            inner,
            faults,
            latency: CATALOG_LATENCY,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl<C: ProductCatalog> ProductCatalog for SimulatedCatalog<C> {
    fn products(&self, cancel: &CancelToken) -> MedicallResult<Vec<Product>> {
        cancel.sleep(self.latency, "load products")?;
        self.faults
            .inject(Service::ProductCatalog, "product service unavailable")?;
        let products = self.inner.products(cancel)?;
        debug!(count = products.len(), "products served");
        Ok(products)
    }
}

// ── SimulatedCartEndpoint ────────────────────────────────────────────────────

/// The legacy remote add-to-cart call.
///
/// Failures are reported in the outcome rather than as errors: the endpoint
/// answered, it just refused.
pub struct SimulatedCartEndpoint {
    faults: Arc<dyn FaultInjector>,
    latency: Duration,
}

impl SimulatedCartEndpoint {
    pub fn new(faults: Arc<dyn FaultInjector>) -> Self {
        Self {
            faults,
            latency: LEGACY_ADD_LATENCY,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl LegacyCartEndpoint for SimulatedCartEndpoint {
    fn add_to_cart(
        &self,
        product_id: &ProductId,
        quantity: u32,
        cancel: &CancelToken,
    ) -> MedicallResult<AddToCartOutcome> {
        info!(product_id = %product_id, quantity, "legacy add-to-cart requested");
        cancel.sleep(self.latency, "legacy add to cart")?;

        let outcome = if self.faults.should_fail(Service::LegacyAddToCart) {
            AddToCartOutcome {
                success: false,
                message: Some(LEGACY_OUT_OF_STOCK.to_string()),
            }
        } else {
            AddToCartOutcome {
                success: true,
                message: Some(LEGACY_ADDED.to_string()),
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use medicall_contracts::{error::MedicallError, product::ProductId, service::Service};
    use medicall_core::{
        cancel::CancelToken,
        fault::{AlwaysFail, NoFaults},
        traits::{LegacyCartEndpoint, ProductCatalog},
    };

    use super::{SimulatedCartEndpoint, SimulatedCatalog};
    use crate::mock_data::default_catalog;

    #[test]
    fn default_catalog_has_eight_products() {
        let catalog = SimulatedCatalog::new(default_catalog().unwrap(), Arc::new(NoFaults))
            .with_latency(Duration::ZERO);
        let products = catalog.products(&CancelToken::new()).unwrap();

        assert_eq!(products.len(), 8);
        assert_eq!(products[0].id.as_str(), "prod_1");
        assert_eq!(products[6].price, rust_decimal::Decimal::from(1160));
    }

    #[test]
    fn injected_catalog_failure_names_the_service() {
        let catalog = SimulatedCatalog::new(default_catalog().unwrap(), Arc::new(AlwaysFail))
            .with_latency(Duration::ZERO);

        match catalog.products(&CancelToken::new()) {
            Err(MedicallError::SimulatedServiceFailure { service, .. }) => {
                assert_eq!(service, Service::ProductCatalog)
            }
            other => panic!("expected SimulatedServiceFailure, got {:?}", other),
        }
    }

    #[test]
    fn cancelled_catalog_load_returns_cancelled() {
        let catalog = SimulatedCatalog::new(default_catalog().unwrap(), Arc::new(NoFaults));
        let token = CancelToken::new();
        token.cancel();

        assert!(matches!(
            catalog.products(&token),
            Err(MedicallError::Cancelled { .. })
        ));
    }

    #[test]
    fn legacy_endpoint_reports_both_outcomes() {
        let id = ProductId::new("prod_1");
        let ok = SimulatedCartEndpoint::new(Arc::new(NoFaults)).with_latency(Duration::ZERO);
        let outcome = ok.add_to_cart(&id, 2, &CancelToken::new()).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Item added to cart."));

        let out_of_stock = SimulatedCartEndpoint::new(Arc::new(AlwaysFail)).with_latency(Duration::ZERO);
        let outcome = out_of_stock.add_to_cart(&id, 2, &CancelToken::new()).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Item out of stock (simulated)."));
    }
}
