//! The store session: the storefront, cart page and order view wired
//! together, reporting every user-visible outcome as a notice.

use std::sync::Arc;

use tracing::{info, warn};

use medicall_contracts::{
    error::{MedicallError, MedicallResult},
    notice::Notice,
    order::Order,
    product::{Product, ProductId},
};
use medicall_core::{
    cancel::CancelScope,
    cart::CartStore,
    checkout::OrderBuilder,
    tracking::OrderStatusView,
    traits::{LegacyCartEndpoint, NotificationSink, ProductCatalog},
};

use crate::mock_data::PRODUCTS_UNAVAILABLE;

/// One shopper's session.
///
/// The session owns the cart, so every page reads the same state. Slow calls
/// run under the session's `CancelScope`; dropping the session abandons them.
pub struct StoreSession {
    catalog: Box<dyn ProductCatalog>,
    builder: OrderBuilder,
    notifier: Arc<dyn NotificationSink>,
    legacy: Option<Box<dyn LegacyCartEndpoint>>,
    scope: CancelScope,
    products: Vec<Product>,
    cart: CartStore,
    order_view: Option<OrderStatusView>,
}

impl StoreSession {
    pub fn new(
        catalog: Box<dyn ProductCatalog>,
        builder: OrderBuilder,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            catalog,
            builder,
            notifier,
            legacy: None,
            scope: CancelScope::new(),
            products: Vec::new(),
            cart: CartStore::new(),
            order_view: None,
        }
    }

    /// Route `add_product_via_legacy` through `endpoint`.
    pub fn with_legacy_endpoint(mut self, endpoint: Box<dyn LegacyCartEndpoint>) -> Self {
        self.legacy = Some(endpoint);
        self
    }

    // ── Storefront ───────────────────────────────────────────────────────────

    /// Load the product list.
    ///
    /// A failed load leaves the list empty and posts an error notice; it is
    /// never retried.
    pub fn load_products(&mut self) -> &[Product] {
        match self.catalog.products(&self.scope.token()) {
            Ok(products) => {
                info!(count = products.len(), "products loaded");
                self.products = products;
            }
            Err(e) => {
                warn!(error = %e, "failed to load products");
                self.products.clear();
                if !matches!(e, MedicallError::Cancelled { .. }) {
                    self.notifier.notify(Notice::destructive("Error", PRODUCTS_UNAVAILABLE));
                }
            }
        }
        &self.products
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Add `quantity` of `product` to the cart.
    pub fn add_product(&mut self, product: &Product, quantity: u32) -> MedicallResult<()> {
        self.cart.add_to_cart(product, quantity)?;
        self.notifier.notify(Notice::info(
            "Added to Cart!",
            format!("{} has been added to your cart.", product.name),
        ));
        Ok(())
    }

    /// Add through the legacy remote endpoint.
    ///
    /// The local cart changes only when the endpoint accepts. Without a
    /// configured endpoint this is the same as `add_product`.
    pub fn add_product_via_legacy(&mut self, product: &Product, quantity: u32) -> MedicallResult<bool> {
        let Some(endpoint) = &self.legacy else {
            self.add_product(product, quantity)?;
            return Ok(true);
        };

        let outcome = endpoint.add_to_cart(&product.id, quantity, &self.scope.token())?;
        if outcome.success {
            self.add_product(product, quantity)?;
        } else {
            let reason = outcome.message.unwrap_or_default();
            warn!(product_id = %product.id, reason = %reason, "legacy add-to-cart refused");
            self.notifier.notify(Notice::destructive("Error", reason));
        }
        Ok(outcome.success)
    }

    // ── Cart page ────────────────────────────────────────────────────────────

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Set a line's quantity; zero or below removes it. A quantity the cart
    /// rejects posts a destructive notice and leaves the line as it was.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> MedicallResult<()> {
        if quantity <= 0 {
            if self.cart.remove_from_cart(product_id) {
                self.notifier.notify(Notice::info(
                    "Item Removed",
                    "Item quantity set to 0 and removed from cart.",
                ));
            }
            return Ok(());
        }

        if let Err(e) = self.cart.update_quantity(product_id, quantity) {
            warn!(product_id = %product_id, quantity, error = %e, "quantity update refused");
            self.notifier.notify(Notice::destructive("Error", e.to_string()));
            return Err(e);
        }
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: &ProductId) {
        let name = self.cart.get(product_id).map(|item| item.product.name.clone());
        if let Some(name) = name {
            self.cart.remove_from_cart(product_id);
            self.notifier
                .notify(Notice::info("Item Removed", format!("{name} removed from cart.")));
        }
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear_cart();
        self.notifier
            .notify(Notice::info("Cart Cleared", "All items have been removed from your cart."));
    }

    /// Place an order for the cart and open the order view.
    ///
    /// The cart is kept; the shopper clears it explicitly.
    pub fn checkout(&mut self) -> MedicallResult<&Order> {
        let order = match self.builder.place_order(&self.cart) {
            Ok(order) => order,
            Err(e) => {
                if matches!(e, MedicallError::EmptyCart) {
                    self.notifier.notify(Notice::destructive(
                        "Cart is Empty",
                        "Please add items to your cart before proceeding to checkout.",
                    ));
                }
                return Err(e);
            }
        };

        self.notifier.notify(Notice::info(
            "Order Placed!",
            format!("Your order {} has been successfully placed.", order.order_id),
        ));

        let view = match self.order_view.take() {
            Some(mut view) => {
                view.show(order);
                view
            }
            None => OrderStatusView::new(order),
        };
        Ok(self.order_view.insert(view).order())
    }

    // ── Order view ───────────────────────────────────────────────────────────

    pub fn order_view(&self) -> Option<&OrderStatusView> {
        self.order_view.as_ref()
    }

    /// Cancel the order currently shown.
    pub fn cancel_order(&mut self) -> MedicallResult<()> {
        let today = self.builder.clock().today();
        let view = self
            .order_view
            .as_mut()
            .ok_or_else(|| MedicallError::CancellationNotAllowed {
                reason: "no order is being shown".to_string(),
            })?;

        match view.cancel_order(today) {
            Ok(()) => {
                let id = view.order().order_id.clone();
                self.notifier.notify(Notice::info(
                    "Order Cancelled",
                    format!("Your order {id} has been cancelled."),
                ));
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notice::destructive("Cannot Cancel Order", e.to_string()));
                Err(e)
            }
        }
    }

    /// Close the order view. Returns the order that was shown, if any.
    pub fn close_order_view(&mut self) -> Option<Order> {
        self.order_view.take().map(|view| view.order().clone())
    }
}
