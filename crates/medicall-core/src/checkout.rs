//! Checkout: turning a cart into an order.

use std::sync::Arc;

use chrono::Duration;
use tracing::info;

use medicall_contracts::{
    error::{MedicallError, MedicallResult},
    order::Order,
};

use crate::{
    cart::CartStore,
    clock::SystemClock,
    ids::UuidOrderIds,
    tracking::initial_tracking_steps,
    traits::{Clock, OrderIdGenerator},
};

/// Days between placing an order and its estimated delivery.
pub const DEFAULT_DELIVERY_OFFSET_DAYS: i64 = 5;

/// Builds orders from cart snapshots.
///
/// The builder owns its id generator and shares a clock with whoever else
/// needs "today" (the order status view stamps cancellation dates from it).
pub struct OrderBuilder {
    ids: Box<dyn OrderIdGenerator>,
    clock: Arc<dyn Clock>,
    delivery_offset_days: i64,
}

impl OrderBuilder {
    pub fn new(ids: Box<dyn OrderIdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ids,
            clock,
            delivery_offset_days: DEFAULT_DELIVERY_OFFSET_DAYS,
        }
    }

    pub fn with_delivery_offset_days(mut self, days: i64) -> Self {
        self.delivery_offset_days = days;
        self
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Place an order for the current cart contents.
    ///
    /// The cart is left untouched; callers decide whether to clear it.
    pub fn place_order(&self, cart: &CartStore) -> MedicallResult<Order> {
        if cart.is_empty() {
            return Err(MedicallError::EmptyCart);
        }

        let placed_at = self.clock.now();
        let today = placed_at.date_naive();
        let estimated_delivery_date = today
            .checked_add_signed(Duration::days(self.delivery_offset_days))
            .ok_or_else(|| {
                MedicallError::validation("delivery_offset_days", "estimated delivery date out of range")
            })?;

        let order = Order {
            order_id: self.ids.next_id(placed_at),
            items: cart.snapshot(),
            current_step: 1,
            placed_at,
            estimated_delivery_date,
            tracking_steps: initial_tracking_steps(today),
        };

        info!(
            order_id = %order.order_id,
            line_items = order.items.len(),
            total_items = order.total_items(),
            total_price = %order.total_price(),
            "order placed"
        );

        Ok(order)
    }
}

impl Default for OrderBuilder {
    fn default() -> Self {
        Self::new(Box::new(UuidOrderIds::default()), Arc::new(SystemClock))
    }
}
