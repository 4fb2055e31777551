//! The cart store.
//!
//! `CartStore` is a single-writer, in-memory collection of line items keyed
//! by product id. It is owned by a session and lent by reference to every
//! view that needs it (store page, header badge, cart page); reads are
//! plain snapshots of the same store.
//!
//! Invariants held after every mutation:
//! - at most one line item per product id
//! - every line item has `quantity >= 1`
//! - `total_items()` / `total_price()` are the sum-reduction over the
//!   current items (they are recomputed on read, never cached)
//! - `total_price()` is representable as a `Decimal`; a mutation that would
//!   overflow it is rejected before anything changes

use rust_decimal::Decimal;
use tracing::debug;

use medicall_contracts::{
    cart::CartLineItem,
    error::{MedicallError, MedicallResult},
    product::{Product, ProductId},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartStore {
    items: Vec<CartLineItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already in the cart its quantity is incremented;
    /// otherwise a new line item is inserted. A zero quantity is rejected
    /// because it would create an empty line item.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) -> MedicallResult<()> {
        if quantity == 0 {
            return Err(MedicallError::validation("quantity", "must be at least 1"));
        }

        let current = self.get(&product.id).map_or(0, |item| item.quantity);
        let updated = current
            .checked_add(quantity)
            .ok_or_else(|| MedicallError::validation("quantity", "line item quantity overflow"))?;
        self.check_total_with(product, updated)?;

        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(existing) => {
                existing.quantity = updated;
                debug!(product_id = %product.id, quantity = updated, "cart line incremented");
            }
            None => {
                self.items.push(CartLineItem::new(product.clone(), quantity));
                debug!(product_id = %product.id, quantity, "cart line inserted");
            }
        }
        Ok(())
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: &Product) -> MedicallResult<()> {
        self.add_to_cart(product, 1)
    }

    /// Remove the line item for `product_id`. Returns whether one was removed;
    /// an absent id is not an error.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.product.id != product_id);
        let removed = self.items.len() != before;
        if removed {
            debug!(product_id = %product_id, "cart line removed");
        }
        removed
    }

    /// Set the quantity for `product_id`; zero or below removes the line.
    /// Unknown ids are ignored.
    ///
    /// A quantity above `u32::MAX`, or one that would push the cart total out
    /// of `Decimal` range, is `Validation` and leaves the cart unchanged.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> MedicallResult<()> {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return Ok(());
        }

        let quantity = u32::try_from(quantity)
            .map_err(|_| MedicallError::validation("quantity", "exceeds the maximum line quantity"))?;
        let Some(product) = self.get(product_id).map(|item| item.product.clone()) else {
            return Ok(());
        };
        self.check_total_with(&product, quantity)?;

        if let Some(item) = self.items.iter_mut().find(|item| &item.product.id == product_id) {
            item.quantity = quantity;
        }
        debug!(product_id = %product_id, quantity, "cart quantity updated");
        Ok(())
    }

    /// Verify the cart total stays representable if `product`'s line held
    /// `quantity` units. Sums in item order, the same order `total_price` uses.
    fn check_total_with(&self, product: &Product, quantity: u32) -> MedicallResult<()> {
        let out_of_range = || MedicallError::validation("quantity", "cart total out of range");
        let line = |price: Decimal, qty: u32| price.checked_mul(Decimal::from(qty));

        let mut total = Decimal::ZERO;
        let mut seen = false;
        for item in &self.items {
            let qty = if item.product.id == product.id {
                seen = true;
                quantity
            } else {
                item.quantity
            };
            let amount = line(item.product.price, qty).ok_or_else(out_of_range)?;
            total = total.checked_add(amount).ok_or_else(out_of_range)?;
        }
        if !seen {
            let amount = line(product.price, quantity).ok_or_else(out_of_range)?;
            total.checked_add(amount).ok_or_else(out_of_range)?;
        }
        Ok(())
    }

    /// Remove every line item.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        debug!("cart cleared");
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Σ quantity over all line items.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Σ price × quantity over all line items.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// A value copy of the current line items.
    pub fn snapshot(&self) -> Vec<CartLineItem> {
        self.items.clone()
    }
}
