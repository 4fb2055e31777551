//! # medicall-core
//!
//! The cart and order model for the MEDICALL storefront.
//!
//! This crate provides:
//! - The service seams (`ProductCatalog`, `HeartRateSensor`, `GoogleFitClient`,
//!   `PrescriptionAnalyzer`, `LegacyCartEndpoint`, `NotificationSink`,
//!   `FaultInjector`, `OrderIdGenerator`, `Clock`)
//! - `CartStore`, the single-writer cart
//! - `OrderBuilder`, which turns a cart into an `Order`
//! - `OrderStatusView`, the tracking-step state machine with cancellation
//! - `CancelToken` / `CancelScope` for abandoning slow simulated calls
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medicall_core::{CartStore, OrderBuilder, OrderStatusView};
//!
//! let mut cart = CartStore::new();
//! cart.add_to_cart(&product, 2)?;
//! let order = OrderBuilder::default().place_order(&cart)?;
//! let mut view = OrderStatusView::new(order);
//! view.cancel_order(today)?;
//! ```

pub mod cancel;
pub mod cart;
pub mod checkout;
pub mod clock;
pub mod fault;
pub mod ids;
pub mod tracking;
pub mod traits;

pub use cancel::{CancelScope, CancelToken};
pub use cart::CartStore;
pub use checkout::OrderBuilder;
pub use tracking::OrderStatusView;
