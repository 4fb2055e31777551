//! Order and tracking-step types.
//!
//! An `Order` is a value snapshot of the cart taken at checkout. Its tracking
//! steps start from a fixed six-milestone sequence; the only lifecycle change
//! modeled is cancellation, which the order status view applies to its own
//! copy of the steps.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLineItem;

/// Identifier of a placed order (e.g. "MEDICALL-3f9c…").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The named milestones an order moves through.
///
/// `Cancelled` is never part of the initial sequence; it is appended when an
/// order is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Milestone {
    #[serde(rename = "Order Placed")]
    OrderPlaced,
    #[serde(rename = "Order Confirmed")]
    OrderConfirmed,
    #[serde(rename = "Processing")]
    Processing,
    #[serde(rename = "Shipped")]
    Shipped,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    #[serde(rename = "Delivered")]
    Delivered,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl Milestone {
    /// The fixed sequence every new order starts with.
    pub const SEQUENCE: [Milestone; 6] = [
        Milestone::OrderPlaced,
        Milestone::OrderConfirmed,
        Milestone::Processing,
        Milestone::Shipped,
        Milestone::OutForDelivery,
        Milestone::Delivered,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Milestone::OrderPlaced => "Order Placed",
            Milestone::OrderConfirmed => "Order Confirmed",
            Milestone::Processing => "Processing",
            Milestone::Shipped => "Shipped",
            Milestone::OutForDelivery => "Out for Delivery",
            Milestone::Delivered => "Delivered",
            Milestone::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status of a single tracking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Pending => "pending",
            StepStatus::Active => "active",
            StepStatus::Completed => "completed",
            StepStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One entry in an order's tracking timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingStep {
    pub name: Milestone,
    /// Date the step was reached, absent for steps still pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub status: StepStatus,
}

impl TrackingStep {
    pub fn new(name: Milestone, status: StepStatus, date: Option<NaiveDate>) -> Self {
        Self { name, date, status }
    }

    pub fn pending(name: Milestone) -> Self {
        Self::new(name, StepStatus::Pending, None)
    }
}

/// A placed order.
///
/// `items` is a copy of the cart contents at checkout time; mutating the cart
/// afterwards never changes a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub items: Vec<CartLineItem>,
    /// Index into `tracking_steps` of the step currently in progress.
    pub current_step: usize,
    pub placed_at: DateTime<Utc>,
    pub estimated_delivery_date: NaiveDate,
    pub tracking_steps: Vec<TrackingStep>,
}

impl Order {
    /// Total number of units across all ordered items.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Order total: Σ price × quantity.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }
}
