//! Order identifier generators.
//!
//! `UuidOrderIds` is the default. `LegacyTimestampOrderIds` keeps the older
//! `PREFIX-<last six digits of the millisecond timestamp>` scheme for
//! compatibility; two orders placed within the same millisecond, or exactly
//! 1000 seconds apart, receive the same id.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use medicall_contracts::order::OrderId;

use crate::traits::OrderIdGenerator;

/// Prefix used by the storefront for every order id.
pub const DEFAULT_ORDER_ID_PREFIX: &str = "MEDICALL";

/// `PREFIX-<uppercase simple UUID v4>`.
#[derive(Debug, Clone)]
pub struct UuidOrderIds {
    prefix: String,
}

impl UuidOrderIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Default for UuidOrderIds {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_ID_PREFIX)
    }
}

impl OrderIdGenerator for UuidOrderIds {
    fn next_id(&self, _now: DateTime<Utc>) -> OrderId {
        let id = Uuid::new_v4().simple().to_string().to_uppercase();
        OrderId(format!("{}-{}", self.prefix, id))
    }
}

/// `PREFIX-NNNNNN` from the last six digits of the creation timestamp in ms.
#[derive(Debug, Clone)]
pub struct LegacyTimestampOrderIds {
    prefix: String,
}

impl LegacyTimestampOrderIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Default for LegacyTimestampOrderIds {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_ID_PREFIX)
    }
}

impl OrderIdGenerator for LegacyTimestampOrderIds {
    fn next_id(&self, now: DateTime<Utc>) -> OrderId {
        let tail = now.timestamp_millis().rem_euclid(1_000_000);
        OrderId(format!("{}-{:06}", self.prefix, tail))
    }
}
