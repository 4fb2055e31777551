//! Error types for the MEDICALL cart, order, and service layers.
//!
//! All fallible operations return `MedicallResult<T>`. None of these errors
//! are fatal to a session: the session layer turns them into notifications.

use thiserror::Error;

use crate::{
    order::{Milestone, StepStatus},
    service::Service,
};

/// The unified error type for MEDICALL.
#[derive(Debug, Error)]
pub enum MedicallError {
    /// Checkout was attempted with no items in the cart.
    #[error("cart is empty: add items before proceeding to checkout")]
    EmptyCart,

    /// A simulated service call failed (by injected fault).
    #[error("{service} failed: {reason}")]
    SimulatedServiceFailure { service: Service, reason: String },

    /// An input value violated a local constraint.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The order is already delivered or already cancelled.
    #[error("order cannot be cancelled: {reason}")]
    CancellationNotAllowed { reason: String },

    /// A tracking step was asked to move along an edge the table forbids.
    #[error("illegal tracking transition for step '{step}': {from} -> {to}")]
    IllegalTransition {
        step: Milestone,
        from: StepStatus,
        to: StepStatus,
    },

    /// The owning scope was dropped or cancelled while the operation waited.
    #[error("operation '{operation}' was cancelled")]
    Cancelled { operation: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl MedicallError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn service_failure(service: Service, reason: impl Into<String>) -> Self {
        Self::SimulatedServiceFailure {
            service,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the MEDICALL crates.
pub type MedicallResult<T> = Result<T, MedicallError>;
