//! Scoped cancellation for simulated calls.
//!
//! A `CancelToken` is a cloneable flag plus a condition variable. Simulated
//! services wait out their latency with `CancelToken::sleep`, which wakes as
//! soon as the token is cancelled. A `CancelScope` owns a token and cancels
//! it on drop, tying every call started under it to the scope's lifetime.

use std::{
    sync::{Arc, Condvar, Mutex, PoisonError},
    time::Duration,
};

use medicall_contracts::error::{MedicallError, MedicallResult};

#[derive(Debug, Default)]
struct Inner {
    cancelled: Mutex<bool>,
    signal: Condvar,
}

/// A cloneable cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the token and wake every waiter.
    pub fn cancel(&self) {
        let mut cancelled = self
            .inner
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *cancelled = true;
        self.inner.signal.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self
            .inner
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// `Err(Cancelled)` if the token has been cancelled.
    pub fn check(&self, operation: &str) -> MedicallResult<()> {
        if self.is_cancelled() {
            Err(MedicallError::Cancelled {
                operation: operation.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Wait for `duration` unless the token is cancelled first.
    ///
    /// Returns `Err(Cancelled)` if the token was cancelled before or during
    /// the wait.
    pub fn sleep(&self, duration: Duration, operation: &str) -> MedicallResult<()> {
        let guard = self
            .inner
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let cancelled = if duration.is_zero() {
            *guard
        } else {
            let (guard, _timeout) = self
                .inner
                .signal
                .wait_timeout_while(guard, duration, |cancelled| !*cancelled)
                .unwrap_or_else(PoisonError::into_inner);
            *guard
        };

        if cancelled {
            Err(MedicallError::Cancelled {
                operation: operation.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// Owns a `CancelToken` and cancels it when dropped.
#[derive(Debug, Default)]
pub struct CancelScope {
    token: CancelToken,
}

impl CancelScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle to this scope's token for passing into calls.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Cancel now without waiting for drop.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for CancelScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
