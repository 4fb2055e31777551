//! Loading, validating, and applying a `MedicallConfig`.
//!
//! Loading is two steps: parse the TOML into the schema (unknown keys are
//! rejected), then validate value ranges. Both report `ConfigError`. A loaded
//! config hands out the objects the rest of the workspace is wired from.

use std::{path::Path, sync::Arc};

use tracing::{debug, info};

use medicall_contracts::{
    error::{MedicallError, MedicallResult},
    service::Service,
};
use medicall_core::{
    checkout::OrderBuilder,
    fault::RandomFaults,
    ids::{LegacyTimestampOrderIds, UuidOrderIds},
    traits::{Clock, FaultInjector, OrderIdGenerator},
};

use crate::settings::{MedicallConfig, OrderIdScheme};

impl MedicallConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> MedicallResult<Self> {
        let config: MedicallConfig = toml::from_str(s).map_err(|e| MedicallError::ConfigError {
            reason: format!("failed to parse configuration TOML: {}", e),
        })?;
        config.validate()?;
        debug!(
            order_id_scheme = ?config.store.order_id_scheme,
            delivery_offset_days = config.store.delivery_offset_days,
            "configuration parsed"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it with `from_toml_str`.
    pub fn from_file(path: &Path) -> MedicallResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MedicallError::ConfigError {
            reason: format!("failed to read configuration file '{}': {}", path.display(), e),
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Check value ranges the schema cannot express.
    pub fn validate(&self) -> MedicallResult<()> {
        for service in Service::ALL {
            let rate = self.faults.rate(service);
            if !(0.0..=1.0).contains(&rate) {
                return Err(config_error(format!(
                    "faults.{} must be within [0, 1], got {}",
                    service.name().replace('-', "_"),
                    rate
                )));
            }
        }

        if self.store.order_id_prefix.trim().is_empty() {
            return Err(config_error("store.order_id_prefix must not be empty"));
        }
        if self.store.delivery_offset_days < 0 {
            return Err(config_error(format!(
                "store.delivery_offset_days must not be negative, got {}",
                self.store.delivery_offset_days
            )));
        }
        if self.heart_rate.window == 0 {
            return Err(config_error("heart_rate.window must be at least 1"));
        }
        if self.heart_rate.poll_interval_ms == 0 {
            return Err(config_error("heart_rate.poll_interval_ms must be at least 1"));
        }
        Ok(())
    }

    /// A random fault injector using the configured rates.
    ///
    /// With `seed` the decisions are reproducible across runs.
    pub fn fault_injector(&self, seed: Option<u64>) -> Arc<dyn FaultInjector> {
        let rates = Service::ALL
            .iter()
            .map(|&service| (service, self.faults.rate(service)))
            .collect();
        match seed {
            Some(seed) => Arc::new(RandomFaults::seeded(rates, seed)),
            None => Arc::new(RandomFaults::new(rates)),
        }
    }

    /// The order id generator for the configured scheme and prefix.
    pub fn order_id_generator(&self) -> Box<dyn OrderIdGenerator> {
        let prefix = self.store.order_id_prefix.clone();
        match self.store.order_id_scheme {
            OrderIdScheme::Uuid => Box::new(UuidOrderIds::new(prefix)),
            OrderIdScheme::LegacyTimestamp => Box::new(LegacyTimestampOrderIds::new(prefix)),
        }
    }

    /// An order builder wired with the configured ids and delivery offset.
    pub fn order_builder(&self, clock: Arc<dyn Clock>) -> OrderBuilder {
        OrderBuilder::new(self.order_id_generator(), clock)
            .with_delivery_offset_days(self.store.delivery_offset_days)
    }
}

fn config_error(reason: impl Into<String>) -> MedicallError {
    MedicallError::ConfigError { reason: reason.into() }
}
