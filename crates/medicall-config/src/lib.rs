//! # medicall-config
//!
//! TOML configuration for the MEDICALL storefront and its simulated services.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use medicall_config::MedicallConfig;
//!
//! let config = MedicallConfig::from_file(Path::new("medicall.toml"))?;
//! let faults = config.fault_injector(Some(42));
//! let builder = config.order_builder(clock);
//! ```
//!
//! Missing tables and keys fall back to the storefront defaults; rates outside
//! `[0, 1]`, unknown keys, and malformed TOML are all `ConfigError`.

pub mod loader;
pub mod settings;

pub use settings::{FaultConfig, HeartRateConfig, LatencyConfig, MedicallConfig, OrderIdScheme, StoreConfig};

// ── Tests ─────────────────────────────────────────────────────────────────────
