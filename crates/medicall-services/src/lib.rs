//! # medicall-services
//!
//! Simulated back ends for the MEDICALL storefront and the session that ties
//! them to the cart.
//!
//! Every service here sleeps for a fixed latency on a `CancelToken`, then asks
//! a `FaultInjector` whether to fail. Pass `NoFaults` and zero latency for
//! deterministic tests; pass `RandomFaults::default_rates()` (or the
//! configured rates) to reproduce the storefront's flaky behaviour.
//!
//! - `store`: product listing and the legacy add-to-cart endpoint
//! - `heart_rate`: the simulated sensor and the polling `HeartRateMonitor`
//! - `google_fit`: the OAuth-style client and the connect/disconnect link
//! - `prescription`: image analysis with fixture results
//! - `session`: `StoreSession`, the storefront, cart page and order view
//! - `mock_data`: the bundled product catalogue and fixture strings

pub mod google_fit;
pub mod heart_rate;
pub mod mock_data;
pub mod prescription;
pub mod session;
pub mod store;

pub use google_fit::{GoogleFitLink, LinkState, SimulatedGoogleFit};
pub use heart_rate::{HeartRateMonitor, MonitorSettings, MonitorSnapshot, SimulatedHeartRateSensor};
pub use prescription::SimulatedPrescriptionAnalyzer;
pub use session::StoreSession;
pub use store::{SimulatedCartEndpoint, SimulatedCatalog};
