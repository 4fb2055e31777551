//! Storefront scenarios and the environment they share.

pub mod scan;
pub mod storefront;
pub mod vitals;

use std::{fmt::Display, path::PathBuf, sync::Arc, time::Duration};

use tracing::info;

use medicall_catalog::JsonCatalog;
use medicall_config::{LatencyConfig, MedicallConfig};
use medicall_contracts::{error::MedicallResult, notice::NoticeVariant, service::Service};
use medicall_core::{
    clock::SystemClock,
    traits::{Clock, FaultInjector, ProductCatalog},
};
use medicall_notify::InMemoryNotifier;
use medicall_services::{mock_data::default_catalog, SimulatedCatalog, StoreSession};

/// Poll interval used by the heart-rate scenario under `--fast`.
const FAST_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Command-line options shared by every scenario.
pub struct DemoOptions {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub seed: Option<u64>,
    pub fast: bool,
}

/// Configuration, fault injector and clock shared by every scenario.
pub struct DemoEnv {
    pub config: MedicallConfig,
    pub faults: Arc<dyn FaultInjector>,
    pub clock: Arc<dyn Clock>,
    pub seed: Option<u64>,
    catalog_path: Option<PathBuf>,
}

impl DemoEnv {
    pub fn load(options: &DemoOptions) -> MedicallResult<Self> {
        let mut config = match &options.config {
            Some(path) => MedicallConfig::from_file(path)?,
            None => MedicallConfig::default(),
        };
        if options.fast {
            config.latency = LatencyConfig::zero();
            config.heart_rate.poll_interval_ms = FAST_POLL_INTERVAL.as_millis() as u64;
        }

        info!(seed = ?options.seed, fast = options.fast, "demo environment loaded");

        Ok(Self {
            faults: config.fault_injector(options.seed),
            config,
            clock: Arc::new(SystemClock),
            seed: options.seed,
            catalog_path: options.catalog.clone(),
        })
    }

    pub fn latency(&self, service: Service) -> Duration {
        self.config.latency.duration(service)
    }

    /// The product catalogue behind simulated latency and faults.
    pub fn catalog(&self) -> MedicallResult<Box<dyn ProductCatalog>> {
        let inner = match &self.catalog_path {
            Some(path) => JsonCatalog::from_file(path)?,
            None => default_catalog()?,
        };
        let simulated = SimulatedCatalog::new(inner, Arc::clone(&self.faults))
            .with_latency(self.latency(Service::ProductCatalog));
        Ok(Box::new(simulated))
    }

    /// A fresh store session reporting into `notifier`.
    pub fn session(&self, notifier: &InMemoryNotifier) -> MedicallResult<StoreSession> {
        Ok(StoreSession::new(
            self.catalog()?,
            self.config.order_builder(Arc::clone(&self.clock)),
            Arc::new(notifier.clone()),
        ))
    }

    pub fn money(&self, amount: impl Display) -> String {
        format!("{}{}", self.config.store.currency_symbol, amount)
    }
}

/// Print every notice a scenario raised.
pub fn print_notices(notifier: &InMemoryNotifier) {
    let events = notifier.events();
    if events.is_empty() {
        println!("  Notices: (none)");
        return;
    }
    println!("  Notices:");
    for event in events {
        let marker = match event.notice.variant {
            NoticeVariant::Destructive => "!",
            NoticeVariant::Default => " ",
        };
        println!(
            "    [{}] #{} {}: {}",
            marker, event.sequence, event.notice.title, event.notice.description
        );
    }
}
