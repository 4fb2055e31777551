//! Fault-injection strategies for simulated services.
//!
//! `RandomFaults` fails calls at random with a per-service probability and a
//! seedable RNG. `NoFaults` and `AlwaysFail` force one branch. Any
//! `Fn(Service) -> bool` closure also works as an injector.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use medicall_contracts::service::Service;

use crate::traits::FaultInjector;

/// Default failure probability of each simulated service.
pub fn default_failure_rate(service: Service) -> f64 {
    match service {
        Service::ProductCatalog => 0.0,
        Service::HeartRateSensor => 0.01,
        Service::GoogleFitConnect => 0.2,
        Service::GoogleFitAuthorize => 0.1,
        Service::GoogleFitFetch => 0.1,
        Service::GoogleFitRevoke => 0.1,
        Service::PrescriptionAnalysis => 0.2,
        Service::LegacyAddToCart => 0.1,
    }
}

/// Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaults;

impl FaultInjector for NoFaults {
    fn should_fail(&self, _service: Service) -> bool {
        false
    }
}

/// Always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFail;

impl FaultInjector for AlwaysFail {
    fn should_fail(&self, _service: Service) -> bool {
        true
    }
}

/// Fails each call with a configured per-service probability.
///
/// Services without an explicit rate never fail.
#[derive(Debug)]
pub struct RandomFaults {
    rates: HashMap<Service, f64>,
    rng: Mutex<StdRng>,
}

impl RandomFaults {
    /// An injector seeded from OS entropy.
    pub fn new(rates: HashMap<Service, f64>) -> Self {
        Self::with_rng(rates, StdRng::from_entropy())
    }

    /// An injector with a fixed seed; the same seed yields the same decisions.
    pub fn seeded(rates: HashMap<Service, f64>, seed: u64) -> Self {
        Self::with_rng(rates, StdRng::seed_from_u64(seed))
    }

    /// The default failure rate for every service.
    pub fn default_rates() -> HashMap<Service, f64> {
        Service::ALL
            .iter()
            .map(|&service| (service, default_failure_rate(service)))
            .collect()
    }

    fn with_rng(rates: HashMap<Service, f64>, rng: StdRng) -> Self {
        Self {
            rates,
            rng: Mutex::new(rng),
        }
    }

    /// Override the rate for one service.
    pub fn with_rate(mut self, service: Service, rate: f64) -> Self {
        self.rates.insert(service, rate);
        self
    }

    pub fn rate(&self, service: Service) -> f64 {
        self.rates.get(&service).copied().unwrap_or(0.0)
    }
}

impl FaultInjector for RandomFaults {
    fn should_fail(&self, service: Service) -> bool {
        let rate = self.rate(service);
        let fail = if rate <= 0.0 {
            false
        } else if rate >= 1.0 {
            true
        } else {
            self.rng
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .gen_bool(rate)
        };

        if fail {
            debug!(service = %service, rate, "injecting simulated failure");
        }
        fail
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use medicall_contracts::{error::MedicallError, service::Service};

    use super::{AlwaysFail, NoFaults, RandomFaults};
    use crate::traits::FaultInjector;

    #[test]
    fn fixed_strategies_force_each_branch() {
        assert!(!NoFaults.should_fail(Service::GoogleFitFetch));
        assert!(AlwaysFail.should_fail(Service::GoogleFitFetch));
    }

    #[test]
    fn inject_maps_failure_to_service_error() {
        match AlwaysFail.inject(Service::PrescriptionAnalysis, "unreadable") {
            Err(MedicallError::SimulatedServiceFailure { service, reason }) => {
                assert_eq!(service, Service::PrescriptionAnalysis);
                assert_eq!(reason, "unreadable");
            }
            other => panic!("expected SimulatedServiceFailure, got {:?}", other),
        }
        assert!(NoFaults.inject(Service::PrescriptionAnalysis, "unreadable").is_ok());
    }

    #[test]
    fn closures_act_as_injectors() {
        let only_sensor = |service: Service| service == Service::HeartRateSensor;
        assert!(only_sensor.should_fail(Service::HeartRateSensor));
        assert!(!only_sensor.should_fail(Service::ProductCatalog));
    }

    #[test]
    fn zero_and_one_rates_are_deterministic() {
        let faults = RandomFaults::seeded(HashMap::new(), 7)
            .with_rate(Service::GoogleFitConnect, 1.0)
            .with_rate(Service::GoogleFitRevoke, 0.0);

        for _ in 0..50 {
            assert!(faults.should_fail(Service::GoogleFitConnect));
            assert!(!faults.should_fail(Service::GoogleFitRevoke));
            // Unconfigured services never fail.
            assert!(!faults.should_fail(Service::LegacyAddToCart));
        }
    }

    #[test]
    fn same_seed_gives_same_decisions() {
        let a = RandomFaults::seeded(RandomFaults::default_rates(), 42);
        let b = RandomFaults::seeded(RandomFaults::default_rates(), 42);

        let run = |f: &RandomFaults| -> Vec<bool> {
            (0..200).map(|_| f.should_fail(Service::PrescriptionAnalysis)).collect()
        };

        assert_eq!(run(&a), run(&b));
    }

    #[test]
    fn failure_frequency_tracks_configured_rate() {
        let faults = RandomFaults::seeded(HashMap::new(), 1234).with_rate(Service::GoogleFitConnect, 0.2);
        let failures = (0..10_000)
            .filter(|_| faults.should_fail(Service::GoogleFitConnect))
            .count();

        // 20% of 10k with a generous tolerance.
        assert!((1_500..2_500).contains(&failures), "got {failures} failures");
    }

    #[test]
    fn default_rates_cover_every_service() {
        let rates = RandomFaults::default_rates();
        assert_eq!(rates.len(), Service::ALL.len());
        assert_eq!(rates[&Service::HeartRateSensor], 0.01);
        assert_eq!(rates[&Service::ProductCatalog], 0.0);
    }
}
