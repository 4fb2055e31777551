//! Vitals scenarios: the heart-rate monitor and the Google Fit link.

use std::{sync::Arc, thread};

use medicall_contracts::{error::MedicallResult, service::Service};
use medicall_core::cancel::CancelScope;
use medicall_notify::InMemoryNotifier;
use medicall_services::{
    GoogleFitLink, HeartRateMonitor, MonitorSettings, SimulatedGoogleFit, SimulatedHeartRateSensor,
};

use super::{print_notices, DemoEnv};

/// How many poll intervals the heart-rate scenario watches for.
const POLL_CYCLES: u32 = 4;

/// Authorization code handed to the simulated OAuth exchange.
const DEMO_AUTH_CODE: &str = "demo-authorization-code";

/// Start the monitor, let it poll a few times, then stop it.
pub fn run_heart_rate(env: &DemoEnv) -> MedicallResult<()> {
    println!("=== Scenario: Heart-Rate Monitor ===");
    println!();

    let faults = Arc::clone(&env.faults);
    let sensor = match env.seed {
        Some(seed) => SimulatedHeartRateSensor::seeded(faults, Arc::clone(&env.clock), seed),
        None => SimulatedHeartRateSensor::new(faults),
    }
    .with_max_latency(env.latency(Service::HeartRateSensor));

    let settings = MonitorSettings {
        poll_interval: env.config.heart_rate.poll_interval(),
        window: env.config.heart_rate.window,
    };
    println!(
        "  Polling every {} ms, keeping {} reading(s)",
        settings.poll_interval.as_millis(),
        settings.window
    );

    let monitor = HeartRateMonitor::start(Arc::new(sensor), settings);
    thread::sleep(settings.poll_interval * POLL_CYCLES + settings.poll_interval / 2);

    let live = monitor.snapshot();
    let stopped = monitor.stop();

    println!("  Status while running:  {}", live.status);
    match live.current_bpm {
        Some(bpm) => println!("  Current heart rate:    {} bpm", bpm),
        None => println!("  Current heart rate:    --"),
    }
    if let Some(message) = &live.error_message {
        println!("  Sensor error:          {}", message);
    }
    let bpms: Vec<String> = stopped.readings.iter().map(|r| r.bpm.to_string()).collect();
    println!("  Readings:              [{}]", bpms.join(", "));
    println!("  Status after stop:     {}", stopped.status);
    println!();
    Ok(())
}

/// Connect, fetch the last five minutes of samples, disconnect.
pub fn run_google_fit(env: &DemoEnv) -> MedicallResult<()> {
    println!("=== Scenario: Google Fit ===");
    println!();

    let notifier = InMemoryNotifier::new("google-fit");
    let faults = Arc::clone(&env.faults);
    let client = match env.seed {
        Some(seed) => SimulatedGoogleFit::seeded(faults, Arc::clone(&env.clock), seed),
        None => SimulatedGoogleFit::new(faults),
    }
    .with_latency(&env.config.latency);

    let mut link = GoogleFitLink::new(
        Arc::new(client),
        Arc::clone(&env.faults),
        Arc::new(notifier.clone()),
    )
    .with_connect_latency(env.latency(Service::GoogleFitConnect));

    let scope = CancelScope::new();
    let cancel = scope.token();

    match link.connect(DEMO_AUTH_CODE, &cancel) {
        Ok(()) => println!("  Connect:     {:?}", link.state()),
        Err(e) => println!("  Connect:     {:?} ({})", link.state(), e),
    }

    if link.is_connected() {
        match link.fetch_recent(env.clock.now(), chrono::Duration::minutes(5), &cancel) {
            Ok(samples) => {
                let total: f64 = samples.iter().map(|s| s.value.fp_val).sum();
                let mean = if samples.is_empty() {
                    0.0
                } else {
                    total / samples.len() as f64
                };
                println!("  Samples:     {} (mean {:.1} bpm)", samples.len(), mean);
            }
            Err(e) => println!("  Fetch:       {}", e),
        }
        link.disconnect(&cancel)?;
        println!("  Disconnect:  {:?}", link.state());
    }

    println!();
    print_notices(&notifier);
    println!();
    Ok(())
}
