//! Simulated heart-rate sensor and the background monitor that polls it.
//!
//! The sensor models a resting heart rate that drifts slowly around a base
//! value, with per-reading noise. `HeartRateMonitor` polls any
//! `HeartRateSensor` on its own thread and keeps a bounded window of
//! readings; dropping the monitor stops the thread.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    thread::{self, JoinHandle},
    time::Duration,
};

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use medicall_contracts::{
    error::{MedicallError, MedicallResult},
    service::Service,
    vitals::{HeartRateReading, SensorStatus},
};
use medicall_core::{
    cancel::{CancelScope, CancelToken},
    clock::SystemClock,
    traits::{Clock, FaultInjector, HeartRateSensor},
};

use crate::mock_data::SENSOR_CONNECT_FAILED;

/// Resting rate the simulation starts from.
pub const BASE_BPM: f64 = 72.0;
/// Range the drifting base is kept in.
pub const BASE_BPM_RANGE: (f64, f64) = (50.0, 120.0);
/// Range every reported reading is clamped to.
pub const READING_BPM_RANGE: (u32, u32) = (40, 180);
/// Minimum seconds between two drifts of the base rate.
pub const DRIFT_INTERVAL_SECS: i64 = 30;
/// Largest single drift of the base rate, in either direction.
pub const MAX_DRIFT_BPM: f64 = 1.0;
/// Largest per-reading noise, in either direction.
pub const MAX_NOISE_BPM: f64 = 3.0;
/// Upper bound of the random read latency.
pub const MAX_READ_LATENCY: Duration = Duration::from_millis(100);

// ── Simulated sensor ─────────────────────────────────────────────────────────

struct SensorState {
    base_bpm: f64,
    last_drift: DateTime<Utc>,
    rng: StdRng,
}

/// A sensor producing plausible resting heart-rate readings.
///
/// Each read waits a random latency in `[0, max_latency]`, may fail with the
/// injector's `HeartRateSensor` rate, drifts the base rate by up to ±1 bpm if
/// 30 s have passed since the last drift, then reports the base plus up to
/// ±3 bpm of noise, rounded and clamped to 40..=180.
pub struct SimulatedHeartRateSensor {
    faults: Arc<dyn FaultInjector>,
    clock: Arc<dyn Clock>,
    max_latency: Duration,
    state: Mutex<SensorState>,
}

impl SimulatedHeartRateSensor {
    pub fn new(faults: Arc<dyn FaultInjector>) -> Self {
        Self::with_parts(faults, Arc::new(SystemClock), StdRng::from_entropy())
    }

    /// A sensor whose readings are reproducible for a given seed and clock.
    pub fn seeded(faults: Arc<dyn FaultInjector>, clock: Arc<dyn Clock>, seed: u64) -> Self {
        Self::with_parts(faults, clock, StdRng::seed_from_u64(seed))
    }

    fn with_parts(faults: Arc<dyn FaultInjector>, clock: Arc<dyn Clock>, rng: StdRng) -> Self {
        let last_drift = clock.now();
        Self {
            faults,
            clock,
            max_latency: MAX_READ_LATENCY,
            state: Mutex::new(SensorState {
                base_bpm: BASE_BPM,
                last_drift,
                rng,
            }),
        }
    }

    pub fn with_max_latency(mut self, max_latency: Duration) -> Self {
        self.max_latency = max_latency;
        self
    }

    /// The current base rate before noise.
    pub fn base_bpm(&self) -> f64 {
        self.lock().base_bpm
    }

    fn lock(&self) -> MutexGuard<'_, SensorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HeartRateSensor for SimulatedHeartRateSensor {
    fn read(&self, cancel: &CancelToken) -> MedicallResult<HeartRateReading> {
        let latency = {
            let max_ms = u64::try_from(self.max_latency.as_millis()).unwrap_or(u64::MAX);
            Duration::from_millis(self.lock().rng.gen_range(0..=max_ms))
        };
        cancel.sleep(latency, "heart-rate read")?;

        self.faults
            .inject(Service::HeartRateSensor, "sensor communication failure")?;

        let now = self.clock.now();
        let mut state = self.lock();

        if now - state.last_drift > chrono::Duration::seconds(DRIFT_INTERVAL_SECS) {
            let drift = state.rng.gen_range(-MAX_DRIFT_BPM..=MAX_DRIFT_BPM);
            state.base_bpm = (state.base_bpm + drift).clamp(BASE_BPM_RANGE.0, BASE_BPM_RANGE.1);
            state.last_drift = now;
            debug!(base_bpm = state.base_bpm, "heart-rate base drifted");
        }

        let noise = state.rng.gen_range(-MAX_NOISE_BPM..=MAX_NOISE_BPM);
        let (lo, hi) = READING_BPM_RANGE;
        let bpm = (state.base_bpm + noise).round().clamp(f64::from(lo), f64::from(hi)) as u32;

        Ok(HeartRateReading { bpm, timestamp: now })
    }
}

// ── Monitor ──────────────────────────────────────────────────────────────────

/// Polling cadence and history size for a `HeartRateMonitor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    pub poll_interval: Duration,
    pub window: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            window: 60,
        }
    }
}

#[derive(Debug)]
struct MonitorState {
    status: SensorStatus,
    error_message: Option<String>,
    readings: VecDeque<HeartRateReading>,
}

/// A snapshot of a monitor for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSnapshot {
    pub status: SensorStatus,
    pub current_bpm: Option<u32>,
    pub error_message: Option<String>,
    pub readings: Vec<HeartRateReading>,
}

/// Polls a sensor on a background thread.
///
/// The first read decides the initial status: `Active` on success, `Error`
/// with a connection message on failure. Afterwards the sensor is polled
/// every `poll_interval`; a failed poll is logged and skipped, and a
/// successful one (re)activates the monitor. Only the newest `window`
/// readings are kept.
///
/// Dropping the monitor cancels any in-flight wait, joins the thread and
/// leaves the status at `Idle`.
pub struct HeartRateMonitor {
    state: Arc<Mutex<MonitorState>>,
    scope: CancelScope,
    handle: Option<JoinHandle<()>>,
}

impl HeartRateMonitor {
    pub fn start(sensor: Arc<dyn HeartRateSensor>, settings: MonitorSettings) -> Self {
        let state = Arc::new(Mutex::new(MonitorState {
            status: SensorStatus::Connecting,
            error_message: None,
            readings: VecDeque::with_capacity(settings.window),
        }));
        let scope = CancelScope::new();

        let token = scope.token();
        let thread_state = Arc::clone(&state);
        let handle = thread::spawn(move || poll_loop(sensor, settings, thread_state, token));

        info!(
            poll_interval_ms = settings.poll_interval.as_millis() as u64,
            window = settings.window,
            "heart-rate monitor started"
        );

        Self {
            state,
            scope,
            handle: Some(handle),
        }
    }

    pub fn status(&self) -> SensorStatus {
        lock_state(&self.state).status
    }

    pub fn current_bpm(&self) -> Option<u32> {
        lock_state(&self.state).readings.back().map(|r| r.bpm)
    }

    pub fn error_message(&self) -> Option<String> {
        lock_state(&self.state).error_message.clone()
    }

    /// Readings in arrival order, oldest first.
    pub fn readings(&self) -> Vec<HeartRateReading> {
        lock_state(&self.state).readings.iter().cloned().collect()
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        let state = lock_state(&self.state);
        MonitorSnapshot {
            status: state.status,
            current_bpm: state.readings.back().map(|r| r.bpm),
            error_message: state.error_message.clone(),
            readings: state.readings.iter().cloned().collect(),
        }
    }

    /// Stop polling and return the final snapshot.
    pub fn stop(mut self) -> MonitorSnapshot {
        self.shutdown();
        self.snapshot()
    }

    fn shutdown(&mut self) {
        self.scope.cancel();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("heart-rate monitor thread panicked");
            }
            lock_state(&self.state).status = SensorStatus::Idle;
            info!("heart-rate monitor stopped");
        }
    }
}

impl Drop for HeartRateMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn lock_state(state: &Mutex<MonitorState>) -> MutexGuard<'_, MonitorState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn record(state: &Mutex<MonitorState>, reading: HeartRateReading, window: usize) {
    let mut state = lock_state(state);
    state.readings.push_back(reading);
    while state.readings.len() > window {
        state.readings.pop_front();
    }
    state.status = SensorStatus::Active;
    state.error_message = None;
}

fn poll_loop(
    sensor: Arc<dyn HeartRateSensor>,
    settings: MonitorSettings,
    state: Arc<Mutex<MonitorState>>,
    token: CancelToken,
) {
    match sensor.read(&token) {
        Ok(reading) => {
            info!(bpm = reading.bpm, "sensor connected");
            record(&state, reading, settings.window);
        }
        Err(MedicallError::Cancelled { .. }) => return,
        Err(e) => {
            warn!(error = %e, "initial heart-rate read failed");
            let mut state = lock_state(&state);
            state.status = SensorStatus::Error;
            state.error_message = Some(SENSOR_CONNECT_FAILED.to_string());
        }
    }

    loop {
        if token.sleep(settings.poll_interval, "heart-rate poll").is_err() {
            return;
        }
        match sensor.read(&token) {
            Ok(reading) => {
                debug!(bpm = reading.bpm, "heart-rate reading");
                record(&state, reading, settings.window);
            }
            Err(MedicallError::Cancelled { .. }) => return,
            Err(e) => warn!(error = %e, "heart-rate poll failed; skipping"),
        }
    }
}
