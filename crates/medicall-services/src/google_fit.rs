//! Simulated Google Fit integration.
//!
//! `SimulatedGoogleFit` stands in for the three Google Fit calls the
//! dashboard makes (OAuth code exchange, heart-rate dataset fetch, token
//! revocation). `GoogleFitLink` is the dashboard's connection state machine
//! on top of any `GoogleFitClient`:
//!
//! ```text
//! Disconnected ──connect──► Connecting ──┬──► Connected ──disconnect──► Disconnected
//!                                        └──► Error ──connect──► Connecting
//! ```

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use medicall_config::LatencyConfig;
use medicall_contracts::{
    error::{MedicallError, MedicallResult},
    notice::Notice,
    service::Service,
    vitals::{GoogleFitHeartRateSample, GoogleFitTokens, GoogleFitValue},
};
use medicall_core::{
    cancel::CancelToken,
    clock::SystemClock,
    traits::{Clock, FaultInjector, GoogleFitClient, NotificationSink},
};

use crate::mock_data::GOOGLE_FIT_CONNECT_FAILED;

/// Spacing between generated samples, in milliseconds.
pub const SAMPLE_SPACING_MS: i64 = 30_000;
/// Length of each generated sample, in milliseconds.
pub const SAMPLE_SPAN_MS: i64 = 5_000;
/// Generated bpm values are rounded from this range.
pub const SAMPLE_BPM_RANGE: (f64, f64) = (65.0, 75.0);

const NANOS_PER_MILLI: i64 = 1_000_000;

// ── Simulated client ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Latencies {
    authorize: Duration,
    fetch: Duration,
    revoke: Duration,
}

impl From<&LatencyConfig> for Latencies {
    fn from(config: &LatencyConfig) -> Self {
        Self {
            authorize: config.duration(Service::GoogleFitAuthorize),
            fetch: config.duration(Service::GoogleFitFetch),
            revoke: config.duration(Service::GoogleFitRevoke),
        }
    }
}

pub struct SimulatedGoogleFit {
    faults: Arc<dyn FaultInjector>,
    clock: Arc<dyn Clock>,
    latency: Latencies,
    rng: Mutex<StdRng>,
}

impl SimulatedGoogleFit {
    pub fn new(faults: Arc<dyn FaultInjector>) -> Self {
        Self::with_parts(faults, Arc::new(SystemClock), StdRng::from_entropy())
    }

    pub fn seeded(faults: Arc<dyn FaultInjector>, clock: Arc<dyn Clock>, seed: u64) -> Self {
        Self::with_parts(faults, clock, StdRng::seed_from_u64(seed))
    }

    fn with_parts(faults: Arc<dyn FaultInjector>, clock: Arc<dyn Clock>, rng: StdRng) -> Self {
        Self {
            faults,
            clock,
            latency: Latencies::from(&LatencyConfig::default()),
            rng: Mutex::new(rng),
        }
    }

    /// Take the authorize, fetch and revoke latencies from `latency`.
    pub fn with_latency(mut self, latency: &LatencyConfig) -> Self {
        self.latency = Latencies::from(latency);
        self
    }
}

impl GoogleFitClient for SimulatedGoogleFit {
    fn authorize(&self, code: &str, cancel: &CancelToken) -> MedicallResult<GoogleFitTokens> {
        cancel.sleep(self.latency.authorize, "google fit authorize")?;

        if code.trim().is_empty() {
            return Err(MedicallError::service_failure(
                Service::GoogleFitAuthorize,
                "authorization code is empty",
            ));
        }
        self.faults
            .inject(Service::GoogleFitAuthorize, "token exchange rejected")?;

        let stamp = self.clock.now().timestamp_millis();
        info!("google fit authorization code exchanged");
        Ok(GoogleFitTokens {
            access_token: format!("simulated_access_token_{stamp}"),
            refresh_token: Some(format!("simulated_refresh_token_{stamp}")),
        })
    }

    fn fetch_heart_rate(
        &self,
        access_token: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cancel: &CancelToken,
    ) -> MedicallResult<Vec<GoogleFitHeartRateSample>> {
        if access_token.trim().is_empty() {
            return Err(MedicallError::validation("access_token", "must not be empty"));
        }
        if end < start {
            return Err(MedicallError::validation(
                "time_range",
                format!("end {end} is before start {start}"),
            ));
        }

        cancel.sleep(self.latency.fetch, "google fit fetch")?;
        self.faults.inject(
            Service::GoogleFitFetch,
            "Simulated failure fetching data from Google Fit.",
        )?;

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let spacing = chrono::Duration::milliseconds(SAMPLE_SPACING_MS);
        let span = chrono::Duration::milliseconds(SAMPLE_SPAN_MS);
        let mut samples = Vec::new();
        let mut current = start;
        while current < end {
            let start_ms = current.timestamp_millis();
            let end_ms = (current + span).timestamp_millis();
            let bpm = rng.gen_range(SAMPLE_BPM_RANGE.0..SAMPLE_BPM_RANGE.1).round();
            samples.push(GoogleFitHeartRateSample {
                start_time_nanos: start_ms.saturating_mul(NANOS_PER_MILLI),
                end_time_nanos: end_ms.saturating_mul(NANOS_PER_MILLI),
                value: GoogleFitValue { fp_val: bpm },
            });
            current += spacing;
        }

        debug!(samples = samples.len(), "google fit samples generated");
        Ok(samples)
    }

    fn revoke(&self, _token: &str, cancel: &CancelToken) -> MedicallResult<bool> {
        cancel.sleep(self.latency.revoke, "google fit revoke")?;
        Ok(!self.faults.should_fail(Service::GoogleFitRevoke))
    }
}

// ── Connection state machine ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
    /// The last connection attempt failed with this user-facing message.
    Error(String),
}

/// The dashboard's link to Google Fit.
///
/// `connect` runs the simulated handshake, which fails with the injector's
/// `GoogleFitConnect` rate, then exchanges the authorization code for
/// tokens. Outcomes are reported as notices as well as results.
pub struct GoogleFitLink {
    client: Arc<dyn GoogleFitClient>,
    faults: Arc<dyn FaultInjector>,
    notifier: Arc<dyn NotificationSink>,
    connect_latency: Duration,
    state: LinkState,
    tokens: Option<GoogleFitTokens>,
}

impl GoogleFitLink {
    pub fn new(
        client: Arc<dyn GoogleFitClient>,
        faults: Arc<dyn FaultInjector>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            client,
            faults,
            notifier,
            connect_latency: LatencyConfig::default().duration(Service::GoogleFitConnect),
            state: LinkState::Disconnected,
            tokens: None,
        }
    }

    pub fn with_connect_latency(mut self, latency: Duration) -> Self {
        self.connect_latency = latency;
        self
    }

    pub fn state(&self) -> &LinkState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    /// Connect using an OAuth authorization `code`.
    ///
    /// Connecting while already connected is a no-op. A cancelled attempt
    /// returns to `Disconnected` without a notice.
    pub fn connect(&mut self, code: &str, cancel: &CancelToken) -> MedicallResult<()> {
        if self.is_connected() {
            return Ok(());
        }
        self.state = LinkState::Connecting;
        info!("connecting to google fit");

        let attempt = cancel
            .sleep(self.connect_latency, "google fit connect")
            .and_then(|()| self.faults.inject(Service::GoogleFitConnect, GOOGLE_FIT_CONNECT_FAILED))
            .and_then(|()| self.client.authorize(code, cancel));

        match attempt {
            Ok(tokens) => {
                self.tokens = Some(tokens);
                self.state = LinkState::Connected;
                self.notifier.notify(Notice::info("Success", "Connected to Google Fit."));
                Ok(())
            }
            Err(e @ MedicallError::Cancelled { .. }) => {
                self.state = LinkState::Disconnected;
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "google fit connection failed");
                self.state = LinkState::Error(GOOGLE_FIT_CONNECT_FAILED.to_string());
                self.notifier
                    .notify(Notice::destructive("Error", "Failed to connect to Google Fit."));
                Err(e)
            }
        }
    }

    /// Revoke the token (best effort) and return to `Disconnected`.
    pub fn disconnect(&mut self, cancel: &CancelToken) -> MedicallResult<()> {
        if let Some(tokens) = self.tokens.take() {
            match self.client.revoke(&tokens.access_token, cancel) {
                Ok(true) => debug!("google fit token revoked"),
                Ok(false) => warn!("google fit token revocation was not accepted"),
                Err(e @ MedicallError::Cancelled { .. }) => {
                    self.tokens = Some(tokens);
                    return Err(e);
                }
                Err(e) => warn!(error = %e, "google fit token revocation failed"),
            }
        }
        self.state = LinkState::Disconnected;
        self.notifier
            .notify(Notice::info("Disconnected", "Disconnected from Google Fit."));
        Ok(())
    }

    /// Heart-rate samples for the `window` ending at `now`.
    pub fn fetch_recent(
        &self,
        now: DateTime<Utc>,
        window: chrono::Duration,
        cancel: &CancelToken,
    ) -> MedicallResult<Vec<GoogleFitHeartRateSample>> {
        let tokens = match (&self.state, &self.tokens) {
            (LinkState::Connected, Some(tokens)) => tokens,
            _ => return Err(MedicallError::validation("google_fit", "not connected")),
        };
        self.client
            .fetch_heart_rate(&tokens.access_token, now - window, now, cancel)
    }
}
