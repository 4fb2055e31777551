//! Heart-rate readings and Google Fit payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single heart-rate reading from the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateReading {
    /// Beats per minute.
    pub bpm: u32,
    pub timestamp: DateTime<Utc>,
}

/// Connection status of the heart-rate sensor as seen by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Connecting,
    Active,
    Error,
    Idle,
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SensorStatus::Connecting => "connecting",
            SensorStatus::Active => "active",
            SensorStatus::Error => "error",
            SensorStatus::Idle => "idle",
        };
        f.write_str(s)
    }
}

/// The `value` object of a Google Fit data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoogleFitValue {
    /// Heart rate in BPM as a floating-point value.
    #[serde(rename = "fpVal")]
    pub fp_val: f64,
}

/// One heart-rate data point as returned by the Google Fit dataset endpoint.
///
/// Times are nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoogleFitHeartRateSample {
    #[serde(rename = "startTimeNanos")]
    pub start_time_nanos: i64,
    #[serde(rename = "endTimeNanos")]
    pub end_time_nanos: i64,
    pub value: GoogleFitValue,
}

/// Tokens produced by a completed OAuth exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleFitTokens {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}
