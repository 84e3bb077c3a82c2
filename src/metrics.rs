//! Prometheus metrics and health reporting for the support bot.

use prometheus::{
    self, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Histogram buckets for classification latency (in seconds).
/// Classification is a handful of substring scans, so buckets start at 10µs.
fn classify_latency_buckets() -> Vec<f64> {
    vec![
        0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1,
    ]
}

/// All metrics for the support bot server.
pub struct Metrics {
    /// Prometheus registry for all metrics.
    pub registry: Registry,

    // =========================================================================
    // Counters
    // =========================================================================
    /// Chat messages classified.
    pub chat_messages_total: IntCounter,
    /// Classified messages per intent.
    pub intents_total: IntCounterVec,
    /// Requests rejected by authentication.
    pub auth_failures_total: IntCounter,
    /// Requests rejected by the rate limiter.
    pub rate_limited_total: IntCounter,
    /// Successful registrations.
    pub registrations_total: IntCounter,
    /// Successful logins.
    pub logins_total: IntCounter,

    // =========================================================================
    // Gauges
    // =========================================================================
    /// Uptime in seconds.
    pub uptime_seconds: IntGauge,

    // =========================================================================
    // Histograms (durations in seconds)
    // =========================================================================
    /// Classification duration in seconds.
    pub classify_duration_seconds: Histogram,

    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics instance with all metrics registered.
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let chat_messages_total = IntCounter::new(
            "supportbot_chat_messages_total",
            "Total number of chat messages classified",
        )?;
        let intents_total = IntCounterVec::new(
            Opts::new(
                "supportbot_intents_total",
                "Classified chat messages by intent",
            ),
            &["intent"],
        )?;
        let auth_failures_total = IntCounter::new(
            "supportbot_auth_failures_total",
            "Total number of requests rejected by authentication",
        )?;
        let rate_limited_total = IntCounter::new(
            "supportbot_rate_limited_total",
            "Total number of requests rejected by the rate limiter",
        )?;
        let registrations_total = IntCounter::new(
            "supportbot_registrations_total",
            "Total number of user registrations",
        )?;
        let logins_total =
            IntCounter::new("supportbot_logins_total", "Total number of successful logins")?;

        let uptime_seconds =
            IntGauge::new("supportbot_uptime_seconds", "Server uptime in seconds")?;

        let classify_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "supportbot_classify_duration_seconds",
                "Intent classification duration in seconds",
            )
            .buckets(classify_latency_buckets()),
        )?;

        registry.register(Box::new(chat_messages_total.clone()))?;
        registry.register(Box::new(intents_total.clone()))?;
        registry.register(Box::new(auth_failures_total.clone()))?;
        registry.register(Box::new(rate_limited_total.clone()))?;
        registry.register(Box::new(registrations_total.clone()))?;
        registry.register(Box::new(logins_total.clone()))?;
        registry.register(Box::new(uptime_seconds.clone()))?;
        registry.register(Box::new(classify_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            chat_messages_total,
            intents_total,
            auth_failures_total,
            rate_limited_total,
            registrations_total,
            logins_total,
            uptime_seconds,
            classify_duration_seconds,
            start_time: Instant::now(),
        })
    }

    /// Count one classified chat message.
    pub fn record_chat_message(&self, intent: &str) {
        self.chat_messages_total.inc();
        self.intents_total.with_label_values(&[intent]).inc();
    }

    /// Time since the metrics were created.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Update the uptime gauge.
    pub fn update_uptime(&self) {
        self.uptime_seconds.set(self.uptime().as_secs() as i64);
    }

    /// Export metrics in Prometheus text format.
    pub fn export_prometheus(&self) -> prometheus::Result<String> {
        use prometheus::Encoder;
        self.update_uptime();

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// Start a timer that records duration to a histogram when dropped.
    pub fn start_timer(histogram: &Histogram) -> HistogramTimer {
        HistogramTimer {
            histogram: histogram.clone(),
            start: Instant::now(),
        }
    }
}

/// Timer that records duration to a histogram when dropped.
pub struct HistogramTimer {
    histogram: Histogram,
    start: Instant,
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

impl HistogramTimer {
    /// Get the elapsed time without stopping the timer.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

// ============================================================================
// Health
// ============================================================================

/// Health status for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: Vec<HealthCheck>,
}

impl HealthStatus {
    /// Overall state is the worst of the individual checks.
    pub fn from_checks(version: impl Into<String>, uptime: Duration, checks: Vec<HealthCheck>) -> Self {
        let status = checks
            .iter()
            .map(|c| c.status)
            .max_by_key(|s| s.severity())
            .unwrap_or(HealthState::Healthy);

        Self {
            status,
            version: version.into(),
            uptime_seconds: uptime.as_secs(),
            checks,
        }
    }
}

/// Health state enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthState {
    /// Convert to HTTP status code.
    pub fn to_status_code(self) -> u16 {
        match self {
            HealthState::Healthy | HealthState::Degraded => 200,
            HealthState::Unhealthy => 503,
        }
    }

    fn severity(self) -> u8 {
        match self {
            HealthState::Healthy => 0,
            HealthState::Degraded => 1,
            HealthState::Unhealthy => 2,
        }
    }
}

/// Individual health check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthCheck {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthState::Healthy,
            message: None,
        }
    }

    pub fn degraded(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthState::Degraded,
            message: Some(message.into()),
        }
    }
}
