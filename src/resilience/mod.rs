//! Retry machinery for the ChartMogul client.
//!
//! One [`RetryController`] drives every generic operation: it classifies
//! each attempt's outcome, sleeps under exponential backoff, and stops when
//! the outcome is terminal or the budget (attempts or wall-clock) runs out.

use crate::config::RetryConfig;
use crate::errors::TransportError;
use bytes::Bytes;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// The observable result of one request attempt.
///
/// Either a status is present (a response was received) or the transport
/// error list is non-empty (no response at all); both coexist when a status
/// arrived but the body read failed.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    /// HTTP status code, if a response was received.
    pub status: Option<u16>,
    /// Canonical status text for the received status.
    pub status_text: Option<String>,
    /// Raw response body bytes.
    pub body: Option<Bytes>,
    /// Transport failures observed during the attempt.
    pub transport_errors: Vec<TransportError>,
}

impl AttemptOutcome {
    /// An outcome for an attempt that produced no response at all.
    pub(crate) fn failure(error: TransportError) -> Self {
        Self {
            status: None,
            status_text: None,
            body: None,
            transport_errors: vec![error],
        }
    }
}

/// Per-attempt verdict: try again or surface the outcome as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// The failure is transient; run another attempt if budget remains.
    Retry,
    /// The outcome is terminal (success or a non-retryable failure).
    Stop,
}

/// Drives an attempt closure under exponential backoff.
///
/// The controller knows nothing about request semantics. Every attempt
/// re-executes the whole request; applying it to a non-idempotent operation
/// whose response was lost can create a duplicate remote resource, which is
/// the caller's hazard to manage.
pub struct RetryController {
    max_attempts: u32,
    max_elapsed: Duration,
    initial_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
    jitter: f64,
    retryable_statuses: Vec<u16>,
    enabled: bool,
}

impl RetryController {
    /// Creates a controller from retry configuration.
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            max_elapsed: config.max_elapsed,
            initial_backoff: config.initial_backoff,
            max_backoff: config.max_backoff,
            multiplier: config.multiplier,
            jitter: config.jitter,
            retryable_statuses: config.retryable_statuses.clone(),
            enabled: config.enabled,
        }
    }

    /// Classifies one attempt's outcome.
    ///
    /// Retry iff a network-class transport failure occurred, or a response
    /// was received with a status in the configured retryable set. Everything
    /// else (2xx, other 4xx, non-network transport errors) is terminal.
    pub fn classify(&self, outcome: &AttemptOutcome) -> RetryDecision {
        if outcome
            .transport_errors
            .iter()
            .any(TransportError::is_network)
        {
            return RetryDecision::Retry;
        }
        if let Some(status) = outcome.status {
            if self.retryable_statuses.contains(&status) {
                return RetryDecision::Retry;
            }
        }
        RetryDecision::Stop
    }

    /// Runs the attempt closure until a terminal outcome or budget
    /// exhaustion, returning the final attempt's outcome either way.
    ///
    /// Both bounds apply: the attempt count and the elapsed wall-clock
    /// budget, whichever is reached first.
    pub async fn run<F, Fut>(&self, mut attempt: F) -> AttemptOutcome
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = AttemptOutcome>,
    {
        let started = Instant::now();
        let mut attempts = 0u32;

        loop {
            let outcome = attempt().await;
            attempts += 1;

            if !self.enabled || self.classify(&outcome) == RetryDecision::Stop {
                return outcome;
            }
            if attempts >= self.max_attempts {
                tracing::debug!(attempts, "retry attempt budget exhausted");
                return outcome;
            }

            let delay = self.backoff_for(attempts);
            if started.elapsed() + delay >= self.max_elapsed {
                tracing::debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "retry elapsed budget exhausted"
                );
                return outcome;
            }

            tracing::debug!(
                attempt = attempts,
                delay_ms = delay.as_millis() as u64,
                status = outcome.status,
                "retrying request"
            );
            sleep(delay).await;
        }
    }

    /// Calculates the backoff delay before the next attempt.
    fn backoff_for(&self, attempt: u32) -> Duration {
        let base = self.initial_backoff.as_millis() as f64
            * self.multiplier.powi(attempt.saturating_sub(1) as i32);
        let capped = base.min(self.max_backoff.as_millis() as f64);

        let jitter_range = capped * self.jitter;
        let jitter_value = rand_jitter() * jitter_range * 2.0 - jitter_range;
        let delay = (capped + jitter_value).max(0.0);

        Duration::from_millis(delay as u64)
    }
}

/// Simple random jitter (0.0 to 1.0).
fn rand_jitter() -> f64 {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (nanos as f64) / (u32::MAX as f64)
}
