//! Exponential-backoff retry executor.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{BoxError, Canceled, RetriesExhausted, is_fatal};
use crate::log::Logger;

/// Plain-data retry settings, ready to sit in a larger configuration tree.
///
/// `Default` matches [`Breaker::with_defaults`]: one second of base
/// backoff, doubling on every retry, fifteen retries after the initial
/// attempt. With the `serde` feature enabled the struct derives
/// `Serialize`/`Deserialize`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Policy {
    /// Base wait before the first retry.
    pub backoff: Duration,
    /// Multiplier applied to the wait after each retry.
    pub factor: f64,
    /// Retries permitted after the initial attempt. Zero means the
    /// operation runs exactly once.
    pub max_tries: u32,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            backoff: Duration::from_secs(1),
            factor: 2.0,
            max_tries: 15,
        }
    }
}

/// Retry executor: re-invokes a fallible operation with geometrically
/// growing waits until success, a fatal error, an exhausted budget, or
/// cancellation.
///
/// A `Breaker` is immutable after construction and keeps no state between
/// runs: every [`run`](Breaker::run) call starts fresh backoff state, so
/// one instance may be shared (`&Breaker` or inside an `Arc`) by any
/// number of concurrent callers without locks.
///
/// No range validation is performed on the numeric settings. Degenerate
/// values are accepted and behave degenerately: a `factor` below `1.0`
/// shrinks the delay instead of growing it, and a computed delay that is
/// negative or not finite sleeps for zero time.
///
/// # Examples
///
/// ```rust
/// use breaker::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), BoxError> {
/// let breaker = Breaker::new(None, Duration::from_millis(100), 2.0, 3);
/// let cancel = CancellationToken::new();
///
/// let body = breaker
///     .run(&cancel, || async {
///         // e.g. an HTTP fetch that sometimes times out
///         Ok::<_, BoxError>("response body")
///     })
///     .await?;
/// assert_eq!(body, "response body");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Breaker {
    log: Option<Arc<dyn Logger>>,
    backoff: Duration,
    factor: f64,
    max_tries: u32,
    reset_threshold: Option<Duration>,
}

impl fmt::Debug for Breaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Breaker")
            .field("log", &self.log.as_ref().map(|_| "<logger>"))
            .field("backoff", &self.backoff)
            .field("factor", &self.factor)
            .field("max_tries", &self.max_tries)
            .field("reset_threshold", &self.reset_threshold)
            .finish()
    }
}

impl Breaker {
    /// Build an executor from explicit settings.
    ///
    /// `log` may be `None`, in which case the executor emits nothing.
    pub fn new(
        log: Option<Arc<dyn Logger>>,
        backoff: Duration,
        factor: f64,
        max_tries: u32,
    ) -> Self {
        Self {
            log,
            backoff,
            factor,
            max_tries,
            reset_threshold: None,
        }
    }

    /// Build an executor with the default policy: `backoff = 1s`,
    /// `factor = 2.0`, `max_tries = 15`.
    pub fn with_defaults(log: Option<Arc<dyn Logger>>) -> Self {
        Self::from_policy(log, Policy::default())
    }

    /// Build an executor from a [`Policy`].
    pub fn from_policy(log: Option<Arc<dyn Logger>>, policy: Policy) -> Self {
        Self::new(log, policy.backoff, policy.factor, policy.max_tries)
    }

    /// Treat any failed attempt that ran longer than `threshold` as
    /// evidence the system recovered: the delay and the try counter start
    /// over before the budget check.
    ///
    /// Off by default. Useful when a slow-but-eventually-failing call
    /// means the far side was up and working on the request, so backoff
    /// growth should not keep punishing it.
    pub fn with_reset_threshold(mut self, threshold: Duration) -> Self {
        self.reset_threshold = Some(threshold);
        self
    }

    /// Run `operation` until it succeeds, returns a fatal error, exhausts
    /// the retry budget, or `cancel` fires.
    ///
    /// The loop checks `cancel` before every attempt and races it against
    /// the inter-attempt sleep, so cancellation never has to wait out a
    /// backoff delay. A pending operation future is not interrupted;
    /// cancellation takes effect at the next loop boundary.
    ///
    /// # Errors
    ///
    /// - [`Canceled`] when the token fires before an attempt or during a
    ///   sleep.
    /// - The operation's own error, untouched, when its cause chain
    ///   carries [`Fatal`](crate::error::Fatal).
    /// - [`RetriesExhausted`] wrapping the last operation error once
    ///   `max_tries` retries have been consumed.
    pub async fn run<T, F, Fut>(&self, cancel: &CancellationToken, mut operation: F) -> Result<T, BoxError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, BoxError>>,
    {
        let mut delay = self.backoff.as_secs_f64();
        let mut try_count: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(Canceled.into());
            }

            let started = Instant::now();
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if is_fatal(err.as_ref()) {
                return Err(err);
            }

            if let Some(threshold) = self.reset_threshold
                && started.elapsed() > threshold
            {
                delay = self.backoff.as_secs_f64();
                try_count = 0;
            }

            if try_count >= self.max_tries {
                if let Some(log) = &self.log {
                    log.error(&format!(
                        "breaker: exhausted after max number of retries max_tries={}",
                        self.max_tries
                    ));
                }
                return Err(RetriesExhausted::new(self.max_tries, err).into());
            }

            // Negative or non-finite products of a degenerate factor
            // collapse to a zero-length sleep.
            let sleep_for = Duration::try_from_secs_f64(delay).unwrap_or(Duration::ZERO);
            if let Some(log) = &self.log {
                log.warn(&format!(
                    "breaker: operation failed, trying again backoff_delay={:?} try={} error={}",
                    sleep_for,
                    try_count + 1,
                    err
                ));
            }

            tokio::select! {
                _ = cancel.cancelled() => return Err(Canceled.into()),
                _ = tokio::time::sleep(sleep_for) => {}
            }

            delay *= self.factor;
            try_count += 1;
        }
    }
}
