//! Error sentinels and cause-chain classification.
//!
//! The executor communicates outcomes through concrete, identity-testable
//! error types rather than message text. An operation marks an error as
//! non-retryable by placing [`Fatal`] anywhere in its cause chain; callers
//! distinguish terminal outcomes after the fact with [`is_fatal`] and
//! [`is_retries_exhausted`], which walk the chain the same way.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error type accepted from operations and returned by the executor.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Sentinel marking an error as fatal: retrying must stop immediately.
///
/// Operations return this bare, wrap a cause with [`Fatal::new`], or embed
/// it deeper in their own error chain. The executor tests membership, it
/// never unwraps the error for the caller.
///
/// # Examples
///
/// ```rust
/// use breaker::error::{BoxError, Fatal, is_fatal};
///
/// let err: BoxError = Fatal::new(std::io::Error::other("bad handshake")).into();
/// assert!(is_fatal(err.as_ref()));
/// ```
#[derive(Debug, Default, Error)]
#[error("breaker: fatal error")]
pub struct Fatal {
    #[source]
    source: Option<BoxError>,
}

impl Fatal {
    /// Wrap `cause` as fatal. The cause stays reachable through
    /// [`std::error::Error::source`].
    pub fn new(cause: impl Into<BoxError>) -> Self {
        Self {
            source: Some(cause.into()),
        }
    }
}

/// Composite error returned once the retry budget is exhausted.
///
/// Carries the configured ceiling and the last error the operation
/// produced, so callers can both identify the outcome programmatically and
/// inspect the final real failure through the cause chain.
#[derive(Debug, Error)]
#[error("breaker: hit max retries ({max_tries})")]
pub struct RetriesExhausted {
    /// The configured retry ceiling that was hit.
    pub max_tries: u32,
    #[source]
    source: BoxError,
}

impl RetriesExhausted {
    pub(crate) fn new(max_tries: u32, last: BoxError) -> Self {
        Self {
            max_tries,
            source: last,
        }
    }

    /// The last error the operation returned before the budget ran out.
    pub fn last_error(&self) -> &(dyn StdError + 'static) {
        self.source.as_ref()
    }
}

/// Returned when the caller's cancellation token ends a run, either before
/// an attempt starts or during the inter-attempt sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("breaker: run canceled")]
pub struct Canceled;

/// Walk the cause chain of `err` and return the first link that is a `T`.
///
/// Links are visited outermost-first via [`std::error::Error::source`], so
/// a sentinel buried under any number of wrapping layers is still found.
///
/// # Examples
///
/// ```rust
/// use breaker::error::{Fatal, find_cause};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("sync aborted")]
/// struct SyncError(#[source] Fatal);
///
/// let err = SyncError(Fatal::new("disk gone"));
/// assert!(find_cause::<Fatal>(&err).is_some());
/// ```
pub fn find_cause<'a, T: StdError + 'static>(err: &'a (dyn StdError + 'static)) -> Option<&'a T> {
    let mut current: Option<&'a (dyn StdError + 'static)> = Some(err);
    while let Some(link) = current {
        if let Some(hit) = link.downcast_ref::<T>() {
            return Some(hit);
        }
        current = link.source();
    }
    None
}

/// Wrap-aware membership test: does `err` or any link in its cause chain
/// downcast to `T`?
pub fn has_cause<T: StdError + 'static>(err: &(dyn StdError + 'static)) -> bool {
    find_cause::<T>(err).is_some()
}

/// True when the error chain carries the [`Fatal`] sentinel.
pub fn is_fatal(err: &(dyn StdError + 'static)) -> bool {
    has_cause::<Fatal>(err)
}

/// True when the error chain carries [`RetriesExhausted`].
pub fn is_retries_exhausted(err: &(dyn StdError + 'static)) -> bool {
    has_cause::<RetriesExhausted>(err)
}
