#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Retry executor with exponential backoff.
//!
//! This crate wraps unreliable operations (network calls, I/O) in a bounded,
//! observable retry loop. On each failure the executor classifies the error
//! (transient vs. fatal), decides whether to continue, waits with a
//! geometrically growing delay, and tries again until success, a fatal
//! error, an exhausted retry budget, or cancellation.
//!
//! # Key Types
//!
//! - [`Breaker`](retry::Breaker) - the retry executor
//! - [`Policy`](retry::Policy) - plain-data retry settings
//! - [`Fatal`](error::Fatal) / [`RetriesExhausted`](error::RetriesExhausted) -
//!   identity-testable error sentinels
//! - [`Logger`](log::Logger) - injected logging capability
//!
//! # Examples
//!
//! ```rust
//! use breaker::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), BoxError> {
//! let breaker = Breaker::new(None, Duration::from_millis(100), 2.0, 3);
//! let cancel = CancellationToken::new();
//!
//! let value = breaker
//!     .run(&cancel, || async { Ok::<_, BoxError>(42) })
//!     .await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```
//!
//! An operation opts out of retrying by returning an error whose cause chain
//! carries the [`Fatal`](error::Fatal) sentinel:
//!
//! ```rust
//! use breaker::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let breaker = Breaker::with_defaults(None);
//! let cancel = CancellationToken::new();
//!
//! let result = breaker
//!     .run(&cancel, || async {
//!         Err::<(), BoxError>(Fatal::new("credentials rejected").into())
//!     })
//!     .await;
//!
//! assert!(is_fatal(result.unwrap_err().as_ref()));
//! # }
//! ```

pub mod error;
pub mod log;
pub mod retry;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::BoxError;
use crate::log::Logger;
use crate::retry::Breaker;

/// Convenient re-exports of commonly used items.
///
/// Import everything with:
///
/// ```rust
/// use breaker::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{
        BoxError, Canceled, Fatal, RetriesExhausted, find_cause, has_cause, is_fatal,
        is_retries_exhausted,
    };
    pub use crate::log::{Logger, NopLogger, TracingLogger};
    pub use crate::retry::{Breaker, Policy};
    pub use tokio_util::sync::CancellationToken;
}

/// Construct an explicit [`Breaker`] and run `operation` through it once.
///
/// Equivalent to `Breaker::new(log, backoff, factor, max_tries).run(cancel, operation)`,
/// for callers that have no executor to hold on to.
///
/// # Examples
///
/// ```rust
/// use breaker::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), BoxError> {
/// let cancel = CancellationToken::new();
/// let value = breaker::run(
///     &cancel,
///     || async { Ok::<_, BoxError>("ready") },
///     None,
///     Duration::from_millis(250),
///     2.0,
///     5,
/// )
/// .await?;
/// assert_eq!(value, "ready");
/// # Ok(())
/// # }
/// ```
pub async fn run<T, F, Fut>(
    cancel: &CancellationToken,
    operation: F,
    log: Option<Arc<dyn Logger>>,
    backoff: Duration,
    factor: f64,
    max_tries: u32,
) -> Result<T, BoxError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BoxError>>,
{
    Breaker::new(log, backoff, factor, max_tries)
        .run(cancel, operation)
        .await
}
