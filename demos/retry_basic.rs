//! Example: running unreliable operations through the retry executor
//!
//! This example demonstrates:
//! 1. A flaky operation that succeeds after a few transient failures
//! 2. A fatal error cutting the retry loop short
//! 3. Injecting a custom logging capability
//!
//! Run with:
//! ```bash
//! cargo run --example retry_basic
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use breaker::prelude::*;

/// A simulated API that fails the first few times
struct UnreliableApi {
    attempts: Arc<AtomicU32>,
    fail_count: u32,
}

impl UnreliableApi {
    fn new(fail_count: u32) -> Self {
        Self {
            attempts: Arc::new(AtomicU32::new(0)),
            fail_count,
        }
    }

    async fn call(&self) -> Result<String, BoxError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_count {
            Err(format!("transient error on attempt {}", attempt + 1).into())
        } else {
            Ok("API response data".to_string())
        }
    }

    fn total_attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

/// Logger that prints to stdout, standing in for a real logging stack.
struct StdoutLogger;

impl Logger for StdoutLogger {
    fn warn(&self, message: &str) {
        println!("  WARN  {message}");
    }

    fn error(&self, message: &str) {
        println!("  ERROR {message}");
    }
}

#[tokio::main]
async fn main() {
    let cancel = CancellationToken::new();
    let log: Arc<dyn Logger> = Arc::new(StdoutLogger);

    println!("1. Flaky operation, recovers on the third attempt:");
    let api = UnreliableApi::new(2);
    let breaker = Breaker::new(Some(Arc::clone(&log)), Duration::from_millis(100), 2.0, 5);
    let response = breaker.run(&cancel, || api.call()).await;
    println!(
        "  -> {:?} after {} attempts\n",
        response,
        api.total_attempts()
    );

    println!("2. Retry budget exhausted:");
    let api = UnreliableApi::new(u32::MAX);
    let breaker = Breaker::new(Some(Arc::clone(&log)), Duration::from_millis(50), 2.0, 2);
    let response = breaker.run(&cancel, || api.call()).await;
    let err = response.unwrap_err();
    println!(
        "  -> retries exhausted: {} (last cause: {})\n",
        is_retries_exhausted(err.as_ref()),
        find_cause::<RetriesExhausted>(err.as_ref())
            .unwrap()
            .last_error()
    );

    println!("3. Fatal error stops retrying immediately:");
    let breaker = Breaker::with_defaults(Some(Arc::clone(&log)));
    let response: Result<String, BoxError> = breaker
        .run(&cancel, || async {
            Err(Fatal::new("credentials rejected").into())
        })
        .await;
    let err = response.unwrap_err();
    println!("  -> fatal: {} ({err})", is_fatal(err.as_ref()));
}
