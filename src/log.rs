//! Logging capability consumed by the retry executor.
//!
//! The executor never logs on its own; it calls whatever [`Logger`] it was
//! constructed with, and an absent logger silently disables all output.
//! Logging is advisory only; removing it changes no control flow.

/// Sink for the executor's advisory messages.
///
/// Implementations must tolerate concurrent calls: one logger instance may
/// be shared by many independent runs. Both methods are fire-and-forget.
pub trait Logger: Send + Sync {
    /// Record a warning (a failed attempt that will be retried).
    fn warn(&self, message: &str);

    /// Record an error (the retry budget was exhausted).
    fn error(&self, message: &str);
}

/// [`Logger`] that forwards to the [`tracing`] macros at matching levels.
///
/// # Examples
///
/// ```rust
/// use breaker::log::TracingLogger;
/// use breaker::retry::Breaker;
/// use std::sync::Arc;
///
/// let breaker = Breaker::with_defaults(Some(Arc::new(TracingLogger)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "breaker", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "breaker", "{message}");
    }
}

/// [`Logger`] that discards every message.
///
/// Passing `None` at construction already disables logging; this type is
/// for call sites that want an explicit placeholder value instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn warn(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn loggers_are_object_safe() {
        let loggers: Vec<Arc<dyn Logger>> = vec![Arc::new(TracingLogger), Arc::new(NopLogger)];
        for log in &loggers {
            log.warn("warn goes nowhere observable");
            log.error("error goes nowhere observable");
        }
    }
}
