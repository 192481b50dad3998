//! The retry executor and its configuration.
//!
//! # Key Types
//!
//! - [`Breaker`] - exponential-backoff retry executor
//! - [`Policy`] - plain-data retry settings
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
//!     .run(&cancel, || async { Ok::<_, BoxError>("fetched") })
//!     .await?;
//! assert_eq!(value, "fetched");
//! # Ok(())
//! # }
//! ```

mod breaker;

pub use breaker::{Breaker, Policy};
