//! Asynchronous operation status tracking with delayed auto-reset.
//!
//! A [`StatusTracker`] wraps caller-supplied asynchronous operations and
//! publishes their lifecycle (idle, loading, success, error) as an
//! observable snapshot. Failures are captured into the tracker state instead
//! of propagating, which suits UI-style consumers that render outcomes
//! rather than handle them at the call site. Optional auto-reset reverts a
//! successful status to idle and clears captured errors after a configurable
//! delay, with at most one reset timer pending at a time.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use async_status::{Status, StatusTracker, TrackerConfig};
//!
//! async fn simulate_api_call() -> Result<String, std::io::Error> {
//!     tokio::time::sleep(Duration::from_millis(800)).await;
//!     Ok("payload".to_string())
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = TrackerConfig::builder()
//!         .reset_on_success(true)
//!         .reset_delay(Duration::from_millis(500))
//!         .build();
//!     let tracker = StatusTracker::with_config(config);
//!
//!     let value = tracker.execute(simulate_api_call).await;
//!     assert_eq!(value.as_deref(), Some("payload"));
//!     assert_eq!(tracker.status(), Status::Success);
//!
//!     // After the configured delay the status reverts to idle.
//!     tokio::time::sleep(Duration::from_millis(700)).await;
//!     assert_eq!(tracker.status(), Status::Idle);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod config;
pub mod error;
pub mod status;
mod timer;
pub mod tracker;

// Re-export commonly used types for convenience
// ------------------------------
pub use config::{duration_millis, TrackerConfig, TrackerConfigBuilder, DEFAULT_RESET_DELAY};
pub use error::OperationError;
pub use status::{ParseStatusError, Status};
pub use tracker::{StatusSnapshot, StatusTracker, TrackerMetrics};
