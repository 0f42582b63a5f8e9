//! Asynchronous operation status tracking
//!
//! [`StatusTracker`] sequences the status/error state around execution of a
//! caller-supplied asynchronous operation and optionally reverts that state
//! toward idle after a delay. State is published through a watch channel, so
//! readers can either poll a snapshot or subscribe to updates.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::config::TrackerConfig;
use crate::error::OperationError;
use crate::status::Status;
use crate::timer::{self, ResetSlot};

//==============================================================================
// Observable State
//==============================================================================

/// Atomically published view of a tracker's observable state
///
/// Status and captured error always land in the same update, so a subscriber
/// never sees the error status without its cause.
#[derive(Debug, Clone, Default)]
pub struct StatusSnapshot {
    /// Current lifecycle status
    pub status: Status,
    /// Captured failure of the most recent operation, if any
    pub error: Option<OperationError>,
}

/// Point-in-time counters describing tracker activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackerMetrics {
    /// Total number of `execute` calls started
    pub executions: u64,
    /// Executions whose operation resolved successfully
    pub successes: u64,
    /// Executions whose operation failed
    pub failures: u64,
    /// Auto-reset callbacks that fired and changed state
    pub auto_resets: u64,
}

//==============================================================================
// Status Tracker
//==============================================================================

/// Tracks the lifecycle of asynchronous operations with optional auto-reset
///
/// The tracker is owned by a single scope (typically one UI component) and is
/// deliberately not `Clone`; observers hold cheap [`watch::Receiver`]s from
/// [`StatusTracker::subscribe`] instead. Dropping the tracker cancels any
/// pending auto-reset, so a timer can never mutate state after its owner is
/// gone.
pub struct StatusTracker {
    config: TrackerConfig,
    state: Arc<watch::Sender<StatusSnapshot>>,
    reset_slot: Arc<ResetSlot>,
    executions: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
    auto_resets: Arc<AtomicU64>,
}

impl fmt::Debug for StatusTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("StatusTracker")
            .field("config", &self.config)
            .field("status", &snapshot.status)
            .field("error", &snapshot.error)
            .field("pending_reset", &self.has_pending_reset())
            .finish()
    }
}

impl StatusTracker {
    /// Create a tracker with default configuration (auto-reset disabled)
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    /// Create a tracker with the given configuration
    pub fn with_config(config: TrackerConfig) -> Self {
        let (state, _) = watch::channel(StatusSnapshot::default());
        Self {
            config,
            state: Arc::new(state),
            reset_slot: Arc::new(ResetSlot::new()),
            executions: AtomicU64::new(0),
            successes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            auto_resets: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a configuration builder for use with `with_config`
    pub fn builder() -> crate::config::TrackerConfigBuilder {
        TrackerConfig::builder()
    }

    /// Get the tracker's configuration
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Get the current status
    pub fn status(&self) -> Status {
        self.state.borrow().status
    }

    /// Get the captured error of the most recent failed operation, if any
    pub fn error(&self) -> Option<OperationError> {
        self.state.borrow().error.clone()
    }

    /// Get a consistent snapshot of status and captured error
    pub fn snapshot(&self) -> StatusSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribe to state updates
    ///
    /// The receiver observes every published snapshot, starting from the
    /// current one. Updates that change nothing publish no notification.
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.state.subscribe()
    }

    /// Check whether an auto-reset timer is currently pending
    pub fn has_pending_reset(&self) -> bool {
        self.reset_slot.is_armed()
    }

    /// Get current activity counters
    pub fn metrics(&self) -> TrackerMetrics {
        TrackerMetrics {
            executions: self.executions.load(Ordering::Acquire),
            successes: self.successes.load(Ordering::Acquire),
            failures: self.failures.load(Ordering::Acquire),
            auto_resets: self.auto_resets.load(Ordering::Acquire),
        }
    }

    /// Execute an asynchronous operation, tracking its lifecycle
    ///
    /// As soon as the returned future is first polled, any pending auto-reset
    /// timer is cancelled and the status moves to loading (clearing a
    /// previously captured error). The operation is then awaited in place. A
    /// successful outcome publishes the success status and yields the result;
    /// a failure captures the error into the tracker state and yields `None`
    /// instead of propagating. Callers that need to react to the failure
    /// programmatically read [`StatusTracker::error`] or wrap the operation
    /// before handing it over.
    ///
    /// Overlapping calls are not queued or serialized: a second call moves
    /// the status back to loading while the first operation is still in
    /// flight, and whichever operation settles last determines the final
    /// state.
    ///
    /// # Examples
    ///
    /// ```
    /// use async_status::{Status, StatusTracker};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let tracker = StatusTracker::new();
    ///
    /// let value = tracker.execute(|| async { Ok::<_, std::io::Error>(42) }).await;
    /// assert_eq!(value, Some(42));
    /// assert_eq!(tracker.status(), Status::Success);
    /// # }
    /// ```
    #[instrument(skip(self, operation), fields(status = %self.status()))]
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.reset_slot.cancel();
        self.executions.fetch_add(1, Ordering::Relaxed);

        self.state.send_modify(|snapshot| {
            snapshot.status = Status::Loading;
            snapshot.error = None;
        });
        debug!("Status tracker: operation started");

        let outcome = match operation().await {
            Ok(result) => {
                self.successes.fetch_add(1, Ordering::Relaxed);
                self.state.send_modify(|snapshot| {
                    snapshot.status = Status::Success;
                    // An overlapping call that failed in the meantime may have
                    // left a stale capture behind; success clears it.
                    snapshot.error = None;
                });
                debug!("Status tracker: operation succeeded");
                Some(result)
            }
            Err(error) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!("Status tracker: operation failed - {}", error);
                self.state.send_modify(|snapshot| {
                    snapshot.error = Some(OperationError::new(error));
                    snapshot.status = Status::Error;
                });
                None
            }
        };

        self.schedule_auto_reset();
        outcome
    }

    /// Revert to idle immediately
    ///
    /// Clears any captured error and cancels any pending auto-reset timer.
    pub fn reset(&self) {
        self.reset_slot.cancel();
        self.state.send_if_modified(|snapshot| {
            let modified = snapshot.status != Status::Idle || snapshot.error.is_some();
            snapshot.status = Status::Idle;
            snapshot.error = None;
            modified
        });
        info!("Status tracker manually reset to idle");
    }

    /// Arm the configured auto-reset branches at the end of an execution
    ///
    /// Arming order matches the option order; the slot keeps only the last
    /// arm, and the success callback also clears a lingering error.
    fn schedule_auto_reset(&self) {
        if !self.config.auto_reset_enabled() {
            return;
        }
        let delay = self.config.reset_delay_or_default();

        if self.config.reset_on_error {
            let state = Arc::clone(&self.state);
            let auto_resets = Arc::clone(&self.auto_resets);
            timer::schedule(&self.reset_slot, delay, move || {
                let cleared = state.send_if_modified(|snapshot| {
                    if snapshot.error.is_some() {
                        snapshot.error = None;
                        true
                    } else {
                        false
                    }
                });
                if cleared {
                    auto_resets.fetch_add(1, Ordering::Relaxed);
                    debug!("Status tracker: auto-reset cleared captured error");
                }
            });
            debug!(delay = ?delay, "Status tracker: armed error auto-reset");
        }

        if self.config.reset_on_success {
            let state = Arc::clone(&self.state);
            let auto_resets = Arc::clone(&self.auto_resets);
            timer::schedule(&self.reset_slot, delay, move || {
                let reverted = state.send_if_modified(|snapshot| {
                    let mut modified = false;
                    // A later transition wins; only a still-successful status
                    // reverts to idle.
                    if snapshot.status == Status::Success {
                        snapshot.status = Status::Idle;
                        modified = true;
                    }
                    if snapshot.error.is_some() {
                        snapshot.error = None;
                        modified = true;
                    }
                    modified
                });
                if reverted {
                    auto_resets.fetch_add(1, Ordering::Relaxed);
                    debug!("Status tracker: auto-reset reverted to idle");
                }
            });
            debug!(delay = ?delay, "Status tracker: armed success auto-reset");
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StatusTracker {
    fn drop(&mut self) {
        self.reset_slot.cancel();
    }
}
