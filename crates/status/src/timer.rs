//! Cancellable delayed reset callbacks
//!
//! Auto-reset runs through a single timer slot: scheduling a new callback
//! supersedes whichever one is currently pending, and cancelling the slot
//! guarantees no stale callback can fire later. Timer tasks check their
//! cancellation flag after the delay elapses, so a superseded or cancelled
//! timer wakes up once and exits without acting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

/// A timer handle that can be used to cancel a scheduled callback
#[derive(Debug, Clone)]
pub(crate) struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    /// Create a new timer handle
    fn new() -> Self {
        Self { cancelled: Arc::new(AtomicBool::new(false)) }
    }

    /// Cancel the timer
    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check if the timer has been cancelled
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Check whether two handles refer to the same scheduled timer
    fn same_timer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

/// Single-slot owner of the pending reset timer
///
/// At most one timer occupies the slot at a time. Arming a new timer cancels
/// the previous occupant, and a timer that fires clears itself out of the
/// slot so [`ResetSlot::is_armed`] stays truthful.
#[derive(Debug, Default)]
pub(crate) struct ResetSlot {
    pending: Mutex<Option<TimerHandle>>,
}

impl ResetSlot {
    /// Create an empty slot
    pub(crate) fn new() -> Self {
        Self { pending: Mutex::new(None) }
    }

    /// Cancel and release the pending timer, if any
    pub(crate) fn cancel(&self) {
        self.replace(None);
    }

    /// Check whether a timer is currently pending
    pub(crate) fn is_armed(&self) -> bool {
        let guard = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Reset slot lock poisoned during is_armed");
                poisoned.into_inner()
            }
        };
        guard.as_ref().is_some_and(|handle| !handle.is_cancelled())
    }

    /// Install a fresh handle, cancelling the previous occupant
    fn arm(&self) -> TimerHandle {
        let handle = TimerHandle::new();
        self.replace(Some(handle.clone()));
        handle
    }

    /// Clear the slot if `handle` still occupies it
    ///
    /// Called by the timer task as it fires; a handle superseded in the
    /// meantime leaves the newer occupant in place.
    fn disarm(&self, handle: &TimerHandle) {
        let mut guard = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Reset slot lock poisoned during disarm");
                poisoned.into_inner()
            }
        };
        if guard.as_ref().is_some_and(|current| current.same_timer(handle)) {
            *guard = None;
        }
    }

    /// Swap the slot contents, cancelling the previous occupant
    fn replace(&self, next: Option<TimerHandle>) {
        let previous = {
            let mut guard = match self.pending.lock() {
                Ok(guard) => guard,
                Err(poisoned) => {
                    warn!("Reset slot lock poisoned during replace");
                    poisoned.into_inner()
                }
            };
            std::mem::replace(&mut *guard, next)
        };

        if let Some(handle) = previous {
            handle.cancel();
        }
    }
}

/// Schedule `callback` on `slot` after `delay`, superseding any pending timer
pub(crate) fn schedule<F>(slot: &Arc<ResetSlot>, delay: Duration, callback: F) -> TimerHandle
where
    F: FnOnce() + Send + 'static,
{
    let handle = slot.arm();
    let task_handle = handle.clone();
    let task_slot = Arc::clone(slot);

    tokio::spawn(async move {
        sleep(delay).await;
        if !task_handle.is_cancelled() {
            task_slot.disarm(&task_handle);
            callback();
        }
    });

    handle
}

#[cfg(test)]
mod tests {
    //! Unit tests for the reset timer slot.
    use std::sync::atomic::AtomicU32;

    use super::*;

    /// Validates `TimerHandle::new` behavior for the handle cancel scenario.
    ///
    /// Assertions:
    /// - Ensures `!handle.is_cancelled()` evaluates to true.
    /// - Ensures `handle.is_cancelled()` evaluates to true.
    #[tokio::test]
    async fn test_timer_handle_cancel() {
        let handle = TimerHandle::new();
        assert!(!handle.is_cancelled());

        handle.cancel();
        assert!(handle.is_cancelled());
    }

    /// Validates `schedule` behavior for the callback fires scenario.
    ///
    /// Assertions:
    /// - Confirms `counter.load(Ordering::SeqCst)` equals `1`.
    /// - Ensures the slot disarms itself after firing.
    #[tokio::test]
    async fn test_schedule_fires_and_disarms() {
        let slot = Arc::new(ResetSlot::new());
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        schedule(&slot, Duration::from_millis(10), move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert!(slot.is_armed());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!slot.is_armed());
    }

    /// Validates `ResetSlot::cancel` behavior for the cancelled timer
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `counter.load(Ordering::SeqCst)` equals `0`.
    /// - Ensures `!slot.is_armed()` evaluates to true.
    #[tokio::test]
    async fn test_cancel_prevents_fire() {
        let slot = Arc::new(ResetSlot::new());
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        schedule(&slot, Duration::from_millis(30), move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        slot.cancel();
        tokio::time::sleep(Duration::from_millis(60)).await;

        // Should not have fired because it was cancelled
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(!slot.is_armed());
    }

    /// Validates `schedule` behavior for the superseded timer scenario.
    ///
    /// Assertions:
    /// - Confirms `first.load(Ordering::SeqCst)` equals `0`.
    /// - Confirms `second.load(Ordering::SeqCst)` equals `1`.
    #[tokio::test]
    async fn test_rearm_supersedes_previous_timer() {
        let slot = Arc::new(ResetSlot::new());
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));

        let first_clone = first.clone();
        let stale = schedule(&slot, Duration::from_millis(20), move || {
            first_clone.fetch_add(1, Ordering::SeqCst);
        });

        let second_clone = second.clone();
        schedule(&slot, Duration::from_millis(20), move || {
            second_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(stale.is_cancelled());
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert!(!slot.is_armed());
    }

    /// Validates `ResetSlot::cancel` behavior for the empty slot scenario.
    ///
    /// Assertions:
    /// - Ensures cancelling an empty slot leaves it disarmed.
    #[tokio::test]
    async fn test_cancel_empty_slot_is_noop() {
        let slot = Arc::new(ResetSlot::new());
        assert!(!slot.is_armed());

        slot.cancel();
        assert!(!slot.is_armed());
    }

    /// Validates `schedule` behavior for the fired handle scenario.
    ///
    /// Assertions:
    /// - Ensures a handle that fired normally is not marked cancelled.
    #[tokio::test]
    async fn test_fired_handle_is_not_cancelled() {
        let slot = Arc::new(ResetSlot::new());
        let handle = schedule(&slot, Duration::from_millis(10), || {});

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(!handle.is_cancelled());
        assert!(!slot.is_armed());
    }
}
