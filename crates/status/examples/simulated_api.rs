//! Example: Tracking a simulated API call
//!
//! Drives a `StatusTracker` through the success and failure paths of a
//! fake API call with both auto-reset options enabled, and prints the
//! observable state along the way.
//!
//! Run this example: ```bash cargo run --example simulated_api ```

use std::io;
use std::time::Duration;

use async_status::{StatusTracker, TrackerConfig};
use tokio::time::sleep;

/// Pretends to call a remote API: settles after a short delay, succeeding
/// for values above 0.5 and failing otherwise.
async fn simulate_api(value: f64) -> Result<&'static str, io::Error> {
    sleep(Duration::from_millis(300)).await;
    if value > 0.5 {
        Ok("API call succeeded!")
    } else {
        Err(io::Error::other("API call failed!"))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Status Tracker Example");
    println!("======================\n");

    let config = TrackerConfig::builder()
        .reset_on_success(true)
        .reset_on_error(true)
        .reset_delay(Duration::from_millis(1200))
        .build();
    let tracker = StatusTracker::with_config(config);

    // Example 1: A successful call settles, then reverts to idle
    println!("1. Successful call");

    let result = tracker.execute(|| simulate_api(0.9)).await;

    println!("  ✓ Returned: {:?}", result);
    println!("  Status: {}", tracker.status());

    sleep(Duration::from_millis(1500)).await;
    println!("  Status after the reset delay: {}\n", tracker.status());

    // Example 2: A failed call keeps its status; only the error is cleared
    println!("2. Failed call");

    let result = tracker.execute(|| simulate_api(0.1)).await;

    println!("  ✗ Returned: {:?}", result);
    if let Some(error) = tracker.error() {
        println!("  Error: {}", error);
    }
    println!("  Status: {}", tracker.status());

    sleep(Duration::from_millis(1500)).await;
    println!("  Status after the reset delay: {}", tracker.status());
    println!("  Error after the reset delay: {:?}\n", tracker.error());

    // Example 3: Watching every transition through a subscription
    println!("3. Watching transitions");

    let mut updates = tracker.subscribe();
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let status = updates.borrow().status;
            println!("  observed: {}", status);
            if status.is_idle() {
                break;
            }
        }
    });

    tracker.execute(|| simulate_api(0.8)).await;
    watcher.await?;
    println!();

    let metrics = tracker.metrics();
    println!("Executions:  {}", metrics.executions);
    println!("Successes:   {}", metrics.successes);
    println!("Failures:    {}", metrics.failures);
    println!("Auto-resets: {}", metrics.auto_resets);

    Ok(())
}
