use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::view::poll;

/// Test: the poller ticks immediately, and a kick schedules one extra tick
/// after the resync delay instead of waiting out the interval.
#[tokio::test]
async fn kick_schedules_an_early_tick() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();

    let handle = poll::spawn(
        Duration::from_secs(3600),
        Duration::from_millis(20),
        move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        },
    );

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 1, "first tick is immediate");

    handle.kick();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 2);

    drop(handle);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 2, "dropping the handle stops the poller");
}
