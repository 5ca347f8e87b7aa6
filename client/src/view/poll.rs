//! Timer-driven polling.
//!
//! A poller ticks immediately, then on a fixed interval for as long as its
//! handle is alive. [`PollHandle::kick`] requests one extra tick after a
//! short delay; view-models use it after a successful mutation so the
//! optimistic local patch gets confirmed (or corrected) by a full refetch
//! without waiting out the whole interval.
//!
//! Dropping the handle aborts the task. A fetch already in flight when the
//! handle drops simply completes into the shared board, which is harmless;
//! there is no per-request cancellation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub struct PollHandle {
    task: JoinHandle<()>,
    kick: Arc<Notify>,
}

impl PollHandle {
    /// Schedules one extra tick after the resync delay.
    pub fn kick(&self) {
        self.kick.notify_one();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a poller driving `tick`.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use lostfound_client::{view::{claims::ClaimBoard, poll}, Context};
/// # fn demo(cx: Context, board: Arc<ClaimBoard>) {
/// let handle = poll::spawn(
///     cx.config().poll_interval(),
///     cx.config().resync_delay(),
///     move || {
///         let cx = cx.clone();
///         let board = board.clone();
///         async move {
///             let _ = board.refresh(&cx).await;
///         }
///     },
/// );
/// # drop(handle);
/// # }
/// ```
pub fn spawn<F, Fut>(interval: Duration, resync_delay: Duration, mut tick: F) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let kick = Arc::new(Notify::new());
    let kicked = kick.clone();
    let task = tokio::spawn(async move {
        loop {
            tick().await;
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = kicked.notified() => {
                    tokio::time::sleep(resync_delay).await;
                }
            }
        }
    });
    PollHandle { task, kick }
}
