//! Repeating refresh scheduler with pause and cancellation.
//!
//! The poller owns a background task that invokes an injected refresh
//! callback, first immediately and then once per interval. While paused,
//! ticks pass without invoking the callback at all. Shutdown cancels the
//! task; a refresh in flight at that moment is dropped, so its effect
//! never lands.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::debug;

/// Cloneable pause/resume control for a running [`Poller`]
#[derive(Clone)]
pub struct PollerHandle {
    paused: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl PollerHandle {
    /// Stop invoking the refresh callback until [`resume`](Self::resume).
    ///
    /// Also interrupts a refresh already in flight; its effect is
    /// discarded, matching a viewer pausing mid-fetch.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Resume polling; the next refresh fires immediately.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.notify.notify_one();
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn toggle(&self) -> bool {
        if self.is_paused() {
            self.resume();
            false
        } else {
            self.pause();
            true
        }
    }
}

/// A repeating, cancellable refresh task
pub struct Poller {
    handle: PollerHandle,
    stopped: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl Poller {
    /// Spawn the poll loop. The callback runs once right away and then on
    /// every interval tick while not paused.
    pub fn spawn<F, Fut>(interval: Duration, mut refresh: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let handle = PollerHandle {
            paused: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        };
        let stopped = Arc::new(AtomicBool::new(false));

        let task = tokio::spawn({
            let handle = handle.clone();
            let stopped = stopped.clone();
            async move {
                loop {
                    if stopped.load(Ordering::SeqCst) {
                        break;
                    }
                    if handle.is_paused() {
                        debug!("refresh skipped while paused");
                    } else {
                        // a pause or shutdown arriving mid-refresh drops
                        // the future here, discarding its effect
                        tokio::select! {
                            _ = refresh() => {}
                            _ = handle.notify.notified() => continue,
                        }
                    }
                    tokio::select! {
                        _ = tokio::time::sleep(interval) => {}
                        _ = handle.notify.notified() => {}
                    }
                }
                debug!("poll loop stopped");
            }
        });

        Self {
            handle,
            stopped,
            task,
        }
    }

    /// A cloneable pause/resume control
    pub fn handle(&self) -> PollerHandle {
        self.handle.clone()
    }

    pub fn pause(&self) {
        self.handle.pause();
    }

    pub fn resume(&self) {
        self.handle.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.handle.is_paused()
    }

    /// Stop future ticks and wait for the loop to wind down. Any refresh
    /// in flight is cancelled, not awaited.
    pub async fn shutdown(self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.handle.notify.notify_one();
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting_refresh(counter: Arc<AtomicUsize>) -> impl FnMut() -> std::future::Ready<()> {
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test]
    async fn test_poller_ticks_and_shuts_down() {
        let counter = Arc::new(AtomicUsize::new(0));
        let poller = Poller::spawn(
            Duration::from_millis(20),
            counting_refresh(counter.clone()),
        );

        tokio::time::sleep(Duration::from_millis(110)).await;
        let seen = counter.load(Ordering::SeqCst);
        assert!(seen >= 3, "expected several ticks, saw {seen}");

        poller.shutdown().await;
        let after_shutdown = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(counter.load(Ordering::SeqCst), after_shutdown);
    }

    #[tokio::test]
    async fn test_pause_skips_ticks_and_resume_fires_immediately() {
        let counter = Arc::new(AtomicUsize::new(0));
        let poller = Poller::spawn(
            Duration::from_millis(20),
            counting_refresh(counter.clone()),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        poller.pause();
        assert!(poller.is_paused());
        tokio::time::sleep(Duration::from_millis(30)).await;
        let while_paused = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), while_paused);

        poller.resume();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(counter.load(Ordering::SeqCst) > while_paused);

        poller.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_discards_in_flight_refresh() {
        let counter = Arc::new(AtomicUsize::new(0));
        let poller = Poller::spawn(Duration::from_millis(20), {
            let counter = counter.clone();
            move || {
                let counter = counter.clone();
                async move {
                    // a slow fetch: the increment only lands if the
                    // refresh is allowed to finish
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            }
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        poller.shutdown().await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_toggle_flips_pause_state() {
        let poller = Poller::spawn(Duration::from_millis(50), || async {});
        let handle = poller.handle();

        assert!(!handle.is_paused());
        assert!(handle.toggle());
        assert!(handle.is_paused());
        assert!(!handle.toggle());
        assert!(!handle.is_paused());

        poller.shutdown().await;
    }
}
