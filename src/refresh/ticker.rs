//! Cancellable repeating timer.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::Duration;

/// Callback invoked on every tick.
pub type TickCallback = Arc<dyn Fn() + Send + Sync>;

/// A background thread that calls a callback every `interval`.
///
/// Once [`cancel`](Self::cancel) returns, no callback is running and none
/// will start. A callback that cancels its own ticker returns normally and
/// no further tick follows.
pub struct Ticker {
    interval: Duration,
    stop: Option<Sender<()>>,
    cancelled: Arc<AtomicBool>,
    ticks: Arc<AtomicU64>,
    // Held for the whole of each tick.
    gate: Arc<Mutex<()>>,
    thread: ThreadId,
}

impl Ticker {
    /// Start ticking. The first tick happens one interval from now.
    pub fn start(interval: Duration, callback: TickCallback) -> Self {
        let (stop, stop_rx) = mpsc::channel::<()>();
        let cancelled = Arc::new(AtomicBool::new(false));
        let ticks = Arc::new(AtomicU64::new(0));
        let gate = Arc::new(Mutex::new(()));

        let thread_cancelled = Arc::clone(&cancelled);
        let thread_ticks = Arc::clone(&ticks);
        let thread_gate = Arc::clone(&gate);
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    let _running = thread_gate.lock().unwrap_or_else(|e| e.into_inner());
                    if thread_cancelled.load(Ordering::SeqCst) {
                        break;
                    }
                    thread_ticks.fetch_add(1, Ordering::SeqCst);
                    callback();
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        tracing::debug!("Armed refresh timer every {:?}", interval);
        Self {
            interval,
            stop: Some(stop),
            cancelled,
            ticks,
            gate,
            thread: handle.thread().id(),
        }
    }

    /// Get the tick interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks fired so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Check whether the ticker has been stopped.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Stop ticking, waiting for a tick in progress to finish. Safe to call
    /// more than once.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(stop) = self.stop.take() {
            // The thread may already have exited; a failed send is fine.
            let _ = stop.send(());
            if thread::current().id() != self.thread {
                drop(self.gate.lock().unwrap_or_else(|e| e.into_inner()));
            }
            tracing::debug!("Cancelled refresh timer every {:?}", self.interval);
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("interval", &self.interval)
            .field("ticks", &self.ticks())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    fn counter() -> (Arc<AtomicUsize>, TickCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        let callback: TickCallback = Arc::new(move || {
            handle.fetch_add(1, Ordering::SeqCst);
        });
        (count, callback)
    }

    fn wait_for(deadline: Duration, condition: impl Fn() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        condition()
    }

    #[test]
    fn ticks_repeatedly() {
        let (count, callback) = counter();
        let ticker = Ticker::start(Duration::from_millis(10), callback);

        assert!(wait_for(Duration::from_secs(2), || count.load(Ordering::SeqCst) >= 3));
        assert!(ticker.ticks() >= 3);
    }

    #[test]
    fn cancel_stops_ticks() {
        let (count, callback) = counter();
        let mut ticker = Ticker::start(Duration::from_millis(10), callback);
        assert!(wait_for(Duration::from_secs(2), || count.load(Ordering::SeqCst) >= 1));

        ticker.cancel();
        assert!(ticker.is_cancelled());
        let settled = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(60));
        assert_eq!(count.load(Ordering::SeqCst), settled);

        ticker.cancel();
    }

    #[test]
    fn drop_stops_ticks() {
        let (count, callback) = counter();
        let ticker = Ticker::start(Duration::from_millis(10), callback);
        drop(ticker);

        thread::sleep(Duration::from_millis(60));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancel_waits_for_tick_in_progress() {
        let started = Arc::new(AtomicBool::new(false));
        let finished = Arc::new(AtomicBool::new(false));
        let (s, f) = (Arc::clone(&started), Arc::clone(&finished));
        let callback: TickCallback = Arc::new(move || {
            s.store(true, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(100));
            f.store(true, Ordering::SeqCst);
        });
        let mut ticker = Ticker::start(Duration::from_millis(5), callback);
        assert!(wait_for(Duration::from_secs(2), || started.load(Ordering::SeqCst)));

        ticker.cancel();
        assert!(finished.load(Ordering::SeqCst));
        let ticks = ticker.ticks();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(ticker.ticks(), ticks);
    }

    #[test]
    fn callback_can_cancel_its_own_ticker() {
        let slot: Arc<Mutex<Option<Ticker>>> = Arc::new(Mutex::new(None));
        let (count, counted) = counter();
        let handle = Arc::clone(&slot);
        let callback: TickCallback = Arc::new(move || {
            counted();
            if let Some(mut ticker) = handle.lock().unwrap().take() {
                ticker.cancel();
            }
        });
        {
            // Hold the slot until the ticker is stored so the first tick finds it.
            let mut stored = slot.lock().unwrap();
            *stored = Some(Ticker::start(Duration::from_millis(5), callback));
        }

        assert!(wait_for(Duration::from_secs(2), || count.load(Ordering::SeqCst) >= 1));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn first_tick_waits_one_interval() {
        let (count, callback) = counter();
        let _ticker = Ticker::start(Duration::from_secs(60), callback);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
