#![forbid(unsafe_code)]

//! Autoplay ticker.
//!
//! A [`Ticker`] runs on its own thread and sends one message per interval
//! until its [`StopSignal`] fires or the receiving side hangs up. The signal
//! doubles as the cancellation token: the run loop sleeps on it, so stopping
//! wakes the thread immediately instead of waiting out the interval.
//!
//! The channel holds at most one unread message. A tick that finds the slot
//! occupied is dropped, so a late reader never sees a backlog.

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Cancellation token observed by a running ticker.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a connected (signal, trigger) pair.
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until stopped or until `duration` elapses.
    ///
    /// Returns `true` if stopped. Spurious wakeups are absorbed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            return true;
        }

        let start = Instant::now();
        let mut remaining = duration;
        loop {
            let (guard, result) = cvar
                .wait_timeout(stopped, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
            if *stopped {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

/// Controller-side handle that fires a [`StopSignal`].
pub(crate) struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}

/// Sends a message at a fixed interval.
pub struct Ticker<M: Send + 'static> {
    interval: Duration,
    make_msg: Box<dyn Fn() -> M + Send + Sync>,
}

impl<M: Send + 'static> Ticker<M> {
    pub fn new(interval: Duration, make_msg: impl Fn() -> M + Send + Sync + 'static) -> Self {
        Self {
            interval,
            make_msg: Box::new(make_msg),
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run loop. Returns the number of messages delivered to the channel.
    pub fn run(&self, sender: &mpsc::SyncSender<M>, stop: &StopSignal) -> u64 {
        let mut sent: u64 = 0;
        crate::debug_trace!("ticker started: interval={:?}", self.interval);
        loop {
            if stop.wait_timeout(self.interval) {
                crate::debug_trace!("ticker stopped after {} ticks", sent);
                break;
            }
            match sender.try_send((self.make_msg)()) {
                Ok(()) => sent += 1,
                Err(mpsc::TrySendError::Full(_)) => {}
                Err(mpsc::TrySendError::Disconnected(_)) => {
                    crate::debug_trace!("ticker channel closed after {} ticks", sent);
                    break;
                }
            }
        }
        sent
    }

    /// Start the run loop on a background thread.
    pub(crate) fn spawn(self, sender: mpsc::SyncSender<M>) -> RunningTicker {
        let (signal, trigger) = StopSignal::new();
        let interval = self.interval;
        tracing::trace!(interval_ms = interval.as_millis() as u64, "ticker spawn");
        let thread = thread::spawn(move || {
            let sent = self.run(&sender, &signal);
            tracing::trace!(sent, "ticker exit");
        });
        RunningTicker {
            interval,
            trigger,
            thread: Some(thread),
        }
    }
}

/// Handle to a ticker thread.
pub(crate) struct RunningTicker {
    interval: Duration,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl RunningTicker {
    #[inline]
    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop the ticker and join its thread.
    pub(crate) fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RunningTicker {
    fn drop(&mut self) {
        // No join here; dropping must not block.
        self.trigger.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum TestMsg {
        Tick,
    }

    #[test]
    fn stop_signal_starts_clear() {
        let (signal, _trigger) = StopSignal::new();
        assert!(!signal.is_stopped());
    }

    #[test]
    fn trigger_sets_signal() {
        let (signal, trigger) = StopSignal::new();
        trigger.stop();
        assert!(signal.is_stopped());
        assert!(signal.wait_timeout(Duration::from_millis(100)));
    }

    #[test]
    fn wait_times_out_when_not_stopped() {
        let (signal, _trigger) = StopSignal::new();
        assert!(!signal.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn trigger_wakes_waiting_thread() {
        let (signal, trigger) = StopSignal::new();
        let waiter = thread::spawn(move || {
            let start = Instant::now();
            let stopped = signal.wait_timeout(Duration::from_secs(10));
            (stopped, start.elapsed())
        });
        thread::sleep(Duration::from_millis(20));
        trigger.stop();
        let (stopped, elapsed) = waiter.join().unwrap();
        assert!(stopped);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn ticker_sends_until_stopped() {
        let (tx, rx) = mpsc::sync_channel(1);
        let running = Ticker::new(Duration::from_millis(5), || TestMsg::Tick).spawn(tx);
        assert_eq!(running.interval(), Duration::from_millis(5));

        let first = rx.recv_timeout(Duration::from_secs(2));
        assert_eq!(first, Ok(TestMsg::Tick));
        running.stop();

        // Whatever was queued before the join is all there will ever be.
        let queued = rx.try_iter().count();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(rx.try_iter().count(), 0, "ticks after stop ({queued} queued)");
    }

    #[test]
    fn unread_ticks_do_not_pile_up() {
        let (tx, rx) = mpsc::sync_channel(1);
        let running = Ticker::new(Duration::from_millis(1), || TestMsg::Tick).spawn(tx);
        thread::sleep(Duration::from_millis(50));
        running.stop();
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn ticker_exits_when_receiver_dropped() {
        let (tx, rx) = mpsc::sync_channel(1);
        drop(rx);
        let (signal, _trigger) = StopSignal::new();
        let ticker = Ticker::new(Duration::from_millis(1), || TestMsg::Tick);
        assert_eq!(ticker.run(&tx, &signal), 0);
    }

    #[test]
    fn pre_stopped_ticker_sends_nothing() {
        let (tx, rx) = mpsc::sync_channel(1);
        let (signal, trigger) = StopSignal::new();
        trigger.stop();
        let ticker = Ticker::new(Duration::from_millis(1), || TestMsg::Tick);
        assert_eq!(ticker.run(&tx, &signal), 0);
        assert!(rx.try_recv().is_err());
    }
}
