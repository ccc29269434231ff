//! Background interval timer.
//!
//! Spawns a thread that emits tick sequence numbers at a fixed period over a
//! bounded channel. The thread never touches scan state: the owner drains
//! ticks on its own thread, so there is exactly one mutator.
//!
//! Each `Ticker` owns exactly one thread, which is signalled and joined when
//! the `Ticker` is dropped. Dropping is how a timer is cancelled; the thread
//! waits on a stop channel rather than sleeping, so cancellation does not
//! have to sit out the rest of a period.
use crossbeam_channel as xch;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Ticks buffered before new ones are coalesced away.
const TICK_BACKLOG: usize = 64;

pub struct Ticker {
    rx: xch::Receiver<u64>,
    emitted: Arc<AtomicU64>,
    period: Duration,
    /// Dropping the sender wakes the thread immediately.
    stop_tx: Option<xch::Sender<()>>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(period: Duration) -> Self {
        let (tx, rx) = xch::bounded(TICK_BACKLOG);
        let (stop_tx, stop_rx) = xch::bounded::<()>(1);
        let emitted = Arc::new(AtomicU64::new(0));
        let emitted_clone = emitted.clone();
        // A zero period would spin; clamp to 1ms.
        let period = period.max(Duration::from_millis(1));

        let join_handle = std::thread::spawn(move || {
            let mut seq: u64 = 0;
            loop {
                match stop_rx.recv_timeout(period) {
                    Err(xch::RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(xch::RecvTimeoutError::Disconnected) => {
                        tracing::trace!("ticker received shutdown signal");
                        break;
                    }
                }
                seq = seq.wrapping_add(1);
                match tx.try_send(seq) {
                    Ok(()) => {
                        emitted_clone.store(seq, Ordering::Relaxed);
                    }
                    Err(xch::TrySendError::Full(_)) => {
                        // Consumer is behind; this tick coalesces into the backlog.
                    }
                    Err(xch::TrySendError::Disconnected(_)) => {
                        tracing::debug!("ticker consumer disconnected, exiting thread");
                        break;
                    }
                }
            }
            tracing::trace!("ticker thread exiting cleanly");
        });

        Self {
            rx,
            emitted,
            period,
            stop_tx: Some(stop_tx),
            join_handle: Some(join_handle),
        }
    }

    /// Drain pending ticks without blocking; returns how many fired.
    pub fn drain(&self) -> usize {
        self.rx.try_iter().count()
    }

    /// Block until the next tick or `timeout`. Returns the tick sequence number.
    pub fn wait(&self, timeout: Duration) -> Option<u64> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Sequence number of the last tick delivered to the channel.
    pub fn last_emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        drop(self.stop_tx.take());

        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("ticker thread joined");
                }
                Err(e) => {
                    tracing::warn!(?e, "ticker thread panicked during shutdown");
                }
            }
        }
    }
}
