//! # Cancel — Budget Enforcement and Cooperative Cancellation
//!
//! The enumerator never interrupts itself; at each checkpoint it asks a
//! [`StopCheck`] whether the budget is spent. Two implementations cover the
//! two run modes:
//!
//! | Check | Mode | Budget scope | Fires via |
//! |-------|------|--------------|-----------|
//! | [`LengthTimer`] | sequential | one length | `Instant` comparison at the checkpoint |
//! | [`CancelToken`] | parallel | whole run | a single [`DeadlineTimer`] thread |
//!
//! Either way the state transition out of `Running` pins elapsed time to the
//! budget, so reports show the configured limit rather than the overshoot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

use crate::state::SearchState;

/// Consulted by the enumerator before every descent and every leaf.
pub trait StopCheck: Send + Sync {
    /// True once no further work may be done. Implementations that detect an
    /// expired budget move `state` out of `Running` themselves.
    fn should_stop(&self, state: &SearchState) -> bool;
}

/// Per-length budget used by the sequential runner.
pub struct LengthTimer {
    started: Instant,
    budget: Duration,
}

impl LengthTimer {
    pub fn start(budget: Duration) -> Self {
        LengthTimer {
            started: Instant::now(),
            budget,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl StopCheck for LengthTimer {
    #[inline]
    fn should_stop(&self, state: &SearchState) -> bool {
        if self.started.elapsed() >= self.budget {
            state.time_out(self.budget);
            return true;
        }
        false
    }
}

/// Shared stop flag for one parallel run.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl StopCheck for CancelToken {
    #[inline]
    fn should_stop(&self, _state: &SearchState) -> bool {
        self.is_cancelled()
    }
}

/// Single-shot timer that cancels a run once its budget elapses.
///
/// Fires at most once. Disarming (or dropping) before expiry wakes the timer
/// thread immediately and it exits without firing.
pub struct DeadlineTimer {
    disarm: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<bool>>,
}

impl DeadlineTimer {
    pub fn arm(budget: Duration, token: CancelToken, state: Arc<SearchState>) -> Self {
        let (tx, rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || match rx.recv_timeout(budget) {
            Err(RecvTimeoutError::Timeout) => {
                token.cancel();
                let cancelled = state.cancel(budget);
                if cancelled {
                    info!(budget = %crate::format_hms(budget), "deadline reached, cancelling parallel tasks");
                }
                cancelled
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => false,
        });
        DeadlineTimer {
            disarm: Some(tx),
            handle: Some(handle),
        }
    }

    /// Stop the timer and report whether it fired and cancelled the run. A
    /// deadline that fires after the run already ended reports false.
    pub fn disarm(mut self) -> bool {
        self.shutdown()
    }

    fn shutdown(&mut self) -> bool {
        if let Some(tx) = self.disarm.take() {
            let _ = tx.send(());
        }
        self.handle
            .take()
            .map(|h| h.join().unwrap_or(false))
            .unwrap_or(false)
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
