//! # State — Shared Search Status and Comparison Counters
//!
//! One `SearchState` exists per run and is shared by every unit of work in it,
//! whether that is the single sequential loop or one rayon task per length.
//! Everything mutable is behind an atomic or a once-written cell:
//!
//! - **Status** is a single `AtomicU8`. Every terminal transition is a
//!   compare-and-set out of `Running`, so the first writer wins and a run can
//!   never return to `Running`. `running` and `matchFound` are views of it.
//! - **Comparisons** are `AtomicU64` counters bumped with `fetch_add`, one
//!   per leaf candidate, plus a per-length breakdown. Once a match is
//!   claimed at length `L`, the reported totals cover lengths `..=L` only:
//!   work done on longer lengths before they observed the match is attempted
//!   but not counted.
//! - **Cracked value** is a `OnceLock<String>` written only by the task that
//!   won the `Running → MatchFound` claim.
//! - **Elapsed** is a `Mutex<Option<Duration>>` written at most once. Timeout
//!   and cancellation pin it to the budget before the runner can record the
//!   measured time.
//!
//! ## Background Reporter
//!
//! `start_reporter` spawns a thread that logs progress through `tracing`
//! every interval until the returned [`Reporter`] is stopped. The wait is a
//! channel `recv_timeout`, so stopping does not block for a whole interval.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Lifecycle of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Idle,
    Running,
    MatchFound,
    /// Budget spent during a sequential per-length timer.
    TimedOut,
    /// Whole-run deadline fired during a parallel run.
    Cancelled,
    /// Every length searched without a match or a timeout.
    Exhausted,
}

impl RunStatus {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => RunStatus::Idle,
            1 => RunStatus::Running,
            2 => RunStatus::MatchFound,
            3 => RunStatus::TimedOut,
            4 => RunStatus::Cancelled,
            _ => RunStatus::Exhausted,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            RunStatus::Idle => 0,
            RunStatus::Running => 1,
            RunStatus::MatchFound => 2,
            RunStatus::TimedOut => 3,
            RunStatus::Cancelled => 4,
            RunStatus::Exhausted => 5,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, RunStatus::Idle | RunStatus::Running)
    }
}

const NO_MATCH: usize = usize::MAX;

pub struct SearchState {
    status: AtomicU8,
    cracked: OnceLock<String>,
    matched_length: AtomicUsize,
    comparisons: AtomicU64,
    per_length: Vec<AtomicU64>,
    elapsed: Mutex<Option<Duration>>,
    created: Instant,
}

impl SearchState {
    /// Fresh `Idle` state with a per-length breakdown for lengths `0..max_length`.
    pub fn new(max_length: usize) -> Arc<Self> {
        Arc::new(SearchState {
            status: AtomicU8::new(RunStatus::Idle.as_u8()),
            cracked: OnceLock::new(),
            matched_length: AtomicUsize::new(NO_MATCH),
            comparisons: AtomicU64::new(0),
            per_length: (0..max_length).map(|_| AtomicU64::new(0)).collect(),
            elapsed: Mutex::new(None),
            created: Instant::now(),
        })
    }

    pub fn status(&self) -> RunStatus {
        RunStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    pub fn is_running(&self) -> bool {
        self.status() == RunStatus::Running
    }

    pub fn match_found(&self) -> bool {
        self.status() == RunStatus::MatchFound
    }

    /// Whether work on `length` should go on. Everything stops once the run
    /// leaves `Running`, except lengths shorter than a claimed match: those
    /// are finished so the totals match a length-by-length search.
    pub fn should_continue(&self, length: usize) -> bool {
        match self.status() {
            RunStatus::Running => true,
            RunStatus::MatchFound => length < self.matched_length.load(Ordering::Acquire),
            _ => false,
        }
    }

    /// Length of the claimed match, if any.
    pub fn matched_length(&self) -> Option<usize> {
        match self.matched_length.load(Ordering::Acquire) {
            NO_MATCH => None,
            len => Some(len),
        }
    }

    /// `Idle → Running`. Returns false if the state was already used.
    pub fn start(&self) -> bool {
        self.transition(RunStatus::Idle, RunStatus::Running)
    }

    fn transition(&self, from: RunStatus, to: RunStatus) -> bool {
        self.status
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Count one fully-built candidate of `length` symbols.
    #[inline]
    pub fn count_comparison(&self, length: usize) {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
        if let Some(slot) = self.per_length.get(length) {
            slot.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Claim the match for `candidate`. Exactly one caller per run can win;
    /// losers (and callers after a timeout) get false and change nothing.
    pub fn claim_match(&self, candidate: &str) -> bool {
        if !self.transition(RunStatus::Running, RunStatus::MatchFound) {
            return false;
        }
        self.matched_length
            .store(candidate.chars().count(), Ordering::Release);
        let _ = self.cracked.set(candidate.to_string());
        true
    }

    /// `Running → TimedOut`, pinning elapsed to `budget`.
    pub fn time_out(&self, budget: Duration) -> bool {
        self.stop_with(RunStatus::TimedOut, budget)
    }

    /// `Running → Cancelled`, pinning elapsed to `budget`.
    pub fn cancel(&self, budget: Duration) -> bool {
        self.stop_with(RunStatus::Cancelled, budget)
    }

    fn stop_with(&self, status: RunStatus, budget: Duration) -> bool {
        if !self.transition(RunStatus::Running, status) {
            return false;
        }
        self.record_elapsed(budget);
        true
    }

    /// `Running → Exhausted`; no-op if the run already ended another way.
    pub fn exhaust(&self) -> bool {
        self.transition(RunStatus::Running, RunStatus::Exhausted)
    }

    /// Record elapsed time unless it was already recorded (or pinned).
    pub fn record_elapsed(&self, elapsed: Duration) {
        let mut slot = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_none() {
            *slot = Some(elapsed);
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn cracked(&self) -> Option<&str> {
        self.cracked.get().map(String::as_str)
    }

    /// Comparisons counted for the run: every length while searching, and
    /// only lengths up to the match once one is claimed.
    pub fn comparisons(&self) -> u64 {
        match self.counted_lengths() {
            Some(counted) => counted.iter().map(|c| c.load(Ordering::Relaxed)).sum(),
            None => self.comparisons_attempted(),
        }
    }

    /// Every comparison made, including those on lengths past the match.
    pub fn comparisons_attempted(&self) -> u64 {
        self.comparisons.load(Ordering::Relaxed)
    }

    /// Per-length slots up to and including the matched length, when a match
    /// was claimed on a length the breakdown covers.
    fn counted_lengths(&self) -> Option<&[AtomicU64]> {
        if self.status() != RunStatus::MatchFound {
            return None;
        }
        let len = self.matched_length()?;
        self.per_length.get(..=len)
    }

    pub fn comparisons_for_length(&self, length: usize) -> u64 {
        self.per_length
            .get(length)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    /// Non-zero counted per-length counts, keyed by length.
    pub fn comparisons_by_length(&self) -> BTreeMap<usize, u64> {
        self.counted_lengths()
            .unwrap_or(&self.per_length[..])
            .iter()
            .enumerate()
            .map(|(len, c)| (len, c.load(Ordering::Relaxed)))
            .filter(|&(_, n)| n > 0)
            .collect()
    }

    pub fn log_status(&self) {
        let elapsed = self.created.elapsed();
        let comparisons = self.comparisons();
        let rate = if elapsed.as_secs() > 0 {
            comparisons as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        info!(
            status = ?self.status(),
            comparisons,
            rate = format_args!("{:.0}", rate),
            elapsed = %crate::format_hms(elapsed),
            "search progress"
        );
    }

    /// Log progress every `interval` until the returned reporter is stopped.
    pub fn start_reporter(self: &Arc<Self>, interval: Duration) -> Reporter {
        let state = Arc::clone(self);
        let (tx, rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => state.log_status(),
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        Reporter {
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }
}

/// Handle to a running progress reporter thread. Stops on drop.
pub struct Reporter {
    shutdown: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Reporter {
    pub fn stop(mut self) {
        self.shutdown_and_join();
    }

    fn shutdown_and_join(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Reporter {
    fn drop(&mut self) {
        self.shutdown_and_join();
    }
}
