//! # Parallel — One Rayon Task per Length Under a Whole-Run Deadline
//!
//! Fans the search out across lengths: every length in `[min, max)` becomes
//! one task in a FIFO rayon scope, so shorter lengths are picked up first and
//! the remaining tasks queue behind them on the pool.
//!
//! ## Budget
//!
//! A single [`DeadlineTimer`] is armed for the configured budget and covers
//! the entire run. When it fires it sets the [`CancelToken`] and moves the
//! state to `Cancelled` with elapsed pinned to the budget. Tasks check the
//! token and the running flag before they start and at every enumerator
//! checkpoint; nothing is interrupted preemptively.
//!
//! ## Early Exit
//!
//! The task that finds the target claims the match, which takes the state out
//! of `Running`. Tasks on longer lengths notice at their next checkpoint and
//! return; whatever they compared before that is left out of the reported
//! totals. Tasks on shorter lengths run to completion, so the reported count
//! is the same one a length-by-length search arrives at.
//!
//! The scope join is the only blocking wait.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::cancel::{CancelToken, DeadlineTimer};
use crate::config::SearchConfig;
use crate::enumerator::CombinationEnumerator;
use crate::report::{RunMode, RunReport};
use crate::state::{RunStatus, SearchState};

pub struct ParallelRunner<'a> {
    config: &'a SearchConfig,
}

impl<'a> ParallelRunner<'a> {
    pub fn new(config: &'a SearchConfig) -> Self {
        ParallelRunner { config }
    }

    pub fn run(&self, target: &str) -> RunReport {
        let state = SearchState::new(self.config.max_length);
        self.run_with_state(target, &state)
    }

    /// Run against a caller-supplied fresh state (e.g. one with a reporter attached).
    pub fn run_with_state(&self, target: &str, state: &Arc<SearchState>) -> RunReport {
        let config = self.config;
        let token = CancelToken::new();
        let run_start = Instant::now();
        if !state.start() {
            warn!(status = ?state.status(), "parallel: search state already used, not starting");
            return RunReport::snapshot(RunMode::Parallel, state, config.budget);
        }
        let timer = DeadlineTimer::arm(config.budget, token.clone(), Arc::clone(state));

        rayon::scope_fifo(|scope| {
            for length in config.lengths() {
                let token = &token;
                let state: &SearchState = state;
                scope.spawn_fifo(move |_| {
                    if token.is_cancelled() || !state.should_continue(length) {
                        return;
                    }
                    debug!(length, "parallel: task started");
                    let found = CombinationEnumerator::new(&config.alphabet, target, state, token)
                        .search_length(length);
                    if found {
                        info!(length, "parallel: match found, stopping sibling tasks");
                    }
                });
            }
        });

        if timer.disarm() && state.status() == RunStatus::Cancelled {
            info!("Parallel tasks cancelled.");
        }
        debug!(
            counted = state.comparisons(),
            attempted = state.comparisons_attempted(),
            "parallel: all tasks joined"
        );
        state.exhaust();
        state.record_elapsed(run_start.elapsed());
        RunReport::snapshot(RunMode::Parallel, state, config.budget)
    }
}
