//! # Sequential — Single-Threaded Length-by-Length Search
//!
//! Tries every length in `[min, max)` in order on the calling thread. Each
//! length gets its own [`LengthTimer`] and therefore the *full* budget: a
//! sequential run can take up to `budget × lengths` wall time before it gives
//! up, whereas the parallel runner spends one budget on the whole run.
//!
//! The loop ends on the first match or the first timeout. Comparisons from
//! every length tried accumulate in one `SearchState`, so the reported count
//! covers the whole run; elapsed time is that of the last length tried (or
//! the budget, if that length timed out).

use std::time::Instant;
use tracing::{debug, info, warn};

use crate::cancel::LengthTimer;
use crate::config::SearchConfig;
use crate::enumerator::CombinationEnumerator;
use crate::report::{RunMode, RunReport};
use crate::state::SearchState;

pub struct SequentialRunner<'a> {
    config: &'a SearchConfig,
}

impl<'a> SequentialRunner<'a> {
    pub fn new(config: &'a SearchConfig) -> Self {
        SequentialRunner { config }
    }

    pub fn run(&self, target: &str) -> RunReport {
        let state = SearchState::new(self.config.max_length);
        self.run_with_state(target, &state)
    }

    /// Run against a caller-supplied fresh state (e.g. one with a reporter attached).
    pub fn run_with_state(&self, target: &str, state: &SearchState) -> RunReport {
        let config = self.config;
        let run_start = Instant::now();
        if !state.start() {
            warn!(status = ?state.status(), "sequential: search state already used, not starting");
            return RunReport::snapshot(RunMode::Sequential, state, config.budget);
        }

        let mut last_length_elapsed = None;
        for length in config.lengths() {
            let timer = LengthTimer::start(config.budget);
            debug!(length, "sequential: searching length");
            let found = CombinationEnumerator::new(&config.alphabet, target, state, &timer)
                .search_length(length);
            last_length_elapsed = Some(timer.elapsed());

            if found {
                info!(length, comparisons = state.comparisons(), "sequential: match found");
                break;
            }
            if !state.is_running() {
                info!(length, "sequential: time limit reached");
                break;
            }
        }

        state.exhaust();
        state.record_elapsed(last_length_elapsed.unwrap_or_else(|| run_start.elapsed()));
        RunReport::snapshot(RunMode::Sequential, state, config.budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RunStatus;
    use std::time::Duration;

    fn small_config() -> SearchConfig {
        SearchConfig::default()
            .with_alphabet("ABCD".parse().unwrap())
            .with_lengths(1, 6)
            .with_budget(Duration::from_secs(30))
    }

    #[test]
    fn counts_shorter_lengths_in_full() {
        // "BA" over ABCD: length 1 → 4 candidates, length 2 → rank 4, so 5.
        let r = SequentialRunner::new(&small_config()).run("BA");
        assert_eq!(r.status, RunStatus::MatchFound);
        assert!(r.match_found);
        assert!(!r.running);
        assert_eq!(r.cracked.as_deref(), Some("BA"));
        assert_eq!(r.comparisons, 4 + 5);
        assert_eq!(r.comparisons_by_length[&1], 4);
        assert_eq!(r.comparisons_by_length[&2], 5);
        assert!(!r.comparisons_by_length.contains_key(&3));
    }

    #[test]
    fn unreachable_target_exhausts_every_length() {
        let config = small_config().with_lengths(1, 4);
        let r = SequentialRunner::new(&config).run("DDDD");
        assert_eq!(r.status, RunStatus::Exhausted);
        assert!(!r.match_found);
        assert_eq!(r.cracked, None);
        assert_eq!(r.comparisons, 4 + 16 + 64);
        assert!(r.elapsed < Duration::from_secs(30));
    }

    #[test]
    fn timeout_pins_elapsed_to_budget() {
        let config = SearchConfig::default()
            .with_lengths(7, 9)
            .with_budget(Duration::from_millis(100));
        let r = SequentialRunner::new(&config).run("ZZZZZZZZ");
        assert_eq!(r.status, RunStatus::TimedOut);
        assert!(!r.match_found);
        assert_eq!(r.elapsed, Duration::from_millis(100));
        // Timed out during length 7, so length 8 was never started.
        assert!(!r.comparisons_by_length.contains_key(&8));
    }

    #[test]
    fn used_state_is_not_restarted() {
        let config = small_config();
        let state = SearchState::new(config.max_length);
        let first = SequentialRunner::new(&config).run_with_state("BA", &state);
        let second = SequentialRunner::new(&config).run_with_state("DD", &state);
        assert_eq!(second.status, RunStatus::MatchFound);
        assert_eq!(second.cracked.as_deref(), Some("BA"));
        assert_eq!(second.comparisons, first.comparisons);
    }

    #[test]
    fn report_mode_is_sequential() {
        let r = SequentialRunner::new(&small_config()).run("A");
        assert_eq!(r.mode, RunMode::Sequential);
        assert_eq!(r.comparisons, 1);
    }
}
