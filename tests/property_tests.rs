//! Property-based tests for the enumeration order and input validation.
//!
//! Uses `proptest` to check invariants across randomly generated alphabets,
//! targets and inputs. No network, files or long timeouts: every search here
//! runs over a small space with a generous budget.
//!
//! ```bash
//! cargo test --test property_tests
//! PROPTEST_CASES=10000 cargo test --test property_tests
//! ```
//!
//! Properties are named `prop_<subject>_<invariant>`.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use lettercrack::cancel::CancelToken;
use lettercrack::enumerator::{Candidates, CombinationEnumerator};
use lettercrack::validation::{parse_time_limit, validate_password, ValidationError};
use lettercrack::{Alphabet, RunStatus, SearchConfig, SearchState, SequentialRunner};

/// Alphabets of 1–6 distinct uppercase letters, in a random order.
fn small_alphabet() -> impl Strategy<Value = Alphabet> {
    proptest::sample::subsequence(lettercrack::alphabet::UPPERCASE.chars().collect::<Vec<_>>(), 1..=6)
        .prop_shuffle()
        .prop_map(|symbols| Alphabet::new(symbols).unwrap())
}

/// An alphabet plus a target of 1–4 symbols drawn from it.
fn alphabet_and_target() -> impl Strategy<Value = (Alphabet, String)> {
    small_alphabet().prop_flat_map(|a| {
        let symbols = a.symbols().to_vec();
        let target = proptest::collection::vec(proptest::sample::select(symbols), 1..=4)
            .prop_map(|cs| cs.into_iter().collect::<String>());
        (Just(a), target)
    })
}

fn running_state() -> Arc<SearchState> {
    let s = SearchState::new(8);
    s.start();
    s
}

// == Enumeration Order ==========================================================

proptest! {
    /// The enumerator compares exactly rank(target) + 1 candidates of the
    /// target's length before claiming the match.
    #[test]
    fn prop_enumerator_count_is_rank_plus_one((alphabet, target) in alphabet_and_target()) {
        let state = running_state();
        let stop = CancelToken::new();
        let len = target.chars().count();
        let found = CombinationEnumerator::new(&alphabet, &target, &state, &stop).search_length(len);
        prop_assert!(found);
        let rank = alphabet.rank(&target).unwrap() as u64;
        prop_assert_eq!(state.comparisons(), rank + 1);
        prop_assert_eq!(state.cracked(), Some(target.as_str()));
    }

    /// The iterative sequence visits candidates in the same order the
    /// recursive enumerator compares them.
    #[test]
    fn prop_candidates_position_is_rank((alphabet, target) in alphabet_and_target()) {
        let len = target.chars().count();
        let pos = Candidates::new(&alphabet, len).position(|c| c == target);
        prop_assert_eq!(pos.map(|p| p as u128), alphabet.rank(&target));
    }

    /// The iterative sequence is complete: exactly k^L strings, no duplicates.
    #[test]
    fn prop_candidates_cover_space(alphabet in small_alphabet(), len in 0usize..=4) {
        let all: Vec<String> = Candidates::new(&alphabet, len).collect();
        prop_assert_eq!(all.len() as u128, alphabet.space_size(len).unwrap());
        let mut sorted_by_rank = all.clone();
        sorted_by_rank.sort_by_key(|c| alphabet.rank(c));
        prop_assert_eq!(&all, &sorted_by_rank);
        sorted_by_rank.dedup();
        prop_assert_eq!(sorted_by_rank.len(), all.len());
    }

    /// candidate_at inverts rank.
    #[test]
    fn prop_rank_roundtrip((alphabet, target) in alphabet_and_target()) {
        let rank = alphabet.rank(&target).unwrap();
        let back = alphabet.candidate_at(rank, target.chars().count());
        prop_assert_eq!(back.as_deref(), Some(target.as_str()));
    }

    /// Sequential runs pay for every shorter length in full.
    #[test]
    fn prop_sequential_total_counts_shorter_lengths((alphabet, target) in alphabet_and_target()) {
        let len = target.chars().count();
        let config = SearchConfig::default()
            .with_alphabet(alphabet.clone())
            .with_lengths(1, 6)
            .with_budget(Duration::from_secs(60));
        let report = SequentialRunner::new(&config).run(&target);
        prop_assert_eq!(report.status, RunStatus::MatchFound);
        let shorter: u128 = (1..len).map(|l| alphabet.space_size(l).unwrap()).sum();
        let expected = shorter + alphabet.rank(&target).unwrap() + 1;
        prop_assert_eq!(report.comparisons as u128, expected);
    }
}

// == Validation =================================================================

proptest! {
    /// Every uppercase A..Z string of length 3..=128 is accepted.
    #[test]
    fn prop_valid_passwords_accepted(p in "[A-Z]{3,128}") {
        prop_assert_eq!(validate_password(&p, &Alphabet::uppercase(), 3, 128), Ok(()));
    }

    /// Any string containing an ASCII digit is rejected.
    #[test]
    fn prop_digits_rejected(prefix in "[A-Z]{0,5}", digit in "[0-9]", suffix in "[A-Z]{0,5}") {
        let p = format!("{}{}{}", prefix, digit, suffix);
        prop_assert!(validate_password(&p, &Alphabet::uppercase(), 3, 128).is_err());
    }

    /// Well-formed, non-zero hh:mm:ss values parse to the matching duration.
    #[test]
    fn prop_time_limit_parses(h in 0u64..24, m in 0u64..60, s in 0u64..60) {
        prop_assume!(h + m + s > 0);
        let input = format!("{:02}:{:02}:{:02}", h, m, s);
        prop_assert_eq!(parse_time_limit(&input), Ok(Duration::from_secs(h * 3600 + m * 60 + s)));
    }

    /// Anything with a non-digit in a field is rejected as a format error.
    #[test]
    fn prop_time_limit_rejects_garbage(input in "[0-9]{0,2}[a-z ]{1,3}[0-9:]{0,6}") {
        prop_assert_eq!(parse_time_limit(&input), Err(ValidationError::TimeFormat));
    }
}
