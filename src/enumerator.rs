//! # Enumerator — Depth-First Candidate Generation and Matching
//!
//! Generates every string of a fixed length over the alphabet and compares
//! each against the target. This is where nearly all run time goes.
//!
//! ## Algorithm
//!
//! Depth-first recursion over a single reusable buffer. Each level appends one
//! symbol (in alphabet order), recurses with one fewer remaining symbol, and
//! pops it again. At `remaining == 0` the buffer is a complete candidate: it is
//! counted, then compared. The first symbol varies slowest, so candidates are
//! visited in rank order and the target is reached after exactly
//! `rank(target) + 1` comparisons.
//!
//! ## Checkpoints
//!
//! Every call, interior or leaf, first checks:
//!
//! 1. the run still wants this length searched (the deadline may have fired,
//!    or a sibling task may have claimed the match at a length no longer than
//!    this one), and
//! 2. the [`StopCheck`] does not report an expired budget.
//!
//! Both happen before the counter is touched, so no candidate is compared once
//! a stop has been observed. A sibling already past its checkpoint may still
//! count one more candidate. Stopping is reported as an ordinary "no match"
//! return, never as an error.
//!
//! [`Candidates`] is the iterative form of the same ordering: a lazy
//! odometer over symbol indices, used as the reference sequence in tests.

use crate::alphabet::Alphabet;
use crate::cancel::StopCheck;
use crate::state::SearchState;

pub struct CombinationEnumerator<'a, S: StopCheck + ?Sized> {
    alphabet: &'a Alphabet,
    target: &'a str,
    state: &'a SearchState,
    stop: &'a S,
}

impl<'a, S: StopCheck + ?Sized> CombinationEnumerator<'a, S> {
    pub fn new(
        alphabet: &'a Alphabet,
        target: &'a str,
        state: &'a SearchState,
        stop: &'a S,
    ) -> Self {
        CombinationEnumerator {
            alphabet,
            target,
            state,
            stop,
        }
    }

    /// Search every candidate of exactly `length` symbols.
    pub fn search_length(&self, length: usize) -> bool {
        self.explore("", length)
    }

    /// Search every extension of `prefix` by `remaining` symbols.
    ///
    /// Returns true iff the match was found and claimed in this subtree.
    pub fn explore(&self, prefix: &str, remaining: usize) -> bool {
        let length = prefix.chars().count() + remaining;
        let max_symbol = self.alphabet.symbols().iter().map(|c| c.len_utf8()).max();
        let mut buf = String::with_capacity(prefix.len() + remaining * max_symbol.unwrap_or(1));
        buf.push_str(prefix);
        self.descend(&mut buf, remaining, length)
    }

    fn descend(&self, buf: &mut String, remaining: usize, length: usize) -> bool {
        if !self.state.should_continue(length) || self.stop.should_stop(self.state) {
            return false;
        }

        if remaining == 0 {
            self.state.count_comparison(length);
            return buf.as_str() == self.target && self.state.claim_match(buf.as_str());
        }

        for &symbol in self.alphabet.symbols() {
            buf.push(symbol);
            let found = self.descend(buf, remaining - 1, length);
            buf.pop();
            if found {
                return true;
            }
            if !self.state.should_continue(length) {
                return false;
            }
        }
        false
    }
}

/// Every candidate of one length, in rank order.
///
/// Finite and non-restartable: once exhausted it stays exhausted.
pub struct Candidates<'a> {
    alphabet: &'a Alphabet,
    digits: Vec<usize>,
    done: bool,
}

impl<'a> Candidates<'a> {
    pub fn new(alphabet: &'a Alphabet, length: usize) -> Self {
        Candidates {
            alphabet,
            digits: vec![0; length],
            done: false,
        }
    }
}

/// Increment a digit array by 1 in the given base. Returns true on overflow.
#[inline]
fn increment_digits(digits: &mut [usize], base: usize) -> bool {
    for d in digits.iter_mut().rev() {
        *d += 1;
        if *d < base {
            return false;
        }
        *d = 0;
    }
    true
}

impl Iterator for Candidates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let symbols = self.alphabet.symbols();
        let candidate: String = self.digits.iter().map(|&d| symbols[d]).collect();
        self.done = increment_digits(&mut self.digits, symbols.len());
        Some(candidate)
    }
}

impl std::iter::FusedIterator for Candidates<'_> {}
