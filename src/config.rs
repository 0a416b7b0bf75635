//! # Config — Run Configuration Shared by Both Runners
//!
//! `SearchConfig` carries everything a run needs besides the target: the
//! alphabet, the half-open range of lengths to search, and the time budget.
//! [`SearchConfig::validate`] rejects unusable configurations before any run
//! starts; the runners assume a validated config.

use anyhow::Result;
use serde::Serialize;
use std::ops::Range;
use std::time::Duration;

use crate::alphabet::Alphabet;

/// Shortest password accepted and first length searched.
pub const MIN_PASSWORD_LENGTH: usize = 3;

/// Longest password accepted; also the exclusive upper bound of lengths searched.
pub const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Clone, Debug, Serialize)]
pub struct SearchConfig {
    #[serde(serialize_with = "serialize_alphabet")]
    pub alphabet: Alphabet,
    pub min_length: usize,
    /// Exclusive.
    pub max_length: usize,
    #[serde(rename = "budget_secs", serialize_with = "serialize_secs")]
    pub budget: Duration,
}

fn serialize_alphabet<S: serde::Serializer>(a: &Alphabet, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(a)
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            alphabet: Alphabet::uppercase(),
            min_length: MIN_PASSWORD_LENGTH,
            max_length: MAX_PASSWORD_LENGTH,
            budget: Duration::from_secs(10),
        }
    }
}

impl SearchConfig {
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_lengths(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Lengths searched, in order.
    pub fn lengths(&self) -> Range<usize> {
        self.min_length..self.max_length
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_length == 0 {
            anyhow::bail!("min_length must be at least 1");
        }
        if self.max_length <= self.min_length {
            anyhow::bail!(
                "max_length ({}) must be greater than min_length ({})",
                self.max_length,
                self.min_length
            );
        }
        if self.budget.is_zero() {
            anyhow::bail!("time budget must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let c = SearchConfig::default();
        c.validate().unwrap();
        assert_eq!(c.lengths(), 3..128);
        assert_eq!(c.alphabet.len(), 26);
    }

    #[test]
    fn builder_sets_fields() {
        let c = SearchConfig::default()
            .with_alphabet("XYZ".parse().unwrap())
            .with_lengths(1, 4)
            .with_budget(Duration::from_millis(250));
        assert_eq!(c.alphabet.to_string(), "XYZ");
        assert_eq!(c.lengths(), 1..4);
        assert_eq!(c.budget, Duration::from_millis(250));
    }

    #[test]
    fn empty_length_range_rejected() {
        let err = SearchConfig::default().with_lengths(5, 5).validate().unwrap_err();
        assert!(err.to_string().contains("max_length"));
    }

    #[test]
    fn zero_min_length_rejected() {
        assert!(SearchConfig::default().with_lengths(0, 4).validate().is_err());
    }

    #[test]
    fn zero_budget_rejected() {
        let err = SearchConfig::default()
            .with_budget(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("budget"));
    }

    #[test]
    fn serializes_alphabet_as_string() {
        let json = serde_json::to_value(SearchConfig::default()).unwrap();
        assert_eq!(json["alphabet"], crate::alphabet::UPPERCASE);
        assert_eq!(json["budget_secs"], 10.0);
        assert_eq!(json["max_length"], 128);
    }
}
