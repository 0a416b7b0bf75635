//! # Alphabet — Ordered Symbol Set for Candidate Generation
//!
//! The alphabet fixes both *which* symbols a candidate may contain and the
//! *order* in which the enumerator tries them. The first symbol varies slowest,
//! so a candidate's position in the search is its base-k numeral value where
//! each symbol's digit is its index in the alphabet.
//!
//! ## Rank Arithmetic
//!
//! For an alphabet of size k and a candidate `s` of length L:
//!
//!   rank(s) = Σ position(s[i]) · k^(L−1−i)
//!
//! which is exactly the number of candidates of length L the enumerator
//! examines before reaching `s`. All arithmetic is checked `u128`; ranks that
//! overflow (k^L > 2^128) are reported as `None`.

use anyhow::Result;

/// Symbols of the default alphabet, in enumeration order.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from symbols in enumeration order.
    ///
    /// Fails on an empty symbol set or a repeated symbol: either would make
    /// ranks ambiguous and the search meaningless.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            anyhow::bail!("alphabet must contain at least one symbol");
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                anyhow::bail!("alphabet symbol {:?} appears more than once", c);
            }
        }
        Ok(Alphabet { symbols })
    }

    /// The 26 uppercase Latin letters, `A` first.
    pub fn uppercase() -> Self {
        Alphabet {
            symbols: UPPERCASE.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed alphabet; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    /// Index of `c` in enumeration order.
    pub fn position(&self, c: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == c)
    }

    /// Number of distinct candidates of `length` symbols (k^length).
    pub fn space_size(&self, length: usize) -> Option<u128> {
        let k = self.symbols.len() as u128;
        let mut size: u128 = 1;
        for _ in 0..length {
            size = size.checked_mul(k)?;
        }
        Some(size)
    }

    /// 0-indexed lexicographic rank of `candidate` among all strings of its length.
    pub fn rank(&self, candidate: &str) -> Option<u128> {
        let k = self.symbols.len() as u128;
        candidate.chars().try_fold(0u128, |acc, c| {
            let digit = self.position(c)? as u128;
            acc.checked_mul(k)?.checked_add(digit)
        })
    }

    /// The candidate of `length` symbols at `rank`; inverse of [`Alphabet::rank`].
    pub fn candidate_at(&self, rank: u128, length: usize) -> Option<String> {
        if rank >= self.space_size(length)? {
            return None;
        }
        let k = self.symbols.len() as u128;
        let mut digits = vec![0usize; length];
        let mut r = rank;
        for d in digits.iter_mut().rev() {
            *d = (r % k) as usize;
            r /= k;
        }
        Some(digits.into_iter().map(|d| self.symbols[d]).collect())
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::uppercase()
    }
}

impl std::str::FromStr for Alphabet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Alphabet::new(s.chars())
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
