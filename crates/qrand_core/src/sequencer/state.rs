//! Checkpointing of sequencer state.
//!
//! The state text is ASCII, comma-delimited and positional:
//!
//! ```text
//! <dimensionality>,<base_0>,<perm_0[1]>,...,<perm_0[base_0-1]>,<base_1>,...,<count>
//! ```
//!
//! Index 0 of every permutation is always 0 and is omitted. Digit counters are
//! not stored; they are rebuilt from the count on load. The empty string
//! stands for a sequencer that was never initialised.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::{counter, QRandSequencer};
use crate::error::{Result, SequencerError};
use crate::primes::{is_tabulated_prime, MAX_DIMENSIONALITY};

/// Snapshot of everything needed to resume a sequencer exactly.
///
/// Values of this type are always consistent: they are either taken from a
/// live sequencer or parsed (and validated) from text.
///
/// # Examples
///
/// ```rust
/// use qrand_core::rng::ScrambleRng;
/// use qrand_core::{QRandSequencer, SequencerState};
///
/// let mut seq = QRandSequencer::new(2, &mut ScrambleRng::from_seed(3)).unwrap();
/// seq.advance();
///
/// let text = seq.state().to_string();
/// let state: SequencerState = text.parse().unwrap();
/// assert_eq!(state.count(), 1);
/// assert_eq!(state.dimensionality(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequencerState {
    dimensionality: usize,
    bases: Vec<u32>,
    permutations: Vec<Vec<u32>>,
    count: u64,
}

impl SequencerState {
    /// Dimensionality requested by the caller.
    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// Prime base of each padded coordinate.
    pub fn bases(&self) -> &[u32] {
        &self.bases
    }

    /// Digit permutation of each padded coordinate.
    pub fn permutations(&self) -> &[Vec<u32>] {
        &self.permutations
    }

    /// Points generated since the last reset.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns `true` for the state of a never-initialised sequencer.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

impl fmt::Display for SequencerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "{},", self.dimensionality)?;
        for (&base, permutation) in self.bases.iter().zip(&self.permutations) {
            write!(f, "{},", base)?;
            for value in &permutation[1..] {
                write!(f, "{},", value)?;
            }
        }
        write!(f, "{}", self.count)
    }
}

/// Cursor over the comma-separated fields, tracking the field index.
struct Fields<'a> {
    inner: std::str::Split<'a, char>,
    index: usize,
}

impl<'a> Fields<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split(','),
            index: 0,
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<(usize, T)> {
        let index = self.index;
        let token = self
            .inner
            .next()
            .ok_or_else(|| SequencerError::malformed(index, format!("missing {}", what)))?;
        self.index += 1;
        let unsigned_decimal = !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit());
        let parsed = if unsigned_decimal { token.parse().ok() } else { None };
        let value = parsed.ok_or_else(|| {
            SequencerError::malformed(index, format!("expected {}, found '{}'", what, token))
        })?;
        Ok((index, value))
    }

    fn finish(mut self) -> Result<()> {
        match self.inner.next() {
            None => Ok(()),
            Some(token) => Err(SequencerError::malformed(
                self.index,
                format!("unexpected trailing field '{}'", token),
            )),
        }
    }
}

impl FromStr for SequencerState {
    type Err = SequencerError;

    fn from_str(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Self::default());
        }
        let mut fields = Fields::new(text);

        let (field, dimensionality): (_, usize) = fields.next("dimensionality")?;
        if dimensionality == 0 || dimensionality > MAX_DIMENSIONALITY {
            return Err(SequencerError::malformed(
                field,
                format!(
                    "dimensionality {} outside [1, {}]",
                    dimensionality, MAX_DIMENSIONALITY
                ),
            ));
        }
        let padded = dimensionality + dimensionality % 2;

        let mut bases = Vec::with_capacity(padded);
        let mut permutations = Vec::with_capacity(padded);
        for _ in 0..padded {
            let (field, base): (_, u32) = fields.next("prime base")?;
            if !is_tabulated_prime(base) {
                return Err(SequencerError::malformed(
                    field,
                    format!("{} is not one of the first {} primes", base, MAX_DIMENSIONALITY),
                ));
            }
            if bases.contains(&base) {
                return Err(SequencerError::malformed(
                    field,
                    format!("base {} appears twice", base),
                ));
            }

            let mut permutation = Vec::with_capacity(base as usize);
            let mut seen = vec![false; base as usize];
            permutation.push(0);
            seen[0] = true;
            for _ in 1..base {
                let (field, value): (_, u32) = fields.next("permutation value")?;
                if value >= base || seen[value as usize] {
                    return Err(SequencerError::malformed(
                        field,
                        format!("{} breaks the permutation of base {}", value, base),
                    ));
                }
                seen[value as usize] = true;
                permutation.push(value);
            }

            bases.push(base);
            permutations.push(permutation);
        }

        let (field, count): (_, u64) = fields.next("point count")?;
        if count >= counter::period(&bases) {
            return Err(SequencerError::malformed(
                field,
                format!("point count {} exceeds the counter capacity", count),
            ));
        }
        fields.finish()?;

        Ok(Self {
            dimensionality,
            bases,
            permutations,
            count,
        })
    }
}

impl QRandSequencer {
    /// Takes a snapshot of the sequencer state.
    pub fn state(&self) -> SequencerState {
        SequencerState {
            dimensionality: if self.is_initialised() {
                self.dimensionality
            } else {
                0
            },
            bases: self.bases.clone(),
            permutations: self.permutations.clone(),
            count: self.count,
        }
    }

    /// Replaces the sequencer state, rebuilding the counters from the count.
    ///
    /// An empty state leaves an uninitialised sequencer.
    pub fn set_state(&mut self, state: SequencerState) {
        let SequencerState {
            dimensionality,
            bases,
            permutations,
            count,
        } = state;
        self.dimensionality = dimensionality;
        self.bases = bases;
        self.permutations = permutations;
        self.count = count;
        self.counters.clear();
        self.rebuild_counters();
        debug!(
            dimensionality = self.dimensionality,
            count = self.count,
            "sequencer state loaded"
        );
    }

    /// Serialises the state; empty if the sequencer was never initialised.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use qrand_core::QRandSequencer;
    ///
    /// assert_eq!(QRandSequencer::default().to_state_string(), "");
    /// ```
    pub fn to_state_string(&self) -> String {
        self.state().to_string()
    }

    /// Restores a state produced by [`to_state_string`](Self::to_state_string).
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::MalformedState`] if the text is truncated,
    /// holds non-numeric fields, or describes an impossible state (unknown
    /// bases, broken permutations, a count beyond the counter capacity). The
    /// sequencer is left untouched on error.
    pub fn load_state(&mut self, text: &str) -> Result<()> {
        let state = text.parse()?;
        self.set_state(state);
        Ok(())
    }

    /// Builds a sequencer from serialised state text.
    pub fn from_state_str(text: &str) -> Result<Self> {
        let mut sequencer = Self::default();
        sequencer.load_state(text)?;
        Ok(sequencer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScrambleRng;

    fn seeded(dimensionality: usize, seed: u64) -> QRandSequencer {
        QRandSequencer::new(dimensionality, &mut ScrambleRng::from_seed(seed)).unwrap()
    }

    #[test]
    fn test_empty_state() {
        let seq = QRandSequencer::default();
        assert_eq!(seq.to_state_string(), "");

        let mut loaded = seeded(4, 1);
        loaded.load_state("").unwrap();
        assert!(!loaded.is_initialised());
        assert_eq!(loaded.padded_dimensionality(), 0);
    }

    #[test]
    fn test_state_layout() {
        let mut seq = seeded(1, 17);
        for _ in 0..5 {
            seq.advance();
        }
        let text = seq.to_state_string();
        let fields: Vec<&str> = text.split(',').collect();

        // dimensionality, two bases with (base - 1) permutation entries, count
        let expected_len = 1 + seq.bases().iter().map(|&b| b as usize).sum::<usize>() + 1;
        assert_eq!(fields.len(), expected_len);
        assert_eq!(fields[0], "1");
        assert_eq!(fields[fields.len() - 1], "5");
        assert!(!text.contains(' '));

        let first_base: u32 = fields[1].parse().unwrap();
        assert_eq!(first_base, seq.bases()[0]);
    }

    #[test]
    fn test_known_state_text() {
        // bases 3 then 2, permutation of base 3 is [0, 2, 1], seven points done
        let seq = QRandSequencer::from_state_str("2,3,2,1,2,1,7").unwrap();
        assert_eq!(seq.dimensionality(), 2);
        assert_eq!(seq.bases(), &[3, 2]);
        assert_eq!(seq.permutations()[0], vec![0, 2, 1]);
        assert_eq!(seq.permutations()[1], vec![0, 1]);
        assert_eq!(seq.count(), 7);
        // 7 = "21" in base 3, "111" in base 2
        assert_eq!(seq.counters()[0], vec![1, 2]);
        assert_eq!(seq.counters()[1], vec![1, 1, 1]);
        assert_eq!(seq.to_state_string(), "2,3,2,1,2,1,7");
    }

    #[test]
    fn test_round_trip_continues_sequence() {
        let mut original = seeded(9, 99);
        for _ in 0..37 {
            original.advance();
        }
        let mut resumed = QRandSequencer::from_state_str(&original.to_state_string()).unwrap();
        assert_eq!(resumed.counters(), original.counters());
        for _ in 0..150 {
            assert_eq!(resumed.advance(), original.advance());
        }
    }

    #[test]
    fn test_malformed_states_are_rejected() {
        let cases = [
            ("x", 0),
            ("0,5", 0),
            ("1001,2,1,0", 0),
            ("2,4,1,2,3,2,1,0", 1),     // 4 is not prime
            ("2,3,2,1,3,2,1,0", 4),     // duplicated base
            ("2,3,2,2,2,1,0", 3),       // not a permutation
            ("2,3,0,1,2,1,0", 2),       // 0 is fixed at index 0
            ("2,3,2,1,2,1", 6),         // truncated before the count
            ("2,3,2,1,2,1,4,9", 7),     // trailing field
            ("2,3,2,1,2,1,-1", 6),      // negative count
            ("2, 3,2,1,2,1,0", 1),      // whitespace
        ];
        for (text, field) in cases {
            match QRandSequencer::from_state_str(text) {
                Err(SequencerError::MalformedState { field: f, .. }) => {
                    assert_eq!(f, field, "wrong field for '{}'", text)
                }
                other => panic!("'{}' should be malformed, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_signed_tokens_are_rejected() {
        for (text, field) in [
            ("+2,3,2,1,2,1,7", 0),
            ("2,+3,2,1,2,1,7", 1),
            ("2,3,2,+1,2,1,7", 3),
            ("2,3,2,1,2,1,+7", 6),
            ("2,3,2,1,2,1,", 6),
        ] {
            match text.parse::<SequencerState>() {
                Err(SequencerError::MalformedState { field: f, .. }) => {
                    assert_eq!(f, field, "wrong field for '{}'", text)
                }
                other => panic!("'{}' should be malformed, got {:?}", text, other),
            }
        }
        // The unsigned spelling of the same state is accepted
        let state: SequencerState = "2,3,2,1,2,1,7".parse().unwrap();
        assert_eq!(state.to_string(), "2,3,2,1,2,1,7");
    }

    #[test]
    fn test_count_beyond_capacity_is_rejected() {
        let text = format!("2,3,2,1,2,1,{}", u64::MAX);
        assert!(matches!(
            QRandSequencer::from_state_str(&text),
            Err(SequencerError::MalformedState { field: 6, .. })
        ));
    }

    #[test]
    fn test_failed_load_leaves_sequencer_untouched() {
        let mut seq = seeded(3, 5);
        seq.advance();
        let before = seq.clone();
        assert!(seq.load_state("3,2,1").is_err());
        assert_eq!(seq, before);
    }

    #[test]
    fn test_state_value_round_trip() {
        let mut seq = seeded(5, 8);
        seq.skip(1234);
        let state = seq.state();
        let parsed: SequencerState = state.to_string().parse().unwrap();
        assert_eq!(parsed, state);
    }
}
