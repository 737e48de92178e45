//! Mixed-radix digit counters.
//!
//! A counter stores the point index of one coordinate in that coordinate's
//! prime base, least-significant digit first. Digit vectors grow on demand,
//! so coordinates with small bases simply carry more digits.

/// Largest value representable by a reconstructed coordinate.
pub(crate) const COUNTER_CEILING: u64 = u64::MAX;

/// Adds one to the counter.
///
/// Digits equal to `base - 1` roll over to zero and carry; when every digit
/// rolls over a new most-significant digit of value 1 is appended.
#[inline]
pub(crate) fn increment(digits: &mut Vec<u32>, base: u32) {
    let top = base - 1;
    for digit in digits.iter_mut() {
        if *digit == top {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.push(1);
}

/// Evaluates the scrambled digits as a radical inverse.
///
/// The most significant stored digit gets weight 1 and every step towards the
/// least significant digit multiplies the weight by `base`. Returns the
/// integer numerator and the denominator `base^digits.len()`.
///
/// The caller guarantees `base^digits.len()` fits in a `u64`; the overflow
/// policy in [`QRandSequencer`](super::QRandSequencer) keeps it there.
#[inline]
pub(crate) fn scrambled_value(digits: &[u32], permutation: &[u32], base: u32) -> (u64, u64) {
    let base = u64::from(base);
    let mut value = 0u64;
    let mut scale = 1u64;
    for &digit in digits.iter().rev() {
        value += u64::from(permutation[digit as usize]) * scale;
        scale *= base;
    }
    (value, scale)
}

/// Returns `true` once a denominator leaves no headroom for another digit.
#[inline]
pub(crate) fn near_ceiling(max_value: u64, base: u32) -> bool {
    max_value >= COUNTER_CEILING / u64::from(base)
}

/// Rebuilds the digit vector of `index` in `base`, least significant first.
pub(crate) fn digits_of(mut index: u64, base: u32, digits: &mut Vec<u32>) {
    let base = u64::from(base);
    digits.clear();
    while index > 0 {
        // remainder < base <= u32::MAX
        digits.push((index % base) as u32);
        index /= base;
    }
}

/// First point index at which `base` triggers the near-ceiling reset.
///
/// Index `k` has `d` digits with `base^(d-1) <= k < base^d`, and the reset
/// fires when `base^d` reaches the ceiling check, so the answer is the power
/// of `base` just below the first power that fails [`near_ceiling`].
pub(crate) fn reset_index(base: u32) -> u64 {
    let b = u64::from(base);
    let mut previous = 1u64;
    let mut current = b;
    while !near_ceiling(current, base) {
        previous = current;
        current *= b;
    }
    previous
}

/// Period of a sequencer with the given bases.
///
/// Point indices run through `1..period`; producing index `period` fires the
/// global reset and the count returns to zero.
pub(crate) fn period(bases: &[u32]) -> u64 {
    bases
        .iter()
        .map(|&b| reset_index(b))
        .min()
        .unwrap_or(COUNTER_CEILING)
}
