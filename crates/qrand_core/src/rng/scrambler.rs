//! Scrambling source used to randomise bases and digit permutations.

use rand::seq::SliceRandom;
use rand::Rng;

/// Capability to shuffle a finite sequence uniformly at random, in place.
///
/// A sequencer consumes a scrambler only while it is being reset: once to
/// order the prime bases, then once per coordinate to shuffle its digit
/// permutation. Every [`rand::Rng`] is a scrambler, so seeded generators give
/// fully reproducible sequencers.
///
/// # Examples
///
/// ```rust
/// use qrand_core::rng::{ScrambleRng, Scrambler};
///
/// let mut rng = ScrambleRng::from_seed(7);
/// let mut items = [1, 2, 3, 4, 5];
/// rng.scramble(&mut items);
///
/// let mut sorted = items;
/// sorted.sort();
/// assert_eq!(sorted, [1, 2, 3, 4, 5]);
/// ```
pub trait Scrambler {
    /// Permutes `items` uniformly at random.
    fn scramble<T>(&mut self, items: &mut [T]);
}

impl<R: Rng + ?Sized> Scrambler for R {
    #[inline]
    fn scramble<T>(&mut self, items: &mut [T]) {
        items.shuffle(self);
    }
}
