//! Unbiased shuffling.

use rand::Rng;

/// Return a uniformly random permutation of `items` (Fisher-Yates).
///
/// The input is left untouched. Callers pass the random source so tests can
/// seed it; production code hands in an entropy-seeded generator.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}
