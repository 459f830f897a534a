//! Unbiased random permutation of the pool.

use rand::Rng;

/// Fisher-Yates shuffle over a copy of `items`; the input is left untouched.
///
/// Walks from the last index down to 1, swapping each slot with a uniformly
/// drawn index in `0..=i`, so every permutation is equally likely.
pub fn fisher_yates_shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}
