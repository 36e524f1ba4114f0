use rand::Rng;
use rand::seq::SliceRandom;

/// Uniform random subset of `pool` without replacement, in random order.
/// Returns `min(size, pool.len())` items; an empty pool yields an empty set.
pub fn sample<T: Clone, R: Rng + ?Sized>(pool: &[T], size: usize, rng: &mut R) -> Vec<T> {
    // choose_multiple does not randomize the order of what it picks
    let mut picked: Vec<T> = pool.choose_multiple(rng, size).cloned().collect();
    picked.shuffle(rng);
    picked
}
