//! Helpers for producing keys to feed a [`Tree`][crate::Tree] in demos and tests.

use rand::Rng;

/// Returns `count` keys drawn uniformly from `0..max` using the thread-local generator. When
/// `max` is 0 every key is 0.
///
/// # Examples
///
/// ```
/// use rebalance_bst::util::random_keys;
///
/// let keys = random_keys(10, 100);
///
/// assert_eq!(keys.len(), 10);
/// assert!(keys.iter().all(|key| *key < 100));
/// ```
pub fn random_keys(count: usize, max: u32) -> Vec<u32> {
    random_keys_with(&mut rand::thread_rng(), count, max)
}

/// Like [`random_keys`] but draws from the given generator, so a seeded generator gives
/// repeatable keys.
pub fn random_keys_with<R>(rng: &mut R, count: usize, max: u32) -> Vec<u32>
where
    R: Rng + ?Sized,
{
    if max == 0 {
        return vec![0; count];
    }

    (0..count).map(|_| rng.gen_range(0..max)).collect()
}
