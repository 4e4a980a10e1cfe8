//! The pseudo-random stream behind all mutation strategies.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::ops::Range;

use crate::base::Nucleotide;

/// Reseedable pseudo-random stream shared by the mutation strategies of one
/// run.
///
/// Reseeding is an explicit call rather than a construction side effect:
/// the last seed wins and affects only draws made after the call, so a
/// driver that threads one stream through several strategies can reproduce
/// any single strategy's output by reseeding immediately before it runs.
/// The stream is not lock-protected; a reproducible run must perform all
/// its draws from a single thread in a fixed order.
#[derive(Debug, Clone)]
pub struct MutationRng {
    inner: Xoshiro256PlusPlus,
}

impl MutationRng {
    /// A stream with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// A stream seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        }
    }

    /// Restart the stream from `seed`. Only future draws are affected.
    pub fn reseed(&mut self, seed: u64) {
        self.inner = Xoshiro256PlusPlus::seed_from_u64(seed);
    }

    /// Uniform draw over the DNA alphabet.
    #[inline]
    pub fn random_base(&mut self) -> Nucleotide {
        Nucleotide::ALL[self.inner.random_range(0..Nucleotide::ALL.len())]
    }

    /// `count` uniform ACGT bases, e.g. the content of one insertion.
    pub fn random_bases(&mut self, count: usize) -> Vec<u8> {
        (0..count).map(|_| self.random_base().to_ascii()).collect()
    }

    /// A substitute for `reference` at a SNP site: uniform over the
    /// alternates of the uppercased reference, enumerated in alphabetical
    /// order. Never returns the uppercased reference itself when that is
    /// one of A/C/G/T.
    pub fn substitute(&mut self, reference: u8) -> u8 {
        let alternates = Nucleotide::alternates_of(reference.to_ascii_uppercase());
        alternates[self.inner.random_range(0..alternates.len())].to_ascii()
    }

    /// Uniform indel length in `[1, max]`.
    #[inline]
    pub fn indel_length(&mut self, max: usize) -> usize {
        self.inner.random_range(1..=max)
    }

    /// `k` distinct values from `range`, without replacement, in draw order.
    ///
    /// Partial Fisher-Yates over the collected range; the caller must
    /// ensure `k` does not exceed the range size.
    pub fn sample_distinct(&mut self, range: Range<usize>, k: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = range.collect();
        debug_assert!(k <= pool.len(), "cannot sample more positions than available");
        for i in 0..k {
            let j = self.inner.random_range(i..pool.len());
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_streams_agree() {
        let mut a = MutationRng::seeded(42);
        let mut b = MutationRng::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.random_base(), b.random_base());
            assert_eq!(a.indel_length(10), b.indel_length(10));
        }
    }

    #[test]
    fn test_reseed_restarts_stream() {
        let mut a = MutationRng::seeded(7);
        let first: Vec<u8> = a.random_bases(20);
        a.reseed(7);
        let second: Vec<u8> = a.random_bases(20);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reseed_only_affects_future_draws() {
        let mut a = MutationRng::seeded(1);
        let before = a.random_bases(10);
        a.reseed(2);
        let mut b = MutationRng::seeded(2);
        // Draws made before the reseed are untouched; draws after follow
        // the new seed exactly.
        assert_eq!(a.random_bases(10), b.random_bases(10));
        assert_eq!(before.len(), 10);
    }

    #[test]
    fn test_substitute_never_returns_reference() {
        let mut rng = MutationRng::seeded(42);
        for reference in [b'A', b'C', b'G', b'T'] {
            for _ in 0..50 {
                let base = rng.substitute(reference);
                assert_ne!(base, reference);
                assert!(Nucleotide::from_ascii(base).is_some());
            }
        }
    }

    #[test]
    fn test_substitute_uppercases_reference() {
        let mut rng = MutationRng::seeded(42);
        for _ in 0..50 {
            // 'g' normalizes to 'G', so 'G' is excluded from the draw.
            let base = rng.substitute(b'g');
            assert_ne!(base, b'G');
            assert!(Nucleotide::from_ascii(base).is_some());
        }
    }

    #[test]
    fn test_substitute_non_acgt_reference() {
        let mut rng = MutationRng::seeded(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let base = rng.substitute(b'7');
            assert!(Nucleotide::from_ascii(base).is_some());
            seen.insert(base);
        }
        // All four bases are candidates for a non-ACGT reference.
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_indel_length_bounds() {
        let mut rng = MutationRng::seeded(42);
        for _ in 0..200 {
            let len = rng.indel_length(5);
            assert!((1..=5).contains(&len));
        }
        assert_eq!(rng.indel_length(1), 1);
    }

    #[test]
    fn test_sample_distinct_unique_and_in_range() {
        let mut rng = MutationRng::seeded(42);
        let samples = rng.sample_distinct(1..100, 20);
        assert_eq!(samples.len(), 20);
        let unique: std::collections::HashSet<_> = samples.iter().collect();
        assert_eq!(unique.len(), 20);
        assert!(samples.iter().all(|&p| (1..100).contains(&p)));
    }

    #[test]
    fn test_sample_distinct_full_range() {
        let mut rng = MutationRng::seeded(42);
        let mut samples = rng.sample_distinct(0..10, 10);
        samples.sort_unstable();
        assert_eq!(samples, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_sample_distinct_zero() {
        let mut rng = MutationRng::seeded(42);
        assert!(rng.sample_distinct(0..10, 0).is_empty());
    }

    #[test]
    fn test_random_bases_alphabet() {
        let mut rng = MutationRng::seeded(42);
        let bases = rng.random_bases(100);
        assert_eq!(bases.len(), 100);
        assert!(bases.iter().all(|&b| Nucleotide::from_ascii(b).is_some()));
    }
}
