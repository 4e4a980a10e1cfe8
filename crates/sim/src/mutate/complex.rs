use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::MutationError;
use crate::mutate::{span_string, CoordinateOffset, Mutator, Variant};
use crate::rng::MutationRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndelKind {
    Insertion,
    Deletion,
}

/// Clusters of SNPs and indels applied inside evenly spaced windows.
///
/// The outer walk has the same cadence as [`super::SnpMutator`], with a
/// window of `cluster_length` bases starting at each stepped offset. Inside
/// a window, event positions are sampled without replacement (excluding the
/// window's first base, which keeps the record's left edge stable), SNPs
/// apply first, then insertions and deletions merged in ascending position
/// order with a local offset. An indel whose shifted position falls outside
/// the live window content is silently dropped; this is documented policy,
/// not an error. Exactly one [`Variant`] is emitted per window: the pre-
/// and post-mutation window content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexMutator {
    distance: usize,
    cluster_length: usize,
    snps_per_cluster: usize,
    deletions_per_cluster: usize,
    insertions_per_cluster: usize,
    max_indel_length: usize,
}

impl ComplexMutator {
    pub fn new(
        distance: usize,
        cluster_length: usize,
        snps_per_cluster: usize,
        deletions_per_cluster: usize,
        insertions_per_cluster: usize,
        max_indel_length: usize,
    ) -> Result<Self, MutationError> {
        if distance == 0 {
            return Err(MutationError::InvalidDistance {
                distance,
                minimum: 1,
            });
        }
        if cluster_length == 0 {
            return Err(MutationError::InvalidLength("cluster length", cluster_length));
        }
        if max_indel_length == 0 {
            return Err(MutationError::InvalidLength(
                "max indel length",
                max_indel_length,
            ));
        }
        Ok(Self {
            distance,
            cluster_length,
            snps_per_cluster,
            deletions_per_cluster,
            insertions_per_cluster,
            max_indel_length,
        })
    }

    fn events_per_cluster(&self) -> usize {
        self.snps_per_cluster + self.deletions_per_cluster + self.insertions_per_cluster
    }

    /// Apply one cluster's worth of events to `window`, returning the
    /// post-mutation window content.
    fn mutate_window(
        &self,
        window: &[u8],
        rng: &mut MutationRng,
    ) -> Result<Vec<u8>, MutationError> {
        let deletion_lengths: Vec<usize> = (0..self.deletions_per_cluster)
            .map(|_| rng.indel_length(self.max_indel_length))
            .collect();
        let insertion_lengths: Vec<usize> = (0..self.insertions_per_cluster)
            .map(|_| rng.indel_length(self.max_indel_length))
            .collect();

        let total = self.events_per_cluster();
        // Candidate positions are 1..window.len(), so the window must hold
        // one more base than there are events.
        if total >= window.len() {
            return Err(MutationError::ClusterTooSmall {
                window: window.len(),
                requested: total,
            });
        }

        let positions = rng.sample_distinct(1..window.len(), total);
        let mut snp_sites: Vec<usize> = positions[..self.snps_per_cluster].to_vec();
        snp_sites.sort_unstable();

        let mut indels: BTreeMap<usize, (usize, IndelKind)> = BTreeMap::new();
        let deletion_sites =
            &positions[self.snps_per_cluster..self.snps_per_cluster + self.deletions_per_cluster];
        for (&site, &length) in deletion_sites.iter().zip(&deletion_lengths) {
            indels.insert(site, (length, IndelKind::Deletion));
        }
        let insertion_sites = &positions[self.snps_per_cluster + self.deletions_per_cluster..];
        for (&site, &length) in insertion_sites.iter().zip(&insertion_lengths) {
            indels.insert(site, (length, IndelKind::Insertion));
        }

        let mut content = window.to_vec();

        // SNPs first: they do not change length, so indel positions stay
        // valid no matter the order.
        for &site in &snp_sites {
            content[site] = rng.substitute(content[site]);
        }

        let mut local_offset: i64 = 0;
        for (&site, &(length, kind)) in &indels {
            let shifted = site as i64 + local_offset;
            if shifted < 0 {
                continue;
            }
            let shifted = shifted as usize;
            if content.is_empty() || shifted > content.len() - 1 {
                continue;
            }
            match kind {
                IndelKind::Insertion => {
                    let bases = rng.random_bases(length);
                    content.splice(shifted..shifted, bases);
                    local_offset += length as i64;
                }
                IndelKind::Deletion => {
                    let end = (shifted + length).min(content.len());
                    content.drain(shifted..end);
                    local_offset -= length as i64;
                }
            }
        }

        Ok(content)
    }
}

impl Mutator for ComplexMutator {
    fn describe(&self) -> String {
        format!(
            "COMPLEX_length_{}_every_{}_snps_{}_del_{}_ins_{}_maxindel_{}",
            self.cluster_length,
            self.distance,
            self.snps_per_cluster,
            self.deletions_per_cluster,
            self.insertions_per_cluster,
            self.max_indel_length
        )
    }

    fn mutate_sequence(
        &self,
        seq: &[u8],
        rng: &mut MutationRng,
    ) -> Result<(Vec<Variant>, Vec<u8>), MutationError> {
        let d = self.distance;
        let len = seq.len();
        let stop = len.saturating_sub(d);
        let first = d - 1;

        // Too short for even one window: unchanged copy, no mutations.
        if first >= stop {
            return Ok((Vec::new(), seq.to_vec()));
        }

        let mut variants = Vec::new();
        let mut offset = CoordinateOffset::new();
        let mut mutated = seq[..first].to_vec();

        let mut start = first;
        let mut last_start = first;
        while start < stop {
            let window_end = (start + self.cluster_length).min(len);
            let window = &seq[start..window_end];
            let mutated_window = self.mutate_window(window, rng)?;

            mutated.extend_from_slice(&mutated_window);
            let copy_to = (start + d).min(len);
            if window_end < copy_to {
                mutated.extend_from_slice(&seq[window_end..copy_to]);
            }

            variants.push(Variant::new(
                start,
                offset.project(start),
                span_string(window),
                span_string(&mutated_window),
            ));

            if mutated_window.len() >= window.len() {
                offset.record_insertion(mutated_window.len() - window.len());
            } else {
                offset.record_deletion(window.len() - mutated_window.len());
            }

            last_start = start;
            start += d;
        }

        mutated.extend_from_slice(&seq[(last_start + d).min(len)..]);
        Ok((variants, mutated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_mutator() -> ComplexMutator {
        ComplexMutator::new(20, 10, 2, 2, 1, 2).unwrap()
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(ComplexMutator::new(0, 10, 1, 1, 1, 2).is_err());
        assert!(ComplexMutator::new(20, 0, 1, 1, 1, 2).is_err());
        assert!(ComplexMutator::new(20, 10, 1, 1, 1, 0).is_err());
        assert!(ComplexMutator::new(20, 10, 0, 0, 0, 1).is_ok());
    }

    #[test]
    fn test_describe() {
        let mutator = ComplexMutator::new(500, 20, 2, 4, 1, 5).unwrap();
        assert_eq!(
            mutator.describe(),
            "COMPLEX_length_20_every_500_snps_2_del_4_ins_1_maxindel_5"
        );
    }

    #[test]
    fn test_one_record_per_window() {
        let mutator = test_mutator();
        let mut rng = MutationRng::seeded(42);
        let seq: Vec<u8> = b"abcdefghijklmnopqrstuvwxyz"
            .iter()
            .cycle()
            .take(60)
            .copied()
            .collect();

        let (variants, _) = mutator.mutate_sequence(&seq, &mut rng).unwrap();

        // Windows start at 19 and 39; 59 is past len - distance.
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].original_position, 19);
        assert_eq!(variants[1].original_position, 39);
        assert_eq!(variants[0].original_seq.as_bytes(), &seq[19..29]);
        assert_eq!(variants[1].original_seq.as_bytes(), &seq[39..49]);
    }

    #[test]
    fn test_window_positions_track_offset() {
        let mutator = test_mutator();
        let mut rng = MutationRng::seeded(42);
        let seq: Vec<u8> = (0..60).map(|i| b"ACGT"[i % 4]).collect();

        let (variants, _) = mutator.mutate_sequence(&seq, &mut rng).unwrap();

        assert_eq!(variants[0].new_position, 19);
        let net = variants[0].new_seq.len() as i64 - variants[0].original_seq.len() as i64;
        assert_eq!(variants[1].new_position as i64, 39 + net);
    }

    #[test]
    fn test_round_trip_reconstructs_mutated_sequence() {
        let mutator = ComplexMutator::new(15, 8, 2, 1, 1, 3).unwrap();
        let mut rng = MutationRng::seeded(17);
        let seq: Vec<u8> = (0..90).map(|i| b"ACGT"[(i * 7) % 4]).collect();

        let (variants, mutated) = mutator.mutate_sequence(&seq, &mut rng).unwrap();
        assert!(!variants.is_empty());

        let mut rebuilt = Vec::new();
        let mut cursor = 0;
        for v in &variants {
            rebuilt.extend_from_slice(&seq[cursor..v.original_position]);
            rebuilt.extend_from_slice(v.new_seq.as_bytes());
            cursor = v.original_position + v.original_seq.len();
        }
        rebuilt.extend_from_slice(&seq[cursor..]);

        assert_eq!(rebuilt, mutated);
    }

    #[test]
    fn test_deterministic() {
        let mutator = test_mutator();
        let seq: Vec<u8> = (0..100).map(|i| b"ACGT"[(i * 3) % 4]).collect();

        let mut rng1 = MutationRng::seeded(5);
        let mut rng2 = MutationRng::seeded(5);
        assert_eq!(
            mutator.mutate_sequence(&seq, &mut rng1).unwrap(),
            mutator.mutate_sequence(&seq, &mut rng2).unwrap()
        );
    }

    #[test]
    fn test_short_sequence_is_untouched() {
        let mutator = test_mutator();
        let mut rng = MutationRng::seeded(42);
        let seq = b"ACGTACGTACGTACGTACGTACGTACGTACGT"; // 32 < 2 * 20

        let (variants, mutated) = mutator.mutate_sequence(seq, &mut rng).unwrap();
        assert!(variants.is_empty());
        assert_eq!(mutated, seq.to_vec());
    }

    #[test]
    fn test_cluster_too_small_is_fatal() {
        // 6 events cannot fit in a 4-base window with position 0 excluded.
        let mutator = ComplexMutator::new(10, 4, 3, 2, 1, 2).unwrap();
        let mut rng = MutationRng::seeded(42);
        let seq: Vec<u8> = (0..40).map(|i| b"ACGT"[i % 4]).collect();

        let err = mutator.mutate_sequence(&seq, &mut rng).unwrap_err();
        assert_eq!(
            err,
            MutationError::ClusterTooSmall {
                window: 4,
                requested: 6
            }
        );
    }

    #[test]
    fn test_no_events_leaves_window_content() {
        let mutator = ComplexMutator::new(20, 10, 0, 0, 0, 1).unwrap();
        let mut rng = MutationRng::seeded(42);
        let seq: Vec<u8> = (0..60).map(|i| b"ACGT"[i % 4]).collect();

        let (variants, mutated) = mutator.mutate_sequence(&seq, &mut rng).unwrap();
        assert_eq!(variants.len(), 2);
        for v in &variants {
            assert_eq!(v.new_seq, v.original_seq);
        }
        assert_eq!(mutated, seq);
    }

    #[test]
    fn test_snps_only_cluster_keeps_length() {
        let mutator = ComplexMutator::new(20, 10, 3, 0, 0, 1).unwrap();
        let mut rng = MutationRng::seeded(42);
        let seq: Vec<u8> = (0..60).map(|i| b"ACGT"[i % 4]).collect();

        let (variants, mutated) = mutator.mutate_sequence(&seq, &mut rng).unwrap();
        assert_eq!(mutated.len(), seq.len());
        for v in &variants {
            assert_eq!(v.new_seq.len(), v.original_seq.len());
            assert_ne!(v.new_seq, v.original_seq);
            // The window's first base is never an event site.
            assert_eq!(v.new_seq.as_bytes()[0], v.original_seq.as_bytes()[0]);
        }
    }

    #[test]
    fn test_tail_copied_unmodified() {
        let mutator = test_mutator();
        let mut rng = MutationRng::seeded(42);
        let seq: Vec<u8> = (0..60).map(|i| b"ACGT"[i % 4]).collect();

        let (variants, mutated) = mutator.mutate_sequence(&seq, &mut rng).unwrap();
        // Head before the first window is untouched.
        assert_eq!(&mutated[..19], &seq[..19]);
        // Tail after the last window's spacing is untouched.
        let last = variants.last().unwrap();
        let tail = &seq[39 + 20..];
        assert_eq!(&mutated[mutated.len() - tail.len()..], tail);
        assert_eq!(last.original_position, 39);
    }
}
