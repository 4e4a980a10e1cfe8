use serde::{Deserialize, Serialize};

use crate::errors::MutationError;
use crate::mutate::{span_string, CoordinateOffset, Mutator, Variant};
use crate::rng::MutationRng;

/// Fixed-length insertions of random bases at regular spacing.
///
/// The walk copies the sequence in chunks of `distance` bases and appends
/// `insertion_length` uniformly drawn bases after each chunk, stopping once
/// the walk position reaches `len - distance`; the remaining tail is copied
/// unmodified. Each record anchors on the base immediately before the
/// insertion point: `original_seq` is that base, `new_seq` the base plus
/// the inserted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionMutator {
    distance: usize,
    insertion_length: usize,
}

impl InsertionMutator {
    pub fn new(distance: usize, insertion_length: usize) -> Result<Self, MutationError> {
        if distance == 0 {
            return Err(MutationError::InvalidDistance {
                distance,
                minimum: 1,
            });
        }
        if insertion_length == 0 {
            return Err(MutationError::InvalidLength(
                "insertion length",
                insertion_length,
            ));
        }
        Ok(Self {
            distance,
            insertion_length,
        })
    }

    #[inline]
    pub fn distance(&self) -> usize {
        self.distance
    }

    #[inline]
    pub fn insertion_length(&self) -> usize {
        self.insertion_length
    }
}

impl Mutator for InsertionMutator {
    fn describe(&self) -> String {
        format!(
            "INS_length_{}_every_{}",
            self.insertion_length, self.distance
        )
    }

    fn mutate_sequence(
        &self,
        seq: &[u8],
        rng: &mut MutationRng,
    ) -> Result<(Vec<Variant>, Vec<u8>), MutationError> {
        let d = self.distance;
        let mut variants = Vec::new();
        let mut offset = CoordinateOffset::new();

        let mut current = d.min(seq.len());
        let mut mutated = seq[..current].to_vec();

        let stop = seq.len().saturating_sub(d);
        while current < stop {
            let inserted = rng.random_bases(self.insertion_length);
            mutated.extend_from_slice(&inserted);
            mutated.extend_from_slice(&seq[current..current + d]);

            let anchor = seq[current - 1];
            let mut new_seq = vec![anchor];
            new_seq.extend_from_slice(&inserted);
            variants.push(Variant::new(
                current - 1,
                offset.project(current - 1),
                (anchor as char).to_string(),
                span_string(&new_seq),
            ));

            offset.record_insertion(self.insertion_length);
            current += d;
        }

        mutated.extend_from_slice(&seq[current..]);
        Ok((variants, mutated))
    }
}

/// Fixed-length deletions at regular spacing.
///
/// Symmetric to [`InsertionMutator`]: the walk removes `deletion_length`
/// bases at each chunk boundary, skipping any chunk whose deletion would
/// start past `len - distance`. The record's `original_seq` is the anchor
/// base plus the deleted run and `new_seq` the anchor base alone, so the
/// anchor requires a spacing of at least two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionMutator {
    distance: usize,
    deletion_length: usize,
}

impl DeletionMutator {
    pub fn new(distance: usize, deletion_length: usize) -> Result<Self, MutationError> {
        if distance < 2 {
            return Err(MutationError::InvalidDistance {
                distance,
                minimum: 2,
            });
        }
        if deletion_length == 0 {
            return Err(MutationError::InvalidLength(
                "deletion length",
                deletion_length,
            ));
        }
        Ok(Self {
            distance,
            deletion_length,
        })
    }

    #[inline]
    pub fn distance(&self) -> usize {
        self.distance
    }

    #[inline]
    pub fn deletion_length(&self) -> usize {
        self.deletion_length
    }
}

impl Mutator for DeletionMutator {
    fn describe(&self) -> String {
        format!(
            "DEL_length_{}_every_{}",
            self.deletion_length, self.distance
        )
    }

    // Deletion placement is fully determined by the parameters; nothing is
    // drawn from the stream.
    fn mutate_sequence(
        &self,
        seq: &[u8],
        _rng: &mut MutationRng,
    ) -> Result<(Vec<Variant>, Vec<u8>), MutationError> {
        let d = self.distance;
        let len = seq.len();
        let mut variants = Vec::new();
        let mut offset = CoordinateOffset::new();

        let mut current = (d - 1).min(len);
        let mut mutated = seq[..current].to_vec();

        let stop = len.saturating_sub(d);
        while current < stop {
            // Last deleted base, original coordinates.
            let deletion_end = current + self.deletion_length - 1;
            let next_start = deletion_end + d;

            let copy_from = (deletion_end + 1).min(len);
            let copy_to = next_start.min(len);
            if copy_from < copy_to {
                mutated.extend_from_slice(&seq[copy_from..copy_to]);
            }

            let removed_end = (deletion_end + 1).min(len);
            variants.push(Variant::new(
                current - 1,
                offset.project(current - 1),
                span_string(&seq[current - 1..removed_end]),
                (seq[current - 1] as char).to_string(),
            ));

            offset.record_deletion(self.deletion_length);
            current = next_start;
        }

        mutated.extend_from_slice(&seq[current.min(len)..]);
        Ok((variants, mutated))
    }
}
