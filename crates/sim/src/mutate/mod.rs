//! Mutation strategies and the coordinate bookkeeping they share.
//!
//! Each strategy walks one sequence left to right, producing a mutated copy
//! plus an ordered list of [`Variant`] records. Insertions and deletions
//! shift every downstream coordinate, so the strategies thread a
//! [`CoordinateOffset`] through the walk to keep the original-space and
//! mutated-space positions of each record consistent.

mod complex;
mod indel;
mod snp;

pub use complex::ComplexMutator;
pub use indel::{DeletionMutator, InsertionMutator};
pub use snp::SnpMutator;

use crate::errors::MutationError;
use crate::rng::MutationRng;

/// One ground-truth edit, described in both coordinate spaces.
///
/// `original_seq` and `new_seq` describe the same edit in opposite
/// directions: splicing `new_seq` over the `original_seq` span at
/// `original_position` reproduces the mutated sequence at that region, and
/// the inverse holds for the mutated-sequence view. Positions are
/// zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub original_position: usize,
    pub new_position: usize,
    pub original_seq: String,
    pub new_seq: String,
}

impl Variant {
    pub fn new(
        original_position: usize,
        new_position: usize,
        original_seq: impl Into<String>,
        new_seq: impl Into<String>,
    ) -> Self {
        Self {
            original_position,
            new_position,
            original_seq: original_seq.into(),
            new_seq: new_seq.into(),
        }
    }
}

/// A mutation strategy.
///
/// A strategy is constructed once per parameter set and then applied to any
/// number of sequences; every call is independent and retains no state
/// beyond the fixed parameters. The input sequence is never modified.
pub trait Mutator {
    /// Machine-parsable tag naming the mutation type and its parameters,
    /// e.g. `SNP_every_30` or `DEL_length_5_every_250`.
    fn describe(&self) -> String;

    /// Mutate one sequence, returning the variant records in ascending
    /// `original_position` order together with the mutated copy.
    fn mutate_sequence(
        &self,
        seq: &[u8],
        rng: &mut MutationRng,
    ) -> Result<(Vec<Variant>, Vec<u8>), MutationError>;
}

/// Running difference between mutated and original coordinates while a
/// strategy scans a sequence left to right.
///
/// Recomputed from scratch for every sequence; strictly monotone in the
/// sense that edits are recorded in ascending original position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinateOffset {
    inserted: usize,
    deleted: usize,
}

impl CoordinateOffset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for `bases` inserted at the current walk position.
    #[inline]
    pub fn record_insertion(&mut self, bases: usize) {
        self.inserted += bases;
    }

    /// Account for `bases` deleted at the current walk position.
    #[inline]
    pub fn record_deletion(&mut self, bases: usize) {
        self.deleted += bases;
    }

    /// Map an original-space offset to its mutated-space offset, given the
    /// edits recorded so far. Saturates at zero; with the supported
    /// parameter ranges the deleted total never overtakes the projected
    /// position.
    #[inline]
    pub fn project(&self, original: usize) -> usize {
        (original + self.inserted).saturating_sub(self.deleted)
    }

    /// Net shift in bases, positive when insertions dominate.
    #[inline]
    pub fn shift(&self) -> i64 {
        self.inserted as i64 - self.deleted as i64
    }
}

/// Build the string form of a sequence span for a variant record.
#[inline]
pub(crate) fn span_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
