//! Convenient re-exports for typical use of the library.

pub use crate::base::{Nucleotide, SeqRecord};
pub use crate::batch::{ComplexParams, IndelParams, MutationBatch};
pub use crate::errors::{BatchError, EmitError, MutationError, ReadSimError};
pub use crate::mutate::{
    ComplexMutator, CoordinateOffset, DeletionMutator, InsertionMutator, Mutator, SnpMutator,
    Variant,
};
pub use crate::output::{mutate_fasta_files, CoordinateSpace};
pub use crate::reads::{
    iterative_simulate_reads, simulate_illumina_paired_reads, ReadSimParams, SimulatedReads,
};
pub use crate::rng::MutationRng;
