//! # varforge-sim
//!
//! Core library for varforge, a generator of synthetic genetic variation
//! for benchmarking genomics tools. Given a reference sequence it injects
//! point substitutions, insertions, deletions, or clustered combinations at
//! regular intervals, and emits both the mutated sequence and ground-truth
//! variant records describing exactly what changed and where, in the
//! original and the mutated coordinate spaces.

pub mod base;
pub mod batch;
pub mod errors;
pub mod mutate;
pub mod output;
pub mod prelude;
pub mod reads;
pub mod rng;

// Re-export the types most consumers touch, available as
// `varforge_sim::Mutator`, `varforge_sim::Variant`, etc.
pub use base::{Nucleotide, SeqRecord};
pub use mutate::{Mutator, Variant};
pub use rng::MutationRng;
