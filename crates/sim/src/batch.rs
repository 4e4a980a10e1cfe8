//! The batch driver: parses the mutation mini-language, runs every
//! parameter set against the pristine input, and names outputs after the
//! parameters used.
//!
//! Each group is applied independently to the untouched input sequences;
//! mutation types never compose onto one output. Malformed option strings
//! are rejected here and never reach the mutation engine.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::BatchError;
use crate::mutate::{ComplexMutator, DeletionMutator, InsertionMutator, Mutator, SnpMutator};
use crate::output;
use crate::rng::MutationRng;

/// One `dist:len` group from the `--ins` or `--dels` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndelParams {
    pub distance: usize,
    pub length: usize,
}

/// One `dist:len:snps:ins:dels:max_indel` group from `--complex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexParams {
    pub distance: usize,
    pub cluster_length: usize,
    pub snps: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub max_indel_length: usize,
}

fn parse_fields(
    option: &'static str,
    value: &str,
    group: &str,
    expected: usize,
) -> Result<Vec<usize>, BatchError> {
    let fields: Vec<usize> = group
        .split(':')
        .map(|field| field.trim().parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|_| BatchError::BadOption {
            option,
            value: value.to_string(),
        })?;
    if fields.len() != expected {
        return Err(BatchError::BadOption {
            option,
            value: value.to_string(),
        });
    }
    Ok(fields)
}

/// Parse `--snps`: a comma-separated list of distances.
pub fn parse_snp_option(value: &str) -> Result<Vec<usize>, BatchError> {
    value
        .split(',')
        .map(|group| Ok(parse_fields("--snps", value, group, 1)?[0]))
        .collect()
}

/// Parse `--ins` or `--dels`: comma-separated `dist:len` groups.
pub fn parse_indel_option(
    option: &'static str,
    value: &str,
) -> Result<Vec<IndelParams>, BatchError> {
    value
        .split(',')
        .map(|group| {
            let fields = parse_fields(option, value, group, 2)?;
            Ok(IndelParams {
                distance: fields[0],
                length: fields[1],
            })
        })
        .collect()
}

/// Parse `--complex`: comma-separated `dist:len:snps:ins:dels:max_indel`
/// groups.
pub fn parse_complex_option(value: &str) -> Result<Vec<ComplexParams>, BatchError> {
    value
        .split(',')
        .map(|group| {
            let fields = parse_fields("--complex", value, group, 6)?;
            Ok(ComplexParams {
                distance: fields[0],
                cluster_length: fields[1],
                snps: fields[2],
                insertions: fields[3],
                deletions: fields[4],
                max_indel_length: fields[5],
            })
        })
        .collect()
}

/// Every mutation parameter group requested for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationBatch {
    pub snps: Vec<usize>,
    pub insertions: Vec<IndelParams>,
    pub deletions: Vec<IndelParams>,
    pub complex: Vec<ComplexParams>,
}

impl MutationBatch {
    /// Build a batch from the raw option strings. At least one option must
    /// be present.
    pub fn from_options(
        snps: Option<&str>,
        ins: Option<&str>,
        dels: Option<&str>,
        complex: Option<&str>,
    ) -> Result<Self, BatchError> {
        let batch = Self {
            snps: snps.map(parse_snp_option).transpose()?.unwrap_or_default(),
            insertions: ins
                .map(|value| parse_indel_option("--ins", value))
                .transpose()?
                .unwrap_or_default(),
            deletions: dels
                .map(|value| parse_indel_option("--dels", value))
                .transpose()?
                .unwrap_or_default(),
            complex: complex.map(parse_complex_option).transpose()?.unwrap_or_default(),
        };
        if batch.is_empty() {
            return Err(BatchError::NoMutationsRequested);
        }
        Ok(batch)
    }

    pub fn is_empty(&self) -> bool {
        self.snps.is_empty()
            && self.insertions.is_empty()
            && self.deletions.is_empty()
            && self.complex.is_empty()
    }

    /// Run every parameter group against the pristine input, writing one
    /// output trio (FASTA + two VCFs) per group. Returns the created paths.
    ///
    /// When a seed is supplied the shared stream is reseeded before each
    /// group, so every group's output is reproducible on its own.
    pub fn run_all(
        &self,
        fasta_in: &Path,
        outprefix: &str,
        seed: Option<u64>,
        rng: &mut MutationRng,
    ) -> Result<Vec<PathBuf>, BatchError> {
        let mut created = Vec::new();

        for &distance in &self.snps {
            let mutator = SnpMutator::new(distance)?;
            let tags = [("dist", distance)];
            run_one(&mutator, "snp", &tags, fasta_in, outprefix, seed, rng, &mut created)?;
        }
        for params in &self.insertions {
            let mutator = InsertionMutator::new(params.distance, params.length)?;
            let tags = [("dist", params.distance), ("len", params.length)];
            run_one(
                &mutator,
                "insertion",
                &tags,
                fasta_in,
                outprefix,
                seed,
                rng,
                &mut created,
            )?;
        }
        for params in &self.deletions {
            let mutator = DeletionMutator::new(params.distance, params.length)?;
            let tags = [("dist", params.distance), ("len", params.length)];
            run_one(
                &mutator,
                "deletion",
                &tags,
                fasta_in,
                outprefix,
                seed,
                rng,
                &mut created,
            )?;
        }
        for params in &self.complex {
            let mutator = ComplexMutator::new(
                params.distance,
                params.cluster_length,
                params.snps,
                params.deletions,
                params.insertions,
                params.max_indel_length,
            )?;
            // Tag keys sorted alphabetically, matching the filename scheme
            // of the other mutation types.
            let tags = [
                ("del", params.deletions),
                ("dist", params.distance),
                ("ins", params.insertions),
                ("len", params.cluster_length),
                ("max_indel_len", params.max_indel_length),
                ("snp", params.snps),
            ];
            run_one(
                &mutator,
                "complex",
                &tags,
                fasta_in,
                outprefix,
                seed,
                rng,
                &mut created,
            )?;
        }

        Ok(created)
    }
}

/// Derive the per-group output prefix:
/// `{outprefix}.{kind}.{key-value tags joined with '.'}`.
pub fn group_output_prefix(outprefix: &str, kind: &str, tags: &[(&str, usize)]) -> String {
    let tag_string = tags
        .iter()
        .map(|(key, value)| format!("{key}-{value}"))
        .collect::<Vec<_>>()
        .join(".");
    format!("{outprefix}.{kind}.{tag_string}")
}

#[allow(clippy::too_many_arguments)]
fn run_one(
    mutator: &dyn Mutator,
    kind: &str,
    tags: &[(&str, usize)],
    fasta_in: &Path,
    outprefix: &str,
    seed: Option<u64>,
    rng: &mut MutationRng,
    created: &mut Vec<PathBuf>,
) -> Result<(), BatchError> {
    // Last seed wins and applies only to future draws; reseeding per group
    // makes each group reproducible independently of the ones before it.
    if let Some(seed) = seed {
        rng.reseed(seed);
    }
    info!(
        "Simulating mutations of type '{kind}' with parameters {}",
        mutator.describe()
    );

    let prefix = group_output_prefix(outprefix, kind, tags);
    let fasta_out = PathBuf::from(format!("{prefix}.fa"));
    let vcf_original = PathBuf::from(format!("{prefix}.original.vcf"));
    let vcf_mutated = PathBuf::from(format!("{prefix}.mutated.vcf"));

    output::mutate_fasta_files(mutator, rng, fasta_in, &fasta_out, &vcf_original, &vcf_mutated)?;
    created.extend([fasta_out, vcf_original, vcf_mutated]);
    Ok(())
}
