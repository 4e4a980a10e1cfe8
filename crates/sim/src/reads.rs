//! Illumina read simulation on top of mutated references.
//!
//! This drives the external ART simulator (`art_illumina`) as a subprocess
//! and packages its output: the tool must be on PATH. Get it like this:
//!
//! ```text
//! wget https://www.niehs.nih.gov/research/resources/assets/docs/artbinmountrainier20160605linux64tgz.tgz
//! tar xf artbinmountrainier20160605linux64tgz.tgz
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::Command;

use flate2::write::GzEncoder;
use flate2::Compression;
use itertools::iproduct;
use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::ReadSimError;

const ART_EXECUTABLE: &str = "art_illumina";

/// Parameters for one paired-end simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadSimParams {
    pub sequencing_machine: String,
    pub read_length: usize,
    pub read_depth: usize,
    pub mean_fragment_length: usize,
    pub fragment_length_sd: usize,
    pub random_seed: Option<u64>,
}

impl Default for ReadSimParams {
    fn default() -> Self {
        Self {
            sequencing_machine: "HS25".to_string(),
            read_length: 150,
            read_depth: 50,
            mean_fragment_length: 500,
            fragment_length_sd: 25,
            random_seed: Some(42),
        }
    }
}

/// Metadata for one simulated read set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedReads {
    pub fastq1: PathBuf,
    pub fastq2: PathBuf,
    pub machine: String,
    pub read_length: usize,
    pub read_depth: usize,
    pub fragment_length: usize,
    pub fragment_length_sd: usize,
}

/// The argument list handed to `art_illumina`.
fn art_command_args(ref_fasta: &Path, out_prefix: &Path, params: &ReadSimParams) -> Vec<String> {
    let mut args = vec![
        "--in".to_string(),
        ref_fasta.display().to_string(),
        "--out".to_string(),
        out_prefix.display().to_string(),
        // No alignment file; only the FASTQ pair is wanted.
        "--noALN".to_string(),
        "--seqSys".to_string(),
        params.sequencing_machine.clone(),
        "--len".to_string(),
        params.read_length.to_string(),
        "--fcov".to_string(),
        params.read_depth.to_string(),
        "--mflen".to_string(),
        params.mean_fragment_length.to_string(),
        "--sdev".to_string(),
        params.fragment_length_sd.to_string(),
    ];
    if let Some(seed) = params.random_seed {
        args.push("--rndSeed".to_string());
        args.push(seed.to_string());
    }
    args
}

/// Run a command, logging it and failing hard on a nonzero exit status.
fn run_command(program: &str, args: &[String]) -> Result<std::process::Output, ReadSimError> {
    let rendered = format!("{program} {}", args.join(" "));
    info!("Run command: {rendered}");

    let output = Command::new(program).args(args).output().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ReadSimError::ExecutableNotFound(program.to_string())
        } else {
            ReadSimError::Io(e)
        }
    })?;

    info!("Return code: {:?}", output.status.code());
    if !output.status.success() {
        return Err(ReadSimError::CommandFailed {
            command: rendered,
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(output)
}

/// Gzip `path` at best compression, returning the `.gz` path.
fn gzip_file(path: &Path) -> Result<PathBuf, ReadSimError> {
    let gz_path = PathBuf::from(format!("{}.gz", path.display()));
    let mut input = File::open(path)?;
    let mut encoder = GzEncoder::new(
        BufWriter::new(File::create(&gz_path)?),
        Compression::best(),
    );
    io::copy(&mut input, &mut encoder)?;
    encoder.try_finish()?;
    Ok(gz_path)
}

/// Simulate Illumina paired-end reads from a FASTA file with ART.
///
/// ART writes into a scratch directory created next to the outputs; its
/// FASTQ pair is renamed to `{outprefix}.1.fq` / `{outprefix}.2.fq` and
/// gzipped. Returns the two `.fq.gz` paths.
pub fn simulate_illumina_paired_reads(
    ref_fasta: &Path,
    outprefix: &str,
    params: &ReadSimParams,
) -> Result<(PathBuf, PathBuf), ReadSimError> {
    let scratch = tempfile::Builder::new()
        .prefix(&format!("{outprefix}."))
        .tempdir_in(".")?;
    let tmp_prefix = scratch.path().join("out");

    let args = art_command_args(ref_fasta, &tmp_prefix, params);
    run_command(ART_EXECUTABLE, &args)?;

    let package_mate = |mate: &str| -> Result<PathBuf, ReadSimError> {
        let produced = scratch.path().join(format!("out{mate}.fq"));
        let final_fq = PathBuf::from(format!("{outprefix}.{mate}.fq"));
        fs::rename(&produced, &final_fq)?;
        let gz = gzip_file(&final_fq)?;
        fs::remove_file(&final_fq)?;
        Ok(gz)
    };

    let fastq1 = package_mate("1")?;
    let fastq2 = package_mate("2")?;
    Ok((fastq1, fastq2))
}

/// Sweep the cartesian product of machines, read lengths, depths, and
/// fragment lengths, simulating one read set per combination.
#[allow(clippy::too_many_arguments)]
pub fn iterative_simulate_reads(
    ref_fasta: &Path,
    outprefix: &str,
    machines: &[String],
    read_lengths: &[usize],
    read_depths: &[usize],
    fragment_lengths: &[usize],
    fragment_length_sd: usize,
    random_seed: Option<u64>,
) -> Result<Vec<SimulatedReads>, ReadSimError> {
    let mut files = Vec::new();

    for (machine, &read_length, &read_depth, &fragment_length) in
        iproduct!(machines, read_lengths, read_depths, fragment_lengths)
    {
        let this_prefix = format!(
            "{outprefix}.{machine}.{read_length}.{read_depth}.{fragment_length}.{fragment_length_sd}"
        );
        info!(
            "Simulate reads. ref={}, machine={machine}, read length={read_length}, \
             read depth={read_depth}, fragment length={fragment_length}, \
             fragment length sd={fragment_length_sd}",
            ref_fasta.display()
        );

        let params = ReadSimParams {
            sequencing_machine: machine.clone(),
            read_length,
            read_depth,
            mean_fragment_length: fragment_length,
            fragment_length_sd,
            random_seed,
        };
        let (fastq1, fastq2) = simulate_illumina_paired_reads(ref_fasta, &this_prefix, &params)?;

        files.push(SimulatedReads {
            fastq1,
            fastq2,
            machine: machine.clone(),
            read_length,
            read_depth,
            fragment_length,
            fragment_length_sd,
        });
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_art_command_args() {
        let params = ReadSimParams::default();
        let args = art_command_args(Path::new("ref.fa"), Path::new("/tmp/x/out"), &params);
        assert_eq!(
            args,
            vec![
                "--in", "ref.fa", "--out", "/tmp/x/out", "--noALN", "--seqSys", "HS25", "--len",
                "150", "--fcov", "50", "--mflen", "500", "--sdev", "25", "--rndSeed", "42",
            ]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_art_command_args_no_seed() {
        let params = ReadSimParams {
            random_seed: None,
            ..ReadSimParams::default()
        };
        let args = art_command_args(Path::new("ref.fa"), Path::new("out"), &params);
        assert!(!args.contains(&"--rndSeed".to_string()));
    }

    #[test]
    fn test_run_command_missing_executable() {
        let err = run_command("varforge_no_such_program", &[]).unwrap_err();
        match err {
            ReadSimError::ExecutableNotFound(name) => {
                assert_eq!(name, "varforge_no_such_program");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_run_command_nonzero_exit() {
        let err = run_command("false", &[]).unwrap_err();
        assert!(matches!(err, ReadSimError::CommandFailed { .. }));
    }

    #[test]
    fn test_gzip_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fq");
        fs::write(&path, "@read1\nACGT\n+\nIIII\n").unwrap();

        let gz_path = gzip_file(&path).unwrap();
        assert_eq!(gz_path, dir.path().join("reads.fq.gz"));

        let mut decoder = GzDecoder::new(File::open(&gz_path).unwrap());
        let mut text = String::new();
        decoder.read_to_string(&mut text).unwrap();
        assert_eq!(text, "@read1\nACGT\n+\nIIII\n");
    }
}
