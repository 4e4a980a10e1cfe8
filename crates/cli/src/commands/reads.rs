use anyhow::{Context, Result};

use varforge_sim::reads::iterative_simulate_reads;

use crate::args::ReadsArgs;

pub fn run(args: &ReadsArgs) -> Result<()> {
    let read_sets = iterative_simulate_reads(
        &args.fasta_in,
        &args.outprefix,
        &args.machine,
        &args.read_length,
        &args.read_depth,
        &args.fragment_length,
        args.fragment_length_sd,
        args.seed,
    )
    .with_context(|| format!("Failed to simulate reads from {}", args.fasta_in.display()))?;

    for reads in &read_sets {
        println!("wrote {} and {}", reads.fastq1.display(), reads.fastq2.display());
    }
    Ok(())
}
