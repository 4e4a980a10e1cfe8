mod args;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use args::{MutateArgs, ReadsArgs};

/// varforge: simulate mutations in genomes.
///
/// Injects SNPs, indels, or clustered variants into a reference FASTA and
/// writes the mutated sequences together with ground-truth VCFs; can also
/// simulate Illumina reads from any FASTA via ART.
#[derive(Parser, Debug)]
#[command(name = "varforge")]
#[command(author, version, about = "Simulate mutations in genomes", long_about = None)]
struct Cli {
    /// Debug mode (more verbose logging)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mutate a FASTA file and write ground-truth VCFs.
    ///
    /// Each requested parameter group runs independently against the
    /// untouched input and produces its own FASTA plus two VCFs (original
    /// and mutated coordinates).
    MutateFasta(Box<MutateArgs>),

    /// Simulate Illumina reads from a FASTA file.
    ///
    /// Requires `art_illumina` on PATH. Sweeps the product of the supplied
    /// machine/length/depth/fragment-length lists.
    SimulateReads(Box<ReadsArgs>),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::MutateFasta(args) => commands::mutate::run(&args),
        Commands::SimulateReads(args) => commands::reads::run(&args),
    }
}
