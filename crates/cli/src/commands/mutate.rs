use anyhow::{Context, Result};

use varforge_sim::batch::MutationBatch;
use varforge_sim::rng::MutationRng;

use crate::args::MutateArgs;

pub fn run(args: &MutateArgs) -> Result<()> {
    let batch = MutationBatch::from_options(
        args.snps.as_deref(),
        args.ins.as_deref(),
        args.dels.as_deref(),
        args.complex.as_deref(),
    )?;

    let mut rng = match args.seed {
        Some(seed) => MutationRng::seeded(seed),
        None => MutationRng::from_entropy(),
    };

    let created = batch
        .run_all(&args.fasta_in, &args.outprefix, args.seed, &mut rng)
        .with_context(|| format!("Failed to mutate {}", args.fasta_in.display()))?;

    for path in &created {
        println!("wrote {}", path.display());
    }
    Ok(())
}
