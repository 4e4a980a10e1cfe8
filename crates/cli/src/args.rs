use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct MutateArgs {
    /// Seed for the random number generator. Use this option for
    /// reproducibility, otherwise the generator is seeded from OS entropy.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Comma-separated list of distances between SNPs
    #[arg(long, value_name = "INT[,INT,...]")]
    pub snps: Option<String>,

    /// Comma-separated list of <distance between deletions>:<deletion length>
    #[arg(long, value_name = "INT1:INT2[,INT3:INT4,...]")]
    pub dels: Option<String>,

    /// Comma-separated list of <distance between insertions>:<insertion length>
    #[arg(long, value_name = "INT1:INT2[,INT3:INT4,...]")]
    pub ins: Option<String>,

    /// Comma-separated list of dist:len:s:ins:del:mi, where: dist=distance
    /// between each cluster; len=length of each cluster; s=number of SNPs;
    /// ins=number of insertions; del=number of deletions; mi=max indel length
    #[arg(long, value_name = "LIST1[,LIST2,...]")]
    pub complex: Option<String>,

    /// FASTA filename of genome to be mutated
    pub fasta_in: PathBuf,

    /// Prefix of output files
    pub outprefix: String,
}

#[derive(Args, Debug)]
pub struct ReadsArgs {
    /// Seed for the read simulator's random number generator
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Sequencing machine profiles
    #[arg(long, num_args = 1.., value_name = "MACHINE", default_values_t = vec!["HS25".to_string()])]
    pub machine: Vec<String>,

    /// Read lengths
    #[arg(long, num_args = 1.., value_name = "INT", default_values_t = vec![150])]
    pub read_length: Vec<usize>,

    /// Read depths
    #[arg(long, num_args = 1.., value_name = "INT", default_values_t = vec![50])]
    pub read_depth: Vec<usize>,

    /// Mean fragment lengths
    #[arg(long, num_args = 1.., value_name = "INT", default_values_t = vec![500])]
    pub fragment_length: Vec<usize>,

    /// Fragment length standard deviation
    #[arg(long, value_name = "INT", default_value_t = 25)]
    pub fragment_length_sd: usize,

    /// FASTA filename from which to simulate reads
    pub fasta_in: PathBuf,

    /// Prefix of output files
    pub outprefix: String,
}
