//! Rendering of mutation runs: the mutated FASTA and the two ground-truth
//! VCF tables, one per coordinate space.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use bio::io::fasta;

use crate::base::SeqRecord;
use crate::errors::EmitError;
use crate::mutate::{Mutator, Variant};
use crate::rng::MutationRng;

/// Token separating the original identifier from the mutation description
/// in mutated FASTA headers.
pub const ID_MARKER: &str = "__varforge__";

/// Which genome's coordinates a VCF table is expressed in.
///
/// The original-space table reports REF as the original bases and ALT as
/// the replacement; the mutated-space table swaps the roles, so that either
/// genome can serve as the reference for downstream comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSpace {
    Original,
    Mutated,
}

impl CoordinateSpace {
    fn genome_name(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Mutated => "mutated",
        }
    }
}

/// The identifier given to a mutated copy of `id`.
pub fn mutated_id(id: &str, description: &str) -> String {
    format!("{id}{ID_MARKER}{description}")
}

fn vcf_source_line(description: &str, space: CoordinateSpace) -> String {
    format!(
        "##source=varforge, ref in this file is {} genome. Mutations added: {description}",
        space.genome_name()
    )
}

/// Write the VCF header block: format version, provenance, one contig line
/// per sequence in sorted-identifier order, and the column header.
pub fn write_vcf_header<W: Write>(
    mut out: W,
    description: &str,
    seq_lengths: &BTreeMap<String, usize>,
    space: CoordinateSpace,
) -> io::Result<()> {
    writeln!(out, "##fileformat=VCFv4.2")?;
    writeln!(out, "{}", vcf_source_line(description, space))?;
    for (name, length) in seq_lengths {
        writeln!(out, "##contig=<ID={name},length={length}>")?;
    }
    writeln!(
        out,
        "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tsample"
    )
}

/// Write one data row. Positions are 1-based in the output; REF/ALT swap
/// roles between the two coordinate spaces.
pub fn write_vcf_row<W: Write>(
    mut out: W,
    chrom: &str,
    variant: &Variant,
    space: CoordinateSpace,
) -> io::Result<()> {
    let (pos, reference, alternate) = match space {
        CoordinateSpace::Original => (
            variant.original_position + 1,
            &variant.original_seq,
            &variant.new_seq,
        ),
        CoordinateSpace::Mutated => (
            variant.new_position + 1,
            &variant.new_seq,
            &variant.original_seq,
        ),
    };
    writeln!(
        out,
        "{chrom}\t{pos}\t.\t{reference}\t{alternate}\t.\tPASS\t.\tGT\t1/1"
    )
}

/// Run `mutator` over every sequence of a FASTA file and write the three
/// outputs: the mutated FASTA and the ground-truth VCFs in original and
/// mutated coordinates.
///
/// Sequences are mutated and written in input order; the VCF tables list
/// them in sorted-identifier order. Any failure propagates immediately and
/// no partial output is considered valid.
pub fn mutate_fasta_files(
    mutator: &dyn Mutator,
    rng: &mut MutationRng,
    fasta_in: &Path,
    fasta_out: &Path,
    vcf_out_original: &Path,
    vcf_out_mutated: &Path,
) -> Result<(), EmitError> {
    let description = mutator.describe();
    let reader = fasta::Reader::new(File::open(fasta_in)?);
    let mut fasta_writer = fasta::Writer::new(File::create(fasta_out)?);

    let mut original_lengths = BTreeMap::new();
    let mut mutated_lengths = BTreeMap::new();
    let mut all_variants: BTreeMap<(String, String), Vec<Variant>> = BTreeMap::new();

    for result in reader.records() {
        let record = result?;
        let record = SeqRecord::from(&record);
        let (variants, mutated_seq) = mutator.mutate_sequence(&record.seq, rng)?;

        let out_id = mutated_id(&record.id, &description);
        fasta_writer.write(&out_id, None, &mutated_seq)?;

        original_lengths.insert(record.id.clone(), record.len());
        mutated_lengths.insert(out_id.clone(), mutated_seq.len());
        all_variants.insert((record.id, out_id), variants);
    }
    fasta_writer.flush()?;

    let mut vcf_original = BufWriter::new(File::create(vcf_out_original)?);
    let mut vcf_mutated = BufWriter::new(File::create(vcf_out_mutated)?);
    write_vcf_header(
        &mut vcf_original,
        &description,
        &original_lengths,
        CoordinateSpace::Original,
    )?;
    write_vcf_header(
        &mut vcf_mutated,
        &description,
        &mutated_lengths,
        CoordinateSpace::Mutated,
    )?;

    for ((seq_id, out_id), variants) in &all_variants {
        for variant in variants {
            write_vcf_row(&mut vcf_mutated, out_id, variant, CoordinateSpace::Mutated)?;
            write_vcf_row(&mut vcf_original, seq_id, variant, CoordinateSpace::Original)?;
        }
    }
    vcf_original.flush()?;
    vcf_mutated.flush()?;

    Ok(())
}
