use serde::{Deserialize, Serialize};

use crate::errors::MutationError;
use crate::mutate::{Mutator, Variant};
use crate::rng::MutationRng;

/// Evenly spaced single-base substitutions.
///
/// Substitution sites sit at offsets `distance - 1`, `2 * distance - 1`, …
/// while strictly below `len - distance`, so a sequence shorter than twice
/// the spacing receives no mutations. Substitutions never shift downstream
/// coordinates: every record has equal original and new positions and the
/// output length always equals the input length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnpMutator {
    distance: usize,
}

impl SnpMutator {
    /// `distance` is the spacing between consecutive substitution sites.
    pub fn new(distance: usize) -> Result<Self, MutationError> {
        if distance == 0 {
            return Err(MutationError::InvalidDistance {
                distance,
                minimum: 1,
            });
        }
        Ok(Self { distance })
    }

    #[inline]
    pub fn distance(&self) -> usize {
        self.distance
    }
}

impl Mutator for SnpMutator {
    fn describe(&self) -> String {
        format!("SNP_every_{}", self.distance)
    }

    fn mutate_sequence(
        &self,
        seq: &[u8],
        rng: &mut MutationRng,
    ) -> Result<(Vec<Variant>, Vec<u8>), MutationError> {
        let d = self.distance;
        let mut variants = Vec::new();
        let mut mutated = seq.to_vec();

        let stop = seq.len().saturating_sub(d);
        let mut site = d - 1;
        while site < stop {
            // The record stores the uppercased reference; untouched bases
            // keep their input case.
            let reference = seq[site].to_ascii_uppercase();
            let substitute = rng.substitute(reference);
            mutated[site] = substitute;
            variants.push(Variant::new(
                site,
                site,
                (reference as char).to_string(),
                (substitute as char).to_string(),
            ));
            site += d;
        }

        Ok((variants, mutated))
    }
}
