mod errors;

pub use errors::GenomeLengthMismatch;

use crate::BitString;

use rand::Rng;

/// An interface for genomes that can be evolved by
/// the bit-level genetic operators.
///
/// A genome is the evolvable, serializable subset of
/// an agent's state. It must be losslessly expressible
/// as a fixed-length [`BitString`] for a given config,
/// so that any two genomes built from the same config
/// can be crossed over.
pub trait Genome: Sized {
    type Config;

    /// Returns a randomized genome, as used for the
    /// first generation of a population.
    fn new<R: Rng + ?Sized>(config: &Self::Config, rng: &mut R) -> Self;

    /// Encodes the genome as a flat bit sequence.
    fn to_bits(&self) -> BitString;

    /// Replaces the genome's state with the one
    /// encoded in `bits`.
    ///
    /// Implementations should leave the genome
    /// untouched when returning an error.
    fn set_bits<R: Rng + ?Sized>(
        &mut self,
        bits: &BitString,
        rng: &mut R,
    ) -> Result<(), GenomeLengthMismatch>;

    /// Length of the bit sequence returned by [`to_bits`].
    ///
    /// [`to_bits`]: Genome::to_bits
    fn bit_len(&self) -> usize;

    /// Spawns a genome and decodes `bits` into it.
    fn from_bits<R: Rng + ?Sized>(
        bits: &BitString,
        config: &Self::Config,
        rng: &mut R,
    ) -> Result<Self, GenomeLengthMismatch> {
        let mut genome = Self::new(config, rng);
        genome.set_bits(bits, rng)?;
        Ok(genome)
    }
}
