//! The creature genome: two physical traits plus
//! the weights of a feedforward network.
mod config;

pub use config::*;

use crate::networks::{FeedforwardNetwork, NetworkError};

use neuroevo::{BitString, Genome, GenomeLengthMismatch};

use rand::Rng;

use std::fmt;
use std::ops::RangeInclusive;

/// A creature's heritable makeup.
///
/// Encodes to `[base_mass: 32][vision_length: 32][input weights: 64 each]`,
/// every field as the MSB-first IEEE-754 representation of its value.
/// Hidden-to-output weights are not part of the encoding; decoding
/// draws them afresh.
#[derive(Clone, Debug, PartialEq)]
pub struct CreatureGenome {
    base_mass: f32,
    vision_length: f32,
    network: FeedforwardNetwork,
    weight_init_scale: f64,
}

impl CreatureGenome {
    /// Returns a genome with the given traits, clamped into
    /// [`MASS_RANGE`] and [`VISION_RANGE`], and a randomly
    /// initialized network.
    ///
    /// # Examples
    /// ```
    /// use neuroevo_nn::genomics::{CreatureGenome, GeneticConfig};
    ///
    /// let mut rng = neuroevo::seeded_rng(0);
    /// let genome = CreatureGenome::with_traits(100.0, 3.5, &GeneticConfig::zero(), &mut rng);
    ///
    /// assert_eq!(genome.base_mass(), 50.0);
    /// assert_eq!(genome.vision_length(), 3.5);
    /// ```
    pub fn with_traits<R: Rng + ?Sized>(
        base_mass: f32,
        vision_length: f32,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> CreatureGenome {
        CreatureGenome {
            base_mass: clamp_trait(base_mass, &MASS_RANGE),
            vision_length: clamp_trait(vision_length, &VISION_RANGE),
            network: FeedforwardNetwork::new(config.topology, config.weight_init_scale, rng),
            weight_init_scale: config.weight_init_scale,
        }
    }

    pub fn base_mass(&self) -> f32 {
        self.base_mass
    }

    pub fn vision_length(&self) -> f32 {
        self.vision_length
    }

    pub fn network(&self) -> &FeedforwardNetwork {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut FeedforwardNetwork {
        &mut self.network
    }

    /// Feeds the creature's senses through its network.
    /// See [`FeedforwardNetwork::feed_forward`].
    pub fn think(&mut self, senses: &[f64]) -> Result<&[f64], NetworkError> {
        self.network.feed_forward(senses)
    }
}

impl Genome for CreatureGenome {
    type Config = GeneticConfig;

    /// Returns a genome with traits drawn uniformly
    /// from their allowed ranges and a random network.
    fn new<R: Rng + ?Sized>(config: &GeneticConfig, rng: &mut R) -> CreatureGenome {
        let base_mass = rng.gen_range(MASS_RANGE);
        let vision_length = rng.gen_range(VISION_RANGE);
        CreatureGenome::with_traits(base_mass, vision_length, config, rng)
    }

    /// # Examples
    /// ```
    /// use neuroevo::Genome;
    /// use neuroevo_nn::genomics::{CreatureGenome, GeneticConfig};
    /// use neuroevo_nn::networks::Topology;
    ///
    /// let mut rng = neuroevo::seeded_rng(1);
    /// let config = GeneticConfig::new(Topology::new(3, 3, 1).unwrap());
    /// let genome = CreatureGenome::with_traits(12.5, 4.0, &config, &mut rng);
    ///
    /// let bits = genome.to_bits();
    /// assert_eq!(bits.len(), 32 + 32 + 12 * 64);
    /// assert_eq!(bits.reader().read_f32(), Some(12.5));
    /// ```
    fn to_bits(&self) -> BitString {
        let mut bits = BitString::with_capacity(self.bit_len());
        bits.push_f32(self.base_mass);
        bits.push_f32(self.vision_length);
        for &weight in self.network.input_weights() {
            bits.push_f64(weight);
        }
        bits
    }

    /// Replaces traits and input-to-hidden weights with the values
    /// encoded in `bits`. Decoded traits are clamped into their
    /// allowed ranges, NaN decoding to the range minimum. Decoded
    /// weights are kept verbatim. Hidden-to-output weights are
    /// re-randomized.
    ///
    /// On error the genome is left unchanged.
    fn set_bits<R: Rng + ?Sized>(
        &mut self,
        bits: &BitString,
        rng: &mut R,
    ) -> Result<(), GenomeLengthMismatch> {
        let mismatch = GenomeLengthMismatch {
            expected: self.bit_len(),
            found: bits.len(),
        };
        if mismatch.expected != mismatch.found {
            return Err(mismatch);
        }

        let mut reader = bits.reader();
        let base_mass = reader.read_f32().ok_or(mismatch)?;
        let vision_length = reader.read_f32().ok_or(mismatch)?;
        let input_weights = (0..self.network.input_weights().len())
            .map(|_| reader.read_f64().ok_or(mismatch))
            .collect::<Result<Vec<_>, _>>()?;
        let network = FeedforwardNetwork::with_input_weights(
            self.network.topology(),
            input_weights,
            self.weight_init_scale,
            rng,
        )
        .map_err(|_| mismatch)?;

        self.base_mass = clamp_trait(base_mass, &MASS_RANGE);
        self.vision_length = clamp_trait(vision_length, &VISION_RANGE);
        self.network = network;
        Ok(())
    }

    fn bit_len(&self) -> usize {
        2 * TRAIT_FIELD_BITS + WEIGHT_FIELD_BITS * self.network.input_weights().len()
    }
}

impl fmt::Display for CreatureGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let topology = self.network.topology();
        write!(
            f,
            "CreatureGenome {{ mass: {}, vision: {}, network: {}-{}-{} }}",
            self.base_mass,
            self.vision_length,
            topology.input_count,
            topology.hidden_count,
            topology.output_count,
        )
    }
}

/// Clamps `value` into `range`; NaN maps to the range minimum.
fn clamp_trait(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}
