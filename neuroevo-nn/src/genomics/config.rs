use crate::networks::Topology;

use serde::{Deserialize, Serialize};

use std::ops::RangeInclusive;

/// Allowed base mass of a creature.
pub const MASS_RANGE: RangeInclusive<f32> = 1.0..=50.0;
/// Allowed vision length of a creature.
pub const VISION_RANGE: RangeInclusive<f32> = 0.1..=25.0;
/// Default magnitude bound of randomly initialized weights.
pub const DEFAULT_WEIGHT_INIT_SCALE: f64 = 2.0;
/// Encoded width of each physical trait.
pub const TRAIT_FIELD_BITS: usize = 32;
/// Encoded width of each network weight.
pub const WEIGHT_FIELD_BITS: usize = 64;

/// Configuration data for creature genome generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Layer sizes of every creature's network.
    pub topology: Topology,
    /// Randomly initialized weights are drawn uniformly
    /// from `[-weight_init_scale, weight_init_scale)`.
    /// This applies both to fresh genomes and to the
    /// hidden-to-output weights, which are not inherited.
    pub weight_init_scale: f64,
}

impl GeneticConfig {
    /// Returns a configuration for the given
    /// topology with the default weight scale.
    ///
    /// # Examples
    /// ```
    /// use neuroevo_nn::genomics::{GeneticConfig, DEFAULT_WEIGHT_INIT_SCALE};
    /// use neuroevo_nn::networks::Topology;
    ///
    /// let config = GeneticConfig::new(Topology::new(5, 8, 2).unwrap());
    /// assert_eq!(config.weight_init_scale, DEFAULT_WEIGHT_INIT_SCALE);
    /// ```
    pub const fn new(topology: Topology) -> GeneticConfig {
        GeneticConfig {
            topology,
            weight_init_scale: DEFAULT_WEIGHT_INIT_SCALE,
        }
    }

    /// Returns a configuration with the smallest
    /// possible topology and all-zero weights.
    /// Useful for overriding only a few fields.
    ///
    /// # Examples
    /// ```
    /// use neuroevo_nn::genomics::GeneticConfig;
    /// use neuroevo_nn::networks::Topology;
    ///
    /// let config = GeneticConfig {
    ///     topology: Topology::new(2, 2, 2).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    /// assert_eq!(config.weight_init_scale, 0.0);
    /// ```
    pub const fn zero() -> GeneticConfig {
        GeneticConfig {
            topology: Topology::minimal(),
            weight_init_scale: 0.0,
        }
    }
}
