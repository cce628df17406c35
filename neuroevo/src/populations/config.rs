use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for population generation
/// and evolution.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Using
/// values that are not in this bound may result
/// in odd behaviours and/or incorrect programs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of agents in every generation.
    /// Must be at least 2 for parents to be selected.
    pub size: NonZeroUsize,
    /// Simulated time after which an epoch ends,
    /// even if some agents are still alive.
    pub epoch_duration: f32,
    /// Chance that a child copy is left *unmutated*.
    /// See [`mutate`].
    ///
    /// [`mutate`]: crate::operators::mutate
    pub mutation_probability: f32,
}

impl PopulationConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments:
    /// a population of one agent can't select two parents.
    /// It is meant as a way to abbreviate configuration
    /// instantiation, or to fill in unused values.
    ///
    /// # Examples
    /// ```
    /// use neuroevo::PopulationConfig;
    ///
    /// let cfg1 = PopulationConfig::zero();
    ///
    /// let cfg2 = PopulationConfig {
    ///     // Specify some values here...
    ///     epoch_duration: 30.0,
    ///     // Default the rest...
    ///     ..PopulationConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::MIN,
            epoch_duration: 0.0,
            mutation_probability: 0.0,
        }
    }
}
