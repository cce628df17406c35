//! A small genetic algorithm over bit-encoded genomes,
//! built for evolving populations of simulated agents
//! in discrete, fixed-duration generations.
//!
//! Any type implementing the [`Genome`] trait can be evolved,
//! as long as it can be flattened into a fixed-length
//! [`BitString`] and rebuilt from one. Every generation:
//! - the agents are run inside a user-supplied [`Habitat`]
//!   until the epoch times out or all of them are dead,
//! - two parents are chosen by fitness-proportionate
//!   (roulette wheel) selection,
//! - their genomes are combined by single-point crossover into
//!   one child template,
//! - every agent of the next generation gets its own copy of the
//!   template, put through single-bit mutation.
//!
//! All randomness of a run comes from one seeded generator, so a
//! run is reproducible from its seed. A creature genome carrying a
//! fixed-topology feedforward network is supplied by the
//! `neuroevo-nn` crate.
//!
//! # Example usage: Evolving creatures that live as long as possible
//! ```
//! use neuroevo::{Agent, Habitat, Population, PopulationConfig, StepOutcome};
//! use neuroevo_nn::genomics::{CreatureGenome, GeneticConfig};
//! use neuroevo_nn::networks::Topology;
//! use rand::Rng;
//! use std::num::NonZeroUsize;
//!
//! /// Creatures survive as long as their network
//! /// keeps its output above one half.
//! struct Arena;
//!
//! impl Habitat<CreatureGenome> for Arena {
//!     fn step<R: Rng + ?Sized>(
//!         &mut self,
//!         agents: &mut [Agent<CreatureGenome>],
//!         dt: f32,
//!         rng: &mut R,
//!     ) {
//!         for agent in agents.iter_mut().filter(|a| a.is_alive()) {
//!             let senses = [rng.gen(), rng.gen(), f64::from(agent.genome().base_mass())];
//!             let output = agent.genome_mut().think(&senses).unwrap()[0];
//!             if output < 0.5 {
//!                 agent.kill();
//!             } else {
//!                 agent.add_fitness(dt);
//!             }
//!         }
//!     }
//! }
//!
//! fn main() {
//!     let genetic_config = GeneticConfig {
//!         topology: Topology::new(3, 4, 1).unwrap(),
//!         weight_init_scale: 2.0,
//!     };
//!     let population_config = PopulationConfig {
//!         size: NonZeroUsize::new(10).unwrap(),
//!         epoch_duration: 5.0,
//!         mutation_probability: 0.5,
//!     };
//!
//!     let mut population =
//!         Population::<CreatureGenome>::new(population_config, genetic_config, 7).unwrap();
//!     let mut arena = Arena;
//!     population.spawn(&mut arena);
//!
//!     while population.generation() < 5 {
//!         if let StepOutcome::Advanced { generation } = population.step(&mut arena, 0.1).unwrap() {
//!             let parents = population.lineage().unwrap().parent_fitness;
//!             println!("generation {} bred from {:?}", generation, parents);
//!         }
//!     }
//! }
//! ```

pub mod bits;
mod genome;
pub mod operators;
mod populations;
mod rng;

pub use bits::BitString;
pub use genome::*;
pub use populations::*;
pub use rng::{seeded_rng, EvolutionRng};
