//! # neuroevo-nn
//! A creature genome for the `neuroevo` crate's `Genome` trait,
//! carrying two physical traits and a fixed-topology
//! feedforward network.
//!
//! Provides:
//! - [`CreatureGenome`]: base mass, vision length and the network,
//!   encodable to and decodable from a `BitString`.
//! - [`FeedforwardNetwork`]: a three-layer sigmoid network with
//!   bias nodes and min-max normalized inputs.
//!
//! Only the traits and the input-to-hidden weights are inherited.
//! The hidden-to-output weights are drawn afresh every time a
//! genome is decoded.
//!
//! [`CreatureGenome`]: crate::genomics::CreatureGenome
//! [`FeedforwardNetwork`]: crate::networks::FeedforwardNetwork
//!
//! # Example usage: Breeding two creatures by hand
//! ```
//! use neuroevo::operators::{crossover, mutate};
//! use neuroevo::Genome;
//! use neuroevo_nn::{
//!     genomics::{CreatureGenome, GeneticConfig},
//!     networks::Topology,
//! };
//!
//! let mut rng = neuroevo::seeded_rng(2021);
//! let config = GeneticConfig::new(Topology::new(5, 6, 2).unwrap());
//!
//! let mother = CreatureGenome::new(&config, &mut rng);
//! let father = CreatureGenome::new(&config, &mut rng);
//!
//! let template = crossover(&mother.to_bits(), &father.to_bits(), &mut rng).unwrap();
//! let mut child = CreatureGenome::new(&config, &mut rng);
//! child.set_bits(&mutate(template, 0.5, &mut rng), &mut rng).unwrap();
//!
//! let steering = child.think(&[0.0, 1.0, 0.5, 2.0, 3.0]).unwrap();
//! assert_eq!(steering.len(), 2);
//! assert!(steering.iter().all(|s| *s > 0.0 && *s < 1.0));
//! ```

pub mod genomics;
pub mod networks;
