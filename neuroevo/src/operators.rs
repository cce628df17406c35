//! Genetic operators acting on fitness values and
//! bit-encoded genomes: roulette-wheel parent selection,
//! single-point crossover and single-bit mutation.
//!
//! All randomness is drawn from the generator passed in,
//! so a run seeded once reproduces every draw.
mod crossover;
mod errors;
mod mutation;
mod selection;

pub use crossover::{crossover, crossover_at};
pub use errors::{CrossoverError, SelectionError};
pub use mutation::mutate;
pub use selection::{roulette_wheel, select_parents, select_winner, Candidate, RouletteEntry};
