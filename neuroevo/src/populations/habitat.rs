use super::Agent;

use rand::Rng;

/// The simulation a population is evaluated in.
///
/// A habitat owns everything outside the agents' genomes:
/// positions, food, physics, sensing. Each step it moves the
/// live agents forward by `dt`, feeds their networks, credits
/// their fitness and kills the ones that don't make it.
pub trait Habitat<G> {
    /// Advances the simulation by `dt`.
    fn step<R: Rng + ?Sized>(&mut self, agents: &mut [Agent<G>], dt: f32, rng: &mut R);

    /// Called once a new generation has been spawned, before
    /// its first step. Habitats typically reset their world and
    /// place a fresh body for every agent here.
    fn on_new_generation<R: Rng + ?Sized>(&mut self, agents: &mut [Agent<G>], rng: &mut R) {
        let _ = (agents, rng);
    }
}
