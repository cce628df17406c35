//! A Population is one generation of agents, each
//! carrying its own genome. Generations are evaluated
//! in fixed-duration epochs inside a [`Habitat`], and
//! the next generation is bred from the two parents
//! chosen by fitness at the end of each epoch.
mod agent;
mod config;
mod errors;
mod habitat;
pub mod logging;

pub use agent::Agent;
pub use config::PopulationConfig;
pub use errors::PopulationError;
pub use habitat::Habitat;

use crate::operators::{crossover, mutate, select_winner, SelectionError};
use crate::rng::{seeded_rng, EvolutionRng};
use crate::{BitString, Genome, GenomeLengthMismatch};

use rand::seq::index;
use rand::Rng;
use tracing::{debug, trace, warn};

use std::error::Error;

/// Phase of the generation loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpochState {
    /// Agents are active and accumulating fitness.
    Running,
    /// Between-generation bookkeeping. Only observable
    /// if breeding the next generation failed.
    Advancing,
}

/// Result of a single [`Population::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The epoch is still running.
    Continued,
    /// The epoch ended and the given generation was spawned.
    Advanced { generation: usize },
}

/// Record of how the current generation was bred.
#[derive(Clone, Debug, PartialEq)]
pub struct Lineage {
    /// Fitness of the first and second parent.
    pub parent_fitness: (f32, f32),
    /// Crossover child every agent was mutated from.
    pub template: BitString,
    /// Whether the parents were picked uniformly because
    /// no agent of the previous generation had any fitness.
    pub uniform_fallback: bool,
}

/// A population of agents evolved through
/// epoch-based generations.
pub struct Population<G: Genome> {
    agents: Vec<Agent<G>>,
    generation: usize,
    elapsed: f64,
    state: EpochState,
    lineage: Option<Lineage>,
    population_config: PopulationConfig,
    genetic_config: G::Config,
    rng: EvolutionRng,
}

impl<G: Genome> Population<G> {
    /// Creates a new population with a randomized first
    /// generation, drawing all randomness of the run from
    /// a generator seeded with `seed`.
    ///
    /// The type of `genetic_config` depends on the implementation
    /// of [`Genome`], and is effectively opaque to the population.
    ///
    /// # Errors
    /// Returns an error if the configured size is below 2 or
    /// the epoch duration isn't a positive, finite time.
    ///
    /// # Examples
    /// ```
    /// use neuroevo::{Population, PopulationConfig};
    /// use neuroevo_nn::genomics::{CreatureGenome, GeneticConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// let population_config = PopulationConfig {
    ///     size: NonZeroUsize::new(10).unwrap(),
    ///     epoch_duration: 20.0,
    ///     mutation_probability: 0.5,
    /// };
    /// let population =
    ///     Population::<CreatureGenome>::new(population_config, GeneticConfig::zero(), 42).unwrap();
    /// assert_eq!(population.agents().len(), 10);
    /// assert_eq!(population.generation(), 0);
    /// ```
    pub fn new(
        population_config: PopulationConfig,
        genetic_config: G::Config,
        seed: u64,
    ) -> Result<Population<G>, PopulationError> {
        Population::with_rng(population_config, genetic_config, seeded_rng(seed))
    }

    /// Creates a new population using an already
    /// constructed run generator.
    pub fn with_rng(
        population_config: PopulationConfig,
        genetic_config: G::Config,
        mut rng: EvolutionRng,
    ) -> Result<Population<G>, PopulationError> {
        if population_config.size.get() < 2 {
            return Err(PopulationError::Undersized(population_config.size.get()));
        }
        let duration = population_config.epoch_duration;
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(PopulationError::InvalidEpochDuration(duration));
        }

        let agents = Self::random_generation(&population_config, &genetic_config, &mut rng);
        Ok(Population {
            agents,
            generation: 0,
            elapsed: 0.0,
            state: EpochState::Running,
            lineage: None,
            population_config,
            genetic_config,
            rng,
        })
    }

    fn random_generation(
        population_config: &PopulationConfig,
        genetic_config: &G::Config,
        rng: &mut EvolutionRng,
    ) -> Vec<Agent<G>> {
        (0..population_config.size.get())
            .map(|_| Agent::new(G::new(genetic_config, rng)))
            .collect()
    }

    /// Lets the habitat place the current generation.
    /// Call once before the first step; later generations
    /// are handed to the habitat as they are spawned.
    pub fn spawn<H: Habitat<G>>(&mut self, habitat: &mut H) {
        habitat.on_new_generation(&mut self.agents, &mut self.rng);
    }

    /// Advances the epoch by `dt`, and breeds the next
    /// generation if the epoch has ended: either its
    /// duration elapsed or every agent is dead.
    ///
    /// # Errors
    /// Returns [`PopulationError::InvalidTimeStep`] if `dt` is not a
    /// positive, finite time. Returns an error if breeding fails, in
    /// which case the finished generation is kept and the population
    /// stays [`Advancing`]. Further steps won't run the habitat until
    /// a generation has been bred.
    ///
    /// [`Advancing`]: EpochState::Advancing
    pub fn step<H: Habitat<G>>(
        &mut self,
        habitat: &mut H,
        dt: f32,
    ) -> Result<StepOutcome, Box<dyn Error>> {
        check_time_step(dt)?;
        if self.state == EpochState::Running {
            self.simulate(habitat, dt);
            if !self.epoch_finished() {
                return Ok(StepOutcome::Continued);
            }
        }
        self.advance_generation(habitat)?;
        Ok(StepOutcome::Advanced {
            generation: self.generation,
        })
    }

    /// Steps the habitat until the current epoch ends,
    /// without breeding the next generation, so that
    /// the finished generation can be inspected or logged.
    /// Returns the number of steps taken.
    ///
    /// # Errors
    /// Returns [`PopulationError::InvalidTimeStep`] if `dt` is not
    /// a positive, finite time.
    pub fn run_epoch<H: Habitat<G>>(
        &mut self,
        habitat: &mut H,
        dt: f32,
    ) -> Result<usize, PopulationError> {
        check_time_step(dt)?;
        let mut steps = 0;
        while self.state == EpochState::Running && !self.epoch_finished() {
            self.simulate(habitat, dt);
            steps += 1;
        }
        Ok(steps)
    }

    fn simulate<H: Habitat<G>>(&mut self, habitat: &mut H, dt: f32) {
        habitat.step(&mut self.agents, dt, &mut self.rng);
        // Accumulated in f64 so that small steps keep
        // advancing time late in a long epoch.
        self.elapsed += f64::from(dt);
    }

    /// Whether the current epoch has run its course.
    pub fn epoch_finished(&self) -> bool {
        if self.elapsed >= f64::from(self.population_config.epoch_duration) {
            trace!(generation = self.generation, elapsed = self.elapsed, "epoch timed out");
            true
        } else if self.agents.iter().all(|a| !a.is_alive()) {
            trace!(generation = self.generation, elapsed = self.elapsed, "all agents dead");
            true
        } else {
            false
        }
    }

    /// Breeds the next generation from the current one,
    /// regardless of how far its epoch has run:
    /// 1. Two parents are selected by fitness. If no agent has
    ///    any fitness they are picked uniformly instead; if only
    ///    the first parent has any, its mate is picked uniformly.
    /// 2. Their genomes are crossed over into a child template.
    /// 3. Every agent of the new generation is decoded from its
    ///    own mutated copy of the template.
    ///
    /// The finished generation is only dropped once the new one
    /// is complete, after which the habitat is asked to place it.
    ///
    /// # Errors
    /// Returns an error if the parents' encodings can't be crossed
    /// over or the template can't be decoded, which indicates a
    /// genome type whose bit length varies under one config.
    pub fn advance_generation<H: Habitat<G>>(
        &mut self,
        habitat: &mut H,
    ) -> Result<(), Box<dyn Error>> {
        self.state = EpochState::Advancing;

        let (first, second, uniform_fallback) = self.choose_parents()?;
        let (first, second) = (&self.agents[first], &self.agents[second]);
        let parent_fitness = (first.fitness(), second.fitness());
        let template = crossover(
            &first.genome().to_bits(),
            &second.genome().to_bits(),
            &mut self.rng,
        )?;
        let next_generation = self.breed(&template)?;

        debug!(
            generation = self.generation + 1,
            first_parent_fitness = parent_fitness.0,
            second_parent_fitness = parent_fitness.1,
            uniform_fallback,
            "advancing generation"
        );
        self.agents = next_generation;
        self.lineage = Some(Lineage {
            parent_fitness,
            template,
            uniform_fallback,
        });
        self.generation += 1;
        self.elapsed = 0.0;
        self.state = EpochState::Running;
        habitat.on_new_generation(&mut self.agents, &mut self.rng);
        Ok(())
    }

    /// Selects two distinct parents by fitness. With no fitness
    /// in the generation both are picked uniformly; when only the
    /// first parent had any, its mate is picked uniformly from
    /// the rest.
    fn choose_parents(&mut self) -> Result<(usize, usize, bool), SelectionError> {
        let first = match select_winner(&self.agents, &mut self.rng) {
            Ok(first) => first,
            Err(SelectionError::DegenerateFitness) => {
                warn!(
                    generation = self.generation,
                    "degenerate fitness, selecting parents uniformly"
                );
                let picked = index::sample(&mut self.rng, self.agents.len(), 2);
                return Ok((picked.index(0), picked.index(1), true));
            }
            Err(e) => return Err(e),
        };

        let remaining: Vec<&Agent<G>> = self
            .agents
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != first)
            .map(|(_, a)| a)
            .collect();
        let second = match select_winner(&remaining, &mut self.rng) {
            Ok(second) => second,
            Err(SelectionError::DegenerateFitness) => {
                debug!(
                    generation = self.generation,
                    first,
                    "single fit agent, selecting its mate uniformly"
                );
                self.rng.gen_range(0..remaining.len())
            }
            Err(e) => return Err(e),
        };
        // Map back past the removed slot.
        let second = if second >= first { second + 1 } else { second };

        Ok((first, second, false))
    }

    /// Decodes one mutated copy of `template` per agent.
    fn breed(&mut self, template: &BitString) -> Result<Vec<Agent<G>>, GenomeLengthMismatch> {
        let mutation_probability = self.population_config.mutation_probability;
        (0..self.population_config.size.get())
            .map(|_| {
                let bits = mutate(template.clone(), mutation_probability, &mut self.rng);
                G::from_bits(&bits, &self.genetic_config, &mut self.rng).map(Agent::new)
            })
            .collect()
    }

    /// Replaces the population with a fresh randomized first
    /// generation. Used primarily to restart a run that has
    /// stopped making progress. The run generator is kept.
    pub fn reset(&mut self) {
        self.agents =
            Self::random_generation(&self.population_config, &self.genetic_config, &mut self.rng);
        self.generation = 0;
        self.elapsed = 0.0;
        self.state = EpochState::Running;
        self.lineage = None;
    }

    /// Returns the agent with the highest fitness.
    pub fn champion(&self) -> &Agent<G> {
        self.agents
            .iter()
            .skip(1)
            .fold(&self.agents[0], |best, agent| {
                if agent.fitness().total_cmp(&best.fitness()).is_gt() {
                    agent
                } else {
                    best
                }
            })
    }

    /// Returns the current generation's agents.
    pub fn agents(&self) -> &[Agent<G>] {
        &self.agents
    }

    /// Returns the current generation's agents mutably.
    pub fn agents_mut(&mut self) -> &mut [Agent<G>] {
        &mut self.agents
    }

    /// Returns the current generation number.
    /// The randomized first generation is generation 0.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Simulated time elapsed in the current epoch.
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn state(&self) -> EpochState {
        self.state
    }

    /// How the current generation was bred, or `None`
    /// for the randomized first generation.
    pub fn lineage(&self) -> Option<&Lineage> {
        self.lineage.as_ref()
    }

    pub fn population_config(&self) -> &PopulationConfig {
        &self.population_config
    }

    pub fn genetic_config(&self) -> &G::Config {
        &self.genetic_config
    }

    /// Returns the run generator, for collaborators
    /// outside the habitat that need randomness.
    pub fn rng_mut(&mut self) -> &mut EvolutionRng {
        &mut self.rng
    }
}

fn check_time_step(dt: f32) -> Result<(), PopulationError> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(PopulationError::InvalidTimeStep(dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    /// A genome of a fixed number of free bits.
    #[derive(Clone, Debug, PartialEq)]
    struct BitGenome(BitString);

    impl Genome for BitGenome {
        type Config = usize;

        fn new<R: Rng + ?Sized>(len: &usize, rng: &mut R) -> BitGenome {
            BitGenome((0..*len).map(|_| rng.gen()).collect())
        }

        fn to_bits(&self) -> BitString {
            self.0.clone()
        }

        fn set_bits<R: Rng + ?Sized>(
            &mut self,
            bits: &BitString,
            _: &mut R,
        ) -> Result<(), GenomeLengthMismatch> {
            if bits.len() != self.0.len() {
                return Err(GenomeLengthMismatch {
                    expected: self.0.len(),
                    found: bits.len(),
                });
            }
            self.0 = bits.clone();
            Ok(())
        }

        fn bit_len(&self) -> usize {
            self.0.len()
        }
    }

    impl BitGenome {
        fn ones(&self) -> usize {
            self.0.iter().filter(|b| *b).count()
        }
    }

    /// Credits survival time and kills agents
    /// once they've lived `lifespan`.
    struct Meadow {
        lifespan: Option<f32>,
        steps: usize,
        spawns: usize,
    }

    impl Meadow {
        fn new(lifespan: Option<f32>) -> Meadow {
            Meadow {
                lifespan,
                steps: 0,
                spawns: 0,
            }
        }
    }

    impl Habitat<BitGenome> for Meadow {
        fn step<R: Rng + ?Sized>(&mut self, agents: &mut [Agent<BitGenome>], dt: f32, _: &mut R) {
            self.steps += 1;
            for agent in agents.iter_mut().filter(|a| a.is_alive()) {
                agent.add_fitness(dt);
                if self.lifespan.map_or(false, |l| agent.fitness() >= l) {
                    agent.kill();
                }
            }
        }

        fn on_new_generation<R: Rng + ?Sized>(&mut self, _: &mut [Agent<BitGenome>], _: &mut R) {
            self.spawns += 1;
        }
    }

    fn config(size: usize, epoch_duration: f32) -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(size).unwrap(),
            epoch_duration,
            mutation_probability: 0.0,
        }
    }

    #[test]
    fn new_rejects_undersized() {
        let result = Population::<BitGenome>::new(config(1, 10.0), 8, 0);
        assert_eq!(result.err(), Some(PopulationError::Undersized(1)));
    }

    #[test]
    fn new_rejects_invalid_duration() {
        for duration in [0.0, -1.0, f32::INFINITY] {
            let result = Population::<BitGenome>::new(config(4, duration), 8, 0);
            assert!(matches!(
                result.err(),
                Some(PopulationError::InvalidEpochDuration(_))
            ));
        }
    }

    #[test]
    fn first_generation_is_random() {
        let population = Population::<BitGenome>::new(config(6, 1.0), 64, 3).unwrap();
        let genomes: Vec<_> = population.agents().iter().map(|a| a.genome()).collect();
        assert!(genomes.windows(2).any(|w| w[0] != w[1]));
        assert!(population.agents().iter().all(|a| a.is_alive()));
        assert!(population.lineage().is_none());
    }

    #[test]
    fn epoch_ends_on_duration() {
        let mut population = Population::<BitGenome>::new(config(4, 1.0), 16, 0).unwrap();
        let mut meadow = Meadow::new(None);
        population.spawn(&mut meadow);
        for _ in 0..3 {
            assert_eq!(
                population.step(&mut meadow, 0.25).unwrap(),
                StepOutcome::Continued
            );
        }
        assert_eq!(
            population.step(&mut meadow, 0.25).unwrap(),
            StepOutcome::Advanced { generation: 1 }
        );
        assert_eq!(population.generation(), 1);
        assert_eq!(population.elapsed(), 0.0);
        assert_eq!(population.state(), EpochState::Running);
        assert_eq!(meadow.spawns, 2);
    }

    #[test]
    fn epoch_ends_when_all_dead() {
        let mut population = Population::<BitGenome>::new(config(4, 100.0), 16, 0).unwrap();
        let mut meadow = Meadow::new(Some(0.5));
        let steps = population.run_epoch(&mut meadow, 0.1).unwrap();
        assert!(population.agents().iter().all(|a| !a.is_alive()));
        assert!(population.epoch_finished());
        assert_eq!(steps, meadow.steps);
        assert!(steps <= 6, "ran {} steps", steps);
        // Still the finished generation, ready for inspection.
        assert_eq!(population.generation(), 0);
    }

    #[test]
    fn invalid_time_steps_are_rejected() {
        let mut population = Population::<BitGenome>::new(config(2, 1.0), 8, 0).unwrap();
        let mut meadow = Meadow::new(None);
        for dt in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            assert!(population.step(&mut meadow, dt).is_err());
            assert!(matches!(
                population.run_epoch(&mut meadow, dt),
                Err(PopulationError::InvalidTimeStep(_))
            ));
        }
        assert_eq!(meadow.steps, 0);
        assert_eq!(population.elapsed(), 0.0);
    }

    #[test]
    fn tiny_time_steps_still_end_the_epoch() {
        // Adding 1e-7 to an f32 at 2.0 rounds back to 2.0.
        assert_eq!(2.0f32 + 1e-7, 2.0);

        let mut population = Population::<BitGenome>::new(config(2, 2.5), 8, 0).unwrap();
        let mut meadow = Meadow::new(None);
        let steps = population.run_epoch(&mut meadow, 1e-7).unwrap();
        assert!(population.agents().iter().all(|a| a.is_alive()));
        assert!(population.elapsed() >= 2.5);
        assert!((24_999_990..=25_000_010).contains(&steps), "ran {} steps", steps);
    }

    #[test]
    fn single_fit_agent_is_always_a_parent() {
        for seed in 0..50 {
            let mut population = Population::<BitGenome>::new(config(10, 1.0), 16, seed).unwrap();
            let mut meadow = Meadow::new(None);
            population.agents_mut()[3].set_fitness(5.0);
            population.advance_generation(&mut meadow).unwrap();

            let lineage = population.lineage().unwrap();
            assert_eq!(lineage.parent_fitness, (5.0, 0.0));
            assert!(!lineage.uniform_fallback);
        }
    }

    #[test]
    fn next_generation_is_mutated_template() {
        let mut population = Population::<BitGenome>::new(config(8, 1.0), 32, 12).unwrap();
        let mut meadow = Meadow::new(None);
        population.run_epoch(&mut meadow, 0.5).unwrap();
        population.advance_generation(&mut meadow).unwrap();

        let lineage = population.lineage().unwrap().clone();
        assert!(!lineage.uniform_fallback);
        assert_eq!(population.agents().len(), 8);
        for agent in population.agents() {
            // Probability 0 means every copy is flipped exactly once.
            assert_eq!(agent.genome().0.hamming_distance(&lineage.template), 1);
            assert_eq!(agent.fitness(), 0.0);
            assert!(agent.is_alive());
        }
    }

    #[test]
    fn unmutated_generation_is_clonal() {
        let mut cfg = config(5, 1.0);
        cfg.mutation_probability = 1.0;
        let mut population = Population::<BitGenome>::new(cfg, 32, 12).unwrap();
        let mut meadow = Meadow::new(None);
        population.run_epoch(&mut meadow, 0.5).unwrap();
        population.advance_generation(&mut meadow).unwrap();

        let template = &population.lineage().unwrap().template;
        assert!(population.agents().iter().all(|a| &a.genome().0 == template));
    }

    #[test]
    fn zero_fitness_falls_back_to_uniform() {
        let mut population = Population::<BitGenome>::new(config(3, 1.0), 8, 1).unwrap();
        let mut meadow = Meadow::new(None);
        // No steps taken: nobody has any fitness.
        population.advance_generation(&mut meadow).unwrap();
        let lineage = population.lineage().unwrap();
        assert!(lineage.uniform_fallback);
        assert_eq!(lineage.parent_fitness, (0.0, 0.0));
        assert_eq!(population.generation(), 1);
    }

    #[test]
    fn selection_follows_fitness() {
        // One agent is much fitter than the rest; its genome
        // should dominate the child template's prefix.
        let mut population = Population::<BitGenome>::new(config(4, 1.0), 64, 0).unwrap();
        let mut meadow = Meadow::new(None);
        for (i, agent) in population.agents_mut().iter_mut().enumerate() {
            agent.set_fitness(if i == 2 { 1_000_000.0 } else { 1.0 });
        }
        population.advance_generation(&mut meadow).unwrap();
        assert_eq!(population.lineage().unwrap().parent_fitness.0, 1_000_000.0);
    }

    #[test]
    fn runs_are_reproducible() {
        let run = |seed| {
            let mut population = Population::<BitGenome>::new(config(6, 1.0), 24, seed).unwrap();
            let mut meadow = Meadow::new(None);
            for (i, agent) in population.agents_mut().iter_mut().enumerate() {
                agent.set_fitness(i as f32);
            }
            for _ in 0..5 {
                population.advance_generation(&mut meadow).unwrap();
                for (i, agent) in population.agents_mut().iter_mut().enumerate() {
                    let ones = agent.genome().ones();
                    agent.set_fitness((ones + i) as f32);
                }
            }
            population
                .agents()
                .iter()
                .map(|a| a.genome().clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(77), run(77));
        assert_ne!(run(77), run(78));
    }

    #[test]
    fn evolution_increases_set_bits() {
        // Each set bit quadruples fitness, enough pressure
        // to outweigh mutation pulling back towards half.
        let mut population = Population::<BitGenome>::new(config(20, 1.0), 32, 5).unwrap();
        let mut meadow = Meadow::new(None);
        let score = |population: &mut Population<BitGenome>| {
            for agent in population.agents_mut() {
                let ones = agent.genome().ones() as i32;
                agent.set_fitness(4f32.powi(ones));
            }
            population.champion().genome().ones()
        };
        let initial = score(&mut population);
        for _ in 0..300 {
            score(&mut population);
            population.advance_generation(&mut meadow).unwrap();
        }
        assert!(score(&mut population) > initial);
    }

    #[test]
    fn champion() {
        let mut population = Population::<BitGenome>::new(config(5, 1.0), 4, 0).unwrap();
        for (i, agent) in population.agents_mut().iter_mut().enumerate() {
            agent.set_fitness([3.0, 9.0, 1.0, 9.5, 2.0][i]);
        }
        assert_eq!(population.champion().fitness(), 9.5);
    }

    #[test]
    fn reset() {
        let mut population = Population::<BitGenome>::new(config(4, 1.0), 8, 0).unwrap();
        let mut meadow = Meadow::new(None);
        population.advance_generation(&mut meadow).unwrap();
        population.reset();
        assert_eq!(population.generation(), 0);
        assert!(population.lineage().is_none());
        assert_eq!(population.agents().len(), 4);
    }
}
