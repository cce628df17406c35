use crate::operators::Candidate;

/// A population member: a genome plus the
/// bookkeeping the habitat updates while it runs.
#[derive(Clone, Debug)]
pub struct Agent<G> {
    genome: G,
    fitness: f32,
    alive: bool,
}

impl<G> Agent<G> {
    /// Returns a live agent with zero fitness.
    pub fn new(genome: G) -> Agent<G> {
        Agent {
            genome,
            fitness: 0.0,
            alive: true,
        }
    }

    pub fn genome(&self) -> &G {
        &self.genome
    }

    pub fn genome_mut(&mut self) -> &mut G {
        &mut self.genome
    }

    /// Returns the agent's fitness.
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// Sets the agent's fitness value.
    ///
    /// Should make sure that the fitness value is ≥0;
    /// otherwise selection will treat the generation
    /// as degenerate.
    pub fn set_fitness(&mut self, fitness: f32) {
        self.fitness = fitness;
    }

    /// Increases the agent's fitness, e.g. by the
    /// time step it just survived.
    pub fn add_fitness(&mut self, amount: f32) {
        self.fitness += amount;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Marks the agent as dead. Dead agents keep their
    /// fitness for selection at the end of the epoch.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

impl<G> Candidate for Agent<G> {
    fn fitness(&self) -> f32 {
        self.fitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut agent = Agent::new(());
        assert!(agent.is_alive());
        assert_eq!(agent.fitness(), 0.0);

        agent.add_fitness(0.5);
        agent.add_fitness(0.25);
        assert_eq!(agent.fitness(), 0.75);

        agent.kill();
        assert!(!agent.is_alive());
        assert_eq!(Candidate::fitness(&agent), 0.75);
    }
}
