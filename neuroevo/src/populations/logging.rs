use super::{Agent, Population};

use crate::{BitString, Genome};

use serde::{Deserialize, Serialize};

use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportingLevel {
    /// Encodes every agent's genome.
    AllGenomes,
    /// Encodes only the generation champion's genome.
    Champion,
    /// Records no genomes.
    NoGenomes,
}

/// A snapshot of a population, usually
/// taken at the end of an epoch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Log {
    pub generation_number: usize,
    /// Simulated time the epoch ran for.
    pub elapsed: f32,
    pub agent_count: usize,
    pub dead_count: usize,
    pub generation_sample: GenerationMemberRecord,
    pub agent_stats: Vec<(String, Stats)>,
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Log {{\n\
            \tgeneration_number: {:?}\n\
            \telapsed: {:?}\n\
            \tdead: {}/{}\n\
            {}\
            }}",
            self.generation_number,
            self.elapsed,
            self.dead_count,
            self.agent_count,
            self.agent_stats
                .iter()
                .map(|(name, stats)| format!("\t{}: {:?}\n", name, stats))
                .collect::<String>()
        )
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub maximum: f32,
    pub minimum: f32,
    pub mean: f32,
    pub median: f32,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    /// All fields are NaN for an empty sequence.
    ///
    /// # Examples
    /// ```
    /// use neuroevo::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied());
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    pub fn from(data: impl Iterator<Item = f32>) -> Stats {
        let mut data: Vec<f32> = data.collect();
        if data.is_empty() {
            return Stats {
                maximum: f32::NAN,
                minimum: f32::NAN,
                mean: f32::NAN,
                median: f32::NAN,
            };
        }
        data.sort_unstable_by(f32::total_cmp);
        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: data.iter().sum::<f32>() / data.len() as f32,
            median,
        }
    }
}

/// A reporting-level dependant store of
/// encoded genomes from a population.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GenerationMemberRecord {
    /// Fitness and genome of every agent.
    Agents(Vec<(f32, BitString)>),
    /// Fitness and genome of the champion.
    Champion(f32, BitString),
    /// Empty.
    None,
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvolutionLogger {
    reporting_level: ReportingLevel,
    logs: Vec<Log>,
}

impl EvolutionLogger {
    /// Returns a logger with the appropiate reporting level.
    ///
    /// # Examples
    /// ```
    /// use neuroevo::logging::{EvolutionLogger, ReportingLevel};
    ///
    /// let logger = EvolutionLogger::new(ReportingLevel::NoGenomes);
    /// assert!(logger.latest().is_none());
    /// ```
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Store a snapshot of a population.
    ///
    /// The `agent_stat_extractor` provides a way of
    /// obtaining arbitrary statistics on the population,
    /// where each statistic is named by `stat_names`.
    ///
    /// # Examples
    /// ```
    /// use neuroevo::logging::{EvolutionLogger, ReportingLevel};
    /// use neuroevo::{Agent, Population, PopulationConfig};
    /// use neuroevo_nn::genomics::{CreatureGenome, GeneticConfig};
    ///
    /// let mut logger = EvolutionLogger::new(ReportingLevel::Champion);
    /// let population = Population::<CreatureGenome>::new(
    ///     PopulationConfig {
    ///         size: std::num::NonZeroUsize::new(4).unwrap(),
    ///         epoch_duration: 1.0,
    ///         ..PopulationConfig::zero()
    ///     },
    ///     GeneticConfig::zero(),
    ///     0,
    /// )
    /// .unwrap();
    ///
    /// // Run an epoch... then log a snapshot.
    /// logger.log(
    ///     &population,
    ///     &|a: &Agent<CreatureGenome>| [a.fitness(), a.genome().base_mass()],
    ///     ["fitness", "mass"],
    /// );
    /// assert_eq!(logger.latest().unwrap().agent_stats[0].0, "fitness");
    /// ```
    pub fn log<G, E, const N: usize>(
        &mut self,
        population: &Population<G>,
        agent_stat_extractor: &E,
        stat_names: [&str; N],
    ) where
        G: Genome,
        E: Fn(&Agent<G>) -> [f32; N],
    {
        let samples: Vec<[f32; N]> = population
            .agents()
            .iter()
            .map(agent_stat_extractor)
            .collect();
        let agent_stats = stat_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                (
                    name.to_string(),
                    Stats::from(samples.iter().map(|sample| sample[i])),
                )
            })
            .collect();

        self.logs.push(Log {
            generation_number: population.generation(),
            elapsed: population.elapsed(),
            agent_count: population.agents().len(),
            dead_count: population.agents().iter().filter(|a| !a.is_alive()).count(),
            generation_sample: match self.reporting_level {
                ReportingLevel::AllGenomes => GenerationMemberRecord::Agents(
                    population
                        .agents()
                        .iter()
                        .map(|a| (a.fitness(), a.genome().to_bits()))
                        .collect(),
                ),
                ReportingLevel::Champion => {
                    let champion = population.champion();
                    GenerationMemberRecord::Champion(champion.fitness(), champion.genome().to_bits())
                }
                ReportingLevel::NoGenomes => GenerationMemberRecord::None,
            },
            agent_stats,
        })
    }

    /// Iterate over all logged snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &Log> {
        self.logs.iter()
    }

    /// Returns the most recent snapshot.
    pub fn latest(&self) -> Option<&Log> {
        self.logs.last()
    }

    pub fn reporting_level(&self) -> ReportingLevel {
        self.reporting_level
    }
}
