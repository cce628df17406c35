mod habitat;

use habitat::{ForageHabitat, HabitatConfig, SENSE_COUNT, STEERING_COUNT};

use neuroevo::logging::{EvolutionLogger, GenerationMemberRecord, ReportingLevel, Stats};
use neuroevo::{Agent, Genome, Population, PopulationConfig};
use neuroevo_nn::genomics::{CreatureGenome, GeneticConfig};
use neuroevo_nn::networks::Topology;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use std::error::Error;
use std::fs;
use std::num::NonZeroUsize;

/// Everything a batch of foraging runs is configured by.
/// Read from the RON file given as the first argument, if any.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct ForageConfig {
    population: PopulationConfig,
    genetic: GeneticConfig,
    habitat: HabitatConfig,
    generations: usize,
    time_step: f32,
    /// One independent run per seed.
    seeds: Vec<u64>,
}

impl Default for ForageConfig {
    fn default() -> ForageConfig {
        ForageConfig {
            population: PopulationConfig {
                size: NonZeroUsize::new(30).unwrap(),
                epoch_duration: 30.0,
                mutation_probability: 0.5,
            },
            genetic: GeneticConfig::new(Topology::new(SENSE_COUNT, 8, STEERING_COUNT).unwrap()),
            habitat: HabitatConfig::default(),
            generations: 50,
            time_step: 0.1,
            seeds: vec![1, 2, 3, 4],
        }
    }
}

/// Outcome of a single seeded run.
struct RunSummary {
    seed: u64,
    first_generation: Stats,
    last_generation: Stats,
    champion: String,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_config() -> Result<ForageConfig, Box<dyn Error>> {
    let config: ForageConfig = match std::env::args().nth(1) {
        Some(path) => ron::from_str(&fs::read_to_string(path)?)?,
        None => ForageConfig::default(),
    };
    if config.genetic.topology.input_count.get() != SENSE_COUNT
        || config.genetic.topology.output_count.get() != STEERING_COUNT
    {
        return Err(format!(
            "creatures need {} inputs and {} outputs, configured topology is {:?}",
            SENSE_COUNT, STEERING_COUNT, config.genetic.topology
        )
        .into());
    }
    if !(config.time_step > 0.0) {
        return Err(format!("time step must be positive, got {}", config.time_step).into());
    }
    Ok(config)
}

fn run(config: &ForageConfig, seed: u64) -> Result<RunSummary, Box<dyn Error>> {
    let mut population = Population::<CreatureGenome>::new(
        config.population.clone(),
        config.genetic.clone(),
        seed,
    )?;
    let mut habitat = ForageHabitat::new(config.habitat.clone());
    let mut logger = EvolutionLogger::new(ReportingLevel::Champion);

    population.spawn(&mut habitat);
    for _ in 0..config.generations {
        population.run_epoch(&mut habitat, config.time_step)?;
        logger.log(
            &population,
            &|a: &Agent<CreatureGenome>| {
                [
                    a.fitness(),
                    a.genome().base_mass(),
                    a.genome().vision_length(),
                ]
            },
            ["fitness", "mass", "vision"],
        );
        if let Some(log) = logger.latest() {
            let fitness = &log.agent_stats[0].1;
            let energy = Stats::from(habitat.energies());
            info!(
                seed,
                generation = log.generation_number,
                dead = log.dead_count,
                max_fitness = fitness.maximum,
                mean_fitness = fitness.mean,
                max_energy_left = energy.maximum,
                "epoch finished"
            );
        }
        population.advance_generation(&mut habitat)?;
    }

    let fitness_of = |log: Option<&neuroevo::logging::Log>| {
        log.map(|l| l.agent_stats[0].1.clone())
            .unwrap_or_else(|| Stats::from(std::iter::empty()))
    };
    let champion = match logger.latest().map(|l| &l.generation_sample) {
        Some(GenerationMemberRecord::Champion(_, bits)) => {
            let mut rng = neuroevo::seeded_rng(seed);
            CreatureGenome::from_bits(bits, &config.genetic, &mut rng)?.to_string()
        }
        _ => population.champion().genome().to_string(),
    };

    let summary = RunSummary {
        seed,
        first_generation: fitness_of(logger.iter().next()),
        last_generation: fitness_of(logger.latest()),
        champion,
    };
    Ok(summary)
}

fn main() {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let results: Vec<Result<RunSummary, String>> = config
        .seeds
        .par_iter()
        .map(|&seed| run(&config, seed).map_err(|e| format!("seed {}: {}", seed, e)))
        .collect();

    let mut best_fitness = vec![];
    for result in &results {
        match result {
            Ok(summary) => {
                println!(
                    "seed {}: fitness {:?} -> {:?}\n\tchampion {}",
                    summary.seed,
                    summary.first_generation,
                    summary.last_generation,
                    summary.champion
                );
                best_fitness.push(summary.last_generation.maximum);
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    println!(
        "Final generation best fitness {:?}, {} of {} runs failed over {} generations",
        Stats::from(best_fitness.into_iter()),
        results.iter().filter(|r| r.is_err()).count(),
        results.len(),
        config.generations
    );
}
