use neuroevo::{Agent, Habitat};
use neuroevo_nn::genomics::CreatureGenome;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of senses fed to a creature's network:
/// food sensed, food direction (x, y), speed, mass.
pub const SENSE_COUNT: usize = 5;
/// Number of network outputs read as steering (x, y).
pub const STEERING_COUNT: usize = 2;

/// Physical parameters of the foraging world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HabitatConfig {
    /// Width of the wrapping plane.
    pub width: f32,
    /// Height of the wrapping plane.
    pub height: f32,
    /// Number of food pellets kept in the world.
    pub food_count: usize,
    /// Energy gained from eating one pellet.
    pub food_energy: f32,
    /// Energy every creature is born with.
    pub initial_energy: f32,
    /// Distance within which a pellet is eaten.
    pub eat_radius: f32,
    pub max_speed: f32,
    /// Steering force at full network output.
    pub max_force: f32,
    /// Energy burned per unit of mass per second.
    pub metabolic_rate: f32,
    /// Energy burned per unit of vision length per second.
    pub vision_cost: f32,
}

impl Default for HabitatConfig {
    fn default() -> HabitatConfig {
        HabitatConfig {
            width: 100.0,
            height: 100.0,
            food_count: 40,
            food_energy: 20.0,
            initial_energy: 30.0,
            eat_radius: 1.5,
            max_speed: 8.0,
            max_force: 40.0,
            metabolic_rate: 0.05,
            vision_cost: 0.05,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Body {
    position: [f32; 2],
    velocity: [f32; 2],
    energy: f32,
}

/// A wrapping 2-D plane scattered with food.
///
/// Creatures see the nearest pellet within their vision length,
/// steer with their network's outputs and burn energy in proportion
/// to their mass and vision. They die when their energy runs out;
/// every second survived is a second of fitness.
#[derive(Clone, Debug)]
pub struct ForageHabitat {
    config: HabitatConfig,
    bodies: Vec<Body>,
    food: Vec<[f32; 2]>,
}

impl ForageHabitat {
    pub fn new(config: HabitatConfig) -> ForageHabitat {
        ForageHabitat {
            config,
            bodies: vec![],
            food: vec![],
        }
    }

    /// Energy left in each creature's body, by agent index.
    pub fn energies(&self) -> impl Iterator<Item = f32> + '_ {
        self.bodies.iter().map(|b| b.energy)
    }

    fn random_point<R: Rng + ?Sized>(config: &HabitatConfig, rng: &mut R) -> [f32; 2] {
        [
            rng.gen::<f32>() * config.width,
            rng.gen::<f32>() * config.height,
        ]
    }
}

impl Habitat<CreatureGenome> for ForageHabitat {
    fn on_new_generation<R: Rng + ?Sized>(
        &mut self,
        agents: &mut [Agent<CreatureGenome>],
        rng: &mut R,
    ) {
        let config = &self.config;
        self.food = (0..config.food_count)
            .map(|_| Self::random_point(config, rng))
            .collect();
        self.bodies = agents
            .iter()
            .map(|_| Body {
                position: Self::random_point(config, rng),
                velocity: [0.0, 0.0],
                energy: config.initial_energy,
            })
            .collect();
    }

    fn step<R: Rng + ?Sized>(
        &mut self,
        agents: &mut [Agent<CreatureGenome>],
        dt: f32,
        rng: &mut R,
    ) {
        let ForageHabitat {
            config,
            bodies,
            food,
        } = self;
        debug_assert_eq!(agents.len(), bodies.len());

        for (agent, body) in agents
            .iter_mut()
            .zip(bodies.iter_mut())
            .filter(|(a, _)| a.is_alive())
        {
            let mass = agent.genome().base_mass();
            let vision = agent.genome().vision_length();

            let sighted = nearest(config, body.position, food)
                .filter(|&(_, _, distance)| distance <= vision);
            let [dx, dy] = match sighted {
                Some((_, delta, distance)) if distance > 0.0 => {
                    [delta[0] / distance, delta[1] / distance]
                }
                _ => [0.0, 0.0],
            };
            let speed = body.velocity[0].hypot(body.velocity[1]);
            let senses = [
                if sighted.is_some() { 1.0 } else { 0.0 },
                f64::from(dx),
                f64::from(dy),
                f64::from(speed),
                f64::from(mass),
            ];

            let steering = match agent.genome_mut().think(&senses) {
                Ok(outputs) if outputs.len() >= STEERING_COUNT => {
                    Some([outputs[0] as f32 * 2.0 - 1.0, outputs[1] as f32 * 2.0 - 1.0])
                }
                Ok(outputs) => {
                    warn!(outputs = outputs.len(), "network has too few outputs to steer");
                    None
                }
                Err(e) => {
                    warn!(error = %e, "creature network rejected its senses");
                    None
                }
            };
            let Some(steering) = steering else {
                agent.kill();
                continue;
            };

            for axis in 0..2 {
                body.velocity[axis] += steering[axis] * config.max_force / mass * dt;
            }
            let speed = body.velocity[0].hypot(body.velocity[1]);
            if speed > config.max_speed {
                let scale = config.max_speed / speed;
                body.velocity = [body.velocity[0] * scale, body.velocity[1] * scale];
            }
            body.position = [
                wrap(body.position[0] + body.velocity[0] * dt, config.width),
                wrap(body.position[1] + body.velocity[1] * dt, config.height),
            ];

            body.energy -= (config.metabolic_rate * mass + config.vision_cost * vision) * dt;
            if let Some((index, _, distance)) = nearest(config, body.position, food) {
                if distance <= config.eat_radius {
                    body.energy += config.food_energy;
                    food[index] = ForageHabitat::random_point(config, rng);
                }
            }

            if body.energy <= 0.0 {
                agent.kill();
            } else {
                agent.add_fitness(dt);
            }
        }
    }
}

/// Maps `value` into `[0, size)`.
fn wrap(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    if wrapped < size {
        wrapped
    } else {
        0.0
    }
}

/// Shortest signed offset from `from` to `to` along
/// an axis of the given size that wraps around.
fn wrapped_delta(from: f32, to: f32, size: f32) -> f32 {
    let delta = (to - from).rem_euclid(size);
    if delta > size / 2.0 {
        delta - size
    } else {
        delta
    }
}

/// Index, offset and distance of the pellet closest to `position`.
fn nearest(
    config: &HabitatConfig,
    position: [f32; 2],
    food: &[[f32; 2]],
) -> Option<(usize, [f32; 2], f32)> {
    food.iter()
        .enumerate()
        .map(|(i, pellet)| {
            let delta = [
                wrapped_delta(position[0], pellet[0], config.width),
                wrapped_delta(position[1], pellet[1], config.height),
            ];
            (i, delta, delta[0].hypot(delta[1]))
        })
        .min_by(|a, b| a.2.total_cmp(&b.2))
}
