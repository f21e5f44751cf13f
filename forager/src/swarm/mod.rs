mod timer;
mod walker;

pub use timer::Timer;
pub use walker::{WalkArea, Walker};

use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shared::{AgentId, ClosedRange, Vec2};
use std::f32;
use tracing::{debug, info};

use crate::config::{RunConfig, SimulationConfig};
use crate::simulation::{ArenaBounds, Simulation, TickRecord};

/// Headless stand-in for the robot population of the host simulator.
pub struct Swarm {
    walkers: Vec<Walker>,
    area: WalkArea,
    params: RunConfig,
    rng: ChaCha8Rng,
}

impl Swarm {
    /// Spawns `params.agents` walkers spread along the middle of the base.
    pub fn new(bounds: &ArenaBounds, params: &RunConfig, seed: u64) -> Self {
        let area = WalkArea {
            x: ClosedRange::new(bounds.base_x - params.nest_depth, bounds.x.max),
            y: bounds.y,
            base_x: bounds.base_x,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let nest_x = bounds.base_x - params.nest_depth / 2.0;
        let walkers = (0..params.agents)
            .map(|i| {
                let y = rng.random_range(area.y.min..=area.y.max);
                let rotation = rng.random_range(0.0..f32::consts::TAU);
                Walker::new(AgentId(i), Vec2::new(nest_x, y), rotation)
            })
            .collect();

        Self {
            walkers,
            area,
            params: params.clone(),
            rng,
        }
    }

    pub fn advance(&mut self) {
        for walker in &mut self.walkers {
            walker.update(&self.area, &self.params, &mut self.rng);
        }
    }

    pub fn walkers(&self) -> &[Walker] {
        &self.walkers
    }

    pub fn walkers_mut(&mut self) -> std::slice::IterMut<'_, Walker> {
        self.walkers.iter_mut()
    }

    pub fn total_delivered(&self) -> u32 {
        self.walkers.iter().map(|w| w.food.total_delivered).sum()
    }
}

/// Outcome of a headless run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub seed: u64,
    pub last: Option<TickRecord>,
    pub delivered_per_walker: Vec<u32>,
}

/// Drives a fresh arena with a scripted swarm for `config.run.ticks` ticks.
pub fn run(config: &SimulationConfig) -> Result<RunReport> {
    let mut sim = Simulation::new(&config.foraging, &config.arena)?;
    let seed = sim.seed();
    // Walkers get their own stream so food placement does not depend on swarm size.
    let mut swarm = Swarm::new(sim.food().bounds(), &config.run, seed.wrapping_add(1));

    let mut last = None;
    for _ in 0..config.run.ticks {
        swarm.advance();
        let record = sim.step(swarm.walkers_mut());
        if record.clock % 100 == 0 {
            debug!(
                clock = record.clock,
                walking = record.walking,
                resting = record.resting,
                collected = record.collected_food,
                energy = record.energy,
                "progress"
            );
        }
        last = Some(record);
    }

    info!(
        ticks = sim.tick(),
        collected = sim.collected_food(),
        energy = sim.energy(),
        delivered = swarm.total_delivered(),
        "Run finished"
    );
    sim.destroy()?;

    Ok(RunReport {
        seed,
        last,
        delivered_per_walker: swarm.walkers().iter().map(|w| w.food.total_delivered).collect(),
    })
}
