use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shared::{AgentFoodState, ForagingAgent, Vec2};
use tracing::{debug, info, warn};

use crate::config::{ArenaConfig, ForagingConfig};

use super::collection::{CollectionOutcome, process_agent};
use super::energy::EnergyLedger;
use super::floor::{FloorColor, FloorFlag};
use super::food::FoodRegistry;
use super::stats::{StatsLog, TickRecord};

/// Per-tick environment controller of the foraging arena.
///
/// Created once the configuration is known, stepped once per simulation tick, optionally
/// reset (which re-enters the running state) and finally destroyed, which closes the log.
pub struct Simulation {
    tick: u64,
    food: FoodRegistry,
    energy: EnergyLedger,
    collected_food: u32,
    energy_per_item: u32,
    energy_per_walking_robot: u32,
    stats: StatsLog,
    floor: FloorFlag,
    seed: u64,
}

impl Simulation {
    pub fn new(config: &ForagingConfig, arena: &ArenaConfig) -> Result<Self> {
        config
            .validate()
            .and_then(|_| arena.validate())
            .context("Error parsing foraging loop configuration")?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let food = FoodRegistry::new(
            config.items as usize,
            arena.bounds(),
            config.radius,
            config.food_despawn_ticks,
            ChaCha8Rng::seed_from_u64(seed),
        );

        let stats = StatsLog::open(&config.output)
            .context("Error opening foraging statistics output")?;

        info!(
            items = config.items,
            radius = config.radius,
            despawn_ticks = config.food_despawn_ticks,
            seed,
            output = %config.output.display(),
            "Foraging arena initialized"
        );

        let mut floor = FloorFlag::default();
        floor.set_changed();

        Ok(Self {
            tick: 0,
            food,
            energy: EnergyLedger::default(),
            collected_food: 0,
            energy_per_item: config.energy_per_item,
            energy_per_walking_robot: config.energy_per_walking_robot,
            stats,
            floor,
            seed,
        })
    }

    /// Runs one tick against the agent population and returns the logged record.
    ///
    /// Agents may come in any order; each sees the food left by the agents before it.
    pub fn step<'a, A, I>(&mut self, agents: I) -> TickRecord
    where
        A: ForagingAgent + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut A>,
    {
        self.tick += 1;

        self.food.age_all();
        let despawned = self.food.despawn_expired();
        if despawned > 0 {
            debug!(tick = self.tick, despawned, "expired food relocated");
            self.floor.set_changed();
        }

        let mut walking = 0u32;
        let mut resting = 0u32;
        for agent in agents {
            if agent.is_resting() {
                resting += 1;
            } else {
                walking += 1;
            }

            let outcome = process_agent(&mut self.food, agent);
            if let CollectionOutcome::Delivered(_) = outcome {
                self.energy.credit(self.energy_per_item);
                self.collected_food += 1;
            }
            if outcome.moved_food() {
                self.floor.set_changed();
            }
        }

        self.energy.debit_for_activity(walking, self.energy_per_walking_robot);

        let record = TickRecord {
            clock: self.tick,
            walking,
            resting,
            collected_food: self.collected_food,
            energy: self.energy.energy(),
        };
        if let Err(e) = self.stats.append(&record) {
            warn!(
                "Failed to append tick {} to '{}': {}",
                self.tick,
                self.stats.path().display(),
                e
            );
        }
        record
    }

    /// Back to tick 0: fresh food, zero energy and counters, truncated log.
    /// Item count and collection radius are kept. The agents' food states are cleared too,
    /// since any item they held has just been put back on the floor.
    ///
    /// The log is truncated first; if that fails nothing else is touched.
    pub fn reset<'a, A, I>(&mut self, agents: I) -> Result<()>
    where
        A: ForagingAgent + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut A>,
    {
        self.stats
            .reset()
            .context("Error resetting foraging statistics output")?;
        for agent in agents {
            *agent.food_state_mut() = AgentFoodState::default();
        }
        self.tick = 0;
        self.collected_food = 0;
        self.energy.reset();
        self.food.reset();
        self.floor.set_changed();
        info!("Foraging arena reset");
        Ok(())
    }

    /// Ends the run and closes the log.
    pub fn destroy(self) -> Result<()> {
        let path = self.stats.path().to_path_buf();
        self.stats
            .close()
            .with_context(|| format!("Error closing '{}'", path.display()))?;
        info!(ticks = self.tick, "Foraging arena destroyed");
        Ok(())
    }

    pub fn query_floor_color(&self, pos: Vec2) -> FloorColor {
        self.food.query_floor_color(pos)
    }

    /// True when food moved since the renderer last asked; clears the flag.
    pub fn take_floor_changed(&mut self) -> bool {
        self.floor.take()
    }

    /// Number of ticks run since creation or the last reset.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn food(&self) -> &FoodRegistry {
        &self.food
    }

    pub fn energy(&self) -> i64 {
        self.energy.energy()
    }

    pub fn collected_food(&self) -> u32 {
        self.collected_food
    }

    /// Seed actually used for food placement, so unseeded runs can be replayed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
