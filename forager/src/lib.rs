pub mod config;
pub mod simulation;
pub mod summary;
pub mod swarm;

pub use config::{
    ArenaConfig, ConfigError, ForagingConfig, RunConfig, SimulationConfig, load_config,
};
pub use simulation::{FloorColor, Simulation, TickRecord};
