mod collection;
mod energy;
mod floor;
mod food;
mod sim;
mod stats;

// Re-export key types for easier imports
pub use collection::{CollectionOutcome, process_agent};
pub use energy::EnergyLedger;
pub use floor::{FloorColor, FloorFlag};
pub use food::{ArenaBounds, FoodItem, FoodRegistry, Placement};
pub use sim::Simulation;
pub use stats::{LOG_HEADER, StatsError, StatsLog, TickRecord};

use shared::ClosedRange;

// Arena defaults
pub const DEFAULT_ARENA_X: ClosedRange = ClosedRange::new(-0.9, 1.7);
pub const DEFAULT_ARENA_Y: ClosedRange = ClosedRange::new(-1.7, 1.7);
pub const DEFAULT_BASE_X: f32 = -1.0; // everything with a smaller x is the base

// Food defaults
pub const DEFAULT_FOOD_DESPAWN_TICKS: u32 = 600;
