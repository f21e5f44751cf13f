use serde::Deserialize;
use shared::ClosedRange;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::simulation::{
    ArenaBounds, DEFAULT_ARENA_X, DEFAULT_ARENA_Y, DEFAULT_BASE_X, DEFAULT_FOOD_DESPAWN_TICKS,
};

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse foraging configuration")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// `[foraging]` section: food, energy and output parameters.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ForagingConfig {
    pub items: u32,
    pub radius: f32,
    #[serde(default = "default_despawn_ticks")]
    pub food_despawn_ticks: u32,
    pub energy_per_item: u32,
    pub energy_per_walking_robot: u32,
    pub output: PathBuf,
    /// RNG seed for food placement; drawn at random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_despawn_ticks() -> u32 {
    DEFAULT_FOOD_DESPAWN_TICKS
}

/// `[arena]` section: where food may be placed and where the base starts.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ArenaConfig {
    pub x_range: [f32; 2],
    pub y_range: [f32; 2],
    pub base_x: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            x_range: [DEFAULT_ARENA_X.min, DEFAULT_ARENA_X.max],
            y_range: [DEFAULT_ARENA_Y.min, DEFAULT_ARENA_Y.max],
            base_x: DEFAULT_BASE_X,
        }
    }
}

impl ArenaConfig {
    pub fn bounds(&self) -> ArenaBounds {
        ArenaBounds {
            x: ClosedRange::new(self.x_range[0], self.x_range[1]),
            y: ClosedRange::new(self.y_range[0], self.y_range[1]),
            base_x: self.base_x,
        }
    }
}

/// `[run]` section: drives the headless demo swarm.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RunConfig {
    pub ticks: u64,
    pub agents: u32,
    pub step_length: f32,        // distance a walker covers per tick
    pub rest_probability: f32,   // chance per tick that a walker starts resting
    pub rest_ticks: u32,
    pub nest_depth: f32,         // how far the base extends behind base_x
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 1800,
            agents: 10,
            step_length: 0.02,
            rest_probability: 0.005,
            rest_ticks: 50,
            nest_depth: 0.7,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    pub foraging: ForagingConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl SimulationConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.foraging.validate()?;
        self.arena.validate()?;
        self.run.validate()
    }
}

impl ForagingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items == 0 {
            return Err(ConfigError::Invalid("foraging.items must be a positive integer".into()));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "foraging.radius must be a positive real, got {}",
                self.radius
            )));
        }
        if self.food_despawn_ticks == 0 {
            return Err(ConfigError::Invalid(
                "foraging.food_despawn_ticks must be a positive integer".into(),
            ));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("foraging.output must not be empty".into()));
        }
        Ok(())
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = self.bounds();
        if !bounds.x.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "arena.x_range {} must be finite and ordered",
                bounds.x
            )));
        }
        if !bounds.y.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "arena.y_range {} must be finite and ordered",
                bounds.y
            )));
        }
        // Food placed entirely inside the base could never be picked up.
        if !self.base_x.is_finite() || self.base_x >= bounds.x.max {
            return Err(ConfigError::Invalid(format!(
                "arena.base_x {} must lie below the upper x bound {}",
                self.base_x, bounds.x.max
            )));
        }
        Ok(())
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step_length.is_finite() && self.step_length > 0.0) {
            return Err(ConfigError::Invalid("run.step_length must be a positive real".into()));
        }
        if !(0.0..=1.0).contains(&self.rest_probability) {
            return Err(ConfigError::Invalid(
                "run.rest_probability must be between 0.0 and 1.0".into(),
            ));
        }
        if !(self.nest_depth.is_finite() && self.nest_depth > 0.0) {
            return Err(ConfigError::Invalid("run.nest_depth must be a positive real".into()));
        }
        Ok(())
    }
}

/// Loads and validates the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<SimulationConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    SimulationConfig::from_toml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [foraging]
        items = 5
        radius = 0.1
        energy_per_item = 1000
        energy_per_walking_robot = 1
        output = "foraging.txt"
    "#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = SimulationConfig::from_toml_str(MINIMAL).unwrap();
        assert_eq!(config.foraging.items, 5);
        assert_eq!(config.foraging.food_despawn_ticks, DEFAULT_FOOD_DESPAWN_TICKS);
        assert_eq!(config.foraging.seed, None);
        assert_eq!(config.arena, ArenaConfig::default());
        assert_eq!(config.run, RunConfig::default());
    }

    #[test]
    fn test_missing_required_parameter_is_fatal() {
        let content = r#"
            [foraging]
            items = 5
            energy_per_item = 1000
            energy_per_walking_robot = 1
            output = "foraging.txt"
        "#;
        let err = SimulationConfig::from_toml_str(content).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("radius"), "Cause should name the missing field: {}", source);
    }

    #[test]
    fn test_negative_energy_parameter_rejected() {
        let content = MINIMAL.replace(
            "energy_per_walking_robot = 1",
            "energy_per_walking_robot = -1",
        );
        assert!(matches!(
            SimulationConfig::from_toml_str(&content),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_items_rejected() {
        let content = MINIMAL.replace("items = 5", "items = 0");
        let err = SimulationConfig::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("items")));
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let content = MINIMAL.replace("radius = 0.1", "radius = -0.5");
        assert!(matches!(
            SimulationConfig::from_toml_str(&content),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_arena_section_overrides_defaults() {
        let content = format!(
            "{}\n[arena]\nx_range = [0.0, 4.0]\ny_range = [-2.0, 2.0]\nbase_x = 0.5\n",
            MINIMAL
        );
        let config = SimulationConfig::from_toml_str(&content).unwrap();
        let bounds = config.arena.bounds();
        assert_eq!(bounds.x, ClosedRange::new(0.0, 4.0));
        assert_eq!(bounds.base_x, 0.5);
    }

    #[test]
    fn test_base_beyond_arena_rejected() {
        let content = format!("{}\n[arena]\nbase_x = 2.0\n", MINIMAL);
        assert!(matches!(
            SimulationConfig::from_toml_str(&content),
            Err(ConfigError::Invalid(ref msg)) if msg.contains("base_x")
        ));
    }

    #[test]
    fn test_unreadable_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/forager.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/forager.toml"));
    }
}
