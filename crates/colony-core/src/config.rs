//! Configuration types for the simulation.

use crate::{Error, Result, UnitStats};
use serde::{Deserialize, Serialize};

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Colonies are placed with each axis in `[-extent, extent)`
    pub extent: i32,
    /// Rejection-sampling attempts before colony placement gives up
    pub placement_attempts: u32,
    /// Ticks a rock survives
    pub rock_lifetime: i32,
    /// Starting stats for produced units
    pub unit: UnitStats,
    /// Ticks after a production before a colony re-arms itself.
    /// `None` leaves re-arming to the host.
    pub production_cooldown: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            extent: 20,
            placement_attempts: 10_000,
            rock_lifetime: 1000,
            unit: UnitStats::default(),
            production_cooldown: None,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.extent <= 0 {
            return Err(Error::InvalidConfig(format!(
                "extent must be positive, got {}",
                self.extent
            )));
        }
        if self.placement_attempts == 0 {
            return Err(Error::InvalidConfig(
                "placement_attempts must be at least 1".to_string(),
            ));
        }
        if self.unit.endurance <= 0 || self.unit.strength < 0 {
            return Err(Error::InvalidConfig(format!(
                "unit stats out of range: {:?}",
                self.unit
            )));
        }
        if self.production_cooldown == Some(0) {
            return Err(Error::InvalidConfig(
                "production_cooldown must be at least 1 tick".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the headless runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Random seed; entropy when absent
    pub seed: Option<u64>,
    /// Wall-clock delay between ticks (milliseconds)
    pub tick_interval_ms: u64,
    /// Stop after this many ticks; run until interrupted when absent
    pub max_ticks: Option<u64>,
    /// Owners that get a colony at startup
    pub colonies: Vec<String>,
    /// Rocks scattered at startup
    pub rocks: usize,
    /// Alliances formed at startup
    pub alliances: Vec<(String, String)>,
    /// Log a population report every N ticks
    pub report_every: u64,
    /// World configuration
    pub world: WorldConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_interval_ms: 100,
            max_ticks: None,
            colonies: vec!["red".to_string(), "black".to_string()],
            rocks: 20,
            alliances: Vec::new(),
            report_every: 50,
            world: WorldConfig {
                production_cooldown: Some(10),
                ..WorldConfig::default()
            },
        }
    }
}

impl RunnerConfig {
    /// Load from a JSON file; missing fields fall back to defaults
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: RunnerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }
        self.world.validate()
    }
}
