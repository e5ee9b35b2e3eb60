use serde::{Deserialize, Serialize};

use crate::InvalidConfiguration;

pub const DEFAULT_SIZE: usize = 5;
pub const DEFAULT_FOUR_SPAWN_PROBABILITY: f64 = 0.33;
/// The largest grid a config may ask for.
pub const MAX_SIZE: usize = 64;

/// The tunables of one game session.
///
/// Every field has a default, so a JSON config file only needs to
/// mention the values it wants to change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// The grid is `size` x `size` cells.
    pub size: usize,
    /// Chance that a spawned tile is a 4 instead of a 2.
    pub four_spawn_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            four_spawn_probability: DEFAULT_FOUR_SPAWN_PROBABILITY,
        }
    }
}

impl GameConfig {
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        if self.size < 2 {
            return Err(InvalidConfiguration::SizeTooSmall { size: self.size });
        }
        if self.size > MAX_SIZE {
            return Err(InvalidConfiguration::SizeTooLarge { size: self.size });
        }
        // Also rejects NaN
        if !(0.0..=1.0).contains(&self.four_spawn_probability) {
            return Err(InvalidConfiguration::FourSpawnProbabilityOutOfRange {
                probability: self.four_spawn_probability,
            });
        }
        Ok(())
    }
}
