use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GridError, Result};

/// highest difficulty level accepted, anything outside `0..=MAX_LEVEL` falls
/// back to [DEFAULT_LEVEL]
pub const MAX_LEVEL: i32 = 4;
#[allow(missing_docs)]
pub const DEFAULT_LEVEL: i32 = 2;
/// the standard board has six ghost spawn slots
pub const MAX_GHOSTS: usize = 6;

/// Settings for a single game.
///
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// difficulty level, recorded in the summary
    pub level: i32,
    /// identifies the player in the summary
    pub player_id: String,
    /// whether pacman and the ghosts wrap around the board edges
    pub wraparound: bool,
    /// seed for the ghosts' random walk
    pub seed: u64,
    /// how many of the spawn slots get a ghost
    pub ghost_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            level: DEFAULT_LEVEL,
            player_id: String::new(),
            wraparound: true,
            seed: 31,
            ghost_count: MAX_GHOSTS,
        }
    }
}

impl GameConfig {
    /// Parses a config from JSON and clamps it into range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| GridError::InvalidConfig(e.to_string()))?;
        Ok(config.normalized())
    }

    /// level out of range becomes the default, too many ghosts are capped
    pub fn normalized(mut self) -> Self {
        if !(0..=MAX_LEVEL).contains(&self.level) {
            debug!(level = self.level, "level out of range, using default");
            self.level = DEFAULT_LEVEL;
        }
        self.ghost_count = self.ghost_count.min(MAX_GHOSTS);
        self
    }
}
