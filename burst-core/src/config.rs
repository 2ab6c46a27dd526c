//! Game configuration: difficulty tiers and map layout

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Player;
use crate::error::ConfigError;
use crate::eval::Weights;

/// Smallest and largest supported main board size
pub const MIN_MAP_SIZE: i8 = 2;
pub const MAX_MAP_SIZE: i8 = 8;

/// Compact maps disable the outer ring, so they need one extra ring
const MIN_COMPACT_SIZE: i8 = 3;

// ============================================================================
// DIFFICULTY
// ============================================================================

/// Computer opponent strength
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    #[default]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Search depth in plies
    pub fn search_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 3,
            Difficulty::Hard => 5,
        }
    }

    /// Evaluation weights for this tier
    pub fn weights(self) -> Weights {
        match self {
            // Only immediate rewards; ignores pressure and chains
            Difficulty::Easy => Weights {
                core: 200_000.0,
                territory: 10.0,
                pressure: 0.0,
                energy: 5.0,
                chain: 0.0,
            },
            Difficulty::Normal => Weights {
                core: 200_000.0,
                territory: 15.0,
                pressure: 30.0,
                energy: 10.0,
                chain: 20.0,
            },
            Difficulty::Hard => Weights {
                core: 200_000.0,
                territory: 15.0,
                pressure: 60.0,
                energy: 12.0,
                chain: 45.0,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

// ============================================================================
// MAP
// ============================================================================

/// Board layout family
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapVariant {
    #[default]
    Regular,
    /// Outer ring disabled, cores one step closer to the center
    #[serde(alias = "mini")]
    Compact,
}

impl fmt::Display for MapVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapVariant::Regular => f.write_str("regular"),
            MapVariant::Compact => f.write_str("compact"),
        }
    }
}

impl FromStr for MapVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regular" => Ok(MapVariant::Regular),
            "compact" | "mini" => Ok(MapVariant::Compact),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Main board dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Board radius + 1
    pub size: i8,
    #[serde(default)]
    pub variant: MapVariant,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: 4,
            variant: MapVariant::Regular,
        }
    }
}

impl MapConfig {
    pub fn regular(size: i8) -> Self {
        Self {
            size,
            variant: MapVariant::Regular,
        }
    }

    pub fn compact(size: i8) -> Self {
        Self {
            size,
            variant: MapVariant::Compact,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_MAP_SIZE..=MAX_MAP_SIZE).contains(&self.size) {
            return Err(ConfigError::SizeOutOfRange {
                size: self.size,
                min: MIN_MAP_SIZE,
                max: MAX_MAP_SIZE,
            });
        }
        if self.variant == MapVariant::Compact && self.size < MIN_COMPACT_SIZE {
            return Err(ConfigError::CompactTooSmall {
                size: self.size,
                min: MIN_COMPACT_SIZE,
            });
        }
        Ok(())
    }
}

// ============================================================================
// GAME CONFIG
// ============================================================================

/// Everything needed to start a session
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Seat played by the computer, if any
    #[serde(default)]
    pub ai_seat: Option<Player>,
    /// Seed for reproducible games (None = entropy)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.map.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
