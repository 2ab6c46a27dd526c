//! Error types

use crate::board::{Hex, Player};

/// A move the session refuses to play
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("game is already over")]
    GameOver,
    #[error("no main-board cell at {0}")]
    OffBoard(Hex),
    #[error("cell {0} is disabled")]
    Disabled(Hex),
    #[error("cell {hex} is not owned by {player}")]
    NotOwned { hex: Hex, player: Player },
    #[error("it is not {0}'s turn")]
    OutOfTurn(Player),
}

/// Invalid configuration values
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("map size {size} out of range ({min}..={max})")]
    SizeOutOfRange { size: i8, min: i8, max: i8 },
    #[error("compact map needs size >= {min}, got {size}")]
    CompactTooSmall { size: i8, min: i8 },
    #[error("unknown difficulty: {0} (expected easy, normal or hard)")]
    UnknownDifficulty(String),
    #[error("unknown map variant: {0} (expected regular or compact)")]
    UnknownVariant(String),
}
