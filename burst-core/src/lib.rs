//! Burst Cascade Core - rule engine and AI
//!
//! This crate provides the core game logic for Burst Cascade:
//! - Board geometry (hex grid with axial coordinates) and hand reservoirs
//! - Cascade resolution with chain rewards and turn continuation
//! - Position evaluation and minimax/alpha-beta search
//! - A live session driver with history and victory classification

pub mod board;
pub mod hand;
pub mod cascade;
pub mod eval;
pub mod ai;
pub mod config;
pub mod session;
pub mod invariants;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, BoardSnapshot, Cell, Hex, Player, Zone, DIRECTIONS, HAND_LIMIT, MAX_ENERGY};
pub use hand::ShufflePattern;
pub use cascade::{
    apply_action, apply_move, ChainCounter, ChainCounters, ChainKind, FirstMatch, GameResult, MoveOutcome,
    Overflow, Randomized, Reward, RewardPolicy,
};
pub use eval::{evaluate, Weights, WIN_VALUE};
pub use ai::{choose_ranked, ScoredMove, SearchAi, SearchBudget};
pub use config::{Difficulty, GameConfig, MapConfig, MapVariant};
pub use session::{MoveRecord, Session, VictoryKind};
pub use invariants::{check_invariants, InvariantViolation};
pub use error::{ConfigError, RuleError};
