//! Position evaluation

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};
use crate::cascade::{ChainCounters, GameResult};

/// Score of a won position before the depth bonus
pub const WIN_VALUE: f64 = 10_000_000.0;

/// Score of a position where the side to move has no legal target
pub const STRANDED_VALUE: f64 = 5_000_000.0;

/// Enemy chain progress is worth this many own-chain units
pub const ENEMY_CHAIN_FACTOR: f64 = 3.0;

/// Heuristic weights for position evaluation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Per core marker
    pub core: f64,
    /// Per owned cell
    pub territory: f64,
    /// Per unit of energy on an own cell, for each adjacent opponent core
    pub pressure: f64,
    /// Per unit of energy on an owned cell
    pub energy: f64,
    /// Per unit of chain progress
    pub chain: f64,
}

impl Default for Weights {
    fn default() -> Self {
        crate::config::Difficulty::Hard.weights()
    }
}

/// Static evaluation from `player`'s perspective
pub fn evaluate(board: &Board, chains: &ChainCounters, player: Player, weights: &Weights) -> f64 {
    let opponent = player.opponent();
    let mut score = 0.0;

    for cell in board.main_cells() {
        if cell.disabled {
            continue;
        }

        match cell.core {
            Some(p) if p == player => score += weights.core,
            Some(_) => score -= weights.core,
            None => {}
        }

        let Some(owner) = cell.owner() else {
            continue;
        };
        let magnitude = cell.energy.unsigned_abs() as f64;
        let side = if owner == player { 1.0 } else { -1.0 };
        score += side * (weights.territory + weights.energy * magnitude);

        // Pressure counts once per adjacent opponent core
        if owner == player && weights.pressure != 0.0 {
            let cores = cell
                .hex
                .neighbors()
                .filter(|&n| {
                    board
                        .main_cell(n)
                        .is_some_and(|c| !c.disabled && c.has_core_of(opponent))
                })
                .count();
            score += weights.pressure * magnitude * cores as f64;
        }
    }

    score += chain_value(chains, player, weights) - chain_value(chains, opponent, weights);
    score
}

fn chain_value(chains: &ChainCounters, player: Player, weights: &Weights) -> f64 {
    let counter = chains.get(player);
    weights.chain * counter.own as f64 + ENEMY_CHAIN_FACTOR * weights.chain * counter.enemy as f64
}

/// Score of a finished game from `player`'s perspective. Quicker wins
/// (more depth left) score higher. Returns None while the game is on.
pub fn terminal_score(board: &Board, player: Player, depth: f64) -> Option<f64> {
    match GameResult::from_board(board) {
        GameResult::Ongoing => None,
        GameResult::Draw => Some(0.0),
        GameResult::Won(winner) if winner == player => Some(WIN_VALUE + depth),
        GameResult::Won(_) => Some(-(WIN_VALUE + depth)),
    }
}
