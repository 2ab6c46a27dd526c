//! Minimax search with alpha-beta pruning

use std::time::{Duration, Instant};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Hex, Player};
use crate::cascade::{apply_action, ChainCounters, FirstMatch};
use crate::config::Difficulty;
use crate::eval::{evaluate, terminal_score, Weights, STRANDED_VALUE};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Depth charged for an action that keeps the turn
const CONTINUATION_COST: f64 = 0.5;

/// Depth charged for an action that hands the turn over
const HANDOFF_COST: f64 = 1.0;

/// Normal difficulty: chance of taking the best and second-best move
const NORMAL_TOP_CHANCE: f64 = 0.6;
const NORMAL_SECOND_CHANCE: f64 = 0.9;

/// Easy difficulty picks uniformly among this many top moves
const EASY_POOL: usize = 5;

// ============================================================================
// BUDGET AND RESULTS
// ============================================================================

/// Limits on one search. Once exhausted, unexplored nodes fall back to
/// static evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    pub max_nodes: Option<u64>,
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn nodes(max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
            time_limit: None,
        }
    }

    pub fn time(limit: Duration) -> Self {
        Self {
            max_nodes: None,
            time_limit: Some(limit),
        }
    }
}

/// A root candidate and its minimax value
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub hex: Hex,
    pub score: f64,
}

// ============================================================================
// SEARCH AI
// ============================================================================

/// Computer player for one seat
pub struct SearchAi {
    pub player: Player,
    pub difficulty: Difficulty,
    pub depth: f64,
    pub weights: Weights,
    pub budget: SearchBudget,
    rng: ChaCha8Rng,
}

impl SearchAi {
    pub fn new(player: Player, difficulty: Difficulty) -> Self {
        Self::with_seed(player, difficulty, 42)
    }

    pub fn with_seed(player: Player, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            player,
            difficulty,
            depth: difficulty.search_depth() as f64,
            weights: difficulty.weights(),
            budget: SearchBudget::unlimited(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Score every legal target, best first. Ties keep board order.
    pub fn rank_moves(&self, board: &Board, chains: &ChainCounters) -> Vec<ScoredMove> {
        let mut search = Search::new(self.player, &self.weights, self.budget);

        let mut ranked: Vec<ScoredMove> = board
            .legal_targets(self.player)
            .into_iter()
            .map(|hex| ScoredMove {
                hex,
                score: search.branch(
                    board,
                    chains,
                    hex,
                    self.player,
                    self.depth,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                ),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        tracing::debug!(
            player = %self.player,
            candidates = ranked.len(),
            nodes = search.nodes,
            "search finished"
        );
        ranked
    }

    /// Target for the next action, or None if the seat has no legal target
    pub fn best_move(&mut self, board: &Board, chains: &ChainCounters) -> Option<Hex> {
        let ranked = self.rank_moves(board, chains);
        choose_ranked(&ranked, self.difficulty, &mut self.rng)
    }
}

/// Pick from a best-first list according to difficulty
pub fn choose_ranked<R: Rng + ?Sized>(ranked: &[ScoredMove], difficulty: Difficulty, rng: &mut R) -> Option<Hex> {
    if ranked.is_empty() {
        return None;
    }

    let idx = match difficulty {
        Difficulty::Hard => 0,
        Difficulty::Normal => {
            let roll: f64 = rng.gen();
            if roll < NORMAL_TOP_CHANCE || ranked.len() < 2 {
                0
            } else if roll < NORMAL_SECOND_CHANCE || ranked.len() < 3 {
                1
            } else {
                2
            }
        }
        Difficulty::Easy => rng.gen_range(0..ranked.len().min(EASY_POOL)),
    };

    Some(ranked[idx].hex)
}

// ============================================================================
// MINIMAX
// ============================================================================

struct Search<'a> {
    player: Player,
    weights: &'a Weights,
    budget: SearchBudget,
    started: Instant,
    nodes: u64,
}

impl<'a> Search<'a> {
    fn new(player: Player, weights: &'a Weights, budget: SearchBudget) -> Self {
        Self {
            player,
            weights,
            budget,
            started: Instant::now(),
            nodes: 0,
        }
    }

    fn exhausted(&self) -> bool {
        if let Some(max) = self.budget.max_nodes {
            if self.nodes >= max {
                return true;
            }
        }
        if let Some(limit) = self.budget.time_limit {
            if self.started.elapsed() >= limit {
                return true;
            }
        }
        false
    }

    /// Play `target` for `mover` on a copy and search the resulting position
    #[allow(clippy::too_many_arguments)]
    fn branch(
        &mut self,
        board: &Board,
        chains: &ChainCounters,
        target: Hex,
        mover: Player,
        depth: f64,
        alpha: f64,
        beta: f64,
    ) -> f64 {
        let mut child = board.clone();
        let mut child_chains = *chains;
        let outcome = apply_action(&mut child, &mut child_chains, target, mover, &mut FirstMatch);

        if outcome.turn_continues {
            self.minimax(&child, &child_chains, depth - CONTINUATION_COST, alpha, beta, mover)
        } else {
            self.minimax(&child, &child_chains, depth - HANDOFF_COST, alpha, beta, mover.opponent())
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        chains: &ChainCounters,
        depth: f64,
        mut alpha: f64,
        mut beta: f64,
        mover: Player,
    ) -> f64 {
        self.nodes += 1;

        if let Some(score) = terminal_score(board, self.player, depth) {
            return score;
        }

        if depth <= 0.0 || self.exhausted() {
            return evaluate(board, chains, self.player, self.weights);
        }

        let maximizing = mover == self.player;
        let targets = board.legal_targets(mover);
        if targets.is_empty() {
            return if maximizing { -STRANDED_VALUE } else { STRANDED_VALUE };
        }

        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for target in targets {
                let score = self.branch(board, chains, target, mover, depth, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for target in targets {
                let score = self.branch(board, chains, target, mover, depth, alpha, beta);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
