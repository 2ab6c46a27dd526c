//! Live match driver: turn order, move validation, history and victory
//! classification on top of the cascade resolver.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::ai::SearchAi;
use crate::board::{Board, Hex, Player};
use crate::cascade::{apply_move, ChainCounters, GameResult, MoveOutcome};
use crate::config::GameConfig;
use crate::error::{ConfigError, RuleError};

/// Share of owned cells at or above which a win counts as dominant
const DOMINANCE_SHARE: f64 = 0.7;

/// Share of owned cells below which a win counts as close
const CLOSE_SHARE: f64 = 0.5;

/// One resolved action
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub turn: u32,
    pub player: Player,
    pub target: Hex,
    pub outcome: MoveOutcome,
}

/// How a finished game was won
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VictoryKind {
    /// The loser burst their own last core
    Suicide,
    /// The loser owns no cells at all
    Annihilation,
    /// Winner holds at least 70% of the owned cells
    Dominance,
    /// Winner holds less than half of the owned cells
    Close,
    Normal,
}

/// A game in progress (or finished)
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    chains: ChainCounters,
    current: Player,
    result: GameResult,
    history: Vec<MoveRecord>,
    /// Completed turns (handoffs)
    turn: u32,
    rng: ChaCha8Rng,
}

impl Session {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Start a game with shuffled reservoirs and a coin toss for first move
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.map.validate()?;
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let board = Board::shuffled(config.map, &mut rng);
        let current = if rng.gen_bool(0.5) { Player::One } else { Player::Two };
        tracing::debug!(first = %current, map = ?config.map, "session started");
        Ok(Self::from_parts(board, ChainCounters::new(), current, rng))
    }

    /// Start a game with a fixed first player
    pub fn with_starting_player(config: &GameConfig, first: Player) -> Result<Self, ConfigError> {
        let mut session = Self::new(config)?;
        session.current = first;
        Ok(session)
    }

    /// Resume from an arbitrary position
    pub fn from_parts(board: Board, chains: ChainCounters, current: Player, rng: ChaCha8Rng) -> Self {
        let result = GameResult::from_board(&board);
        Self {
            board,
            chains,
            current,
            result,
            history: Vec::new(),
            turn: 0,
            rng,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn chains(&self) -> &ChainCounters {
        &self.chains
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_over()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    // ========================================================================
    // PLAY
    // ========================================================================

    /// Check that the current player may inject at `target`
    pub fn validate_target(&self, target: Hex) -> Result<(), RuleError> {
        if self.is_over() {
            return Err(RuleError::GameOver);
        }
        let cell = self.board.main_cell(target).ok_or(RuleError::OffBoard(target))?;
        if cell.disabled {
            return Err(RuleError::Disabled(target));
        }
        if !cell.is_owned_by(self.current) {
            return Err(RuleError::NotOwned {
                hex: target,
                player: self.current,
            });
        }
        Ok(())
    }

    /// Play one action for the current player
    pub fn play(&mut self, target: Hex) -> Result<MoveOutcome, RuleError> {
        self.validate_target(target)?;

        let actor = self.current;
        let outcome = apply_move(&mut self.board, &mut self.chains, target, actor, &mut self.rng);
        self.result = outcome.result;

        self.history.push(MoveRecord {
            turn: self.turn,
            player: actor,
            target,
            outcome: outcome.clone(),
        });

        if outcome.game_over() {
            tracing::debug!(result = ?outcome.result, turn = self.turn, "game over");
        } else if !outcome.turn_continues {
            self.current = actor.opponent();
            self.turn += 1;
            tracing::debug!(next = %self.current, turn = self.turn, "turn handoff");
        }

        Ok(outcome)
    }

    /// Let a computer seat pick and play its action. Returns None when the
    /// seat has no legal target.
    pub fn play_ai(&mut self, ai: &mut SearchAi) -> Result<Option<MoveOutcome>, RuleError> {
        if self.is_over() {
            return Err(RuleError::GameOver);
        }
        if ai.player != self.current {
            return Err(RuleError::OutOfTurn(ai.player));
        }
        match ai.best_move(&self.board, &self.chains) {
            Some(target) => self.play(target).map(Some),
            None => Ok(None),
        }
    }

    /// Run two computer seats against each other until the game ends or
    /// `max_actions` actions have been played
    pub fn play_out(&mut self, one: &mut SearchAi, two: &mut SearchAi, max_actions: usize) -> GameResult {
        let mut actions = 0;
        while !self.is_over() && actions < max_actions {
            let ai = match self.current {
                Player::One => &mut *one,
                Player::Two => &mut *two,
            };
            match self.play_ai(ai) {
                Ok(Some(_)) => actions += 1,
                Ok(None) | Err(_) => break,
            }
        }
        self.result
    }

    /// Classify a finished game. None while ongoing or on a draw.
    pub fn victory_kind(&self) -> Option<VictoryKind> {
        let winner = self.result.winner()?;
        let loser = winner.opponent();

        if let Some(last) = self.history.last() {
            if last.player != winner {
                return Some(VictoryKind::Suicide);
            }
        }

        let loser_cells = self.board.territory(loser);
        if loser_cells == 0 {
            return Some(VictoryKind::Annihilation);
        }

        let winner_cells = self.board.territory(winner);
        let share = winner_cells as f64 / (winner_cells + loser_cells) as f64;
        Some(if share >= DOMINANCE_SHARE {
            VictoryKind::Dominance
        } else if share < CLOSE_SHARE {
            VictoryKind::Close
        } else {
            VictoryKind::Normal
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
