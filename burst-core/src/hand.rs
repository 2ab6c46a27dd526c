//! Hand reservoir economy
//!
//! Reservoir tiles trade single units of energy. The same routines back
//! the post-action reshuffle, the opening shuffle, and the reward that
//! boosts a player's own reservoir.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Cell, Player, HAND_LIMIT};

/// Attempts at finding a legal pair before a reshuffle gives up
pub const MAX_TRANSFER_ATTEMPTS: usize = 100;

/// How the giver and receiver of a transfer are chosen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShufflePattern {
    /// Coin flip
    Random,
    /// Lower energy gives to higher
    Focus,
    /// Higher energy gives to lower
    Diffuse,
}

/// Move one unit of energy between two distinct tiles.
///
/// Returns false when no legal pair turned up within
/// [`MAX_TRANSFER_ATTEMPTS`]; the reservoir is then untouched.
pub fn redistribute<R: Rng + ?Sized>(hand: &mut [Cell], pattern: ShufflePattern, rng: &mut R) -> bool {
    if hand.len() < 2 {
        return false;
    }

    for _ in 0..MAX_TRANSFER_ATTEMPTS {
        let a = rng.gen_range(0..hand.len());
        let b = rng.gen_range(0..hand.len());
        if a == b {
            continue;
        }

        let (giver, receiver) = match pattern {
            ShufflePattern::Random => {
                if rng.gen_bool(0.5) {
                    (a, b)
                } else {
                    (b, a)
                }
            }
            ShufflePattern::Focus => {
                if hand[a].energy < hand[b].energy {
                    (a, b)
                } else {
                    (b, a)
                }
            }
            ShufflePattern::Diffuse => {
                if hand[a].energy > hand[b].energy {
                    (a, b)
                } else {
                    (b, a)
                }
            }
        };

        if hand[giver].energy > -HAND_LIMIT && hand[receiver].energy < HAND_LIMIT {
            hand[giver].energy -= 1;
            hand[receiver].energy += 1;
            return true;
        }
    }

    false
}

/// Index of the tile with the smallest energy magnitude (first on ties)
pub fn weakest_tile(hand: &[Cell]) -> Option<usize> {
    hand.iter()
        .enumerate()
        .min_by_key(|(_, cell)| cell.energy.abs())
        .map(|(i, _)| i)
}

/// Pick a random tile that still has room to grow toward the player's
/// sign, or any tile if all are saturated
pub fn random_boostable_tile<R: Rng + ?Sized>(hand: &[Cell], player: Player, rng: &mut R) -> Option<usize> {
    if hand.is_empty() {
        return None;
    }
    let open: Vec<usize> = hand
        .iter()
        .enumerate()
        .filter(|(_, cell)| has_room(cell, player))
        .map(|(i, _)| i)
        .collect();

    if open.is_empty() {
        Some(rng.gen_range(0..hand.len()))
    } else {
        Some(open[rng.gen_range(0..open.len())])
    }
}

/// Push one tile a unit toward the player's sign, clamped to the reservoir bound
pub fn boost_tile(cell: &mut Cell, player: Player) {
    cell.energy = (cell.energy + player.sign()).clamp(-HAND_LIMIT, HAND_LIMIT);
}

/// Deterministic reward: boost the weakest tile. Returns its index.
pub fn boost_weakest(hand: &mut [Cell], player: Player) -> Option<usize> {
    let idx = weakest_tile(hand)?;
    boost_tile(&mut hand[idx], player);
    Some(idx)
}

fn has_room(cell: &Cell, player: Player) -> bool {
    match player {
        Player::One => cell.energy < HAND_LIMIT,
        Player::Two => cell.energy > -HAND_LIMIT,
    }
}
