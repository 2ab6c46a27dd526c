//! Board invariants: checks that should hold after every resolved action.
//!
//! A violation means a bug in the resolver, not a gameplay situation.

use std::fmt;

use crate::board::{Board, Zone, HAND_LIMIT, MAX_ENERGY};

/// One broken invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check every cell of the board. Returns an empty list when all hold.
#[must_use]
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for cell in board.cells() {
        let bound = match cell.zone {
            Zone::Main => MAX_ENERGY,
            Zone::Hand(_) => HAND_LIMIT,
        };
        if cell.energy.abs() > bound {
            violations.push(InvariantViolation {
                message: format!(
                    "{:?} cell {} has energy {} beyond ±{}",
                    cell.zone, cell.hex, cell.energy, bound
                ),
            });
        }

        if let Some(core) = cell.core {
            if cell.zone != Zone::Main {
                violations.push(InvariantViolation {
                    message: format!("reservoir cell {} carries a core", cell.hex),
                });
            } else if cell.owner() != Some(core) {
                violations.push(InvariantViolation {
                    message: format!(
                        "core of {} at {} sits on a cell owned by {:?}",
                        core,
                        cell.hex,
                        cell.owner()
                    ),
                });
            }
        }

        if cell.disabled && (cell.energy != 0 || cell.core.is_some()) {
            violations.push(InvariantViolation {
                message: format!("disabled cell {} holds energy {} or a core", cell.hex, cell.energy),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Hex, Player};
    use crate::config::MapConfig;

    #[test]
    fn test_opening_boards_are_clean() {
        assert!(check_invariants(&Board::new(MapConfig::default())).is_empty());
        assert!(check_invariants(&Board::new(MapConfig::compact(5))).is_empty());
    }

    #[test]
    fn test_detects_out_of_range_energy() {
        let mut board = Board::new(MapConfig::default());
        board.get_cell_mut(Zone::Main, Hex::new(0, 0)).unwrap().energy = 10;
        board.hand_mut(Player::Two)[0].energy = -6;
        assert_eq!(check_invariants(&board).len(), 2);
    }

    #[test]
    fn test_detects_mismatched_core() {
        let mut board = Board::new(MapConfig::default());
        board.get_cell_mut(Zone::Main, Hex::new(3, 0)).unwrap().energy = -1;
        let violations = check_invariants(&board);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("(3, 0)"));
    }
}
