//! Cascade resolution: injecting a hand pattern, bursting cells, chain
//! rewards, turn continuation and game end.
//!
//! One action runs through `Applying -> Resolving -> RewardCheck` and ends
//! in either a continuation (same player acts again) or a handoff. The
//! search engine calls [`apply_action`] on cloned boards, so live play and
//! search share this exact code path; they differ only in the
//! [`RewardPolicy`] used to place rewards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Hex, PatternTile, Player, Zone, MAX_ENERGY};
use crate::hand::{self, ShufflePattern};

// ============================================================================
// CHAIN COUNTERS
// ============================================================================

/// Category of chain credit an overflow earns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
    /// Burst on a cell the actor owned (or a neutral one)
    Own,
    /// Burst on a cell the opponent owned
    Enemy,
}

impl ChainKind {
    /// Credit needed to fire one reward
    pub fn threshold(self) -> u8 {
        match self {
            ChainKind::Own => 4,
            ChainKind::Enemy => 2,
        }
    }

    /// Classify an overflow by the owner the cell had before the action
    pub fn classify(prior_owner: Option<Player>, actor: Player) -> Self {
        if prior_owner == Some(actor.opponent()) {
            ChainKind::Enemy
        } else {
            ChainKind::Own
        }
    }
}

/// Progress of one player toward each reward
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainCounter {
    pub own: u8,
    pub enemy: u8,
}

impl ChainCounter {
    /// Add one unit of credit. Returns true (and resets) when the
    /// threshold is reached.
    pub fn advance(&mut self, kind: ChainKind) -> bool {
        let slot = match kind {
            ChainKind::Own => &mut self.own,
            ChainKind::Enemy => &mut self.enemy,
        };
        *slot += 1;
        if *slot >= kind.threshold() {
            *slot = 0;
            true
        } else {
            false
        }
    }
}

/// Chain counters for both players
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainCounters {
    counters: [ChainCounter; 2],
}

impl ChainCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, player: Player) -> ChainCounter {
        self.counters[player.index()]
    }

    pub fn get_mut(&mut self, player: Player) -> &mut ChainCounter {
        &mut self.counters[player.index()]
    }
}

// ============================================================================
// OUTCOME TYPES
// ============================================================================

/// Game state after an action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Won(Player),
    Draw,
}

impl GameResult {
    /// Decide the result from the remaining core markers
    pub fn from_board(board: &Board) -> Self {
        let one = board.core_count(Player::One);
        let two = board.core_count(Player::Two);
        match (one, two) {
            (0, 0) => GameResult::Draw,
            (0, _) => GameResult::Won(Player::Two),
            (_, 0) => GameResult::Won(Player::One),
            _ => GameResult::Ongoing,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// A burst: a main-board cell pushed past the energy limit and reset to zero
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overflow {
    pub hex: Hex,
    /// Owner before the action touched the cell
    pub prior_owner: Option<Player>,
    pub kind: ChainKind,
    /// 0 for the injection itself, then one per resolving pass
    pub pass: u32,
}

/// A reward fired by a chain counter reaching its threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    /// A reservoir tile moved one unit toward the player's sign
    HandBoost { player: Player, hex: Hex },
    /// A new core marker on one of the player's cells
    CorePlaced { player: Player, hex: Hex },
    /// Threshold reached but no cell was eligible
    Unplaced { player: Player, kind: ChainKind },
}

impl Reward {
    pub fn kind(&self) -> ChainKind {
        match self {
            Reward::HandBoost { .. } => ChainKind::Own,
            Reward::CorePlaced { .. } => ChainKind::Enemy,
            Reward::Unplaced { kind, .. } => *kind,
        }
    }
}

/// Everything one action produced
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub overflows: Vec<Overflow>,
    pub rewards: Vec<Reward>,
    /// The same player acts again
    pub turn_continues: bool,
    pub result: GameResult,
}

impl MoveOutcome {
    pub fn game_over(&self) -> bool {
        self.result.is_over()
    }

    pub fn winner(&self) -> Option<Player> {
        self.result.winner()
    }

    pub fn overflowed(&self) -> bool {
        !self.overflows.is_empty()
    }

    pub fn own_reward_fired(&self) -> bool {
        self.rewards.iter().any(|r| r.kind() == ChainKind::Own)
    }
}

// ============================================================================
// REWARD PLACEMENT
// ============================================================================

/// Chooses where rewards land
pub trait RewardPolicy {
    /// Boost one reservoir tile for an own-chain reward. Returns its index.
    fn boost_hand(&mut self, hand: &mut [Cell], player: Player) -> Option<usize>;

    /// Cell to receive a new core for an enemy-chain reward
    fn pick_core_cell(&mut self, candidates: &[Hex]) -> Option<Hex>;
}

/// Deterministic placement used by the search engine: weakest reservoir
/// tile, first eligible cell in board order
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstMatch;

impl RewardPolicy for FirstMatch {
    fn boost_hand(&mut self, hand: &mut [Cell], player: Player) -> Option<usize> {
        hand::boost_weakest(hand, player)
    }

    fn pick_core_cell(&mut self, candidates: &[Hex]) -> Option<Hex> {
        candidates.first().copied()
    }
}

/// Random placement used in live play
#[derive(Debug)]
pub struct Randomized<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Randomized<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + ?Sized> RewardPolicy for Randomized<'_, R> {
    fn boost_hand(&mut self, hand: &mut [Cell], player: Player) -> Option<usize> {
        let idx = hand::random_boostable_tile(hand, player, &mut *self.rng)?;
        hand::boost_tile(&mut hand[idx], player);
        Some(idx)
    }

    fn pick_core_cell(&mut self, candidates: &[Hex]) -> Option<Hex> {
        if candidates.is_empty() {
            None
        } else {
            Some(candidates[self.rng.gen_range(0..candidates.len())])
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Stamp the actor's hand pattern onto `target` and resolve the cascade.
///
/// The caller is trusted to pass a target the actor owns. Pattern tiles
/// that land off the board or on disabled cells are skipped.
pub fn apply_action<P: RewardPolicy + ?Sized>(
    board: &mut Board,
    chains: &mut ChainCounters,
    target: Hex,
    actor: Player,
    policy: &mut P,
) -> MoveOutcome {
    let pattern = board.hand_pattern(actor);

    let mut overflows = Vec::new();
    let mut rewards = Vec::new();

    // Applying
    let mut pending = inject(board, target, &pattern, actor);

    // Resolving: credit every burst, then sweep for cells still out of range
    let mut pass = 0;
    loop {
        for overflow in &pending {
            tracing::trace!(hex = %overflow.hex, kind = ?overflow.kind, pass, "overflow");
            if chains.get_mut(actor).advance(overflow.kind) {
                let reward = grant_reward(board, actor, overflow.kind, policy);
                tracing::debug!(?reward, player = %actor, "chain reward");
                rewards.push(reward);
            }
        }
        overflows.append(&mut pending);
        pass += 1;
        pending = sweep_out_of_range(board, actor, pass);
        if pending.is_empty() {
            break;
        }
    }

    // RewardCheck
    let mut outcome = MoveOutcome {
        overflows,
        rewards,
        turn_continues: false,
        result: GameResult::from_board(board),
    };
    outcome.turn_continues = !outcome.game_over() && outcome.overflowed() && !outcome.own_reward_fired();

    // Handoff clears the actor's own-chain progress
    if !outcome.turn_continues {
        chains.get_mut(actor).own = 0;
    }

    outcome
}

/// Live-play move: random reward placement, then the actor's reservoir
/// reshuffles (diffuse after a burst, focus otherwise)
pub fn apply_move<R: Rng + ?Sized>(
    board: &mut Board,
    chains: &mut ChainCounters,
    target: Hex,
    actor: Player,
    rng: &mut R,
) -> MoveOutcome {
    let outcome = apply_action(board, chains, target, actor, &mut Randomized::new(&mut *rng));

    let pattern = if outcome.overflowed() {
        ShufflePattern::Diffuse
    } else {
        ShufflePattern::Focus
    };
    if !hand::redistribute(board.hand_mut(actor), pattern, rng) {
        tracing::debug!(player = %actor, ?pattern, "reservoir reshuffle found no legal pair");
    }

    outcome
}

/// Add the pattern onto the board around `target`
fn inject(board: &mut Board, target: Hex, pattern: &[PatternTile], actor: Player) -> Vec<Overflow> {
    let mut overflows = Vec::new();

    for tile in pattern {
        let hex = target.offset(tile.dq, tile.dr);
        let Some(cell) = board.get_cell_mut(Zone::Main, hex) else {
            continue;
        };
        if cell.disabled {
            continue;
        }

        let prior_owner = cell.owner();
        cell.energy = cell.energy.saturating_add(tile.delta);
        if cell.energy.abs() > MAX_ENERGY {
            cell.energy = 0;
            overflows.push(Overflow {
                hex,
                prior_owner,
                kind: ChainKind::classify(prior_owner, actor),
                pass: 0,
            });
        }
        cell.recompute_owner();
    }

    overflows
}

/// Reset every main-board cell still beyond the limit
fn sweep_out_of_range(board: &mut Board, actor: Player, pass: u32) -> Vec<Overflow> {
    let mut overflows = Vec::new();

    for cell in board.main_cells_mut() {
        if cell.disabled || cell.energy.abs() <= MAX_ENERGY {
            continue;
        }
        let prior_owner = cell.owner();
        cell.energy = 0;
        cell.recompute_owner();
        overflows.push(Overflow {
            hex: cell.hex,
            prior_owner,
            kind: ChainKind::classify(prior_owner, actor),
            pass,
        });
    }

    overflows
}

fn grant_reward<P: RewardPolicy + ?Sized>(
    board: &mut Board,
    player: Player,
    kind: ChainKind,
    policy: &mut P,
) -> Reward {
    match kind {
        ChainKind::Own => {
            let hand = board.hand_mut(player);
            match policy.boost_hand(hand, player) {
                Some(idx) => Reward::HandBoost {
                    player,
                    hex: hand[idx].hex,
                },
                None => Reward::Unplaced { player, kind },
            }
        }
        ChainKind::Enemy => {
            let candidates: Vec<Hex> = board
                .main_cells()
                .iter()
                .filter(|c| !c.disabled && c.is_owned_by(player) && c.core.is_none())
                .map(|c| c.hex)
                .collect();
            match policy.pick_core_cell(&candidates) {
                Some(hex) if board.place_core(hex, player) => Reward::CorePlaced { player, hex },
                _ => Reward::Unplaced { player, kind },
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, HAND_LIMIT};
    use crate::config::MapConfig;
    use crate::invariants::check_invariants;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Radius-1 board (7 cells) with a single-tile +1 hand for player one
    /// and a single-tile -1 hand for player two
    fn small_board() -> Board {
        let mut board = Board::blank(MapConfig::regular(2));
        for player in Player::BOTH {
            for cell in board.hand_mut(player) {
                cell.energy = 0;
            }
        }
        let one_center = crate::board::HAND_CENTERS[0];
        let two_center = crate::board::HAND_CENTERS[1];
        board.set_energy(Zone::Hand(Player::One), one_center, 1);
        board.set_energy(Zone::Hand(Player::Two), two_center, -1);
        board
    }

    /// Give both players a spare core far from the action so a single
    /// burst does not end the game
    fn with_cores(mut board: Board, target: Hex) -> Board {
        let spare_one = Hex::new(1, -1);
        let spare_two = Hex::new(-1, 1);
        assert_ne!(spare_one, target);
        assert_ne!(spare_two, target);
        board.set_energy(Zone::Main, spare_one, 1);
        board.place_core(spare_one, Player::One);
        board.set_energy(Zone::Main, spare_two, -1);
        board.place_core(spare_two, Player::Two);
        board
    }

    fn cell(board: &Board, hex: Hex) -> Cell {
        *board.main_cell(hex).unwrap()
    }

    #[test]
    fn test_scenario_a_no_chain() {
        let target = Hex::new(0, 0);
        let mut board = with_cores(small_board(), target);
        board.set_energy(Zone::Main, target, 3);
        let mut chains = ChainCounters::new();

        let outcome = apply_action(&mut board, &mut chains, target, Player::One, &mut FirstMatch);

        assert_eq!(cell(&board, target).energy, 4);
        assert!(outcome.overflows.is_empty());
        assert!(!outcome.turn_continues);
        assert!(!outcome.game_over());
    }

    #[test]
    fn test_scenario_b_burst_without_reward() {
        let target = Hex::new(0, 0);
        let mut board = with_cores(small_board(), target);
        board.set_energy(Zone::Main, target, 9);
        let mut chains = ChainCounters::new();

        let outcome = apply_action(&mut board, &mut chains, target, Player::One, &mut FirstMatch);

        assert_eq!(cell(&board, target).energy, 0);
        assert_eq!(outcome.overflows.len(), 1);
        assert_eq!(outcome.overflows[0].kind, ChainKind::Own);
        assert_eq!(outcome.overflows[0].prior_owner, Some(Player::One));
        assert_eq!(chains.get(Player::One).own, 1);
        assert!(outcome.rewards.is_empty());
        assert!(outcome.turn_continues);
    }

    #[test]
    fn test_scenario_c_own_reward_ends_turn() {
        let target = Hex::new(0, 0);
        let mut board = with_cores(small_board(), target);
        board.set_energy(Zone::Main, target, 9);
        let mut chains = ChainCounters::new();
        chains.get_mut(Player::One).own = 3;
        let hand_before: i32 = board.hand(Player::One).iter().map(|c| c.energy as i32).sum();

        let outcome = apply_action(&mut board, &mut chains, target, Player::One, &mut FirstMatch);

        assert_eq!(chains.get(Player::One).own, 0);
        // Search placement boosts the first weakest tile
        let weakest = board.hand(Player::One)[0].hex;
        assert_eq!(
            outcome.rewards,
            vec![Reward::HandBoost {
                player: Player::One,
                hex: weakest
            }]
        );
        assert_eq!(board.hand(Player::One)[0].energy, 1);
        let hand_after: i32 = board.hand(Player::One).iter().map(|c| c.energy as i32).sum();
        assert_eq!(hand_after, hand_before + 1);
        assert!(!outcome.turn_continues);
    }

    #[test]
    fn test_scenario_d_enemy_reward_keeps_turn() {
        // Player one pushes an opponent cell from -9 past the limit
        let target = Hex::new(0, 0);
        let mut board = with_cores(small_board(), target);
        board.set_energy(Zone::Main, target, -9);
        board.set_energy(Zone::Hand(Player::One), crate::board::HAND_CENTERS[0], -1);
        let mut chains = ChainCounters::new();
        chains.get_mut(Player::One).enemy = 1;
        let cores_before = board.core_count(Player::One);

        let outcome = apply_action(&mut board, &mut chains, target, Player::One, &mut FirstMatch);

        assert_eq!(cell(&board, target).energy, 0);
        assert_eq!(outcome.overflows[0].kind, ChainKind::Enemy);
        assert_eq!(chains.get(Player::One).enemy, 0);
        assert_eq!(outcome.rewards.len(), 1);
        assert_eq!(outcome.rewards[0].kind(), ChainKind::Enemy);
        // The only owned cell already has a core, so nothing is placed
        assert_eq!(board.core_count(Player::One), cores_before);
        assert!(outcome.turn_continues);
    }

    #[test]
    fn test_enemy_reward_places_core_on_first_eligible() {
        let target = Hex::new(0, 0);
        let mut board = with_cores(small_board(), target);
        board.set_energy(Zone::Main, target, -9);
        board.set_energy(Zone::Main, Hex::new(1, 0), 2);
        board.set_energy(Zone::Main, Hex::new(0, 1), 2);
        // Pattern of a single -1 tile keeps the neighbors untouched
        board.set_energy(Zone::Hand(Player::One), crate::board::HAND_CENTERS[0], -1);
        let mut chains = ChainCounters::new();
        chains.get_mut(Player::One).enemy = 1;

        let outcome = apply_action(&mut board, &mut chains, target, Player::One, &mut FirstMatch);

        let first_eligible = board
            .main_cells()
            .iter()
            .find(|c| c.is_owned_by(Player::One) && c.hex != Hex::new(1, -1))
            .unwrap()
            .hex;
        assert_eq!(
            outcome.rewards,
            vec![Reward::CorePlaced { player: Player::One, hex: first_eligible }]
        );
        assert_eq!(board.core_count(Player::One), 2);
        assert!(check_invariants(&board).is_empty());
    }

    #[test]
    fn test_scenario_e_last_core_destroyed() {
        let target = Hex::new(0, 0);
        let mut board = small_board();
        board.set_energy(Zone::Main, Hex::new(1, -1), 1);
        board.place_core(Hex::new(1, -1), Player::One);
        // Opponent's only core sits on the target at -9
        board.set_energy(Zone::Main, target, -9);
        board.place_core(target, Player::Two);
        board.set_energy(Zone::Hand(Player::One), crate::board::HAND_CENTERS[0], -1);
        let mut chains = ChainCounters::new();

        let outcome = apply_action(&mut board, &mut chains, target, Player::One, &mut FirstMatch);

        assert!(outcome.game_over());
        assert_eq!(outcome.winner(), Some(Player::One));
        assert!(outcome.overflowed());
        assert!(!outcome.turn_continues);
    }

    #[test]
    fn test_both_cores_gone_is_draw() {
        let target = Hex::new(0, 0);
        let mut board = small_board();
        board.set_energy(Zone::Main, target, -9);
        board.place_core(target, Player::Two);
        board.set_energy(Zone::Hand(Player::One), crate::board::HAND_CENTERS[0], -1);
        let mut chains = ChainCounters::new();

        let outcome = apply_action(&mut board, &mut chains, target, Player::One, &mut FirstMatch);

        assert_eq!(outcome.result, GameResult::Draw);
        assert!(outcome.game_over());
        assert_eq!(outcome.winner(), None);
    }

    #[test]
    fn test_self_destruction_hands_win_to_opponent() {
        let target = Hex::new(0, 0);
        let mut board = small_board();
        board.set_energy(Zone::Main, target, 9);
        board.place_core(target, Player::One);
        board.set_energy(Zone::Main, Hex::new(-1, 1), -1);
        board.place_core(Hex::new(-1, 1), Player::Two);
        let mut chains = ChainCounters::new();

        let outcome = apply_action(&mut board, &mut chains, target, Player::One, &mut FirstMatch);

        assert_eq!(outcome.winner(), Some(Player::Two));
        assert!(!outcome.turn_continues);
    }

    #[test]
    fn test_neutralized_core_is_cleared() {
        let target = Hex::new(0, 0);
        let mut board = with_cores(small_board(), target);
        // Player two's hand drains a player one core cell to neutral
        board.set_energy(Zone::Main, Hex::new(1, 0), 1);
        board.place_core(Hex::new(1, 0), Player::One);
        let mut chains = ChainCounters::new();

        apply_action(&mut board, &mut chains, Hex::new(1, 0), Player::Two, &mut FirstMatch);

        let drained = cell(&board, Hex::new(1, 0));
        assert_eq!(drained.energy, 0);
        assert_eq!(drained.core, None);
        assert!(check_invariants(&board).is_empty());
    }

    #[test]
    fn test_handoff_resets_own_chain() {
        let target = Hex::new(0, 0);
        let mut board = with_cores(small_board(), target);
        board.set_energy(Zone::Main, target, 2);
        let mut chains = ChainCounters::new();
        chains.get_mut(Player::One).own = 2;
        chains.get_mut(Player::One).enemy = 1;

        let outcome = apply_action(&mut board, &mut chains, target, Player::One, &mut FirstMatch);

        assert!(!outcome.turn_continues);
        assert_eq!(chains.get(Player::One).own, 0);
        assert_eq!(chains.get(Player::One).enemy, 1);
    }

    #[test]
    fn test_off_board_tiles_are_skipped() {
        // Full starting hand on an edge cell of the small board
        let mut board = Board::new(MapConfig::regular(2));
        let mut chains = ChainCounters::new();
        let target = Hex::new(1, 0);
        let before = cell(&board, target).energy;

        let outcome = apply_action(&mut board, &mut chains, target, Player::One, &mut FirstMatch);

        assert_eq!(cell(&board, target).energy, before + 3);
        assert!(outcome.overflows.is_empty());
        assert!(check_invariants(&board).is_empty());
    }

    #[test]
    fn test_disabled_cells_never_change() {
        let mut board = Board::new(MapConfig::compact(4));
        let mut chains = ChainCounters::new();
        let target = Hex::new(2, 0);
        let disabled_before: Vec<Cell> = board.main_cells().iter().filter(|c| c.disabled).copied().collect();

        apply_action(&mut board, &mut chains, target, Player::One, &mut FirstMatch);

        let disabled_after: Vec<Cell> = board.main_cells().iter().filter(|c| c.disabled).copied().collect();
        assert_eq!(disabled_before, disabled_after);
    }

    #[test]
    fn test_sweep_resets_out_of_range_cells() {
        let mut board = with_cores(small_board(), Hex::new(0, 0));
        board.get_cell_mut(Zone::Main, Hex::new(0, -1)).unwrap().energy = -12;
        let mut chains = ChainCounters::new();

        // Target is two steps away, so the pattern never touches the bad cell
        let outcome = apply_action(&mut board, &mut chains, Hex::new(1, 0), Player::One, &mut FirstMatch);

        let swept: Vec<&Overflow> = outcome.overflows.iter().filter(|o| o.pass == 1).collect();
        assert_eq!(swept.len(), 1);
        assert_eq!(swept[0].hex, Hex::new(0, -1));
        assert_eq!(swept[0].kind, ChainKind::Enemy);
        assert_eq!(cell(&board, Hex::new(0, -1)).energy, 0);
        assert_eq!(chains.get(Player::One).enemy, 1);
    }

    #[test]
    fn test_four_own_bursts_fire_exactly_one_reward() {
        // Seven cells at +9 and a +1 everywhere hand: seven own bursts
        let mut board = Board::blank(MapConfig::regular(2));
        for player in Player::BOTH {
            for tile in board.hand_mut(player) {
                tile.energy = player.sign();
            }
        }
        let hexes: Vec<Hex> = board.main_cells().iter().map(|c| c.hex).collect();
        for hex in &hexes {
            board.set_energy(Zone::Main, *hex, 9);
        }
        board.place_core(Hex::new(1, -1), Player::One);
        let mut chains = ChainCounters::new();

        let outcome = apply_action(&mut board, &mut chains, Hex::new(0, 0), Player::One, &mut FirstMatch);

        assert_eq!(outcome.overflows.len(), 7);
        assert_eq!(outcome.rewards.iter().filter(|r| r.kind() == ChainKind::Own).count(), 1);
        // 7 bursts = one reward at 4, then 3 left, cleared by the handoff
        assert_eq!(chains.get(Player::One).own, 0);
        assert!(!outcome.turn_continues);
        // Player one's only core burst away; nobody has cores left
        assert_eq!(outcome.result, GameResult::Draw);
    }

    #[test]
    fn test_live_move_reshuffles_reservoir() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut board = Board::new(MapConfig::default());
        let mut chains = ChainCounters::new();
        let before: Vec<i8> = board.hand(Player::One).iter().map(|c| c.energy).collect();

        let outcome = apply_move(&mut board, &mut chains, Hex::new(3, 0), Player::One, &mut rng);

        let after: Vec<i8> = board.hand(Player::One).iter().map(|c| c.energy).collect();
        assert!(!outcome.overflowed());
        assert_ne!(before, after);
        assert_eq!(after.iter().map(|&e| e as i32).sum::<i32>(), 9);
        assert!(after.iter().all(|e| e.abs() <= HAND_LIMIT));
    }
}
