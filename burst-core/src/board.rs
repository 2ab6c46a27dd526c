//! Hex board geometry and cell storage with axial coordinates

use std::fmt;
use std::ops::Range;

use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::{MapConfig, MapVariant};
use crate::hand::{self, ShufflePattern};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Largest energy magnitude a main-board cell holds at rest
pub const MAX_ENERGY: i8 = 9;

/// Energy bound for reservoir tiles
pub const HAND_LIMIT: i8 = 5;

/// Designated reservoir centers, indexed by `Player::index`
pub const HAND_CENTERS: [Hex; 2] = [Hex::new(-2, -6), Hex::new(2, 6)];

/// Reservoir radius (radius 1 = 7 tiles)
const HAND_RADIUS: i8 = 1;

/// Energy on each starting corner
const CORNER_ENERGY: i8 = 3;

/// Starting reservoir energies
const HAND_CENTER_ENERGY: i8 = 3;
const HAND_RING_ENERGY: i8 = 1;

/// Random redistributions applied to each reservoir when a game starts
pub const OPENING_SHUFFLES: usize = 6;

/// Direction vectors in axial coordinates (dq, dr)
/// Index: 0=N, 1=NE, 2=SE, 3=S, 4=SW, 5=NW
pub const DIRECTIONS: [(i8, i8); 6] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // NW
];

// ============================================================================
// GEOMETRY
// ============================================================================

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
}

impl Hex {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(&self) -> i8 {
        (self.q.abs() + self.r.abs() + (self.q + self.r).abs()) / 2
    }

    /// Translate by an axial offset
    pub fn offset(&self, dq: i8, dr: i8) -> Hex {
        Hex::new(self.q + dq, self.r + dr)
    }

    /// All six neighbors
    pub fn neighbors(&self) -> impl Iterator<Item = Hex> + '_ {
        DIRECTIONS.iter().map(move |&(dq, dr)| self.offset(dq, dr))
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// All hexes within `radius` of `center`, in q-major order
fn hexagon(center: Hex, radius: i8) -> impl Iterator<Item = Hex> {
    (-radius..=radius).flat_map(move |q| {
        let r1 = (-radius).max(-q - radius);
        let r2 = radius.min(-q + radius);
        (r1..=r2).map(move |r| center.offset(q, r))
    })
}

// ============================================================================
// PLAYERS AND ZONES
// ============================================================================

/// Seat at the table. Player one owns positive energy, player two negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Sign of the energy this player owns
    pub fn sign(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Owner implied by an energy value; zero is neutral
    pub fn from_energy(energy: i8) -> Option<Player> {
        match energy.signum() {
            1 => Some(Player::One),
            -1 => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "P1"),
            Player::Two => write!(f, "P2"),
        }
    }
}

/// Region of the table a cell belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Main,
    Hand(Player),
}

// ============================================================================
// CELLS
// ============================================================================

/// One hex position holding signed energy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub hex: Hex,
    pub zone: Zone,
    pub energy: i8,
    /// Core marker and the player it belongs to
    pub core: Option<Player>,
    /// Excluded from play (compact map outer ring)
    pub disabled: bool,
}

impl Cell {
    pub fn new(hex: Hex, zone: Zone, energy: i8) -> Self {
        Self {
            hex,
            zone,
            energy,
            core: None,
            disabled: false,
        }
    }

    /// Owner derived from the sign of the energy
    pub fn owner(&self) -> Option<Player> {
        Player::from_energy(self.energy)
    }

    /// Re-derive ownership after an energy change and drop a core marker
    /// that no longer matches the owner. Returns the new owner.
    pub fn recompute_owner(&mut self) -> Option<Player> {
        let owner = self.owner();
        if self.core.is_some() && self.core != owner {
            self.core = None;
        }
        owner
    }

    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner() == Some(player)
    }

    pub fn has_core_of(&self, player: Player) -> bool {
        self.core == Some(player)
    }
}

/// One tile of a hand pattern, relative to the reservoir center
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTile {
    pub dq: i8,
    pub dr: i8,
    pub delta: i8,
}

// ============================================================================
// BOARD
// ============================================================================

/// Main board plus both hand reservoirs (clone to branch)
#[derive(Clone, Debug)]
pub struct Board {
    config: MapConfig,
    cells: Vec<Cell>,
    index: FxHashMap<(Zone, Hex), usize>,
    main: Range<usize>,
    hands: [Range<usize>; 2],
}

/// Serializable board state for replay and undo
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub config: MapConfig,
    pub cells: Vec<Cell>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Opening layout: alternating cornered cores, unshuffled reservoirs
    pub fn new(config: MapConfig) -> Self {
        Self::build(config, true)
    }

    /// Opening layout with each reservoir shuffled the way a live game starts
    pub fn shuffled<R: Rng + ?Sized>(config: MapConfig, rng: &mut R) -> Self {
        let mut board = Self::new(config);
        for _ in 0..OPENING_SHUFFLES {
            for player in Player::BOTH {
                hand::redistribute(board.hand_mut(player), ShufflePattern::Random, rng);
            }
        }
        board
    }

    /// Empty main board (no energy, no cores) with starting reservoirs.
    /// Useful for composing positions.
    pub fn blank(config: MapConfig) -> Self {
        Self::build(config, false)
    }

    fn build(config: MapConfig, with_corners: bool) -> Self {
        let radius = config.size - 1;
        let corner_distance = match config.variant {
            MapVariant::Regular => config.size - 1,
            MapVariant::Compact => config.size - 2,
        };
        let corners = corner_hexes(corner_distance);

        let mut cells = Vec::new();
        for hex in hexagon(Hex::new(0, 0), radius) {
            let mut cell = Cell::new(hex, Zone::Main, 0);
            if config.variant == MapVariant::Compact && hex.distance_to_center() >= config.size - 1 {
                cell.disabled = true;
            }
            if with_corners && !cell.disabled {
                if let Some(idx) = corners.iter().position(|&c| c == hex) {
                    let player = if idx % 2 == 0 { Player::One } else { Player::Two };
                    cell.energy = CORNER_ENERGY * player.sign();
                    cell.core = Some(player);
                }
            }
            cells.push(cell);
        }
        let main = 0..cells.len();

        let mut hands = [0..0, 0..0];
        for player in Player::BOTH {
            let start = cells.len();
            let center = HAND_CENTERS[player.index()];
            for hex in hexagon(center, HAND_RADIUS) {
                let base = if hex == center { HAND_CENTER_ENERGY } else { HAND_RING_ENERGY };
                cells.push(Cell::new(hex, Zone::Hand(player), base * player.sign()));
            }
            hands[player.index()] = start..cells.len();
        }

        let index = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| ((cell.zone, cell.hex), i))
            .collect();

        Self {
            config,
            cells,
            index,
            main,
            hands,
        }
    }

    /// Rebuild a board from a snapshot. Cells in the snapshot that do not
    /// exist on a board of the snapshot's configuration are ignored.
    ///
    /// Reservoir tiles are clamped to the reservoir bound. Main cells keep
    /// out-of-range energy (the next action sweeps it) but never `i8::MIN`.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        let mut board = Self::blank(snapshot.config);
        for saved in &snapshot.cells {
            if let Some(cell) = board.get_cell_mut(saved.zone, saved.hex) {
                cell.energy = match saved.zone {
                    Zone::Main => saved.energy.max(-i8::MAX),
                    Zone::Hand(_) => saved.energy.clamp(-HAND_LIMIT, HAND_LIMIT),
                };
                cell.core = saved.core;
                cell.disabled = saved.disabled;
            }
        }
        board
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            config: self.config,
            cells: self.cells.clone(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> MapConfig {
        self.config
    }

    /// Cell lookup by zone and coordinates
    pub fn get_cell(&self, zone: Zone, hex: Hex) -> Option<&Cell> {
        self.index.get(&(zone, hex)).map(|&i| &self.cells[i])
    }

    pub fn get_cell_mut(&mut self, zone: Zone, hex: Hex) -> Option<&mut Cell> {
        match self.index.get(&(zone, hex)) {
            Some(&i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// Main-board cell lookup
    pub fn main_cell(&self, hex: Hex) -> Option<&Cell> {
        self.get_cell(Zone::Main, hex)
    }

    /// Every cell, main board first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn main_cells(&self) -> &[Cell] {
        &self.cells[self.main.clone()]
    }

    pub(crate) fn main_cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells[self.main.clone()]
    }

    pub fn hand(&self, player: Player) -> &[Cell] {
        &self.cells[self.hands[player.index()].clone()]
    }

    pub fn hand_mut(&mut self, player: Player) -> &mut [Cell] {
        let range = self.hands[player.index()].clone();
        &mut self.cells[range]
    }

    /// The player's reservoir expressed as offsets from its center
    pub fn hand_pattern(&self, player: Player) -> Vec<PatternTile> {
        let center = HAND_CENTERS[player.index()];
        self.hand(player)
            .iter()
            .map(|cell| PatternTile {
                dq: cell.hex.q - center.q,
                dr: cell.hex.r - center.r,
                delta: cell.energy,
            })
            .collect()
    }

    /// Main-board cells the player may inject into
    pub fn legal_targets(&self, player: Player) -> Vec<Hex> {
        self.main_cells()
            .iter()
            .filter(|c| !c.disabled && c.is_owned_by(player))
            .map(|c| c.hex)
            .collect()
    }

    /// Live core markers of a player
    pub fn core_count(&self, player: Player) -> usize {
        self.main_cells()
            .iter()
            .filter(|c| !c.disabled && c.has_core_of(player))
            .count()
    }

    /// Main-board cells owned by a player
    pub fn territory(&self, player: Player) -> usize {
        self.main_cells()
            .iter()
            .filter(|c| !c.disabled && c.is_owned_by(player))
            .count()
    }

    // ========================================================================
    // POSITION EDITING
    // ========================================================================

    /// Overwrite a cell's energy and re-derive ownership.
    /// Returns false if the cell does not exist or is disabled.
    pub fn set_energy(&mut self, zone: Zone, hex: Hex, energy: i8) -> bool {
        match self.get_cell_mut(zone, hex) {
            Some(cell) if !cell.disabled => {
                cell.energy = energy;
                cell.recompute_owner();
                true
            }
            _ => false,
        }
    }

    /// Put a core marker on a main-board cell the player owns.
    /// Returns false if the placement would break core consistency.
    pub fn place_core(&mut self, hex: Hex, player: Player) -> bool {
        match self.get_cell_mut(Zone::Main, hex) {
            Some(cell) if !cell.disabled && cell.is_owned_by(player) => {
                cell.core = Some(player);
                true
            }
            _ => false,
        }
    }
}

/// The six starting corners, alternating player one / player two
fn corner_hexes(d: i8) -> [Hex; 6] {
    [
        Hex::new(d, 0),
        Hex::new(0, d),
        Hex::new(-d, d),
        Hex::new(-d, 0),
        Hex::new(0, -d),
        Hex::new(d, -d),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
