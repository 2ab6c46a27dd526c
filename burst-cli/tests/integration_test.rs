//! Integration tests for the Burst Cascade engine
//!
//! Tests the full stack: board setup, cascade resolution, search AI,
//! sessions and configuration files

use burst_core::{
    apply_action, check_invariants, Board, BoardSnapshot, ChainCounters, ChainKind, Difficulty, FirstMatch,
    GameConfig, GameResult, Hex, MapConfig, MapVariant, Player, SearchAi, SearchBudget, Session, Zone,
    HAND_LIMIT, MAX_ENERGY,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn seeded_config(map: MapConfig, seed: u64) -> GameConfig {
    GameConfig {
        map,
        seed: Some(seed),
        ..GameConfig::default()
    }
}

/// Play a whole game action by action, checking invariants after each
fn play_checked(config: &GameConfig, one: Difficulty, two: Difficulty, max_actions: usize) -> Session {
    let mut session = Session::new(config).unwrap();
    let seed = config.seed.unwrap_or(0);
    let mut ai_one = SearchAi::with_seed(Player::One, one, seed + 1);
    let mut ai_two = SearchAi::with_seed(Player::Two, two, seed + 2);

    for _ in 0..max_actions {
        if session.is_over() {
            break;
        }
        let mover = session.current_player();
        let ai = match mover {
            Player::One => &mut ai_one,
            Player::Two => &mut ai_two,
        };
        let outcome = session.play_ai(ai).unwrap().expect("a seat with cores always has a target");

        let violations = check_invariants(session.board());
        assert!(violations.is_empty(), "{:?}", violations);

        // Nothing refills a burst cell within the same action
        for overflow in &outcome.overflows {
            let cell = session.board().main_cell(overflow.hex).unwrap();
            assert_eq!(cell.energy, 0);
            assert_eq!(cell.core, None);
        }
        assert_eq!(
            outcome.turn_continues,
            !outcome.game_over() && outcome.overflowed() && !outcome.own_reward_fired()
        );
        if outcome.turn_continues {
            assert_eq!(session.current_player(), mover);
        } else if !outcome.game_over() {
            assert_eq!(session.current_player(), mover.opponent());
        }
    }

    session
}

// ============================================================================
// CASCADE TESTS
// ============================================================================

#[test]
fn test_full_game_keeps_invariants() {
    let config = seeded_config(MapConfig::default(), 21);
    let session = play_checked(&config, Difficulty::Easy, Difficulty::Easy, 150);
    assert!(!session.history().is_empty());
    println!(
        "Game ended: {:?} after {} actions",
        session.result(),
        session.history().len()
    );
}

#[test]
fn test_compact_game_keeps_invariants() {
    let config = seeded_config(MapConfig::compact(5), 8);
    let session = play_checked(&config, Difficulty::Normal, Difficulty::Easy, 80);
    for cell in session.board().main_cells().iter().filter(|c| c.disabled) {
        assert_eq!(cell.energy, 0);
        assert_eq!(cell.core, None);
    }
}

#[test]
fn test_chain_bursts_across_board() {
    // Ring of +9 cells around the center: one action bursts seven cells
    let mut board = Board::blank(MapConfig::default());
    for tile in board.hand_mut(Player::One) {
        tile.energy = 1;
    }
    for hex in [Hex::new(0, 0)].into_iter().chain(Hex::new(0, 0).neighbors()) {
        board.set_energy(Zone::Main, hex, 9);
    }
    board.set_energy(Zone::Main, Hex::new(3, 0), 2);
    board.place_core(Hex::new(3, 0), Player::One);
    board.set_energy(Zone::Main, Hex::new(-3, 0), -2);
    board.place_core(Hex::new(-3, 0), Player::Two);

    let mut chains = ChainCounters::new();
    let outcome = apply_action(&mut board, &mut chains, Hex::new(0, 0), Player::One, &mut FirstMatch);

    assert_eq!(outcome.overflows.len(), 7);
    assert!(outcome.overflows.iter().all(|o| o.kind == ChainKind::Own));
    assert_eq!(outcome.rewards.len(), 1);
    assert!(!outcome.turn_continues);
    assert_eq!(outcome.result, GameResult::Ongoing);
    for overflow in &outcome.overflows {
        assert_eq!(board.main_cell(overflow.hex).unwrap().energy, 0);
    }
    assert!(board.cells().iter().all(|c| match c.zone {
        Zone::Main => c.energy.abs() <= MAX_ENERGY,
        Zone::Hand(_) => c.energy.abs() <= HAND_LIMIT,
    }));
}

// ============================================================================
// SEARCH AI TESTS
// ============================================================================

#[test]
fn test_ai_does_not_touch_live_board() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let board = Board::shuffled(MapConfig::default(), &mut rng);
    let before = board.snapshot();

    let mut ai = SearchAi::new(Player::Two, Difficulty::Hard).with_budget(SearchBudget::nodes(2_000));
    let target = ai.best_move(&board, &ChainCounters::new());

    assert!(target.is_some());
    assert_eq!(board.snapshot(), before);
}

#[test]
fn test_ai_time_budget() {
    let board = Board::new(MapConfig::default());
    let mut ai = SearchAi::new(Player::One, Difficulty::Hard).with_budget(SearchBudget::time(Duration::from_millis(200)));

    let start = Instant::now();
    let target = ai.best_move(&board, &ChainCounters::new());
    let elapsed = start.elapsed();

    println!("Hard search with 200ms budget: {:?}", elapsed);
    assert!(target.is_some());
    assert!(elapsed.as_millis() < 30000, "search ignored its budget");
}

#[test]
fn test_ranking_top_dominates_easy_pick() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let board = Board::shuffled(MapConfig::compact(5), &mut rng);
    let chains = ChainCounters::new();

    let hard = SearchAi::new(Player::One, Difficulty::Hard).with_depth(2.0);
    let ranked = hard.rank_moves(&board, &chains);
    let mut easy = SearchAi::with_seed(Player::One, Difficulty::Easy, 5);
    let easy_pick = easy.best_move(&board, &chains).unwrap();

    let easy_score = ranked.iter().find(|m| m.hex == easy_pick).unwrap().score;
    assert!(ranked[0].score >= easy_score);
}

// ============================================================================
// SESSION AND CONFIG TESTS
// ============================================================================

#[test]
fn test_seeded_sessions_are_reproducible() {
    let config = seeded_config(MapConfig::compact(4), 99);
    let a = play_checked(&config, Difficulty::Normal, Difficulty::Easy, 40);
    let b = play_checked(&config, Difficulty::Normal, Difficulty::Easy, 40);
    assert_eq!(a.history(), b.history());
    assert_eq!(a.board().snapshot(), b.board().snapshot());
}

#[test]
fn test_snapshot_resumes_game() {
    let config = seeded_config(MapConfig::default(), 31);
    let session = play_checked(&config, Difficulty::Easy, Difficulty::Easy, 10);

    let json = serde_json::to_string(&session.board().snapshot()).unwrap();
    let snapshot: BoardSnapshot = serde_json::from_str(&json).unwrap();
    let restored = Board::from_snapshot(&snapshot);

    let mut resumed = Session::from_parts(
        restored,
        *session.chains(),
        session.current_player(),
        ChaCha8Rng::seed_from_u64(1),
    );
    assert_eq!(resumed.result(), session.result());
    if !resumed.is_over() {
        let mut ai = SearchAi::new(resumed.current_player(), Difficulty::Easy);
        assert!(resumed.play_ai(&mut ai).unwrap().is_some());
    }
}

#[test]
fn test_config_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.json");

    let config = GameConfig {
        map: MapConfig::compact(5),
        difficulty: Difficulty::Normal,
        ai_seat: Some(Player::Two),
        seed: Some(1234),
    };
    config.save(&path).unwrap();
    let loaded = GameConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    std::fs::write(&path, r#"{"map": {"size": 4, "variant": "mini"}}"#).unwrap();
    let legacy = GameConfig::load(&path).unwrap();
    assert_eq!(legacy.map.variant, MapVariant::Compact);
    assert_eq!(legacy.difficulty, Difficulty::Hard);

    std::fs::write(&path, r#"{"map": {"size": 1}}"#).unwrap();
    assert!(GameConfig::load(&path).is_err());
}
