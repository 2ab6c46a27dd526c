//! Match command - play games between two difficulty settings
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use burst_core::{
    Difficulty, GameConfig, GameResult, MapConfig, MapVariant, Player, SearchAi, Session, VictoryKind,
};

use crate::play_cmd::describe_result;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Difficulty of the first contender
    #[arg(long, default_value = "hard")]
    pub first: Difficulty,

    /// Difficulty of the second contender
    #[arg(long, default_value = "normal")]
    pub second: Difficulty,

    /// Number of games to play (contenders alternate seats)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Main board size
    #[arg(long, default_value = "4")]
    pub size: i8,

    /// Map variant: regular or compact
    #[arg(long, default_value = "regular")]
    pub variant: MapVariant,

    /// Maximum actions per game
    #[arg(long, default_value = "400")]
    pub max_actions: usize,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    /// True if the first contender held the player one seat
    first_is_one: bool,
    result: GameResult,
    victory: Option<VictoryKind>,
    actions: usize,
    turns: u32,
}

impl GameRecord {
    /// Did the first contender win this game?
    fn first_won(&self) -> Option<bool> {
        self.result.winner().map(|w| (w == Player::One) == self.first_is_one)
    }
}

/// Aggregated match results
#[derive(Clone, Debug, Serialize)]
struct MatchResults {
    games: Vec<GameRecord>,
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    unfinished: usize,
    avg_actions: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Play the match (games in parallel)
/// 2. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let map = MapConfig {
        size: args.size,
        variant: args.variant,
    };
    map.validate()?;

    tracing::info!(
        "Starting match: {} vs {} ({} games, {} map of size {})",
        args.first,
        args.second,
        args.games,
        map.variant,
        map.size
    );

    let base_seed = create_rng(seed).gen::<u64>();
    let results = play_match(&args, map, base_seed)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(args: &MatchArgs, map: MapConfig, base_seed: u64) -> Result<MatchResults> {
    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")?
                .progress_chars("=>-"),
        );
        pb
    };

    let games: Vec<GameRecord> = (0..args.games)
        .into_par_iter()
        .map(|game_index| {
            let config = GameConfig {
                map,
                seed: Some(base_seed.wrapping_add(game_index as u64)),
                ..GameConfig::default()
            };
            // Alternate seats for fairness
            let first_is_one = game_index % 2 == 0;
            let record = play_single_game(&config, args, game_index + 1, first_is_one);
            pb.inc(1);
            record
        })
        .collect::<Result<_>>()?;

    pb.finish_and_clear();

    for record in &games {
        tracing::info!(
            "Game {}: {} ({} actions)",
            record.game_number,
            describe_result(record.result),
            record.actions
        );
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results, args)
    } else {
        print_text_results(results, args);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play a single game; the config seed drives the board and both seats
fn play_single_game(
    config: &GameConfig,
    args: &MatchArgs,
    game_number: usize,
    first_is_one: bool,
) -> Result<GameRecord> {
    let seed = config.seed.unwrap_or(42);
    let (one, two) = if first_is_one {
        (args.first, args.second)
    } else {
        (args.second, args.first)
    };

    let mut session = Session::new(config)?;
    let mut ai_one = SearchAi::with_seed(Player::One, one, seed.wrapping_add(1));
    let mut ai_two = SearchAi::with_seed(Player::Two, two, seed.wrapping_add(2));

    let result = session.play_out(&mut ai_one, &mut ai_two, args.max_actions);

    Ok(GameRecord {
        game_number,
        first_is_one,
        result,
        victory: session.victory_kind(),
        actions: session.history().len(),
        turns: session.turn(),
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let first_wins = games.iter().filter(|g| g.first_won() == Some(true)).count();
    let second_wins = games.iter().filter(|g| g.first_won() == Some(false)).count();
    let draws = games.iter().filter(|g| g.result == GameResult::Draw).count();
    let unfinished = games.iter().filter(|g| g.result == GameResult::Ongoing).count();

    let total_actions: usize = games.iter().map(|g| g.actions).sum();
    let avg_actions = if games.is_empty() {
        0.0
    } else {
        total_actions as f32 / games.len() as f32
    };

    MatchResults {
        games,
        first_wins,
        second_wins,
        draws,
        unfinished,
        avg_actions,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        finished_at: DateTime<Utc>,
        first: Difficulty,
        second: Difficulty,
        total_games: usize,
        first_win_rate: f32,
        #[serde(flatten)]
        results: &'a MatchResults,
    }

    let total = results.games.len();
    let output = JsonOutput {
        finished_at: Utc::now(),
        first: args.first,
        second: args.second,
        total_games: total,
        first_win_rate: percent(results.first_wins, total) / 100.0,
        results,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();

    println!("\n=== Match Results ({}) ===", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Total games: {}", total);
    println!(
        "{:<6} wins: {} ({:.1}%)",
        args.first.name(),
        results.first_wins,
        percent(results.first_wins, total)
    );
    println!(
        "{:<6} wins: {} ({:.1}%)",
        args.second.name(),
        results.second_wins,
        percent(results.second_wins, total)
    );
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Unfinished:  {} ({:.1}%)", results.unfinished, percent(results.unfinished, total));
    println!("Avg actions: {:.1}", results.avg_actions);

    println!("\nGame details:");
    for game in &results.games {
        let seat = if game.first_is_one { "P1" } else { "P2" };
        println!(
            "  Game {}: {} ({} as {}) in {} actions",
            game.game_number,
            describe_result(game.result),
            args.first.name(),
            seat,
            game.actions
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
