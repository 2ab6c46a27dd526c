//! Play command - one game between two computer seats
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), seat_difficulties(), play_game(), write_report()
//! - Level 3: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use burst_core::{
    BoardSnapshot, Difficulty, GameConfig, GameResult, MapVariant, MoveRecord, Player, SearchAi, Session,
    VictoryKind,
};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Game configuration JSON file (map, difficulty, AI seat, seed)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Difficulty of the player one seat (overrides the config file)
    #[arg(long)]
    pub one: Option<Difficulty>,

    /// Difficulty of the player two seat (overrides the config file)
    #[arg(long)]
    pub two: Option<Difficulty>,

    /// Main board size (overrides the config file)
    #[arg(long)]
    pub size: Option<i8>,

    /// Map variant: regular or compact (overrides the config file)
    #[arg(long)]
    pub variant: Option<MapVariant>,

    /// Stop after this many actions
    #[arg(long, default_value = "400")]
    pub max_actions: usize,

    /// Write the final board and move history as JSON
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Everything worth keeping about a finished game
#[derive(Serialize)]
pub struct GameReport {
    pub played_at: DateTime<Utc>,
    pub config: GameConfig,
    pub one: Difficulty,
    pub two: Difficulty,
    pub first: Player,
    pub result: GameResult,
    pub victory: Option<VictoryKind>,
    pub actions: usize,
    pub turns: u32,
    pub final_board: BoardSnapshot,
    pub history: Vec<MoveRecord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;
    let (one, two) = seat_difficulties(&args, &config);

    tracing::info!(
        "Starting game: {} vs {} on {} map of size {}",
        one,
        two,
        config.map.variant,
        config.map.size
    );

    let report = play_game(&config, one, two, args.max_actions)?;

    print_summary(&report);
    if let Some(path) = &args.output {
        write_report(&report, path)?;
        tracing::info!("Game written to {}", path.display());
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Merge the config file (if any) with command-line overrides
pub fn build_config(args: &PlayArgs, seed: Option<u64>) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load game config: {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(size) = args.size {
        config.map.size = size;
    }
    if let Some(variant) = args.variant {
        config.map.variant = variant;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    config.map.validate()?;
    Ok(config)
}

/// Difficulty per seat. Flags win; otherwise the config difficulty applies
/// to its AI seat (both seats when none is named) and the other seat
/// plays at the default tier.
pub fn seat_difficulties(args: &PlayArgs, config: &GameConfig) -> (Difficulty, Difficulty) {
    let from_config = |seat: Player| match config.ai_seat {
        Some(ai) if ai != seat => Difficulty::default(),
        _ => config.difficulty,
    };
    (
        args.one.unwrap_or_else(|| from_config(Player::One)),
        args.two.unwrap_or_else(|| from_config(Player::Two)),
    )
}

/// Play one game to completion (or the action limit)
pub fn play_game(config: &GameConfig, one: Difficulty, two: Difficulty, max_actions: usize) -> Result<GameReport> {
    let mut session = Session::new(config)?;
    let first = session.current_player();

    let base_seed = config.seed.unwrap_or(42);
    let mut ai_one = SearchAi::with_seed(Player::One, one, base_seed.wrapping_add(1));
    let mut ai_two = SearchAi::with_seed(Player::Two, two, base_seed.wrapping_add(2));

    let result = session.play_out(&mut ai_one, &mut ai_two, max_actions);

    Ok(GameReport {
        played_at: Utc::now(),
        config: config.clone(),
        one,
        two,
        first,
        result,
        victory: session.victory_kind(),
        actions: session.history().len(),
        turns: session.turn(),
        final_board: session.board().snapshot(),
        history: session.history().to_vec(),
    })
}

pub fn write_report(report: &GameReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

// ============================================================================
// LEVEL 3 - UTILITIES
// ============================================================================

fn print_summary(report: &GameReport) {
    println!("\n=== Game Result ===");
    println!("First to act: {}", report.first);
    println!("Result:       {}", describe_result(report.result));
    if let Some(kind) = report.victory {
        println!("Victory:      {:?}", kind);
    }
    println!("Actions:      {}", report.actions);
    println!("Turns:        {}", report.turns);
}

pub fn describe_result(result: GameResult) -> String {
    match result {
        GameResult::Won(player) => format!("{} wins", player),
        GameResult::Draw => "draw".to_string(),
        GameResult::Ongoing => "unfinished".to_string(),
    }
}
