use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::EngineConfig;
use grid_snake::engine::{SimulationEngine, TickOutcome};
use grid_snake::error::{ConfigError, Result};
use grid_snake::input::{self, GameInput};
use grid_snake::logging;
use grid_snake::renderer;
use grid_snake::score::HighScoreStore;
use grid_snake::terminal_runtime::TerminalSession;
use grid_snake::theme::{Theme, ThemeChoice};
use grid_snake::ui::hud::HudInfo;

/// Longest wait for a tick; keeps `Instant` arithmetic in range for very slow speeds.
const MAX_TICK_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Parser)]
#[command(
    name = "grid-snake",
    version,
    about = "Classic grid snake in the terminal"
)]
struct Cli {
    /// JSON file with engine settings; missing keys take defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of grid rows (overrides the config file).
    #[arg(long)]
    rows: Option<u16>,

    /// Number of grid columns (overrides the config file).
    #[arg(long)]
    cols: Option<u16>,

    /// Seed for food placement, for reproducible rounds.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = ThemeChoice::Classic)]
    theme: ThemeChoice,

    /// Append tracing output to this file (filter with RUST_LOG).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let config = build_config(&cli)?;
    let engine = match cli.seed {
        Some(seed) => SimulationEngine::with_seed(config, seed)?,
        None => SimulationEngine::new(config)?,
    };

    // Report a broken score file before the terminal switches screens.
    let scores = HighScoreStore::open_default()?;

    let mut session = TerminalSession::enter()?;
    run(&mut session, engine, scores, cli.theme.theme())
}

fn build_config(cli: &Cli) -> std::result::Result<EngineConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };

    if cli.rows.is_some() || cli.cols.is_some() {
        config.row_count = cli.rows.unwrap_or(config.row_count);
        config.col_count = cli.cols.unwrap_or(config.col_count);
        if cli.config.is_none() {
            config.fit_starting_body();
        }
    }

    Ok(config)
}

fn run(
    session: &mut TerminalSession,
    mut engine: SimulationEngine,
    mut scores: HighScoreStore,
    theme: &Theme,
) -> Result<()> {
    // Best score as of the start of the round, so the death screen can tell a new record.
    let mut round_best = scores.best();
    let mut last_tick = Instant::now();

    loop {
        session.terminal_mut().draw(|frame| {
            renderer::render(
                frame,
                &engine,
                HudInfo {
                    best_score: round_best,
                    theme,
                },
            )
        })?;

        let deadline = last_tick + engine.tick_interval().min(MAX_TICK_INTERVAL);
        while let Some(game_input) = input::next_input(deadline)? {
            match game_input {
                GameInput::Quit => return Ok(()),
                GameInput::Direction(direction) => engine.set_direction(direction),
                GameInput::Acknowledge => {
                    if engine.acknowledge() {
                        round_best = scores.best();
                    }
                }
            }
        }

        last_tick = Instant::now();
        if let TickOutcome::Died(_) = engine.tick() {
            record_score(&mut scores, engine.score());
        }
    }
}

fn record_score(scores: &mut HighScoreStore, score: u32) {
    match scores.record(score) {
        Ok(true) => tracing::info!(score, "new best score"),
        Ok(false) => {}
        Err(error) => tracing::warn!(
            %error,
            path = %scores.path().display(),
            "failed to save best score"
        ),
    }
}
