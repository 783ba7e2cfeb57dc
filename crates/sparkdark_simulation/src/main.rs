//! Headless симуляция SparkDark
//!
//! Арена + headless engine substitute, N тиков по 1/60 с, итог в лог (и JSON).

use bevy::prelude::*;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use sparkdark_simulation::headless::{spawn_arena, HeadlessEnginePlugin};
use sparkdark_simulation::{
    create_headless_app_with_config, log_error, log_info, set_log_level, step_simulation, CoinLedger, Ghost,
    GhostState, LogLevel, PlayerLives, ScoreLedger, SessionConfig, SessionOutcome, TICK,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Сколько тиков (60 в секунду) прогнать максимум
    #[arg(long, default_value_t = 3600)]
    ticks: u32,
    /// JSON с SessionConfig (без файла: defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "info")]
    log_level: String,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u32,
    outcome: String,
    score: u32,
    coins: u32,
    coins_to_win: u32,
    lives: u32,
    ghosts: Vec<GhostState>,
}

fn main() {
    let cli = Cli::parse();

    match LogLevel::parse(&cli.log_level) {
        Some(level) => set_log_level(level),
        None => eprintln!("Unknown log level '{}', using debug", cli.log_level),
    }

    let config = match cli.config.as_ref() {
        Some(path) => match SessionConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Config error: {}", err));
                eprintln!("{}", err);
                std::process::exit(1);
            }
        },
        None => SessionConfig::default(),
    };

    let mut app = create_headless_app_with_config(cli.seed, config.clone());
    app.add_plugins(HeadlessEnginePlugin::default());

    let layout = spawn_arena(app.world_mut(), &config);
    log_info(&format!(
        "Starting SparkDark headless simulation (seed: {}, ticks: {})",
        cli.seed, cli.ticks
    ));

    let mut ticks_run = 0;
    for tick in 0..cli.ticks {
        step_simulation(&mut app, TICK);
        ticks_run = tick + 1;

        if tick % 600 == 0 {
            let entity_count = app.world().entities().len();
            log_info(&format!("Tick {}: {} entities", tick, entity_count));
        }

        if *app.world().resource::<SessionOutcome>() != SessionOutcome::Playing {
            break;
        }
    }

    let world = app.world_mut();
    let ghosts: Vec<GhostState> = world
        .query_filtered::<&GhostState, With<Ghost>>()
        .iter(world)
        .copied()
        .collect();
    let lives = world
        .get::<PlayerLives>(layout.player)
        .map_or(0, |lives| lives.lives);
    let ledger = world.resource::<ScoreLedger>();
    let coins = world.resource::<CoinLedger>();

    let summary = RunSummary {
        seed: cli.seed,
        ticks: ticks_run,
        outcome: format!("{:?}", world.resource::<SessionOutcome>()),
        score: ledger.score(),
        coins: coins.coins(),
        coins_to_win: coins.coins_to_win(),
        lives,
        ghosts,
    };

    log_info(&format!(
        "Simulation complete: {} after {} ticks, score {}, coins {}/{}, lives {}",
        summary.outcome, summary.ticks, summary.score, summary.coins, summary.coins_to_win, summary.lives
    ));

    if let Some(path) = cli.summary_out {
        let written = serde_json::to_string_pretty(&summary)
            .map_err(|err| err.to_string())
            .and_then(|json| std::fs::write(&path, json).map_err(|err| err.to_string()));
        if let Err(err) = written {
            log_error(&format!("Failed to write summary {}: {}", path.display(), err));
            std::process::exit(1);
        }
    }
}
