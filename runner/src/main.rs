use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use runner::{
    play_single_game, resolve_config, ConfigOverrides, ControllerSetup, Recorder, RunStats,
};
use tilemerge::{parse_script, GameEnd};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ControllerKind {
    Random,
    Scripted,
}

#[derive(Parser)]
struct Args {
    /// Path to a JSON file with the game config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid size, overrides the config file
    #[arg(long)]
    size: Option<usize>,

    /// Probability of spawning a 4 instead of a 2, overrides the config file
    #[arg(long)]
    four_spawn_probability: Option<f64>,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Who makes the moves
    #[arg(long, value_enum, default_value_t = ControllerKind::Random)]
    controller: ControllerKind,

    /// Moves for the scripted controller, e.g. "uldr" or "up,left,down"
    #[arg(long, default_value = "")]
    script: String,

    /// Give up a random game after this many inputs
    #[arg(long)]
    max_moves: Option<usize>,

    /// Record the games as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let config = resolve_config(
        args.config.as_deref(),
        ConfigOverrides {
            size: args.size,
            four_spawn_probability: args.four_spawn_probability,
        },
    )?;
    info!(size = config.size, four_spawn_probability = config.four_spawn_probability);

    let controller_setup = match args.controller {
        ControllerKind::Random => ControllerSetup::Random {
            max_moves: args.max_moves,
        },
        ControllerKind::Scripted => {
            let moves = parse_script(&args.script)?;
            if moves.is_empty() {
                anyhow::bail!("The scripted controller needs a non-empty --script");
            }
            ControllerSetup::Scripted(moves)
        }
    };

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let mut stats = RunStats::default();
    for game_idx in 0..args.num_games {
        let summary = play_single_game(config, &controller_setup, &mut rng, &mut recorder)?;
        let reason = match summary.end {
            GameEnd::Terminal => "Game over",
            GameEnd::Quit => "Controller quit",
        };
        debug!(
            game_idx,
            score = summary.score,
            moves = summary.moves,
            max_tile = summary.max_tile,
            reason
        );
        stats.record(&summary);
    }

    eprintln!(
        "End result after {} games:\n- mean score {:.1}, best score {}\n- highest tile {}\n- {:.1} moves per game\n- {} ended with a full grid, {} were stopped by the controller",
        stats.games,
        stats.mean_score(),
        stats.best_score,
        stats.highest_tile,
        stats.mean_moves(),
        stats.terminal,
        stats.quit
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
