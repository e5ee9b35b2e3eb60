use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tilemerge::{
    play_game, Controller, Direction, Game, GameConfig, GameEnd, GameSummary, GridEngine,
    RandomController, ScriptedController, Tile,
};
use tracing::trace;

use crate::recording::Recorder;

/// Which controller plays each game.
#[derive(Clone, Debug)]
pub enum ControllerSetup {
    /// Uniformly random directions, optionally giving up after `max_moves` inputs.
    Random { max_moves: Option<usize> },
    /// The same list of directions in every game.
    Scripted(Vec<Direction>),
}

impl ControllerSetup {
    fn build(&self, seed: u64) -> Box<dyn Controller> {
        let rng = StdRng::seed_from_u64(seed);
        match self {
            ControllerSetup::Random { max_moves: None } => Box::new(RandomController::new(rng)),
            ControllerSetup::Random {
                max_moves: Some(limit),
            } => Box::new(RandomController::with_move_limit(rng, *limit)),
            ControllerSetup::Scripted(moves) => Box::new(ScriptedController::new(moves.clone())),
        }
    }
}

/// Plays a single game from start to finish.
///
/// The engine and the controller get their own seeds drawn from `rng`, so
/// the seed of `rng` determines the whole run.
pub fn play_single_game(
    config: GameConfig,
    controller_setup: &ControllerSetup,
    rng: &mut StdRng,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameSummary> {
    let engine_seed: u64 = rng.gen();
    let controller_seed: u64 = rng.gen();

    let mut game = Game::new(GridEngine::from_seed(config, engine_seed)?);
    trace!(name: "Initial grid", grid = %game.grid());

    if let Some(recorder) = recorder.as_mut() {
        recorder.start_game(config, engine_seed, game.grid().clone());
    }

    let controller = controller_setup.build(controller_seed);
    let summary = play_game(&mut game, controller, |direction, outcome, grid| {
        trace!(name: "Shifted", %direction, ?outcome, score = grid.sum(), grid = %grid);
        if let Some(recorder) = recorder.as_mut() {
            recorder.store_turn(direction, outcome, grid);
        }
    })?;

    if let Some(recorder) = recorder {
        let path = recorder.write_game_recording(summary.clone())?;
        trace!(path = %path.display(), "Wrote recording");
    }
    Ok(summary)
}

/// Aggregate statistics over many games.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunStats {
    pub games: usize,
    pub terminal: usize,
    pub quit: usize,
    pub total_score: u64,
    pub best_score: u64,
    pub highest_tile: Tile,
    pub total_moves: usize,
}

impl RunStats {
    pub fn record(&mut self, summary: &GameSummary) {
        self.games += 1;
        match summary.end {
            GameEnd::Terminal => self.terminal += 1,
            GameEnd::Quit => self.quit += 1,
        }
        self.total_score += summary.score;
        self.best_score = self.best_score.max(summary.score);
        self.highest_tile = self.highest_tile.max(summary.max_tile);
        self.total_moves += summary.moves;
    }

    pub fn mean_score(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games as f64
        }
    }

    pub fn mean_moves(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }
}
