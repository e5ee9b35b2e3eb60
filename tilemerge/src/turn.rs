use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Controller, ControllerInput, Direction, Grid, GridEngine, Tile};

/// Summarizes the outcome of playing one direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The shift didn't change anything, so no tile was spawned.
    Unchanged,
    /// The tiles moved and a new tile was spawned.
    Moved,
    /// The game is over, either because of this turn or before it.
    GameOver,
}

/// Why a game stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    Terminal,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// The number of turns that changed the grid.
    pub moves: usize,
    pub score: u64,
    pub max_tile: Tile,
    pub end: GameEnd,
}

/// One session: an engine plus the turn sequencing around it.
#[derive(Clone, Debug)]
pub struct Game<R = StdRng> {
    engine: GridEngine<R>,
    moves: usize,
    over: bool,
}

impl<R: Rng> Game<R> {
    /// Starts a game. An empty grid gets its first tile here, a grid that
    /// already holds tiles is continued as it is.
    pub fn new(mut engine: GridEngine<R>) -> Self {
        if engine.grid().num_tiles() == 0 {
            engine.spawn_tile();
        }
        engine.update_score();
        let over = engine.is_terminal();
        Self {
            engine,
            moves: 0,
            over,
        }
    }

    pub fn engine(&self) -> &GridEngine<R> {
        &self.engine
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn score(&self) -> u64 {
        self.engine.score()
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Shift, then spawn and check for the end of the game if anything moved.
    ///
    /// A shift that changes nothing is ignored entirely: no tile is spawned,
    /// the move counter stays, and the terminal check is skipped because the
    /// grid is the same as before. Once the game is over every call returns
    /// [`TurnOutcome::GameOver`] and leaves the grid alone.
    pub fn play_turn(&mut self, direction: Direction) -> TurnOutcome {
        if self.over {
            return TurnOutcome::GameOver;
        }
        if !self.engine.shift(direction) {
            return TurnOutcome::Unchanged;
        }
        self.moves += 1;
        let spawned = self.engine.spawn_tile();
        self.engine.update_score();
        if !spawned || self.engine.is_terminal() {
            self.over = true;
            TurnOutcome::GameOver
        } else {
            TurnOutcome::Moved
        }
    }

    pub fn summary(&self, end: GameEnd) -> GameSummary {
        GameSummary {
            moves: self.moves,
            score: self.engine.score(),
            max_tile: self.engine.grid().max_tile(),
            end,
        }
    }
}

/// Feeds the controller's inputs into the game until it is over or the controller quits.
///
/// `observer` is called after every shift with the direction, its outcome
/// and the resulting grid. Returns an error only if the controller fails.
pub fn play_game<R, C, F>(
    game: &mut Game<R>,
    mut controller: C,
    mut observer: F,
) -> anyhow::Result<GameSummary>
where
    R: Rng,
    C: Controller,
    F: FnMut(Direction, TurnOutcome, &Grid),
{
    while !game.is_over() {
        match controller.next_input(game.grid())? {
            ControllerInput::Shift(direction) => {
                let outcome = game.play_turn(direction);
                observer(direction, outcome, game.grid());
            }
            ControllerInput::NoOp => {}
            ControllerInput::Quit => return Ok(game.summary(GameEnd::Quit)),
        }
    }
    Ok(game.summary(GameEnd::Terminal))
}
