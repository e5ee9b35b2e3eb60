use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Direction, GameConfig, Grid, InvalidConfiguration};

/// Owns the grid of one game and implements its rules.
///
/// The random source is injected, so a seeded RNG makes spawning
/// reproducible. The engine performs no I/O and never blocks.
///
/// To explore a move without committing to it, clone the engine (this
/// requires a clonable RNG) and shift the clone.
#[derive(Clone, Debug)]
pub struct GridEngine<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    rng: R,
    /// Only refreshed by [`Self::update_score()`].
    score: u64,
}

impl GridEngine<StdRng> {
    pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self, InvalidConfiguration> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GridEngine<R> {
    /// Creates an engine with an empty grid.
    ///
    /// Fails if the configuration is invalid, e.g. the grid would be smaller than 2x2.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, InvalidConfiguration> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config.size),
            config,
            rng,
            score: 0,
        })
    }

    /// Creates an engine that continues from an existing grid.
    ///
    /// The grid size takes precedence over `config.size`. The grid is kept
    /// as it is, and wrapping the engine in a [`Game`](crate::Game) only
    /// adds a seed tile if the grid is empty.
    pub fn with_grid(
        config: GameConfig,
        grid: Grid,
        rng: R,
    ) -> Result<Self, InvalidConfiguration> {
        let config = GameConfig {
            size: grid.size(),
            ..config
        };
        config.validate()?;
        let mut engine = Self {
            grid,
            config,
            rng,
            score: 0,
        };
        engine.update_score();
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Places a 2 or a 4 on a uniformly chosen empty cell.
    ///
    /// The cell and the value are two independent draws from the RNG. Returns
    /// `false` without touching the grid or the RNG if the grid is full.
    pub fn spawn_tile(&mut self) -> bool {
        let empty_cells = self.grid.empty_cells();
        if empty_cells.is_empty() {
            return false;
        }
        let (i, j) = empty_cells[self.rng.gen_range(0..empty_cells.len())];
        let value = if self.rng.gen_bool(self.config.four_spawn_probability) {
            4
        } else {
            2
        };
        self.grid.set(i, j, value);
        true
    }

    /// Shifts and merges all tiles towards `direction`. Returns whether the grid changed.
    ///
    /// This does not spawn a tile and does not update the score.
    pub fn shift(&mut self, direction: Direction) -> bool {
        self.grid.shift(direction)
    }

    /// Recomputes the score as the sum of all tiles.
    pub fn update_score(&mut self) -> u64 {
        self.score = self.grid.sum();
        self.score
    }

    /// The score as of the last call to [`Self::update_score()`].
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Is the grid full, with no two adjacent tiles of equal value?
    ///
    /// In that state no shift in any direction can change the grid.
    pub fn is_terminal(&self) -> bool {
        self.grid.is_full() && !self.grid.has_adjacent_equal()
    }
}
