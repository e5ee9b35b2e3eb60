use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tilemerge::{Direction, GameConfig, GameSummary, Grid, TurnOutcome};

/// Writes every game as a JSON file into a directory.
///
/// Files are numbered in the order the games finish: `game_000001.json`,
/// `game_000002.json`, and so on.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    current: Option<GameRecording>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            current: None,
        })
    }

    /// Begins a new recording, dropping any unfinished one.
    pub fn start_game(&mut self, config: GameConfig, seed: u64, initial_grid: Grid) {
        self.current = Some(GameRecording {
            config,
            seed,
            initial_grid,
            turns: Vec::new(),
            summary: None,
        });
    }

    pub fn store_turn(&mut self, direction: Direction, outcome: TurnOutcome, grid: &Grid) {
        if let Some(recording) = self.current.as_mut() {
            recording.turns.push(TurnRecord {
                direction,
                outcome,
                score: grid.sum(),
                grid: grid.clone(),
            });
        }
    }

    /// Finishes the current recording and writes it out, returning the path of the new file.
    pub fn write_game_recording(&mut self, summary: GameSummary) -> anyhow::Result<PathBuf> {
        let Some(mut recording) = self.current.take() else {
            anyhow::bail!("No game is being recorded");
        };
        recording.summary = Some(summary);
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecording {
    pub config: GameConfig,
    /// Seed of the engine's RNG.
    pub seed: u64,
    /// The grid after the first tile was spawned.
    pub initial_grid: Grid,
    pub turns: Vec<TurnRecord>,
    pub summary: Option<GameSummary>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnRecord {
    pub direction: Direction,
    pub outcome: TurnOutcome,
    pub grid: Grid,
    pub score: u64,
}
