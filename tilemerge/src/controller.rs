use std::collections::VecDeque;

use rand::Rng;

use crate::{Direction, Grid};

/// What a controller wants to happen next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControllerInput {
    Shift(Direction),
    /// The signal didn't map to a move, e.g. an unbound key was pressed.
    NoOp,
    /// Stop playing before the game is over.
    Quit,
}

/// A source of moves, such as a human at a keyboard or a script.
///
/// The controller gets to look at the grid before deciding, but it cannot
/// change it.
pub trait Controller {
    fn next_input(&mut self, grid: &Grid) -> anyhow::Result<ControllerInput>;
}

impl<C: Controller + ?Sized> Controller for &mut C {
    fn next_input(&mut self, grid: &Grid) -> anyhow::Result<ControllerInput> {
        (**self).next_input(grid)
    }
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn next_input(&mut self, grid: &Grid) -> anyhow::Result<ControllerInput> {
        (**self).next_input(grid)
    }
}

/// Plays a fixed sequence of directions, then quits.
#[derive(Clone, Debug)]
pub struct ScriptedController {
    moves: VecDeque<Direction>,
}

impl ScriptedController {
    pub fn new(moves: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl Controller for ScriptedController {
    fn next_input(&mut self, _grid: &Grid) -> anyhow::Result<ControllerInput> {
        Ok(self
            .moves
            .pop_front()
            .map_or(ControllerInput::Quit, ControllerInput::Shift))
    }
}

/// Picks a uniformly random direction every time.
///
/// With a move limit, it quits after that many inputs.
#[derive(Clone, Debug)]
pub struct RandomController<R> {
    rng: R,
    moves_left: Option<usize>,
}

impl<R: Rng> RandomController<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            moves_left: None,
        }
    }

    pub fn with_move_limit(rng: R, limit: usize) -> Self {
        Self {
            rng,
            moves_left: Some(limit),
        }
    }
}

impl<R: Rng> Controller for RandomController<R> {
    fn next_input(&mut self, _grid: &Grid) -> anyhow::Result<ControllerInput> {
        if let Some(moves_left) = self.moves_left.as_mut() {
            if *moves_left == 0 {
                return Ok(ControllerInput::Quit);
            }
            *moves_left -= 1;
        }
        let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        Ok(ControllerInput::Shift(direction))
    }
}
