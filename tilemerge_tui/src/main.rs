use std::cell::Cell;
use std::io::stdout;
use std::rc::Rc;

use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};
use tilemerge::{
    play_game, Controller, ControllerInput, Direction, Game, GameConfig, GameEnd, GameSummary,
    Grid, GridEngine, Tile, TurnOutcome,
};

fn main() -> anyhow::Result<()> {
    let mut game = Game::new(GridEngine::from_seed(GameConfig::default(), rand::random())?);

    enable_raw_mode()?;
    let summary = run_then_restore(
        || {
            stdout().execute(EnterAlternateScreen)?;
            let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
            run(&mut game, &mut KeyboardController::new(terminal))
        },
        restore_terminal,
    )?;

    println!("{}", game.grid());
    match summary.end {
        GameEnd::Terminal => println!("Game over!"),
        GameEnd::Quit => println!("Bye!"),
    }
    println!("Score {} after {} moves", summary.score, summary.moves);
    Ok(())
}

/// Runs `body`, then `restore` no matter whether `body` succeeded.
///
/// An error from `body` is reported in preference to one from `restore`.
fn run_then_restore<T>(
    body: impl FnOnce() -> anyhow::Result<T>,
    restore: impl FnOnce() -> anyhow::Result<()>,
) -> anyhow::Result<T> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

fn restore_terminal() -> anyhow::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn run<B: Backend>(
    game: &mut Game,
    controller: &mut KeyboardController<B>,
) -> anyhow::Result<GameSummary> {
    let observer = count_moves(Rc::clone(&controller.moves));
    let summary = play_game(game, &mut *controller, observer)?;
    if summary.end == GameEnd::Terminal {
        controller.show_game_over(game.grid())?;
    }
    Ok(summary)
}

/// An observer for [`play_game`] that counts the turns which changed the grid.
fn count_moves(moves: Rc<Cell<usize>>) -> impl FnMut(Direction, TurnOutcome, &Grid) {
    move |_, outcome, _| {
        if outcome != TurnOutcome::Unchanged {
            moves.set(moves.get() + 1);
        }
    }
}

/// A human at the keyboard.
struct KeyboardController<B: Backend> {
    terminal: Terminal<B>,
    /// Only the game knows which inputs were accepted, so it is counted
    /// by the observer passed to `play_game`.
    moves: Rc<Cell<usize>>,
}

impl<B: Backend> KeyboardController<B> {
    fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            moves: Rc::new(Cell::new(0)),
        }
    }

    fn show_game_over(&mut self, grid: &Grid) -> anyhow::Result<()> {
        let moves = self.moves.get();
        self.terminal
            .draw(|frame| ui(frame, grid, moves, "Game over! Press any key to exit."))?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

impl<B: Backend> Controller for KeyboardController<B> {
    fn next_input(&mut self, grid: &Grid) -> anyhow::Result<ControllerInput> {
        let moves = self.moves.get();
        loop {
            self.terminal.draw(|frame| {
                ui(frame, grid, moves, "Arrows, WASD or HJKL to move, q to quit")
            })?;
            // Other events, like resizing, just cause a redraw
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(input_for_key(key.code));
                }
            }
        }
    }
}

fn input_for_key(code: KeyCode) -> ControllerInput {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => {
            ControllerInput::Shift(Direction::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => {
            ControllerInput::Shift(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => {
            ControllerInput::Shift(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => {
            ControllerInput::Shift(Direction::Right)
        }
        KeyCode::Char('q') | KeyCode::Esc => ControllerInput::Quit,
        _ => ControllerInput::NoOp,
    }
}

const CELL_WIDTH: u16 = 8;
const CELL_HEIGHT: u16 = 3;

struct GridWidget<'a> {
    grid: &'a Grid,
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.grid.size() as u16;
        let [_, area, _] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(CELL_WIDTH * size),
            Constraint::Min(0),
        ])
        .areas(area);
        let [_, area, _] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(CELL_HEIGHT * size),
            Constraint::Min(0),
        ])
        .areas(area);

        for (i, row) in self.grid.rows().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let cell = Rect {
                    x: area.x + j as u16 * CELL_WIDTH,
                    y: area.y + i as u16 * CELL_HEIGHT,
                    width: CELL_WIDTH,
                    height: CELL_HEIGHT,
                }
                .intersection(area);
                if cell.is_empty() {
                    continue;
                }
                let label = if value == 0 {
                    String::new()
                } else {
                    value.to_string()
                };
                Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .style(Style::new().fg(tile_color(value)).bold())
                    .block(
                        Block::new()
                            .border_type(BorderType::Rounded)
                            .borders(Borders::all()),
                    )
                    .render(cell, buf);
            }
        }
    }
}

fn tile_color(value: Tile) -> Color {
    match value {
        0 | 2 | 4 => Color::White,
        8 | 16 => Color::Yellow,
        32 | 64 => Color::LightRed,
        128 | 256 => Color::Magenta,
        512 | 1024 => Color::Cyan,
        _ => Color::LightGreen,
    }
}

fn ui(frame: &mut Frame, grid: &Grid, moves: usize, help: &str) {
    let [board_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(frame.size());
    frame.render_widget(GridWidget { grid }, board_area);
    let status = Paragraph::new(vec![
        Line::from(format!("Score: {}   Moves: {}", grid.sum(), moves)),
        Line::from(help.to_string()).dim(),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(status, status_area);
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use tilemerge::ScriptedController;

    use super::*;

    #[test]
    fn keys_map_to_inputs() {
        assert_eq!(
            input_for_key(KeyCode::Up),
            ControllerInput::Shift(Direction::Up)
        );
        assert_eq!(
            input_for_key(KeyCode::Char('a')),
            ControllerInput::Shift(Direction::Left)
        );
        assert_eq!(
            input_for_key(KeyCode::Char('j')),
            ControllerInput::Shift(Direction::Down)
        );
        assert_eq!(
            input_for_key(KeyCode::Right),
            ControllerInput::Shift(Direction::Right)
        );
        assert_eq!(input_for_key(KeyCode::Esc), ControllerInput::Quit);
        assert_eq!(input_for_key(KeyCode::Char('x')), ControllerInput::NoOp);
    }

    #[test]
    fn draws_tiles_score_and_moves() {
        let grid = Grid::from_rows(&[[2, 0], [0, 1024]]).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();
        terminal.draw(|frame| ui(frame, &grid, 7, "help")).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("1024"));
        assert!(text.contains("Score: 1026   Moves: 7"));
        assert!(text.contains("help"));
    }

    #[test]
    fn counts_only_accepted_moves() {
        let grid = Grid::from_rows(&[[2, 0, 0], [0, 0, 0], [0, 0, 0]]).unwrap();
        let engine = GridEngine::with_grid(
            GameConfig::with_size(3),
            grid,
            StdRng::seed_from_u64(0),
        )
        .unwrap();
        let mut game = Game::new(engine);
        let moves = Rc::new(Cell::new(0));
        // The first left and the first up don't change anything
        let script = [
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Down,
        ];
        let summary = play_game(
            &mut game,
            ScriptedController::new(script),
            count_moves(Rc::clone(&moves)),
        )
        .unwrap();
        assert_eq!(summary.moves, 2);
        assert_eq!(moves.get(), summary.moves);
    }

    #[test]
    fn terminal_is_restored_when_setup_fails() {
        let restored = Cell::new(false);
        let result: anyhow::Result<()> = run_then_restore(
            || anyhow::bail!("no terminal"),
            || {
                restored.set(true);
                Ok(())
            },
        );
        assert_eq!(result.unwrap_err().to_string(), "no terminal");
        assert!(restored.get());
    }

    #[test]
    fn restore_error_is_reported_after_success() {
        let result = run_then_restore(|| Ok(5), || anyhow::bail!("still raw"));
        assert_eq!(result.unwrap_err().to_string(), "still raw");
        assert_eq!(run_then_restore(|| Ok(5), || Ok(())).unwrap(), 5);
    }
}
