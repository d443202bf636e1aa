use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread::sleep;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::GameError;
use crate::geometry::Grid;
use crate::input::{Control, PendingHeading};
use crate::render::{Canvas, Painter};
use crate::round::{Round, TickOutcome};

const INTRO: &[&str] = &[
    "Arrow keys or WASD to move",
    "Esc to pause",
    "CTRL+C or Q to quit",
    "",
    "Press any key to begin",
];

const PAUSED: &[&str] = &["Paused", "Press Esc to resume", "or CTRL+C to quit"];

/// How a round stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundEnd {
    Quit,
    Over { score: usize, won: bool },
}

/// Drives rounds on a canvas: paces ticks, applies input, draws every frame
/// and offers a new round after each game over.
pub struct SnakeGame<C, R> {
    settings: Settings,
    canvas: C,
    painter: Painter,
    pending: PendingHeading,
    controls: Receiver<Control>,
    rng: R,
    paused: bool,
}

impl<C: Canvas, R: Rng> SnakeGame<C, R> {
    pub fn new(settings: Settings, canvas: C, pending: PendingHeading, controls: Receiver<Control>, rng: R) -> Self {
        let painter = Painter::new(settings.cell_width);
        SnakeGame { settings, canvas, painter, pending, controls, rng, paused: false }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Intro, then rounds until the player quits.
    pub fn run(&mut self) -> Result<(), GameError> {
        if !self.show_intro()? {
            return Ok(());
        }

        loop {
            match self.play()? {
                RoundEnd::Quit => return Ok(()),
                RoundEnd::Over { .. } => {
                    if !self.await_key()? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Plays one round to its end.
    pub fn play(&mut self) -> Result<RoundEnd, GameError> {
        let grid = self.grid_for(self.canvas.size())?;
        let mut round = Round::new(grid, self.settings.heading);
        self.pending.store(self.settings.heading);
        self.paused = false;
        info!(%grid, "round started");

        loop {
            for control in self.drain()? {
                match control {
                    Control::Quit => {
                        info!(score = round.score(), "quit during round");
                        return Ok(RoundEnd::Quit);
                    }
                    Control::TogglePause => {
                        self.paused = !self.paused;
                        debug!(paused = self.paused, "pause toggled");
                    }
                    Control::Resize { cols, rows } => self.resize(&mut round, cols, rows),
                    Control::Pressed => {}
                }
            }

            if !self.paused {
                let outcome = round.tick(self.pending.load(), &mut self.rng);
                if outcome.is_over() {
                    return self.game_over(&round, outcome);
                }
            }

            self.painter.draw_round(&mut self.canvas, &round, false);
            if self.paused {
                self.painter.draw_message(&mut self.canvas, PAUSED);
            }
            self.canvas.present()?;

            sleep(self.settings.tick_interval);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn show_intro(&mut self) -> Result<bool, GameError> {
        self.canvas.clear_frame();
        self.painter.draw_message(&mut self.canvas, INTRO);
        self.canvas.present()?;

        self.await_key()
    }

    fn game_over(&mut self, round: &Round, outcome: TickOutcome) -> Result<RoundEnd, GameError> {
        let won = outcome == TickOutcome::Filled;
        let score = round.score();
        info!(score, won, frames = round.frame(), "round over");

        let headline = if won { "You won!" } else { "Game over!" };
        let score_line = format!("Score: {}", score);

        self.painter.draw_round(&mut self.canvas, round, !won);
        self.painter.draw_message(
            &mut self.canvas,
            &[headline, &score_line, "", "Press any key to play again,", "or CTRL+C to quit."],
        );
        self.canvas.present()?;

        Ok(RoundEnd::Over { score, won })
    }

    /// Blocks for a key. Returns `false` if it was a quit key. Input that was
    /// already queued is discarded first so a late steering key does not skip
    /// the prompt.
    fn await_key(&mut self) -> Result<bool, GameError> {
        for control in self.drain()? {
            if control == Control::Quit {
                return Ok(false);
            }
            if let Control::Resize { cols, rows } = control {
                self.canvas.resize(cols, rows);
            }
        }

        loop {
            match self.controls.recv().map_err(|_| GameError::InputClosed)? {
                Control::Quit => return Ok(false),
                Control::Resize { cols, rows } => self.canvas.resize(cols, rows),
                Control::Pressed | Control::TogglePause => return Ok(true),
            }
        }
    }

    fn drain(&mut self) -> Result<Vec<Control>, GameError> {
        let mut controls = Vec::new();
        loop {
            match self.controls.try_recv() {
                Ok(control) => controls.push(control),
                Err(TryRecvError::Empty) => return Ok(controls),
                Err(TryRecvError::Disconnected) if controls.is_empty() => return Err(GameError::InputClosed),
                Err(TryRecvError::Disconnected) => return Ok(controls),
            }
        }
    }

    fn resize(&mut self, round: &mut Round, cols: u16, rows: u16) {
        self.canvas.resize(cols, rows);
        match self.grid_for((cols, rows)) {
            Ok(grid) => {
                info!(%grid, "grid resized");
                round.resize(grid);
            }
            Err(err) => warn!(%err, "keeping previous grid"),
        }
    }

    fn grid_for(&self, (cols, rows): (u16, u16)) -> Result<Grid, GameError> {
        Grid::new(i32::from(cols / self.painter.cell_width()), i32::from(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemoryCanvas;
    use crate::snake::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::mpsc::{self, Sender};
    use std::time::Duration;

    fn game(cols: u16, rows: u16) -> (SnakeGame<MemoryCanvas, StdRng>, Sender<Control>) {
        let settings = Settings { tick_interval: Duration::ZERO, ..Settings::default() };
        let pending = PendingHeading::new(Direction::South);
        let (tx, rx) = mpsc::channel();
        let game = SnakeGame::new(settings, MemoryCanvas::new(cols, rows), pending, rx, StdRng::seed_from_u64(5));
        (game, tx)
    }

    #[test]
    fn intro_then_quit() {
        let (mut game, tx) = game(40, 12);
        tx.send(Control::Pressed).unwrap();

        // A key queued before the prompt is discarded, the quit after it ends the game.
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            tx.send(Control::Quit).unwrap();
        });

        assert!(game.run().is_ok());
        assert!(game.canvas().presented_text().contains("Press any key to begin"));
    }

    #[test]
    fn quit_key_during_round() {
        let (mut game, tx) = game(40, 12);
        tx.send(Control::Quit).unwrap();

        assert_eq!(game.play().unwrap(), RoundEnd::Quit);
        assert_eq!(game.canvas().frames(), 0);
    }

    #[test]
    fn frames_are_drawn_until_quit() {
        let (mut game, tx) = game(40, 12);
        let sender = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            tx.send(Control::Quit).unwrap();
            tx
        });

        assert_eq!(game.play().unwrap(), RoundEnd::Quit);
        assert!(game.canvas().frames() > 0);
        assert!(game.canvas().presented_row(0).starts_with("Score: "));
        drop(sender.join());
    }

    #[test]
    fn resize_reaches_canvas_and_grid() {
        let (mut game, tx) = game(40, 12);
        tx.send(Control::Resize { cols: 30, rows: 8 }).unwrap();
        tx.send(Control::Quit).unwrap();

        assert_eq!(game.play().unwrap(), RoundEnd::Quit);
        assert_eq!(game.canvas().size(), (30, 8));
    }

    #[test]
    fn vanished_input_is_an_error() {
        let (mut game, tx) = game(40, 12);
        drop(tx);

        assert!(matches!(game.play(), Err(GameError::InputClosed)));
    }

    #[test]
    fn tiny_terminal_is_rejected() {
        let (mut game, _tx) = game(3, 12);

        assert!(matches!(game.play(), Err(GameError::GridTooSmall { width: 1, height: 12 })));
    }
}
