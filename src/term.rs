use std::io::{stdout, Stdout, Write};

use crossterm::style::{Color, Colors, Print, ResetColor, SetColors};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};
use tracing::warn;

use crate::error::GameError;
use crate::render::{Canvas, Cell, Style};

/// Crossterm-backed canvas. Keeps the frame being drawn and the frame last
/// shown, and only writes the cells that differ on `present`.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    back: Vec<Cell>,
    front: Vec<Cell>,
    active: bool,
}

impl TermManager {
    pub fn new() -> Result<Self, GameError> {
        let (width, height) = terminal::size()?;
        let screen = vec![Cell::BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), back: screen.clone(), front: screen, active: false })
    }

    pub fn setup(&mut self) -> Result<(), GameError> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), GameError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(self.width as usize * y as usize + x as usize)
        } else {
            None
        }
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(%err, "could not restore terminal");
        }
    }
}

fn colors(style: Style) -> Colors {
    match style {
        Style::Plain => Colors::new(Color::Reset, Color::Reset),
        Style::Snake => Colors::new(Color::Black, Color::Yellow),
        Style::Pellet => Colors::new(Color::Black, Color::Magenta),
        Style::DeadSnake => Colors::new(Color::White, Color::DarkRed),
        Style::Message => Colors::new(Color::Black, Color::White),
    }
}

impl Canvas for TermManager {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.width = cols;
        self.height = rows;
        self.back = vec![Cell::BLANK; cols as usize * rows as usize];
        self.front = self.back.clone();

        // The terminal reflows on resize; start from a known blank screen.
        if let Err(err) = execute!(self.stdout, ResetColor, terminal::Clear(ClearType::All)) {
            warn!(%err, "could not clear terminal after resize");
        }
    }

    fn clear_frame(&mut self) {
        self.back.fill(Cell::BLANK);
    }

    fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        self.index(x, y).map(|i| self.back[i])
    }

    fn set_cell(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.back[i] = cell;
        }
    }

    fn present(&mut self) -> Result<(), GameError> {
        let mut current = None;

        for (i, (new, old)) in self.back.iter().zip(&self.front).enumerate() {
            if new == old {
                continue;
            }
            let (x, y) = ((i % self.width as usize) as u16, (i / self.width as usize) as u16);
            if current != Some(new.style) {
                queue!(self.stdout, SetColors(colors(new.style)))?;
                current = Some(new.style);
            }
            queue!(self.stdout, cursor::MoveTo(x, y), Print(new.ch))?;
        }

        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()?;
        self.front.clone_from(&self.back);
        Ok(())
    }
}
