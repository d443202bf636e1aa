use crate::error::GameError;
use crate::geometry::Position;
use crate::round::Round;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Style {
    Plain,
    Snake,
    Pellet,
    DeadSnake,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', style: Style::Plain };

    pub fn new(ch: char, style: Style) -> Self {
        Cell { ch, style }
    }
}

/// A grid of terminal character cells, redrawn one frame at a time.
///
/// A frame is `clear_frame`, any number of `set_cell` writes (last write to a
/// cell wins, out-of-range writes are dropped), then `present`.
pub trait Canvas {
    /// Size in terminal columns and rows.
    fn size(&self) -> (u16, u16);

    fn resize(&mut self, cols: u16, rows: u16);

    fn clear_frame(&mut self);

    fn cell(&self, x: u16, y: u16) -> Option<Cell>;

    fn set_cell(&mut self, x: u16, y: u16, cell: Cell);

    fn present(&mut self) -> Result<(), GameError>;

    fn print(&mut self, x: u16, y: u16, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            let col = x as usize + i;
            if col > u16::MAX as usize {
                break;
            }
            self.set_cell(col as u16, y, Cell::new(ch, style));
        }
    }
}

/// Maps grid cells to terminal cells, `cell_width` columns per grid cell.
#[derive(Copy, Clone, Debug)]
pub struct Painter {
    cell_width: u16,
}

impl Painter {
    pub fn new(cell_width: u16) -> Self {
        Painter { cell_width: cell_width.max(1) }
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    /// Draws the HUD, the snake and the pellet for one frame. Does not
    /// present.
    pub fn draw_round(&self, canvas: &mut impl Canvas, round: &Round, dead: bool) {
        canvas.clear_frame();
        self.draw_hud(canvas, round);

        let body_style = if dead { Style::DeadSnake } else { Style::Snake };
        let grid = round.grid();
        let snake = round.snake();

        for (i, pos) in snake.cells(grid).enumerate() {
            let glyph = if i == 0 { Some(snake.head_glyph()) } else { None };
            self.paint(canvas, pos, glyph, body_style);
        }

        if let Some(pellet) = round.pellet() {
            self.paint(canvas, pellet, None, Style::Pellet);
        }
    }

    /// Centered box of text on top of whatever is on the canvas.
    pub fn draw_message(&self, canvas: &mut impl Canvas, lines: &[&str]) {
        let (width, height) = canvas.size();
        let msg_height = lines.len() as u16 + 2;
        let msg_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 2;
        let left = (width / 2).saturating_sub(msg_width / 2);
        let top = (height / 2).saturating_sub(msg_height / 2);

        let blank = " ".repeat(msg_width as usize);
        canvas.print(left, top, &blank, Style::Message);
        canvas.print(left, top + msg_height - 1, &blank, Style::Message);

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", line = line, width = msg_width as usize);
            canvas.print(left, top + 1 + i as u16, &padded, Style::Message);
        }
    }

    fn draw_hud(&self, canvas: &mut impl Canvas, round: &Round) {
        let snake = round.snake();
        let pellet = match round.pellet() {
            Some(p) => p.to_string(),
            None => "none".to_string(),
        };

        let lines = [
            format!("Score: {}", round.score()),
            format!("Frame: {}", round.frame()),
            format!("Position: {}", snake.position()),
            format!("Pellet: {}", pellet),
            format!("Grid: {}", round.grid()),
            format!("Heading: {}", snake.heading()),
        ];

        for (y, line) in lines.iter().enumerate() {
            canvas.print(0, y as u16, line, Style::Plain);
        }
    }

    /// Restyles every column of a grid cell, keeping the characters already
    /// there unless a glyph is given for the first column.
    fn paint(&self, canvas: &mut impl Canvas, pos: Position, glyph: Option<char>, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
            return;
        };
        let first = x.saturating_mul(self.cell_width);

        for dx in 0..self.cell_width {
            let col = first.saturating_add(dx);
            let existing = canvas.cell(col, y).map_or(' ', |c| c.ch);
            let ch = match glyph {
                Some(g) if dx == 0 => g,
                _ => existing,
            };
            canvas.set_cell(col, y, Cell::new(ch, style));
        }
    }
}

/// Canvas kept entirely in memory.
#[derive(Clone, Debug)]
pub struct MemoryCanvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    presented: Vec<Cell>,
    frames: usize,
}

impl MemoryCanvas {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::BLANK; width as usize * height as usize];
        MemoryCanvas { width, height, presented: cells.clone(), cells, frames: 0 }
    }

    /// Number of completed `present` calls.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Cell as of the last `present`.
    pub fn presented(&self, x: u16, y: u16) -> Option<Cell> {
        self.index(x, y).map(|i| self.presented[i])
    }

    /// Row `y` as of the last `present`.
    pub fn presented_row(&self, y: u16) -> String {
        (0..self.width).filter_map(|x| self.presented(x, y)).map(|c| c.ch).collect()
    }

    pub fn presented_text(&self) -> String {
        (0..self.height).map(|y| self.presented_row(y)).collect::<Vec<_>>().join("\n")
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(self.width as usize * y as usize + x as usize)
        } else {
            None
        }
    }
}

impl Canvas for MemoryCanvas {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        *self = MemoryCanvas { frames: self.frames, ..MemoryCanvas::new(cols, rows) };
    }

    fn clear_frame(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    fn set_cell(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    fn present(&mut self) -> Result<(), GameError> {
        self.presented.clone_from(&self.cells);
        self.frames += 1;
        Ok(())
    }
}
