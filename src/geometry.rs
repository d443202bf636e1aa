use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::GameError;

/// Smallest playable side length. On a 1-wide axis a unit step wraps back
/// onto the cell it left.
pub const MIN_GRID_SIDE: i32 = 2;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Position {
    fn sub_assign(&mut self, rhs: Position) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Single-step toroidal wrap. `coordinate` must lie in `[-dimension, 2 * dimension)`.
pub fn wrap(coordinate: i32, dimension: i32) -> i32 {
    if coordinate < 0 {
        coordinate + dimension
    } else if coordinate >= dimension {
        coordinate - dimension
    } else {
        coordinate
    }
}

/// Playfield dimensions in logical cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self, GameError> {
        if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
            return Err(GameError::GridTooSmall { width, height });
        }

        Ok(Grid { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Wraps a position that is at most one grid length out of bounds.
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(wrap(pos.x, self.width), wrap(pos.y, self.height))
    }

    /// Full modular reduction, for positions an arbitrary distance away
    /// (e.g. after the grid shrank).
    pub fn normalize(&self, pos: Position) -> Position {
        Position::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
