use std::collections::VecDeque;
use std::fmt;

use crate::geometry::{Grid, Position};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [North, South, East, West];

    pub fn opposite(self) -> Direction {
        match self {
            North => South,
            South => North,
            East => West,
            West => East,
        }
    }

    /// Unit step from a freshly grown head back to the segment it replaced.
    pub fn trailing_offset(self) -> Position {
        match self {
            North => Position::new(0, 1),
            South => Position::new(0, -1),
            East => Position::new(-1, 0),
            West => Position::new(1, 0),
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Direction> {
        Direction::ALL.get(tag as usize).copied()
    }

    pub fn glyph(self) -> char {
        match self {
            North => '^',
            South => 'v',
            East => '>',
            West => '<',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            North => "North",
            South => "South",
            East => "East",
            West => "West",
        };
        f.write_str(name)
    }
}

/// A snake stored as relative offsets.
///
/// `segments[0]` is the head and always holds `(0, 0)`. Every later entry is
/// the step from the previous segment to this one, so the absolute cell of
/// segment `i` is `position` plus the sum of `segments[..=i]`, wrapped one
/// step at a time. Only the head position and one offset change per move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    segments: VecDeque<Position>,
    heading: Direction,
    position: Position,
}

impl Snake {
    /// An empty snake. The first `grow` places the head at `position`.
    pub fn new(position: Position, heading: Direction) -> Self {
        Snake { segments: VecDeque::new(), heading, position }
    }

    pub fn size(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Absolute head location. May sit one step outside the grid between a
    /// `grow` and the following `wrap_position`.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn offsets(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().copied()
    }

    /// Turns toward `requested` unless it would reverse onto the neck.
    pub fn set_heading(&mut self, requested: Direction) -> Direction {
        if requested != self.heading.opposite() {
            self.heading = requested;
        }
        self.heading
    }

    /// Pushes a new head one step along the heading and returns its position.
    pub fn grow(&mut self) -> Position {
        if let Some(old_head) = self.segments.front_mut() {
            *old_head += self.heading.trailing_offset();
            self.position -= *old_head;
        }
        self.segments.push_front(Position::ORIGIN);

        self.position
    }

    /// Drops the tail. Snakes shorter than two segments are left alone.
    pub fn shrink(&mut self) -> Option<Position> {
        if self.segments.len() < 2 {
            return None;
        }
        self.segments.pop_back()
    }

    pub fn wrap_position(&mut self, grid: Grid) {
        self.position = grid.wrap(self.position);
    }

    pub fn normalize_position(&mut self, grid: Grid) {
        self.position = grid.normalize(self.position);
    }

    /// Absolute, wrapped cell of every segment, head first.
    pub fn cells(&self, grid: Grid) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().scan(self.position, move |acc, offset| {
            *acc = grid.wrap(*acc + *offset);
            Some(*acc)
        })
    }

    /// With no `obstacles`, reports whether any body segment sits on the head.
    /// The head is the only collider and is not compared with itself.
    ///
    /// With `obstacles`, reports whether any segment, head included, sits on
    /// one of them.
    pub fn check_collision(&self, grid: Grid, obstacles: &[Position]) -> bool {
        let head = [grid.wrap(self.position)];
        let (colliders, skip) = if obstacles.is_empty() {
            (&head[..], 1)
        } else {
            (obstacles, 0)
        };

        self.cells(grid).skip(skip).any(|cell| colliders.contains(&cell))
    }

    pub fn head_glyph(&self) -> char {
        self.heading.glyph()
    }
}
