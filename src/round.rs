use rand::Rng;
use tracing::{debug, info};

use crate::geometry::{Grid, Position};
use crate::pellet;
use crate::snake::{Direction, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    Ate,
    /// The head ran into the body. The round is over.
    Collided,
    /// The snake covers every cell, so no pellet can be placed. The round is
    /// over and won.
    Filled,
}

impl TickOutcome {
    pub fn is_over(self) -> bool {
        matches!(self, TickOutcome::Collided | TickOutcome::Filled)
    }
}

/// State of a single game, from the first tick to game over.
#[derive(Clone, Debug)]
pub struct Round {
    grid: Grid,
    snake: Snake,
    pellet: Option<Position>,
    frame: u64,
}

impl Round {
    /// Starts with an empty snake in the middle of the grid. The first tick
    /// places its head.
    pub fn new(grid: Grid, heading: Direction) -> Self {
        Round::with_snake(grid, Snake::new(grid.center(), heading))
    }

    pub fn with_snake(grid: Grid, snake: Snake) -> Self {
        Round { grid, snake, pellet: None, frame: 0 }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn pellet(&self) -> Option<Position> {
        self.pellet
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn score(&self) -> usize {
        self.snake.size()
    }

    /// Replaces the pellet. Positions outside the grid clear it instead.
    pub fn set_pellet(&mut self, pellet: Option<Position>) {
        self.pellet = pellet.filter(|p| self.grid.contains(*p));
    }

    /// Advances the snake one cell and settles eating, collision and pellet
    /// respawn.
    pub fn tick<R: Rng + ?Sized>(&mut self, requested: Direction, rng: &mut R) -> TickOutcome {
        self.frame += 1;

        self.snake.set_heading(requested);
        self.snake.grow();
        self.snake.wrap_position(self.grid);

        let ate = self.pellet == Some(self.snake.position());
        if ate {
            self.pellet = None;
        } else {
            self.snake.shrink();
        }

        if self.snake.check_collision(self.grid, &[]) {
            info!(frame = self.frame, size = self.snake.size(), "snake ran into itself");
            return TickOutcome::Collided;
        }

        if self.pellet.is_none() {
            match pellet::spawn(self.grid, &self.snake, rng) {
                Some(p) => {
                    debug!(frame = self.frame, pellet = %p, "spawned pellet");
                    self.pellet = Some(p);
                }
                None => {
                    info!(frame = self.frame, size = self.snake.size(), "snake fills the grid");
                    return TickOutcome::Filled;
                }
            }
        }

        if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Advanced
        }
    }

    /// Moves the round onto a differently sized grid. A pellet that no longer
    /// fits is dropped and respawned on the next tick.
    pub fn resize(&mut self, grid: Grid) {
        if self.pellet.map_or(false, |p| !grid.contains(p)) {
            debug!(pellet = ?self.pellet, %grid, "pellet fell off the grid");
            self.pellet = None;
        }
        self.snake.normalize_position(grid);
        self.grid = grid;
    }
}
