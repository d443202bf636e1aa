use rand::Rng;

use crate::geometry::{Grid, Position};
use crate::snake::Snake;

/// Picks a uniformly random cell the snake does not occupy by rejection
/// sampling. Returns `None` when the snake already covers the grid, since
/// there would be nothing left to sample.
pub fn spawn<R: Rng + ?Sized>(grid: Grid, snake: &Snake, rng: &mut R) -> Option<Position> {
    if snake.size() >= grid.area() {
        return None;
    }

    loop {
        let candidate = Position::new(rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height()));
        if !snake.check_collision(grid, &[candidate]) {
            return Some(candidate);
        }
    }
}
