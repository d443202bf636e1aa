pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod pellet;
pub mod render;
pub mod round;
pub mod snake;
pub mod term;

pub use error::GameError;
pub use geometry::{Grid, Position};
pub use round::{Round, TickOutcome};
pub use snake::{Direction, Snake};
