use std::sync::mpsc;

use anyhow::{Context, Result};
use tracing::info;

use torus_snake::config::Settings;
use torus_snake::game::SnakeGame;
use torus_snake::input::{self, PendingHeading};
use torus_snake::logging;
use torus_snake::term::TermManager;

fn main() -> Result<()> {
    let settings = Settings::from_env();
    logging::init(&settings).context("failed to set up logging")?;

    let mut term = TermManager::new().context("failed to query the terminal")?;
    term.setup().context("failed to prepare the terminal")?;

    let pending = PendingHeading::new(settings.heading);
    let (tx, rx) = mpsc::channel();
    input::spawn_input_thread(pending.clone(), tx).context("failed to start the input thread")?;

    let mut game = SnakeGame::new(settings, term, pending, rx, rand::thread_rng());
    let res = game.run();

    // The input thread stays blocked on its read until the process exits.
    game.into_canvas().restore().context("failed to restore the terminal")?;
    res.context("game aborted")?;

    info!("bye");
    Ok(())
}
