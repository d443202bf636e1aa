use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::error::GameError;

/// Installs a file-backed subscriber when a log file is configured. The
/// terminal belongs to the game, so nothing is ever logged to it.
pub fn init(settings: &Settings) -> Result<(), GameError> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| GameError::LogFile { path: path.clone(), source })?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
