use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("grid of {width}x{height} cells is too small to play on")]
    GridTooSmall { width: i32, height: i32 },

    #[error("input thread stopped delivering events")]
    InputClosed,

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
