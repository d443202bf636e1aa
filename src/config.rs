use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::snake::Direction;

/// Names a file to write logs to. Logging is off when unset.
pub const LOG_FILE_ENV: &str = "SNAKE_LOG";

const TICKS_PER_SECOND: u32 = 6;
const COLUMNS_PER_CELL: u16 = 2;

#[derive(Clone, Debug)]
pub struct Settings {
    pub tick_interval: Duration,
    /// Terminal columns per grid cell. Two makes cells roughly square.
    pub cell_width: u16,
    pub heading: Direction,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tick_interval: Duration::from_secs(1) / TICKS_PER_SECOND,
            cell_width: COLUMNS_PER_CELL,
            heading: Direction::South,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            log_file: env::var_os(LOG_FILE_ENV).filter(|v| !v.is_empty()).map(PathBuf::from),
            ..Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tick_interval, Duration::from_nanos(166_666_666));
        assert_eq!(settings.cell_width, 2);
        assert_eq!(settings.heading, Direction::South);
        assert!(settings.log_file.is_none());
    }
}
