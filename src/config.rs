use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, SnakeError};
use crate::snake::Position;

const APP_DIR_NAME: &str = "snakescii";
const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "SNAKESCII_CONFIG";

/// Movement tick period in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 80;

/// Housekeeping tick period in milliseconds.
pub const DEFAULT_HOUSEKEEPING_INTERVAL_MS: u64 = 1000;

/// Housekeeping ticks between growth requests.
pub const DEFAULT_GROWTH_INTERVAL: u32 = 8;

/// Housekeeping ticks between food spawns.
pub const DEFAULT_FOOD_SPAWN_INTERVAL: u32 = 60;

/// Score granted per food eaten.
pub const FOOD_REWARD: u32 = 5;

/// Terminal lines reserved below the board for the score.
pub const SCORE_LINES: u16 = 1;

/// Playable interior of the board.
///
/// Interior cells span rows `1..=rows` and columns `1..=cols`. Every cell
/// outside that rectangle is wall.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Arena {
    pub rows: u16,
    pub cols: u16,
}

impl Arena {
    /// Creates an arena with the given interior size.
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        Self { rows, cols }
    }

    /// Derives the arena from a terminal size, keeping the bottom line for
    /// the score and one border cell on every side of the board.
    pub fn from_terminal_size(width: u16, height: u16) -> Result<Self> {
        let rows = height.saturating_sub(SCORE_LINES + 2);
        let cols = width.saturating_sub(2);
        if rows == 0 || cols == 0 {
            return Err(SnakeError::TerminalTooSmall { width, height });
        }

        Ok(Self { rows, cols })
    }

    /// Returns true when `position` is an interior cell.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.row >= 1
            && position.col >= 1
            && position.row <= i32::from(self.rows)
            && position.col <= i32::from(self.cols)
    }

    /// Returns the spawn cell used on every reset.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            row: (i32::from(self.rows) + 1) / 2,
            col: (i32::from(self.cols) + 1) / 2,
        }
    }

    /// Returns the number of interior cells.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    /// Iterates over every interior cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (1..=i32::from(self.rows))
            .flat_map(move |row| (1..=i32::from(self.cols)).map(move |col| Position { row, col }))
    }
}

/// Tunable timing and scoring values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub tick_interval_ms: u64,
    pub housekeeping_interval_ms: u64,
    pub growth_interval: u32,
    pub food_spawn_interval: u32,
    pub food_reward: u32,
    /// Log destination. Logging stays off when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            housekeeping_interval_ms: DEFAULT_HOUSEKEEPING_INTERVAL_MS,
            growth_interval: DEFAULT_GROWTH_INTERVAL,
            food_spawn_interval: DEFAULT_FOOD_SPAWN_INTERVAL,
            food_reward: FOOD_REWARD,
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Loads the config from `$SNAKESCII_CONFIG` or the platform config dir.
    ///
    /// Returns defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        load_from_path(&config_path())
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn housekeeping_interval(&self) -> Duration {
        Duration::from_millis(self.housekeeping_interval_ms)
    }

    /// Rejects values that would stall or spin the schedulers.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(SnakeError::InvalidConfig(
                "tick_interval_ms must be positive".to_owned(),
            ));
        }
        if self.housekeeping_interval_ms == 0 {
            return Err(SnakeError::InvalidConfig(
                "housekeeping_interval_ms must be positive".to_owned(),
            ));
        }
        if self.growth_interval == 0 {
            return Err(SnakeError::InvalidConfig(
                "growth_interval must be positive".to_owned(),
            ));
        }
        if self.food_spawn_interval == 0 {
            return Err(SnakeError::InvalidConfig(
                "food_spawn_interval must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Returns the config file path, honoring the environment override.
#[must_use]
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }

    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Loads and validates a config file, falling back to defaults when absent.
pub fn load_from_path(path: &Path) -> Result<GameConfig> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(GameConfig::default()),
        Err(source) => {
            return Err(SnakeError::ConfigRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config =
        serde_json::from_str::<GameConfig>(&raw).map_err(|source| SnakeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}
