use std::io;
use std::path::PathBuf;

/// Errors surfaced by setup and by the few fallible game operations.
///
/// Collisions are not errors; they are reported as step outcomes.
#[derive(Debug, thiserror::Error)]
pub enum SnakeError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("terminal is too small ({width}x{height})")]
    TerminalTooSmall { width: u16, height: u16 },

    #[error("no free cell left in the arena")]
    ArenaFull,

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, SnakeError>;
