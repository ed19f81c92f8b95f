use std::fs::{self, File};
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Builder;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::GameConfig;
use crate::error::{Result, SnakeError};

/// Installs the tracing subscriber when the config names a log file.
///
/// The level comes from `RUST_LOG`, `info` when unset. Stdout belongs to the
/// TUI, so without a log file events are discarded. Returns whether a
/// subscriber was installed.
pub fn init(config: &GameConfig) -> Result<bool> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(false);
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let log_file = File::create(path)?;

    file_subscriber(filter_builder().from_env_lossy(), log_file)
        .try_init()
        .map_err(|error| SnakeError::Logging(error.to_string()))?;

    Ok(true)
}

fn filter_builder() -> Builder {
    EnvFilter::builder().with_default_directive(LevelFilter::INFO.into())
}

fn file_subscriber(
    filter: EnvFilter,
    log_file: File,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .finish()
}
