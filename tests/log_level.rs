use std::fs;

use snakescii::config::GameConfig;
use snakescii::logging;

// Installs the global subscriber, so it lives in its own test binary.
#[test]
fn rust_log_debug_reaches_the_log_file() {
    let dir = tempfile::tempdir().expect("tempdir should be creatable");
    let path = dir.path().join("logs").join("snakescii.log");

    // SAFETY: the only test in this binary; no other thread reads the env.
    unsafe { std::env::set_var("RUST_LOG", "debug") };

    let config = GameConfig {
        log_file: Some(path.clone()),
        ..GameConfig::default()
    };
    let installed = logging::init(&config).expect("logging should initialise");
    assert!(installed);

    tracing::debug!("pause toggled");
    tracing::info!("quit requested");

    let log = fs::read_to_string(&path).expect("log file should be readable");
    assert!(log.contains("pause toggled"));
    assert!(log.contains("quit requested"));
}
