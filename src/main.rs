use std::panic;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use snakescii::config::GameConfig;
use snakescii::error::Result;
use snakescii::game::{GameState, SharedGame};
use snakescii::input::{CrosstermKeys, InputListener};
use snakescii::logging;
use snakescii::runtime;
use snakescii::scheduler::{HousekeepingClock, TickScheduler};
use snakescii::terminal_runtime::{TerminalSession, restore_terminal};

fn main() -> ExitCode {
    install_panic_hook();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("snakescii: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Config and logging problems are reported before raw mode is entered.
    let config = GameConfig::load()?;
    logging::init(&config)?;
    tracing::info!(?config, "starting");

    let mut session = TerminalSession::enter()?;
    let arena = session.arena()?;
    tracing::info!(rows = arena.rows, cols = arena.cols, "arena ready");

    let game = SharedGame::new(GameState::new(arena).with_food_reward(config.food_reward));
    let (events_tx, events_rx) = mpsc::channel();

    let scheduler = TickScheduler::start(&config, events_tx.clone())?;

    let listener = InputListener::new(CrosstermKeys, game.clone(), events_tx);
    let input = match thread::Builder::new()
        .name("input".to_owned())
        .spawn(move || listener.run())
    {
        Ok(handle) => handle,
        Err(error) => {
            scheduler.shutdown();
            return Err(error.into());
        }
    };

    let result = runtime::run(
        &game,
        &events_rx,
        &mut session,
        HousekeepingClock::from_config(&config),
    );

    scheduler.shutdown();
    let input_result = match input.join() {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("input thread panicked");
            Ok(())
        }
    };
    drop(session);
    tracing::info!("stopped");

    result?;
    input_result?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
