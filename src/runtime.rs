use std::io;
use std::sync::mpsc::Receiver;

use crate::engine::StepOutcome;
use crate::error::SnakeError;
use crate::game::SharedGame;
use crate::renderer::Renderer;
use crate::scheduler::{ControlEvent, HousekeepingClock};

/// Consumes timer and input events until the game stops.
///
/// All state changes happen under the game lock; drawing happens after it is
/// released. A renderer failure stops the game and is returned.
pub fn run<R: Renderer>(
    game: &SharedGame,
    events: &Receiver<ControlEvent>,
    renderer: &mut R,
    mut clock: HousekeepingClock,
) -> io::Result<()> {
    let result = drive(game, events, renderer, &mut clock);
    game.quit();
    result
}

fn drive<R: Renderer>(
    game: &SharedGame,
    events: &Receiver<ControlEvent>,
    renderer: &mut R,
    clock: &mut HousekeepingClock,
) -> io::Result<()> {
    renderer.present(&game.snapshot())?;

    for event in events {
        if !game.is_running() {
            break;
        }

        match event {
            ControlEvent::Move => {
                let (outcome, snapshot) = game.step();
                if let StepOutcome::Reset(cause) = outcome {
                    tracing::info!(?cause, "snake crashed, game restarted");
                }
                if let Some(snapshot) = snapshot {
                    renderer.present(&snapshot)?;
                }
            }
            ControlEvent::Housekeeping => {
                let action = clock.advance();
                match game.apply_housekeeping(action) {
                    Ok(Some(position)) => {
                        tracing::debug!(?position, "food spawned");
                        renderer.present(&game.snapshot())?;
                    }
                    Ok(None) => {}
                    Err(SnakeError::ArenaFull) => {
                        tracing::warn!("no free cell for food, skipping spawn");
                    }
                    Err(error) => tracing::warn!(%error, "housekeeping failed"),
                }
            }
            ControlEvent::Redraw => renderer.present(&game.snapshot())?,
            ControlEvent::Quit => break,
        }
    }

    Ok(())
}
