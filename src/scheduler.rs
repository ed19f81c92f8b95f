use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::GameConfig;

/// Messages consumed by the control loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ControlEvent {
    /// Fast timer: advance the snake.
    Move,
    /// Slow timer: growth and food bookkeeping.
    Housekeeping,
    /// Something visible changed outside a tick.
    Redraw,
    Quit,
}

/// What one housekeeping tick asks of the game.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct HousekeepingAction {
    pub grow: bool,
    pub spawn_food: bool,
}

/// Counts housekeeping ticks and decides when growth and food are due.
///
/// Growth is due every `growth_interval` ticks of the counter; food is due
/// when the counter reaches `food_spawn_interval`, which also restarts the
/// count.
#[derive(Debug, Clone)]
pub struct HousekeepingClock {
    counter: u32,
    growth_interval: u32,
    food_spawn_interval: u32,
}

impl HousekeepingClock {
    #[must_use]
    pub fn new(growth_interval: u32, food_spawn_interval: u32) -> Self {
        debug_assert!(growth_interval > 0 && food_spawn_interval > 0);
        Self {
            counter: 0,
            growth_interval,
            food_spawn_interval,
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.growth_interval, config.food_spawn_interval)
    }

    /// Records one housekeeping tick.
    pub fn advance(&mut self) -> HousekeepingAction {
        self.counter += 1;

        let grow = self.counter % self.growth_interval == 0;
        let spawn_food = self.counter >= self.food_spawn_interval;
        if spawn_food {
            self.counter = 0;
        }

        HousekeepingAction { grow, spawn_food }
    }
}

/// Periodic thread posting one event per period until stopped.
struct Ticker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(
        name: &str,
        period: Duration,
        event: ControlEvent,
        events: Sender<ControlEvent>,
    ) -> io::Result<Self> {
        let (stop, stop_rx) = mpsc::channel::<()>();
        let thread_name = name.to_owned();

        let handle = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                tracing::debug!(ticker = %thread_name, ?period, "ticker started");
                let mut deadline = Instant::now() + period;
                loop {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    if events.send(event).is_err() {
                        break;
                    }

                    deadline += period;
                    let now = Instant::now();
                    if deadline < now {
                        // Missed periods after a stall are dropped.
                        deadline = now + period;
                    }
                }
                tracing::debug!(ticker = %thread_name, "ticker stopped");
            })?;

        Ok(Self { stop, handle })
    }

    fn stop(self) {
        let _ = self.stop.send(());
        if self.handle.join().is_err() {
            tracing::warn!("ticker thread panicked");
        }
    }
}

/// The two timing domains: movement and housekeeping.
pub struct TickScheduler {
    movement: Ticker,
    housekeeping: Ticker,
}

impl TickScheduler {
    /// Starts both tickers. Events go to `events` until `shutdown`.
    pub fn start(config: &GameConfig, events: Sender<ControlEvent>) -> io::Result<Self> {
        let movement = Ticker::spawn(
            "movement-tick",
            config.tick_interval(),
            ControlEvent::Move,
            events.clone(),
        )?;
        let housekeeping = match Ticker::spawn(
            "housekeeping-tick",
            config.housekeeping_interval(),
            ControlEvent::Housekeeping,
            events,
        ) {
            Ok(ticker) => ticker,
            Err(error) => {
                movement.stop();
                return Err(error);
            }
        };

        Ok(Self {
            movement,
            housekeeping,
        })
    }

    /// Stops both tickers and waits for their threads.
    pub fn shutdown(self) {
        self.movement.stop();
        self.housekeeping.stop();
    }
}
