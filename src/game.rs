use std::sync::Arc;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{Arena, FOOD_REWARD};
use crate::engine::{self, StepOutcome};
use crate::error::Result;
use crate::food::{self, FoodSet};
use crate::input::Direction;
use crate::scheduler::HousekeepingAction;
use crate::snake::{Position, Snake};

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: FoodSet,
    pub score: u32,
    pub running: bool,
    pub paused: bool,
    pub pending_growth: bool,
    arena: Arena,
    food_reward: u32,
    rng: StdRng,
}

impl GameState {
    /// Creates a freshly reset state seeded from the OS.
    #[must_use]
    pub fn new(arena: Arena) -> Self {
        Self::with_rng(arena, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(arena: Arena, seed: u64) -> Self {
        Self::with_rng(arena, StdRng::seed_from_u64(seed))
    }

    fn with_rng(arena: Arena, rng: StdRng) -> Self {
        let mut state = Self {
            snake: Snake::new(arena.center(), Direction::Up),
            food: FoodSet::new(),
            score: 0,
            running: true,
            paused: false,
            pending_growth: false,
            arena,
            food_reward: FOOD_REWARD,
            rng,
        };
        state.reset();
        state
    }

    /// Overrides the score granted per food item.
    #[must_use]
    pub fn with_food_reward(mut self, reward: u32) -> Self {
        self.food_reward = reward;
        self
    }

    /// Starts over: one segment at the center heading up, no food, no score.
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.arena.center(), Direction::Up);
        self.food.clear();
        self.score = 0;
        self.pending_growth = false;
        self.paused = false;
        self.running = true;
    }

    /// Updates the heading unless it would turn the head into its neck.
    pub fn set_direction(&mut self, direction: Direction) {
        self.snake.steer(direction);
    }

    pub fn request_pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flips the pause flag and returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Places one food item on a free interior cell.
    ///
    /// Leaves the state untouched when the arena has no free cell.
    pub fn spawn_food(&mut self) -> Result<Position> {
        let position = food::spawn_position(&mut self.rng, self.arena, &self.snake, &self.food)?;
        self.food.insert(position);
        Ok(position)
    }

    /// Applies one housekeeping decision. Returns the spawned food, if any.
    ///
    /// Growth is requested even while paused; spawning is not.
    pub fn apply_housekeeping(&mut self, action: HousekeepingAction) -> Result<Option<Position>> {
        if action.grow {
            self.pending_growth = true;
        }
        if action.spawn_food && !self.paused {
            return self.spawn_food().map(Some);
        }
        Ok(None)
    }

    /// Returns an owned copy of everything the renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.segments().to_vec(),
            food: self.food.to_vec(),
            score: self.score,
            heading: self.snake.heading(),
            paused: self.paused,
            arena: self.arena,
        }
    }

    #[must_use]
    pub fn arena(&self) -> Arena {
        self.arena
    }

    #[must_use]
    pub fn food_reward(&self) -> u32 {
        self.food_reward
    }
}

/// Immutable view of one moment of the game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    /// Head first.
    pub segments: Vec<Position>,
    pub food: Vec<Position>,
    pub score: u32,
    pub heading: Direction,
    pub paused: bool,
    pub arena: Arena,
}

/// Game state behind the single lock shared by every thread.
#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<GameState>>,
}

impl SharedGame {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Runs `f` with exclusive access to the state.
    pub fn with<R>(&self, f: impl FnOnce(&mut GameState) -> R) -> R {
        let mut state = self.inner.lock();
        f(&mut state)
    }

    /// Advances one movement tick. Takes the snapshot for the redraw in the
    /// same critical section, so drawing can happen after the lock is gone.
    pub fn step(&self) -> (StepOutcome, Option<Snapshot>) {
        self.with(|state| {
            let outcome = engine::step(state);
            let snapshot = outcome.needs_redraw().then(|| state.snapshot());
            (outcome, snapshot)
        })
    }

    pub fn set_direction(&self, direction: Direction) {
        self.with(|state| state.set_direction(direction));
    }

    pub fn toggle_pause(&self) -> bool {
        self.with(GameState::toggle_pause)
    }

    pub fn quit(&self) {
        self.with(GameState::quit);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.with(|state| state.running)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.with(|state| state.snapshot())
    }

    pub fn apply_housekeeping(&self, action: HousekeepingAction) -> Result<Option<Position>> {
        self.with(|state| state.apply_housekeeping(action))
    }
}
