//! Movement tick: heading, collisions, scoring and growth.

use crate::game::GameState;

/// Why a step sent the snake back to the start.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ResetCause {
    Wall,
    SelfCollision,
}

/// Result of one movement tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// Paused; nothing changed.
    Paused,
    Moved { ate: bool, grew: bool },
    Reset(ResetCause),
}

impl StepOutcome {
    #[must_use]
    pub fn needs_redraw(self) -> bool {
        !matches!(self, Self::Paused)
    }
}

/// Advances the snake by one cell. Caller holds the state lock.
///
/// Collisions restart the game and are reported through the outcome; this
/// never fails.
pub fn step(state: &mut GameState) -> StepOutcome {
    if state.paused {
        return StepOutcome::Paused;
    }

    let new_head = state.snake.next_head_position();

    if !state.arena().contains(new_head) {
        tracing::debug!(score = state.score, ?new_head, "hit wall, restarting");
        state.reset();
        return StepOutcome::Reset(ResetCause::Wall);
    }

    // Checked against the body before it moves, tail cell included.
    if state.snake.occupies(new_head) {
        tracing::debug!(score = state.score, ?new_head, "hit own body, restarting");
        state.reset();
        return StepOutcome::Reset(ResetCause::SelfCollision);
    }

    let ate = state.food.take(new_head);
    if ate {
        state.score = state.score.saturating_add(state.food_reward());
        tracing::debug!(score = state.score, ?new_head, "food eaten");
    }

    let old_tail = state.snake.advance(new_head);

    let grew = state.pending_growth;
    if grew {
        state.snake.push_tail(old_tail);
        state.pending_growth = false;
    }

    StepOutcome::Moved { ate, grew }
}
