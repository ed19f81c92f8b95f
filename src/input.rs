use std::io;
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::SharedGame;
use crate::scheduler::ControlEvent;

/// How long the listener blocks before re-checking the running flag.
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Canonical movement directions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input events understood by the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Quit,
}

/// Maps a raw key press to a game input.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameInput::Quit)
        }
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Char(' ' | 'p' | 'P') => Some(GameInput::Pause),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

/// Source of key events for the listener.
pub trait KeySource {
    /// Waits up to `timeout` for the next key event.
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

/// Reads keys from the crossterm event queue.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

/// Blocking read loop that steers the shared game.
pub struct InputListener<S> {
    source: S,
    game: SharedGame,
    events: Sender<ControlEvent>,
}

impl<S: KeySource> InputListener<S> {
    #[must_use]
    pub fn new(source: S, game: SharedGame, events: Sender<ControlEvent>) -> Self {
        Self {
            source,
            game,
            events,
        }
    }

    /// Runs until quit is pressed or the game stops running.
    ///
    /// Always leaves the game stopped and posts `Quit` on the way out, so the
    /// control loop never waits on a dead listener.
    pub fn run(mut self) -> io::Result<()> {
        let result = self.listen();

        self.game.quit();
        let _ = self.events.send(ControlEvent::Quit);
        result
    }

    fn listen(&mut self) -> io::Result<()> {
        while self.game.is_running() {
            let Some(key) = self.source.next_key(INPUT_POLL_INTERVAL)? else {
                continue;
            };

            match map_key_event(key) {
                Some(GameInput::Direction(direction)) => self.game.set_direction(direction),
                Some(GameInput::Pause) => {
                    let paused = self.game.toggle_pause();
                    tracing::debug!(paused, "pause toggled");
                    if self.events.send(ControlEvent::Redraw).is_err() {
                        return Ok(());
                    }
                }
                Some(GameInput::Quit) => {
                    tracing::info!("quit requested");
                    return Ok(());
                }
                None => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;
    use std::sync::mpsc;
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::{Direction, GameInput, InputListener, KeySource, map_key_event};
    use crate::config::Arena;
    use crate::game::{GameState, SharedGame};
    use crate::scheduler::ControlEvent;
    use crate::snake::{Position, Snake};

    struct ScriptedKeys(VecDeque<KeyEvent>);

    impl KeySource for ScriptedKeys {
        fn next_key(&mut self, _timeout: Duration) -> io::Result<Option<KeyEvent>> {
            Ok(self.0.pop_front())
        }
    }

    struct BrokenKeys;

    impl KeySource for BrokenKeys {
        fn next_key(&mut self, _timeout: Duration) -> io::Result<Option<KeyEvent>> {
            Err(io::Error::other("terminal gone"))
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(
            map_key_event(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('S'))),
            Some(GameInput::Direction(Direction::Down))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Right)),
            Some(GameInput::Direction(Direction::Right))
        );
    }

    #[test]
    fn pause_and_quit_keys_are_recognised() {
        assert_eq!(map_key_event(press(KeyCode::Char(' '))), Some(GameInput::Pause));
        assert_eq!(map_key_event(press(KeyCode::Char('p'))), Some(GameInput::Pause));
        assert_eq!(map_key_event(press(KeyCode::Char('q'))), Some(GameInput::Quit));
        assert_eq!(map_key_event(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(map_key_event(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;

        assert_eq!(map_key_event(release), None);
    }

    #[test]
    fn listener_steers_pauses_and_quits() {
        let game = SharedGame::new(GameState::new_with_seed(Arena::new(10, 10), 1));
        let (tx, rx) = mpsc::channel();
        let keys = ScriptedKeys(VecDeque::from([
            press(KeyCode::Left),
            press(KeyCode::Char(' ')),
            press(KeyCode::Char('q')),
            press(KeyCode::Right),
        ]));

        InputListener::new(keys, game.clone(), tx)
            .run()
            .expect("scripted keys never fail");

        let snapshot = game.snapshot();
        assert_eq!(snapshot.heading, Direction::Left);
        assert!(snapshot.paused);
        assert!(!game.is_running());

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events, vec![ControlEvent::Redraw, ControlEvent::Quit]);
    }

    #[test]
    fn listener_ignores_reversal_into_neck() {
        let mut state = GameState::new_with_seed(Arena::new(10, 10), 2);
        state.snake = Snake::from_segments(
            vec![Position { row: 4, col: 5 }, Position { row: 5, col: 5 }],
            Direction::Up,
        );
        let game = SharedGame::new(state);
        let (tx, _rx) = mpsc::channel();
        let keys = ScriptedKeys(VecDeque::from([
            press(KeyCode::Down),
            press(KeyCode::Char('q')),
        ]));

        InputListener::new(keys, game.clone(), tx)
            .run()
            .expect("scripted keys never fail");

        assert_eq!(game.snapshot().heading, Direction::Up);
    }

    #[test]
    fn listener_error_still_stops_the_game() {
        let game = SharedGame::new(GameState::new_with_seed(Arena::new(10, 10), 3));
        let (tx, rx) = mpsc::channel();

        let result = InputListener::new(BrokenKeys, game.clone(), tx).run();

        assert!(result.is_err());
        assert!(!game.is_running());
        assert_eq!(rx.try_recv(), Ok(ControlEvent::Quit));
    }
}
