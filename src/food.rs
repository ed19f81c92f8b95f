use rand::Rng;

use crate::config::Arena;
use crate::error::{Result, SnakeError};
use crate::snake::{Position, Snake};

/// Random draws tried before falling back to a full scan of free cells.
pub const MAX_SPAWN_ATTEMPTS: usize = 256;

/// Food items currently on the board, in spawn order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FoodSet {
    items: Vec<Position>,
}

impl FoodSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a food item. Callers keep positions unique.
    pub fn insert(&mut self, position: Position) {
        debug_assert!(!self.contains(position));
        self.items.push(position);
    }

    /// Removes the item at `position` if present. Scans the set once.
    pub fn take(&mut self, position: Position) -> bool {
        match self.items.iter().position(|item| *item == position) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.items.contains(&position)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Position> {
        self.items.clone()
    }
}

impl FromIterator<Position> for FoodSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Picks an interior cell free of both snake and food.
///
/// Samples uniformly first; once `MAX_SPAWN_ATTEMPTS` draws have all landed on
/// occupied cells, picks uniformly among the remaining free cells instead.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    arena: Arena,
    snake: &Snake,
    food: &FoodSet,
) -> Result<Position> {
    let is_free = |position: Position| !snake.occupies(position) && !food.contains(position);

    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = Position {
            row: rng.gen_range(1..=i32::from(arena.rows)),
            col: rng.gen_range(1..=i32::from(arena.cols)),
        };
        if is_free(candidate) {
            return Ok(candidate);
        }
    }

    let candidates: Vec<Position> = arena.cells().filter(|cell| is_free(*cell)).collect();
    if candidates.is_empty() {
        return Err(SnakeError::ArenaFull);
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{FoodSet, spawn_position};
    use crate::config::Arena;
    use crate::error::SnakeError;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    fn at(row: i32, col: i32) -> Position {
        Position { row, col }
    }

    #[test]
    fn take_removes_first_and_interior_items() {
        let mut food: FoodSet = [at(1, 1), at(2, 2), at(3, 3)].into_iter().collect();

        assert!(food.take(at(1, 1)));
        assert_eq!(food.to_vec(), vec![at(2, 2), at(3, 3)]);

        assert!(food.take(at(3, 3)));
        assert_eq!(food.to_vec(), vec![at(2, 2)]);

        assert!(!food.take(at(9, 9)));
        assert_eq!(food.len(), 1);
    }

    #[test]
    fn food_spawn_never_overlaps_snake_or_food() {
        let mut rng = StdRng::seed_from_u64(7);
        let arena = Arena::new(4, 6);
        let snake = Snake::from_segments(vec![at(1, 1), at(1, 2), at(1, 3)], Direction::Left);
        let mut food = FoodSet::new();

        for _ in 0..(arena.total_cells() - snake.len()) {
            let position =
                spawn_position(&mut rng, arena, &snake, &food).expect("free cells remain");
            assert!(arena.contains(position));
            assert!(!snake.occupies(position));
            assert!(!food.contains(position));
            food.insert(position);
        }

        assert_eq!(food.len(), arena.total_cells() - snake.len());
    }

    #[test]
    fn full_arena_reports_error() {
        let mut rng = StdRng::seed_from_u64(8);
        let arena = Arena::new(1, 2);
        let snake = Snake::from_segments(vec![at(1, 1)], Direction::Up);
        let food: FoodSet = [at(1, 2)].into_iter().collect();

        assert!(matches!(
            spawn_position(&mut rng, arena, &snake, &food),
            Err(SnakeError::ArenaFull)
        ));
    }

    #[test]
    fn last_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(9);
        let arena = Arena::new(3, 3);
        let snake = Snake::from_segments(
            vec![
                at(1, 1),
                at(1, 2),
                at(1, 3),
                at(2, 3),
                at(2, 2),
                at(2, 1),
                at(3, 1),
                at(3, 2),
            ],
            Direction::Right,
        );

        let position = spawn_position(&mut rng, arena, &snake, &FoodSet::new())
            .expect("one free cell remains");

        assert_eq!(position, at(3, 3));
    }
}
