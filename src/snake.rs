use crate::input::Direction;

/// Grid cell in (row, column) coordinates. Rows grow downward.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Returns the neighbouring cell in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                row: self.row - 1,
                col: self.col,
            },
            Direction::Down => Self {
                row: self.row + 1,
                col: self.col,
            },
            Direction::Left => Self {
                row: self.row,
                col: self.col - 1,
            },
            Direction::Right => Self {
                row: self.row,
                col: self.col + 1,
            },
        }
    }
}

/// Snake body and the single heading that steers it.
#[derive(Debug, Clone)]
pub struct Snake {
    // Head first. Never empty.
    body: Vec<Position>,
    heading: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position, heading: Direction) -> Self {
        Self {
            body: vec![start],
            heading,
        }
    }

    /// Creates a snake from explicit body segments (first is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, heading: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");
        Self {
            body: segments,
            heading,
        }
    }

    /// Returns the cell the head moves into on the next step.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().stepped(self.heading)
    }

    /// Moves every segment into its predecessor's cell and puts the head on
    /// `new_head`. Returns the cell the tail vacated.
    pub fn advance(&mut self, new_head: Position) -> Position {
        let old_tail = self.tail();
        self.body.rotate_right(1);
        self.body[0] = new_head;
        old_tail
    }

    /// Appends a segment behind the current tail.
    pub fn push_tail(&mut self, position: Position) {
        self.body.push(position);
    }

    /// Changes the heading unless that would fold the head back onto the neck.
    ///
    /// Returns whether the heading was accepted.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if let Some(neck) = self.neck() {
            if direction == self.heading.opposite() || self.head().stepped(direction) == neck {
                return false;
            }
        }
        self.heading = direction;
        true
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns the segment right behind the head, if any.
    #[must_use]
    pub fn neck(&self) -> Option<Position> {
        self.body.get(1).copied()
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true for a live snake.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Body segments from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Position] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Position, Snake};

    fn at(row: i32, col: i32) -> Position {
        Position { row, col }
    }

    #[test]
    fn stepping_follows_row_and_column_axes() {
        let origin = at(5, 5);

        assert_eq!(origin.stepped(Direction::Up), at(4, 5));
        assert_eq!(origin.stepped(Direction::Down), at(6, 5));
        assert_eq!(origin.stepped(Direction::Left), at(5, 4));
        assert_eq!(origin.stepped(Direction::Right), at(5, 6));
    }

    #[test]
    fn advance_shifts_every_segment_toward_the_head() {
        let mut snake =
            Snake::from_segments(vec![at(4, 5), at(5, 5), at(6, 5), at(6, 6)], Direction::Up);

        let vacated = snake.advance(at(3, 5));

        assert_eq!(vacated, at(6, 6));
        assert_eq!(snake.segments(), &[at(3, 5), at(4, 5), at(5, 5), at(6, 5)]);
    }

    #[test]
    fn advance_single_segment_moves_head_only() {
        let mut snake = Snake::new(at(5, 5), Direction::Up);

        let vacated = snake.advance(at(4, 5));

        assert_eq!(vacated, at(5, 5));
        assert_eq!(snake.segments(), &[at(4, 5)]);
    }

    #[test]
    fn single_segment_snake_may_reverse() {
        let mut snake = Snake::new(at(5, 5), Direction::Up);

        assert!(snake.steer(Direction::Down));
        assert_eq!(snake.heading(), Direction::Down);
    }

    #[test]
    fn steering_into_neck_is_rejected() {
        let mut snake = Snake::from_segments(vec![at(4, 5), at(5, 5)], Direction::Up);

        assert!(!snake.steer(Direction::Down));
        assert_eq!(snake.heading(), Direction::Up);

        assert!(snake.steer(Direction::Left));
        assert_eq!(snake.heading(), Direction::Left);
    }

    #[test]
    fn reversal_of_pending_turn_is_rejected() {
        // Turned left without stepping: the neck is below, but right is
        // still the reverse of the heading.
        let mut snake = Snake::from_segments(vec![at(4, 5), at(5, 5)], Direction::Up);
        assert!(snake.steer(Direction::Left));

        assert!(!snake.steer(Direction::Right));
        assert_eq!(snake.heading(), Direction::Left);

        assert!(!snake.steer(Direction::Down));
        assert_eq!(snake.heading(), Direction::Left);
    }

    #[test]
    fn next_head_uses_heading() {
        let snake = Snake::new(at(2, 2), Direction::Right);
        assert_eq!(snake.next_head_position(), at(2, 3));
    }
}
