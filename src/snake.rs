use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid cell addressed by column (`x`) and row (`y`).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.cols)
            && self.y < i32::from(bounds.rows)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when `other` shares an edge with this cell.
    #[must_use]
    pub fn is_adjacent_to(self, other: Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Snake body (head first) plus the heading it will move in next.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty(), "snake body must not be empty");

        Self {
            body: VecDeque::from(segments),
            direction,
        }
    }

    /// Changes heading unless `direction` is the reverse of the current one.
    ///
    /// Returns whether the heading was accepted.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Returns the head position for the next movement tick.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().stepped(self.direction)
    }

    /// Inserts a new head; the body grows by one until the tail is popped.
    pub fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
    }

    /// Removes and returns the tail segment. The head is never removed.
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() <= 1 {
            return None;
        }
        self.body.pop_back()
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the heading used by the next tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    fn vertical_snake() -> Snake {
        Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(5, 7),
            ],
            Direction::Up,
        )
    }

    #[test]
    fn bounds_check_covers_every_edge() {
        let bounds = GridSize { cols: 4, rows: 3 };

        assert!(Position::new(0, 0).is_within_bounds(bounds));
        assert!(Position::new(3, 2).is_within_bounds(bounds));
        assert!(!Position::new(-1, 0).is_within_bounds(bounds));
        assert!(!Position::new(0, -1).is_within_bounds(bounds));
        assert!(!Position::new(4, 0).is_within_bounds(bounds));
        assert!(!Position::new(0, 3).is_within_bounds(bounds));
    }

    #[test]
    fn stepping_follows_screen_coordinates() {
        let origin = Position::new(2, 2);

        assert_eq!(origin.stepped(Direction::Up), Position::new(2, 1));
        assert_eq!(origin.stepped(Direction::Down), Position::new(2, 3));
        assert_eq!(origin.stepped(Direction::Left), Position::new(1, 2));
        assert_eq!(origin.stepped(Direction::Right), Position::new(3, 2));
    }

    #[test]
    fn turn_rejects_reverse_and_keeps_heading() {
        let mut snake = vertical_snake();

        assert!(!snake.turn(Direction::Down));
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.next_head_position(), Position::new(5, 4));

        assert!(snake.turn(Direction::Left));
        assert_eq!(snake.next_head_position(), Position::new(4, 5));
    }

    #[test]
    fn turn_guard_tracks_latest_heading_not_last_move() {
        let mut snake = vertical_snake();

        // Left is accepted, after which Right becomes the forbidden reversal.
        assert!(snake.turn(Direction::Left));
        assert!(!snake.turn(Direction::Right));
        assert!(snake.turn(Direction::Down));
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn push_and_pop_move_the_body() {
        let mut snake = vertical_snake();

        let next = snake.next_head_position();
        snake.push_head(next);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.pop_tail(), Some(Position::new(5, 7)));

        assert_eq!(snake.head(), Position::new(5, 4));
        assert_eq!(snake.segments().last(), Some(&Position::new(5, 6)));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn pop_tail_never_removes_the_head() {
        let mut snake = Snake::from_segments(vec![Position::new(1, 1)], Direction::Right);

        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn head_overlap_ignores_the_head_itself() {
        let mut snake = vertical_snake();
        assert!(!snake.head_overlaps_body());

        snake.push_head(Position::new(5, 6));
        assert!(snake.head_overlaps_body());
    }

    #[test]
    fn adjacency_is_edge_sharing_only() {
        let cell = Position::new(3, 3);

        assert!(cell.is_adjacent_to(Position::new(3, 4)));
        assert!(!cell.is_adjacent_to(Position::new(4, 4)));
        assert!(!cell.is_adjacent_to(cell));
    }
}
