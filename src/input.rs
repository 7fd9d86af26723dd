use std::io;
use std::time::Instant;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use serde::{Deserialize, Serialize};

/// Canonical movement directions on the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// All directions, in no particular order of preference.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

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

    /// Unit step as `(column delta, row delta)`. Rows grow downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
        }
    }
}

/// Logical input events consumed by the driver loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Restart gesture; only meaningful after death.
    Acknowledge,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Waits for the next mapped input until `deadline`.
///
/// Events that map to nothing (mouse motion, key releases, resizes) are
/// skipped. Returns `Ok(None)` once the deadline passes.
pub fn next_input(deadline: Instant) -> io::Result<Option<GameInput>> {
    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            return Ok(None);
        }

        if let Some(input) = map_event(&event::read()?) {
            return Ok(Some(input));
        }

        if Instant::now() >= deadline {
            return Ok(None);
        }
    }
}

/// Maps one raw terminal event to a logical input.
#[must_use]
pub fn map_event(event: &Event) -> Option<GameInput> {
    match event {
        Event::Key(key) => map_key(*key),
        Event::Mouse(mouse) => map_mouse(*mouse),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => GameInput::Direction(Direction::Right),
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => GameInput::Direction(Direction::Down),
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Acknowledge,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

fn map_mouse(mouse: MouseEvent) -> Option<GameInput> {
    matches!(mouse.kind, MouseEventKind::Down(_)).then_some(GameInput::Acknowledge)
}
