use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Random draws tried before falling back to a scan of the free cells.
pub const MAX_RANDOM_ATTEMPTS: usize = 64;

/// Picks a uniformly random free cell, or `None` when the snake covers the grid.
///
/// Draws random cells first, which is cheap while the board is mostly empty.
/// After [`MAX_RANDOM_ATTEMPTS`] misses it enumerates the free cells and picks
/// one of those, so the call always terminates.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if bounds.total_cells() == 0 {
        return None;
    }

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.cols)),
            y: rng.gen_range(0..i32::from(bounds.rows)),
        };
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let free = free_cells(bounds, snake);
    if free.is_empty() {
        return None;
    }

    Some(free[rng.gen_range(0..free.len())])
}

fn free_cells(bounds: GridSize, snake: &Snake) -> Vec<Position> {
    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(snake.len()));

    for y in 0..i32::from(bounds.rows) {
        for x in 0..i32::from(bounds.cols) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    candidates
}
