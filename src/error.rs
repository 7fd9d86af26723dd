use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::input::Direction;
use crate::snake::Position;

/// Rejected engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: u16, cols: u16 },

    #[error("base speed must be a positive number of ticks per second (got {0})")]
    InvalidBaseSpeed(f64),

    #[error("base speed {0} is too slow: the tick interval does not fit a Duration")]
    BaseSpeedTooSlow(f64),

    #[error("speed growth factor must be greater than 1 (got {0})")]
    InvalidSpeedGrowth(f64),

    #[error("starting body must contain at least one cell")]
    EmptyStartingBody,

    #[error("starting body cell {0} lies outside the grid")]
    StartingBodyOutOfBounds(Position),

    #[error("starting body repeats cell {0}")]
    StartingBodyOverlaps(Position),

    #[error("starting body is broken between {0} and {1}")]
    StartingBodyDisconnected(Position, Position),

    #[error("starting direction {0:?} points the head back into its own body")]
    StartingDirectionReversed(Direction),

    #[error("starting body fills the grid; no cell is left for food")]
    NoRoomForFood,

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejected scripted food placement.
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum PlacementError {
    #[error("food cell {0} lies outside the grid")]
    OutOfBounds(Position),

    #[error("food cell {0} is occupied by the snake")]
    Occupied(Position),
}

/// Errors surfaced by the terminal front end.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
