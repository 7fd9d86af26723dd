use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, GridSize};
use crate::error::{ConfigError, PlacementError};
use crate::food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Life state of the current round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameState {
    Playing,
    /// Terminal snapshot kept for rendering until acknowledged.
    Die,
}

/// What ended the round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Result of a single [`SimulationEngine::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Idle,
    Moved,
    Ate,
    Died(DeathReason),
}

/// Authoritative snake simulation, advanced one tick at a time.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: EngineConfig,
    grid: GridSize,
    snake: Snake,
    food: Option<Position>,
    state: GameState,
    death_reason: Option<DeathReason>,
    score: u32,
    speed: f64,
    rng: StdRng,
}

impl SimulationEngine {
    /// Creates an engine with entropy-seeded food placement.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible runs.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates an engine on a `rows` x `cols` grid with default tuning.
    pub fn with_dimensions(rows: u16, cols: u16) -> Result<Self, ConfigError> {
        Self::new(EngineConfig::for_grid(rows, cols))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        // Round fields are placeholders until `reset` seeds them.
        let mut engine = Self {
            grid: config.grid(),
            snake: Snake::from_segments(vec![Position::new(0, 0)], Direction::Up),
            food: None,
            state: GameState::Playing,
            death_reason: None,
            score: 0,
            speed: 0.0,
            config,
            rng,
        };
        engine.reset();

        Ok(engine)
    }

    /// Re-seeds body, heading, score, speed and food to their starting values.
    pub fn reset(&mut self) {
        self.snake = Snake::from_segments(
            self.config.starting_body.clone(),
            self.config.starting_direction,
        );
        self.state = GameState::Playing;
        self.death_reason = None;
        self.speed = self.config.base_speed;
        self.score = 0;
        self.generate_food();

        info!(
            rows = self.grid.rows,
            cols = self.grid.cols,
            food = ?self.food,
            "round started"
        );
    }

    /// Advances the simulation by one step.
    ///
    /// Does nothing while dead, so the driver may keep ticking to render the
    /// death screen.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != GameState::Playing {
            return TickOutcome::Idle;
        }

        let next_head = self.snake.next_head_position();
        self.snake.push_head(next_head);

        // The food cell is never part of the previous body, so eating can't collide.
        if self.food == Some(next_head) {
            self.score = self.score.saturating_add(self.config.score_increment);
            self.speed *= self.config.speed_growth_factor;
            self.generate_food();

            debug!(
                score = self.score,
                length = self.snake.len(),
                speed = self.speed,
                "food eaten"
            );
            return TickOutcome::Ate;
        }

        if let Some(reason) = self.collision() {
            self.state = GameState::Die;
            self.death_reason = Some(reason);

            info!(
                cause = ?reason,
                score = self.score,
                length = self.snake.len(),
                "snake died"
            );
            return TickOutcome::Died(reason);
        }

        self.snake.pop_tail();
        TickOutcome::Moved
    }

    /// Sets the heading for the next tick, ignoring direct reversals.
    pub fn set_direction(&mut self, direction: Direction) {
        let current = self.snake.direction();
        if !self.snake.turn(direction) {
            debug!(?current, requested = ?direction, "reversal ignored");
        }
    }

    /// Restart gesture. Resets after a death; otherwise does nothing.
    ///
    /// Returns whether a new round was started.
    pub fn acknowledge(&mut self) -> bool {
        if self.state != GameState::Die {
            return false;
        }
        self.reset();
        true
    }

    /// Moves the food to `position` for scripted scenarios.
    pub fn place_food(&mut self, position: Position) -> Result<(), PlacementError> {
        if !position.is_within_bounds(self.grid) {
            return Err(PlacementError::OutOfBounds(position));
        }
        if self.snake.occupies(position) {
            return Err(PlacementError::Occupied(position));
        }
        self.food = Some(position);
        Ok(())
    }

    fn generate_food(&mut self) {
        self.food = food::spawn_position(&mut self.rng, self.grid, &self.snake);
        if self.food.is_none() {
            warn!(length = self.snake.len(), "no free cell left for food");
        }
    }

    fn collision(&self) -> Option<DeathReason> {
        if !self.snake.head().is_within_bounds(self.grid) {
            return Some(DeathReason::WallCollision);
        }
        if self.snake.head_overlaps_body() {
            return Some(DeathReason::SelfCollision);
        }
        None
    }

    /// Body from head to tail.
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.snake.segments()
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food cell; `None` only when the snake covers the whole grid.
    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current ticks per second.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Wall-clock time between ticks at the current speed, saturating at `Duration::MAX`.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.speed.recip()).unwrap_or(Duration::MAX)
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
