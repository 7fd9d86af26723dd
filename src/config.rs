use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::Direction;
use crate::snake::Position;

/// Logical grid dimensions.
///
/// Named fields keep columns and rows unambiguous at every call site.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct GridSize {
    pub cols: u16,
    pub rows: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.cols) * usize::from(self.rows)
    }
}

/// Default number of grid rows.
pub const DEFAULT_ROW_COUNT: u16 = 20;

/// Default number of grid columns.
pub const DEFAULT_COL_COUNT: u16 = 20;

/// Ticks per second right after a reset.
pub const DEFAULT_BASE_SPEED: f64 = 3.0;

/// Speed multiplier applied each time food is eaten.
pub const DEFAULT_SPEED_GROWTH_FACTOR: f64 = 1.1;

/// Points awarded per food eaten.
pub const DEFAULT_SCORE_INCREMENT: u32 = 100;

/// Heading of the default starting body.
pub const DEFAULT_STARTING_DIRECTION: Direction = Direction::Up;

/// Default starting body, head first, lying vertically below the head.
pub const DEFAULT_STARTING_BODY: [Position; 3] = [
    Position::new(5, 5),
    Position::new(5, 6),
    Position::new(5, 7),
];

/// Every tunable the simulation engine recognizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub row_count: u16,
    pub col_count: u16,
    /// Ticks per second after a reset; the driver throttles to this rate.
    pub base_speed: f64,
    pub speed_growth_factor: f64,
    pub score_increment: u32,
    /// Head first.
    pub starting_body: Vec<Position>,
    pub starting_direction: Direction,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            row_count: DEFAULT_ROW_COUNT,
            col_count: DEFAULT_COL_COUNT,
            base_speed: DEFAULT_BASE_SPEED,
            speed_growth_factor: DEFAULT_SPEED_GROWTH_FACTOR,
            score_increment: DEFAULT_SCORE_INCREMENT,
            starting_body: DEFAULT_STARTING_BODY.to_vec(),
            starting_direction: DEFAULT_STARTING_DIRECTION,
        }
    }
}

impl EngineConfig {
    /// Default tuning on a `rows` x `cols` grid.
    ///
    /// The default starting body is kept when it fits; smaller grids get a
    /// vertical three-cell body centred on the grid, heading up.
    #[must_use]
    pub fn for_grid(rows: u16, cols: u16) -> Self {
        let mut config = Self {
            row_count: rows,
            col_count: cols,
            ..Self::default()
        };
        config.fit_starting_body();
        config
    }

    /// Replaces the starting body with the centred fallback when the
    /// current one does not fit the grid.
    pub fn fit_starting_body(&mut self) {
        let grid = self.grid();
        if self
            .starting_body
            .iter()
            .all(|cell| cell.is_within_bounds(grid))
        {
            return;
        }

        let x = i32::from(self.col_count / 2);
        let y = i32::from(self.row_count / 2);
        self.starting_body = vec![
            Position::new(x, y - 1),
            Position::new(x, y),
            Position::new(x, y + 1),
        ];
        self.starting_direction = Direction::Up;
    }

    /// Loads a configuration from a JSON file. Missing keys take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize {
            cols: self.col_count,
            rows: self.row_count,
        }
    }

    /// Checks every invariant the engine relies on after a reset.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_count == 0 || self.col_count == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.row_count,
                cols: self.col_count,
            });
        }

        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return Err(ConfigError::InvalidBaseSpeed(self.base_speed));
        }
        if Duration::try_from_secs_f64(self.base_speed.recip()).is_err() {
            return Err(ConfigError::BaseSpeedTooSlow(self.base_speed));
        }

        if !(self.speed_growth_factor.is_finite() && self.speed_growth_factor > 1.0) {
            return Err(ConfigError::InvalidSpeedGrowth(self.speed_growth_factor));
        }

        self.validate_starting_body()
    }

    fn validate_starting_body(&self) -> Result<(), ConfigError> {
        let grid = self.grid();
        let Some(&head) = self.starting_body.first() else {
            return Err(ConfigError::EmptyStartingBody);
        };

        let mut seen = HashSet::with_capacity(self.starting_body.len());
        for &cell in &self.starting_body {
            if !cell.is_within_bounds(grid) {
                return Err(ConfigError::StartingBodyOutOfBounds(cell));
            }
            if !seen.insert(cell) {
                return Err(ConfigError::StartingBodyOverlaps(cell));
            }
        }

        for pair in self.starting_body.windows(2) {
            if !pair[0].is_adjacent_to(pair[1]) {
                return Err(ConfigError::StartingBodyDisconnected(pair[0], pair[1]));
            }
        }

        if self.starting_body.get(1) == Some(&head.stepped(self.starting_direction)) {
            return Err(ConfigError::StartingDirectionReversed(
                self.starting_direction,
            ));
        }

        if self.starting_body.len() >= grid.total_cells() {
            return Err(ConfigError::NoRoomForFood);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::ConfigError;
    use crate::input::Direction;
    use crate::snake::Position;

    use super::{DEFAULT_STARTING_BODY, EngineConfig, GridSize};

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.grid(), GridSize { cols: 20, rows: 20 });
        assert_eq!(config.starting_direction, Direction::Up);
        assert_eq!(config.score_increment, 100);
    }

    #[test]
    fn for_grid_keeps_default_body_when_it_fits() {
        let config = EngineConfig::for_grid(10, 10);

        assert_eq!(config.starting_body, DEFAULT_STARTING_BODY.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn for_grid_centres_body_on_small_grids() {
        let config = EngineConfig::for_grid(3, 4);

        assert_eq!(
            config.starting_body,
            vec![
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(2, 2),
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let config = EngineConfig::for_grid(0, 10);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 10 })
        ));
    }

    #[test]
    fn base_speed_must_be_positive_and_finite() {
        let mut config = EngineConfig::default();
        config.base_speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseSpeed(_))
        ));

        config.base_speed = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseSpeed(_))
        ));
    }

    #[test]
    fn base_speed_too_slow_to_schedule_is_rejected() {
        let mut config = EngineConfig::default();
        config.base_speed = 1e-20;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BaseSpeedTooSlow(speed)) if speed == 1e-20
        ));

        config.base_speed = f64::MIN_POSITIVE;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BaseSpeedTooSlow(_))
        ));

        config.base_speed = 1e-6;
        assert!(config.validate().is_ok());
        config.base_speed = f64::MAX;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn speed_growth_must_exceed_one() {
        let mut config = EngineConfig::default();
        config.speed_growth_factor = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeedGrowth(_))
        ));

        config.speed_growth_factor = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeedGrowth(_))
        ));
    }

    #[test]
    fn malformed_starting_bodies_are_rejected() {
        let mut config = EngineConfig::default();

        config.starting_body = Vec::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyStartingBody)
        ));

        config.starting_body = vec![Position::new(0, 0), Position::new(-1, 0)];
        config.starting_direction = Direction::Down;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartingBodyOutOfBounds(cell)) if cell == Position::new(-1, 0)
        ));

        config.starting_body = vec![
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(1, 1),
        ];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartingBodyOverlaps(_))
        ));

        config.starting_body = vec![Position::new(1, 1), Position::new(3, 1)];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartingBodyDisconnected(_, _))
        ));
    }

    #[test]
    fn starting_direction_must_not_face_the_neck() {
        let mut config = EngineConfig::default();
        config.starting_direction = Direction::Down;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartingDirectionReversed(Direction::Down))
        ));
    }

    #[test]
    fn body_filling_the_grid_leaves_no_room_for_food() {
        let config = EngineConfig {
            row_count: 1,
            col_count: 2,
            starting_body: vec![Position::new(0, 0), Position::new(1, 0)],
            starting_direction: Direction::Left,
            ..EngineConfig::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::NoRoomForFood)));
    }

    #[test]
    fn json_file_fills_missing_keys_with_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "row_count": 12, "score_increment": 10 }"#);

        let config = EngineConfig::from_json_file(&path).expect("partial config should load");

        assert_eq!(config.row_count, 12);
        assert_eq!(config.col_count, 20);
        assert_eq!(config.score_increment, 10);
        assert_eq!(config.starting_direction, Direction::Up);
        cleanup_test_path(&path);
    }

    #[test]
    fn json_file_reads_body_and_direction() {
        let path = unique_test_path("full");
        write_test_file(
            &path,
            r#"{
                "starting_body": [{ "x": 2, "y": 2 }, { "x": 1, "y": 2 }],
                "starting_direction": "right"
            }"#,
        );

        let config = EngineConfig::from_json_file(&path).expect("config should load");

        assert_eq!(
            config.starting_body,
            vec![Position::new(2, 2), Position::new(1, 2)]
        );
        assert_eq!(config.starting_direction, Direction::Right);
        assert!(config.validate().is_ok());
        cleanup_test_path(&path);
    }

    #[test]
    fn json_file_rejects_unknown_keys() {
        let path = unique_test_path("unknown");
        write_test_file(&path, r#"{ "cell_pixels": 16 }"#);

        assert!(matches!(
            EngineConfig::from_json_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_json_file_reports_read_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            EngineConfig::from_json_file(&path),
            Err(ConfigError::Read { .. })
        ));
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
