use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    best_score: u32,
}

/// Best score across sessions, backed by a small JSON file.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    best: u32,
}

impl HighScoreStore {
    /// Opens the store at the platform data directory.
    ///
    /// A missing file counts as a best score of zero. A file that exists but
    /// cannot be read or parsed is an error, so it is never silently clobbered.
    pub fn open_default() -> io::Result<Self> {
        Self::open(default_path())
    }

    /// Opens the store at an explicit path.
    pub fn open(path: PathBuf) -> io::Result<Self> {
        let best = read_best(&path)?;
        Ok(Self { path, best })
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records a finished round. Writes to disk only on a new best.
    ///
    /// Returns whether `score` beat the previous best.
    pub fn record(&mut self, score: u32) -> io::Result<bool> {
        if score <= self.best {
            return Ok(false);
        }

        self.best = score;
        write_best(&self.path, score)?;
        Ok(true)
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn default_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

fn read_best(path: &Path) -> io::Result<u32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(error) => return Err(error),
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.best_score)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
}

fn write_best(path: &Path, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&ScoreFile { best_score: score })
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}
