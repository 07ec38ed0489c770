//! Persistent play records
//!
//! One RON document holds everything the game remembers across runs:
//! cumulative counters, derived averages, sound preferences, and the raw
//! per-game history. The whole document is rewritten synchronously after
//! every mutation, and averages are always recomputed from the raw
//! history — never carried as running sums — so a reload can't drift
//! from what a from-scratch recomputation would produce.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::game::GameResult;

/// Error type for record loading and saving
#[derive(Debug)]
pub enum RecordError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Serialize(ron::Error),
}

impl From<std::io::Error> for RecordError {
    fn from(e: std::io::Error) -> Self {
        RecordError::Io(e)
    }
}

impl From<ron::error::SpannedError> for RecordError {
    fn from(e: ron::error::SpannedError) -> Self {
        RecordError::Parse(e)
    }
}

impl From<ron::Error> for RecordError {
    fn from(e: ron::Error) -> Self {
        RecordError::Serialize(e)
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::Io(e) => write!(f, "IO error: {}", e),
            RecordError::Parse(e) => write!(f, "parse error: {}", e),
            RecordError::Serialize(e) => write!(f, "serialize error: {}", e),
        }
    }
}

impl std::error::Error for RecordError {}

/// One finished (or aborted) round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub score: u32,
    pub tiles: u32,
    pub moved: u32,
    pub turned: u32,
    /// Seconds per placed tile for this round.
    pub put_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Records {
    pub play_times: u32,
    pub high_score: u32,
    pub total_tiles: u32,
    pub tiles_turned: u32,
    pub tiles_moved: u32,
    pub startup_times: u32,
    pub abort_times: u32,

    pub average_score: f64,
    pub average_tiles: f64,
    pub average_moved: f64,
    pub average_turned: f64,
    pub average_put_time: f64,

    pub bgm_enable: bool,
    pub se_enable: bool,

    pub games: Vec<GameRecord>,

    pub version: String,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            play_times: 0,
            high_score: 0,
            total_tiles: 0,
            tiles_turned: 0,
            tiles_moved: 0,
            startup_times: 0,
            abort_times: 0,
            average_score: 0.0,
            average_tiles: 0.0,
            average_moved: 0.0,
            average_turned: 0.0,
            average_put_time: 0.0,
            bgm_enable: true,
            se_enable: true,
            games: Vec::new(),
            version: crate::VERSION.to_string(),
        }
    }
}

impl Records {
    fn apply_game(&mut self, result: &GameResult) {
        self.games.push(GameRecord {
            score: result.score,
            tiles: result.tiles,
            moved: result.moved,
            turned: result.turned,
            put_time: result.put_time(),
        });

        self.play_times += 1;
        self.total_tiles += result.tiles;
        self.tiles_turned += result.turned;
        self.tiles_moved += result.moved;
        if result.score > self.high_score {
            self.high_score = result.score;
        }

        let n = self.games.len() as f64;
        self.average_score = self.games.iter().map(|g| g.score as f64).sum::<f64>() / n;
        self.average_tiles = self.games.iter().map(|g| g.tiles as f64).sum::<f64>() / n;
        self.average_moved = self.games.iter().map(|g| g.moved as f64).sum::<f64>() / n;
        self.average_turned = self.games.iter().map(|g| g.turned as f64).sum::<f64>() / n;
        self.average_put_time = self.games.iter().map(|g| g.put_time).sum::<f64>() / n;
    }
}

/// Per-user location of the record file.
pub fn default_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("verdant")
        .join("records.ron")
}

/// Owns the record document and its on-disk home.
pub struct RecordStore {
    path: PathBuf,
    records: Records,
}

impl RecordStore {
    /// Load the record file, or start fresh when there is none yet.
    /// A file that exists but does not parse is a hard error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RecordError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            println!("records: starting fresh at {}", path.display());
            return Ok(Self {
                path,
                records: Records::default(),
            });
        }

        let contents = fs::read_to_string(&path)?;
        let records: Records = ron::from_str(&contents)?;
        println!("records: loaded {}", path.display());
        Ok(Self { path, records })
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Fold one finished round into the records and write them out.
    pub fn record_game(&mut self, result: &GameResult) -> Result<(), RecordError> {
        self.records.apply_game(result);
        self.save()
    }

    pub fn record_startup(&mut self) -> Result<(), RecordError> {
        self.records.startup_times += 1;
        self.save()
    }

    pub fn record_abort(&mut self) -> Result<(), RecordError> {
        self.records.abort_times += 1;
        self.save()
    }

    /// Rewrite the whole document, synchronously.
    pub fn save(&self) -> Result<(), RecordError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config = ron::ser::PrettyConfig::new().indentor("  ".to_string());
        let contents = ron::ser::to_string_pretty(&self.records, config)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
