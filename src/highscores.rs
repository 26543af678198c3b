use crate::consts::{self, HISTORY_CAPACITY};
use crate::difficulty::Difficulty;
use chrono::{DateTime, Utc};
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A finished game's result.  Only games that scored are recorded.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct ScoreRecord {
    pub(crate) score: NonZeroU32,
    pub(crate) difficulty: Difficulty,
    #[serde(rename = "date")]
    pub(crate) timestamp: DateTime<Utc>,
}

impl ScoreRecord {
    pub(crate) fn new(score: NonZeroU32, difficulty: Difficulty) -> ScoreRecord {
        ScoreRecord {
            score,
            difficulty,
            timestamp: Utc::now(),
        }
    }
}

/// The best recent scores, highest first, at most
/// [`HISTORY_CAPACITY`] of them
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ScoreHistory(Vec<ScoreRecord>);

impl ScoreHistory {
    /// Add a record, keeping the history sorted and capped.  The new record
    /// ranks behind any existing records with the same score, so a full
    /// history of ties keeps its older entries.  Returns `true` if the record
    /// made it into the history.
    pub(crate) fn insert(&mut self, record: ScoreRecord) -> bool {
        let pos = self.0.partition_point(|r| r.score >= record.score);
        if pos >= HISTORY_CAPACITY {
            return false;
        }
        self.0.insert(pos, record);
        self.0.truncate(HISTORY_CAPACITY);
        true
    }

    pub(crate) fn records(&self) -> &[ScoreRecord] {
        &self.0
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn best(&self) -> Option<&ScoreRecord> {
        self.0.first()
    }
}

impl FromIterator<ScoreRecord> for ScoreHistory {
    /// Collect records in any order into a sorted, capped history.  Ties keep
    /// their original relative order.
    fn from_iter<I: IntoIterator<Item = ScoreRecord>>(iter: I) -> ScoreHistory {
        let mut records = iter.into_iter().collect::<Vec<_>>();
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(HISTORY_CAPACITY);
        ScoreHistory(records)
    }
}

impl Serialize for ScoreHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ScoreHistory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<ScoreRecord>::deserialize(deserializer).map(ScoreHistory::from_iter)
    }
}

/// Durable storage for the score history
pub(crate) trait ScoreStore: fmt::Debug {
    fn load(&self) -> Result<ScoreHistory, LoadError>;
    fn save(&self, history: &ScoreHistory) -> Result<(), SaveError>;
}

/// A score history kept as a JSON array in a file on disk
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScoreFile {
    /// `None` if no path was configured and the default could not be
    /// determined
    path: Option<PathBuf>,
}

impl ScoreFile {
    pub(crate) fn new(path: Option<PathBuf>) -> ScoreFile {
        ScoreFile { path }
    }

    /// Return the default score file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join(consts::APP_DIR_NAME).join("scores.json"))
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ScoreStore for ScoreFile {
    fn save(&self, history: &ScoreHistory) -> Result<(), SaveError> {
        let path = self.path.as_deref().ok_or_else(SaveError::no_path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(history).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }

    fn load(&self) -> Result<ScoreHistory, LoadError> {
        let path = self.path.as_deref().ok_or_else(LoadError::no_path)?;
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ScoreHistory::default())
            }
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }
}

/// A store that lives only as long as the program, used when saving scores
/// to disk is turned off
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(RefCell<ScoreHistory>);

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<ScoreHistory, LoadError> {
        Ok(self.0.borrow().clone())
    }

    fn save(&self, history: &ScoreHistory) -> Result<(), SaveError> {
        self.0.borrow_mut().clone_from(history);
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> Result<ScoreHistory, LoadError> {
        (**self).load()
    }

    fn save(&self, history: &ScoreHistory) -> Result<(), SaveError> {
        (**self).save(history)
    }
}

#[derive(Debug, Error)]
#[error("Failed to save score history to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn no_path() -> Self {
        SaveError(SaveErrorSource::NoPath)
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize score history")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write score history to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read score history from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read score history file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize score history")]
    Deserialize(#[source] serde_json::Error),
}
