use crate::consts;
use crate::difficulty::Difficulty;
use crate::highscores::ScoreFile;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay defaults
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    /// Settings about the log file
    #[serde(default)]
    pub(crate) logging: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join(consts::APP_DIR_NAME).join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// The difficulty highlighted when the program starts.  It still has to
    /// be chosen explicitly before the first game.
    pub(crate) difficulty: Difficulty,
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the score history should be stored
    scores_file: Option<PathBuf>,

    /// Whether to load & save the score history
    pub(crate) save_scores: bool,
}

impl FileConfig {
    /// Return the filepath at which the score history should be stored: the
    /// file given in the configuration or, if that is not set, the default
    /// score file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    pub(crate) fn scores_file(&self) -> Option<PathBuf> {
        self.scores_file.clone().or_else(ScoreFile::default_path)
    }
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            scores_file: None,
            save_scores: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LogConfig {
    /// Path of the log file
    file: Option<PathBuf>,

    /// Most verbose level of messages to write
    pub(crate) level: LevelFilter,
}

impl LogConfig {
    /// Return the configured log file path, or the default path under the
    /// local data directory
    pub(crate) fn file(&self) -> Option<PathBuf> {
        self.file.clone().or_else(|| {
            dirs::data_local_dir()
                .map(|p| p.join(consts::APP_DIR_NAME).join("gridsnake.log"))
        })
    }
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
