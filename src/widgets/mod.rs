//! The pieces of the game screen
mod board;
mod history;
mod selector;
mod status;
pub(crate) use self::board::{Board, Snapshot};
pub(crate) use self::history::HistoryPanel;
pub(crate) use self::selector::DifficultySelector;
pub(crate) use self::status::ScoreBar;
