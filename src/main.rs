mod app;
mod command;
mod config;
mod consts;
mod difficulty;
mod game;
mod highscores;
mod logging;
mod session;
mod timer;
mod util;
mod widgets;
use crate::app::App;
use crate::config::Config;
use crate::highscores::{MemoryStore, ScoreFile, ScoreStore};
use crate::timer::IntervalTimer;
use anyhow::Context;
use std::io::{self, ErrorKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("gridsnake: {e:#}; using default settings");
            Config::default()
        }
    };
    if let Err(e) = logging::init(&config.logging) {
        eprintln!("gridsnake: {}", logging::error_chain(&e));
    }
    log::info!("Starting gridsnake {}", env!("CARGO_PKG_VERSION"));
    let store: Box<dyn ScoreStore> = if config.files.save_scores {
        let file = ScoreFile::new(config.files.scores_file());
        match file.path() {
            Some(p) => log::debug!("Score history file: {}", p.display()),
            None => log::warn!("Could not determine where to save the score history"),
        }
        Box::new(file)
    } else {
        log::info!("Score history will not be saved");
        Box::new(MemoryStore::default())
    };
    let app = App::new(
        rand::rng(),
        IntervalTimer::new(),
        store,
        config.game.difficulty,
    );
    let terminal = ratatui::init();
    let r = app.run(terminal);
    ratatui::restore();
    log::info!("Exiting");
    io_exit(r)
}

fn load_config() -> anyhow::Result<Config> {
    let path = Config::default_path()?;
    Config::load(&path, true)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal I/O error: {e}");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
