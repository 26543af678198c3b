//! Game lifecycle: choosing a difficulty, starting, ticking, ending, and
//! recording the score
use crate::difficulty::Difficulty;
use crate::game::{grid::Cell, Collision, Direction, Simulation, Snake, Step};
use crate::highscores::{ScoreHistory, ScoreRecord, ScoreStore};
use crate::logging;
use crate::timer::Scheduler;
use rand::Rng;
use std::num::NonZeroU32;

/// Receives the session's outputs
pub(crate) trait Observer {
    /// Called once when a game starts and after every tick that moved the
    /// snake, with the committed board
    fn board_committed(&mut self, snake: &Snake, food: Cell);

    /// Called with the history loaded at start-up and again whenever a score
    /// has been added to it
    fn history_updated(&mut self, history: &ScoreHistory);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// No game has been played yet
    Idle,
    Running,
    GameOver {
        score: u32,
        /// What ended the game; `None` if it was ended from outside (e.g.,
        /// by switching difficulty mid-game)
        cause: Option<EndCause>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EndCause {
    Collision(Collision),
    /// The snake filled the whole field
    GridFull,
}

/// Owns the current game, the tick schedule, and the score history.
///
/// Every state change goes through one of the methods here, so the
/// simulation is only ever observed between ticks.
#[derive(Debug)]
pub(crate) struct Session<T, S, O> {
    phase: Phase,
    difficulty: Difficulty,
    difficulty_selected: bool,
    sim: Option<Simulation>,
    timer: T,
    store: S,
    history: ScoreHistory,
    observer: O,
}

impl<T: Scheduler, S: ScoreStore, O: Observer> Session<T, S, O> {
    /// Create an idle session, reading the score history from `store` and
    /// handing it to `observer`.  If the history cannot be read, it starts
    /// out empty.
    pub(crate) fn new(timer: T, store: S, mut observer: O) -> Self {
        let history = match store.load() {
            Ok(history) => history,
            Err(e) => {
                log::warn!(
                    "{}; starting with an empty score history",
                    logging::error_chain(&e)
                );
                ScoreHistory::default()
            }
        };
        log::debug!("Loaded {} score history entries", history.len());
        observer.history_updated(&history);
        Session {
            phase: Phase::Idle,
            difficulty: Difficulty::default(),
            difficulty_selected: false,
            sim: None,
            timer,
            store,
            history,
            observer,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub(crate) fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub(crate) fn difficulty_selected(&self) -> bool {
        self.difficulty_selected
    }

    /// True when no game is running and a difficulty has to be chosen
    /// before the next one can start
    pub(crate) fn awaiting_difficulty(&self) -> bool {
        !self.running() && !self.difficulty_selected
    }

    /// The current (or most recent) game, if any
    pub(crate) fn simulation(&self) -> Option<&Simulation> {
        self.sim.as_ref()
    }

    pub(crate) fn score(&self) -> u32 {
        self.sim.as_ref().map_or(0, Simulation::score)
    }

    pub(crate) fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub(crate) fn observer(&self) -> &O {
        &self.observer
    }

    pub(crate) fn timer(&self) -> &T {
        &self.timer
    }

    #[cfg(test)]
    pub(crate) fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Choose the difficulty for the next game.  A game in progress is ended
    /// (and its score recorded) first.
    pub(crate) fn select_difficulty(&mut self, difficulty: Difficulty) {
        if self.running() {
            log::info!("Difficulty changed mid-game; ending the current game");
            self.end_with(None);
        }
        self.difficulty = difficulty;
        self.difficulty_selected = true;
        log::debug!("Selected difficulty: {difficulty}");
    }

    /// Start a new game.  Does nothing and returns `false` if a game is
    /// already running or no difficulty has been chosen since the last game.
    pub(crate) fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.running() || !self.difficulty_selected {
            return false;
        }
        let sim = Simulation::new(rng);
        self.observer.board_committed(sim.snake(), sim.food());
        self.sim = Some(sim);
        self.phase = Phase::Running;
        self.timer.start(self.difficulty.tick_interval());
        log::info!("Started a new game on {}", self.difficulty);
        true
    }

    /// Steer the snake.  Ignored unless a game is running; an about-face is
    /// silently dropped.
    pub(crate) fn on_direction(&mut self, direction: Direction) {
        if !self.running() {
            return;
        }
        if let Some(sim) = self.sim.as_mut() {
            if !sim.turn(direction) {
                log::trace!("Ignoring reversal to {direction:?}");
            }
        }
    }

    /// Run one simulation step for every tick that has come due.  Returns
    /// the number of steps run.
    pub(crate) fn pump<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        if !self.timer.is_active() {
            return 0;
        }
        let due = self.timer.due_ticks();
        let mut stepped = 0;
        for _ in 0..due {
            if !self.running() {
                break;
            }
            self.tick(rng);
            stepped += 1;
        }
        stepped
    }

    /// Run one simulation step right now
    pub(crate) fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.running() {
            return;
        }
        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        let step = sim.step(rng);
        match step {
            Step::Idle => (),
            Step::Moved | Step::Ate => {
                if step == Step::Ate {
                    log::debug!("Ate food; score is now {}", sim.score());
                }
                self.observer.board_committed(sim.snake(), sim.food());
            }
            Step::Collided(collision) => {
                self.end_with(Some(EndCause::Collision(collision)));
            }
            Step::GridFull => {
                log::error!(
                    "The snake fills the entire field ({} cells); no room left for food",
                    sim.snake().len()
                );
                self.end_with(Some(EndCause::GridFull));
            }
        }
    }

    /// End the running game, if any.  Calling this when no game is running
    /// does nothing.
    pub(crate) fn end(&mut self) {
        self.end_with(None);
    }

    fn end_with(&mut self, cause: Option<EndCause>) {
        if !self.running() {
            return;
        }
        self.timer.cancel();
        let score = self.score();
        match cause {
            Some(EndCause::Collision(c)) => {
                log::info!("Game over: snake {c} with a score of {score}");
            }
            Some(EndCause::GridFull) => log::info!("Game over: field filled with a score of {score}"),
            None => log::info!("Game ended with a score of {score}"),
        }
        if let Some(score) = NonZeroU32::new(score) {
            self.record(ScoreRecord::new(score, self.difficulty));
        }
        self.phase = Phase::GameOver { score, cause };
        self.difficulty_selected = false;
    }

    /// Add `record` to the stored history.  The store is read again first so
    /// that scores saved elsewhere since start-up are kept.
    fn record(&mut self, record: ScoreRecord) {
        match self.store.load() {
            Ok(history) => self.history = history,
            Err(e) => log::warn!(
                "{}; keeping the score history already in memory",
                logging::error_chain(&e)
            ),
        }
        if self.history.insert(record) {
            if let Err(e) = self.store.save(&self.history) {
                log::warn!("{}", logging::error_chain(&e));
            }
        } else {
            log::debug!("Score did not make the history");
        }
        self.observer.history_updated(&self.history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::START_CELL;
    use crate::highscores::{LoadError, SaveError, ScoreFile};
    use crate::timer::ManualScheduler;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// In-memory store whose contents the test can inspect after handing it
    /// to a session
    #[derive(Clone, Debug, Default)]
    struct SharedStore {
        saved: Rc<RefCell<Option<ScoreHistory>>>,
        saves: Rc<RefCell<u32>>,
    }

    impl ScoreStore for SharedStore {
        fn load(&self) -> Result<ScoreHistory, LoadError> {
            Ok(self.saved.borrow().clone().unwrap_or_default())
        }

        fn save(&self, history: &ScoreHistory) -> Result<(), SaveError> {
            *self.saved.borrow_mut() = Some(history.clone());
            *self.saves.borrow_mut() += 1;
            Ok(())
        }
    }

    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct Recorder {
        boards: Vec<(Vec<Cell>, Cell)>,
        histories: Vec<ScoreHistory>,
    }

    impl Observer for Recorder {
        fn board_committed(&mut self, snake: &Snake, food: Cell) {
            self.boards.push((snake.cells().collect(), food));
        }

        fn history_updated(&mut self, history: &ScoreHistory) {
            self.histories.push(history.clone());
        }
    }

    type TestSession = Session<ManualScheduler, SharedStore, Recorder>;

    fn session() -> (TestSession, SharedStore) {
        let store = SharedStore::default();
        let s = Session::new(ManualScheduler::default(), store.clone(), Recorder::default());
        (s, store)
    }

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(RNG_SEED)
    }

    /// Put food directly in front of the snake so the next tick eats it
    fn bait<S: ScoreStore, O: Observer>(
        s: &mut Session<ManualScheduler, S, O>,
        direction: Direction,
    ) {
        let sim = s.sim.as_mut().expect("game should be running");
        let target = sim.snake().advance(direction);
        sim.set_food(target);
    }

    /// Play a game on `difficulty` that scores `points`, then end it
    fn play_and_score(
        s: &mut TestSession,
        rng: &mut ChaCha12Rng,
        difficulty: Difficulty,
        points: u32,
    ) {
        s.select_difficulty(difficulty);
        assert!(s.start(rng));
        s.on_direction(Direction::Up);
        for _ in 0..points {
            bait(s, Direction::Up);
            s.tick(rng);
        }
        assert_eq!(s.score(), points);
        s.end();
    }

    #[test]
    fn initial_state() {
        let (s, _) = session();
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.awaiting_difficulty());
        assert!(!s.difficulty_selected());
        assert_eq!(s.difficulty(), Difficulty::Medium);
        assert!(s.simulation().is_none());
        assert!(!s.timer().is_active());
    }

    #[test]
    fn start_requires_difficulty() {
        let (mut s, _) = session();
        let mut rng = rng();
        assert!(!s.start(&mut rng));
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.observer().boards.is_empty());
        assert!(!s.timer().is_active());
    }

    #[test]
    fn start() {
        let (mut s, _) = session();
        let mut rng = rng();
        s.select_difficulty(Difficulty::Hard);
        assert!(!s.awaiting_difficulty());
        assert!(s.start(&mut rng));
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.timer().period, Some(Duration::from_millis(70)));
        let sim = s.simulation().expect("game should be running");
        assert_eq!(sim.snake().cells().collect::<Vec<_>>(), vec![START_CELL]);
        assert_eq!(sim.heading(), None);
        assert_eq!(s.score(), 0);
        assert_eq!(s.observer().boards, vec![(vec![START_CELL], sim.food())]);
        // Starting again while running does nothing
        assert!(!s.start(&mut rng));
        assert_eq!(s.timer().starts, 1);
    }

    #[test]
    fn idle_until_first_direction() {
        let (mut s, _) = session();
        let mut rng = rng();
        s.select_difficulty(Difficulty::Medium);
        assert!(s.start(&mut rng));
        s.timer_mut().fire(10);
        assert_eq!(s.pump(&mut rng), 10);
        assert_eq!(s.observer().boards.len(), 1);
        assert_eq!(
            s.simulation().map(|sim| sim.snake().head()),
            Some(START_CELL)
        );
        s.on_direction(Direction::Left);
        s.timer_mut().fire(1);
        assert_eq!(s.pump(&mut rng), 1);
        assert_eq!(s.observer().boards.len(), 2);
        assert_eq!(
            s.simulation().map(|sim| sim.snake().head()),
            Some(Cell::new(9, 10))
        );
    }

    #[test]
    fn input_ignored_when_not_running() {
        let (mut s, _) = session();
        let mut rng = rng();
        s.on_direction(Direction::Up);
        s.select_difficulty(Difficulty::Easy);
        s.on_direction(Direction::Up);
        assert!(s.start(&mut rng));
        assert_eq!(s.simulation().and_then(Simulation::heading), None);
    }

    #[test]
    fn wall_collision_ends_game() {
        let (mut s, store) = session();
        let mut rng = rng();
        s.select_difficulty(Difficulty::Easy);
        assert!(s.start(&mut rng));
        s.on_direction(Direction::Up);
        // (10, 10) to (10, 0) is ten moves; the eleventh hits the wall
        s.timer_mut().fire(20);
        assert_eq!(s.pump(&mut rng), 11);
        assert_eq!(
            s.phase(),
            Phase::GameOver {
                score: s.score(),
                cause: Some(EndCause::Collision(Collision::Wall)),
            }
        );
        assert!(!s.timer().is_active());
        assert!(s.awaiting_difficulty());
        if s.score() == 0 {
            assert_eq!(*store.saves.borrow(), 0);
            assert_eq!(s.observer().histories.len(), 1);
        }
    }

    #[test]
    fn zero_score_not_recorded() {
        let (mut s, store) = session();
        let mut rng = rng();
        s.select_difficulty(Difficulty::Easy);
        assert!(s.start(&mut rng));
        s.end();
        assert_eq!(
            s.phase(),
            Phase::GameOver {
                score: 0,
                cause: None
            }
        );
        assert!(s.history().is_empty());
        assert_eq!(*store.saves.borrow(), 0);
        // Only the start-up notification
        assert_eq!(s.observer().histories, vec![ScoreHistory::default()]);
    }

    #[test]
    fn score_recorded_once() {
        let (mut s, store) = session();
        let mut rng = rng();
        s.select_difficulty(Difficulty::Hard);
        assert!(s.start(&mut rng));
        s.on_direction(Direction::Right);
        for _ in 0..7 {
            bait(&mut s, Direction::Right);
            s.tick(&mut rng);
        }
        assert_eq!(s.score(), 7);
        s.end();
        s.end();
        assert_eq!(s.history().len(), 1);
        let rec = &s.history().records()[0];
        assert_eq!(rec.score.get(), 7);
        assert_eq!(rec.difficulty, Difficulty::Hard);
        assert_eq!(*store.saves.borrow(), 1);
        assert_eq!(store.saved.borrow().as_ref(), Some(s.history()));
        assert_eq!(
            s.observer().histories,
            vec![ScoreHistory::default(), s.history().clone()]
        );
        assert!(!s.timer().is_active());
        assert!(!s.difficulty_selected());
    }

    #[test]
    fn history_stays_sorted_and_capped() {
        let (mut s, _) = session();
        let mut rng = rng();
        for points in [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8] {
            play_and_score(&mut s, &mut rng, Difficulty::Medium, points);
        }
        let scores = s
            .history()
            .records()
            .iter()
            .map(|r| r.score.get())
            .collect::<Vec<_>>();
        assert_eq!(scores, vec![9, 8, 6, 5, 5, 5, 4, 3, 3, 2]);
    }

    #[test]
    fn changing_difficulty_mid_game_ends_it() {
        let (mut s, _) = session();
        let mut rng = rng();
        s.select_difficulty(Difficulty::Easy);
        assert!(s.start(&mut rng));
        s.on_direction(Direction::Down);
        bait(&mut s, Direction::Down);
        s.tick(&mut rng);
        assert_eq!(s.score(), 1);
        s.select_difficulty(Difficulty::Hard);
        assert_eq!(
            s.phase(),
            Phase::GameOver {
                score: 1,
                cause: None
            }
        );
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history().records()[0].difficulty, Difficulty::Easy);
        assert_eq!(s.difficulty(), Difficulty::Hard);
        assert!(s.difficulty_selected());
        assert!(!s.timer().is_active());
        // The new game starts idle and on the new interval
        assert!(s.start(&mut rng));
        assert_eq!(s.timer().period, Some(Duration::from_millis(70)));
        assert_eq!(s.simulation().and_then(Simulation::heading), None);
    }

    #[test]
    fn no_ticks_after_end() {
        let (mut s, _) = session();
        let mut rng = rng();
        s.select_difficulty(Difficulty::Medium);
        assert!(s.start(&mut rng));
        s.on_direction(Direction::Left);
        s.timer_mut().fire(1);
        s.end();
        let board = s.simulation().cloned();
        s.timer_mut().fire(5);
        assert_eq!(s.pump(&mut rng), 0);
        s.tick(&mut rng);
        assert_eq!(s.simulation().cloned(), board);
    }

    #[test]
    fn history_loaded_from_store() {
        let store = SharedStore::default();
        let mut history = ScoreHistory::default();
        assert!(history.insert(ScoreRecord::new(
            NonZeroU32::new(12).expect("nonzero"),
            Difficulty::Easy
        )));
        *store.saved.borrow_mut() = Some(history.clone());
        let s = Session::new(ManualScheduler::default(), store, Recorder::default());
        assert_eq!(s.history(), &history);
        assert_eq!(s.observer().histories, vec![history]);
    }

    #[test]
    fn scores_saved_elsewhere_are_kept() {
        let (mut s, store) = session();
        let mut rng = rng();
        let mut elsewhere = ScoreHistory::default();
        assert!(elsewhere.insert(ScoreRecord::new(
            NonZeroU32::new(50).expect("nonzero"),
            Difficulty::Hard
        )));
        *store.saved.borrow_mut() = Some(elsewhere);
        play_and_score(&mut s, &mut rng, Difficulty::Easy, 2);
        let scores = |h: &ScoreHistory| {
            h.records()
                .iter()
                .map(|r| r.score.get())
                .collect::<Vec<_>>()
        };
        assert_eq!(scores(s.history()), vec![50, 2]);
        let saved = store.saved.borrow().clone().expect("history should be saved");
        assert_eq!(scores(&saved), vec![50, 2]);
        assert_eq!(s.observer().histories.last(), Some(&saved));
    }

    #[test]
    fn corrupt_store_falls_back_to_empty() {
        let tmpdir = tempfile::tempdir().expect("should be able to create a temp dir");
        let path = tmpdir.path().join("scores.json");
        fs_err::write(&path, "{ this is not").expect("writing test file should succeed");
        let mut s = Session::new(
            ManualScheduler::default(),
            ScoreFile::new(Some(path.clone())),
            Recorder::default(),
        );
        assert!(s.history().is_empty());
        let mut rng = rng();
        s.select_difficulty(Difficulty::Medium);
        assert!(s.start(&mut rng));
        s.on_direction(Direction::Up);
        bait(&mut s, Direction::Up);
        s.tick(&mut rng);
        s.end();
        // The corrupt file has been replaced by a good one
        let reloaded = ScoreFile::new(Some(path)).load().expect("load should succeed");
        assert_eq!(&reloaded, s.history());
        assert_eq!(reloaded.len(), 1);
    }
}
