use crate::command::Command;
use crate::consts;
use crate::difficulty::Difficulty;
use crate::game::{Direction, Simulation};
use crate::highscores::ScoreStore;
use crate::session::{EndCause, Phase, Session};
use crate::timer::{IntervalTimer, Scheduler};
use crate::util::get_display_area;
use crate::widgets::{Board, DifficultySelector, HistoryPanel, ScoreBar, Snapshot};
use chrono::Local;
use crossterm::event::{poll, read, Event};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Widget,
    Terminal,
};
use std::io;

#[derive(Debug)]
pub(crate) struct App<R = ThreadRng, T = IntervalTimer> {
    rng: R,
    session: Session<T, Box<dyn ScoreStore>, Snapshot>,
    /// The difficulty under the selector's cursor
    highlighted: Difficulty,
    quitting: bool,
}

impl<R: Rng, T: Scheduler> App<R, T> {
    pub(crate) fn new(
        rng: R,
        timer: T,
        store: Box<dyn ScoreStore>,
        highlighted: Difficulty,
    ) -> App<R, T> {
        App {
            rng,
            session: Session::new(timer, store, Snapshot::default()),
            highlighted,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.process_input()?;
        }
        Ok(())
    }

    /// Wait for a key press or for the next tick to come due, whichever is
    /// first, then handle everything that has happened
    fn process_input(&mut self) -> io::Result<()> {
        let ready = match self.session.timer().until_next() {
            Some(wait) => poll(wait)?,
            None => true,
        };
        if ready {
            self.handle_event(&read()?);
        }
        let _ = self.session.pump(&mut self.rng);
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) {
            self.handle_command(cmd);
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => {
                self.session.end();
                self.quitting = true;
            }
            Command::Steer(d) if self.session.running() => self.session.on_direction(d),
            Command::Steer(Direction::Left) => self.highlighted = self.highlighted.decrease(),
            Command::Steer(Direction::Right) => self.highlighted = self.highlighted.increase(),
            Command::Steer(_) => (),
            Command::Pick(d) => {
                self.highlighted = d;
                self.session.select_difficulty(d);
            }
            // The first press picks the highlighted difficulty; a press with
            // the choice already made starts the game.
            Command::Start => {
                if self.session.running() {
                    return;
                }
                if self.session.awaiting_difficulty()
                    || self.session.difficulty() != self.highlighted
                {
                    self.session.select_difficulty(self.highlighted);
                } else {
                    let _ = self.session.start(&mut self.rng);
                }
            }
        }
    }
}

impl<R, T: Scheduler> App<R, T> {
    /// Text for the line under the board
    fn prompt(&self) -> Line<'static> {
        let heading = self.session.simulation().and_then(Simulation::heading);
        match self.session.phase() {
            Phase::Running if heading.is_none() => {
                Line::from("Steer with the arrow keys, WASD, or HJKL to start moving")
            }
            Phase::Running => Line::from("Eat the food, but don't hit the walls or yourself!"),
            _ if !self.session.awaiting_difficulty() => Line::from_iter([
                Span::raw("Press "),
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(format!(" to start on {}", self.session.difficulty())),
            ]),
            Phase::GameOver { score, cause } => {
                let what = match cause {
                    Some(EndCause::Collision(c)) => format!("The snake {c}! "),
                    Some(EndCause::GridFull) => String::from("The snake filled the field! "),
                    None => String::new(),
                };
                Line::from(format!(
                    "{what}Final score: {score}. Pick a difficulty to play again."
                ))
            }
            Phase::Idle => Line::from("Choose a difficulty with 1/2/3 or ←/→ and Enter"),
        }
    }
}

impl<R, T: Scheduler> Widget for &App<R, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [bar_area, main_area, prompt_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(Board::HEIGHT),
            Constraint::Length(1),
        ])
        .areas(display);
        let [board_area, side_area] =
            Layout::horizontal([Constraint::Length(Board::WIDTH), Constraint::Fill(1)])
                .spacing(1)
                .areas(main_area);
        let [selector_area, history_area] = Layout::vertical([
            Constraint::Length(DifficultySelector::HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(side_area);

        let running = self.session.running();
        let snapshot = self.session.observer();
        ScoreBar {
            score: self.session.score(),
            difficulty: if running {
                self.session.difficulty()
            } else {
                self.highlighted
            },
            best: self.session.history().best().map(|r| r.score.get()),
        }
        .render(bar_area, buf);
        let crashed = matches!(
            self.session.phase(),
            Phase::GameOver {
                cause: Some(EndCause::Collision(_)),
                ..
            }
        );
        Board::new(snapshot, crashed).render(board_area, buf);
        DifficultySelector::new(
            (!running).then_some(self.highlighted),
            (running || self.session.difficulty_selected()).then_some(self.session.difficulty()),
        )
        .render(selector_area, buf);
        HistoryPanel::new(snapshot.history(), Local).render(history_area, buf);
        let prompt_area = Rect {
            x: prompt_area.x.saturating_add(1),
            width: prompt_area.width.saturating_sub(2),
            ..prompt_area
        };
        self.prompt().render(prompt_area, buf);
    }
}
