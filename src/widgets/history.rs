use crate::consts;
use crate::difficulty::Difficulty;
use crate::highscores::ScoreHistory;
use chrono::{Local, TimeZone};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Widget},
};
use std::fmt;

/// The list of best recent scores
#[derive(Clone, Copy, Debug)]
pub(crate) struct HistoryPanel<'a, Tz = Local> {
    history: &'a ScoreHistory,
    /// Time zone in which to show dates
    tz: Tz,
}

impl<'a, Tz> HistoryPanel<'a, Tz> {
    const EMPTY_MESSAGE: &'static str = "No scores yet. Start playing!";
    const DATE_FORMAT: &'static str = "%Y-%m-%d %H:%M";

    pub(crate) fn new(history: &'a ScoreHistory, tz: Tz) -> HistoryPanel<'a, Tz> {
        HistoryPanel { history, tz }
    }
}

impl<Tz> Widget for HistoryPanel<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(" Score History ");
        let inner = block.inner(area);
        block.render(area, buf);
        if self.history.is_empty() {
            Line::from(Span::styled(Self::EMPTY_MESSAGE, consts::DIM_STYLE))
                .centered()
                .render(inner, buf);
            return;
        }
        let width = usize::from(Difficulty::DISPLAY_WIDTH);
        let text = self
            .history
            .records()
            .iter()
            .zip(1..)
            .map(|(rec, rank)| {
                Line::from_iter([
                    Span::raw(format!(
                        "{rank:>2}. {score:>4}  {difficulty:<width$}  ",
                        score = rec.score,
                        difficulty = rec.difficulty,
                    )),
                    Span::styled(
                        rec.timestamp
                            .with_timezone(&self.tz)
                            .format(Self::DATE_FORMAT)
                            .to_string(),
                        consts::DIM_STYLE,
                    ),
                ])
            })
            .collect::<Text<'_>>();
        text.render(inner, buf);
    }
}
