use crate::consts;
use crate::difficulty::Difficulty;
use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};

/// The bar along the top of the screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ScoreBar {
    pub(crate) score: u32,
    pub(crate) difficulty: Difficulty,
    pub(crate) best: Option<u32>,
}

impl Widget for ScoreBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = Rect { height: 1, ..area };
        buf.set_style(area, consts::SCORE_BAR_STYLE);
        Line::from(format!(" Score: {}", self.score)).render(area, buf);
        Line::from(self.difficulty.as_str())
            .centered()
            .render(area, buf);
        let best = match self.best {
            Some(n) => format!("Best: {n} "),
            None => String::from("Best: - "),
        };
        Line::from(best).right_aligned().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buffer = Buffer::empty(area);
        ScoreBar {
            score: 3,
            difficulty: Difficulty::Medium,
            best: Some(12),
        }
        .render(area, &mut buffer);
        let mut expected = Buffer::with_lines([" Score: 3        Medium        Best: 12 "]);
        expected.set_style(area, consts::SCORE_BAR_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn render_without_best() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buffer = Buffer::empty(area);
        ScoreBar {
            score: 0,
            difficulty: Difficulty::Easy,
            best: None,
        }
        .render(area, &mut buffer);
        let mut expected = Buffer::with_lines([" Score: 0         Easy          Best: - "]);
        expected.set_style(area, consts::SCORE_BAR_STYLE);
        assert_eq!(buffer, expected);
    }
}
