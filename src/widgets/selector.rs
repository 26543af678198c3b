use crate::consts;
use crate::difficulty::Difficulty;
use crate::util::EnumExt;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// The row of difficulty choices
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DifficultySelector {
    /// The entry the cursor is on, if the cursor is shown
    highlighted: Option<Difficulty>,
    /// The difficulty chosen for the next (or current) game
    chosen: Option<Difficulty>,
}

impl DifficultySelector {
    pub(crate) const HEIGHT: u16 = 3;

    pub(crate) fn new(
        highlighted: Option<Difficulty>,
        chosen: Option<Difficulty>,
    ) -> DifficultySelector {
        DifficultySelector {
            highlighted,
            chosen,
        }
    }

    fn name_style(&self, d: Difficulty) -> Style {
        let mut style = Style::new();
        if self.chosen == Some(d) {
            style = style.patch(consts::CHOSEN_STYLE);
        }
        if self.highlighted == Some(d) {
            style = style.patch(consts::MENU_SELECTION_STYLE);
        }
        style
    }
}

impl Widget for DifficultySelector {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(" Difficulty ");
        let inner = block.inner(area);
        block.render(area, buf);
        let mut spans = Vec::new();
        for d in Difficulty::iter() {
            spans.push(Span::raw(if spans.is_empty() { " " } else { "  " }));
            spans.push(Span::styled(String::from(d.hotkey()), consts::KEY_STYLE));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(d.as_str(), self.name_style(d)));
        }
        Line::from(spans).render(inner, buf);
    }
}
