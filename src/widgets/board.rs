use crate::consts;
use crate::game::{grid::Cell, Snake};
use crate::highscores::ScoreHistory;
use crate::session::Observer;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Widget},
};

/// The most recently committed board & score history, as handed over by the
/// session.  This is what gets drawn; the screen never looks at the live
/// simulation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Snapshot {
    /// Snake cells, head first
    snake: Vec<Cell>,
    food: Option<Cell>,
    history: ScoreHistory,
}

impl Snapshot {
    pub(crate) fn history(&self) -> &ScoreHistory {
        &self.history
    }
}

impl Observer for Snapshot {
    fn board_committed(&mut self, snake: &Snake, food: Cell) {
        self.snake.clear();
        self.snake.extend(snake.cells());
        self.food = Some(food);
    }

    fn history_updated(&mut self, history: &ScoreHistory) {
        self.history.clone_from(history);
    }
}

/// The bordered playing field
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Board<'a> {
    snapshot: &'a Snapshot,
    /// Draw the head as a collision
    crashed: bool,
}

impl<'a> Board<'a> {
    /// Width of the field including its border
    pub(crate) const WIDTH: u16 = consts::GRID_DIM.unsigned_abs() * consts::CELL_WIDTH + 2;

    /// Height of the field including its border
    pub(crate) const HEIGHT: u16 = consts::GRID_DIM.unsigned_abs() + 2;

    pub(crate) fn new(snapshot: &'a Snapshot, crashed: bool) -> Board<'a> {
        Board { snapshot, crashed }
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered();
        let field = block.inner(area);
        block.render(area, buf);
        let mut canvas = Canvas { area: field, buf };
        if let Some(food) = self.snapshot.food {
            canvas.draw_cell(food, [consts::FOOD_SYMBOL, ' '], consts::FOOD_STYLE);
        }
        let mut cells = self.snapshot.snake.iter().copied();
        let head = cells.next();
        for c in cells {
            canvas.draw_cell(c, [consts::SNAKE_SYMBOL; 2], consts::SNAKE_BODY_STYLE);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if let Some(h) = head {
            if self.crashed {
                canvas.draw_cell(h, [consts::COLLISION_SYMBOL; 2], consts::COLLISION_STYLE);
            } else {
                canvas.draw_cell(h, [consts::SNAKE_SYMBOL; 2], consts::SNAKE_HEAD_STYLE);
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, symbols: [char; 2], style: Style) {
        let (Ok(cx), Ok(cy)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            return;
        };
        let Some(x) = cx
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(cy) else {
            return;
        };
        for (pos, symbol) in [Position::new(x, y), Position::new(x.saturating_add(1), y)]
            .into_iter()
            .zip(symbols)
        {
            if !self.area.contains(pos) {
                continue;
            }
            if let Some(bcell) = self.buf.cell_mut(pos) {
                bcell.set_char(symbol);
                bcell.set_style(style);
            }
        }
    }
}
