//! Assorted constants & hard-coded configuration
use crate::game::grid::Cell;
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};

/// Width & height of the playing field, in cells
pub(crate) const GRID_DIM: i16 = 20;

/// Where a new snake's single cell is placed
pub(crate) const START_CELL: Cell = Cell::new(10, 10);

/// How many random samples to draw when placing food before falling back to
/// enumerating the free cells
pub(crate) const MAX_FOOD_ATTEMPTS: usize = 10_000;

/// The maximum number of entries kept in the score history
pub(crate) const HISTORY_CAPACITY: usize = 10;

/// Most ticks [`IntervalTimer`](crate::timer::IntervalTimer) reports at once
/// after falling behind; periods missed beyond this are skipped
pub(crate) const MAX_CATCH_UP_TICKS: u32 = 3;

/// Name of the directory under the platform config & data directories
pub(crate) const APP_DIR_NAME: &str = "gridsnake";

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Each grid cell is drawn this many terminal columns wide so that the
/// field looks roughly square.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Glyph for the snake's head and body
pub(crate) const SNAKE_SYMBOL: char = '█';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new().fg(Color::Green);

/// Style for the snake's body
pub(crate) const SNAKE_BODY_STYLE: Style = Style::new().fg(Color::LightGreen);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the highlighted difficulty
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the difficulty that has actually been chosen for the next game
pub(crate) const CHOSEN_STYLE: Style = Style::new()
    .fg(Color::Green)
    .add_modifier(Modifier::BOLD);

/// Style for dates & other secondary text in the score history
pub(crate) const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);
