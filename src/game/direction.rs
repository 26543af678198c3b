use super::grid::Cell;

/// A heading on the grid.  The idle "no direction yet" state is represented
/// as `Option::<Direction>::None` by the code that holds a heading.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for one step in this direction.  The y axis grows
    /// downwards.
    pub(crate) fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub(crate) fn advance(self, cell: Cell) -> Cell {
        cell.offset(self.delta())
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Can a snake heading in `current` turn to face `self` on its next step?
    /// Everything except an about-face is allowed, and anything goes when the
    /// snake has not started moving.
    pub(crate) fn can_follow(self, current: Option<Direction>) -> bool {
        current.is_none_or(|d| d.reverse() != self)
    }
}
