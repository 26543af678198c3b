use super::direction::Direction;
use super::grid::Cell;
use std::collections::VecDeque;

/// The snake's body.
///
/// The cells are ordered head first.  The engine never commits a state in
/// which two cells coincide, and the snake is never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    cells: VecDeque<Cell>,
}

impl Snake {
    /// Create a one-cell snake at `head`
    pub(crate) fn new(head: Cell) -> Snake {
        Snake {
            cells: VecDeque::from([head]),
        }
    }

    pub(crate) fn head(&self) -> Cell {
        *self
            .cells
            .front()
            .expect("snake should never be empty")
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Return the cells of the snake, head first
    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Compute where the head would be after one step in `direction`.  The
    /// snake itself is left untouched.
    pub(crate) fn advance(&self, direction: Direction) -> Cell {
        direction.advance(self.head())
    }

    pub(crate) fn occupies(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Move onto `new_head` and keep the tail, lengthening the snake by one
    pub(crate) fn grow(&mut self, new_head: Cell) {
        self.cells.push_front(new_head);
    }

    /// Move onto `new_head` and drop the tail
    pub(crate) fn slide(&mut self, new_head: Cell) {
        self.cells.push_front(new_head);
        let _ = self.cells.pop_back();
    }
}

impl FromIterator<Cell> for Snake {
    /// Build a snake from cells listed head first.
    ///
    /// # Panics
    ///
    /// Panics if the iterator is empty.
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Snake {
        let cells = iter.into_iter().collect::<VecDeque<_>>();
        assert!(!cells.is_empty(), "a snake needs at least one cell");
        Snake { cells }
    }
}
