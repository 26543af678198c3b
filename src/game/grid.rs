use crate::consts::GRID_DIM;

/// A square on the playing field.
///
/// Coordinates are signed so that a step off the left or top edge produces a
/// value that [`in_bounds()`] can reject instead of an arithmetic underflow.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(crate) x: i16,
    pub(crate) y: i16,
}

impl Cell {
    pub(crate) const fn new(x: i16, y: i16) -> Cell {
        Cell { x, y }
    }

    /// Return the cell `(dx, dy)` away from this one
    pub(crate) fn offset(self, (dx, dy): (i16, i16)) -> Cell {
        Cell {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Returns `true` iff `cell` lies on the `GRID_DIM` × `GRID_DIM` field
pub(crate) fn in_bounds(cell: Cell) -> bool {
    (0..GRID_DIM).contains(&cell.x) && (0..GRID_DIM).contains(&cell.y)
}

/// Iterate over every cell of the field in row-major order
pub(crate) fn cells() -> impl Iterator<Item = Cell> {
    (0..GRID_DIM).flat_map(|y| (0..GRID_DIM).map(move |x| Cell { x, y }))
}

/// Total number of cells on the field
#[cfg(test)]
pub(crate) fn area() -> usize {
    let dim = usize::from(GRID_DIM.unsigned_abs());
    dim * dim
}
