use super::grid::{self, Cell};
use crate::consts::{GRID_DIM, MAX_FOOD_ATTEMPTS};
use rand::{seq::IteratorRandom, Rng};

/// Pick a random free cell for a piece of food.
///
/// Cells are sampled uniformly from the whole field until one is found for
/// which `occupied` returns `false`.  After [`MAX_FOOD_ATTEMPTS`] misses the
/// remaining free cells are enumerated and one of them is chosen directly,
/// so the result is still uniform over the free cells.  Returns `None` only
/// when every cell is occupied.
pub(crate) fn spawn<R, F>(rng: &mut R, occupied: F) -> Option<Cell>
where
    R: Rng + ?Sized,
    F: Fn(Cell) -> bool,
{
    for _ in 0..MAX_FOOD_ATTEMPTS {
        let cell = Cell::new(rng.random_range(0..GRID_DIM), rng.random_range(0..GRID_DIM));
        if !occupied(cell) {
            return Some(cell);
        }
    }
    grid::cells().filter(|&c| !occupied(c)).choose(rng)
}
