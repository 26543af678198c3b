//! The simulation proper: the snake, its food, and the per-tick transition
//! that moves one into (or onto) the other.
pub(crate) mod direction;
mod food;
pub(crate) mod grid;
mod snake;
pub(crate) use self::direction::Direction;
use self::grid::Cell;
pub(crate) use self::snake::Snake;
use crate::consts;
use rand::Rng;
use std::fmt;

/// The state of one play-through.  Only [`Simulation::step()`] moves the
/// snake; input merely queues a heading for the next step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Simulation {
    snake: Snake,
    food: Cell,
    /// The heading used for the most recent step, or `None` if the snake has
    /// not moved yet
    direction: Option<Direction>,
    /// The heading requested since the most recent step
    pending: Option<Direction>,
    score: u32,
}

impl Simulation {
    /// Start a fresh simulation: a one-cell snake at
    /// [`START_CELL`][consts::START_CELL], no heading, and a randomly placed
    /// piece of food.
    pub(crate) fn new<R: Rng + ?Sized>(rng: &mut R) -> Simulation {
        let snake = Snake::new(consts::START_CELL);
        let food = food::spawn(rng, |c| snake.occupies(c))
            .expect("a one-cell snake should leave room for food");
        Simulation {
            snake,
            food,
            direction: None,
            pending: None,
            score: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(snake: Snake, food: Cell, direction: Option<Direction>) -> Simulation {
        Simulation {
            snake,
            food,
            direction,
            pending: None,
            score: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Cell) {
        self.food = food;
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Cell {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    /// The heading that will be used on the next step
    pub(crate) fn heading(&self) -> Option<Direction> {
        self.pending.or(self.direction)
    }

    /// Request that the snake head in `direction` from the next step on.
    /// An about-face relative to the last committed heading is dropped.
    /// Returns whether the request was accepted.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        if direction.can_follow(self.direction) {
            self.pending = Some(direction);
            true
        } else {
            false
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// The bounds check comes first, then the self-collision check against
    /// the snake as it was before the move (so running into the cell the
    /// tail is about to leave still counts), then food.
    pub(crate) fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Step {
        if let Some(d) = self.pending.take() {
            if d.can_follow(self.direction) {
                self.direction = Some(d);
            }
        }
        let Some(direction) = self.direction else {
            return Step::Idle;
        };
        let new_head = self.snake.advance(direction);
        if !grid::in_bounds(new_head) {
            return Step::Collided(Collision::Wall);
        }
        if self.snake.occupies(new_head) {
            return Step::Collided(Collision::Itself);
        }
        if new_head == self.food {
            self.snake.grow(new_head);
            self.score += 1;
            let snake = &self.snake;
            match food::spawn(rng, |c| snake.occupies(c)) {
                Some(food) => {
                    self.food = food;
                    Step::Ate
                }
                None => Step::GridFull,
            }
        } else {
            self.snake.slide(new_head);
            Step::Moved
        }
    }
}

/// The result of a single [`Simulation::step()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    /// No heading has been given yet, so nothing happened
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food, grew, and new food was placed
    Ate,
    /// The snake would have moved into a wall or itself; it has not moved
    Collided(Collision),
    /// The snake ate and now fills the entire field, leaving nowhere for new
    /// food
    GridFull,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    Itself,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::Wall => write!(f, "hit the wall"),
            Collision::Itself => write!(f, "bit itself"),
        }
    }
}
