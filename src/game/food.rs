use super::grid::{BoardExhausted, Grid};
use super::snake::Snake;
use rand::Rng;
use ratatui::layout::Position;
use std::collections::HashSet;

/// Places food on the grid using its own source of randomness
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FoodSpawner<R> {
    rng: R,
}

impl<R: Rng> FoodSpawner<R> {
    pub(crate) fn new(rng: R) -> FoodSpawner<R> {
        FoodSpawner { rng }
    }

    /// Pick a cell for the next piece of food, never one under the snake.
    ///
    /// # Errors
    ///
    /// Returns [`BoardExhausted`] if the snake fills the whole grid.
    pub(crate) fn respawn(&mut self, grid: Grid, snake: &Snake) -> Result<Position, BoardExhausted> {
        if snake.len() >= grid.cell_count() {
            return Err(BoardExhausted);
        }
        let occupied = snake.body().iter().copied().collect::<HashSet<_>>();
        grid.random_empty_cell(&occupied, &mut self.rng)
    }
}
