use super::direction::Direction;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::{Position, Positions, Rect, Size};
use std::collections::HashSet;
use thiserror::Error;

/// The playing field: a `width` × `height` board of cells with the origin in
/// the top-left corner.
///
/// When `wrap` is true, moving off one edge re-enters from the opposite edge;
/// otherwise the edges are walls.  Every movement goes through
/// [`Grid::step()`], so the policy is applied uniformly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) wrap: bool,
}

impl Grid {
    pub(crate) fn new(width: u16, height: u16, wrap: bool) -> Grid {
        Grid {
            width,
            height,
            wrap,
        }
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn cell_count(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Iterate over every cell of the grid in row-major order
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    pub(crate) fn is_inside(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// The cell in the centre of the grid (rounding down)
    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Return the neighbour of `pos` in `direction`, or `None` if the move
    /// runs into a wall.
    pub(crate) fn step(self, pos: Position, direction: Direction) -> Option<Position> {
        direction
            .advance(pos, self)
            .filter(|&next| self.is_inside(next))
    }

    /// Choose a cell not in `occupied`, uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`BoardExhausted`] if every cell of the grid is occupied.
    pub(crate) fn random_empty_cell<R: Rng>(
        self,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Position, BoardExhausted> {
        self.positions()
            .filter(|p| !occupied.contains(p))
            .choose(rng)
            .ok_or(BoardExhausted)
    }
}

/// Every cell of the board is taken, leaving nowhere to place food
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("no empty cell left on the board")]
pub(crate) struct BoardExhausted;
