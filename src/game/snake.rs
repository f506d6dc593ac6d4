use super::direction::Direction;
use super::grid::Grid;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake: its body and its direction of travel.
///
/// All positions are relative to the top-left corner of the grid the snake is
/// on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells of the snake, head first and tail last.  Never empty.
    pub(super) body: VecDeque<Position>,

    /// The direction in which the snake is currently travelling
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a snake whose head is at `head`, travelling in `direction`, with
    /// `len - 1` further cells trailing directly behind it.  Trailing cells
    /// that would fall outside `grid` are omitted.
    pub(super) fn new(head: Position, direction: Direction, len: usize, grid: Grid) -> Snake {
        let behind = direction.reverse();
        let body = std::iter::successors(Some(head), |&p| {
            behind.advance(p, Grid { wrap: false, ..grid })
        })
        .take(len.max(1))
        .collect();
        Snake { body, direction }
    }

    /// The snake that every game starts with: head at the centre of the grid,
    /// travelling right.
    pub(super) fn initial(grid: Grid) -> Snake {
        Snake::new(
            grid.center(),
            Direction::Right,
            consts::INITIAL_SNAKE_LENGTH,
            grid,
        )
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.body.front().copied().unwrap_or_default()
    }

    /// Return the position of the snake's tail
    pub(crate) fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    /// Return the positions of all of the snake's cells, head first
    pub(crate) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Return the glyph to use for drawing the snake's head
    pub(crate) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }

    /// Change the snake's direction of travel.  Requests to reverse into the
    /// snake's own neck are ignored; returns whether the turn was taken.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.direction = direction;
            true
        }
    }

    /// Return where the head would be after one step in `direction`, or
    /// `None` if that step hits a wall.
    pub(crate) fn peek_next_head(&self, direction: Direction, grid: Grid) -> Option<Position> {
        grid.step(self.head(), direction)
    }

    /// Move the snake one cell in its current direction.
    ///
    /// If the new head lands on `food`, the tail is kept and the snake grows
    /// by one cell.  Otherwise the tail moves along with the head, so the
    /// head is allowed to enter the cell the tail is vacating.
    ///
    /// On a collision the snake is left unchanged.
    pub(super) fn advance(&mut self, grid: Grid, food: Option<Position>) -> Step {
        let Some(new_head) = self.peek_next_head(self.direction, grid) else {
            return Step {
                new_head: None,
                ate_food: false,
                collision: Some(Collision::Wall),
            };
        };
        let ate_food = food == Some(new_head);
        let vacating = (!ate_food).then(|| self.tail());
        if self.occupies(new_head) && vacating != Some(new_head) {
            return Step {
                new_head: Some(new_head),
                ate_food: false,
                collision: Some(Collision::Body),
            };
        }
        self.body.push_front(new_head);
        if !ate_food {
            let _ = self.body.pop_back();
        }
        Step {
            new_head: Some(new_head),
            ate_food,
            collision: None,
        }
    }
}

/// The result of advancing the snake by one cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Step {
    /// The cell the head moved (or tried to move) into; `None` when the move
    /// ran into a wall.
    pub(crate) new_head: Option<Position>,
    pub(crate) ate_food: bool,
    pub(crate) collision: Option<Collision>,
}

/// What the snake ran into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    Body,
}

impl Collision {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Collision::Wall => "hit the wall",
            Collision::Body => "bit itself",
        }
    }
}
