use super::grid::Grid;
use ratatui::layout::Position;

/// One of the four directions in which the snake can travel
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction, or `None` if
    /// that step would leave `grid` and the grid does not wrap around.
    pub(super) fn advance(self, pos: Position, grid: Grid) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => {
                y = decrement_in_bounds(y, grid.height, grid.wrap)?;
            }
            Direction::Down => {
                y = increment_in_bounds(y, grid.height, grid.wrap)?;
            }
            Direction::Left => {
                x = decrement_in_bounds(x, grid.width, grid.wrap)?;
            }
            Direction::Right => {
                x = increment_in_bounds(x, grid.width, grid.wrap)?;
            }
        }
        Some(Position { x, y })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

fn decrement_in_bounds(x: u16, max: u16, wrap: bool) -> Option<u16> {
    if let Some(x2) = x.checked_sub(1) {
        Some(x2)
    } else if wrap {
        max.checked_sub(1)
    } else {
        None
    }
}

fn increment_in_bounds(x: u16, max: u16, wrap: bool) -> Option<u16> {
    if let Some(x2) = x.checked_add(1).filter(|&xx| xx < max) {
        Some(x2)
    } else if wrap {
        Some(0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Up, Position::new(2, 7), Grid::new(10, 15, false), Some(Position::new(2, 6)))]
    #[case(Direction::Down, Position::new(2, 7), Grid::new(10, 15, false), Some(Position::new(2, 8)))]
    #[case(Direction::Right, Position::new(2, 7), Grid::new(10, 15, false), Some(Position::new(3, 7)))]
    #[case(Direction::Left, Position::new(2, 7), Grid::new(10, 15, false), Some(Position::new(1, 7)))]
    #[case(Direction::Up, Position::new(2, 0), Grid::new(10, 15, false), None)]
    #[case(Direction::Up, Position::new(2, 0), Grid::new(10, 15, true), Some(Position::new(2, 14)))]
    #[case(Direction::Down, Position::new(2, 14), Grid::new(10, 15, false), None)]
    #[case(Direction::Down, Position::new(2, 14), Grid::new(10, 15, true), Some(Position::new(2, 0)))]
    #[case(Direction::Right, Position::new(9, 7), Grid::new(10, 15, false), None)]
    #[case(Direction::Right, Position::new(9, 7), Grid::new(10, 15, true), Some(Position::new(0, 7)))]
    #[case(Direction::Left, Position::new(0, 7), Grid::new(10, 15, false), None)]
    #[case(Direction::Left, Position::new(0, 7), Grid::new(10, 15, true), Some(Position::new(9, 7)))]
    fn test_direction_advance(
        #[case] d: Direction,
        #[case] pos: Position,
        #[case] grid: Grid,
        #[case] r: Option<Position>,
    ) {
        assert_eq!(d.advance(pos, grid), r);
    }

    #[rstest]
    #[case(Direction::Up, Direction::Down)]
    #[case(Direction::Down, Direction::Up)]
    #[case(Direction::Left, Direction::Right)]
    #[case(Direction::Right, Direction::Left)]
    fn test_reverse(#[case] d: Direction, #[case] r: Direction) {
        assert_eq!(d.reverse(), r);
        assert_eq!(r.reverse(), d);
    }
}
