use super::grid::Grid;
use crate::command::Command;
use crate::consts;
use crate::util::center_rect;
use ratatui::layout::{Constraint, Layout, Margin, Position, Rect, Size};

/// Where everything on the game screen goes.
///
/// Shared by the renderer and by the input handler so that a mouse click is
/// matched against exactly the button rectangles that were drawn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameLayout {
    /// The bar at the top showing the score
    pub(crate) score: Rect,

    /// The bordered board; the grid itself is this less a one-cell margin
    pub(crate) board: Rect,

    /// The line below the board for prompts and the game-over message
    pub(crate) message: Rect,

    /// The side panel holding the control pad and key help
    pub(crate) panel: Rect,

    /// The on-screen buttons and the commands they issue
    pub(crate) buttons: [Button; 6],
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Button {
    pub(crate) area: Rect,
    pub(crate) label: &'static str,
    pub(crate) command: Command,
}

impl GameLayout {
    const PANEL_WIDTH: u16 = 22;

    /// Rows needed by the panel's title and control pad
    const PANEL_HEIGHT: u16 = 8;

    /// The size of the board for `grid`, including its border
    pub(crate) fn board_size(grid: Grid) -> Size {
        Size {
            width: grid
                .width
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: grid.height.saturating_add(2),
        }
    }

    /// The smallest surface on which the whole game screen for `grid` fits
    pub(crate) fn required_size(grid: Grid) -> Size {
        let board = GameLayout::board_size(grid);
        Size {
            width: board
                .width
                .saturating_add(1)
                .saturating_add(GameLayout::PANEL_WIDTH),
            height: board
                .height
                .max(GameLayout::PANEL_HEIGHT)
                .saturating_add(2),
        }
    }

    pub(crate) fn new(area: Rect, grid: Grid) -> GameLayout {
        let display = center_rect(area, GameLayout::required_size(grid));
        let board_size = GameLayout::board_size(grid);
        let [score, main, message] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(board_size.height.max(GameLayout::PANEL_HEIGHT)),
            Constraint::Length(1),
        ])
        .areas(display);
        let [board_column, _, panel] = Layout::horizontal([
            Constraint::Length(board_size.width),
            Constraint::Length(1),
            Constraint::Length(GameLayout::PANEL_WIDTH),
        ])
        .areas(main);
        let board = Rect {
            height: board_size.height.min(board_column.height),
            ..board_column
        };
        let pad_x = panel.x.saturating_add(2);
        let pad_y = panel.y.saturating_add(2);
        let button = |dx: u16, dy: u16, label: &'static str, command: Command| Button {
            area: Rect::new(
                pad_x.saturating_add(dx),
                pad_y.saturating_add(dy),
                u16::try_from(label.chars().count()).unwrap_or(u16::MAX),
                1,
            )
            .intersection(panel),
            label,
            command,
        };
        let buttons = [
            button(3, 0, "[▲]", Command::Up),
            button(0, 1, "[◀]", Command::Left),
            button(6, 1, "[▶]", Command::Right),
            button(3, 2, "[▼]", Command::Down),
            button(0, 4, "[ Pause ]", Command::P),
            button(0, 5, "[ Restart ]", Command::R),
        ];
        GameLayout {
            score,
            board,
            message,
            panel,
            buttons,
        }
    }

    /// The area in which grid cells are drawn
    pub(crate) fn grid_area(&self) -> Rect {
        self.board.inner(Margin::new(1, 1))
    }

    /// The command issued by clicking at the given terminal coordinates
    pub(crate) fn command_at(&self, column: u16, row: u16) -> Option<Command> {
        let pos = Position::new(column, row);
        self.buttons
            .iter()
            .find(|b| !b.area.is_empty() && b.area.contains(pos))
            .map(|b| b.command)
    }
}
