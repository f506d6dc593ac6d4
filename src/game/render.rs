use super::layout::{Button, GameLayout};
use super::paused::Paused;
use super::{Game, Outcome, Status};
use crate::consts;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = GameLayout::new(area, self.grid());
        Line::styled(
            format!(
                " Score: {}   Best: {}   Tick: {}ms",
                self.score,
                self.best,
                self.tick_period().as_millis()
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(layout.score, buf);

        if self.grid().wrap {
            DottedBorder.render(layout.board, buf);
        } else {
            Block::bordered().render(layout.board, buf);
        }

        let mut grid = Canvas {
            area: layout.grid_area(),
            buf,
        };
        for &pos in self.snake.body().iter().skip(1) {
            grid.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(food) = self.food {
            grid.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        grid.draw_cell(
            self.snake.head(),
            self.snake.head_symbol(),
            consts::SNAKE_HEAD_STYLE,
        );
        // The collision goes on top of whatever the head ran into, which for
        // a wall is the head itself
        if let Status::GameOver(Outcome::Died { at, .. }) = self.status {
            grid.draw_cell(at, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        }

        ControlPad {
            buttons: &layout.buttons,
        }
        .render(layout.panel, buf);

        match self.status {
            Status::Idle => Line::from_iter([
                Span::raw(" Press an arrow key or "),
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(" to start"),
            ])
            .render(layout.message, buf),
            Status::Running => (),
            Status::Paused(paused) => {
                let pause_area = center_rect(
                    layout.board,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                paused.render(pause_area, buf);
            }
            Status::GameOver(Outcome::Died { cause, .. }) => Line::from_iter([
                Span::styled(" GAME OVER", consts::LOSS_STYLE),
                Span::raw(format!(
                    ": the snake {}.  Final score: {}",
                    cause.as_str(),
                    self.score
                )),
            ])
            .render(layout.message, buf),
            Status::GameOver(Outcome::Won) => Line::from_iter([
                Span::styled(" YOU WIN", consts::WIN_STYLE),
                Span::raw(format!(
                    ": the board is full!  Final score: {}",
                    self.score
                )),
            ])
            .render(layout.message, buf),
        }
    }
}

/// Draws into the grid area, one grid cell per [`consts::CELL_WIDTH`]
/// terminal columns
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }

    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if !self.area.contains(Position::new(x, y)) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        canvas.draw_char(Position::ORIGIN, '·');
        canvas.draw_char(Position::new(max_x, 0), '·');
        canvas.draw_char(Position::new(max_x, max_y), '·');
        canvas.draw_char(Position::new(0, max_y), '·');
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

/// The on-screen controls and key help shown beside the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ControlPad<'a> {
    buttons: &'a [Button],
}

static KEY_HELP: &[(&str, &str)] = &[
    ("←↓↑→", "move"),
    ("wasd", "move"),
    ("hjkl", "move"),
    ("p", "pause"),
    ("r", "restart"),
    ("q", "quit"),
];

impl Widget for ControlPad<'_> {
    /*
     *  Controls
     *
     *     [▲]
     *  [◀]   [▶]
     *     [▼]
     *
     *  [ Pause ]
     *  [ Restart ]
     *
     *  ←↓↑→  move
     *  ...
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut rows = area.rows();
        if let Some(row) = rows.next() {
            Line::from(" Controls").render(row, buf);
        }
        for button in self.buttons {
            Span::styled(button.label, consts::BUTTON_STYLE).render(button.area, buf);
        }
        let help_rows = rows.skip(Self::HELP_OFFSET);
        for (&(keys, action), row) in KEY_HELP.iter().zip(help_rows) {
            Line::from_iter([
                Span::raw("  "),
                Span::styled(format!("{keys:<6}"), consts::KEY_STYLE),
                Span::raw(action),
            ])
            .render(row, buf);
        }
    }
}

impl ControlPad<'_> {
    /// Rows between the title and the key help, taken up by the buttons
    const HELP_OFFSET: usize = 8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::game::direction::Direction;
    use crate::game::grid::Grid;
    use crate::game::snake::{Collision, Snake};
    use crate::game::GameSettings;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::style::{Color, Modifier};
    use std::collections::VecDeque;
    use std::time::Instant;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// A 10×5 game drawn onto an exactly-fitting 45×10 surface
    fn small_game() -> Game<ChaCha12Rng> {
        let settings = GameSettings {
            grid: Grid::new(10, 5, false),
            ..GameSettings::default()
        };
        let mut game = Game::new_with_rng(settings, ChaCha12Rng::seed_from_u64(RNG_SEED));
        game.food = Some(Position::new(8, 1));
        game
    }

    fn render(game: &Game<ChaCha12Rng>) -> Buffer {
        let area = Rect::new(0, 0, 45, 10);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        buffer
    }

    fn symbol(buf: &Buffer, x: u16, y: u16) -> &str {
        buf[(x, y)].symbol()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| symbol(buf, x, y)).collect()
    }

    #[test]
    fn idle_game() {
        let game = small_game();
        let buffer = render(&game);
        assert!(row_text(&buffer, 0).starts_with(" Score: 0   Best: 0   Tick: 150ms"));
        assert!(buffer[(0, 0)].modifier.contains(Modifier::REVERSED));
        assert_eq!(symbol(&buffer, 0, 1), "┌");
        assert_eq!(symbol(&buffer, 21, 1), "┐");
        assert_eq!(symbol(&buffer, 0, 7), "└");
        // Grid origin is (1, 2); the head is at cell (5, 2) facing right
        assert_eq!(symbol(&buffer, 11, 4), "<");
        assert_eq!(symbol(&buffer, 9, 4), "⚬");
        assert_eq!(symbol(&buffer, 7, 4), "⚬");
        assert_eq!(symbol(&buffer, 17, 3), "●");
        assert_eq!(buffer[(17, 3)].fg, consts::FOOD_STYLE.fg.unwrap());
        assert!(row_text(&buffer, 9).starts_with(" Press an arrow key or Enter to start"));
        assert!(row_text(&buffer, 1).contains("Controls"));
        assert!(row_text(&buffer, 3).contains("[▲]"));
        assert!(row_text(&buffer, 4).contains("[◀]   [▶]"));
        assert!(row_text(&buffer, 5).contains("[▼]"));
        assert!(row_text(&buffer, 7).contains("[ Pause ]"));
        assert!(row_text(&buffer, 8).contains("[ Restart ]"));
    }

    #[test]
    fn rendering_does_not_mutate() {
        let game = small_game();
        let before = game.clone();
        let _ = render(&game);
        assert_eq!(game, before);
    }

    #[test]
    fn wraparound_border() {
        let settings = GameSettings {
            grid: Grid::new(10, 5, true),
            ..GameSettings::default()
        };
        let game = Game::new_with_rng(settings, ChaCha12Rng::seed_from_u64(RNG_SEED));
        let buffer = render(&game);
        assert_eq!(symbol(&buffer, 0, 1), "·");
        assert_eq!(symbol(&buffer, 1, 1), "⋯");
        assert_eq!(symbol(&buffer, 0, 2), "⋮");
        assert_eq!(symbol(&buffer, 21, 7), "·");
    }

    #[test]
    fn died() {
        let mut game = small_game();
        game.snake = Snake {
            body: VecDeque::from([
                Position::new(3, 0),
                Position::new(3, 1),
                Position::new(3, 2),
            ]),
            direction: Direction::Up,
        };
        game.score = 4;
        game.start(Instant::now());
        game.tick();
        assert_eq!(
            game.status,
            Status::GameOver(Outcome::Died {
                cause: Collision::Wall,
                at: Position::new(3, 0),
            })
        );
        let buffer = render(&game);
        assert_eq!(symbol(&buffer, 7, 2), "×");
        assert_eq!(buffer[(7, 2)].fg, Color::LightRed);
        assert!(buffer[(7, 2)].modifier.contains(Modifier::REVERSED));
        assert_eq!(symbol(&buffer, 7, 3), "⚬");
        assert!(row_text(&buffer, 0).starts_with(" Score: 4   Best: 4"));
        assert!(row_text(&buffer, 9).starts_with(" GAME OVER: the snake hit the wall."));
    }

    #[test]
    fn died_biting_itself() {
        let mut game = small_game();
        game.snake = Snake {
            body: VecDeque::from([
                Position::new(5, 2),
                Position::new(5, 3),
                Position::new(4, 3),
                Position::new(4, 2),
                Position::new(3, 2),
            ]),
            direction: Direction::Left,
        };
        game.start(Instant::now());
        game.tick();
        assert_eq!(
            game.status,
            Status::GameOver(Outcome::Died {
                cause: Collision::Body,
                at: Position::new(4, 2),
            })
        );
        let buffer = render(&game);
        // The head stays where it was, next to the cell it tried to enter
        assert_eq!(symbol(&buffer, 11, 4), ">");
        assert_eq!(symbol(&buffer, 9, 4), "×");
        assert_eq!(symbol(&buffer, 11, 5), "⚬");
        assert_eq!(symbol(&buffer, 9, 5), "⚬");
        assert_eq!(symbol(&buffer, 7, 4), "⚬");
        assert!(row_text(&buffer, 9).starts_with(" GAME OVER: the snake bit itself."));
    }

    #[test]
    fn won() {
        let settings = GameSettings {
            grid: Grid::new(3, 1, false),
            ..GameSettings::default()
        };
        let mut game = Game::new_with_rng(settings, ChaCha12Rng::seed_from_u64(RNG_SEED));
        game.snake = Snake {
            body: VecDeque::from([Position::new(1, 0), Position::new(0, 0)]),
            direction: Direction::Right,
        };
        game.food = Some(Position::new(2, 0));
        game.start(Instant::now());
        game.tick();
        assert_eq!(game.status, Status::GameOver(Outcome::Won));
        let area = Rect::new(0, 0, 60, 10);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let text = (0..area.height)
            .map(|y| row_text(&buffer, y))
            .collect::<Vec<_>>();
        assert!(text.iter().any(|row| row.contains("YOU WIN")));
        assert!(!text.iter().any(|row| row.contains('●')));
    }

    #[test]
    fn paused_popup() {
        let mut game = small_game();
        let now = Instant::now();
        game.start(now);
        game.handle_command(Command::Esc, now);
        let buffer = render(&game);
        let text = (0..10).map(|y| row_text(&buffer, y)).collect::<Vec<_>>();
        assert!(text.iter().any(|row| row.contains("PAUSED")));
        assert!(text.iter().any(|row| row.contains("» Resume (Esc)")));
    }
}
