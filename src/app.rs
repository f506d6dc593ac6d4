use crate::game::layout::GameLayout;
use crate::game::timer::Clock;
use crate::game::Game;
use crossterm::event::Event;
use log::debug;
use rand::Rng;
use ratatui::{
    backend::Backend,
    layout::{Rect, Size},
    Terminal,
};
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Where terminal events come from
pub(crate) trait EventSource {
    /// Wait up to `timeout` for an event to become available
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Block until an event is available and return it
    fn read(&mut self) -> io::Result<Event>;
}

/// Events read from the real terminal
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        crossterm::event::read()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<R> {
    game: Game<R>,
    /// The area the game was last drawn in, used to map mouse clicks onto
    /// on-screen buttons
    area: Rect,
    quitting: bool,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(game: Game<R>) -> App<R> {
        App {
            game,
            area: Rect::default(),
            quitting: false,
        }
    }

    /// Run the game until the user quits.
    ///
    /// Each pass draws the game, then waits for input for no longer than it
    /// takes for the next tick to fall due.  While no tick is scheduled, the
    /// wait is for input alone.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the terminal is too small for the board or if
    /// reading from or drawing to the terminal fails.
    pub(crate) fn run<B: Backend, E: EventSource, C: Clock>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
        clock: &C,
    ) -> Result<(), AppError> {
        let needed = GameLayout::required_size(self.game.grid());
        let actual = terminal.size()?;
        if actual.width < needed.width || actual.height < needed.height {
            return Err(SurfaceError::TooSmall { needed, actual }.into());
        }
        while !self.quitting {
            let completed = terminal.draw(|frame| frame.render_widget(&self.game, frame.area()))?;
            self.area = completed.area;
            let ready = match self.game.time_until_tick(clock.now()) {
                Some(wait) => events.poll(wait)?,
                None => true,
            };
            if ready {
                let event = events.read()?;
                self.handle_event(&event, clock);
            }
            self.game.update(clock.now());
        }
        Ok(())
    }

    fn handle_event<C: Clock>(&mut self, event: &Event, clock: &C) {
        if let Event::Resize(width, height) = *event {
            debug!("Terminal resized to {width}×{height}");
        }
        if self
            .game
            .handle_event(event, self.area, clock.now())
            .is_some()
        {
            debug!("Quitting");
            self.quitting = true;
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SurfaceError {
    #[error(
        "terminal is too small: the game needs {}×{} cells but only {}×{} are available",
        .needed.width, .needed.height, .actual.width, .actual.height
    )]
    TooSmall { needed: Size, actual: Size },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::game::timer::testing::ManualClock;
    use crate::game::{GameSettings, Status};
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::{backend::TestBackend, layout::Position};
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[derive(Clone, Debug, Eq, PartialEq)]
    enum Scripted {
        Input(Event),
        /// Let time pass without any input: until the next tick if one is
        /// scheduled, otherwise for a whole minute
        Wait,
    }

    #[derive(Debug)]
    struct ScriptedEvents<'a> {
        script: VecDeque<Scripted>,
        clock: &'a ManualClock,
    }

    impl<'a> ScriptedEvents<'a> {
        fn new<I: IntoIterator<Item = Scripted>>(script: I, clock: &'a ManualClock) -> Self {
            ScriptedEvents {
                script: script.into_iter().collect(),
                clock,
            }
        }
    }

    impl EventSource for ScriptedEvents<'_> {
        fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
            if self.script.front() == Some(&Scripted::Wait) {
                self.script.pop_front();
                self.clock.advance(timeout);
                Ok(false)
            } else {
                Ok(true)
            }
        }

        fn read(&mut self) -> io::Result<Event> {
            loop {
                match self.script.pop_front() {
                    Some(Scripted::Input(ev)) => return Ok(ev),
                    Some(Scripted::Wait) => self.clock.advance(Duration::from_secs(60)),
                    None => return Err(io::ErrorKind::UnexpectedEof.into()),
                }
            }
        }
    }

    fn key(code: KeyCode) -> Scripted {
        Scripted::Input(Event::Key(code.into()))
    }

    fn click(pos: Position) -> Scripted {
        Scripted::Input(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: pos.x,
            row: pos.y,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn new_app() -> App<ChaCha12Rng> {
        App::new(Game::new_with_rng(
            GameSettings::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        ))
    }

    fn button_for(cmd: Command) -> Position {
        let layout = GameLayout::new(
            Rect::new(0, 0, 65, 24),
            GameSettings::default().grid,
        );
        layout
            .buttons
            .iter()
            .find(|b| b.command == cmd)
            .map(|b| b.area.as_position())
            .unwrap()
    }

    #[test]
    fn terminal_too_small() {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let clock = ManualClock::new();
        let mut events = ScriptedEvents::new([], &clock);
        let r = new_app().run(&mut terminal, &mut events, &clock);
        match r {
            Err(AppError::Surface(e)) => assert_eq!(
                e,
                SurfaceError::TooSmall {
                    needed: Size::new(65, 24),
                    actual: Size::new(40, 10),
                }
            ),
            r => panic!("expected surface error, got {r:?}"),
        }
    }

    #[test]
    fn play_then_quit() {
        let mut terminal = Terminal::new(TestBackend::new(65, 24)).unwrap();
        let clock = ManualClock::new();
        let mut events = ScriptedEvents::new(
            [
                key(KeyCode::Enter),
                Scripted::Wait,
                Scripted::Wait,
                key(KeyCode::Char('q')),
            ],
            &clock,
        );
        let mut app = new_app();
        app.run(&mut terminal, &mut events, &clock).unwrap();
        assert!(app.quitting);
        assert_eq!(app.game.snake().head(), Position::new(12, 10));
        // The last frame drawn shows the head after the second tick
        assert_eq!(terminal.backend().buffer()[(25, 12)].symbol(), "<");
        assert_eq!(events.script, VecDeque::new());
    }

    #[test]
    fn pause_button_stops_the_clock() {
        let mut terminal = Terminal::new(TestBackend::new(65, 24)).unwrap();
        let clock = ManualClock::new();
        let mut events = ScriptedEvents::new(
            [
                key(KeyCode::Enter),
                Scripted::Wait,
                click(button_for(Command::P)),
                Scripted::Wait,
                Scripted::Wait,
                key(KeyCode::Esc),
            ],
            &clock,
        );
        let mut app = new_app();
        let r = app.run(&mut terminal, &mut events, &clock);
        // The script runs out after resuming
        assert!(matches!(r, Err(AppError::Io(_))));
        assert_eq!(app.game.status(), Status::Running);
        assert_eq!(app.game.snake().head(), Position::new(11, 10));
    }

    #[test]
    fn clicking_a_direction_starts_the_game() {
        let mut terminal = Terminal::new(TestBackend::new(65, 24)).unwrap();
        let clock = ManualClock::new();
        let mut events = ScriptedEvents::new(
            [
                click(button_for(Command::Down)),
                Scripted::Wait,
                key(KeyCode::Char('q')),
            ],
            &clock,
        );
        let mut app = new_app();
        app.run(&mut terminal, &mut events, &clock).unwrap();
        assert_eq!(app.game.snake().head(), Position::new(10, 11));
    }
}
