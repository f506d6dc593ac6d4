mod direction;
mod food;
pub(crate) mod grid;
mod input;
pub(crate) mod layout;
pub(crate) mod paused;
mod render;
pub(crate) mod snake;
pub(crate) mod timer;
pub(crate) use self::direction::Direction;
use self::food::FoodSpawner;
use self::grid::{BoardExhausted, Grid};
use self::input::{command_for_event, TurnQueue};
use self::layout::GameLayout;
use self::paused::{PauseOpt, Paused};
use self::snake::{Collision, Snake, Step};
use self::timer::TickTimer;
use crate::command::Command;
use crate::consts;
use crossterm::event::Event;
use log::{debug, info, trace};
use rand::Rng;
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

/// Everything about a game that is fixed for the length of a session
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameSettings {
    pub(crate) grid: Grid,
    pub(crate) points_per_food: u32,
    pub(crate) speed: Speed,
}

impl Default for GameSettings {
    fn default() -> GameSettings {
        GameSettings {
            grid: Grid::new(consts::DEFAULT_GRID_WIDTH, consts::DEFAULT_GRID_HEIGHT, false),
            points_per_food: consts::POINTS_PER_FOOD,
            speed: Speed::default(),
        }
    }
}

/// How the time between ticks shrinks as the snake eats
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Speed {
    pub(crate) initial: Duration,
    pub(crate) step: Duration,
    pub(crate) minimum: Duration,
}

impl Speed {
    /// The tick period once `eaten` pieces of food have been eaten
    pub(crate) fn period_after(self, eaten: u32) -> Duration {
        self.initial
            .saturating_sub(self.step.saturating_mul(eaten))
            .max(self.minimum)
    }
}

impl Default for Speed {
    fn default() -> Speed {
        Speed {
            initial: consts::INITIAL_TICK_PERIOD,
            step: consts::TICK_PERIOD_STEP,
            minimum: consts::MINIMUM_TICK_PERIOD,
        }
    }
}

/// A Snake game session.
///
/// The game exclusively owns its state.  Input only ever reaches the snake
/// through the pending-turn slot, which is drained once per tick, and the
/// renderer only reads.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    settings: GameSettings,
    spawner: FoodSpawner<R>,
    snake: Snake,
    food: Option<Position>,
    turns: TurnQueue,
    eaten: u32,
    score: u32,
    /// Best score seen during this session, kept across restarts
    best: u32,
    status: Status,
    timer: TickTimer,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(settings: GameSettings) -> Self {
        Game::new_with_rng(settings, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    /// Create a game laid out and ready to go, waiting for the player to
    /// start it
    pub(crate) fn new_with_rng(settings: GameSettings, rng: R) -> Game<R> {
        let snake = Snake::initial(settings.grid);
        let mut game = Game {
            settings,
            spawner: FoodSpawner::new(rng),
            snake,
            food: None,
            turns: TurnQueue::default(),
            eaten: 0,
            score: 0,
            best: 0,
            status: Status::Idle,
            timer: TickTimer::new(settings.speed.initial),
        };
        game.reset();
        game
    }

    /// Put the snake, food, and score back to how every game starts
    fn reset(&mut self) {
        self.snake = Snake::initial(self.settings.grid);
        self.food = self.spawner.respawn(self.settings.grid, &self.snake).ok();
        self.turns.clear();
        self.eaten = 0;
        self.score = 0;
        self.timer = TickTimer::new(self.settings.speed.initial);
        self.status = Status::Idle;
    }

    /// Start ticking an idle game
    pub(crate) fn start(&mut self, now: Instant) {
        if self.status == Status::Idle {
            info!(
                "Starting game on {}×{} grid",
                self.settings.grid.width, self.settings.grid.height
            );
            self.status = Status::Running;
            self.timer.start(now);
        }
    }

    /// Throw away the current game and immediately start a fresh one
    pub(crate) fn restart(&mut self, now: Instant) {
        info!("Restarting game");
        self.reset();
        self.start(now);
    }

    /// Advance the game by one tick if one is due at `now`.  Returns the
    /// result of the tick, if one happened.
    pub(crate) fn update(&mut self, now: Instant) -> Option<Step> {
        if self.timer.fire_if_due(now) {
            self.tick()
        } else {
            None
        }
    }

    /// Perform one step of the simulation.  Does nothing unless the game is
    /// running.
    pub(crate) fn tick(&mut self) -> Option<Step> {
        if !self.running() {
            return None;
        }
        if let Some(direction) = self.turns.take() {
            self.snake.turn(direction);
        }
        let step = self.snake.advance(self.settings.grid, self.food);
        trace!(
            "Tick: head={:?} ate_food={} collision={:?}",
            step.new_head,
            step.ate_food,
            step.collision
        );
        if let Some(cause) = step.collision {
            let at = step.new_head.unwrap_or_else(|| self.snake.head());
            self.finish(Outcome::Died { cause, at });
            return Some(step);
        }
        if step.ate_food {
            self.eaten = self.eaten.saturating_add(1);
            self.score = self.score.saturating_add(self.settings.points_per_food);
            self.best = self.best.max(self.score);
            self.timer
                .set_period(self.settings.speed.period_after(self.eaten));
            match self.spawner.respawn(self.settings.grid, &self.snake) {
                Ok(pos) => self.food = Some(pos),
                Err(BoardExhausted) => {
                    self.food = None;
                    self.finish(Outcome::Won);
                }
            }
        }
        Some(step)
    }
}

impl<R> Game<R> {
    pub(crate) fn grid(&self) -> Grid {
        self.settings.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn best(&self) -> u32 {
        self.best
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    /// The current time between ticks
    pub(crate) fn tick_period(&self) -> Duration {
        self.timer.period()
    }

    /// How long until the next tick is due, or `None` if no tick is
    /// scheduled (i.e., the game is not running)
    pub(crate) fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    pub(crate) fn running(&self) -> bool {
        self.status == Status::Running
    }

    /// Ask for the snake to turn on the next tick.  Reversals are dropped.
    pub(crate) fn request_turn(&mut self, direction: Direction) -> bool {
        self.turns.request(direction, self.snake.direction())
    }

    pub(crate) fn pause(&mut self, now: Instant) {
        if self.running() {
            debug!("Pausing game");
            self.timer.pause(now);
            self.status = Status::Paused(Paused::new());
        }
    }

    pub(crate) fn resume(&mut self, now: Instant) {
        if matches!(self.status, Status::Paused(_)) {
            debug!("Resuming game");
            self.timer.resume(now);
            self.status = Status::Running;
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.timer.cancel();
        self.best = self.best.max(self.score);
        match outcome {
            Outcome::Died { cause, at } => info!(
                "Game over: snake {} at ({}, {}); score {}",
                cause.as_str(),
                at.x,
                at.y,
                self.score
            ),
            Outcome::Won => info!("Game won: board filled; score {}", self.score),
        }
        self.status = Status::GameOver(outcome);
    }
}

impl<R: Rng> Game<R> {
    /// Handle a terminal event received while the game screen of size `area`
    /// is displayed.  Returns `Some(Exit)` if the user asked to quit.
    pub(crate) fn handle_event(&mut self, event: &Event, area: Rect, now: Instant) -> Option<Exit> {
        if *event == Event::FocusLost {
            self.pause(now);
            return None;
        }
        let layout = GameLayout::new(area, self.grid());
        let cmd = command_for_event(event, &layout)?;
        self.handle_command(cmd, now)
    }

    /// Act on a command from the keyboard or an on-screen button
    pub(crate) fn handle_command(&mut self, cmd: Command, now: Instant) -> Option<Exit> {
        match self.status {
            Status::Idle => match cmd {
                Command::Quit | Command::Q => return Some(Exit),
                Command::Enter | Command::Space | Command::P => self.start(now),
                Command::Up | Command::Down | Command::Left | Command::Right => {
                    self.start(now);
                    if let Some(direction) = cmd.direction() {
                        self.request_turn(direction);
                    }
                }
                _ => (),
            },
            Status::Running => match cmd {
                Command::Quit | Command::Q => return Some(Exit),
                Command::Esc | Command::P | Command::Space => self.pause(now),
                _ => {
                    if let Some(direction) = cmd.direction() {
                        self.request_turn(direction);
                    }
                }
            },
            Status::Paused(ref mut paused) => match paused.handle_command(cmd)? {
                PauseOpt::Resume => self.resume(now),
                PauseOpt::Restart => self.restart(now),
                PauseOpt::Quit => return Some(Exit),
            },
            Status::GameOver(_) => match cmd {
                Command::R | Command::Enter => self.restart(now),
                Command::Quit | Command::Q => return Some(Exit),
                _ => (),
            },
        }
        None
    }
}

/// Returned by [`Game::handle_event()`] when the user wants to leave
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Exit;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    /// Laid out and waiting for the player to start
    Idle,
    Running,
    Paused(Paused),
    GameOver(Outcome),
}

/// How a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    /// The snake ran into something at `at`
    Died { cause: Collision, at: Position },
    /// The snake has filled the board and there are no more cells to place
    /// food in.
    Won,
}
