mod app;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod util;
use crate::app::{App, AppError, TerminalEvents};
use crate::config::{Config, ConfigError};
use crate::game::timer::SystemClock;
use crate::game::Game;
use anyhow::Context;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use lexopt::{Arg, Parser, ValueExt};
use log::info;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = concat!(
    "Usage: gridsnake [<options>]\n",
    "\n",
    "Play Snake in the terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>   Read configuration from <PATH>\n",
    "      --log-file <PATH> Write log messages to <PATH>\n",
    "      --width <N>       Make the board <N> cells wide\n",
    "      --height <N>      Make the board <N> cells tall\n",
    "      --wrap            Leaving one edge of the board enters the opposite one\n",
    "  -h, --help            Show this help message and exit\n",
    "  -V, --version         Show the program version and exit\n",
);

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
enum Mode {
    Run(Arguments),
    Help,
    Version,
}

impl Mode {
    fn from_parser(mut parser: Parser) -> Result<Mode, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("width") => args.width = Some(parser.value()?.parse()?),
                Arg::Long("height") => args.height = Some(parser.value()?.parse()?),
                Arg::Long("wrap") => args.wrap = true,
                Arg::Short('h') | Arg::Long("help") => return Ok(Mode::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Mode::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Mode::Run(args))
    }
}

/// Command-line settings, which take precedence over the configuration file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    width: Option<u16>,
    height: Option<u16>,
    wrap: bool,
}

impl Arguments {
    /// Load the configuration file (the one given on the command line, or
    /// else the default one, if it exists) and apply the command-line
    /// overrides to it
    fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path, false)?,
            None => Config::load(&Config::default_path()?, true)?,
        };
        if let Some(width) = self.width {
            config.game.width = width;
        }
        if let Some(height) = self.height {
            config.game.height = height;
        }
        if self.wrap {
            config.game.wraparound = true;
        }
        if let Some(ref path) = self.log_file {
            config.log.file = Some(path.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    match Mode::from_parser(Parser::from_env()) {
        Ok(Mode::Run(args)) => match run(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("gridsnake: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Mode::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Mode::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprint!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Arguments) -> anyhow::Result<()> {
    let config = args
        .load_config()
        .context("failed to load configuration")?;
    if let Some(ref path) = config.log.file {
        logging::init(path, config.log.level).context("failed to set up logging")?;
    }
    let settings = config.game_settings();
    info!(
        "Starting {} {} with a {}×{} board",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        settings.grid.width,
        settings.grid.height
    );
    let mut terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .map_err(AppError::from)
        .and_then(|()| {
            App::new(Game::new(settings)).run(&mut terminal, &mut TerminalEvents, &SystemClock)
        });
    let _ = execute!(io::stdout(), DisableFocusChange, DisableMouseCapture);
    ratatui::restore();
    r.context("game terminated abnormally")
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|ioe| ioe.kind() == ErrorKind::BrokenPipe)
    })
}
