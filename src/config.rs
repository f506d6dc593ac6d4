use crate::consts;
use crate::game::grid::Grid;
use crate::game::{GameSettings, Speed};
use log::LevelFilter;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Smallest grid width that still fits the whole starting snake
const MIN_GRID_WIDTH: u16 = 4;

/// Program configuration read from a configuration file
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Config {
    /// Board & scoring settings
    pub(crate) game: GameConfig,

    /// How fast the snake moves
    pub(crate) speed: SpeedConfig,

    /// Where & how much to log
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read, if the file's contents
    /// could not be deserialized, or if the settings are unusable.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        let config = toml::from_str::<Config>(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configured grid and speeds can actually be played
    pub(crate) fn validate(&self) -> Result<(), InvalidConfig> {
        let GameConfig { width, height, .. } = self.game;
        if !(MIN_GRID_WIDTH..=consts::MAX_GRID_SIDE).contains(&width) {
            return Err(InvalidConfig::Width(width));
        }
        if !(1..=consts::MAX_GRID_SIDE).contains(&height) {
            return Err(InvalidConfig::Height(height));
        }
        if self.game.points_per_food == 0 {
            return Err(InvalidConfig::ZeroPoints);
        }
        let SpeedConfig {
            initial, minimum, ..
        } = self.speed;
        if minimum.is_zero() {
            return Err(InvalidConfig::ZeroPeriod);
        }
        if minimum > initial {
            return Err(InvalidConfig::InvertedPeriods { initial, minimum });
        }
        Ok(())
    }

    /// The settings to start each game with
    pub(crate) fn game_settings(&self) -> GameSettings {
        GameSettings {
            grid: Grid::new(self.game.width, self.game.height, self.game.wraparound),
            points_per_food: self.game.points_per_food,
            speed: Speed {
                initial: self.speed.initial,
                step: self.speed.step,
                minimum: self.speed.minimum,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Width of the board, in cells
    pub(crate) width: u16,

    /// Height of the board, in cells
    pub(crate) height: u16,

    /// Whether the snake leaving one edge of the board comes back in on the
    /// opposite edge instead of dying
    pub(crate) wraparound: bool,

    pub(crate) points_per_food: u32,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            width: consts::DEFAULT_GRID_WIDTH,
            height: consts::DEFAULT_GRID_HEIGHT,
            wraparound: false,
            points_per_food: consts::POINTS_PER_FOOD,
        }
    }
}

/// Tick periods, given in the file as integer milliseconds
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct SpeedConfig {
    #[serde(rename = "initial-ms", deserialize_with = "millis")]
    pub(crate) initial: Duration,

    #[serde(rename = "step-ms", deserialize_with = "millis")]
    pub(crate) step: Duration,

    #[serde(rename = "minimum-ms", deserialize_with = "millis")]
    pub(crate) minimum: Duration,
}

impl Default for SpeedConfig {
    fn default() -> SpeedConfig {
        SpeedConfig {
            initial: consts::INITIAL_TICK_PERIOD,
            step: consts::TICK_PERIOD_STEP,
            minimum: consts::MINIMUM_TICK_PERIOD,
        }
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct LogConfig {
    /// File to write log messages to.  Nothing is logged if this is unset.
    pub(crate) file: Option<PathBuf>,

    /// Most verbose level to log at, unless overridden by `RUST_LOG`
    pub(crate) level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration")]
    Invalid(#[from] InvalidConfig),
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum InvalidConfig {
    #[error("grid width must be between {min} and {max}, got {0}", min = MIN_GRID_WIDTH, max = consts::MAX_GRID_SIDE)]
    Width(u16),
    #[error("grid height must be between 1 and {max}, got {0}", max = consts::MAX_GRID_SIDE)]
    Height(u16),
    #[error("points per food must be nonzero")]
    ZeroPoints,
    #[error("minimum tick period must be nonzero")]
    ZeroPeriod,
    #[error("minimum tick period ({minimum:?}) is longer than the initial period ({initial:?})")]
    InvertedPeriods { initial: Duration, minimum: Duration },
}
