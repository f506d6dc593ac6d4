use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::path::Path;
use thiserror::Error;

/// Send log messages at `level` and above to the file at `path`, truncating
/// it first.  `RUST_LOG`, if set, takes precedence over `level`.
///
/// Logging never goes to the terminal, as that would scribble over the game
/// screen.
pub(crate) fn init(path: &Path, level: LevelFilter) -> Result<(), LoggingError> {
    let file = fs_err::File::create(path)?;
    Builder::new()
        .filter_level(level)
        .parse_env(Env::default())
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

#[derive(Debug, Error)]
pub(crate) enum LoggingError {
    #[error("failed to open log file")]
    Open(#[from] std::io::Error),
    #[error("failed to install logger")]
    Install(#[from] log::SetLoggerError),
}
