use eqn_solver::config::ConfigError;
use rustyline::error::ReadlineError;
use std::{fmt, io};

/// Utility enum to package errors that can occur outside of solving itself.
#[derive(Debug)]
pub enum Error {
    /// The config file could not be loaded.
    Config(ConfigError),

    /// Reading from stdin failed.
    Io(io::Error),

    /// The line editor failed.
    Readline(ReadlineError),
}

impl Error {
    /// Report the error to stderr, without source highlighting.
    pub fn report_to_stderr(&self) {
        eprintln!("error: {}", self);
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "could not read input: {}", err),
            Self::Readline(err) => write!(f, "{}", err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Self::Readline(err)
    }
}
