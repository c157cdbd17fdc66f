//! Error types for configuration loading and the terminal front end.
//!
//! The simulation itself never fails; everything here comes from reading
//! files, parsing arguments, or talking to the terminal.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown color: {0} (expected a palette name or RRGGBB)")]
    UnknownColor(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
