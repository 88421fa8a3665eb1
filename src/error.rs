use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `EpisimError` and maps to other errors to
/// convert to an `EpisimError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum EpisimError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CSVError(csv::Error),
    /// The four severity shares of a pathogen did not sum to one.
    InvalidShares {
        sum: f64,
    },
    ConfigError(String),
}

impl From<io::Error> for EpisimError {
    fn from(error: io::Error) -> Self {
        EpisimError::IoError(error)
    }
}

impl From<serde_json::Error> for EpisimError {
    fn from(error: serde_json::Error) -> Self {
        EpisimError::JsonError(error)
    }
}

impl From<csv::Error> for EpisimError {
    fn from(error: csv::Error) -> Self {
        EpisimError::CSVError(error)
    }
}

impl From<String> for EpisimError {
    fn from(error: String) -> Self {
        EpisimError::ConfigError(error)
    }
}

impl From<&str> for EpisimError {
    fn from(error: &str) -> Self {
        EpisimError::ConfigError(error.to_string())
    }
}

impl std::error::Error for EpisimError {}

impl Display for EpisimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EpisimError::InvalidShares { sum } => {
                write!(f, "Error: severity shares have to sum 1, instead they sum {sum:.4}")
            }
            EpisimError::ConfigError(message) => write!(f, "Error: {message}"),
            _ => write!(f, "Error: {self:?}"),
        }
    }
}
