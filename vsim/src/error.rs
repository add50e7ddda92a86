//! Crate-wide error type
//!
//! Every check happens at the API boundary (spawn, configuration, scenario
//! loading). The per-sub-step loop itself never fails.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Handle that does not refer to a spawned body.
    #[error("unknown body handle: {0}")]
    UnknownBody(usize),

    /// Scenario file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Scenario file is not valid YAML for a `ScenarioConfig`.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidParam(msg.into())
    }
}
