//! Domain error types

use thiserror::Error;

/// Error when parsing a recording duration entered as minutes
#[derive(Debug, Clone, Error)]
#[error("Invalid duration: \"{input}\". Expected a positive whole number of minutes")]
pub struct DurationParseError {
    pub input: String,
}
