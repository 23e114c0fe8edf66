// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Nothing in the engine is allowed to halt message processing: decode
//! failures are logged and skipped, transport failures are logged and
//! forgotten. `Error` exists so the fallible edges (settings I/O, message
//! decoding, host reporting) have a single type to converge on.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Settings file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),

    /// Settings file contained invalid TOML.
    #[error("config error: {0}")]
    Config(String),

    /// Inbound host message was not valid JSON or had the wrong shape.
    #[error("malformed host message: {0}")]
    Decode(String),

    /// Outbound report to the host failed.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
