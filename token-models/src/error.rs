use displaydoc::Display;
use thiserror::Error;

/// Models result
pub type ModelsResult<T, E = ModelsError> = core::result::Result<T, E>;

/// Models error
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum ModelsError {
    /// Serialization error: {0}
    SerializeError(String),
    /// Deserialization error: {0}
    DeserializeError(String),
    /// Wrong prefix for identifier: expected {0}, got {1}
    WrongPrefix(String, String),
    /// Identifier parsing error: {0}
    IdParseError(String),
}
