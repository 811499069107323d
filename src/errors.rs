//! All errors that can occur in the subflock library.

use std::fmt;

pub type Result<T> = std::result::Result<T, SubflockError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubflockError {
    /// A roster or pairing record is structurally invalid.
    MalformedInput(String),
    /// A name does not resolve to any bird in the flock.
    UnknownBird(String),
    /// A round ran out of candidates before its quotas were met.
    FlockExhausted(String),
    ReadError(String),
    WriteError(String),
}

impl fmt::Display for SubflockError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SubflockError::MalformedInput(message) => {
                write!(f, "MalformedInput: {}", message)
            }
            SubflockError::UnknownBird(name) => {
                write!(f, "UnknownBird: no bird named {}", name)
            }
            SubflockError::FlockExhausted(message) => {
                write!(f, "FlockExhausted: {}", message)
            }
            SubflockError::ReadError(message) => write!(f, "ReadError: {}", message),
            SubflockError::WriteError(message) => write!(f, "WriteError: {}", message),
        }
    }
}

impl std::error::Error for SubflockError {}
