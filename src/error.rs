//! Error type shared by every module of the crate.

use std::fmt::{self, Display};

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PfspError>;

/// The error type for flow-shop construction and search operations.
///
/// Search itself is deterministic given its inputs, so errors are either
/// input-validation failures reported before any work starts, or requests
/// for operations a neighborhood cannot perform.
#[derive(Debug)]
pub enum PfspError {
    /// The instance is unusable: zero jobs or machines, inconsistent
    /// dimensions, or a reference temperature that evaluates to zero.
    InvalidInstance(String),
    /// A neighborhood was asked for something it cannot provide, e.g. a
    /// uniform sample from a base permutation with no valid move.
    UnsupportedOperation(String),
    /// A textual tag did not name a known variant.
    UnknownEnumValue {
        /// The enum being parsed (e.g. "pivot rule").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A runner configuration failed validation.
    InvalidConfig(String),
    /// The instance text could not be tokenized or parsed.
    Parse(String),
    /// An I/O error occurred while reading an instance.
    Io(std::io::Error),
}

impl Display for PfspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInstance(msg) => write!(f, "invalid instance: {msg}"),
            Self::UnsupportedOperation(msg) => write!(f, "unsupported operation: {msg}"),
            Self::UnknownEnumValue { kind, value } => {
                write!(f, "unknown {kind}: '{value}'")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for PfspError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PfspError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
