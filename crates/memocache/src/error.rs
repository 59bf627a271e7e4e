//! Error types for memocache

use std::fmt;

/// Result type alias for memocache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring caches or reading workloads
///
/// Cache lookups themselves never fail: a miss is answered by computing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cache capacity of zero
    ZeroCapacity,

    /// Malformed textual query
    Parse(String),

    /// Workload parameters that cannot produce valid queries
    InvalidWorkload(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "Cache capacity must be greater than 0"),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::InvalidWorkload(msg) => write!(f, "Invalid workload: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::Parse(err.to_string())
    }
}
