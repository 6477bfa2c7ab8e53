use std::fmt;

use recite_core::IntegrityError;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    InvalidData(String),
    /// The snapshot parsed but violates a scheduling invariant. Unlike
    /// a malformed file this is never silently reset.
    Corrupt(IntegrityError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            StoreError::Corrupt(e) => write!(f, "corrupt snapshot: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<IntegrityError> for StoreError {
    fn from(e: IntegrityError) -> Self {
        StoreError::Corrupt(e)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
