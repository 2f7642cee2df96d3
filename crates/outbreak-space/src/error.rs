//! Error types for space construction.

use std::fmt;

/// Errors arising from space construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// The plane's side length is zero, negative, or not finite.
    InvalidSize {
        /// The rejected side length.
        value: f64,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { value } => {
                write!(f, "grid size must be finite and positive, got {value}")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
