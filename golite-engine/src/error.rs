use std::fmt;

use crate::event::Timestamp;

/// Faults raised by the engine.
///
/// A rejected move is not one of these: replay reports it through the
/// `accepted` flag so illegal moves never unwind the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoError {
    UnsupportedEvent { timestamp: Timestamp, kind: String },
    ComparatorMismatch,
    InvalidSize(u8),
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::UnsupportedEvent { timestamp, kind } => {
                write!(f, "unsupported event '{kind}' at timestamp {timestamp}")
            }
            GoError::ComparatorMismatch => write!(f, "journal comparator cannot order event"),
            GoError::InvalidSize(size) => write!(f, "invalid board size {size}"),
        }
    }
}

impl std::error::Error for GoError {}
