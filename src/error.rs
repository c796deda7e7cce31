//! Error types returned by the engine.

use crate::board::Point;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// Point is outside the board
    OutOfBounds,
    /// Point is not empty
    Occupied,
    /// Move retakes a ko immediately
    Ko,
    /// Move would leave its own group without liberties
    Suicide,
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalReason::OutOfBounds => write!(f, "point off the board"),
            IllegalReason::Occupied => write!(f, "point not empty"),
            IllegalReason::Ko => write!(f, "retakes ko"),
            IllegalReason::Suicide => write!(f, "suicide"),
        }
    }
}

/// Errors surfaced by sessions and the capture engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GoError {
    #[error("illegal move at {point:?}: {reason}")]
    IllegalMove { point: Point, reason: IllegalReason },

    #[error("game is already over")]
    GameOver,

    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl GoError {
    pub(crate) fn illegal(point: Point, reason: IllegalReason) -> Self {
        GoError::IllegalMove { point, reason }
    }

    /// The rejection reason, if this is an illegal-move error.
    pub fn illegal_reason(&self) -> Option<IllegalReason> {
        match self {
            GoError::IllegalMove { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GoError>;
