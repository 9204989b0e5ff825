//! Error types for board and robot operations.
//!
//! None of these are fatal: the interpreter turns every one of them into an
//! [`Outcome::Rejected`](crate::Outcome::Rejected) and carries on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a command or a board operation can be refused.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulatorError {
    /// Unknown command word, or PLACE arguments that do not parse.
    #[error("malformed command: {0}")]
    MalformedCommand(String),

    /// Target tile lies outside the board.
    #[error("tile [{x},{y}] is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    /// Target tile already holds an obstruction.
    #[error("tile [{x},{y}] is not empty")]
    TileOccupied { x: i32, y: i32 },

    /// The robot has not been placed on a board yet.
    #[error("robot is not placed on the board")]
    NotPlaced,

    /// The robot is placed on a different board than the one passed in.
    #[error("robot is placed on another board")]
    ForeignBoard,

    /// A board needs at least one tile per side.
    #[error("invalid board size {0}: side length must be positive")]
    InvalidBoardSize(u32),
}

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimulatorError>;
