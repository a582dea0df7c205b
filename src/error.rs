//! Caller contract violations
//!
//! These are bugs in whoever drives the core (usually the controller layer),
//! never game outcomes. Wins and draws are reported through
//! [`GameState`](crate::position::GameState) instead.

use crate::position::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("board dimensions {width}x{height} do not fit the packed layout")]
    InvalidDimensions { width: usize, height: usize },

    #[error("column {column} out of range for a board {width} columns wide")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("slot ({column}, {row}) is not ready for a drop, column height is {height}")]
    SlotNotReady {
        column: usize,
        row: usize,
        height: usize,
    },

    #[error("player id {0} is not 1 or 2")]
    InvalidPlayer(u8),

    #[error("cannot search a terminal position ({0:?})")]
    TerminalPosition(GameState),

    #[error("position has no legal move")]
    NoLegalMove,
}
